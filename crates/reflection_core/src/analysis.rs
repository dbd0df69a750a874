//! crates/reflection_core/src/analysis.rs
//!
//! The text-signal analyzer: derives an emotion classification, four
//! 1-10 scores, topical tags, and a one-sentence summary from a free-text
//! reflection. It is a keyword-frequency heuristic with bounded random
//! jitter layered on for variety; both the randomness and the wall clock
//! come in through ports so the whole routine is reproducible under test.

use std::sync::Arc;

use chrono::Timelike;

use crate::domain::EmotionAnalysis;
use crate::ports::{Clock, RandomSource};

/// The full label catalog the analyzer can emit.
const EMOTIONS: &[&str] = &[
    "grateful", "peaceful", "excited", "content", "hopeful", "inspired",
    "anxious", "overwhelmed", "sad", "frustrated", "lonely", "confused",
    "proud", "confident", "loved", "energetic", "calm", "reflective",
];

const MOOD_POSITIVE: &[&str] = &[
    "amazing", "great", "wonderful", "happy", "joy", "love", "success",
    "accomplished", "grateful", "blessed",
];
const MOOD_NEGATIVE: &[&str] = &[
    "difficult", "hard", "struggle", "sad", "angry", "frustrated",
    "worried", "anxious", "stressed",
];

const ENERGY_HIGH: &[&str] = &[
    "energetic", "motivated", "excited", "pumped", "active", "dynamic",
    "vibrant", "charged", "powerful", "strong", "fresh", "alert", "awake",
    "alive", "invigorated", "enthusiastic", "spirited",
];
const ENERGY_LOW: &[&str] = &[
    "tired", "exhausted", "drained", "sluggish", "lethargic", "weary",
    "sleepy", "fatigued", "worn", "depleted", "drowsy", "spent", "burned",
    "wiped",
];

const STRESS_HIGH: &[&str] = &[
    "stressed", "overwhelmed", "pressure", "deadline", "urgent", "panic",
    "anxious", "worried", "tense", "frantic", "rushed", "chaos", "crisis",
    "emergency", "hectic", "demanding", "intense",
];
const STRESS_LOW: &[&str] = &[
    "calm", "relaxed", "peaceful", "serene", "balanced", "zen", "tranquil",
    "composed", "centered", "steady",
];

const PRODUCTIVITY_HIGH: &[&str] = &[
    "productive", "accomplished", "completed", "finished", "achieved",
    "successful", "efficient", "focused", "organized", "progress",
    "delivered", "executed", "implemented", "solved", "created",
];
const PRODUCTIVITY_LOW: &[&str] = &[
    "unproductive", "distracted", "procrastinated", "delayed", "stuck",
    "blocked", "unfocused", "scattered",
];

// Whole-token activity sets that nudge a score when any of them appears.
const ENERGY_BOOSTERS: &[&str] = &["morning", "coffee", "exercise", "workout", "run", "gym"];
const ENERGY_DRAINERS: &[&str] = &["evening", "late", "night", "bed", "sleep"];
const ENERGY_RECOVERY: &[&str] = &["lunch", "break", "rest", "vacation"];
const STRESS_WORK: &[&str] = &["meeting", "deadline", "presentation", "interview", "boss", "client"];
const STRESS_RELIEF: &[&str] = &["vacation", "weekend", "break", "holiday", "spa", "massage"];
const STRESS_DAILY: &[&str] = &["traffic", "commute", "bills", "money", "problem"];
const PRODUCTIVITY_WINS: &[&str] = &["goals", "completed", "finished", "done"];
const PRODUCTIVITY_STALLS: &[&str] = &["distracted", "procrastinated", "delayed"];

// Emotion candidates per mood band; the first two are taken.
const HIGH_MOOD_EMOTIONS: &[&str] = &["grateful", "content", "hopeful", "inspired"];
const MID_MOOD_EMOTIONS: &[&str] = &["reflective", "calm", "peaceful"];
const LOW_MOOD_EMOTIONS: &[&str] = &["anxious", "overwhelmed", "frustrated"];

const TAG_CATALOG: &[&str] = &[
    "work", "family", "friends", "health", "exercise", "nature", "travel",
    "learning", "creativity", "goals", "relationships", "mindfulness",
    "growth", "challenges", "success", "memories", "dreams", "productivity",
    "leadership", "teamwork", "innovation", "strategy", "networking",
    "skill-development", "career", "business", "finance", "wellness",
];

const CONTEXTUAL_TAGS: &[(&[&str], &str)] = &[
    (&["morning", "coffee", "breakfast"], "morning routine"),
    (&["evening", "sunset", "dinner"], "evening reflection"),
    (&["book", "read", "story"], "reading"),
    (&["meeting", "presentation", "project"], "professional"),
    (&["goal", "target", "achievement"], "goal-tracking"),
];

const MAX_TAGS: usize = 4;

/// Heuristic analyzer over a reflection's free text.
pub struct TextSignalAnalyzer {
    rng: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
}

impl TextSignalAnalyzer {
    pub fn new(rng: Arc<dyn RandomSource>, clock: Arc<dyn Clock>) -> Self {
        Self { rng, clock }
    }

    /// Scores a thought and picks its emotion labels.
    ///
    /// Always returns a result; empty input yields the base scores plus
    /// jitter. Output varies run to run on purpose (jitter, the optional
    /// extra emotion, confidence), and additionally depends on the hour
    /// of day through the energy adjustment.
    pub fn analyze(&self, thought: &str) -> EmotionAnalysis {
        let lowered = thought.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();

        // Non-neutral starting priors: slightly optimistic mood, low
        // energy, elevated stress.
        let mut mood: f64 = 6.0;
        let mut energy: f64 = 4.0;
        let mut stress: f64 = 6.0;
        let mut productivity: f64 = 4.0;

        // Negative weights are larger in magnitude than their positive
        // counterparts on every axis.
        mood += substring_matches(&words, MOOD_POSITIVE) * 2.2
            - substring_matches(&words, MOOD_NEGATIVE) * 2.5;
        mood += (self.rng.next_f64() - 0.5) * 2.0;
        mood = mood.clamp(1.0, 10.0);

        energy += substring_matches(&words, ENERGY_HIGH) * 3.2
            - substring_matches(&words, ENERGY_LOW) * 3.8;
        if mentions_any(&words, ENERGY_BOOSTERS) {
            energy += 2.5;
        }
        if mentions_any(&words, ENERGY_DRAINERS) {
            energy -= 2.2;
        }
        if mentions_any(&words, ENERGY_RECOVERY) {
            energy += 1.5;
        }
        let hour = self.clock.now().hour();
        if (6..=10).contains(&hour) {
            energy += 1.0;
        }
        if (14..=16).contains(&hour) {
            energy -= 0.5;
        }
        if hour >= 20 {
            energy -= 1.5;
        }
        energy += (self.rng.next_f64() - 0.5) * 3.0;
        energy = energy.clamp(1.0, 10.0);

        stress += substring_matches(&words, STRESS_HIGH) * 2.8
            - substring_matches(&words, STRESS_LOW) * 3.5;
        if mentions_any(&words, STRESS_WORK) {
            stress += 2.0;
        }
        if mentions_any(&words, STRESS_RELIEF) {
            stress -= 2.5;
        }
        if mentions_any(&words, STRESS_DAILY) {
            stress += 1.5;
        }
        stress += (self.rng.next_f64() - 0.5) * 2.5;
        stress = stress.clamp(1.0, 10.0);

        productivity += substring_matches(&words, PRODUCTIVITY_HIGH) * 3.5
            - substring_matches(&words, PRODUCTIVITY_LOW) * 4.0;
        if mentions_any(&words, PRODUCTIVITY_WINS) {
            productivity += 1.0;
        }
        if mentions_any(&words, PRODUCTIVITY_STALLS) {
            productivity -= 1.0;
        }
        productivity = productivity.clamp(1.0, 10.0);

        let band = if mood >= 7.0 {
            HIGH_MOOD_EMOTIONS
        } else if mood >= 4.0 {
            MID_MOOD_EMOTIONS
        } else {
            LOW_MOOD_EMOTIONS
        };
        let mut labels: Vec<String> = band.iter().take(2).map(|e| e.to_string()).collect();

        // Half the time, append one extra label from the rest of the catalog.
        let remaining: Vec<&str> = EMOTIONS
            .iter()
            .copied()
            .filter(|e| !labels.iter().any(|l| l == e))
            .collect();
        if self.rng.next_f64() > 0.5 && !remaining.is_empty() {
            labels.push(remaining[self.pick_index(remaining.len())].to_string());
        }

        let confidence = 0.7 + self.rng.next_f64() * 0.3;

        let mut labels = labels.into_iter();
        EmotionAnalysis {
            primary: labels.next().unwrap_or_else(|| "reflective".to_string()),
            secondary: labels.collect(),
            confidence,
            mood_score: round1(mood),
            energy_level: round1(energy),
            stress_level: round1(stress),
            productivity_score: round1(productivity),
        }
    }

    /// Derives up to four topical tags from the thought: catalog tags by
    /// bidirectional substring match, then a few contextual tags keyed on
    /// specific tokens. First found wins; there is no ranking.
    pub fn suggest_tags(&self, thought: &str) -> Vec<String> {
        let lowered = thought.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();

        let mut tags: Vec<String> = TAG_CATALOG
            .iter()
            .filter(|tag| words.iter().any(|w| w.contains(*tag) || tag.contains(w)))
            .map(|tag| tag.to_string())
            .collect();

        for (triggers, tag) in CONTEXTUAL_TAGS {
            if mentions_any(&words, triggers) && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }

        tags.truncate(MAX_TAGS);
        tags
    }

    /// One templated summary sentence referencing the primary emotion.
    pub fn summarize(&self, primary: &str) -> String {
        match self.pick_index(6) {
            0 => format!(
                "Today's reflection shows a {primary} mindset with themes of personal and professional growth."
            ),
            1 => format!(
                "This entry captures a moment of {primary} introspection that could drive actionable insights."
            ),
            2 => format!(
                "The thoughts shared reveal {primary} feelings with potential for strategic planning."
            ),
            3 => format!(
                "Today's entry demonstrates {primary} emotional processing that supports decision-making."
            ),
            4 => format!(
                "This reflection indicates {primary} energy that could be channeled into goal achievement."
            ),
            _ => format!(
                "The insights here show {primary} awareness that supports leadership development."
            ),
        }
    }

    fn pick_index(&self, len: usize) -> usize {
        ((self.rng.next_f64() * len as f64) as usize).min(len - 1)
    }
}

/// Count tokens that contain any of the keywords. Substring on purpose:
/// "accomplishments" matches "accomplished" the same way "stressful"
/// matches "stress"-family keywords.
fn substring_matches(words: &[&str], keywords: &[&str]) -> f64 {
    words
        .iter()
        .filter(|w| keywords.iter().any(|k| w.contains(k)))
        .count() as f64
}

/// Whole-token membership check, applied once per set regardless of how
/// many tokens match.
fn mentions_any(words: &[&str], set: &[&str]) -> bool {
    words.iter().any(|w| set.contains(w))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FixedClock, FixedRandom, SequenceRandom};
    use crate::ports::ThreadRandom;

    /// An analyzer with zero jitter (every draw is 0.5) at noon, so no
    /// time-of-day adjustment applies either.
    fn neutral_analyzer() -> TextSignalAnalyzer {
        TextSignalAnalyzer::new(
            Arc::new(FixedRandom::new(0.5)),
            Arc::new(FixedClock::at_hour(12)),
        )
    }

    #[test]
    fn empty_input_yields_base_scores_under_fixed_randomness() {
        let analysis = neutral_analyzer().analyze("");
        assert_eq!(analysis.mood_score, 6.0);
        assert_eq!(analysis.energy_level, 4.0);
        assert_eq!(analysis.stress_level, 6.0);
        assert_eq!(analysis.productivity_score, 4.0);
        assert_eq!(analysis.primary, "reflective");
        assert_eq!(analysis.secondary, vec!["calm".to_string()]);
        assert_eq!(analysis.confidence, 0.7 + 0.5 * 0.3);
    }

    #[test]
    fn scores_stay_on_scale_for_arbitrary_input() {
        let analyzer = TextSignalAnalyzer::new(
            Arc::new(ThreadRandom),
            Arc::new(FixedClock::at_hour(21)),
        );
        for thought in [
            "",
            "amazing wonderful happy joy love success accomplished grateful blessed",
            "difficult hard struggle sad angry frustrated worried anxious stressed",
            "stressed overwhelmed pressure deadline urgent panic crisis emergency",
            "the quick brown fox jumps over the lazy dog",
        ] {
            let a = analyzer.analyze(thought);
            for score in [a.mood_score, a.energy_level, a.stress_level, a.productivity_score] {
                assert!((1.0..=10.0).contains(&score), "{score} out of range for {thought:?}");
                assert_eq!(score, round1(score), "{score} not rounded to one decimal");
            }
            assert!((0.7..1.0).contains(&a.confidence));
            assert!(!a.primary.is_empty());
        }
    }

    #[test]
    fn single_positive_keyword_raises_mood_by_its_weight() {
        let analysis = neutral_analyzer().analyze("amazing");
        assert_eq!(analysis.mood_score, 8.2);
        assert_eq!(analysis.primary, "grateful");
        assert_eq!(analysis.secondary, vec!["content".to_string()]);
    }

    #[test]
    fn negative_keywords_floor_at_one() {
        // 6.0 - 2 * 2.5 clamps to the bottom of the scale.
        let analysis = neutral_analyzer().analyze("difficult struggle");
        assert_eq!(analysis.mood_score, 1.0);
        assert_eq!(analysis.primary, "anxious");
    }

    #[test]
    fn keyword_match_is_substring_not_exact_word() {
        // "blessedly" contains "blessed".
        let analysis = neutral_analyzer().analyze("blessedly quiet day");
        assert_eq!(analysis.mood_score, 8.2);
    }

    #[test]
    fn activity_sets_apply_once_no_matter_how_many_tokens_match() {
        // morning + coffee + run are all in the same booster set: one +2.5.
        let analysis = neutral_analyzer().analyze("morning coffee run");
        assert_eq!(analysis.energy_level, 6.5);
    }

    #[test]
    fn evening_tokens_drain_energy() {
        let analysis = neutral_analyzer().analyze("late night");
        assert_eq!(analysis.energy_level, round1(4.0 - 2.2));
    }

    #[test]
    fn morning_hours_boost_energy() {
        let analyzer = TextSignalAnalyzer::new(
            Arc::new(FixedRandom::new(0.5)),
            Arc::new(FixedClock::at_hour(7)),
        );
        assert_eq!(analyzer.analyze("").energy_level, 5.0);
    }

    #[test]
    fn late_hours_drain_energy() {
        let analyzer = TextSignalAnalyzer::new(
            Arc::new(FixedRandom::new(0.5)),
            Arc::new(FixedClock::at_hour(21)),
        );
        assert_eq!(analyzer.analyze("").energy_level, 2.5);
    }

    #[test]
    fn afternoon_dip_is_smaller() {
        let analyzer = TextSignalAnalyzer::new(
            Arc::new(FixedRandom::new(0.5)),
            Arc::new(FixedClock::at_hour(15)),
        );
        assert_eq!(analyzer.analyze("").energy_level, 3.5);
    }

    #[test]
    fn deadline_is_both_keyword_and_work_context() {
        // One substring match (+2.8) plus the work-context bump (+2.0)
        // pushes stress past the ceiling.
        let analysis = neutral_analyzer().analyze("meeting deadline");
        assert_eq!(analysis.stress_level, 10.0);
    }

    #[test]
    fn vacation_relieves_stress_and_restores_energy() {
        let analysis = neutral_analyzer().analyze("vacation");
        assert_eq!(analysis.stress_level, 3.5);
        assert_eq!(analysis.energy_level, 5.5);
    }

    #[test]
    fn completion_words_stack_keyword_and_context_for_productivity() {
        // "completed": +3.5 keyword weight and +1.0 completion context.
        let analysis = neutral_analyzer().analyze("completed");
        assert_eq!(analysis.productivity_score, 8.5);
    }

    #[test]
    fn productivity_has_no_jitter() {
        // Whatever the draw, productivity for neutral text is exactly base.
        for draw in [0.0, 0.25, 0.75, 0.999] {
            let analyzer = TextSignalAnalyzer::new(
                Arc::new(FixedRandom::new(draw)),
                Arc::new(FixedClock::at_hour(12)),
            );
            assert_eq!(analyzer.analyze("nothing notable").productivity_score, 4.0);
        }
    }

    #[test]
    fn extra_emotion_appended_when_the_draw_says_so() {
        // Draws: mood jitter, energy jitter, stress jitter, extra-emotion
        // gate (0.9 > 0.5), extra-emotion index, confidence.
        let rng = SequenceRandom::new(vec![0.5, 0.5, 0.5, 0.9, 0.0, 0.5]);
        let analyzer = TextSignalAnalyzer::new(Arc::new(rng), Arc::new(FixedClock::at_hour(12)));
        let analysis = analyzer.analyze("");
        assert_eq!(analysis.primary, "reflective");
        // Index 0 of the catalog minus {reflective, calm} is "grateful".
        assert_eq!(
            analysis.secondary,
            vec!["calm".to_string(), "grateful".to_string()]
        );
    }

    #[test]
    fn tags_come_from_catalog_in_order_and_cap_at_four() {
        let tags = neutral_analyzer()
            .suggest_tags("work family friends health exercise travel");
        assert_eq!(tags, vec!["work", "family", "friends", "health"]);
    }

    #[test]
    fn tag_match_is_bidirectional_substring() {
        // Token "careers" contains catalog tag "career".
        let tags = neutral_analyzer().suggest_tags("thinking about careers");
        assert!(tags.iter().any(|t| t == "career"));
    }

    #[test]
    fn contextual_tags_trigger_on_whole_tokens() {
        let tags = neutral_analyzer().suggest_tags("coffee book");
        assert_eq!(tags, vec!["morning routine", "reading"]);
    }

    #[test]
    fn short_tokens_substring_match_much_of_the_catalog() {
        // "a" is contained by half the catalog; the first four catalog
        // matches win and contextual tags never make the cut.
        let tags = neutral_analyzer().suggest_tags("coffee and a book");
        assert_eq!(tags.len(), 4);
        assert!(!tags.iter().any(|t| t == "morning routine"));
    }

    #[test]
    fn no_keywords_means_no_tags() {
        assert!(neutral_analyzer().suggest_tags("zzz qqq").is_empty());
    }

    #[test]
    fn summary_substitutes_the_primary_emotion() {
        // Draw 0.5 over six templates selects the fourth.
        let summary = neutral_analyzer().summarize("hopeful");
        assert_eq!(
            summary,
            "Today's entry demonstrates hopeful emotional processing that supports decision-making."
        );
    }
}
