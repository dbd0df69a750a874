//! crates/reflection_core/src/report.rs
//!
//! Pure rollup functions over the entry collection, consumed by the
//! insights and summary views. Nothing here mutates or performs I/O;
//! every report is recomputed from the full collection on each call.
//!
//! Grouping, ordering, and threshold rules are user-visible contracts:
//! the overview trend compares the collection's existing newest-first
//! order, weekly buckets start on Sunday, and the monthly trend splits a
//! month's entries at the midpoint of their date-descending order.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::{
    CategoryShare, Entry, FrequencyCount, MonthlyAverage, MonthlyReflection, Overview, Trend,
    WeeklyReflection,
};

/// Which repeatable entry field a frequency ranking draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyField {
    Emotions,
    Tags,
}

/// Window length for the overview's recent-vs-previous mood comparison.
const TREND_WINDOW: usize = 7;

/// Mood at or above this marks an entry as a weekly highlight.
const HIGHLIGHT_MOOD: f64 = 7.0;

/// Mood changes within this band count as stable for the monthly trend.
const TREND_DEAD_ZONE: f64 = 0.5;

/// Rollup statistics across the whole collection.
///
/// The trend compares the mean mood of the first `TREND_WINDOW` entries
/// (the collection is newest first) against the next window. With no
/// prior window to compare, previous defaults to recent and the trend
/// reads stable.
pub fn overview(entries: &[Entry]) -> Overview {
    let average = |value: fn(&Entry) -> f64| -> f64 {
        if entries.is_empty() {
            0.0
        } else {
            round1(entries.iter().map(value).sum::<f64>() / entries.len() as f64)
        }
    };

    let recent = &entries[..entries.len().min(TREND_WINDOW)];
    let previous = &entries[entries.len().min(TREND_WINDOW)..entries.len().min(2 * TREND_WINDOW)];
    let recent_mood = mean_mood(recent).unwrap_or(0.0);
    let previous_mood = mean_mood(previous).unwrap_or(recent_mood);
    let mood_trend = if recent_mood > previous_mood {
        Trend::Improving
    } else if recent_mood < previous_mood {
        Trend::Declining
    } else {
        Trend::Stable
    };

    Overview {
        entry_count: entries.len(),
        average_mood: average(|e| e.mood_score),
        average_energy: average(|e| e.energy_level),
        average_productivity: average(|e| e.productivity_score),
        average_stress: average(|e| e.stress_level),
        mood_trend,
        total_goals: entries.iter().map(|e| e.goals.len()).sum(),
        total_achievements: entries.iter().map(|e| e.achievements.len()).sum(),
        total_learnings: entries.iter().map(|e| e.learnings.len()).sum(),
        total_action_items: entries.iter().map(|e| e.action_items.len()).sum(),
    }
}

/// Top-k occurrence ranking of a repeatable field across all entries.
/// Ties keep first-seen order.
pub fn top_frequencies(entries: &[Entry], field: FrequencyField, k: usize) -> Vec<FrequencyCount> {
    let values = entries.iter().flat_map(|e| match field {
        FrequencyField::Emotions => e.emotions.iter(),
        FrequencyField::Tags => e.tags.iter(),
    });
    let mut counts = count_occurrences(values.map(String::as_str));
    counts.truncate(k);
    counts
}

/// Entry count per category, with each bucket's fraction of the total.
/// Buckets appear in first-seen order.
pub fn category_distribution(entries: &[Entry]) -> Vec<CategoryShare> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut shares: Vec<CategoryShare> = Vec::new();
    for entry in entries {
        match index.get(entry.category.as_str()) {
            Some(&i) => shares[i].count += 1,
            None => {
                index.insert(entry.category.as_str(), shares.len());
                shares.push(CategoryShare {
                    category: entry.category,
                    count: 1,
                    share: 0.0,
                });
            }
        }
    }
    for slice in &mut shares {
        slice.share = slice.count as f64 / entries.len() as f64;
    }
    shares
}

/// Mean mood per calendar month of `date`, oldest month first.
pub fn monthly_averages(entries: &[Entry]) -> Vec<MonthlyAverage> {
    let mut buckets: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
    for entry in entries {
        let bucket = buckets
            .entry((entry.date.year(), entry.date.month()))
            .or_insert((0.0, 0));
        bucket.0 += entry.mood_score;
        bucket.1 += 1;
    }
    buckets
        .into_iter()
        .map(|((year, month), (total, count))| MonthlyAverage {
            year,
            month,
            average_mood: round1(total / count as f64),
        })
        .collect()
}

/// Per-week rollups, newest week first. Weeks start on Sunday; an entry
/// dated on a Sunday opens a new bucket.
pub fn weekly_reflections(entries: &[Entry]) -> Vec<WeeklyReflection> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut weeks: BTreeMap<NaiveDate, Vec<&Entry>> = BTreeMap::new();
    for entry in sorted {
        let week_start =
            entry.date - Duration::days(entry.date.weekday().num_days_from_sunday() as i64);
        weeks.entry(week_start).or_default().push(entry);
    }

    weeks
        .into_iter()
        .rev()
        .map(|(week_start, group)| {
            let average_mood =
                group.iter().map(|e| e.mood_score).sum::<f64>() / group.len() as f64;
            let top_emotions = top_labels(group.iter().flat_map(|e| e.emotions.iter()), 3);
            let highlights: Vec<String> = group
                .iter()
                .filter(|e| e.mood_score >= HIGHLIGHT_MOOD)
                .take(2)
                .map(|e| excerpt(&e.thought, 100))
                .collect();
            let growth_note = growth_note(average_mood, top_emotions.first());

            WeeklyReflection {
                week_start,
                week_end: week_start + Duration::days(6),
                average_mood: round1(average_mood),
                top_emotions,
                entry_count: group.len(),
                highlights,
                growth_note,
            }
        })
        .collect()
}

/// Per-month rollups, newest month first. The trend splits the month's
/// date-descending entries at the midpoint and compares the newer half's
/// mean mood against the older half's, with a dead-zone either side of
/// equal; a month too small to split reads stable.
pub fn monthly_reflections(entries: &[Entry]) -> Vec<MonthlyReflection> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut months: BTreeMap<(i32, u32), Vec<&Entry>> = BTreeMap::new();
    for entry in sorted {
        months
            .entry((entry.date.year(), entry.date.month()))
            .or_default()
            .push(entry);
    }

    months
        .into_iter()
        .rev()
        .map(|((year, month), group)| {
            let average_mood =
                group.iter().map(|e| e.mood_score).sum::<f64>() / group.len() as f64;

            let half = group.len() / 2;
            let newer = &group[..half];
            let older = &group[half..];
            let mood_trend = match (
                mean_mood_refs(newer),
                mean_mood_refs(older),
            ) {
                (Some(new_avg), Some(old_avg)) if new_avg > old_avg + TREND_DEAD_ZONE => {
                    Trend::Improving
                }
                (Some(new_avg), Some(old_avg)) if new_avg < old_avg - TREND_DEAD_ZONE => {
                    Trend::Declining
                }
                _ => Trend::Stable,
            };

            let top_emotions = top_labels(group.iter().flat_map(|e| e.emotions.iter()), 3);
            let key_insights = key_insights(&group, mood_trend);

            MonthlyReflection {
                year,
                month,
                month_name: month_name(month),
                average_mood: round1(average_mood),
                top_emotions,
                entry_count: group.len(),
                mood_trend,
                key_insights,
            }
        })
        .collect()
}

/// Fixed advisory strings gated by simple threshold checks. Empty input
/// produces no insights.
pub fn business_insights(entries: &[Entry]) -> Vec<String> {
    let mut insights = Vec::new();
    if entries.is_empty() {
        return insights;
    }

    let count = entries.len() as f64;
    let avg_productivity = entries.iter().map(|e| e.productivity_score).sum::<f64>() / count;
    let avg_stress = entries.iter().map(|e| e.stress_level).sum::<f64>() / count;
    let avg_energy = entries.iter().map(|e| e.energy_level).sum::<f64>() / count;

    if avg_productivity >= 7.0 {
        insights.push(
            "High productivity patterns identified - consider documenting successful strategies"
                .to_string(),
        );
    }
    if avg_stress >= 7.0 {
        insights.push(
            "Elevated stress levels detected - recommend stress management techniques".to_string(),
        );
    }
    if avg_energy >= 7.0 {
        insights.push(
            "Strong energy levels - optimal time for tackling challenging projects".to_string(),
        );
    }

    let work_entries = entries
        .iter()
        .filter(|e| e.category == crate::domain::Category::Work)
        .count();
    if work_entries as f64 > entries.len() as f64 * 0.6 {
        insights.push(
            "Work-life balance may need attention - consider more personal reflection time"
                .to_string(),
        );
    }

    insights
}

//=========================================================================================
// Helpers
//=========================================================================================

fn mean_mood(entries: &[Entry]) -> Option<f64> {
    if entries.is_empty() {
        None
    } else {
        Some(entries.iter().map(|e| e.mood_score).sum::<f64>() / entries.len() as f64)
    }
}

fn mean_mood_refs(entries: &[&Entry]) -> Option<f64> {
    if entries.is_empty() {
        None
    } else {
        Some(entries.iter().map(|e| e.mood_score).sum::<f64>() / entries.len() as f64)
    }
}

/// Occurrence counts in descending order; the sort is stable, so equal
/// counts keep first-seen order.
fn count_occurrences<'a>(values: impl Iterator<Item = &'a str>) -> Vec<FrequencyCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<FrequencyCount> = Vec::new();
    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(value, counts.len());
                counts.push(FrequencyCount {
                    label: value.to_string(),
                    count: 1,
                });
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

fn top_labels<'a>(values: impl Iterator<Item = &'a String>, k: usize) -> Vec<String> {
    count_occurrences(values.map(String::as_str))
        .into_iter()
        .take(k)
        .map(|f| f.label)
        .collect()
}

/// First `limit` characters of the thought with a trailing ellipsis,
/// regardless of length.
fn excerpt(thought: &str, limit: usize) -> String {
    let mut excerpt: String = thought.chars().take(limit).collect();
    excerpt.push_str("...");
    excerpt
}

fn growth_note(average_mood: f64, top_emotion: Option<&String>) -> String {
    let emotion = top_emotion.map(String::as_str).unwrap_or("reflective");
    if average_mood >= 7.0 {
        format!("This was a strong week! Your {emotion} energy really shows through.")
    } else if average_mood >= 5.0 {
        format!("A balanced week with moments of {emotion}. Keep building on the positive patterns.")
    } else {
        format!(
            "This week had its challenges. Remember that {emotion} feelings are temporary and part of growth."
        )
    }
}

fn key_insights(group: &[&Entry], trend: Trend) -> Vec<String> {
    let mut insights = Vec::new();

    match trend {
        Trend::Improving => {
            insights.push("Your mood showed positive improvement throughout the month".to_string())
        }
        Trend::Declining => {
            insights.push("Consider what factors might be affecting your wellbeing".to_string())
        }
        Trend::Stable => {}
    }

    let high_mood_days = group.iter().filter(|e| e.mood_score >= 8.0).count();
    if high_mood_days as f64 > group.len() as f64 * 0.3 {
        insights.push(format!(
            "You had {high_mood_days} particularly great days this month"
        ));
    }

    let top_tag = count_occurrences(group.iter().flat_map(|e| e.tags.iter().map(String::as_str)))
        .into_iter()
        .next();
    if let Some(tag) = top_tag {
        insights.push(format!(
            "\"{}\" was a recurring theme in your reflections",
            tag.label
        ));
    }

    insights
}

fn month_name(month: u32) -> String {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
    .to_string()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
