//! crates/reflection_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or transport; serde names
//! match the persisted journal blob, so a saved collection round-trips.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The life area an entry is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Personal,
    Work,
    Health,
    Relationships,
    Learning,
    Goals,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Work => "work",
            Category::Health => "health",
            Category::Relationships => "relationships",
            Category::Learning => "learning",
            Category::Goals => "goals",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A single dated reflection. One entry is permitted per calendar date;
/// the creation boundary enforces that, not this type.
///
/// The four scores are frozen in at creation time from one
/// `EmotionAnalysis` and are never recomputed, even if the heuristic's
/// keyword tables change later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub photo: String,
    pub thought: String,
    /// First element is the primary emotion; the rest are secondary.
    pub emotions: Vec<String>,
    /// Up to 4 topical tags derived from the thought. May be empty.
    #[serde(default)]
    pub tags: Vec<String>,
    pub ai_summary: String,
    pub mood_score: f64,
    pub energy_level: f64,
    pub stress_level: f64,
    pub productivity_score: f64,
    #[serde(default)]
    pub gratitude_items: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub learnings: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default)]
    pub shared_with: Vec<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
}

/// The analyzer's output, produced and consumed at entry-creation time
/// only. `confidence` is informational and never read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmotionAnalysis {
    pub primary: String,
    pub secondary: Vec<String>,
    pub confidence: f64,
    pub mood_score: f64,
    pub energy_level: f64,
    pub stress_level: f64,
    pub productivity_score: f64,
}

/// How a share was configured by its creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareSettings {
    #[serde(default)]
    pub is_public: bool,
    /// Addresses notified by email when the share is private.
    #[serde(default)]
    pub allowed_emails: Vec<String>,
    /// Days until the link expires; 0 means it never does.
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub message: Option<String>,
}

/// A persisted share, keyed by its short random id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareRecord {
    pub share_id: String,
    pub entry_id: Uuid,
    pub settings: ShareSettings,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// One outbound notification handed to the email boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailNotification {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub share_link: String,
}

//=========================================================================================
// Aggregate report types (ephemeral, recomputed on every read, never persisted)
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

/// Rollup statistics for the insights view.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub entry_count: usize,
    pub average_mood: f64,
    pub average_energy: f64,
    pub average_productivity: f64,
    pub average_stress: f64,
    pub mood_trend: Trend,
    pub total_goals: usize,
    pub total_achievements: usize,
    pub total_learnings: usize,
    pub total_action_items: usize,
}

/// One row of a top-N frequency ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FrequencyCount {
    pub label: String,
    pub count: usize,
}

/// Entry count per category, as a fraction of the total for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryShare {
    pub category: Category,
    pub count: usize,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAverage {
    pub year: i32,
    pub month: u32,
    pub average_mood: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReflection {
    /// The Sunday this week starts on.
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub average_mood: f64,
    pub top_emotions: Vec<String>,
    pub entry_count: usize,
    /// Up to two excerpts from entries that scored at least 7.
    pub highlights: Vec<String>,
    pub growth_note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReflection {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub average_mood: f64,
    pub top_emotions: Vec<String>,
    pub entry_count: usize,
    pub mood_trend: Trend,
    pub key_insights: Vec<String>,
}
