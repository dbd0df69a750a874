//! crates/reflection_core/src/test_support.rs
//!
//! Deterministic fakes for the randomness, clock, and storage ports,
//! shared by the test modules across this crate.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::{Category, Entry, Priority, ShareRecord};
use crate::ports::{Clock, EntryStore, PortResult, RandomSource, ShareStore};

/// A random source that returns the same draw forever.
pub struct FixedRandom {
    value: f64,
}

impl FixedRandom {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl RandomSource for FixedRandom {
    fn next_f64(&self) -> f64 {
        self.value
    }
}

/// A random source that replays a scripted sequence of draws, then
/// repeats the last one.
pub struct SequenceRandom {
    draws: Mutex<Vec<f64>>,
}

impl SequenceRandom {
    pub fn new(mut draws: Vec<f64>) -> Self {
        draws.reverse();
        Self {
            draws: Mutex::new(draws),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_f64(&self) -> f64 {
        let mut draws = self.draws.lock().unwrap();
        if draws.len() > 1 {
            draws.pop().unwrap()
        } else {
            *draws.last().expect("SequenceRandom needs at least one draw")
        }
    }
}

/// A clock pinned to one instant.
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn at_hour(hour: u32) -> Self {
        Self {
            now: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
        }
    }

    pub fn on_date(year: i32, month: u32, day: u32) -> Self {
        Self {
            now: Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// An entry store over an in-memory serialized blob, mimicking the
/// production store's whole-blob read/write behavior.
#[derive(Default)]
pub struct MemoryEntryStore {
    blob: Mutex<Option<String>>,
}

impl MemoryEntryStore {
    /// The raw persisted blob, for byte-identity assertions.
    pub fn raw_blob(&self) -> Option<String> {
        self.blob.lock().unwrap().clone()
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn load(&self) -> PortResult<Vec<Entry>> {
        let blob = self.blob.lock().unwrap();
        Ok(blob
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default())
    }

    async fn save(&self, entries: &[Entry]) -> PortResult<()> {
        let raw = serde_json::to_string(entries)
            .map_err(|e| crate::ports::PortError::Unexpected(e.to_string()))?;
        *self.blob.lock().unwrap() = Some(raw);
        Ok(())
    }
}

/// A share store over an in-memory map.
#[derive(Default)]
pub struct MemoryShareStore {
    records: Mutex<HashMap<String, ShareRecord>>,
}

impl MemoryShareStore {
    pub fn get_raw(&self, share_id: &str) -> Option<ShareRecord> {
        self.records.lock().unwrap().get(share_id).cloned()
    }
}

#[async_trait]
impl ShareStore for MemoryShareStore {
    async fn get(&self, share_id: &str) -> PortResult<Option<ShareRecord>> {
        Ok(self.records.lock().unwrap().get(share_id).cloned())
    }

    async fn put(&self, record: &ShareRecord) -> PortResult<()> {
        self.records
            .lock()
            .unwrap()
            .insert(record.share_id.clone(), record.clone());
        Ok(())
    }

    async fn remove(&self, share_id: &str) -> PortResult<()> {
        self.records.lock().unwrap().remove(share_id);
        Ok(())
    }
}

/// A minimal valid entry for a date and mood score.
pub fn entry_on(date: &str, mood: f64) -> Entry {
    let date: NaiveDate = date.parse().expect("test date");
    Entry {
        id: Uuid::new_v4(),
        date,
        photo: "data:image/jpeg;base64,AAAA".to_string(),
        thought: "steady progress today".to_string(),
        emotions: vec!["reflective".to_string()],
        tags: Vec::new(),
        ai_summary: String::new(),
        mood_score: mood,
        energy_level: 5.0,
        stress_level: 5.0,
        productivity_score: 5.0,
        gratitude_items: Vec::new(),
        goals: Vec::new(),
        achievements: Vec::new(),
        challenges: Vec::new(),
        learnings: Vec::new(),
        action_items: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        is_shared: false,
        shared_with: Vec::new(),
        category: Category::Personal,
        priority: Priority::Medium,
    }
}
