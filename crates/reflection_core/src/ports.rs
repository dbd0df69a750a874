//! crates/reflection_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or email
//! providers. Randomness and wall-clock time are ports too, so the analysis
//! heuristic stays reproducible under test while keeping its intentional
//! variability in production.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{EmailNotification, Entry, ShareRecord};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The persistence boundary for the journal: a single externally-owned
/// ordered list, newest first, read in full and replaced in full.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Loads the whole collection. An absent or malformed blob reads as
    /// an empty collection; no error is surfaced for either.
    async fn load(&self) -> PortResult<Vec<Entry>>;

    /// Overwrites the whole collection.
    async fn save(&self, entries: &[Entry]) -> PortResult<()>;
}

/// Keyed storage for share records.
#[async_trait]
pub trait ShareStore: Send + Sync {
    async fn get(&self, share_id: &str) -> PortResult<Option<ShareRecord>>;
    async fn put(&self, record: &ShareRecord) -> PortResult<()>;
    async fn remove(&self, share_id: &str) -> PortResult<()>;
}

/// Outbound notification delivery.
#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, notification: &EmailNotification) -> PortResult<()>;
}

/// A source of uniform random draws in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_f64(&self) -> f64;
}

/// Wall-clock time as an input rather than a hidden global read.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

//=========================================================================================
// Production Implementations
//=========================================================================================

/// The production random source, backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&self) -> f64 {
        use rand::Rng;
        rand::thread_rng().gen::<f64>()
    }
}

/// The production clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
