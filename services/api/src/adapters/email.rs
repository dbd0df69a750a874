//! services/api/src/adapters/email.rs
//!
//! This module contains the mocked email adapter implementing the
//! `EmailService` port. No mail leaves the machine: the adapter sleeps to
//! simulate a provider round-trip, logs what it would have sent, and
//! fails a small random fraction of sends so callers exercise their
//! error paths.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reflection_core::domain::EmailNotification;
use reflection_core::ports::{EmailService, PortError, PortResult, RandomSource};
use tracing::info;

/// An adapter that pretends to be an email provider.
pub struct MockEmailAdapter {
    rng: Arc<dyn RandomSource>,
    failure_rate: f64,
    base_delay_ms: u64,
}

impl MockEmailAdapter {
    /// Creates a new `MockEmailAdapter`. A `base_delay_ms` of zero skips
    /// the simulated latency entirely.
    pub fn new(rng: Arc<dyn RandomSource>, failure_rate: f64, base_delay_ms: u64) -> Self {
        Self {
            rng,
            failure_rate,
            base_delay_ms,
        }
    }
}

#[async_trait]
impl EmailService for MockEmailAdapter {
    async fn send(&self, notification: &EmailNotification) -> PortResult<()> {
        if self.base_delay_ms > 0 {
            let jitter = (self.rng.next_f64() * 2.0 * self.base_delay_ms as f64) as u64;
            tokio::time::sleep(Duration::from_millis(self.base_delay_ms + jitter)).await;
        }

        info!(
            to = %notification.to,
            subject = %notification.subject,
            share_link = %notification.share_link,
            "email sent"
        );

        if self.rng.next_f64() < self.failure_rate {
            return Err(PortError::Unexpected(
                "Email service temporarily unavailable".to_string(),
            ));
        }
        Ok(())
    }
}
