//! crates/reflection_core/src/sharing.rs
//!
//! Share links: a reflection is shared by persisting a record under a
//! short random id; the record may carry an expiry, checked lazily when
//! the link is resolved (an expired record is evicted on access, there
//! is no background sweeper).

use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use crate::domain::{EmailNotification, Entry, ShareRecord, ShareSettings};
use crate::ports::{Clock, PortResult, RandomSource, ShareStore};

const SHARE_ID_LEN: usize = 6;
const SHARE_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

pub const SHARE_EMAIL_SUBJECT: &str = "🌟 Someone shared a reflection with you!";

/// Creates and resolves share records over the share store.
pub struct ShareService {
    store: Arc<dyn ShareStore>,
    rng: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
}

impl ShareService {
    pub fn new(
        store: Arc<dyn ShareStore>,
        rng: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { store, rng, clock }
    }

    /// Persists a new share record for the entry and returns it.
    /// `expires_in` of zero (or less) means the link never expires.
    pub async fn create_share(
        &self,
        entry_id: Uuid,
        settings: ShareSettings,
    ) -> PortResult<ShareRecord> {
        let created_at = self.clock.now();
        let expires_at = if settings.expires_in > 0 {
            Some(created_at + Duration::days(settings.expires_in))
        } else {
            None
        };
        let record = ShareRecord {
            share_id: self.random_share_id(),
            entry_id,
            settings,
            created_at,
            expires_at,
        };
        self.store.put(&record).await?;
        Ok(record)
    }

    /// Looks up a share record. Missing records resolve to `None`;
    /// expired records are evicted and also resolve to `None`.
    pub async fn resolve_share(&self, share_id: &str) -> PortResult<Option<ShareRecord>> {
        let Some(record) = self.store.get(share_id).await? else {
            return Ok(None);
        };
        if let Some(expires_at) = record.expires_at {
            if self.clock.now() > expires_at {
                self.store.remove(share_id).await?;
                return Ok(None);
            }
        }
        Ok(Some(record))
    }

    fn random_share_id(&self) -> String {
        (0..SHARE_ID_LEN)
            .map(|_| {
                let idx = ((self.rng.next_f64() * SHARE_ID_ALPHABET.len() as f64) as usize)
                    .min(SHARE_ID_ALPHABET.len() - 1);
                SHARE_ID_ALPHABET[idx] as char
            })
            .collect()
    }
}

/// The public URL for a share id.
pub fn share_link(base_url: &str, share_id: &str) -> String {
    format!("{}/shared/{}", base_url.trim_end_matches('/'), share_id)
}

/// The body of a share notification email.
pub fn email_body(share_link: &str, entry: &Entry, message: Option<&str>) -> String {
    let personal_message = message
        .map(|m| format!("**Personal Message:** {m}\n\n"))
        .unwrap_or_default();
    let preview: String = entry.thought.chars().take(150).collect();
    let ellipsis = if entry.thought.chars().count() > 150 {
        "..."
    } else {
        ""
    };
    format!(
        "🌟 **You've received a shared reflection!**\n\n\
         {personal_message}\n\
         **Reflection Preview:**\n\
         📅 Date: {date}\n\
         😊 Mood: {mood}/10\n\
         💭 \"{preview}{ellipsis}\"\n\n\
         🔗 **View Full Reflection:** {share_link}\n\n\
         This link will expire based on the sender's settings. View it while you can!\n\n\
         ---\n\
         Sent from Professional Growth Hub 📊",
        date = entry.date,
        mood = entry.mood_score,
    )
}

/// Builds the notification handed to the email boundary for one recipient.
pub fn share_notification(
    to: &str,
    share_link: &str,
    entry: &Entry,
    message: Option<&str>,
) -> EmailNotification {
    EmailNotification {
        to: to.to_string(),
        subject: SHARE_EMAIL_SUBJECT.to_string(),
        body: email_body(share_link, entry, message),
        share_link: share_link.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::test_support::{entry_on, FixedClock, FixedRandom, MemoryShareStore};

    fn service(store: Arc<MemoryShareStore>, clock: FixedClock) -> ShareService {
        ShareService::new(store, Arc::new(FixedRandom::new(0.4)), Arc::new(clock))
    }

    fn settings(expires_in: i64) -> ShareSettings {
        ShareSettings {
            is_public: false,
            allowed_emails: vec!["friend@example.com".to_string()],
            expires_in,
            message: None,
        }
    }

    #[tokio::test]
    async fn created_share_resolves_until_it_expires() {
        let store = Arc::new(MemoryShareStore::default());
        let share_service = service(store.clone(), FixedClock::on_date(2024, 3, 1));

        let record = share_service
            .create_share(Uuid::new_v4(), settings(7))
            .await
            .unwrap();
        assert_eq!(record.share_id.len(), SHARE_ID_LEN);
        assert_eq!(
            record.expires_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap())
        );

        let resolved = share_service
            .resolve_share(&record.share_id)
            .await
            .unwrap();
        assert_eq!(resolved, Some(record));
    }

    #[tokio::test]
    async fn zero_expiry_means_the_link_never_expires() {
        let store = Arc::new(MemoryShareStore::default());
        let share_service = service(store.clone(), FixedClock::on_date(2024, 3, 1));
        let record = share_service
            .create_share(Uuid::new_v4(), settings(0))
            .await
            .unwrap();
        assert_eq!(record.expires_at, None);
    }

    #[tokio::test]
    async fn expired_share_is_evicted_on_access() {
        let store = Arc::new(MemoryShareStore::default());
        let create_service = service(store.clone(), FixedClock::on_date(2024, 3, 1));
        let record = create_service
            .create_share(Uuid::new_v4(), settings(1))
            .await
            .unwrap();

        // Resolve from a clock past the expiry.
        let later_service = service(store.clone(), FixedClock::on_date(2024, 3, 9));
        let resolved = later_service
            .resolve_share(&record.share_id)
            .await
            .unwrap();
        assert_eq!(resolved, None);
        // Lazy expiry removed the record itself.
        assert!(store.get_raw(&record.share_id).is_none());
    }

    #[tokio::test]
    async fn unknown_share_resolves_to_none() {
        let store = Arc::new(MemoryShareStore::default());
        let share_service = service(store, FixedClock::on_date(2024, 3, 1));
        assert_eq!(share_service.resolve_share("zzzzzz").await.unwrap(), None);
    }

    #[test]
    fn share_link_joins_base_and_id() {
        assert_eq!(
            share_link("http://localhost:3000/", "abc123"),
            "http://localhost:3000/shared/abc123"
        );
    }

    #[test]
    fn email_body_previews_the_entry() {
        let mut entry = entry_on("2024-03-01", 8.2);
        entry.thought = "y".repeat(200);
        let body = email_body("http://localhost:3000/shared/abc123", &entry, Some("enjoy"));
        assert!(body.contains("**Personal Message:** enjoy"));
        assert!(body.contains("📅 Date: 2024-03-01"));
        assert!(body.contains("😊 Mood: 8.2/10"));
        assert!(body.contains(&format!("\"{}...\"", "y".repeat(150))));
        assert!(body.contains("🔗 **View Full Reflection:** http://localhost:3000/shared/abc123"));
    }

    #[test]
    fn email_body_skips_ellipsis_for_short_thoughts() {
        let entry = entry_on("2024-03-01", 6.0);
        let body = email_body("link", &entry, None);
        assert!(!body.contains("...\""));
        assert!(!body.contains("**Personal Message:**"));
    }
}
