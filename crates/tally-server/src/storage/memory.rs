//! In-memory fallback store (used when no database is configured)

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use super::MetricsSnapshot;

/// Process-lifetime counters plus the list of signup emails.
///
/// Counts only ever go up; there is no deletion path. Nothing here survives
/// a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    page_views: AtomicU64,
    clicks: AtomicU64,
    signups: AtomicU64,
    emails: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_page_view(&self) {
        self.page_views.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_click(&self) {
        self.clicks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_signup(&self, email: &str) {
        self.signups.fetch_add(1, Ordering::Relaxed);
        self.emails
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email.to_string());
    }

    pub fn click_count(&self) -> u64 {
        self.clicks.load(Ordering::Relaxed)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        let emails = self
            .emails
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        MetricsSnapshot {
            page_views: self.page_views.load(Ordering::Relaxed),
            clicks: self.clicks.load(Ordering::Relaxed),
            signups: self.signups.load(Ordering::Relaxed),
            emails: Some(emails),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let store = MemoryStore::new();
        let snapshot = store.metrics();
        assert_eq!(snapshot.page_views, 0);
        assert_eq!(snapshot.clicks, 0);
        assert_eq!(snapshot.signups, 0);
        assert_eq!(snapshot.emails, Some(vec![]));
    }

    #[test]
    fn clicks_accumulate() {
        let store = MemoryStore::new();
        for _ in 0..5 {
            store.record_click();
        }
        assert_eq!(store.click_count(), 5);
        assert_eq!(store.metrics().clicks, 5);
    }

    #[test]
    fn signup_records_count_and_email() {
        let store = MemoryStore::new();
        store.record_signup("a@example.com");
        store.record_signup("b@example.com");
        let snapshot = store.metrics();
        assert_eq!(snapshot.signups, 2);
        assert_eq!(
            snapshot.emails,
            Some(vec!["a@example.com".to_string(), "b@example.com".to_string()])
        );
    }

    #[test]
    fn page_views_independent_of_clicks() {
        let store = MemoryStore::new();
        store.record_page_view();
        store.record_click();
        store.record_click();
        let snapshot = store.metrics();
        assert_eq!(snapshot.page_views, 1);
        assert_eq!(snapshot.clicks, 2);
    }
}
