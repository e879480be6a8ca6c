//! Dashboard use case: profile plus history, with the recent/full toggle.

use cropmate_core::backend::AdvisoryBackend;
use cropmate_core::error::Result;
use cropmate_core::history::{HistoryEntry, HistoryKind};
use cropmate_core::user::UserAccount;
use std::sync::Arc;

/// How many entries the recent view shows.
pub const RECENT_LIMIT: usize = 3;

/// Which slice of history the surface is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryScope {
    Recent,
    Full,
}

/// Fetched history plus the recent/full view toggle.
#[derive(Debug, Clone)]
pub struct HistoryView {
    entries: Vec<HistoryEntry>,
    scope: HistoryScope,
}

impl HistoryView {
    /// Entries must already be newest first; the client sorts on fetch.
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        Self {
            entries,
            scope: HistoryScope::Recent,
        }
    }

    pub fn scope(&self) -> HistoryScope {
        self.scope
    }

    /// "View All History" / "Back to Recent".
    pub fn toggle_scope(&mut self) {
        self.scope = match self.scope {
            HistoryScope::Recent => HistoryScope::Full,
            HistoryScope::Full => HistoryScope::Recent,
        };
    }

    /// The entries the current scope shows.
    pub fn visible(&self) -> &[HistoryEntry] {
        match self.scope {
            HistoryScope::Recent => {
                let end = self.entries.len().min(RECENT_LIMIT);
                &self.entries[..end]
            }
            HistoryScope::Full => &self.entries,
        }
    }

    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// True when more history exists than the recent view shows.
    pub fn has_more(&self) -> bool {
        self.entries.len() > RECENT_LIMIT
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one kind, for the kind filter.
    pub fn of_kind(&self, kind: HistoryKind) -> Vec<&HistoryEntry> {
        self.entries.iter().filter(|e| e.kind == kind).collect()
    }
}

/// Everything the dashboard renders.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub profile: UserAccount,
    pub history: HistoryView,
}

/// Loads the dashboard from the backend.
pub struct DashboardService {
    backend: Arc<dyn AdvisoryBackend>,
}

impl DashboardService {
    pub fn new(backend: Arc<dyn AdvisoryBackend>) -> Self {
        Self { backend }
    }

    /// Fetches profile and history concurrently. The two requests are
    /// independent and may complete in either order.
    pub async fn load(&self) -> Result<DashboardData> {
        let (profile, history) =
            tokio::join!(self.backend.profile(), self.backend.history());

        Ok(DashboardData {
            profile: profile?,
            history: HistoryView::new(history?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn entry(id: i64, kind: HistoryKind) -> HistoryEntry {
        HistoryEntry {
            id,
            kind,
            result: "rice".to_string(),
            timestamp: NaiveDateTime::parse_from_str("2025-01-01T09:00:00", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
            input_details: None,
        }
    }

    #[test]
    fn test_recent_scope_shows_at_most_three() {
        let view = HistoryView::new(vec![
            entry(4, HistoryKind::Crop),
            entry(3, HistoryKind::Disease),
            entry(2, HistoryKind::Crop),
            entry(1, HistoryKind::Crop),
        ]);

        assert_eq!(view.scope(), HistoryScope::Recent);
        assert_eq!(view.visible().len(), RECENT_LIMIT);
        assert!(view.has_more());
    }

    #[test]
    fn test_toggle_round_trips() {
        let mut view = HistoryView::new(vec![
            entry(4, HistoryKind::Crop),
            entry(3, HistoryKind::Disease),
            entry(2, HistoryKind::Crop),
            entry(1, HistoryKind::Crop),
        ]);

        view.toggle_scope();
        assert_eq!(view.scope(), HistoryScope::Full);
        assert_eq!(view.visible().len(), 4);

        view.toggle_scope();
        assert_eq!(view.scope(), HistoryScope::Recent);
    }

    #[test]
    fn test_short_history_fits_in_recent() {
        let view = HistoryView::new(vec![entry(1, HistoryKind::Crop)]);
        assert_eq!(view.visible().len(), 1);
        assert!(!view.has_more());
    }

    #[test]
    fn test_kind_filter() {
        let view = HistoryView::new(vec![
            entry(3, HistoryKind::Disease),
            entry(2, HistoryKind::Crop),
            entry(1, HistoryKind::Disease),
        ]);
        let diseases = view.of_kind(HistoryKind::Disease);
        assert_eq!(diseases.len(), 2);
        assert!(diseases.iter().all(|e| e.kind == HistoryKind::Disease));
    }
}
