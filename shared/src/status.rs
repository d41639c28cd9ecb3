use crate::error::{FetchError, StaleFetch};
use crate::session::CompletionSummary;

/// What the floating status indicator shows for a bulk fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Searching,
    Found(usize),
    Failed,
}

impl FetchStatus {
    pub fn label(self) -> String {
        match self {
            Self::Searching => "Searching all pages for friends…".to_string(),
            Self::Found(count) => format!(" {count} friends found"),
            Self::Failed => "Failed to search".to_string(),
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Self::Searching => "#007bff",
            Self::Found(_) => "#28a745",
            Self::Failed => "#dc3545",
        }
    }

    /// Searching stays up until the fetch settles; results auto-dismiss.
    pub fn auto_dismiss(self) -> bool {
        !matches!(self, Self::Searching)
    }
}

#[derive(Debug)]
pub enum FetchResult {
    Completed(Result<CompletionSummary, StaleFetch>),
    Failed(FetchError),
}

/// Final indicator state once a fetch settles. `None` removes the indicator
/// immediately: the mode was switched off, or the result is stale.
pub fn settled_status(result: &FetchResult, still_friends_only: bool) -> Option<FetchStatus> {
    if !still_friends_only {
        return None;
    }
    match result {
        FetchResult::Completed(Ok(summary)) => Some(FetchStatus::Found(summary.total)),
        FetchResult::Completed(Err(_)) => None,
        FetchResult::Failed(_) => Some(FetchStatus::Failed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::RenderOutcome;

    fn summary(total: usize) -> CompletionSummary {
        CompletionSummary {
            added: 1,
            upgraded: 0,
            total,
            render: RenderOutcome::Rebuilt { rows: total },
        }
    }

    #[test]
    fn labels_and_colors() {
        assert_eq!(FetchStatus::Found(3).label(), " 3 friends found");
        assert_eq!(FetchStatus::Failed.background(), "#dc3545");
        assert!(!FetchStatus::Searching.auto_dismiss());
        assert!(FetchStatus::Found(0).auto_dismiss());
    }

    #[test]
    fn success_reports_total_collected() {
        let result = FetchResult::Completed(Ok(summary(4)));
        assert_eq!(settled_status(&result, true), Some(FetchStatus::Found(4)));
    }

    #[test]
    fn failure_is_reported_while_active() {
        let result = FetchResult::Failed(FetchError::Status(500));
        assert_eq!(settled_status(&result, true), Some(FetchStatus::Failed));
    }

    #[test]
    fn anything_after_toggle_off_is_removed_at_once() {
        assert_eq!(
            settled_status(&FetchResult::Completed(Ok(summary(2))), false),
            None
        );
        assert_eq!(
            settled_status(&FetchResult::Failed(FetchError::Parse("eof".into())), false),
            None
        );
    }

    #[test]
    fn stale_result_is_removed() {
        let stale = FetchResult::Completed(Err(StaleFetch {
            fetched_for: 1,
            current: 2,
        }));
        assert_eq!(settled_status(&stale, true), None);
    }
}
