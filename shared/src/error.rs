use thiserror::Error;

/// Failure of the bulk standings query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("fetch error: {0}")]
    Network(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("no response within {0}ms")]
    TimedOut(u32),
}

/// Failure talking to the extension's key-value storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The extension runtime behind this page is gone (reloaded or updated).
    #[error("extension context invalidated")]
    ContextInvalidated,
    #[error("extension call failed: {0}")]
    Js(String),
    #[error("stored value has unexpected shape: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FetchRejected {
    #[error("friends-only mode is not active")]
    Inactive,
    #[error("a standings fetch is already in flight")]
    InFlight,
}

/// A fetch finished for an activation that is no longer current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("stale fetch (fetched for activation {fetched_for}, now {current})")]
pub struct StaleFetch {
    pub fetched_for: u64,
    pub current: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_console_format() {
        assert_eq!(FetchError::Status(503).to_string(), "HTTP 503");
        assert_eq!(
            FetchError::Network("offline".into()).to_string(),
            "fetch error: offline"
        );
        assert_eq!(FetchError::TimedOut(20_000).to_string(), "no response within 20000ms");
        assert_eq!(
            StoreError::ContextInvalidated.to_string(),
            "extension context invalidated"
        );
    }
}
