//! LoadState - Async Load Lifecycle

use crate::error::ApiError;

/// Where a slice is in its load cycle
///
/// A failure keeps whatever data the slice already had; only the state
/// changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    /// Never requested
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Last request succeeded
    Loaded,
    /// Last request failed
    Failed(ApiError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error().map(|e| e.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_exposes_message() {
        let state = LoadState::Failed(ApiError::transport("GET", "https://api.test/x", "offline"));
        assert!(state.is_failed());
        assert!(!state.is_loading());
        assert_eq!(state.error_message(), Some("offline"));
        assert_eq!(LoadState::Loaded.error(), None);
    }
}
