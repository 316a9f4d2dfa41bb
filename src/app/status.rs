use crate::domain::{GameStatus, ResolveError};

/// Outcome of a status request.
///
/// Finer-grained than [`crate::domain::StatusKind`]: the error states say
/// which step failed, which the transport turns into an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusState {
    Ok,
    NoGameData,
    /// No override configured and no log file found.
    NoLogConfigured,
    /// The configured override does not exist.
    ConfiguredFileMissing,
    /// The parser failed or panicked.
    ParseFailure,
}

impl StatusState {
    /// Whether the failure is about locating the log rather than reading it.
    #[must_use]
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            StatusState::NoLogConfigured | StatusState::ConfiguredFileMissing
        )
    }
}

/// A status response together with the state that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub state: StatusState,
    pub status: GameStatus,
}

impl StatusReport {
    pub fn new(state: StatusState, status: GameStatus) -> Self {
        Self { state, status }
    }

    pub fn parse_failure(message: impl Into<String>) -> Self {
        Self::new(StatusState::ParseFailure, GameStatus::error(message, None))
    }

    pub fn unresolved(err: &ResolveError) -> Self {
        let state = match err {
            ResolveError::ConfiguredFileMissing { .. } => StatusState::ConfiguredFileMissing,
            ResolveError::NoLogFiles { .. } => StatusState::NoLogConfigured,
        };
        let status = GameStatus::error(err.to_string(), err.filename().map(str::to_string));
        Self::new(state, status)
    }
}
