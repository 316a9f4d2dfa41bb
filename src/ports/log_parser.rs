use std::path::Path;

use crate::domain::{DomainError, RawGame};

/// Port for the external game-log parser.
///
/// Three outcomes: a game, `Ok(None)` when the log holds no playable state
/// yet, or an error. Implementations may also panic; callers guard for it.
pub trait GameLogParser: Send + Sync {
    fn parse_game_log(&self, path: &Path) -> Result<Option<RawGame>, DomainError>;
}
