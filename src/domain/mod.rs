pub mod config;
pub mod error;
pub mod game;
pub mod platform;
pub mod raw_game;

pub use config::{ConfigPatch, Configuration};
pub use error::{DomainError, ResolveError};
pub use game::{Card, GameStatus, StatusKind};
pub use platform::{AppPaths, Platform, UserDirs};
pub use raw_game::{RawCard, RawCardEntry, RawGame, RawPlay};
