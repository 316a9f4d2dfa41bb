//! Normalization of parser output into the [`GameStatus`] contract.
//!
//! Total by construction: parser errors and panics become an `error` status,
//! and card metadata that cannot be looked up degrades to a placeholder card
//! instead of dropping the card.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::{debug, error, warn};

use crate::app::status::{StatusReport, StatusState};
use crate::domain::{Card, GameStatus, RawCardEntry, RawGame};
use crate::ports::GameLogParser;

/// Run the parser on `path` and normalize whatever comes back.
pub fn parse_log(parser: &dyn GameLogParser, path: &Path) -> StatusReport {
    let filename = file_name(path);

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| parser.parse_game_log(path)));

    match outcome {
        Ok(Ok(Some(game))) => StatusReport::new(StatusState::Ok, format_game(&game, &filename)),
        Ok(Ok(None)) => {
            debug!(filename = %filename, "Log holds no game data yet");
            StatusReport::new(StatusState::NoGameData, GameStatus::no_game_data(filename))
        }
        Ok(Err(e)) => {
            error!(path = ?path, error = %e, "Error parsing game log");
            StatusReport::parse_failure(e.to_string())
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(path = ?path, panic = %message, "Log parser panicked");
            StatusReport::parse_failure(message)
        }
    }
}

/// Build an `ok` status from a parsed game.
///
/// Missing collections become empty ones; a missing play yields an `ok`
/// status with no turn and empty collections.
pub fn format_game(game: &RawGame, filename: &str) -> GameStatus {
    let play = game.current_play.clone().unwrap_or_default();
    let cards = |ids: Option<Vec<String>>| -> Vec<Card> {
        ids.unwrap_or_default()
            .iter()
            .map(|id| format_card(game, id))
            .collect()
    };

    GameStatus::ok(
        filename,
        play.turn,
        cards(play.possible_draw_cards),
        cards(play.discarded_cards),
        cards(play.removed_cards),
        cards(play.cards_in_hands),
    )
}

/// Look `id` up in the game's card table, falling back to a placeholder.
pub fn format_card(game: &RawGame, id: &str) -> Card {
    if game.cards.is_none() {
        return Card::unknown(id);
    }

    match game.card(id) {
        Some(RawCardEntry::Card(raw)) => {
            let card = Card {
                name: raw.name.clone().unwrap_or_else(|| id.to_string()),
                side: raw.side.clone().unwrap_or_default(),
                ops: raw.ops.unwrap_or(0),
            };
            debug!(name = %card.name, side = %card.side, ops = card.ops, "Formatting card");
            card
        }
        Some(RawCardEntry::Malformed) => {
            warn!(card = id, "Card entry is malformed");
            Card::unknown(id)
        }
        None => {
            warn!(card = id, "Card not found in card table");
            Card::unknown(id)
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Log parser panicked".to_string()
    }
}
