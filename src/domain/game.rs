use serde::{Deserialize, Serialize};

/// A card as shown to the companion app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    /// "US", "USSR" or "Neutral"; empty when unknown.
    pub side: String,
    pub ops: u32,
}

impl Card {
    /// Card for an identifier whose metadata could not be looked up.
    pub fn unknown(id: &str) -> Self {
        Self {
            name: id.to_string(),
            side: String::new(),
            ops: 0,
        }
    }
}

/// Response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Ok,
    NoGameData,
    Error,
}

/// Current game status returned to the companion app.
///
/// Card collections are always present, possibly empty. `error` is set iff
/// `status` is `Error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub status: StatusKind,
    pub filename: Option<String>,
    pub turn: Option<i64>,
    pub deck: Vec<Card>,
    pub discarded: Vec<Card>,
    pub removed: Vec<Card>,
    pub cards_in_hands: Vec<Card>,
    /// Reserved, never populated.
    pub your_hand: Vec<Card>,
    /// Reserved, never populated.
    pub opponent_hand: Vec<Card>,
    pub error: Option<String>,
}

impl GameStatus {
    fn empty(status: StatusKind) -> Self {
        Self {
            status,
            filename: None,
            turn: None,
            deck: Vec::new(),
            discarded: Vec::new(),
            removed: Vec::new(),
            cards_in_hands: Vec::new(),
            your_hand: Vec::new(),
            opponent_hand: Vec::new(),
            error: None,
        }
    }

    /// The parser found no playable state in the log yet.
    pub fn no_game_data(filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..Self::empty(StatusKind::NoGameData)
        }
    }

    pub fn error(message: impl Into<String>, filename: Option<String>) -> Self {
        Self {
            filename,
            error: Some(message.into()),
            ..Self::empty(StatusKind::Error)
        }
    }

    pub fn ok(
        filename: impl Into<String>,
        turn: Option<i64>,
        deck: Vec<Card>,
        discarded: Vec<Card>,
        removed: Vec<Card>,
        cards_in_hands: Vec<Card>,
    ) -> Self {
        Self {
            filename: Some(filename.into()),
            turn,
            deck,
            discarded,
            removed,
            cards_in_hands,
            ..Self::empty(StatusKind::Ok)
        }
    }
}
