//! Loosely-typed game state as reported by the external log parser.
//!
//! The parser's output is untrusted: any field may be missing, null, or of an
//! unexpected type. [`RawGame::decode`] turns an arbitrary JSON value into this
//! nullable representation in one pass and never fails; everything downstream
//! works on these types only.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// A parsed game, as far as the parser could tell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGame {
    /// The play in progress, if the parser extracted one.
    pub current_play: Option<RawPlay>,
    /// Card table keyed by card identifier. None when the parser sent no table.
    pub cards: Option<HashMap<String, RawCardEntry>>,
}

/// Card collections and turn of the play in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPlay {
    pub turn: Option<i64>,
    pub possible_draw_cards: Option<Vec<String>>,
    pub discarded_cards: Option<Vec<String>>,
    pub removed_cards: Option<Vec<String>>,
    pub cards_in_hands: Option<Vec<String>>,
}

/// One entry of the card table.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCardEntry {
    Card(RawCard),
    /// The entry exists but is not a card description.
    Malformed,
}

/// Card metadata. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCard {
    pub name: Option<String>,
    pub side: Option<String>,
    pub ops: Option<u32>,
}

impl RawGame {
    /// Decode parser output. Total: unexpected shapes become `None`.
    pub fn decode(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        let current_play = map
            .get("current_play")
            .and_then(Value::as_object)
            .map(RawPlay::decode);

        let cards = field(map, &["cards", "CARDS"])
            .and_then(Value::as_object)
            .map(|table| {
                table
                    .iter()
                    .map(|(id, entry)| (id.clone(), RawCardEntry::decode(entry)))
                    .collect()
            });

        Self {
            current_play,
            cards,
        }
    }

    /// Look up a card identifier in the table.
    pub fn card(&self, id: &str) -> Option<&RawCardEntry> {
        self.cards.as_ref()?.get(id)
    }
}

impl RawPlay {
    fn decode(map: &Map<String, Value>) -> Self {
        Self {
            turn: map.get("turn").and_then(decode_turn),
            possible_draw_cards: map.get("possible_draw_cards").and_then(decode_ids),
            discarded_cards: map.get("discarded_cards").and_then(decode_ids),
            removed_cards: map.get("removed_cards").and_then(decode_ids),
            cards_in_hands: map.get("cards_in_hands").and_then(decode_ids),
        }
    }
}

impl RawCardEntry {
    fn decode(value: &Value) -> Self {
        match value.as_object() {
            Some(map) => RawCardEntry::Card(RawCard {
                name: map.get("name").and_then(Value::as_str).map(str::to_string),
                side: map.get("side").and_then(Value::as_str).map(str::to_string),
                ops: map.get("ops").and_then(decode_ops),
            }),
            None => RawCardEntry::Malformed,
        }
    }
}

fn field<'a>(map: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| map.get(*name))
}

fn decode_turn(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }
}

/// Identifiers are kept even when oddly typed; only nulls are skipped.
fn decode_ids(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .collect(),
    )
}

/// Operations value. Accepts integers, floats (truncated), numeric strings and
/// booleans. Negative values clamp to zero.
fn decode_ops(value: &Value) -> Option<u32> {
    let ops = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        Value::Bool(b) => i64::from(*b),
        _ => return None,
    };
    Some(ops.clamp(0, i64::from(u32::MAX)) as u32)
}
