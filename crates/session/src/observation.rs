//! Observation messages - serializable state snapshots for observers
//!
//! The presentation layer re-renders on every observation; the message is
//! the full state, line-JSON friendly. All messages have: type, seq
//! (sequence number), ts (timestamp in ms).

use serde::{Deserialize, Serialize};

use sumstack_core::GameSnapshot;
use sumstack_types::{GameMode, GRID_COLS, GRID_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

impl Default for ObservationType {
    fn default() -> Self {
        Self::Observation
    }
}

/// Wire-facing mode name (lowercase, matching [`GameMode::as_str`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeName {
    #[serde(rename = "classic")]
    Classic,
    #[serde(rename = "time")]
    Time,
}

impl From<GameMode> for ModeName {
    fn from(value: GameMode) -> Self {
        match value {
            GameMode::Classic => Self::Classic,
            GameMode::Time => Self::Time,
        }
    }
}

impl From<ModeName> for GameMode {
    fn from(value: ModeName) -> Self {
        match value {
            ModeName::Classic => GameMode::Classic,
            ModeName::Time => GameMode::Time,
        }
    }
}

/// Full game state observation (published after every transition)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    /// Monotonic game-instance id; bumps on every start.
    pub epoch: u64,
    pub mode: ModeName,
    pub target: u8,
    pub score: u32,
    #[serde(rename = "game_over")]
    pub game_over: bool,
    #[serde(rename = "time_left")]
    pub time_left: u8,
    pub level: u32,
    pub seed: u32,
    /// Tile values by (row, col); 0 = empty.
    pub values: [[u8; GRID_COLS as usize]; GRID_ROWS as usize],
    /// Tile ids by (row, col); 0 = empty.
    pub ids: [[u32; GRID_COLS as usize]; GRID_ROWS as usize],
    /// Selected tile ids in toggle order.
    pub selected: Vec<u32>,
}

impl ObservationMessage {
    pub fn new(seq: u64, epoch: u64, snap: &GameSnapshot) -> Self {
        Self {
            msg_type: ObservationType::Observation,
            seq,
            ts: current_timestamp_ms(),
            epoch,
            mode: snap.mode.into(),
            target: snap.target,
            score: snap.score,
            game_over: snap.game_over,
            time_left: snap.time_left,
            level: snap.level,
            seed: snap.seed,
            values: snap.values,
            ids: snap.ids,
            selected: snap.selected.iter().map(|id| id.as_u32()).collect(),
        }
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumstack_core::GameState;

    #[test]
    fn test_observation_from_snapshot() {
        let state = GameState::new(GameMode::Time, 12345);
        let msg = ObservationMessage::new(3, 1, &state.snapshot());

        assert_eq!(msg.seq, 3);
        assert_eq!(msg.epoch, 1);
        assert_eq!(msg.mode, ModeName::Time);
        assert_eq!(msg.target, state.target());
        assert_eq!(msg.score, 0);
        assert!(!msg.game_over);
        assert!(msg.selected.is_empty());
        // Bottom row populated, top row empty.
        assert!(msg.values[9].iter().all(|&v| v != 0));
        assert!(msg.values[0].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_serde_round_trip() {
        let state = GameState::new(GameMode::Classic, 7);
        let msg = ObservationMessage::new(1, 1, &state.snapshot());

        let json = serde_json::to_string(&msg).unwrap();
        let parsed: ObservationMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.seq, msg.seq);
        assert_eq!(parsed.mode, ModeName::Classic);
        assert_eq!(parsed.values, msg.values);
        assert_eq!(parsed.ids, msg.ids);
    }

    #[test]
    fn test_wire_field_names() {
        let state = GameState::new(GameMode::Classic, 7);
        let msg = ObservationMessage::new(1, 2, &state.snapshot());

        let value: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "observation");
        assert_eq!(value["mode"], "classic");
        assert!(value.get("game_over").is_some());
        assert!(value.get("time_left").is_some());
        assert_eq!(value["epoch"], 2);
    }
}
