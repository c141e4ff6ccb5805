use serde::Serialize;

/// Per-player statistics over a season (or any event slice).
///
/// `pass_success_pct` is in `[0, 100]`, rounded to two decimals, and is `0`
/// when the player has no passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerMetrics {
    pub player: String,
    pub matches_played: usize,
    pub defensive_actions: u32,
    pub offensive_actions: u32,
    pub total_passes: u32,
    pub successful_passes: u32,
    pub pass_success_pct: f64,
    pub key_passes: u32,
    pub goals: u32,
    pub missed_shots: u32,
    pub saved_shots: u32,
}

/// A player paired with a single count, used for ranking views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerCount {
    pub player: String,
    pub count: u32,
}

impl PlayerCount {
    pub fn new(player: impl Into<String>, count: u32) -> Self {
        Self {
            player: player.into(),
            count,
        }
    }
}

/// Field a ranking view orders [`PlayerMetrics`] by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RankingField {
    DefensiveActions,
    PassSuccess,
    KeyPasses,
    Goals,
}
