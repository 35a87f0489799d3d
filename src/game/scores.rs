use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Final tallies of one play session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub score: i64,
    pub max_combo: u32,
    /// Gauge percentage at the end of the chart, 0.0 to 1.0.
    pub gauge: f32,

    pub critical_bt_count: u32,
    pub perfect_bt_count: u32,
    pub critical_fx_count: u32,
    pub perfect_fx_count: u32,

    // Ticks that are judged without a press (hold and laser ticks).
    pub passive_bt_count: u32,
    pub passive_fx_count: u32,
    pub passive_vol_count: u32,

    pub early_bt_count: u32,
    pub late_bt_count: u32,
    pub early_fx_count: u32,
    pub late_fx_count: u32,

    pub bad_bt_count: u32,
    pub bad_fx_count: u32,
    pub miss_count: u32,
}

impl ScoringResult {
    pub fn criticals(&self) -> u32 {
        self.critical_bt_count
            + self.perfect_bt_count
            + self.critical_fx_count
            + self.perfect_fx_count
            + self.passive_bt_count
            + self.passive_fx_count
            + self.passive_vol_count
    }

    pub fn nears(&self) -> u32 {
        self.early_bt_count + self.late_bt_count + self.early_fx_count + self.late_fx_count
    }

    pub fn errors(&self) -> u32 {
        self.bad_bt_count + self.bad_fx_count + self.miss_count
    }
}

/// Converts a finished session into the payload an internet ranking expects.
pub trait RankingScoreAdapter {
    fn adapt_score(&self, score: &ScoringResult) -> Map<String, Value>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OrchestraFmAdapter;

impl RankingScoreAdapter for OrchestraFmAdapter {
    fn adapt_score(&self, score: &ScoringResult) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("score".to_string(), json!(score.score));
        payload.insert("combo".to_string(), json!(score.max_combo));
        payload.insert("rate".to_string(), json!(score.gauge));
        payload.insert("criticals".to_string(), json!(score.criticals()));
        payload.insert("nears".to_string(), json!(score.nears()));
        payload.insert("errors".to_string(), json!(score.errors()));
        payload.insert("mods".to_string(), json!(0u32));
        payload.insert("replay".to_string(), json!(""));
        payload
    }
}
