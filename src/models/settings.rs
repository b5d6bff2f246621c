use serde::{Deserialize, Serialize};

fn default_max_borrow_limit() -> i64 {
    5
}

fn default_max_penalty_points() -> i64 {
    100
}

/// Process-wide policy knobs from `GET /system-settings`, fetched with every
/// snapshot refresh. Values can be changed by other staff at any time, so
/// nothing here is cached beyond the snapshot that carried it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    #[serde(default = "default_max_borrow_limit")]
    pub max_borrow_limit: i64,
    #[serde(default = "default_max_penalty_points")]
    pub max_penalty_points: i64,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            max_borrow_limit: default_max_borrow_limit(),
            max_penalty_points: default_max_penalty_points(),
        }
    }
}
