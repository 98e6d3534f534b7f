use serde::Deserialize;

pub const DEFAULT_HISTORY_LIMIT: i64 = 50;
pub const MAX_HISTORY_LIMIT: i64 = 500;

#[derive(Debug, Default, Deserialize)]
pub struct DeliveryHistoryQuery {
    /// Any formatting; only the digits are matched
    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub limit: Option<i64>,
}

impl DeliveryHistoryQuery {
    pub fn limit(&self) -> i64 {
        match self.limit {
            Some(limit) if limit >= 1 => limit.min(MAX_HISTORY_LIMIT),
            _ => DEFAULT_HISTORY_LIMIT,
        }
    }
}
