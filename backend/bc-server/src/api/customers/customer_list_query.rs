use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct CustomerListQuery {
    /// "1" or "true" bypasses the sheet cache
    #[serde(default)]
    pub force: Option<String>,
}

impl CustomerListQuery {
    pub fn is_forced(&self) -> bool {
        matches!(self.force.as_deref(), Some("1") | Some("true"))
    }
}
