use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct CreateCustomerRequest {
    #[serde(default)]
    pub name: Option<String>,

    /// Required
    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// Free-form attributes stored as JSON
    #[serde(default)]
    pub metadata: Option<Value>,
}
