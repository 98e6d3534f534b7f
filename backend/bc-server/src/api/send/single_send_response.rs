use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SendSingleResponse {
    pub success: bool,
    /// Normalized number
    pub number: String,
    /// Transport message id, when the transport reports one
    pub id: Option<String>,
}
