use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SendSingleRequest {
    #[serde(default)]
    pub number: String,

    #[serde(default)]
    pub message: String,

    #[serde(default, alias = "mediaPath")]
    pub media_path: Option<String>,

    #[serde(default, alias = "timeoutMs")]
    pub timeout_ms: Option<u64>,
}
