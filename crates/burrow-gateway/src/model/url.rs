use serde::{Deserialize, Serialize};

/// Body of a create request.
#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    #[serde(rename = "originalUrl", alias = "url")]
    pub original_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUrlResponse {
    pub data: ShortUrlData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortUrlData {
    #[serde(rename = "shortUrl")]
    pub short_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}
