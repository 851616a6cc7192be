#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("Decode error: {0}")]
    Decode(String),
    /// The backend answered with `isSuccess: false`.
    #[error("Request rejected: {}", .message.as_deref().unwrap_or("<no message>"))]
    Rejected { message: Option<String> },
    #[error("Unauthorized")]
    Unauthorized,
}

impl ApiError {
    /// Message to show next to the affected section.
    /// Server-supplied text for rejections, `fallback` for everything else.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected {
                message: Some(msg),
            } if !msg.trim().is_empty() => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}
