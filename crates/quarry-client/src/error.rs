use quarry_response::ResponseError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] ureq::Error),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response error: {0}")]
    Response(#[from] ResponseError),
}

