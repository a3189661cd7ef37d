use axum::http::StatusCode;

/// Handler-facing error. The dashboard's loads are absent-tolerant, so the
/// only failure a handler can surface is invalid client input.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn bad_request_maps_to_400() {
        let response = AppError::bad_request("unknown platform").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
