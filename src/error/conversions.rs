use super::LlmError;

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::api_error(status.as_u16(), err.to_string());
        }
        Self::HttpError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &str) -> Result<serde_json::Value, LlmError> {
        Ok(serde_json::from_str(data)?)
    }

    #[test]
    fn json_errors_convert() {
        assert!(matches!(parse("{oops"), Err(LlmError::JsonError(_))));
    }

    #[tokio::test]
    async fn connection_failures_convert_to_http_error() {
        // Port 9 (discard) is not expected to accept connections
        let err: LlmError = reqwest::Client::new()
            .get("http://127.0.0.1:9/")
            .send()
            .await
            .unwrap_err()
            .into();
        assert!(matches!(err, LlmError::HttpError(_)), "{err:?}");
    }
}
