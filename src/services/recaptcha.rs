use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::config::RecaptchaSettings;

#[derive(Debug, Error)]
pub enum RecaptchaError {
    #[error("failed to reach reCAPTCHA: {0}")]
    Http(#[from] reqwest::Error),
    #[error("reCAPTCHA responded with status {0}")]
    UnexpectedStatus(StatusCode),
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// `Ok(false)` means the token was checked and refused.
    async fn verify(&self, token: &str) -> Result<bool, RecaptchaError>;
}

pub struct RecaptchaClient {
    http: Client,
    secret: String,
    verify_url: String,
}

impl RecaptchaClient {
    pub fn new(settings: &RecaptchaSettings, http: &Client) -> Self {
        Self {
            http: http.clone(),
            secret: settings.secret.clone(),
            verify_url: settings.verify_url.clone(),
        }
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaClient {
    async fn verify(&self, token: &str) -> Result<bool, RecaptchaError> {
        let res = self
            .http
            .post(&self.verify_url)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(RecaptchaError::UnexpectedStatus(res.status()));
        }

        let body: SiteVerifyResponse = res.json().await?;
        if !body.success {
            tracing::warn!(error_codes = ?body.error_codes, "reCAPTCHA token rejected");
        }
        Ok(body.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};
    use serde_json::json;

    fn client_for(server: &MockServer) -> RecaptchaClient {
        RecaptchaClient::new(
            &RecaptchaSettings {
                secret: "s3cret".into(),
                verify_url: server.url("/recaptcha/api/siteverify"),
            },
            &Client::new(),
        )
    }

    #[tokio::test]
    async fn sends_secret_and_token_as_form_fields() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/recaptcha/api/siteverify")
                .header("content-type", "application/x-www-form-urlencoded")
                .body_contains("secret=s3cret")
                .body_contains("response=token-123");
            then.status(200).json_body(json!({ "success": true }));
        });

        let verified = client_for(&server).verify("token-123").await.unwrap();

        mock.assert();
        assert!(verified);
    }

    #[tokio::test]
    async fn refused_token_is_not_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/recaptcha/api/siteverify");
            then.status(200).json_body(json!({
                "success": false,
                "error-codes": ["invalid-input-response"]
            }));
        });

        let verified = client_for(&server).verify("bad-token").await.unwrap();
        assert!(!verified);
    }

    #[tokio::test]
    async fn upstream_failure_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/recaptcha/api/siteverify");
            then.status(503);
        });

        let err = client_for(&server)
            .verify("token-123")
            .await
            .expect_err("503 should fail");
        assert!(matches!(
            err,
            RecaptchaError::UnexpectedStatus(StatusCode::SERVICE_UNAVAILABLE)
        ));
    }
}
