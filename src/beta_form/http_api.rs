use async_trait::async_trait;
use reqwest::Client;

use super::{SignupApi, SignupApiError};
use crate::models::signup::BetaSignupPayload;
use crate::responses::JsonResponse;

/// Posts signups to a running backend over HTTP.
#[derive(Clone)]
pub struct HttpSignupApi {
    http: Client,
    endpoint: String,
}

impl HttpSignupApi {
    pub fn new(base_url: &str, http: &Client) -> Self {
        Self {
            http: http.clone(),
            endpoint: format!("{}/api/beta-signup", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl SignupApi for HttpSignupApi {
    async fn submit(&self, payload: &BetaSignupPayload) -> Result<(), SignupApiError> {
        let res = self
            .http
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| SignupApiError::Transport(e.to_string()))?;

        let status = res.status();
        // An answer without a readable JSON body does not confirm anything.
        let body: JsonResponse = res
            .json()
            .await
            .map_err(|e| SignupApiError::Transport(e.to_string()))?;

        if status.is_success() {
            return Ok(());
        }

        Err(SignupApiError::Rejected {
            status: status.as_u16(),
            message: body.error,
        })
    }
}
