use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::services::mailer::{MailError, Mailer, OutgoingEmail};

#[derive(Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    html: &'a str,
}

/// Transactional mail through the Resend HTTP API.
#[derive(Clone)]
pub struct ResendMailer {
    api_key: String,
    api_url: String,
    http: Client,
}

impl ResendMailer {
    pub fn new(api_key: &str, api_url: &str, http: &Client) -> Result<Self, MailError> {
        if api_key.trim().is_empty() {
            return Err(MailError::Configuration("RESEND_API_KEY is empty".into()));
        }

        Ok(Self {
            api_key: api_key.to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
            http: http.clone(),
        })
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let payload = ResendEmail {
            from: &email.from,
            to: &email.to,
            reply_to: email.reply_to.as_deref(),
            subject: &email.subject,
            html: &email.html,
        };

        let resp = self
            .http
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailError::SendError(e.to_string()))?;

        if resp.status().is_success() {
            return Ok(());
        }

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        Err(MailError::SendError(format!(
            "Resend send failed: {} {}",
            status, text
        )))
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.send(email).await
    }
}
