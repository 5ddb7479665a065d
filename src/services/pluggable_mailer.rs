use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

use crate::config::EmailProvider;
use crate::services::mailer::{MailError, Mailer, OutgoingEmail, SmtpMailer};

use super::resend_mailer::ResendMailer;

#[derive(Clone)]
enum AppSender {
    Resend(Arc<ResendMailer>),
    Smtp(Arc<SmtpMailer>),
}

/// Mailer selected by `EMAIL_PROVIDER` at startup.
#[derive(Clone)]
pub struct PluggableMailer {
    app_sender: AppSender,
}

impl PluggableMailer {
    pub fn from_provider(provider: &EmailProvider, http: &Client) -> Result<Self, MailError> {
        let app_sender = match provider {
            EmailProvider::Resend { api_key, api_url } => {
                AppSender::Resend(Arc::new(ResendMailer::new(api_key, api_url, http)?))
            }
            EmailProvider::Smtp(settings) => AppSender::Smtp(Arc::new(SmtpMailer::new(settings)?)),
        };

        Ok(Self { app_sender })
    }

    pub fn provider_name(&self) -> &'static str {
        match &self.app_sender {
            AppSender::Resend(_) => "resend",
            AppSender::Smtp(_) => "smtp",
        }
    }
}

#[async_trait]
impl Mailer for PluggableMailer {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let result = match &self.app_sender {
            AppSender::Resend(resend) => resend.send_email(email).await,
            AppSender::Smtp(smtp) => smtp.send_email(email).await,
        };

        if let Err(error) = &result {
            tracing::error!(
                error = %error,
                provider = self.provider_name(),
                recipients = email.to.len(),
                "Failed to send email"
            );
        }

        result
    }
}
