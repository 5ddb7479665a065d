use crate::config::Config;
use crate::services::{
    mailer::Mailer,
    pluggable_mailer::PluggableMailer,
    recaptcha::{CaptchaVerifier, RecaptchaClient},
    sheets::{GoogleSheetsClient, SignupSheet},
};
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub mailer: Arc<dyn Mailer>,
    /// `None` when `RECAPTCHA_SECRET_KEY` is unset.
    pub captcha: Option<Arc<dyn CaptchaVerifier>>,
    /// `None` when the Google service account is not configured.
    pub sheets: Option<Arc<dyn SignupSheet>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Builds the production collaborators once, sharing one HTTP client.
    pub fn from_config(config: Arc<Config>, http: &Client) -> anyhow::Result<Self> {
        let mailer = PluggableMailer::from_provider(&config.email.provider, http)?;
        tracing::info!(provider = mailer.provider_name(), "Email provider ready");

        let captcha = match &config.recaptcha {
            Some(settings) => {
                Some(Arc::new(RecaptchaClient::new(settings, http)) as Arc<dyn CaptchaVerifier>)
            }
            None => {
                tracing::warn!("RECAPTCHA_SECRET_KEY not set; contact form will be refused");
                None
            }
        };

        let sheets = match &config.sheets {
            Some(settings) => Some(
                Arc::new(GoogleSheetsClient::new(settings.clone(), http)?) as Arc<dyn SignupSheet>,
            ),
            None => {
                tracing::info!("Google Sheets logging disabled");
                None
            }
        };

        Ok(Self {
            mailer: Arc::new(mailer),
            captcha,
            sheets,
            config,
        })
    }
}

#[cfg(test)]
pub(crate) fn test_state(mailer: Arc<dyn Mailer>) -> AppState {
    AppState {
        mailer,
        captcha: None,
        sheets: None,
        config: Arc::new(crate::config::test_config()),
    }
}
