//! Client side of the beta signup: the form's draft fields and the
//! `Form -> Submitting -> Success` state machine, driven against any
//! [`SignupApi`].

use async_trait::async_trait;
use thiserror::Error;

use crate::models::signup::{BetaSignupPayload, OperatingSystem, SignupRequest};
use crate::utils::{
    referral::ReferralLink,
    validation::{validate_signup, SignupValidationError},
};

mod http_api;

pub use http_api::HttpSignupApi;

pub const CONNECTION_ERROR_MESSAGE: &str = "Impossible de se connecter. Vérifiez votre connexion.";
pub const GENERIC_ERROR_MESSAGE: &str = "Une erreur est survenue. Réessayez.";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignupApiError {
    /// The server answered with a non-2xx status.
    #[error("signup rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },
    /// No usable answer: connection failure, timeout, unreadable body.
    #[error("signup request failed: {0}")]
    Transport(String),
}

#[async_trait]
pub trait SignupApi: Send + Sync {
    async fn submit(&self, payload: &BetaSignupPayload) -> Result<(), SignupApiError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Form { error: Option<String> },
    Submitting,
    Success { referral: ReferralLink },
}

/// Why `begin_submit` refused to start a request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("a submission is already in flight")]
    AlreadySubmitting,
    #[error("the signup already succeeded")]
    Completed,
    #[error(transparent)]
    Invalid(#[from] SignupValidationError),
}

pub struct BetaForm {
    pub draft: BetaSignupPayload,
    referral_base_url: String,
    state: FormState,
}

impl BetaForm {
    pub fn new(referral_base_url: impl Into<String>) -> Self {
        Self {
            draft: BetaSignupPayload {
                os: OperatingSystem::Ios.as_str().to_string(),
                ..Default::default()
            },
            referral_base_url: referral_base_url.into(),
            state: FormState::Form { error: None },
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Runs the local rules and, if they pass, moves to `Submitting` and
    /// returns the body to send. A failing rule leaves the form editable
    /// with that rule's message.
    pub fn begin_submit(&mut self) -> Result<BetaSignupPayload, SubmitRejected> {
        match self.state {
            FormState::Submitting => return Err(SubmitRejected::AlreadySubmitting),
            FormState::Success { .. } => return Err(SubmitRejected::Completed),
            FormState::Form { .. } => {}
        }

        match validate_signup(&self.draft) {
            Ok(signup) => {
                self.state = FormState::Submitting;
                Ok(wire_payload(&signup))
            }
            Err(err) => {
                self.state = FormState::Form {
                    error: Some(err.to_string()),
                };
                Err(err.into())
            }
        }
    }

    /// Applies the server's answer to an in-flight submission. Outcomes that
    /// arrive in any other state are ignored.
    pub fn complete(&mut self, outcome: Result<(), SignupApiError>) -> &FormState {
        if self.state != FormState::Submitting {
            tracing::warn!("Ignoring signup outcome outside of a submission");
            return &self.state;
        }

        self.state = match outcome {
            Ok(()) => FormState::Success {
                referral: ReferralLink::generate(&self.referral_base_url),
            },
            Err(SignupApiError::Rejected { message, .. }) => FormState::Form {
                error: Some(
                    message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
                ),
            },
            Err(SignupApiError::Transport(detail)) => {
                tracing::warn!(error = %detail, "Signup request did not reach the server");
                FormState::Form {
                    error: Some(CONNECTION_ERROR_MESSAGE.to_string()),
                }
            }
        };
        &self.state
    }

    pub async fn submit<A>(&mut self, api: &A) -> &FormState
    where
        A: SignupApi + ?Sized,
    {
        let payload = match self.begin_submit() {
            Ok(payload) => payload,
            Err(_) => return &self.state,
        };
        let outcome = api.submit(&payload).await;
        self.complete(outcome)
    }
}

/// The body the server receives: `OTHER` already replaced by the catalog
/// pick, names trimmed.
fn wire_payload(signup: &SignupRequest) -> BetaSignupPayload {
    BetaSignupPayload {
        first_name: signup.first_name.clone(),
        email: signup.email.clone(),
        os: signup.os.as_str().to_string(),
        country: signup.country.clone(),
        other_country: None,
        source: signup.source.clone(),
    }
}
