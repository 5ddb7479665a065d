use crate::services::mailer::{MailError, Mailer, OutgoingEmail};
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

/// A mock mailer that records sent emails for testing purposes.
#[derive(Debug, Default)]
pub struct MockMailer {
    pub sent_emails: Mutex<Vec<OutgoingEmail>>,
    /// Fail every send.
    pub fail_send: bool,
    /// Fail only the n-th attempt (zero based).
    pub fail_on_attempt: Option<usize>,
    attempts: AtomicUsize,
}

impl MockMailer {
    pub fn failing() -> Self {
        Self {
            fail_send: true,
            ..Default::default()
        }
    }

    pub fn failing_on_attempt(attempt: usize) -> Self {
        Self {
            fail_on_attempt: Some(attempt),
            ..Default::default()
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent_emails
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_send || self.fail_on_attempt == Some(attempt) {
            return Err(MailError::Other("mock failure".into()));
        }

        self.sent_emails
            .lock()
            .map_err(|_| MailError::Other("mock mailer lock poisoned".into()))?
            .push(email.clone());
        Ok(())
    }
}
