use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;

use crate::config::SmtpSettings;
use crate::services::mailer::{Mailer, OutgoingEmail};

use super::MailError;

#[derive(Clone)]
pub struct SmtpMailer {
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let mailer = if settings.tls_disabled {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
                .port(settings.port)
                .build()
        } else {
            let creds = Credentials::new(settings.username.clone(), settings.password.clone());
            let tls = TlsParameters::new(settings.host.clone())?;

            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
                .port(settings.port)
                .tls(Tls::Required(tls))
                .credentials(creds)
                .build()
        };

        Ok(Self {
            transport: Arc::new(mailer),
        })
    }
}

fn build_message(email: &OutgoingEmail) -> Result<Message, MailError> {
    let from: Mailbox = email.from.parse()?;
    let mut builder = Message::builder().from(from).subject(email.subject.as_str());

    for recipient in &email.to {
        let mailbox: Mailbox = recipient.parse()?;
        builder = builder.to(mailbox);
    }

    if let Some(reply_to) = &email.reply_to {
        let mailbox: Mailbox = reply_to.parse()?;
        builder = builder.reply_to(mailbox);
    }

    Ok(builder
        .header(ContentType::TEXT_HTML)
        .body(email.html.clone())?)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = build_message(email)?;

        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| e.into())
    }
}
