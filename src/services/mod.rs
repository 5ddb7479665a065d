pub mod mailer;
pub mod pluggable_mailer;
pub mod recaptcha;
pub mod resend_mailer;
pub mod sheets;
