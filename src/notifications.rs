//! Templates for the emails the forms trigger.
//!
//! Every value that came from a visitor goes through [`escape_html`] before
//! it is interpolated.

use chrono::{DateTime, Datelike, Utc};

use crate::config::EmailSettings;
use crate::models::{contact::ContactMessage, signup::SignupRequest};
use crate::services::mailer::OutgoingEmail;
use crate::utils::{
    countries::display_name,
    html::{escape_html, text_to_html},
};

pub const WELCOME_SUBJECT: &str = "Bienvenue dans la beta Qera ! 🎉";

/// Operator copy of a beta signup. Replies go straight to the visitor.
pub fn operator_notification(
    signup: &SignupRequest,
    settings: &EmailSettings,
    now: DateTime<Utc>,
) -> OutgoingEmail {
    let email = escape_html(&signup.email);
    let country = match display_name(&signup.country) {
        Some(name) => format!("{} ({})", name, escape_html(&signup.country)),
        None => escape_html(&signup.country),
    };
    let (badge_bg, badge_fg) = match signup.os {
        crate::models::signup::OperatingSystem::Ios => ("#e0e7ff", "#3730a3"),
        crate::models::signup::OperatingSystem::Android => ("#dcfce7", "#166534"),
    };

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background-color: #2563eb; color: white; padding: 20px; border-radius: 8px 8px 0 0;">
    <h2 style="margin: 0;">🎉 Nouvelle inscription Beta</h2>
  </div>
  <div style="background-color: #f3f4f6; padding: 20px;">
    <div style="background-color: white; padding: 20px; border-radius: 8px; margin-bottom: 15px;">
      <h3 style="margin-top: 0; color: #2563eb;">Informations de l'utilisateur</h3>
      <table style="width: 100%; border-collapse: collapse;">
        <tr><td style="padding: 8px 0; font-weight: bold; color: #4b5563;">Prénom:</td><td style="padding: 8px 0;">{first_name}</td></tr>
        <tr><td style="padding: 8px 0; font-weight: bold; color: #4b5563;">Email:</td><td style="padding: 8px 0;"><a href="mailto:{email}" style="color: #2563eb; text-decoration: none;">{email}</a></td></tr>
        <tr><td style="padding: 8px 0; font-weight: bold; color: #4b5563;">Système:</td><td style="padding: 8px 0;"><span style="background-color: {badge_bg}; color: {badge_fg}; padding: 4px 12px; border-radius: 12px; font-weight: 600; font-size: 14px;">{os_label}</span></td></tr>
        <tr><td style="padding: 8px 0; font-weight: bold; color: #4b5563;">Pays:</td><td style="padding: 8px 0;">{country}</td></tr>
        <tr><td style="padding: 8px 0; font-weight: bold; color: #4b5563;">Source:</td><td style="padding: 8px 0;">{source}</td></tr>
        <tr><td style="padding: 8px 0; font-weight: bold; color: #4b5563;">Date:</td><td style="padding: 8px 0; color: #1f2937;">{date}</td></tr>
      </table>
    </div>
    <div style="background-color: #dbeafe; padding: 15px; border-radius: 8px; border-left: 4px solid #2563eb;">
      <p style="margin: 0; color: #1e40af; font-size: 14px;"><strong>💡 Action requise:</strong> Envoyez un email d'accès beta à cet utilisateur dans les 48h.</p>
    </div>
  </div>
  <div style="margin-top: 20px; padding: 15px; text-align: center;">
    <p style="color: #6b7280; font-size: 12px; margin: 0;">Cette notification a été envoyée automatiquement depuis le formulaire beta de Qera</p>
  </div>
</div>"#,
        first_name = escape_html(&signup.first_name),
        email = email,
        badge_bg = badge_bg,
        badge_fg = badge_fg,
        os_label = signup.os.label(),
        country = country,
        source = escape_html(&signup.source),
        date = now.format("%d/%m/%Y à %H:%M UTC"),
    );

    OutgoingEmail {
        from: settings.from.clone(),
        to: vec![settings.operator_inbox.clone()],
        reply_to: Some(signup.email.clone()),
        subject: format!(
            "[Qera Beta] Nouvelle inscription - {}",
            signup.os.as_str().to_uppercase()
        ),
        html,
    }
}

/// Fixed welcome message; the first name is the only personal detail.
pub fn welcome_email(
    signup: &SignupRequest,
    settings: &EmailSettings,
    now: DateTime<Utc>,
) -> OutgoingEmail {
    let operator_inbox = escape_html(&settings.operator_inbox);
    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background-color: #2563eb; color: white; padding: 30px; border-radius: 8px 8px 0 0; text-align: center;">
    <h1 style="margin: 0; font-size: 32px;">🎉 Bienvenue {first_name} !</h1>
  </div>
  <div style="background-color: #f9fafb; padding: 30px;">
    <div style="background-color: white; padding: 25px; border-radius: 8px; margin-bottom: 20px;">
      <h2 style="color: #1f2937; margin-top: 0;">Merci de votre inscription à la beta Qera</h2>
      <p style="color: #4b5563; line-height: 1.6;">Nous sommes ravis de vous compter parmi nos premiers utilisateurs ! Vous recevrez vos accès anticipés d'ici <strong>48 heures</strong>.</p>
    </div>
    <div style="background-color: white; padding: 25px; border-radius: 8px; margin-bottom: 20px;">
      <h3 style="color: #2563eb; margin-top: 0;">📧 Prochaines étapes</h3>
      <ol style="color: #4b5563; line-height: 1.8; padding-left: 20px;">
        <li>Surveillez votre boîte email (vérifiez vos spams)</li>
        <li>Téléchargez l'app via le lien que nous vous enverrons</li>
        <li>Profitez de Qera en avant-première !</li>
      </ol>
    </div>
    <div style="background-color: #dbeafe; padding: 20px; border-radius: 8px; border-left: 4px solid #2563eb;">
      <p style="margin: 0; color: #1e40af;"><strong>💡 Astuce:</strong> Invitez vos amis pour passer en priorité dans la file d'attente !</p>
    </div>
  </div>
  <div style="background-color: #f3f4f6; padding: 20px; text-align: center; border-radius: 0 0 8px 8px;">
    <p style="color: #6b7280; font-size: 14px; margin: 0 0 10px 0;">Des questions ? Contactez-nous à <a href="mailto:{operator_inbox}" style="color: #2563eb;">{operator_inbox}</a></p>
    <p style="color: #9ca3af; font-size: 12px; margin: 0;">© {year} Qera. Tous droits réservés.</p>
  </div>
</div>"#,
        first_name = escape_html(&signup.first_name),
        operator_inbox = operator_inbox,
        year = now.year(),
    );

    OutgoingEmail {
        from: settings.from.clone(),
        to: vec![signup.email.clone()],
        reply_to: None,
        subject: WELCOME_SUBJECT.to_string(),
        html,
    }
}

/// Contact-form message forwarded to the operator inbox.
pub fn contact_forward(message: &ContactMessage, settings: &EmailSettings) -> OutgoingEmail {
    let email = escape_html(&message.email);
    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #2563eb;">📬 Nouveau message de contact</h2>
  <p><strong>Nom :</strong> {name}</p>
  <p><strong>Email :</strong> <a href="mailto:{email}">{email}</a></p>
  <p><strong>Sujet :</strong> {subject}</p>
  <div style="background-color: #f3f4f6; padding: 15px; border-radius: 8px;">{body}</div>
</div>"#,
        name = escape_html(&message.name),
        email = email,
        subject = escape_html(&message.subject),
        body = text_to_html(&message.message),
    );

    OutgoingEmail {
        from: settings.from.clone(),
        to: vec![settings.operator_inbox.clone()],
        reply_to: Some(message.email.clone()),
        subject: format!("[Qera Contact] {}", single_line(&message.subject)),
        html,
    }
}

fn single_line(value: &str) -> String {
    value
        .split(|c| c == '\r' || c == '\n')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
