use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::models::{
    contact::{ContactMessage, ContactPayload, ContactSubmission},
    signup::{BetaSignupPayload, OperatingSystem, SignupRequest, OTHER_COUNTRY},
};

// One `@`, a dot in the domain, no whitespace.
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Signup rules in evaluation order; the first failing rule is the one the
/// user sees.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SignupValidationError {
    #[error("Veuillez entrer votre prénom.")]
    MissingFirstName,
    #[error("Veuillez entrer une adresse email valide.")]
    InvalidEmail,
    #[error("Veuillez sélectionner votre pays.")]
    MissingCountry,
    #[error("Veuillez sélectionner un pays dans la liste.")]
    MissingOtherCountry,
    #[error("Veuillez indiquer comment vous avez connu Qera.")]
    MissingSource,
    #[error("Veuillez choisir votre système (iOS ou Android).")]
    InvalidOperatingSystem,
}

pub fn validate_signup(payload: &BetaSignupPayload) -> Result<SignupRequest, SignupValidationError> {
    let first_name = payload.first_name.trim();
    if first_name.is_empty() {
        return Err(SignupValidationError::MissingFirstName);
    }

    if !is_valid_email(&payload.email) {
        return Err(SignupValidationError::InvalidEmail);
    }

    let country = payload.country.trim();
    if country.is_empty() {
        return Err(SignupValidationError::MissingCountry);
    }

    let resolved_country = payload.resolved_country();
    if country == OTHER_COUNTRY && resolved_country.is_empty() {
        return Err(SignupValidationError::MissingOtherCountry);
    }

    let source = payload.source.trim();
    if source.is_empty() {
        return Err(SignupValidationError::MissingSource);
    }

    let os = OperatingSystem::parse(&payload.os)
        .ok_or(SignupValidationError::InvalidOperatingSystem)?;

    Ok(SignupRequest {
        first_name: first_name.to_string(),
        email: payload.email.clone(),
        os,
        country: resolved_country.to_string(),
        source: source.to_string(),
    })
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ContactValidationError {
    #[error("Veuillez remplir tous les champs obligatoires.")]
    MissingFields,
    #[error("Veuillez entrer une adresse email valide.")]
    InvalidEmail,
    #[error("Veuillez compléter le CAPTCHA.")]
    MissingCaptcha,
}

pub fn validate_contact(
    payload: &ContactPayload,
) -> Result<ContactSubmission, ContactValidationError> {
    let name = payload.name.trim();
    let subject = payload.subject.trim();
    let message = payload.message.trim();

    if name.is_empty() || payload.email.trim().is_empty() || subject.is_empty() || message.is_empty()
    {
        return Err(ContactValidationError::MissingFields);
    }

    if !is_valid_email(&payload.email) {
        return Err(ContactValidationError::InvalidEmail);
    }

    let captcha_token = payload
        .recaptcha_token
        .as_deref()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ContactValidationError::MissingCaptcha)?;

    Ok(ContactSubmission {
        message: ContactMessage {
            name: name.to_string(),
            email: payload.email.clone(),
            subject: subject.to_string(),
            message: message.to_string(),
        },
        captcha_token: captcha_token.to_string(),
    })
}
