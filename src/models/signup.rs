use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker the short country list uses to ask for a pick from the full catalog.
pub const OTHER_COUNTRY: &str = "OTHER";

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystem {
    Ios,
    Android,
}

impl OperatingSystem {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ios" => Some(OperatingSystem::Ios),
            "android" => Some(OperatingSystem::Android),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingSystem::Ios => "ios",
            OperatingSystem::Android => "android",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OperatingSystem::Ios => "🍎 iOS",
            OperatingSystem::Android => "🤖 Android",
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/beta-signup` as the form sends it. Every field
/// defaults to empty so a missing key is reported by validation rather than
/// by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BetaSignupPayload {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_country: Option<String>,
    #[serde(default)]
    pub source: String,
}

impl BetaSignupPayload {
    /// The country the user actually means: the catalog pick when the short
    /// list's `OTHER` entry was chosen, the selected code otherwise.
    pub fn resolved_country(&self) -> &str {
        if self.country.trim() == OTHER_COUNTRY {
            self.other_country.as_deref().map(str::trim).unwrap_or("")
        } else {
            self.country.trim()
        }
    }
}

/// A signup that passed every validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub first_name: String,
    pub email: String,
    pub os: OperatingSystem,
    pub country: String,
    pub source: String,
}
