use rand::Rng;
use serde::Serialize;

pub const REFERRAL_CODE_LEN: usize = 6;
const CODE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

const WHATSAPP_MESSAGE: &str = "Rejoins-moi sur la bêta de Qera, l'app qui analyse tes produits !";
const TELEGRAM_MESSAGE: &str = "Rejoins-moi sur la bêta de Qera !";

/// Short base-36 token for the share link. Not registered anywhere and not
/// guaranteed unique.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..REFERRAL_CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    WhatsApp,
    Telegram,
    LinkedIn,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReferralLink {
    pub base_url: String,
    pub code: String,
}

impl ReferralLink {
    pub fn generate(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            code: generate_code(),
        }
    }

    pub fn url(&self) -> String {
        format!("{}?ref={}", self.base_url, self.code)
    }

    pub fn share_url(&self, platform: SharePlatform) -> String {
        let link = self.url();
        match platform {
            SharePlatform::WhatsApp => format!(
                "https://wa.me/?text={}",
                urlencoding::encode(&format!("{} {}", WHATSAPP_MESSAGE, link))
            ),
            SharePlatform::Telegram => format!(
                "https://t.me/share/url?url={}&text={}",
                urlencoding::encode(&link),
                urlencoding::encode(TELEGRAM_MESSAGE)
            ),
            SharePlatform::LinkedIn => format!(
                "https://www.linkedin.com/sharing/share-offsite/?url={}",
                urlencoding::encode(&link)
            ),
        }
    }
}
