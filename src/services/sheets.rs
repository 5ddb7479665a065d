use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::config::SheetsSettings;
use crate::models::signup::BetaSignupPayload;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECONDS: i64 = 3600;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("invalid service account private key: {0}")]
    InvalidKey(jsonwebtoken::errors::Error),
    #[error("failed to sign service account assertion: {0}")]
    Signing(jsonwebtoken::errors::Error),
    #[error("Google API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Google {stage} responded with status {status}: {body}")]
    UnexpectedStatus {
        stage: &'static str,
        status: StatusCode,
        body: String,
    },
}

/// One spreadsheet line: `[firstName, email, os, country, source, isoTimestamp]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub first_name: String,
    pub email: String,
    pub os: String,
    pub country: String,
    pub source: String,
    pub recorded_at: String,
}

impl SheetRow {
    pub fn from_payload(payload: &BetaSignupPayload, at: DateTime<Utc>) -> Self {
        Self {
            first_name: payload.first_name.trim().to_string(),
            email: payload.email.trim().to_string(),
            os: payload.os.trim().to_string(),
            country: payload.resolved_country().to_string(),
            source: payload.source.trim().to_string(),
            recorded_at: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn values(&self) -> [&str; 6] {
        [
            self.first_name.as_str(),
            self.email.as_str(),
            self.os.as_str(),
            self.country.as_str(),
            self.source.as_str(),
            self.recorded_at.as_str(),
        ]
    }
}

#[async_trait]
pub trait SignupSheet: Send + Sync {
    async fn append_row(&self, row: &SheetRow) -> Result<(), SheetsError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct ServiceAccountClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Appends rows through the Sheets v4 API, authenticating as a service
/// account. A fresh access token is fetched for every append.
pub struct GoogleSheetsClient {
    http: Client,
    settings: SheetsSettings,
    signing_key: EncodingKey,
}

impl GoogleSheetsClient {
    pub fn new(settings: SheetsSettings, http: &Client) -> Result<Self, SheetsError> {
        let signing_key = EncodingKey::from_rsa_pem(settings.private_key.as_bytes())
            .map_err(SheetsError::InvalidKey)?;

        Ok(Self {
            http: http.clone(),
            settings,
            signing_key,
        })
    }

    fn service_account_assertion(&self, now: DateTime<Utc>) -> Result<String, SheetsError> {
        let iat = now.timestamp();
        let claims = ServiceAccountClaims {
            iss: self.settings.client_email.clone(),
            scope: SHEETS_SCOPE.to_string(),
            aud: self.settings.token_url.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECONDS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.signing_key)
            .map_err(SheetsError::Signing)
    }

    async fn fetch_access_token(&self) -> Result<String, SheetsError> {
        let assertion = self.service_account_assertion(Utc::now())?;

        let res = self
            .http
            .post(&self.settings.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(SheetsError::UnexpectedStatus {
                stage: "token endpoint",
                status,
                body,
            });
        }

        let token: TokenResponse = res.json().await?;
        Ok(token.access_token)
    }

    fn append_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}:append",
            self.settings.api_url.trim_end_matches('/'),
            urlencoding::encode(&self.settings.spreadsheet_id),
            urlencoding::encode(&self.settings.range)
        )
    }
}

#[async_trait]
impl SignupSheet for GoogleSheetsClient {
    async fn append_row(&self, row: &SheetRow) -> Result<(), SheetsError> {
        let access_token = self.fetch_access_token().await?;

        let res = self
            .http
            .post(self.append_url())
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .bearer_auth(access_token)
            .json(&json!({ "values": [row.values()] }))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(SheetsError::UnexpectedStatus {
                stage: "Sheets API",
                status,
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use httpmock::{Method::POST, MockServer};
    use jsonwebtoken::{decode, DecodingKey, Validation};

    const TEST_PRIVATE_KEY: &str = include_str!("testdata/service_account_key.pem");
    const TEST_PUBLIC_KEY: &str = include_str!("testdata/service_account_key.pub.pem");

    fn settings_for(server: &MockServer) -> SheetsSettings {
        SheetsSettings {
            client_email: "beta-log@qera.iam.gserviceaccount.com".into(),
            private_key: TEST_PRIVATE_KEY.into(),
            spreadsheet_id: "sheet-123".into(),
            range: "'Feuille 1'!A:F".into(),
            token_url: server.url("/token"),
            api_url: server.base_url(),
        }
    }

    fn sample_row() -> SheetRow {
        SheetRow {
            first_name: "Alice".into(),
            email: "alice@example.com".into(),
            os: "ios".into(),
            country: "FR".into(),
            source: "instagram".into(),
            recorded_at: "2025-01-02T03:04:05.678Z".into(),
        }
    }

    #[test]
    fn row_from_payload_uses_iso_timestamp_and_resolved_country() {
        let payload = BetaSignupPayload {
            first_name: " Alice ".into(),
            email: "alice@example.com".into(),
            os: "android".into(),
            country: "OTHER".into(),
            other_country: Some("JP".into()),
            source: "friend".into(),
        };
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

        let row = SheetRow::from_payload(&payload, at);

        assert_eq!(
            row.values(),
            [
                "Alice",
                "alice@example.com",
                "android",
                "JP",
                "friend",
                "2025-01-02T03:04:05.000Z"
            ]
        );
    }

    #[test]
    fn row_from_payload_trims_every_column() {
        let payload = BetaSignupPayload {
            first_name: "Alice".into(),
            email: "alice@example.com".into(),
            os: " ios ".into(),
            country: "FR".into(),
            other_country: None,
            source: "instagram\n".into(),
        };
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

        let row = SheetRow::from_payload(&payload, at);

        assert_eq!(row.os, "ios");
        assert_eq!(row.source, "instagram");
    }

    #[test]
    fn rejects_an_invalid_private_key() {
        let server = MockServer::start();
        let mut settings = settings_for(&server);
        settings.private_key = "not a pem".into();

        let err = GoogleSheetsClient::new(settings, &Client::new())
            .err()
            .expect("garbage key should be rejected");
        assert!(matches!(err, SheetsError::InvalidKey(_)));
    }

    #[test]
    fn assertion_is_signed_for_the_token_endpoint() {
        let server = MockServer::start();
        let settings = settings_for(&server);
        let client = GoogleSheetsClient::new(settings.clone(), &Client::new()).unwrap();

        let assertion = client.service_account_assertion(Utc::now()).unwrap();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[settings.token_url.as_str()]);
        let decoded = decode::<ServiceAccountClaims>(
            &assertion,
            &DecodingKey::from_rsa_pem(TEST_PUBLIC_KEY.as_bytes()).unwrap(),
            &validation,
        )
        .unwrap();

        assert_eq!(decoded.claims.iss, settings.client_email);
        assert_eq!(decoded.claims.scope, SHEETS_SCOPE);
        assert_eq!(
            decoded.claims.exp - decoded.claims.iat,
            ASSERTION_LIFETIME_SECONDS
        );
    }

    #[tokio::test]
    async fn appends_row_with_service_account_token() {
        let server = MockServer::start();
        let token_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/token")
                .body_contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer")
                .body_contains("assertion=");
            then.status(200).json_body(json!({
                "access_token": "ya29.test",
                "expires_in": 3599,
                "token_type": "Bearer"
            }));
        });
        let append_mock = server.mock(|when, then| {
            when.method(POST)
                .path_contains("/v4/spreadsheets/sheet-123/values/")
                .query_param("valueInputOption", "RAW")
                .query_param("insertDataOption", "INSERT_ROWS")
                .header("authorization", "Bearer ya29.test")
                .json_body(json!({
                    "values": [[
                        "Alice",
                        "alice@example.com",
                        "ios",
                        "FR",
                        "instagram",
                        "2025-01-02T03:04:05.678Z"
                    ]]
                }));
            then.status(200).json_body(json!({ "updates": { "updatedRows": 1 } }));
        });

        let client = GoogleSheetsClient::new(settings_for(&server), &Client::new()).unwrap();
        client.append_row(&sample_row()).await.unwrap();

        token_mock.assert();
        append_mock.assert();
    }

    #[tokio::test]
    async fn token_failure_stops_before_append() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/token");
            then.status(400)
                .json_body(json!({ "error": "invalid_grant" }));
        });
        let append_mock = server.mock(|when, then| {
            when.method(POST).path_contains("/v4/spreadsheets/");
            then.status(200);
        });

        let client = GoogleSheetsClient::new(settings_for(&server), &Client::new()).unwrap();
        let err = client
            .append_row(&sample_row())
            .await
            .expect_err("token failure should surface");

        assert_eq!(append_mock.hits(), 0);
        match err {
            SheetsError::UnexpectedStatus { stage, status, .. } => {
                assert_eq!(stage, "token endpoint");
                assert_eq!(status, StatusCode::BAD_REQUEST);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
