use axum::{
    extract::{rejection::JsonRejection, Json, State},
    response::{IntoResponse, Response},
};

use crate::{
    models::contact::ContactPayload,
    notifications::contact_forward,
    responses::JsonResponse,
    routes::SERVER_ERROR_MESSAGE,
    state::AppState,
    utils::validation::validate_contact,
};

pub const CONTACT_SUCCESS_MESSAGE: &str = "Message envoyé";
pub const CAPTCHA_FAILED_MESSAGE: &str = "Vérification CAPTCHA échouée.";

pub async fn handle_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::error!(error = %rejection.body_text(), "Unreadable contact body");
            return JsonResponse::server_error(SERVER_ERROR_MESSAGE).into_response();
        }
    };

    let submission = match validate_contact(&payload) {
        Ok(submission) => submission,
        Err(err) => return JsonResponse::bad_request(&err.to_string()).into_response(),
    };

    let Some(captcha) = state.captcha.as_ref() else {
        tracing::error!("Contact form used without RECAPTCHA_SECRET_KEY");
        return JsonResponse::server_error(SERVER_ERROR_MESSAGE).into_response();
    };

    match captcha.verify(&submission.captcha_token).await {
        Ok(true) => {}
        Ok(false) => return JsonResponse::bad_request(CAPTCHA_FAILED_MESSAGE).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "reCAPTCHA verification failed");
            return JsonResponse::server_error(SERVER_ERROR_MESSAGE).into_response();
        }
    }

    let email = contact_forward(&submission.message, &state.config.email);
    if let Err(err) = state.mailer.send_email(&email).await {
        tracing::error!(error = %err, "Failed to forward contact message");
        return JsonResponse::server_error(SERVER_ERROR_MESSAGE).into_response();
    }

    tracing::info!("Contact message forwarded");
    JsonResponse::success(CONTACT_SUCCESS_MESSAGE).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_OPERATOR_INBOX;
    use crate::services::{
        mailer::MockMailer,
        recaptcha::{CaptchaVerifier, RecaptchaError},
    };
    use crate::state::test_state;
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::post,
        Router,
    };
    use serde_json::{json, Value};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tower::ServiceExt;

    enum Verdict {
        Accept,
        Refuse,
        Unreachable,
    }

    struct StubVerifier {
        verdict: Verdict,
        calls: AtomicUsize,
    }

    impl StubVerifier {
        fn new(verdict: Verdict) -> Arc<Self> {
            Arc::new(Self {
                verdict,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CaptchaVerifier for StubVerifier {
        async fn verify(&self, _token: &str) -> Result<bool, RecaptchaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.verdict {
                Verdict::Accept => Ok(true),
                Verdict::Refuse => Ok(false),
                Verdict::Unreachable => Err(RecaptchaError::UnexpectedStatus(
                    reqwest::StatusCode::SERVICE_UNAVAILABLE,
                )),
            }
        }
    }

    fn test_app(mailer: Arc<MockMailer>, captcha: Option<Arc<StubVerifier>>) -> Router {
        let mut state = test_state(mailer);
        state.captcha = captcha.map(|c| c as Arc<dyn CaptchaVerifier>);
        Router::new()
            .route("/", post(handle_contact))
            .with_state(state)
    }

    async fn call(app: Router, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn bob() -> Value {
        json!({
            "name": "Bob",
            "email": "bob@example.com",
            "subject": "Partenariat",
            "message": "Bonjour,\nParlons-en.",
            "recaptchaToken": "token-123"
        })
    }

    #[tokio::test]
    async fn verified_message_is_forwarded_to_the_operator() {
        let mailer = Arc::new(MockMailer::default());
        let verifier = StubVerifier::new(Verdict::Accept);

        let (status, json) = call(test_app(mailer.clone(), Some(verifier.clone())), bob()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], CONTACT_SUCCESS_MESSAGE);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec![DEFAULT_OPERATOR_INBOX.to_string()]);
        assert_eq!(sent[0].reply_to.as_deref(), Some("bob@example.com"));
    }

    #[tokio::test]
    async fn missing_token_is_rejected_before_verification() {
        let mailer = Arc::new(MockMailer::default());
        let verifier = StubVerifier::new(Verdict::Accept);
        let mut body = bob();
        body.as_object_mut().unwrap().remove("recaptchaToken");

        let (status, json) = call(test_app(mailer.clone(), Some(verifier.clone())), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Veuillez compléter le CAPTCHA.");
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
        assert_eq!(mailer.attempts(), 0);
    }

    #[tokio::test]
    async fn refused_captcha_is_a_bad_request() {
        let mailer = Arc::new(MockMailer::default());
        let (status, json) = call(
            test_app(mailer.clone(), Some(StubVerifier::new(Verdict::Refuse))),
            bob(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], CAPTCHA_FAILED_MESSAGE);
        assert_eq!(mailer.attempts(), 0);
    }

    #[tokio::test]
    async fn verifier_outage_is_a_generic_server_error() {
        let mailer = Arc::new(MockMailer::default());
        let (status, json) = call(
            test_app(mailer.clone(), Some(StubVerifier::new(Verdict::Unreachable))),
            bob(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], SERVER_ERROR_MESSAGE);
        assert_eq!(mailer.attempts(), 0);
    }

    #[tokio::test]
    async fn missing_secret_is_a_server_error() {
        let mailer = Arc::new(MockMailer::default());
        let (status, json) = call(test_app(mailer.clone(), None), bob()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], SERVER_ERROR_MESSAGE);
        assert_eq!(mailer.attempts(), 0);
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let mailer = Arc::new(MockMailer::default());
        let mut body = bob();
        body["subject"] = json!("");

        let (status, json) = call(
            test_app(mailer.clone(), Some(StubVerifier::new(Verdict::Accept))),
            body,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Veuillez remplir tous les champs obligatoires.");
    }

    #[tokio::test]
    async fn forward_failure_is_a_server_error() {
        let mailer = Arc::new(MockMailer::failing());
        let (status, json) = call(
            test_app(mailer.clone(), Some(StubVerifier::new(Verdict::Accept))),
            bob(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], SERVER_ERROR_MESSAGE);
    }
}
