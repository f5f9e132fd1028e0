// handlers/public/auth/register.rs - POST /api/auth/register handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use tracing::{error, info};

use super::utils::{non_blank, normalize_email};
use crate::auth::hash_password;
use crate::database::manager::DatabaseError;
use crate::database::models::user::NewUser;
use crate::error::ApiError;
use crate::messages::Message;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Registration payload; every field is optional here so missing fields
/// produce the localized 400 rather than a JSON rejection.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Registration input after validation
#[derive(Debug)]
struct Registration {
    name: Option<String>,
    email: String,
    password: String,
}

impl RegisterRequest {
    fn validate(self) -> Option<Registration> {
        let email = non_blank(self.email)?;
        let password = non_blank(self.password)?;

        Some(Registration {
            name: non_blank(self.name).map(|n| n.trim().to_string()),
            email: normalize_email(&email),
            password,
        })
    }
}

/// POST /api/auth/register - Create a recruiter account
///
/// Input: `{ "name"?: string, "email": string, "password": string }`
///
/// - 200 `{ "ok": true }` on success
/// - 400 when email or password is missing (the store is not queried)
/// - 409 when an account already uses the email
/// - 500 with a generic message for anything else
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<()> {
    let locale = state.config.locale;
    let server_error = || ApiError::internal_server_error(Message::ServerError.text(locale));
    let conflict = || ApiError::conflict(Message::AccountExists.text(locale));

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Rejected registration body: {}", rejection);
            RegisterRequest::default()
        }
    };

    let Some(registration) = request.validate() else {
        return Err(ApiError::bad_request(Message::MissingCredentials.text(locale)));
    };

    match state.gateway.find_user_by_email(&registration.email).await {
        Ok(Some(_)) => return Err(conflict()),
        Ok(None) => {}
        Err(e) => {
            error!("Registration lookup failed: {}", e);
            return Err(server_error());
        }
    }

    let password_hash = hash_password(registration.password, state.config.security.bcrypt_cost)
        .await
        .map_err(|e| {
            error!("Registration hashing failed: {}", e);
            server_error()
        })?;

    let new_user = NewUser {
        name: registration.name,
        email: registration.email,
        password_hash,
    };

    match state.gateway.create_user(new_user).await {
        Ok(user) => {
            info!("Registered user {}", user.id);
            Ok(ApiResponse::ok())
        }
        // Lost a race with a concurrent registration for the same email
        Err(DatabaseError::UniqueViolation(_)) => Err(conflict()),
        Err(e) => {
            error!("Registration insert failed: {}", e);
            Err(server_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Locale;
    use crate::testing::{self, MemoryGateway, RecordingMigrator, TestApp};

    fn register_request(body: Value) -> Request<Body> {
        Request::post("/api/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn registers_new_email() {
        let app = TestApp::new(testing::test_config());

        let (status, body) = send(
            &app,
            register_request(json!({ "name": "Ada", "email": "Ada@Example.com", "password": "hunter22" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));

        let users = app.gateway.users().await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "ada@example.com");
        assert_eq!(users[0].name.as_deref(), Some("Ada"));
        assert!(bcrypt::verify("hunter22", &users[0].password_hash).unwrap());
    }

    #[tokio::test]
    async fn existing_email_conflicts_whatever_the_password() {
        let app = TestApp::new(testing::test_config());
        testing::seed_user(&app.gateway, "ada@example.com", "original").await;

        for password in ["original", "different"] {
            let (status, body) = send(
                &app,
                register_request(json!({ "email": "ada@example.com", "password": password })),
            )
            .await;

            assert_eq!(status, StatusCode::CONFLICT);
            assert_eq!(body["error"], "An account already exists with this email");
        }
        assert_eq!(app.gateway.users().await.len(), 1);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_without_touching_store() {
        let app = TestApp::new(testing::test_config());

        for body in [
            json!({ "email": "ada@example.com" }),
            json!({ "password": "hunter22" }),
            json!({ "email": "   ", "password": "hunter22" }),
            json!({}),
        ] {
            let (status, body) = send(&app, register_request(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["ok"], false);
            assert_eq!(body["error"], "Email and password are required");
        }

        assert_eq!(app.gateway.calls(), 0);
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let app = TestApp::new(testing::test_config());
        let request = Request::post("/api/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, _) = send(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(app.gateway.calls(), 0);
    }

    #[tokio::test]
    async fn store_failure_is_a_generic_localized_error() {
        let mut config = testing::test_config();
        config.locale = Locale::Fr;
        let app = TestApp::with_fakes(
            config,
            MemoryGateway::failing("connection reset by peer"),
            RecordingMigrator::default(),
        );

        let (status, body) = send(
            &app,
            register_request(json!({ "email": "ada@example.com", "password": "hunter22" })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Erreur serveur");
        assert!(!body.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn insert_race_on_same_email_is_a_conflict() {
        let mut config = testing::test_config();
        config.locale = Locale::Fr;
        let app = TestApp::with_fakes(config, MemoryGateway::with_stale_lookups(), RecordingMigrator::default());
        testing::seed_user(&app.gateway, "ada@example.com", "original").await;

        let (status, body) = send(
            &app,
            register_request(json!({ "email": "ada@example.com", "password": "hunter22" })),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "Un compte existe déjà avec cet email");
        // lookup and insert both reached the store
        assert_eq!(app.gateway.calls(), 2);
        assert_eq!(app.gateway.users().await.len(), 1);
    }
}
