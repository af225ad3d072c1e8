//! Firebase sign-in and session handlers.
//!
//! ```text
//! POST /api/auth/firebase-auth {"idToken":"...","username":"ada","role":"TEACHER"}
//! GET  /api/auth/me
//! POST /api/auth/logout
//! ```
//!
//! Sign-in is the only `/api` route reachable without a session. A verified
//! token establishes the session; every other handler reads the caller from
//! it.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Caller, Error, IdToken, Role, SignIn, User, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;
use crate::inbound::http::validation::{FieldName, require};

/// Request body for `POST /api/auth/firebase-auth`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseAuthRequest {
    /// Firebase ID token obtained by the client.
    pub id_token: Option<String>,
    /// Preferred username; derived from the token when absent.
    pub username: Option<String>,
    /// `TEACHER` or `STUDENT`; defaults to `STUDENT` for new accounts.
    pub role: Option<String>,
}

impl TryFrom<FirebaseAuthRequest> for SignIn {
    type Error = Error;

    fn try_from(value: FirebaseAuthRequest) -> Result<Self, Self::Error> {
        let raw_token = require(value.id_token, FieldName::new("idToken"))?;
        let username = value
            .username
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .map(Username::new)
            .transpose()?;
        let role = value
            .role
            .as_deref()
            .map(str::parse::<Role>)
            .transpose()?;
        Ok(Self {
            token: IdToken::new(raw_token)?,
            username,
            role,
        })
    }
}

/// Response body for a successful sign-in.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
    pub username: String,
    pub email: String,
    #[schema(example = "TEACHER")]
    pub role: String,
    #[schema(example = "Authentication successful")]
    pub message: String,
}

impl From<&User> for AuthResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            username: user.username.as_str().to_owned(),
            email: user.email.as_str().to_owned(),
            role: user.role.as_str().to_owned(),
            message: "Authentication successful".to_owned(),
        }
    }
}

/// Verify a Firebase ID token, reconcile the user and open a session.
#[utoipa::path(
    post,
    path = "/api/auth/firebase-auth",
    request_body = FirebaseAuthRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Token rejected", body = ErrorSchema),
        (status = 409, description = "Username or email already taken", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "firebaseAuth",
    security([])
)]
#[post("/auth/firebase-auth")]
pub async fn firebase_auth(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FirebaseAuthRequest>,
) -> ApiResult<HttpResponse> {
    let request = SignIn::try_from(payload.into_inner())?;
    let user = state.identity.sign_in(request).await?;
    let firebase_uid = user
        .firebase_uid
        .clone()
        .ok_or_else(|| Error::internal(format!("user {} has no Firebase UID", user.id)))?;
    session.persist_caller(&Caller::for_user(&user, firebase_uid))?;
    info!(user_id = %user.id, role = %user.role, "session established");
    Ok(HttpResponse::Ok().json(AuthResponse::from(&user)))
}

/// The signed-in user.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let caller = session.require_caller()?;
    let user = state.users_query.get_user(&caller.user_id).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session cleared"),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.require_caller()?;
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{MockIdentityCommand, MockUsersQuery};
    use crate::inbound::http::test_utils::{login_cookie, mock_ports, teacher, test_app};
    use crate::test_support::sample_teacher;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(json!({}), "idToken")]
    #[case(json!({"idToken": "   "}), "idToken")]
    #[case(json!({"idToken": "t", "role": "PRINCIPAL"}), "role")]
    #[case(json!({"idToken": "t", "username": "no spaces allowed"}), "username")]
    fn sign_in_request_validation(#[case] body: Value, #[case] field: &str) {
        let request: FirebaseAuthRequest = serde_json::from_value(body).expect("json");
        let err = SignIn::try_from(request).expect_err("invalid");
        assert_eq!(err.details().expect("details")["field"], field);
    }

    #[test]
    fn blank_username_means_derive_from_token() {
        let request = FirebaseAuthRequest {
            id_token: Some("token".into()),
            username: Some("  ".into()),
            role: Some("teacher".into()),
        };
        let sign_in = SignIn::try_from(request).expect("valid");
        assert!(sign_in.username.is_none());
        assert_eq!(sign_in.role, Some(Role::Teacher));
    }

    #[actix_web::test]
    async fn sign_in_sets_a_session_that_unlocks_me() {
        let user = sample_teacher("ada");
        let user_for_query = user.clone();
        let mut identity = MockIdentityCommand::new();
        identity
            .expect_sign_in()
            .withf(|request| request.token.expose() == "good-token")
            .return_once(move |_| Ok(user));
        let mut users_query = MockUsersQuery::new();
        users_query
            .expect_get_user()
            .withf(move |id| *id == user_for_query.id)
            .return_once(move |_| Ok(user_for_query));

        let mut ports = mock_ports();
        ports.identity = Arc::new(identity);
        ports.users_query = Arc::new(users_query);
        let app = actix_test::init_service(test_app(HttpState::new(ports), teacher())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/firebase-auth")
                .set_json(json!({"idToken": "good-token"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned();
        let body: AuthResponse = actix_test::read_body_json(res).await;
        assert_eq!(body.username, "ada");
        assert_eq!(body.role, "TEACHER");

        let me = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/auth/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(me.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(me).await;
        assert_eq!(body["email"], "ada@school.test");
    }

    #[actix_web::test]
    async fn rejected_token_is_unauthorised() {
        let mut identity = MockIdentityCommand::new();
        identity
            .expect_sign_in()
            .return_once(|_| Err(Error::unauthorized("invalid identity token")));
        let mut ports = mock_ports();
        ports.identity = Arc::new(identity);
        let app = actix_test::init_service(test_app(HttpState::new(ports), teacher())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/firebase-auth")
                .set_json(json!({"idToken": "forged"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().all(|cookie| cookie.name() != "session"));
    }

    #[actix_web::test]
    async fn me_requires_a_session() {
        let app = actix_test::init_service(test_app(HttpState::new(mock_ports()), teacher())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/auth/me").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_clears_the_session() {
        let app = actix_test::init_service(test_app(HttpState::new(mock_ports()), teacher())).await;
        let cookie = login_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let cleared = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("removal cookie");
        assert_eq!(cleared.value(), "");
    }
}
