//! Test helpers for inbound HTTP components.
//!
//! Handler tests run against mockall doubles of the driving ports. Sessions
//! are seeded through a test-only route rather than a real Firebase token.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use crate::domain::ports::{
    MockAnswersCommand, MockAnswersQuery, MockAssignmentsCommand, MockAssignmentsQuery,
    MockFileUploadCommand, MockIdentityCommand, MockQuestionsCommand, MockQuestionsQuery,
    MockStudentAssignmentsCommand, MockStudentAssignmentsQuery, MockStudentsCommand,
    MockStudentsQuery, MockSubjectsCommand, MockSubjectsQuery, MockUsersCommand, MockUsersQuery,
};
use crate::domain::{Caller, Error, FirebaseUid, Role, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

const LOGIN_PATH: &str = "/__test/login";

/// Session middleware with a fresh key and the `Secure` flag off.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Port set where every port is an unconfigured mock.
///
/// Tests replace the ports they exercise; calling any other port panics.
pub fn mock_ports() -> HttpStatePorts {
    HttpStatePorts {
        identity: Arc::new(MockIdentityCommand::new()),
        users: Arc::new(MockUsersCommand::new()),
        users_query: Arc::new(MockUsersQuery::new()),
        students: Arc::new(MockStudentsCommand::new()),
        students_query: Arc::new(MockStudentsQuery::new()),
        subjects: Arc::new(MockSubjectsCommand::new()),
        subjects_query: Arc::new(MockSubjectsQuery::new()),
        assignments: Arc::new(MockAssignmentsCommand::new()),
        assignments_query: Arc::new(MockAssignmentsQuery::new()),
        questions: Arc::new(MockQuestionsCommand::new()),
        questions_query: Arc::new(MockQuestionsQuery::new()),
        answers: Arc::new(MockAnswersCommand::new()),
        answers_query: Arc::new(MockAnswersQuery::new()),
        student_assignments: Arc::new(MockStudentAssignmentsCommand::new()),
        student_assignments_query: Arc::new(MockStudentAssignmentsQuery::new()),
        uploads: Arc::new(MockFileUploadCommand::new()),
    }
}

pub fn caller(role: Role, uid: &str) -> Caller {
    Caller {
        user_id: UserId::random(),
        firebase_uid: FirebaseUid::new(uid).expect("fixture uid"),
        role,
    }
}

pub fn teacher() -> Caller {
    caller(Role::Teacher, "uid-teacher")
}

/// The full `/api` surface over `state`, with a route that signs in `caller`.
pub fn test_app(
    state: HttpState,
    caller: Caller,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .route(
            LOGIN_PATH,
            web::get().to(move |session: SessionContext| {
                let caller = caller.clone();
                async move {
                    session.persist_caller(&caller)?;
                    Ok::<_, Error>(HttpResponse::NoContent().finish())
                }
            }),
        )
        .configure(super::configure)
}

/// Sign in through the test route and return the session cookie.
pub async fn login_cookie<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, test::TestRequest::get().uri(LOGIN_PATH).to_request()).await;
    assert!(res.status().is_success(), "test login failed");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}
