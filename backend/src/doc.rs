//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! shared error schema and the session cookie security scheme. The document
//! backs Swagger UI in debug builds and is exported with
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::{
    answers, assignments, auth, files, health, questions, student_assignments, students,
    subjects, users,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /api/auth/firebase-auth.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Little Learners backend API",
        description = "Classroom management: students, subjects, assignments, quizzes and results."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        auth::firebase_auth,
        auth::current_user,
        auth::logout,
        users::get_user,
        users::delete_user,
        students::create_student,
        students::list_students,
        students::get_student,
        students::update_student,
        students::delete_student,
        subjects::create_subject,
        subjects::list_subjects,
        subjects::get_subject,
        subjects::update_subject,
        subjects::delete_subject,
        assignments::create_assignment,
        assignments::list_assignments,
        assignments::get_assignment,
        assignments::update_assignment,
        assignments::delete_assignment,
        questions::create_question,
        questions::get_question,
        questions::list_for_assignment,
        questions::update_question,
        questions::delete_question,
        answers::submit_answer,
        answers::get_answer,
        answers::list_for_student,
        answers::results_for_assignment,
        answers::results_for_student,
        student_assignments::assign,
        student_assignments::get_link,
        student_assignments::list_for_student,
        student_assignments::update_progress,
        student_assignments::unassign,
        files::upload_file,
        health::ready,
        health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "auth", description = "Firebase sign-in and session management"),
        (name = "users", description = "Login accounts"),
        (name = "students", description = "Student profiles and their accounts"),
        (name = "subjects", description = "Subjects owned by teachers"),
        (name = "assignments", description = "Assignments set by teachers"),
        (name = "questions", description = "Multiple-choice questions"),
        (name = "answers", description = "Answer submissions and results"),
        (name = "student-assignments", description = "Assignment progress per student"),
        (name = "files", description = "File uploads"),
        (name = "health", description = "Readiness and liveness probes")
    )
)]
pub struct ApiDoc;
