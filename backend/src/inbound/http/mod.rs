//! HTTP inbound adapter exposing the REST API.
//!
//! Handlers translate JSON bodies into domain requests, call a driving port
//! from [`state::HttpState`] and map the outcome back to JSON. Identity comes
//! from the encrypted session cookie set at sign-in.

use actix_web::web;

pub mod answers;
pub mod assignments;
pub mod auth;
pub mod error;
pub mod files;
pub mod health;
pub mod questions;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
pub mod student_assignments;
pub mod students;
pub mod subjects;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api` route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(auth::firebase_auth)
            .service(auth::current_user)
            .service(auth::logout)
            .service(users::get_user)
            .service(users::delete_user)
            .service(students::create_student)
            .service(students::list_students)
            .service(students::get_student)
            .service(students::update_student)
            .service(students::delete_student)
            .service(subjects::create_subject)
            .service(subjects::list_subjects)
            .service(subjects::get_subject)
            .service(subjects::update_subject)
            .service(subjects::delete_subject)
            .service(assignments::create_assignment)
            .service(assignments::list_assignments)
            .service(assignments::get_assignment)
            .service(assignments::update_assignment)
            .service(assignments::delete_assignment)
            .service(questions::create_question)
            .service(questions::list_for_assignment)
            .service(questions::get_question)
            .service(questions::update_question)
            .service(questions::delete_question)
            .service(answers::submit_answer)
            .service(answers::list_for_student)
            .service(answers::results_for_assignment)
            .service(answers::results_for_student)
            .service(answers::get_answer)
            .service(student_assignments::assign)
            .service(student_assignments::list_for_student)
            .service(student_assignments::get_link)
            .service(student_assignments::update_progress)
            .service(student_assignments::unassign)
            .service(files::upload_file),
    );
}
