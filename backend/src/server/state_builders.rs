//! Assembles the HTTP state from the Diesel repositories and the external
//! identity and file adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use learners_backend::inbound::http::state::{Adapters, HttpState, HttpStatePorts};
use learners_backend::outbound::persistence::{
    DieselAnswerRepository, DieselAssignmentRepository, DieselQuestionRepository,
    DieselStudentAssignmentRepository, DieselStudentRepository, DieselSubjectRepository,
    DieselUserRepository,
};

use super::config::ExternalAdapters;

/// Build shared HTTP state over the production adapters.
pub(super) fn build_http_state(adapters: ExternalAdapters, upload_limit: usize) -> web::Data<HttpState> {
    let ExternalAdapters {
        pool,
        verifier,
        store,
    } = adapters;

    let ports = HttpStatePorts::from_adapters(Adapters {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        students: Arc::new(DieselStudentRepository::new(pool.clone())),
        subjects: Arc::new(DieselSubjectRepository::new(pool.clone())),
        assignments: Arc::new(DieselAssignmentRepository::new(pool.clone())),
        questions: Arc::new(DieselQuestionRepository::new(pool.clone())),
        answers: Arc::new(DieselAnswerRepository::new(pool.clone())),
        links: Arc::new(DieselStudentAssignmentRepository::new(pool)),
        verifier,
        store,
        clock: Arc::new(DefaultClock),
    });
    web::Data::new(HttpState::new(ports).with_upload_limit(upload_limit))
}
