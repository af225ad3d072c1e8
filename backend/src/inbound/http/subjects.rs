//! Subject registry handlers.
//!
//! ```text
//! POST   /api/subjects
//! GET    /api/subjects
//! GET    /api/subjects/{id}
//! PUT    /api/subjects/{id}
//! DELETE /api/subjects/{id}
//! ```
//!
//! Ownership comes from the session's verified Firebase UID. A `teacherUid`
//! in the request body is ignored.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Subject, SubjectDetails, SubjectId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, require};

const ID: FieldName = FieldName::new("id");

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRequest {
    #[schema(example = "Mathematics")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(example = "Grade 5")]
    pub grade_level: Option<String>,
}

impl TryFrom<SubjectRequest> for SubjectDetails {
    type Error = Error;

    fn try_from(body: SubjectRequest) -> Result<Self, Self::Error> {
        let name = require(body.name, FieldName::new("name"))?;
        Ok(SubjectDetails::new(
            &name,
            body.description.as_deref().unwrap_or_default(),
            body.grade_level.as_deref().unwrap_or_default(),
        )?)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub grade_level: String,
    pub teacher_uid: String,
}

impl From<Subject> for SubjectResponse {
    fn from(subject: Subject) -> Self {
        Self {
            id: subject.id.to_string(),
            name: subject.details.name,
            description: subject.details.description,
            grade_level: subject.details.grade_level,
            teacher_uid: subject.teacher_uid.as_str().to_owned(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/subjects",
    request_body = SubjectRequest,
    responses(
        (status = 201, description = "Created", body = SubjectResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["subjects"],
    operation_id = "createSubject"
)]
#[post("/subjects")]
pub async fn create_subject(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubjectRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_caller()?;
    let details = SubjectDetails::try_from(payload.into_inner())?;
    let subject = state.subjects.create_subject(&caller, details).await?;
    Ok(HttpResponse::Created().json(SubjectResponse::from(subject)))
}

/// Subjects owned by the caller.
#[utoipa::path(
    get,
    path = "/api/subjects",
    responses(
        (status = 200, description = "Caller's subjects", body = [SubjectResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["subjects"],
    operation_id = "listSubjects"
)]
#[get("/subjects")]
pub async fn list_subjects(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<SubjectResponse>>> {
    let caller = session.require_caller()?;
    let subjects = state.subjects_query.list_subjects(&caller).await?;
    Ok(web::Json(
        subjects.into_iter().map(SubjectResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/subjects/{id}",
    params(("id" = String, Path, description = "Subject id")),
    responses(
        (status = 200, description = "Subject", body = SubjectResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["subjects"],
    operation_id = "getSubject"
)]
#[get("/subjects/{id}")]
pub async fn get_subject(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SubjectResponse>> {
    session.require_caller()?;
    let id: SubjectId = parse_id(&path, ID)?;
    let subject = state.subjects_query.get_subject(&id).await?;
    Ok(web::Json(SubjectResponse::from(subject)))
}

#[utoipa::path(
    put,
    path = "/api/subjects/{id}",
    params(("id" = String, Path, description = "Subject id")),
    request_body = SubjectRequest,
    responses(
        (status = 200, description = "Updated", body = SubjectResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Subject belongs to another teacher", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["subjects"],
    operation_id = "updateSubject"
)]
#[put("/subjects/{id}")]
pub async fn update_subject(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SubjectRequest>,
) -> ApiResult<web::Json<SubjectResponse>> {
    let caller = session.require_caller()?;
    let id: SubjectId = parse_id(&path, ID)?;
    let details = SubjectDetails::try_from(payload.into_inner())?;
    let subject = state.subjects.update_subject(&caller, &id, details).await?;
    Ok(web::Json(SubjectResponse::from(subject)))
}

#[utoipa::path(
    delete,
    path = "/api/subjects/{id}",
    params(("id" = String, Path, description = "Subject id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Subject belongs to another teacher", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["subjects"],
    operation_id = "deleteSubject"
)]
#[delete("/subjects/{id}")]
pub async fn delete_subject(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_caller()?;
    let id: SubjectId = parse_id(&path, ID)?;
    state.subjects.delete_subject(&caller, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}
