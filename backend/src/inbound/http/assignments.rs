//! Assignment catalog handlers.
//!
//! ```text
//! POST   /api/assignments
//! GET    /api/assignments?teacherId=...
//! GET    /api/assignments/{id}
//! PUT    /api/assignments/{id}
//! DELETE /api/assignments/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Assignment, AssignmentDetails, AssignmentId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::students::TeacherFilter;
use crate::inbound::http::validation::{FieldName, parse_id, parse_optional_date, require};

const ID: FieldName = FieldName::new("id");
const TEACHER_ID: FieldName = FieldName::new("teacherId");

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    #[schema(example = "Capitals of Europe")]
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(example = "2025-06-30")]
    pub due_date: Option<String>,
    pub teacher_id: Option<String>,
}

impl TryFrom<AssignmentRequest> for AssignmentDetails {
    type Error = Error;

    fn try_from(body: AssignmentRequest) -> Result<Self, Self::Error> {
        let title = require(body.title, FieldName::new("title"))?;
        let teacher_id = require(body.teacher_id, TEACHER_ID)?;
        Ok(AssignmentDetails::new(
            &title,
            body.description.as_deref(),
            parse_optional_date(body.due_date.as_deref(), FieldName::new("dueDate"))?,
            parse_id(&teacher_id, TEACHER_ID)?,
        )?)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "2025-06-30")]
    pub due_date: Option<String>,
    pub teacher_id: String,
}

impl From<Assignment> for AssignmentResponse {
    fn from(assignment: Assignment) -> Self {
        let AssignmentDetails {
            title,
            description,
            due_date,
            teacher_id,
        } = assignment.details;
        Self {
            id: assignment.id.to_string(),
            title,
            description,
            due_date: due_date.map(|date| date.format("%Y-%m-%d").to_string()),
            teacher_id: teacher_id.to_string(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/assignments",
    request_body = AssignmentRequest,
    responses(
        (status = 201, description = "Created", body = AssignmentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Teacher not found", body = ErrorSchema)
    ),
    tags = ["assignments"],
    operation_id = "createAssignment"
)]
#[post("/assignments")]
pub async fn create_assignment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AssignmentRequest>,
) -> ApiResult<HttpResponse> {
    session.require_caller()?;
    let details = AssignmentDetails::try_from(payload.into_inner())?;
    let assignment = state.assignments.create_assignment(details).await?;
    Ok(HttpResponse::Created().json(AssignmentResponse::from(assignment)))
}

#[utoipa::path(
    get,
    path = "/api/assignments",
    params(TeacherFilter),
    responses(
        (status = 200, description = "Assignments", body = [AssignmentResponse]),
        (status = 400, description = "Malformed teacherId", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["assignments"],
    operation_id = "listAssignments"
)]
#[get("/assignments")]
pub async fn list_assignments(
    state: web::Data<HttpState>,
    session: SessionContext,
    filter: web::Query<TeacherFilter>,
) -> ApiResult<web::Json<Vec<AssignmentResponse>>> {
    session.require_caller()?;
    let assignments = state
        .assignments_query
        .list_assignments(filter.parse()?)
        .await?;
    Ok(web::Json(
        assignments
            .into_iter()
            .map(AssignmentResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/assignments/{id}",
    params(("id" = String, Path, description = "Assignment id")),
    responses(
        (status = 200, description = "Assignment", body = AssignmentResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["assignments"],
    operation_id = "getAssignment"
)]
#[get("/assignments/{id}")]
pub async fn get_assignment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<AssignmentResponse>> {
    session.require_caller()?;
    let id: AssignmentId = parse_id(&path, ID)?;
    let assignment = state.assignments_query.get_assignment(&id).await?;
    Ok(web::Json(AssignmentResponse::from(assignment)))
}

#[utoipa::path(
    put,
    path = "/api/assignments/{id}",
    params(("id" = String, Path, description = "Assignment id")),
    request_body = AssignmentRequest,
    responses(
        (status = 200, description = "Updated", body = AssignmentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Assignment or teacher not found", body = ErrorSchema)
    ),
    tags = ["assignments"],
    operation_id = "updateAssignment"
)]
#[put("/assignments/{id}")]
pub async fn update_assignment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AssignmentRequest>,
) -> ApiResult<web::Json<AssignmentResponse>> {
    session.require_caller()?;
    let id: AssignmentId = parse_id(&path, ID)?;
    let details = AssignmentDetails::try_from(payload.into_inner())?;
    let assignment = state.assignments.update_assignment(&id, details).await?;
    Ok(web::Json(AssignmentResponse::from(assignment)))
}

/// Delete an assignment with its questions, answers and student links.
#[utoipa::path(
    delete,
    path = "/api/assignments/{id}",
    params(("id" = String, Path, description = "Assignment id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["assignments"],
    operation_id = "deleteAssignment"
)]
#[delete("/assignments/{id}")]
pub async fn delete_assignment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_caller()?;
    let id: AssignmentId = parse_id(&path, ID)?;
    state.assignments.delete_assignment(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::UserId;
    use crate::domain::ports::{MockAssignmentsCommand, MockAssignmentsQuery};
    use crate::inbound::http::test_utils::{login_cookie, mock_ports, teacher, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::NaiveDate;
    use serde_json::{Value, json};

    #[test]
    fn request_parses_due_date_and_teacher() {
        let teacher_id = UserId::random();
        let details = AssignmentDetails::try_from(AssignmentRequest {
            title: Some("Capitals".into()),
            description: Some("  ".into()),
            due_date: Some("2025-06-30".into()),
            teacher_id: Some(teacher_id.to_string()),
        })
        .expect("valid");
        assert_eq!(details.teacher_id, teacher_id);
        assert_eq!(details.due_date, NaiveDate::from_ymd_opt(2025, 6, 30));
        assert!(details.description.is_none());
    }

    #[actix_web::test]
    async fn create_returns_201_and_iso_due_date() {
        let mut command = MockAssignmentsCommand::new();
        command.expect_create_assignment().return_once(|details| {
            Ok(Assignment {
                id: AssignmentId::random(),
                details,
            })
        });
        let mut ports = mock_ports();
        ports.assignments = Arc::new(command);
        let app = actix_test::init_service(test_app(HttpState::new(ports), teacher())).await;
        let cookie = login_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/assignments")
                .cookie(cookie)
                .set_json(json!({
                    "title": "Capitals",
                    "dueDate": "2025-06-30",
                    "teacherId": UserId::random().to_string(),
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["dueDate"], "2025-06-30");
    }

    #[actix_web::test]
    async fn malformed_teacher_filter_is_rejected() {
        let mut query = MockAssignmentsQuery::new();
        query.expect_list_assignments().never();
        let mut ports = mock_ports();
        ports.assignments_query = Arc::new(query);
        let app = actix_test::init_service(test_app(HttpState::new(ports), teacher())).await;
        let cookie = login_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/assignments?teacherId=nope")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "teacherId");
    }
}
