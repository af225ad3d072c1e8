//! Student assignment link handlers.
//!
//! ```text
//! POST   /api/student-assignments {"studentId":"...","assignmentId":"..."}
//! GET    /api/student-assignments/{id}
//! GET    /api/student-assignments/student/{studentId}
//! PUT    /api/student-assignments/{id} {"completionStatus":"GRADED","grade":88}
//! DELETE /api/student-assignments/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AssignmentId, CompletionStatus, Error, Progress, StudentAssignment, StudentAssignmentId,
    StudentId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, require};

const ID: FieldName = FieldName::new("id");
const STUDENT_ID: FieldName = FieldName::new("studentId");
const ASSIGNMENT_ID: FieldName = FieldName::new("assignmentId");

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub student_id: Option<String>,
    pub assignment_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRequest {
    #[schema(example = "GRADED")]
    pub completion_status: Option<String>,
    /// 0 to 100.
    #[schema(example = 88)]
    pub grade: Option<i32>,
}

impl TryFrom<ProgressRequest> for Progress {
    type Error = Error;

    fn try_from(body: ProgressRequest) -> Result<Self, Self::Error> {
        let status = require(body.completion_status, FieldName::new("completionStatus"))?;
        let status: CompletionStatus = status.parse()?;
        Ok(Progress::new(status, body.grade)?)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentAssignmentResponse {
    pub id: String,
    pub student_id: String,
    pub assignment_id: String,
    #[schema(example = "PENDING")]
    pub completion_status: String,
    pub grade: Option<i32>,
}

impl From<StudentAssignment> for StudentAssignmentResponse {
    fn from(link: StudentAssignment) -> Self {
        Self {
            id: link.id.to_string(),
            student_id: link.student_id.to_string(),
            assignment_id: link.assignment_id.to_string(),
            completion_status: link.progress.completion_status.as_str().to_owned(),
            grade: link.progress.grade,
        }
    }
}

/// Assign an assignment to a student. Each pair may be linked once.
#[utoipa::path(
    post,
    path = "/api/student-assignments",
    request_body = AssignRequest,
    responses(
        (status = 201, description = "Assigned", body = StudentAssignmentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Student or assignment not found", body = ErrorSchema),
        (status = 409, description = "Already assigned", body = ErrorSchema)
    ),
    tags = ["student-assignments"],
    operation_id = "assignToStudent"
)]
#[post("/student-assignments")]
pub async fn assign(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AssignRequest>,
) -> ApiResult<HttpResponse> {
    session.require_caller()?;
    let body = payload.into_inner();
    let student_id: StudentId = parse_id(&require(body.student_id, STUDENT_ID)?, STUDENT_ID)?;
    let assignment_id: AssignmentId =
        parse_id(&require(body.assignment_id, ASSIGNMENT_ID)?, ASSIGNMENT_ID)?;
    let link = state
        .student_assignments
        .assign(student_id, assignment_id)
        .await?;
    Ok(HttpResponse::Created().json(StudentAssignmentResponse::from(link)))
}

#[utoipa::path(
    get,
    path = "/api/student-assignments/{id}",
    params(("id" = String, Path, description = "Link id")),
    responses(
        (status = 200, description = "Link", body = StudentAssignmentResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["student-assignments"],
    operation_id = "getStudentAssignment"
)]
#[get("/student-assignments/{id}")]
pub async fn get_link(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<StudentAssignmentResponse>> {
    session.require_caller()?;
    let id: StudentAssignmentId = parse_id(&path, ID)?;
    let link = state.student_assignments_query.get_link(&id).await?;
    Ok(web::Json(StudentAssignmentResponse::from(link)))
}

#[utoipa::path(
    get,
    path = "/api/student-assignments/student/{studentId}",
    params(("studentId" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "Links", body = [StudentAssignmentResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["student-assignments"],
    operation_id = "listStudentAssignments"
)]
#[get("/student-assignments/student/{student_id}")]
pub async fn list_for_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<StudentAssignmentResponse>>> {
    session.require_caller()?;
    let student_id: StudentId = parse_id(&path, STUDENT_ID)?;
    let links = state
        .student_assignments_query
        .list_for_student(&student_id)
        .await?;
    Ok(web::Json(
        links
            .into_iter()
            .map(StudentAssignmentResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    put,
    path = "/api/student-assignments/{id}",
    params(("id" = String, Path, description = "Link id")),
    request_body = ProgressRequest,
    responses(
        (status = 200, description = "Updated", body = StudentAssignmentResponse),
        (status = 400, description = "Invalid status or grade", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["student-assignments"],
    operation_id = "updateStudentAssignment"
)]
#[put("/student-assignments/{id}")]
pub async fn update_progress(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ProgressRequest>,
) -> ApiResult<web::Json<StudentAssignmentResponse>> {
    session.require_caller()?;
    let id: StudentAssignmentId = parse_id(&path, ID)?;
    let progress = Progress::try_from(payload.into_inner())?;
    let link = state
        .student_assignments
        .update_progress(&id, progress)
        .await?;
    Ok(web::Json(StudentAssignmentResponse::from(link)))
}

#[utoipa::path(
    delete,
    path = "/api/student-assignments/{id}",
    params(("id" = String, Path, description = "Link id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["student-assignments"],
    operation_id = "deleteStudentAssignment"
)]
#[delete("/student-assignments/{id}")]
pub async fn unassign(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_caller()?;
    let id: StudentAssignmentId = parse_id(&path, ID)?;
    state.student_assignments.unassign(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
