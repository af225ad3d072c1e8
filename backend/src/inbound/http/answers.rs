//! Answer ledger and result handlers.
//!
//! ```text
//! POST /api/answers
//! GET  /api/answers/{id}
//! GET  /api/answers/student/{studentId}
//! GET  /api/answers/results/assignment/{assignmentId}
//! GET  /api/answers/results/student/{studentId}/assignment/{assignmentId}
//! ```
//!
//! The ledger is append-only; there is no update or delete route.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AnswerId, AnswerOutcome, AssignmentId, ChosenAnswer, QuestionId, StudentAnswer, StudentId,
    StudentResultSummary,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, require};

const ID: FieldName = FieldName::new("id");
const STUDENT_ID: FieldName = FieldName::new("studentId");
const QUESTION_ID: FieldName = FieldName::new("questionId");
const ASSIGNMENT_ID: FieldName = FieldName::new("assignmentId");

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    pub student_id: Option<String>,
    pub question_id: Option<String>,
    #[schema(example = "Paris")]
    pub chosen_answer: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    pub id: String,
    pub student_id: String,
    pub question_id: String,
    pub chosen_answer: String,
    pub is_correct: bool,
    pub submitted_at: String,
}

impl From<StudentAnswer> for AnswerResponse {
    fn from(answer: StudentAnswer) -> Self {
        Self {
            id: answer.id.to_string(),
            student_id: answer.student_id.to_string(),
            question_id: answer.question_id.to_string(),
            chosen_answer: answer.chosen_answer,
            is_correct: answer.is_correct,
            submitted_at: answer.submitted_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcomeResponse {
    pub question_id: String,
    pub question_text: String,
    pub chosen_answer: String,
    pub is_correct: bool,
}

impl From<AnswerOutcome> for AnswerOutcomeResponse {
    fn from(outcome: AnswerOutcome) -> Self {
        Self {
            question_id: outcome.question_id.to_string(),
            question_text: outcome.question_text,
            chosen_answer: outcome.chosen_answer,
            is_correct: outcome.is_correct,
        }
    }
}

/// One student's answers to an assignment with totals.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResultResponse {
    pub student_id: String,
    pub student_name: String,
    pub answers: Vec<AnswerOutcomeResponse>,
    /// Number of correct answers.
    pub total_score: usize,
    /// Number of answers submitted.
    pub total_questions: usize,
}

impl From<StudentResultSummary> for StudentResultResponse {
    fn from(summary: StudentResultSummary) -> Self {
        Self {
            student_id: summary.student_id.to_string(),
            student_name: summary.student_name,
            answers: summary
                .answers
                .into_iter()
                .map(AnswerOutcomeResponse::from)
                .collect(),
            total_score: summary.total_score,
            total_questions: summary.total_questions,
        }
    }
}

/// Record and grade one answer.
#[utoipa::path(
    post,
    path = "/api/answers",
    request_body = SubmitAnswerRequest,
    responses(
        (status = 201, description = "Recorded", body = AnswerResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Student or question not found", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "submitAnswer"
)]
#[post("/answers")]
pub async fn submit_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubmitAnswerRequest>,
) -> ApiResult<HttpResponse> {
    session.require_caller()?;
    let body = payload.into_inner();
    let student_id: StudentId = parse_id(&require(body.student_id, STUDENT_ID)?, STUDENT_ID)?;
    let question_id: QuestionId = parse_id(&require(body.question_id, QUESTION_ID)?, QUESTION_ID)?;
    let chosen = ChosenAnswer::new(require(
        body.chosen_answer,
        FieldName::new("chosenAnswer"),
    )?)?;
    let answer = state
        .answers
        .submit_answer(student_id, question_id, chosen)
        .await?;
    Ok(HttpResponse::Created().json(AnswerResponse::from(answer)))
}

#[utoipa::path(
    get,
    path = "/api/answers/{id}",
    params(("id" = String, Path, description = "Answer id")),
    responses(
        (status = 200, description = "Answer", body = AnswerResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "getAnswer"
)]
#[get("/answers/{id}")]
pub async fn get_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<AnswerResponse>> {
    session.require_caller()?;
    let id: AnswerId = parse_id(&path, ID)?;
    let answer = state.answers_query.get_answer(&id).await?;
    Ok(web::Json(AnswerResponse::from(answer)))
}

#[utoipa::path(
    get,
    path = "/api/answers/student/{studentId}",
    params(("studentId" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "Answers in submission order", body = [AnswerResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "listAnswersForStudent"
)]
#[get("/answers/student/{student_id}")]
pub async fn list_for_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<AnswerResponse>>> {
    session.require_caller()?;
    let student_id: StudentId = parse_id(&path, STUDENT_ID)?;
    let answers = state.answers_query.list_for_student(&student_id).await?;
    Ok(web::Json(
        answers.into_iter().map(AnswerResponse::from).collect(),
    ))
}

/// Per-student summaries for an assignment, ordered by first submission.
#[utoipa::path(
    get,
    path = "/api/answers/results/assignment/{assignmentId}",
    params(("assignmentId" = String, Path, description = "Assignment id")),
    responses(
        (status = 200, description = "Summaries", body = [StudentResultResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "resultsForAssignment"
)]
#[get("/answers/results/assignment/{assignment_id}")]
pub async fn results_for_assignment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<StudentResultResponse>>> {
    session.require_caller()?;
    let assignment_id: AssignmentId = parse_id(&path, ASSIGNMENT_ID)?;
    let summaries = state
        .answers_query
        .results_for_assignment(&assignment_id)
        .await?;
    Ok(web::Json(
        summaries
            .into_iter()
            .map(StudentResultResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/answers/results/student/{studentId}/assignment/{assignmentId}",
    params(
        ("studentId" = String, Path, description = "Student id"),
        ("assignmentId" = String, Path, description = "Assignment id")
    ),
    responses(
        (status = 200, description = "Summary, empty when nothing was submitted", body = StudentResultResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "resultsForStudent"
)]
#[get("/answers/results/student/{student_id}/assignment/{assignment_id}")]
pub async fn results_for_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<StudentResultResponse>> {
    session.require_caller()?;
    let (student_id, assignment_id) = path.into_inner();
    let student_id: StudentId = parse_id(&student_id, STUDENT_ID)?;
    let assignment_id: AssignmentId = parse_id(&assignment_id, ASSIGNMENT_ID)?;
    let summary = state
        .answers_query
        .results_for_student(&student_id, &assignment_id)
        .await?;
    Ok(web::Json(StudentResultResponse::from(summary)))
}
