//! Question bank handlers.
//!
//! ```text
//! POST   /api/questions
//! GET    /api/questions/{id}
//! GET    /api/questions/assignment/{assignmentId}
//! PUT    /api/questions/{id}
//! DELETE /api/questions/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AssignmentId, Error, Question, QuestionDetails, QuestionId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, require};

const ID: FieldName = FieldName::new("id");
const ASSIGNMENT_ID: FieldName = FieldName::new("assignmentId");

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    pub assignment_id: Option<String>,
    #[schema(example = "What is the capital of France?")]
    pub question_text: Option<String>,
    /// Ordered answer choices. Any character is allowed, including commas.
    #[schema(example = json!(["Paris", "Lyon", "Marseille"]))]
    pub options: Option<Vec<String>>,
    #[schema(example = "Paris")]
    pub correct_answer: Option<String>,
}

impl TryFrom<QuestionRequest> for QuestionDetails {
    type Error = Error;

    fn try_from(body: QuestionRequest) -> Result<Self, Self::Error> {
        let assignment_id = require(body.assignment_id, ASSIGNMENT_ID)?;
        let question_text = require(body.question_text, FieldName::new("questionText"))?;
        let options = require(body.options, FieldName::new("options"))?;
        let correct_answer = require(body.correct_answer, FieldName::new("correctAnswer"))?;
        Ok(QuestionDetails::new(
            parse_id(&assignment_id, ASSIGNMENT_ID)?,
            &question_text,
            &options,
            &correct_answer,
        )?)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: String,
    pub assignment_id: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        let QuestionDetails {
            assignment_id,
            question_text,
            options,
            correct_answer,
        } = question.details;
        Self {
            id: question.id.to_string(),
            assignment_id: assignment_id.to_string(),
            question_text,
            options,
            correct_answer,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/questions",
    request_body = QuestionRequest,
    responses(
        (status = 201, description = "Created", body = QuestionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Assignment not found", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "createQuestion"
)]
#[post("/questions")]
pub async fn create_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<QuestionRequest>,
) -> ApiResult<HttpResponse> {
    session.require_caller()?;
    let details = QuestionDetails::try_from(payload.into_inner())?;
    let question = state.questions.create_question(details).await?;
    Ok(HttpResponse::Created().json(QuestionResponse::from(question)))
}

#[utoipa::path(
    get,
    path = "/api/questions/{id}",
    params(("id" = String, Path, description = "Question id")),
    responses(
        (status = 200, description = "Question", body = QuestionResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "getQuestion"
)]
#[get("/questions/{id}")]
pub async fn get_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<QuestionResponse>> {
    session.require_caller()?;
    let id: QuestionId = parse_id(&path, ID)?;
    let question = state.questions_query.get_question(&id).await?;
    Ok(web::Json(QuestionResponse::from(question)))
}

/// Questions of one assignment in creation order.
#[utoipa::path(
    get,
    path = "/api/questions/assignment/{assignmentId}",
    params(("assignmentId" = String, Path, description = "Parent assignment id")),
    responses(
        (status = 200, description = "Questions", body = [QuestionResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Assignment not found", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "listQuestionsForAssignment"
)]
#[get("/questions/assignment/{assignment_id}")]
pub async fn list_for_assignment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<QuestionResponse>>> {
    session.require_caller()?;
    let assignment_id: AssignmentId = parse_id(&path, ASSIGNMENT_ID)?;
    let questions = state
        .questions_query
        .list_for_assignment(&assignment_id)
        .await?;
    Ok(web::Json(
        questions.into_iter().map(QuestionResponse::from).collect(),
    ))
}

#[utoipa::path(
    put,
    path = "/api/questions/{id}",
    params(("id" = String, Path, description = "Question id")),
    request_body = QuestionRequest,
    responses(
        (status = 200, description = "Updated", body = QuestionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Question or assignment not found", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "updateQuestion"
)]
#[put("/questions/{id}")]
pub async fn update_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<QuestionRequest>,
) -> ApiResult<web::Json<QuestionResponse>> {
    session.require_caller()?;
    let id: QuestionId = parse_id(&path, ID)?;
    let details = QuestionDetails::try_from(payload.into_inner())?;
    let question = state.questions.update_question(&id, details).await?;
    Ok(web::Json(QuestionResponse::from(question)))
}

#[utoipa::path(
    delete,
    path = "/api/questions/{id}",
    params(("id" = String, Path, description = "Question id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "deleteQuestion"
)]
#[delete("/questions/{id}")]
pub async fn delete_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_caller()?;
    let id: QuestionId = parse_id(&path, ID)?;
    state.questions.delete_question(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::MockQuestionsQuery;
    use crate::inbound::http::test_utils::{login_cookie, mock_ports, teacher, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[test]
    fn options_keep_commas_and_order() {
        let details = QuestionDetails::try_from(QuestionRequest {
            assignment_id: Some(AssignmentId::random().to_string()),
            question_text: Some("Pick the list".into()),
            options: Some(vec!["a, b".into(), "c".into()]),
            correct_answer: Some("a, b".into()),
        })
        .expect("valid");
        assert_eq!(details.options, vec!["a, b".to_owned(), "c".to_owned()]);
    }

    #[rstest]
    #[case(json!({"questionText": "Q", "options": ["A"], "correctAnswer": "A"}), "assignmentId")]
    #[case(json!({"assignmentId": "x", "questionText": "Q", "options": ["A"], "correctAnswer": "A"}), "assignmentId")]
    #[case(json!({"assignmentId": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "questionText": "Q", "options": [], "correctAnswer": "A"}), "options")]
    fn invalid_requests_name_the_field(#[case] body: Value, #[case] field: &str) {
        let request: QuestionRequest = serde_json::from_value(body).expect("json");
        let err = QuestionDetails::try_from(request).expect_err("invalid");
        assert_eq!(err.details().expect("details")["field"], field);
    }

    #[actix_web::test]
    async fn lists_questions_for_an_assignment() {
        let assignment_id = AssignmentId::random();
        let mut query = MockQuestionsQuery::new();
        query
            .expect_list_for_assignment()
            .withf(move |id| *id == assignment_id)
            .return_once(move |_| {
                Ok(vec![Question {
                    id: QuestionId::random(),
                    details: QuestionDetails::new(
                        assignment_id,
                        "2 + 2?",
                        &["3".to_owned(), "4".to_owned()],
                        "4",
                    )
                    .expect("details"),
                }])
            });
        let mut ports = mock_ports();
        ports.questions_query = Arc::new(query);
        let app = actix_test::init_service(test_app(HttpState::new(ports), teacher())).await;
        let cookie = login_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/questions/assignment/{assignment_id}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Vec<QuestionResponse> = actix_test::read_body_json(res).await;
        assert_eq!(body[0].options, vec!["3".to_owned(), "4".to_owned()]);
    }
}
