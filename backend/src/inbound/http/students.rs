//! Student directory handlers.
//!
//! ```text
//! POST   /api/students
//! GET    /api/students?teacherId=...
//! GET    /api/students/{id}
//! PUT    /api/students/{id}
//! DELETE /api/students/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    EmailAddress, Error, NewStudent, Student, StudentId, StudentProfile, StudentProfileDraft,
    UserId, Username,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, parse_optional_id, require};

const ID: FieldName = FieldName::new("id");
const TEACHER_ID: FieldName = FieldName::new("teacherId");

/// Mutable student fields shared by create and update bodies.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfileBody {
    pub full_name: Option<String>,
    pub reg_num: Option<String>,
    #[schema(example = "5")]
    pub grade: Option<String>,
    pub gender: Option<String>,
    /// Defaults to `true`.
    pub is_active: Option<bool>,
    pub parent_name: Option<String>,
    pub performance_score: Option<f64>,
}

impl TryFrom<StudentProfileBody> for StudentProfile {
    type Error = Error;

    fn try_from(body: StudentProfileBody) -> Result<Self, Self::Error> {
        let draft = StudentProfileDraft {
            full_name: require(body.full_name, FieldName::new("fullName"))?,
            reg_num: require(body.reg_num, FieldName::new("regNum"))?,
            grade: require(body.grade, FieldName::new("grade"))?,
            gender: require(body.gender, FieldName::new("gender"))?,
            is_active: body.is_active.unwrap_or(true),
            parent_name: body.parent_name,
            performance_score: body.performance_score,
        };
        Ok(StudentProfile::try_from(draft)?)
    }
}

/// Body for `POST /api/students`: the profile plus the login account to create.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[serde(flatten)]
    pub profile: StudentProfileBody,
    pub teacher_id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl TryFrom<CreateStudentRequest> for NewStudent {
    type Error = Error;

    fn try_from(body: CreateStudentRequest) -> Result<Self, Self::Error> {
        let teacher_id = require(body.teacher_id, TEACHER_ID)?;
        let username = require(body.username, FieldName::new("username"))?;
        let email = require(body.email, FieldName::new("email"))?;
        Ok(Self {
            profile: StudentProfile::try_from(body.profile)?,
            teacher_id: parse_id(&teacher_id, TEACHER_ID)?,
            username: Username::new(&username)?,
            email: EmailAddress::new(&email)?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: String,
    pub full_name: String,
    pub reg_num: String,
    pub grade: String,
    pub gender: String,
    pub is_active: bool,
    pub parent_name: Option<String>,
    pub performance_score: Option<f64>,
    pub user_id: String,
    pub teacher_id: String,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        let StudentProfile {
            full_name,
            reg_num,
            grade,
            gender,
            is_active,
            parent_name,
            performance_score,
        } = student.profile;
        Self {
            id: student.id.to_string(),
            full_name,
            reg_num,
            grade,
            gender,
            is_active,
            parent_name,
            performance_score,
            user_id: student.user_id.to_string(),
            teacher_id: student.teacher_id.to_string(),
        }
    }
}

/// Optional owner filter shared by list endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TeacherFilter {
    /// Restrict results to this teacher's records.
    pub teacher_id: Option<String>,
}

impl TeacherFilter {
    pub(crate) fn parse(&self) -> Result<Option<UserId>, Error> {
        parse_optional_id(self.teacher_id.as_deref(), TEACHER_ID)
    }
}

/// Create a student and its login account in one transaction.
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Created", body = StudentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Teacher not found", body = ErrorSchema),
        (status = 409, description = "regNum, username or email already taken", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateStudentRequest>,
) -> ApiResult<HttpResponse> {
    session.require_caller()?;
    let request = NewStudent::try_from(payload.into_inner())?;
    let student = state.students.create_student(request).await?;
    Ok(HttpResponse::Created().json(StudentResponse::from(student)))
}

#[utoipa::path(
    get,
    path = "/api/students",
    params(TeacherFilter),
    responses(
        (status = 200, description = "Students", body = [StudentResponse]),
        (status = 400, description = "Malformed teacherId", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(
    state: web::Data<HttpState>,
    session: SessionContext,
    filter: web::Query<TeacherFilter>,
) -> ApiResult<web::Json<Vec<StudentResponse>>> {
    session.require_caller()?;
    let students = state.students_query.list_students(filter.parse()?).await?;
    Ok(web::Json(
        students.into_iter().map(StudentResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student", body = StudentResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<StudentResponse>> {
    session.require_caller()?;
    let id: StudentId = parse_id(&path, ID)?;
    let student = state.students_query.get_student(&id).await?;
    Ok(web::Json(StudentResponse::from(student)))
}

/// Replace a student's mutable fields.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student id")),
    request_body = StudentProfileBody,
    responses(
        (status = 200, description = "Updated", body = StudentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "regNum already taken", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<StudentProfileBody>,
) -> ApiResult<web::Json<StudentResponse>> {
    session.require_caller()?;
    let id: StudentId = parse_id(&path, ID)?;
    let profile = StudentProfile::try_from(payload.into_inner())?;
    let student = state.students.update_student(&id, profile).await?;
    Ok(web::Json(StudentResponse::from(student)))
}

/// Delete a student together with its login account.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_caller()?;
    let id: StudentId = parse_id(&path, ID)?;
    state.students.delete_student(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{MockStudentsCommand, MockStudentsQuery};
    use crate::inbound::http::test_utils::{login_cookie, mock_ports, teacher, test_app};
    use crate::test_support::sample_student;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn create_body(teacher_id: UserId) -> Value {
        json!({
            "fullName": "Sam Pupil",
            "regNum": "R-100",
            "grade": "5",
            "gender": "F",
            "teacherId": teacher_id.to_string(),
            "username": "sam",
            "email": "sam@school.test",
        })
    }

    #[rstest]
    #[case("fullName", "missing_field")]
    #[case("teacherId", "missing_field")]
    #[case("email", "missing_field")]
    fn create_request_requires_fields(#[case] field: &str, #[case] code: &str) {
        let mut body = create_body(UserId::random());
        body.as_object_mut().expect("object").remove(field);
        let request: CreateStudentRequest = serde_json::from_value(body).expect("json");

        let err = NewStudent::try_from(request).expect_err("incomplete");
        let details = err.details().expect("details");
        assert_eq!(details["field"], field);
        assert_eq!(details["code"], code);
    }

    #[test]
    fn create_request_defaults_to_active() {
        let request: CreateStudentRequest =
            serde_json::from_value(create_body(UserId::random())).expect("json");
        let student = NewStudent::try_from(request).expect("valid");
        assert!(student.profile.is_active);
        assert_eq!(student.username.as_str(), "sam");
    }

    #[actix_web::test]
    async fn create_returns_201_with_the_new_student() {
        let teacher_id = UserId::random();
        let mut command = MockStudentsCommand::new();
        command
            .expect_create_student()
            .withf(move |request| request.teacher_id == teacher_id)
            .return_once(move |request| {
                Ok(Student {
                    id: StudentId::random(),
                    profile: request.profile,
                    user_id: UserId::random(),
                    teacher_id: request.teacher_id,
                })
            });
        let mut ports = mock_ports();
        ports.students = Arc::new(command);
        let app = actix_test::init_service(test_app(HttpState::new(ports), teacher())).await;
        let cookie = login_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/students")
                .cookie(cookie)
                .set_json(create_body(teacher_id))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["regNum"], "R-100");
        assert_eq!(body["teacherId"], teacher_id.to_string());
        assert_eq!(body["isActive"], true);
    }

    #[actix_web::test]
    async fn list_passes_the_teacher_filter() {
        let teacher_id = UserId::random();
        let mut query = MockStudentsQuery::new();
        query
            .expect_list_students()
            .withf(move |filter| *filter == Some(teacher_id))
            .return_once(move |_| Ok(vec![sample_student(teacher_id)]));
        let mut ports = mock_ports();
        ports.students_query = Arc::new(query);
        let app = actix_test::init_service(test_app(HttpState::new(ports), teacher())).await;
        let cookie = login_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/students?teacherId={teacher_id}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Vec<StudentResponse> = actix_test::read_body_json(res).await;
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].full_name, "Sam Pupil");
    }

    #[actix_web::test]
    async fn anonymous_list_is_unauthorised() {
        let app = actix_test::init_service(test_app(HttpState::new(mock_ports()), teacher())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/students").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn delete_returns_204() {
        let mut command = MockStudentsCommand::new();
        command.expect_delete_student().times(1).return_once(|_| Ok(()));
        let mut ports = mock_ports();
        ports.students = Arc::new(command);
        let app = actix_test::init_service(test_app(HttpState::new(ports), teacher())).await;
        let cookie = login_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/students/{}", StudentId::random()))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
