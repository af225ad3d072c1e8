//! Internal Diesel row structs and their conversions to domain types.
//!
//! Rows never leave the persistence layer. Reading a row that no longer
//! satisfies a domain invariant surfaces as a query error.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::PersistenceError;
use crate::domain::{
    AnswerId, Assignment, AssignmentDetails, AssignmentId, CompletionStatus, EmailAddress,
    FirebaseUid, Progress, Question, QuestionDetails, QuestionId, ResultRow, Role, Student,
    StudentAnswer, StudentAssignment, StudentAssignmentId, StudentId, StudentProfile, Subject,
    SubjectDetails, SubjectId, User, UserId, Username,
};

use super::schema::{
    assignments, questions, student_answers, student_assignments, students, subjects, users,
};

fn corrupt(table: &'static str) -> impl Fn(crate::domain::FieldError) -> PersistenceError {
    move |error| PersistenceError::query(format!("invalid {table} row: {error}"))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub firebase_uid: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserUpdate<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub firebase_uid: Option<&'a str>,
    pub role: &'a str,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            username: user.username.as_str().to_owned(),
            email: user.email.as_str().to_owned(),
            firebase_uid: user.firebase_uid.as_ref().map(|uid| uid.as_str().to_owned()),
            role: user.role.as_str().to_owned(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl<'a> From<&'a User> for UserUpdate<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            username: user.username.as_str(),
            email: user.email.as_str(),
            firebase_uid: user.firebase_uid.as_ref().map(FirebaseUid::as_str),
            role: user.role.as_str(),
            updated_at: user.updated_at,
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let invalid = corrupt("users");
        Ok(Self {
            id: UserId::from_uuid(row.id),
            username: Username::new(&row.username).map_err(&invalid)?,
            email: EmailAddress::new(&row.email).map_err(&invalid)?,
            firebase_uid: row
                .firebase_uid
                .as_deref()
                .map(FirebaseUid::new)
                .transpose()
                .map_err(&invalid)?,
            role: row.role.parse::<Role>().map_err(&invalid)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: Uuid,
    pub full_name: String,
    pub reg_num: String,
    pub grade: String,
    pub gender: String,
    pub is_active: bool,
    pub parent_name: Option<String>,
    pub performance_score: Option<f64>,
    pub user_id: Uuid,
    pub teacher_id: Uuid,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub id: Uuid,
    pub full_name: &'a str,
    pub reg_num: &'a str,
    pub grade: &'a str,
    pub gender: &'a str,
    pub is_active: bool,
    pub parent_name: Option<&'a str>,
    pub performance_score: Option<f64>,
    pub user_id: Uuid,
    pub teacher_id: Uuid,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct StudentUpdate<'a> {
    pub full_name: &'a str,
    pub reg_num: &'a str,
    pub grade: &'a str,
    pub gender: &'a str,
    pub is_active: bool,
    pub parent_name: Option<&'a str>,
    pub performance_score: Option<f64>,
}

impl<'a> From<&'a Student> for NewStudentRow<'a> {
    fn from(student: &'a Student) -> Self {
        let profile = &student.profile;
        Self {
            id: *student.id.as_uuid(),
            full_name: &profile.full_name,
            reg_num: &profile.reg_num,
            grade: &profile.grade,
            gender: &profile.gender,
            is_active: profile.is_active,
            parent_name: profile.parent_name.as_deref(),
            performance_score: profile.performance_score,
            user_id: *student.user_id.as_uuid(),
            teacher_id: *student.teacher_id.as_uuid(),
        }
    }
}

impl<'a> From<&'a StudentProfile> for StudentUpdate<'a> {
    fn from(profile: &'a StudentProfile) -> Self {
        Self {
            full_name: &profile.full_name,
            reg_num: &profile.reg_num,
            grade: &profile.grade,
            gender: &profile.gender,
            is_active: profile.is_active,
            parent_name: profile.parent_name.as_deref(),
            performance_score: profile.performance_score,
        }
    }
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: StudentId::from_uuid(row.id),
            profile: StudentProfile {
                full_name: row.full_name,
                reg_num: row.reg_num,
                grade: row.grade,
                gender: row.gender,
                is_active: row.is_active,
                parent_name: row.parent_name,
                performance_score: row.performance_score,
            },
            user_id: UserId::from_uuid(row.user_id),
            teacher_id: UserId::from_uuid(row.teacher_id),
        }
    }
}

// ---------------------------------------------------------------------------
// Subjects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subjects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubjectRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub grade_level: String,
    pub teacher_uid: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subjects)]
pub(crate) struct NewSubjectRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub grade_level: &'a str,
    pub teacher_uid: &'a str,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = subjects)]
pub(crate) struct SubjectUpdate<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub grade_level: &'a str,
}

impl<'a> From<&'a Subject> for NewSubjectRow<'a> {
    fn from(subject: &'a Subject) -> Self {
        Self {
            id: *subject.id.as_uuid(),
            name: &subject.details.name,
            description: &subject.details.description,
            grade_level: &subject.details.grade_level,
            teacher_uid: subject.teacher_uid.as_str(),
        }
    }
}

impl<'a> From<&'a SubjectDetails> for SubjectUpdate<'a> {
    fn from(details: &'a SubjectDetails) -> Self {
        Self {
            name: &details.name,
            description: &details.description,
            grade_level: &details.grade_level,
        }
    }
}

impl TryFrom<SubjectRow> for Subject {
    type Error = PersistenceError;

    fn try_from(row: SubjectRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SubjectId::from_uuid(row.id),
            details: SubjectDetails {
                name: row.name,
                description: row.description,
                grade_level: row.grade_level,
            },
            teacher_uid: FirebaseUid::new(&row.teacher_uid).map_err(corrupt("subjects"))?,
        })
    }
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AssignmentRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub teacher_id: Uuid,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = assignments)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct AssignmentWrite<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub due_date: Option<NaiveDate>,
    pub teacher_id: Uuid,
}

impl<'a> From<&'a AssignmentDetails> for AssignmentWrite<'a> {
    fn from(details: &'a AssignmentDetails) -> Self {
        Self {
            title: &details.title,
            description: details.description.as_deref(),
            due_date: details.due_date,
            teacher_id: *details.teacher_id.as_uuid(),
        }
    }
}

impl From<AssignmentRow> for Assignment {
    fn from(row: AssignmentRow) -> Self {
        Self {
            id: AssignmentId::from_uuid(row.id),
            details: AssignmentDetails {
                title: row.title,
                description: row.description,
                due_date: row.due_date,
                teacher_id: UserId::from_uuid(row.teacher_id),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuestionRow {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = questions)]
pub(crate) struct QuestionWrite<'a> {
    pub assignment_id: Uuid,
    pub question_text: &'a str,
    pub options: &'a [String],
    pub correct_answer: &'a str,
}

impl<'a> From<&'a QuestionDetails> for QuestionWrite<'a> {
    fn from(details: &'a QuestionDetails) -> Self {
        Self {
            assignment_id: *details.assignment_id.as_uuid(),
            question_text: &details.question_text,
            options: &details.options,
            correct_answer: &details.correct_answer,
        }
    }
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Self {
            id: QuestionId::from_uuid(row.id),
            details: QuestionDetails {
                assignment_id: AssignmentId::from_uuid(row.assignment_id),
                question_text: row.question_text,
                options: row.options,
                correct_answer: row.correct_answer,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Answer ledger
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = student_answers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnswerRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub question_id: Uuid,
    pub chosen_answer: String,
    pub is_correct: bool,
    pub submitted_at: DateTime<Utc>,
}

impl From<&StudentAnswer> for AnswerRow {
    fn from(answer: &StudentAnswer) -> Self {
        Self {
            id: *answer.id.as_uuid(),
            student_id: *answer.student_id.as_uuid(),
            question_id: *answer.question_id.as_uuid(),
            chosen_answer: answer.chosen_answer.clone(),
            is_correct: answer.is_correct,
            submitted_at: answer.submitted_at,
        }
    }
}

impl From<AnswerRow> for StudentAnswer {
    fn from(row: AnswerRow) -> Self {
        Self {
            id: AnswerId::from_uuid(row.id),
            student_id: StudentId::from_uuid(row.student_id),
            question_id: QuestionId::from_uuid(row.question_id),
            chosen_answer: row.chosen_answer,
            is_correct: row.is_correct,
            submitted_at: row.submitted_at,
        }
    }
}

/// Tuple selected by the results join, in column order.
pub(crate) type ResultTuple = (Uuid, String, Uuid, String, String, bool, DateTime<Utc>);

pub(crate) fn result_row(
    (student_id, student_name, question_id, question_text, chosen_answer, is_correct, submitted_at): ResultTuple,
) -> ResultRow {
    ResultRow {
        student_id: StudentId::from_uuid(student_id),
        student_name,
        question_id: QuestionId::from_uuid(question_id),
        question_text,
        chosen_answer,
        is_correct,
        submitted_at,
    }
}

// ---------------------------------------------------------------------------
// Student assignments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = student_assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentAssignmentRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub assignment_id: Uuid,
    pub completion_status: String,
    pub grade: Option<i32>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = student_assignments)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProgressUpdate {
    pub completion_status: &'static str,
    pub grade: Option<i32>,
}

impl From<&Progress> for ProgressUpdate {
    fn from(progress: &Progress) -> Self {
        Self {
            completion_status: progress.completion_status.as_str(),
            grade: progress.grade,
        }
    }
}

impl From<&StudentAssignment> for StudentAssignmentRow {
    fn from(link: &StudentAssignment) -> Self {
        Self {
            id: *link.id.as_uuid(),
            student_id: *link.student_id.as_uuid(),
            assignment_id: *link.assignment_id.as_uuid(),
            completion_status: link.progress.completion_status.as_str().to_owned(),
            grade: link.progress.grade,
        }
    }
}

impl TryFrom<StudentAssignmentRow> for StudentAssignment {
    type Error = PersistenceError;

    fn try_from(row: StudentAssignmentRow) -> Result<Self, Self::Error> {
        let status = row
            .completion_status
            .parse::<CompletionStatus>()
            .map_err(corrupt("student_assignments"))?;
        Ok(Self {
            id: StudentAssignmentId::from_uuid(row.id),
            student_id: StudentId::from_uuid(row.student_id),
            assignment_id: AssignmentId::from_uuid(row.assignment_id),
            progress: Progress::new(status, row.grade).map_err(corrupt("student_assignments"))?,
        })
    }
}
