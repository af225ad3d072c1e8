//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: define strongly typed entities shared by the HTTP and persistence
//! adapters. Nothing here depends on actix or Diesel; adapters translate to
//! and from these types at the boundary.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failure payload.
//! - Identifier newtypes such as [`UserId`] and [`StudentId`].
//! - Aggregates: [`User`], [`Student`], [`Subject`], [`Assignment`],
//!   [`Question`], [`StudentAnswer`], [`StudentAssignment`].
//! - [`aggregate_results`]: groups ledger rows into per-student summaries.
//! - [`ports`]: driving and driven port traits.
//! - Services implementing the driving ports.

pub mod answer;
pub mod assignment;
pub mod error;
pub mod identity;
pub mod ids;
pub mod ports;
pub mod question;
pub mod results;
pub mod student;
pub mod student_assignment;
pub mod subject;
pub mod trace_id;
pub mod upload;
pub mod user;
pub mod validation;

mod answers_service;
mod assignments_service;
mod identity_service;
mod persistence_error_mapping;
mod questions_service;
mod student_assignments_service;
mod students_service;
mod subjects_service;
mod uploads_service;
mod users_service;

pub use self::answer::{ChosenAnswer, StudentAnswer};
pub use self::answers_service::AnswersService;
pub use self::assignment::{Assignment, AssignmentDetails};
pub use self::assignments_service::AssignmentsService;
pub use self::error::{Error, ErrorCode};
pub use self::identity::{Caller, IdToken, Registration, SignIn, VerifiedIdentity};
pub use self::identity_service::IdentityService;
pub use self::ids::{
    AnswerId, AssignmentId, InvalidId, QuestionId, StudentAssignmentId, StudentId, SubjectId,
    UserId,
};
pub use self::question::{Question, QuestionDetails};
pub use self::questions_service::QuestionsService;
pub use self::results::{AnswerOutcome, ResultRow, StudentResultSummary, aggregate_results};
pub use self::student::{NewStudent, Student, StudentProfile, StudentProfileDraft};
pub use self::student_assignment::{CompletionStatus, Progress, StudentAssignment};
pub use self::student_assignments_service::StudentAssignmentsService;
pub use self::students_service::StudentsService;
pub use self::subject::{Subject, SubjectDetails};
pub use self::subjects_service::SubjectsService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::upload::{DEFAULT_MAX_UPLOAD_BYTES, StoredFile, UploadedFile};
pub use self::uploads_service::UploadsService;
pub use self::user::{EmailAddress, FirebaseUid, Role, User, Username};
pub use self::users_service::UsersService;
pub use self::validation::{FieldError, FieldErrorKind};
