//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`, [`IdentityVerifier`], [`FileStore`]) describe
//! what the domain needs from infrastructure. Driving ports (`*Command` and
//! `*Query`) are the use-cases inbound adapters call. Each driven port
//! surfaces a typed error so adapters map failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod answer_repository;
mod answers_command;
mod answers_query;
mod assignment_repository;
mod assignments_command;
mod assignments_query;
mod file_store;
mod file_upload_command;
mod identity_command;
mod identity_verifier;
mod persistence_error;
mod question_repository;
mod questions_command;
mod questions_query;
mod student_assignment_repository;
mod student_assignments_command;
mod student_assignments_query;
mod student_repository;
mod students_command;
mod students_query;
mod subject_repository;
mod subjects_command;
mod subjects_query;
mod user_repository;
mod users_command;
mod users_query;

pub use answer_repository::AnswerRepository;
#[cfg(test)]
pub use answer_repository::MockAnswerRepository;
pub use answers_command::AnswersCommand;
#[cfg(test)]
pub use answers_command::MockAnswersCommand;
pub use answers_query::AnswersQuery;
#[cfg(test)]
pub use answers_query::MockAnswersQuery;
pub use assignment_repository::AssignmentRepository;
#[cfg(test)]
pub use assignment_repository::MockAssignmentRepository;
pub use assignments_command::AssignmentsCommand;
#[cfg(test)]
pub use assignments_command::MockAssignmentsCommand;
pub use assignments_query::AssignmentsQuery;
#[cfg(test)]
pub use assignments_query::MockAssignmentsQuery;
#[cfg(test)]
pub use file_store::MockFileStore;
pub use file_store::{FileStore, FileStoreError};
pub use file_upload_command::FileUploadCommand;
#[cfg(test)]
pub use file_upload_command::MockFileUploadCommand;
pub use identity_command::IdentityCommand;
#[cfg(test)]
pub use identity_command::MockIdentityCommand;
#[cfg(test)]
pub use identity_verifier::MockIdentityVerifier;
pub use identity_verifier::{IdentityVerifier, IdentityVerifierError};
pub use persistence_error::PersistenceError;
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
pub use question_repository::QuestionRepository;
#[cfg(test)]
pub use questions_command::MockQuestionsCommand;
pub use questions_command::QuestionsCommand;
#[cfg(test)]
pub use questions_query::MockQuestionsQuery;
pub use questions_query::QuestionsQuery;
#[cfg(test)]
pub use student_assignment_repository::MockStudentAssignmentRepository;
pub use student_assignment_repository::StudentAssignmentRepository;
#[cfg(test)]
pub use student_assignments_command::MockStudentAssignmentsCommand;
pub use student_assignments_command::StudentAssignmentsCommand;
#[cfg(test)]
pub use student_assignments_query::MockStudentAssignmentsQuery;
pub use student_assignments_query::StudentAssignmentsQuery;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::StudentRepository;
#[cfg(test)]
pub use students_command::MockStudentsCommand;
pub use students_command::StudentsCommand;
#[cfg(test)]
pub use students_query::MockStudentsQuery;
pub use students_query::StudentsQuery;
#[cfg(test)]
pub use subject_repository::MockSubjectRepository;
pub use subject_repository::SubjectRepository;
#[cfg(test)]
pub use subjects_command::MockSubjectsCommand;
pub use subjects_command::SubjectsCommand;
#[cfg(test)]
pub use subjects_query::MockSubjectsQuery;
pub use subjects_query::SubjectsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
