//! PostgreSQL repository adapters built on Diesel.
//!
//! Adapters only translate between row structs and domain types. Rows
//! (`models`) and table definitions (`schema`) stay private to this module,
//! and every failure leaves as a [`crate::domain::ports::PersistenceError`].
//!
//! ```ignore
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/learners")).await?;
//! let users = DieselUserRepository::new(pool.clone());
//! ```

mod diesel_answer_repository;
mod diesel_assignment_repository;
mod diesel_error_mapping;
mod diesel_question_repository;
mod diesel_student_assignment_repository;
mod diesel_student_repository;
mod diesel_subject_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_answer_repository::DieselAnswerRepository;
pub use diesel_assignment_repository::DieselAssignmentRepository;
pub use diesel_question_repository::DieselQuestionRepository;
pub use diesel_student_assignment_repository::DieselStudentAssignmentRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use diesel_subject_repository::DieselSubjectRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
