//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised with in-memory adapters and no I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AnswerRepository, AnswersCommand, AnswersQuery, AssignmentRepository, AssignmentsCommand,
    AssignmentsQuery, FileStore, FileUploadCommand, IdentityCommand, IdentityVerifier,
    QuestionRepository, QuestionsCommand, QuestionsQuery, StudentAssignmentRepository,
    StudentAssignmentsCommand, StudentAssignmentsQuery, StudentRepository, StudentsCommand,
    StudentsQuery, SubjectRepository, SubjectsCommand, SubjectsQuery, UserRepository,
    UsersCommand, UsersQuery,
};
use crate::domain::{
    AnswersService, AssignmentsService, DEFAULT_MAX_UPLOAD_BYTES, IdentityService,
    QuestionsService, StudentAssignmentsService, StudentsService, SubjectsService,
    UploadsService, UsersService,
};

/// Parameter object bundling every port implementation.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub identity: Arc<dyn IdentityCommand>,
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub students: Arc<dyn StudentsCommand>,
    pub students_query: Arc<dyn StudentsQuery>,
    pub subjects: Arc<dyn SubjectsCommand>,
    pub subjects_query: Arc<dyn SubjectsQuery>,
    pub assignments: Arc<dyn AssignmentsCommand>,
    pub assignments_query: Arc<dyn AssignmentsQuery>,
    pub questions: Arc<dyn QuestionsCommand>,
    pub questions_query: Arc<dyn QuestionsQuery>,
    pub answers: Arc<dyn AnswersCommand>,
    pub answers_query: Arc<dyn AnswersQuery>,
    pub student_assignments: Arc<dyn StudentAssignmentsCommand>,
    pub student_assignments_query: Arc<dyn StudentAssignmentsQuery>,
    pub uploads: Arc<dyn FileUploadCommand>,
}

/// Driven adapters from which the domain services are assembled.
pub struct Adapters<U, S, Sub, A, Q, Ans, L, V, F> {
    pub users: Arc<U>,
    pub students: Arc<S>,
    pub subjects: Arc<Sub>,
    pub assignments: Arc<A>,
    pub questions: Arc<Q>,
    pub answers: Arc<Ans>,
    pub links: Arc<L>,
    pub verifier: Arc<V>,
    pub store: Arc<F>,
    pub clock: Arc<dyn Clock>,
}

impl HttpStatePorts {
    /// Build every domain service over the given adapters and expose each
    /// one through its driving ports.
    pub fn from_adapters<U, S, Sub, A, Q, Ans, L, V, F>(
        adapters: Adapters<U, S, Sub, A, Q, Ans, L, V, F>,
    ) -> Self
    where
        U: UserRepository + 'static,
        S: StudentRepository + 'static,
        Sub: SubjectRepository + 'static,
        A: AssignmentRepository + 'static,
        Q: QuestionRepository + 'static,
        Ans: AnswerRepository + 'static,
        L: StudentAssignmentRepository + 'static,
        V: IdentityVerifier + 'static,
        F: FileStore + 'static,
    {
        let Adapters {
            users,
            students,
            subjects,
            assignments,
            questions,
            answers,
            links,
            verifier,
            store,
            clock,
        } = adapters;

        let identity = Arc::new(IdentityService::new(users.clone(), verifier, clock.clone()));
        let users_service = Arc::new(UsersService::new(users.clone(), students.clone()));
        let students_service = Arc::new(StudentsService::new(
            students.clone(),
            users.clone(),
            clock.clone(),
        ));
        let subjects_service = Arc::new(SubjectsService::new(subjects));
        let assignments_service = Arc::new(AssignmentsService::new(assignments.clone(), users));
        let questions_service = Arc::new(QuestionsService::new(questions.clone(), assignments.clone()));
        let answers_service = Arc::new(AnswersService::new(
            answers,
            students.clone(),
            questions,
            clock,
        ));
        let links_service = Arc::new(StudentAssignmentsService::new(links, students, assignments));

        Self {
            identity,
            users: users_service.clone(),
            users_query: users_service,
            students: students_service.clone(),
            students_query: students_service,
            subjects: subjects_service.clone(),
            subjects_query: subjects_service,
            assignments: assignments_service.clone(),
            assignments_query: assignments_service,
            questions: questions_service.clone(),
            questions_query: questions_service,
            answers: answers_service.clone(),
            answers_query: answers_service,
            student_assignments: links_service.clone(),
            student_assignments_query: links_service,
            uploads: Arc::new(UploadsService::new(store)),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<dyn IdentityCommand>,
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub students: Arc<dyn StudentsCommand>,
    pub students_query: Arc<dyn StudentsQuery>,
    pub subjects: Arc<dyn SubjectsCommand>,
    pub subjects_query: Arc<dyn SubjectsQuery>,
    pub assignments: Arc<dyn AssignmentsCommand>,
    pub assignments_query: Arc<dyn AssignmentsQuery>,
    pub questions: Arc<dyn QuestionsCommand>,
    pub questions_query: Arc<dyn QuestionsQuery>,
    pub answers: Arc<dyn AnswersCommand>,
    pub answers_query: Arc<dyn AnswersQuery>,
    pub student_assignments: Arc<dyn StudentAssignmentsCommand>,
    pub student_assignments_query: Arc<dyn StudentAssignmentsQuery>,
    pub uploads: Arc<dyn FileUploadCommand>,
    /// Largest accepted upload in bytes.
    pub upload_limit: usize,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state with the default upload limit.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            identity,
            users,
            users_query,
            students,
            students_query,
            subjects,
            subjects_query,
            assignments,
            assignments_query,
            questions,
            questions_query,
            answers,
            answers_query,
            student_assignments,
            student_assignments_query,
            uploads,
        } = ports;
        Self {
            identity,
            users,
            users_query,
            students,
            students_query,
            subjects,
            subjects_query,
            assignments,
            assignments_query,
            questions,
            questions_query,
            answers,
            answers_query,
            student_assignments,
            student_assignments_query,
            uploads,
            upload_limit: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    #[must_use]
    pub fn with_upload_limit(mut self, bytes: usize) -> Self {
        self.upload_limit = bytes;
        self
    }
}
