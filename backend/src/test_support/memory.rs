//! In-memory implementation of every repository port.
//!
//! One [`MemoryDatabase`] holds all tables behind a single mutex so cascades
//! and uniqueness checks behave like the PostgreSQL schema: unique usernames,
//! emails, Firebase UIDs and registration numbers, restricted deletes for
//! referenced teachers, and cascading deletes for students and assignments.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    AnswerRepository, AssignmentRepository, PersistenceError, QuestionRepository,
    StudentAssignmentRepository, StudentRepository, SubjectRepository, UserRepository,
};
use crate::domain::{
    AnswerId, Assignment, AssignmentId, EmailAddress, FirebaseUid, Progress, Question, QuestionId,
    ResultRow, Student, StudentAnswer, StudentAssignment, StudentAssignmentId, StudentId, Subject,
    SubjectId, User, UserId,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    students: Vec<Student>,
    subjects: Vec<Subject>,
    assignments: Vec<Assignment>,
    questions: Vec<Question>,
    answers: Vec<StudentAnswer>,
    links: Vec<StudentAssignment>,
}

impl Tables {
    fn check_user_unique(&self, user: &User) -> Result<(), PersistenceError> {
        for other in self.users.iter().filter(|other| other.id != user.id) {
            if other.username == user.username {
                return Err(PersistenceError::duplicate("username already exists"));
            }
            if other.email == user.email {
                return Err(PersistenceError::duplicate("email already exists"));
            }
            if user.firebase_uid.is_some() && other.firebase_uid == user.firebase_uid {
                return Err(PersistenceError::duplicate("firebase uid already linked"));
            }
        }
        Ok(())
    }

    fn check_reg_num_unique(&self, student: &Student) -> Result<(), PersistenceError> {
        let taken = self
            .students
            .iter()
            .any(|other| other.id != student.id && other.profile.reg_num == student.profile.reg_num);
        if taken {
            Err(PersistenceError::duplicate("regNum already exists"))
        } else {
            Ok(())
        }
    }

    fn user_exists(&self, id: &UserId) -> bool {
        self.users.iter().any(|user| user.id == *id)
    }

    fn remove_answers_where(&mut self, predicate: impl Fn(&StudentAnswer) -> bool) {
        self.answers.retain(|answer| !predicate(answer));
    }
}

/// Shared in-memory store implementing all repository ports.
#[derive(Default)]
pub struct MemoryDatabase {
    tables: Mutex<Tables>,
}

impl MemoryDatabase {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, PersistenceError> {
        self.tables
            .lock()
            .map_err(|_| PersistenceError::connection("memory store poisoned"))
    }

    /// Number of stored users.
    pub fn user_count(&self) -> usize {
        self.lock().map(|tables| tables.users.len()).unwrap_or_default()
    }

    /// Number of stored ledger rows.
    pub fn answer_count(&self) -> usize {
        self.lock().map(|tables| tables.answers.len()).unwrap_or_default()
    }
}

fn replace<T: Clone>(rows: &mut [T], matches: impl Fn(&T) -> bool, value: &T) -> bool {
    match rows.iter_mut().find(|row| matches(row)) {
        Some(row) => {
            *row = value.clone();
            true
        }
        None => false,
    }
}

fn remove<T>(rows: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    let before = rows.len();
    rows.retain(|row| !matches(row));
    rows.len() != before
}

#[async_trait]
impl UserRepository for MemoryDatabase {
    async fn insert(&self, user: &User) -> Result<(), PersistenceError> {
        let mut tables = self.lock()?;
        tables.check_user_unique(user)?;
        tables.users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), PersistenceError> {
        let mut tables = self.lock()?;
        tables.check_user_unique(user)?;
        replace(&mut tables.users, |row| row.id == user.id, user);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, PersistenceError> {
        let tables = self.lock()?;
        Ok(tables.users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_firebase_uid(
        &self,
        uid: &FirebaseUid,
    ) -> Result<Option<User>, PersistenceError> {
        let tables = self.lock()?;
        Ok(tables
            .users
            .iter()
            .find(|user| user.firebase_uid.as_ref() == Some(uid))
            .cloned())
    }

    async fn find_unclaimed_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, PersistenceError> {
        let tables = self.lock()?;
        Ok(tables
            .users
            .iter()
            .find(|user| user.email == *email && user.firebase_uid.is_none())
            .cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, PersistenceError> {
        let mut tables = self.lock()?;
        let referenced = tables.students.iter().any(|s| s.teacher_id == *id || s.user_id == *id)
            || tables.assignments.iter().any(|a| a.details.teacher_id == *id);
        if referenced {
            return Err(PersistenceError::constraint("user is still referenced"));
        }
        Ok(remove(&mut tables.users, |user| user.id == *id))
    }
}

#[async_trait]
impl StudentRepository for MemoryDatabase {
    async fn create_with_account(
        &self,
        student: &Student,
        account: &User,
    ) -> Result<(), PersistenceError> {
        let mut tables = self.lock()?;
        if !tables.user_exists(&student.teacher_id) {
            return Err(PersistenceError::constraint("teacher does not exist"));
        }
        tables.check_user_unique(account)?;
        tables.check_reg_num_unique(student)?;
        tables.users.push(account.clone());
        tables.students.push(student.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, PersistenceError> {
        let tables = self.lock()?;
        Ok(tables.students.iter().find(|s| s.id == *id).cloned())
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Student>, PersistenceError> {
        let tables = self.lock()?;
        Ok(tables.students.iter().find(|s| s.user_id == *user_id).cloned())
    }

    async fn list(&self) -> Result<Vec<Student>, PersistenceError> {
        Ok(self.lock()?.students.clone())
    }

    async fn list_by_teacher(
        &self,
        teacher_id: &UserId,
    ) -> Result<Vec<Student>, PersistenceError> {
        let tables = self.lock()?;
        Ok(tables
            .students
            .iter()
            .filter(|s| s.teacher_id == *teacher_id)
            .cloned()
            .collect())
    }

    async fn update(&self, student: &Student) -> Result<bool, PersistenceError> {
        let mut tables = self.lock()?;
        tables.check_reg_num_unique(student)?;
        Ok(replace(&mut tables.students, |row| row.id == student.id, student))
    }

    async fn delete_with_account(&self, id: &StudentId) -> Result<bool, PersistenceError> {
        let mut tables = self.lock()?;
        let Some(position) = tables.students.iter().position(|s| s.id == *id) else {
            return Ok(false);
        };
        let student = tables.students.remove(position);
        tables.remove_answers_where(|answer| answer.student_id == *id);
        tables.links.retain(|link| link.student_id != *id);
        tables.users.retain(|user| user.id != student.user_id);
        Ok(true)
    }
}

#[async_trait]
impl SubjectRepository for MemoryDatabase {
    async fn insert(&self, subject: &Subject) -> Result<(), PersistenceError> {
        self.lock()?.subjects.push(subject.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SubjectId) -> Result<Option<Subject>, PersistenceError> {
        let tables = self.lock()?;
        Ok(tables.subjects.iter().find(|s| s.id == *id).cloned())
    }

    async fn list_by_teacher(
        &self,
        teacher_uid: &FirebaseUid,
    ) -> Result<Vec<Subject>, PersistenceError> {
        let tables = self.lock()?;
        Ok(tables
            .subjects
            .iter()
            .filter(|s| s.teacher_uid == *teacher_uid)
            .cloned()
            .collect())
    }

    async fn update(&self, subject: &Subject) -> Result<bool, PersistenceError> {
        let mut tables = self.lock()?;
        Ok(replace(&mut tables.subjects, |row| row.id == subject.id, subject))
    }

    async fn delete(&self, id: &SubjectId) -> Result<bool, PersistenceError> {
        let mut tables = self.lock()?;
        Ok(remove(&mut tables.subjects, |s| s.id == *id))
    }
}

#[async_trait]
impl AssignmentRepository for MemoryDatabase {
    async fn insert(&self, assignment: &Assignment) -> Result<(), PersistenceError> {
        let mut tables = self.lock()?;
        if !tables.user_exists(&assignment.details.teacher_id) {
            return Err(PersistenceError::constraint("teacher does not exist"));
        }
        tables.assignments.push(assignment.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &AssignmentId,
    ) -> Result<Option<Assignment>, PersistenceError> {
        let tables = self.lock()?;
        Ok(tables.assignments.iter().find(|a| a.id == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<Assignment>, PersistenceError> {
        Ok(self.lock()?.assignments.clone())
    }

    async fn list_by_teacher(
        &self,
        teacher_id: &UserId,
    ) -> Result<Vec<Assignment>, PersistenceError> {
        let tables = self.lock()?;
        Ok(tables
            .assignments
            .iter()
            .filter(|a| a.details.teacher_id == *teacher_id)
            .cloned()
            .collect())
    }

    async fn update(&self, assignment: &Assignment) -> Result<bool, PersistenceError> {
        let mut tables = self.lock()?;
        Ok(replace(
            &mut tables.assignments,
            |row| row.id == assignment.id,
            assignment,
        ))
    }

    async fn delete(&self, id: &AssignmentId) -> Result<bool, PersistenceError> {
        let mut tables = self.lock()?;
        if !remove(&mut tables.assignments, |a| a.id == *id) {
            return Ok(false);
        }
        let orphaned: Vec<QuestionId> = tables
            .questions
            .iter()
            .filter(|q| q.details.assignment_id == *id)
            .map(|q| q.id)
            .collect();
        tables.questions.retain(|q| q.details.assignment_id != *id);
        tables.remove_answers_where(|answer| orphaned.contains(&answer.question_id));
        tables.links.retain(|link| link.assignment_id != *id);
        Ok(true)
    }
}

#[async_trait]
impl QuestionRepository for MemoryDatabase {
    async fn insert(&self, question: &Question) -> Result<(), PersistenceError> {
        self.lock()?.questions.push(question.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, PersistenceError> {
        let tables = self.lock()?;
        Ok(tables.questions.iter().find(|q| q.id == *id).cloned())
    }

    async fn list_by_assignment(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<Question>, PersistenceError> {
        let tables = self.lock()?;
        Ok(tables
            .questions
            .iter()
            .filter(|q| q.details.assignment_id == *assignment_id)
            .cloned()
            .collect())
    }

    async fn update(&self, question: &Question) -> Result<bool, PersistenceError> {
        let mut tables = self.lock()?;
        Ok(replace(&mut tables.questions, |row| row.id == question.id, question))
    }

    async fn delete(&self, id: &QuestionId) -> Result<bool, PersistenceError> {
        let mut tables = self.lock()?;
        tables.remove_answers_where(|answer| answer.question_id == *id);
        Ok(remove(&mut tables.questions, |q| q.id == *id))
    }
}

#[async_trait]
impl AnswerRepository for MemoryDatabase {
    async fn insert(&self, answer: &StudentAnswer) -> Result<(), PersistenceError> {
        self.lock()?.answers.push(answer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AnswerId) -> Result<Option<StudentAnswer>, PersistenceError> {
        let tables = self.lock()?;
        Ok(tables.answers.iter().find(|a| a.id == *id).cloned())
    }

    async fn list_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<StudentAnswer>, PersistenceError> {
        let tables = self.lock()?;
        let mut rows: Vec<StudentAnswer> = tables
            .answers
            .iter()
            .filter(|a| a.student_id == *student_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (a.submitted_at, a.id).cmp(&(b.submitted_at, b.id)));
        Ok(rows)
    }

    async fn result_rows(
        &self,
        assignment_id: &AssignmentId,
        student_id: Option<StudentId>,
    ) -> Result<Vec<ResultRow>, PersistenceError> {
        let tables = self.lock()?;
        let mut answers: Vec<&StudentAnswer> = tables
            .answers
            .iter()
            .filter(|a| student_id.is_none_or(|id| a.student_id == id))
            .collect();
        answers.sort_by(|a, b| (a.submitted_at, a.id).cmp(&(b.submitted_at, b.id)));

        let rows = answers
            .into_iter()
            .filter_map(|answer| {
                let question = tables
                    .questions
                    .iter()
                    .find(|q| q.id == answer.question_id && q.details.assignment_id == *assignment_id)?;
                let student = tables.students.iter().find(|s| s.id == answer.student_id)?;
                Some(ResultRow {
                    student_id: answer.student_id,
                    student_name: student.profile.full_name.clone(),
                    question_id: question.id,
                    question_text: question.details.question_text.clone(),
                    chosen_answer: answer.chosen_answer.clone(),
                    is_correct: answer.is_correct,
                    submitted_at: answer.submitted_at,
                })
            })
            .collect();
        Ok(rows)
    }
}

#[async_trait]
impl StudentAssignmentRepository for MemoryDatabase {
    async fn insert(&self, link: &StudentAssignment) -> Result<(), PersistenceError> {
        let mut tables = self.lock()?;
        let duplicate = tables.links.iter().any(|other| {
            other.student_id == link.student_id && other.assignment_id == link.assignment_id
        });
        if duplicate {
            return Err(PersistenceError::duplicate("student already has this assignment"));
        }
        tables.links.push(link.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &StudentAssignmentId,
    ) -> Result<Option<StudentAssignment>, PersistenceError> {
        let tables = self.lock()?;
        Ok(tables.links.iter().find(|l| l.id == *id).cloned())
    }

    async fn find_by_pair(
        &self,
        student_id: &StudentId,
        assignment_id: &AssignmentId,
    ) -> Result<Option<StudentAssignment>, PersistenceError> {
        let tables = self.lock()?;
        Ok(tables
            .links
            .iter()
            .find(|l| l.student_id == *student_id && l.assignment_id == *assignment_id)
            .cloned())
    }

    async fn list_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<StudentAssignment>, PersistenceError> {
        let tables = self.lock()?;
        Ok(tables
            .links
            .iter()
            .filter(|l| l.student_id == *student_id)
            .cloned()
            .collect())
    }

    async fn update_progress(
        &self,
        id: &StudentAssignmentId,
        progress: &Progress,
    ) -> Result<bool, PersistenceError> {
        let mut tables = self.lock()?;
        match tables.links.iter_mut().find(|l| l.id == *id) {
            Some(link) => {
                link.progress = *progress;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &StudentAssignmentId) -> Result<bool, PersistenceError> {
        let mut tables = self.lock()?;
        Ok(remove(&mut tables.links, |l| l.id == *id))
    }
}
