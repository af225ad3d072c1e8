//! Answer ledger and result aggregation service.
//!
//! Submissions are graded once, when written, by exact comparison with the
//! question's correct answer. Reads never re-grade.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    AnswerRepository, AnswersCommand, AnswersQuery, QuestionRepository, StudentRepository,
};
use crate::domain::{
    AnswerId, AssignmentId, ChosenAnswer, Error, QuestionId, StudentAnswer, StudentId,
    StudentResultSummary, aggregate_results,
};

use super::persistence_error_mapping::map_persistence_error;

/// Implements [`AnswersCommand`] and [`AnswersQuery`].
#[derive(Clone)]
pub struct AnswersService<A, S, Q> {
    answers: Arc<A>,
    students: Arc<S>,
    questions: Arc<Q>,
    clock: Arc<dyn Clock>,
}

impl<A, S, Q> AnswersService<A, S, Q> {
    pub fn new(
        answers: Arc<A>,
        students: Arc<S>,
        questions: Arc<Q>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            answers,
            students,
            questions,
            clock,
        }
    }
}

#[async_trait]
impl<A, S, Q> AnswersCommand for AnswersService<A, S, Q>
where
    A: AnswerRepository,
    S: StudentRepository,
    Q: QuestionRepository,
{
    async fn submit_answer(
        &self,
        student_id: StudentId,
        question_id: QuestionId,
        chosen: ChosenAnswer,
    ) -> Result<StudentAnswer, Error> {
        self.students
            .find_by_id(&student_id)
            .await
            .map_err(map_persistence_error("student"))?
            .ok_or_else(|| Error::not_found(format!("student {student_id} not found")))?;
        let question = self
            .questions
            .find_by_id(&question_id)
            .await
            .map_err(map_persistence_error("question"))?
            .ok_or_else(|| Error::not_found(format!("question {question_id} not found")))?;

        let answer = StudentAnswer::grade(student_id, &question, chosen, self.clock.utc());
        self.answers
            .insert(&answer)
            .await
            .map_err(map_persistence_error("answer"))?;
        debug!(answer_id = %answer.id, is_correct = answer.is_correct, "recorded answer");
        Ok(answer)
    }
}

#[async_trait]
impl<A, S, Q> AnswersQuery for AnswersService<A, S, Q>
where
    A: AnswerRepository,
    S: StudentRepository,
    Q: QuestionRepository,
{
    async fn get_answer(&self, id: &AnswerId) -> Result<StudentAnswer, Error> {
        self.answers
            .find_by_id(id)
            .await
            .map_err(map_persistence_error("answer"))?
            .ok_or_else(|| Error::not_found(format!("answer {id} not found")))
    }

    async fn list_for_student(&self, student_id: &StudentId) -> Result<Vec<StudentAnswer>, Error> {
        self.answers
            .list_by_student(student_id)
            .await
            .map_err(map_persistence_error("answer"))
    }

    async fn results_for_assignment(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<StudentResultSummary>, Error> {
        let rows = self
            .answers
            .result_rows(assignment_id, None)
            .await
            .map_err(map_persistence_error("answer"))?;
        Ok(aggregate_results(rows))
    }

    async fn results_for_student(
        &self,
        student_id: &StudentId,
        assignment_id: &AssignmentId,
    ) -> Result<StudentResultSummary, Error> {
        let student = self
            .students
            .find_by_id(student_id)
            .await
            .map_err(map_persistence_error("student"))?
            .ok_or_else(|| Error::not_found(format!("student {student_id} not found")))?;
        let rows = self
            .answers
            .result_rows(assignment_id, Some(*student_id))
            .await
            .map_err(map_persistence_error("answer"))?;
        Ok(aggregate_results(rows)
            .into_iter()
            .find(|summary| summary.student_id == *student_id)
            .unwrap_or_else(|| {
                StudentResultSummary::empty(student.id, student.profile.full_name)
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockAnswerRepository, MockQuestionRepository, MockStudentRepository};
    use crate::domain::{Question, QuestionDetails, UserId};
    use crate::test_support::{FixedClock, sample_student};
    use rstest::rstest;

    fn question(correct: &str) -> Question {
        Question {
            id: QuestionId::random(),
            details: QuestionDetails::new(
                AssignmentId::random(),
                "Capital of France?",
                &["Paris".to_owned(), "Lyon".to_owned()],
                correct,
            )
            .expect("details"),
        }
    }

    type Service = AnswersService<MockAnswerRepository, MockStudentRepository, MockQuestionRepository>;

    fn service(
        answers: MockAnswerRepository,
        students: MockStudentRepository,
        questions: MockQuestionRepository,
    ) -> Service {
        AnswersService::new(
            Arc::new(answers),
            Arc::new(students),
            Arc::new(questions),
            Arc::new(FixedClock::default()),
        )
    }

    #[rstest]
    #[case("Paris", true)]
    #[case("Lyon", false)]
    #[case("paris", false)]
    #[tokio::test]
    async fn submit_grades_at_write_time(#[case] chosen: &str, #[case] expected: bool) {
        let mut students = MockStudentRepository::new();
        students
            .expect_find_by_id()
            .return_once(|_| Ok(Some(sample_student(UserId::random()))));
        let q = question("Paris");
        let mut questions = MockQuestionRepository::new();
        questions.expect_find_by_id().return_once(move |_| Ok(Some(q)));
        let mut answers = MockAnswerRepository::new();
        answers
            .expect_insert()
            .withf(move |row| row.is_correct == expected)
            .times(1)
            .return_once(|_| Ok(()));

        let row = service(answers, students, questions)
            .submit_answer(
                StudentId::random(),
                QuestionId::random(),
                ChosenAnswer::new(chosen).expect("chosen"),
            )
            .await
            .expect("submitted");
        assert_eq!(row.is_correct, expected);
        assert_eq!(row.submitted_at, FixedClock::default().utc());
    }

    #[tokio::test]
    async fn submit_for_unknown_question_is_not_found() {
        let mut students = MockStudentRepository::new();
        students
            .expect_find_by_id()
            .return_once(|_| Ok(Some(sample_student(UserId::random()))));
        let mut questions = MockQuestionRepository::new();
        questions.expect_find_by_id().return_once(|_| Ok(None));
        let mut answers = MockAnswerRepository::new();
        answers.expect_insert().never();

        let err = service(answers, students, questions)
            .submit_answer(
                StudentId::random(),
                QuestionId::random(),
                ChosenAnswer::new("Paris").expect("chosen"),
            )
            .await
            .expect_err("missing question");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn student_without_rows_gets_zero_totals() {
        let student = sample_student(UserId::random());
        let student_id = student.id;
        let mut students = MockStudentRepository::new();
        students
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(student)));
        let mut answers = MockAnswerRepository::new();
        answers
            .expect_result_rows()
            .withf(move |_, filter| *filter == Some(student_id))
            .return_once(|_, _| Ok(Vec::new()));

        let summary = service(answers, students, MockQuestionRepository::new())
            .results_for_student(&student_id, &AssignmentId::random())
            .await
            .expect("summary");
        assert_eq!(summary.student_id, student_id);
        assert_eq!(summary.total_score, 0);
        assert_eq!(summary.total_questions, 0);
    }

    #[tokio::test]
    async fn results_for_unknown_student_are_not_found() {
        let mut students = MockStudentRepository::new();
        students.expect_find_by_id().return_once(|_| Ok(None));
        let mut answers = MockAnswerRepository::new();
        answers.expect_result_rows().never();

        let err = service(answers, students, MockQuestionRepository::new())
            .results_for_student(&StudentId::random(), &AssignmentId::random())
            .await
            .expect_err("missing student");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
