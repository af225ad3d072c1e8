//! End-to-end domain flows over the in-memory adapters.
//!
//! These tests drive the real services through their driving ports, so the
//! grading, aggregation, ownership and cascade rules are checked together
//! rather than one service at a time.

use std::sync::Arc;

use learners_backend::domain::{
    Assignment, AssignmentDetails, Caller, ChosenAnswer, EmailAddress, ErrorCode, FirebaseUid,
    IdToken, NewStudent, Question, QuestionDetails, Registration, Role, SignIn, Student,
    SubjectDetails, User, Username,
};
use learners_backend::inbound::http::state::HttpState;
use learners_backend::test_support::{
    MemoryDatabase, MemoryFileStore, StubIdentityVerifier, memory_http_state, sample_profile,
};
use rstest::{fixture, rstest};

struct Classroom {
    db: Arc<MemoryDatabase>,
    state: HttpState,
}

impl Classroom {
    fn with_verifier(verifier: StubIdentityVerifier) -> Self {
        let db = Arc::new(MemoryDatabase::new());
        let state = memory_http_state(db.clone(), verifier, Arc::new(MemoryFileStore::default()));
        Self { db, state }
    }
}

#[fixture]
fn classroom() -> Classroom {
    Classroom::with_verifier(StubIdentityVerifier::default())
}

fn registration(username: &str, uid: &str, role: Role) -> Registration {
    Registration {
        username: Username::new(username).expect("username"),
        email: EmailAddress::new(&format!("{username}@school.test")).expect("email"),
        firebase_uid: FirebaseUid::new(uid).expect("uid"),
        role,
    }
}

impl Classroom {
    async fn teacher(&self, username: &str) -> User {
        self.state
            .identity
            .register_or_update_user(registration(username, &format!("uid-{username}"), Role::Teacher))
            .await
            .expect("teacher registered")
    }

    async fn student(&self, teacher: &User, username: &str, reg_num: &str) -> Student {
        self.state
            .students
            .create_student(NewStudent {
                profile: sample_profile(reg_num),
                teacher_id: teacher.id,
                username: Username::new(username).expect("username"),
                email: EmailAddress::new(&format!("{username}@school.test")).expect("email"),
            })
            .await
            .expect("student created")
    }

    async fn question(
        &self,
        assignment: &Assignment,
        text: &str,
        options: &[&str],
        correct: &str,
    ) -> Question {
        let options: Vec<String> = options.iter().map(|o| (*o).to_owned()).collect();
        self.state
            .questions
            .create_question(
                QuestionDetails::new(assignment.id, text, &options, correct).expect("question"),
            )
            .await
            .expect("question created")
    }

    async fn submit(&self, student: &Student, question: &Question, chosen: &str) {
        self.state
            .answers
            .submit_answer(
                student.id,
                question.id,
                ChosenAnswer::new(chosen).expect("chosen answer"),
            )
            .await
            .expect("answer submitted");
    }
}

#[rstest]
#[tokio::test]
async fn one_right_one_wrong_scores_one_of_two(classroom: Classroom) {
    let teacher = classroom.teacher("ms.ada").await;
    let student = classroom.student(&teacher, "sam", "R-1").await;
    let assignment = classroom
        .state
        .assignments
        .create_assignment(AssignmentDetails::new("Quiz", None, None, teacher.id).expect("details"))
        .await
        .expect("assignment created");
    let q1 = classroom
        .question(&assignment, "Capital of France?", &["Paris", "Lyon"], "Paris")
        .await;
    let q2 = classroom
        .question(&assignment, "2 + 2?", &["3", "4", "5"], "4")
        .await;

    classroom.submit(&student, &q1, "Paris").await;
    classroom.submit(&student, &q2, "5").await;

    assert_eq!(classroom.db.answer_count(), 2);
    let results = classroom
        .state
        .answers_query
        .results_for_assignment(&assignment.id)
        .await
        .expect("results");
    assert_eq!(results.len(), 1);
    let summary = results.first().expect("one summary");
    assert_eq!(summary.student_id, student.id);
    assert_eq!(summary.total_score, 1);
    assert_eq!(summary.total_questions, 2);
    let correctness: Vec<bool> = summary.answers.iter().map(|a| a.is_correct).collect();
    assert_eq!(correctness, vec![true, false]);
}

#[rstest]
#[case(1, 1)]
#[case(3, 2)]
#[case(4, 5)]
#[tokio::test]
async fn every_student_gets_one_group(
    classroom: Classroom,
    #[case] students: usize,
    #[case] questions: usize,
) {
    let teacher = classroom.teacher("mr.bell").await;
    let assignment = classroom
        .state
        .assignments
        .create_assignment(AssignmentDetails::new("Drill", None, None, teacher.id).expect("details"))
        .await
        .expect("assignment created");
    let mut created = Vec::new();
    for index in 0..questions {
        created.push(
            classroom
                .question(&assignment, &format!("Question {index}"), &["a", "b"], "a")
                .await,
        );
    }
    for index in 0..students {
        let student = classroom
            .student(&teacher, &format!("pupil{index}"), &format!("R-{index}"))
            .await;
        for question in &created {
            classroom.submit(&student, question, "b").await;
        }
    }

    let results = classroom
        .state
        .answers_query
        .results_for_assignment(&assignment.id)
        .await
        .expect("results");
    assert_eq!(results.len(), students);
    assert!(results.iter().all(|s| s.total_questions == questions));
    assert!(results.iter().all(|s| s.total_score == 0));
}

#[rstest]
#[tokio::test]
async fn another_teacher_cannot_touch_a_subject(classroom: Classroom) {
    let owner = classroom.teacher("owner").await;
    let intruder = classroom.teacher("intruder").await;
    let owner_caller = Caller::for_user(&owner, FirebaseUid::new("uid-owner").expect("uid"));
    let intruder_caller =
        Caller::for_user(&intruder, FirebaseUid::new("uid-intruder").expect("uid"));

    let subject = classroom
        .state
        .subjects
        .create_subject(
            &owner_caller,
            SubjectDetails::new("Maths", "Numbers", "5").expect("details"),
        )
        .await
        .expect("subject created");

    let update = classroom
        .state
        .subjects
        .update_subject(
            &intruder_caller,
            &subject.id,
            SubjectDetails::new("Hijacked", "", "").expect("details"),
        )
        .await
        .expect_err("foreign update");
    assert_eq!(update.code(), ErrorCode::Forbidden);
    let delete = classroom
        .state
        .subjects
        .delete_subject(&intruder_caller, &subject.id)
        .await
        .expect_err("foreign delete");
    assert_eq!(delete.code(), ErrorCode::Forbidden);

    let unchanged = classroom
        .state
        .subjects_query
        .get_subject(&subject.id)
        .await
        .expect("still there");
    assert_eq!(unchanged, subject);
}

#[rstest]
#[tokio::test]
async fn registering_twice_updates_one_record(classroom: Classroom) {
    let first = classroom
        .state
        .identity
        .register_or_update_user(registration("first.name", "uid-same", Role::Teacher))
        .await
        .expect("first registration");
    let second = classroom
        .state
        .identity
        .register_or_update_user(registration("second.name", "uid-same", Role::Teacher))
        .await
        .expect("second registration");

    assert_eq!(first.id, second.id);
    assert_eq!(second.username.as_str(), "second.name");
    assert_eq!(classroom.db.user_count(), 1);
}

#[rstest]
#[tokio::test]
async fn deleting_a_student_removes_its_login(classroom: Classroom) {
    let teacher = classroom.teacher("ms.cole").await;
    let student = classroom.student(&teacher, "kim", "R-7").await;
    assert_eq!(classroom.db.user_count(), 2);

    classroom
        .state
        .students
        .delete_student(&student.id)
        .await
        .expect("student deleted");

    assert_eq!(classroom.db.user_count(), 1);
    let err = classroom
        .state
        .users_query
        .get_user(&student.user_id)
        .await
        .expect_err("login removed");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn deleting_an_unlinked_user_leaves_students_alone(classroom: Classroom) {
    let teacher = classroom.teacher("ms.dale").await;
    let student = classroom.student(&teacher, "lee", "R-8").await;
    let bystander = classroom
        .state
        .identity
        .register_or_update_user(registration("visitor", "uid-visitor", Role::Student))
        .await
        .expect("bystander registered");

    classroom
        .state
        .users
        .delete_user(&bystander.id)
        .await
        .expect("user deleted");

    let still_there = classroom
        .state
        .students_query
        .get_student(&student.id)
        .await
        .expect("student kept");
    assert_eq!(still_there, student);
}

#[tokio::test]
async fn a_provisioned_student_signs_in_to_their_own_login() {
    let classroom = Classroom::with_verifier(StubIdentityVerifier::default().with_identity(
        "token-kim",
        "uid-kim",
        "kim@school.test",
        None,
    ));
    let teacher = classroom.teacher("ms.gray").await;
    let student = classroom.student(&teacher, "kim", "R-9").await;

    let user = classroom
        .state
        .identity
        .sign_in(SignIn {
            token: IdToken::new("token-kim").expect("token"),
            username: None,
            role: None,
        })
        .await
        .expect("student signs in");

    assert_eq!(user.id, student.user_id);
    assert_eq!(user.role, Role::Student);
    assert_eq!(user.firebase_uid, Some(FirebaseUid::new("uid-kim").expect("uid")));
    assert_eq!(classroom.db.user_count(), 2);
}
