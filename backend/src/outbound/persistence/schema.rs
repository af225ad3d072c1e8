//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Login-capable accounts for teachers and students.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Text,
        /// Set once the account has signed in through Firebase.
        firebase_uid -> Nullable<Text>,
        /// `TEACHER` or `STUDENT`.
        role -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Student directory. `user_id` is the owned login account.
    students (id) {
        id -> Uuid,
        full_name -> Text,
        reg_num -> Text,
        grade -> Text,
        gender -> Text,
        is_active -> Bool,
        parent_name -> Nullable<Text>,
        performance_score -> Nullable<Float8>,
        user_id -> Uuid,
        teacher_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Subjects, scoped by the owning teacher's Firebase UID.
    subjects (id) {
        id -> Uuid,
        name -> Text,
        description -> Text,
        grade_level -> Text,
        teacher_uid -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    assignments (id) {
        id -> Uuid,
        title -> Text,
        description -> Nullable<Text>,
        due_date -> Nullable<Date>,
        teacher_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Multiple-choice questions. `options` keeps the author's order.
    questions (id) {
        id -> Uuid,
        assignment_id -> Uuid,
        question_text -> Text,
        options -> Array<Text>,
        correct_answer -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only answer ledger.
    student_answers (id) {
        id -> Uuid,
        student_id -> Uuid,
        question_id -> Uuid,
        chosen_answer -> Text,
        is_correct -> Bool,
        submitted_at -> Timestamptz,
    }
}

diesel::table! {
    student_assignments (id) {
        id -> Uuid,
        student_id -> Uuid,
        assignment_id -> Uuid,
        completion_status -> Varchar,
        grade -> Nullable<Int4>,
    }
}

diesel::joinable!(assignments -> users (teacher_id));
diesel::joinable!(questions -> assignments (assignment_id));
diesel::joinable!(student_answers -> questions (question_id));
diesel::joinable!(student_answers -> students (student_id));
diesel::joinable!(student_assignments -> assignments (assignment_id));
diesel::joinable!(student_assignments -> students (student_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    students,
    subjects,
    assignments,
    questions,
    student_answers,
    student_assignments,
);
