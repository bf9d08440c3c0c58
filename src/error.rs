use serde::Serialize;
use thiserror::Error;

/// Input fields of the grade calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeField {
    Lab1,
    Lab2,
    Lab3,
    Absents,
}

/// Required fields of the attendance form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceField {
    Name,
    CourseYear,
}

/// Validation failures surfaced back to the form that caused them.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum FormError {
    #[error("Please enter valid numbers!")]
    InvalidNumber { field: GradeField, value: String },

    #[error("Please fill in all required fields (Name and Course/Year).")]
    MissingField { field: AttendanceField },
}
