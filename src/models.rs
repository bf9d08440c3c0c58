use serde::Serialize;
use uuid::Uuid;

pub const TIME_IN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Raw text of the four grade inputs, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct GradeForm {
    pub lab1: String,
    pub lab2: String,
    pub lab3: String,
    pub absents: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeInputs {
    pub labs: [f64; 3],
    pub absents: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeBreakdown {
    pub attendance_score: f64,
    pub lab_average: f64,
    pub class_standing: f64,
    pub required_to_pass: f64,
    pub required_for_max: f64,
    pub max_possible_grade: f64,
}

impl GradeBreakdown {
    pub fn is_finite(&self) -> bool {
        [
            self.attendance_score,
            self.lab_average,
            self.class_standing,
            self.required_to_pass,
            self.required_for_max,
            self.max_possible_grade,
        ]
        .iter()
        .all(|value| value.is_finite())
    }
}

/// Where a required exam score falls relative to what an exam can give.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Requirement {
    Unreachable { required: f64 },
    Guaranteed,
    Needed { required: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetOutlook {
    pub target: f64,
    pub requirement: Requirement,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeReport {
    pub breakdown: GradeBreakdown,
    pub pass: TargetOutlook,
    pub perfect: TargetOutlook,
}

/// Snapshot of the four fields at the moment of a successful submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRecord {
    pub name: String,
    pub course_year: String,
    pub time_in: String,
    pub signature: Uuid,
}
