use tracing::{debug, warn};

use crate::error::{FormError, GradeField};
use crate::models::{GradeBreakdown, GradeForm, GradeInputs, GradeReport, Requirement, TargetOutlook};

pub const PASSING_GRADE: f64 = 75.0;
pub const PERFECT_GRADE: f64 = 100.0;
pub const MAX_EXAM_SCORE: f64 = 100.0;

const EXAM_WEIGHT: f64 = 0.30;
const STANDING_WEIGHT: f64 = 0.70;
const ATTENDANCE_WEIGHT: f64 = 0.40;
const LAB_WEIGHT: f64 = 0.60;
const PENALTY_PER_ABSENT: f64 = 10.0;

/// Runs one calculation over whatever is currently typed into the form.
pub fn on_submit(form: &GradeForm) -> Result<GradeReport, FormError> {
    let inputs = parse_inputs(form).inspect_err(|err| {
        if let FormError::InvalidNumber { field, value } = err {
            warn!(?field, value = %value, "rejected grade input");
        }
    })?;
    let report = build_report(&inputs);
    if !report.breakdown.is_finite() {
        let (field, value) = largest_lab(form, &inputs);
        warn!(?field, value = %value, "grade breakdown overflowed");
        return Err(invalid(field, value));
    }
    debug!(?inputs, breakdown = ?report.breakdown, "computed grade breakdown");
    Ok(report)
}

fn largest_lab<'a>(form: &'a GradeForm, inputs: &GradeInputs) -> (GradeField, &'a str) {
    let fields = [
        (GradeField::Lab1, form.lab1.as_str()),
        (GradeField::Lab2, form.lab2.as_str()),
        (GradeField::Lab3, form.lab3.as_str()),
    ];
    let mut largest = 0;
    for (index, lab) in inputs.labs.iter().enumerate() {
        if lab.abs() > inputs.labs[largest].abs() {
            largest = index;
        }
    }
    fields[largest]
}

pub fn parse_inputs(form: &GradeForm) -> Result<GradeInputs, FormError> {
    let labs = [
        parse_lab(GradeField::Lab1, &form.lab1)?,
        parse_lab(GradeField::Lab2, &form.lab2)?,
        parse_lab(GradeField::Lab3, &form.lab3)?,
    ];
    let absents = form
        .absents
        .trim()
        .parse::<u32>()
        .map_err(|_| invalid(GradeField::Absents, &form.absents))?;

    Ok(GradeInputs { labs, absents })
}

fn parse_lab(field: GradeField, raw: &str) -> Result<f64, FormError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| invalid(field, raw))
}

fn invalid(field: GradeField, raw: &str) -> FormError {
    FormError::InvalidNumber {
        field,
        value: raw.to_string(),
    }
}

/// Falls back to dividing before summing when the plain sum overflows.
fn mean(values: &[f64]) -> f64 {
    let count = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        sum / count
    } else {
        values.iter().map(|value| value / count).sum()
    }
}

pub fn attendance_score(absents: u32) -> f64 {
    (100.0 - PENALTY_PER_ABSENT * absents as f64).max(0.0)
}

pub fn class_standing(attendance_score: f64, lab_average: f64) -> f64 {
    attendance_score * ATTENDANCE_WEIGHT + lab_average * LAB_WEIGHT
}

/// Exam score needed so that the final grade lands exactly on `target`.
pub fn required_exam_score(target: f64, class_standing: f64) -> f64 {
    (target - class_standing * STANDING_WEIGHT) / EXAM_WEIGHT
}

pub fn max_possible_grade(class_standing: f64) -> f64 {
    MAX_EXAM_SCORE * EXAM_WEIGHT + class_standing * STANDING_WEIGHT
}

pub fn classify(required: f64) -> Requirement {
    if required > MAX_EXAM_SCORE {
        Requirement::Unreachable { required }
    } else if required <= 0.0 {
        Requirement::Guaranteed
    } else {
        Requirement::Needed { required }
    }
}

pub fn compute(inputs: &GradeInputs) -> GradeBreakdown {
    let attendance_score = attendance_score(inputs.absents);
    let lab_average = mean(&inputs.labs);
    let class_standing = class_standing(attendance_score, lab_average);

    GradeBreakdown {
        attendance_score,
        lab_average,
        class_standing,
        required_to_pass: required_exam_score(PASSING_GRADE, class_standing),
        required_for_max: required_exam_score(PERFECT_GRADE, class_standing),
        max_possible_grade: max_possible_grade(class_standing),
    }
}

pub fn build_report(inputs: &GradeInputs) -> GradeReport {
    let breakdown = compute(inputs);
    GradeReport {
        breakdown,
        pass: TargetOutlook {
            target: PASSING_GRADE,
            requirement: classify(breakdown.required_to_pass),
        },
        perfect: TargetOutlook {
            target: PERFECT_GRADE,
            requirement: classify(breakdown.required_for_max),
        },
    }
}
