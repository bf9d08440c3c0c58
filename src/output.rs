use anyhow::Context;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::json;

use crate::error::FormError;
use crate::models::{AttendanceRecord, GradeReport};
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Coloured terminal text
    #[default]
    Text,
    /// Rich-text label markup
    Markup,
    /// Pretty-printed JSON
    Json,
    /// Header row plus one data row
    Csv,
}

/// What a submit produced, split by destination stream.
#[derive(Debug, Default, PartialEq)]
pub struct Emitted {
    pub stdout: String,
    pub stderr: String,
}

pub fn grade(
    format: OutputFormat,
    outcome: &Result<GradeReport, FormError>,
) -> anyhow::Result<Emitted> {
    let rendered = render::grade_result(outcome);
    let mut emitted = Emitted::default();

    match format {
        OutputFormat::Text => {
            emitted.stdout = join_areas(
                rendered.primary.to_terminal(),
                rendered.secondary.to_terminal(),
            );
        }
        OutputFormat::Markup => {
            emitted.stdout = join_areas(
                rendered.primary.to_markup(),
                rendered.secondary.to_markup(),
            );
        }
        OutputFormat::Json => {
            emitted.stdout = match outcome {
                Ok(report) => to_json(report)?,
                Err(err) => error_json(err)?,
            };
        }
        OutputFormat::Csv => match outcome {
            Ok(report) => emitted.stdout = to_csv(&report.breakdown)?,
            Err(err) => emitted.stderr = err.to_string(),
        },
    }

    Ok(emitted)
}

pub fn attendance(
    format: OutputFormat,
    outcome: &Result<AttendanceRecord, FormError>,
) -> anyhow::Result<Emitted> {
    let dialog = render::attendance_dialog(outcome);
    let mut emitted = Emitted::default();

    match format {
        OutputFormat::Text => emitted.stdout = dialog.to_terminal(),
        OutputFormat::Markup => emitted.stdout = dialog.to_markup(),
        OutputFormat::Json => {
            emitted.stdout = match outcome {
                Ok(record) => to_json(record)?,
                Err(err) => error_json(err)?,
            };
        }
        OutputFormat::Csv => match outcome {
            Ok(record) => emitted.stdout = to_csv(record)?,
            Err(err) => emitted.stderr = err.to_string(),
        },
    }

    Ok(emitted)
}

fn join_areas(primary: String, secondary: String) -> String {
    if secondary.is_empty() {
        primary
    } else {
        format!("{primary}\n\n{secondary}")
    }
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize result as JSON")
}

fn error_json(err: &FormError) -> anyhow::Result<String> {
    to_json(&json!({
        "message": err.to_string(),
        "detail": err,
    }))
}

fn to_csv<T: Serialize>(row: &T) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.serialize(row).context("failed to write CSV row")?;
    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to flush CSV output: {err}"))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}
