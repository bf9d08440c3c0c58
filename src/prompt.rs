//! Interactive terminal forms wired to the pure handlers.

use anyhow::Context;
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

use crate::attendance::{self, AttendanceSession, Clock, Signer};
use crate::grade;
use crate::models::GradeForm;
use crate::output::{self, Emitted, OutputFormat};

pub fn print(emitted: &Emitted) {
    if !emitted.stdout.is_empty() {
        println!("{}", emitted.stdout.trim_end_matches('\n'));
    }
    if !emitted.stderr.is_empty() {
        eprintln!("{}", emitted.stderr);
    }
}

fn field(prompt: &str, current: &str) -> anyhow::Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .with_context(|| format!("failed to read {prompt}"))
}

pub fn grade_form(mut form: GradeForm, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", "Prelim Grade Calculator".cyan().bold());

    loop {
        form.lab1 = field("Lab work grade 1", &form.lab1)?;
        form.lab2 = field("Lab work grade 2", &form.lab2)?;
        form.lab3 = field("Lab work grade 3", &form.lab3)?;
        form.absents = field("No. of Absents", &form.absents)?;

        let outcome = grade::on_submit(&form);
        println!();
        print(&output::grade(format, &outcome)?);
        println!();

        let again = Confirm::new()
            .with_prompt("Calculate again?")
            .default(true)
            .interact()
            .context("failed to read confirmation")?;
        if !again {
            return Ok(());
        }
    }
}

const ACTIONS: [&str; 5] = [
    "Edit name",
    "Edit course/year",
    "Submit Attendance",
    "Clear",
    "Quit",
];

pub fn attendance_form(
    mut session: AttendanceSession,
    format: OutputFormat,
    clock: &dyn Clock,
    signer: &dyn Signer,
) -> anyhow::Result<()> {
    loop {
        println!();
        println!("{}", crate::render::attendance_form(&session).to_terminal());
        println!();

        let choice = Select::new()
            .items(&ACTIONS)
            .default(0)
            .interact()
            .context("failed to read action")?;

        match choice {
            0 => session.set_name(field("Name", session.name())?),
            1 => session.set_course_year(field("Course/Year", session.course_year())?),
            2 => {
                let outcome = attendance::on_submit(&session);
                println!();
                print(&output::attendance(format, &outcome)?);
            }
            3 => session = attendance::on_clear(session, clock, signer),
            _ => return Ok(()),
        }
    }
}
