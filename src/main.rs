use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod attendance;
mod error;
mod grade;
mod models;
mod output;
mod prompt;
mod render;

use attendance::{AttendanceSession, RandomSigner, SystemClock};
use models::GradeForm;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "prelim-forms")]
#[command(about = "Prelim grade calculator and attendance tracker", long_about = None)]
struct Cli {
    /// Log handler activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(long, global = true, value_enum, env = "PRELIM_FORMS_FORMAT", default_value_t)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute class standing and required prelim exam scores
    Grade {
        #[arg(long)]
        lab1: Option<String>,
        #[arg(long)]
        lab2: Option<String>,
        #[arg(long)]
        lab3: Option<String>,
        #[arg(long)]
        absents: Option<String>,
    },
    /// Record attendance with an auto-generated time in and e-signature
    Attendance {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        course_year: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "prelim_forms=debug"
    } else {
        "prelim_forms=warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Grade {
            lab1,
            lab2,
            lab3,
            absents,
        } => match (lab1, lab2, lab3, absents) {
            (Some(lab1), Some(lab2), Some(lab3), Some(absents)) => {
                let form = GradeForm {
                    lab1,
                    lab2,
                    lab3,
                    absents,
                };
                let outcome = grade::on_submit(&form);
                prompt::print(&output::grade(cli.format, &outcome)?);
                if outcome.is_err() {
                    return Ok(ExitCode::FAILURE);
                }
            }
            (lab1, lab2, lab3, absents) => {
                let form = GradeForm {
                    lab1: lab1.unwrap_or_default(),
                    lab2: lab2.unwrap_or_default(),
                    lab3: lab3.unwrap_or_default(),
                    absents: absents.unwrap_or_default(),
                };
                prompt::grade_form(form, cli.format)?;
            }
        },
        Commands::Attendance { name, course_year } => {
            let session = AttendanceSession::new(&SystemClock, &RandomSigner);

            match (name, course_year) {
                (Some(name), Some(course_year)) => {
                    let session = session.with_inputs(name, course_year);
                    let outcome = attendance::on_submit(&session);
                    prompt::print(&output::attendance(cli.format, &outcome)?);
                    if outcome.is_err() {
                        return Ok(ExitCode::FAILURE);
                    }
                }
                (name, course_year) => {
                    let session = session.with_inputs(
                        name.unwrap_or_default(),
                        course_year.unwrap_or_default(),
                    );
                    prompt::attendance_form(session, cli.format, &SystemClock, &RandomSigner)?;
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
