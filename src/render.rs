use std::fmt::Write;

use colored::Colorize;

use crate::attendance::AttendanceSession;
use crate::error::FormError;
use crate::models::{AttendanceRecord, GradeReport, Requirement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Strong,
    Error,
    Success,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

impl Span {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Plain)
    }
}

/// A block of styled lines, standing in for one result label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    pub lines: Vec<Vec<Span>>,
}

impl Panel {
    fn push(&mut self, line: Vec<Span>) {
        self.lines.push(line);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Label markup: `<html><center>a<br>b</center></html>`.
    pub fn to_markup(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let body = self
            .lines
            .iter()
            .map(|line| line.iter().map(span_markup).collect::<String>())
            .collect::<Vec<_>>()
            .join("<br>");
        format!("<html><center>{body}</center></html>")
    }

    #[cfg(test)]
    pub fn to_plain(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(|span| span.text.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_terminal(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(span_terminal).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Escapes text so it is shown literally inside label markup.
fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn span_markup(span: &Span) -> String {
    let text = escape_markup(&span.text);
    match span.tone {
        Tone::Plain => text,
        Tone::Strong => format!("<b>{text}</b>"),
        Tone::Error => format!("<font color='red'>{text}</font>"),
        Tone::Success => format!("<font color='green'>{text}</font>"),
        Tone::Info => format!("<font color='blue'>{text}</font>"),
        Tone::Warning => format!("<font color='orange'>{text}</font>"),
    }
}

fn span_terminal(span: &Span) -> String {
    let text = span.text.as_str();
    match span.tone {
        Tone::Plain => text.normal(),
        Tone::Strong => text.bold(),
        Tone::Error => text.red(),
        Tone::Success => text.green(),
        Tone::Info => text.blue(),
        Tone::Warning => text.truecolor(255, 165, 0),
    }
    .to_string()
}

/// Contents of the two result areas of the grade form.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult {
    pub primary: Panel,
    pub secondary: Panel,
}

pub fn grade_result(outcome: &Result<GradeReport, FormError>) -> RenderResult {
    match outcome {
        Ok(report) => RenderResult {
            primary: grade_summary(report),
            secondary: grade_requirements(report),
        },
        Err(err) => RenderResult {
            primary: Panel {
                lines: vec![vec![Span::new(err.to_string(), Tone::Error)]],
            },
            secondary: Panel::default(),
        },
    }
}

fn grade_summary(report: &GradeReport) -> Panel {
    let b = &report.breakdown;
    let mut panel = Panel::default();
    panel.push(vec![Span::plain(format!("Attendance Score: {:.2}", b.attendance_score))]);
    panel.push(vec![Span::plain(format!("Lab Work Average: {:.2}", b.lab_average))]);
    panel.push(vec![Span::plain(format!("Class Standing: {:.2}", b.class_standing))]);
    panel
}

fn grade_requirements(report: &GradeReport) -> Panel {
    let max_grade = report.breakdown.max_possible_grade;

    let pass = match report.pass.requirement {
        Requirement::Unreachable { required } => {
            Span::new(format!("Cannot pass (need {required:.2})"), Tone::Error)
        }
        Requirement::Guaranteed => {
            Span::new("ALREADY PASSING! (need 0 or less)", Tone::Success)
        }
        Requirement::Needed { required } => Span::new(format!("{required:.2}"), Tone::Info),
    };

    let perfect = match report.perfect.requirement {
        Requirement::Unreachable { required } => Span::new(
            format!("Need {required:.2} (Max grade: {max_grade:.2})"),
            Tone::Warning,
        ),
        Requirement::Guaranteed => Span::new(
            format!("GUARANTEED! (Max grade: {max_grade:.2})"),
            Tone::Success,
        ),
        Requirement::Needed { required } => Span::new(
            format!("{required:.2} (Max grade: {max_grade:.2})"),
            Tone::Info,
        ),
    };

    let mut panel = Panel::default();
    panel.push(vec![Span::new("Required Prelim Exam Score:", Tone::Strong)]);
    panel.push(vec![
        Span::plain(format!("To Pass ({:.0}): ", report.pass.target)),
        pass,
    ]);
    panel.push(vec![
        Span::plain(format!("For Perfect ({:.0}): ", report.perfect.target)),
        perfect,
    ]);
    panel
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Warning,
    Information,
}

/// A modal message raised by the attendance form.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    pub title: String,
    pub kind: DialogKind,
    pub body: String,
}

impl Dialog {
    pub fn to_terminal(&self) -> String {
        let title = match self.kind {
            DialogKind::Warning => self.title.yellow().bold(),
            DialogKind::Information => self.title.green().bold(),
        };
        format!("[{title}]\n{}", self.body)
    }

    pub fn to_markup(&self) -> String {
        let body = escape_markup(&self.body).replace('\n', "<br>");
        format!("<html><b>{}</b><br>{body}</html>", escape_markup(&self.title))
    }
}

pub fn attendance_dialog(outcome: &Result<AttendanceRecord, FormError>) -> Dialog {
    match outcome {
        Ok(record) => {
            let mut body = String::new();
            let _ = writeln!(body, "Attendance Recorded Successfully!");
            let _ = writeln!(body);
            let _ = writeln!(body, "Name: {}", record.name);
            let _ = writeln!(body, "Course/Year: {}", record.course_year);
            let _ = writeln!(body, "Time In: {}", record.time_in);
            let _ = write!(body, "E-Signature: {}", record.signature);
            Dialog {
                title: "Success".to_string(),
                kind: DialogKind::Information,
                body,
            }
        }
        Err(err) => Dialog {
            title: "Validation Error".to_string(),
            kind: DialogKind::Warning,
            body: err.to_string(),
        },
    }
}

/// The attendance form as it currently reads, one field per line.
pub fn attendance_form(session: &AttendanceSession) -> Panel {
    let mut panel = Panel::default();
    panel.push(vec![Span::new("Attendance Tracking System", Tone::Strong)]);
    panel.push(vec![Span::plain(format!("Name:         {}", session.name()))]);
    panel.push(vec![Span::plain(format!("Course/Year:  {}", session.course_year()))]);
    panel.push(vec![
        Span::plain(format!("Time In:      {} ", session.time_in_display())),
        Span::new("(read-only)", Tone::Info),
    ]);
    panel.push(vec![
        Span::plain(format!("E-Signature:  {} ", session.signature())),
        Span::new("(read-only)", Tone::Info),
    ]);
    panel
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;
    use crate::attendance::{Clock, Signer};
    use crate::error::{AttendanceField, GradeField};
    use crate::grade;
    use crate::models::{GradeForm, GradeInputs};

    fn report(labs: [f64; 3], absents: u32) -> Result<GradeReport, FormError> {
        Ok(grade::build_report(&GradeInputs { labs, absents }))
    }

    #[test]
    fn worked_example_markup() {
        let rendered = grade_result(&report([90.0, 85.0, 95.0], 1));
        assert_eq!(
            rendered.primary.to_markup(),
            "<html><center>Attendance Score: 90.00<br>Lab Work Average: 90.00<br>\
             Class Standing: 90.00</center></html>"
        );
        assert_eq!(
            rendered.secondary.to_markup(),
            "<html><center><b>Required Prelim Exam Score:</b><br>\
             To Pass (75): <font color='blue'>40.00</font><br>\
             For Perfect (100): <font color='orange'>Need 123.33 (Max grade: 93.00)</font>\
             </center></html>"
        );
    }

    #[test]
    fn invalid_input_clears_secondary_area() {
        let outcome = grade::on_submit(&GradeForm {
            lab1: "abc".to_string(),
            lab2: "85".to_string(),
            lab3: "95".to_string(),
            absents: "1".to_string(),
        });
        let rendered = grade_result(&outcome);
        assert_eq!(
            rendered.primary.to_markup(),
            "<html><center><font color='red'>Please enter valid numbers!</font></center></html>"
        );
        assert!(rendered.secondary.is_empty());
        assert_eq!(rendered.secondary.to_markup(), "");
    }

    #[test]
    fn cannot_pass_and_guaranteed_wording() {
        let hopeless = grade_result(&report([0.0, 0.0, 0.0], 10));
        let text = hopeless.secondary.to_plain();
        assert!(text.contains("To Pass (75): Cannot pass (need 250.00)"));
        assert!(text.contains("For Perfect (100): Need 333.33 (Max grade: 30.00)"));

        let strong = grade_result(&report([200.0, 200.0, 200.0], 0));
        let text = strong.secondary.to_plain();
        assert!(text.contains("To Pass (75): ALREADY PASSING! (need 0 or less)"));
        assert!(text.contains("For Perfect (100): GUARANTEED! (Max grade: 142.00)"));
    }

    #[test]
    fn reachable_perfect_shows_requirement_and_max_grade() {
        let rendered = grade_result(&report([100.0, 100.0, 100.0], 0));
        let markup = rendered.secondary.to_markup();
        assert!(markup.contains("To Pass (75): <font color='blue'>16.67</font>"));
        assert!(markup.contains("(Max grade: 100.00)"));
    }

    #[test]
    fn validation_dialog() {
        let dialog = attendance_dialog(&Err(FormError::MissingField {
            field: AttendanceField::Name,
        }));
        assert_eq!(dialog.title, "Validation Error");
        assert_eq!(dialog.kind, DialogKind::Warning);
        assert_eq!(
            dialog.body,
            "Please fill in all required fields (Name and Course/Year)."
        );
    }

    #[test]
    fn success_dialog_lists_all_fields() {
        let record = AttendanceRecord {
            name: "Avery Lee".to_string(),
            course_year: "BSIT 3".to_string(),
            time_in: "2026-10-18 08:30:05".to_string(),
            signature: Uuid::nil(),
        };
        let dialog = attendance_dialog(&Ok(record));
        assert_eq!(dialog.title, "Success");
        assert_eq!(dialog.kind, DialogKind::Information);
        assert_eq!(
            dialog.body,
            "Attendance Recorded Successfully!\n\n\
             Name: Avery Lee\n\
             Course/Year: BSIT 3\n\
             Time In: 2026-10-18 08:30:05\n\
             E-Signature: 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn dialog_markup_shows_user_text_literally() {
        let record = AttendanceRecord {
            name: "<i>Bob</i></html>x".to_string(),
            course_year: "R&D 'A'".to_string(),
            time_in: "2026-10-18 08:30:05".to_string(),
            signature: Uuid::nil(),
        };
        let markup = attendance_dialog(&Ok(record)).to_markup();
        assert!(markup.starts_with("<html><b>Success</b><br>"));
        assert!(markup.contains("Name: &lt;i&gt;Bob&lt;/i&gt;&lt;/html&gt;x<br>"));
        assert!(markup.contains("Course/Year: R&amp;D &#39;A&#39;<br>"));
        assert!(markup.ends_with("</html>"));
        assert_eq!(markup.matches("</html>").count(), 1);
    }

    #[test]
    fn panel_markup_escapes_span_text() {
        let panel = Panel {
            lines: vec![vec![Span::new("a < b", Tone::Error)]],
        };
        assert_eq!(
            panel.to_markup(),
            "<html><center><font color='red'>a &lt; b</font></center></html>"
        );
    }

    #[test]
    fn form_view_marks_generated_fields_read_only() {
        struct Fixed;
        impl Clock for Fixed {
            fn now(&self) -> chrono::NaiveDateTime {
                NaiveDate::from_ymd_opt(2026, 1, 2)
                    .and_then(|d| d.and_hms_opt(3, 4, 5))
                    .unwrap()
            }
        }
        impl Signer for Fixed {
            fn sign(&self) -> Uuid {
                Uuid::nil()
            }
        }

        let session = AttendanceSession::new(&Fixed, &Fixed);
        let text = attendance_form(&session).to_plain();
        assert!(text.starts_with("Attendance Tracking System"));
        assert!(text.contains("Time In:      2026-01-02 03:04:05 (read-only)"));
        assert!(text.contains("E-Signature:  00000000-0000-0000-0000-000000000000 (read-only)"));
    }

    #[test]
    fn error_display_is_independent_of_field() {
        let err = FormError::InvalidNumber {
            field: GradeField::Absents,
            value: "-1".to_string(),
        };
        let rendered = grade_result(&Err(err));
        assert_eq!(rendered.primary.to_plain(), "Please enter valid numbers!");
    }
}
