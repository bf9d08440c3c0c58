use chrono::{Local, NaiveDateTime, Timelike};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{AttendanceField, FormError};
use crate::models::{AttendanceRecord, TIME_IN_FORMAT};

/// Source of the Time In value.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Source of E-Signature tokens.
pub trait Signer {
    fn sign(&self) -> Uuid;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

pub struct RandomSigner;

impl Signer for RandomSigner {
    fn sign(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// One open attendance form. Only name and course/year are editable; time in
/// and signature are set here, at creation or on clear.
#[derive(Debug, Clone)]
pub struct AttendanceSession {
    name: String,
    course_year: String,
    time_in: NaiveDateTime,
    signature: Uuid,
}

impl AttendanceSession {
    pub fn new(clock: &dyn Clock, signer: &dyn Signer) -> Self {
        let session = Self {
            name: String::new(),
            course_year: String::new(),
            time_in: clock.now(),
            signature: signer.sign(),
        };
        debug!(
            time_in = %session.time_in_display(),
            signature = %session.signature,
            "opened attendance session"
        );
        session
    }

    pub fn with_inputs(mut self, name: impl Into<String>, course_year: impl Into<String>) -> Self {
        self.name = name.into();
        self.course_year = course_year.into();
        self
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn set_course_year(&mut self, course_year: String) {
        self.course_year = course_year;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn course_year(&self) -> &str {
        &self.course_year
    }

    #[cfg(test)]
    pub fn time_in(&self) -> NaiveDateTime {
        self.time_in
    }

    pub fn time_in_display(&self) -> String {
        self.time_in.format(TIME_IN_FORMAT).to_string()
    }

    pub fn signature(&self) -> Uuid {
        self.signature
    }
}

/// Validates the editable fields and snapshots all four values. The session
/// itself is left untouched so the same entry can be submitted again.
pub fn on_submit(session: &AttendanceSession) -> Result<AttendanceRecord, FormError> {
    let missing = if session.name.trim().is_empty() {
        Some(AttendanceField::Name)
    } else if session.course_year.trim().is_empty() {
        Some(AttendanceField::CourseYear)
    } else {
        None
    };

    if let Some(field) = missing {
        warn!(?field, "attendance submit missing a required field");
        return Err(FormError::MissingField { field });
    }

    let record = AttendanceRecord {
        name: session.name.clone(),
        course_year: session.course_year.clone(),
        time_in: session.time_in_display(),
        signature: session.signature,
    };
    info!(
        name = %record.name.trim(),
        time_in = %record.time_in,
        signature = %record.signature,
        "attendance recorded"
    );
    Ok(record)
}

pub fn on_clear(
    mut session: AttendanceSession,
    clock: &dyn Clock,
    signer: &dyn Signer,
) -> AttendanceSession {
    session.name.clear();
    session.course_year.clear();
    session.time_in = clock.now();
    session.signature = signer.sign();
    info!(
        time_in = %session.time_in_display(),
        signature = %session.signature,
        "attendance form cleared"
    );
    session
}
