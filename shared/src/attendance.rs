//! Attendance marking: reference lists, the class roster, per-student
//! status and the bulk submission built from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::ApiResult;
use crate::cascade::{CascadeError, FetchTicket, RosterCascade, SelectionChange};
use crate::models::{ClassName, ClassTiming, Student, Teacher};
use crate::notification::Notification;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Sick,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
        AttendanceStatus::Sick,
    ];

    /// Id of the matching row in the backend's attendance value table
    pub fn value_id(self) -> u8 {
        match self {
            AttendanceStatus::Present => 1,
            AttendanceStatus::Absent => 2,
            AttendanceStatus::Late => 3,
            AttendanceStatus::Sick => 4,
        }
    }

    pub fn from_value_id(value_id: u8) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.value_id() == value_id)
    }

    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
            AttendanceStatus::Sick => "Sick",
        }
    }

    fn index(self) -> usize {
        (self.value_id() - 1) as usize
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One roster row. At most one status is set at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceMark {
    pub student_id: i64,
    pub student_name: String,
    status: Option<AttendanceStatus>,
}

impl AttendanceMark {
    pub fn new(student_id: i64, student_name: impl Into<String>) -> Self {
        Self {
            student_id,
            student_name: student_name.into(),
            status: None,
        }
    }

    pub fn from_student(student: &Student) -> Self {
        Self::new(student.student_id, student.name.clone())
    }

    pub fn status(&self) -> Option<AttendanceStatus> {
        self.status
    }

    pub fn is(&self, status: AttendanceStatus) -> bool {
        self.status == Some(status)
    }

    /// Present/absent/late/sick checkbox values, in that order
    pub fn flags(&self) -> [bool; 4] {
        let mut flags = [false; 4];
        if let Some(status) = self.status {
            flags[status.index()] = true;
        }
        flags
    }

    /// Checking a status clears the other three; unchecking the current
    /// status leaves the row unset.
    pub fn set(&mut self, status: AttendanceStatus, checked: bool) {
        if checked {
            self.status = Some(status);
        } else if self.status == Some(status) {
            self.status = None;
        }
    }

    pub fn clear(&mut self) {
        self.status = None;
    }
}

/// Header fields the user must fill before fetching or submitting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Date,
    Time,
    Class,
    Teacher,
}

impl HeaderField {
    pub fn required_message(self) -> &'static str {
        match self {
            HeaderField::Date => "Date is required",
            HeaderField::Time => "Time is required",
            HeaderField::Class => "Class is required",
            HeaderField::Teacher => "Teacher is required",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    #[error("{}", missing_message(.0))]
    MissingFields(Vec<HeaderField>),
    #[error("Date must be in YYYY-MM-DD format, got '{0}'")]
    InvalidDate(String),
    #[error("Load the class roster before submitting attendance")]
    EmptyRoster,
    #[error("{} student(s) have no attendance status", .student_ids.len())]
    UnmarkedStudents { student_ids: Vec<i64> },
    #[error("Attendance is already being submitted")]
    AlreadySubmitting,
}

fn missing_message(fields: &[HeaderField]) -> String {
    fields
        .iter()
        .map(|field| field.required_message())
        .collect::<Vec<_>>()
        .join(", ")
}

impl SubmissionError {
    /// Inline message for one header field, if this error concerns it
    pub fn field_message(&self, field: HeaderField) -> Option<&'static str> {
        match self {
            SubmissionError::MissingFields(fields) if fields.contains(&field) => {
                Some(field.required_message())
            }
            SubmissionError::InvalidDate(_) if field == HeaderField::Date => {
                Some("Date must be in YYYY-MM-DD format")
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    #[serde(rename = "attendance_date")]
    pub date: String,
    #[serde(rename = "attendance_time_id")]
    pub time_id: i64,
    #[serde(rename = "class_name_id")]
    pub class_id: i64,
    #[serde(rename = "teacher_name_id")]
    pub teacher_id: i64,
    pub student_id: i64,
    #[serde(rename = "attendance_value_id")]
    pub value_id: u8,
}

/// Body of the bulk attendance endpoint: one entry per roster row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAttendanceRequest {
    #[serde(rename = "attendance_date")]
    pub date: String,
    #[serde(rename = "attendance_time_id")]
    pub time_id: i64,
    #[serde(rename = "class_name_id")]
    pub class_id: i64,
    #[serde(rename = "teacher_name_id")]
    pub teacher_id: i64,
    pub attendances: Vec<AttendanceEntry>,
}

/// View state of the mark-attendance page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceWorkflow {
    classes: Vec<ClassName>,
    times: Vec<ClassTiming>,
    teachers: Vec<Teacher>,
    date: String,
    time_id: Option<i64>,
    teacher_id: Option<i64>,
    roster: RosterCascade,
    /// Request body sent by the submission still awaiting its response
    in_flight: Option<BulkAttendanceRequest>,
}

impl AttendanceWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_classes(&mut self, classes: Vec<ClassName>) {
        self.classes = classes;
    }

    pub fn set_times(&mut self, times: Vec<ClassTiming>) {
        self.times = times;
    }

    pub fn set_teachers(&mut self, teachers: Vec<Teacher>) {
        self.teachers = teachers;
    }

    pub fn classes(&self) -> &[ClassName] {
        &self.classes
    }

    pub fn times(&self) -> &[ClassTiming] {
        &self.times
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    pub fn set_time(&mut self, time_id: Option<i64>) {
        self.time_id = time_id;
    }

    pub fn set_teacher(&mut self, teacher_id: Option<i64>) {
        self.teacher_id = teacher_id;
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time_id(&self) -> Option<i64> {
        self.time_id
    }

    pub fn teacher_id(&self) -> Option<i64> {
        self.teacher_id
    }

    pub fn class_id(&self) -> Option<i64> {
        self.roster.selected_key()
    }

    pub fn roster_cascade(&self) -> &RosterCascade {
        &self.roster
    }

    /// Change the class. Switching to a different class drops the loaded
    /// roster together with every mark on it.
    pub fn select_class(&mut self, class_id: Option<i64>) -> SelectionChange<AttendanceMark> {
        let change = match class_id {
            Some(class_id) => self.roster.select(class_id),
            None => self.roster.clear(),
        };
        if let SelectionChange::Reset { discarded } = &change {
            let marked = discarded.iter().filter(|row| row.status().is_some()).count();
            log::info!(
                "Class changed, discarded roster of {} students ({} marked)",
                discarded.len(),
                marked
            );
        }
        change
    }

    pub fn request_roster(&mut self) -> Result<FetchTicket, CascadeError> {
        self.roster.request()
    }

    /// Install the fetched roster with every row unset.
    pub fn roster_loaded(
        &mut self,
        ticket: FetchTicket,
        students: &[Student],
    ) -> Result<(), CascadeError> {
        let rows = students.iter().map(AttendanceMark::from_student).collect();
        self.roster.loaded(ticket, rows)
    }

    pub fn roster_failed(&mut self, ticket: FetchTicket) {
        self.roster.failed(ticket);
    }

    pub fn roster(&self) -> &[AttendanceMark] {
        self.roster.items().unwrap_or(&[])
    }

    pub fn has_unsaved_marks(&self) -> bool {
        self.roster.has_unsaved_marks()
    }

    /// Returns false when the student is not on the loaded roster.
    pub fn toggle(&mut self, student_id: i64, status: AttendanceStatus, checked: bool) -> bool {
        let Some(rows) = self.roster.items_mut() else {
            return false;
        };
        match rows.iter_mut().find(|row| row.student_id == student_id) {
            Some(row) => {
                row.set(status, checked);
                true
            }
            None => false,
        }
    }

    pub fn mark_all(&mut self, status: AttendanceStatus) {
        if let Some(rows) = self.roster.items_mut() {
            rows.iter_mut().for_each(|row| row.set(status, true));
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Header fields needed to fetch the roster and to submit
    pub fn missing_fields(&self) -> Vec<HeaderField> {
        let mut missing = Vec::new();
        if self.date.trim().is_empty() {
            missing.push(HeaderField::Date);
        }
        if self.time_id.is_none() {
            missing.push(HeaderField::Time);
        }
        if self.class_id().is_none() {
            missing.push(HeaderField::Class);
        }
        if self.teacher_id.is_none() {
            missing.push(HeaderField::Teacher);
        }
        missing
    }

    /// Validate the header and roster and build the request body.
    pub fn build_submission(&self) -> Result<BulkAttendanceRequest, SubmissionError> {
        let (Some(time_id), Some(class_id), Some(teacher_id), false) = (
            self.time_id,
            self.class_id(),
            self.teacher_id,
            self.date.trim().is_empty(),
        ) else {
            return Err(SubmissionError::MissingFields(self.missing_fields()));
        };

        let date = self.date.trim();
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| SubmissionError::InvalidDate(date.to_string()))?;

        let rows = self.roster();
        if rows.is_empty() {
            return Err(SubmissionError::EmptyRoster);
        }

        let unmarked: Vec<i64> = rows
            .iter()
            .filter(|row| row.status().is_none())
            .map(|row| row.student_id)
            .collect();
        if !unmarked.is_empty() {
            return Err(SubmissionError::UnmarkedStudents {
                student_ids: unmarked,
            });
        }

        let attendances = rows
            .iter()
            .filter_map(|row| {
                row.status().map(|status| AttendanceEntry {
                    date: date.to_string(),
                    time_id,
                    class_id,
                    teacher_id,
                    student_id: row.student_id,
                    value_id: status.value_id(),
                })
            })
            .collect();

        Ok(BulkAttendanceRequest {
            date: date.to_string(),
            time_id,
            class_id,
            teacher_id,
            attendances,
        })
    }

    /// Build the submission and mark it in flight. Fails while an earlier
    /// submission has not finished.
    pub fn begin_submit(&mut self) -> Result<BulkAttendanceRequest, SubmissionError> {
        if self.is_submitting() {
            return Err(SubmissionError::AlreadySubmitting);
        }
        let request = self.build_submission()?;
        log::info!(
            "Submitting attendance for {} students (class {}, {})",
            request.attendances.len(),
            request.class_id,
            request.date
        );
        self.in_flight = Some(request.clone());
        Ok(request)
    }

    /// Settle the in-flight submission and produce its one notification.
    /// On success the submitted marks are cleared so the same roster can be
    /// marked for another time slot. Rows changed after submitting, or a
    /// roster for another class, are left alone.
    pub fn finish_submit<T>(&mut self, result: &ApiResult<T>) -> Notification {
        let submitted = self.in_flight.take();
        match result {
            Ok(_) => {
                let Some(request) = submitted else {
                    return Notification::success("Attendance saved");
                };
                if self.class_id() == Some(request.class_id) {
                    self.clear_submitted(&request.attendances);
                }
                Notification::success(format!(
                    "Attendance saved for {} students",
                    request.attendances.len()
                ))
            }
            Err(e) => {
                log::warn!("Attendance submission failed: {}", e);
                Notification::error(format!("Failed to save attendance: {}", e))
            }
        }
    }

    fn clear_submitted(&mut self, entries: &[AttendanceEntry]) {
        let Some(rows) = self.roster.items_mut() else {
            return;
        };
        for row in rows.iter_mut() {
            let unchanged = entries.iter().any(|entry| {
                entry.student_id == row.student_id
                    && row.status().map(AttendanceStatus::value_id) == Some(entry.value_id)
            });
            if unchanged {
                row.clear();
            }
        }
    }
}
