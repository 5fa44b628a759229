use std::rc::Rc;

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use shared::api::mock::MockBackend;
use shared::api::{FixedClock, Gateway, HttpResponse, Method, StaticSession};
use shared::{
    AttendanceStatus, AttendanceWorkflow, CascadeError, NotificationKind, SchoolApi,
    SubmissionError,
};

fn student_json(id: i64, name: &str) -> Value {
    json!({
        "student_id": id,
        "student_name": name,
        "student_date_of_birth": "2012-04-02T00:00:00",
        "student_age": "12",
        "student_gender": "Male",
        "student_education": "Grade 7",
        "class_name": "Class 8",
        "student_city": "Karachi",
        "student_address": "Street 9",
        "father_name": "Tom",
        "father_occupation": "Engineer",
        "father_cnic": "42101-1234567-1",
        "father_cast_name": "Carter",
        "father_contact": "0300-1234567"
    })
}

fn school(backend: &Rc<MockBackend>) -> SchoolApi {
    backend.on(
        Method::Get,
        "/class_name/class-names-all/",
        200,
        json!([{"class_name_id": 1, "class_name": "Class 8"}]),
    );
    backend.on(
        Method::Get,
        "/attendance_time/attendance-values-all/",
        200,
        json!([{"attendance_time_id": 2, "attendance_time": "Morning"}]),
    );
    backend.on(
        Method::Get,
        "/teacher_name/teacher-names-all/",
        200,
        json!([{"teacher_name_id": 1, "teacher_name": "Ms. Khan"}]),
    );
    backend.on_with(Method::Get, "/students/by_class_id/", |request| {
        match request.query_param("class_id") {
            Some("1") => HttpResponse::new(
                200,
                json!([student_json(101, "Ben Carter"), student_json(102, "Ava Stone")])
                    .to_string(),
            ),
            _ => HttpResponse::new(
                404,
                json!({"detail": "No students found for the specified class"}).to_string(),
            ),
        }
    });

    let clock = Utc.with_ymd_and_hms(2025, 1, 21, 8, 30, 0).unwrap();
    let gateway = Gateway::new(
        "http://localhost:8000/",
        backend.clone(),
        Rc::new(StaticSession::with_token("token-123")),
    )
    .with_clock(Rc::new(FixedClock(clock)));
    SchoolApi::new(gateway)
}

async fn load_reference_lists(api: &SchoolApi, workflow: &mut AttendanceWorkflow) {
    workflow.set_classes(api.classes.get().await.unwrap());
    workflow.set_times(api.timings.get().await.unwrap());
    workflow.set_teachers(api.teachers.get().await.unwrap());
}

#[tokio::test]
async fn test_mark_and_submit_attendance() {
    let backend = Rc::new(MockBackend::new());
    backend.on(
        Method::Post,
        "/mark_attendance/add_bulk_attendance/",
        200,
        json!([]),
    );
    let api = school(&backend);
    let mut workflow = AttendanceWorkflow::new();

    load_reference_lists(&api, &mut workflow).await;
    assert_eq!(workflow.classes().len(), 1);
    assert_eq!(workflow.times()[0].label, "Morning");

    workflow.set_date("2025-01-21");
    workflow.set_time(Some(2));
    workflow.set_teacher(Some(1));
    workflow.select_class(Some(1));

    let ticket = workflow.request_roster().unwrap();
    let students = api.students.get_by_class(ticket.key()).await.unwrap();
    workflow.roster_loaded(ticket, &students).unwrap();
    assert_eq!(workflow.roster().len(), 2);

    workflow.toggle(101, AttendanceStatus::Present, true);
    workflow.toggle(102, AttendanceStatus::Absent, true);

    let request = workflow.begin_submit().unwrap();
    let result = api.attendance.create_bulk(&request).await;
    let notification = workflow.finish_submit(&result);
    assert_eq!(notification.kind, NotificationKind::Success);

    let posted = backend.requests_to(Method::Post, "/mark_attendance/add_bulk_attendance/");
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].header("authorization"), Some("Bearer token-123"));

    let body = posted[0].json_body();
    assert_eq!(body["attendance_date"], "2025-01-21");
    assert_eq!(body["attendance_time_id"], 2);
    assert_eq!(body["class_name_id"], 1);
    assert_eq!(body["teacher_name_id"], 1);
    assert_eq!(body["created_at"], "2025-01-21T08:30:00.000Z");

    let entries = body["attendances"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["student_id"], 101);
    assert_eq!(entries[0]["attendance_value_id"], 1);
    assert_eq!(entries[1]["student_id"], 102);
    assert_eq!(entries[1]["attendance_value_id"], 2);
}

#[tokio::test]
async fn test_roster_query_uses_selected_class() {
    let backend = Rc::new(MockBackend::new());
    let api = school(&backend);
    let mut workflow = AttendanceWorkflow::new();

    assert_eq!(workflow.request_roster(), Err(CascadeError::NothingSelected));

    workflow.select_class(Some(1));
    let ticket = workflow.request_roster().unwrap();
    api.students.get_by_class(ticket.key()).await.unwrap();

    let request = backend.last_request().unwrap();
    assert_eq!(request.query_param("class_id"), Some("1"));
}

#[tokio::test]
async fn test_late_roster_for_previous_class_is_dropped() {
    let backend = Rc::new(MockBackend::new());
    let api = school(&backend);
    let mut workflow = AttendanceWorkflow::new();

    workflow.select_class(Some(1));
    let first = workflow.request_roster().unwrap();
    workflow.select_class(Some(2));
    let second = workflow.request_roster().unwrap();

    let second_roster = api.students.get_by_class(second.key()).await.unwrap();
    workflow.roster_loaded(second, &second_roster).unwrap();

    let first_roster = api.students.get_by_class(first.key()).await.unwrap();
    assert_eq!(
        workflow.roster_loaded(first, &first_roster),
        Err(CascadeError::StaleResponse)
    );
    assert!(workflow.roster().is_empty());
    assert_eq!(workflow.class_id(), Some(2));
}

#[tokio::test]
async fn test_rejected_submission_keeps_marks() {
    let backend = Rc::new(MockBackend::new());
    backend.on(
        Method::Post,
        "/mark_attendance/add_bulk_attendance/",
        400,
        json!({"detail": "Attendance already marked"}),
    );
    let api = school(&backend);
    let mut workflow = AttendanceWorkflow::new();
    workflow.set_date("2025-01-21");
    workflow.set_time(Some(2));
    workflow.set_teacher(Some(1));
    workflow.select_class(Some(1));
    let ticket = workflow.request_roster().unwrap();
    let students = api.students.get_by_class(ticket.key()).await.unwrap();
    workflow.roster_loaded(ticket, &students).unwrap();
    workflow.mark_all(AttendanceStatus::Present);

    let request = workflow.begin_submit().unwrap();
    let result = api.attendance.create_bulk(&request).await;
    let notification = workflow.finish_submit(&result);

    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(
        notification.message,
        "Failed to save attendance: Server error 400: Attendance already marked"
    );
    assert!(workflow.has_unsaved_marks());
}

#[tokio::test]
async fn test_nothing_is_sent_for_incomplete_roster() {
    let backend = Rc::new(MockBackend::new());
    let api = school(&backend);
    let mut workflow = AttendanceWorkflow::new();
    workflow.set_date("2025-01-21");
    workflow.set_time(Some(2));
    workflow.set_teacher(Some(1));
    workflow.select_class(Some(1));
    let ticket = workflow.request_roster().unwrap();
    let students = api.students.get_by_class(ticket.key()).await.unwrap();
    workflow.roster_loaded(ticket, &students).unwrap();
    workflow.toggle(101, AttendanceStatus::Late, true);

    assert_eq!(
        workflow.begin_submit(),
        Err(SubmissionError::UnmarkedStudents {
            student_ids: vec![102]
        })
    );
    assert!(!workflow.is_submitting());
    assert!(backend
        .requests_to(Method::Post, "/mark_attendance/add_bulk_attendance/")
        .is_empty());
}

#[tokio::test]
async fn test_empty_class_loads_an_empty_roster() {
    let backend = Rc::new(MockBackend::new());
    let api = school(&backend);
    let mut workflow = AttendanceWorkflow::new();
    workflow.select_class(Some(7));

    let ticket = workflow.request_roster().unwrap();
    let students = api.students.get_by_class(ticket.key()).await.unwrap();
    workflow.roster_loaded(ticket, &students).unwrap();

    assert!(workflow.roster_cascade().is_loaded());
    assert!(workflow.roster().is_empty());
    assert_eq!(workflow.begin_submit(), Err(SubmissionError::MissingFields(vec![
        shared::HeaderField::Date,
        shared::HeaderField::Time,
        shared::HeaderField::Teacher,
    ])));
}

#[tokio::test]
async fn test_class_change_during_submit_keeps_new_roster() {
    let backend = Rc::new(MockBackend::new());
    backend.on(
        Method::Post,
        "/mark_attendance/add_bulk_attendance/",
        200,
        json!([]),
    );
    let api = school(&backend);
    let mut workflow = AttendanceWorkflow::new();
    workflow.set_date("2025-01-21");
    workflow.set_time(Some(2));
    workflow.set_teacher(Some(1));
    workflow.select_class(Some(1));
    let ticket = workflow.request_roster().unwrap();
    let students = api.students.get_by_class(ticket.key()).await.unwrap();
    workflow.roster_loaded(ticket, &students).unwrap();
    workflow.mark_all(AttendanceStatus::Present);

    let request = workflow.begin_submit().unwrap();
    workflow.select_class(Some(1));
    workflow.toggle(102, AttendanceStatus::Sick, true);
    let result = api.attendance.create_bulk(&request).await;
    let notification = workflow.finish_submit(&result);

    assert_eq!(notification.message, "Attendance saved for 2 students");
    assert_eq!(workflow.roster()[0].status(), None);
    assert_eq!(workflow.roster()[1].status(), Some(AttendanceStatus::Sick));
}
