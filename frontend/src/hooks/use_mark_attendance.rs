use shared::{
    AttendanceStatus, AttendanceWorkflow, HeaderField, Notification, SchoolApi,
    SelectionChange, SubmissionError,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::use_reference_lists::use_reference_lists;
use crate::services::logging::Logger;

const COMPONENT: &str = "mark-attendance-hook";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkAttendanceState {
    pub workflow: AttendanceWorkflow,
    pub lists_loading: bool,
    /// Last validation failure, shown next to the header fields
    pub error: Option<SubmissionError>,
    /// Class the user picked while marks were unsaved, waiting for confirmation
    pub pending_class: Option<Option<i64>>,
}

impl MarkAttendanceState {
    /// Switch classes, or hold the choice for confirmation when marks on
    /// the loaded roster would be lost.
    pub fn request_class_change(&mut self, class_id: Option<i64>) {
        if self.workflow.has_unsaved_marks() && class_id != self.workflow.class_id() {
            self.pending_class = Some(class_id);
        } else {
            self.pending_class = None;
            self.workflow.select_class(class_id);
        }
    }

    /// Apply the held class change. Returns the number of marks dropped
    /// with the old roster, or `None` when no roster was replaced.
    pub fn confirm_pending_class(&mut self) -> Option<usize> {
        let class_id = self.pending_class.take()?;
        match self.workflow.select_class(class_id) {
            SelectionChange::Reset { discarded } => {
                Some(discarded.iter().filter(|row| row.status().is_some()).count())
            }
            SelectionChange::Selected | SelectionChange::Unchanged => None,
        }
    }

    pub fn cancel_pending_class(&mut self) {
        self.pending_class = None;
    }

    /// Apply one checkbox. Students that now have a status drop out of an
    /// unmarked-students error.
    pub fn toggle_mark(&mut self, student_id: i64, status: AttendanceStatus, checked: bool) {
        if !self.workflow.toggle(student_id, status, checked) {
            return;
        }
        if let Some(SubmissionError::UnmarkedStudents { student_ids }) = &mut self.error {
            let roster = self.workflow.roster();
            student_ids.retain(|id| {
                roster
                    .iter()
                    .find(|row| row.student_id == *id)
                    .map_or(true, |row| row.status().is_none())
            });
            if student_ids.is_empty() {
                self.error = None;
            }
        }
    }
}

pub struct UseMarkAttendanceResult {
    pub state: MarkAttendanceState,
    pub actions: MarkAttendanceActions,
}

#[derive(Clone, PartialEq)]
pub struct MarkAttendanceActions {
    pub on_date_change: Callback<String>,
    pub on_time_change: Callback<Option<i64>>,
    pub on_teacher_change: Callback<Option<i64>>,
    pub on_class_change: Callback<Option<i64>>,
    pub confirm_class_change: Callback<()>,
    pub cancel_class_change: Callback<()>,
    pub fetch_roster: Callback<()>,
    pub toggle: Callback<(i64, AttendanceStatus, bool)>,
    pub mark_all: Callback<AttendanceStatus>,
    pub submit: Callback<()>,
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// The workflow lives in a `RefCell` so async completions always see the
/// latest marks; every mutation is followed by a forced re-render.
#[hook]
pub fn use_mark_attendance(
    api: &SchoolApi,
    on_notify: &Callback<Notification>,
) -> UseMarkAttendanceResult {
    let page = use_mut_ref(|| {
        let mut workflow = AttendanceWorkflow::new();
        workflow.set_date(today());
        MarkAttendanceState {
            workflow,
            ..MarkAttendanceState::default()
        }
    });
    let update = use_force_update();
    let lists = use_reference_lists(api, on_notify);

    {
        let page = page.clone();
        let update = update.clone();
        use_effect_with(lists.clone(), move |lists| {
            {
                let mut page = page.borrow_mut();
                page.workflow.set_classes(lists.classes.clone());
                page.workflow.set_times(lists.times.clone());
                page.workflow.set_teachers(lists.teachers.clone());
            }
            update.force_update();
            || ()
        });
    }

    let mutate = {
        let page = page.clone();
        let update = update.clone();
        move |f: &dyn Fn(&mut MarkAttendanceState)| {
            f(&mut page.borrow_mut());
            update.force_update();
        }
    };

    let on_date_change = {
        let mutate = mutate.clone();
        use_callback((), move |date: String, _| {
            mutate(&|page| page.workflow.set_date(date.clone()));
        })
    };

    let on_time_change = {
        let mutate = mutate.clone();
        use_callback((), move |time_id: Option<i64>, _| {
            mutate(&|page| page.workflow.set_time(time_id));
        })
    };

    let on_teacher_change = {
        let mutate = mutate.clone();
        use_callback((), move |teacher_id: Option<i64>, _| {
            mutate(&|page| page.workflow.set_teacher(teacher_id));
        })
    };

    let on_class_change = {
        let mutate = mutate.clone();
        use_callback((), move |class_id: Option<i64>, _| {
            mutate(&|page| page.request_class_change(class_id));
        })
    };

    let confirm_class_change = {
        let page = page.clone();
        let update = update.clone();
        let on_notify = on_notify.clone();
        use_callback((), move |_: (), _| {
            let discarded = page.borrow_mut().confirm_pending_class();
            update.force_update();

            if let Some(marked) = discarded {
                on_notify.emit(Notification::info(format!(
                    "Discarded {} unsaved marks",
                    marked
                )));
            }
        })
    };

    let cancel_class_change = {
        let mutate = mutate.clone();
        use_callback((), move |_: (), _| {
            mutate(&|page| page.cancel_pending_class());
        })
    };

    let fetch_roster = {
        let api = api.clone();
        let page = page.clone();
        let update = update.clone();
        let on_notify = on_notify.clone();
        use_callback((), move |_: (), _| {
            let ticket = {
                let mut page = page.borrow_mut();
                match page.workflow.request_roster() {
                    Ok(ticket) => {
                        page.error = None;
                        Some(ticket)
                    }
                    Err(_) => {
                        page.error = Some(SubmissionError::MissingFields(vec![HeaderField::Class]));
                        None
                    }
                }
            };
            update.force_update();

            let Some(ticket) = ticket else {
                return;
            };

            let api = api.clone();
            let page = page.clone();
            let update = update.clone();
            let on_notify = on_notify.clone();
            spawn_local(async move {
                let result = api.students.get_by_class(ticket.key()).await;
                let notification = {
                    let mut page = page.borrow_mut();
                    match result {
                        Ok(students) => match page.workflow.roster_loaded(ticket, &students) {
                            Ok(()) if students.is_empty() => {
                                Some(Notification::info("No students found in this class"))
                            }
                            Ok(()) => None,
                            Err(e) => {
                                Logger::debug_with_component(
                                    COMPONENT,
                                    &format!("Dropped roster for class {}: {}", ticket.key(), e),
                                );
                                None
                            }
                        },
                        Err(e) => {
                            page.workflow.roster_failed(ticket);
                            Some(Notification::error(format!("Failed to load students: {}", e)))
                        }
                    }
                };
                update.force_update();

                if let Some(notification) = notification {
                    on_notify.emit(notification);
                }
            });
        })
    };

    let toggle = {
        let mutate = mutate.clone();
        use_callback((), move |(student_id, status, checked): (i64, AttendanceStatus, bool), _| {
            mutate(&|page| page.toggle_mark(student_id, status, checked));
        })
    };

    let mark_all = {
        let mutate = mutate.clone();
        use_callback((), move |status: AttendanceStatus, _| {
            mutate(&|page| {
                page.workflow.mark_all(status);
                page.error = None;
            });
        })
    };

    let submit = {
        let api = api.clone();
        let page = page.clone();
        let update = update.clone();
        let on_notify = on_notify.clone();
        use_callback((), move |_: (), _| {
            let request = {
                let mut page = page.borrow_mut();
                match page.workflow.begin_submit() {
                    Ok(request) => {
                        page.error = None;
                        Some(request)
                    }
                    Err(SubmissionError::AlreadySubmitting) => None,
                    Err(e) => {
                        page.error = Some(e);
                        None
                    }
                }
            };
            update.force_update();

            let Some(request) = request else {
                return;
            };

            let api = api.clone();
            let page = page.clone();
            let update = update.clone();
            let on_notify = on_notify.clone();
            spawn_local(async move {
                let result = api.attendance.create_bulk(&request).await;
                let notification = page.borrow_mut().workflow.finish_submit(&result);
                update.force_update();
                on_notify.emit(notification);
            });
        })
    };

    let mut state = page.borrow().clone();
    state.lists_loading = lists.loading();

    UseMarkAttendanceResult {
        state,
        actions: MarkAttendanceActions {
            on_date_change,
            on_time_change,
            on_teacher_change,
            on_class_change,
            confirm_class_change,
            cancel_class_change,
            fetch_roster,
            toggle,
            mark_all,
            submit,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Student;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn student(id: i64) -> Student {
        serde_json::from_value(serde_json::json!({
            "student_id": id,
            "student_name": format!("Student {}", id),
            "student_date_of_birth": "2012-04-02T00:00:00",
            "student_age": "12",
            "student_gender": "Female",
            "student_education": "Grade 7",
            "class_name": "Class 8",
            "student_city": "Karachi",
            "student_address": "Street 9",
            "father_name": "Tom",
            "father_occupation": "Engineer",
            "father_cnic": "42101-1234567-1",
            "father_cast_name": "Carter",
            "father_contact": "0300-1234567"
        }))
        .unwrap()
    }

    fn state_with_roster(ids: &[i64]) -> MarkAttendanceState {
        let mut workflow = AttendanceWorkflow::new();
        workflow.select_class(Some(1));
        let ticket = workflow.request_roster().unwrap();
        let students: Vec<Student> = ids.iter().copied().map(student).collect();
        workflow.roster_loaded(ticket, &students).unwrap();
        MarkAttendanceState {
            workflow,
            ..MarkAttendanceState::default()
        }
    }

    #[wasm_bindgen_test]
    fn test_today_is_iso_date() {
        let date = today();
        assert!(chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok());
    }

    #[wasm_bindgen_test]
    fn test_class_change_without_marks_is_immediate() {
        let mut state = state_with_roster(&[101, 102]);

        state.request_class_change(Some(2));

        assert_eq!(state.pending_class, None);
        assert_eq!(state.workflow.class_id(), Some(2));
        assert!(state.workflow.roster().is_empty());
    }

    #[wasm_bindgen_test]
    fn test_class_change_with_marks_waits_for_confirmation() {
        let mut state = state_with_roster(&[101, 102]);
        state.toggle_mark(101, AttendanceStatus::Present, true);

        state.request_class_change(Some(2));
        assert_eq!(state.pending_class, Some(Some(2)));
        assert_eq!(state.workflow.class_id(), Some(1));

        assert_eq!(state.confirm_pending_class(), Some(1));
        assert_eq!(state.pending_class, None);
        assert_eq!(state.workflow.class_id(), Some(2));
        assert_eq!(state.confirm_pending_class(), None);
    }

    #[wasm_bindgen_test]
    fn test_cancelled_class_change_keeps_marks() {
        let mut state = state_with_roster(&[101, 102]);
        state.toggle_mark(102, AttendanceStatus::Sick, true);
        state.request_class_change(None);

        state.cancel_pending_class();

        assert_eq!(state.pending_class, None);
        assert_eq!(state.workflow.class_id(), Some(1));
        assert_eq!(state.workflow.roster()[1].status(), Some(AttendanceStatus::Sick));
    }

    #[wasm_bindgen_test]
    fn test_reselecting_same_class_never_asks() {
        let mut state = state_with_roster(&[101]);
        state.toggle_mark(101, AttendanceStatus::Late, true);

        state.request_class_change(Some(1));

        assert_eq!(state.pending_class, None);
        assert_eq!(state.workflow.roster()[0].status(), Some(AttendanceStatus::Late));
    }

    #[wasm_bindgen_test]
    fn test_marking_students_shrinks_unmarked_error() {
        let mut state = state_with_roster(&[101, 102, 103]);
        state.error = Some(SubmissionError::UnmarkedStudents {
            student_ids: vec![101, 102, 103],
        });

        state.toggle_mark(102, AttendanceStatus::Absent, true);
        assert_eq!(
            state.error,
            Some(SubmissionError::UnmarkedStudents {
                student_ids: vec![101, 103]
            })
        );

        state.toggle_mark(101, AttendanceStatus::Present, true);
        state.toggle_mark(103, AttendanceStatus::Present, true);
        assert_eq!(state.error, None);
    }

    #[wasm_bindgen_test]
    fn test_toggle_for_unknown_student_keeps_error() {
        let mut state = state_with_roster(&[101]);
        state.error = Some(SubmissionError::MissingFields(vec![HeaderField::Date]));

        state.toggle_mark(999, AttendanceStatus::Present, true);

        assert_eq!(
            state.error,
            Some(SubmissionError::MissingFields(vec![HeaderField::Date]))
        );
    }
}
