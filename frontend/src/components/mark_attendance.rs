use shared::{AttendanceMark, AttendanceStatus, HeaderField, Notification, SchoolApi, SubmissionError};
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use super::ui::{options_from, ConfirmDialog, Loader, ReferenceSelect};
use crate::hooks::use_mark_attendance::{use_mark_attendance, MarkAttendanceActions};

#[derive(Properties, PartialEq)]
pub struct MarkAttendanceProps {
    pub api: SchoolApi,
    pub on_notify: Callback<Notification>,
}

fn inline_error(error: Option<&SubmissionError>, field: HeaderField) -> Option<AttrValue> {
    error
        .and_then(|e| e.field_message(field))
        .map(AttrValue::from)
}

fn unmarked_ids(error: Option<&SubmissionError>) -> &[i64] {
    match error {
        Some(SubmissionError::UnmarkedStudents { student_ids }) => student_ids,
        _ => &[],
    }
}

fn roster_row(index: usize, mark: &AttendanceMark, unmarked: bool, actions: &MarkAttendanceActions) -> Html {
    let student_id = mark.student_id;
    html! {
        <tr key={student_id} class={classes!(unmarked.then_some("row-unmarked"))}>
            <td>{(index + 1).to_string()}</td>
            <td>{&mark.student_name}</td>
            {for AttendanceStatus::ALL.into_iter().map(|status| {
                let onchange = {
                    let toggle = actions.toggle.clone();
                    Callback::from(move |e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        toggle.emit((student_id, status, input.checked()));
                    })
                };
                html! {
                    <td class="status-cell">
                        <input
                            type="checkbox"
                            aria-label={format!("{} {}", mark.student_name, status)}
                            checked={mark.is(status)}
                            {onchange}
                        />
                    </td>
                }
            })}
        </tr>
    }
}

#[function_component(MarkAttendance)]
pub fn mark_attendance(props: &MarkAttendanceProps) -> Html {
    let attendance = use_mark_attendance(&props.api, &props.on_notify);
    let state = &attendance.state;
    let actions = &attendance.actions;
    let workflow = &state.workflow;
    let error = state.error.as_ref();

    if state.lists_loading {
        return html! { <Loader label="Loading classes, times and teachers..." /> };
    }

    let on_date_change = {
        let on_date_change = actions.on_date_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_date_change.emit(input.value());
        })
    };

    let on_fetch = {
        let fetch_roster = actions.fetch_roster.clone();
        Callback::from(move |_: MouseEvent| fetch_roster.emit(()))
    };

    let on_submit = {
        let submit = actions.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit(());
        })
    };

    let date_error = inline_error(error, HeaderField::Date);
    let roster = workflow.roster();
    let unmarked = unmarked_ids(error);
    let roster_loading = workflow.roster_cascade().is_loading();

    html! {
        <form class="mark-attendance" onsubmit={on_submit}>
            <h2>{"Mark Attendance"}</h2>

            <div class="attendance-header">
                <div class={classes!("form-group", date_error.as_ref().map(|_| "has-error"))}>
                    <label for="attendance-date">{"Date"}</label>
                    <input
                        id="attendance-date"
                        type="date"
                        value={workflow.date().to_string()}
                        onchange={on_date_change}
                    />
                    {if let Some(message) = date_error.clone() {
                        html! { <span class="field-error">{message}</span> }
                    } else { html! {} }}
                </div>
                <ReferenceSelect
                    id="attendance-time"
                    label="Time"
                    options={options_from(workflow.times())}
                    selected={workflow.time_id()}
                    on_change={actions.on_time_change.clone()}
                    error={inline_error(error, HeaderField::Time)}
                />
                <ReferenceSelect
                    id="attendance-class"
                    label="Class"
                    options={options_from(workflow.classes())}
                    selected={workflow.class_id()}
                    on_change={actions.on_class_change.clone()}
                    error={inline_error(error, HeaderField::Class)}
                />
                <ReferenceSelect
                    id="attendance-teacher"
                    label="Teacher"
                    options={options_from(workflow.teachers())}
                    selected={workflow.teacher_id()}
                    on_change={actions.on_teacher_change.clone()}
                    error={inline_error(error, HeaderField::Teacher)}
                />
                <button
                    type="button"
                    class="btn btn-secondary"
                    onclick={on_fetch}
                    disabled={roster_loading}
                >
                    {"Fetch Students"}
                </button>
            </div>

            {match error {
                Some(e @ (SubmissionError::EmptyRoster | SubmissionError::UnmarkedStudents { .. })) => html! {
                    <div class="form-error">{e.to_string()}</div>
                },
                _ => html! {},
            }}

            {if roster_loading {
                html! { <Loader label="Loading students..." /> }
            } else if roster.is_empty() {
                html! { <div class="empty-state">{"Pick a class and fetch its students"}</div> }
            } else {
                html! {
                    <>
                        <div class="bulk-actions">
                            <span>{format!("{} of {} marked", workflow.roster_cascade().marked_count(), roster.len())}</span>
                            {for AttendanceStatus::ALL.into_iter().map(|status| {
                                let onclick = {
                                    let mark_all = actions.mark_all.clone();
                                    Callback::from(move |_: MouseEvent| mark_all.emit(status))
                                };
                                html! {
                                    <button type="button" class="btn btn-small" {onclick}>
                                        {format!("Mark all {}", status.label().to_lowercase())}
                                    </button>
                                }
                            })}
                        </div>
                        <table class="data-table roster-table">
                            <thead>
                                <tr>
                                    <th>{"#"}</th>
                                    <th>{"Student"}</th>
                                    {for AttendanceStatus::ALL.into_iter().map(|status| html! {
                                        <th>{status.label()}</th>
                                    })}
                                </tr>
                            </thead>
                            <tbody>
                                {for roster.iter().enumerate().map(|(index, mark)| {
                                    roster_row(index, mark, unmarked.contains(&mark.student_id), actions)
                                })}
                            </tbody>
                        </table>
                    </>
                }
            }}

            <div class="form-actions">
                <button
                    type="submit"
                    class="btn btn-primary"
                    disabled={workflow.is_submitting() || roster.is_empty()}
                >
                    {if workflow.is_submitting() { "Saving..." } else { "Submit Attendance" }}
                </button>
            </div>

            <ConfirmDialog
                is_open={state.pending_class.is_some()}
                title="Change class?"
                message="Changing the class discards the marks you have not submitted."
                confirm_label="Discard marks"
                on_confirm={actions.confirm_class_change.clone()}
                on_cancel={actions.cancel_class_change.clone()}
            />
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_inline_error_only_for_named_fields() {
        let error = SubmissionError::MissingFields(vec![HeaderField::Time]);

        assert_eq!(
            inline_error(Some(&error), HeaderField::Time),
            Some(AttrValue::from("Time is required"))
        );
        assert_eq!(inline_error(Some(&error), HeaderField::Class), None);
        assert_eq!(inline_error(None, HeaderField::Time), None);
    }

    #[wasm_bindgen_test]
    fn test_unmarked_ids_from_error() {
        let error = SubmissionError::UnmarkedStudents {
            student_ids: vec![101, 102],
        };

        assert_eq!(unmarked_ids(Some(&error)), &[101, 102]);
        assert!(unmarked_ids(Some(&SubmissionError::EmptyRoster)).is_empty());
    }
}
