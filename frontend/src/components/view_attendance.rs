use shared::{AttendanceRecord, AttendanceStatus, Notification};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::resource_table::{delete_button, table_frame, PageProps};
use crate::hooks::use_resource_table::use_resource_table;

/// Status shown in the row's select. Stored values are labels such as
/// "Present"; matching ignores case.
fn current_status(record: &AttendanceRecord) -> Option<AttendanceStatus> {
    AttendanceStatus::ALL
        .into_iter()
        .find(|status| status.label().eq_ignore_ascii_case(record.value.trim()))
}

#[function_component(ViewAttendance)]
pub fn view_attendance(props: &PageProps) -> Html {
    let table = use_resource_table::<AttendanceRecord>(&props.api, props.page_size, &props.on_notify);

    let on_status_change = {
        let api = props.api.clone();
        let on_notify = props.on_notify.clone();
        let replace = table.actions.replace.clone();
        Callback::from(move |(attendance_id, status): (i64, AttendanceStatus)| {
            let api = api.clone();
            let on_notify = on_notify.clone();
            let replace = replace.clone();
            spawn_local(async move {
                let result = api.attendance.update_status(attendance_id, status).await;
                if let Ok(record) = &result {
                    replace.emit(record.clone());
                }
                on_notify.emit(Notification::for_result(
                    &result,
                    &format!("Attendance marked {}", status),
                    "Failed to update attendance",
                ));
            });
        })
    };

    let offset = table.state.view.page_index() * table.state.view.page_size();
    let rows = html! {
        {for table.state.view.page().into_iter().enumerate().map(|(index, record)| {
            let current = current_status(record);
            let onchange = {
                let on_status_change = on_status_change.clone();
                let attendance_id = record.attendance_id;
                Callback::from(move |e: Event| {
                    let select: HtmlSelectElement = e.target_unchecked_into();
                    let status = select
                        .value()
                        .parse::<u8>()
                        .ok()
                        .and_then(AttendanceStatus::from_value_id);
                    if let Some(status) = status {
                        on_status_change.emit((attendance_id, status));
                    }
                })
            };

            html! {
                <tr key={record.attendance_id}>
                    <td>{(offset + index + 1).to_string()}</td>
                    <td>{&record.attendance_date}</td>
                    <td>{&record.time}</td>
                    <td>{&record.class_name}</td>
                    <td>{&record.teacher}</td>
                    <td>{&record.student}</td>
                    <td>{&record.father_name}</td>
                    <td>
                        <select class="status-select" {onchange}>
                            {if current.is_none() {
                                html! { <option value="" selected=true>{&record.value}</option> }
                            } else { html! {} }}
                            {for AttendanceStatus::ALL.into_iter().map(|status| html! {
                                <option
                                    value={status.value_id().to_string()}
                                    selected={current == Some(status)}
                                >
                                    {status.label()}
                                </option>
                            })}
                        </select>
                    </td>
                    <td>{delete_button(&table, record.attendance_id)}</td>
                </tr>
            }
        })}
    };

    table_frame(
        "Attendance Records",
        &["#", "Date", "Time", "Class", "Teacher", "Student", "Father Name", "Status"],
        &table,
        rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn record(value: &str) -> AttendanceRecord {
        AttendanceRecord {
            attendance_id: 1,
            attendance_date: "2025-01-21".to_string(),
            time: "Morning".to_string(),
            class_name: "Class 8".to_string(),
            teacher: "Ms. Khan".to_string(),
            student: "Ben Carter".to_string(),
            father_name: "Tom".to_string(),
            value: value.to_string(),
        }
    }

    #[wasm_bindgen_test]
    fn test_current_status_matches_label() {
        assert_eq!(current_status(&record("Present")), Some(AttendanceStatus::Present));
        assert_eq!(current_status(&record(" sick ")), Some(AttendanceStatus::Sick));
        assert_eq!(current_status(&record("Holiday")), None);
    }
}
