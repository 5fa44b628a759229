use shared::{ClassName, Notification, Student, StudentDraft, StudentUpdate};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::forms::StudentForm;
use super::resource_table::{delete_button, table_frame, PageProps};
use super::ui::options_from;
use crate::hooks::use_resource_table::use_resource_table;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
enum FormMode {
    Create,
    Edit(Student),
}

#[function_component(StudentTable)]
pub fn student_table(props: &PageProps) -> Html {
    let table = use_resource_table::<Student>(&props.api, props.page_size, &props.on_notify);
    let classes = use_state(Vec::<ClassName>::new);
    let form_mode = use_state(|| None::<FormMode>);
    let saving = use_state(|| false);

    {
        let api = props.api.clone();
        let classes = classes.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api.classes.get().await {
                    Ok(items) => classes.set(items),
                    Err(e) => Logger::warn_with_component(
                        "student-table",
                        &format!("Class names unavailable for the student form: {}", e),
                    ),
                }
            });
            || ()
        });
    }

    let open_create = {
        let form_mode = form_mode.clone();
        Callback::from(move |_: MouseEvent| form_mode.set(Some(FormMode::Create)))
    };

    let on_cancel = {
        let form_mode = form_mode.clone();
        Callback::from(move |_: ()| form_mode.set(None))
    };

    let on_submit = {
        let api = props.api.clone();
        let on_notify = props.on_notify.clone();
        let form_mode = form_mode.clone();
        let saving = saving.clone();
        let refresh = table.actions.refresh.clone();
        let replace = table.actions.replace.clone();

        Callback::from(move |draft: StudentDraft| {
            let Some(mode) = (*form_mode).clone() else {
                return;
            };
            let api = api.clone();
            let on_notify = on_notify.clone();
            let form_mode = form_mode.clone();
            let saving = saving.clone();
            let refresh = refresh.clone();
            let replace = replace.clone();

            spawn_local(async move {
                saving.set(true);

                let notification = match mode {
                    FormMode::Create => match draft.validate() {
                        Ok(student) => {
                            let result = api.students.create(&student).await;
                            if result.is_ok() {
                                refresh.emit(());
                                form_mode.set(None);
                            }
                            Notification::for_result(
                                &result,
                                "Student added",
                                "Failed to add student",
                            )
                        }
                        Err(_) => Notification::error("Please fill in every field"),
                    },
                    FormMode::Edit(original) => match draft.changes_from(&original) {
                        Ok(update) if update == StudentUpdate::default() => {
                            form_mode.set(None);
                            Notification::info("No changes to save")
                        }
                        Ok(update) => {
                            let result = api.students.update(original.student_id, &update).await;
                            if let Ok(student) = &result {
                                replace.emit(student.clone());
                                form_mode.set(None);
                            }
                            Notification::for_result(
                                &result,
                                "Student updated",
                                "Failed to update student",
                            )
                        }
                        Err(_) => Notification::error("Please fill in every field"),
                    },
                };

                saving.set(false);
                on_notify.emit(notification);
            });
        })
    };

    let offset = table.state.view.page_index() * table.state.view.page_size();
    let rows = html! {
        {for table.state.view.page().into_iter().enumerate().map(|(index, student)| {
            let on_edit = {
                let form_mode = form_mode.clone();
                let student = student.clone();
                Callback::from(move |_: MouseEvent| form_mode.set(Some(FormMode::Edit(student.clone()))))
            };

            html! {
                <tr key={student.student_id}>
                    <td>{(offset + index + 1).to_string()}</td>
                    <td>{&student.name}</td>
                    <td>{&student.father_name}</td>
                    <td>{&student.class_name}</td>
                    <td>{&student.gender}</td>
                    <td>{&student.age}</td>
                    <td>{&student.city}</td>
                    <td>{&student.father_contact}</td>
                    <td class="row-actions">
                        <button type="button" class="btn btn-secondary btn-small" onclick={on_edit}>
                            {"Edit"}
                        </button>
                        {delete_button(&table, student.student_id)}
                    </td>
                </tr>
            }
        })}
    };

    let form = match &*form_mode {
        Some(mode) => {
            let (title, initial) = match mode {
                FormMode::Create => ("Add Student", StudentDraft::default()),
                FormMode::Edit(student) => ("Edit Student", StudentDraft::from_student(student)),
            };
            html! {
                <StudentForm
                    title={title}
                    initial={initial}
                    classes={options_from(classes.as_slice())}
                    saving={*saving}
                    on_submit={on_submit}
                    on_cancel={on_cancel}
                />
            }
        }
        None => html! {},
    };

    html! {
        <div class="students-page">
            <div class="page-actions">
                <button type="button" class="btn btn-primary" onclick={open_create}>{"+ Create"}</button>
            </div>
            {table_frame(
                "Students",
                &["#", "Name", "Father Name", "Class", "Gender", "Age", "City", "Contact"],
                &table,
                rows,
            )}
            {form}
        </div>
    }
}
