use shared::{FormErrors, StudentDraft, StudentField};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::ui::SelectOption;

const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

#[derive(Properties, PartialEq)]
pub struct StudentFormProps {
    pub title: AttrValue,
    pub initial: StudentDraft,
    /// Class names to choose from
    pub classes: Vec<SelectOption>,
    pub saving: bool,
    pub on_submit: Callback<StudentDraft>,
    pub on_cancel: Callback<()>,
}

fn input_type(field: StudentField) -> &'static str {
    match field {
        StudentField::DateOfBirth => "date",
        StudentField::Age => "number",
        StudentField::FatherContact => "tel",
        _ => "text",
    }
}

#[function_component(StudentForm)]
pub fn student_form(props: &StudentFormProps) -> Html {
    let draft = use_state(|| props.initial.clone());
    let errors = use_state(FormErrors::default);

    let on_field = {
        let draft = draft.clone();
        let errors = errors.clone();
        Callback::from(move |(field, value): (StudentField, String)| {
            let mut next = (*draft).clone();
            next.set(field, value);
            if !errors.is_empty() {
                errors.set(next.errors());
            }
            draft.set(next);
        })
    };

    let onsubmit = {
        let draft = draft.clone();
        let errors = errors.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let found = draft.errors();
            if found.is_empty() {
                on_submit.emit((*draft).clone());
            }
            errors.set(found);
        })
    };

    let on_cancel_click = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    let field_view = |field: StudentField| -> Html {
        let id = format!("student-{:?}", field).to_lowercase();
        let value = draft.get(field).to_string();
        let error = errors.message(field);

        let control = match field {
            StudentField::ClassName => {
                let on_field = on_field.clone();
                let onchange = Callback::from(move |e: Event| {
                    let select: HtmlSelectElement = e.target_unchecked_into();
                    on_field.emit((field, select.value()));
                });
                html! {
                    <select id={id.clone()} {onchange} disabled={props.saving}>
                        <option value="" selected={value.is_empty()}>{"Select class"}</option>
                        {for props.classes.iter().map(|option| html! {
                            <option value={option.label.clone()} selected={value == option.label}>
                                {&option.label}
                            </option>
                        })}
                    </select>
                }
            }
            StudentField::Gender => {
                let on_field = on_field.clone();
                let onchange = Callback::from(move |e: Event| {
                    let select: HtmlSelectElement = e.target_unchecked_into();
                    on_field.emit((field, select.value()));
                });
                html! {
                    <select id={id.clone()} {onchange} disabled={props.saving}>
                        <option value="" selected={value.is_empty()}>{"Select gender"}</option>
                        {for GENDERS.iter().map(|gender| html! {
                            <option value={*gender} selected={value == *gender}>{*gender}</option>
                        })}
                    </select>
                }
            }
            _ => {
                let on_field = on_field.clone();
                let onchange = Callback::from(move |e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    on_field.emit((field, input.value()));
                });
                html! {
                    <input
                        type={input_type(field)}
                        id={id.clone()}
                        value={value}
                        {onchange}
                        disabled={props.saving}
                    />
                }
            }
        };

        html! {
            <div class={classes!("form-group", error.map(|_| "has-error"))}>
                <label for={id}>{field.label()}</label>
                {control}
                {if let Some(message) = error {
                    html! { <span class="field-error">{message}</span> }
                } else { html! {} }}
            </div>
        }
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal student-form-modal">
                <h3 class="modal-title">{props.title.clone()}</h3>
                <form class="student-form" {onsubmit}>
                    <div class="form-grid">
                        {for StudentField::ALL.into_iter().map(field_view)}
                    </div>
                    <div class="modal-buttons">
                        <button
                            type="button"
                            class="btn btn-secondary"
                            onclick={on_cancel_click}
                            disabled={props.saving}
                        >
                            {"Cancel"}
                        </button>
                        <button type="submit" class="btn btn-primary" disabled={props.saving}>
                            {if props.saving { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
