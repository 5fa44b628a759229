use shared::ReferenceEntity;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    pub id: i64,
    pub label: String,
}

/// Options for any lookup list, in fetch order.
pub fn options_from<T: ReferenceEntity>(items: &[T]) -> Vec<SelectOption> {
    items
        .iter()
        .map(|item| SelectOption {
            id: item.id(),
            label: item.display_name().to_string(),
        })
        .collect()
}

/// Parse a `<select>` value; the empty placeholder option maps to `None`.
fn parse_selection(value: &str) -> Option<i64> {
    value.parse().ok()
}

#[derive(Properties, PartialEq)]
pub struct ReferenceSelectProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub options: Vec<SelectOption>,
    pub selected: Option<i64>,
    pub on_change: Callback<Option<i64>>,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(ReferenceSelect)]
pub fn reference_select(props: &ReferenceSelectProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(parse_selection(&select.value()));
        })
    };

    let placeholder = props
        .placeholder
        .clone()
        .unwrap_or_else(|| AttrValue::from(format!("Select {}", props.label)));

    html! {
        <div class={classes!("form-group", props.error.as_ref().map(|_| "has-error"))}>
            <label for={props.id.clone()}>{props.label.clone()}</label>
            <select id={props.id.clone()} {onchange} disabled={props.disabled}>
                <option value="" selected={props.selected.is_none()}>{placeholder}</option>
                {for props.options.iter().map(|option| html! {
                    <option
                        value={option.id.to_string()}
                        selected={props.selected == Some(option.id)}
                    >
                        {&option.label}
                    </option>
                })}
            </select>
            {if let Some(error) = props.error.as_ref() {
                html! { <span class="field-error">{error.clone()}</span> }
            } else { html! {} }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ClassName;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_options_keep_fetch_order() {
        let classes = vec![
            ClassName { id: 3, name: "Class 8".to_string(), created_at: None },
            ClassName { id: 1, name: "Nursery".to_string(), created_at: None },
        ];
        let options = options_from(&classes);
        assert_eq!(options[0], SelectOption { id: 3, label: "Class 8".to_string() });
        assert_eq!(options[1].id, 1);
    }

    #[wasm_bindgen_test]
    fn test_placeholder_value_is_no_selection() {
        assert_eq!(parse_selection(""), None);
        assert_eq!(parse_selection("12"), Some(12));
    }
}
