use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoaderProps {
    #[prop_or(AttrValue::Static("Loading..."))]
    pub label: AttrValue,
}

#[function_component(Loader)]
pub fn loader(props: &LoaderProps) -> Html {
    html! {
        <div class="loading">
            <span class="spinner"></span>
            {props.label.clone()}
        </div>
    }
}
