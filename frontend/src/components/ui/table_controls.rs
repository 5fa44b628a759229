use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SearchBoxProps {
    pub value: AttrValue,
    pub on_search: Callback<String>,
    #[prop_or(AttrValue::Static("Search..."))]
    pub placeholder: AttrValue,
}

#[function_component(SearchBox)]
pub fn search_box(props: &SearchBoxProps) -> Html {
    let oninput = {
        let on_search = props.on_search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_search.emit(input.value());
        })
    };

    html! {
        <input
            type="search"
            class="table-search"
            placeholder={props.placeholder.clone()}
            value={props.value.clone()}
            {oninput}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    /// "Showing X to Y of Z"
    pub range_label: AttrValue,
    pub page: usize,
    pub page_count: usize,
    pub can_previous: bool,
    pub can_next: bool,
    pub on_previous: Callback<()>,
    pub on_next: Callback<()>,
}

#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    let on_previous = {
        let on_previous = props.on_previous.clone();
        Callback::from(move |_: MouseEvent| on_previous.emit(()))
    };
    let on_next = {
        let on_next = props.on_next.clone();
        Callback::from(move |_: MouseEvent| on_next.emit(()))
    };

    html! {
        <div class="pagination">
            <span class="pagination-range">{props.range_label.clone()}</span>
            <div class="pagination-buttons">
                <button
                    type="button"
                    class="btn btn-secondary"
                    onclick={on_previous}
                    disabled={!props.can_previous}
                >
                    {"Previous"}
                </button>
                <span class="pagination-page">
                    {format!("Page {} of {}", props.page + 1, props.page_count)}
                </span>
                <button
                    type="button"
                    class="btn btn-secondary"
                    onclick={on_next}
                    disabled={!props.can_next}
                >
                    {"Next"}
                </button>
            </div>
        </div>
    }
}
