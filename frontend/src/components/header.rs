use web_sys::MouseEvent;
use yew::prelude::*;

/// Dashboard sections reachable from the header tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Overview,
    MarkAttendance,
    ViewAttendance,
    Students,
    Setup,
    Fees,
    Income,
    Expenses,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Overview,
        Page::MarkAttendance,
        Page::ViewAttendance,
        Page::Students,
        Page::Setup,
        Page::Fees,
        Page::Income,
        Page::Expenses,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::MarkAttendance => "Mark Attendance",
            Page::ViewAttendance => "View Attendance",
            Page::Students => "Students",
            Page::Setup => "Classes & Teachers",
            Page::Fees => "Fees",
            Page::Income => "Income",
            Page::Expenses => "Expenses",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub current: Page,
    pub on_navigate: Callback<Page>,
    /// Shown next to the title when a user name is stored
    #[prop_or_default]
    pub username: Option<String>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"School Dashboard"}</h1>
                {if let Some(username) = &props.username {
                    html! { <span class="header-user">{format!("Signed in as {}", username)}</span> }
                } else { html! {} }}
                <nav class="header-nav">
                    {for Page::ALL.into_iter().map(|page| {
                        let onclick = {
                            let on_navigate = props.on_navigate.clone();
                            Callback::from(move |_: MouseEvent| on_navigate.emit(page))
                        };
                        html! {
                            <button
                                type="button"
                                class={classes!("nav-tab", (page == props.current).then_some("active"))}
                                {onclick}
                            >
                                {page.title()}
                            </button>
                        }
                    })}
                </nav>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_overview_is_first_tab() {
        assert_eq!(Page::ALL[0], Page::Overview);
        let mut titles: Vec<&str> = Page::ALL.iter().map(|page| page.title()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), Page::ALL.len());
    }
}
