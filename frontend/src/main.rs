use shared::DashboardConfig;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::expenses::ExpensesPage;
use components::fees::FeesPage;
use components::header::{Header, Page};
use components::income::IncomePage;
use components::mark_attendance::MarkAttendance;
use components::overview::Overview;
use components::reference_tables::SetupPage;
use components::student_table::StudentTable;
use components::ui::ToastList;
use components::view_attendance::ViewAttendance;
use hooks::use_toasts::use_toasts;
use services::api::{school_api, stored_username};
use services::logging::{self, Logger};

fn dashboard_config() -> DashboardConfig {
    DashboardConfig::from_env_value(option_env!("SCHOOL_API_URL"))
        .with_debug_logging(cfg!(debug_assertions))
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| dashboard_config());
    let api = use_memo((), {
        let config = config.clone();
        move |_| {
            Logger::info_with_component(
                "app",
                &format!("Using backend at {}", config.api_base_url),
            );
            school_api(&config)
        }
    });
    let page = use_state(|| Page::Overview);
    let username = use_memo((), |_| stored_username());
    let toasts = use_toasts(config.toast_duration_ms);

    let on_navigate = {
        let page = page.clone();
        Callback::from(move |next: Page| page.set(next))
    };

    let api = (*api).clone();
    let on_notify = toasts.notify.clone();
    let page_size = config.page_size;

    let content = match *page {
        Page::Overview => html! { <Overview {api} {on_notify} /> },
        Page::MarkAttendance => html! { <MarkAttendance {api} {on_notify} /> },
        Page::ViewAttendance => html! { <ViewAttendance {api} {page_size} {on_notify} /> },
        Page::Students => html! { <StudentTable {api} {page_size} {on_notify} /> },
        Page::Setup => html! { <SetupPage {api} {page_size} {on_notify} /> },
        Page::Fees => html! { <FeesPage {api} {page_size} {on_notify} /> },
        Page::Income => html! { <IncomePage {api} {page_size} {on_notify} /> },
        Page::Expenses => html! { <ExpensesPage {api} {page_size} {on_notify} /> },
    };

    html! {
        <div class="app">
            <Header
                current={*page}
                on_navigate={on_navigate}
                username={(*username).clone()}
            />
            <main class="main">
                <div class="container">
                    {content}
                </div>
            </main>
            <ToastList toasts={toasts.toasts.clone()} on_dismiss={toasts.dismiss.clone()} />
        </div>
    }
}

fn main() {
    logging::init(dashboard_config().log_level());
    yew::Renderer::<App>::new().render();
}
