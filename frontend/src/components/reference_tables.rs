use shared::{ClassName, ClassTiming, ReferenceEntity, Teacher};
use yew::prelude::*;

use super::resource_table::{delete_button, table_frame, PageProps};
use crate::hooks::use_resource_table::{use_resource_table, TableResource, UseResourceTableResult};

fn reference_table<T>(title: &str, column: &str, table: &UseResourceTableResult<T>) -> Html
where
    T: TableResource + ReferenceEntity,
{
    let offset = table.state.view.page_index() * table.state.view.page_size();
    let rows = html! {
        {for table.state.view.page().into_iter().enumerate().map(|(index, item)| html! {
            <tr key={item.id()}>
                <td>{(offset + index + 1).to_string()}</td>
                <td>{item.display_name()}</td>
                <td>{delete_button(table, item.id())}</td>
            </tr>
        })}
    };

    table_frame(title, &["#", column], table, rows)
}

#[function_component(ClassTable)]
pub fn class_table(props: &PageProps) -> Html {
    let table = use_resource_table::<ClassName>(&props.api, props.page_size, &props.on_notify);
    reference_table("Classes", "Class Name", &table)
}

#[function_component(TimingTable)]
pub fn timing_table(props: &PageProps) -> Html {
    let table = use_resource_table::<ClassTiming>(&props.api, props.page_size, &props.on_notify);
    reference_table("Class Times", "Time", &table)
}

#[function_component(TeacherTable)]
pub fn teacher_table(props: &PageProps) -> Html {
    let table = use_resource_table::<Teacher>(&props.api, props.page_size, &props.on_notify);
    reference_table("Teachers", "Teacher Name", &table)
}

/// Class, time slot and teacher setup on one page.
#[function_component(SetupPage)]
pub fn setup_page(props: &PageProps) -> Html {
    html! {
        <div class="setup-page">
            <ClassTable ..props.clone() />
            <TimingTable ..props.clone() />
            <TeacherTable ..props.clone() />
        </div>
    }
}
