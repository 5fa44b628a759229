pub mod use_category_filter;
pub mod use_mark_attendance;
pub mod use_reference_lists;
pub mod use_resource_table;
pub mod use_summary;
pub mod use_toasts;
