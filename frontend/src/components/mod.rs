pub mod expenses;
pub mod fees;
pub mod forms;
pub mod header;
pub mod income;
pub mod mark_attendance;
pub mod overview;
pub mod reference_tables;
pub mod resource_table;
pub mod student_table;
pub mod ui;
pub mod view_attendance;
