pub mod confirm_dialog;
pub mod loader;
pub mod select;
pub mod table_controls;
pub mod toast;

pub use confirm_dialog::ConfirmDialog;
pub use loader::Loader;
pub use select::{options_from, ReferenceSelect, SelectOption};
pub use table_controls::{Pagination, SearchBox};
pub use toast::ToastList;
