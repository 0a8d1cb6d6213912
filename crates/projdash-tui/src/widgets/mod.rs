mod popup;
mod project_table;
mod status_bar;

pub use popup::PopupWidget;
pub use project_table::ProjectTableWidget;
pub use status_bar::StatusBarWidget;
