pub mod columns;
pub mod config;
pub mod error;
pub mod project;
pub mod status;
pub mod table;

pub use columns::{visible_columns, Column, ColumnKey, ColumnSelection, COLUMN_REGISTRY};
pub use config::{AppConfig, EasingType, MotionConfig};
pub use error::{Error, Result};
pub use project::{Contributor, Project, ProjectSet, Status, StatusVariant};
pub use status::{classify, classify_variant, BadgeTone};
pub use table::{
    project_table, project_table_with, AvatarAvailability, CellView, ContributorView, NoAvatars,
    RowView, TableBody, TableView, EMPTY_MESSAGE,
};
