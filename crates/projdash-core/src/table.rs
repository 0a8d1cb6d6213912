//! Table projection
//!
//! Turns project rows and a column selection into a backend-agnostic view
//! model. Header and every body row are built from the same filtered column
//! list, so they always stay positionally aligned.

use crate::columns::{visible_columns, Column, ColumnKey, ColumnSelection};
use crate::project::{Contributor, Project};
use crate::status::{classify, BadgeTone};

/// Message shown when there are no rows to render
pub const EMPTY_MESSAGE: &str = "No results.";

/// Answers whether a contributor avatar can be displayed
pub trait AvatarAvailability {
    fn is_available(&self, source: &str) -> bool;
}

/// Treats every avatar as unavailable, so initials are always shown
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAvatars;

impl AvatarAvailability for NoAvatars {
    fn is_available(&self, _source: &str) -> bool {
        false
    }
}

/// One contributor in the avatar stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContributorView {
    Avatar { source: String, alt: String },
    Initials(String),
}

/// Rendered content of a single cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellView {
    Text(String),
    /// External link; `display` has the scheme stripped, `target` is the full URL
    Link { display: String, target: String },
    Contributors(Vec<ContributorView>),
    Badge { text: String, tone: BadgeTone },
}

impl CellView {
    /// Plain-text rendering used by non-styled outputs
    pub fn plain_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Link { display, .. } => format!("{} ↗", display),
            Self::Contributors(contributors) => contributors
                .iter()
                .map(|c| match c {
                    ContributorView::Avatar { alt, .. } => alt.clone(),
                    ContributorView::Initials(initials) => initials.clone(),
                })
                .collect::<Vec<_>>()
                .join(" "),
            Self::Badge { text, .. } => text.clone(),
        }
    }
}

/// One body row, keyed by project id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Rows(Vec<RowView>),
    /// Placeholder row spanning every visible column
    Empty { span: usize, message: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<&'static Column>,
    pub body: TableBody,
}

impl TableView {
    /// Header labels, in registry order
    pub fn header(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.label).collect()
    }

    pub fn rows(&self) -> &[RowView] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            TableBody::Empty { .. } => &[],
        }
    }

    /// Row ids in rendered order
    pub fn row_ids(&self) -> Vec<&str> {
        self.rows().iter().map(|r| r.id.as_str()).collect()
    }
}

/// Project rows into a table view without avatar information
pub fn project_table(rows: &[Project], visible: &ColumnSelection) -> TableView {
    project_table_with(rows, visible, &NoAvatars)
}

/// Project rows into a table view, resolving avatars through `avatars`
pub fn project_table_with(
    rows: &[Project],
    visible: &ColumnSelection,
    avatars: &dyn AvatarAvailability,
) -> TableView {
    let columns = visible_columns(visible);

    let body = if rows.is_empty() {
        TableBody::Empty {
            span: columns.len(),
            message: EMPTY_MESSAGE,
        }
    } else {
        TableBody::Rows(
            rows.iter()
                .map(|project| RowView {
                    id: project.id.clone(),
                    cells: columns
                        .iter()
                        .map(|column| cell(project, column.key, avatars))
                        .collect(),
                })
                .collect(),
        )
    };

    TableView { columns, body }
}

fn cell(project: &Project, key: ColumnKey, avatars: &dyn AvatarAvailability) -> CellView {
    match key {
        ColumnKey::Name => CellView::Text(project.name.clone()),
        ColumnKey::Repository => CellView::Link {
            display: project.repository_display().to_string(),
            target: project.repository_link.clone(),
        },
        ColumnKey::Team => CellView::Text(project.team.clone()),
        ColumnKey::TechStack => CellView::Text(project.tech_stack.clone()),
        ColumnKey::CreatedAt => CellView::Text(project.created_at.clone()),
        ColumnKey::Contributors => CellView::Contributors(
            project
                .contributors
                .iter()
                .map(|c| contributor(c, avatars))
                .collect(),
        ),
        ColumnKey::Status => CellView::Badge {
            text: project.status.text.clone(),
            tone: classify(project.status.variant),
        },
    }
}

fn contributor(contributor: &Contributor, avatars: &dyn AvatarAvailability) -> ContributorView {
    if !contributor.avatar_source.is_empty() && avatars.is_available(&contributor.avatar_source) {
        ContributorView::Avatar {
            source: contributor.avatar_source.clone(),
            alt: contributor.alt_text.clone(),
        }
    } else {
        ContributorView::Initials(contributor.fallback_initials.clone())
    }
}
