use std::sync::Arc;
use std::time::Instant;

use projdash_core::columns::column;
use projdash_core::{
    project_table_with, AppConfig, ColumnKey, ColumnSelection, Project, ProjectSet, TableView,
    COLUMN_REGISTRY,
};

use crate::avatars::AvatarCache;
use crate::input::Action;
use crate::motion::{EntranceAnimator, MotionConfigExt};
use crate::theme::Theme;

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Normal browsing mode
    Normal,
    /// Typing a row filter; the draft is applied live
    Filter(String),
    /// Column visibility popup
    ColumnPicker,
    /// Help overlay
    Help,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Active theme
    pub theme: Theme,
    /// All loaded projects
    pub projects: ProjectSet,
    /// Visible columns (replaced, never mutated in place)
    pub columns: ColumnSelection,
    /// Applied row filter
    pub filter: String,
    /// Selected row in the rendered sequence
    pub selected: usize,
    /// Cursor inside the column picker
    pub picker_cursor: usize,
    /// Current application mode
    pub mode: Mode,
    /// Row entrance animations keyed by project id
    pub animator: EntranceAnimator,
    /// Contributor avatar availability
    pub avatars: AvatarCache,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Whether the caller should reload the projects file
    pub reload_requested: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme, projects: ProjectSet) -> Self {
        let columns = config.ui.table.selection();
        let animator = EntranceAnimator::new(config.ui.motion.clone());
        Self {
            config,
            theme,
            projects,
            columns,
            filter: String::new(),
            selected: 0,
            picker_cursor: 0,
            mode: Mode::Normal,
            animator,
            avatars: AvatarCache::new(),
            should_quit: false,
            reload_requested: false,
            status_message: None,
            pending_key: None,
        }
    }

    /// Query currently narrowing the rows (the live draft while filtering)
    pub fn active_filter(&self) -> &str {
        match &self.mode {
            Mode::Filter(draft) => draft,
            _ => &self.filter,
        }
    }

    /// Projects in rendered order
    pub fn rendered_projects(&self) -> Vec<Project> {
        self.projects.filtered(self.active_filter())
    }

    /// Project the rendered rows through the current column selection
    pub fn table_view(&self) -> TableView {
        project_table_with(&self.rendered_projects(), &self.columns, &self.avatars)
    }

    /// Build the view for this frame and advance row animations
    ///
    /// Rows that left the rendered set lose their animation state here.
    pub fn prepare_frame(&mut self, now: Instant) -> TableView {
        let view = self.table_view();
        self.animator.sync(&view.row_ids(), now);
        self.animator.tick(now);
        self.clamp_selection(view.rows().len());
        view
    }

    /// Whether the event loop should run at animation frame rate
    pub fn needs_fast_update(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::Filter(_))
    }

    /// Get the currently selected project
    pub fn current_project(&self) -> Option<Project> {
        self.rendered_projects().into_iter().nth(self.selected)
    }

    /// Replace the project set (e.g. after a reload), keeping the selection in range
    pub fn set_projects(&mut self, projects: ProjectSet) {
        self.projects = projects;
        let count = self.rendered_projects().len();
        self.clamp_selection(count);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    fn clamp_selection(&mut self, count: usize) {
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        let count = self.rendered_projects().len();
        if count > 0 && self.selected < count - 1 {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn jump_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn jump_to_bottom(&mut self) {
        self.selected = self.rendered_projects().len().saturating_sub(1);
    }

    /// Show or hide a column
    pub fn toggle_column(&mut self, key: ColumnKey) {
        self.columns = self.columns.toggled(key);
        let state = if self.columns.contains(key) { "shown" } else { "hidden" };
        self.set_status(format!("Column '{}' {}", column(key).label, state));
    }

    /// Toggle the registry column at `index` (0-based)
    pub fn toggle_column_at(&mut self, index: usize) {
        if let Some(column) = COLUMN_REGISTRY.get(index) {
            self.toggle_column(column.key);
        }
    }

    pub fn show_all_columns(&mut self) {
        self.columns = ColumnSelection::all();
        self.set_status("All columns shown");
    }

    /// Turn entrance animations on or off
    pub fn toggle_motion(&mut self) {
        let mut motion = self.animator.config().clone();
        motion.enabled = !motion.enabled;
        let enabled = motion.is_animated();
        self.animator.set_config(motion);
        self.set_status(if enabled {
            "Animations on"
        } else {
            "Animations off"
        });
    }

    /// Open the selected project's repository in the browser
    pub fn open_repository(&mut self) {
        let Some(project) = self.current_project() else {
            return;
        };

        match project.repository_url() {
            Ok(url) => {
                if let Err(e) = open::that(url.as_str()) {
                    tracing::warn!("Failed to open {}: {}", url, e);
                    self.set_status(format!("Failed to open browser: {}", e));
                } else {
                    self.set_status(format!("Opened {}", project.repository_display()));
                }
            }
            Err(e) => self.set_status(format!("Cannot open link: {}", e)),
        }
    }

    /// Apply an input action to the application state
    pub fn handle_action(&mut self, action: Action) {
        if action != Action::PendingG {
            self.pending_key = None;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveDown => match self.mode {
                Mode::ColumnPicker => {
                    self.picker_cursor = (self.picker_cursor + 1).min(COLUMN_REGISTRY.len() - 1)
                }
                _ => self.move_down(),
            },
            Action::MoveUp => match self.mode {
                Mode::ColumnPicker => self.picker_cursor = self.picker_cursor.saturating_sub(1),
                _ => self.move_up(),
            },
            Action::JumpToTop => self.jump_to_top(),
            Action::JumpToBottom => self.jump_to_bottom(),
            Action::PendingG => self.pending_key = Some('g'),
            Action::OpenColumnPicker => {
                self.mode = if self.mode == Mode::ColumnPicker {
                    Mode::Normal
                } else {
                    Mode::ColumnPicker
                };
            }
            Action::ToggleColumn(index) => self.toggle_column_at(index),
            Action::ToggleColumnAtCursor => self.toggle_column_at(self.picker_cursor),
            Action::ShowAllColumns => self.show_all_columns(),
            Action::StartFilter => self.mode = Mode::Filter(self.filter.clone()),
            Action::OpenRepository => self.open_repository(),
            Action::ToggleMotion => self.toggle_motion(),
            Action::Reload => self.reload_requested = true,
            Action::Help => self.mode = Mode::Help,
            Action::InputChar(c) => {
                if let Mode::Filter(draft) = &mut self.mode {
                    draft.push(c);
                    self.selected = 0;
                }
            }
            Action::Backspace => {
                if let Mode::Filter(draft) = &mut self.mode {
                    draft.pop();
                    self.selected = 0;
                }
            }
            Action::Confirm => {
                if let Mode::Filter(draft) = &self.mode {
                    self.filter = draft.clone();
                    if !self.filter.is_empty() {
                        let count = self.rendered_projects().len();
                        self.set_status(format!("Filter '{}': {} projects", self.filter, count));
                    }
                }
                self.mode = Mode::Normal;
            }
            Action::Cancel | Action::ExitMode => {
                if self.mode == Mode::Normal && !self.filter.is_empty() {
                    self.filter.clear();
                    self.set_status("Filter cleared");
                }
                self.mode = Mode::Normal;
            }
            Action::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::RowPhase;
    use projdash_core::{EasingType, Status, StatusVariant};
    use std::time::Duration;

    fn project(id: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            repository_link: format!("https://github.com/acme/{}", id),
            team: "Core".to_string(),
            tech_stack: "Rust".to_string(),
            created_at: "Jan 1, 2024".to_string(),
            contributors: Vec::new(),
            status: Status::new("Active", StatusVariant::Active),
        }
    }

    fn app() -> App {
        let mut config = AppConfig::default();
        config.ui.motion.easing = EasingType::Linear;
        let projects = ProjectSet::new(vec![
            project("a", "Alpha"),
            project("b", "Beta"),
            project("c", "Gamma"),
        ])
        .unwrap();
        App::new(Arc::new(config), Theme::default(), projects)
    }

    #[test]
    fn test_column_toggle_does_not_replay_animation() {
        let mut app = app();
        let t0 = Instant::now();
        app.prepare_frame(t0);
        let settled = t0 + Duration::from_secs(5);
        app.prepare_frame(settled);
        assert!(!app.needs_fast_update());

        app.handle_action(Action::ToggleColumn(1));
        let view = app.prepare_frame(settled + Duration::from_millis(10));
        assert_eq!(view.columns.len(), COLUMN_REGISTRY.len() - 1);
        for id in ["a", "b", "c"] {
            assert_eq!(app.animator.phase(id), RowPhase::Settled);
        }
        assert!(!app.needs_fast_update());
    }

    #[test]
    fn test_filter_cancels_and_replays_rows() {
        let mut app = app();
        let t0 = Instant::now();
        app.prepare_frame(t0);

        app.handle_action(Action::StartFilter);
        for c in "alp".chars() {
            app.handle_action(Action::InputChar(c));
        }
        let view = app.prepare_frame(t0 + Duration::from_millis(20));
        assert_eq!(view.row_ids(), vec!["a"]);
        assert_eq!(app.animator.phase("b"), RowPhase::NotMounted);

        app.handle_action(Action::Cancel);
        let t1 = t0 + Duration::from_secs(5);
        app.prepare_frame(t1);
        assert_eq!(app.animator.phase("b"), RowPhase::Entering);
        assert_eq!(app.animator.phase("a"), RowPhase::Settled);
    }

    #[test]
    fn test_confirm_filter_keeps_query() {
        let mut app = app();
        app.handle_action(Action::StartFilter);
        app.handle_action(Action::InputChar('g'));
        app.handle_action(Action::Confirm);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.filter, "g");
        assert_eq!(app.rendered_projects().len(), 1);

        // Esc in normal mode clears the applied filter
        app.handle_action(Action::ExitMode);
        assert!(app.filter.is_empty());
        assert_eq!(app.rendered_projects().len(), 3);
    }

    #[test]
    fn test_selection_clamped() {
        let mut app = app();
        app.handle_action(Action::JumpToBottom);
        assert_eq!(app.selected, 2);
        app.handle_action(Action::MoveDown);
        assert_eq!(app.selected, 2);

        app.set_projects(ProjectSet::new(vec![project("a", "Alpha")]).unwrap());
        assert_eq!(app.selected, 0);
        assert_eq!(app.current_project().map(|p| p.id), Some("a".to_string()));
    }

    #[test]
    fn test_column_picker_cursor() {
        let mut app = app();
        app.handle_action(Action::OpenColumnPicker);
        assert_eq!(app.mode, Mode::ColumnPicker);
        for _ in 0..20 {
            app.handle_action(Action::MoveDown);
        }
        assert_eq!(app.picker_cursor, COLUMN_REGISTRY.len() - 1);
        app.handle_action(Action::ToggleColumnAtCursor);
        assert!(!app.columns.contains(ColumnKey::Status));
        app.handle_action(Action::ShowAllColumns);
        assert_eq!(app.columns, ColumnSelection::all());
    }

    #[test]
    fn test_toggle_motion_settles_rows() {
        let mut app = app();
        app.prepare_frame(Instant::now());
        assert!(app.needs_fast_update());
        app.handle_action(Action::ToggleMotion);
        assert!(!app.needs_fast_update());
        assert_eq!(app.status_message.as_deref(), Some("Animations off"));
    }
}
