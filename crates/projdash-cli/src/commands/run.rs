use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;

use projdash_core::{AppConfig, ProjectSet};
use projdash_tui::{
    app::{App, Mode},
    avatars::probe_avatar,
    event::{AppEvent, AvatarLoadResult, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    load_theme,
    motion::MotionConfigExt,
    widgets::{PopupWidget, ProjectTableWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>, projects_path: PathBuf) -> Result<()> {
    // Fail before touching the terminal if the projects cannot be read
    let projects = ProjectSet::load(&projects_path)
        .with_context(|| format!("Failed to load projects from {}", projects_path.display()))?;

    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("projdash"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Load theme from config
    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(config.clone(), theme, projects);

    let result = event_loop(&mut terminal, &mut app, &keymap, &projects_path).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    keymap: &Keymap,
    projects_path: &Path,
) -> Result<()> {
    let event_handler = EventHandler::new(
        app.config.ui.tick_rate_ms,
        app.config.ui.motion.animation_tick_duration(),
    );

    // Create channel for async avatar probe results
    let (avatar_tx, mut avatar_rx) = mpsc::unbounded_channel::<AvatarLoadResult>();

    loop {
        // Process any completed avatar probes (non-blocking)
        while let Ok(result) = avatar_rx.try_recv() {
            app.avatars.apply(result);
        }

        spawn_avatar_probes(app, &avatar_tx);

        if app.reload_requested {
            app.reload_requested = false;
            reload_projects(app, projects_path);
        }

        let now = Instant::now();
        let view = app.prepare_frame(now);

        // Draw UI
        terminal.draw(|frame| {
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            ProjectTableWidget::render(frame, main_layout[0], app, &view, now);
            StatusBarWidget::render(frame, main_layout[1], app, view.rows().len());

            // Popups on top
            match app.mode {
                Mode::ColumnPicker => PopupWidget::render_column_picker(frame, app),
                Mode::Help => PopupWidget::render_help(frame, app),
                _ => {}
            }
        })?;

        // Use the animation frame rate while rows are entering
        if let Some(event) = event_handler.next(app.needs_fast_update())? {
            match event {
                AppEvent::Key(key) => {
                    app.status_message = None;
                    let action = handle_key_event(key, app, keymap);
                    app.handle_action(action);
                }
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Start background probes for avatar sources that have not been checked yet
fn spawn_avatar_probes(app: &mut App, tx: &mpsc::UnboundedSender<AvatarLoadResult>) {
    for source in app.avatars.untracked_sources(app.projects.projects()) {
        app.avatars.start_loading(&source);
        let tx = tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(probe_avatar(source).await);
        });
    }
}

/// Re-read the projects file, keeping the current rows on failure
fn reload_projects(app: &mut App, projects_path: &Path) {
    match ProjectSet::load(projects_path) {
        Ok(projects) => {
            let count = projects.len();
            app.set_projects(projects);
            // Probe avatars again on the next loop iteration
            app.avatars.clear();
            app.set_status(format!("Reloaded {} projects", count));
        }
        Err(e) => {
            tracing::warn!("Reload of {} failed: {}", projects_path.display(), e);
            app.set_status(format!("Reload failed: {}", e));
        }
    }
}
