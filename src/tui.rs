//! Interactive terminal interface: profile browser, instance display, and
//! launch trigger.
//!
//! Cooperative single-threaded event loop. Selection and rendering are
//! quick, non-blocking operations; the launch action blocks until the
//! editor exits, with the terminal handed back to the editor's child
//! processes for the duration.

use crate::launcher::{check_vscode_available, prepare_and_launch};
use crate::vscode::process::{ProcessList, SystemProcesses};
use crate::vscode::{Instance, detect_instances, resolve_profile_for_instance};
use anyhow::{Context, Result, bail};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use kilomoco_config::{Profile, ProfileRegistry, resolve_profiles};
use ratatui::Frame;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use std::io;
use std::time::Duration;

/// A detected editor instance together with its reconciled profile id.
#[derive(Debug, Clone)]
pub struct InstanceRow {
    pub instance: Instance,
    pub profile_id: Option<String>,
}

/// UI state, kept separate from terminal I/O so it is testable.
pub struct App {
    registry: ProfileRegistry,
    profile_ids: Vec<String>,
    selected: usize,
    instances: Vec<InstanceRow>,
    status: Option<String>,
}

impl App {
    /// Build the app state from a resolved registry. Profiles are listed
    /// sorted by id, matching `--list` output.
    pub fn new(registry: ProfileRegistry) -> Self {
        let mut profile_ids: Vec<String> = registry.ids().map(str::to_string).collect();
        profile_ids.sort();
        Self {
            registry,
            profile_ids,
            selected: 0,
            instances: Vec::new(),
            status: None,
        }
    }

    /// Currently selected profile, if any exist.
    pub fn selected_profile(&self) -> Option<&Profile> {
        self.profile_ids
            .get(self.selected)
            .and_then(|id| self.registry.get(id))
    }

    /// Move the selection down, clamped to the list end.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.profile_ids.len() {
            self.selected += 1;
        }
    }

    /// Move the selection up, clamped to the list start.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Selected index into the sorted profile list.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Number of profiles on display.
    pub fn profile_count(&self) -> usize {
        self.profile_ids.len()
    }

    /// Detected instances with their reconciled profile ids.
    pub fn instances(&self) -> &[InstanceRow] {
        &self.instances
    }

    /// Re-detect running editor instances and reconcile each against the
    /// registry.
    pub fn refresh_instances(&mut self, processes: &impl ProcessList) {
        self.instances = detect_instances(processes)
            .into_iter()
            .map(|instance| {
                let profile_id = resolve_profile_for_instance(&instance, &self.registry);
                InstanceRow {
                    instance,
                    profile_id,
                }
            })
            .collect();
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}

type Term = ratatui::Terminal<CrosstermBackend<io::Stdout>>;

fn setup_terminal() -> Result<Term> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide).context("failed to enter alternate screen")?;
    ratatui::Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), Show, LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    Ok(())
}

/// Run the interactive interface. Returns the process exit code.
pub fn run_tui() -> Result<i32> {
    if !check_vscode_available() {
        bail!("VS Code CLI ('code') not found in PATH. Please ensure VS Code is installed.");
    }

    let mut app = App::new(resolve_profiles());
    app.refresh_instances(&SystemProcesses);

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    result
}

fn run_event_loop(terminal: &mut Term, app: &mut App) -> Result<i32> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(0),
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Char('r') => {
                app.refresh_instances(&SystemProcesses);
                app.set_status(format!("{} instance(s) detected", app.instances().len()));
            }
            KeyCode::Enter => {
                if let Some(profile) = app.selected_profile() {
                    let profile_id = profile.id.clone();
                    launch_from_tui(terminal, app, &profile_id)?;
                }
            }
            _ => {}
        }
    }
}

/// Launch the selected profile, handing the terminal back to the editor
/// for the (blocking) duration of the call.
fn launch_from_tui(terminal: &mut Term, app: &mut App, profile_id: &str) -> Result<()> {
    restore_terminal(terminal)?;
    let launch_result = prepare_and_launch(profile_id, None);

    enable_raw_mode().context("failed to re-enable raw mode")?;
    execute!(terminal.backend_mut(), EnterAlternateScreen, Hide)
        .context("failed to re-enter alternate screen")?;
    terminal.clear()?;

    match launch_result {
        Ok(exit_code) => {
            app.set_status(format!(
                "Launched '{profile_id}', editor exited with code {exit_code}"
            ));
            app.refresh_instances(&SystemProcesses);
        }
        Err(e) => app.set_status(format!("Error: {e}")),
    }
    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(outer[0]);

    draw_profile_list(frame, panes[0], app);
    draw_profile_details(frame, panes[1], app);
    draw_instances(frame, outer[1], app);
    draw_help_line(frame, outer[2], app);
}

fn draw_profile_list(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .profile_ids
        .iter()
        .filter_map(|id| app.registry.get(id))
        .map(|profile| {
            ListItem::new(Line::from(vec![
                Span::styled(profile.id.clone(), Style::default().fg(Color::Cyan)),
                Span::raw(": "),
                Span::raw(profile.name.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Profiles "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if app.profile_count() > 0 {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_profile_details(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();
    if let Some(profile) = app.selected_profile() {
        lines.push(Line::from(Span::styled(
            profile.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(profile.description.clone()));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Modes",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )));

        let mut modes: Vec<(&String, &String)> = profile.modes.iter().collect();
        modes.sort();
        for (mode, model) in modes {
            lines.push(Line::from(vec![
                Span::styled(format!("  {mode:<14}"), Style::default().fg(Color::Cyan)),
                Span::raw(model.clone()),
            ]));
        }
    } else {
        lines.push(Line::from("No profiles available"));
    }

    let details =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Details "));
    frame.render_widget(details, area);
}

fn draw_instances(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = if app.instances.is_empty() {
        vec![Line::from("No running VS Code instances with Kilo Code")]
    } else {
        app.instances
            .iter()
            .map(|row| {
                let profile = row.profile_id.as_deref().unwrap_or("no profile");
                let workspace = row
                    .instance
                    .workspace
                    .as_deref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "-".to_string());
                Line::from(vec![
                    Span::raw(format!("pid {:<8}", row.instance.pid)),
                    Span::styled(format!("[{profile}] "), Style::default().fg(Color::Green)),
                    Span::raw(workspace),
                ])
            })
            .collect()
    };

    let instances =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Instances "));
    frame.render_widget(instances, area);
}

fn draw_help_line(frame: &mut Frame, area: Rect, app: &App) {
    let text = match &app.status {
        Some(status) => status.clone(),
        None => "Up/Down select | Enter launch | r refresh instances | q quit".to_string(),
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vscode::ProcessRecord;
    use kilomoco_config::builtin_profiles;

    struct NoProcesses;

    impl ProcessList for NoProcesses {
        fn processes(&self) -> Vec<ProcessRecord> {
            Vec::new()
        }
    }

    #[test]
    fn test_app_lists_profiles_sorted_by_id() {
        let app = App::new(builtin_profiles());
        assert_eq!(app.profile_count(), 8);
        assert_eq!(app.selected_profile().unwrap().id, "ags");
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = App::new(builtin_profiles());
        app.select_previous();
        assert_eq!(app.selected_index(), 0);

        for _ in 0..20 {
            app.select_next();
        }
        assert_eq!(app.selected_index(), app.profile_count() - 1);

        app.select_previous();
        assert_eq!(app.selected_index(), app.profile_count() - 2);
    }

    #[test]
    fn test_refresh_instances_with_empty_process_table() {
        let mut app = App::new(builtin_profiles());
        app.refresh_instances(&NoProcesses);
        assert!(app.instances().is_empty());
    }

    #[test]
    fn test_empty_registry_has_no_selection() {
        let app = App::new(ProfileRegistry::new());
        assert!(app.selected_profile().is_none());
        assert_eq!(app.profile_count(), 0);
    }
}
