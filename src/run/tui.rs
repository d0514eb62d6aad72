use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::db::Database;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &mut Database) -> Result<()> {
    let mut app = App::new();
    app.refresh(db)?;
    if app.ledger.initiatives.is_empty() {
        app.set_status("No initiatives yet. Add one with :add <name> <budget>");
    }
    tracing::info!(period = %app.period, "starting TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!("TUI aborted: {e:#}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, two borders, table header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db)?,
                InputMode::Command => handle_command_input(key, app, db)?,
                InputMode::Editing => handle_editing_input(key, app, db)?,
                InputMode::Confirm => handle_confirm_input(key, app, db)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') | KeyCode::Home => handle_goto_top(app),
        KeyCode::Char('G') | KeyCode::End => handle_goto_bottom(app),
        KeyCode::Char(c @ '1'..='4') => {
            let idx = (c as usize) - ('1' as usize);
            if let Some(&screen) = Screen::all().get(idx) {
                switch_screen(app, screen);
            }
        }
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            switch_screen(app, screens[(idx + 1) % screens.len()]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, screens[prev]);
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        KeyCode::Char('H') | KeyCode::Left => {
            commands::handle_command("prev-month", app, db)?;
        }
        KeyCode::Char('L') | KeyCode::Right => {
            commands::handle_command("next-month", app, db)?;
        }

        // Initiatives
        KeyCode::Char('a') if app.screen == Screen::Initiatives => {
            app.input_mode = InputMode::Command;
            app.command_input = "add ".into();
        }
        KeyCode::Char('e') if app.screen == Screen::Initiatives => {
            commands::begin_name_edit(app);
        }
        KeyCode::Char('b') if app.screen == Screen::Initiatives => {
            commands::begin_budget_edit(app);
        }
        KeyCode::Char('D') if app.screen == Screen::Initiatives => {
            commands::handle_command("delete", app, db)?;
        }

        // Actuals
        KeyCode::Enter | KeyCode::Char('e') if app.screen == Screen::Actuals => {
            commands::begin_amount_edit(app, db)?;
        }
        KeyCode::Char('X') if app.screen == Screen::Actuals => {
            commands::handle_command("clear-actuals", app, db)?;
        }

        // Data
        KeyCode::Char('t') if app.screen == Screen::Data => app.next_data_tab(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            if let Some(target) = app.edit_target.take() {
                commands::commit_edit(target, &input, app, db)?;
            }
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.edit_target = None;
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            match app.pending_action.take() {
                Some(PendingAction::DeleteInitiative { name }) => {
                    commands::remove_initiative(app, db, &name)?;
                }
                Some(PendingAction::ClearActuals { name }) => {
                    commands::clear_actuals(app, db, &name)?;
                }
                None => {}
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, screen: Screen) {
    app.screen = screen;
    if screen == Screen::Actuals && app.ledger.initiatives.is_empty() {
        app.set_status("Register an initiative first (:add <name> <budget>)");
    } else {
        app.set_status(format!("{screen}"));
    }
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Initiatives | Screen::Actuals => {
            let page = app.initiative_page();
            scroll_down(
                &mut app.initiative_index,
                &mut app.initiative_scroll,
                app.ledger.initiatives.len(),
                page,
            );
        }
        Screen::Data => {
            let (len, page) = (app.data_len(), app.data_page());
            scroll_down(&mut app.data_index, &mut app.data_scroll, len, page);
        }
        Screen::Charts => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Initiatives | Screen::Actuals => {
            scroll_up(&mut app.initiative_index, &mut app.initiative_scroll);
        }
        Screen::Data => scroll_up(&mut app.data_index, &mut app.data_scroll),
        Screen::Charts => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Initiatives | Screen::Actuals => {
            scroll_to_top(&mut app.initiative_index, &mut app.initiative_scroll);
        }
        Screen::Data => scroll_to_top(&mut app.data_index, &mut app.data_scroll),
        Screen::Charts => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Initiatives | Screen::Actuals => {
            let page = app.initiative_page();
            scroll_to_bottom(
                &mut app.initiative_index,
                &mut app.initiative_scroll,
                app.ledger.initiatives.len(),
                page,
            );
        }
        Screen::Data => {
            let (len, page) = (app.data_len(), app.data_page());
            scroll_to_bottom(&mut app.data_index, &mut app.data_scroll, len, page);
        }
        Screen::Charts => {}
    }
}
