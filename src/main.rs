use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use triagetui::app::{App, Job, Pane};
use triagetui::backend::{ClassifierClient, RefreshOutcome, Worker};
use triagetui::config::Config;
use triagetui::logging;
use triagetui::triage::{TicketAction, View};
use triagetui::ui::{
    render_dashboard, render_detail, render_help, render_modal, render_sidebar, render_tickets,
};

#[derive(Parser, Debug)]
#[command(name = "triagetui", about = "Terminal inbox for AI-classified support tickets")]
struct Args {
    /// Log filter, e.g. "debug" or "triagetui=trace" (overrides TRIAGETUI_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Start from the sample tickets without contacting the backend
    #[arg(long)]
    offline: bool,

    /// Config file (default: ~/.config/triagetui/config.toml)
    #[arg(long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init(args.log_level.as_deref());

    // Load config
    let config = Arc::new(Config::load(args.config.as_deref()));
    let client = ClassifierClient::new(&config.backend)?;
    let worker = Worker::new(Arc::new(client));

    let mut app = App::new(config);
    if args.offline {
        app.apply_refresh(RefreshOutcome::Failed("started offline".to_string()));
    } else {
        app.begin_refresh(worker.request_refresh());
    }
    tracing::info!(offline = args.offline, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &worker);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    worker: &Worker,
) -> Result<()> {
    loop {
        // Finished background calls land here between frames
        while let Some(event) = worker.try_recv() {
            app.handle_backend_event(event);
        }

        terminal.draw(|f| render(app, f, worker.is_refreshing()))?;

        // Poll with timeout so refresh results show up without input
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if app.modal.is_some() {
                    handle_modal_key(app, worker, key);
                } else {
                    handle_key(app, worker, key);
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) if app.modal.is_none() => {
                    app.handle_click(mouse.column, mouse.row);
                }
                MouseEventKind::ScrollDown => match app.focused_pane {
                    Pane::Detail => app.detail_scroll_down(),
                    _ => app.next(),
                },
                MouseEventKind::ScrollUp => match app.focused_pane {
                    Pane::Detail => app.detail_scroll_up(),
                    _ => app.previous(),
                },
                _ => {}
            },
            _ => {}
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn handle_modal_key(app: &mut App, worker: &Worker, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.dismiss_modal(),
        KeyCode::Char('j') | KeyCode::Down => app.move_feedback(true),
        KeyCode::Char('k') | KeyCode::Up => app.move_feedback(false),
        KeyCode::Enter => {
            if let Some(job) = app.confirm_modal() {
                dispatch(worker, job);
            }
        }
        _ => {}
    }
}

fn handle_key(app: &mut App, worker: &Worker, key: KeyEvent) {
    app.clear_status();
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc => app.focused_pane = Pane::List,
        KeyCode::Char('h') | KeyCode::Left => {
            app.focused_pane = match app.focused_pane {
                Pane::Detail => Pane::List,
                _ => Pane::Sidebar,
            };
        }
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => {
            app.focused_pane = match app.focused_pane {
                Pane::Sidebar => Pane::List,
                _ => Pane::Detail,
            };
        }
        KeyCode::Char('j') | KeyCode::Down => match app.focused_pane {
            Pane::Sidebar => app.next_view(),
            Pane::List => app.next(),
            Pane::Detail => app.detail_scroll_down(),
        },
        KeyCode::Char('k') | KeyCode::Up => match app.focused_pane {
            Pane::Sidebar => app.previous_view(),
            Pane::List => app.previous(),
            Pane::Detail => app.detail_scroll_up(),
        },
        KeyCode::Tab => app.next_view(),
        KeyCode::BackTab => app.previous_view(),
        KeyCode::Char('R') => app.begin_refresh(worker.request_refresh()),
        KeyCode::Char('a') => {
            app.perform(TicketAction::AutoReply);
        }
        KeyCode::Char('f') => {
            app.perform(TicketAction::FollowUp);
        }
        KeyCode::Char('d') => {
            app.perform(TicketAction::MarkDone);
        }
        KeyCode::Char('c') => app.open_feedback(),
        _ => {}
    }
}

fn dispatch(worker: &Worker, job: Job) {
    match job {
        Job::SendReply { ticket_id } => worker.send_auto_reply(ticket_id, None),
        Job::SendFeedback {
            ticket_id,
            category,
        } => worker.submit_feedback(ticket_id, category),
    }
}

/// `refreshing` drives the Syncing indicator in the help bar
fn render(app: &mut App, f: &mut Frame, refreshing: bool) {
    let area = f.area();
    let config = app.config.clone();
    let theme = &config.theme;

    f.render_widget(
        ratatui::widgets::Block::default().style(Style::default().bg(theme.bg())),
        area,
    );

    // Split into main area and help bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(config.layout.sidebar_width),
            Constraint::Min(1),
        ])
        .split(chunks[0]);

    render_sidebar(
        f,
        columns[0],
        &app.views,
        app.store.tickets(),
        &mut app.sidebar_state,
        app.focused_pane == Pane::Sidebar,
        theme,
    );

    if app.view == View::Dashboard {
        app.set_pane_areas(columns[0], Rect::default());
        let stats = app.dashboard();
        render_dashboard(f, columns[1], &stats, app.focused_pane != Pane::Sidebar, theme);
    } else {
        let list_pct = config.layout.list_width.min(100);
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(list_pct),
                Constraint::Percentage(100 - list_pct),
            ])
            .split(columns[1]);

        // Store pane areas for mouse handling
        app.set_pane_areas(columns[0], panes[0]);

        // Clone the ordered rows to avoid a borrow conflict with list_state
        let rows: Vec<_> = app.visible().tickets.into_iter().cloned().collect();
        let row_refs: Vec<_> = rows.iter().collect();
        let title = format!(" {} ({}) ", app.views.label(&app.view), rows.len());
        render_tickets(
            f,
            panes[0],
            &row_refs,
            &mut app.list_state,
            &title,
            app.focused_pane == Pane::List,
            theme,
            &config.layout,
        );

        render_detail(
            f,
            panes[1],
            app.selected_ticket(),
            app.detail_scroll,
            app.focused_pane == Pane::Detail,
            theme,
        );
    }

    if let Some(modal) = &app.modal {
        render_modal(f, chunks[0], modal, theme);
    }

    render_help(
        f,
        chunks[1],
        app.focused_pane,
        app.status_message.as_deref(),
        app.backend_status,
        refreshing,
        theme,
    );
}
