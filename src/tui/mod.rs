pub mod app;
pub mod calendar;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::{AppContext, Result};
use crate::board::{BirthdayBoard, FetchRequest};

use self::app::{ActivePane, TuiApp};
use self::event::{Action, AppEvent, EventHandler, FetchSettled};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run one lookup in the background. Nothing cancels it; it reports back
/// whenever it settles.
fn spawn_fetch(ctx: &AppContext, request: FetchRequest, tx: mpsc::UnboundedSender<FetchSettled>) {
    let fetcher = ctx.fetcher.clone();
    tokio::spawn(async move {
        let result = fetcher.fetch(&request.month, &request.day).await;
        if tx
            .send(FetchSettled {
                generation: request.generation,
                result,
            })
            .is_err()
        {
            tracing::debug!("Lookup {} settled after shutdown", request.generation);
        }
    });
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let board = BirthdayBoard::new().discarding_stale(ctx.discard_stale_responses());
    let mut tui_app = TuiApp::new(board);
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchSettled>();
    let config = ctx.config.clone();

    loop {
        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                if tui_app.editing_search {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        tui_app.should_quit = true;
                    } else {
                        tui_app.handle_search_key(&key);
                    }
                } else {
                    tui_app.clear_status();
                    match config.keybindings.get_action(&key) {
                        Action::Quit => {
                            tui_app.should_quit = true;
                        }
                        Action::MoveUp => {
                            tui_app.move_up();
                        }
                        Action::MoveDown => {
                            tui_app.move_down();
                        }
                        Action::MoveLeft => {
                            tui_app.move_left();
                        }
                        Action::MoveRight => {
                            tui_app.move_right();
                        }
                        Action::NextMonth => {
                            tui_app.shift_month(1);
                        }
                        Action::PrevMonth => {
                            tui_app.shift_month(-1);
                        }
                        Action::Today => {
                            tui_app.jump_to_today();
                        }
                        Action::NextPane => {
                            tui_app.active_pane = tui_app.active_pane.next();
                        }
                        Action::PrevPane => {
                            tui_app.active_pane = tui_app.active_pane.prev();
                        }
                        Action::Select => {
                            if tui_app.active_pane == ActivePane::Calendar {
                                let selection = tui_app.pick_cursor();
                                match tui_app.board.select_date(selection) {
                                    Ok(request) => spawn_fetch(&ctx, request, tx.clone()),
                                    Err(e) => tui_app.set_status(e.to_string()),
                                }
                            }
                        }
                        Action::ToggleFavourite => {
                            if tui_app.active_pane == ActivePane::Births {
                                tui_app.toggle_selected_favourite();
                            }
                        }
                        Action::Search => {
                            if !tui_app.start_search() {
                                tui_app.set_status("Select a date before searching".to_string());
                            }
                        }
                        Action::OpenInBrowser => {
                            if tui_app.active_pane == ActivePane::Births {
                                let url = tui_app
                                    .selected_entry()
                                    .and_then(|entry| entry.page_url().map(String::from));
                                match url {
                                    Some(url) => {
                                        if let Err(e) = open::that(&url) {
                                            tui_app.set_status(format!(
                                                "Failed to open browser: {}",
                                                e
                                            ));
                                        }
                                    }
                                    None => {
                                        tui_app.set_status(
                                            "No page linked to this entry".to_string(),
                                        );
                                    }
                                }
                            }
                        }
                        Action::None => {}
                    }
                }
            }
            AppEvent::Tick => {}
        }

        while let Ok(settled) = rx.try_recv() {
            tui_app.apply_settled(settled);
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}
