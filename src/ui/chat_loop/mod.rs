//! Main chat event loop.
//!
//! A reader task forwards terminal events over a channel. The loop routes
//! them to [`AppAction`]s, applies queued actions to the [`App`] it owns, and
//! runs the resulting [`AppCommand`]s as spawned tasks (the typing delay and
//! the HTTP request) that report back as further actions.

mod keybindings;
mod lifecycle;
mod mouse;

pub use keybindings::{route_key_event, KeyRoute};
pub use mouse::route_mouse_event;

use std::{
    error::Error,
    sync::Arc,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tracing::{debug, info};

use self::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};
use crate::api::client::ResponseSource;
use crate::core::app::{apply_actions, App, AppAction, AppActionDispatcher, AppCommand};
use crate::core::persistence::PersistenceError;
use crate::ui::renderer::ui;
use crate::utils::input::sanitize_text_input;

const MAX_FPS: u64 = 60;
/// Redraw cadence while a typing indicator is animating.
const INDICATOR_FRAME: Duration = Duration::from_millis(150);
/// How long the reader waits for input before checking for shutdown.
const READER_POLL: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

/// Start the side effect of `command`. The outcome arrives later through
/// `dispatcher`.
pub fn execute_command(
    command: AppCommand,
    dispatcher: &AppActionDispatcher,
    source: &Arc<dyn ResponseSource>,
) {
    match command {
        AppCommand::ScheduleTypingIndicator {
            exchange,
            message,
            delay,
        } => {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                dispatcher.dispatch(AppAction::ShowTypingIndicator { exchange, message });
            });
        }
        AppCommand::SpawnRequest { exchange, request } => {
            let dispatcher = dispatcher.clone();
            let source = Arc::clone(source);
            tokio::spawn(async move {
                let outcome = source.generate(&request).await;
                debug!(%exchange, failed = outcome.is_error(), "request finished");
                dispatcher.dispatch(AppAction::ResponseReceived { exchange, outcome });
            });
        }
    }
}

/// Apply every queued action. Returns whether anything was applied.
pub fn drain_action_queue(
    app: &mut App,
    action_rx: &mut mpsc::UnboundedReceiver<AppAction>,
    dispatcher: &AppActionDispatcher,
    source: &Arc<dyn ResponseSource>,
) -> Result<bool, PersistenceError> {
    let mut pending = Vec::new();
    while let Ok(action) = action_rx.try_recv() {
        pending.push(action);
    }
    if pending.is_empty() {
        return Ok(false);
    }

    for command in apply_actions(app, pending)? {
        execute_command(command, dispatcher, source);
    }
    Ok(true)
}

/// Route one terminal event onto the action queue. Input edits are queued
/// too, so they stay ordered with submits from the same batch.
pub fn handle_ui_event(app: &App, dispatcher: &AppActionDispatcher, event: UiEvent) {
    match event {
        UiEvent::Crossterm(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            match route_key_event(&app.ui, key) {
                KeyRoute::Action(action) => dispatcher.dispatch(action),
                KeyRoute::Edit(input) => dispatcher.dispatch(AppAction::EditInput { input }),
                KeyRoute::Ignored => {}
            }
        }
        UiEvent::Crossterm(Event::Mouse(mouse)) => {
            dispatcher.dispatch_many(route_mouse_event(&app.ui, mouse));
        }
        UiEvent::Crossterm(Event::Paste(text)) => {
            dispatcher.dispatch(AppAction::InsertIntoInput {
                text: sanitize_text_input(&text),
            });
        }
        UiEvent::Crossterm(_) => {}
    }
}

/// Read terminal events on a blocking thread until the receiver goes away.
fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !event_tx.is_closed() {
            if let Ok(true) = event::poll(READER_POLL) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => continue,
                }
            }
        }
    })
}

async fn event_loop(
    app: &mut App,
    terminal: &mut ChatTerminal,
    source: Arc<dyn ResponseSource>,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
) -> Result<(), Box<dyn Error>> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();
    let dispatcher = AppActionDispatcher::new(action_tx);

    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut request_redraw = true;

    loop {
        if app.ui.exit_requested {
            return Ok(());
        }

        let animating = app.transcript.pending_count() > 0;
        if animating && last_draw.elapsed() >= INDICATOR_FRAME {
            request_redraw = true;
        }
        if request_redraw && last_draw.elapsed() >= frame_duration {
            terminal.draw(|f| ui(f, app))?;
            last_draw = Instant::now();
            request_redraw = false;
        }

        // Drain after each event so routing sees overlays opened by the
        // previous key.
        let mut events_processed = false;
        while let Ok(ev) = event_rx.try_recv() {
            events_processed = true;
            handle_ui_event(app, &dispatcher, ev);
            drain_action_queue(app, &mut action_rx, &dispatcher, &source)?;
        }

        let actions_applied = drain_action_queue(app, &mut action_rx, &dispatcher, &source)?;

        if events_processed || actions_applied {
            request_redraw = true;
        } else {
            tokio::time::sleep(Duration::from_millis(16)).await;
        }
    }
}

/// Run the interactive session until the user quits. A storage failure ends
/// the session with that error once the terminal is restored.
pub async fn run_chat(mut app: App, source: Arc<dyn ResponseSource>) -> Result<(), Box<dyn Error>> {
    let mut terminal = setup_terminal()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    info!(messages = app.transcript.len(), "chat session started");
    let result = event_loop(&mut app, &mut terminal, source, &mut event_rx).await;

    drop(event_rx);
    if let Err(err) = event_reader_handle.await {
        debug!(error = %err, "event reader ended abnormally");
    }
    restore_terminal(&mut terminal)?;
    info!(ok = result.is_ok(), "chat session ended");
    result
}
