use tracing::{debug, info};

use super::{App, AppCommand};
use crate::api::{GenerateOutcome, GenerateRequest};
use crate::core::message::ExchangeId;
use crate::core::persistence::PersistenceError;

/// Composing → Sent. Whitespace-only input is ignored and left in place.
pub(super) fn submit_input(app: &mut App) -> Option<AppCommand> {
    let input = app.ui.input_text();
    let text = input.trim();
    if text.is_empty() {
        return None;
    }
    let text = text.to_string();

    app.ui.reset_input();
    app.ui.clear_status();
    let exchange = app.open_exchange();
    app.transcript.push_user(text.clone(), exchange);
    app.ui.scroll_to_bottom();
    info!(%exchange, chars = text.chars().count(), "message submitted");

    Some(AppCommand::ScheduleTypingIndicator {
        exchange,
        message: text,
        delay: app.response_delay,
    })
}

/// Sent → Pending. The request uses the settings in effect right now, not
/// the ones at submit time.
pub(super) fn show_typing_indicator(
    app: &mut App,
    exchange: ExchangeId,
    message: String,
) -> Option<AppCommand> {
    if app.transcript.phase_of(exchange).is_none() {
        debug!(%exchange, "exchange cleared before its request started");
        app.close_exchange(exchange);
        return None;
    }
    if !app.transcript.begin_pending(exchange) {
        debug!(%exchange, "typing indicator already shown");
        return None;
    }
    app.ui.scroll_to_bottom();

    let request = GenerateRequest {
        message,
        model: app.settings.model.clone(),
        temperature: app.settings.temperature,
        top_p: app.settings.top_p,
    };
    debug!(%exchange, model = %request.model, "request started");
    Some(AppCommand::SpawnRequest { exchange, request })
}

/// Pending → Resolved | Failed, then write the transcript.
pub(super) fn response_received(
    app: &mut App,
    exchange: ExchangeId,
    outcome: GenerateOutcome,
) -> Result<(), PersistenceError> {
    app.close_exchange(exchange);
    match app.transcript.resolve(exchange, &outcome) {
        Some(_) => {
            info!(%exchange, failed = outcome.is_error(), "response rendered");
            app.ui.scroll_to_bottom();
            app.persistence.save(&app.transcript)
        }
        None => {
            debug!(%exchange, "response arrived for a cleared exchange; discarded");
            Ok(())
        }
    }
}
