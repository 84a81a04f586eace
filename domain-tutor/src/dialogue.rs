//! One turn of the dialogue: from the stored session and the student's text, to the new session
//! and the tutor's reply.

use crate::{
    config::TutorConfig,
    messages,
    session::{Phase, Session},
    Diagnostic,
};
use domain_error::Error;
use domain_parser::normalize::{is_declaration, normalize};
use domain_solve::{component::extract, error::EmptyDomainComponents};
use tracing::{info, warn};

/// Reacts to the student's text, updating the session slot of the conversation.
pub(crate) fn respond(
    slot: &mut Option<Session>,
    text: &str,
    config: &TutorConfig,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    if config.is_reset_command(text) {
        if slot.take().is_some() {
            info!("session destroyed by a reset command");
        }
        return messages::reset();
    }

    // a new declaration always starts over
    if is_declaration(text) {
        if slot.take().is_some() {
            info!("session replaced by a new declaration");
        }
        return start(slot, text, diagnostics);
    }

    let Some(session) = slot.as_mut() else {
        return start(slot, text, diagnostics);
    };

    match session.phase() {
        Phase::AwaitingCondition => session.answer_condition(text),
        Phase::AwaitingSolution => session.answer_solution(text, config, diagnostics),
        Phase::AwaitingDomain => {
            let reply = session.answer_domain(text, config, diagnostics);
            *slot = None;
            info!("session finished");
            reply
        },
    }
}

/// Reads the function declared in the text, and opens a session for it if its domain is
/// restricted.
fn start(slot: &mut Option<Session>, text: &str, diagnostics: &mut Vec<Diagnostic>) -> String {
    let normalized = match normalize(text) {
        Ok(normalized) => normalized,
        Err(error) => {
            warn!(text, "no function declaration found");
            diagnostics.push(Diagnostic { source: text.to_string(), error });
            return messages::not_recognized();
        },
    };

    let components = match extract(&normalized.expr) {
        Ok(components) => components,
        Err(error) => {
            warn!(expr = %normalized.expr, "function expression could not be parsed");
            diagnostics.push(Diagnostic { source: normalized.expr.clone(), error });
            return messages::unreadable_function(&normalized.expr);
        },
    };

    let declaration = normalized.declaration();
    if components.is_empty() {
        info!(%declaration, "function is defined everywhere");
        diagnostics.push(Diagnostic {
            source: text.to_string(),
            error: Error::new(vec![normalized.span.clone()], EmptyDomainComponents),
        });
        return messages::defined_everywhere(&declaration);
    }

    let count = components.len();
    let (session, unsolved) = Session::new(normalized.expr, components);
    diagnostics.extend(unsolved);
    let reply = format!("{}\n{}", messages::introduction(&declaration, count), session.ask_condition());

    info!(%declaration, components = count, "session created");
    *slot = Some(session);
    reply
}
