//! Command dispatch - turns parsed commands into session operations.

use std::sync::Arc;

use tokio::sync::mpsc;

use quire_core::PublishingSession;
use quire_core::compose::{DraftResponse, DraftTicket, run_ticket};
use quire_core::domain::{NavTarget, PostId};
use quire_core::ports::DraftAssistant;
use quire_shared::{Notice, NoticeSeverity};

use crate::command::{Command, Field};
use crate::notice::notice_for;

/// A finished assistant call on its way back to the UI task.
pub type DraftCompletion = (DraftTicket, DraftResponse);

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Nothing,
    Show(Notice),
    Help,
    Quit,
}

/// Apply one command to the session.
///
/// Assistant calls are started on their own task; their results arrive on
/// `completions` and must be passed to [`finish_completion`].
pub fn dispatch(
    session: &mut PublishingSession,
    command: Command,
    completions: &mpsc::Sender<DraftCompletion>,
) -> Reply {
    match command {
        Command::List => session.navigate(NavTarget::List),
        Command::Compose => session.navigate(NavTarget::Compose),
        Command::Open(target) => {
            let id = resolve_post(session, &target);
            session.select_post(id);
        }
        Command::Back => session.back(),
        Command::Search(query) => session.update_search(query),
        Command::ClearSearch => session.clear_search(),
        Command::Set(field, value) => {
            let edited = session.edit_compose(|c| match field {
                Field::Title => c.set_title(value),
                Field::Excerpt => c.set_excerpt(value),
                Field::Category => c.set_category(value),
                Field::Content => c.set_content(value),
                Field::Prompt => c.set_ai_prompt(value),
            });
            if !edited {
                return not_composing();
            }
        }
        Command::Draft => match session.begin_ai_draft() {
            Some(ticket) => spawn_ticket(session.assistant(), ticket, completions.clone()),
            None => return refused(session),
        },
        Command::Refine(instruction) => match session.begin_refine(&instruction) {
            Some(ticket) => spawn_ticket(session.assistant(), ticket, completions.clone()),
            None => return refused(session),
        },
        Command::Publish => {
            return match session.submit_today() {
                Ok(post) => Reply::Show(Notice::published(&post.title)),
                Err(err) => Reply::Show(notice_for(&err)),
            };
        }
        Command::Help => return Reply::Help,
        Command::Quit => return Reply::Quit,
    }
    Reply::Nothing
}

/// Apply an assistant result that came back on the completion channel.
pub fn finish_completion(session: &mut PublishingSession, completion: DraftCompletion) -> Reply {
    let (ticket, response) = completion;
    match session.finish_draft(&ticket, response) {
        Ok(_) => Reply::Nothing,
        Err(err) => Reply::Show(notice_for(&err)),
    }
}

fn spawn_ticket(
    assistant: Arc<dyn DraftAssistant>,
    ticket: DraftTicket,
    completions: mpsc::Sender<DraftCompletion>,
) {
    tracing::debug!(
        generation = ticket.generation(),
        kind = ticket.request().kind(),
        "Assistant call started"
    );
    tokio::spawn(async move {
        let response = run_ticket(assistant.as_ref(), &ticket).await;
        if completions.send((ticket, response)).await.is_err() {
            tracing::debug!("Front end closed before the draft finished");
        }
    });
}

/// A list position (1-based) when it is one, otherwise a raw id.
fn resolve_post(session: &PublishingSession, target: &str) -> PostId {
    target
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| session.visible_posts().into_iter().nth(i))
        .map(|post| post.id)
        .unwrap_or_else(|| PostId::from(target))
}

fn not_composing() -> Reply {
    Reply::Show(Notice::new(
        "not-composing",
        NoticeSeverity::Info,
        "Type `compose` to start a new post.",
    ))
}

fn refused(session: &PublishingSession) -> Reply {
    let Some(compose) = session.compose() else {
        return not_composing();
    };
    let title = if compose.is_generating() {
        "The assistant is still working."
    } else {
        "Nothing to send to the assistant."
    };
    Reply::Show(Notice::new("assistant-busy", NoticeSeverity::Info, title))
}
