//! Compose workflow - editing, assisted drafting and submission of a new post.
//!
//! An assistant call is split in two halves so the front end can run the
//! backend on its own task:
//!
//! 1. [`ComposeWorkflow::begin_draft`] / [`ComposeWorkflow::begin_refine`]
//!    pass the admission gate and hand out a [`DraftTicket`].
//! 2. [`run_ticket`] talks to the assistant.
//! 3. [`ComposeWorkflow::finish`] applies the [`DraftResponse`].
//!
//! Every ticket carries the compose generation it was issued for. A response
//! for an older generation is discarded.

use std::panic::AssertUnwindSafe;

use chrono::NaiveDate;
use futures::FutureExt;

use crate::domain::{Draft, NewPost, Post};
use crate::error::ComposeError;
use crate::ports::{DraftAssistant, DraftError};

pub const DEFAULT_CATEGORY: &str = "מחשבות";

/// Editable compose fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeState {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub ai_prompt: String,
    pub is_generating: bool,
}

impl Default for ComposeState {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            excerpt: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            ai_prompt: String::new(),
            is_generating: false,
        }
    }
}

/// What to ask the assistant for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftRequest {
    Generate { prompt: String },
    Refine { content: String, instruction: String },
}

impl DraftRequest {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DraftRequest::Generate { .. } => "generate",
            DraftRequest::Refine { .. } => "refine",
        }
    }
}

/// Admission to one outstanding assistant call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftTicket {
    generation: u64,
    request: DraftRequest,
}

impl DraftTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &DraftRequest {
        &self.request
    }
}

/// What the assistant came back with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftResponse {
    Generated(Result<Draft, DraftError>),
    /// Always a usable content string; refinement never fails outward.
    Refined(String),
}

/// Result of an assistant round-trip that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftOutcome {
    /// The response was written into the compose fields.
    Applied,
    /// The gate refused the request (blank input or already generating).
    Skipped,
    /// The compose session the request belonged to is gone.
    Discarded,
}

/// Run a ticket against the assistant.
///
/// A panicking assistant is reported as [`DraftError::Generation`] so the
/// generating flag is always released by [`ComposeWorkflow::finish`].
pub async fn run_ticket(assistant: &dyn DraftAssistant, ticket: &DraftTicket) -> DraftResponse {
    match &ticket.request {
        DraftRequest::Generate { prompt } => {
            let result = AssertUnwindSafe(assistant.generate_draft(prompt))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    Err(DraftError::Generation("assistant panicked".to_string()))
                });
            DraftResponse::Generated(result)
        }
        DraftRequest::Refine {
            content,
            instruction,
        } => {
            let refined = AssertUnwindSafe(assistant.refine_draft(content, instruction))
                .catch_unwind()
                .await;
            match refined {
                Ok(refined) => DraftResponse::Refined(refined),
                Err(_) => {
                    tracing::warn!("Refine panicked, keeping current content");
                    DraftResponse::Refined(content.clone())
                }
            }
        }
    }
}

/// One compose session, from entering the compose view until leaving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeWorkflow {
    generation: u64,
    state: ComposeState,
}

impl ComposeWorkflow {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            state: ComposeState::default(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &ComposeState {
        &self.state
    }

    pub fn is_generating(&self) -> bool {
        self.state.is_generating
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.state.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.state.content = content.into();
    }

    pub fn set_excerpt(&mut self, excerpt: impl Into<String>) {
        self.state.excerpt = excerpt.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.state.category = category.into();
    }

    pub fn set_ai_prompt(&mut self, prompt: impl Into<String>) {
        self.state.ai_prompt = prompt.into();
    }

    /// Ask for a draft from the current prompt.
    ///
    /// Returns `None` when the prompt is blank or a request is outstanding.
    pub fn begin_draft(&mut self) -> Option<DraftTicket> {
        if self.state.is_generating || self.state.ai_prompt.trim().is_empty() {
            return None;
        }
        self.state.is_generating = true;
        Some(DraftTicket {
            generation: self.generation,
            request: DraftRequest::Generate {
                prompt: self.state.ai_prompt.clone(),
            },
        })
    }

    /// Ask for the current content to be rewritten.
    ///
    /// Returns `None` when there is nothing to refine, the instruction is
    /// blank, or a request is outstanding.
    pub fn begin_refine(&mut self, instruction: &str) -> Option<DraftTicket> {
        if self.state.is_generating
            || instruction.trim().is_empty()
            || self.state.content.trim().is_empty()
        {
            return None;
        }
        self.state.is_generating = true;
        Some(DraftTicket {
            generation: self.generation,
            request: DraftRequest::Refine {
                content: self.state.content.clone(),
                instruction: instruction.to_string(),
            },
        })
    }

    /// Apply an assistant response.
    ///
    /// Clears the generating flag for a matching ticket whatever the
    /// response. A failed generation leaves every field untouched.
    pub fn finish(
        &mut self,
        ticket: &DraftTicket,
        response: DraftResponse,
    ) -> Result<DraftOutcome, ComposeError> {
        if ticket.generation != self.generation {
            return Ok(DraftOutcome::Discarded);
        }
        self.state.is_generating = false;

        match response {
            DraftResponse::Generated(Ok(draft)) => {
                self.state.title = draft.title;
                self.state.content = draft.content;
                self.state.excerpt = draft.excerpt;
                self.state.ai_prompt.clear();
                Ok(DraftOutcome::Applied)
            }
            DraftResponse::Generated(Err(err)) => Err(ComposeError::Draft(err)),
            DraftResponse::Refined(content) => {
                self.state.content = content;
                Ok(DraftOutcome::Applied)
            }
        }
    }

    /// Build the post to publish. Fields are left as they are on failure.
    pub fn build_post(&self, today: NaiveDate) -> Result<Post, ComposeError> {
        let new = NewPost {
            title: self.state.title.clone(),
            content: self.state.content.clone(),
            excerpt: self.state.excerpt.clone(),
            category: self.state.category.clone(),
        };
        Ok(Post::create(new, today)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoticeKind;
    use async_trait::async_trait;

    struct PanickingAssistant;

    #[async_trait]
    impl DraftAssistant for PanickingAssistant {
        async fn generate_draft(&self, _prompt: &str) -> Result<Draft, DraftError> {
            panic!("backend exploded");
        }

        async fn refine_draft(&self, _content: &str, _instruction: &str) -> String {
            panic!("backend exploded");
        }
    }

    fn draft() -> Draft {
        Draft {
            title: "שעונים".to_string(),
            content: "<p>טיק טק</p>".to_string(),
            excerpt: "על זמן".to_string(),
        }
    }

    #[test]
    fn test_default_category() {
        let wf = ComposeWorkflow::new(1);
        assert_eq!(wf.state().category, DEFAULT_CATEGORY);
        assert!(!wf.is_generating());
    }

    #[test]
    fn test_blank_prompt_is_skipped() {
        let mut wf = ComposeWorkflow::new(1);
        assert!(wf.begin_draft().is_none());
        wf.set_ai_prompt("   ");
        assert!(wf.begin_draft().is_none());
        assert!(!wf.is_generating());
    }

    #[test]
    fn test_gate_refuses_second_request() {
        let mut wf = ComposeWorkflow::new(1);
        wf.set_ai_prompt("mechanical watches");
        let ticket = wf.begin_draft().unwrap();
        assert!(wf.is_generating());

        assert!(wf.begin_draft().is_none());
        wf.set_content("<p>x</p>");
        assert!(wf.begin_refine("shorter").is_none());
        assert_eq!(
            ticket.request(),
            &DraftRequest::Generate {
                prompt: "mechanical watches".to_string()
            }
        );
        assert_eq!(ticket.request().kind(), "generate");
    }

    #[test]
    fn test_refine_ticket_carries_content() {
        let mut wf = ComposeWorkflow::new(4);
        wf.set_content("<p>x</p>");
        let ticket = wf.begin_refine("shorter").unwrap();

        assert_eq!(ticket.generation(), 4);
        assert_eq!(ticket.request().kind(), "refine");
        assert_eq!(
            ticket.request(),
            &DraftRequest::Refine {
                content: "<p>x</p>".to_string(),
                instruction: "shorter".to_string()
            }
        );
    }

    #[test]
    fn test_successful_draft_overwrites_fields() {
        let mut wf = ComposeWorkflow::new(1);
        wf.set_ai_prompt("watches");
        wf.set_category("עיצוב");
        let ticket = wf.begin_draft().unwrap();

        let outcome = wf
            .finish(&ticket, DraftResponse::Generated(Ok(draft())))
            .unwrap();

        assert_eq!(outcome, DraftOutcome::Applied);
        assert_eq!(wf.state().title, "שעונים");
        assert_eq!(wf.state().excerpt, "על זמן");
        assert_eq!(wf.state().ai_prompt, "");
        assert_eq!(wf.state().category, "עיצוב");
        assert!(!wf.is_generating());
    }

    #[test]
    fn test_failed_draft_keeps_fields() {
        let mut wf = ComposeWorkflow::new(1);
        wf.set_title("mine");
        wf.set_ai_prompt("watches");
        let ticket = wf.begin_draft().unwrap();
        let before = ComposeState {
            is_generating: false,
            ..wf.state().clone()
        };

        let err = wf
            .finish(
                &ticket,
                DraftResponse::Generated(Err(DraftError::Configuration("no key".into()))),
            )
            .unwrap_err();

        assert_eq!(err, ComposeError::Draft(DraftError::Configuration("no key".into())));
        assert_eq!(err.notice_kind(), NoticeKind::DraftFailed);
        assert_eq!(wf.state(), &before);
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut old = ComposeWorkflow::new(1);
        old.set_ai_prompt("watches");
        let ticket = old.begin_draft().unwrap();

        let mut fresh = ComposeWorkflow::new(2);
        let outcome = fresh
            .finish(&ticket, DraftResponse::Generated(Ok(draft())))
            .unwrap();

        assert_eq!(outcome, DraftOutcome::Discarded);
        assert_eq!(fresh.state(), &ComposeState::default());
    }

    #[test]
    fn test_refine_replaces_content() {
        let mut wf = ComposeWorkflow::new(1);
        assert!(wf.begin_refine("shorter").is_none());
        wf.set_content("<p>long</p>");
        let ticket = wf.begin_refine("shorter").unwrap();

        wf.finish(&ticket, DraftResponse::Refined("<p>short</p>".into()))
            .unwrap();
        assert_eq!(wf.state().content, "<p>short</p>");
        assert!(!wf.is_generating());
    }

    #[test]
    fn test_build_post_validates() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let mut wf = ComposeWorkflow::new(1);
        wf.set_content("body");
        let err = wf.build_post(today).unwrap_err();
        assert_eq!(err.notice_kind(), NoticeKind::Validation);

        wf.set_title("T");
        let post = wf.build_post(today).unwrap();
        assert_eq!(post.title, "T");
        assert_eq!(post.category, DEFAULT_CATEGORY);
    }

    #[tokio::test]
    async fn test_panicking_assistant_releases_gate() {
        let mut wf = ComposeWorkflow::new(1);
        wf.set_ai_prompt("watches");
        let ticket = wf.begin_draft().unwrap();

        let response = run_ticket(&PanickingAssistant, &ticket).await;
        let err = wf.finish(&ticket, response).unwrap_err();

        assert!(matches!(err, ComposeError::Draft(DraftError::Generation(_))));
        assert!(!wf.is_generating());
        assert_eq!(wf.state().ai_prompt, "watches");
    }

    #[tokio::test]
    async fn test_panicking_refine_keeps_content() {
        let mut wf = ComposeWorkflow::new(1);
        wf.set_content("<p>keep</p>");
        let ticket = wf.begin_refine("rewrite").unwrap();

        let response = run_ticket(&PanickingAssistant, &ticket).await;
        wf.finish(&ticket, response).unwrap();

        assert_eq!(wf.state().content, "<p>keep</p>");
        assert!(!wf.is_generating());
    }
}
