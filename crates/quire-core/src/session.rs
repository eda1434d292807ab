//! Publishing session - the single owner of UI state.
//!
//! Ties the view controller and the active compose workflow to the injected
//! store, assistant and notifier. Front ends call the operations here,
//! listen for [`ChangeEvent`]s and re-derive [`Screen`] on each one.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::compose::{
    ComposeState, ComposeWorkflow, DraftOutcome, DraftResponse, DraftTicket, run_ticket,
};
use crate::domain::{NavTarget, Post, PostId, View};
use crate::error::{ComposeError, DomainError};
use crate::navigation::ViewController;
use crate::ports::{ChangeEvent, ChangeNotifier, DraftAssistant, PostStore};
use crate::search::filter_posts;

/// Everything a front end needs to draw the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    List {
        query: String,
        posts: Vec<Post>,
        total: usize,
    },
    /// `post` is `None` when the selected id does not resolve.
    Detail { post: Option<Post> },
    Compose { form: ComposeState },
}

pub struct PublishingSession {
    store: Arc<dyn PostStore>,
    assistant: Arc<dyn DraftAssistant>,
    notifier: Arc<dyn ChangeNotifier>,
    controller: ViewController,
    compose: Option<ComposeWorkflow>,
    compose_generation: u64,
}

impl PublishingSession {
    pub fn new(
        store: Arc<dyn PostStore>,
        assistant: Arc<dyn DraftAssistant>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            store,
            assistant,
            notifier,
            controller: ViewController::new(),
            compose: None,
            compose_generation: 0,
        }
    }

    pub fn view(&self) -> View {
        self.controller.view()
    }

    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    pub fn compose(&self) -> Option<&ComposeWorkflow> {
        self.compose.as_ref()
    }

    /// Handle to the assistant, for running a ticket off the UI task.
    pub fn assistant(&self) -> Arc<dyn DraftAssistant> {
        Arc::clone(&self.assistant)
    }

    /// Posts shown in the list: the store filtered by the search query.
    pub fn visible_posts(&self) -> Vec<Post> {
        filter_posts(&self.store.all(), self.controller.search_query())
    }

    pub fn selected_post(&self) -> Option<Post> {
        self.controller
            .selected_post_id()
            .and_then(|id| self.store.find_by_id(id))
    }

    /// Derive the current screen. Re-runs the search projection every time.
    pub fn screen(&self) -> Screen {
        match self.controller.view() {
            View::List => Screen::List {
                query: self.controller.search_query().to_string(),
                posts: self.visible_posts(),
                total: self.store.len(),
            },
            View::Detail => Screen::Detail {
                post: self.selected_post(),
            },
            View::Compose => Screen::Compose {
                form: self
                    .compose
                    .as_ref()
                    .map(|c| c.state().clone())
                    .unwrap_or_default(),
            },
        }
    }

    pub fn navigate(&mut self, target: NavTarget) {
        let entering_compose = target == NavTarget::Compose && self.view() != View::Compose;
        self.controller.navigate(target);

        if entering_compose {
            self.compose_generation += 1;
            self.compose = Some(ComposeWorkflow::new(self.compose_generation));
        }
        self.after_transition();
    }

    pub fn select_post(&mut self, id: PostId) {
        if self.store.find_by_id(&id).is_none() {
            tracing::debug!(post_id = %id, "Selected post does not resolve");
        }
        self.controller.select_post(id);
        self.after_transition();
    }

    pub fn back(&mut self) {
        if self.controller.back() {
            self.after_transition();
        }
    }

    pub fn update_search(&mut self, query: impl Into<String>) {
        if self.controller.update_search(query) {
            self.notifier.notify(ChangeEvent::SearchChanged);
        }
    }

    pub fn clear_search(&mut self) {
        if self.controller.clear_search() {
            self.notifier.notify(ChangeEvent::SearchChanged);
        }
    }

    /// Edit the compose fields. Returns `false` outside the compose view.
    pub fn edit_compose(&mut self, edit: impl FnOnce(&mut ComposeWorkflow)) -> bool {
        let Some(compose) = self.compose.as_mut() else {
            return false;
        };
        edit(compose);
        self.notifier.notify(ChangeEvent::ComposeChanged);
        true
    }

    /// First half of an assisted draft. `None` if the gate refuses.
    pub fn begin_ai_draft(&mut self) -> Option<DraftTicket> {
        let ticket = self.compose.as_mut()?.begin_draft()?;
        tracing::debug!(generation = ticket.generation(), "Draft requested");
        self.notifier.notify(ChangeEvent::ComposeChanged);
        Some(ticket)
    }

    /// First half of a refinement. `None` if the gate refuses.
    pub fn begin_refine(&mut self, instruction: &str) -> Option<DraftTicket> {
        let ticket = self.compose.as_mut()?.begin_refine(instruction)?;
        tracing::debug!(generation = ticket.generation(), "Refinement requested");
        self.notifier.notify(ChangeEvent::ComposeChanged);
        Some(ticket)
    }

    /// Second half: apply whatever the assistant returned.
    ///
    /// Responses for a compose session the user already left are dropped
    /// without touching any state.
    pub fn finish_draft(
        &mut self,
        ticket: &DraftTicket,
        response: DraftResponse,
    ) -> Result<DraftOutcome, ComposeError> {
        let Some(compose) = self.compose.as_mut() else {
            tracing::debug!(
                generation = ticket.generation(),
                "Draft response arrived after leaving compose"
            );
            return Ok(DraftOutcome::Discarded);
        };

        let result = compose.finish(ticket, response);
        if let Ok(DraftOutcome::Discarded) = result {
            tracing::debug!(generation = ticket.generation(), "Stale draft response dropped");
            return result;
        }
        if let Err(err) = &result {
            tracing::warn!(error = %err, "Draft generation failed");
        }
        self.notifier.notify(ChangeEvent::ComposeChanged);
        result
    }

    /// Generate a draft inline, suspending until the assistant answers.
    pub async fn request_ai_draft(&mut self) -> Result<DraftOutcome, ComposeError> {
        let Some(ticket) = self.begin_ai_draft() else {
            return Ok(DraftOutcome::Skipped);
        };
        let assistant = self.assistant();
        let response = run_ticket(assistant.as_ref(), &ticket).await;
        self.finish_draft(&ticket, response)
    }

    /// Refine the content inline. Never fails because of the assistant.
    pub async fn refine_content(&mut self, instruction: &str) -> Result<DraftOutcome, ComposeError> {
        let Some(ticket) = self.begin_refine(instruction) else {
            return Ok(DraftOutcome::Skipped);
        };
        let assistant = self.assistant();
        let response = run_ticket(assistant.as_ref(), &ticket).await;
        self.finish_draft(&ticket, response)
    }

    /// Publish the compose fields as a new post dated `today`.
    ///
    /// On success the post is at the head of the store and the view is back
    /// on the list. On failure nothing changes.
    pub fn submit(&mut self, today: NaiveDate) -> Result<Post, ComposeError> {
        let compose = self.compose.as_ref().ok_or_else(|| {
            DomainError::Validation("nothing to publish outside the compose view".to_string())
        })?;

        let post = compose.build_post(today)?;
        self.store.append(post.clone())?;
        tracing::info!(post_id = %post.id, title = %post.title, "Post published");

        self.navigate(NavTarget::List);
        Ok(post)
    }

    /// [`PublishingSession::submit`] dated with the local calendar day.
    pub fn submit_today(&mut self) -> Result<Post, ComposeError> {
        self.submit(chrono::Local::now().date_naive())
    }

    fn after_transition(&mut self) {
        if self.view() != View::Compose {
            self.compose = None;
        }
        tracing::debug!(view = %self.view(), "View changed");
        self.notifier.notify(ChangeEvent::ViewChanged { view: self.view() });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::Draft;
    use crate::error::NoticeKind;
    use crate::ports::DraftError;

    #[derive(Default)]
    struct VecStore {
        posts: Mutex<Vec<Post>>,
    }

    impl VecStore {
        fn with(posts: Vec<Post>) -> Self {
            Self {
                posts: Mutex::new(posts),
            }
        }
    }

    impl PostStore for VecStore {
        fn all(&self) -> Vec<Post> {
            self.posts.lock().unwrap().clone()
        }

        fn append(&self, post: Post) -> Result<(), DomainError> {
            let mut posts = self.posts.lock().unwrap();
            if posts.iter().any(|p| p.id == post.id) {
                return Err(DomainError::Validation("duplicate".into()));
            }
            posts.insert(0, post);
            Ok(())
        }

        fn find_by_id(&self, id: &PostId) -> Option<Post> {
            self.posts.lock().unwrap().iter().find(|p| &p.id == id).cloned()
        }

        fn len(&self) -> usize {
            self.posts.lock().unwrap().len()
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        events: Mutex<Vec<ChangeEvent>>,
    }

    impl RecordingNotifier {
        fn events(&self) -> Vec<ChangeEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ChangeNotifier for RecordingNotifier {
        fn notify(&self, event: ChangeEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    struct FakeAssistant {
        result: Result<Draft, DraftError>,
        calls: AtomicUsize,
    }

    impl FakeAssistant {
        fn ok() -> Self {
            Self {
                result: Ok(Draft {
                    title: "שעונים מכניים".into(),
                    content: "<p>טיק טק</p>".into(),
                    excerpt: "על זמן".into(),
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(err: DraftError) -> Self {
            Self {
                result: Err(err),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DraftAssistant for FakeAssistant {
        async fn generate_draft(&self, _prompt: &str) -> Result<Draft, DraftError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }

        async fn refine_draft(&self, content: &str, instruction: &str) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.result.is_err() {
                return content.to_string();
            }
            format!("{content}<!-- {instruction} -->")
        }
    }

    fn post(id: &str, title: &str) -> Post {
        Post {
            id: PostId::from(id),
            title: title.to_string(),
            excerpt: String::new(),
            content: format!("<p>{title}</p>"),
            date: "1 בינואר 2024".into(),
            reading_time: "1 דקות קריאה".into(),
            category: "כללי".into(),
            cover_image: None,
        }
    }

    struct Harness {
        session: PublishingSession,
        store: Arc<VecStore>,
        assistant: Arc<FakeAssistant>,
        notifier: Arc<RecordingNotifier>,
    }

    fn harness(assistant: FakeAssistant) -> Harness {
        let store = Arc::new(VecStore::with(vec![post("2", "Beta"), post("1", "Alpha")]));
        let assistant = Arc::new(assistant);
        let notifier = Arc::new(RecordingNotifier::default());
        let session = PublishingSession::new(store.clone(), assistant.clone(), notifier.clone());
        Harness {
            session,
            store,
            assistant,
            notifier,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn test_list_screen_filters() {
        let mut h = harness(FakeAssistant::ok());
        h.session.update_search("alp");

        match h.session.screen() {
            Screen::List { query, posts, total } => {
                assert_eq!(query, "alp");
                assert_eq!(total, 2);
                assert_eq!(posts.len(), 1);
                assert_eq!(posts[0].title, "Alpha");
            }
            other => panic!("unexpected screen {other:?}"),
        }
        assert_eq!(h.notifier.events(), vec![ChangeEvent::SearchChanged]);
    }

    #[test]
    fn test_select_and_back() {
        let mut h = harness(FakeAssistant::ok());
        h.session.update_search("a");
        h.session.select_post(PostId::from("1"));

        assert_eq!(h.session.view(), View::Detail);
        assert_eq!(h.session.selected_post().unwrap().title, "Alpha");

        h.session.back();
        assert_eq!(h.session.view(), View::List);
        assert_eq!(h.session.controller().search_query(), "a");
    }

    #[test]
    fn test_dangling_selection_renders_nothing() {
        let mut h = harness(FakeAssistant::ok());
        h.session.select_post(PostId::from("missing"));

        assert_eq!(h.session.view(), View::Detail);
        assert_eq!(h.session.screen(), Screen::Detail { post: None });
    }

    #[test]
    fn test_navigation_round_trip_resets() {
        let mut h = harness(FakeAssistant::ok());
        h.session.update_search("beta");
        h.session.navigate(NavTarget::Compose);
        h.session.navigate(NavTarget::List);

        assert_eq!(h.session.controller().search_query(), "");
        assert!(h.session.controller().selected_post_id().is_none());
        assert!(h.session.compose().is_none());
        assert_eq!(
            h.notifier.events(),
            vec![
                ChangeEvent::SearchChanged,
                ChangeEvent::ViewChanged { view: View::Compose },
                ChangeEvent::ViewChanged { view: View::List },
            ]
        );
    }

    #[test]
    fn test_renavigating_compose_keeps_draft() {
        let mut h = harness(FakeAssistant::ok());
        h.session.navigate(NavTarget::Compose);
        h.session.edit_compose(|c| c.set_title("kept"));
        h.session.navigate(NavTarget::Compose);

        assert_eq!(h.session.compose().unwrap().state().title, "kept");
    }

    #[test]
    fn test_edit_outside_compose_is_refused() {
        let mut h = harness(FakeAssistant::ok());
        assert!(!h.session.edit_compose(|c| c.set_title("x")));
    }

    #[tokio::test]
    async fn test_ai_draft_fills_fields() {
        let mut h = harness(FakeAssistant::ok());
        h.session.navigate(NavTarget::Compose);
        h.session.edit_compose(|c| c.set_ai_prompt("watches"));

        let outcome = h.session.request_ai_draft().await.unwrap();

        assert_eq!(outcome, DraftOutcome::Applied);
        let state = h.session.compose().unwrap().state();
        assert_eq!(state.title, "שעונים מכניים");
        assert_eq!(state.ai_prompt, "");
        assert!(!state.is_generating);
        assert_eq!(h.assistant.calls(), 1);
    }

    #[tokio::test]
    async fn test_configuration_error_leaves_fields() {
        let mut h = harness(FakeAssistant::failing(DraftError::Configuration(
            "API key not found".into(),
        )));
        h.session.navigate(NavTarget::Compose);
        h.session.edit_compose(|c| {
            c.set_title("mine");
            c.set_ai_prompt("watches");
        });

        let err = h.session.request_ai_draft().await.unwrap_err();

        assert!(matches!(err, ComposeError::Draft(DraftError::Configuration(_))));
        assert_eq!(err.notice_kind(), NoticeKind::DraftFailed);
        let state = h.session.compose().unwrap().state();
        assert_eq!(state.title, "mine");
        assert_eq!(state.ai_prompt, "watches");
        assert!(!state.is_generating);
    }

    #[tokio::test]
    async fn test_gate_blocks_second_backend_call() {
        let mut h = harness(FakeAssistant::ok());
        h.session.navigate(NavTarget::Compose);
        h.session.edit_compose(|c| c.set_ai_prompt("watches"));

        let _outstanding = h.session.begin_ai_draft().unwrap();
        let outcome = h.session.request_ai_draft().await.unwrap();

        assert_eq!(outcome, DraftOutcome::Skipped);
        assert_eq!(h.assistant.calls(), 0);
        assert_eq!(h.store.len(), 2);
    }

    #[tokio::test]
    async fn test_response_after_leaving_compose_is_discarded() {
        let mut h = harness(FakeAssistant::ok());
        h.session.navigate(NavTarget::Compose);
        h.session.edit_compose(|c| c.set_ai_prompt("watches"));
        let ticket = h.session.begin_ai_draft().unwrap();

        h.session.navigate(NavTarget::List);
        let response = run_ticket(h.assistant.as_ref(), &ticket).await;
        assert_eq!(
            h.session.finish_draft(&ticket, response.clone()).unwrap(),
            DraftOutcome::Discarded
        );
        assert_eq!(h.session.view(), View::List);

        // Coming back opens a fresh compose session; the old answer still
        // must not land in it.
        h.session.navigate(NavTarget::Compose);
        assert_eq!(
            h.session.finish_draft(&ticket, response).unwrap(),
            DraftOutcome::Discarded
        );
        assert_eq!(h.session.compose().unwrap().state(), &ComposeState::default());
    }

    #[tokio::test]
    async fn test_refine_is_best_effort() {
        let mut h = harness(FakeAssistant::failing(DraftError::Generation("503".into())));
        h.session.navigate(NavTarget::Compose);
        h.session.edit_compose(|c| c.set_content("<p>draft</p>"));

        let outcome = h.session.refine_content("make it shorter").await.unwrap();

        assert_eq!(outcome, DraftOutcome::Applied);
        assert_eq!(h.session.compose().unwrap().state().content, "<p>draft</p>");
        assert!(!h.session.compose().unwrap().is_generating());
    }

    #[test]
    fn test_submit_with_empty_title_is_rejected() {
        let mut h = harness(FakeAssistant::ok());
        h.session.navigate(NavTarget::Compose);
        h.session.edit_compose(|c| c.set_content("<p>body</p>"));

        let err = h.session.submit(today()).unwrap_err();

        assert_eq!(err.notice_kind(), NoticeKind::Validation);
        assert_eq!(h.store.len(), 2);
        assert_eq!(h.session.view(), View::Compose);
        assert_eq!(h.session.compose().unwrap().state().content, "<p>body</p>");
    }

    #[test]
    fn test_submit_publishes_at_head() {
        let mut h = harness(FakeAssistant::ok());
        h.session.navigate(NavTarget::Compose);
        h.session.edit_compose(|c| {
            c.set_title("T");
            c.set_content("0123456789");
        });

        let post = h.session.submit(today()).unwrap();

        assert_eq!(post.reading_time, "1 דקות קריאה");
        assert_eq!(post.date, "17 באוקטובר 2026");
        assert_eq!(h.store.all()[0], post);
        assert_eq!(h.store.len(), 3);
        assert_eq!(h.session.view(), View::List);
        assert!(h.session.compose().is_none());
    }

    #[test]
    fn test_submit_outside_compose_fails() {
        let mut h = harness(FakeAssistant::ok());
        let err = h.session.submit(today()).unwrap_err();
        assert!(matches!(err, ComposeError::Domain(DomainError::Validation(_))));
    }
}
