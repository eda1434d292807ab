//! View controller - navigation among list, detail and compose.

use crate::domain::{NavTarget, PostId, View};

/// Finite-state machine over [`View`], owning the view-scoped state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewController {
    view: View,
    selected_post_id: Option<PostId>,
    search_query: String,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_post_id(&self) -> Option<&PostId> {
        self.selected_post_id.as_ref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Go to `target`, always clearing the selection and the search query.
    pub fn navigate(&mut self, target: NavTarget) {
        self.view = target.into();
        self.selected_post_id = None;
        self.search_query.clear();
    }

    /// Open a post. The id is not checked; a dangling id renders as nothing
    /// selected.
    pub fn select_post(&mut self, id: PostId) {
        self.view = View::Detail;
        self.selected_post_id = Some(id);
    }

    /// Return from detail to the list, keeping the search query.
    ///
    /// Returns `false` when not in detail.
    pub fn back(&mut self) -> bool {
        if self.view != View::Detail {
            return false;
        }
        self.view = View::List;
        self.selected_post_id = None;
        true
    }

    /// Set the search query. Ignored outside the list.
    pub fn update_search(&mut self, query: impl Into<String>) -> bool {
        if self.view != View::List {
            return false;
        }
        self.search_query = query.into();
        true
    }

    pub fn clear_search(&mut self) -> bool {
        self.update_search(String::new())
    }
}
