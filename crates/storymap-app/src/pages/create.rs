//! Story creation page.
//!
//! Collects a title and a composed body, derives linkage from the
//! [`CreateContext`] the page was opened with, and submits exactly one
//! creation request per submission. While a request is outstanding the
//! form is busy and further submissions are ignored. A failed submission
//! keeps everything the user typed.

use storymap_client::RequestError;
use storymap_core::{CreateContext, Story, StoryDraft};

use crate::{AppAction, Composer, KeyInput, RequestId, RequestIds, Session};

/// Message shown when the store refuses or never receives a story.
pub const CREATE_FAILED: &str = "Failed to create story. Please try again.";

/// Form field receiving typed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    /// Single-line title.
    #[default]
    Title,
    /// Composer body.
    Body,
}

/// Outcome of a creation completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Story stored; the page is done.
    Created(Story),
    /// Store refused or unreachable; the form stays populated.
    Failed,
    /// Completion for a request this form no longer waits on.
    Stale,
}

/// State of the story creation page.
#[derive(Debug, Clone)]
pub struct CreateStoryPage {
    context: CreateContext,
    title: String,
    composer: Composer,
    focus: FormField,
    pending: Option<RequestId>,
    error: Option<String>,
}

impl CreateStoryPage {
    /// Empty form opened with `context`.
    pub fn new(context: CreateContext) -> Self {
        Self {
            context,
            title: String::new(),
            composer: Composer::new(),
            focus: FormField::Title,
            pending: None,
            error: None,
        }
    }

    /// Route typing keys to the focused field.
    ///
    /// Returns false if the key is not a typing key.
    pub fn handle_key(&mut self, key: KeyInput) -> bool {
        match (self.focus, key) {
            (_, KeyInput::Tab) => {
                self.focus = match self.focus {
                    FormField::Title => FormField::Body,
                    FormField::Body => FormField::Title,
                };
            },
            (FormField::Title, KeyInput::Char(c)) => self.title.push(c),
            (FormField::Title, KeyInput::Backspace) => {
                self.title.pop();
            },
            (FormField::Title, KeyInput::Enter) => self.focus = FormField::Body,
            (FormField::Body, KeyInput::Char(c)) => self.composer.insert_char(c),
            (FormField::Body, KeyInput::Backspace) => self.composer.backspace(),
            (FormField::Body, KeyInput::Enter) => self.composer.new_block(),
            _ => return false,
        }
        true
    }

    /// Submit the form.
    ///
    /// Returns the creation action, or `None` when submission is not
    /// allowed or the draft fails local validation (the reason is shown as
    /// the form error).
    pub fn submit(&mut self, session: &Session, ids: &mut RequestIds) -> Option<AppAction> {
        if !self.can_submit() {
            return None;
        }

        let draft = match StoryDraft::compose(
            self.title.clone(),
            &self.composer.to_html(),
            &self.context,
            session.author_id().clone(),
        ) {
            Ok(draft) => draft,
            Err(err) => {
                tracing::debug!(error = %err, "draft rejected locally");
                self.error = Some(capitalize(&err.to_string()));
                return None;
            },
        };

        let request = ids.next_id();
        tracing::debug!(%request, story_type = %draft.story_type, "submitting story");
        self.pending = Some(request);
        self.error = None;
        Some(AppAction::CreateStory { request, draft })
    }

    /// Apply a creation completion.
    pub fn resolve(&mut self, request: RequestId, result: Result<Story, RequestError>) -> Submission {
        if self.pending != Some(request) {
            tracing::debug!(%request, "discarding stale creation response");
            return Submission::Stale;
        }
        self.pending = None;

        match result {
            Ok(story) => {
                tracing::debug!(%request, id = %story.id, "story created");
                Submission::Created(story)
            },
            Err(err) => {
                tracing::warn!(%request, error = %err, "story creation failed");
                self.error = Some(CREATE_FAILED.to_string());
                Submission::Failed
            },
        }
    }

    /// True while a creation request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Outstanding creation request.
    pub fn pending(&self) -> Option<RequestId> {
        self.pending
    }

    /// Submit is enabled: not busy and the body holds text.
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && !self.composer.is_empty()
    }

    /// Context the page was opened with.
    pub fn context(&self) -> &CreateContext {
        &self.context
    }

    /// Title typed so far.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body editor.
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Body editor, for toolbar commands.
    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    /// Field receiving typed text.
    pub fn focus(&self) -> FormField {
        self.focus
    }

    /// Error from the last submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use storymap_core::{AuthorId, StoryType};

    use super::*;

    fn session() -> Session {
        Session::new(AuthorId::new("author-1"))
    }

    fn typed(page: &mut CreateStoryPage, title: &str, body: &str) {
        for c in title.chars() {
            page.handle_key(KeyInput::Char(c));
        }
        page.handle_key(KeyInput::Tab);
        for c in body.chars() {
            page.handle_key(KeyInput::Char(c));
        }
    }

    fn stored(draft: &StoryDraft) -> Story {
        Story {
            id: "new".into(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            story_type: draft.story_type,
            theme_room_id: draft.theme_room_id.clone().unwrap_or_else(|| "room".into()),
            prev: draft.prev.clone(),
            next: Vec::new(),
            author_id: draft.author_id.clone(),
        }
    }

    #[test]
    fn submit_disabled_without_body() {
        let mut page = CreateStoryPage::new(CreateContext::root("room-9".into()));
        let mut ids = RequestIds::default();
        typed(&mut page, "Chapter 1", "");

        assert!(!page.can_submit());
        assert!(page.submit(&session(), &mut ids).is_none());
    }

    #[test]
    fn root_submission_builds_root_draft() {
        let mut page = CreateStoryPage::new(CreateContext::root("room-9".into()));
        let mut ids = RequestIds::default();
        typed(&mut page, "Chapter 1", "It began.");

        let Some(AppAction::CreateStory { draft, .. }) = page.submit(&session(), &mut ids) else {
            panic!("expected creation action");
        };
        assert_eq!(draft.title, "Chapter 1");
        assert_eq!(draft.story_type, StoryType::Root);
        assert!(draft.prev.is_empty());
        assert_eq!(draft.content, "<p>It began.</p>");
        assert_eq!(draft.author_id, AuthorId::new("author-1"));
    }

    #[test]
    fn busy_form_ignores_second_submit() {
        let mut page = CreateStoryPage::new(CreateContext::root("room-9".into()));
        let mut ids = RequestIds::default();
        typed(&mut page, "t", "body");

        assert!(page.submit(&session(), &mut ids).is_some());
        assert!(page.is_busy());
        assert!(!page.can_submit());
        assert!(page.submit(&session(), &mut ids).is_none());
    }

    #[test]
    fn failure_keeps_form_populated() {
        let mut page = CreateStoryPage::new(CreateContext::root("room-9".into()));
        let mut ids = RequestIds::default();
        typed(&mut page, "Chapter 1", "It began.");
        let request = page.submit(&session(), &mut ids).and_then(|a| a.request_id()).unwrap();

        let outcome = page.resolve(request, Err(RequestError::Transport("down".into())));

        assert_eq!(outcome, Submission::Failed);
        assert_eq!(page.error(), Some(CREATE_FAILED));
        assert_eq!(page.title(), "Chapter 1");
        assert!(!page.composer().is_empty());
        assert!(page.can_submit());
    }

    #[test]
    fn success_reports_created_story() {
        let mut page = CreateStoryPage::new(CreateContext::continuing("s1".into(), "r".into()));
        let mut ids = RequestIds::default();
        typed(&mut page, "t", "body");
        let Some(AppAction::CreateStory { request, draft }) = page.submit(&session(), &mut ids)
        else {
            panic!("expected creation action");
        };

        let outcome = page.resolve(request, Ok(stored(&draft)));

        assert!(matches!(outcome, Submission::Created(story) if story.prev == draft.prev));
        assert!(!page.is_busy());
    }

    #[test]
    fn roomless_child_rejected_locally() {
        let mut page = CreateStoryPage::new(CreateContext::default());
        let mut ids = RequestIds::default();
        typed(&mut page, "t", "body");

        assert!(page.submit(&session(), &mut ids).is_none());
        assert!(!page.is_busy());
        assert!(page.error().is_some());
    }

    #[test]
    fn unknown_request_is_stale() {
        let mut page = CreateStoryPage::new(CreateContext::root("room-9".into()));
        assert_eq!(
            page.resolve(RequestId::new(99), Err(RequestError::Transport("x".into()))),
            Submission::Stale
        );
        assert!(page.error().is_none());
    }

    #[test]
    fn enter_in_title_moves_to_body() {
        let mut page = CreateStoryPage::new(CreateContext::default());
        page.handle_key(KeyInput::Enter);
        assert_eq!(page.focus(), FormField::Body);
        assert!(!page.handle_key(KeyInput::Up));
    }
}
