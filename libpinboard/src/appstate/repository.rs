//! Single owner of the current screen state
//!
//! [`AppStateRepository`] holds the current [`Content`], routes every
//! [`Action`] to the handler of its domain and publishes the result.
//!
//! # Serialization
//!
//! The state lock is held for the whole handler call, so at most one
//! handler runs at a time and each one sees the result of the previous
//! action. `tokio::sync::Mutex` queues waiters in FIFO order, which makes
//! actions apply in the order they were submitted.
//!
//! # Observation
//!
//! Results are published on a `tokio::sync::watch` channel. Subscribers
//! only ever see complete values, and a late subscriber starts from the
//! current content. A slow subscriber skips intermediate values instead
//! of holding up the reducer.
//!
//! # Example
//!
//! ```no_run
//! use libpinboard::appstate::{AppStateRepository, NavigationAction};
//! use libpinboard::repository::Collaborators;
//!
//! # async fn example(collaborators: Collaborators) -> libpinboard::Result<()> {
//! let app_state = AppStateRepository::new(&collaborators, tokio::runtime::Handle::current());
//! let mut content = app_state.subscribe();
//!
//! app_state.run_action(NavigationAction::ViewTags).await?;
//! content.changed().await.ok();
//! println!("{}", content.borrow().name());
//! # Ok(())
//! # }
//! ```

use tokio::runtime::Handle;
use tokio::sync::{watch, Mutex};

use super::action::Action;
use super::content::{Content, LoginContent, PostListContent, ViewCategory};
use super::handler::ActionHandler;
use super::navigation::NavigationActionHandler;
use super::note::NoteActionHandler;
use super::popular::PopularActionHandler;
use super::post::PostActionHandler;
use super::search::SearchActionHandler;
use super::tag::TagActionHandler;
use super::user::UserActionHandler;
use crate::error::Result;
use crate::repository::Collaborators;

pub struct AppStateRepository {
    collaborators: Collaborators,
    content: Mutex<Content>,
    publisher: watch::Sender<Content>,
    navigation: NavigationActionHandler,
    post: PostActionHandler,
    search: SearchActionHandler,
    tag: TagActionHandler,
    note: NoteActionHandler,
    popular: PopularActionHandler,
    user: UserActionHandler,
}

impl AppStateRepository {
    /// Create the repository and its handlers
    ///
    /// `background` is the runtime that executes fire-and-forget requests
    /// started by navigation (marking a bookmark as read).
    pub fn new(collaborators: &Collaborators, background: Handle) -> Self {
        let initial = initial_content(collaborators);
        let (publisher, _) = watch::channel(initial.clone());
        let c = collaborators;

        Self {
            collaborators: c.clone(),
            content: Mutex::new(initial),
            publisher,
            navigation: NavigationActionHandler::new(
                c.user.clone(),
                c.posts.clone(),
                c.connectivity.clone(),
                background,
            ),
            post: PostActionHandler::new(c.user.clone(), c.connectivity.clone()),
            search: SearchActionHandler::new(),
            tag: TagActionHandler::new(c.user.clone(), c.connectivity.clone()),
            note: NoteActionHandler::new(c.connectivity.clone()),
            popular: PopularActionHandler::new(c.connectivity.clone()),
            user: UserActionHandler::new(c.user.clone(), c.connectivity.clone()),
        }
    }

    /// The latest published content
    pub fn content(&self) -> Content {
        self.publisher.borrow().clone()
    }

    /// Observe content changes, starting from the current value
    pub fn subscribe(&self) -> watch::Receiver<Content> {
        self.publisher.subscribe()
    }

    /// Apply `action` to the current content and publish the result
    ///
    /// A handler error leaves the current content untouched and is
    /// returned to the caller; nothing is published.
    pub async fn run_action(&self, action: impl Into<Action>) -> Result<Content> {
        let action = action.into();
        let name = action.name();
        let mut content = self.content.lock().await;

        let next = match self.dispatch(action, &content).await {
            Ok(next) => next,
            Err(error) => {
                tracing::warn!(action = name, content = content.name(), %error, "Action failed");
                return Err(error);
            }
        };

        tracing::debug!(
            action = name,
            from = content.name(),
            to = next.name(),
            "Applied action"
        );

        *content = next.clone();
        self.publisher.send_replace(next.clone());
        Ok(next)
    }

    /// Discard the navigation history and start over from the initial
    /// content for the current session
    pub async fn reset(&self) -> Content {
        let mut content = self.content.lock().await;
        let initial = initial_content(&self.collaborators);
        tracing::debug!(from = content.name(), to = initial.name(), "Reset application state");

        *content = initial.clone();
        self.publisher.send_replace(initial.clone());
        initial
    }

    async fn dispatch(&self, action: Action, current: &Content) -> Result<Content> {
        match action {
            Action::Navigation(action) => self.navigation.run_action(action, current).await,
            Action::Post(action) => self.post.run_action(action, current).await,
            Action::Search(action) => self.search.run_action(action, current).await,
            Action::Tag(action) => self.tag.run_action(action, current).await,
            Action::Note(action) => self.note.run_action(action, current).await,
            Action::Popular(action) => self.popular.run_action(action, current).await,
            Action::User(action) => self.user.run_action(action, current).await,
        }
    }
}

impl std::fmt::Debug for AppStateRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStateRepository")
            .field("content", &self.publisher.borrow().name())
            .field("subscribers", &self.publisher.receiver_count())
            .finish_non_exhaustive()
    }
}

/// All bookmarks when a session exists, otherwise the login screen
fn initial_content(collaborators: &Collaborators) -> Content {
    if collaborators.user.has_auth_token() {
        Content::from(PostListContent::new(
            ViewCategory::All,
            collaborators.user.show_description_in_lists(),
            collaborators.connectivity.is_connected(),
        ))
    } else {
        Content::from(LoginContent {
            is_unauthorized: false,
        })
    }
}
