//! Collaborator contracts consulted by the action handlers
//!
//! The application state core never talks to the network or to disk
//! directly. It reads user preferences, checks connectivity, and persists
//! bookmarks through the traits defined here. Real clients plug in their
//! own implementations; [`memory`] provides in-process ones used by the
//! tests and the `pin-state` driver.

use async_trait::async_trait;
use secrecy::SecretString;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{
    Appearance, EditAfterSharing, Note, PeriodicSync, Post, PostListResult, PreferredDateFormat,
    PreferredDetailsView, Tag,
};

pub mod memory;
pub mod preferences;

pub use memory::{InMemoryNotesRepository, InMemoryPostsRepository, StaticConnectivity};
pub use preferences::PreferencesStore;

/// Parameters for creating or updating a bookmark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddPostRequest {
    pub url: String,
    pub title: String,
    pub description: String,
    pub private: bool,
    pub read_later: bool,
    pub tags: Vec<Tag>,
    /// Overwrite an existing bookmark with the same URL
    pub replace: bool,
}

impl AddPostRequest {
    /// Request that re-saves `post` unchanged apart from `read_later`
    pub fn mark_as_read(post: &Post) -> Self {
        Self {
            url: post.url.clone(),
            title: post.title.clone(),
            description: post.description.clone(),
            private: post.private,
            read_later: false,
            tags: post.tags.clone(),
            replace: true,
        }
    }
}

/// Filters and paging for one page of the post list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub newest_first: bool,
    /// Matched against title, description and URL; empty matches all
    pub search_term: String,
    /// Every one of these must be on the bookmark
    pub tags: Vec<Tag>,
    pub untagged_only: bool,
    pub public_only: bool,
    pub private_only: bool,
    pub read_later_only: bool,
    pub limit: usize,
    pub offset: usize,
    /// Bypass any local cache and resync with the server
    pub force_refresh: bool,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            newest_first: true,
            search_term: String::new(),
            tags: Vec::new(),
            untagged_only: false,
            public_only: false,
            private_only: false,
            read_later_only: false,
            limit: PostQuery::PAGE_SIZE,
            offset: 0,
            force_refresh: false,
        }
    }
}

impl PostQuery {
    pub const PAGE_SIZE: usize = 100;
}

/// Bookmark persistence
#[async_trait]
pub trait PostsRepository: Send + Sync {
    /// Create or update a bookmark
    async fn add(&self, request: AddPostRequest) -> Result<()>;

    /// Fetch a single bookmark by URL
    async fn get_post(&self, url: &str) -> Result<Post>;

    /// One page of the user's bookmarks
    ///
    /// `total_count` in the result counts every match, not just the page.
    async fn get_all_posts(&self, query: &PostQuery) -> Result<PostListResult>;

    /// Bookmarks currently popular across Pinboard
    async fn get_popular_posts(&self) -> Result<Vec<Post>>;
}

/// Note retrieval
#[async_trait]
pub trait NotesRepository: Send + Sync {
    async fn get_all_notes(&self) -> Result<Vec<Note>>;

    async fn get_note(&self, id: &str) -> Result<Note>;
}

/// Synchronous access to user preferences
///
/// Handlers read these on every transition rather than caching them, so a
/// change made while a screen is open is picked up by the next action.
pub trait UserRepository: Send + Sync {
    fn auth_token(&self) -> Option<SecretString>;
    fn set_auth_token(&self, token: Option<SecretString>);

    fn has_auth_token(&self) -> bool {
        self.auth_token().is_some()
    }

    fn show_description_in_lists(&self) -> bool;
    fn set_show_description_in_lists(&self, value: bool);

    fn preferred_details_view(&self) -> PreferredDetailsView;
    fn set_preferred_details_view(&self, value: PreferredDetailsView);

    fn mark_as_read_on_open(&self) -> bool;
    fn set_mark_as_read_on_open(&self, value: bool);

    fn auto_fill_description(&self) -> bool;
    fn set_auto_fill_description(&self, value: bool);

    /// `Some(true)` only when the user opted in; `None` defers to the
    /// account setting on the server.
    fn default_private(&self) -> Option<bool>;
    fn set_default_private(&self, value: bool);

    /// Same contract as [`UserRepository::default_private`].
    fn default_read_later(&self) -> Option<bool>;
    fn set_default_read_later(&self, value: bool);

    fn default_tags(&self) -> Vec<Tag>;
    fn set_default_tags(&self, value: Vec<Tag>);

    fn edit_after_sharing(&self) -> EditAfterSharing;
    fn set_edit_after_sharing(&self, value: EditAfterSharing);

    fn periodic_sync(&self) -> PeriodicSync;
    fn set_periodic_sync(&self, value: PeriodicSync);

    fn appearance(&self) -> Appearance;
    fn set_appearance(&self, value: Appearance);

    fn preferred_date_format(&self) -> PreferredDateFormat;
    fn set_preferred_date_format(&self, value: PreferredDateFormat);
}

/// Network reachability check
pub trait ConnectivityInfoProvider: Send + Sync {
    fn is_connected(&self) -> bool;
}

/// Shared handles to every collaborator
#[derive(Clone)]
pub struct Collaborators {
    pub posts: Arc<dyn PostsRepository>,
    pub notes: Arc<dyn NotesRepository>,
    pub user: Arc<dyn UserRepository>,
    pub connectivity: Arc<dyn ConnectivityInfoProvider>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
