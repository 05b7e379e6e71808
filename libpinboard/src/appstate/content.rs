//! Screen states
//!
//! [`Content`] is the closed set of states the client can be in. Values are
//! immutable: handlers build a new value for every transition and the old
//! one simply becomes unreachable.
//!
//! Variants with history hold the content they return to. Where the
//! predecessor type is fixed (a post detail always returns to a post list)
//! the link is typed, so a detail screen can never be built on top of the
//! wrong parent. Links are `Arc`s: a chain is a persistent list whose nodes
//! are shared between successive states, and since a node can only point to
//! a value that existed before it, chains are acyclic and always end at
//! [`Content::External`].

use serde::Serialize;
use std::sync::Arc;

use super::diff::PostListDiff;
use crate::types::{
    Appearance, EditAfterSharing, Note, PeriodicSync, Post, PreferredDateFormat,
    PreferredDetailsView, Tag,
};

/// Bookmark subset shown by a post list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewCategory {
    #[default]
    All,
    Recent,
    Public,
    Private,
    Unread,
    Untagged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortType {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl SortType {
    pub fn toggled(self) -> Self {
        match self {
            SortType::NewestFirst => SortType::OldestFirst,
            SortType::OldestFirst => SortType::NewestFirst,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SearchParameters {
    pub term: String,
    pub tags: Vec<Tag>,
}

impl SearchParameters {
    pub fn is_active(&self) -> bool {
        !self.term.is_empty() || !self.tags.is_empty()
    }
}

/// Pending data load for a post list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ShouldLoad {
    FirstPage,
    NextPage { offset: usize },
    /// Full resync with the server, bypassing the local cache
    ForceLoad,
    /// Data shown, but a background sync may still replace it
    Syncing,
    Loaded,
}

impl ShouldLoad {
    /// A page request is already in flight
    pub fn is_loading_page(&self) -> bool {
        matches!(self, ShouldLoad::FirstPage | ShouldLoad::NextPage { .. })
    }
}

/// A loaded page of bookmarks plus the diff against what was shown before
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostList {
    pub total_count: usize,
    pub list: Arc<[Post]>,
    pub diff: PostListDiff,
    pub already_displayed: bool,
}

impl PostList {
    pub fn new(total_count: usize, list: Arc<[Post]>, diff: PostListDiff) -> Self {
        Self {
            total_count,
            list,
            diff,
            already_displayed: false,
        }
    }
}

/// Note detail, either waiting for data or loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NoteDetail {
    /// `should_load` is false when offline: nothing will arrive
    Pending { should_load: bool },
    Loaded(Note),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginContent {
    pub is_unauthorized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostListContent {
    pub category: ViewCategory,
    pub posts: Option<PostList>,
    pub show_description: bool,
    pub sort_type: SortType,
    pub search_parameters: SearchParameters,
    pub should_load: ShouldLoad,
    pub is_connected: bool,
    pub can_force_sync: bool,
}

impl PostListContent {
    /// Fresh list for `category`, waiting for its first page
    pub fn new(category: ViewCategory, show_description: bool, is_connected: bool) -> Self {
        Self {
            category,
            posts: None,
            show_description,
            sort_type: SortType::NewestFirst,
            search_parameters: SearchParameters::default(),
            should_load: ShouldLoad::FirstPage,
            is_connected,
            can_force_sync: true,
        }
    }

    pub fn total_count(&self) -> usize {
        self.posts.as_ref().map_or(0, |posts| posts.total_count)
    }

    pub fn current_count(&self) -> usize {
        self.posts.as_ref().map_or(0, |posts| posts.list.len())
    }

    pub fn current_list(&self) -> &[Post] {
        match &self.posts {
            Some(posts) => &posts.list[..],
            None => &[],
        }
    }

    pub fn with_should_load(&self, should_load: ShouldLoad) -> Self {
        Self {
            should_load,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetailContent {
    pub post: Post,
    pub previous_content: Arc<PostListContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalBrowserContent {
    pub post: Post,
    pub previous_content: Arc<Content>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchContent {
    pub search_parameters: SearchParameters,
    pub available_tags: Vec<Tag>,
    pub all_tags: Vec<Tag>,
    pub should_load_tags: bool,
    pub previous_content: Arc<PostListContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddPostContent {
    pub default_private: bool,
    pub default_read_later: bool,
    pub default_tags: Vec<Tag>,
    pub previous_content: Arc<PostListContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditPostContent {
    pub post: Post,
    pub previous_content: Arc<Content>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagListContent {
    pub tags: Vec<Tag>,
    pub should_load: bool,
    pub is_connected: bool,
    pub previous_content: Arc<PostListContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteListContent {
    pub notes: Vec<Note>,
    pub should_load: bool,
    pub is_connected: bool,
    pub previous_content: Arc<PostListContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteDetailContent {
    pub id: String,
    pub note: NoteDetail,
    pub is_connected: bool,
    pub previous_content: Arc<NoteListContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularPostsContent {
    pub posts: Vec<Post>,
    pub should_load: bool,
    pub is_connected: bool,
    pub previous_content: Arc<PostListContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularPostDetailContent {
    pub post: Post,
    pub previous_content: Arc<PopularPostsContent>,
}

/// Snapshot of the user preferences taken when the screen opened
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPreferencesContent {
    pub periodic_sync: PeriodicSync,
    pub appearance: Appearance,
    pub preferred_date_format: PreferredDateFormat,
    pub preferred_details_view: PreferredDetailsView,
    pub mark_as_read_on_open: bool,
    pub auto_fill_description: bool,
    pub show_description_in_lists: bool,
    pub default_private: bool,
    pub default_read_later: bool,
    pub edit_after_sharing: EditAfterSharing,
    pub default_tags: Vec<Tag>,
    pub previous_content: Arc<PostListContent>,
}

/// What the client is showing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "content", rename_all = "snake_case")]
pub enum Content {
    Login(LoginContent),
    PostList(PostListContent),
    PostDetail(PostDetailContent),
    ExternalBrowser(ExternalBrowserContent),
    Search(SearchContent),
    AddPost(AddPostContent),
    EditPost(EditPostContent),
    TagList(TagListContent),
    NoteList(NoteListContent),
    NoteDetail(NoteDetailContent),
    PopularPosts(PopularPostsContent),
    PopularPostDetail(PopularPostDetailContent),
    UserPreferences(UserPreferencesContent),
    /// Nothing of ours on screen: the user came in through a share or deep
    /// link and should go back where they came from
    External,
}

impl Content {
    /// The content this one returns to, or `None` for [`Content::External`]
    pub fn previous_content(&self) -> Option<Content> {
        let previous = match self {
            Content::Login(_) | Content::PostList(_) => Content::External,
            Content::PostDetail(c) => Content::from(c.previous_content.as_ref().clone()),
            Content::ExternalBrowser(c) => c.previous_content.as_ref().clone(),
            Content::Search(c) => Content::from(c.previous_content.as_ref().clone()),
            Content::AddPost(c) => Content::from(c.previous_content.as_ref().clone()),
            Content::EditPost(c) => c.previous_content.as_ref().clone(),
            Content::TagList(c) => Content::from(c.previous_content.as_ref().clone()),
            Content::NoteList(c) => Content::from(c.previous_content.as_ref().clone()),
            Content::NoteDetail(c) => Content::from(c.previous_content.as_ref().clone()),
            Content::PopularPosts(c) => Content::from(c.previous_content.as_ref().clone()),
            Content::PopularPostDetail(c) => Content::from(c.previous_content.as_ref().clone()),
            Content::UserPreferences(c) => Content::from(c.previous_content.as_ref().clone()),
            Content::External => return None,
        };
        Some(previous)
    }

    pub fn has_history(&self) -> bool {
        !matches!(self, Content::External)
    }

    /// Connectivity flag for screens that load remote data
    pub fn is_connected(&self) -> Option<bool> {
        match self {
            Content::PostList(c) => Some(c.is_connected),
            Content::TagList(c) => Some(c.is_connected),
            Content::NoteList(c) => Some(c.is_connected),
            Content::NoteDetail(c) => Some(c.is_connected),
            Content::PopularPosts(c) => Some(c.is_connected),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Content::Login(_) => "Login",
            Content::PostList(_) => "PostList",
            Content::PostDetail(_) => "PostDetail",
            Content::ExternalBrowser(_) => "ExternalBrowser",
            Content::Search(_) => "Search",
            Content::AddPost(_) => "AddPost",
            Content::EditPost(_) => "EditPost",
            Content::TagList(_) => "TagList",
            Content::NoteList(_) => "NoteList",
            Content::NoteDetail(_) => "NoteDetail",
            Content::PopularPosts(_) => "PopularPosts",
            Content::PopularPostDetail(_) => "PopularPostDetail",
            Content::UserPreferences(_) => "UserPreferences",
            Content::External => "External",
        }
    }

    /// Names along the back-navigation chain, nearest first
    pub fn history(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut cursor = self.previous_content();
        while let Some(content) = cursor {
            names.push(content.name());
            cursor = content.previous_content();
        }
        names
    }
}

macro_rules! content_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Content {
                fn from(content: $ty) -> Self {
                    Content::$variant(content)
                }
            }
        )*
    };
}

content_from!(
    Login(LoginContent),
    PostList(PostListContent),
    PostDetail(PostDetailContent),
    ExternalBrowser(ExternalBrowserContent),
    Search(SearchContent),
    AddPost(AddPostContent),
    EditPost(EditPostContent),
    TagList(TagListContent),
    NoteList(NoteListContent),
    NoteDetail(NoteDetailContent),
    PopularPosts(PopularPostsContent),
    PopularPostDetail(PopularPostDetailContent),
    UserPreferences(UserPreferencesContent),
);
