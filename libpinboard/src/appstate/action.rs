//! Actions for the state machine
//!
//! All state transitions are triggered by actions. Actions are immutable
//! descriptions of what the user (or a finished load) asks for; each
//! domain has its own enum and its own handler.
//!
//! In JSON an action is externally tagged by domain, then by name:
//!
//! ```json
//! {"navigation": "navigate_back"}
//! {"post": {"refresh": {"force": true}}}
//! {"search": {"set_term": "rust"}}
//! ```

use serde::{Deserialize, Serialize};

use super::content::ViewCategory;
use crate::types::{Note, Post, PostListResult, Tag};

/// Any action, grouped by the handler that reacts to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Navigation(NavigationAction),
    Post(PostAction),
    Search(SearchAction),
    Tag(TagAction),
    Note(NoteAction),
    Popular(PopularAction),
    User(UserAction),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Navigation(action) => action.name(),
            Action::Post(action) => action.name(),
            Action::Search(action) => action.name(),
            Action::Tag(action) => action.name(),
            Action::Note(action) => action.name(),
            Action::Popular(action) => action.name(),
            Action::User(action) => action.name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationAction {
    /// Return to the previous content
    NavigateBack,

    /// Open a fresh post list for a category
    ViewCategory(ViewCategory),

    /// Open a bookmark the way the user prefers
    ViewPost(Post),

    ViewSearch,

    /// Open the editor for a new bookmark
    AddPost,

    ViewTags,

    ViewNotes,

    /// Open a note by id
    ViewNote(String),

    ViewPopular,

    ViewPreferences,
}

impl NavigationAction {
    pub fn name(&self) -> &'static str {
        match self {
            NavigationAction::NavigateBack => "NavigateBack",
            NavigationAction::ViewCategory(_) => "ViewCategory",
            NavigationAction::ViewPost(_) => "ViewPost",
            NavigationAction::ViewSearch => "ViewSearch",
            NavigationAction::AddPost => "AddPost",
            NavigationAction::ViewTags => "ViewTags",
            NavigationAction::ViewNotes => "ViewNotes",
            NavigationAction::ViewNote(_) => "ViewNote",
            NavigationAction::ViewPopular => "ViewPopular",
            NavigationAction::ViewPreferences => "ViewPreferences",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostAction {
    // === Loading ===
    /// Reload the list; `force` bypasses the local cache
    Refresh {
        #[serde(default)]
        force: bool,
    },

    /// First page arrived
    SetPosts(PostListResult),

    /// The list scrolled close to its end
    GetNextPostPage,

    /// Next page arrived
    SetNextPostPage(PostListResult),

    /// The presentation layer applied the pending diff
    PostsDisplayed,

    ToggleSorting,

    // === Editing ===
    EditPost(Post),

    /// Edit a bookmark shared into the app from elsewhere
    EditPostFromShare(Post),

    /// A bookmark was created or updated
    PostSaved(Post),

    PostDeleted,
}

impl PostAction {
    pub fn name(&self) -> &'static str {
        match self {
            PostAction::Refresh { .. } => "Refresh",
            PostAction::SetPosts(_) => "SetPosts",
            PostAction::GetNextPostPage => "GetNextPostPage",
            PostAction::SetNextPostPage(_) => "SetNextPostPage",
            PostAction::PostsDisplayed => "PostsDisplayed",
            PostAction::ToggleSorting => "ToggleSorting",
            PostAction::EditPost(_) => "EditPost",
            PostAction::EditPostFromShare(_) => "EditPostFromShare",
            PostAction::PostSaved(_) => "PostSaved",
            PostAction::PostDeleted => "PostDeleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchAction {
    RefreshSearchTags,
    SetTerm(String),
    /// All tags of the account arrived
    SetSearchTags(Vec<Tag>),
    AddSearchTag(Tag),
    RemoveSearchTag(Tag),
    /// Apply the parameters to the post list
    Search,
    ClearSearch,
}

impl SearchAction {
    pub fn name(&self) -> &'static str {
        match self {
            SearchAction::RefreshSearchTags => "RefreshSearchTags",
            SearchAction::SetTerm(_) => "SetTerm",
            SearchAction::SetSearchTags(_) => "SetSearchTags",
            SearchAction::AddSearchTag(_) => "AddSearchTag",
            SearchAction::RemoveSearchTag(_) => "RemoveSearchTag",
            SearchAction::Search => "Search",
            SearchAction::ClearSearch => "ClearSearch",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagAction {
    RefreshTags,
    SetTags(Vec<Tag>),
    /// Open the post list filtered by one tag
    PostsForTag(Tag),
}

impl TagAction {
    pub fn name(&self) -> &'static str {
        match self {
            TagAction::RefreshTags => "RefreshTags",
            TagAction::SetTags(_) => "SetTags",
            TagAction::PostsForTag(_) => "PostsForTag",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteAction {
    RefreshNotes,
    SetNotes(Vec<Note>),
    SetNote(Note),
}

impl NoteAction {
    pub fn name(&self) -> &'static str {
        match self {
            NoteAction::RefreshNotes => "RefreshNotes",
            NoteAction::SetNotes(_) => "SetNotes",
            NoteAction::SetNote(_) => "SetNote",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopularAction {
    RefreshPopular,
    SetPopularPosts(Vec<Post>),
}

impl PopularAction {
    pub fn name(&self) -> &'static str {
        match self {
            PopularAction::RefreshPopular => "RefreshPopular",
            PopularAction::SetPopularPosts(_) => "SetPopularPosts",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserAction {
    UserLoggedIn,
    UserLoggedOut,
    /// The server rejected the stored token
    UserUnauthorized,
}

impl UserAction {
    pub fn name(&self) -> &'static str {
        match self {
            UserAction::UserLoggedIn => "UserLoggedIn",
            UserAction::UserLoggedOut => "UserLoggedOut",
            UserAction::UserUnauthorized => "UserUnauthorized",
        }
    }
}

impl From<NavigationAction> for Action {
    fn from(action: NavigationAction) -> Self {
        Action::Navigation(action)
    }
}

impl From<PostAction> for Action {
    fn from(action: PostAction) -> Self {
        Action::Post(action)
    }
}

impl From<SearchAction> for Action {
    fn from(action: SearchAction) -> Self {
        Action::Search(action)
    }
}

impl From<TagAction> for Action {
    fn from(action: TagAction) -> Self {
        Action::Tag(action)
    }
}

impl From<NoteAction> for Action {
    fn from(action: NoteAction) -> Self {
        Action::Note(action)
    }
}

impl From<PopularAction> for Action {
    fn from(action: PopularAction) -> Self {
        Action::Popular(action)
    }
}

impl From<UserAction> for Action {
    fn from(action: UserAction) -> Self {
        Action::User(action)
    }
}
