//! Action-driven application state
//!
//! The client is always showing exactly one [`Content`]. User input and
//! finished loads are expressed as [`Action`]s; the [`AppStateRepository`]
//! feeds each one to the [`ActionHandler`] of its domain, which computes
//! the next content from the action, the current content and whatever it
//! reads from the collaborators.
//!
//! ```text
//! Action ──▶ AppStateRepository ──▶ handler.run_action(action, &current)
//!                    │                              │
//!                    ◀───────── next Content ◀──────┘
//!                    │
//!                    └──▶ watch channel ──▶ observers
//! ```

pub mod action;
pub mod content;
pub mod diff;
pub mod handler;
pub mod navigation;
pub mod note;
pub mod popular;
pub mod post;
pub mod repository;
pub mod search;
pub mod tag;
pub mod user;

pub use action::{
    Action, NavigationAction, NoteAction, PopularAction, PostAction, SearchAction, TagAction,
    UserAction,
};
pub use content::{
    AddPostContent, Content, EditPostContent, ExternalBrowserContent, LoginContent, NoteDetail,
    NoteDetailContent, NoteListContent, PopularPostDetailContent, PopularPostsContent,
    PostDetailContent, PostList, PostListContent, SearchContent, SearchParameters, ShouldLoad,
    SortType, TagListContent, UserPreferencesContent, ViewCategory,
};
pub use diff::{DiffOp, PostListDiff};
pub use handler::ActionHandler;
pub use navigation::NavigationActionHandler;
pub use note::NoteActionHandler;
pub use popular::PopularActionHandler;
pub use post::PostActionHandler;
pub use repository::AppStateRepository;
pub use search::SearchActionHandler;
pub use tag::TagActionHandler;
pub use user::UserActionHandler;
