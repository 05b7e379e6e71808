//! Service layer for the Pinboard client core
//!
//! This module bundles the application state with the use cases that feed
//! it, so every front end (the replay driver, tests, a future UI) wires
//! things up the same way.
//!
//! # Architecture
//!
//! `PinboardService` is a facade over:
//!
//! - `AppStateRepository`: the current screen state and its observers
//! - `PostingService`: saving bookmarks, then reporting `PostSaved`
//! - `NotesService`: loading notes, then reporting `SetNotes` / `SetNote`
//! - `PostListService`: loading bookmark pages and popular posts
//!
//! # Example
//!
//! ```no_run
//! use libpinboard::appstate::NavigationAction;
//! use libpinboard::repository::Collaborators;
//! use libpinboard::service::PinboardService;
//!
//! # async fn example(collaborators: Collaborators) -> libpinboard::Result<()> {
//! let service = PinboardService::new(collaborators, tokio::runtime::Handle::current());
//!
//! service.run_action(NavigationAction::ViewNotes).await?;
//! service.notes().load_notes().await?;
//! # Ok(())
//! # }
//! ```

pub mod notes;
pub mod post_list;
pub mod posting;

pub use notes::NotesService;
pub use post_list::PostListService;
pub use posting::{validate_url, AddPostParams, PostingService};

use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::appstate::{Action, AppStateRepository, Content};
use crate::error::Result;
use crate::repository::Collaborators;

/// Main entry point: application state plus its use cases
///
/// All sub-services share one `Arc<AppStateRepository>`, so an action run
/// by a use case is observed by every subscriber.
pub struct PinboardService {
    collaborators: Collaborators,
    app_state: Arc<AppStateRepository>,
    posting: PostingService,
    notes: NotesService,
    post_list: PostListService,
}

impl PinboardService {
    /// Create the service
    ///
    /// `background` runs fire-and-forget requests; pass the handle of the
    /// runtime that outlives the screens (usually `Handle::current()`).
    pub fn new(collaborators: Collaborators, background: Handle) -> Self {
        let app_state = Arc::new(AppStateRepository::new(&collaborators, background));
        let posting = PostingService::new(
            Arc::clone(&collaborators.posts),
            Arc::clone(&collaborators.user),
            Arc::clone(&app_state),
        );
        let notes = NotesService::new(Arc::clone(&collaborators.notes), Arc::clone(&app_state));
        let post_list =
            PostListService::new(Arc::clone(&collaborators.posts), Arc::clone(&app_state));

        Self {
            collaborators,
            app_state,
            posting,
            notes,
            post_list,
        }
    }

    /// Access the application state directly
    pub fn app_state(&self) -> &Arc<AppStateRepository> {
        &self.app_state
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    pub fn posting(&self) -> &PostingService {
        &self.posting
    }

    pub fn notes(&self) -> &NotesService {
        &self.notes
    }

    pub fn post_list(&self) -> &PostListService {
        &self.post_list
    }

    /// Shorthand for [`AppStateRepository::run_action`]
    pub async fn run_action(&self, action: impl Into<Action>) -> Result<Content> {
        self.app_state.run_action(action).await
    }

    /// Shorthand for [`AppStateRepository::subscribe`]
    pub fn subscribe(&self) -> watch::Receiver<Content> {
        self.app_state.subscribe()
    }
}

impl std::fmt::Debug for PinboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinboardService")
            .field("app_state", &self.app_state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appstate::{
        NavigationAction, NoteDetail, PopularPostsContent, PostAction, PostListContent,
        ShouldLoad, UserAction, ViewCategory,
    };
    use crate::config::PreferencesConfig;
    use crate::error::{ApiError, PinboardError};
    use crate::repository::{
        InMemoryNotesRepository, InMemoryPostsRepository, PreferencesStore, StaticConnectivity,
        UserRepository,
    };
    use crate::types::{EditAfterSharing, Note, Post, Tag};
    use chrono::{Duration, Utc};

    struct Fixture {
        posts: InMemoryPostsRepository,
        user: Arc<PreferencesStore>,
        service: PinboardService,
    }

    fn fixture_with(posts: InMemoryPostsRepository, notes: InMemoryNotesRepository) -> Fixture {
        let user = Arc::new(PreferencesStore::new(PreferencesConfig {
            auth_token: Some("user:TOKEN".to_string()),
            ..Default::default()
        }));
        let collaborators = Collaborators {
            posts: Arc::new(posts.clone()),
            notes: Arc::new(notes),
            user: user.clone(),
            connectivity: Arc::new(StaticConnectivity::new(true)),
        };
        Fixture {
            posts,
            user,
            service: PinboardService::new(collaborators, Handle::current()),
        }
    }

    fn fixture() -> Fixture {
        fixture_with(InMemoryPostsRepository::new(), InMemoryNotesRepository::default())
    }

    fn note(id: &str) -> Note {
        let now = Utc::now();
        Note {
            id: id.to_string(),
            title: format!("Note {}", id),
            created_at: now,
            updated_at: now,
            text: String::new(),
        }
    }

    fn popular(url: &str) -> Post {
        Post {
            url: url.to_string(),
            title: "Popular".to_string(),
            description: "Everyone saves this".to_string(),
            hash: "popular".to_string(),
            time: Utc::now(),
            private: false,
            read_later: false,
            tags: vec![Tag::new("trending")],
        }
    }

    async fn open_popular(service: &PinboardService) -> PopularPostsContent {
        match service.run_action(NavigationAction::ViewPopular).await.unwrap() {
            Content::PopularPosts(popular) => popular,
            other => panic!("expected popular posts, got {}", other.name()),
        }
    }

    fn library(count: usize) -> InMemoryPostsRepository {
        let start = Utc::now();
        InMemoryPostsRepository::with_posts((0..count).map(|i| Post {
            url: format!("https://site{:03}.example", i),
            hash: format!("hash{}", i),
            time: start + Duration::minutes(i as i64),
            read_later: i % 2 == 0,
            tags: Vec::new(),
            ..popular("")
        }))
    }

    fn as_list(content: Content) -> PostListContent {
        match content {
            Content::PostList(list) => list,
            other => panic!("expected post list, got {}", other.name()),
        }
    }

    #[tokio::test]
    async fn test_add_post_stores_and_returns_post() {
        let f = fixture();
        let mut params = AddPostParams::new("https://example.com", "Example");
        params.tags = vec![Tag::new("rust")];

        let post = f.service.posting().add_post(params).await.unwrap();
        assert_eq!(post.url, "https://example.com");
        assert_eq!(post.tags, vec![Tag::new("rust")]);
        assert_eq!(f.posts.add_call_count(), 1);
    }

    #[tokio::test]
    async fn test_add_post_rejects_invalid_url_before_storing() {
        let f = fixture();
        let result = f
            .service
            .posting()
            .add_post(AddPostParams::new("not a url", "Broken"))
            .await;

        assert!(matches!(result, Err(PinboardError::Api(ApiError::InvalidUrl(_)))));
        assert_eq!(f.posts.add_call_count(), 0);
    }

    #[tokio::test]
    async fn test_save_post_reports_to_app_state() {
        let f = fixture();
        f.service.run_action(NavigationAction::AddPost).await.unwrap();

        let content = f
            .service
            .posting()
            .save_post(AddPostParams::new("https://example.com", "Example"))
            .await
            .unwrap();

        let Content::PostList(list) = content else {
            panic!("expected post list");
        };
        assert_eq!(list.should_load, ShouldLoad::FirstPage);
    }

    #[tokio::test]
    async fn test_save_popular_post_before_saving_opens_editor_without_storing() {
        let f = fixture();
        f.user.set_edit_after_sharing(EditAfterSharing::BeforeSaving);
        open_popular(&f.service).await;

        let content = f
            .service
            .posting()
            .save_popular_post(popular("https://popular.example"))
            .await
            .unwrap();

        let Content::EditPost(edit) = content else {
            panic!("expected editor");
        };
        assert!(edit.post.tags.is_empty());
        assert_eq!(f.posts.add_call_count(), 0);
    }

    #[tokio::test]
    async fn test_save_popular_post_before_saving_from_detail_stores_first() {
        let f = fixture();
        f.user.set_edit_after_sharing(EditAfterSharing::BeforeSaving);
        open_popular(&f.service).await;
        f.service
            .run_action(NavigationAction::ViewPost(popular("https://popular.example")))
            .await
            .unwrap();

        let content = f
            .service
            .posting()
            .save_popular_post(popular("https://popular.example"))
            .await
            .unwrap();

        assert_eq!(f.posts.add_call_count(), 1);
        assert!(f.posts.stored("https://popular.example").is_some());
        let Content::PopularPostDetail(detail) = content else {
            panic!("expected popular post detail");
        };
        assert_eq!(
            detail.previous_content.previous_content.should_load,
            ShouldLoad::FirstPage
        );
    }

    #[tokio::test]
    async fn test_save_popular_post_after_saving_from_detail_opens_editor() {
        let f = fixture();
        f.user.set_edit_after_sharing(EditAfterSharing::AfterSaving);
        open_popular(&f.service).await;
        f.service
            .run_action(NavigationAction::ViewPost(popular("https://popular.example")))
            .await
            .unwrap();

        let content = f
            .service
            .posting()
            .save_popular_post(popular("https://popular.example"))
            .await
            .unwrap();

        let Content::EditPost(edit) = content else {
            panic!("expected editor");
        };
        assert_eq!(edit.post.url, "https://popular.example");
        assert_eq!(edit.previous_content.name(), "PopularPostDetail");
        assert_eq!(f.posts.add_call_count(), 1);
    }

    #[tokio::test]
    async fn test_save_popular_post_uses_user_defaults() {
        let f = fixture();
        f.user.set_default_private(true);
        f.user.set_default_tags(vec![Tag::new("later")]);
        open_popular(&f.service).await;

        let content = f
            .service
            .posting()
            .save_popular_post(popular("https://popular.example"))
            .await
            .unwrap();

        let requests = f.posts.add_requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].private);
        assert!(!requests[0].read_later);
        assert_eq!(requests[0].tags, vec![Tag::new("later")]);

        let Content::PopularPosts(popular) = content else {
            panic!("expected popular posts");
        };
        assert_eq!(popular.previous_content.should_load, ShouldLoad::FirstPage);
    }

    #[tokio::test]
    async fn test_save_popular_post_failure_keeps_state() {
        let f = fixture_with(
            InMemoryPostsRepository::failing(ApiError::Server("down".to_string())),
            InMemoryNotesRepository::default(),
        );
        let before = Content::from(open_popular(&f.service).await);

        let result = f
            .service
            .posting()
            .save_popular_post(popular("https://popular.example"))
            .await;

        assert!(result.is_err());
        assert_eq!(f.service.app_state().content(), before);
    }

    #[tokio::test]
    async fn test_load_notes_and_note_details() {
        let f = fixture_with(
            InMemoryPostsRepository::new(),
            InMemoryNotesRepository::new(vec![note("1"), note("2")]),
        );
        f.service.run_action(NavigationAction::ViewNotes).await.unwrap();

        let Content::NoteList(list) = f.service.notes().load_notes().await.unwrap() else {
            panic!("expected note list");
        };
        assert_eq!(list.notes.len(), 2);
        assert!(!list.should_load);

        f.service
            .run_action(NavigationAction::ViewNote("2".to_string()))
            .await
            .unwrap();
        let Content::NoteDetail(detail) = f.service.notes().load_note_details("2").await.unwrap()
        else {
            panic!("expected note detail");
        };
        assert!(matches!(detail.note, NoteDetail::Loaded(ref note) if note.id == "2"));
    }

    #[tokio::test]
    async fn test_load_missing_note_fails_without_state_change() {
        let f = fixture();
        f.service.run_action(UserAction::UserLoggedOut).await.unwrap();
        let before = f.service.app_state().content();

        let result = f.service.notes().load_note_details("missing").await;
        assert!(matches!(result, Err(PinboardError::Api(ApiError::NotFound(_)))));
        assert_eq!(f.service.app_state().content(), before);
    }

    #[tokio::test]
    async fn test_load_first_page_sets_posts() {
        let f = fixture_with(library(3), InMemoryNotesRepository::default());
        let list = as_list(f.service.app_state().content());
        assert_eq!(list.should_load, ShouldLoad::FirstPage);

        let list = as_list(f.service.post_list().load_content(&list).await.unwrap());
        let posts = list.posts.expect("posts loaded");
        assert_eq!(posts.total_count, 3);
        assert_eq!(posts.list[0].url, "https://site002.example");
        assert_eq!(list.should_load, ShouldLoad::Loaded);

        let query = &f.posts.queries()[0];
        assert!(query.newest_first);
        assert_eq!(query.offset, 0);
        assert!(!query.force_refresh);
    }

    #[tokio::test]
    async fn test_load_next_page_appends_posts() {
        let f = fixture_with(library(120), InMemoryNotesRepository::default());
        f.service.post_list().load_current().await.unwrap();
        f.service.run_action(PostAction::GetNextPostPage).await.unwrap();

        let list = as_list(f.service.post_list().load_current().await.unwrap());
        assert_eq!(list.current_count(), 120);
        assert_eq!(list.posts.map(|posts| posts.total_count), Some(120));

        let offsets: Vec<usize> = f.posts.queries().iter().map(|query| query.offset).collect();
        assert_eq!(offsets, vec![0, 100]);
    }

    #[tokio::test]
    async fn test_load_category_filters_query() {
        let f = fixture_with(library(4), InMemoryNotesRepository::default());
        f.service
            .run_action(NavigationAction::ViewCategory(ViewCategory::Unread))
            .await
            .unwrap();

        let list = as_list(f.service.post_list().load_current().await.unwrap());
        assert_eq!(list.current_count(), 2);
        assert!(list.current_list().iter().all(|post| post.read_later));
        assert!(f.posts.queries()[0].read_later_only);
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_cache() {
        let f = fixture_with(library(2), InMemoryNotesRepository::default());
        f.service.post_list().load_current().await.unwrap();
        f.service
            .run_action(PostAction::Refresh { force: true })
            .await
            .unwrap();

        f.service.post_list().load_current().await.unwrap();
        let forced: Vec<bool> = f.posts.queries().iter().map(|q| q.force_refresh).collect();
        assert_eq!(forced, vec![false, true]);
    }

    #[tokio::test]
    async fn test_loaded_list_is_not_fetched_again() {
        let f = fixture_with(library(2), InMemoryNotesRepository::default());
        let loaded = f.service.post_list().load_current().await.unwrap();

        assert_eq!(f.service.post_list().load_current().await.unwrap(), loaded);
        assert_eq!(f.posts.queries().len(), 1);
    }

    #[tokio::test]
    async fn test_load_current_elsewhere_returns_content() {
        let f = fixture();
        let notes = f.service.run_action(NavigationAction::ViewNotes).await.unwrap();

        assert_eq!(f.service.post_list().load_current().await.unwrap(), notes);
        assert!(f.posts.queries().is_empty());
    }

    #[tokio::test]
    async fn test_load_posts_failure_keeps_state() {
        let f = fixture_with(
            InMemoryPostsRepository::failing(ApiError::Server("down".to_string())),
            InMemoryNotesRepository::default(),
        );
        let before = f.service.app_state().content();

        assert!(f.service.post_list().load_current().await.is_err());
        assert_eq!(f.service.app_state().content(), before);
    }

    #[tokio::test]
    async fn test_load_popular_fills_screen() {
        let posts = InMemoryPostsRepository::new().with_popular(vec![
            popular("https://one.example"),
            popular("https://two.example"),
        ]);
        let f = fixture_with(posts, InMemoryNotesRepository::default());
        open_popular(&f.service).await;

        let Content::PopularPosts(screen) = f.service.post_list().load_popular().await.unwrap()
        else {
            panic!("expected popular posts");
        };
        assert_eq!(screen.posts.len(), 2);
        assert!(!screen.should_load);
    }
}
