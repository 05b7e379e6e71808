//! In-process collaborator implementations
//!
//! These keep everything in memory and can be configured to fail or to
//! add latency. They are available for all builds (not just tests) so the
//! integration tests and the `pin-state` driver can run the state core
//! without a Pinboard account or network access.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use super::{
    AddPostRequest, ConnectivityInfoProvider, NotesRepository, PostQuery, PostsRepository,
};
use crate::error::{ApiError, Result};
use crate::types::{Note, Post, PostListResult};

/// Bookmark store keyed by URL
#[derive(Clone, Default)]
pub struct InMemoryPostsRepository {
    posts: Arc<Mutex<HashMap<String, Post>>>,
    popular: Arc<Vec<Post>>,
    add_requests: Arc<Mutex<Vec<AddPostRequest>>>,
    queries: Arc<Mutex<Vec<PostQuery>>>,
    failure: Option<ApiError>,
    delay: Duration,
}

impl InMemoryPostsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository whose every call fails with `error`
    pub fn failing(error: ApiError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Repository that sleeps for `delay` before answering
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    /// Seed the store with existing bookmarks
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        let repository = Self::default();
        {
            let mut stored = repository.lock_posts();
            for post in posts {
                stored.insert(post.url.clone(), post);
            }
        }
        repository
    }

    /// Answer `get_popular_posts` with `posts`
    pub fn with_popular(self, posts: Vec<Post>) -> Self {
        Self {
            popular: Arc::new(posts),
            ..self
        }
    }

    /// Every `get_all_posts` query received, in order
    pub fn queries(&self) -> Vec<PostQuery> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every `add` request received, in order, including failed ones
    pub fn add_requests(&self) -> Vec<AddPostRequest> {
        self.add_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn add_call_count(&self) -> usize {
        self.add_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn stored(&self, url: &str) -> Option<Post> {
        self.lock_posts().get(url).cloned()
    }

    fn lock_posts(&self) -> std::sync::MutexGuard<'_, HashMap<String, Post>> {
        self.posts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn simulate(&self) -> Result<()> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        match &self.failure {
            Some(error) => Err(error.clone().into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PostsRepository for InMemoryPostsRepository {
    async fn add(&self, request: AddPostRequest) -> Result<()> {
        self.add_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        self.simulate().await?;

        let mut posts = self.lock_posts();
        if posts.contains_key(&request.url) && !request.replace {
            return Err(ApiError::Server("item already exists".to_string()).into());
        }

        let post = Post {
            hash: url_hash(&request.url),
            url: request.url,
            title: request.title,
            description: request.description,
            time: Utc::now(),
            private: request.private,
            read_later: request.read_later,
            tags: request.tags,
        };
        tracing::trace!(url = %post.url, "Stored bookmark");
        posts.insert(post.url.clone(), post);
        Ok(())
    }

    async fn get_post(&self, url: &str) -> Result<Post> {
        self.simulate().await?;

        self.lock_posts()
            .get(url)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(url.to_string()).into())
    }

    async fn get_all_posts(&self, query: &PostQuery) -> Result<PostListResult> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.clone());

        self.simulate().await?;

        let mut matches: Vec<Post> = self
            .lock_posts()
            .values()
            .filter(|post| query_matches(query, post))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.time.cmp(&b.time).then_with(|| a.url.cmp(&b.url)));
        if query.newest_first {
            matches.reverse();
        }

        Ok(PostListResult {
            total_count: matches.len(),
            posts: matches
                .into_iter()
                .skip(query.offset)
                .take(query.limit)
                .collect(),
            up_to_date: true,
        })
    }

    async fn get_popular_posts(&self) -> Result<Vec<Post>> {
        self.simulate().await?;
        Ok(self.popular.as_ref().clone())
    }
}

fn query_matches(query: &PostQuery, post: &Post) -> bool {
    let term = query.search_term.to_lowercase();
    let term_matches = term.is_empty()
        || [&post.title, &post.description, &post.url]
            .iter()
            .any(|field| field.to_lowercase().contains(&term));
    let tags_match = query
        .tags
        .iter()
        .all(|wanted| post.tags.iter().any(|tag| tag.name == wanted.name));

    term_matches
        && tags_match
        && !(query.untagged_only && !post.tags.is_empty())
        && !(query.public_only && post.private)
        && !(query.private_only && !post.private)
        && !(query.read_later_only && !post.read_later)
}

/// Note store
#[derive(Clone, Default)]
pub struct InMemoryNotesRepository {
    notes: Arc<Vec<Note>>,
    failure: Option<ApiError>,
}

impl InMemoryNotesRepository {
    pub fn new(notes: Vec<Note>) -> Self {
        Self {
            notes: Arc::new(notes),
            failure: None,
        }
    }

    pub fn failing(error: ApiError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(error) => Err(error.clone().into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl NotesRepository for InMemoryNotesRepository {
    async fn get_all_notes(&self) -> Result<Vec<Note>> {
        self.check()?;
        Ok(self.notes.as_ref().clone())
    }

    async fn get_note(&self, id: &str) -> Result<Note> {
        self.check()?;
        self.notes
            .iter()
            .find(|note| note.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()).into())
    }
}

/// Connectivity provider with a settable answer
///
/// Counts how many times it was asked, which lets tests check that
/// handlers ask fresh instead of reusing an earlier answer.
#[derive(Debug, Default)]
pub struct StaticConnectivity {
    connected: AtomicBool,
    checks: AtomicUsize,
}

impl StaticConnectivity {
    pub fn new(connected: bool) -> Self {
        Self {
            connected: AtomicBool::new(connected),
            checks: AtomicUsize::new(0),
        }
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    pub fn check_count(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

impl ConnectivityInfoProvider for StaticConnectivity {
    fn is_connected(&self) -> bool {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.connected.load(Ordering::SeqCst)
    }
}

fn url_hash(url: &str) -> String {
    let mut hasher = DefaultHasher::new();
    url.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
