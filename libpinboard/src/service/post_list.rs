//! Post list and popular posts loading use cases
//!
//! The post list screen asks for data through its `should_load` field.
//! [`PostListService::load_content`] turns that request into a query,
//! fetches the page and reports it back as `SetPosts` or `SetNextPostPage`.

use std::sync::Arc;
use tracing::debug;

use crate::appstate::{
    AppStateRepository, Content, PopularAction, PostAction, PostListContent, ShouldLoad, SortType,
    ViewCategory,
};
use crate::error::Result;
use crate::repository::{PostQuery, PostsRepository};
use crate::types::PostListResult;

#[derive(Clone)]
pub struct PostListService {
    posts: Arc<dyn PostsRepository>,
    app_state: Arc<AppStateRepository>,
}

impl PostListService {
    pub fn new(posts: Arc<dyn PostsRepository>, app_state: Arc<AppStateRepository>) -> Self {
        Self { posts, app_state }
    }

    /// Fetch what `list` asks for and report it
    ///
    /// A list that is already loaded (or syncing) needs nothing; the
    /// current content is returned as is.
    pub async fn load_content(&self, list: &PostListContent) -> Result<Content> {
        let action = match list.should_load {
            ShouldLoad::FirstPage | ShouldLoad::ForceLoad => {
                PostAction::SetPosts(self.fetch(list, 0).await?)
            }
            ShouldLoad::NextPage { offset } => {
                PostAction::SetNextPostPage(self.fetch(list, offset).await?)
            }
            ShouldLoad::Syncing | ShouldLoad::Loaded => return Ok(self.app_state.content()),
        };
        self.app_state.run_action(action).await
    }

    /// [`load_content`](Self::load_content) for the post list on screen,
    /// if there is one
    pub async fn load_current(&self) -> Result<Content> {
        match self.app_state.content() {
            Content::PostList(list) => self.load_content(&list).await,
            other => Ok(other),
        }
    }

    /// Fill the popular posts screen
    pub async fn load_popular(&self) -> Result<Content> {
        let posts = self.posts.get_popular_posts().await?;
        debug!(count = posts.len(), "Loaded popular posts");
        self.app_state
            .run_action(PopularAction::SetPopularPosts(posts))
            .await
    }

    async fn fetch(&self, list: &PostListContent, offset: usize) -> Result<PostListResult> {
        let query = query_for(list, offset);
        let result = self.posts.get_all_posts(&query).await?;
        debug!(
            category = ?list.category,
            offset,
            received = result.posts.len(),
            total = result.total_count,
            "Loaded post page"
        );
        Ok(result)
    }
}

/// The repository query for one page of `list`
pub fn query_for(list: &PostListContent, offset: usize) -> PostQuery {
    let category = list.category;
    PostQuery {
        newest_first: category == ViewCategory::Recent || list.sort_type == SortType::NewestFirst,
        search_term: list.search_parameters.term.clone(),
        tags: list.search_parameters.tags.clone(),
        untagged_only: category == ViewCategory::Untagged,
        public_only: category == ViewCategory::Public,
        private_only: category == ViewCategory::Private,
        read_later_only: category == ViewCategory::Unread,
        limit: PostQuery::PAGE_SIZE,
        offset,
        force_refresh: list.should_load == ShouldLoad::ForceLoad,
    }
}
