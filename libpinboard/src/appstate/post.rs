//! Post list loading and bookmark editing

use async_trait::async_trait;
use std::sync::Arc;

use super::action::PostAction;
use super::content::{
    Content, EditPostContent, PopularPostDetailContent, PopularPostsContent, PostDetailContent,
    PostList, PostListContent, ShouldLoad,
};
use super::diff::PostListDiff;
use super::handler::ActionHandler;
use crate::error::Result;
use crate::repository::{ConnectivityInfoProvider, UserRepository};
use crate::types::{EditAfterSharing, Post, PostListResult};

pub struct PostActionHandler {
    user: Arc<dyn UserRepository>,
    connectivity: Arc<dyn ConnectivityInfoProvider>,
}

impl PostActionHandler {
    pub fn new(
        user: Arc<dyn UserRepository>,
        connectivity: Arc<dyn ConnectivityInfoProvider>,
    ) -> Self {
        Self { user, connectivity }
    }

    fn refresh(&self, force: bool, list: &PostListContent) -> Content {
        if list.should_load.is_loading_page() {
            return Content::from(list.clone());
        }

        let (should_load, can_force_sync) = match (self.connectivity.is_connected(), force) {
            (true, true) => (ShouldLoad::ForceLoad, false),
            (true, false) => (ShouldLoad::FirstPage, list.can_force_sync),
            (false, _) => (ShouldLoad::Loaded, list.can_force_sync),
        };

        Content::from(PostListContent {
            should_load,
            is_connected: self.connectivity.is_connected(),
            can_force_sync,
            ..list.clone()
        })
    }

    fn toggle_sorting(&self, list: &PostListContent) -> Content {
        if list.should_load.is_loading_page() {
            return Content::from(list.clone());
        }

        if self.connectivity.is_connected() {
            Content::from(PostListContent {
                sort_type: list.sort_type.toggled(),
                should_load: ShouldLoad::FirstPage,
                is_connected: true,
                ..list.clone()
            })
        } else {
            Content::from(PostListContent {
                is_connected: false,
                ..list.clone()
            })
        }
    }

    fn post_saved(&self, post: Post, current: &Content) -> Content {
        match current {
            Content::AddPost(add) => Content::from(reload(&add.previous_content)),
            Content::EditPost(edit) => match edit.previous_content.as_ref() {
                Content::PostDetail(detail) => Content::from(PostDetailContent {
                    post,
                    previous_content: Arc::new(reload(&detail.previous_content)),
                }),
                Content::PostList(list) => Content::from(reload(list)),
                Content::PopularPostDetail(detail) => {
                    Content::from(reload_under_popular_detail(detail))
                }
                previous => previous.clone(),
            },
            Content::PostDetail(detail) => Content::from(PostDetailContent {
                post: detail.post.clone(),
                previous_content: Arc::new(reload(&detail.previous_content)),
            }),
            Content::PopularPostDetail(detail) => {
                let updated = Content::from(reload_under_popular_detail(detail));
                match self.user.edit_after_sharing() {
                    EditAfterSharing::AfterSaving => open_editor(post, updated),
                    _ => updated,
                }
            }
            Content::PopularPosts(popular) => {
                let updated = Content::from(PopularPostsContent {
                    previous_content: Arc::new(reload(&popular.previous_content)),
                    ..popular.clone()
                });
                match self.user.edit_after_sharing() {
                    EditAfterSharing::BeforeSaving | EditAfterSharing::AfterSaving => {
                        open_editor(post, updated)
                    }
                    EditAfterSharing::SkipEdit => updated,
                }
            }
            _ => current.clone(),
        }
    }
}

#[async_trait]
impl ActionHandler<PostAction> for PostActionHandler {
    async fn run_action(&self, action: PostAction, current: &Content) -> Result<Content> {
        let next = match (action, current) {
            (PostAction::Refresh { force }, Content::PostList(list)) => self.refresh(force, list),
            (PostAction::SetPosts(result), Content::PostList(list)) => set_posts(result, list),
            (PostAction::GetNextPostPage, Content::PostList(list)) if list.posts.is_some() => {
                Content::from(list.with_should_load(ShouldLoad::NextPage {
                    offset: list.current_count(),
                }))
            }
            (PostAction::SetNextPostPage(result), Content::PostList(list)) => {
                match &list.posts {
                    Some(posts) => set_next_page(result, posts, list),
                    None => current.clone(),
                }
            }
            (PostAction::PostsDisplayed, Content::PostList(list)) => {
                Content::from(PostListContent {
                    posts: list.posts.clone().map(|posts| PostList {
                        already_displayed: true,
                        ..posts
                    }),
                    ..list.clone()
                })
            }
            (PostAction::ToggleSorting, Content::PostList(list)) => self.toggle_sorting(list),
            (PostAction::EditPost(post), Content::PostDetail(_) | Content::PostList(_)) => {
                Content::from(EditPostContent {
                    post,
                    previous_content: Arc::new(current.clone()),
                })
            }
            (PostAction::EditPostFromShare(post), _) => Content::from(EditPostContent {
                post,
                previous_content: Arc::new(Content::External),
            }),
            (PostAction::PostSaved(post), _) => self.post_saved(post, current),
            (PostAction::PostDeleted, _) => post_deleted(current),
            _ => current.clone(),
        };

        Ok(next)
    }
}

/// Editor for a bookmark shared from the popular screens, returning to `updated`
fn open_editor(post: Post, updated: Content) -> Content {
    Content::from(EditPostContent {
        post,
        previous_content: Arc::new(updated),
    })
}

fn reload(list: &PostListContent) -> PostListContent {
    list.with_should_load(ShouldLoad::FirstPage)
}

fn reload_under_popular_detail(detail: &PopularPostDetailContent) -> PopularPostDetailContent {
    let popular = detail.previous_content.as_ref();
    PopularPostDetailContent {
        post: detail.post.clone(),
        previous_content: Arc::new(PopularPostsContent {
            previous_content: Arc::new(reload(&popular.previous_content)),
            ..popular.clone()
        }),
    }
}

fn set_posts(result: PostListResult, list: &PostListContent) -> Content {
    let posts = if result.posts.is_empty() {
        None
    } else {
        let new: Arc<[Post]> = result.posts.into();
        let old: Arc<[Post]> = match &list.posts {
            Some(current) => Arc::clone(&current.list),
            None => Arc::from(Vec::new()),
        };
        Some(PostList::new(
            result.total_count,
            Arc::clone(&new),
            PostListDiff::new(old, new),
        ))
    };

    Content::from(PostListContent {
        posts,
        should_load: if result.up_to_date {
            ShouldLoad::Loaded
        } else {
            ShouldLoad::Syncing
        },
        can_force_sync: list.can_force_sync || result.up_to_date,
        ..list.clone()
    })
}

fn set_next_page(result: PostListResult, current: &PostList, list: &PostListContent) -> Content {
    let merged: Arc<[Post]> = current
        .list
        .iter()
        .cloned()
        .chain(result.posts)
        .collect::<Vec<_>>()
        .into();

    Content::from(PostListContent {
        posts: Some(PostList::new(
            result.total_count,
            Arc::clone(&merged),
            PostListDiff::new(Arc::clone(&current.list), merged),
        )),
        should_load: ShouldLoad::Loaded,
        ..list.clone()
    })
}

/// Leaves the screens showing the deleted bookmark and reloads the list
/// underneath them
fn post_deleted(current: &Content) -> Content {
    if let Content::PostList(list) = current {
        return Content::from(reload(list));
    }

    let mut cursor = current.clone();
    while let Some(previous) = cursor.previous_content() {
        match previous {
            Content::PostDetail(_) | Content::EditPost(_) | Content::ExternalBrowser(_) => {
                cursor = previous;
            }
            Content::PostList(list) => return Content::from(reload(&list)),
            other => return other,
        }
    }

    current.clone()
}
