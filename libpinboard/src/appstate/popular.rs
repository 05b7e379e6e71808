//! Popular bookmarks screen

use async_trait::async_trait;
use std::sync::Arc;

use super::action::PopularAction;
use super::content::{Content, PopularPostsContent};
use super::handler::ActionHandler;
use crate::error::Result;
use crate::repository::ConnectivityInfoProvider;

pub struct PopularActionHandler {
    connectivity: Arc<dyn ConnectivityInfoProvider>,
}

impl PopularActionHandler {
    pub fn new(connectivity: Arc<dyn ConnectivityInfoProvider>) -> Self {
        Self { connectivity }
    }
}

#[async_trait]
impl ActionHandler<PopularAction> for PopularActionHandler {
    async fn run_action(&self, action: PopularAction, current: &Content) -> Result<Content> {
        let Content::PopularPosts(popular) = current else {
            return Ok(current.clone());
        };

        let next = match action {
            PopularAction::RefreshPopular => PopularPostsContent {
                should_load: self.connectivity.is_connected(),
                is_connected: self.connectivity.is_connected(),
                ..popular.clone()
            },
            PopularAction::SetPopularPosts(posts) => PopularPostsContent {
                posts,
                should_load: false,
                ..popular.clone()
            },
        };

        Ok(Content::from(next))
    }
}
