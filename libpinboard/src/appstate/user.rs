//! Session changes: login, logout and rejected credentials

use async_trait::async_trait;
use std::sync::Arc;

use super::action::UserAction;
use super::content::{Content, LoginContent, PostListContent, ViewCategory};
use super::handler::ActionHandler;
use crate::error::Result;
use crate::repository::{ConnectivityInfoProvider, UserRepository};

pub struct UserActionHandler {
    user: Arc<dyn UserRepository>,
    connectivity: Arc<dyn ConnectivityInfoProvider>,
}

impl UserActionHandler {
    pub fn new(
        user: Arc<dyn UserRepository>,
        connectivity: Arc<dyn ConnectivityInfoProvider>,
    ) -> Self {
        Self { user, connectivity }
    }
}

#[async_trait]
impl ActionHandler<UserAction> for UserActionHandler {
    async fn run_action(&self, action: UserAction, current: &Content) -> Result<Content> {
        let next = match (action, current) {
            (UserAction::UserLoggedIn, Content::Login(_)) => Content::from(PostListContent::new(
                ViewCategory::All,
                self.user.show_description_in_lists(),
                self.connectivity.is_connected(),
            )),
            (UserAction::UserLoggedOut, _) => Content::from(LoginContent {
                is_unauthorized: false,
            }),
            (UserAction::UserUnauthorized, _) => {
                tracing::warn!(from = current.name(), "Session rejected, returning to login");
                Content::from(LoginContent {
                    is_unauthorized: true,
                })
            }
            _ => current.clone(),
        };

        Ok(next)
    }
}
