//! The reducer contract shared by every domain handler

use async_trait::async_trait;

use super::content::Content;
use crate::error::Result;

/// Computes the next content for actions of one domain
///
/// Implementations are total over `(A, Content)`: when an action does not
/// apply to the current content they return it unchanged instead of
/// failing. Navigation and in-flight loads race all the time (a page can
/// arrive after the user already left the list), and those late actions
/// are simply dropped.
///
/// Errors are reserved for collaborator failures the handler awaited.
#[async_trait]
pub trait ActionHandler<A: Send + 'static>: Send + Sync {
    async fn run_action(&self, action: A, current_content: &Content) -> Result<Content>;
}
