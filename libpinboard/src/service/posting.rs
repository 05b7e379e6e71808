//! Bookmark saving use cases
//!
//! These run the collaborator calls a screen needs and then report the
//! outcome to the application state as a [`PostAction::PostSaved`].

use std::sync::Arc;
use tracing::{debug, info};

use crate::appstate::{AppStateRepository, Content, PostAction};
use crate::error::{ApiError, Result};
use crate::repository::{AddPostRequest, PostsRepository, UserRepository};
use crate::types::{EditAfterSharing, Post, Tag};

/// URL schemes Pinboard accepts for bookmarks
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "javascript", "mailto", "ftp", "file", "feed"];

/// Schemes that need an authority after `://`
const HIERARCHICAL_SCHEMES: &[&str] = &["http", "https", "ftp", "file", "feed"];

/// Parameters for saving a bookmark from the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddPostParams {
    pub url: String,
    pub title: String,
    pub description: String,
    pub private: bool,
    pub read_later: bool,
    pub tags: Vec<Tag>,
    pub replace: bool,
}

impl AddPostParams {
    /// Public bookmark without tags that overwrites an existing one
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            description: String::new(),
            private: false,
            read_later: false,
            tags: Vec::new(),
            replace: true,
        }
    }
}

impl From<AddPostParams> for AddPostRequest {
    fn from(params: AddPostParams) -> Self {
        Self {
            url: params.url,
            title: params.title,
            description: params.description,
            private: params.private,
            read_later: params.read_later,
            tags: params.tags,
            replace: params.replace,
        }
    }
}

/// Check that `url` is something Pinboard will store
pub fn validate_url(url: &str) -> Result<()> {
    let invalid = || ApiError::InvalidUrl(url.to_string());

    let url = url.trim();
    let (scheme, rest) = url.split_once(':').ok_or_else(invalid)?;
    let scheme = scheme.to_ascii_lowercase();

    if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
        return Err(invalid().into());
    }

    if HIERARCHICAL_SCHEMES.contains(&scheme.as_str()) {
        let authority = rest.strip_prefix("//").ok_or_else(invalid)?;
        if authority.is_empty() || (authority.starts_with('/') && scheme != "file") {
            return Err(invalid().into());
        }
    } else if rest.is_empty() {
        return Err(invalid().into());
    }

    Ok(())
}

/// Saves bookmarks and reports them to the application state
#[derive(Clone)]
pub struct PostingService {
    posts: Arc<dyn PostsRepository>,
    user: Arc<dyn UserRepository>,
    app_state: Arc<AppStateRepository>,
}

impl PostingService {
    pub fn new(
        posts: Arc<dyn PostsRepository>,
        user: Arc<dyn UserRepository>,
        app_state: Arc<AppStateRepository>,
    ) -> Self {
        Self {
            posts,
            user,
            app_state,
        }
    }

    /// Validate, store and re-read a bookmark
    ///
    /// The stored bookmark is returned as the server sees it (with its hash
    /// and timestamp). Nothing is stored when the URL is rejected.
    pub async fn add_post(&self, params: AddPostParams) -> Result<Post> {
        validate_url(&params.url)?;

        let url = params.url.clone();
        self.posts.add(params.into()).await?;
        let post = self.posts.get_post(&url).await?;

        info!(url = %post.url, "Saved bookmark");
        Ok(post)
    }

    /// Save a bookmark from the editor and report it
    pub async fn save_post(&self, params: AddPostParams) -> Result<Content> {
        let post = self.add_post(params).await?;
        self.app_state.run_action(PostAction::PostSaved(post)).await
    }

    /// Save a bookmark found in the popular list to the user's account
    ///
    /// When the user reviews shared bookmarks before saving and the popular
    /// list is showing, nothing is stored yet: the editor opens with the
    /// bookmark stripped of the popular list's tags. The detail screen only
    /// opens the editor after saving, so there the bookmark is always
    /// stored with the user's defaults first. A failed save leaves the
    /// state untouched.
    pub async fn save_popular_post(&self, post: Post) -> Result<Content> {
        let edit_first = self.user.edit_after_sharing() == EditAfterSharing::BeforeSaving
            && matches!(self.app_state.content(), Content::PopularPosts(_));
        if edit_first {
            debug!(url = %post.url, "Editing popular bookmark before saving");
            let post = Post {
                tags: Vec::new(),
                ..post
            };
            return self.app_state.run_action(PostAction::PostSaved(post)).await;
        }

        let params = AddPostParams {
            url: post.url,
            title: post.title,
            description: post.description,
            private: self.user.default_private().unwrap_or(false),
            read_later: self.user.default_read_later().unwrap_or(false),
            tags: self.user.default_tags(),
            replace: true,
        };
        let saved = self.add_post(params).await?;
        self.app_state.run_action(PostAction::PostSaved(saved)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_common_schemes() {
        for url in [
            "https://example.com",
            "http://example.com/path?q=1",
            "HTTPS://EXAMPLE.COM",
            "ftp://files.example.com",
            "mailto:someone@example.com",
            "javascript:void(0)",
            "file:///home/user/notes.txt",
        ] {
            assert!(validate_url(url).is_ok(), "{} should be valid", url);
        }
    }

    #[test]
    fn test_validate_url_rejects_bad_input() {
        for url in [
            "",
            "example.com",
            "gopher://example.com",
            "https:example.com",
            "https://",
            "https:///path",
            "mailto:",
        ] {
            let result = validate_url(url);
            assert!(
                matches!(result, Err(crate::error::PinboardError::Api(ApiError::InvalidUrl(_)))),
                "{} should be invalid",
                url
            );
        }
    }

    #[test]
    fn test_params_default_to_replace() {
        let request = AddPostRequest::from(AddPostParams::new("https://example.com", "Example"));
        assert!(request.replace);
        assert!(!request.private);
        assert!(request.tags.is_empty());
    }
}
