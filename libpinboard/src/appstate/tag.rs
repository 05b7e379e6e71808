//! Tag list screen

use async_trait::async_trait;
use std::sync::Arc;

use super::action::TagAction;
use super::content::{
    Content, PostListContent, SearchParameters, ShouldLoad, SortType, TagListContent,
    ViewCategory,
};
use super::handler::ActionHandler;
use crate::error::Result;
use crate::repository::{ConnectivityInfoProvider, UserRepository};
use crate::types::Tag;

pub struct TagActionHandler {
    user: Arc<dyn UserRepository>,
    connectivity: Arc<dyn ConnectivityInfoProvider>,
}

impl TagActionHandler {
    pub fn new(
        user: Arc<dyn UserRepository>,
        connectivity: Arc<dyn ConnectivityInfoProvider>,
    ) -> Self {
        Self { user, connectivity }
    }

    /// All bookmarks carrying `tag`, from whatever screen the tag was picked on
    fn posts_for_tag(&self, tag: Tag) -> Content {
        Content::from(PostListContent {
            category: ViewCategory::All,
            posts: None,
            show_description: self.user.show_description_in_lists(),
            sort_type: SortType::NewestFirst,
            search_parameters: SearchParameters {
                term: String::new(),
                tags: vec![tag],
            },
            should_load: ShouldLoad::FirstPage,
            is_connected: self.connectivity.is_connected(),
            can_force_sync: true,
        })
    }
}

#[async_trait]
impl ActionHandler<TagAction> for TagActionHandler {
    async fn run_action(&self, action: TagAction, current: &Content) -> Result<Content> {
        let next = match (action, current) {
            (TagAction::RefreshTags, Content::TagList(tag_list)) => {
                Content::from(TagListContent {
                    should_load: self.connectivity.is_connected(),
                    is_connected: self.connectivity.is_connected(),
                    ..tag_list.clone()
                })
            }
            (TagAction::SetTags(tags), Content::TagList(tag_list)) => {
                Content::from(TagListContent {
                    tags,
                    should_load: false,
                    ..tag_list.clone()
                })
            }
            (TagAction::PostsForTag(tag), _) => self.posts_for_tag(tag),
            _ => current.clone(),
        };

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appstate::content::fixtures::post_list;
    use crate::config::PreferencesConfig;
    use crate::repository::{PreferencesStore, StaticConnectivity};

    fn handler(connected: bool) -> TagActionHandler {
        TagActionHandler::new(
            Arc::new(PreferencesStore::new(PreferencesConfig::default())),
            Arc::new(StaticConnectivity::new(connected)),
        )
    }

    fn tag_list() -> TagListContent {
        TagListContent {
            tags: Vec::new(),
            should_load: true,
            is_connected: true,
            previous_content: Arc::new(post_list()),
        }
    }

    #[tokio::test]
    async fn test_refresh_tags_follows_connectivity() {
        let next = handler(false)
            .run_action(TagAction::RefreshTags, &Content::from(tag_list()))
            .await
            .unwrap();

        assert_eq!(
            next,
            Content::from(TagListContent {
                should_load: false,
                is_connected: false,
                ..tag_list()
            })
        );
    }

    #[tokio::test]
    async fn test_set_tags_stops_loading() {
        let tags = vec![Tag::new("rust"), Tag::new("go")];
        let next = handler(true)
            .run_action(TagAction::SetTags(tags.clone()), &Content::from(tag_list()))
            .await
            .unwrap();

        assert_eq!(
            next,
            Content::from(TagListContent {
                tags,
                should_load: false,
                ..tag_list()
            })
        );
    }

    async fn posts_for_rust(current: Content) -> PostListContent {
        let next = handler(true)
            .run_action(TagAction::PostsForTag(Tag::new("rust")), &current)
            .await
            .unwrap();
        match next {
            Content::PostList(list) => list,
            other => panic!("expected post list, got {}", other.name()),
        }
    }

    #[tokio::test]
    async fn test_posts_for_tag_opens_filtered_list() {
        let list = posts_for_rust(Content::from(tag_list())).await;

        assert_eq!(list.category, ViewCategory::All);
        assert_eq!(list.search_parameters.tags, vec![Tag::new("rust")]);
        assert!(list.search_parameters.term.is_empty());
        assert_eq!(list.should_load, ShouldLoad::FirstPage);
        assert!(list.show_description);
        assert!(list.is_connected);
    }

    #[tokio::test]
    async fn test_posts_for_tag_from_post_list_chip() {
        let current = PostListContent {
            category: ViewCategory::Unread,
            search_parameters: SearchParameters {
                term: "async".to_string(),
                tags: vec![Tag::new("go")],
            },
            ..post_list()
        };

        let list = posts_for_rust(Content::from(current)).await;

        assert_eq!(list.category, ViewCategory::All);
        assert_eq!(list.search_parameters.tags, vec![Tag::new("rust")]);
        assert!(list.search_parameters.term.is_empty());
        assert_eq!(list.should_load, ShouldLoad::FirstPage);
    }

    #[tokio::test]
    async fn test_posts_for_tag_from_any_screen() {
        let list = posts_for_rust(Content::External).await;
        assert_eq!(list.search_parameters.tags, vec![Tag::new("rust")]);
    }

    #[tokio::test]
    async fn test_tag_list_actions_elsewhere_are_noops() {
        let list = Content::from(post_list());
        for action in [TagAction::RefreshTags, TagAction::SetTags(vec![Tag::new("rust")])] {
            let next = handler(true).run_action(action, &list).await.unwrap();
            assert_eq!(next, list);
        }
    }
}
