//! Search screen: free-text term plus up to three tags

use async_trait::async_trait;
use std::sync::Arc;

use super::action::SearchAction;
use super::content::{Content, PostListContent, SearchContent, SearchParameters, ShouldLoad};
use super::handler::ActionHandler;
use crate::error::Result;
use crate::types::Tag;

/// Tags the search screen accepts at once
pub const MAX_SEARCH_TAGS: usize = 3;

#[derive(Debug, Default)]
pub struct SearchActionHandler;

impl SearchActionHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ActionHandler<SearchAction> for SearchActionHandler {
    async fn run_action(&self, action: SearchAction, current: &Content) -> Result<Content> {
        let next = match (action, current) {
            (SearchAction::RefreshSearchTags, Content::Search(search)) => {
                Content::from(SearchContent {
                    should_load_tags: true,
                    ..search.clone()
                })
            }
            (SearchAction::SetSearchTags(tags), Content::Search(search)) => {
                Content::from(SearchContent {
                    available_tags: unselected(&tags, &search.search_parameters),
                    all_tags: tags,
                    should_load_tags: false,
                    ..search.clone()
                })
            }
            (SearchAction::SetTerm(term), Content::Search(search)) => {
                Content::from(SearchContent {
                    search_parameters: SearchParameters {
                        term,
                        ..search.search_parameters.clone()
                    },
                    ..search.clone()
                })
            }
            (SearchAction::AddSearchTag(tag), Content::Search(search)) => add_tag(tag, search),
            (SearchAction::RemoveSearchTag(tag), Content::Search(search)) => {
                let mut parameters = search.search_parameters.clone();
                parameters.tags.retain(|selected| selected != &tag);
                Content::from(SearchContent {
                    available_tags: unselected(&search.all_tags, &parameters),
                    search_parameters: parameters,
                    ..search.clone()
                })
            }
            (SearchAction::Search, Content::Search(search)) => Content::from(PostListContent {
                search_parameters: search.search_parameters.clone(),
                should_load: ShouldLoad::FirstPage,
                ..search.previous_content.as_ref().clone()
            }),
            (SearchAction::ClearSearch, Content::Search(search)) => Content::from(SearchContent {
                search_parameters: SearchParameters::default(),
                available_tags: search.all_tags.clone(),
                ..search.clone()
            }),
            (SearchAction::ClearSearch, Content::PostList(list)) => {
                Content::from(PostListContent {
                    search_parameters: SearchParameters::default(),
                    should_load: ShouldLoad::FirstPage,
                    ..list.clone()
                })
            }
            _ => current.clone(),
        };

        Ok(next)
    }
}

fn add_tag(tag: Tag, search: &SearchContent) -> Content {
    let selected = &search.search_parameters.tags;
    if selected.len() >= MAX_SEARCH_TAGS || selected.contains(&tag) {
        return Content::from(search.clone());
    }

    let mut parameters = search.search_parameters.clone();
    parameters.tags.push(tag);
    Content::from(SearchContent {
        available_tags: search
            .available_tags
            .iter()
            .filter(|available| !parameters.tags.contains(available))
            .cloned()
            .collect(),
        search_parameters: parameters,
        ..search.clone()
    })
}

fn unselected(tags: &[Tag], parameters: &SearchParameters) -> Vec<Tag> {
    tags.iter()
        .filter(|tag| !parameters.tags.contains(tag))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appstate::content::fixtures::post_list;

    fn search() -> SearchContent {
        SearchContent {
            search_parameters: SearchParameters::default(),
            available_tags: Vec::new(),
            all_tags: Vec::new(),
            should_load_tags: true,
            previous_content: Arc::new(post_list()),
        }
    }

    fn tags(names: &[&str]) -> Vec<Tag> {
        names.iter().map(|name| Tag::new(*name)).collect()
    }

    async fn run(action: SearchAction, current: impl Into<Content>) -> SearchContent {
        match SearchActionHandler::new()
            .run_action(action, &current.into())
            .await
            .unwrap()
        {
            Content::Search(search) => search,
            other => panic!("expected search, got {}", other.name()),
        }
    }

    #[tokio::test]
    async fn test_set_search_tags_excludes_selected() {
        let current = SearchContent {
            search_parameters: SearchParameters {
                term: String::new(),
                tags: tags(&["rust"]),
            },
            ..search()
        };

        let next = run(SearchAction::SetSearchTags(tags(&["rust", "go", "zig"])), current).await;
        assert_eq!(next.all_tags, tags(&["rust", "go", "zig"]));
        assert_eq!(next.available_tags, tags(&["go", "zig"]));
        assert!(!next.should_load_tags);

        let refreshed = run(SearchAction::RefreshSearchTags, next).await;
        assert!(refreshed.should_load_tags);
    }

    #[tokio::test]
    async fn test_set_term() {
        let next = run(SearchAction::SetTerm("async".to_string()), search()).await;
        assert_eq!(next.search_parameters.term, "async");
        assert!(next.search_parameters.is_active());
    }

    #[tokio::test]
    async fn test_add_and_remove_tag() {
        let loaded = run(SearchAction::SetSearchTags(tags(&["a", "b"])), search()).await;

        let added = run(SearchAction::AddSearchTag(Tag::new("a")), loaded).await;
        assert_eq!(added.search_parameters.tags, tags(&["a"]));
        assert_eq!(added.available_tags, tags(&["b"]));

        let duplicate = run(SearchAction::AddSearchTag(Tag::new("a")), added.clone()).await;
        assert_eq!(duplicate, added);

        let removed = run(SearchAction::RemoveSearchTag(Tag::new("a")), added).await;
        assert!(removed.search_parameters.tags.is_empty());
        assert_eq!(removed.available_tags, tags(&["a", "b"]));
    }

    #[tokio::test]
    async fn test_add_tag_stops_at_limit() {
        let current = SearchContent {
            search_parameters: SearchParameters {
                term: String::new(),
                tags: tags(&["a", "b", "c"]),
            },
            ..search()
        };

        let next = run(SearchAction::AddSearchTag(Tag::new("d")), current.clone()).await;
        assert_eq!(next, current);
    }

    #[tokio::test]
    async fn test_search_applies_parameters_to_list() {
        let current = SearchContent {
            search_parameters: SearchParameters {
                term: "rust".to_string(),
                tags: tags(&["lang"]),
            },
            ..search()
        };

        let next = SearchActionHandler::new()
            .run_action(SearchAction::Search, &Content::from(current))
            .await
            .unwrap();

        let Content::PostList(list) = next else {
            panic!("expected post list");
        };
        assert_eq!(list.search_parameters.term, "rust");
        assert_eq!(list.should_load, ShouldLoad::FirstPage);
    }

    #[tokio::test]
    async fn test_clear_search() {
        let current = SearchContent {
            search_parameters: SearchParameters {
                term: "rust".to_string(),
                tags: tags(&["a"]),
            },
            all_tags: tags(&["a", "b"]),
            available_tags: tags(&["b"]),
            ..search()
        };

        let cleared = run(SearchAction::ClearSearch, current).await;
        assert!(!cleared.search_parameters.is_active());
        assert_eq!(cleared.available_tags, tags(&["a", "b"]));

        let filtered = PostListContent {
            search_parameters: SearchParameters {
                term: "rust".to_string(),
                tags: Vec::new(),
            },
            ..post_list()
        };
        let next = SearchActionHandler::new()
            .run_action(SearchAction::ClearSearch, &Content::from(filtered))
            .await
            .unwrap();
        assert_eq!(next, Content::from(post_list().with_should_load(ShouldLoad::FirstPage)));
    }

    #[tokio::test]
    async fn test_search_actions_elsewhere_are_noops() {
        let list = Content::from(post_list());
        let next = SearchActionHandler::new()
            .run_action(SearchAction::SetTerm("x".to_string()), &list)
            .await
            .unwrap();
        assert_eq!(next, list);
    }
}
