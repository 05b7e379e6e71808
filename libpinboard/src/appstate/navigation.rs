//! Navigation between screens

use async_trait::async_trait;
use std::sync::Arc;
use tokio::runtime::Handle;

use super::action::NavigationAction;
use super::content::{
    AddPostContent, Content, EditPostContent, ExternalBrowserContent, NoteDetail,
    NoteDetailContent, NoteListContent, PopularPostDetailContent, PopularPostsContent,
    PostDetailContent, PostListContent, SearchContent, ShouldLoad, TagListContent,
    UserPreferencesContent, ViewCategory,
};
use super::handler::ActionHandler;
use crate::error::Result;
use crate::repository::{
    AddPostRequest, ConnectivityInfoProvider, PostsRepository, UserRepository,
};
use crate::types::{Post, PreferredDetailsView};

pub struct NavigationActionHandler {
    user: Arc<dyn UserRepository>,
    posts: Arc<dyn PostsRepository>,
    connectivity: Arc<dyn ConnectivityInfoProvider>,
    background: Handle,
}

impl NavigationActionHandler {
    /// `background` runs the mark-as-read requests; nothing waits for them
    pub fn new(
        user: Arc<dyn UserRepository>,
        posts: Arc<dyn PostsRepository>,
        connectivity: Arc<dyn ConnectivityInfoProvider>,
        background: Handle,
    ) -> Self {
        Self {
            user,
            posts,
            connectivity,
            background,
        }
    }

    fn navigate_back(&self, current: &Content) -> Content {
        match current {
            Content::UserPreferences(preferences) => Content::from(PostListContent {
                show_description: self.user.show_description_in_lists(),
                ..preferences.previous_content.as_ref().clone()
            }),
            _ => current.previous_content().unwrap_or_else(|| current.clone()),
        }
    }

    fn view_post(&self, post: Post, current: &Content) -> Content {
        match current {
            Content::PostList(list) => match self.user.preferred_details_view() {
                PreferredDetailsView::InAppBrowser => {
                    let should_load = self.mark_as_read(&post);
                    Content::from(PostDetailContent {
                        post,
                        previous_content: Arc::new(list.with_should_load(should_load)),
                    })
                }
                PreferredDetailsView::ExternalBrowser => {
                    let should_load = self.mark_as_read(&post);
                    Content::from(ExternalBrowserContent {
                        post,
                        previous_content: Arc::new(Content::from(
                            list.with_should_load(should_load),
                        )),
                    })
                }
                PreferredDetailsView::Edit => Content::from(EditPostContent {
                    post,
                    previous_content: Arc::new(current.clone()),
                }),
            },
            Content::PopularPosts(popular) => match self.user.preferred_details_view() {
                PreferredDetailsView::ExternalBrowser => Content::from(ExternalBrowserContent {
                    post,
                    previous_content: Arc::new(current.clone()),
                }),
                _ => Content::from(PopularPostDetailContent {
                    post,
                    previous_content: Arc::new(popular.clone()),
                }),
            },
            _ => current.clone(),
        }
    }

    /// Fires the mark-as-read request when it applies and returns what the
    /// originating list should do next
    fn mark_as_read(&self, post: &Post) -> ShouldLoad {
        if !(post.read_later && self.user.mark_as_read_on_open()) {
            return ShouldLoad::Loaded;
        }

        let posts = Arc::clone(&self.posts);
        let request = AddPostRequest::mark_as_read(post);
        self.background.spawn(async move {
            let url = request.url.clone();
            if let Err(error) = posts.add(request).await {
                tracing::debug!(%url, %error, "Failed to mark bookmark as read");
            }
        });

        ShouldLoad::FirstPage
    }

    fn view_category(&self, category: ViewCategory) -> Content {
        Content::from(PostListContent::new(
            category,
            self.user.show_description_in_lists(),
            self.connectivity.is_connected(),
        ))
    }

    fn view_preferences(&self, list: &PostListContent) -> Content {
        let user = &self.user;
        Content::from(UserPreferencesContent {
            periodic_sync: user.periodic_sync(),
            appearance: user.appearance(),
            preferred_date_format: user.preferred_date_format(),
            preferred_details_view: user.preferred_details_view(),
            mark_as_read_on_open: user.mark_as_read_on_open(),
            auto_fill_description: user.auto_fill_description(),
            show_description_in_lists: user.show_description_in_lists(),
            default_private: user.default_private().unwrap_or(false),
            default_read_later: user.default_read_later().unwrap_or(false),
            edit_after_sharing: user.edit_after_sharing(),
            default_tags: user.default_tags(),
            previous_content: Arc::new(list.clone()),
        })
    }
}

#[async_trait]
impl ActionHandler<NavigationAction> for NavigationActionHandler {
    async fn run_action(&self, action: NavigationAction, current: &Content) -> Result<Content> {
        let next = match (action, current) {
            (NavigationAction::NavigateBack, _) => self.navigate_back(current),
            (NavigationAction::ViewCategory(category), _) => self.view_category(category),
            (NavigationAction::ViewPost(post), _) => self.view_post(post, current),
            (NavigationAction::ViewSearch, Content::PostList(list)) => {
                Content::from(SearchContent {
                    search_parameters: list.search_parameters.clone(),
                    available_tags: Vec::new(),
                    all_tags: Vec::new(),
                    should_load_tags: true,
                    previous_content: Arc::new(list.clone()),
                })
            }
            (NavigationAction::AddPost, Content::PostList(list)) => Content::from(AddPostContent {
                default_private: self.user.default_private().unwrap_or(false),
                default_read_later: self.user.default_read_later().unwrap_or(false),
                default_tags: self.user.default_tags(),
                previous_content: Arc::new(list.clone()),
            }),
            (NavigationAction::ViewTags, Content::PostList(list)) => {
                Content::from(TagListContent {
                    tags: Vec::new(),
                    should_load: self.connectivity.is_connected(),
                    is_connected: self.connectivity.is_connected(),
                    previous_content: Arc::new(list.clone()),
                })
            }
            (NavigationAction::ViewNotes, Content::PostList(list)) => {
                Content::from(NoteListContent {
                    notes: Vec::new(),
                    should_load: self.connectivity.is_connected(),
                    is_connected: self.connectivity.is_connected(),
                    previous_content: Arc::new(list.clone()),
                })
            }
            (NavigationAction::ViewNote(id), Content::NoteList(notes)) => {
                Content::from(NoteDetailContent {
                    id,
                    note: NoteDetail::Pending {
                        should_load: self.connectivity.is_connected(),
                    },
                    is_connected: self.connectivity.is_connected(),
                    previous_content: Arc::new(notes.clone()),
                })
            }
            (NavigationAction::ViewPopular, Content::PostList(list)) => {
                Content::from(PopularPostsContent {
                    posts: Vec::new(),
                    should_load: self.connectivity.is_connected(),
                    is_connected: self.connectivity.is_connected(),
                    previous_content: Arc::new(list.clone()),
                })
            }
            (NavigationAction::ViewPreferences, Content::PostList(list)) => {
                self.view_preferences(list)
            }
            _ => current.clone(),
        };

        Ok(next)
    }
}
