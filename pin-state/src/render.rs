//! One-line text rendering of screen states

use libpinboard::appstate::{
    Content, NoteDetail, PostListContent, ShouldLoad, SortType, ViewCategory,
};
use libpinboard::Tag;

/// Name and the fields that matter for the screen
pub fn describe(content: &Content) -> String {
    match content {
        Content::Login(login) => format!("Login unauthorized={}", login.is_unauthorized),
        Content::PostList(list) => describe_list(list),
        Content::PostDetail(detail) => format!("PostDetail url={}", detail.post.url),
        Content::ExternalBrowser(browser) => format!("ExternalBrowser url={}", browser.post.url),
        Content::Search(search) => format!(
            "Search term={:?} tags=[{}] available={} loading_tags={}",
            search.search_parameters.term,
            tag_names(&search.search_parameters.tags),
            search.available_tags.len(),
            search.should_load_tags
        ),
        Content::AddPost(add) => format!(
            "AddPost private={} read_later={} tags=[{}]",
            add.default_private,
            add.default_read_later,
            tag_names(&add.default_tags)
        ),
        Content::EditPost(edit) => format!("EditPost url={}", edit.post.url),
        Content::TagList(tags) => format!(
            "TagList tags={} loading={} connected={}",
            tags.tags.len(),
            tags.should_load,
            tags.is_connected
        ),
        Content::NoteList(notes) => format!(
            "NoteList notes={} loading={} connected={}",
            notes.notes.len(),
            notes.should_load,
            notes.is_connected
        ),
        Content::NoteDetail(detail) => {
            let note = match &detail.note {
                NoteDetail::Pending { should_load: true } => "loading".to_string(),
                NoteDetail::Pending { should_load: false } => "unavailable".to_string(),
                NoteDetail::Loaded(note) => format!("{:?}", note.title),
            };
            format!(
                "NoteDetail id={} note={} connected={}",
                detail.id, note, detail.is_connected
            )
        }
        Content::PopularPosts(popular) => format!(
            "PopularPosts posts={} loading={} connected={}",
            popular.posts.len(),
            popular.should_load,
            popular.is_connected
        ),
        Content::PopularPostDetail(detail) => format!("PopularPostDetail url={}", detail.post.url),
        Content::UserPreferences(preferences) => format!(
            "UserPreferences details_view={:?} show_description={}",
            preferences.preferred_details_view, preferences.show_description_in_lists
        ),
        Content::External => "External".to_string(),
    }
}

fn describe_list(list: &PostListContent) -> String {
    let mut line = format!(
        "PostList category={} posts={}/{} sort={} load={} connected={}",
        category_name(list.category),
        list.current_count(),
        list.total_count(),
        match list.sort_type {
            SortType::NewestFirst => "newest_first",
            SortType::OldestFirst => "oldest_first",
        },
        should_load_name(&list.should_load),
        list.is_connected
    );

    if list.search_parameters.is_active() {
        line.push_str(&format!(
            " search={:?} tags=[{}]",
            list.search_parameters.term,
            tag_names(&list.search_parameters.tags)
        ));
    }
    if let Some(posts) = &list.posts {
        if !posts.already_displayed {
            line.push_str(&format!(" diff_ops={}", posts.diff.ops().len()));
        }
    }
    line
}

fn category_name(category: ViewCategory) -> &'static str {
    match category {
        ViewCategory::All => "all",
        ViewCategory::Recent => "recent",
        ViewCategory::Public => "public",
        ViewCategory::Private => "private",
        ViewCategory::Unread => "unread",
        ViewCategory::Untagged => "untagged",
    }
}

fn should_load_name(should_load: &ShouldLoad) -> String {
    match should_load {
        ShouldLoad::FirstPage => "first_page".to_string(),
        ShouldLoad::NextPage { offset } => format!("next_page@{}", offset),
        ShouldLoad::ForceLoad => "force_load".to_string(),
        ShouldLoad::Syncing => "syncing".to_string(),
        ShouldLoad::Loaded => "loaded".to_string(),
    }
}

fn tag_names(tags: &[Tag]) -> String {
    tags.iter()
        .map(|tag| tag.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use libpinboard::appstate::LoginContent;

    #[test]
    fn test_describe_fresh_list() {
        let list = PostListContent::new(ViewCategory::Unread, true, false);
        assert_eq!(
            describe(&Content::from(list)),
            "PostList category=unread posts=0/0 sort=newest_first load=first_page connected=false"
        );
    }

    #[test]
    fn test_describe_login() {
        let login = Content::from(LoginContent { is_unauthorized: true });
        assert_eq!(describe(&login), "Login unauthorized=true");
    }

    #[test]
    fn test_should_load_names() {
        assert_eq!(should_load_name(&ShouldLoad::NextPage { offset: 20 }), "next_page@20");
        assert_eq!(should_load_name(&ShouldLoad::Syncing), "syncing");
    }
}
