//! Core domain types for the Pinboard client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookmark tag together with the number of bookmarks carrying it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub posts: u32,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            posts: 0,
        }
    }
}

/// A bookmark
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Server-assigned identifier, stable across edits of the same URL
    pub hash: String,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub read_later: bool,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// A note stored on Pinboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub text: String,
}

/// One page of bookmarks as returned by the posts repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostListResult {
    pub total_count: usize,
    pub posts: Vec<Post>,
    /// `false` while a background sync may still replace this data
    pub up_to_date: bool,
}

/// How a bookmark opens when selected from a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredDetailsView {
    #[default]
    InAppBrowser,
    ExternalBrowser,
    Edit,
}

/// Whether a bookmark shared into the app opens the editor, and when
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditAfterSharing {
    BeforeSaving,
    AfterSaving,
    #[default]
    SkipEdit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Appearance {
    LightTheme,
    DarkTheme,
    #[default]
    SystemDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredDateFormat {
    #[default]
    DayMonthYearWithTime,
    MonthDayYearWithTime,
    ShortYearMonthDayWithTime,
    YearMonthDayWithTime,
}

impl PreferredDateFormat {
    /// `chrono` format string used to render bookmark timestamps
    pub fn pattern(&self) -> &'static str {
        match self {
            PreferredDateFormat::DayMonthYearWithTime => "%d/%m/%Y, %H:%M",
            PreferredDateFormat::MonthDayYearWithTime => "%m/%d/%Y, %H:%M",
            PreferredDateFormat::ShortYearMonthDayWithTime => "%y/%m/%d, %H:%M",
            PreferredDateFormat::YearMonthDayWithTime => "%Y/%m/%d, %H:%M",
        }
    }

    pub fn format(&self, time: &DateTime<Utc>) -> String {
        time.format(self.pattern()).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodicSync {
    Off,
    Every6Hours,
    Every12Hours,
    #[default]
    Every24Hours,
}

impl PeriodicSync {
    /// Interval between background syncs, `None` when disabled
    pub fn hours(&self) -> Option<u32> {
        match self {
            PeriodicSync::Off => None,
            PeriodicSync::Every6Hours => Some(6),
            PeriodicSync::Every12Hours => Some(12),
            PeriodicSync::Every24Hours => Some(24),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_format_patterns() {
        let time = Utc.with_ymd_and_hms(2021, 3, 7, 14, 5, 0).unwrap();

        assert_eq!(PreferredDateFormat::DayMonthYearWithTime.format(&time), "07/03/2021, 14:05");
        assert_eq!(PreferredDateFormat::MonthDayYearWithTime.format(&time), "03/07/2021, 14:05");
        assert_eq!(PreferredDateFormat::ShortYearMonthDayWithTime.format(&time), "21/03/07, 14:05");
        assert_eq!(PreferredDateFormat::YearMonthDayWithTime.format(&time), "2021/03/07, 14:05");
    }

    #[test]
    fn test_periodic_sync_hours() {
        assert_eq!(PeriodicSync::Off.hours(), None);
        assert_eq!(PeriodicSync::Every6Hours.hours(), Some(6));
        assert_eq!(PeriodicSync::default().hours(), Some(24));
    }

    #[test]
    fn test_post_deserializes_with_defaults() {
        let json = r#"{
            "url": "https://example.com",
            "title": "Example",
            "hash": "abc",
            "time": "2021-03-07T14:05:00Z"
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.description, "");
        assert!(!post.private);
        assert!(!post.read_later);
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_preference_enums_use_snake_case() {
        let value = serde_json::to_string(&EditAfterSharing::AfterSaving).unwrap();
        assert_eq!(value, "\"after_saving\"");

        let parsed: PreferredDetailsView = serde_json::from_str("\"external_browser\"").unwrap();
        assert_eq!(parsed, PreferredDetailsView::ExternalBrowser);
    }
}
