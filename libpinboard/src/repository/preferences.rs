//! Config-backed [`UserRepository`]

use secrecy::{ExposeSecret, SecretString};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use super::UserRepository;
use crate::config::{Config, PreferencesConfig};
use crate::error::Result;
use crate::types::{
    Appearance, EditAfterSharing, PeriodicSync, PreferredDateFormat, PreferredDetailsView, Tag,
};

/// User preferences held in memory, optionally written back to a config file
///
/// The auth token is kept apart from the plain preferences so it never
/// shows up in `Debug` output.
pub struct PreferencesStore {
    preferences: RwLock<PreferencesConfig>,
    auth_token: RwLock<Option<SecretString>>,
    path: Option<PathBuf>,
}

impl PreferencesStore {
    /// Create a store that lives only in memory
    pub fn new(preferences: PreferencesConfig) -> Self {
        let mut preferences = preferences;
        let auth_token = preferences
            .auth_token
            .take()
            .filter(|token| !token.is_empty())
            .map(SecretString::from);

        Self {
            preferences: RwLock::new(preferences),
            auth_token: RwLock::new(auth_token),
            path: None,
        }
    }

    /// Create a store seeded from `config` that [`save`](Self::save)s to `path`
    pub fn with_path(config: &Config, path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::new(config.preferences.clone())
        }
    }

    /// Current preferences, including the auth token
    pub fn snapshot(&self) -> PreferencesConfig {
        let mut preferences = self.read(Clone::clone);
        preferences.auth_token = self
            .auth_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|token| token.expose_secret().to_string());
        preferences
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the preferences back into the config file this store came from
    ///
    /// The `[logging]` section already in the file is preserved. Stores
    /// created with [`new`](Self::new) have nowhere to write and return `Ok`.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut config = if path.exists() {
            Config::load_from_path(path)?
        } else {
            Config::default()
        };
        config.preferences = self.snapshot();
        config.save_to_path(path)?;
        tracing::debug!(path = %path.display(), "Saved user preferences");
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&PreferencesConfig) -> T) -> T {
        f(&self.preferences.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write(&self, f: impl FnOnce(&mut PreferencesConfig)) {
        f(&mut self.preferences.write().unwrap_or_else(PoisonError::into_inner))
    }
}

impl std::fmt::Debug for PreferencesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferencesStore")
            .field("preferences", &self.read(Clone::clone))
            .field("has_auth_token", &self.has_auth_token())
            .field("path", &self.path)
            .finish()
    }
}

impl UserRepository for PreferencesStore {
    fn auth_token(&self) -> Option<SecretString> {
        self.auth_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|token| SecretString::from(token.expose_secret().to_string()))
    }

    fn set_auth_token(&self, token: Option<SecretString>) {
        *self.auth_token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn has_auth_token(&self) -> bool {
        self.auth_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn show_description_in_lists(&self) -> bool {
        self.read(|p| p.show_description_in_lists)
    }

    fn set_show_description_in_lists(&self, value: bool) {
        self.write(|p| p.show_description_in_lists = value)
    }

    fn preferred_details_view(&self) -> PreferredDetailsView {
        self.read(|p| p.preferred_details_view)
    }

    fn set_preferred_details_view(&self, value: PreferredDetailsView) {
        self.write(|p| p.preferred_details_view = value)
    }

    fn mark_as_read_on_open(&self) -> bool {
        self.read(|p| p.mark_as_read_on_open)
    }

    fn set_mark_as_read_on_open(&self, value: bool) {
        self.write(|p| p.mark_as_read_on_open = value)
    }

    fn auto_fill_description(&self) -> bool {
        self.read(|p| p.auto_fill_description)
    }

    fn set_auto_fill_description(&self, value: bool) {
        self.write(|p| p.auto_fill_description = value)
    }

    fn default_private(&self) -> Option<bool> {
        self.read(|p| p.default_private).then_some(true)
    }

    fn set_default_private(&self, value: bool) {
        self.write(|p| p.default_private = value)
    }

    fn default_read_later(&self) -> Option<bool> {
        self.read(|p| p.default_read_later).then_some(true)
    }

    fn set_default_read_later(&self, value: bool) {
        self.write(|p| p.default_read_later = value)
    }

    fn default_tags(&self) -> Vec<Tag> {
        self.read(|p| p.default_tags.iter().map(Tag::new).collect())
    }

    fn set_default_tags(&self, value: Vec<Tag>) {
        self.write(|p| p.default_tags = value.into_iter().map(|tag| tag.name).collect())
    }

    fn edit_after_sharing(&self) -> EditAfterSharing {
        self.read(|p| p.edit_after_sharing)
    }

    fn set_edit_after_sharing(&self, value: EditAfterSharing) {
        self.write(|p| p.edit_after_sharing = value)
    }

    fn periodic_sync(&self) -> PeriodicSync {
        self.read(|p| p.periodic_sync)
    }

    fn set_periodic_sync(&self, value: PeriodicSync) {
        self.write(|p| p.periodic_sync = value)
    }

    fn appearance(&self) -> Appearance {
        self.read(|p| p.appearance)
    }

    fn set_appearance(&self, value: Appearance) {
        self.write(|p| p.appearance = value)
    }

    fn preferred_date_format(&self) -> PreferredDateFormat {
        self.read(|p| p.preferred_date_format)
    }

    fn set_preferred_date_format(&self, value: PreferredDateFormat) {
        self.write(|p| p.preferred_date_format = value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_private_only_when_opted_in() {
        let store = PreferencesStore::new(PreferencesConfig::default());
        assert_eq!(store.default_private(), None);
        assert_eq!(store.default_read_later(), None);

        store.set_default_private(true);
        store.set_default_read_later(true);
        assert_eq!(store.default_private(), Some(true));
        assert_eq!(store.default_read_later(), Some(true));
    }

    #[test]
    fn test_default_tags_round_trip_names() {
        let store = PreferencesStore::new(PreferencesConfig::default());
        store.set_default_tags(vec![Tag::new("rust"), Tag::new("async")]);

        assert_eq!(store.default_tags(), vec![Tag::new("rust"), Tag::new("async")]);
        assert_eq!(store.snapshot().default_tags, vec!["rust", "async"]);
    }

    #[test]
    fn test_empty_auth_token_is_ignored() {
        let store = PreferencesStore::new(PreferencesConfig {
            auth_token: Some(String::new()),
            ..Default::default()
        });
        assert!(!store.has_auth_token());
    }

    #[test]
    fn test_auth_token_not_in_debug_output() {
        let store = PreferencesStore::new(PreferencesConfig {
            auth_token: Some("user:SECRET".to_string()),
            ..Default::default()
        });

        let debug = format!("{:?}", store);
        assert!(store.has_auth_token());
        assert!(!debug.contains("SECRET"));
        assert!(debug.contains("has_auth_token: true"));
    }

    #[test]
    fn test_save_preserves_logging_section() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nformat = \"json\"\nlevel = \"debug\"\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        let store = PreferencesStore::with_path(&config, &path);
        store.set_preferred_details_view(PreferredDetailsView::Edit);
        store.set_auth_token(Some(SecretString::from("user:TOKEN".to_string())));
        store.save().unwrap();

        let saved = Config::load_from_path(&path).unwrap();
        assert_eq!(saved.logging.level, "debug");
        assert_eq!(saved.preferences.preferred_details_view, PreferredDetailsView::Edit);
        assert_eq!(saved.preferences.auth_token.as_deref(), Some("user:TOKEN"));
    }

    #[test]
    fn test_save_without_path_is_noop() {
        let store = PreferencesStore::new(PreferencesConfig::default());
        assert!(store.path().is_none());
        assert!(store.save().is_ok());
    }
}
