//! Note loading use cases

use std::sync::Arc;

use crate::appstate::{AppStateRepository, Content, NoteAction};
use crate::error::Result;
use crate::repository::NotesRepository;

/// Fetches notes and hands them to the application state
#[derive(Clone)]
pub struct NotesService {
    notes: Arc<dyn NotesRepository>,
    app_state: Arc<AppStateRepository>,
}

impl NotesService {
    pub fn new(notes: Arc<dyn NotesRepository>, app_state: Arc<AppStateRepository>) -> Self {
        Self { notes, app_state }
    }

    /// Fill the note list
    pub async fn load_notes(&self) -> Result<Content> {
        let notes = self.notes.get_all_notes().await?;
        tracing::debug!(count = notes.len(), "Loaded notes");
        self.app_state.run_action(NoteAction::SetNotes(notes)).await
    }

    /// Fill the note detail screen for `id`
    pub async fn load_note_details(&self, id: &str) -> Result<Content> {
        let note = self.notes.get_note(id).await?;
        self.app_state.run_action(NoteAction::SetNote(note)).await
    }
}
