//! Notes list and note detail screens

use async_trait::async_trait;
use std::sync::Arc;

use super::action::NoteAction;
use super::content::{Content, NoteDetail, NoteDetailContent, NoteListContent};
use super::handler::ActionHandler;
use crate::error::Result;
use crate::repository::ConnectivityInfoProvider;

pub struct NoteActionHandler {
    connectivity: Arc<dyn ConnectivityInfoProvider>,
}

impl NoteActionHandler {
    pub fn new(connectivity: Arc<dyn ConnectivityInfoProvider>) -> Self {
        Self { connectivity }
    }
}

#[async_trait]
impl ActionHandler<NoteAction> for NoteActionHandler {
    async fn run_action(&self, action: NoteAction, current: &Content) -> Result<Content> {
        let next = match (action, current) {
            (NoteAction::RefreshNotes, Content::NoteList(list)) => {
                Content::from(NoteListContent {
                    should_load: self.connectivity.is_connected(),
                    is_connected: self.connectivity.is_connected(),
                    ..list.clone()
                })
            }
            (NoteAction::RefreshNotes, Content::NoteDetail(detail)) => {
                Content::from(NoteDetailContent {
                    note: NoteDetail::Pending {
                        should_load: self.connectivity.is_connected(),
                    },
                    is_connected: self.connectivity.is_connected(),
                    ..detail.clone()
                })
            }
            (NoteAction::SetNotes(notes), Content::NoteList(list)) => {
                Content::from(NoteListContent {
                    notes,
                    should_load: false,
                    ..list.clone()
                })
            }
            (NoteAction::SetNote(note), Content::NoteDetail(detail)) => {
                Content::from(NoteDetailContent {
                    note: NoteDetail::Loaded(note),
                    ..detail.clone()
                })
            }
            _ => current.clone(),
        };

        Ok(next)
    }
}
