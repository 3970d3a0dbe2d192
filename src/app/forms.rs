//! Modal form state: the metadata editor.

use std::path::PathBuf;

use crate::catalog::CatalogEntry;
use crate::client::EditRequest;

pub const EDIT_NOTHING_TO_CHANGE: &str =
    "Enter a title, an artist or a cover image, or press remove cover twice.";

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum EditField {
    #[default]
    Title,
    Artist,
    Cover,
}

/// Cover removal needs two presses: the first arms it, the second confirms.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum RemoveCover {
    #[default]
    Idle,
    Armed,
    Confirmed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub file: String,
    pub title: String,
    pub artist: String,
    /// Path of a local image to upload as the new cover.
    pub cover_path: String,
    /// Cover currently shown on the card.
    pub current_cover: String,
    pub focus: EditField,
    pub remove_cover: RemoveCover,
    /// Inline error shown under the form.
    pub error: Option<String>,
    /// A save request is in flight.
    pub saving: bool,
}

impl EditForm {
    /// Open the editor prefilled from a card.
    pub fn for_card(card: &CatalogEntry, default_cover: &str) -> Self {
        Self {
            file: card.file.clone(),
            title: card.title.clone().unwrap_or_default(),
            artist: card.artist.clone().unwrap_or_default(),
            current_cover: card
                .cover
                .clone()
                .unwrap_or_else(|| default_cover.to_string()),
            ..Self::default()
        }
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            EditField::Title => &mut self.title,
            EditField::Artist => &mut self.artist,
            EditField::Cover => &mut self.cover_path,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn pop_char(&mut self) {
        self.focused_mut().pop();
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            EditField::Title => EditField::Artist,
            EditField::Artist => EditField::Cover,
            EditField::Cover => EditField::Title,
        };
    }

    pub fn press_remove_cover(&mut self) {
        self.remove_cover = match self.remove_cover {
            RemoveCover::Idle => RemoveCover::Armed,
            RemoveCover::Armed | RemoveCover::Confirmed => RemoveCover::Confirmed,
        };
    }

    /// Build the request to send. Blank fields are left out; a form with
    /// nothing left to send is rejected with the inline message.
    pub fn to_request(&self) -> Result<EditRequest, &'static str> {
        let text = |v: &str| Some(v.trim().to_string()).filter(|s| !s.is_empty());
        let request = EditRequest {
            file: self.file.clone(),
            title: text(&self.title),
            artist: text(&self.artist),
            cover: text(&self.cover_path).map(PathBuf::from),
            remove_cover: self.remove_cover == RemoveCover::Confirmed,
        };
        if request.has_changes() {
            Ok(request)
        } else {
            Err(EDIT_NOTHING_TO_CHANGE)
        }
    }
}
