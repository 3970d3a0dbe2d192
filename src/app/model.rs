//! Application model types: `App` and `Mode`.
//!
//! The `App` struct holds the catalog cards, the selected card, the current
//! interaction mode and the transient state of the modals.

use ratatui::layout::Rect;

use crate::catalog::CatalogEntry;
use crate::views::SeekDrag;

use super::forms::EditForm;

/// What the keyboard currently drives.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Browse,
    /// The full-screen player is open.
    Expanded,
    /// Typing paths to upload.
    Upload,
    Edit,
    ConfirmDelete,
}

/// Screen regions recorded by the last draw, used to route mouse events.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HitAreas {
    pub compact_bar: Rect,
    pub progress_track: Rect,
}

/// The main application model.
#[derive(Debug, Default)]
pub struct App {
    pub cards: Vec<CatalogEntry>,
    pub selected: usize,
    pub mode: Mode,

    /// Blocking message; any key dismisses it.
    pub alert: Option<String>,
    /// Number of files in the upload in flight.
    pub upload_busy: Option<usize>,
    pub upload_input: String,
    pub edit: Option<EditForm>,
    pub delete_target: Option<String>,

    pub drag: SeekDrag,
    pub areas: HitAreas,

    /// Where the catalog comes from, shown in the header.
    pub source_label: String,
    pub loading: bool,
}

impl App {
    pub fn new(source_label: impl Into<String>) -> Self {
        Self {
            source_label: source_label.into(),
            loading: true,
            ..Self::default()
        }
    }

    pub fn has_cards(&self) -> bool {
        !self.cards.is_empty()
    }

    pub fn selected_card(&self) -> Option<&CatalogEntry> {
        self.cards.get(self.selected)
    }

    /// Replace the cards, keeping the selection on the same file when it survives.
    pub fn set_cards(&mut self, cards: Vec<CatalogEntry>) {
        let keep = self.selected_card().map(|c| c.file.clone());
        self.cards = cards;
        self.loading = false;
        self.selected = keep
            .and_then(|f| self.cards.iter().position(|c| c.file == f))
            .unwrap_or(self.selected);
        self.clamp_selection();
    }

    /// Remove every card for `file`. Returns whether any was removed.
    pub fn remove_card(&mut self, file: &str) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| c.file != file);
        self.clamp_selection();
        self.cards.len() != before
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.cards.len() {
            self.selected = self.cards.len().saturating_sub(1);
        }
    }

    /// Move selection to the next card, wrapping to the first.
    pub fn next(&mut self) {
        if self.has_cards() {
            self.selected = (self.selected + 1) % self.cards.len();
        }
    }

    /// Move selection to the previous card, wrapping to the last.
    pub fn prev(&mut self) {
        if self.has_cards() {
            self.selected = match self.selected {
                0 => self.cards.len() - 1,
                i => i - 1,
            };
        }
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn toggle_expanded(&mut self) {
        self.mode = match self.mode {
            Mode::Expanded => Mode::Browse,
            _ => Mode::Expanded,
        };
        self.drag.pointer_up();
    }

    pub fn begin_upload(&mut self) {
        self.upload_input.clear();
        self.mode = Mode::Upload;
    }

    pub fn begin_edit(&mut self, default_cover: &str) {
        if let Some(card) = self.selected_card() {
            self.edit = Some(EditForm::for_card(card, default_cover));
            self.mode = Mode::Edit;
        }
    }

    pub fn begin_delete(&mut self) {
        if let Some(card) = self.selected_card() {
            self.delete_target = Some(card.file.clone());
            self.mode = Mode::ConfirmDelete;
        }
    }

    /// Close whatever is open and go back to the track list.
    pub fn close_modal(&mut self) {
        self.edit = None;
        self.delete_target = None;
        self.upload_input.clear();
        self.drag.pointer_up();
        self.mode = Mode::Browse;
    }

    pub fn upload_label(&self) -> Option<String> {
        self.upload_busy.map(|n| format!("Uploading ({n})..."))
    }
}
