use super::*;
use crate::catalog::CatalogEntry;

const COVER: &str = "/static/img/default_cover.png";

fn card(file: &str) -> CatalogEntry {
    CatalogEntry {
        file: file.into(),
        title: Some(file.trim_end_matches(".mp3").to_uppercase()),
        artist: Some("Band".into()),
        ..CatalogEntry::default()
    }
}

fn app_with(files: &[&str]) -> App {
    let mut app = App::new("test");
    app.set_cards(files.iter().map(|f| card(f)).collect());
    app
}

#[test]
fn selection_wraps_both_ways() {
    let mut app = app_with(&["a.mp3", "b.mp3", "c.mp3"]);
    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
}

#[test]
fn navigation_on_an_empty_list_is_harmless() {
    let mut app = App::new("test");
    app.next();
    app.prev();
    assert_eq!(app.selected, 0);
    assert!(app.selected_card().is_none());
}

#[test]
fn reload_keeps_the_selected_file() {
    let mut app = app_with(&["a.mp3", "b.mp3", "c.mp3"]);
    app.selected = 1;
    app.set_cards(vec![card("z.mp3"), card("a.mp3"), card("b.mp3")]);
    assert_eq!(app.selected_card().unwrap().file, "b.mp3");
    assert!(!app.loading);
}

#[test]
fn removing_the_last_card_clamps_the_selection() {
    let mut app = app_with(&["a.mp3", "b.mp3"]);
    app.selected = 1;
    assert!(app.remove_card("b.mp3"));
    assert_eq!(app.selected, 0);
    assert!(!app.remove_card("b.mp3"));
}

#[test]
fn edit_form_is_prefilled_from_the_selected_card() {
    let mut app = app_with(&["a.mp3"]);
    app.begin_edit(COVER);

    assert_eq!(app.mode, Mode::Edit);
    let form = app.edit.as_ref().unwrap();
    assert_eq!(form.file, "a.mp3");
    assert_eq!(form.title, "A");
    assert_eq!(form.current_cover, COVER);
}

#[test]
fn remove_cover_needs_two_presses() {
    let mut form = EditForm {
        file: "a.mp3".into(),
        ..EditForm::default()
    };
    assert_eq!(form.to_request(), Err(EDIT_NOTHING_TO_CHANGE));

    form.press_remove_cover();
    assert_eq!(form.remove_cover, RemoveCover::Armed);
    assert_eq!(form.to_request(), Err(EDIT_NOTHING_TO_CHANGE));

    form.press_remove_cover();
    let request = form.to_request().unwrap();
    assert!(request.remove_cover);
    assert_eq!(request.title, None);
}

#[test]
fn edit_request_trims_and_skips_blank_fields() {
    let mut form = EditForm {
        file: "a.mp3".into(),
        title: "  New title ".into(),
        artist: "   ".into(),
        ..EditForm::default()
    };
    form.focus = EditField::Cover;
    for c in "/tmp/c.png".chars() {
        form.push_char(c);
    }

    let request = form.to_request().unwrap();
    assert_eq!(request.title.as_deref(), Some("New title"));
    assert_eq!(request.artist, None);
    assert_eq!(request.cover, Some("/tmp/c.png".into()));
    assert!(!request.remove_cover);
}

#[test]
fn field_focus_cycles() {
    let mut form = EditForm::default();
    form.next_field();
    form.push_char('x');
    form.next_field();
    form.next_field();
    form.push_char('y');
    form.pop_char();
    form.push_char('z');
    assert_eq!(form.artist, "x");
    assert_eq!(form.title, "z");
}

#[test]
fn closing_a_modal_resets_its_state() {
    let mut app = app_with(&["a.mp3"]);
    app.begin_delete();
    assert_eq!(app.delete_target.as_deref(), Some("a.mp3"));

    app.close_modal();
    assert_eq!(app.mode, Mode::Browse);
    assert_eq!(app.delete_target, None);
}

#[test]
fn expanded_view_toggles() {
    let mut app = App::new("test");
    app.toggle_expanded();
    assert_eq!(app.mode, Mode::Expanded);
    app.toggle_expanded();
    assert_eq!(app.mode, Mode::Browse);
}

#[test]
fn upload_label_counts_files() {
    let mut app = App::new("test");
    assert_eq!(app.upload_label(), None);
    app.upload_busy = Some(3);
    assert_eq!(app.upload_label().as_deref(), Some("Uploading (3)..."));
}
