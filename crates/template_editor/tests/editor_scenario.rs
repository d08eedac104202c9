//! End-to-end editor runs against on-disk drafts:
//! - add, drag and resize stay inside the canvas
//! - save binds the template id, reset reloads it
//! - failed loads leave the session alone

use pretty_assertions::assert_eq;
use template_editor::core::{Action, Editor, EditorSession, RecordingPrompt, SessionOptions};
use template_editor::geometry::{Point, ResizeDirection, Size, Viewport};
use template_editor::inline_edit::{EditKey, EditTarget};
use template_editor::interaction::{PointerEvent, PointerKind, PointerTarget};
use template_editor::model::{ElementId, FieldType, TextField};
use template_editor::persistence::{DraftTemplateBackend, PersistenceGateway, TemplateId};

type DraftEditor = Editor<DraftTemplateBackend, RecordingPrompt>;

fn options(template_id: Option<TemplateId>) -> SessionOptions {
    SessionOptions {
        viewport: Viewport::new(Point::default(), Size::new(800.0, 600.0)),
        picture_placeholder_url: "/static/placeholder.png".into(),
        template_id,
    }
}

fn editor_in(dir: &tempfile::TempDir, template_id: Option<TemplateId>, prompt: RecordingPrompt) -> DraftEditor {
    Editor::new(
        EditorSession::new(options(template_id)),
        PersistenceGateway::new(DraftTemplateBackend::new(dir.path())),
        prompt,
    )
}

fn pointer(kind: PointerKind, x: f64, y: f64, target: PointerTarget) -> Action {
    Action::Pointer(PointerEvent::new(kind, x, y, target))
}

async fn add(editor: &mut DraftEditor, field_type: FieldType) -> ElementId {
    editor.dispatch(Action::AddElement { field_type }).await;
    editor.session().store.elements().last().map(|el| el.id).unwrap()
}

#[tokio::test]
async fn add_drag_and_resize_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor_in(&dir, None, RecordingPrompt::default());
    editor.start().await;

    let text = add(&mut editor, FieldType::Text).await;
    let el = editor.session().store.find(text).unwrap();
    assert_eq!(el.name, "TextField1");
    assert_eq!((el.width, el.height), (200.0, 40.0));

    let picture = add(&mut editor, FieldType::Picture).await;
    let el = editor.session().store.find(picture).unwrap();
    assert_eq!(el.name, "Picture1");
    assert_eq!(el.height, 150.0);

    let registry = editor.session().controller.registry().clone();
    editor.dispatch(pointer(PointerKind::Down, 30.0, 30.0, PointerTarget::Body(text))).await;
    assert_eq!(editor.session().selected, Some(text));
    assert_eq!(registry.active(), 1);
    editor.dispatch(pointer(PointerKind::Move, 5000.0, 5000.0, PointerTarget::Background)).await;
    editor.dispatch(pointer(PointerKind::Up, 5000.0, 5000.0, PointerTarget::Background)).await;
    assert_eq!(registry.active(), 0);

    let el = editor.session().store.find(text).unwrap();
    assert_eq!((el.x, el.y), (600.0, 560.0));
    let node = editor
        .session()
        .views()
        .document
        .find_by_id(&format!("element-{text}"))
        .unwrap();
    assert_eq!(node.style_value("left"), Some("600px"));
    assert!(!node.has_class("dragging"));

    let se = PointerTarget::ResizeHandle { id: text, direction: ResizeDirection::Se };
    editor.dispatch(pointer(PointerKind::Down, 800.0, 600.0, se)).await;
    editor.dispatch(pointer(PointerKind::Move, 0.0, 0.0, se)).await;
    editor.dispatch(pointer(PointerKind::Up, 0.0, 0.0, se)).await;
    assert_eq!(registry.active(), 0);

    let el = editor.session().store.find(text).unwrap();
    assert_eq!((el.width, el.height), (50.0, 30.0));
    assert_eq!((el.x, el.y), (600.0, 560.0));
}

#[tokio::test]
async fn save_binds_id_and_reset_restores_saved_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor_in(&dir, None, RecordingPrompt::accepting());
    editor.start().await;

    let id = add(&mut editor, FieldType::Select).await;
    editor.dispatch(Action::BeginEdit { edit: EditTarget::FormName }).await;
    editor.dispatch(Action::TypeText { text: "Game review".into() }).await;
    editor.dispatch(Action::EditKey { key: EditKey::Enter }).await;
    editor.dispatch(Action::Save).await;

    assert_eq!(editor.prompt().last_alert(), Some("Template saved successfully!"));
    assert_eq!(editor.session().template_id.as_ref().map(TemplateId::as_str), Some("1"));
    assert_eq!(editor.session().location, "/editor/1/");

    editor.dispatch(Action::RemoveElement { id }).await;
    editor.dispatch(Action::SetDescription { text: "scratch".into() }).await;
    assert!(editor.session().store.is_empty());

    editor.dispatch(Action::Reset).await;
    assert_eq!(
        editor.prompt().confirmations,
        vec!["Are you sure you want to reset all changes?".to_string()]
    );
    let session = editor.session();
    assert_eq!(session.store.len(), 1);
    assert_eq!(session.store.elements()[0].id, id);
    assert_eq!(session.form_name, "Game review");
    assert_eq!(session.description, "");
    assert_eq!(session.store.counts().select, 1);
}

#[tokio::test]
async fn declined_reset_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor_in(&dir, None, RecordingPrompt::declining());
    editor.start().await;
    add(&mut editor, FieldType::Number).await;

    editor.dispatch(Action::Reset).await;
    assert_eq!(editor.session().store.len(), 1);
    assert_eq!(editor.prompt().confirmations.len(), 1);
}

#[tokio::test]
async fn reset_without_template_clears() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor_in(&dir, None, RecordingPrompt::accepting());
    editor.start().await;
    add(&mut editor, FieldType::Textarea).await;

    editor.dispatch(Action::Reset).await;
    assert!(editor.session().store.is_empty());
    assert!(editor.session().views().form.children.is_empty());
}

#[tokio::test]
async fn failed_load_keeps_store_intact() {
    let dir = tempfile::tempdir().unwrap();
    let missing = TemplateId::parse("404").unwrap();
    let mut editor = editor_in(&dir, Some(missing), RecordingPrompt::default());

    let id = add(&mut editor, FieldType::Text).await;
    editor.dispatch(Action::Select { id }).await;
    editor.dispatch(Action::Load).await;

    assert_eq!(
        editor.prompt().last_alert(),
        Some("Error loading template: template 404 not found")
    );
    assert_eq!(editor.session().store.len(), 1);
    assert_eq!(editor.session().selected, Some(id));
}

#[tokio::test]
async fn saving_an_unknown_template_reports_server_message() {
    let dir = tempfile::tempdir().unwrap();
    let ghost = TemplateId::parse("9").unwrap();
    let mut editor = editor_in(&dir, Some(ghost.clone()), RecordingPrompt::default());

    editor.dispatch(Action::Save).await;
    assert_eq!(
        editor.prompt().last_alert(),
        Some("Error saving template: template 9 does not exist")
    );
    assert_eq!(editor.session().template_id, Some(ghost));
}

#[tokio::test]
async fn edit_button_click_and_inline_commit() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor_in(&dir, None, RecordingPrompt::default());
    editor.start().await;
    let id = add(&mut editor, FieldType::Text).await;

    let button = PointerTarget::EditButton(EditTarget::Element { id, field: TextField::Placeholder });
    editor.dispatch(pointer(PointerKind::Down, 1.0, 1.0, button)).await;
    editor.dispatch(pointer(PointerKind::Up, 1.0, 1.0, button)).await;
    assert!(editor.session().inline_editor.is_some());
    assert_eq!(editor.session().selected, Some(id));

    editor.dispatch(Action::TypeText { text: "Your name".into() }).await;
    editor.dispatch(Action::Blur).await;

    let el = editor.session().store.find(id).unwrap();
    assert_eq!(el.placeholder, "Your name");
    let preview = editor
        .session()
        .views()
        .document
        .find(&|n| n.tag == "input" && n.attr_value("placeholder") == Some("Your name"));
    assert!(preview.is_some());
}

#[tokio::test]
async fn uploaded_picture_becomes_data_url() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("cover.png");
    std::fs::write(&file, [0x89, b'P', b'N', b'G']).unwrap();

    let mut editor = editor_in(&dir, None, RecordingPrompt::default());
    editor.start().await;
    let id = add(&mut editor, FieldType::Picture).await;
    editor.dispatch(Action::UploadPicture { id, path: file }).await;

    let url = &editor.session().store.find(id).unwrap().picture_url;
    assert!(url.starts_with("data:image/png;base64,"), "{url}");

    editor
        .dispatch(Action::UploadPicture { id, path: dir.path().join("missing.png") })
        .await;
    assert!(editor
        .prompt()
        .last_alert()
        .is_some_and(|a| a.starts_with("Error reading picture")));
}
