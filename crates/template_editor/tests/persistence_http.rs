use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use template_editor::core::{Action, Editor, EditorSession, RecordingPrompt, SessionOptions};
use template_editor::geometry::{Point, Size, Viewport};
use template_editor::model::FieldType;
use template_editor::persistence::{
    HttpTemplateBackend, PersistenceError, PersistenceGateway, TemplateConfig, TemplateId,
};
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> PersistenceGateway<HttpTemplateBackend> {
    let backend =
        HttpTemplateBackend::new(&server.uri(), Some("tok".into()), Duration::from_secs(5))
            .unwrap();
    PersistenceGateway::new(backend)
}

fn config() -> TemplateConfig {
    TemplateConfig {
        name: "Review".into(),
        description: "weekly".into(),
        ..TemplateConfig::default()
    }
}

#[tokio::test]
async fn create_posts_to_collection_with_csrf_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/editor/save-template/"))
        .and(header("X-CSRFToken", "tok"))
        .and(body_partial_json(json!({"name": "Review", "description": "weekly"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "success", "template_id": 12})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let id = gateway(&server).save(None, &config()).await.unwrap();
    assert_eq!(id, Some(TemplateId::parse("12").unwrap()));
}

#[tokio::test]
async fn update_posts_to_template_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/editor/save-template/7/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "success", "templateId": "7"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let id = TemplateId::parse("7").unwrap();
    let assigned = gateway(&server).save(Some(&id), &config()).await.unwrap();
    assert_eq!(assigned, Some(id));
}

#[tokio::test]
async fn save_error_body_becomes_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"status": "error", "message": "Template not found"})),
        )
        .mount(&server)
        .await;

    let err = gateway(&server).save(None, &config()).await.unwrap_err();
    assert!(matches!(err, PersistenceError::Server(ref m) if m == "Template not found"), "{err:?}");
}

#[tokio::test]
async fn save_without_body_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Server Error</h1>"))
        .mount(&server)
        .await;

    let err = gateway(&server).save(None, &config()).await.unwrap_err();
    assert!(matches!(err, PersistenceError::SaveStatus(500)), "{err:?}");
    assert_eq!(err.to_string(), "Failed to save template (HTTP 500)");
}

#[tokio::test]
async fn missing_csrf_token_is_sent_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/editor/save-template/"))
        .and(header_exists("X-CSRFToken"))
        .respond_with(ResponseTemplate::new(403).set_body_string("CSRF verification failed."))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpTemplateBackend::new(&server.uri(), None, Duration::from_secs(5)).unwrap();
    let err = PersistenceGateway::new(backend)
        .save(None, &config())
        .await
        .unwrap_err();
    assert!(matches!(err, PersistenceError::SaveStatus(403)), "{err:?}");

    let requests = server.received_requests().await.unwrap();
    let token = requests[0].headers.get("X-CSRFToken").map(|v| v.as_bytes());
    assert_eq!(token, Some(&b""[..]));
}

#[tokio::test]
async fn load_tolerates_null_description() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/editor/load-template/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Cards",
            "description": null,
            "elements": [{
                "id": 1700000000000_i64,
                "type": "select",
                "name": "Select1",
                "x": 20, "y": 20, "width": 200, "height": 40,
                "options": ["Option 1", "Option 2"]
            }],
            "elementCounts": {"text": 0, "textarea": 0, "number": 0, "select": 1, "picture": 0}
        })))
        .mount(&server)
        .await;

    let config = gateway(&server)
        .load(&TemplateId::parse("3").unwrap())
        .await
        .unwrap();
    assert_eq!(config.name, "Cards");
    assert_eq!(config.description, "");
    assert_eq!(config.elements.len(), 1);
    assert_eq!(config.elements[0].field_type, FieldType::Select);
    assert_eq!(config.elements[0].options, vec!["Option 1", "Option 2"]);
    assert_eq!(config.element_counts.select, 1);
}

#[tokio::test]
async fn load_not_found_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .load(&TemplateId::parse("99").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to load template (HTTP 404)");
}

#[tokio::test]
async fn editor_binds_new_template_from_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/editor/save-template/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "success", "templateId": 41})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = EditorSession::new(SessionOptions {
        viewport: Viewport::new(Point::default(), Size::new(800.0, 600.0)),
        picture_placeholder_url: String::new(),
        template_id: None,
    });
    let mut editor = Editor::new(session, gateway(&server), RecordingPrompt::default());
    editor.start().await;
    editor.dispatch(Action::AddElement { field_type: FieldType::Number }).await;
    editor.dispatch(Action::Save).await;

    assert_eq!(editor.prompt().last_alert(), Some("Template saved successfully!"));
    assert_eq!(editor.session().location, "/editor/41/");
}

#[tokio::test]
async fn editor_alerts_save_status_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Server Error</h1>"))
        .mount(&server)
        .await;

    let session = EditorSession::new(SessionOptions {
        viewport: Viewport::new(Point::default(), Size::new(800.0, 600.0)),
        picture_placeholder_url: String::new(),
        template_id: None,
    });
    let mut editor = Editor::new(session, gateway(&server), RecordingPrompt::default());
    editor.dispatch(Action::Save).await;

    assert_eq!(
        editor.prompt().last_alert(),
        Some("Error saving template: Failed to save template (HTTP 500)")
    );
    assert_eq!(editor.session().template_id, None);
}
