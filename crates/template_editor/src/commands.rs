use std::io::{self, BufRead, Write};
use std::path::Path;

use app::AppContext;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use serde_json::Value;
use settings::SettingsStore;
use template_editor::config::EditorSettings;
use template_editor::core::{Action, Editor, EditorSession, UserPrompt};
use template_editor::EditorError;
use template_editor::persistence::{
    DraftTemplateBackend, HttpTemplateBackend, PersistenceError, PersistenceGateway, SaveResponse,
    TemplateBackend, TemplateConfig, TemplateId,
};
use template_editor::search::{entry_list, DiaryEntry, SearchFilter, HIGHLIGHT_CLASS, ITEM_CLASS};

use crate::cli::{Cli, Cmd, ConfigCmd};

/// Alerts on stderr, confirmations read from stdin.
struct TerminalPrompt {
    assume_yes: bool,
}

impl UserPrompt for TerminalPrompt {
    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

enum Backend {
    Http(HttpTemplateBackend),
    Drafts(DraftTemplateBackend),
}

impl TemplateBackend for Backend {
    async fn save(
        &self,
        id: Option<&TemplateId>,
        config: &TemplateConfig,
    ) -> Result<SaveResponse, PersistenceError> {
        match self {
            Backend::Http(backend) => backend.save(id, config).await,
            Backend::Drafts(backend) => backend.save(id, config).await,
        }
    }

    async fn load(&self, id: &TemplateId) -> Result<TemplateConfig, PersistenceError> {
        match self {
            Backend::Http(backend) => backend.load(id).await,
            Backend::Drafts(backend) => backend.load(id).await,
        }
    }
}

pub async fn run(cli: Cli, app: &AppContext, store: &SettingsStore) -> Result<()> {
    let settings = store.get::<EditorSettings>()?;
    let prompt = TerminalPrompt {
        assume_yes: cli.yes,
    };

    match cli.cmd {
        Cmd::Render { template } => {
            let mut editor = open_editor(&settings, app, cli.offline, template, prompt)?;
            editor.start().await;
            print_views(editor.session());
        }
        Cmd::Replay {
            script,
            template,
            save,
        } => {
            let steps = read_script(&script)
                .wrap_err_with(|| format!("reading {}", script.display()))?;
            let mut editor = open_editor(&settings, app, cli.offline, template, prompt)?;
            editor.start().await;
            for (index, mut step) in steps.into_iter().enumerate() {
                resolve_element_refs(&mut step, editor.session());
                let action: Action = serde_json::from_value(step)
                    .wrap_err_with(|| format!("step {index} of {}", script.display()))?;
                editor.dispatch(action).await;
            }
            if save {
                editor.dispatch(Action::Save).await;
            }
            print_views(editor.session());
        }
        Cmd::Search { query, entries } => {
            let text = std::fs::read_to_string(&entries)
                .wrap_err_with(|| format!("reading {}", entries.display()))?;
            let entries: Vec<DiaryEntry> = serde_json::from_str(&text)?;
            let mut list = entry_list(&entries);
            let visible = SearchFilter::new(&query).apply(&mut list);

            for (entry, item) in entries.iter().zip(list.descendants_with_class(ITEM_CLASS)) {
                let marker = if item.has_class("d-none") { " " } else { "x" };
                let matches = item
                    .descendants_with_class(HIGHLIGHT_CLASS)
                    .iter()
                    .filter(|h| h.has_class("text-warning"))
                    .count();
                println!("[{marker}] {} ({matches} highlighted)", entry.title);
            }
            println!("{visible} of {} entries visible", entries.len());
        }
        Cmd::Config { action } => match action {
            ConfigCmd::Show => {
                println!("# {}", store.file_path().display());
                println!(
                    "{}",
                    ron::ser::to_string_pretty(&settings, ron::ser::PrettyConfig::default())?
                );
            }
            ConfigCmd::Set {
                base_url,
                canvas_width,
                canvas_height,
                csrf_token,
                request_timeout_secs,
                picture_placeholder_url,
            } => {
                store.update::<EditorSettings, _>(|s| {
                    if let Some(v) = base_url {
                        s.server.base_url = v;
                    }
                    if let Some(v) = canvas_width {
                        s.canvas.width = v;
                    }
                    if let Some(v) = canvas_height {
                        s.canvas.height = v;
                    }
                    if let Some(v) = csrf_token {
                        s.server.csrf_token = Some(v).filter(|t| !t.is_empty());
                    }
                    if let Some(v) = request_timeout_secs {
                        s.server.request_timeout_secs = v;
                    }
                    if let Some(v) = picture_placeholder_url {
                        s.picture_placeholder_url = v;
                    }
                })?;
                println!("settings written to {}", store.file_path().display());
            }
        },
    }
    Ok(())
}

fn open_editor(
    settings: &EditorSettings,
    app: &AppContext,
    offline: bool,
    template: Option<TemplateId>,
    prompt: TerminalPrompt,
) -> Result<Editor<Backend, TerminalPrompt>, EditorError> {
    let backend = if offline {
        Backend::Drafts(DraftTemplateBackend::new(app.path_context().drafts_dir()))
    } else {
        Backend::Http(HttpTemplateBackend::new(
            &settings.server.base_url,
            settings.server.csrf_token.clone(),
            settings.request_timeout(),
        )?)
    };
    let session = EditorSession::new(settings.session_options(template));
    Ok(Editor::new(session, PersistenceGateway::new(backend), prompt))
}

fn read_script(path: &Path) -> Result<Vec<Value>, EditorError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn print_views(session: &EditorSession) {
    println!("<!-- {} -->", session.location);
    print!("{}", session.views().to_html());
}

/// Scripts cannot know timestamp ids up front; `"#n"` stands for the id of the
/// n-th element (1-based) at the time the step runs.
fn resolve_element_refs(value: &mut Value, session: &EditorSession) {
    match value {
        Value::String(text) => {
            let resolved = text
                .strip_prefix('#')
                .and_then(|n| n.parse::<usize>().ok())
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| session.store.elements().get(i))
                .map(|el| Value::from(el.id.0));
            if let Some(id) = resolved {
                *value = id;
            }
        }
        Value::Array(items) => items
            .iter_mut()
            .for_each(|item| resolve_element_refs(item, session)),
        Value::Object(map) => map
            .values_mut()
            .for_each(|item| resolve_element_refs(item, session)),
        _ => {}
    }
}
