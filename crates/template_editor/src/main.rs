mod cli;
mod commands;

use app::{AppBuilder, Application};
use clap::Parser;
use color_eyre::Result;
use settings::SettingsStore;
use template_editor::config::EditorSettings;

use crate::cli::Cli;

struct TemplateEditorApp;

impl Application for TemplateEditorApp {
    const APP_ID: &'static str = "template_editor";
}

#[tokio::main]
async fn main() -> Result<()> {
    template_editor::errors::install_hooks()?;
    let cli = Cli::parse();

    let app = AppBuilder::<TemplateEditorApp>::new(env!("CARGO_PKG_VERSION"))?.build();
    let store = SettingsStore::builder()
        .with_settings_file(app.path_context().settings_file())
        .build()?;
    store.register::<EditorSettings>()?;

    commands::run(cli, &app, &store).await
}
