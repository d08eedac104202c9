use std::path::PathBuf;

use clap::{Parser, Subcommand};
use template_editor::persistence::TemplateId;

#[derive(Parser)]
#[command(name = "template-editor", version, about = "Form template editor")]
pub struct Cli {
    /// Keep templates as JSON drafts on disk instead of using the server
    #[arg(long, global = true)]
    pub offline: bool,

    /// Accept every confirmation without asking
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Load a template (or start a new one) and print header, document and form as HTML
    Render {
        #[arg(long)]
        template: Option<TemplateId>,
    },
    /// Dispatch a JSON array of actions, then print the views
    Replay {
        #[arg(long)]
        script: PathBuf,
        #[arg(long)]
        template: Option<TemplateId>,
        /// Save once the script has run
        #[arg(long)]
        save: bool,
    },
    /// Filter a diary entry list and report which entries stay visible
    Search {
        #[arg(long)]
        query: String,
        entries: PathBuf,
    },
    /// Inspect or change the editor settings
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    Show,
    Set {
        #[arg(long)]
        base_url: Option<String>,
        #[arg(long)]
        canvas_width: Option<f64>,
        #[arg(long)]
        canvas_height: Option<f64>,
        #[arg(long)]
        csrf_token: Option<String>,
        #[arg(long)]
        request_timeout_secs: Option<u64>,
        #[arg(long)]
        picture_placeholder_url: Option<String>,
    },
}
