use std::sync::OnceLock;

use thiserror::Error;
use tracing::error;

use crate::persistence::PersistenceError;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings error: {0}")]
    Settings(#[from] settings::SettingsError),

    #[error("invalid replay script: {0}")]
    Script(#[from] serde_json::Error),
}

static INIT: OnceLock<()> = OnceLock::new();

/// Install color-eyre report and panic hooks. Safe to call more than once.
pub fn install_hooks() -> color_eyre::Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section(format!(
            "This is a bug in {} {}. Please attach the latest log file when reporting it.",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ))
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .try_into_hooks()?;
    eyre_hook.install()?;

    std::panic::set_hook(Box::new(move |panic_info| {
        let report = panic_hook.panic_report(panic_info).to_string();
        error!("Error: {report}");
        eprintln!("{report}");
        std::process::exit(1);
    }));

    let _ = INIT.set(());
    Ok(())
}
