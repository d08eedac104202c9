use paths::PathContext;
use std::marker::PhantomData;
#[cfg(debug_assertions)]
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid log file path: {0}")]
    LogPath(String),
}

/// Application infrastructure context.
///
/// Holds path management, version info and the logging guard. Every binary in
/// the workspace creates exactly one of these at startup.
pub struct AppContext {
    pub path_context: PathContext,
    pub version: &'static str,
    /// Must stay alive for the whole run, otherwise buffered log lines are lost.
    _log_guard: tracing_appender::non_blocking::WorkerGuard,
}

impl AppContext {
    pub fn app_id(&self) -> &str {
        self.path_context.app_id()
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn path_context(&self) -> &PathContext {
        &self.path_context
    }
}

/// Application metadata trait.
///
/// Pure marker trait: implement it to give a binary its identity.
pub trait Application: Sized + 'static {
    const APP_ID: &'static str;
    const VENDOR: &'static str = "my_game_diary";
}

/// Builder performing the common startup work: paths, directories, logging.
pub struct AppBuilder<A: Application> {
    context: AppContext,
    _marker: PhantomData<A>,
}

impl<A: Application> AppBuilder<A> {
    /// Resolve paths for the current environment and initialize logging.
    pub fn new(version: &'static str) -> Result<Self, AppError> {
        #[cfg(debug_assertions)]
        let path_context = PathContext::with_base_path(
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("..")
                .join("..")
                .join(".out"),
            A::VENDOR,
            A::APP_ID,
        );
        #[cfg(not(debug_assertions))]
        let path_context = PathContext::new(A::VENDOR, A::APP_ID);

        Self::with_path_context(path_context, version)
    }

    /// Same as [`AppBuilder::new`] but with an explicit path layout.
    pub fn with_path_context(path_context: PathContext, version: &'static str) -> Result<Self, AppError> {
        path_context.ensure_directories()?;

        let log_file_path = path_context.log_file_now();
        let log_dir = log_file_path
            .parent()
            .ok_or_else(|| AppError::LogPath(log_file_path.display().to_string()))?;
        let log_filename = log_file_path
            .file_name()
            .ok_or_else(|| AppError::LogPath(log_file_path.display().to_string()))?;

        let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        #[cfg(debug_assertions)]
        let default_level = "info";
        #[cfg(not(debug_assertions))]
        let default_level = "warn";

        let filter = || {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
        };

        let file_layer = fmt::Layer::default()
            .with_target(false)
            .with_ansi(false)
            .with_writer(non_blocking)
            .with_filter(filter());

        // stderr, damit stdout frei für gerenderte Ausgabe bleibt
        let console_layer = fmt::Layer::default()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(filter());

        if tracing_subscriber::registry()
            .with(file_layer)
            .with(console_layer)
            .try_init()
            .is_err()
        {
            tracing::debug!("global subscriber already installed; keeping it");
        }

        tracing::info!(
            app = A::APP_ID,
            version,
            log = %log_file_path.display(),
            "application initialized"
        );

        Ok(Self {
            context: AppContext {
                path_context,
                version,
                _log_guard: guard,
            },
            _marker: PhantomData,
        })
    }

    pub fn build(self) -> AppContext {
        self.context
    }
}
