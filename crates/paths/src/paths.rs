//! Path context for runtime environment detection and editor-aware paths.

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Identifies the runtime environment where the application is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    /// Running via `cargo run` or from a `target/` directory
    Development,
    /// Running as an installed binary
    Production,
}

/// Resolves every file location the editor touches: settings, logs and
/// locally cached drafts.
///
/// Layout: `<base>/<vendor>/<app_id>/...`
#[derive(Debug, Clone)]
pub struct PathContext {
    environment: RuntimeEnvironment,
    base_path: Arc<Path>,
    vendor: String,
    app_id: &'static str,
}

impl PathContext {
    /// Creates a new PathContext with automatic environment detection.
    pub fn new(vendor: impl Into<String>, app_id: &'static str) -> Self {
        let environment = Self::detect_environment();
        let base_path = Self::determine_base_path(environment);

        Self {
            environment,
            base_path: base_path.into(),
            vendor: vendor.into(),
            app_id,
        }
    }

    /// Creates a PathContext rooted at an explicit base path (tests, dev builds).
    pub fn with_base_path(base_path: PathBuf, vendor: impl Into<String>, app_id: &'static str) -> Self {
        Self {
            environment: Self::detect_environment(),
            base_path: base_path.into(),
            vendor: vendor.into(),
            app_id,
        }
    }

    fn detect_environment() -> RuntimeEnvironment {
        if let Ok(exe_path) = std::env::current_exe() {
            if exe_path.components().any(|c| c.as_os_str() == "target") {
                return RuntimeEnvironment::Development;
            }
        }

        if std::env::var("CARGO").is_ok() || std::env::var("CARGO_MANIFEST_DIR").is_ok() {
            return RuntimeEnvironment::Development;
        }

        RuntimeEnvironment::Production
    }

    fn determine_base_path(environment: RuntimeEnvironment) -> PathBuf {
        match environment {
            RuntimeEnvironment::Development => std::env::current_dir()
                .map(|dir| dir.join(".out"))
                .unwrap_or_else(|_| PathBuf::from(".out")),
            // Kein Datenverzeichnis (z.B. minimaler Container): im Arbeitsverzeichnis bleiben
            RuntimeEnvironment::Production => {
                dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."))
            }
        }
    }

    pub fn environment(&self) -> RuntimeEnvironment {
        self.environment
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn app_id(&self) -> &str {
        self.app_id
    }

    /// `<base>/<vendor>/<app_id>`
    pub fn app_root(&self) -> PathBuf {
        self.base_path.join(&self.vendor).join(self.app_id)
    }

    /// `<app_root>/<app_id>.settings.ron`
    pub fn settings_file(&self) -> PathBuf {
        self.app_root().join(format!("{}.settings.ron", self.app_id))
    }

    /// `<app_root>/logs/`
    pub fn logs_dir(&self) -> PathBuf {
        self.app_root().join("logs")
    }

    /// `<app_root>/logs/<app_id>.<timestamp>.log`
    pub fn log_file(&self, timestamp: &str) -> PathBuf {
        self.logs_dir().join(format!("{}.{}.log", self.app_id, timestamp))
    }

    pub fn log_file_now(&self) -> PathBuf {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
        self.log_file(&timestamp)
    }

    /// `<app_root>/drafts/` — templates exported by the CLI before upload.
    pub fn drafts_dir(&self) -> PathBuf {
        self.app_root().join("drafts")
    }

    pub fn ensure_directories(&self) -> std::io::Result<()> {
        for dir in [self.app_root(), self.logs_dir(), self.drafts_dir()] {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}
