use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use ron::value::{Map as RonMap, Value as RonValue};

use crate::{Settings, SettingsError};

type Sections = HashMap<String, RonValue>;

fn to_ron_map<T: Settings>(value: &T) -> Result<RonMap, SettingsError> {
    let text = ron::to_string(value)?;
    match parse::<RonValue>(&text, "<section>")? {
        RonValue::Map(map) => Ok(map),
        _ => Err(SettingsError::NotAMap(T::name())),
    }
}

fn parse<T: serde::de::DeserializeOwned>(text: &str, origin: &str) -> Result<T, SettingsError> {
    ron::from_str(text).map_err(|err| SettingsError::Parse {
        file: origin.to_string(),
        message: err.to_string(),
    })
}

/// Overlay `delta` onto `base`, recursing into nested maps.
fn merge_maps(base: &RonMap, delta: &RonMap) -> RonMap {
    let mut merged = base.clone();
    for (key, delta_value) in delta.iter() {
        let combined = match (merged.get(key), delta_value) {
            (Some(RonValue::Map(base_sub)), RonValue::Map(delta_sub)) => {
                RonValue::Map(merge_maps(base_sub, delta_sub))
            }
            _ => delta_value.clone(),
        };
        merged.insert(key.clone(), combined);
    }
    merged
}

/// Entries of `current` that differ from `defaults`, recursing into nested maps.
fn diff_maps(current: &RonMap, defaults: &RonMap) -> RonMap {
    let mut out = RonMap::new();
    for (key, value) in current.iter() {
        match (defaults.get(key), value) {
            (Some(RonValue::Map(default_sub)), RonValue::Map(current_sub)) => {
                let sub = diff_maps(current_sub, default_sub);
                if !sub.is_empty() {
                    out.insert(key.clone(), RonValue::Map(sub));
                }
            }
            (Some(default_value), _) if default_value == value => {}
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    out
}

fn read_deltas(path: &Path) -> Result<Sections, SettingsError> {
    if !path.exists() {
        return Ok(Sections::new());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Sections::new());
    }
    parse(&content, &path.display().to_string())
}

/// Builder for [`SettingsStore`].
#[derive(Default)]
pub struct SettingsStoreBuilder {
    settings_file: Option<PathBuf>,
}

impl SettingsStoreBuilder {
    pub fn with_settings_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.settings_file = Some(path.into());
        self
    }

    pub fn build(self) -> Result<SettingsStore, SettingsError> {
        let file_path = self.settings_file.ok_or_else(|| {
            SettingsError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "settings file not specified",
            ))
        })?;

        if let Some(dir) = file_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let deltas = read_deltas(&file_path)?;
        tracing::debug!(file = %file_path.display(), sections = deltas.len(), "settings loaded");

        Ok(SettingsStore {
            file_path,
            deltas: RwLock::new(deltas),
            defaults: RwLock::new(HashMap::new()),
            values: RwLock::new(HashMap::new()),
        })
    }
}

/// Thread-safe settings store (single delta file).
pub struct SettingsStore {
    file_path: PathBuf,
    deltas: RwLock<Sections>,
    defaults: RwLock<HashMap<&'static str, RonMap>>,
    values: RwLock<HashMap<&'static str, RonMap>>,
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, SettingsError> {
    lock.read().map_err(|_| SettingsError::Poisoned)
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, SettingsError> {
    lock.write().map_err(|_| SettingsError::Poisoned)
}

impl SettingsStore {
    pub fn builder() -> SettingsStoreBuilder {
        SettingsStoreBuilder::default()
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn is_registered<T: Settings>(&self) -> bool {
        read(&self.values)
            .map(|values| values.contains_key(T::name()))
            .unwrap_or(false)
    }

    /// Register a section: its defaults plus any delta already on disk.
    pub fn register<T: Settings>(&self) -> Result<(), SettingsError> {
        let section = T::name();
        if read(&self.values)?.contains_key(section) {
            return Err(SettingsError::AlreadyRegistered(section));
        }

        let default_map = to_ron_map(&T::default())?;
        let merged = match read(&self.deltas)?.get(section) {
            Some(RonValue::Map(delta)) => merge_maps(&default_map, delta),
            Some(_) => {
                tracing::warn!(section, "ignoring non-map settings delta");
                default_map.clone()
            }
            None => default_map.clone(),
        };

        write(&self.defaults)?.insert(section, default_map);
        write(&self.values)?.insert(section, merged);
        Ok(())
    }

    /// Effective value of a section.
    pub fn get<T: Settings>(&self) -> Result<T, SettingsError> {
        let section = T::name();
        let values = read(&self.values)?;
        let map = values
            .get(section)
            .ok_or(SettingsError::NotRegistered(section))?;
        Ok(RonValue::Map(map.clone()).into_rust::<T>()?)
    }

    /// Mutate a section and persist the difference to its defaults.
    pub fn update<T, F>(&self, mutator: F) -> Result<T, SettingsError>
    where
        T: Settings,
        F: FnOnce(&mut T),
    {
        let section = T::name();
        let mut current = self.get::<T>()?;
        mutator(&mut current);

        let new_map = to_ron_map(&current)?;
        let diff = {
            let defaults = read(&self.defaults)?;
            let default_map = defaults
                .get(section)
                .ok_or(SettingsError::NotRegistered(section))?;
            diff_maps(&new_map, default_map)
        };

        write(&self.values)?.insert(section, new_map);
        {
            let mut deltas = write(&self.deltas)?;
            if diff.is_empty() {
                deltas.remove(section);
            } else {
                deltas.insert(section.to_string(), RonValue::Map(diff));
            }
        }

        self.persist()?;
        tracing::info!(section, file = %self.file_path.display(), "settings updated");
        Ok(current)
    }

    /// Re-read the delta file and re-merge every registered section.
    pub fn reload(&self) -> Result<(), SettingsError> {
        let fresh = read_deltas(&self.file_path)?;
        let defaults = read(&self.defaults)?;
        let mut values = write(&self.values)?;

        for (&section, default_map) in defaults.iter() {
            let merged = match fresh.get(section) {
                Some(RonValue::Map(delta)) => merge_maps(default_map, delta),
                _ => default_map.clone(),
            };
            values.insert(section, merged);
        }

        *write(&self.deltas)? = fresh;
        Ok(())
    }

    fn persist(&self) -> Result<(), SettingsError> {
        let deltas = read(&self.deltas)?;
        let text = ron::ser::to_string_pretty(&*deltas, ron::ser::PrettyConfig::default())?;

        let tmp = self.file_path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.file_path)?;
        Ok(())
    }
}
