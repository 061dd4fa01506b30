//! Configuration store
//!
//! [`ConfigStore`] owns the ordered list of configurations and keeps the
//! backing [`KeyValueStore`] in sync with it.
//!
//! # Persistence
//!
//! The whole list is serialized under one key after every mutation. The
//! in-memory list is authoritative for the session: when a write fails the
//! mutation still stands, the failure is logged, and it is reported to the
//! caller through [`Persisted`].
//!
//! # Ids
//!
//! Ids are UUID v4, re-drawn in the (practically impossible) event that the
//! drawn value is already in the list, so minting never reuses a live id.

pub mod export;

pub use export::ExportFile;

use crate::build::{Configuration, Statistics};
use crate::error::{Result, RigbookError};
use crate::storage::{DEFAULT_STORAGE_KEY, KeyValueStore};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Suffix appended to the name of a duplicated configuration
pub const COPY_SUFFIX: &str = " (copy)";

/// Outcome of a mutation: the operation's value plus the result of persisting the list
///
/// The mutation has been applied in memory regardless of `saved`.
#[derive(Debug)]
#[must_use = "the storage write may have failed"]
pub struct Persisted<T> {
    /// Value produced by the operation
    pub value: T,
    /// Result of writing the full list to storage
    pub saved: Result<()>,
}

impl<T> Persisted<T> {
    /// Whether the list was written to storage
    pub fn is_saved(&self) -> bool {
        self.saved.is_ok()
    }

    /// Storage error, if the write failed
    pub fn save_error(&self) -> Option<&RigbookError> {
        self.saved.as_ref().err()
    }

    /// Collapse into a `Result`, dropping the value if the write failed
    pub fn into_result(self) -> Result<T> {
        self.saved.map(|()| self.value)
    }
}

/// In-memory configuration list synchronised with a key-value store
#[derive(Debug)]
pub struct ConfigStore<S: KeyValueStore> {
    configs: Vec<Configuration>,
    storage: S,
    key: String,
}

impl<S: KeyValueStore> ConfigStore<S> {
    /// Load the list stored under the default key
    ///
    /// Missing, unreadable or corrupt data yields an empty list.
    pub fn load(storage: S) -> Self {
        Self::load_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Load the list stored under `key`
    ///
    /// Missing, unreadable or corrupt data yields an empty list.
    pub fn load_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let configs = match read_configs(&storage, &key) {
            Ok(configs) => configs,
            Err(e) => {
                warn!("Failed to load configurations, starting empty: {}", e);
                Vec::new()
            }
        };
        Self {
            configs,
            storage,
            key,
        }
    }

    /// Load the list stored under `key`, returning read and parse failures
    pub fn try_load(storage: S, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let configs = read_configs(&storage, &key)?;
        Ok(Self {
            configs,
            storage,
            key,
        })
    }

    /// Current configurations in insertion order
    pub fn configs(&self) -> &[Configuration] {
        &self.configs
    }

    /// Number of configurations
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Storage key the list is persisted under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Backing storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Look up a configuration by id
    pub fn get(&self, id: Uuid) -> Option<&Configuration> {
        self.configs.iter().find(|config| config.id == id)
    }

    /// Resolve a full id or a unique id prefix
    pub fn find_by_prefix(&self, prefix: &str) -> Result<&Configuration> {
        let needle = prefix.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(RigbookError::ConfigurationNotFound(prefix.to_string()));
        }

        let mut matches = self
            .configs
            .iter()
            .filter(|config| config.id.to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(config), None) => Ok(config),
            (Some(_), Some(_)) => Err(RigbookError::AmbiguousId(prefix.to_string())),
            (None, _) => Err(RigbookError::ConfigurationNotFound(prefix.to_string())),
        }
    }

    /// Mint an id that no configuration in the list uses
    pub fn mint_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if self.get(id).is_none() {
                return id;
            }
        }
    }

    /// Write the full list to storage
    pub fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.configs)?;
        self.storage.set(&self.key, &json)?;
        debug!("Persisted {} configurations under '{}'", self.configs.len(), self.key);
        Ok(())
    }

    /// Append a new configuration
    ///
    /// Fails without touching the list if the id is already in use.
    pub fn create(&mut self, config: Configuration) -> Result<Persisted<()>> {
        if self.get(config.id).is_some() {
            return Err(RigbookError::DuplicateId(config.id));
        }

        info!("Creating configuration '{}' ({})", config.name, config.id);
        self.configs.push(config);
        Ok(self.persist(()))
    }

    /// Replace the configuration with the same id
    ///
    /// Unknown ids leave the list unchanged. The value is `true` when an entry was replaced.
    pub fn update(&mut self, config: Configuration) -> Persisted<bool> {
        let replaced = match self.configs.iter_mut().find(|existing| existing.id == config.id) {
            Some(existing) => {
                info!("Updating configuration '{}' ({})", config.name, config.id);
                *existing = config;
                true
            }
            None => {
                debug!("Update for unknown configuration {} ignored", config.id);
                false
            }
        };
        self.persist(replaced)
    }

    /// Remove the configuration with the given id, keeping the order of the rest
    ///
    /// The value is `true` when an entry was removed.
    pub fn delete(&mut self, id: Uuid) -> Persisted<bool> {
        let before = self.configs.len();
        self.configs.retain(|config| config.id != id);
        let removed = self.configs.len() != before;
        if removed {
            info!("Deleted configuration {}", id);
        } else {
            debug!("Delete for unknown configuration {} ignored", id);
        }
        self.persist(removed)
    }

    /// Append a copy of `config` with a fresh id and `" (copy)"` appended to its name
    ///
    /// The value is the id of the copy.
    pub fn duplicate(&mut self, config: &Configuration) -> Persisted<Uuid> {
        let mut copy = config.clone();
        copy.id = self.mint_id();
        copy.name = format!("{}{COPY_SUFFIX}", config.name);

        info!("Duplicated configuration {} as {}", config.id, copy.id);
        let id = copy.id;
        self.configs.push(copy);
        self.persist(id)
    }

    /// Serialize a configuration for download
    pub fn export(&self, config: &Configuration) -> Result<ExportFile> {
        ExportFile::from_configuration(config)
    }

    /// Append a configuration read from exported JSON under a fresh id
    ///
    /// The value is the id assigned to the imported configuration.
    pub fn import(&mut self, bytes: &[u8]) -> Result<Persisted<Uuid>> {
        let mut config = export::parse_exported(bytes)?;
        config.id = self.mint_id();

        info!("Imported configuration '{}' as {}", config.name, config.id);
        let id = config.id;
        self.configs.push(config);
        Ok(self.persist(id))
    }

    /// Configurations whose name or any component name contains `term`, ignoring case
    ///
    /// An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&Configuration> {
        let needle = term.to_lowercase();
        let results: Vec<&Configuration> = self
            .configs
            .iter()
            .filter(|config| matches_term(config, &needle))
            .collect();
        debug!("Search for '{}' matched {} of {}", term, results.len(), self.configs.len());
        results
    }

    /// Aggregate statistics over the full list
    pub fn statistics(&self) -> Statistics {
        Statistics::from_configs(&self.configs)
    }

    fn persist<T>(&mut self, value: T) -> Persisted<T> {
        let saved = self.save();
        if let Err(e) = &saved {
            warn!(
                "Failed to save configurations: {}. Continuing with in-memory list. \
                 Changes will be lost when the session ends.",
                e
            );
        }
        Persisted { value, saved }
    }
}

fn read_configs<S: KeyValueStore>(storage: &S, key: &str) -> Result<Vec<Configuration>> {
    match storage.get(key)? {
        Some(json) => {
            let mut configs: Vec<Configuration> = serde_json::from_str(&json)?;
            reassign_duplicate_ids(&mut configs);
            info!("Loaded {} configurations from '{}'", configs.len(), key);
            Ok(configs)
        }
        None => {
            info!("No saved configurations under '{}', starting empty", key);
            Ok(Vec::new())
        }
    }
}

/// Keep the first entry for each id and give later repeats a fresh, unused id
fn reassign_duplicate_ids(configs: &mut [Configuration]) {
    let mut taken: HashSet<Uuid> = configs.iter().map(|config| config.id).collect();
    if taken.len() == configs.len() {
        return;
    }

    let mut seen = HashSet::with_capacity(configs.len());
    for config in configs.iter_mut() {
        if seen.insert(config.id) {
            continue;
        }
        let fresh = loop {
            let id = Uuid::new_v4();
            if taken.insert(id) {
                break id;
            }
        };
        warn!(
            "Configuration '{}' shares id {} with an earlier entry, reassigned to {}",
            config.name, config.id, fresh
        );
        config.id = fresh;
        seen.insert(fresh);
    }
}

/// `needle` must already be lowercased
fn matches_term(config: &Configuration, needle: &str) -> bool {
    needle.is_empty()
        || config.name.to_lowercase().contains(needle)
        || config
            .components()
            .any(|(_, component)| component.name.to_lowercase().contains(needle))
}
