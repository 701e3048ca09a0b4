//! Preset library: presets stored as one YAML file per preset
//!
//! File names are derived from preset names with every character other than
//! alphanumerics, `-` and `_` replaced by `_`. Two presets whose names only
//! differ in such characters share a file.

use std::path::{Path, PathBuf};

use presetkit_core::Preset;

use crate::config::{self, LibraryConfig, CONFIG_FILENAME};
use crate::error::{LibraryError, LibraryResult};

/// Map a preset name onto a file stem
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// A folder of preset files under a library root
#[derive(Debug, Clone)]
pub struct PresetLibrary {
    root: PathBuf,
    config: LibraryConfig,
}

impl PresetLibrary {
    /// Library with default settings
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, LibraryConfig::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, config: LibraryConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Library whose settings come from `library.yaml` in its root
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let config = config::load_config(&root.join(CONFIG_FILENAME));
        Self::with_config(root, config)
    }

    /// Library at the platform default location
    pub fn open_default() -> Self {
        Self::open(config::default_library_path())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Persist the current settings to `library.yaml` in the root
    pub fn save_config(&self) -> anyhow::Result<()> {
        config::save_config(&self.config, &self.root.join(CONFIG_FILENAME))
    }

    pub fn presets_folder(&self) -> PathBuf {
        self.root.join(&self.config.presets_folder)
    }

    /// Path of the file a preset with this name is stored in
    pub fn preset_path(&self, name: &str) -> PathBuf {
        self.presets_folder().join(format!(
            "{}.{}",
            sanitize_filename(name),
            self.config.file_extension
        ))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.preset_path(name).exists()
    }

    /// Write a preset to its file, returning the path written
    pub fn save(&self, preset: &Preset) -> LibraryResult<PathBuf> {
        if self.config.validate_on_save {
            preset.validate()?;
        }

        let path = self.preset_path(&preset.name);
        if !self.config.overwrite_existing && path.exists() {
            return Err(LibraryError::AlreadyExists(preset.name.clone()));
        }

        log::info!("[PRESET_LIBRARY] Saving '{}' to {:?}", preset.name, path);

        let folder = self.presets_folder();
        std::fs::create_dir_all(&folder).map_err(|e| {
            log::error!("[PRESET_LIBRARY] Failed to create {:?}: {}", folder, e);
            LibraryError::io(&folder, e)
        })?;

        let yaml = serde_yaml::to_string(preset)?;
        std::fs::write(&path, yaml).map_err(|e| LibraryError::io(&path, e))?;

        Ok(path)
    }

    /// Read the preset stored under this name
    pub fn load(&self, name: &str) -> LibraryResult<Preset> {
        let path = self.preset_path(name);
        log::info!("[PRESET_LIBRARY] Loading '{}' from {:?}", name, path);

        if !path.exists() {
            return Err(LibraryError::NotFound(name.to_string()));
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| LibraryError::io(&path, e))?;
        serde_yaml::from_str::<Preset>(&contents)
            .map_err(|source| LibraryError::Parse { path, source })
    }

    /// Stored preset file stems, sorted
    pub fn list(&self) -> Vec<String> {
        let folder = self.presets_folder();
        if !folder.exists() {
            return Vec::new();
        }

        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(&folder) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path
                    .extension()
                    .map_or(false, |ext| ext == self.config.file_extension.as_str())
                {
                    if let Some(stem) = path.file_stem() {
                        names.push(stem.to_string_lossy().to_string());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Load every preset in the library, skipping files that fail to parse
    pub fn load_all(&self) -> Vec<Preset> {
        self.list()
            .iter()
            .filter_map(|name| match self.load(name) {
                Ok(preset) => Some(preset),
                Err(e) => {
                    log::warn!("[PRESET_LIBRARY] Skipping '{}': {}", name, e);
                    None
                }
            })
            .collect()
    }

    pub fn delete(&self, name: &str) -> LibraryResult<()> {
        let path = self.preset_path(name);
        if !path.exists() {
            return Err(LibraryError::NotFound(name.to_string()));
        }
        log::info!("[PRESET_LIBRARY] Deleting '{}'", name);
        std::fs::remove_file(&path).map_err(|e| LibraryError::io(&path, e))
    }
}
