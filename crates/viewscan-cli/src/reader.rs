use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use viewscan_core::Snapshot;

pub const CONFIG_FILE: &str = "viewscan.config.yaml";

/// Project configuration from viewscan.config.yaml.
#[derive(Debug, Default, Deserialize)]
pub struct ViewscanConfig {
    pub name: Option<String>,
    /// Models scanned when none are given on the command line.
    pub models: Option<Vec<String>>,
    /// Snapshot glob patterns, relative to the config directory.
    pub sources: Option<Vec<String>>,
}

/// Snapshots found at a path, merged into one, plus the project config.
pub struct Workspace {
    pub snapshot: Snapshot,
    pub config: Option<ViewscanConfig>,
    pub files: Vec<PathBuf>,
}

impl Workspace {
    /// Models to scan: explicit ones, else the configured list, else all.
    pub fn select_models(&self, requested: &[String]) -> Vec<String> {
        if !requested.is_empty() {
            return requested.to_vec();
        }
        match self.config.as_ref().and_then(|c| c.models.clone()) {
            Some(models) if !models.is_empty() => models,
            _ => self.snapshot.model_names(),
        }
    }
}

/// Read snapshot files from a path (file or directory).
pub fn read_workspace(input_path: &Path) -> Result<Workspace, String> {
    if !input_path.exists() {
        return Err(format!("Path does not exist: {}", input_path.display()));
    }

    let (files, config) = if input_path.is_file() {
        (vec![input_path.to_path_buf()], None)
    } else if input_path.is_dir() {
        let config = read_project_config(input_path)?;
        let patterns = config
            .as_ref()
            .and_then(|c| c.sources.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| vec!["**/*.json".to_string()]);
        (expand_sources(input_path, &patterns)?, config)
    } else {
        return Err(format!(
            "Path is neither a file nor a directory: {}",
            input_path.display()
        ));
    };

    if files.is_empty() {
        return Err(format!(
            "No snapshot files (.json) found at: {}",
            input_path.display()
        ));
    }

    let mut snapshot = Snapshot::default();
    for path in &files {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let part = Snapshot::from_json(&content)
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        debug!(file = %path.display(), models = part.models.len(), "loaded snapshot");
        snapshot.absorb(part);
    }
    if let Some(name) = config.as_ref().and_then(|c| c.name.clone()) {
        snapshot.name = Some(name);
    }

    Ok(Workspace {
        snapshot,
        config,
        files,
    })
}

/// Read viewscan.config.yaml if the directory has one.
pub fn read_project_config(dir_path: &Path) -> Result<Option<ViewscanConfig>, String> {
    let config_path = dir_path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }

    let content =
        fs::read_to_string(&config_path).map_err(|e| format!("Failed to read config: {}", e))?;
    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|e| format!("Invalid YAML config: {}", e))
}

fn expand_sources(base_dir: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, String> {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut seen: std::collections::HashSet<PathBuf> = std::collections::HashSet::new();

    for pattern in patterns {
        let full_pattern = base_dir.join(pattern);
        let pattern_str = full_pattern.to_string_lossy().replace('\\', "/");
        let entries = glob::glob(&pattern_str)
            .map_err(|e| format!("Invalid glob pattern '{}': {}", pattern, e))?;

        let mut matched: Vec<PathBuf> = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) => {
                    if path.is_file() && seen.insert(path.clone()) {
                        matched.push(path);
                    }
                }
                Err(e) => return Err(format!("Glob error: {}", e)),
            }
        }
        matched.sort();
        files.extend(matched);
    }

    Ok(files)
}
