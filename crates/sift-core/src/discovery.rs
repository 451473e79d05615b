//! Discovery of the project configuration and of the presets it extends.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::settings::RawConfig;

/// Dedicated configuration file. Takes precedence over the manifest when both
/// live in the same directory.
pub const CONFIG_FILE: &str = "sift.toml";
/// Manifest file that may hold the configuration under [`MANIFEST_KEY`].
pub const MANIFEST_FILE: &str = "package.json";
pub const MANIFEST_KEY: &str = "sift";
/// Prefix tried when looking a named preset up in `node_modules`.
pub const PRESET_PREFIX: &str = "sift-config-";

/// The configuration in effect for a project, presets already applied.
#[derive(Clone, Debug, Default)]
pub struct DiscoveredConfig {
    /// Directory holding the configuration, or the start directory when no
    /// configuration was found. Patterns and overrides are relative to it.
    pub root: PathBuf,
    /// The file the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
    pub config: RawConfig,
}

/// Find the nearest configuration by walking up from `start`.
///
/// `extra_extends` are presets requested on the command line. They are
/// applied after the ones listed in the configuration, and like them sit
/// below the local values.
pub fn discover_config(start: &Path, extra_extends: &[String]) -> Result<DiscoveredConfig, ConfigError> {
    let found = start
        .ancestors()
        .map(|dir| read_config_in(dir).map(|found| found.map(|(path, config)| (dir, path, config))))
        .find_map(Result::transpose)
        .transpose()?;

    let (root, config_path, local) = match found {
        Some((dir, path, config)) => {
            tracing::debug!("Using configuration from {}", path.display());
            (dir.to_path_buf(), Some(path), config)
        }
        None => {
            tracing::debug!("No configuration found above {}, using defaults", start.display());
            (start.to_path_buf(), None, RawConfig::default())
        }
    };

    let origin = config_path.clone().unwrap_or_else(|| root.clone());
    let mut extends = local.extends();
    extends.extend(extra_extends.iter().cloned());

    let mut chain = vec![origin.display().to_string()];
    let mut config = RawConfig::default();
    for name in &extends {
        let preset = load_preset(name, &root, &origin, &mut chain)?;
        config = config.merge(preset);
    }
    let config = config.merge(RawConfig { extends: None, ..local });

    config
        .validate()
        .map_err(|source| ConfigError::Option { path: origin.clone(), source })?;

    Ok(DiscoveredConfig { root, config_path, config })
}

/// Read the configuration held directly in `dir`, if any.
///
/// A `package.json` without a `sift` key does not count as a configuration.
pub fn read_config_in(dir: &Path) -> Result<Option<(PathBuf, RawConfig)>, ConfigError> {
    let config_file = dir.join(CONFIG_FILE);
    if config_file.is_file() {
        let config = parse_toml_file(&config_file)?;
        return Ok(Some((config_file, config)));
    }

    let manifest = dir.join(MANIFEST_FILE);
    if manifest.is_file() {
        let value = parse_json_file(&manifest)?;
        if let Some(section) = value.get(MANIFEST_KEY) {
            let config = from_json_value(&manifest, section.clone())?;
            return Ok(Some((manifest, config)));
        }
        tracing::trace!("{} has no `{MANIFEST_KEY}` key", manifest.display());
    }

    Ok(None)
}

fn load_preset(
    name: &str,
    base_dir: &Path,
    from: &Path,
    chain: &mut Vec<String>,
) -> Result<RawConfig, ConfigError> {
    let (path, config) = locate_preset(name, base_dir, from)?;

    let key = path.display().to_string();
    if chain.contains(&key) {
        let mut cycle = chain.clone();
        cycle.push(key);
        return Err(ConfigError::PresetCycle { chain: cycle });
    }
    tracing::debug!("Extending preset `{name}` from {}", path.display());

    // Presets can themselves extend presets, resolved from their own location.
    let preset_dir = path.parent().unwrap_or(base_dir).to_path_buf();
    chain.push(key);
    let mut resolved = RawConfig::default();
    for nested in config.extends() {
        let preset = load_preset(&nested, &preset_dir, &path, chain)?;
        resolved = resolved.merge(preset);
    }
    chain.pop();

    Ok(resolved.merge(RawConfig { extends: None, ..config }))
}

fn locate_preset(name: &str, base_dir: &Path, from: &Path) -> Result<(PathBuf, RawConfig), ConfigError> {
    let not_found = || ConfigError::PresetNotFound { name: name.to_string(), from: from.to_path_buf() };

    if name.starts_with('.') || Path::new(name).is_absolute() {
        let path = base_dir.join(name);
        if path.is_dir() {
            return read_config_in(&path)?.ok_or_else(|| ConfigError::PresetEmpty {
                name: name.to_string(),
                path: path.clone(),
            });
        }
        if !path.is_file() {
            return Err(not_found());
        }
        let config = read_preset_file(&path)?;
        return Ok((path, config));
    }

    let candidates = [name.to_string(), format!("{PRESET_PREFIX}{name}")];
    for dir in base_dir.ancestors() {
        for candidate in &candidates {
            let package = dir.join("node_modules").join(candidate);
            if package.is_dir() {
                return read_config_in(&package)?
                    .ok_or(ConfigError::PresetEmpty { name: name.to_string(), path: package });
            }
        }
    }

    Err(not_found())
}

/// A preset file is either TOML, a bare JSON configuration, or a manifest
/// holding the configuration under its `sift` key.
fn read_preset_file(path: &Path) -> Result<RawConfig, ConfigError> {
    if path.extension().is_some_and(|ext| ext == "toml") {
        return parse_toml_file(path);
    }

    let value = parse_json_file(path)?;
    let is_manifest = path.file_name().is_some_and(|name| name == MANIFEST_FILE);
    match value.get(MANIFEST_KEY) {
        Some(section) => from_json_value(path, section.clone()),
        None if is_manifest => Err(ConfigError::PresetEmpty {
            name: path.display().to_string(),
            path: path.to_path_buf(),
        }),
        None => from_json_value(path, value),
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })
}

fn parse_toml_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = read_file(path)?;
    toml::from_str(&contents).map_err(|source| ConfigError::Toml { path: path.to_path_buf(), source })
}

fn parse_json_file(path: &Path) -> Result<serde_json::Value, ConfigError> {
    let contents = read_file(path)?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })
}

fn from_json_value(path: &Path, value: serde_json::Value) -> Result<RawConfig, ConfigError> {
    serde_json::from_value(value).map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })
}
