use std::path::{Path, PathBuf};

use schema_bridge_core::type_mapper::TypeMapperBuilder;
use schema_bridge_core::types::{ColumnType, Identifier};
use schema_bridge_core::TypeMapper;
use serde::{Deserialize, Serialize};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// CLI configuration loaded from config.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub cli: CliSettings,
    #[serde(default)]
    pub warehouse: WarehouseConfig,
    #[serde(default)]
    pub types: TypesConfig,
}

/// CLI-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliSettings {
    #[serde(default = "default_schema_dir")]
    pub default_schema_dir: String,
    /// Model and schema files larger than this are refused before parsing.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: u64,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            default_schema_dir: default_schema_dir(),
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

/// Where `apply` and `extract` keep table schemas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseConfig {
    #[serde(default = "default_warehouse_dir")]
    pub dir: String,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            dir: default_warehouse_dir(),
        }
    }
}

/// Type mapping table selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypesConfig {
    #[serde(default = "default_profile")]
    pub profile: String,
    /// Additional `dsl <-> column` pairs layered over the profile.
    #[serde(default)]
    pub extra: Vec<TypePair>,
}

impl Default for TypesConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            extra: Vec::new(),
        }
    }
}

/// One extra mapping entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypePair {
    pub dsl: String,
    pub column: String,
}

fn default_schema_dir() -> String {
    "models/".to_string()
}

fn default_max_input_bytes() -> u64 {
    1024 * 1024
}

fn default_warehouse_dir() -> String {
    "warehouse/".to_string()
}

fn default_profile() -> String {
    "minimal".to_string()
}

/// Discovery order for config file:
/// 1. `--config <path>` (explicit)
/// 2. `SCHEMA_BRIDGE_CONFIG` env var
/// 3. `./config.toml` (project-local)
/// 4. `$XDG_CONFIG_HOME/schema-bridge/config.toml`
/// 5. `~/.config/schema-bridge/config.toml`
pub fn load_config(explicit_path: Option<&Path>) -> Result<CliConfig, CliError> {
    if let Some(path) = explicit_path {
        return load_config_from_path(path);
    }

    if let Ok(env_path) = std::env::var("SCHEMA_BRIDGE_CONFIG") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    let local = PathBuf::from("config.toml");
    if local.exists() {
        return load_config_from_path(&local);
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg).join("schema-bridge/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home).join(".config/schema-bridge/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    tracing::debug!("no config file found, using defaults");
    Ok(CliConfig::default())
}

fn load_config_from_path(path: &Path) -> Result<CliConfig, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), "loaded config file");
    toml::from_str(&contents).map_err(|e| CliError::Config {
        message: format!("failed to parse {}: {}", path.display(), e),
    })
}

/// Paths to read models from: the command-line paths, or the configured
/// default schema directory when none were given.
pub fn resolve_schema_paths(config: &CliConfig, paths: &[PathBuf]) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![PathBuf::from(&config.cli.default_schema_dir)]
    } else {
        paths.to_vec()
    }
}

/// Resolve the warehouse directory. The CLI flag takes precedence.
pub fn resolve_warehouse_dir(config: &CliConfig, global: &GlobalOpts) -> PathBuf {
    global
        .warehouse_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.warehouse.dir))
}

/// Build the type mapper from the selected profile plus any extra pairs.
///
/// `--types` overrides `[types] profile`.
pub fn build_type_mapper(config: &CliConfig, global: &GlobalOpts) -> Result<TypeMapper, CliError> {
    let profile = global.types.as_deref().unwrap_or(&config.types.profile);
    let base = match profile {
        "minimal" => TypeMapper::default(),
        "standard" => TypeMapper::standard(),
        other => {
            return Err(CliError::Config {
                message: format!("unknown type profile '{other}': expected minimal or standard"),
            })
        }
    };

    let mut builder = TypeMapperBuilder::from(base);
    for pair in &config.types.extra {
        let invalid = |e: &dyn std::fmt::Display| CliError::Config {
            message: format!("invalid [[types.extra]] entry {} <-> {}: {e}", pair.dsl, pair.column),
        };
        let dsl = Identifier::new(pair.dsl.as_str()).map_err(|e| invalid(&e))?;
        let column = ColumnType::new(pair.column.as_str()).map_err(|e| invalid(&e))?;
        builder = builder.pair(dsl, column);
    }
    Ok(builder.build())
}
