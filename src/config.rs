use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "css-bundle.toml";

pub const DEFAULT_LAYERS: [&str; 5] = ["tokens", "base", "layout", "components", "utilities"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub build: Build,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Paths {
    #[serde(default = "default_source")]
    pub source: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_dependencies")]
    pub dependencies: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Build {
    #[serde(default = "default_layers")]
    pub layers: Vec<String>,
    #[serde(default = "default_layer_entry")]
    pub layer_entry: String,
    #[serde(default = "default_aggregate_entry")]
    pub aggregate_entry: String,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub source: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub dependencies: Option<PathBuf>,
}

/// Fully resolved settings for one run. All paths are absolute or rooted at
/// the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source_root: PathBuf,
    pub output_root: PathBuf,
    pub dependency_root: PathBuf,
    pub layers: Vec<String>,
    pub layer_entry: String,
    pub aggregate_entry: String,
    pub max_depth: usize,
}

pub fn load(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads `explicit` if given, otherwise `css-bundle.toml` under `root` when
/// present, otherwise the defaults.
pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load(path);
    }
    let candidate = root.join(DEFAULT_CONFIG_FILE);
    if candidate.is_file() {
        log::debug!("using config {}", candidate.display());
        return load(&candidate);
    }
    Ok(Config::default())
}

impl Config {
    pub fn settings(&self, root: &Path, overrides: &Overrides) -> Settings {
        let pick = |flag: &Option<PathBuf>, file: &PathBuf| {
            root.join(flag.as_ref().unwrap_or(file))
        };
        Settings {
            source_root: pick(&overrides.source, &self.paths.source),
            output_root: pick(&overrides.output, &self.paths.output),
            dependency_root: pick(&overrides.dependencies, &self.paths.dependencies),
            layers: self.build.layers.clone(),
            layer_entry: self.build.layer_entry.clone(),
            aggregate_entry: self.build.aggregate_entry.clone(),
            max_depth: self.build.max_depth,
        }
    }
}

impl Settings {
    /// Settings for the conventional `src/css` -> `dist` layout under `root`.
    pub fn for_root(root: &Path) -> Self {
        Config::default().settings(root, &Overrides::default())
    }

    pub fn layer_entry_path(&self, layer: &str) -> PathBuf {
        self.source_root.join(layer).join(&self.layer_entry)
    }

    pub fn aggregate_entry_path(&self) -> PathBuf {
        self.source_root.join(&self.aggregate_entry)
    }
}

fn default_source() -> PathBuf {
    PathBuf::from("src/css")
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

fn default_dependencies() -> PathBuf {
    PathBuf::from("node_modules")
}

fn default_layers() -> Vec<String> {
    DEFAULT_LAYERS.iter().map(|layer| layer.to_string()).collect()
}

fn default_layer_entry() -> String {
    "_index.css".to_string()
}

fn default_aggregate_entry() -> String {
    "index.css".to_string()
}

fn default_max_depth() -> usize {
    256
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            source: default_source(),
            output: default_output(),
            dependencies: default_dependencies(),
        }
    }
}

impl Default for Build {
    fn default() -> Self {
        Self {
            layers: default_layers(),
            layer_entry: default_layer_entry(),
            aggregate_entry: default_aggregate_entry(),
            max_depth: default_max_depth(),
        }
    }
}
