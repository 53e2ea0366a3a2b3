use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "fsgate.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub root: Root,
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub limits: Limits,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Root {
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
}
fn default_base_dir() -> PathBuf { PathBuf::from("/tmp/mcp-files") }

impl Default for Root {
    fn default() -> Self { Self { base_dir: default_base_dir() } }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_base_path")]
    pub base_path: String,
}
fn default_bind_addr() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8081 }
fn default_base_path() -> String { "/mcp".to_string() }

impl Default for Server {
    fn default() -> Self {
        Self { bind_addr: default_bind_addr(), port: default_port(), base_path: default_base_path() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Limits {
    #[serde(default = "default_max_request_kb")]
    pub max_request_kb: usize,
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}
fn default_max_request_kb() -> usize { 1024 }
fn default_requests_per_second() -> u32 { 50 }
fn default_burst() -> u32 { 100 }

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_request_kb: default_max_request_kb(),
            requests_per_second: default_requests_per_second(),
            burst: default_burst(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)?;
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Ok(serde_json::from_str(&raw)?)
        } else {
            Ok(toml::from_str(&raw)?)
        }
    }

    /// An explicit path must exist; otherwise `fsgate.toml` in the working
    /// directory is used when present, then built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::load(p).with_context(|| format!("reading {}", p.display())),
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.is_file() {
                    Self::load(local).with_context(|| format!("reading {DEFAULT_CONFIG_FILE}"))
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.root.base_dir.as_os_str().is_empty() { anyhow::bail!("base_dir must not be empty"); }
        if self.server.bind_addr.trim().is_empty() { anyhow::bail!("bind_addr must not be empty"); }
        if !self.server.base_path.starts_with('/') { anyhow::bail!("base_path must start with '/'"); }
        if self.server.base_path == "/health" { anyhow::bail!("base_path must not shadow /health"); }
        if self.limits.max_request_kb == 0 { anyhow::bail!("max_request_kb must be > 0"); }
        if self.limits.requests_per_second == 0 { anyhow::bail!("requests_per_second must be > 0"); }
        Ok(())
    }

    /// Creates the base directory (and parents) and returns its canonical form.
    pub fn prepare_base_dir(&self) -> anyhow::Result<PathBuf> {
        let base = &self.root.base_dir;
        fs::create_dir_all(base)
            .with_context(|| format!("creating base directory {}", base.display()))?;
        canonical_root(base)
    }
}

pub fn canonical_root(root: &Path) -> anyhow::Result<PathBuf> {
    let c = dunce::canonicalize(root)?;
    Ok(c)
}
