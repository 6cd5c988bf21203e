use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
    /// Keep bank slips in process memory instead of SQLite
    #[serde(default)]
    pub in_memory: bool,
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid server address '{}': {}", addr, e))
    }
}

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "BANKSLIPS_CONFIG";

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 8080

[database]
path = "target/db/bankslips.db"
in_memory = false
"#;

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Load configuration from config.toml
///
/// Search order:
/// 1. File named by `BANKSLIPS_CONFIG`
/// 2. `config.toml` in the current directory
/// 3. `config.toml` next to the executable
/// 4. Embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        let path = PathBuf::from(explicit);
        tracing::info!("Loading config from {}: {}", CONFIG_ENV, path.display());
        return load_from(&path);
    }

    for candidate in candidate_paths() {
        if candidate.exists() {
            tracing::info!("Loading config from: {}", candidate.display());
            return load_from(&candidate);
        }
        tracing::debug!("config.toml not found at: {}", candidate.display());
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

fn load_from(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", path.display(), e))?;
    parse_config(&contents)
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("config.toml")];
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            paths.push(exe_dir.join("config.toml"));
        }
    }
    paths
}

/// Database file path; relative paths resolve against the current directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path = Path::new(&config.database.path);
    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(db_path))
}
