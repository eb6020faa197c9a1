use std::env;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Web server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerConfig {
    /// Reads `SMART_ROSTER_BIND`, `SMART_ROSTER_PORT` and `SMART_ROSTER_STATIC_DIR`.
    /// A port given on the command line wins over the environment.
    pub fn from_env(port_arg: Option<&str>) -> Self {
        Self::from_lookup(port_arg, |key| env::var(key).ok())
    }

    fn from_lookup<F>(port_arg: Option<&str>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = port_arg
            .map(str::to_string)
            .or_else(|| lookup("SMART_ROSTER_PORT"))
            .and_then(|p| match p.trim().parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    log::warn!("Ignoring invalid port '{}', using {}", p, DEFAULT_PORT);
                    None
                }
            })
            .unwrap_or(defaults.port);

        Self {
            bind_address: lookup("SMART_ROSTER_BIND").unwrap_or(defaults.bind_address),
            port,
            static_dir: lookup("SMART_ROSTER_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        }
    }
}
