// ⚙️ Configuration - environment variables with VISA_ATLAS_ prefix
// A .env file in the working directory is read first if present.

use std::env;
use std::path::PathBuf;

pub const ENV_DATABASE: &str = "VISA_ATLAS_DATABASE";
pub const ENV_CSV: &str = "VISA_ATLAS_CSV";
pub const ENV_BIND: &str = "VISA_ATLAS_BIND";
pub const ENV_STATIC_DIR: &str = "VISA_ATLAS_STATIC_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite database file
    pub database_path: PathBuf,

    /// CSV export imported by `visa-atlas import`
    pub csv_path: PathBuf,

    /// Address the API server listens on
    pub bind_addr: String,

    /// Directory of static pages served at /
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: PathBuf::from("immigration.db"),
            csv_path: PathBuf::from("data/immigration.csv"),
            bind_addr: "0.0.0.0:3000".to_string(),
            static_dir: PathBuf::from("web"),
        }
    }
}

impl Config {
    /// Load `.env` (if any), then read the process environment
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or empty keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        Config {
            database_path: get(ENV_DATABASE).map(PathBuf::from).unwrap_or(defaults.database_path),
            csv_path: get(ENV_CSV).map(PathBuf::from).unwrap_or(defaults.csv_path),
            bind_addr: get(ENV_BIND).unwrap_or(defaults.bind_addr),
            static_dir: get(ENV_STATIC_DIR).map(PathBuf::from).unwrap_or(defaults.static_dir),
        }
    }
}
