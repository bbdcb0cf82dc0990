use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use serde_yaml;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_TEMPLATE: &str = include_str!("../config.example.yaml");

#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(about = "Runs the bookshelf service", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bookshelf")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl App {
    pub fn get_port(&self) -> u16 {
        return self.port;
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: String,
    #[serde(default = "default_books_collection")]
    pub books_collection: String,
    pub movies_namespace: String,
    #[serde(default = "default_movies_collection")]
    pub movies_collection: String,
}

fn default_books_collection() -> String {
    "books".to_string()
}

fn default_movies_collection() -> String {
    "movies".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub app: App,
    pub database: DatabaseConfig,
}

impl Config {
    /// Loads the YAML file at `path`, or the bundled template when the file
    /// does not exist. `${VAR}` and `${VAR:-default}` are expanded from the
    /// process environment in both cases.
    pub fn new(path: &Path) -> Result<Self> {
        let yaml_str = if path.exists() {
            fs::read_to_string(path)?
        } else {
            tracing::info!(path = ?path, "config file not found, using environment defaults");
            CONFIG_TEMPLATE.to_string()
        };
        Config::parse(&yaml_str, |name| env::var(name).ok())
    }

    fn parse(yaml_str: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let yaml_with_env = Config::substitute_env_vars(yaml_str, lookup)?;
        let config: Config = serde_yaml::from_str(&yaml_with_env)?;
        Ok(config)
    }

    fn substitute_env_vars(yaml_str: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        let mut result = yaml_str.to_string();
        let mut offset = 0;

        while let Some(start) = result[offset..].find("${") {
            let actual_start = offset + start;
            let Some(end) = result[actual_start..].find('}') else {
                break;
            };
            let var_name = &result[actual_start + 2..actual_start + end];

            let env_value = match var_name.split_once(":-") {
                Some((actual_var, default_val)) => {
                    lookup(actual_var).unwrap_or_else(|| default_val.to_string())
                }
                None => lookup(var_name).unwrap_or_else(|| {
                    tracing::warn!("environment variable '{}' not found", var_name);
                    String::new()
                }),
            };

            result.replace_range(actual_start..actual_start + end + 1, &env_value);
            offset = actual_start + env_value.len();
        }

        Ok(result)
    }
}
