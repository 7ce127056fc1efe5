//! Configuration file handling.
//!
//! The configuration file is stored at `$LEDGER_HOME/config.json` and holds the ledger currency.
//! Groups are stored as JSON files in `$LEDGER_HOME/groups`.

use crate::model::Currency;
use crate::store::FileStore;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "ledger";
const CONFIG_VERSION: u8 = 1;
const GROUPS: &str = "groups";
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$LEDGER_HOME` and from there it loads `$LEDGER_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    groups: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory and its `groups` subdirectory, and writes an initial
    /// `config.json` that uses `currency` for new groups.
    ///
    /// # Errors
    /// - Returns an error if a config file already exists in `dir`.
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>, currency: Currency) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the ledger home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A ledger is already initialized at '{}'",
                config_path.display()
            )
        }

        let groups = root.join(GROUPS);
        utils::make_dir(&groups).await?;

        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            currency,
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            groups,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that `ledger_home` and its config file exist
    /// - load the config file
    /// - validate that the groups directory exists
    pub async fn load(ledger_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = ledger_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Ledger home is missing, run 'ledger init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let config = Self {
            groups: root.join(GROUPS),
            root,
            config_path,
            config_file,
        };
        if !config.groups.is_dir() {
            bail!(
                "The groups directory is missing '{}'",
                config.groups.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn groups(&self) -> &Path {
        &self.groups
    }

    /// The currency new groups are created with.
    pub fn currency(&self) -> &Currency {
        &self.config_file.currency
    }

    /// The store that holds this ledger's groups.
    pub fn store(&self) -> FileStore {
        FileStore::new(&self.groups)
    }
}

/// Represents the serialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "ledger",
///   "config_version": 1,
///   "currency": { "code": "USD", "minor_digits": 2 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "ledger"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Currency for new groups. Defaults to USD in cents.
    #[serde(default)]
    currency: Currency,
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app or a
    /// newer version of this one.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version <= CONFIG_VERSION,
            "Config file version {} is newer than this program supports ({})",
            config.config_version,
            CONFIG_VERSION
        );

        Ok(config)
    }

    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        utils::serialize(path.as_ref(), self)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create_and_load() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("ledger_home");
        let jpy = Currency::new("JPY", 0).unwrap();

        let created = Config::create(&home, jpy.clone()).await.unwrap();
        assert!(created.groups().is_dir());
        assert!(created.config_path().is_file());

        let loaded = Config::load(&home).await.unwrap();
        assert_eq!(loaded.currency(), &jpy);
        assert_eq!(loaded.root(), created.root());
    }

    #[tokio::test]
    async fn test_config_create_twice() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path(), Currency::default())
            .await
            .unwrap();
        let err = Config::create(dir.path(), Currency::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already initialized"));
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(dir.path().join("nope")).await.is_err());
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        utils::write(&path, r#"{ "app_name": "ledger", "config_version": 1 }"#)
            .await
            .unwrap();
        let config = ConfigFile::load(&path).await.unwrap();
        assert_eq!(config.currency, Currency::default());
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        utils::write(&path, r#"{ "app_name": "budget", "config_version": 1 }"#)
            .await
            .unwrap();
        let err = ConfigFile::load(&path).await.unwrap_err();
        assert!(err.to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_load_future_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        utils::write(&path, r#"{ "app_name": "ledger", "config_version": 9 }"#)
            .await
            .unwrap();
        assert!(ConfigFile::load(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_config_file_load_bad_currency() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        utils::write(
            &path,
            r#"{ "app_name": "ledger", "config_version": 1,
                 "currency": { "code": "XXX", "minor_digits": 12 } }"#,
        )
        .await
        .unwrap();
        assert!(ConfigFile::load(&path).await.is_err());
    }
}
