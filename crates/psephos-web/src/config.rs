//! Runtime configuration, layered from defaults, an optional TOML file and
//! `PSEPHOS_*` environment variables (highest precedence).

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  /// SQLite database file.
  pub store_path:        PathBuf,
  /// Database copied into `store_path` on first run, if set and present.
  pub seed_path:         Option<PathBuf>,
  /// Tab-separated word list read by `psephos import`.
  pub dataset_path:      PathBuf,
  pub import_batch_size: usize,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:              "127.0.0.1".to_string(),
      port:              5000,
      store_path:        PathBuf::from("data.db"),
      seed_path:         None,
      dataset_path:      PathBuf::from("dataset.csv"),
      import_batch_size: psephos_import::DEFAULT_BATCH_SIZE,
    }
  }
}

impl ServerConfig {
  /// Load configuration from `file` (optional) and the environment.
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    let defaults = Self::default();
    let cfg: Self = config::Config::builder()
      .set_default("host", defaults.host)?
      .set_default("port", i64::from(defaults.port))?
      .set_default("store_path", path_default(&defaults.store_path))?
      .set_default("dataset_path", path_default(&defaults.dataset_path))?
      .set_default("import_batch_size", defaults.import_batch_size as i64)?
      .add_source(config::File::from(file.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("PSEPHOS"))
      .build()?
      .try_deserialize()?;
    Ok(cfg.with_expanded_paths())
  }

  /// `host:port` for binding.
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  fn with_expanded_paths(mut self) -> Self {
    self.store_path = expand_tilde(&self.store_path);
    self.dataset_path = expand_tilde(&self.dataset_path);
    self.seed_path = self.seed_path.as_deref().map(expand_tilde);
    self
  }
}

fn path_default(path: &Path) -> String { path.to_string_lossy().into_owned() }

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_uses_defaults() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/psephos.toml")).unwrap();
    assert_eq!(cfg.import_batch_size, 2000);
    assert!(cfg.seed_path.is_none());
  }

  #[test]
  fn file_values_override_defaults() {
    let path = std::env::temp_dir()
      .join(format!("psephos-config-{}.toml", std::process::id()));
    std::fs::write(
      &path,
      "port = 8123\nstore_path = \"/var/lib/psephos/words.db\"\nimport_batch_size = 50\n",
    )
    .unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(cfg.port, 8123);
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/psephos/words.db"));
    assert_eq!(cfg.import_batch_size, 50);
    assert_eq!(cfg.address(), format!("{}:8123", cfg.host));
  }

  #[test]
  fn tilde_is_left_alone_without_prefix() {
    assert_eq!(expand_tilde(Path::new("data.db")), PathBuf::from("data.db"));
    assert_eq!(expand_tilde(Path::new("/a/~/b")), PathBuf::from("/a/~/b"));
  }
}
