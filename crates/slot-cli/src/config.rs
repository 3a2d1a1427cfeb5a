//! Layered engine defaults.
//!
//! Built-in defaults, then `slots.toml` in the platform config directory, then
//! an explicit `--config` file, then `SLOTS_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use slot_engine::EngineDefaults;

pub fn load(config_path: Option<&Path>) -> Result<EngineDefaults> {
    let mut figment = Figment::from(Serialized::defaults(EngineDefaults::default()));

    if let Some(path) = default_config_path() {
        figment = figment.merge(Toml::file(path));
    }

    if let Some(path) = config_path {
        anyhow::ensure!(path.exists(), "config file not found: {}", path.display());
        figment = figment.merge(Toml::file(path));
    }

    figment
        .merge(Env::prefixed("SLOTS_"))
        .extract()
        .context("invalid engine configuration")
}

/// `~/.config/slots/slots.toml` on Linux.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("slots").join("slots.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_file_overrides_built_ins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "duration_minutes = 30\nwork_hours = \"09:00-17:00\"").unwrap();

        let defaults = load(Some(file.path())).unwrap();
        assert_eq!(defaults.duration_minutes, 30);
        assert_eq!(defaults.work_hours, "09:00-17:00");
        assert_eq!(defaults.increment_minutes, 15);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/slots.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
