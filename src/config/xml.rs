//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - A missing file means defaults; no template is written.
//!
//! Notes:
//! - Unknown XML fields are a hard error to surface misconfigurations early.
//! - Directory validation happens elsewhere.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "editor")]
    editor: Option<String>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "dry_run")]
    dry_run: Option<bool>,
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// Map XmlConfig -> Config; unset fields keep their defaults.
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    cfg.editor = non_blank(parsed.editor.as_deref()).map(str::to_string);
    cfg.log_file = non_blank(parsed.log_file.as_deref()).map(PathBuf::from);
    if let Some(level) = non_blank(parsed.log_level.as_deref()).and_then(LogLevel::parse) {
        cfg.log_level = level;
    }
    cfg.dry_run = parsed.dry_run.unwrap_or(false);

    cfg
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Load the config from `$BULKMV_CONFIG` or the default location.
/// Returns Ok(None) if no config file exists there.
pub fn load_config() -> Result<Option<(Config, PathBuf)>> {
    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(None);
    }
    let cfg = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), "loaded config");
    Ok(Some((cfg, path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Result<Config> {
        let td = tempfile::tempdir()?;
        let path = td.path().join("config.xml");
        fs::write(&path, xml)?;
        load_config_from_xml_path(&path)
    }

    #[test]
    fn reads_all_fields() {
        let cfg = parse(
            "<config>\n  <editor> vim -n </editor>\n  <log_level>debug</log_level>\n  <log_file>/tmp/bulkmv.log</log_file>\n  <dry_run>true</dry_run>\n</config>",
        )
        .unwrap();
        assert_eq!(cfg.editor.as_deref(), Some("vim -n"));
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/bulkmv.log")));
        assert!(cfg.dry_run);
    }

    #[test]
    fn empty_config_keeps_defaults() {
        let cfg = parse("<config></config>").unwrap();
        assert_eq!(cfg.editor, None);
        assert_eq!(cfg.log_level, LogLevel::Normal);
        assert_eq!(cfg.log_file, None);
        assert!(!cfg.dry_run);
    }

    #[test]
    fn blank_values_are_unset() {
        let cfg = parse("<config><editor>  </editor><log_file></log_file></config>").unwrap();
        assert_eq!(cfg.editor, None);
        assert_eq!(cfg.log_file, None);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = parse("<config><download_base>/x</download_base></config>").unwrap_err();
        assert!(format!("{err:#}").contains("parse config xml"), "{err:#}");
    }
}
