//! Quiver options
//!
//! Parses the fire-order related settings from an rc-style config text:
//!
//! ```text
//! # comment
//! fire_order = launcher, javelin, dart
//! fire_order += inscribed
//! fire_items_start = c
//! fail_severity_to_quiver = 3
//! status_caption_colour = brown
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::data::colors::{CLR_BROWN, colour_by_name, colour_name};
use crate::magic::MAX_FAIL_SEVERITY;
use crate::object::{index_to_letter, letter_to_index};
use crate::quiver::FireType;

/// Options errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
    #[error("Missing value for option: {0}")]
    MissingValue(String),
}

/// User-configurable quiver options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuiverOptions {
    /// Categories in fire priority order
    pub fire_order: Vec<FireType>,
    /// First inventory slot considered for automatic selection
    pub fire_items_start: usize,
    /// Spells at or above this fail severity are skipped when cycling
    pub fail_severity_to_quiver: u8,
    /// Colour of the "Fire:"/"Cast:" caption
    pub status_caption_colour: u8,
}

impl Default for QuiverOptions {
    fn default() -> Self {
        Self {
            fire_order: vec![
                FireType::LAUNCHER,
                FireType::JAVELIN,
                FireType::BOOMERANG,
                FireType::DART,
                FireType::STONE,
                FireType::ROCK,
                FireType::NET,
                FireType::INSCRIBED,
            ],
            fire_items_start: 0,
            fail_severity_to_quiver: 3,
            status_caption_colour: CLR_BROWN,
        }
    }
}

impl QuiverOptions {
    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::IoError(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Parse options from a config string
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once("+=") {
                options.set_option(key.trim(), value.trim(), true)?;
            } else if let Some((key, value)) = line.split_once('=') {
                options.set_option(key.trim(), value.trim(), false)?;
            } else {
                return Err(OptionsError::ParseError(line.to_string()));
            }
        }

        Ok(options)
    }

    /// Set an option with a value; `append` extends list options
    fn set_option(&mut self, name: &str, value: &str, append: bool) -> Result<(), OptionsError> {
        let invalid = || OptionsError::InvalidValue(name.to_string(), value.to_string());
        if value.is_empty() && name != "fire_order" {
            return Err(OptionsError::MissingValue(name.to_string()));
        }

        match name {
            "fire_order" => {
                let parsed = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(parse_fire_type)
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(invalid)?;
                if !append {
                    self.fire_order.clear();
                }
                self.fire_order.extend(parsed);
            }
            "fire_items_start" => {
                let mut chars = value.chars();
                let index = match (chars.next(), chars.next()) {
                    (Some(c), None) => letter_to_index(c),
                    _ => None,
                };
                self.fire_items_start = index.ok_or_else(invalid)?;
            }
            "fail_severity_to_quiver" => {
                let severity: u8 = value.parse().map_err(|_| invalid())?;
                if severity > MAX_FAIL_SEVERITY + 1 {
                    return Err(invalid());
                }
                self.fail_severity_to_quiver = severity;
            }
            "status_caption_colour" | "status_caption_color" => {
                self.status_caption_colour = colour_by_name(value).ok_or_else(invalid)?;
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Save options to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        let contents = self.to_config_string();
        std::fs::write(path, contents).map_err(|e| OptionsError::IoError(e.to_string()))
    }

    /// Convert options to config file format
    pub fn to_config_string(&self) -> String {
        let fire_order: Vec<String> = self
            .fire_order
            .iter()
            .map(|&types| fire_type_name(types))
            .collect();

        let lines = [
            "# Quiver options".to_string(),
            format!("fire_order = {}", fire_order.join(", ")),
            format!(
                "fire_items_start = {}",
                index_to_letter(self.fire_items_start)
            ),
            format!(
                "fail_severity_to_quiver = {}",
                self.fail_severity_to_quiver
            ),
            format!(
                "status_caption_colour = {}",
                colour_name(self.status_caption_colour)
            ),
        ];
        lines.join("\n") + "\n"
    }
}

/// Parse one fire-order entry; `a | b` combines categories into one rank
fn parse_fire_type(entry: &str) -> Option<FireType> {
    entry
        .split('|')
        .map(|part| FireType::from_option_name(part.trim()))
        .try_fold(FireType::empty(), |acc, t| t.map(|t| acc | t))
}

fn fire_type_name(types: FireType) -> String {
    let names: Vec<&str> = types.iter().filter_map(|t| t.option_name()).collect();
    names.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = QuiverOptions::default();
        assert_eq!(opts.fire_order.first(), Some(&FireType::LAUNCHER));
        assert_eq!(opts.fire_order.len(), 8);
        assert_eq!(opts.fire_items_start, 0);
        assert_eq!(opts.fail_severity_to_quiver, 3);
    }

    #[test]
    fn test_parse_config() {
        let config = "\
# my quiver
fire_order = javelin, dart
fire_order += stone | rock
fire_items_start = c
fail_severity_to_quiver = 2
status_caption_colour = yellow
";
        let opts = QuiverOptions::parse_config(config).unwrap();
        assert_eq!(
            opts.fire_order,
            vec![
                FireType::JAVELIN,
                FireType::DART,
                FireType::STONE | FireType::ROCK
            ]
        );
        assert_eq!(opts.fire_items_start, 2);
        assert_eq!(opts.fail_severity_to_quiver, 2);
        assert_eq!(
            opts.status_caption_colour,
            crate::data::colors::CLR_YELLOW
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            QuiverOptions::parse_config("autopickup = true"),
            Err(OptionsError::UnknownOption("autopickup".to_string()))
        );
        assert!(matches!(
            QuiverOptions::parse_config("fire_order = launcher, banana"),
            Err(OptionsError::InvalidValue(..))
        ));
        assert!(matches!(
            QuiverOptions::parse_config("fire_items_start = 7"),
            Err(OptionsError::InvalidValue(..))
        ));
        assert!(matches!(
            QuiverOptions::parse_config("fail_severity_to_quiver ="),
            Err(OptionsError::MissingValue(..))
        ));
        assert!(matches!(
            QuiverOptions::parse_config("just some words"),
            Err(OptionsError::ParseError(..))
        ));
    }

    #[test]
    fn test_empty_fire_order_allowed() {
        let opts = QuiverOptions::parse_config("fire_order =").unwrap();
        assert!(opts.fire_order.is_empty());
    }

    #[test]
    fn test_config_string_round_trip() {
        let mut opts = QuiverOptions::default();
        opts.fire_order = vec![FireType::DART | FireType::INSCRIBED, FireType::LAUNCHER];
        opts.fire_items_start = 30;
        opts.fail_severity_to_quiver = 1;
        let text = opts.to_config_string();
        assert_eq!(QuiverOptions::parse_config(&text).unwrap(), opts);
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("quiver-options-{}.rc", std::process::id()));
        let mut opts = QuiverOptions::default();
        opts.fire_order = vec![FireType::BOOMERANG];
        opts.save_to_file(&path).unwrap();
        let loaded = QuiverOptions::load_from_file(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.unwrap(), opts);

        assert!(matches!(
            QuiverOptions::load_from_file(Path::new("/nonexistent/quiver.rc")),
            Err(OptionsError::IoError(_))
        ));
    }
}
