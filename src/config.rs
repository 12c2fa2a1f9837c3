//! Configuration file handling for glyph-art.
//!
//! Loads configuration from `<config dir>/glyph-art/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ascii::{DEFAULT_CHAR_ASPECT_RATIO, STANDARD_SYMBOLS};
use crate::raster::DEFAULT_FONT_SIZE;

/// Configuration file structure for glyph-art.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub font: FontConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Symbols to calibrate; overrides `charset` when set.
    #[serde(default)]
    pub symbols: Option<String>,
    /// Named symbol set: standard, blocks, minimal, detailed.
    #[serde(default = "default_charset")]
    pub charset: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            symbols: None,
            charset: default_charset(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Font file; searched among common monospace fonts when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Font size in pixels used for calibration.
    #[serde(default = "default_font_size")]
    pub size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            size: default_font_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Fixed column count; follows the terminal width when unset.
    #[serde(default)]
    pub cols: Option<u32>,
    /// Fixed row count; follows the terminal height when unset.
    #[serde(default)]
    pub rows: Option<u32>,
    #[serde(default = "default_true")]
    pub preserve_aspect: bool,
    /// Height over width of one character cell.
    #[serde(default = "default_char_aspect")]
    pub char_aspect: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: None,
            rows: None,
            preserve_aspect: true,
            char_aspect: default_char_aspect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Invert brightness (for light text on dark terminals).
    #[serde(default)]
    pub invert: bool,
}

fn default_true() -> bool {
    true
}

fn default_charset() -> String {
    "standard".to_string()
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

fn default_char_aspect() -> f32 {
    DEFAULT_CHAR_ASPECT_RATIO
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                source: e,
            })?;
            config.validate().map_err(|message| ConfigError::Invalid {
                path: path.clone(),
                message,
            })?;
            log::info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Check the values the TOML types cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid.cols == Some(0) || self.grid.rows == Some(0) {
            return Err("[grid] cols and rows must be at least 1".to_string());
        }
        if !(self.grid.char_aspect.is_finite() && self.grid.char_aspect > 0.0) {
            return Err(format!(
                "[grid] char_aspect must be positive, got {}",
                self.grid.char_aspect
            ));
        }
        if !(self.font.size.is_finite() && self.font.size > 0.0) {
            return Err(format!("[font] size must be positive, got {}", self.font.size));
        }
        Ok(())
    }

    /// Symbols to calibrate: explicit symbols first, then the named charset.
    pub fn symbols(&self) -> Result<String, ConfigError> {
        if let Some(symbols) = &self.palette.symbols {
            return Ok(symbols.clone());
        }
        crate::ascii::SymbolSet::from_name(&self.palette.charset)
            .map(|set| set.symbols().to_string())
            .ok_or_else(|| ConfigError::UnknownCharset(self.palette.charset.clone()))
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config file '{}': {message}", .path.display())]
    Invalid { path: PathBuf, message: String },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("Unknown charset '{0}' (expected standard, blocks, minimal or detailed)")]
    UnknownCharset(String),
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("glyph-art").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/glyph-art/config.toml")
        })
}

/// Commented default configuration written by `config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# glyph-art configuration

[palette]
# Named symbol set: standard, blocks, minimal, detailed
charset = "standard"
# Custom symbols (override charset); order does not matter
# symbols = " .:-=+*#%@"

[font]
# Monospace font used to calibrate the palette (auto-detected when unset)
# path = "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf"
# Font size in pixels
size = 8.0

[grid]
# Fixed grid size (follows the terminal when unset)
# cols = 80
# rows = 40
# Keep the image aspect ratio
preserve_aspect = true
# Character cell height / width
char_aspect = 2.0

[output]
# Invert brightness (light text on dark terminals)
invert = false
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/glyph-art.toml"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.symbols().unwrap(), STANDARD_SYMBOLS);
        assert_eq!(config.font.size, 8.0);
        assert!(config.grid.preserve_aspect);
        assert_eq!(config.grid.char_aspect, 2.0);
        assert!(!config.output.invert);
    }

    #[test]
    fn test_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[grid]\ncols = 120\n\n[palette]\ncharset = \"minimal\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.grid.cols, Some(120));
        assert_eq!(config.grid.rows, None);
        assert!(config.grid.preserve_aspect);
        assert_eq!(config.symbols().unwrap(), " .:#");
    }

    #[test]
    fn test_symbols_override_charset() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[palette]\nsymbols = \"ab\"\ncharset = \"blocks\"").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.symbols().unwrap(), "ab");
    }

    #[test]
    fn test_unknown_charset() {
        let mut config = Config::default();
        config.palette.charset = "braille".to_string();
        assert!(matches!(
            config.symbols(),
            Err(ConfigError::UnknownCharset(name)) if name == "braille"
        ));
    }

    #[test]
    fn test_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[grid\ncols = ").unwrap();
        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        for body in [
            "[grid]\ncols = 0",
            "[grid]\nrows = 0",
            "[grid]\nchar_aspect = 0.0",
            "[grid]\nchar_aspect = -2.0",
            "[font]\nsize = 0.0",
        ] {
            let mut file = NamedTempFile::new().unwrap();
            writeln!(file, "{}", body).unwrap();
            let result = Config::load(Some(file.path()));
            assert!(
                matches!(result, Err(ConfigError::Invalid { .. })),
                "accepted {:?}",
                body
            );
        }
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let mut config = Config::default();
        config.grid.cols = Some(64);
        config.output.invert = true;
        let text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_default_path_ends_with_config_toml() {
        let path = default_path();
        assert!(path.ends_with("glyph-art/config.toml"));
    }
}
