//! Configuration for pixelsky.
//!
//! Settings live in `config.toml` under the platform configuration
//! directory. Every field is optional; a missing file means defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use pixelsky_core::{ColorSet, Palette, Rgb, ThemeMode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "pixelsky.log";

/// Errors raised while reading or writing the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine a configuration directory")]
    NoConfigDir,
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("palette `{theme}.{field}`: {source}")]
    Color {
        theme: &'static str,
        field: &'static str,
        #[source]
        source: pixelsky_core::ParseColorError,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How the theme is chosen.
    pub theme: ThemeMode,
    /// Target frame rate of the redraw loop.
    pub fps: u32,
    /// Surface pixels per terminal column (each row shows twice as many).
    pub pixels_per_cell: u16,
    /// Show the key help line.
    pub show_help: bool,
    /// Draw a still backdrop instead of the animation.
    pub reduced_motion: bool,
    pub palette: PaletteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Auto,
            fps: 60,
            pixels_per_cell: 4,
            show_help: true,
            reduced_motion: false,
            palette: PaletteConfig::default(),
        }
    }
}

impl Config {
    pub const MIN_FPS: u32 = 1;
    pub const MAX_FPS: u32 = 240;
    pub const MAX_PIXELS_PER_CELL: u16 = 16;

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path()?)
    }

    /// Load from `path`, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        // Surface bad colours at load time rather than on first draw.
        config.palette.to_palette()?;
        Ok(config.sanitized())
    }

    /// Write to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_path()?)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(io_err)
    }

    /// Clamp numeric settings into their supported ranges.
    pub fn sanitized(mut self) -> Self {
        let fps = self.fps.clamp(Self::MIN_FPS, Self::MAX_FPS);
        if fps != self.fps {
            warn!(requested = self.fps, used = fps, "fps out of range");
            self.fps = fps;
        }
        let ppc = self.pixels_per_cell.clamp(1, Self::MAX_PIXELS_PER_CELL);
        if ppc != self.pixels_per_cell {
            warn!(
                requested = self.pixels_per_cell,
                used = ppc,
                "pixels_per_cell out of range"
            );
            self.pixels_per_cell = ppc;
        }
        self
    }
}

/// Colour overrides for one theme. Omitted fields keep the built-in colour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSetConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_alpha: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop: Option<String>,
}

impl ColorSetConfig {
    fn apply(&self, theme: &'static str, base: ColorSet) -> Result<ColorSet, ConfigError> {
        let parse = |field: &'static str, value: &Option<String>, fallback: Rgb| match value {
            Some(hex) => hex.parse::<Rgb>().map_err(|source| ConfigError::Color {
                theme,
                field,
                source,
            }),
            None => Ok(fallback),
        };
        let grid = parse("grid", &self.grid, base.grid.rgb)?;
        Ok(ColorSet {
            grid: grid.with_alpha(self.grid_alpha.unwrap_or(base.grid.alpha)),
            mark: parse("mark", &self.mark, base.mark)?,
            cloud: parse("cloud", &self.cloud, base.cloud)?,
            backdrop: parse("backdrop", &self.backdrop, base.backdrop)?,
        })
    }
}

/// Palette section of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub light: ColorSetConfig,
    pub dark: ColorSetConfig,
}

impl PaletteConfig {
    /// Apply the overrides to the built-in [`Palette`].
    pub fn to_palette(&self) -> Result<Palette, ConfigError> {
        let base = Palette::default();
        Ok(Palette {
            light: self.light.apply("light", base.light)?,
            dark: self.dark.apply("dark", base.dark)?,
        })
    }
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("", "", "pixelsky").ok_or(ConfigError::NoConfigDir)
}

/// Path of the configuration file.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

/// Path of the log file written when logging is enabled.
pub fn log_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.data_local_dir().join(LOG_FILE))
}
