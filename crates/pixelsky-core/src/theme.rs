//! Light/dark theme and the colours each theme selects.

use std::cell::Cell;
use std::rc::Rc;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Rgba};

/// Hour (local time) from which automatic mode switches to dark.
const DARK_FROM_HOUR: u32 = 19;
/// Hour (local time) from which automatic mode switches back to light.
const LIGHT_FROM_HOUR: u32 = 7;

/// Colour scheme in effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Interpret a theme attribute value. Only `"dark"` selects the dark
    /// theme; anything else, including no value at all, is light.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// How the host picks the theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the time of day.
    #[default]
    Auto,
}

impl ThemeMode {
    /// Cycle to the next mode.
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Auto,
            ThemeMode::Auto => ThemeMode::Light,
        }
    }

    /// Resolve the mode for a given local hour (0-23).
    pub fn resolve_at(self, hour: u32) -> Theme {
        match self {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::Auto => {
                if !(LIGHT_FROM_HOUR..DARK_FROM_HOUR).contains(&hour) {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            }
        }
    }

    /// Resolve the mode against the current local time.
    pub fn resolve(self) -> Theme {
        self.resolve_at(chrono::Local::now().hour())
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Auto => "auto",
        }
    }
}

/// Colours used while one theme is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSet {
    /// Background grid lines.
    pub grid: Rgba,
    /// Twinkling marks; alpha comes from the twinkle phase.
    pub mark: Rgb,
    /// Drifting clouds; alpha comes from each cloud.
    pub cloud: Rgb,
    /// Opaque colour the transparent surface is shown over.
    pub backdrop: Rgb,
}

/// Theme to colour-set mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub light: ColorSet,
    pub dark: ColorSet,
}

impl Palette {
    pub fn colors(&self, theme: Theme) -> &ColorSet {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        let sky = Rgb::new(74, 158, 255);
        let ink = Rgb::new(0, 68, 119);
        Self {
            dark: ColorSet {
                grid: sky.with_alpha(0.03),
                mark: sky,
                cloud: sky,
                backdrop: Rgb::new(13, 17, 28),
            },
            light: ColorSet {
                grid: ink.with_alpha(0.03),
                mark: ink,
                cloud: ink,
                backdrop: Rgb::new(236, 242, 248),
            },
        }
    }
}

/// Read access to the current theme.
///
/// The renderer asks on every draw call, so an implementation must always
/// return the latest value.
pub trait ThemeSource {
    fn theme(&self) -> Theme;
}

impl<F> ThemeSource for F
where
    F: Fn() -> Theme,
{
    fn theme(&self) -> Theme {
        self()
    }
}

/// Host-owned theme value shared with readers on the same thread.
#[derive(Debug, Clone, Default)]
pub struct SharedTheme(Rc<Cell<Theme>>);

impl SharedTheme {
    pub fn new(theme: Theme) -> Self {
        Self(Rc::new(Cell::new(theme)))
    }

    /// Store a new theme, returning whether it changed.
    pub fn set(&self, theme: Theme) -> bool {
        self.0.replace(theme) != theme
    }

    pub fn get(&self) -> Theme {
        self.0.get()
    }
}

impl ThemeSource for SharedTheme {
    fn theme(&self) -> Theme {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_attribute() {
        assert_eq!(Theme::from_attribute(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_attribute(Some("light")), Theme::Light);
        assert_eq!(Theme::from_attribute(Some("Dark")), Theme::Light);
        assert_eq!(Theme::from_attribute(Some("")), Theme::Light);
        assert_eq!(Theme::from_attribute(None), Theme::Light);
    }

    #[test]
    fn test_mode_cycle() {
        assert_eq!(ThemeMode::Light.next(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.next(), ThemeMode::Auto);
        assert_eq!(ThemeMode::Auto.next(), ThemeMode::Light);
    }

    #[test]
    fn test_auto_mode_follows_hour() {
        assert_eq!(ThemeMode::Auto.resolve_at(3), Theme::Dark);
        assert_eq!(ThemeMode::Auto.resolve_at(6), Theme::Dark);
        assert_eq!(ThemeMode::Auto.resolve_at(7), Theme::Light);
        assert_eq!(ThemeMode::Auto.resolve_at(18), Theme::Light);
        assert_eq!(ThemeMode::Auto.resolve_at(19), Theme::Dark);
        assert_eq!(ThemeMode::Auto.resolve_at(23), Theme::Dark);
    }

    #[test]
    fn test_fixed_modes_ignore_hour() {
        for hour in 0..24 {
            assert_eq!(ThemeMode::Light.resolve_at(hour), Theme::Light);
            assert_eq!(ThemeMode::Dark.resolve_at(hour), Theme::Dark);
        }
    }

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.colors(Theme::Dark).mark, Rgb::new(74, 158, 255));
        assert_eq!(palette.colors(Theme::Light).cloud, Rgb::new(0, 68, 119));
        assert!((palette.colors(Theme::Light).grid.alpha - 0.03).abs() < f32::EPSILON);
    }

    #[test]
    fn test_shared_theme_reports_change() {
        let shared = SharedTheme::new(Theme::Light);
        let reader = shared.clone();
        assert!(!shared.set(Theme::Light));
        assert!(shared.set(Theme::Dark));
        assert_eq!(reader.theme(), Theme::Dark);
    }

    #[test]
    fn test_closure_theme_source() {
        let source = || Theme::Dark;
        assert_eq!(source.theme(), Theme::Dark);
    }
}
