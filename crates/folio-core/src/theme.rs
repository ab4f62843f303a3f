//! Light/dark theme and the palettes the backdrop draws with.

use std::fmt;

use crate::Rgb;

/// Visual theme of the portfolio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Switch between light and dark.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Value stored under the `theme` preference key.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Interpret a stored preference. Anything other than `"dark"` is light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Built-in palette for this theme.
    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette::light(),
            Theme::Dark => Palette::dark(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named slot in a palette. Points keep a role and resolve it at draw time,
/// so a theme switch recolors them without touching the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Background,
    AccentPrimary,
    AccentSecondary,
    TextPrimary,
    TextSecondary,
}

impl ColorRole {
    /// Roles a drifting particle may take.
    pub const PARTICLE: [ColorRole; 4] = [
        ColorRole::AccentPrimary,
        ColorRole::AccentSecondary,
        ColorRole::TextPrimary,
        ColorRole::TextSecondary,
    ];

    /// Roles a star may take.
    pub const STAR: [ColorRole; 3] = [
        ColorRole::AccentPrimary,
        ColorRole::AccentSecondary,
        ColorRole::TextPrimary,
    ];
}

/// Colors of one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub accent_primary: Rgb,
    pub accent_secondary: Rgb,
    pub text_primary: Rgb,
    pub text_secondary: Rgb,
}

impl Palette {
    pub const fn light() -> Self {
        Self {
            background: Rgb::new(245, 247, 250),
            accent_primary: Rgb::new(10, 147, 150),
            accent_secondary: Rgb::new(108, 92, 231),
            text_primary: Rgb::new(26, 32, 44),
            text_secondary: Rgb::new(74, 85, 104),
        }
    }

    pub const fn dark() -> Self {
        Self {
            background: Rgb::new(10, 25, 47),
            accent_primary: Rgb::new(100, 255, 218),
            accent_secondary: Rgb::new(189, 147, 249),
            text_primary: Rgb::new(204, 214, 246),
            text_secondary: Rgb::new(136, 146, 176),
        }
    }

    /// Look up the color for a role.
    pub fn get(&self, role: ColorRole) -> Rgb {
        match role {
            ColorRole::Background => self.background,
            ColorRole::AccentPrimary => self.accent_primary,
            ColorRole::AccentSecondary => self.accent_secondary,
            ColorRole::TextPrimary => self.text_primary,
            ColorRole::TextSecondary => self.text_secondary,
        }
    }

    /// Replace the color for a role.
    pub fn set(&mut self, role: ColorRole, color: Rgb) {
        let slot = match role {
            ColorRole::Background => &mut self.background,
            ColorRole::AccentPrimary => &mut self.accent_primary,
            ColorRole::AccentSecondary => &mut self.accent_secondary,
            ColorRole::TextPrimary => &mut self.text_primary,
            ColorRole::TextSecondary => &mut self.text_secondary,
        };
        *slot = color;
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}
