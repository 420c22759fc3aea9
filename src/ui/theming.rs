// SPDX-License-Identifier: MPL-2.0
//! Theme mode selection.

use dark_light;
use iced::Theme;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Resolves the mode to a concrete Iced theme, consulting the OS
    /// preference for `System`.
    #[must_use]
    pub fn resolve(self) -> Theme {
        match self {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::System => {
                if let Ok(dark_light::Mode::Light) = dark_light::detect() {
                    Theme::Light
                } else {
                    // Default to dark for Dark mode or on detection error
                    Theme::Dark
                }
            }
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => !matches!(dark_light::detect(), Ok(dark_light::Mode::Light)),
        }
    }
}
