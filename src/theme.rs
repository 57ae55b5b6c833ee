//! Built-in colour themes
//!
//! Each theme is a set of hex strings; `Theme::palette` resolves them to
//! RGBA once so the renderer never parses colours per frame.

use crate::colors::{ColorError, Rgba, parse_hex};

/// Snake colours per player slot (bots reuse them cyclically)
pub const SNAKE_COLORS: usize = 4;

/// A named colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: &'static str,
    pub grid_background: &'static str,
    pub grid_line: &'static str,
    pub wall: &'static str,
    pub portal: &'static str,
    pub food: &'static str,
    pub golden_food: &'static str,
    pub powerup: &'static str,
    pub snakes: [&'static str; SNAKE_COLORS],
}

pub const DRACULA: Theme = Theme {
    name: "dracula",
    background: "#282a36",
    grid_background: "#1e1f29",
    grid_line: "#2f3140",
    wall: "#6272a4",
    portal: "#8be9fd",
    food: "#ff5555",
    golden_food: "#f1fa8c",
    powerup: "#ff79c6",
    snakes: ["#50fa7b", "#bd93f9", "#ffb86c", "#8be9fd"],
};

pub const NORD: Theme = Theme {
    name: "nord",
    background: "#2e3440",
    grid_background: "#3b4252",
    grid_line: "#434c5e",
    wall: "#4c566a",
    portal: "#88c0d0",
    food: "#bf616a",
    golden_food: "#ebcb8b",
    powerup: "#b48ead",
    snakes: ["#a3be8c", "#81a1c1", "#d08770", "#8fbcbb"],
};

pub const GRUVBOX: Theme = Theme {
    name: "gruvbox",
    background: "#282828",
    grid_background: "#1d2021",
    grid_line: "#32302f",
    wall: "#665c54",
    portal: "#83a598",
    food: "#fb4934",
    golden_food: "#fabd2f",
    powerup: "#d3869b",
    snakes: ["#b8bb26", "#fe8019", "#8ec07c", "#83a598"],
};

pub const SOLARIZED: Theme = Theme {
    name: "solarized",
    background: "#fdf6e3",
    grid_background: "#eee8d5",
    grid_line: "#e4ddc8",
    wall: "#93a1a1",
    portal: "#2aa198",
    food: "#dc322f",
    golden_food: "#b58900",
    powerup: "#d33682",
    snakes: ["#859900", "#268bd2", "#cb4b16", "#6c71c4"],
};

pub const HIGH_CONTRAST: Theme = Theme {
    name: "high_contrast",
    background: "#000000",
    grid_background: "#000000",
    grid_line: "#333333",
    wall: "#ffffff",
    portal: "#00ffff",
    food: "#ff0000",
    golden_food: "#ffff00",
    powerup: "#ff00ff",
    snakes: ["#00ff00", "#0080ff", "#ff8000", "#ffffff"],
};

/// All built-in themes in cycling order
pub const THEMES: [Theme; 5] = [DRACULA, NORD, GRUVBOX, SOLARIZED, HIGH_CONTRAST];

impl Default for Theme {
    fn default() -> Self {
        DRACULA
    }
}

impl Theme {
    /// Look up a built-in theme (case-insensitive, `-` and `_` equivalent)
    pub fn by_name(name: &str) -> Option<Theme> {
        let wanted = name.trim().to_lowercase().replace('-', "_");
        THEMES.iter().copied().find(|t| t.name == wanted)
    }

    /// The theme after this one, wrapping around
    pub fn next(&self) -> Theme {
        let idx = THEMES
            .iter()
            .position(|t| t.name == self.name)
            .unwrap_or(0);
        THEMES[(idx + 1) % THEMES.len()]
    }

    /// Resolve all colours
    pub fn palette(&self) -> Result<Palette, ColorError> {
        let mut snakes = [[0.0; 4]; SNAKE_COLORS];
        for (slot, hex) in snakes.iter_mut().zip(self.snakes.iter()) {
            *slot = parse_hex(hex)?;
        }
        Ok(Palette {
            background: parse_hex(self.background)?,
            grid_background: parse_hex(self.grid_background)?,
            grid_line: parse_hex(self.grid_line)?,
            wall: parse_hex(self.wall)?,
            portal: parse_hex(self.portal)?,
            food: parse_hex(self.food)?,
            golden_food: parse_hex(self.golden_food)?,
            powerup: parse_hex(self.powerup)?,
            snakes,
        })
    }
}

/// Resolved theme colours
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Rgba,
    pub grid_background: Rgba,
    pub grid_line: Rgba,
    pub wall: Rgba,
    pub portal: Rgba,
    pub food: Rgba,
    pub golden_food: Rgba,
    pub powerup: Rgba,
    pub snakes: [Rgba; SNAKE_COLORS],
}

impl Palette {
    /// Colour for a snake id
    pub fn snake(&self, id: u32) -> Rgba {
        self.snakes[id as usize % SNAKE_COLORS]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtin_themes_parse() {
        for theme in THEMES {
            assert!(theme.palette().is_ok(), "theme {} failed", theme.name);
        }
    }

    #[test]
    fn test_by_name() {
        assert_eq!(Theme::by_name("Nord"), Some(NORD));
        assert_eq!(Theme::by_name("high-contrast"), Some(HIGH_CONTRAST));
        assert_eq!(Theme::by_name("vaporwave"), None);
    }

    #[test]
    fn test_next_cycles() {
        let mut theme = Theme::default();
        for _ in 0..THEMES.len() {
            theme = theme.next();
        }
        assert_eq!(theme, DRACULA);
    }

    #[test]
    fn test_snake_colour_cycles() {
        let palette = DRACULA.palette().unwrap();
        assert_eq!(palette.snake(0), palette.snake(4));
    }
}
