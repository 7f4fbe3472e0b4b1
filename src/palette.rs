//! Ink palettes for decorative strokes.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use rand::Rng;
use rand::seq::IndexedRandom;

/// A main ink color plus accent colors, as CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub main: &'static str,
    pub accents: &'static [&'static str],
}

/// Built-in palettes.
pub const PALETTES: [Palette; 4] = [
    Palette { main: "#2B2B2B", accents: &["#5A5A5A", "#1B3A6B", "#7A1F1F"] },
    Palette { main: "#1F2A44", accents: &["#3C5A99", "#6D8BC9"] },
    Palette { main: "#3A2E2A", accents: &["#8C5B3F", "#B07D5B", "#5C4033"] },
    Palette { main: "#263238", accents: &["#455A64", "#607D8B"] },
];

impl Default for Palette {
    fn default() -> Self {
        PALETTES[0].clone()
    }
}

impl Palette {
    /// Pick one of [`PALETTES`] with `rng`.
    #[must_use]
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        PALETTES.choose(rng).cloned().unwrap_or_default()
    }

    /// Pick one of [`PALETTES`] with the thread-local generator.
    #[must_use]
    pub fn random() -> Self {
        Self::random_with(&mut rand::rng())
    }

    /// Color for decorative line `index`: every third line takes an accent.
    #[must_use]
    pub fn line_color(&self, index: usize) -> &'static str {
        if index % 3 == 0 && !self.accents.is_empty() {
            self.accents[index % self.accents.len()]
        } else {
            self.main
        }
    }
}
