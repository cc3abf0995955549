//! Pull-based rendering.
//!
//! The crate never draws anything itself. A `Renderer` is handed the last
//! completed frame when the agent loop polls it, and only when the
//! controller is configured with `display = true`. Headless runs never
//! touch a renderer.

/// Number of palette entries. Pixels are palette indices.
pub const PALETTE_SIZE: usize = 256;

/// Display collaborator.
pub trait Renderer {
    /// Show one frame. `pixels` is row-major, `width * height` palette indices.
    fn display(&mut self, pixels: &[u8], width: usize, height: usize, palette: &Palette);
}

/// Palette index to RGB lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Palette {
    /// Index `i` maps to gray level `i`.
    #[must_use]
    pub fn grayscale() -> Self {
        Self {
            colors: (0..PALETTE_SIZE).map(|i| [i as u8; 3]).collect(),
        }
    }

    /// Build from an RGB table. Missing entries render black, extra entries are ignored.
    #[must_use]
    pub fn from_rgb(table: &[[u8; 3]]) -> Self {
        let mut colors = vec![[0u8; 3]; PALETTE_SIZE];
        for (slot, &rgb) in colors.iter_mut().zip(table) {
            *slot = rgb;
        }
        Self { colors }
    }

    /// Color of palette index `index`.
    #[must_use]
    pub fn lookup(&self, index: u8) -> [u8; 3] {
        self.colors[usize::from(index)]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::grayscale()
    }
}

/// Expand palette indices into packed RGB triples.
#[must_use]
pub fn to_rgb(pixels: &[u8], palette: &Palette) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixels.len() * 3);
    for &index in pixels {
        rgb.extend_from_slice(&palette.lookup(index));
    }
    rgb
}
