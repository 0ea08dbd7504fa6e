//! Colour values used by prefab colour variations.

use serde::{Deserialize, Serialize};

/// An RGBA colour with floating-point channels in the range `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Rgba {
        Rgba { r, g, b, a }
    }

    /// Returns an opaque colour with the given channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Rgba {
        Rgba::new(r, g, b, 1.0)
    }
}

/// The full set of colour variation attributes a prefab carries.
///
/// Applying a bundle is a straight overwrite of all five values. Nothing is validated or
/// interpolated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct ColourBundle {
    /// Whether the prefab picks between the four colours at all.
    pub use_variation: bool,

    pub colour0: Rgba,
    pub colour1: Rgba,
    pub colour2: Rgba,
    pub colour3: Rgba,
}

impl ColourBundle {
    pub fn new(use_variation: bool, colours: [Rgba; 4]) -> ColourBundle {
        let [colour0, colour1, colour2, colour3] = colours;

        ColourBundle {
            use_variation,
            colour0,
            colour1,
            colour2,
            colour3,
        }
    }

    /// Returns the four colours in order.
    pub fn colours(&self) -> [Rgba; 4] {
        [self.colour0, self.colour1, self.colour2, self.colour3]
    }
}
