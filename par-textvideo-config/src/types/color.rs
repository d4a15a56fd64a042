//! Palette color entries.

use serde::{Deserialize, Serialize};

/// Largest value of a 5-bit color channel.
pub const RGB5_MAX: u8 = 0x1F;

/// A palette color with 5 bits per channel, serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb5(pub u8, pub u8, pub u8);

impl Rgb5 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb5(r, g, b)
    }

    pub const fn r(self) -> u8 {
        self.0
    }

    pub const fn g(self) -> u8 {
        self.1
    }

    pub const fn b(self) -> u8 {
        self.2
    }

    /// Whether every channel fits in 5 bits.
    pub fn is_valid(self) -> bool {
        self.0 <= RGB5_MAX && self.1 <= RGB5_MAX && self.2 <= RGB5_MAX
    }
}
