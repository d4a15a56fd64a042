//! Default palette and cell attribute.

use crate::cell::Attribute;
use crate::types::Rgb5;

/// The 16-color palette: black, eight half-intensity mixes plus gray, and
/// seven full-intensity mixes.
pub fn palette() -> Vec<Rgb5> {
    vec![
        Rgb5::new(0, 0, 0),
        Rgb5::new(0, 0, 15),
        Rgb5::new(0, 15, 0),
        Rgb5::new(0, 15, 15),
        Rgb5::new(15, 0, 0),
        Rgb5::new(15, 0, 15),
        Rgb5::new(15, 15, 0),
        Rgb5::new(15, 15, 15),
        Rgb5::new(7, 7, 7),
        Rgb5::new(0, 0, 31),
        Rgb5::new(0, 31, 0),
        Rgb5::new(0, 31, 31),
        Rgb5::new(31, 0, 0),
        Rgb5::new(31, 0, 31),
        Rgb5::new(31, 31, 0),
        Rgb5::new(31, 31, 31),
    ]
}

pub fn default_attribute() -> Attribute {
    Attribute::WHITE_ON_BLUE
}
