use serde::Serialize;

use crate::memory::layout::colors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Six uppercase hex digits, R then G then B, no prefix
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Menu window gradient, one color per corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuColors {
    pub top_left: Rgb,
    pub top_right: Rgb,
    pub bottom_left: Rgb,
    pub bottom_right: Rgb,
}

impl MenuColors {
    /// Stock blue gradient of a fresh game
    pub const CLASSIC: Self = Self {
        top_left: Rgb::new(0x00, 0x58, 0xB0),
        top_right: Rgb::new(0x00, 0x00, 0x50),
        bottom_left: Rgb::new(0x00, 0x00, 0x80),
        bottom_right: Rgb::new(0x00, 0x00, 0x20),
    };

    /// Parse the 16-byte palette buffer; `None` if it is too short
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < colors::SIZE {
            return None;
        }
        let corner = |at: usize| Rgb::new(bytes[at + 2], bytes[at + 1], bytes[at]);
        Some(Self {
            top_left: corner(colors::TOP_LEFT),
            top_right: corner(colors::TOP_RIGHT),
            bottom_left: corner(colors::BOTTOM_LEFT),
            bottom_right: corner(colors::BOTTOM_RIGHT),
        })
    }

    /// Storage form: B, G, R, pad per corner
    pub fn to_bytes(&self) -> [u8; colors::SIZE] {
        let mut bytes = [0u8; colors::SIZE];
        for (at, c) in [
            (colors::BOTTOM_LEFT, self.bottom_left),
            (colors::BOTTOM_RIGHT, self.bottom_right),
            (colors::TOP_LEFT, self.top_left),
            (colors::TOP_RIGHT, self.top_right),
        ] {
            bytes[at..at + 3].copy_from_slice(&[c.b, c.g, c.r]);
        }
        bytes
    }

    pub fn to_hex(&self) -> WindowColors {
        WindowColors {
            top_left: self.top_left.hex(),
            top_right: self.top_right.hex(),
            bottom_left: self.bottom_left.hex(),
            bottom_right: self.bottom_right.hex(),
        }
    }
}

impl Default for MenuColors {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Window corner colors rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowColors {
    pub top_left: String,
    pub top_right: String,
    pub bottom_left: String,
    pub bottom_right: String,
}
