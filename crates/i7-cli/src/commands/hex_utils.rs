//! Hex address and number parsing.

use anyhow::{Result, bail};

/// Digits after an optional 0x prefix, and whether the prefix was present
fn split_prefix(s: &str) -> (&str, bool) {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(digits) => (digits, true),
        None => (s, false),
    }
}

/// Parse an address; always hex, the 0x prefix is optional.
pub fn parse_hex_address(s: &str) -> Result<u64> {
    let (digits, _) = split_prefix(s);
    if digits.is_empty() {
        bail!("Invalid hex address: {:?} has no digits", s);
    }
    u64::from_str_radix(digits, 16).map_err(|e| anyhow::anyhow!("Invalid hex address {:?}: {}", s, e))
}

/// Parse a decimal number, or hex with a 0x prefix.
pub fn parse_number(s: &str) -> Result<u64> {
    let (digits, hex) = split_prefix(s);
    let parsed = if hex {
        u64::from_str_radix(digits, 16)
    } else {
        digits.parse()
    };
    parsed.map_err(|e| anyhow::anyhow!("Invalid number {:?}: {}", s.trim(), e))
}

/// Format an address padded to the game's 24-bit address width
pub fn format_hex_address(addr: u64) -> String {
    format!("0x{:06X}", addr)
}
