//! FF7 field text encoding.

/// End-of-string marker
pub const TERMINATOR: u8 = 0xFF;

/// Characters for codes 0x60..=0x7F
const EXTENDED: [char; 32] = [
    'Ä', 'Á', 'Ç', 'É', 'Ñ', 'Ö', 'Ü', 'á', 'à', 'â', 'ä', 'ã', 'å', 'ç', 'é', 'è', 'ê', 'ë',
    'í', 'ì', 'î', 'ï', 'ñ', 'ó', 'ò', 'ô', 'ö', 'õ', 'ú', 'ù', 'û', 'ü',
];

/// Decode a fixed-length text field.
///
/// Stops at the first terminator and trims trailing spaces. Codes with no
/// printable mapping are skipped.
pub fn decode_ff_text(bytes: &[u8]) -> String {
    let text: String = bytes
        .iter()
        .take_while(|&&b| b != TERMINATOR)
        .filter_map(|&b| decode_char(b))
        .collect();
    text.trim_end_matches(' ').to_string()
}

fn decode_char(byte: u8) -> Option<char> {
    match byte {
        0x00..=0x5E => Some((byte + 0x20) as char),
        0x60..=0x7F => Some(EXTENDED[(byte - 0x60) as usize]),
        _ => None,
    }
}

/// Encode `text` into a field of `len` bytes, terminator-padded.
///
/// Characters the encoding cannot represent are dropped; text longer than
/// the field is truncated.
pub fn encode_ff_text(text: &str, len: usize) -> Vec<u8> {
    let mut out: Vec<u8> = text.chars().filter_map(encode_char).take(len).collect();
    out.resize(len, TERMINATOR);
    out
}

fn encode_char(c: char) -> Option<u8> {
    match c {
        ' '..='~' => Some(c as u8 - 0x20),
        _ => EXTENDED
            .iter()
            .position(|&e| e == c)
            .map(|index| 0x60 + index as u8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ascii_range() {
        // "Cloud" = C(0x23) l(0x4C) o(0x4F) u(0x55) d(0x44)
        let bytes = [0x23, 0x4C, 0x4F, 0x55, 0x44, 0xFF, 0x00, 0x00];
        assert_eq!(decode_ff_text(&bytes), "Cloud");
    }

    #[test]
    fn test_decode_trims_trailing_spaces() {
        let bytes = [0x21, 0x00, 0x00, 0xFF];
        assert_eq!(decode_ff_text(&bytes), "A");
    }

    #[test]
    fn test_decode_without_terminator_uses_whole_field() {
        assert_eq!(decode_ff_text(&[0x21, 0x22]), "AB");
    }

    #[test]
    fn test_decode_extended_characters() {
        assert_eq!(decode_ff_text(&[0x63, 0x7F, 0xFF]), "Éü");
    }

    #[test]
    fn test_encode_pads_with_terminator() {
        let bytes = encode_ff_text("Tifa", 12);
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[..4], &[0x34, 0x49, 0x46, 0x41]);
        assert!(bytes[4..].iter().all(|&b| b == TERMINATOR));
        assert_eq!(decode_ff_text(&bytes), "Tifa");
    }

    #[test]
    fn test_encode_truncates_to_field() {
        let bytes = encode_ff_text("Sector 7 Slums Train Station Platform", 32);
        assert_eq!(bytes.len(), 32);
        assert_eq!(decode_ff_text(&bytes), "Sector 7 Slums Train Station Pla");
    }
}
