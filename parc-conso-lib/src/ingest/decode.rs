//! Decoding of the legacy 8-bit Western European text encoding.
//!
//! Billing exports are written in Windows-1252, the superset of ISO-8859-1 that
//! assigns printable characters (typographic quotes, euro sign, ...) to the
//! 0x80-0x9F range. Bytes left unassigned by Windows-1252 map to the matching
//! C1 control character, as ISO-8859-1 does.

const HIGH_CONTROL_RANGE: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}', //
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}', //
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}', //
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}', //
];

/// Decodes Windows-1252 bytes. Every byte maps to exactly one character.
#[must_use]
pub fn decode_windows_1252(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => HIGH_CONTROL_RANGE[usize::from(b - 0x80)],
            _ => char::from(b),
        })
        .collect()
}

/// Encodes text as Windows-1252, replacing unrepresentable characters with `?`.
#[cfg(test)]
pub fn encode_windows_1252(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            if let Some(pos) = HIGH_CONTROL_RANGE.iter().position(|&h| h == c) {
                u8::try_from(pos).map_or(b'?', |p| 0x80 + p)
            } else {
                u8::try_from(u32::from(c)).unwrap_or(b'?')
            }
        })
        .collect()
}
