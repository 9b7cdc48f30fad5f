//! Token → number conversion.

use crate::model::{Color, Number};

/// Hex digits needed after `0x`: `RRGGBB`.
const COLOR_DIGITS: usize = 6;

/// Parses `token` as a real number and floors it.
///
/// Anything that is not a finite number, or does not fit in an `i64`
/// after flooring, becomes `Number::Invalid`.
pub fn to_number(token: &str) -> Number {
    let value: f64 = match token.trim().parse() {
        Ok(v) => v,
        Err(_) => return Number::Invalid,
    };
    if !value.is_finite() {
        return Number::Invalid;
    }

    let floored = value.floor();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if floored < i64::MIN as f64 || floored >= i64::MAX as f64 {
        return Number::Invalid;
    }
    Number::Int(floored as i64)
}

/// Decodes a `0xRRGGBB` literal. Red, green and blue are token characters
/// 2..4, 4..6 and 6..8; anything after them is ignored. Alpha is always 0.
///
/// Returns `None` when the token has no `0x` prefix, fewer than six hex
/// digits, or a non-hex character in the color pairs.
pub fn decode_color(token: &str) -> Option<Color> {
    let token = token.trim();
    let end = 2 + COLOR_DIGITS;
    if !token.starts_with("0x") || token.len() < end || !token.as_bytes()[..end].is_ascii() {
        return None;
    }

    let channel = |from: usize| -> Option<Number> {
        let pair = &token[from..from + 2];
        if !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u8::from_str_radix(pair, 16).ok().map(|v| Number::Int(v as i64))
    };

    Some(Color {
        r: channel(2)?,
        g: channel(4)?,
        b: channel(6)?,
        a: 0,
    })
}
