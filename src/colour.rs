//! Maps escape counts to packed `0xAARRGGBB` colours.
//!
//! The escape count is turned into a speed between 0 and 100.  Fast
//! escapes are red, middling ones green, slow ones blue, with each
//! channel ramping linearly across its band:
//!
//! | channel | active when        | ramps            |
//! |---------|--------------------|------------------|
//! | red     | `speed <= 50`      | 255 down to 0    |
//! | green   | `25 < speed < 75`  | 0 up to 255      |
//! | blue    | `speed > 50`       | 0 up to 255      |
//!
//! Bounded points are opaque black.

use num::clamp;

/// Fully opaque, no colour.
pub const ALPHA: u32 = 0xFF00_0000;

/// The colour of a point that never escaped.
pub const BOUNDED: u32 = ALPHA;

#[inline]
fn channel(ratio: f64) -> u32 {
    // Scale first, then round: truncating the ratio before scaling
    // would zero every channel.
    clamp((ratio * 255.0).round(), 0.0, 255.0) as u32
}

/// The colour for escape count `v` out of `max_iterations`.
pub fn colour(v: usize, max_iterations: usize) -> u32 {
    if v >= max_iterations {
        return BOUNDED;
    }

    let speed = (v as f64 / max_iterations as f64) * 100.0;
    let mut argb = ALPHA;

    if speed <= 50.0 {
        argb |= channel(1.0 - 2.0 * speed / 100.0) << 16;
    }
    if 25.0 < speed && speed < 75.0 {
        argb |= channel((speed / 100.0 - 0.25) * 2.0) << 8;
    }
    if speed > 50.0 {
        argb |= channel((speed / 100.0 - 0.5) * 2.0);
    }
    argb
}

/// Splits one packed colour into `[r, g, b, a]`.
#[inline]
pub fn unpack(argb: u32) -> [u8; 4] {
    [
        (argb >> 16) as u8,
        (argb >> 8) as u8,
        argb as u8,
        (argb >> 24) as u8,
    ]
}

/// Flattens a pixel buffer into `r, g, b` bytes, dropping alpha, for
/// encoders that take 8-bit RGB.
pub fn to_rgb_bytes(pixels: &[u32]) -> Vec<u8> {
    pixels
        .iter()
        .flat_map(|&p| {
            let [r, g, b, _] = unpack(p);
            vec![r, g, b]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_is_opaque_black() {
        assert_eq!(colour(100, 100), 0xFF00_0000);
        assert_eq!(colour(1, 1), 0xFF00_0000);
    }

    #[test]
    fn fastest_escapes_are_nearly_pure_red() {
        // speed 2: red = round(0.96 · 255) = 245
        assert_eq!(colour(2, 100), 0xFFF5_0000);
        assert_eq!(colour(0, 100), 0xFFFF_0000);
    }

    #[test]
    fn speed_fifty_boundaries() {
        // red is active but its ramp has reached zero, green is half
        // way up, blue is not yet active.
        let c = colour(50, 100);
        assert_eq!(c, 0xFF00_8000);
        let [r, g, b, a] = unpack(c);
        assert_eq!((r, g, b, a), (0, 128, 0, 255));
    }

    #[test]
    fn speed_twenty_five_and_seventy_five_boundaries() {
        // green is strict on both ends.
        assert_eq!(colour(25, 100), 0xFF80_0000);
        assert_eq!(colour(75, 100), 0xFF00_0080);
    }

    #[test]
    fn all_three_bands() {
        // speed 40: red = round(0.2 · 255) = 51, green = round(0.3 · 255) = 77
        assert_eq!(colour(40, 100), 0xFF33_4D00);
        // speed 60: green = round(0.7 · 255) = 179, blue = round(0.2 · 255) = 51
        assert_eq!(colour(60, 100), 0xFF00_B333);
        // speed 90: blue = round(0.8 · 255) = 204
        assert_eq!(colour(90, 100), 0xFF00_00CC);
    }

    #[test]
    fn alpha_is_always_set() {
        for v in 0..=1000 {
            assert_eq!(colour(v, 1000) & ALPHA, ALPHA, "v = {}", v);
        }
    }

    #[test]
    fn byte_flattening() {
        let pixels = [0xFF11_2233, 0x8044_5566];
        assert_eq!(to_rgb_bytes(&pixels), vec![0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
    }
}
