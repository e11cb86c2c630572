//! Random colors for material overrides
//!
//! Colors are drawn as six independent hex symbols, which is the same as
//! three independent uniform 8-bit channels. The random source is always
//! injected so callers decide between entropy and a fixed seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use soho_math::Color4;

/// Alphabet of a hex color symbol
pub const HEX_SYMBOLS: &[u8; 16] = b"0123456789ABCDEF";

/// Draw a `#RRGGBB` string
pub fn random_hex_string<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut color = String::with_capacity(7);
    color.push('#');
    for _ in 0..6 {
        color.push(HEX_SYMBOLS[rng.gen_range(0..HEX_SYMBOLS.len())] as char);
    }
    color
}

/// Draw an opaque color
pub fn random_hex_color<R: Rng + ?Sized>(rng: &mut R) -> Color4 {
    let hex = random_hex_string(rng);
    // Six symbols from HEX_SYMBOLS always parse
    Color4::from_hex_string(&hex).unwrap_or(Color4::white())
}

/// Random source for one trigger: seeded when a seed is given, entropy
/// otherwise
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
