//! Fixed colors of the diagram and the per-event palette.
//!
//! Policies and the edges around them take the color of their triggering
//! event. That color is picked from a fixed ten-entry palette by a 32-bit
//! polynomial string hash, so the same event name maps to the same color in
//! every run and in every implementation that reproduces the hash:
//!
//! ```text
//! h = 0
//! for each UTF-16 code unit c of name:
//!     h = (h * 31 + c) truncated to signed 32 bits
//! index = |h| mod 10
//! ```

use std::sync::OnceLock;

use eventflow_core::color::Color;

/// Palette entries, indexed by the event name hash.
pub const EVENT_PALETTE: [&str; 10] = [
    "#ef4444", // red
    "#06b6d4", // cyan
    "#8b5cf6", // violet
    "#ec4899", // pink
    "#14b8a6", // teal
    "#f97316", // orange
    "#6366f1", // indigo
    "#84cc16", // lime
    "#f59e0b", // amber
    "#22c55e", // green
];

/// Colors that do not depend on the input.
#[derive(Debug)]
pub(crate) struct Swatches {
    pub command_fill: Color,
    pub command_border: Color,
    pub event_fill: Color,
    pub event_border: Color,
    /// Command→event edges.
    pub connector: Color,
    palette: [Color; 10],
}

impl Swatches {
    fn new() -> Self {
        let parse = |hex: &str| Color::new(hex).expect("built-in swatches are valid hex colors");
        Self {
            command_fill: parse("#3b82f6"),
            command_border: parse("#2563eb"),
            event_fill: parse("#10b981"),
            event_border: parse("#059669"),
            connector: parse("#64748b"),
            palette: EVENT_PALETTE.map(parse),
        }
    }

    /// Returns the process-wide swatches.
    pub fn get() -> &'static Self {
        static SWATCHES: OnceLock<Swatches> = OnceLock::new();
        SWATCHES.get_or_init(Self::new)
    }
}

/// Hashes `name` with `h = h * 31 + code_unit` in wrapping `i32` arithmetic.
///
/// # Examples
///
/// ```
/// use eventflow::layout::palette::name_hash;
///
/// assert_eq!(name_hash(""), 0);
/// assert_eq!(name_hash("A"), 65);
/// assert_eq!(name_hash("AB"), 65 * 31 + 66);
/// ```
pub fn name_hash(name: &str) -> i32 {
    name.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Returns the palette index assigned to `name`.
pub fn palette_index(name: &str) -> usize {
    // `unsigned_abs` keeps i32::MIN well defined (2147483648 mod 10 = 8)
    (name_hash(name).unsigned_abs() % EVENT_PALETTE.len() as u32) as usize
}

/// Returns the palette color assigned to the event `name`.
///
/// # Examples
///
/// ```
/// use eventflow::layout::palette::color_of;
///
/// assert_eq!(color_of("A").to_hex(), "#f97316");
/// assert_eq!(color_of("OrderPlaced"), color_of("OrderPlaced"));
/// ```
pub fn color_of(name: &str) -> Color {
    Swatches::get().palette[palette_index(name)]
}
