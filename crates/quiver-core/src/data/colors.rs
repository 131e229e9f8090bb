//! Colour definitions for quiver descriptions

/// Color constants
pub const CLR_BLACK: u8 = 0;
pub const CLR_BLUE: u8 = 1;
pub const CLR_GREEN: u8 = 2;
pub const CLR_CYAN: u8 = 3;
pub const CLR_RED: u8 = 4;
pub const CLR_MAGENTA: u8 = 5;
pub const CLR_BROWN: u8 = 6;
pub const CLR_LIGHT_GRAY: u8 = 7;
pub const CLR_DARK_GRAY: u8 = 8;
pub const CLR_LIGHT_BLUE: u8 = 9;
pub const CLR_LIGHT_GREEN: u8 = 10;
pub const CLR_LIGHT_CYAN: u8 = 11;
pub const CLR_LIGHT_RED: u8 = 12;
pub const CLR_LIGHT_MAGENTA: u8 = 13;
pub const CLR_YELLOW: u8 = 14;
pub const CLR_WHITE: u8 = 15;

/// Colour names as they appear in option files, indexed by colour value
const COLOUR_NAMES: [&str; 16] = [
    "black",
    "blue",
    "green",
    "cyan",
    "red",
    "magenta",
    "brown",
    "lightgrey",
    "darkgrey",
    "lightblue",
    "lightgreen",
    "lightcyan",
    "lightred",
    "lightmagenta",
    "yellow",
    "white",
];

/// Look up a colour by its option-file name.
///
/// Accepts both "grey" and "gray" spellings.
pub fn colour_by_name(name: &str) -> Option<u8> {
    let name = name.trim().to_lowercase().replace("gray", "grey");
    COLOUR_NAMES
        .iter()
        .position(|&n| n == name)
        .map(|idx| idx as u8)
}

/// Option-file name of a colour
pub fn colour_name(colour: u8) -> &'static str {
    COLOUR_NAMES
        .get(colour as usize)
        .copied()
        .unwrap_or("lightgrey")
}
