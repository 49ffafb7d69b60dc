//! Key positions on the GK87 matrix.
//!
//! The board is an ANSI tenkeyless with a nav cluster, three rotary
//! encoders, and a volume knob position in the F row.  The switch matrix is
//! scanned as 6 rows of 17 columns; positions with no switch stay unmapped.
//!
//! A scan code packs a matrix position into a single byte, row major.

pub const NROWS: usize = 6;
pub const NCOLS: usize = 17;

/// All of the scan codes fit within this.
pub const NKEYS: usize = NROWS * NCOLS;

pub const fn code(row: usize, col: usize) -> u8 {
    (row * NCOLS + col) as u8
}

pub const fn row_of(code: u8) -> usize {
    code as usize / NCOLS
}

pub const fn col_of(code: u8) -> usize {
    code as usize % NCOLS
}

// F row.
pub const KEY_ESC: u8 = code(0, 0);
pub const KEY_F1: u8 = code(0, 1);
pub const KEY_F2: u8 = code(0, 2);
pub const KEY_F3: u8 = code(0, 3);
pub const KEY_F4: u8 = code(0, 4);
pub const KEY_F5: u8 = code(0, 5);
pub const KEY_F6: u8 = code(0, 6);
pub const KEY_F7: u8 = code(0, 7);
pub const KEY_F8: u8 = code(0, 8);
pub const KEY_F9: u8 = code(0, 9);
pub const KEY_F10: u8 = code(0, 10);
pub const KEY_F11: u8 = code(0, 11);
pub const KEY_F12: u8 = code(0, 12);
pub const KEY_MUTE: u8 = code(0, 13);
pub const KEY_BACKLIGHT: u8 = code(0, 14);
pub const KEY_SNIP: u8 = code(0, 15);

// Number row.
pub const KEY_GRAVE: u8 = code(1, 0);
pub const KEY_1: u8 = code(1, 1);
pub const KEY_2: u8 = code(1, 2);
pub const KEY_3: u8 = code(1, 3);
pub const KEY_4: u8 = code(1, 4);
pub const KEY_5: u8 = code(1, 5);
pub const KEY_6: u8 = code(1, 6);
pub const KEY_7: u8 = code(1, 7);
pub const KEY_8: u8 = code(1, 8);
pub const KEY_9: u8 = code(1, 9);
pub const KEY_0: u8 = code(1, 10);
pub const KEY_MINUS: u8 = code(1, 11);
pub const KEY_EQUAL: u8 = code(1, 12);
pub const KEY_BACKSPACE: u8 = code(1, 13);
pub const KEY_INS: u8 = code(1, 14);
pub const KEY_HOME: u8 = code(1, 15);
pub const KEY_PGUP: u8 = code(1, 16);

// Top alpha row.
pub const KEY_TAB: u8 = code(2, 0);
pub const KEY_Q: u8 = code(2, 1);
pub const KEY_W: u8 = code(2, 2);
pub const KEY_E: u8 = code(2, 3);
pub const KEY_R: u8 = code(2, 4);
pub const KEY_T: u8 = code(2, 5);
pub const KEY_Y: u8 = code(2, 6);
pub const KEY_U: u8 = code(2, 7);
pub const KEY_I: u8 = code(2, 8);
pub const KEY_O: u8 = code(2, 9);
pub const KEY_P: u8 = code(2, 10);
pub const KEY_LBR: u8 = code(2, 11);
pub const KEY_RBR: u8 = code(2, 12);
pub const KEY_BSLASH: u8 = code(2, 13);
pub const KEY_DEL: u8 = code(2, 14);
pub const KEY_END: u8 = code(2, 15);
pub const KEY_PGDN: u8 = code(2, 16);

// Home row.  Control sits in the Caps position on this board.
pub const KEY_CAPS: u8 = code(3, 0);
pub const KEY_A: u8 = code(3, 1);
pub const KEY_S: u8 = code(3, 2);
pub const KEY_D: u8 = code(3, 3);
pub const KEY_F: u8 = code(3, 4);
pub const KEY_G: u8 = code(3, 5);
pub const KEY_H: u8 = code(3, 6);
pub const KEY_J: u8 = code(3, 7);
pub const KEY_K: u8 = code(3, 8);
pub const KEY_L: u8 = code(3, 9);
pub const KEY_SEMI: u8 = code(3, 10);
pub const KEY_APOST: u8 = code(3, 11);
pub const KEY_ENTER: u8 = code(3, 12);

// Bottom alpha row.
pub const KEY_LSHIFT: u8 = code(4, 0);
pub const KEY_Z: u8 = code(4, 1);
pub const KEY_X: u8 = code(4, 2);
pub const KEY_C: u8 = code(4, 3);
pub const KEY_V: u8 = code(4, 4);
pub const KEY_B: u8 = code(4, 5);
pub const KEY_N: u8 = code(4, 6);
pub const KEY_M: u8 = code(4, 7);
pub const KEY_COMMA: u8 = code(4, 8);
pub const KEY_DOT: u8 = code(4, 9);
pub const KEY_SLASH: u8 = code(4, 10);
pub const KEY_RSHIFT: u8 = code(4, 11);
pub const KEY_UP: u8 = code(4, 12);

// Bottom row.
pub const KEY_LCTRL: u8 = code(5, 0);
pub const KEY_LGUI: u8 = code(5, 1);
pub const KEY_LALT: u8 = code(5, 2);
pub const KEY_SPACE: u8 = code(5, 4);
pub const KEY_RALT: u8 = code(5, 6);
pub const KEY_FN: u8 = code(5, 7);
pub const KEY_MENU: u8 = code(5, 8);
pub const KEY_RCTRL: u8 = code(5, 9);
pub const KEY_LEFT: u8 = code(5, 10);
pub const KEY_DOWN: u8 = code(5, 11);
pub const KEY_RIGHT: u8 = code(5, 12);
