//! Keymap tables.
//!
//! Three layers over the 6x17 matrix: the base layer, the Fn layer with
//! media/backlight/nav controls, and the desktop layer reached by holding
//! the L key, which carries the window and virtual-desktop macros and the
//! F13..F24 shortcut blocks.  The tables are baked at build time; the host
//! firmware never writes them.

use usbd_human_interface_device::page::Keyboard::{self, *};
use usbd_human_interface_device::page::Consumer;

use crate::keys::{self, NCOLS, NROWS};
use crate::{BacklightCommand, Mods, SystemCommand};

pub const NUM_LAYERS: usize = 3;
pub const NUM_ENCODERS: usize = 3;

/// One slot of the keymap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// A matrix position with no switch, or a key that does nothing.
    None,
    /// Fall through to the next active layer below.
    Transparent,
    /// A plain HID key.
    Key(Keyboard),
    /// A key sent with modifiers held around it.
    Shortcut(Mods, Keyboard),
    /// A consumer-page (media) usage.
    Media(Consumer),
    /// A system control request.
    System(SystemCommand),
    /// A backlight control.
    Backlight(BacklightCommand),
    /// Layer on while held.
    Momentary(usize),
    /// The key on tap, the layer while held.
    LayerTap(usize, Keyboard),
    /// Sticky Alt+Tab window switcher.
    AltTab,
    /// Next virtual desktop.
    DeskNext,
    /// Previous virtual desktop.
    DeskPrev,
    /// A scroll-wheel step with modifiers held, for the encoders.
    Wheel(Mods, i8),
}

pub type LayerGrid = [[Action; NCOLS]; NROWS];

const fn k(code: Keyboard) -> Action {
    Action::Key(code)
}

const fn m(mods: Mods, code: Keyboard) -> Action {
    Action::Shortcut(mods, code)
}

const fn media(code: Consumer) -> Action {
    Action::Media(code)
}

const fn bl(cmd: BacklightCommand) -> Action {
    Action::Backlight(cmd)
}

const __: Action = Action::None;
const TR: Action = Action::Transparent;
const SLEEP: Action = Action::System(SystemCommand::Sleep);

/// Layer 2 when held, L when tapped.
const LT2_L: Action = Action::LayerTap(2, L);
const MO1: Action = Action::Momentary(1);

const CTRL: Mods = Mods::CONTROL;
const GUI: Mods = Mods::GUI;
const CTRL_GUI: Mods = Mods::CONTROL.union(Mods::GUI);
const SHIFT_GUI: Mods = Mods::SHIFT.union(Mods::GUI);

#[rustfmt::skip]
const BASE: LayerGrid = [
    [k(Escape), k(F1), k(F2), k(F3), k(F4), k(F5), k(F6), k(F7), k(F8), k(F9), k(F10), k(F11), k(F12),
     media(Consumer::Mute), bl(BacklightCommand::Toggle), m(SHIFT_GUI, S), __],
    [k(Grave), k(Keyboard1), k(Keyboard2), k(Keyboard3), k(Keyboard4), k(Keyboard5), k(Keyboard6),
     k(Keyboard7), k(Keyboard8), k(Keyboard9), k(Keyboard0), k(Minus), k(Equal), k(DeleteBackspace),
     k(Insert), k(Home), k(PageUp)],
    [k(Tab), k(Q), k(W), k(E), k(R), k(T), k(Y), k(U), k(I), k(O), k(P), k(LeftBrace), k(RightBrace),
     k(Backslash), k(DeleteForward), k(End), k(PageDown)],
    [k(LeftControl), k(A), k(S), k(D), k(F), k(G), k(H), k(J), k(K), LT2_L, k(Semicolon), k(Apostrophe),
     k(ReturnEnter), __, __, __, __],
    [k(LeftShift), k(Z), k(X), k(C), k(V), k(B), k(N), k(M), k(Comma), k(Dot), k(ForwardSlash),
     k(RightShift), k(UpArrow), __, __, __, __],
    [k(LeftControl), k(LeftGUI), k(LeftAlt), k(Space), k(Space), k(Space), k(RightAlt), MO1,
     k(Application), k(RightControl), k(LeftArrow), k(DownArrow), k(RightArrow), __, __, __, __],
];

#[rustfmt::skip]
const FN: LayerGrid = [
    [TR, k(F14), k(F15), m(GUI, Tab), media(Consumer::ACSearch), m(CTRL_GUI, S), SLEEP,
     media(Consumer::ScanPreviousTrack), media(Consumer::PlayPause), media(Consumer::ScanNextTrack),
     media(Consumer::Mute), media(Consumer::VolumeDecrement), media(Consumer::VolumeIncrement),
     k(PrintScreen), k(ScrollLock), k(Pause), __],
    [TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, bl(BacklightCommand::Toggle),
     bl(BacklightCommand::Breathing), bl(BacklightCommand::Breathing), k(DeleteForward),
     k(Insert), k(Home), k(PageUp)],
    [TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, k(DeleteForward), k(End), k(PageDown)],
    [TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, __, __, __, __],
    [TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, bl(BacklightCommand::StepUp), __, __, __, __],
    [TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, k(LeftArrow), bl(BacklightCommand::StepDown),
     k(RightArrow), __, __, __, __],
];

#[rustfmt::skip]
const DESK: LayerGrid = [
    [TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, __],
    [TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR],
    [Action::AltTab, m(CTRL, F13), m(CTRL, F14), m(CTRL, F15), m(CTRL, F16), m(CTRL, F17), TR,
     k(F21), k(F22), k(F23), k(F24), m(CTRL, F20), TR, TR, TR, TR, TR],
    [Action::DeskPrev, m(GUI, Keyboard1), m(GUI, Keyboard2), m(GUI, Keyboard3), Action::AltTab,
     Action::DeskNext, m(CTRL, F18), k(F17), k(F18), k(F19), k(F20), m(CTRL, F21), TR, __, __, __, __],
    [TR, TR, TR, TR, TR, TR, m(CTRL, F19), k(F13), k(F14), k(F15), k(F16), TR, TR, __, __, __, __],
    [TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, TR, __, __, __, __],
];

/// The full keymap, layer 0 lowest.
pub static KEYMAP: [LayerGrid; NUM_LAYERS] = [BASE, FN, DESK];

/// Encoder actions per layer, `(counter_clockwise, clockwise)` per encoder:
/// volume, backlight, and Ctrl+wheel zoom.
#[rustfmt::skip]
pub static ENCODER_MAP: [[(Action, Action); NUM_ENCODERS]; NUM_LAYERS] = [
    [(media(Consumer::VolumeDecrement), media(Consumer::VolumeIncrement)),
     (bl(BacklightCommand::StepDown), bl(BacklightCommand::StepUp)),
     (Action::Wheel(CTRL, -1), Action::Wheel(CTRL, 1))],
    [(media(Consumer::VolumeDecrement), media(Consumer::VolumeIncrement)),
     (bl(BacklightCommand::StepDown), bl(BacklightCommand::StepUp)),
     (Action::Wheel(CTRL, -1), Action::Wheel(CTRL, 1))],
    [(media(Consumer::VolumeDecrement), media(Consumer::VolumeIncrement)),
     (bl(BacklightCommand::StepDown), bl(BacklightCommand::StepUp)),
     (Action::Wheel(CTRL, -1), Action::Wheel(CTRL, 1))],
];

/// The action a single layer maps at a position, without fallthrough.
pub fn action_at(layer: usize, code: u8) -> Action {
    let (row, col) = (keys::row_of(code), keys::col_of(code));
    if layer >= NUM_LAYERS || row >= NROWS {
        return Action::None;
    }
    KEYMAP[layer][row][col]
}

/// Resolve a scan code against a set of active layers.
///
/// Walks the active layers from highest to lowest; a transparent entry
/// defers to the next active layer below it.
pub fn resolve(layers: u8, code: u8) -> Action {
    for layer in (0..NUM_LAYERS).rev() {
        if layers & (1 << layer) == 0 {
            continue;
        }
        match action_at(layer, code) {
            Action::Transparent => continue,
            action => return action,
        }
    }
    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;

    #[test]
    fn base_layer_lookup() {
        assert_eq!(resolve(0b001, keys::KEY_Q), Action::Key(Q));
        assert_eq!(resolve(0b001, keys::KEY_L), LT2_L);
        assert_eq!(resolve(0b001, keys::KEY_FN), MO1);
        assert_eq!(resolve(0b001, keys::KEY_SNIP), Action::Shortcut(SHIFT_GUI, S));
    }

    #[test]
    fn transparent_falls_through() {
        // The Fn layer leaves the alphas transparent.
        assert_eq!(resolve(0b011, keys::KEY_Q), Action::Key(Q));
        // But overrides the F3 position.
        assert_eq!(resolve(0b011, keys::KEY_F3), Action::Shortcut(GUI, Tab));
    }

    #[test]
    fn desk_layer_shadows_the_tap_key() {
        // With the desk layer held, the L position is a plain F19.  The
        // manager must resolve the release against what went down, not
        // against this.
        assert_eq!(resolve(0b101, keys::KEY_L), Action::Key(F19));
        assert_eq!(resolve(0b101, keys::KEY_CAPS), Action::DeskPrev);
        assert_eq!(resolve(0b101, keys::KEY_TAB), Action::AltTab);
    }

    #[test]
    fn matrix_gaps_are_dead() {
        assert_eq!(resolve(0b111, keys::code(3, 16)), Action::None);
        assert_eq!(resolve(0b111, keys::code(0, 16)), Action::None);
    }

    #[test]
    fn out_of_range_positions_are_dead() {
        assert_eq!(action_at(0, u8::MAX), Action::None);
        assert_eq!(action_at(NUM_LAYERS, keys::KEY_Q), Action::None);
    }
}
