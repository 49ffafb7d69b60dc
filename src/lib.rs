//! GK87 keymap core
//!
//! The layout logic for a Skyloong GK87 ANSI board: the layer tables, the
//! tap/hold home-row layer key, the Alt+Tab and virtual-desktop macros, and
//! the press-order queue.  The surrounding firmware owns the matrix scan,
//! debouncing, and USB reporting; it feeds [`KeyEvent`]s in and drains
//! [`Event`]s out through an [`EventQueue`].

#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

use alloc::vec::Vec;

use bitflags::bitflags;
pub use usbd_human_interface_device::page::{Consumer, Keyboard};

pub use layout::LayoutManager;

pub mod keymap;
pub mod keys;
pub mod layout;

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        mod log {
            pub use defmt::info;
        }
    } else {
        mod log {
            pub use log::info;
        }
    }
}

/// Key events indicate keys going up or down.
///
/// The payload is the scan code of the matrix position, see [`keys`].
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum KeyEvent {
    Press(u8),
    Release(u8),
}

#[cfg(feature = "defmt")]
impl defmt::Format for KeyEvent {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            KeyEvent::Press(k) => defmt::write!(fmt, "KeyEvent::Press({})", k),
            KeyEvent::Release(k) => defmt::write!(fmt, "KeyEvent::Release({})", k),
        }
    }
}

impl KeyEvent {
    pub fn key(&self) -> u8 {
        match self {
            KeyEvent::Press(k) => *k,
            KeyEvent::Release(k) => *k,
        }
    }

    pub fn is_press(&self) -> bool {
        matches!(self, KeyEvent::Press(_))
    }
}

bitflags! {
    /// A modifier map. This indicates what modifiers should be held down when
    /// this keypress is sent.
    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
    pub struct Mods: u8 {
        const SHIFT = 0b0000_0001;
        const CONTROL = 0b0000_0010;
        const ALT = 0b0000_0100;
        const GUI = 0b0000_1000;
    }
}

/// Indicates keypresses that should be sent to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// A single key, with the given modifiers held around it.
    KeyPress(Keyboard, Mods),
    /// Release whatever [`KeyAction::KeyPress`] put down.
    KeyRelease,
    /// The full set of keys currently down, modifiers included.
    KeySet(Vec<Keyboard>),
    /// A consumer-page (media) usage going down.
    ConsumerPress(Consumer),
    /// Clear the consumer-page report.
    ConsumerRelease,
}

/// Backlight controls the host-side LED driver understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BacklightCommand {
    Toggle,
    Breathing,
    StepUp,
    StepDown,
}

/// System-level requests that go out on the system control report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemCommand {
    Sleep,
}

/// An event is something a handler produced that the firmware likely needs
/// to act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A keypress to forward to the HID layer.
    Key(KeyAction),
    /// A backlight control.
    Backlight(BacklightCommand),
    /// A system control.
    System(SystemCommand),
    /// A scroll-wheel step, with modifiers to hold around it.
    Wheel { mods: Mods, delta: i8 },
    /// The active layer set changed; the payload is the new bitmask.
    Layer(u8),
}

/// A generalized event queue.
pub trait EventQueue {
    /// Attempt to push to the queue.  Events will be discarded if the queue
    /// is full.
    fn push(&mut self, val: Event);
}
