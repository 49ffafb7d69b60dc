//! Layout handling.
//!
//! The [`LayoutManager`] sits between the matrix scan and the HID layer.
//! It owns everything the keymap tables cannot express statically: the set
//! of active layers, the tap/hold resolution of the home-row layer key, the
//! sticky Alt+Tab window switcher, the virtual-desktop macros, and the
//! press-order queue that is cleared whenever the layer set changes.
//!
//! The firmware drives it with three calls: [`handle_event`] for every key
//! going up or down, [`tick`] once a millisecond, and [`handle_encoder`]
//! for encoder detents.  Results come back through the [`EventQueue`].
//!
//! [`handle_event`]: LayoutManager::handle_event
//! [`tick`]: LayoutManager::tick
//! [`handle_encoder`]: LayoutManager::handle_encoder

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use arrayvec::ArrayVec;
use usbd_human_interface_device::page::Keyboard;

use crate::keymap::{self, Action, ENCODER_MAP, NUM_ENCODERS, NUM_LAYERS};
use crate::log::info;
use crate::{Event, EventQueue, KeyAction, KeyEvent, Mods};

use self::queue::PressQueue;

mod queue;

/// How long a layer-tap key must be held, in ticks, before it counts as a
/// hold on its own.
const TAPPING_TERM: u16 = 200;

/// Keys that can be physically down at once and still release correctly.
const MAX_HELD: usize = 16;

/// A layer-tap key that has gone down but not yet settled as tap or hold.
struct Pending {
    code: u8,
    layer: usize,
    tap: Keyboard,
    age: u16,
}

/// A pressed key, remembered with the action it resolved to at press time.
struct HeldKey {
    code: u8,
    action: Action,
}

pub struct LayoutManager {
    /// Bitmask of active layers.  Bit 0 is always set.
    layers: u8,

    /// Wrapping tick counter, the time base for queue timestamps.
    ticks: u16,

    /// HID codes currently registered with the host.
    down: BTreeSet<Keyboard>,

    /// Actions resolved at press time, so releases match their press even
    /// if the layer set moved in between.
    held: ArrayVec<HeldKey, MAX_HELD>,

    /// Press order since the last layer change.
    queue: PressQueue,

    /// An unsettled layer-tap key, if any.
    pending: Option<Pending>,

    /// Whether the Alt of the Alt+Tab switcher is asserted to the host.
    alt_tab_active: bool,
}

impl Default for LayoutManager {
    fn default() -> Self {
        LayoutManager::new()
    }
}

impl LayoutManager {
    pub fn new() -> Self {
        LayoutManager {
            layers: 0b1,
            ticks: 0,
            down: BTreeSet::new(),
            held: ArrayVec::new(),
            queue: PressQueue::default(),
            pending: None,
            alt_tab_active: false,
        }
    }

    /// The active layer bitmask.
    pub fn active_layers(&self) -> u8 {
        self.layers
    }

    /// Whether the given scan code was the first key pressed since the last
    /// layer change.
    pub fn was_first_pressed(&self, code: u8) -> bool {
        self.queue.was_first(code)
    }

    /// The first key pressed since the last layer change, with the tick it
    /// went down at.
    pub fn first_pressed(&self) -> Option<(u8, u16)> {
        self.queue.first().map(|press| (press.code, press.time))
    }

    /// Advance time by one tick.  Ages an unsettled layer-tap toward the
    /// tapping term.
    pub fn tick(&mut self, events: &mut dyn EventQueue) {
        self.ticks = self.ticks.wrapping_add(1);
        let timed_out = self.pending.as_mut().is_some_and(|pending| {
            pending.age = pending.age.saturating_add(1);
            pending.age >= TAPPING_TERM
        });
        if timed_out {
            if let Some(pending) = self.pending.take() {
                self.settle_hold(pending, events);
            }
        }
    }

    /// Handle a single key event.
    pub fn handle_event(&mut self, event: KeyEvent, events: &mut dyn EventQueue) {
        match event {
            KeyEvent::Press(code) => self.handle_press(code, events),
            KeyEvent::Release(code) => self.handle_release(code, events),
        }
    }

    /// Handle one encoder detent.  The encoder table is looked up on the
    /// highest active layer.
    pub fn handle_encoder(&mut self, encoder: usize, clockwise: bool, events: &mut dyn EventQueue) {
        if encoder >= NUM_ENCODERS {
            return;
        }
        let (ccw, cw) = ENCODER_MAP[self.highest_layer()][encoder];
        let action = if clockwise { cw } else { ccw };
        match action {
            Action::Key(code) => tap(events, Mods::empty(), code),
            Action::Shortcut(mods, code) => tap(events, mods, code),
            Action::Media(code) => {
                events.push(Event::Key(KeyAction::ConsumerPress(code)));
                events.push(Event::Key(KeyAction::ConsumerRelease));
            }
            Action::Backlight(cmd) => events.push(Event::Backlight(cmd)),
            Action::Wheel(mods, delta) => events.push(Event::Wheel { mods, delta }),
            _ => (),
        }
    }

    fn handle_press(&mut self, code: u8, events: &mut dyn EventQueue) {
        // A second key going down settles an undecided layer-tap as a hold
        // before anything else, so the new key already resolves on the
        // higher layer and survives the queue reset the change causes.
        if let Some(pending) = self.pending.take() {
            if pending.code == code {
                self.pending = Some(pending);
            } else {
                self.settle_hold(pending, events);
            }
        }

        self.queue.push(code, self.ticks);

        let action = keymap::resolve(self.layers, code);
        if action != Action::None {
            self.remember(code, action);
        }

        match action {
            Action::None | Action::Transparent => (),
            Action::Key(key) => {
                if self.down.insert(key) {
                    self.send_down(events);
                }
            }
            Action::Shortcut(mods, key) => {
                events.push(Event::Key(KeyAction::KeyPress(key, mods)));
            }
            Action::Media(code) => {
                events.push(Event::Key(KeyAction::ConsumerPress(code)));
            }
            Action::System(cmd) => events.push(Event::System(cmd)),
            Action::Backlight(cmd) => events.push(Event::Backlight(cmd)),
            Action::Momentary(layer) => self.layer_on(layer, events),
            Action::LayerTap(layer, tap) => {
                self.pending = Some(Pending {
                    code,
                    layer,
                    tap,
                    age: 0,
                });
            }
            Action::AltTab => {
                if !self.alt_tab_active {
                    self.alt_tab_active = true;
                    if self.down.insert(Keyboard::LeftAlt) {
                        self.send_down(events);
                    }
                }
                if self.down.insert(Keyboard::Tab) {
                    self.send_down(events);
                }
            }
            Action::DeskNext => tap(events, Mods::CONTROL | Mods::GUI, Keyboard::RightArrow),
            Action::DeskPrev => tap(events, Mods::CONTROL | Mods::GUI, Keyboard::LeftArrow),
            Action::Wheel(mods, delta) => events.push(Event::Wheel { mods, delta }),
        }
    }

    fn handle_release(&mut self, code: u8, events: &mut dyn EventQueue) {
        let action = self
            .forget(code)
            .unwrap_or_else(|| keymap::resolve(self.layers, code));

        match action {
            Action::None | Action::Transparent => (),
            Action::Key(key) => {
                if self.down.remove(&key) {
                    self.send_down(events);
                }
            }
            Action::Shortcut(..) => events.push(Event::Key(KeyAction::KeyRelease)),
            Action::Media(_) => events.push(Event::Key(KeyAction::ConsumerRelease)),
            Action::System(_) | Action::Backlight(_) | Action::Wheel(..) => (),
            Action::DeskNext | Action::DeskPrev => (),
            Action::Momentary(layer) => self.layer_off(layer, events),
            Action::LayerTap(layer, _) => {
                match self.pending.take() {
                    // Released before the term with nothing in between: a tap.
                    Some(pending) if pending.code == code => {
                        tap(events, Mods::empty(), pending.tap);
                    }
                    pending => {
                        self.pending = pending;
                        self.layer_off(layer, events);
                    }
                }
            }
            Action::AltTab => {
                // Only Tab comes back up; Alt stays until the layer changes.
                if self.down.remove(&Keyboard::Tab) {
                    self.send_down(events);
                }
            }
        }
    }

    fn settle_hold(&mut self, pending: Pending, events: &mut dyn EventQueue) {
        self.layer_on(pending.layer, events);
    }

    fn layer_on(&mut self, layer: usize, events: &mut dyn EventQueue) {
        if layer >= NUM_LAYERS {
            return;
        }
        let next = self.layers | 1 << layer;
        if next != self.layers {
            self.layers = next;
            self.layer_changed(events);
        }
    }

    fn layer_off(&mut self, layer: usize, events: &mut dyn EventQueue) {
        // Layer 0 is never removed.
        if layer == 0 || layer >= NUM_LAYERS {
            return;
        }
        let next = self.layers & !(1 << layer);
        if next != self.layers {
            self.layers = next;
            self.layer_changed(events);
        }
    }

    /// Runs on every change to the active layer set.
    fn layer_changed(&mut self, events: &mut dyn EventQueue) {
        self.queue.clear();
        if self.alt_tab_active {
            self.alt_tab_active = false;
            if self.down.remove(&Keyboard::LeftAlt) {
                self.send_down(events);
            }
        }
        info!("layer set: {}", self.layers);
        events.push(Event::Layer(self.layers));
    }

    fn highest_layer(&self) -> usize {
        (0..NUM_LAYERS)
            .rev()
            .find(|layer| self.layers & (1 << layer) != 0)
            .unwrap_or(0)
    }

    fn send_down(&self, events: &mut dyn EventQueue) {
        let keys: Vec<Keyboard> = self.down.iter().cloned().collect();
        events.push(Event::Key(KeyAction::KeySet(keys)));
    }

    fn remember(&mut self, code: u8, action: Action) {
        if self.held.iter().any(|held| held.code == code) {
            return;
        }
        let _ = self.held.try_push(HeldKey { code, action });
    }

    fn forget(&mut self, code: u8) -> Option<Action> {
        let idx = self.held.iter().position(|held| held.code == code)?;
        Some(self.held.swap_remove(idx).action)
    }
}

/// A press and release of a single key, modifiers held around it.
fn tap(events: &mut dyn EventQueue, mods: Mods, key: Keyboard) {
    events.push(Event::Key(KeyAction::KeyPress(key, mods)));
    events.push(Event::Key(KeyAction::KeyRelease));
}
