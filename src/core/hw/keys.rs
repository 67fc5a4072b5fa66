//! HID key masks.

use bitflags::bitflags;

bitflags! {
    /// Physical buttons as reported by the input sampler.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Keys: u32 {
        const A      = 1 << 0;
        const B      = 1 << 1;
        const SELECT = 1 << 2;
        const START  = 1 << 3;
        const DRIGHT = 1 << 4;
        const DLEFT  = 1 << 5;
        const DUP    = 1 << 6;
        const DDOWN  = 1 << 7;
        const R      = 1 << 8;
        const L      = 1 << 9;
        const X      = 1 << 10;
        const Y      = 1 << 11;
        const ZL     = 1 << 14;
        const ZR     = 1 << 15;
        const TOUCH  = 1 << 20;
        const CSTICK_RIGHT = 1 << 24;
        const CSTICK_LEFT  = 1 << 25;
        const CSTICK_UP    = 1 << 26;
        const CSTICK_DOWN  = 1 << 27;
        const CPAD_RIGHT   = 1 << 28;
        const CPAD_LEFT    = 1 << 29;
        const CPAD_UP      = 1 << 30;
        const CPAD_DOWN    = 1 << 31;
    }
}

bitflags! {
    /// Keys routed through the power controller instead of the HID block.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ExtraKeys: u32 {
        const HOME       = 1 << 0;
        const POWER      = 1 << 1;
        const POWER_HELD = 1 << 2;
        const HOME_HELD  = 1 << 3;
        const SHELL      = 1 << 4;
    }
}

impl ExtraKeys {
    /// Power pressed or held: the user wants out.
    pub fn power(self) -> bool {
        self.intersects(ExtraKeys::POWER | ExtraKeys::POWER_HELD)
    }
}

/// Number of logical buttons on the legacy pad
/// (A, B, Select, Start, Right, Left, Up, Down, R, L).
pub const LOGICAL_BUTTONS: usize = 10;

/// Physical keys bound to each logical button. An empty mask keeps the
/// native mapping for that button.
pub type ButtonMaps = [Keys; LOGICAL_BUTTONS];

/// Bit `i` set when logical button `i` is remapped.
pub fn override_mask(maps: &ButtonMaps) -> u16 {
    maps.iter()
        .enumerate()
        .filter(|(_, m)| !m.is_empty())
        .fold(0u16, |acc, (i, _)| acc | (1 << i))
}

/// Bit `i` set when any physical key bound to logical button `i` is held.
pub fn translate_held(maps: &ButtonMaps, held: Keys) -> u16 {
    maps.iter()
        .enumerate()
        .filter(|(_, m)| m.intersects(held))
        .fold(0u16, |acc, (i, _)| acc | (1 << i))
}
