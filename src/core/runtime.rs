//! Loop de execução no modo GBA.
//!
//! After hand-off the firmware only forwards remapped input, watches the
//! headphone jack and the backlight hot-keys, and paces itself on the
//! bridge's frame-ready signal.

use cfg_if::cfg_if;
use log::{debug, info};

use crate::core::config::OafConfig;
use crate::core::hw::{keys, Hardware, Keys, Lcd, SystemModel};

cfg_if! {
    if #[cfg(debug_assertions)] {
        /// Debug builds keep the bottom panel lit: on a 2DS that is the only one.
        const BOTTOM_LCD_TOGGLE: bool = false;
    } else {
        const BOTTOM_LCD_TOGGLE: bool = true;
    }
}

const BRIGHTER: Keys = Keys::X.union(Keys::DUP);
const DIMMER: Keys = Keys::X.union(Keys::DDOWN);
const BACKLIGHT_OFF: Keys = Keys::X.union(Keys::DLEFT);
const BACKLIGHT_ON: Keys = Keys::X.union(Keys::DRIGHT);

/// Luminance limits `(min, max)` for `model`.
pub fn backlight_range(model: SystemModel) -> (u8, u8) {
    if model >= SystemModel::New3dsXl {
        (16, 142)
    } else {
        (20, 117)
    }
}

/// Panel whose backlight the power hot-keys switch.
pub fn toggle_lcd(model: SystemModel) -> Lcd {
    if model == SystemModel::Old2ds {
        Lcd::Bottom
    } else {
        Lcd::Top
    }
}

/// Per-frame work after the switch into legacy mode.
#[derive(Debug, Clone)]
pub struct RuntimeTickLoop {
    config: OafConfig,
    backlight_on: bool,
}

impl RuntimeTickLoop {
    /// Cria o loop com a config do jogo; backlight começa ligado
    pub fn new(config: OafConfig) -> Self {
        Self {
            config,
            backlight_on: true,
        }
    }

    /// Config em uso
    pub fn config(&self) -> &OafConfig {
        &self.config
    }

    /// Luminância atual do LCD
    pub fn backlight(&self) -> u8 {
        self.config.backlight
    }

    /// Retorna se o backlight está ligado
    pub fn backlight_on(&self) -> bool {
        self.backlight_on
    }

    /// Tick until the power key is pressed or held.
    pub fn run<H: Hardware + ?Sized>(&mut self, hw: &mut H) {
        info!("runtime loop started");
        loop {
            hw.scan_input();
            if hw.extra_keys().power() {
                break;
            }
            self.tick(hw);
        }
        info!("runtime loop stopped");
    }

    /// One frame. Input must already be sampled for this frame.
    pub fn tick<H: Hardware + ?Sized>(&mut self, hw: &mut H) {
        let pressed = keys::translate_held(&self.config.button_maps, hw.keys_held());
        hw.set_input_state(pressed);

        hw.run_headphone_detection();
        self.update_backlight(hw);

        // Clear only after it was seen, or the next frame's edge is lost.
        hw.wait_frame_ready();
        hw.clear_frame_ready();
    }

    fn update_backlight<H: Hardware + ?Sized>(&mut self, hw: &mut H) {
        let held = hw.keys_held();
        if hw.keys_down().is_empty() || held.is_empty() {
            return;
        }

        let steps = i16::from(self.config.backlight_steps);
        if held == BRIGHTER {
            self.change_backlight(hw, steps);
        }
        if held == DIMMER {
            self.change_backlight(hw, -steps);
        }

        let lcd = toggle_lcd(hw.system_model());
        if lcd == Lcd::Bottom && !BOTTOM_LCD_TOGGLE {
            return;
        }
        if self.backlight_on && held == BACKLIGHT_OFF {
            self.backlight_on = false;
            hw.power_off_backlight(lcd);
        }
        if !self.backlight_on && held == BACKLIGHT_ON {
            self.backlight_on = true;
            hw.power_on_backlight(lcd);
        }
    }

    fn change_backlight<H: Hardware + ?Sized>(&mut self, hw: &mut H, amount: i16) {
        let (min, max) = backlight_range(hw.system_model());
        let value = num_traits::clamp(
            i16::from(self.config.backlight) + amount,
            i16::from(min),
            i16::from(max),
        );
        // Clamped into a u8 range above.
        self.config.backlight = value as u8;
        hw.set_lcd_luminance(self.config.backlight);
        debug!("backlight: {}", self.config.backlight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hw::Hid;
    use crate::core::testing::{MockHw, Sample};

    fn maps() -> OafConfig {
        let mut cfg = OafConfig::default();
        cfg.button_maps[0] = Keys::A | Keys::Y;
        cfg.button_maps[1] = Keys::B;
        cfg.button_maps[9] = Keys::ZL;
        cfg
    }

    #[test]
    fn test_backlight_ranges() {
        assert_eq!(backlight_range(SystemModel::Old3ds), (20, 117));
        assert_eq!(backlight_range(SystemModel::Old2ds), (20, 117));
        assert_eq!(backlight_range(SystemModel::New3dsXl), (16, 142));
        assert_eq!(backlight_range(SystemModel::New2dsXl), (16, 142));
    }

    #[test]
    fn test_tick_order_and_input() {
        let mut hw = MockHw::with_script([Sample::hold(Keys::Y | Keys::ZL, Keys::empty())]);
        hw.scan_input();
        let mut rt = RuntimeTickLoop::new(maps());
        rt.tick(&mut hw);
        assert_eq!(hw.input_states, [0b10_0000_0001]);
        assert_eq!(
            hw.calls,
            ["scan", "input_state", "headphone", "wait_frame", "clear_frame"]
        );
    }

    #[test]
    fn test_backlight_steps_clamp() {
        let mut hw = MockHw::with_script([]);
        hw.model = SystemModel::Old3ds;
        let mut cfg = OafConfig::default();
        cfg.backlight = 112;
        let mut rt = RuntimeTickLoop::new(cfg);

        hw.set_sample(Sample::press(Keys::X | Keys::DUP));
        rt.tick(&mut hw);
        assert_eq!(rt.backlight(), 117);
        assert_eq!(hw.luminance, Some(117));

        hw.set_sample(Sample::hold(Keys::X | Keys::DDOWN, Keys::DDOWN));
        for _ in 0..30 {
            rt.tick(&mut hw);
        }
        assert_eq!(rt.backlight(), 20);
    }

    #[test]
    fn test_hotkeys_need_exact_combo_and_new_press() {
        let mut hw = MockHw::with_script([]);
        let mut rt = RuntimeTickLoop::new(OafConfig::default());

        hw.set_sample(Sample::press(Keys::X | Keys::DUP | Keys::A));
        rt.tick(&mut hw);
        hw.set_sample(Sample::hold(Keys::X | Keys::DUP, Keys::empty()));
        rt.tick(&mut hw);
        assert_eq!(rt.backlight(), 64);
        assert_eq!(hw.luminance, None);
    }

    #[test]
    fn test_backlight_toggle_top_lcd() {
        let mut hw = MockHw::with_script([]);
        hw.model = SystemModel::New3ds;
        let mut rt = RuntimeTickLoop::new(OafConfig::default());

        hw.set_sample(Sample::press(Keys::X | Keys::DLEFT));
        rt.tick(&mut hw);
        rt.tick(&mut hw);
        assert!(!rt.backlight_on());
        assert_eq!(hw.count("bl_off"), 1);
        assert_eq!(hw.backlight_events, [(Lcd::Top, false)]);

        hw.set_sample(Sample::press(Keys::X | Keys::DRIGHT));
        rt.tick(&mut hw);
        assert!(rt.backlight_on());
        assert_eq!(hw.backlight_events, [(Lcd::Top, false), (Lcd::Top, true)]);
    }

    #[test]
    fn test_backlight_toggle_on_2ds() {
        let mut hw = MockHw::with_script([]);
        hw.model = SystemModel::Old2ds;
        let mut rt = RuntimeTickLoop::new(OafConfig::default());

        hw.set_sample(Sample::press(Keys::X | Keys::DLEFT));
        rt.tick(&mut hw);
        if BOTTOM_LCD_TOGGLE {
            assert_eq!(hw.backlight_events, [(Lcd::Bottom, false)]);
        } else {
            assert!(hw.backlight_events.is_empty());
            assert!(rt.backlight_on());
        }
    }

    #[test]
    fn test_run_stops_on_power() {
        let mut hw = MockHw::with_script([
            Sample::idle(),
            Sample::hold(Keys::B, Keys::B),
            Sample::idle().with_power(),
            Sample::idle(),
        ]);
        let mut rt = RuntimeTickLoop::new(maps());
        rt.run(&mut hw);
        assert_eq!(hw.count("wait_frame"), 2);
        assert_eq!(hw.input_states, [0, 0b10]);
    }
}
