//! Hardware collaborators.
//!
//! Display, input, power controller, audio codec, text console and the
//! legacy-mode bridge are driven through these traits. Register-level work
//! stays on the other side; this crate only sequences the calls.

pub mod keys;

pub use keys::{ButtonMaps, ExtraKeys, Keys, LOGICAL_BUTTONS};

use crate::core::cartridge::SaveType;
use crate::core::error::Result;

/// Console model as reported by the power controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SystemModel {
    Old3ds = 0,
    Old3dsXl = 1,
    New3ds = 2,
    Old2ds = 3,
    New3dsXl = 4,
    New2dsXl = 5,
}

/// LCD panel selector for backlight control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lcd {
    Top,
    Bottom,
}

/// Audio route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioOutput {
    /// Follow headphone detection.
    #[default]
    Auto,
    Speakers,
    Headphones,
}

/// Vídeo e LCDs
pub trait Gfx {
    /// Block until the next top-LCD vertical blank.
    fn wait_for_vblank(&mut self);
    /// Envia o framebuffer do console
    fn flush_buffers(&mut self);
    /// Ajusta a luminância dos dois LCDs
    fn set_lcd_luminance(&mut self, luminance: u8);
    /// Liga o backlight de `lcd`
    fn power_on_backlight(&mut self, lcd: Lcd);
    /// Desliga o backlight de `lcd`
    fn power_off_backlight(&mut self, lcd: Lcd);
}

/// Entrada (botões)
pub trait Hid {
    /// Take one input sample. The getters below report that sample.
    fn scan_input(&mut self);
    /// Botões pressionados na última amostra
    fn keys_held(&self) -> Keys;
    /// Keys that went down since the previous sample.
    fn keys_down(&self) -> Keys;
    /// Botões fora da matriz (power, home, shell)
    fn extra_keys(&self) -> ExtraKeys;
}

/// Microcontrolador de energia
pub trait Mcu {
    /// Modelo do console
    fn system_model(&self) -> SystemModel;
}

/// Codec de áudio
pub trait Codec {
    /// Seleciona a saída de áudio
    fn set_audio_output(&mut self, output: AudioOutput);
    /// 127 disables the override.
    fn set_volume_override(&mut self, volume: i8);
    /// Verifica o fone e troca a saída se preciso
    fn run_headphone_detection(&mut self);
}

/// Bridge into the legacy compatibility hardware.
pub trait LgyBridge {
    /// Prepare the legacy side and its save backend. An empty `save_path`
    /// means no save file is opened or created.
    fn prepare_gba_mode(&mut self, direct_boot: bool, save_type: SaveType, save_path: &str)
        -> Result<()>;
    /// Start frame capture; arms the frame-ready signal.
    fn video_init(&mut self);
    /// Para a captura de vídeo
    fn video_exit(&mut self);
    /// Bit `i` set routes logical button `i` through [`LgyBridge::set_input_state`].
    fn select_input(&mut self, overrides: u16);
    /// Switch into legacy mode. Blocks until the switch completes.
    fn switch_mode(&mut self);
    /// Estado dos botões GBA já remapeados
    fn set_input_state(&mut self, pressed: u16);
    /// Block until the frame-ready signal is set.
    fn wait_frame_ready(&mut self);
    /// Limpa o sinal de frame pronto
    fn clear_frame_ready(&mut self);
    /// Libera a ponte
    fn deinit(&mut self);
}

/// Text console on the bottom screen.
pub trait Console {
    /// Escreve texto sem quebra de linha
    fn print(&mut self, text: &str);

    fn puts(&mut self, line: &str) {
        self.print(line);
        self.print("\n");
    }
}

/// Everything the boot pipeline and the runtime loop touch.
pub trait Hardware: Gfx + Hid + Mcu + Codec + LgyBridge + Console {}

impl<T: Gfx + Hid + Mcu + Codec + LgyBridge + Console> Hardware for T {}
