//! Scripted hardware and collaborator stubs for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::core::cartridge::{RomImage, RomPatcher, SaveDatabase, SaveType};
use crate::core::config::{ConfigParser, OafConfig};
use crate::core::error::{Error, Result};
use crate::core::fs::{FileAttr, FileInfo, FileSystem, FsError, FsResult, OpenMode};
use crate::core::hw::{
    AudioOutput, Codec, Console, ExtraKeys, Gfx, Hid, Keys, Lcd, LgyBridge, Mcu, SystemModel,
};

/// One input sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Sample {
    pub held: Keys,
    pub down: Keys,
    pub extra: ExtraKeys,
}

impl Sample {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Keys that went down this sample and are still held.
    pub fn press(keys: Keys) -> Self {
        Self::hold(keys, keys)
    }

    pub fn hold(held: Keys, down: Keys) -> Self {
        Self {
            held,
            down,
            extra: ExtraKeys::empty(),
        }
    }

    pub fn with_power(mut self) -> Self {
        self.extra |= ExtraKeys::POWER;
        self
    }
}

/// Records every hardware call. Once the script runs out every sample
/// reports the power key, so loops under test always terminate.
pub(crate) struct MockHw {
    script: VecDeque<Sample>,
    current: Sample,
    pub model: SystemModel,
    pub console: String,
    pub calls: Vec<&'static str>,
    pub luminance: Option<u8>,
    pub backlight_events: Vec<(Lcd, bool)>,
    pub input_states: Vec<u16>,
    pub audio: Option<(AudioOutput, i8)>,
    pub prepared: Option<(bool, SaveType, String)>,
    pub overrides: Option<u16>,
    pub prepare_error: Option<Error>,
}

impl Default for MockHw {
    fn default() -> Self {
        Self {
            script: VecDeque::new(),
            current: Sample::default(),
            model: SystemModel::Old3ds,
            console: String::new(),
            calls: Vec::new(),
            luminance: None,
            backlight_events: Vec::new(),
            input_states: Vec::new(),
            audio: None,
            prepared: None,
            overrides: None,
            prepare_error: None,
        }
    }
}

impl MockHw {
    pub fn with_script<I: IntoIterator<Item = Sample>>(script: I) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Replace the current sample without going through `scan_input`.
    pub fn set_sample(&mut self, sample: Sample) {
        self.current = sample;
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    /// Position of the first `call` in the log.
    pub fn first(&self, call: &str) -> Option<usize> {
        self.calls.iter().position(|c| *c == call)
    }
}

impl Gfx for MockHw {
    fn wait_for_vblank(&mut self) {
        self.calls.push("vblank");
    }

    fn flush_buffers(&mut self) {
        self.calls.push("flush");
    }

    fn set_lcd_luminance(&mut self, luminance: u8) {
        self.calls.push("luminance");
        self.luminance = Some(luminance);
    }

    fn power_on_backlight(&mut self, lcd: Lcd) {
        self.calls.push("bl_on");
        self.backlight_events.push((lcd, true));
    }

    fn power_off_backlight(&mut self, lcd: Lcd) {
        self.calls.push("bl_off");
        self.backlight_events.push((lcd, false));
    }
}

impl Hid for MockHw {
    fn scan_input(&mut self) {
        self.calls.push("scan");
        self.current = self
            .script
            .pop_front()
            .unwrap_or_else(|| Sample::idle().with_power());
    }

    fn keys_held(&self) -> Keys {
        self.current.held
    }

    fn keys_down(&self) -> Keys {
        self.current.down
    }

    fn extra_keys(&self) -> ExtraKeys {
        self.current.extra
    }
}

impl Mcu for MockHw {
    fn system_model(&self) -> SystemModel {
        self.model
    }
}

impl Codec for MockHw {
    fn set_audio_output(&mut self, output: AudioOutput) {
        self.calls.push("audio");
        self.audio = Some((output, self.audio.map_or(127, |a| a.1)));
    }

    fn set_volume_override(&mut self, volume: i8) {
        self.calls.push("volume");
        let output = self.audio.map_or(AudioOutput::Auto, |a| a.0);
        self.audio = Some((output, volume));
    }

    fn run_headphone_detection(&mut self) {
        self.calls.push("headphone");
    }
}

impl LgyBridge for MockHw {
    fn prepare_gba_mode(
        &mut self,
        direct_boot: bool,
        save_type: SaveType,
        save_path: &str,
    ) -> Result<()> {
        self.calls.push("prepare");
        if let Some(err) = self.prepare_error.clone() {
            return Err(err);
        }
        self.prepared = Some((direct_boot, save_type, save_path.to_string()));
        Ok(())
    }

    fn video_init(&mut self) {
        self.calls.push("video_init");
    }

    fn video_exit(&mut self) {
        self.calls.push("video_exit");
    }

    fn select_input(&mut self, overrides: u16) {
        self.calls.push("select_input");
        self.overrides = Some(overrides);
    }

    fn switch_mode(&mut self) {
        self.calls.push("switch_mode");
    }

    fn set_input_state(&mut self, pressed: u16) {
        self.calls.push("input_state");
        self.input_states.push(pressed);
    }

    fn wait_frame_ready(&mut self) {
        self.calls.push("wait_frame");
    }

    fn clear_frame_ready(&mut self) {
        self.calls.push("clear_frame");
    }

    fn deinit(&mut self) {
        self.calls.push("deinit");
    }
}

impl Console for MockHw {
    fn print(&mut self, text: &str) {
        self.console.push_str(text);
    }
}

type Overlay = Box<dyn Fn(&mut OafConfig)>;

/// Ini parser that knows a fixed set of files.
#[derive(Default)]
pub(crate) struct StubParser {
    pub seen: Rc<RefCell<Vec<(String, bool)>>>,
    files: Vec<(String, Overlay)>,
    failing: Vec<(String, Error)>,
}

impl StubParser {
    pub fn with_file<F: Fn(&mut OafConfig) + 'static>(mut self, path: &str, overlay: F) -> Self {
        self.files.push((path.to_string(), Box::new(overlay)));
        self
    }

    pub fn failing(mut self, path: &str, err: Error) -> Self {
        self.failing.push((path.to_string(), err));
        self
    }
}

impl ConfigParser for StubParser {
    fn parse(&mut self, path: &str, config: &mut OafConfig, early: bool) -> Result<()> {
        self.seen.borrow_mut().push((path.to_string(), early));
        if let Some((_, err)) = self.failing.iter().find(|(p, _)| p == path) {
            return Err(err.clone());
        }
        match self.files.iter().find(|(p, _)| p == path) {
            Some((_, overlay)) => {
                overlay(config);
                Ok(())
            }
            None => Err(Error::NotFound),
        }
    }
}

/// Database with a single answer; records `(rom length, save path)`.
pub(crate) struct StubDatabase {
    pub answer: SaveType,
    pub lookups: Rc<RefCell<Vec<(usize, String)>>>,
}

impl StubDatabase {
    pub fn new(answer: SaveType) -> Self {
        Self {
            answer,
            lookups: Rc::default(),
        }
    }
}

impl SaveDatabase for StubDatabase {
    fn lookup(&self, rom: &[u8], save_path: &str, _config: &OafConfig) -> SaveType {
        self.lookups.borrow_mut().push((rom.len(), save_path.to_string()));
        self.answer
    }
}

/// Patcher that records its calls and can be told to fail.
#[derive(Default)]
pub(crate) struct StubPatcher {
    pub calls: Rc<RefCell<Vec<String>>>,
    pub fail: bool,
}

impl RomPatcher for StubPatcher {
    fn patch(&mut self, rom_path: &str, _image: &mut RomImage) -> Result<()> {
        self.calls.borrow_mut().push(rom_path.to_string());
        if self.fail {
            Err(Error::Fs(FsError::Disk))
        } else {
            Ok(())
        }
    }
}

/// Cursor de um diretório aberto em [`ScriptedFs`].
pub(crate) struct ScriptedDir {
    pos: usize,
    batch: usize,
}

/// In-memory listing whose reads can be told to fail. Counts every open and
/// close of a directory handle.
#[derive(Default)]
pub(crate) struct ScriptedFs {
    entries: Vec<FileInfo>,
    /// `read_dir` returns this error on the given batch (0-based).
    fail_on: Option<(usize, FsError)>,
    pub dir_opens: usize,
    pub dir_closes: usize,
}

impl ScriptedFs {
    pub fn with_files(names: &[&str]) -> Self {
        let entries = names
            .iter()
            .map(|name| FileInfo {
                name: name.to_string(),
                size: 1,
                attrib: FileAttr::ARCHIVE,
            })
            .collect();
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn failing_on_batch(mut self, batch: usize, err: FsError) -> Self {
        self.fail_on = Some((batch, err));
        self
    }

    pub fn open_dirs(&self) -> usize {
        self.dir_opens - self.dir_closes
    }
}

impl FileSystem for ScriptedFs {
    type Dir = ScriptedDir;
    type File = ();

    fn open_dir(&mut self, _path: &str) -> FsResult<ScriptedDir> {
        self.dir_opens += 1;
        Ok(ScriptedDir { pos: 0, batch: 0 })
    }

    fn read_dir(
        &mut self,
        dir: &mut ScriptedDir,
        out: &mut Vec<FileInfo>,
        max: usize,
    ) -> FsResult<()> {
        out.clear();
        if let Some((batch, err)) = self.fail_on {
            if batch == dir.batch {
                return Err(err);
            }
        }
        dir.batch += 1;
        let end = (dir.pos + max).min(self.entries.len());
        out.extend_from_slice(&self.entries[dir.pos..end]);
        dir.pos = end;
        Ok(())
    }

    fn close_dir(&mut self, _dir: ScriptedDir) {
        self.dir_closes += 1;
    }

    fn open(&mut self, _path: &str, _mode: OpenMode) -> FsResult<()> {
        Err(FsError::NoFile)
    }

    fn size(&self, _file: &()) -> u64 {
        0
    }

    fn read(&mut self, _file: &mut (), _buf: &mut [u8]) -> FsResult<usize> {
        Ok(0)
    }

    fn close(&mut self, _file: ()) {}

    fn make_dir(&mut self, _path: &str) -> FsResult<()> {
        Err(FsError::Denied)
    }

    fn make_path(&mut self, _path: &str) -> FsResult<()> {
        Err(FsError::Denied)
    }

    fn change_dir(&mut self, _path: &str) -> FsResult<()> {
        Err(FsError::NoPath)
    }

    fn quick_write(&mut self, _path: &str, _data: &[u8]) -> FsResult<()> {
        Err(FsError::Denied)
    }
}
