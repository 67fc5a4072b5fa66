// open-agb-rs/src/core/boot/mod.rs

//! Sequência de boot: caminho da ROM, carga, config por jogo, save, hand-off.
//!
//! [`BootOrchestrator`] owns the resolved configuration and the collaborators
//! that are not hardware (ini parser, save database, patcher). Filesystem and
//! hardware are passed in per call.

pub mod game_config;
pub mod records;

pub use game_config::game_config_path;
pub use records::{load_path_record, store_path_record, AUTOBOOT_RECORD, LASTDIR_RECORD};

use log::{debug, error, info, warn};

use crate::core::browser::{browse_files, BrowseResult};
use crate::core::cartridge::{
    resolve_save_type, save_path_for, NoDatabase, NoPatches, RomImage, RomLoader, RomPatcher,
    SaveDatabase, SaveType, SaveTypeSource,
};
use crate::core::config::{ConfigParser, OafConfig};
use crate::core::error::{Error, Result};
use crate::core::fs::{FileSystem, FsError};
use crate::core::hw::{keys, Console, Gfx, Hardware, Hid, LgyBridge};
use crate::core::runtime::RuntimeTickLoop;
use crate::core::{SAVE_DIR, SCREENSHOT_DIR, SDMC_ROOT, WORK_DIR};

/// Global config file in the work directory.
pub const CONFIG_FILE: &str = "config.ini";

const TOO_BIG_WARNING: &str = "Warning: ROM file is too big. Expect crashes.";
const LOADING: &str = "Loading...";

/// What was booted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootInfo {
    pub rom_path: String,
    /// Logical ROM size after padding and patching.
    pub rom_size: usize,
    pub save_type: SaveType,
    pub save_type_source: SaveTypeSource,
    /// Empty when saving is disabled.
    pub save_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootOutcome {
    /// The bridge switched into legacy mode.
    Started(BootInfo),
    /// The user left the browser without picking a ROM.
    Aborted,
}

/// Boot pipeline.
pub struct BootOrchestrator {
    /// Só o `config.ini` global; cada tentativa de boot parte de uma cópia.
    config: OafConfig,
    /// Config do jogo em execução, gravada depois do hand-off.
    session: Option<OafConfig>,
    parser: Box<dyn ConfigParser>,
    database: Box<dyn SaveDatabase>,
    patcher: Box<dyn RomPatcher>,
    loader: RomLoader,
    image: Option<RomImage>,
}

impl BootOrchestrator {
    /// Orchestrator with an empty save database and no patches.
    pub fn new(parser: Box<dyn ConfigParser>) -> Self {
        Self::with_collaborators(parser, Box::new(NoDatabase), Box::new(NoPatches))
    }

    /// Cria o orquestrador com banco de saves e patcher próprios
    pub fn with_collaborators(
        parser: Box<dyn ConfigParser>,
        database: Box<dyn SaveDatabase>,
        patcher: Box<dyn RomPatcher>,
    ) -> Self {
        Self {
            config: OafConfig::default(),
            session: None,
            parser,
            database,
            patcher,
            loader: RomLoader::new(),
            image: None,
        }
    }

    /// Use `loader` instead of the full-window default.
    pub fn with_loader(mut self, loader: RomLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Config global, sem nenhum ini de jogo aplicado.
    pub fn config(&self) -> &OafConfig {
        &self.config
    }

    /// Acesso mutável à config global
    pub fn config_mut(&mut self) -> &mut OafConfig {
        &mut self.config
    }

    /// Config efetiva do jogo iniciado pelo último boot bem-sucedido.
    pub fn session_config(&self) -> Option<&OafConfig> {
        self.session.as_ref()
    }

    /// Staged ROM, once [`BootOrchestrator::boot`] got that far.
    pub fn image(&self) -> Option<&RomImage> {
        self.image.as_ref()
    }

    /// Create and enter the work directory, then read the global config.
    pub fn prepare_work_dir<F: FileSystem + ?Sized>(&mut self, fs: &mut F) -> Result<()> {
        tolerate_exist(fs.make_path(WORK_DIR))?;
        fs.change_dir(WORK_DIR)?;
        tolerate_exist(fs.make_dir(SAVE_DIR))?;
        tolerate_exist(fs.make_dir(SCREENSHOT_DIR))?;

        match self.parser.parse(CONFIG_FILE, &mut self.config, true) {
            Err(Error::NotFound) => {
                debug!("{} not found, using defaults", CONFIG_FILE);
                Ok(())
            }
            other => other,
        }
    }

    /// Run one boot attempt up to the mode switch.
    pub fn boot<F, H>(&mut self, fs: &mut F, hw: &mut H) -> Result<BootOutcome>
    where
        F: FileSystem + ?Sized,
        H: Hardware + ?Sized,
    {
        self.try_boot(fs, hw).map_err(|err| {
            error!("boot failed: {}", err);
            err
        })
    }

    fn try_boot<F, H>(&mut self, fs: &mut F, hw: &mut H) -> Result<BootOutcome>
    where
        F: FileSystem + ?Sized,
        H: Hardware + ?Sized,
    {
        self.session = None;
        let rom_path = match load_path_record(fs, AUTOBOOT_RECORD) {
            Ok(path) if path.is_empty() => return Err(Error::InvalidArgument),
            Ok(path) => {
                info!("autoboot: {}", path);
                path
            }
            Err(Error::NotFound) => match self.select_rom(fs, hw)? {
                Some(path) => {
                    hw.puts(LOADING);
                    path
                }
                None => {
                    info!("boot aborted by user");
                    return Ok(BootOutcome::Aborted);
                }
            },
            Err(err) => return Err(err),
        };

        let mut image = match self.image.take() {
            Some(image) if image.window() >= self.loader.window() => image,
            _ => self.loader.alloc_image()?,
        };
        let staged = self.loader.stage(fs, &rom_path, &mut image)?;
        if staged.truncated {
            hw.puts(TOO_BIG_WARNING);
        }

        let mut config = self.config.clone();
        let cfg_path = game_config_path(&rom_path, config.use_saves_folder);
        match self.parser.parse(&cfg_path, &mut config, false) {
            Ok(()) => info!("per-game config: {}", cfg_path),
            Err(Error::NotFound) => debug!("no per-game config at {}", cfg_path),
            Err(err) => return Err(err),
        }

        let save_path = save_path_for(&cfg_path, config.save_slot);
        let (save_type, save_type_source) =
            resolve_save_type(&config, image.rom(), &save_path, self.database.as_ref());

        if let Err(err) = self.patcher.patch(&rom_path, &mut image) {
            warn!("patching {} failed: {}", rom_path, err);
        }
        let rom_size = image.size();
        self.image = Some(image);

        hw.set_audio_output(config.audio_out);
        hw.set_volume_override(config.volume);

        hw.prepare_gba_mode(config.direct_boot, save_type, &save_path)?;
        hw.video_init();
        hw.select_input(keys::override_mask(&config.button_maps));
        // Start capture in step with the LCD.
        hw.wait_for_vblank();
        hw.switch_mode();
        info!("legacy mode running: {} ({})", rom_path, save_type);
        self.session = Some(config);

        Ok(BootOutcome::Started(BootInfo {
            rom_path,
            rom_size,
            save_type,
            save_type_source,
            save_path,
        }))
    }

    /// Browse for a ROM starting in the last used directory. `None` when the
    /// user backs out.
    pub fn select_rom<F, H>(&mut self, fs: &mut F, hw: &mut H) -> Result<Option<String>>
    where
        F: FileSystem + ?Sized,
        H: Gfx + Hid + Console + ?Sized,
    {
        let start = match load_path_record(fs, LASTDIR_RECORD) {
            Ok(dir) if !dir.is_empty() => dir,
            Ok(_) | Err(Error::NotFound) => SDMC_ROOT.to_string(),
            Err(err) => return Err(err),
        };

        let result = match browse_files(fs, hw, &start) {
            Err(Error::NoUsablePath) => {
                warn!("{} is gone, browsing {}", start, SDMC_ROOT);
                browse_files(fs, hw, SDMC_ROOT)?
            }
            other => other?,
        };

        match result {
            BrowseResult::Selected { path, last_dir } if !path.is_empty() => {
                store_path_record(fs, LASTDIR_RECORD, &last_dir)?;
                Ok(Some(path))
            }
            _ => Ok(None),
        }
    }

    /// Per-frame loop for the session that was just booted. Falls back to
    /// the global config when nothing is running.
    pub fn runtime(&self) -> RuntimeTickLoop {
        RuntimeTickLoop::new(self.session.as_ref().unwrap_or(&self.config).clone())
    }

    /// Tear the session down: stop capture, release the bridge.
    pub fn finish<H: LgyBridge + ?Sized>(&mut self, hw: &mut H) {
        hw.video_exit();
        hw.deinit();
        self.image = None;
        self.session = None;
    }
}

/// `Exist` não é erro ao criar diretórios
fn tolerate_exist(res: std::result::Result<(), FsError>) -> Result<()> {
    match res {
        Ok(()) | Err(FsError::Exist) => Ok(()),
        Err(err) => Err(err.into()),
    }
}
