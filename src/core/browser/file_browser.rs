//! Interactive ROM browser.
//!
//! [`Navigator`] is the pure cursor/window arithmetic, [`FileBrowser`] the
//! state machine over a scanned directory, and [`browse_files`] the
//! frame-synchronised driver that feeds it one input sample per vblank.

use log::{debug, info};

use super::dir_list::{DirList, EntryKind};
use super::path::{path_append, pop_to_parent};
use super::scan::rescan_into;
use super::view::{self, CLEAR_SCREEN, SCREEN_ROWS};
use crate::core::error::{Error, Result};
use crate::core::fs::FileSystem;
use crate::core::hw::{Console, Gfx, Hid, Keys};

/// Cursor and top-of-page over a list of `len` entries.
///
/// Whenever `len > 0`: `window <= cursor < window + rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    cursor: usize,
    window: usize,
    len: usize,
    rows: usize,
}

impl Navigator {
    /// Cria um navegador para `len` entradas e `rows` linhas visíveis
    pub fn new(len: usize, rows: usize) -> Self {
        Self {
            cursor: 0,
            window: 0,
            len,
            rows: rows.max(1),
        }
    }

    /// Índice da entrada selecionada
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Primeira entrada visível
    pub fn window(&self) -> usize {
        self.window
    }

    /// Número de entradas
    pub fn len(&self) -> usize {
        self.len
    }

    /// Retorna se não há entradas
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Start over on a fresh listing.
    pub fn reset(&mut self, len: usize) {
        self.cursor = 0;
        self.window = 0;
        self.len = len;
    }

    /// Up one entry; wraps from the top to the last entry.
    pub fn step_up(&mut self) {
        if self.len == 0 {
            return;
        }
        self.cursor = (self.cursor + self.len - 1) % self.len;
    }

    /// Down one entry; wraps from the last entry to the top.
    pub fn step_down(&mut self) {
        if self.len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % self.len;
    }

    /// Back one page, stopping at the first entry.
    pub fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.rows);
    }

    /// Forward one page, stopping at the last entry.
    pub fn page_down(&mut self) {
        if self.len == 0 {
            return;
        }
        self.cursor = (self.cursor + self.rows).min(self.len - 1);
    }

    /// Apply the directional bits of one sample. Returns `true` when the
    /// window moved and the page has to be redrawn.
    pub fn apply(&mut self, down: Keys) -> bool {
        if self.len == 0 {
            return false;
        }
        if down.contains(Keys::DRIGHT) {
            self.page_down();
        }
        if down.contains(Keys::DLEFT) {
            self.page_up();
        }
        if down.contains(Keys::DUP) {
            self.step_up();
        }
        if down.contains(Keys::DDOWN) {
            self.step_down();
        }
        self.fit_window()
    }

    /// Smallest window shift that brings the cursor back on the page.
    fn fit_window(&mut self) -> bool {
        let old = self.window;
        if self.cursor < self.window {
            self.window = self.cursor;
        } else if self.cursor >= self.window + self.rows {
            self.window = self.cursor - (self.rows - 1);
        }
        self.window != old
    }

    /// 1-based screen row of `index` on the current page, if visible.
    pub fn row_of(&self, index: usize) -> Option<usize> {
        (index >= self.window && index < self.window + self.rows).then(|| index - self.window + 1)
    }
}

/// Browser states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserState {
    Browsing,
    /// A file was accepted. `last_dir` is the directory it was picked from.
    Selected { path: String, last_dir: String },
    Cancelled,
    Failed(Error),
}

/// Outcome of an interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseResult {
    Selected { path: String, last_dir: String },
    Cancelled,
}

/// State machine over one directory at a time.
pub struct FileBrowser {
    cur_dir: String,
    filter: String,
    list: Option<DirList>,
    nav: Navigator,
    old_cursor: usize,
    needs_redraw: bool,
    state: BrowserState,
}

impl FileBrowser {
    /// Scan `base_path` and start browsing it.
    pub fn open<F: FileSystem + ?Sized>(fs: &mut F, base_path: &str, filter: &str) -> Result<Self> {
        if base_path.is_empty() {
            return Err(Error::InvalidArgument);
        }
        let mut cur_dir = String::new();
        cur_dir.try_reserve_exact(base_path.len())?;
        cur_dir.push_str(base_path);

        let mut list = None;
        rescan_into(fs, &cur_dir, filter, &mut list)?;
        let len = list.as_ref().map_or(0, DirList::len);

        Ok(Self {
            cur_dir,
            filter: filter.to_string(),
            list,
            nav: Navigator::new(len, SCREEN_ROWS),
            old_cursor: 0,
            needs_redraw: true,
            state: BrowserState::Browsing,
        })
    }

    /// Estado atual
    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    /// Diretório sendo listado
    pub fn current_dir(&self) -> &str {
        &self.cur_dir
    }

    /// Cursor e janela
    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    /// Listagem atual, se houver
    pub fn list(&self) -> Option<&DirList> {
        self.list.as_ref()
    }

    /// Power key: leave immediately.
    pub fn cancel(&mut self) {
        if self.state == BrowserState::Browsing {
            self.state = BrowserState::Cancelled;
        }
    }

    /// Feed one non-empty key-down sample.
    pub fn handle_keys<F: FileSystem + ?Sized>(&mut self, fs: &mut F, down: Keys) {
        if self.state != BrowserState::Browsing {
            return;
        }
        if let Err(err) = self.step(fs, down) {
            debug!("browser failed in {}: {}", self.cur_dir, err);
            self.list = None;
            self.state = BrowserState::Failed(err);
        }
    }

    fn step<F: FileSystem + ?Sized>(&mut self, fs: &mut F, down: Keys) -> Result<()> {
        self.old_cursor = self.nav.cursor();
        if self.nav.apply(down) {
            self.needs_redraw = true;
        }

        if down.contains(Keys::A) {
            let Some(entry) = self.list.as_ref().and_then(|l| l.get(self.nav.cursor())) else {
                return Ok(());
            };
            let kind = entry.kind();
            let cur_dir = std::mem::take(&mut self.cur_dir);

            if kind == EntryKind::File {
                let mut last_dir = String::new();
                last_dir.try_reserve_exact(cur_dir.len())?;
                last_dir.push_str(&cur_dir);
                let path = path_append(cur_dir, entry.name())?;
                info!("selected {}", path);
                self.cur_dir = last_dir.clone();
                self.state = BrowserState::Selected { path, last_dir };
                return Ok(());
            }

            self.cur_dir = path_append(cur_dir, entry.name())?;
            self.rescan(fs)
        } else if down.contains(Keys::B) {
            if pop_to_parent(&mut self.cur_dir) {
                self.rescan(fs)
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }

    fn rescan<F: FileSystem + ?Sized>(&mut self, fs: &mut F) -> Result<()> {
        rescan_into(fs, &self.cur_dir, &self.filter, &mut self.list)?;
        self.nav.reset(self.list.as_ref().map_or(0, DirList::len));
        self.old_cursor = 0;
        self.needs_redraw = true;
        Ok(())
    }

    /// Bring the console up to date: the page when it changed, and the
    /// cursor glyph every time.
    pub fn draw<C: Console + ?Sized>(&mut self, con: &mut C) {
        if self.needs_redraw {
            if let Some(list) = self.list.as_ref() {
                view::show_dir_list(con, list, self.nav.window());
            }
            self.needs_redraw = false;
        }
        if let Some(row) = self.nav.row_of(self.old_cursor) {
            view::erase_cursor(con, row);
        }
        if let Some(row) = self.nav.row_of(self.nav.cursor()) {
            view::draw_cursor(con, row);
        }
        self.old_cursor = self.nav.cursor();
    }

    /// Final result once the browser left the `Browsing` state.
    pub fn finish(self) -> Result<BrowseResult> {
        match self.state {
            BrowserState::Selected { path, last_dir } => {
                Ok(BrowseResult::Selected { path, last_dir })
            }
            BrowserState::Cancelled | BrowserState::Browsing => Ok(BrowseResult::Cancelled),
            BrowserState::Failed(err) => Err(err),
        }
    }
}

/// Run the browser on `base_path` until a file is picked, the user powers
/// off, or something fails. Listing uses `filter` (normally `.gba`).
pub fn browse_files_filtered<F, H>(
    fs: &mut F,
    hw: &mut H,
    base_path: &str,
    filter: &str,
) -> Result<BrowseResult>
where
    F: FileSystem + ?Sized,
    H: Gfx + Hid + Console + ?Sized,
{
    let result = run_browser(fs, hw, base_path, filter);
    hw.print(CLEAR_SCREEN);
    result
}

fn run_browser<F, H>(fs: &mut F, hw: &mut H, base_path: &str, filter: &str) -> Result<BrowseResult>
where
    F: FileSystem + ?Sized,
    H: Gfx + Hid + Console + ?Sized,
{
    let mut browser = FileBrowser::open(fs, base_path, filter)?;

    while *browser.state() == BrowserState::Browsing {
        browser.draw(hw);
        hw.flush_buffers();

        match next_key_down(hw) {
            Some(down) => browser.handle_keys(fs, down),
            None => browser.cancel(),
        }
    }

    browser.finish()
}

/// Wait for the next sample with a key down. `None` on power.
fn next_key_down<H: Gfx + Hid + ?Sized>(hw: &mut H) -> Option<Keys> {
    loop {
        hw.wait_for_vblank();
        hw.scan_input();
        if hw.extra_keys().power() {
            return None;
        }
        let down = hw.keys_down();
        if !down.is_empty() {
            return Some(down);
        }
    }
}
