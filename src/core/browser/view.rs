//! Text rendering of a listing on the console.

use super::dir_list::{DirList, EntryKind};
use crate::core::hw::Console;

/// Visible rows per page.
pub const SCREEN_ROWS: usize = 24;

/// Usable columns. The console wraps after the last one, so one is left free.
pub const SCREEN_COLS: usize = 53 - 1;

/// Limpa o console
pub const CLEAR_SCREEN: &str = "\x1b[2J";
const FILE_COLOR: &str = "\x1b[37;1m";
const DIR_COLOR: &str = "\x1b[33;1m";
const CURSOR_COLOR: &str = "\x1b[37m";

fn clip(name: &str, max_chars: usize) -> &str {
    match name.char_indices().nth(max_chars) {
        Some((idx, _)) => &name[..idx],
        None => name,
    }
}

/// Clear the screen and print one page of `list` starting at `start`.
pub fn show_dir_list<C: Console + ?Sized>(con: &mut C, list: &DirList, start: usize) {
    con.print(CLEAR_SCREEN);

    let end = list.len().min(start + SCREEN_ROWS);
    for (row, entry) in list.entries()[start.min(end)..end].iter().enumerate() {
        let color = match entry.kind() {
            EntryKind::File => FILE_COLOR,
            EntryKind::Directory => DIR_COLOR,
        };
        // Column 1 is reserved for the cursor glyph.
        con.print(&format!(
            "\x1b[{};H{} {}",
            row + 1,
            color,
            clip(entry.name(), SCREEN_COLS)
        ));
    }
}

/// Blank the cursor glyph on a 1-based screen row.
pub fn erase_cursor<C: Console + ?Sized>(con: &mut C, row: usize) {
    con.print(&format!("\x1b[{};H ", row));
}

/// Desenha o cursor na linha `row` da página
pub fn draw_cursor<C: Console + ?Sized>(con: &mut C, row: usize) {
    con.print(&format!("\x1b[{};H{}>", row, CURSOR_COLOR));
}
