//! Growable, sorted directory listing.

use std::cmp::Ordering;

use crate::core::error::Result;

/// Initial capacity and growth step of a [`DirList`].
pub const DLIST_GROW_SIZE: usize = 128;

/// Entry kind. Directories sort before files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryKind {
    Directory,
    File,
}

/// One listed child. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    kind: EntryKind,
    name: String,
}

impl DirEntry {
    /// Cria uma entrada
    pub fn new(kind: EntryKind, name: String) -> Self {
        Self { kind, name }
    }

    /// Tipo da entrada
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Nome sem o caminho
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Retorna se é diretório
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Listing order: directories first, then byte-wise by name.
pub fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.kind
        .cmp(&b.kind)
        .then_with(|| a.name.as_bytes().cmp(b.name.as_bytes()))
}

/// Directory store with a capacity that grows in fixed steps.
///
/// `capacity` is the logical capacity (initial + k * step); the backing
/// allocation is reserved up front so a full store never reallocates behind
/// the caller's back.
#[derive(Debug)]
pub struct DirList {
    entries: Vec<DirEntry>,
    capacity: usize,
    step: usize,
}

impl DirList {
    /// Cria uma lista vazia com a capacidade padrão
    pub fn new() -> Result<Self> {
        Self::with_growth(DLIST_GROW_SIZE, DLIST_GROW_SIZE)
    }

    /// Cria uma lista com capacidade inicial e passo de crescimento próprios
    pub fn with_growth(initial: usize, step: usize) -> Result<Self> {
        let mut entries = Vec::new();
        entries.try_reserve_exact(initial)?;
        Ok(Self {
            entries,
            capacity: initial,
            step: step.max(1),
        })
    }

    /// Número de entradas
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Retorna se a lista está vazia
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Capacidade lógica atual
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retorna se o próximo push exige `grow`
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Entrada no índice
    pub fn get(&self, index: usize) -> Option<&DirEntry> {
        self.entries.get(index)
    }

    /// Todas as entradas
    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    /// Itera sobre as entradas
    pub fn iter(&self) -> std::slice::Iter<'_, DirEntry> {
        self.entries.iter()
    }

    /// Raise capacity by one step, keeping every entry in order.
    ///
    /// Takes the store by value: on allocation failure the original store is
    /// dropped before the error is returned, so nothing can keep using it.
    pub fn grow(mut self) -> Result<Self> {
        let new_capacity = self.capacity + self.step;
        let additional = new_capacity - self.entries.len();
        self.entries.try_reserve_exact(additional)?;
        self.capacity = new_capacity;
        Ok(self)
    }

    /// Append an entry. The store must not be full; call [`DirList::grow`] first.
    pub fn push(&mut self, entry: DirEntry) {
        debug_assert!(!self.is_full(), "push into a full DirList");
        self.entries.push(entry);
    }

    /// Ordena: diretórios primeiro, depois nome byte a byte
    pub fn sort(&mut self) {
        self.entries.sort_unstable_by(compare_entries);
    }
}
