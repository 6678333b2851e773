use std::collections::BTreeMap;

/// Marks fallback symbols. Never part of the pool.
pub const FALLBACK_PREFIX: char = '~';

/// Single-character symbols in assignment order. `|`, `=` and `~` are
/// structural and never appear here.
pub const SYMBOL_POOL: [char; 85] = [
    '!', '@', '#', '$', '%', '&', '*', '+', '-', '/', ':', ';', '<', '>', '?', '[', ']', '{', '}',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    '^', '(', ')', '_',
];

/// Bijection between surface strings and symbols for one encode call.
///
/// `SymbolTable::new()` is the reset: a table is never carried from one
/// call to the next.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    by_surface: BTreeMap<String, String>,
    by_symbol: BTreeMap<String, String>,
    pool_index: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbol for `surface`, assigning the next free one first
    /// if needed.
    pub fn intern(&mut self, surface: &str) -> &str {
        if !self.by_surface.contains_key(surface) {
            let symbol = self.next_symbol();
            self.by_symbol.insert(symbol.clone(), surface.to_string());
            self.by_surface.insert(surface.to_string(), symbol);
        }
        &self.by_surface[surface]
    }

    pub fn symbol_of(&self, surface: &str) -> Option<&str> {
        self.by_surface.get(surface).map(String::as_str)
    }

    pub fn surface_of(&self, symbol: &str) -> Option<&str> {
        self.by_symbol.get(symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_surface.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_surface.is_empty()
    }

    pub fn is_pool_exhausted(&self) -> bool {
        self.pool_index >= SYMBOL_POOL.len()
    }

    /// symbol -> surface, the form shipped alongside a payload.
    pub fn into_dictionary(self) -> BTreeMap<String, String> {
        self.by_symbol
    }

    fn next_symbol(&mut self) -> String {
        if let Some(symbol) = SYMBOL_POOL.get(self.pool_index) {
            self.pool_index += 1;
            return symbol.to_string();
        }
        // The distinct count only grows, so `~N` is never handed out twice.
        let ordinal = self.by_surface.len();
        if ordinal == SYMBOL_POOL.len() {
            tracing::debug!(pool = SYMBOL_POOL.len(), "symbol pool exhausted, using fallback symbols");
        }
        format!("{FALLBACK_PREFIX}{ordinal}")
    }
}
