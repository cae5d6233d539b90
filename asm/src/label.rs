use arch::MAX_LABELS;
use indexmap::IndexMap;

use crate::error::ErrorKind;

/// Label table. Filled during phase 1, read-only during phase 2; entries
/// are write-once and never removed.
#[derive(Debug)]
pub struct Labels {
    map: IndexMap<String, u16>,
}

impl Labels {
    pub fn new() -> Self {
        Labels {
            map: IndexMap::new(),
        }
    }

    pub fn define(&mut self, name: &str, addr: u16) -> Result<(), ErrorKind> {
        if self.map.contains_key(name) {
            return Err(ErrorKind::DuplicateLabel(name.to_string()));
        }
        if self.map.len() >= MAX_LABELS {
            return Err(ErrorKind::TooManyLabels);
        }
        self.map.insert(name.to_string(), addr);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Option<u16> {
        self.map.get(name).copied()
    }
}
