//! Parameter handle interning.
//!
//! Curve target ids are compared by identity every frame, so their string
//! names are interned once at clip load into dense `ParamId` handles. The
//! interner is owned by the host application and passed in explicitly
//! wherever names are resolved; nothing here is global state.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ParamId(pub u32);

/// Host-owned registry mapping parameter names to stable handles.
#[derive(Default, Debug)]
pub struct ParamInterner {
    names: Vec<String>,
}

impl ParamInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a name, returning its handle. Interning the same name twice
    /// returns the same handle.
    pub fn intern(&mut self, name: &str) -> ParamId {
        if let Some(i) = self.names.iter().position(|n| n == name) {
            return ParamId(i as u32);
        }
        self.names.push(name.to_string());
        ParamId((self.names.len() - 1) as u32)
    }

    /// Look up an already-interned name without inserting.
    pub fn get(&self, name: &str) -> Option<ParamId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| ParamId(i as u32))
    }

    pub fn resolve(&self, id: ParamId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
