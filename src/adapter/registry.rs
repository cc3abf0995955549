//! Adapter registry for title lookup.
//!
//! The `AdapterRegistry` maps ROM identifiers to adapter constructors.
//! Lookup is an exact match on the lower-cased identifier; an unknown
//! identifier is an error, never a silent fallback.

use rustc_hash::FxHashMap;

use crate::core::{EnvError, Result};

use super::contract::GameAdapter;

/// Builds a fresh adapter in its post-construction state.
pub type AdapterConstructor = fn() -> Box<dyn GameAdapter>;

/// Registry of adapter constructors keyed by ROM identifier.
///
/// ## Example
///
/// ```
/// use arcade_env::adapter::AdapterRegistry;
///
/// let registry = AdapterRegistry::builtin();
/// let adapter = registry.create("Krull").unwrap();
/// assert_eq!(adapter.rom(), "krull");
/// assert!(registry.create("zork").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct AdapterRegistry {
    constructors: FxHashMap<String, AdapterConstructor>,
}

impl AdapterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every supported title.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for &(rom, constructor) in crate::games::BUILTIN {
            registry.register(rom, constructor);
        }
        registry
    }

    /// Register a constructor under `rom`.
    ///
    /// Panics if the identifier is already registered.
    pub fn register(&mut self, rom: &str, constructor: AdapterConstructor) {
        let key = rom.to_ascii_lowercase();
        if self.constructors.contains_key(&key) {
            panic!("Adapter for ROM {:?} already registered", key);
        }
        self.constructors.insert(key, constructor);
    }

    /// Build a fresh adapter for `rom`.
    pub fn create(&self, rom: &str) -> Result<Box<dyn GameAdapter>> {
        self.constructors
            .get(&rom.to_ascii_lowercase())
            .map(|constructor| constructor())
            .ok_or_else(|| EnvError::UnknownGameAdapter(rom.to_string()))
    }

    /// Check if an identifier is registered.
    #[must_use]
    pub fn contains(&self, rom: &str) -> bool {
        self.constructors.contains_key(&rom.to_ascii_lowercase())
    }

    /// Number of registered titles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Registered identifiers, sorted.
    #[must_use]
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
