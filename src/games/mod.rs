//! Supported titles.
//!
//! Each title is a static `GameDescriptor` run by `RamAdapter`. Adding a
//! title means adding a module here and an entry to `BUILTIN`.

pub mod breakout;
pub mod krull;
pub mod pong;

use crate::adapter::AdapterConstructor;

/// Every supported title, as registered by `AdapterRegistry::builtin`.
pub const BUILTIN: &[(&str, AdapterConstructor)] = &[
    (breakout::ROM, breakout::adapter),
    (krull::ROM, krull::adapter),
    (pong::ROM, pong::adapter),
];
