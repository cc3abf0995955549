//! Game adapters: per-title translation of RAM into RL signals.
//!
//! - `contract`: the `GameAdapter` trait every title implements
//! - `decode`: score layouts and terminal predicates over RAM
//! - `descriptor`: declarative title descriptions and `RamAdapter`
//! - `registry`: ROM identifier to adapter constructor

pub mod contract;
pub mod decode;
pub mod descriptor;
pub mod registry;

pub use contract::{GameAdapter, StartProcedure, DEFAULT_RESET_STEPS, DEFAULT_WARMUP_FRAMES};
pub use decode::{Comparison, Condition, ScoreLayout, TerminalRule};
pub use descriptor::{GameDescriptor, RamAdapter};
pub use registry::{AdapterConstructor, AdapterRegistry};
