//! Ordered primitive stream for adapter-derived state.
//!
//! Adapters persist their derived fields (score, reward, terminal flag and
//! any title-specific counters) as a flat sequence of integers and booleans.
//! There is no schema: each adapter documents its own field order, and the
//! reader must consume fields in the same order they were written.
//!
//! Machine state is not covered here. A caller that wants to resume an
//! episode saves the machine separately, and restores both in the same order.
//!
//! ## Example
//!
//! ```
//! use arcade_env::core::{StateReader, StateWriter};
//!
//! let mut w = StateWriter::new();
//! w.put_int(-5);
//! w.put_bool(true);
//! let state = w.finish();
//!
//! let mut r = StateReader::new(&state);
//! assert_eq!(r.get_int().unwrap(), -5);
//! assert!(r.get_bool().unwrap());
//! assert!(r.get_int().is_err());
//! ```

use serde::{Deserialize, Serialize};

use super::error::{EnvError, Result};

/// One primitive in the stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateValue {
    Int(i64),
    Bool(bool),
}

/// A completed stream of adapter fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterState {
    fields: Vec<StateValue>,
}

impl AdapterState {
    /// Number of fields written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no fields were written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in write order.
    #[must_use]
    pub fn fields(&self) -> &[StateValue] {
        &self.fields
    }

    /// Fail with `AdapterStateMismatch` unless exactly `expected` fields are present.
    pub fn check_len(&self, expected: usize) -> Result<()> {
        if self.fields.len() == expected {
            Ok(())
        } else {
            Err(EnvError::AdapterStateMismatch {
                expected,
                found: self.fields.len(),
            })
        }
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Appends primitives in order.
#[derive(Clone, Debug, Default)]
pub struct StateWriter {
    fields: Vec<StateValue>,
}

impl StateWriter {
    /// Create an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an integer.
    pub fn put_int(&mut self, value: i64) {
        self.fields.push(StateValue::Int(value));
    }

    /// Append a boolean.
    pub fn put_bool(&mut self, value: bool) {
        self.fields.push(StateValue::Bool(value));
    }

    /// Finish writing.
    #[must_use]
    pub fn finish(self) -> AdapterState {
        AdapterState { fields: self.fields }
    }
}

/// Reads primitives back in write order.
#[derive(Clone, Debug)]
pub struct StateReader<'a> {
    fields: &'a [StateValue],
    cursor: usize,
}

impl<'a> StateReader<'a> {
    /// Start reading at the first field.
    #[must_use]
    pub fn new(state: &'a AdapterState) -> Self {
        Self {
            fields: &state.fields,
            cursor: 0,
        }
    }

    /// Read the next field as an integer.
    pub fn get_int(&mut self) -> Result<i64> {
        match self.next()? {
            StateValue::Int(v) => Ok(v),
            StateValue::Bool(_) => Err(self.kind_error("int")),
        }
    }

    /// Read the next field as a boolean.
    pub fn get_bool(&mut self) -> Result<bool> {
        match self.next()? {
            StateValue::Bool(v) => Ok(v),
            StateValue::Int(_) => Err(self.kind_error("bool")),
        }
    }

    /// Fields not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.fields.len() - self.cursor
    }

    fn next(&mut self) -> Result<StateValue> {
        let value = self.fields.get(self.cursor).copied().ok_or_else(|| {
            EnvError::StateStream(format!("stream exhausted after {} fields", self.cursor))
        })?;
        self.cursor += 1;
        Ok(value)
    }

    fn kind_error(&self, wanted: &str) -> EnvError {
        EnvError::StateStream(format!("field {} is not a {}", self.cursor - 1, wanted))
    }
}
