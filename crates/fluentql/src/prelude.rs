//! Convenient imports for typical `fluentql` usage.
//!
//! ```ignore
//! use fluentql::prelude::*;
//! ```

pub use crate::{
    Connection, Direction, Model, Prepared, Query, Record, RunResult, SqlError, SqlResult, Value,
    table,
};
