//! # fluentql
//!
//! A fluent SQL statement composer.
//!
//! ## Features
//!
//! - **Fluent clauses**: WHERE / HAVING with AND / OR chaining and nested groups
//! - **Two render modes**: literal SQL text, or `?` placeholders plus ordered bindings
//! - **Validated input**: comparison operators are checked against a whitelist
//!   before any clause state changes
//! - **Pluggable execution**: statements are handed to any [`Connection`]
//!
//! ## Usage
//!
//! ```ignore
//! use fluentql::prelude::*;
//!
//! // Literal SQL
//! let sql = table("users")
//!     .to_sql()
//!     .where_("age", ">", 90)?
//!     .where_group(|q| {
//!         q.where_("name", "=", "John")?.or_where("id", ">", 1)?;
//!         Ok(())
//!     })?
//!     .or_where("position", "=", "accountant")?
//!     .get()?;
//! // SELECT * FROM users WHERE age > 90 AND (name = 'John' OR id > 1) OR position = 'accountant'
//!
//! // Placeholders + bindings
//! let Prepared { sql, bindings } = table("users").where_eq("id", 7).prepare()?;
//! // SELECT * FROM users WHERE id = ?   [7]
//!
//! // Execution
//! let inserted = table("users")
//!     .insert(&client, Record::new().set("name", "John").set("age", 20))
//!     .await?;
//! ```

pub mod clause;
pub mod condition;
pub mod config;
pub mod connection;
pub mod error;
pub mod format;
pub mod fragment;
pub mod model;
pub mod prelude;
pub mod query;
pub mod record;
pub mod scope;
pub mod validate;
pub mod value;

pub use clause::{ClauseBuilder, ClauseKind, Group, Member, PushState};
pub use config::{Config, TableCase};
pub use connection::{Connection, RunResult};
pub use error::{SqlError, SqlResult};
pub use fragment::{Fragment, Separator};
pub use model::Model;
pub use query::{Direction, Execute, Literal, Prepared, Query, table};
pub use record::Record;
pub use scope::{HavingScope, WhereScope};
pub use validate::Operator;
pub use value::Value;
