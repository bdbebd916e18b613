//! # fluq-core
//!
//! A fluent SQL query builder. Column expressions are composed with
//! operators into an immutable expression tree, queries are assembled with
//! chained methods, and the renderer turns both into dialect SQL with
//! minimal parentheses and identifier quoting only where needed.
//!
//! BigQuery is the default dialect.
//!
//! ```rust
//! use fluq_core::{col, table};
//!
//! # fn main() -> fluq_core::Result<()> {
//! let t1 = table("db.schema.table1")?.as_("t1")?;
//! let t2 = table("db.schema.table2")?.as_("t2")?;
//! let on = t1.col("id")?.eq(t2.col("id")?)?;
//! let query = t1
//!     .join(t2, on)?
//!     .select([col("t1.*")?, (col("t2.age")? - col("t2.years")?)?.as_("x")?])?;
//!
//! assert_eq!(
//!     query.sql(),
//!     "SELECT t1.*, t2.age - t2.years AS x FROM db.schema.table1 AS t1 \
//!      INNER JOIN db.schema.table2 AS t2 ON t1.id = t2.id"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Every construction step is checked. Malformed names, operators applied to
//! literals they cannot take and joins without a predicate fail at the call
//! that builds them; rendering itself never fails.

pub mod ast;
pub mod builder;
pub mod config;
pub mod dialect;
pub mod error;
pub mod render;

pub use ast::{Expr, IntoExpr, Literal, ToLiteral};
pub use builder::{col, functions, lit, table, when, JoinKind, OrderBy, Query, TableRef};
pub use config::RenderConfig;
pub use dialect::{BigQueryDialect, Dialect, DialectKind, GenericDialect};
pub use error::{Error, Result};
pub use render::{Layout, Renderer};
