//! SQL text generation.
//!
//! A [`Renderer`] pairs a [`Dialect`] with a [`Layout`]. Rendering is total:
//! every tree the builders can construct renders, and rendering the same
//! value twice yields the same text.

mod expr;
mod query;

use crate::ast::Expr;
use crate::builder::Query;
use crate::dialect::{Dialect, DialectKind};

/// Widest indentation step the pretty layout uses; larger steps are capped.
pub const MAX_INDENT: usize = 16;

/// Whitespace layout of rendered queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    /// Everything on one line.
    #[default]
    Compact,
    /// One clause per line, one select item per line.
    Pretty {
        /// Spaces per nesting level.
        indent: usize,
    },
}

/// Renders expressions and queries for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'d> {
    dialect: &'d dyn Dialect,
    layout: Layout,
}

impl Default for Renderer<'static> {
    /// BigQuery, compact layout.
    fn default() -> Self {
        Self::new(DialectKind::default().dialect())
    }
}

impl<'d> Renderer<'d> {
    /// Creates a compact renderer for `dialect`.
    #[must_use]
    pub const fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            dialect,
            layout: Layout::Compact,
        }
    }

    /// Sets the layout.
    #[must_use]
    pub const fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &'d dyn Dialect {
        self.dialect
    }

    /// Returns the layout.
    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Renders an expression.
    #[must_use]
    pub fn expr(&self, expr: &Expr) -> String {
        tracing::trace!(dialect = self.dialect.name(), "rendering expression");
        let mut out = String::new();
        self.write_expr(&mut out, expr);
        out
    }

    /// Renders a query.
    #[must_use]
    pub fn query(&self, query: &Query) -> String {
        tracing::trace!(
            dialect = self.dialect.name(),
            layout = ?self.layout,
            joins = query.joins().len(),
            "rendering query"
        );
        let mut out = String::new();
        self.write_query(&mut out, query, 0);
        out
    }
}
