//! Query rendering.
//!
//! Clause order: `SELECT`, `FROM`, joins, `WHERE`, `ORDER BY`, `LIMIT`,
//! `OFFSET`.

use super::{Layout, Renderer, MAX_INDENT};
use crate::builder::{Query, TableRef, TableSource};

impl Renderer<'_> {
    pub(crate) fn write_query(&self, out: &mut String, query: &Query, depth: usize) {
        out.push_str("SELECT");
        if query.projection.is_empty() {
            out.push_str(" *");
        } else {
            for (i, item) in query.projection.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                self.line_break(out, depth + 1);
                self.write_expr(out, item);
            }
        }

        self.line_break(out, depth);
        out.push_str("FROM ");
        self.write_table_ref(out, &query.from, depth);

        for join in &query.joins {
            self.line_break(out, depth);
            out.push_str(join.kind.as_str());
            out.push(' ');
            self.write_table_ref(out, &join.target, depth);
            out.push_str(" ON ");
            self.write_expr(out, &join.on);
        }

        if let Some(selection) = &query.selection {
            self.line_break(out, depth);
            out.push_str("WHERE ");
            self.write_expr(out, selection);
        }

        if !query.order_by.is_empty() {
            self.line_break(out, depth);
            out.push_str("ORDER BY ");
            for (i, item) in query.order_by.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.write_expr(out, &item.expr);
                if let Some(direction) = item.direction {
                    out.push(' ');
                    out.push_str(direction.as_str());
                }
            }
        }

        if let Some(limit) = query.limit {
            self.line_break(out, depth);
            out.push_str("LIMIT ");
            out.push_str(&limit.count.to_string());
            if let Some(offset) = limit.offset {
                out.push_str(" OFFSET ");
                out.push_str(&offset.to_string());
            }
        }
    }

    fn write_table_ref(&self, out: &mut String, table: &TableRef, depth: usize) {
        match table.source() {
            TableSource::Named(name) => self.write_object_name(out, name),
            TableSource::Subquery(query) => {
                out.push('(');
                if matches!(self.layout, Layout::Pretty { .. }) {
                    self.line_break(out, depth + 1);
                }
                self.write_query(out, query, depth + 1);
                if matches!(self.layout, Layout::Pretty { .. }) {
                    self.line_break(out, depth);
                }
                out.push(')');
            }
        }
        if let Some(alias) = table.alias() {
            out.push_str(" AS ");
            self.write_ident(out, alias);
        }
    }

    /// A space, or a new line indented to `depth` in the pretty layout.
    fn line_break(&self, out: &mut String, depth: usize) {
        match self.layout {
            Layout::Compact => out.push(' '),
            Layout::Pretty { indent } => {
                out.push('\n');
                let width = indent.min(MAX_INDENT).saturating_mul(depth);
                out.extend(core::iter::repeat_n(' ', width));
            }
        }
    }
}
