//! The query model.
//!
//! A [`Query`] is a value: every builder method consumes it and returns the
//! extended query, and `Clone` lets several queries grow from one base.

use core::fmt;

use crate::ast::{Expr, Ident, IntoExpr, ObjectName};
use crate::error::{Error, Result};
use crate::render::Renderer;

/// Where rows come from.
#[derive(Debug, Clone, PartialEq)]
pub enum TableSource {
    /// A qualified table name, e.g. `db.schema.customers`.
    Named(ObjectName),
    /// A nested query.
    Subquery(Box<Query>),
}

/// A table reference in FROM or JOIN, with an optional alias.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRef {
    source: TableSource,
    alias: Option<Ident>,
}

impl TableRef {
    /// Creates a reference to a named table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] for a malformed name.
    pub fn named(name: &str) -> Result<Self> {
        Ok(Self {
            source: TableSource::Named(ObjectName::table(name)?),
            alias: None,
        })
    }

    /// Creates a reference to a nested query, named by the query's alias.
    /// The query is never collapsed.
    #[must_use]
    pub fn subquery(query: Query) -> Self {
        Self {
            alias: query.alias.clone(),
            source: TableSource::Subquery(Box::new(query)),
        }
    }

    /// Sets the alias, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] for an empty or blank alias.
    pub fn as_(mut self, alias: &str) -> Result<Self> {
        self.alias = Some(Ident::new(alias)?);
        Ok(self)
    }

    /// Returns the source.
    #[must_use]
    pub const fn source(&self) -> &TableSource {
        &self.source
    }

    /// Returns the alias.
    #[must_use]
    pub const fn alias(&self) -> Option<&Ident> {
        self.alias.as_ref()
    }

    /// The name columns of this source are qualified with: the alias if set,
    /// otherwise the last segment of the table name.
    fn qualifier(&self) -> Option<&Ident> {
        self.alias.as_ref().or(match &self.source {
            TableSource::Named(name) => Some(name.last()),
            TableSource::Subquery(_) => None,
        })
    }
}

impl From<Query> for TableRef {
    /// A query with nothing but a source collapses to that source; anything
    /// else becomes a nested subquery aliased like the query.
    fn from(query: Query) -> Self {
        if query.is_simple() {
            query.from
        } else {
            Self::subquery(query)
        }
    }
}

/// Join kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// INNER JOIN.
    Inner,
    /// LEFT OUTER JOIN.
    Left,
    /// RIGHT OUTER JOIN.
    Right,
    /// FULL OUTER JOIN.
    Full,
}

impl JoinKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
        }
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// The type of join.
    pub kind: JoinKind,
    /// The joined table.
    pub target: TableRef,
    /// The join condition.
    pub on: Expr,
}

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An ORDER BY item.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction; `None` leaves it to the database (ascending).
    pub direction: Option<OrderDirection>,
}

impl OrderBy {
    pub(crate) fn new(expr: Expr, direction: OrderDirection) -> Self {
        Self {
            expr: expr.unaliased(),
            direction: Some(direction),
        }
    }
}

impl From<Expr> for OrderBy {
    fn from(expr: Expr) -> Self {
        Self {
            expr: expr.unaliased(),
            direction: None,
        }
    }
}

/// `LIMIT count [OFFSET offset]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    /// Maximum number of rows.
    pub count: u64,
    /// Rows skipped before the first returned one.
    pub offset: Option<u64>,
}

/// A SELECT query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub(crate) alias: Option<Ident>,
    pub(crate) from: TableRef,
    pub(crate) projection: Vec<Expr>,
    pub(crate) joins: Vec<Join>,
    pub(crate) selection: Option<Expr>,
    pub(crate) order_by: Vec<OrderBy>,
    pub(crate) limit: Option<Limit>,
}

impl Query {
    /// Creates `SELECT * FROM <source>`.
    #[must_use]
    pub fn new(source: impl Into<TableRef>) -> Self {
        Self {
            alias: None,
            from: source.into(),
            projection: vec![],
            joins: vec![],
            selection: None,
            order_by: vec![],
            limit: None,
        }
    }

    /// Replaces the select list. An empty list selects `*`.
    ///
    /// # Errors
    ///
    /// Propagates the first error among the items.
    pub fn select<I, E>(mut self, items: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: IntoExpr,
    {
        self.projection = items
            .into_iter()
            .map(IntoExpr::into_expr)
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// Replaces the select list with plain column names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] for a malformed name.
    pub fn columns(self, names: &[&str]) -> Result<Self> {
        let items = names
            .iter()
            .map(|name| Expr::column(name))
            .collect::<Result<Vec<_>>>()?;
        self.select(items)
    }

    /// Names the query, replacing any previous name.
    ///
    /// While the query is simple the primary table takes the name too, so
    /// later clauses can qualify with it. A nested query is always rendered
    /// as `(<query>) AS <alias>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] for an empty or blank alias.
    pub fn as_(mut self, alias: &str) -> Result<Self> {
        let alias = Ident::new(alias)?;
        if self.is_simple() {
            self.from.alias = Some(alias.clone());
        }
        self.alias = Some(alias);
        Ok(self)
    }

    /// Returns the name set by [`Query::as_`].
    #[must_use]
    pub const fn alias(&self) -> Option<&Ident> {
        self.alias.as_ref()
    }

    /// Appends an INNER JOIN.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyJoinPredicate`] when `on` is `None`.
    pub fn join(self, target: impl Into<TableRef>, on: impl Into<Option<Expr>>) -> Result<Self> {
        self.join_with(JoinKind::Inner, target, on)
    }

    /// Appends a LEFT JOIN.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyJoinPredicate`] when `on` is `None`.
    pub fn left_join(
        self,
        target: impl Into<TableRef>,
        on: impl Into<Option<Expr>>,
    ) -> Result<Self> {
        self.join_with(JoinKind::Left, target, on)
    }

    /// Appends a RIGHT JOIN.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyJoinPredicate`] when `on` is `None`.
    pub fn right_join(
        self,
        target: impl Into<TableRef>,
        on: impl Into<Option<Expr>>,
    ) -> Result<Self> {
        self.join_with(JoinKind::Right, target, on)
    }

    /// Appends a FULL JOIN.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyJoinPredicate`] when `on` is `None`.
    pub fn full_join(
        self,
        target: impl Into<TableRef>,
        on: impl Into<Option<Expr>>,
    ) -> Result<Self> {
        self.join_with(JoinKind::Full, target, on)
    }

    /// Appends a join of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyJoinPredicate`] when `on` is `None`.
    pub fn join_with(
        mut self,
        kind: JoinKind,
        target: impl Into<TableRef>,
        on: impl Into<Option<Expr>>,
    ) -> Result<Self> {
        let Some(on) = on.into() else {
            tracing::debug!(kind = kind.as_str(), "rejected join without predicate");
            return Err(Error::EmptyJoinPredicate);
        };
        self.joins.push(Join {
            kind,
            target: target.into(),
            on: on.unaliased(),
        });
        Ok(self)
    }

    /// Adds a WHERE predicate. A second call ANDs onto the first.
    ///
    /// # Errors
    ///
    /// Propagates an error of the predicate, or an operand error of the
    /// implied AND.
    pub fn where_(mut self, predicate: impl IntoExpr) -> Result<Self> {
        let predicate = predicate.into_expr()?.unaliased();
        self.selection = Some(match self.selection.take() {
            Some(existing) => existing.and(predicate)?,
            None => predicate,
        });
        Ok(self)
    }

    /// Alias for [`Query::where_`].
    ///
    /// # Errors
    ///
    /// See [`Query::where_`].
    pub fn filter(self, predicate: impl IntoExpr) -> Result<Self> {
        self.where_(predicate)
    }

    /// Replaces the ORDER BY list.
    #[must_use]
    pub fn order_by<I, O>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<OrderBy>,
    {
        self.order_by = items.into_iter().map(Into::into).collect();
        self
    }

    /// Sets `LIMIT n`, replacing any previous limit and offset.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(Limit {
            count: n,
            offset: None,
        });
        self
    }

    /// Sets `LIMIT n OFFSET m`. An offset only exists under a limit.
    #[must_use]
    pub const fn limit_offset(mut self, n: u64, offset: u64) -> Self {
        self.limit = Some(Limit {
            count: n,
            offset: Some(offset),
        });
        self
    }

    /// Returns the LIMIT clause.
    #[must_use]
    pub const fn limit_clause(&self) -> Option<&Limit> {
        self.limit.as_ref()
    }

    /// Returns a column of this query, qualified by its alias or, without
    /// one, by the primary table's alias or name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] for a malformed name, or when the
    /// primary source is a subquery without an alias.
    pub fn col(&self, name: &str) -> Result<Expr> {
        let path = ObjectName::column(name)?;
        let qualifier = self
            .alias
            .as_ref()
            .or_else(|| self.from.qualifier())
            .ok_or_else(|| Error::invalid_identifier(name, "subquery has no alias to qualify with"))?;
        Ok(Expr::column_path(ObjectName::qualified(qualifier, path)))
    }

    /// Wraps the query as a nested source, even when it would collapse. The
    /// source is aliased like the query.
    #[must_use]
    pub fn subquery(self) -> TableRef {
        TableRef::subquery(self)
    }

    /// Returns whether the query is only `SELECT * FROM <source>`.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.projection.is_empty()
            && self.joins.is_empty()
            && self.selection.is_none()
            && self.order_by.is_empty()
            && self.limit.is_none()
    }

    /// Returns the primary table.
    #[must_use]
    pub const fn table(&self) -> &TableRef {
        &self.from
    }

    /// Returns the select list; empty means `*`.
    #[must_use]
    pub fn projection(&self) -> &[Expr] {
        &self.projection
    }

    /// Returns the joins in order.
    #[must_use]
    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    /// Returns the WHERE predicate.
    #[must_use]
    pub const fn selection(&self) -> Option<&Expr> {
        self.selection.as_ref()
    }

    /// Renders the query with the default dialect.
    #[must_use]
    pub fn sql(&self) -> String {
        Renderer::default().query(self)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql())
    }
}
