//! Identifiers and qualified names.
//!
//! Names are split into segments when the builder is called, so a malformed
//! path is rejected before any tree is built. Whether a segment ends up quoted
//! is decided later by the dialect.

use crate::error::{Error, Result};

/// A single identifier segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    value: String,
    quoted: bool,
}

impl Ident {
    /// Parses a standalone identifier such as an alias.
    ///
    /// A name wrapped in backticks is taken verbatim and always quoted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] for empty, blank or wildcard names.
    pub fn new(name: &str) -> Result<Self> {
        if let Some(quoted) = name.strip_prefix('`') {
            let value = quoted
                .strip_suffix('`')
                .ok_or_else(|| Error::invalid_identifier(name, "unterminated backtick"))?;
            if value.is_empty() {
                return Err(Error::invalid_identifier(name, "empty name"));
            }
            if value.contains('`') {
                return Err(Error::invalid_identifier(name, "stray backtick"));
            }
            return Ok(Self {
                value: String::from(value),
                quoted: true,
            });
        }
        if name == "*" {
            return Err(Error::invalid_identifier(name, "wildcard is not a name"));
        }
        if name.contains('`') {
            return Err(Error::invalid_identifier(name, "stray backtick"));
        }
        Self::bare(name, name)
    }

    fn bare(full: &str, value: &str) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::invalid_identifier(full, "empty path segment"));
        }
        if value.trim().is_empty() {
            return Err(Error::invalid_identifier(full, "blank path segment"));
        }
        Ok(Self {
            value: String::from(value),
            quoted: false,
        })
    }

    /// Returns the unquoted identifier text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns whether the caller wrote this segment in backticks.
    #[must_use]
    pub const fn is_quoted(&self) -> bool {
        self.quoted
    }

    /// Returns whether this segment is the `*` wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        !self.quoted && self.value == "*"
    }
}

/// A dotted path of identifiers, e.g. `db.schema.table` or `t1.id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectName {
    qualifier: Vec<Ident>,
    name: Ident,
}

impl ObjectName {
    /// Parses a table path. Wildcards are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] for an empty name, an empty path
    /// segment, an unterminated backtick or a `*` segment.
    pub fn table(name: &str) -> Result<Self> {
        let path = Self::parse(name)?;
        if path.segments().any(Ident::is_wildcard) {
            return Err(Error::invalid_identifier(name, "wildcard is not a table name"));
        }
        Ok(path)
    }

    /// Parses a column path. `*` is allowed as the last segment only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] for an empty name, an empty path
    /// segment, an unterminated backtick or a misplaced `*`.
    pub fn column(name: &str) -> Result<Self> {
        let path = Self::parse(name)?;
        if path.qualifier.iter().any(Ident::is_wildcard) {
            return Err(Error::invalid_identifier(name, "wildcard must be the last segment"));
        }
        Ok(path)
    }

    fn parse(name: &str) -> Result<Self> {
        let mut segments = Segments::new(name);
        let mut qualifier = Vec::new();
        let mut last = segments
            .next_segment()?
            .ok_or_else(|| Error::invalid_identifier(name, "empty name"))?;
        while let Some(ident) = segments.next_segment()? {
            qualifier.push(core::mem::replace(&mut last, ident));
        }
        Ok(Self {
            qualifier,
            name: last,
        })
    }

    /// Builds a path by appending `name` to `qualifier`.
    #[must_use]
    pub(crate) fn qualified(qualifier: &Ident, name: Self) -> Self {
        let mut segments = Vec::with_capacity(name.qualifier.len() + 1);
        segments.push(qualifier.clone());
        segments.extend(name.qualifier);
        Self {
            qualifier: segments,
            name: name.name,
        }
    }

    /// Returns the path segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &Ident> {
        self.qualifier.iter().chain(core::iter::once(&self.name))
    }

    /// Returns the last segment (table or column name).
    #[must_use]
    pub const fn last(&self) -> &Ident {
        &self.name
    }
}

/// Splits a dotted name into segments, honoring backtick-quoted segments.
struct Segments<'a> {
    full: &'a str,
    rest: &'a str,
    done: bool,
}

impl<'a> Segments<'a> {
    const fn new(full: &'a str) -> Self {
        Self {
            full,
            rest: full,
            done: full.is_empty(),
        }
    }

    fn next_segment(&mut self) -> Result<Option<Ident>> {
        if self.done {
            return Ok(None);
        }
        if let Some(quoted) = self.rest.strip_prefix('`') {
            let end = quoted
                .find('`')
                .ok_or_else(|| Error::invalid_identifier(self.full, "unterminated backtick"))?;
            let value = &quoted[..end];
            if value.is_empty() {
                return Err(Error::invalid_identifier(self.full, "empty path segment"));
            }
            let after = &quoted[end + 1..];
            if after.is_empty() {
                self.done = true;
            } else if let Some(tail) = after.strip_prefix('.') {
                self.rest = tail;
                if tail.is_empty() {
                    return Err(Error::invalid_identifier(self.full, "empty path segment"));
                }
            } else {
                return Err(Error::invalid_identifier(
                    self.full,
                    "unexpected character after quoted segment",
                ));
            }
            return Ok(Some(Ident {
                value: String::from(value),
                quoted: true,
            }));
        }

        let (value, rest) = match self.rest.split_once('.') {
            Some((value, rest)) => {
                if rest.is_empty() {
                    return Err(Error::invalid_identifier(self.full, "empty path segment"));
                }
                (value, rest)
            }
            None => {
                self.done = true;
                (self.rest, "")
            }
        };
        if value.contains('`') {
            return Err(Error::invalid_identifier(self.full, "stray backtick"));
        }
        self.rest = rest;
        Ident::bare(self.full, value).map(Some)
    }
}
