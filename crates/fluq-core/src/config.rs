//! Render configuration.
//!
//! ```rust
//! use fluq_core::{table, RenderConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config: RenderConfig = serde_json::from_str(r#"{ "dialect": "generic" }"#)?;
//! let query = table("orders")?;
//! assert_eq!(config.renderer()?.query(&query), "SELECT * FROM orders");
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::dialect::DialectKind;
use crate::error::{Error, Result};
use crate::render::{Layout, Renderer, MAX_INDENT};

const DEFAULT_INDENT: usize = 2;

/// Dialect and layout selection for a [`Renderer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Target dialect.
    pub dialect: DialectKind,
    /// One clause per line instead of a single line.
    pub pretty: bool,
    /// Spaces per nesting level in the pretty layout.
    pub indent: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dialect: DialectKind::default(),
            pretty: false,
            indent: DEFAULT_INDENT,
        }
    }
}

impl RenderConfig {
    /// Creates a configuration for `dialect` with the default layout.
    #[must_use]
    pub fn for_dialect(dialect: DialectKind) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Creates a configuration from a dialect name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for an unknown dialect name.
    pub fn from_dialect_name(name: &str) -> Result<Self> {
        DialectKind::from_name(name).map(Self::for_dialect)
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a pretty layout without
    /// indentation, or an indent wider than [`MAX_INDENT`].
    pub fn validate(&self) -> Result<()> {
        if self.pretty && self.indent == 0 {
            return Err(Error::InvalidConfig(String::from(
                "pretty layout requires a non-zero indent",
            )));
        }
        if self.indent > MAX_INDENT {
            return Err(Error::InvalidConfig(format!(
                "indent {} exceeds the maximum of {MAX_INDENT}",
                self.indent
            )));
        }
        Ok(())
    }

    /// Returns the layout this configuration selects.
    #[must_use]
    pub const fn layout(&self) -> Layout {
        if self.pretty {
            Layout::Pretty {
                indent: self.indent,
            }
        } else {
            Layout::Compact
        }
    }

    /// Validates the configuration and builds the renderer.
    ///
    /// # Errors
    ///
    /// See [`RenderConfig::validate`].
    pub fn renderer(&self) -> Result<Renderer<'static>> {
        self.validate()?;
        tracing::debug!(dialect = ?self.dialect, layout = ?self.layout(), "configured renderer");
        Ok(Renderer::new(self.dialect.dialect()).with_layout(self.layout()))
    }
}
