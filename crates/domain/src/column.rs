//! Column and detail field descriptors.
//!
//! Descriptors tell the table how to read and display fields of a record.
//! They come either from a view definition file (using a built-in
//! [`CellFormat`]) or from code, where a [`CellFormatter`] closure can
//! replace the built-in formatting entirely.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::Record;
use crate::value::{display_value, is_blank};

/// Placeholder shown in the detail view for blank fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Caller-supplied function turning a raw field value into display text.
#[derive(Clone)]
pub struct CellFormatter(Arc<dyn Fn(&Value) -> String + Send + Sync>);

impl CellFormatter {
    /// Wraps a formatting function.
    pub fn new(format: impl Fn(&Value) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(format))
    }

    /// Formats a value.
    #[must_use]
    pub fn format(&self, value: &Value) -> String {
        (self.0)(value)
    }
}

impl fmt::Debug for CellFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellFormatter(..)")
    }
}

/// Built-in formatting that can be named in a view definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellFormat {
    /// Default stringification.
    #[default]
    Plain,
    /// Booleans as `Yes`/`No`.
    YesNo,
    /// Upper-cased text.
    Uppercase,
    /// Text cut to at most `max_chars` characters, with an ellipsis.
    Truncate {
        /// Maximum number of characters kept.
        max_chars: usize,
    },
    /// Numbers with a fixed number of decimals.
    Fixed {
        /// Digits after the decimal point.
        decimals: usize,
    },
}

impl CellFormat {
    /// Formats a value. Values the format does not apply to fall back to
    /// plain stringification.
    #[must_use]
    pub fn apply(self, value: &Value) -> String {
        match (self, value) {
            (Self::YesNo, Value::Bool(b)) => (if *b { "Yes" } else { "No" }).to_string(),
            (Self::Uppercase, _) => display_value(value).to_uppercase(),
            (Self::Truncate { max_chars }, _) => {
                let text = display_value(value);
                if text.chars().count() <= max_chars {
                    text
                } else {
                    let mut cut: String = text.chars().take(max_chars).collect();
                    cut.push('…');
                    cut
                }
            }
            (Self::Fixed { decimals }, Value::Number(n)) => n
                .as_f64()
                .map_or_else(|| n.to_string(), |f| format!("{f:.decimals$}")),
            _ => display_value(value),
        }
    }
}

/// One column of the list view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Field key read from each record.
    pub key: String,
    /// Header text.
    pub header: String,
    /// Whether clicking the header sorts by this column.
    #[serde(default)]
    pub sortable: bool,
    /// Built-in formatting.
    #[serde(default)]
    pub format: CellFormat,
    /// Custom formatter; takes precedence over `format`.
    #[serde(skip)]
    pub formatter: Option<CellFormatter>,
}

impl ColumnDescriptor {
    /// Creates a non-sortable column with plain formatting.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: false,
            format: CellFormat::Plain,
            formatter: None,
        }
    }

    /// Marks the column as sortable.
    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Sets a built-in format.
    #[must_use]
    pub const fn with_format(mut self, format: CellFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a custom formatter.
    #[must_use]
    pub fn with_formatter(
        mut self,
        format: impl Fn(&Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.formatter = Some(CellFormatter::new(format));
        self
    }

    /// Renders this column's cell for a record.
    #[must_use]
    pub fn render(&self, record: &Record) -> String {
        let value = record.field(&self.key);
        match &self.formatter {
            Some(formatter) => formatter.format(value),
            None => self.format.apply(value),
        }
    }
}

/// One labelled field of the detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailFieldDescriptor {
    /// Field key read from the record.
    pub key: String,
    /// Label shown above the value.
    pub label: String,
    /// Built-in formatting.
    #[serde(default)]
    pub format: CellFormat,
    /// Custom formatter; takes precedence over `format`.
    #[serde(skip)]
    pub formatter: Option<CellFormatter>,
}

impl DetailFieldDescriptor {
    /// Creates a detail field with plain formatting.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            format: CellFormat::Plain,
            formatter: None,
        }
    }

    /// Sets a built-in format.
    #[must_use]
    pub const fn with_format(mut self, format: CellFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a custom formatter.
    #[must_use]
    pub fn with_formatter(
        mut self,
        format: impl Fn(&Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.formatter = Some(CellFormatter::new(format));
        self
    }

    /// Renders the field value for a record.
    ///
    /// A custom formatter always sees the raw value. Otherwise blank
    /// values render as [`NOT_AVAILABLE`].
    #[must_use]
    pub fn render(&self, record: &Record) -> String {
        let value = record.field(&self.key);
        match &self.formatter {
            Some(formatter) => formatter.format(value),
            None if is_blank(value) => NOT_AVAILABLE.to_string(),
            None => self.format.apply(value),
        }
    }
}
