use crate::value::{TypeTag, Value};
use std::fmt;
use std::sync::Arc;

/// Pure function converting cell text to a typed value.
///
/// Returning `Ok(Value::Null)` means "no value"; the materializer
/// substitutes the column default. `Err` carries a message routed
/// through the cell-conversion policy hook.
pub type Adapter = Arc<dyn Fn(&str) -> std::result::Result<Value, String> + Send + Sync>;

/// Declared or inferred specification for one column.
///
/// Columns are matched by `title`. Caller-declared specs must carry an
/// adapter; machine-inferred specs always do.
#[derive(Clone)]
pub struct ColumnSpec {
    /// Column title, the identity/matching key.
    pub title: String,
    /// Declared or inferred data type.
    pub declared_type: TypeTag,
    /// Whether the column admits null values.
    pub nullable: bool,
    /// Value substituted for nulls and failed conversions.
    /// `None` means the null value itself.
    pub default_value: Option<Value>,
    /// Converter from cell text to a typed value.
    pub adapter: Option<Adapter>,
}

impl ColumnSpec {
    /// Create a new column spec with no adapter, not nullable, no default.
    pub fn new(title: impl Into<String>, declared_type: TypeTag) -> Self {
        Self {
            title: title.into(),
            declared_type,
            nullable: false,
            default_value: None,
            adapter: None,
        }
    }

    /// Set the adapter.
    #[must_use]
    pub fn with_adapter<F>(mut self, adapter: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        self.adapter = Some(Arc::new(adapter));
        self
    }

    /// Mark the column nullable.
    #[must_use]
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Set the default value.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default_value = Some(default);
        self
    }

    /// The default value, or null when none is configured.
    pub(crate) fn default_or_null(&self) -> Value {
        self.default_value.clone().unwrap_or(Value::Null)
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("title", &self.title)
            .field("declared_type", &self.declared_type)
            .field("nullable", &self.nullable)
            .field("default_value", &self.default_value)
            .field("adapter", &self.adapter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
