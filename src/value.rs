use std::fmt;

/// A typed cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 8-bit signed integer.
    Byte(i8),
    /// 16-bit signed integer.
    Short(i16),
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// 32-bit floating point.
    Float(f32),
    /// 64-bit floating point.
    Double(f64),
    /// Text value (fallback type).
    Text(String),
}

impl Value {
    /// Returns true if this value is null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type tag of this value, or `None` for null.
    pub fn type_tag(&self) -> Option<TypeTag> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(TypeTag::Bool),
            Value::Byte(_) => Some(TypeTag::Byte),
            Value::Short(_) => Some(TypeTag::Short),
            Value::Int(_) => Some(TypeTag::Int),
            Value::Long(_) => Some(TypeTag::Long),
            Value::Float(_) => Some(TypeTag::Float),
            Value::Double(_) => Some(TypeTag::Double),
            Value::Text(_) => Some(TypeTag::Text),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v}"),
        }
    }
}

/// Data type of a column, in inference-ladder order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeTag {
    /// Boolean (`true`/`false`).
    Bool,
    /// 8-bit signed integer.
    Byte,
    /// 16-bit signed integer.
    Short,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// Text (fallback type).
    #[default]
    Text,
}

impl TypeTag {
    /// Returns true if this tag is an integral or floating numeric type.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TypeTag::Byte
                | TypeTag::Short
                | TypeTag::Int
                | TypeTag::Long
                | TypeTag::Float
                | TypeTag::Double
        )
    }

    /// The zero-equivalent default value for this type.
    ///
    /// Nullable columns default to [`Value::Null`] instead; this is the
    /// default used for non-nullable columns.
    pub fn zero_value(&self) -> Value {
        match self {
            TypeTag::Bool => Value::Bool(false),
            TypeTag::Byte => Value::Byte(0),
            TypeTag::Short => Value::Short(0),
            TypeTag::Int => Value::Int(0),
            TypeTag::Long => Value::Long(0),
            TypeTag::Float => Value::Float(0.0),
            TypeTag::Double => Value::Double(0.0),
            TypeTag::Text => Value::Text(String::new()),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "Bool"),
            TypeTag::Byte => write!(f, "Byte"),
            TypeTag::Short => write!(f, "Short"),
            TypeTag::Int => write!(f, "Int"),
            TypeTag::Long => write!(f, "Long"),
            TypeTag::Float => write!(f, "Float"),
            TypeTag::Double => write!(f, "Double"),
            TypeTag::Text => write!(f, "Text"),
        }
    }
}
