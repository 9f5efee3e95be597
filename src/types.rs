use std::fmt;

/// In range [1, 2^29 - 1] except [19000, 19999] is reserved.
pub type FieldNumber = u32;

/// Type used in memory to store the value of an enum field.
/// NOTE: Can be negative.
pub type EnumValue = i32;

pub const MAX_FIELD_NUMBER: FieldNumber = (1 << 29) - 1;
pub const RESERVED_FIELD_NUMBERS: std::ops::RangeInclusive<FieldNumber> = 19000..=19999;

/// Primitive protobuf types which don't reference any other schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Int32,
    Int64,
    UInt32,
    UInt64,
    Bool,
    Float,
    Double,
    String,
    Bytes,
}

impl ScalarType {
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::UInt32 => "uint32",
            ScalarType::UInt64 => "uint64",
            ScalarType::Bool => "bool",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
            ScalarType::String => "string",
            ScalarType::Bytes => "bytes",
        }
    }

    /// Whether or not this type may be used as the key of a map field.
    pub fn is_valid_map_key(&self) -> bool {
        !matches!(
            self,
            ScalarType::Float | ScalarType::Double | ScalarType::Bytes
        )
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type of a single value: a singular field, one entry of a repeated field or
/// the value half of a map entry.
///
/// Enums and messages are referenced by their fully qualified name and are
/// resolved through the [Registry](crate::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Scalar(ScalarType),
    Enum(&'static str),
    Message(&'static str),
}

impl ElementType {
    pub fn referenced_type(&self) -> Option<&'static str> {
        match self {
            ElementType::Scalar(_) => None,
            ElementType::Enum(name) | ElementType::Message(name) => Some(name),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Scalar(s) => write!(f, "{}", s),
            ElementType::Enum(name) => write!(f, "enum<{}>", name),
            ElementType::Message(name) => write!(f, "message<{}>", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Singular(ElementType),
    Repeated(ElementType),
    Map(ScalarType, ElementType),
}

impl FieldType {
    pub fn element(&self) -> ElementType {
        match self {
            FieldType::Singular(e) | FieldType::Repeated(e) | FieldType::Map(_, e) => *e,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Singular(e) => write!(f, "{}", e),
            FieldType::Repeated(e) => write!(f, "repeated<{}>", e),
            FieldType::Map(k, v) => write!(f, "map<{}, {}>", k, v),
        }
    }
}
