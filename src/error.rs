use crate::types::ScalarType;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Classification of an [Error], ignoring any field/element context attached
/// to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TypeMismatch,
    RangeError,
    EncodingError,
    UndefinedValue,
    UndefinedName,
    UnknownField,
    NoPresence,
    IndexOutOfRange,
    Registration,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("value {value} is out of range for {ty}")]
    RangeError { value: String, ty: ScalarType },

    #[error("invalid utf-8 in string value (valid up to byte {valid_up_to})")]
    EncodingError { valid_up_to: usize },

    #[error("enum {enumeration} has no name defined for value {value}")]
    UndefinedValue {
        enumeration: &'static str,
        value: i128,
    },

    #[error("enum {enumeration} has no value defined for name {name}")]
    UndefinedName {
        enumeration: &'static str,
        name: String,
    },

    #[error("record {record} has no field named {field}")]
    UnknownField { record: &'static str, field: String },

    #[error("field {record}.{field} does not track presence")]
    NoPresence {
        record: &'static str,
        field: &'static str,
    },

    #[error("index {index} is out of range for a repeated field of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("registration failed: {0}")]
    Registration(String),

    #[error("{record}.{field}: {source}")]
    InField {
        record: &'static str,
        field: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("element {index}: {source}")]
    InElement {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("entry {key}: {source}")]
    InEntry {
        key: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn mismatch(expected: impl ToString, found: impl ToString) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub(crate) fn range(value: impl ToString, ty: ScalarType) -> Self {
        Error::RangeError {
            value: value.to_string(),
            ty,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::RangeError { .. } => ErrorKind::RangeError,
            Error::EncodingError { .. } => ErrorKind::EncodingError,
            Error::UndefinedValue { .. } => ErrorKind::UndefinedValue,
            Error::UndefinedName { .. } => ErrorKind::UndefinedName,
            Error::UnknownField { .. } => ErrorKind::UnknownField,
            Error::NoPresence { .. } => ErrorKind::NoPresence,
            Error::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Error::Registration(_) => ErrorKind::Registration,
            Error::InField { source, .. }
            | Error::InElement { source, .. }
            | Error::InEntry { source, .. } => source.kind(),
        }
    }

    /// Strips all context wrappers, returning the error that was originally
    /// raised.
    pub fn root(&self) -> &Error {
        match self {
            Error::InField { source, .. }
            | Error::InElement { source, .. }
            | Error::InEntry { source, .. } => source.root(),
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_looks_through_context() {
        let err = Error::InField {
            record: "grpc.testing.RpcsByPeer",
            field: "rpcs_by_peer",
            source: Box::new(Error::InEntry {
                key: "\"peer\"".into(),
                source: Box::new(Error::range("3000000000", ScalarType::Int32)),
            }),
        };

        assert_eq!(err.kind(), ErrorKind::RangeError);
        assert_eq!(err.root(), &Error::range("3000000000", ScalarType::Int32));
        assert_eq!(
            err.to_string(),
            "grpc.testing.RpcsByPeer.rpcs_by_peer: entry \"peer\": value 3000000000 is out of range for int32"
        );
    }
}
