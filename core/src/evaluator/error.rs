use thiserror::Error;

/// Broad category of a [`RuntimeError`], for callers that only need to
/// branch on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A name missing from the environment.
    Lookup,
    /// An operation applied to values of the wrong type.
    Type,
    Attribute,
    Index,
    Key,
    Arithmetic,
    /// A value of the right type but an unacceptable content.
    Value,
    /// Raised by a host function or object.
    Host,
}

/// A failure while evaluating an expression, raised identically by the
/// tree-walking evaluator and the VM.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("name '{name}' is not defined")]
    NameNotFound { name: String },

    #[error("unsupported operand type(s) for {op}: '{left}' and '{right}'")]
    UnsupportedOperands {
        op: &'static str,
        left: String,
        right: String,
    },

    #[error("bad operand type for unary {op}: '{operand}'")]
    BadOperand { op: &'static str, operand: String },

    #[error("'{op}' not supported between instances of '{left}' and '{right}'")]
    NotComparable {
        op: &'static str,
        left: String,
        right: String,
    },

    #[error("'{type_name}' object has no attribute '{attr}'")]
    AttributeNotFound { type_name: String, attr: String },

    #[error("'{type_name}' object is not callable")]
    NotCallable { type_name: String },

    #[error("'{type_name}' object is not subscriptable")]
    NotSubscriptable { type_name: String },

    #[error("{type_name} indices must be integers, not '{index_type}'")]
    InvalidIndex {
        type_name: String,
        index_type: String,
    },

    #[error("slice indices must be integers or None, not '{index_type}'")]
    InvalidSliceIndex { index_type: String },

    #[error("slice step cannot be zero")]
    ZeroSliceStep,

    #[error("{type_name} index {index} out of range for length {len}")]
    IndexOutOfBounds {
        type_name: String,
        index: i64,
        len: usize,
    },

    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in {op}")]
    IntegerOverflow { op: &'static str },

    #[error("repeated {type_name} would exceed the maximum length of {limit}")]
    RepeatTooLarge {
        type_name: &'static str,
        limit: usize,
    },

    #[error("{name}() takes {expected} argument(s) ({got} given)")]
    ArgumentCount {
        name: String,
        expected: String,
        got: usize,
    },

    #[error("{function}() argument must be {expected}, not '{found}'")]
    ArgumentType {
        function: String,
        expected: &'static str,
        found: String,
    },

    #[error("invalid literal for {function}(): {literal}")]
    InvalidLiteral {
        function: &'static str,
        literal: String,
    },

    #[error("{message}")]
    InvalidValue { message: String },

    /// Free-form error raised by host code.
    #[error("{0}")]
    Host(String),
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::NameNotFound { .. } => ErrorKind::Lookup,
            RuntimeError::UnsupportedOperands { .. }
            | RuntimeError::BadOperand { .. }
            | RuntimeError::NotComparable { .. }
            | RuntimeError::NotCallable { .. }
            | RuntimeError::NotSubscriptable { .. }
            | RuntimeError::InvalidIndex { .. }
            | RuntimeError::InvalidSliceIndex { .. }
            | RuntimeError::ArgumentCount { .. }
            | RuntimeError::ArgumentType { .. } => ErrorKind::Type,
            RuntimeError::AttributeNotFound { .. } => ErrorKind::Attribute,
            RuntimeError::IndexOutOfBounds { .. } => ErrorKind::Index,
            RuntimeError::KeyNotFound { .. } => ErrorKind::Key,
            RuntimeError::DivisionByZero
            | RuntimeError::IntegerOverflow { .. }
            | RuntimeError::RepeatTooLarge { .. } => ErrorKind::Arithmetic,
            RuntimeError::ZeroSliceStep
            | RuntimeError::InvalidLiteral { .. }
            | RuntimeError::InvalidValue { .. } => ErrorKind::Value,
            RuntimeError::Host(_) => ErrorKind::Host,
        }
    }

    /// Convenience constructor for host functions.
    pub fn host(message: impl Into<String>) -> Self {
        RuntimeError::Host(message.into())
    }
}
