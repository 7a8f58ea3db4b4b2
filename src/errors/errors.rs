use std::{fmt::Display, slice::Iter};

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::ReferenceBeforeInitialization { .. } => "ReferenceBeforeInitialization",
            ErrorImpl::IllegalConstantAssignment { .. } => "IllegalConstantAssignment",
            ErrorImpl::AlreadyDeclared { .. } => "AlreadyDeclared",
            ErrorImpl::UnknownNodeKind { .. } => "UnknownNodeKind",
            ErrorImpl::ScopeTopologyMismatch { .. } => "ScopeTopologyMismatch",
            ErrorImpl::ScopeAlreadyExists { .. } => "ScopeAlreadyExists",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::PropertyNotFound { .. } => "PropertyNotFound",
            ErrorImpl::DuplicateProperty { .. } => "DuplicateProperty",
            ErrorImpl::IndexOutOfBounds { .. } => "IndexOutOfBounds",
            ErrorImpl::NotIndexable { .. } => "NotIndexable",
            ErrorImpl::NotIterable { .. } => "NotIterable",
            ErrorImpl::InvalidOperands { .. } => "InvalidOperands",
            ErrorImpl::InvalidOperand { .. } => "InvalidOperand",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::PatternArityMismatch { .. } => "PatternArityMismatch",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::UnresolvedType => "UnresolvedType",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::InvalidAssignmentTarget => ErrorTip::Suggestion(String::from(
                "Only identifiers and member expressions can be assigned to",
            )),
            ErrorImpl::ReferenceBeforeInitialization { name } => ErrorTip::Suggestion(format!(
                "Cannot reference `{}` prior to initialization",
                name
            )),
            ErrorImpl::IllegalConstantAssignment { name } => ErrorTip::Suggestion(format!(
                "Illegal assignment to constant variable `{}`",
                name
            )),
            ErrorImpl::AlreadyDeclared { name } => ErrorTip::Suggestion(format!(
                "Identifier `{}` has already been declared in the current scope",
                name
            )),
            ErrorImpl::UnknownNodeKind { kind } => ErrorTip::Suggestion(format!(
                "`{}` cannot be type checked in this position",
                kind
            )),
            ErrorImpl::ScopeTopologyMismatch { scope } => {
                ErrorTip::Suggestion(format!("Could not resolve environment `{}`", scope))
            }
            ErrorImpl::ScopeAlreadyExists { scope } => {
                ErrorTip::Suggestion(format!("Environment `{}` already exists", scope))
            }
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::UnexpectedArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::MissingArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::NotCallable { type_ } => {
                ErrorTip::Suggestion(format!("Type `{}` is not callable", type_))
            }
            ErrorImpl::PropertyNotFound { property, type_ } => ErrorTip::Suggestion(format!(
                "Property `{}` does not exist on type `{}`",
                property, type_
            )),
            ErrorImpl::DuplicateProperty { property } => {
                ErrorTip::Suggestion(format!("Property `{}` is specified more than once", property))
            }
            ErrorImpl::IndexOutOfBounds { index, length } => ErrorTip::Suggestion(format!(
                "Index {} is out of bounds for a tuple of length {}",
                index, length
            )),
            ErrorImpl::NotIndexable { type_ } => {
                ErrorTip::Suggestion(format!("Type `{}` cannot be indexed", type_))
            }
            ErrorImpl::NotIterable { type_ } => {
                ErrorTip::Suggestion(format!("Type `{}` is not iterable", type_))
            }
            ErrorImpl::InvalidOperands {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}` and `{}`",
                operator, left, right
            )),
            ErrorImpl::InvalidOperand { operator, operand } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}`",
                operator, operand
            )),
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::PatternArityMismatch { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Pattern binds {} names but the value has {} elements",
                    expected, received
                ))
            }
            ErrorImpl::ReturnOutsideFunction => ErrorTip::Suggestion(String::from(
                "Return statements are only allowed inside function bodies",
            )),
            ErrorImpl::UnresolvedType => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("cannot reference name {name:?} prior to initialization")]
    ReferenceBeforeInitialization { name: String },
    #[error("illegal assignment to constant variable {name:?}")]
    IllegalConstantAssignment { name: String },
    #[error("identifier {name:?} has already been declared")]
    AlreadyDeclared { name: String },
    #[error("unknown AST node type {kind}")]
    UnknownNodeKind { kind: String },
    #[error("could not resolve environment {scope:?}")]
    ScopeTopologyMismatch { scope: String },
    #[error("environment {scope:?} already exists")]
    ScopeAlreadyExists { scope: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMismatch { expected: String, received: String },
    #[error("unexpected arguments: expected {expected:?}, received {received:?}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("missing arguments: expected {expected:?}, received {received:?}")]
    MissingArguments { expected: usize, received: usize },
    #[error("type {type_} is not callable")]
    NotCallable { type_: String },
    #[error("property {property:?} not found on type {type_}")]
    PropertyNotFound { property: String, type_: String },
    #[error("duplicate property {property:?}")]
    DuplicateProperty { property: String },
    #[error("index {index} out of bounds for length {length}")]
    IndexOutOfBounds { index: i64, length: usize },
    #[error("type {type_} is not indexable")]
    NotIndexable { type_: String },
    #[error("type {type_} is not iterable")]
    NotIterable { type_: String },
    #[error("invalid operands for {operator}: {left} and {right}")]
    InvalidOperands {
        operator: String,
        left: String,
        right: String,
    },
    #[error("invalid operand for {operator}: {operand}")]
    InvalidOperand { operator: String, operand: String },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("pattern arity mismatch: expected {expected:?}, received {received:?}")]
    PatternArityMismatch { expected: usize, received: usize },
    #[error("return statement outside of function")]
    ReturnOutsideFunction,
    #[error("unresolved type left in bound tree")]
    UnresolvedType,
}

/// Ordered collection of every error reported while processing one
/// compilation unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { errors: vec![] }
    }

    pub fn push(&mut self, error: Error) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Error> {
        self.errors.iter()
    }

    pub fn first(&self) -> Option<&Error> {
        self.errors.first()
    }
}

impl From<Error> for Diagnostics {
    fn from(error: Error) -> Self {
        Diagnostics {
            errors: vec![error],
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Error;
    type IntoIter = Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
