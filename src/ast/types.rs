//! Type annotation syntax.
//!
//! Annotations are what the parser reads after `:`, `->` and `as`, and
//! in `type` aliases. The type checker resolves them into
//! [`crate::type_checker::types::Type`] values.

use crate::Span;

use super::expressions::LiteralValue;

/// The built-in type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordType {
    Integer,
    Float,
    Number,
    Boolean,
    String,
    Symbol,
    Nil,
    Any,
    Never,
    Unknown,
}

impl KeywordType {
    pub fn from_name(name: &str) -> Option<KeywordType> {
        match name {
            "Integer" => Some(KeywordType::Integer),
            "Float" => Some(KeywordType::Float),
            "Number" => Some(KeywordType::Number),
            "Boolean" => Some(KeywordType::Boolean),
            "String" => Some(KeywordType::String),
            "Symbol" => Some(KeywordType::Symbol),
            "Nil" => Some(KeywordType::Nil),
            "Any" => Some(KeywordType::Any),
            "Never" => Some(KeywordType::Never),
            "Unknown" => Some(KeywordType::Unknown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub kind: TypeAnnotationKind,
    pub span: Span,
}

impl TypeAnnotation {
    pub fn new(kind: TypeAnnotationKind, span: Span) -> Self {
        TypeAnnotation { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotationKind {
    Keyword(KeywordType),
    /// Alias or type variable reference
    Named(String),
    /// `{ a: T, b: U }`
    Literal(Vec<PropertyType>),
    Singleton(LiteralValue),
    Union(Vec<TypeAnnotation>),
    Intersection(Vec<TypeAnnotation>),
    Tuple(Vec<TypeAnnotation>),
    Vector(Box<TypeAnnotation>),
    Function {
        parameters: Vec<TypeAnnotation>,
        return_type: Box<TypeAnnotation>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyType {
    pub name: String,
    pub annotation: TypeAnnotation,
    pub span: Span,
}
