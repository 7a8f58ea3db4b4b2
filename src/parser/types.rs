//! Type parsing implementation.
//!
//! This module handles parsing of type annotations and type expressions.
//! It supports:
//!
//! - Keyword types (`Integer`, `String`, `Any`, ...) and named types
//! - Singleton types (`1`, `"a"`, `'sym`, `true`)
//! - Type literals (`{ a: Integer }`)
//! - Tuple and function types (`(A, B)`, `(A) -> B`)
//! - Vector types (`T[]`)
//! - Unions and intersections (`A | B & C`)
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers for parsing complex type expressions.

use std::collections::HashMap;

use crate::{
    ast::{
        expressions::LiteralValue,
        types::{KeywordType, PropertyType, TypeAnnotation, TypeAnnotationKind},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeAnnotation, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler =
    fn(&mut Parser, TypeAnnotation, BindingPower) -> Result<TypeAnnotation, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
///
/// Registers NUD and LED handlers for parsing type expressions.
///
/// # Arguments
///
/// * `parser` - Mutable reference to the parser to initialize
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    parser.type_nud(TokenKind::Nil, parse_symbol_type);
    parser.type_nud(TokenKind::Integer, parse_singleton_type);
    parser.type_nud(TokenKind::Float, parse_singleton_type);
    parser.type_nud(TokenKind::String, parse_singleton_type);
    parser.type_nud(TokenKind::Symbol, parse_singleton_type);
    parser.type_nud(TokenKind::True, parse_singleton_type);
    parser.type_nud(TokenKind::False, parse_singleton_type);
    parser.type_nud(TokenKind::OpenCurly, parse_literal_type);
    parser.type_nud(TokenKind::OpenParen, parse_grouping_type);

    parser.type_led(TokenKind::Pipe, BindingPower::Logical, parse_union_type);
    parser.type_led(TokenKind::Ampersand, BindingPower::Relational, parse_intersection_type);
    parser.type_led(TokenKind::OpenBracket, BindingPower::Call, parse_array_type);
}

/// Keyword type names resolve here, anything else is a named reference.
pub fn parse_symbol_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let token = parser.advance().clone();

    let kind = if token.kind == TokenKind::Nil {
        TypeAnnotationKind::Keyword(KeywordType::Nil)
    } else {
        match KeywordType::from_name(&token.value) {
            Some(keyword) => TypeAnnotationKind::Keyword(keyword),
            None => TypeAnnotationKind::Named(token.value.clone()),
        }
    };

    Ok(TypeAnnotation::new(kind, token.span))
}

pub fn parse_singleton_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let token = parser.advance().clone();

    let value = match token.kind {
        TokenKind::Integer => LiteralValue::Integer(token.value.parse().map_err(|_| {
            Error::new(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            )
        })?),
        TokenKind::Float => LiteralValue::Float(token.value.parse().map_err(|_| {
            Error::new(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            )
        })?),
        TokenKind::String => LiteralValue::String(token.value.clone()),
        TokenKind::Symbol => LiteralValue::Symbol(token.value.clone()),
        TokenKind::True => LiteralValue::Boolean(true),
        TokenKind::False => LiteralValue::Boolean(false),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value },
                token.span.start,
            ))
        }
    };

    Ok(TypeAnnotation::new(TypeAnnotationKind::Singleton(value), token.span))
}

/// `{ name: Type, ... }`
pub fn parse_literal_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut properties = vec![];

    while parser.current_token_kind() != TokenKind::CloseCurly {
        let name = match parser.current_token_kind() {
            TokenKind::Identifier | TokenKind::String => parser.advance().clone(),
            _ => return Err(parser.unexpected("expected a property name")),
        };

        parser.expect(TokenKind::Colon)?;
        let annotation = parse_type(parser, BindingPower::Default)?;

        properties.push(PropertyType {
            span: name.span.to(&annotation.span),
            name: name.value,
            annotation,
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(TypeAnnotation::new(
        TypeAnnotationKind::Literal(properties),
        parser.span_from(start),
    ))
}

/// `(A)`, `(A, B)`, `()` and `(A, B) -> R`
pub fn parse_grouping_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let start = parser.expect(TokenKind::OpenParen)?.span.start;

    let mut elements = vec![];
    let mut trailing_comma = false;

    while parser.current_token_kind() != TokenKind::CloseParen {
        elements.push(parse_type(parser, BindingPower::Default)?);
        trailing_comma = false;

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            trailing_comma = true;
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        let return_type = parse_type(parser, BindingPower::Default)?;

        return Ok(TypeAnnotation::new(
            TypeAnnotationKind::Function {
                parameters: elements,
                return_type: Box::new(return_type),
            },
            parser.span_from(start),
        ));
    }

    if elements.len() == 1 && !trailing_comma {
        if let Some(inner) = elements.pop() {
            return Ok(inner);
        }
    }

    Ok(TypeAnnotation::new(
        TypeAnnotationKind::Tuple(elements),
        parser.span_from(start),
    ))
}

pub fn parse_union_type(
    parser: &mut Parser,
    left: TypeAnnotation,
    bp: BindingPower,
) -> Result<TypeAnnotation, Error> {
    parser.expect(TokenKind::Pipe)?;
    let right = parse_type(parser, bp)?;

    let span = left.span.to(&right.span);
    let mut members = match left.kind {
        TypeAnnotationKind::Union(members) => members,
        _ => vec![left],
    };
    members.push(right);

    Ok(TypeAnnotation::new(TypeAnnotationKind::Union(members), span))
}

pub fn parse_intersection_type(
    parser: &mut Parser,
    left: TypeAnnotation,
    bp: BindingPower,
) -> Result<TypeAnnotation, Error> {
    parser.expect(TokenKind::Ampersand)?;
    let right = parse_type(parser, bp)?;

    let span = left.span.to(&right.span);
    let mut members = match left.kind {
        TypeAnnotationKind::Intersection(members) => members,
        _ => vec![left],
    };
    members.push(right);

    Ok(TypeAnnotation::new(
        TypeAnnotationKind::Intersection(members),
        span,
    ))
}

pub fn parse_array_type(
    parser: &mut Parser,
    left: TypeAnnotation,
    _bp: BindingPower,
) -> Result<TypeAnnotation, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    parser.expect(TokenKind::CloseBracket)?;

    let span = parser.span_from(left.span.start.clone());
    Ok(TypeAnnotation::new(
        TypeAnnotationKind::Vector(Box::new(left)),
        span,
    ))
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeAnnotation, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_type_nud_lookup().get(&token_kind) {
        Some(handler) => *handler,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while let Some(next_bp) = parser
        .get_type_bp_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        if next_bp <= bp {
            break;
        }

        let token_kind = parser.current_token_kind();
        let led = match parser.get_type_led_lookup().get(&token_kind) {
            Some(handler) => *handler,
            None => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                ))
            }
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}
