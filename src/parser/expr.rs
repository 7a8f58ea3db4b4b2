use crate::{
    ast::{
        expressions::{
            AsExpr, AssignmentExpr, BinaryExpr, CallExpr, Expr, ExprKind, LambdaBody, LambdaExpr,
            LiteralValue, MemberExpr, MemberProperty, ObjectProperty, Parameter, SliceExpr,
            UnaryExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block, types::parse_type};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
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
    while let Some(next_bp) = parser.get_bp_lookup().get(&parser.current_token_kind()).copied() {
        if next_bp <= bp {
            break;
        }

        let token_kind = parser.current_token_kind();
        let led = match parser.get_led_lookup().get(&token_kind) {
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

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    let kind = match token.kind {
        TokenKind::Integer => match token.value.parse::<i64>() {
            Ok(value) => ExprKind::Literal(LiteralValue::Integer(value)),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span.start,
                ))
            }
        },
        TokenKind::Float => match token.value.parse::<f64>() {
            Ok(value) => ExprKind::Literal(LiteralValue::Float(value)),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span.start,
                ))
            }
        },
        TokenKind::String => ExprKind::Literal(LiteralValue::String(token.value.clone())),
        TokenKind::Symbol => ExprKind::Literal(LiteralValue::Symbol(token.value.clone())),
        TokenKind::True => ExprKind::Literal(LiteralValue::Boolean(true)),
        TokenKind::False => ExprKind::Literal(LiteralValue::Boolean(false)),
        TokenKind::Nil => ExprKind::Literal(LiteralValue::Nil),
        TokenKind::Identifier => ExprKind::Identifier(token.value.clone()),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value },
                token.span.start,
            ))
        }
    };

    parser.advance();
    Ok(Expr::new(kind, token.span))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator = parser.advance().clone();
    let right = parse_expr(parser, bp)?;

    let span = left.span.to(&right.span);
    Ok(Expr::new(
        ExprKind::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }),
        span,
    ))
}

pub fn parse_logical_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator = parser.advance().clone();
    let right = parse_expr(parser, bp)?;

    let span = left.span.to(&right.span);
    Ok(Expr::new(
        ExprKind::Logical(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }),
        span,
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator = parser.advance().clone();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    let span = Span {
        start: operator.span.start.clone(),
        end: operand.span.end.clone(),
    };
    Ok(Expr::new(
        ExprKind::Unary(UnaryExpr {
            operator,
            operand: Box::new(operand),
        }),
        span,
    ))
}

/// `target = value`, right associative.
pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();
    let value = parse_expr(parser, BindingPower::Comma)?;

    let span = left.span.to(&value.span);
    Ok(Expr::new(
        ExprKind::Assignment(AssignmentExpr {
            target: Box::new(left),
            value: Box::new(value),
            annotation: None,
            span: span.clone(),
        }),
        span,
    ))
}

pub fn parse_as_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::As)?;
    let annotation = parse_type(parser, BindingPower::Default)?;

    let span = left.span.to(&annotation.span);
    Ok(Expr::new(
        ExprKind::As(AsExpr {
            expression: Box::new(left),
            annotation,
        }),
        span,
    ))
}

/// `(expr)`, `()` and `(a, b, ...)`
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::OpenParen)?.span.start;

    if parser.current_token_kind() == TokenKind::CloseParen {
        parser.advance();
        return Ok(Expr::new(ExprKind::Tuple(vec![]), parser.span_from(start)));
    }

    let first = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() != TokenKind::Comma {
        parser.expect(TokenKind::CloseParen)?;
        return Ok(Expr::new(
            ExprKind::Parenthesized(Box::new(first)),
            parser.span_from(start),
        ));
    }

    let mut elements = vec![first];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        if parser.current_token_kind() == TokenKind::CloseParen {
            break;
        }
        elements.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::new(ExprKind::Tuple(elements), parser.span_from(start)))
}

pub fn parse_object_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // { name: value, other: value }
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut properties = vec![];

    while parser.current_token_kind() != TokenKind::CloseCurly {
        let name = match parser.current_token_kind() {
            TokenKind::Identifier | TokenKind::String => parser.advance().clone(),
            _ => return Err(parser.unexpected("expected a property name")),
        };

        parser.expect(TokenKind::Colon)?;
        let value = parse_expr(parser, BindingPower::Comma)?;

        properties.push(ObjectProperty {
            span: Span {
                start: name.span.start.clone(),
                end: value.span.end.clone(),
            },
            name: name.value,
            value,
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::new(ExprKind::Object(properties), parser.span_from(start)))
}

pub fn parse_vector_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::OpenBracket)?.span.start;

    let mut elements = vec![];

    while parser.current_token_kind() != TokenKind::CloseBracket {
        elements.push(parse_expr(parser, BindingPower::Comma)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::new(ExprKind::Vector(elements), parser.span_from(start)))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let mut arguments = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser, BindingPower::Comma)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let span = parser.span_from(left.span.start.clone());
    Ok(Expr::new(
        ExprKind::Call(CallExpr {
            callee: Box::new(left),
            arguments,
        }),
        span,
    ))
}

/// `object.name` and `tuple.0`
pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::Dot)?;

    let token = parser.current_token().clone();
    let property = match token.kind {
        TokenKind::Identifier => MemberProperty::Named(token.value.clone()),
        TokenKind::Integer => {
            let index = parse_primary_expr(parser)?;
            let span = parser.span_from(left.span.start.clone());
            return Ok(Expr::new(
                ExprKind::Member(MemberExpr {
                    object: Box::new(left),
                    property: MemberProperty::Computed(Box::new(index)),
                }),
                span,
            ));
        }
        _ => return Err(parser.unexpected("expected a property name or tuple index")),
    };
    parser.advance();

    let span = parser.span_from(left.span.start.clone());
    Ok(Expr::new(
        ExprKind::Member(MemberExpr {
            object: Box::new(left),
            property,
        }),
        span,
    ))
}

/// `object[index]`, `object[start:end]` with either bound optional
pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenBracket)?;

    let start = if parser.current_token_kind() == TokenKind::Colon {
        None
    } else {
        Some(Box::new(parse_expr(parser, BindingPower::Default)?))
    };

    if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();

        let end = if parser.current_token_kind() == TokenKind::CloseBracket {
            None
        } else {
            Some(Box::new(parse_expr(parser, BindingPower::Default)?))
        };

        parser.expect(TokenKind::CloseBracket)?;

        let span = parser.span_from(left.span.start.clone());
        return Ok(Expr::new(
            ExprKind::Slice(SliceExpr {
                object: Box::new(left),
                start,
                end,
            }),
            span,
        ));
    }

    parser.expect(TokenKind::CloseBracket)?;

    let index = match start {
        Some(index) => index,
        None => return Err(parser.unexpected("expected an index")),
    };

    let span = parser.span_from(left.span.start.clone());
    Ok(Expr::new(
        ExprKind::Member(MemberExpr {
            object: Box::new(left),
            property: MemberProperty::Computed(index),
        }),
        span,
    ))
}

/// Parses `(name [: Type], ...)`.
pub fn parse_parameters(parser: &mut Parser) -> Result<Vec<Parameter>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        let name = parser.expect(TokenKind::Identifier)?;

        let annotation = if parser.current_token_kind() == TokenKind::Colon {
            parser.advance();
            Some(parse_type(parser, BindingPower::Default)?)
        } else {
            None
        };

        parameters.push(Parameter {
            span: parser.span_from(name.span.start.clone()),
            name: name.value,
            annotation,
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(parameters)
}

/// `fn (params) [-> Type] => expr` or `fn (params) [-> Type] { ... }`
pub fn parse_lambda_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::Fn)?.span.start;

    let parameters = parse_parameters(parser)?;

    let return_annotation = if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let body = match parser.current_token_kind() {
        TokenKind::FatArrow => {
            parser.advance();
            LambdaBody::Expression(Box::new(parse_expr(parser, BindingPower::Comma)?))
        }
        TokenKind::OpenCurly => LambdaBody::Block(parse_block(parser)?),
        _ => return Err(parser.unexpected("expected `=>` or a block after the parameter list")),
    };

    Ok(Expr::new(
        ExprKind::Lambda(LambdaExpr {
            parameters,
            return_annotation,
            body,
        }),
        parser.span_from(start),
    ))
}
