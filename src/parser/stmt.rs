use crate::{
    ast::{
        expressions::{AssignmentExpr, Expr, ExprKind, PatternName},
        statements::{
            Block, ExpressionStmt, ForStmt, FunctionDeclaration, Stmt, StmtKind, TypeAlias,
            VariableDeclaration,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{
        expr::{parse_expr, parse_parameters},
        lookups::BindingPower,
    },
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();
    let expression = parse_expr(parser, BindingPower::Default)?;
    let terminated = parser.end_statement()?;

    Ok(Stmt::new(
        StmtKind::Expression(ExpressionStmt {
            expression,
            terminated,
        }),
        parser.span_from(start),
    ))
}

/// `{ stmt* }`
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = vec![];
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Block {
        body,
        span: parser.span_from(start),
    })
}

/// Either a single identifier or `(a, b, ...)`.
fn parse_binding_target(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Identifier => {
            parser.advance();
            Ok(Expr::new(ExprKind::Identifier(token.value), token.span))
        }
        TokenKind::OpenParen => {
            parser.advance();

            let mut names = vec![];
            while parser.current_token_kind() != TokenKind::CloseParen {
                let error = parser.unexpected("expected identifier in tuple pattern");
                let name = parser.expect_error(TokenKind::Identifier, Some(error))?;
                names.push(PatternName {
                    name: name.value,
                    span: name.span,
                });

                if parser.current_token_kind() == TokenKind::Comma {
                    parser.advance();
                } else {
                    break;
                }
            }

            parser.expect(TokenKind::CloseParen)?;

            Ok(Expr::new(
                ExprKind::TuplePattern(names),
                parser.span_from(token.span.start),
            ))
        }
        _ => Err(parser.unexpected("expected identifier during variable declaration")),
    }
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.advance().clone();
    let constant = start_token.kind == TokenKind::Const;

    let target = parse_binding_target(parser)?;

    let annotation = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let missing_value = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected `=` and an initial value"),
        },
        parser.get_position(),
    );
    parser.expect_error(TokenKind::Assignment, Some(missing_value))?;

    let value = parse_expr(parser, BindingPower::Default)?;
    let span = target.span.to(&value.span);

    parser.end_statement()?;

    Ok(Stmt::new(
        StmtKind::VarDecl(VariableDeclaration {
            constant,
            assignment: AssignmentExpr {
                target: Box::new(target),
                value: Box::new(value),
                annotation,
                span,
            },
        }),
        parser.span_from(start_token.span.start),
    ))
}

/// `fn name` starts a declaration, anything else after `fn` is a lambda
/// used as an expression statement.
pub fn parse_fn_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if parser.peek(1).kind != TokenKind::Identifier {
        return parse_expression_stmt(parser);
    }

    let start = parser.expect(TokenKind::Fn)?.span.start;
    let name = parser.expect(TokenKind::Identifier)?.value;

    let mut type_parameters = vec![];
    if parser.current_token_kind() == TokenKind::Less {
        parser.advance();

        while parser.current_token_kind() != TokenKind::Greater {
            type_parameters.push(parser.expect(TokenKind::Identifier)?.value);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }

        parser.expect(TokenKind::Greater)?;
    }

    let parameters = parse_parameters(parser)?;

    let return_annotation = if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let body = parse_block(parser)?;

    Ok(Stmt::new(
        StmtKind::FnDecl(FunctionDeclaration {
            name,
            type_parameters,
            parameters,
            return_annotation,
            body,
        }),
        parser.span_from(start),
    ))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Return)?.span.start;

    let value = match parser.current_token_kind() {
        TokenKind::Semicolon | TokenKind::CloseCurly | TokenKind::EOF => None,
        _ => Some(parse_expr(parser, BindingPower::Default)?),
    };

    parser.end_statement()?;

    Ok(Stmt::new(StmtKind::Return(value), parser.span_from(start)))
}

/// `for binding in iterable { ... }`
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::For)?.span.start;

    let binding = parse_binding_target(parser)?;
    parser.expect(TokenKind::In)?;
    let iterable = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Stmt::new(
        StmtKind::For(ForStmt {
            binding,
            iterable,
            body,
        }),
        parser.span_from(start),
    ))
}

/// `type Name = Annotation;`
pub fn parse_type_alias_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Type)?.span.start;

    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Assignment)?;
    let annotation = parse_type(parser, BindingPower::Default)?;

    parser.end_statement()?;

    Ok(Stmt::new(
        StmtKind::TypeAlias(TypeAlias { name, annotation }),
        parser.span_from(start),
    ))
}
