//! Bottom-up type synthesis for expressions.

use std::collections::{HashMap, HashSet};

use crate::{
    ast::expressions::{
        AssignmentExpr, BinaryExpr, CallExpr, Expr, ExprKind, LambdaBody, LambdaExpr, LiteralValue, MemberExpr,
        MemberProperty, ObjectProperty, SliceExpr, UnaryExpr,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    bind::bind,
    bound_ast::{BoundExpr, BoundExprKind, BoundLambdaBody, BoundMember, BoundProperty},
    environment::{ScopeId, ScopeRole},
    type_checker::TypeChecker,
    types::Type,
};

impl TypeChecker<'_> {
    /// Infers the type of `expr`. With `singletons` set, literals are typed
    /// by their value, as constant declarations need.
    pub(super) fn synth(&mut self, expr: &Expr, scope: ScopeId, singletons: bool) -> Result<BoundExpr, Error> {
        let span = expr.span.clone();

        match &expr.kind {
            ExprKind::Literal(value) => {
                let ty = singletons.then(|| Type::Singleton(value.clone()));
                Ok(bind(BoundExprKind::Literal(value.clone()), span, ty))
            }
            ExprKind::Identifier(name) => {
                let binding = self.resolve_identifier(name, scope, &span.start)?;
                Ok(bind(BoundExprKind::Identifier(name.clone()), span, Some(binding.ty)))
            }
            ExprKind::Parenthesized(inner) => {
                let inner = self.synth(inner, scope, singletons)?;
                Ok(bind(BoundExprKind::Parenthesized(Box::new(inner)), span, None))
            }
            ExprKind::Object(properties) => self.synth_object(properties, span, scope, singletons),
            ExprKind::Vector(elements) => {
                let elements = self.synth_all(elements, scope, singletons)?;
                Ok(bind(BoundExprKind::Vector(elements), span, None))
            }
            ExprKind::Tuple(elements) => {
                let elements = self.synth_all(elements, scope, singletons)?;
                Ok(bind(BoundExprKind::Tuple(elements), span, None))
            }
            ExprKind::TuplePattern(_) => Err(Error::new(
                ErrorImpl::UnknownNodeKind {
                    kind: String::from(expr.kind.name()),
                },
                span.start,
            )),
            ExprKind::Member(member) => self.synth_member(member, span, scope),
            ExprKind::Slice(slice) => self.synth_slice(slice, span, scope),
            ExprKind::As(as_expr) => {
                let inner = self.synth(&as_expr.expression, scope, false)?;
                let ty = self.resolve_annotation(&as_expr.annotation, scope)?;
                Ok(bind(BoundExprKind::As(Box::new(inner)), span, Some(ty)))
            }
            ExprKind::Lambda(lambda) => self.synth_lambda(lambda, span, scope, None),
            ExprKind::Call(call) => self.synth_call(call, span, scope),
            ExprKind::Binary(binary) => self.synth_binary(binary, span, scope),
            ExprKind::Logical(logical) => self.synth_logical(logical, span, scope),
            ExprKind::Unary(unary) => self.synth_unary(unary, span, scope),
            ExprKind::Assignment(assignment) => self.synth_assignment(assignment, span, scope),
        }
    }

    fn synth_all(&mut self, exprs: &[Expr], scope: ScopeId, singletons: bool) -> Result<Vec<BoundExpr>, Error> {
        exprs
            .iter()
            .map(|expr| self.synth(expr, scope, singletons))
            .collect()
    }

    fn synth_object(
        &mut self,
        properties: &[ObjectProperty],
        span: Span,
        scope: ScopeId,
        singletons: bool,
    ) -> Result<BoundExpr, Error> {
        let mut seen = HashSet::new();
        let mut bound = vec![];

        for property in properties {
            if !seen.insert(property.name.as_str()) {
                return Err(Error::new(
                    ErrorImpl::DuplicateProperty {
                        property: property.name.clone(),
                    },
                    property.span.start.clone(),
                ));
            }

            bound.push(BoundProperty {
                name: property.name.clone(),
                value: self.synth(&property.value, scope, singletons)?,
            });
        }

        Ok(bind(BoundExprKind::Object(bound), span, None))
    }

    fn synth_member(&mut self, member: &MemberExpr, span: Span, scope: ScopeId) -> Result<BoundExpr, Error> {
        let object = self.synth(&member.object, scope, false)?;

        let (property, ty) = match &member.property {
            MemberProperty::Named(name) => {
                let ty = match object.ty.property(name) {
                    Some(ty) => ty,
                    None => self.recover(
                        Error::new(
                            ErrorImpl::PropertyNotFound {
                                property: name.clone(),
                                type_: object.ty.to_string(),
                            },
                            span.start.clone(),
                        ),
                        Type::Any,
                    )?,
                };
                (BoundMember::Named(name.clone()), ty)
            }
            MemberProperty::Computed(index) => {
                let index = self.synth(index, scope, false)?;
                let ty = self.index_type(&object, &index)?;
                (BoundMember::Computed(Box::new(index)), ty)
            }
        };

        Ok(bind(
            BoundExprKind::Member {
                object: Box::new(object),
                property,
            },
            span,
            Some(ty),
        ))
    }

    /// Type of `object[index]`.
    fn index_type(&self, object: &BoundExpr, index: &BoundExpr) -> Result<Type, Error> {
        if index.ty.contains_unresolved() {
            return Ok(index.ty.clone());
        }

        match &object.ty {
            Type::Any | Type::Unresolved(_) => Ok(object.ty.clone()),
            Type::Vector(element) => {
                self.require_index(index)?;
                Ok(element.as_ref().clone())
            }
            Type::String | Type::Singleton(LiteralValue::String(_)) => {
                self.require_index(index)?;
                Ok(Type::String)
            }
            Type::Tuple(elements) => match literal_index(index) {
                Some(position) if position >= 0 && (position as usize) < elements.len() => {
                    Ok(elements[position as usize].clone())
                }
                Some(position) => self.recover(
                    Error::new(
                        ErrorImpl::IndexOutOfBounds {
                            index: position,
                            length: elements.len(),
                        },
                        index.span.start.clone(),
                    ),
                    Type::Any,
                ),
                None => {
                    self.require_index(index)?;
                    Ok(Type::union(elements.clone()))
                }
            },
            Type::Record(_) | Type::Intersection(_) | Type::Union(_) if literal_key(index).is_some() => {
                let key = literal_key(index).unwrap_or_default();
                match object.ty.property(key) {
                    Some(ty) => Ok(ty),
                    None => self.recover(
                        Error::new(
                            ErrorImpl::PropertyNotFound {
                                property: String::from(key),
                                type_: object.ty.to_string(),
                            },
                            index.span.start.clone(),
                        ),
                        Type::Any,
                    ),
                }
            }
            other => self.recover(
                Error::new(
                    ErrorImpl::NotIndexable {
                        type_: other.to_string(),
                    },
                    object.span.start.clone(),
                ),
                Type::Any,
            ),
        }
    }

    fn require_index(&self, index: &BoundExpr) -> Result<(), Error> {
        if index.ty.is_numeric() || matches!(index.ty, Type::Any | Type::Unresolved(_)) {
            return Ok(());
        }

        self.recover(
            Error::new(
                ErrorImpl::TypeMismatch {
                    expected: Type::Number.to_string(),
                    received: index.ty.to_string(),
                },
                index.span.start.clone(),
            ),
            Type::Any,
        )
        .map(|_| ())
    }

    fn synth_slice(&mut self, slice: &SliceExpr, span: Span, scope: ScopeId) -> Result<BoundExpr, Error> {
        let object = self.synth(&slice.object, scope, false)?;
        let start = match &slice.start {
            Some(start) => Some(self.synth(start, scope, false)?),
            None => None,
        };
        let end = match &slice.end {
            Some(end) => Some(self.synth(end, scope, false)?),
            None => None,
        };

        for bound in start.iter().chain(end.iter()) {
            self.require_index(bound)?;
        }

        let ty = match &object.ty {
            Type::Any | Type::Unresolved(_) | Type::Vector(_) | Type::String => object.ty.clone(),
            Type::Singleton(LiteralValue::String(_)) => Type::String,
            Type::Tuple(elements) => {
                let from = start.as_ref().map(literal_index);
                let to = end.as_ref().map(literal_index);

                match (from, to) {
                    (Some(None), _) | (_, Some(None)) => Type::vector(Type::union(elements.clone())),
                    (from, to) => {
                        let length = elements.len() as i64;
                        let from = from.flatten().unwrap_or(0).clamp(0, length) as usize;
                        let to = to.flatten().unwrap_or(length).clamp(0, length) as usize;
                        Type::Tuple(elements.get(from..to.max(from)).unwrap_or_default().to_vec())
                    }
                }
            }
            other => self.recover(
                Error::new(
                    ErrorImpl::NotIndexable {
                        type_: other.to_string(),
                    },
                    object.span.start.clone(),
                ),
                Type::Any,
            )?,
        };

        Ok(bind(
            BoundExprKind::Slice {
                object: Box::new(object),
                start: start.map(Box::new),
                end: end.map(Box::new),
            },
            span,
            Some(ty),
        ))
    }

    /// Lambdas get a fresh scope. Unannotated parameters take their type
    /// from `context` when it is a function type of the same arity.
    pub(super) fn synth_lambda(
        &mut self,
        lambda: &LambdaExpr,
        span: Span,
        scope: ScopeId,
        context: Option<&Type>,
    ) -> Result<BoundExpr, Error> {
        let lambda_scope = self.enter_scope(scope, ScopeRole::Lambda, "lambda", &span.start)?;

        let expected = match context {
            Some(Type::Function { parameters, .. }) if parameters.len() == lambda.parameters.len() => {
                Some(parameters.as_slice())
            }
            _ => None,
        };

        let parameters = self.bind_parameters(&lambda.parameters, lambda_scope, expected)?;

        let declared = match &lambda.return_annotation {
            Some(annotation) => Some(self.resolve_annotation(annotation, lambda_scope)?),
            None => None,
        };

        let (body, return_type) = match &lambda.body {
            LambdaBody::Expression(expression) => {
                let bound = match &declared {
                    Some(declared) => self.check_expr(expression, declared, lambda_scope)?,
                    None => self.synth(expression, lambda_scope, false)?,
                };
                let return_type = declared.unwrap_or_else(|| bound.ty.clone());
                (BoundLambdaBody::Expression(Box::new(bound)), return_type)
            }
            LambdaBody::Block(block) => {
                let (bound, return_type) = self.check_body(block, lambda_scope, declared)?;
                (BoundLambdaBody::Block(bound), return_type)
            }
        };

        let ty = Type::function(
            parameters.iter().map(|parameter| parameter.ty.clone()).collect(),
            return_type,
        );

        Ok(bind(BoundExprKind::Lambda { parameters, body }, span, Some(ty)))
    }

    fn synth_call(&mut self, call: &CallExpr, span: Span, scope: ScopeId) -> Result<BoundExpr, Error> {
        let callee = self.synth(&call.callee, scope, false)?;

        let (parameters, return_type) = match &callee.ty {
            Type::Function {
                parameters,
                return_type,
            } => (parameters.clone(), return_type.as_ref().clone()),
            Type::Any | Type::Unresolved(_) => {
                let ty = callee.ty.clone();
                let arguments = self.synth_all(&call.arguments, scope, false)?;
                return Ok(bind(
                    BoundExprKind::Call {
                        callee: Box::new(callee),
                        arguments,
                    },
                    span,
                    Some(ty),
                ));
            }
            other => {
                let ty = self.recover(
                    Error::new(
                        ErrorImpl::NotCallable {
                            type_: other.to_string(),
                        },
                        callee.span.start.clone(),
                    ),
                    Type::Any,
                )?;
                let arguments = self.synth_all(&call.arguments, scope, false)?;
                return Ok(bind(
                    BoundExprKind::Call {
                        callee: Box::new(callee),
                        arguments,
                    },
                    span,
                    Some(ty),
                ));
            }
        };

        let expected = parameters.len();
        let received = call.arguments.len();
        let arity = if received > expected {
            Some(ErrorImpl::UnexpectedArguments { expected, received })
        } else if received < expected {
            Some(ErrorImpl::MissingArguments { expected, received })
        } else {
            None
        };

        if let Some(arity) = arity {
            self.recover(Error::new(arity, span.start.clone()), Type::Any)?;
        }

        let mut bindings = HashMap::new();
        let mut arguments = vec![];

        for (index, argument) in call.arguments.iter().enumerate() {
            let bound = match parameters.get(index) {
                Some(parameter) if parameter.contains_variables() => {
                    let bound = self.synth(argument, scope, false)?;
                    let actual = bound.ty.widen();

                    if !actual.contains_unresolved() && !parameter.bind_variables(&actual, &mut bindings) {
                        self.recover(
                            Error::new(
                                ErrorImpl::TypeMismatch {
                                    expected: parameter.substitute(&bindings).to_string(),
                                    received: bound.ty.to_string(),
                                },
                                bound.span.start.clone(),
                            ),
                            Type::Any,
                        )?;
                    }

                    bound
                }
                Some(parameter) => self.check_expr(argument, parameter, scope)?,
                None => self.synth(argument, scope, false)?,
            };

            arguments.push(bound);
        }

        let ty = if return_type.contains_variables() {
            return_type.substitute(&bindings)
        } else {
            return_type
        };

        Ok(bind(
            BoundExprKind::Call {
                callee: Box::new(callee),
                arguments,
            },
            span,
            Some(ty),
        ))
    }

    fn synth_binary(&mut self, binary: &BinaryExpr, span: Span, scope: ScopeId) -> Result<BoundExpr, Error> {
        let left = self.synth(&binary.left, scope, false)?;
        let right = self.synth(&binary.right, scope, false)?;

        let ty = if left.ty.contains_unresolved() {
            left.ty.clone()
        } else if right.ty.contains_unresolved() {
            right.ty.clone()
        } else {
            match binary_type(&binary.operator.kind, &left.ty, &right.ty) {
                Some(ty) => ty,
                None => self.recover(
                    Error::new(
                        ErrorImpl::InvalidOperands {
                            operator: binary.operator.value.clone(),
                            left: left.ty.to_string(),
                            right: right.ty.to_string(),
                        },
                        binary.operator.span.start.clone(),
                    ),
                    Type::Any,
                )?,
            }
        };

        Ok(bind(
            BoundExprKind::Binary {
                left: Box::new(left),
                operator: binary.operator.clone(),
                right: Box::new(right),
            },
            span,
            Some(ty),
        ))
    }

    fn synth_logical(&mut self, logical: &BinaryExpr, span: Span, scope: ScopeId) -> Result<BoundExpr, Error> {
        let left = self.synth(&logical.left, scope, false)?;
        let right = self.synth(&logical.right, scope, false)?;

        let ty = match (left.ty.widen(), right.ty.widen()) {
            (Type::Boolean, Type::Boolean) => Type::Boolean,
            _ => Type::union(vec![left.ty.clone(), right.ty.clone()]),
        };

        Ok(bind(
            BoundExprKind::Logical {
                left: Box::new(left),
                operator: logical.operator.clone(),
                right: Box::new(right),
            },
            span,
            Some(ty),
        ))
    }

    fn synth_unary(&mut self, unary: &UnaryExpr, span: Span, scope: ScopeId) -> Result<BoundExpr, Error> {
        let operand = self.synth(&unary.operand, scope, false)?;

        let ty = match (&unary.operator.kind, operand.ty.widen()) {
            (TokenKind::Not, _) => Type::Boolean,
            (_, ty @ (Type::Any | Type::Unresolved(_))) => ty,
            (TokenKind::Dash, ty) if ty.is_numeric() => ty,
            (_, ty) => self.recover(
                Error::new(
                    ErrorImpl::InvalidOperand {
                        operator: unary.operator.value.clone(),
                        operand: ty.to_string(),
                    },
                    unary.operator.span.start.clone(),
                ),
                Type::Any,
            )?,
        };

        Ok(bind(
            BoundExprKind::Unary {
                operator: unary.operator.clone(),
                operand: Box::new(operand),
            },
            span,
            Some(ty),
        ))
    }

    fn synth_assignment(
        &mut self,
        assignment: &AssignmentExpr,
        span: Span,
        scope: ScopeId,
    ) -> Result<BoundExpr, Error> {
        let target = &assignment.target;

        let target = match &target.kind {
            ExprKind::Identifier(name) => {
                let binding = self.resolve_identifier(name, scope, &target.span.start)?;

                if self.is_final() && binding.constant {
                    return Err(Error::new(
                        ErrorImpl::IllegalConstantAssignment { name: name.clone() },
                        target.span.start.clone(),
                    ));
                }

                bind(
                    BoundExprKind::Identifier(name.clone()),
                    target.span.clone(),
                    Some(binding.ty),
                )
            }
            ExprKind::Member(_) => self.synth(target, scope, false)?,
            _ => {
                return Err(Error::new(
                    ErrorImpl::InvalidAssignmentTarget,
                    target.span.start.clone(),
                ))
            }
        };

        let value = self.check_expr(&assignment.value, &target.ty, scope)?;

        Ok(bind(
            BoundExprKind::Assignment {
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
            None,
        ))
    }
}

/// Result type of a binary operator, or `None` when the operands are not
/// accepted.
fn binary_type(operator: &TokenKind, left: &Type, right: &Type) -> Option<Type> {
    let (left, right) = (left.widen(), right.widen());

    match operator {
        TokenKind::Plus if left == Type::String && right == Type::String => Some(Type::String),
        TokenKind::Plus | TokenKind::Dash | TokenKind::Star | TokenKind::Slash | TokenKind::Percent => {
            match (&left, &right) {
                (Type::Any, _) | (_, Type::Any) => Some(Type::Any),
                // A call that never returns, such as unannotated recursion
                (Type::Never, other) | (other, Type::Never)
                    if other.is_numeric() || *other == Type::Never =>
                {
                    Some(other.clone())
                }
                (Type::Number, r) if r.is_numeric() => Some(Type::Number),
                (l, Type::Number) if l.is_numeric() => Some(Type::Number),
                (Type::Float, r) if r.is_numeric() => Some(Type::Float),
                (l, Type::Float) if l.is_numeric() => Some(Type::Float),
                (Type::Integer, Type::Integer) => Some(Type::Integer),
                _ => None,
            }
        }
        TokenKind::Less | TokenKind::LessEquals | TokenKind::Greater | TokenKind::GreaterEquals => {
            let comparable = |ty: &Type| ty.is_numeric() || matches!(ty, Type::Any | Type::Never);
            let strings = left == Type::String && right == Type::String;
            (strings || (comparable(&left) && comparable(&right))).then_some(Type::Boolean)
        }
        TokenKind::Equals | TokenKind::NotEquals => Some(Type::Boolean),
        _ => None,
    }
}

/// The value of an integer index known at check time.
fn literal_index(index: &BoundExpr) -> Option<i64> {
    match (&index.kind, &index.ty) {
        (_, Type::Singleton(LiteralValue::Integer(value))) => Some(*value),
        (BoundExprKind::Literal(LiteralValue::Integer(value)), _) => Some(*value),
        _ => None,
    }
}

fn literal_key(index: &BoundExpr) -> Option<&str> {
    match (&index.kind, &index.ty) {
        (_, Type::Singleton(LiteralValue::String(key))) => Some(key),
        (BoundExprKind::Literal(LiteralValue::String(key)), _) => Some(key),
        _ => None,
    }
}
