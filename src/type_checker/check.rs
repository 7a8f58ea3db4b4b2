use crate::{
    ast::expressions::{Expr, ExprKind},
    errors::errors::{Error, ErrorImpl},
};

use super::{
    bind::bind,
    bound_ast::{BoundExpr, BoundExprKind},
    environment::ScopeId,
    type_checker::TypeChecker,
    types::{is_assignable, Type},
};

impl TypeChecker<'_> {
    /// Checks `expr` against an expected type.
    ///
    /// Lambdas take their parameter types from an expected function type
    /// and literals take a singleton type when only the singleton fits.
    /// Everything else is synthesized, then tested for assignability.
    pub(super) fn check_expr(&mut self, expr: &Expr, expected: &Type, scope: ScopeId) -> Result<BoundExpr, Error> {
        let span = expr.span.clone();

        let bound = match (&expr.kind, expected) {
            (ExprKind::Lambda(lambda), Type::Function { .. }) => {
                self.synth_lambda(lambda, span, scope, Some(expected))?
            }
            (ExprKind::Parenthesized(inner), _) => {
                let inner = self.check_expr(inner, expected, scope)?;
                return Ok(bind(BoundExprKind::Parenthesized(Box::new(inner)), span, None));
            }
            (ExprKind::Literal(value), _) => {
                let base = Type::of_literal(value);
                let singleton = Type::Singleton(value.clone());

                let ty = if !is_assignable(&base, expected) && is_assignable(&singleton, expected) {
                    singleton
                } else {
                    base
                };

                bind(BoundExprKind::Literal(value.clone()), span, Some(ty))
            }
            _ => self.synth(expr, scope, expected.contains_singletons())?,
        };

        if !self.accepts(&bound.ty, expected) {
            self.recover(
                Error::new(
                    ErrorImpl::TypeMismatch {
                        expected: expected.to_string(),
                        received: bound.ty.to_string(),
                    },
                    bound.span.start.clone(),
                ),
                Type::Any,
            )?;
        }

        Ok(bound)
    }

    /// Assignability, except that the Preliminary pass lets anything that
    /// involves an unresolved placeholder through.
    pub(super) fn accepts(&self, value: &Type, target: &Type) -> bool {
        if !self.is_final() && (value.contains_unresolved() || target.contains_unresolved()) {
            return true;
        }

        is_assignable(value, target)
    }
}
