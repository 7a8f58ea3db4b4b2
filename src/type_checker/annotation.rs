use std::collections::HashSet;

use crate::{
    ast::types::{KeywordType, TypeAnnotation, TypeAnnotationKind},
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{environment::ScopeId, type_checker::TypeChecker, types::Type};

impl TypeChecker<'_> {
    /// Turns a written annotation into a type, looking aliases and type
    /// variables up from `scope`.
    pub(super) fn resolve_annotation(&self, annotation: &TypeAnnotation, scope: ScopeId) -> Result<Type, Error> {
        match &annotation.kind {
            TypeAnnotationKind::Keyword(keyword) => Ok(keyword_type(*keyword)),
            TypeAnnotationKind::Named(name) => self.resolve_named_type(name, scope, &annotation.span.start),
            TypeAnnotationKind::Literal(properties) => {
                let mut seen = HashSet::new();
                let mut resolved = vec![];

                for property in properties {
                    if !seen.insert(property.name.as_str()) {
                        return Err(Error::new(
                            ErrorImpl::DuplicateProperty {
                                property: property.name.clone(),
                            },
                            property.span.start.clone(),
                        ));
                    }

                    resolved.push((property.name.clone(), self.resolve_annotation(&property.annotation, scope)?));
                }

                Ok(Type::Record(resolved))
            }
            TypeAnnotationKind::Singleton(value) => Ok(Type::Singleton(value.clone())),
            TypeAnnotationKind::Union(members) => Ok(Type::union(self.resolve_all(members, scope)?)),
            TypeAnnotationKind::Intersection(members) => {
                Ok(Type::intersection(self.resolve_all(members, scope)?))
            }
            TypeAnnotationKind::Tuple(elements) => Ok(Type::Tuple(self.resolve_all(elements, scope)?)),
            TypeAnnotationKind::Vector(element) => Ok(Type::vector(self.resolve_annotation(element, scope)?)),
            TypeAnnotationKind::Function {
                parameters,
                return_type,
            } => Ok(Type::function(
                self.resolve_all(parameters, scope)?,
                self.resolve_annotation(return_type, scope)?,
            )),
        }
    }

    fn resolve_all(&self, annotations: &[TypeAnnotation], scope: ScopeId) -> Result<Vec<Type>, Error> {
        annotations
            .iter()
            .map(|annotation| self.resolve_annotation(annotation, scope))
            .collect()
    }

    // An alias not declared yet is Unresolved in the Preliminary pass; later
    // rounds pick up its declaration. Alias entries are always declared, so
    // the nearest one wins in both passes.
    fn resolve_named_type(&self, name: &str, scope: ScopeId, position: &Position) -> Result<Type, Error> {
        if let Some(ty) = self.env.lookup_type(scope, name) {
            return Ok(ty.clone());
        }

        if self.is_final() {
            Err(Error::new(
                ErrorImpl::UnknownType {
                    type_: String::from(name),
                },
                position.clone(),
            ))
        } else {
            Ok(Type::Unresolved(position.clone()))
        }
    }
}

fn keyword_type(keyword: KeywordType) -> Type {
    match keyword {
        KeywordType::Integer => Type::Integer,
        KeywordType::Float => Type::Float,
        KeywordType::Number => Type::Number,
        KeywordType::Boolean => Type::Boolean,
        KeywordType::String => Type::String,
        KeywordType::Symbol => Type::Symbol,
        KeywordType::Nil => Type::Nil,
        KeywordType::Any => Type::Any,
        KeywordType::Never => Type::Never,
        KeywordType::Unknown => Type::Unknown,
    }
}
