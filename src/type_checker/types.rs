//! The type model shared by synthesis, checking and binding.

use std::{collections::HashMap, fmt::Display};

use crate::{ast::expressions::LiteralValue, Position};

#[derive(Debug, Clone)]
pub enum Type {
    Integer,
    Float,
    Number,
    Boolean,
    String,
    Symbol,
    Nil,
    /// Named properties, names unique. Compared as a set.
    Record(Vec<(String, Type)>),
    Tuple(Vec<Type>),
    Vector(Box<Type>),
    Function {
        parameters: Vec<Type>,
        return_type: Box<Type>,
    },
    Union(Vec<Type>),
    Intersection(Vec<Type>),
    /// A literal value used as a type. The base kind follows from the value.
    Singleton(LiteralValue),
    Any,
    Never,
    Unknown,
    /// Placeholder for a name referenced before its declaration was seen.
    Unresolved(Position),
    /// Type parameter of a generic function
    Variable(String),
}

impl Type {
    pub fn function(parameters: Vec<Type>, return_type: Type) -> Type {
        Type::Function {
            parameters,
            return_type: Box::new(return_type),
        }
    }

    pub fn vector(element: Type) -> Type {
        Type::Vector(Box::new(element))
    }

    /// The primitive kind of a literal value.
    pub fn of_literal(value: &LiteralValue) -> Type {
        match value {
            LiteralValue::Integer(_) => Type::Integer,
            LiteralValue::Float(_) => Type::Float,
            LiteralValue::String(_) => Type::String,
            LiteralValue::Boolean(_) => Type::Boolean,
            LiteralValue::Symbol(_) => Type::Symbol,
            LiteralValue::Nil => Type::Nil,
        }
    }

    /// Builds a union, flattening nested unions and dropping duplicates and
    /// `Never` members. A single remaining member is returned as is.
    pub fn union(types: Vec<Type>) -> Type {
        let mut members: Vec<Type> = vec![];

        for ty in types {
            let flattened = match ty {
                Type::Union(inner) => inner,
                Type::Never => continue,
                other => vec![other],
            };

            for member in flattened {
                if !members.iter().any(|existing| existing.equals(&member)) {
                    members.push(member);
                }
            }
        }

        match members.len() {
            0 => Type::Never,
            1 => members.remove(0),
            _ => Type::Union(members),
        }
    }

    /// Builds an intersection, flattening nested intersections and dropping
    /// duplicates. An empty intersection is `Unknown`.
    pub fn intersection(types: Vec<Type>) -> Type {
        let mut members: Vec<Type> = vec![];

        for ty in types {
            let flattened = match ty {
                Type::Intersection(inner) => inner,
                other => vec![other],
            };

            for member in flattened {
                if !members.iter().any(|existing| existing.equals(&member)) {
                    members.push(member);
                }
            }
        }

        match members.len() {
            0 => Type::Unknown,
            1 => members.remove(0),
            _ => Type::Intersection(members),
        }
    }

    /// Structural equality. Tuples and function parameters compare in
    /// order; records, unions and intersections compare as sets.
    pub fn equals(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Integer, Type::Integer)
            | (Type::Float, Type::Float)
            | (Type::Number, Type::Number)
            | (Type::Boolean, Type::Boolean)
            | (Type::String, Type::String)
            | (Type::Symbol, Type::Symbol)
            | (Type::Nil, Type::Nil)
            | (Type::Any, Type::Any)
            | (Type::Never, Type::Never)
            | (Type::Unknown, Type::Unknown) => true,
            (Type::Record(left), Type::Record(right)) => {
                left.len() == right.len()
                    && left.iter().all(|(name, ty)| {
                        right
                            .iter()
                            .any(|(other_name, other_ty)| name == other_name && ty.equals(other_ty))
                    })
            }
            (Type::Tuple(left), Type::Tuple(right)) => {
                left.len() == right.len() && left.iter().zip(right).all(|(l, r)| l.equals(r))
            }
            (Type::Vector(left), Type::Vector(right)) => left.equals(right),
            (
                Type::Function {
                    parameters: left_params,
                    return_type: left_ret,
                },
                Type::Function {
                    parameters: right_params,
                    return_type: right_ret,
                },
            ) => {
                left_params.len() == right_params.len()
                    && left_params.iter().zip(right_params).all(|(l, r)| l.equals(r))
                    && left_ret.equals(right_ret)
            }
            (Type::Union(left), Type::Union(right))
            | (Type::Intersection(left), Type::Intersection(right)) => {
                left.iter().all(|l| right.iter().any(|r| l.equals(r)))
                    && right.iter().all(|r| left.iter().any(|l| r.equals(l)))
            }
            (Type::Singleton(left), Type::Singleton(right)) => left == right,
            (Type::Unresolved(left), Type::Unresolved(right)) => left == right,
            (Type::Variable(left), Type::Variable(right)) => left == right,
            _ => false,
        }
    }

    /// True when any part of this type is still a forward-reference
    /// placeholder.
    pub fn contains_unresolved(&self) -> bool {
        self.any(&|ty| matches!(ty, Type::Unresolved(_)))
    }

    pub fn contains_variables(&self) -> bool {
        self.any(&|ty| matches!(ty, Type::Variable(_)))
    }

    pub fn contains_singletons(&self) -> bool {
        self.any(&|ty| matches!(ty, Type::Singleton(_)))
    }

    fn any(&self, predicate: &dyn Fn(&Type) -> bool) -> bool {
        if predicate(self) {
            return true;
        }

        match self {
            Type::Record(properties) => properties.iter().any(|(_, ty)| ty.any(predicate)),
            Type::Tuple(types) | Type::Union(types) | Type::Intersection(types) => {
                types.iter().any(|ty| ty.any(predicate))
            }
            Type::Vector(element) => element.any(predicate),
            Type::Function {
                parameters,
                return_type,
            } => parameters.iter().any(|ty| ty.any(predicate)) || return_type.any(predicate),
            _ => false,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.widen(), Type::Integer | Type::Float | Type::Number)
    }

    /// Replaces a singleton by its base kind.
    pub fn widen(&self) -> Type {
        match self {
            Type::Singleton(value) => Type::of_literal(value),
            other => other.clone(),
        }
    }

    /// Looks up a named property. Unions need it on every member,
    /// intersections on at least one.
    pub fn property(&self, name: &str) -> Option<Type> {
        match self {
            Type::Record(properties) => properties
                .iter()
                .find(|(property, _)| property == name)
                .map(|(_, ty)| ty.clone()),
            Type::Union(members) => {
                let found: Option<Vec<Type>> =
                    members.iter().map(|member| member.property(name)).collect();
                found.map(Type::union)
            }
            Type::Intersection(members) => members.iter().find_map(|member| member.property(name)),
            Type::Any => Some(Type::Any),
            Type::Unresolved(position) => Some(Type::Unresolved(position.clone())),
            _ => None,
        }
    }

    /// Replaces bound type variables. Variables without a binding become
    /// `Unknown`.
    pub fn substitute(&self, bindings: &HashMap<String, Type>) -> Type {
        match self {
            Type::Variable(name) => bindings.get(name).cloned().unwrap_or(Type::Unknown),
            Type::Record(properties) => Type::Record(
                properties
                    .iter()
                    .map(|(name, ty)| (name.clone(), ty.substitute(bindings)))
                    .collect(),
            ),
            Type::Tuple(types) => Type::Tuple(types.iter().map(|ty| ty.substitute(bindings)).collect()),
            Type::Vector(element) => Type::vector(element.substitute(bindings)),
            Type::Function {
                parameters,
                return_type,
            } => Type::function(
                parameters.iter().map(|ty| ty.substitute(bindings)).collect(),
                return_type.substitute(bindings),
            ),
            Type::Union(types) => Type::union(types.iter().map(|ty| ty.substitute(bindings)).collect()),
            Type::Intersection(types) => {
                Type::intersection(types.iter().map(|ty| ty.substitute(bindings)).collect())
            }
            other => other.clone(),
        }
    }

    /// Matches this (parameter) type against an argument type, binding the
    /// variables it mentions. The first occurrence of a variable binds it,
    /// later occurrences must accept the argument.
    pub fn bind_variables(&self, actual: &Type, bindings: &mut HashMap<String, Type>) -> bool {
        if !self.contains_variables() {
            return is_assignable(actual, self);
        }

        match (self, actual) {
            (Type::Variable(name), _) => match bindings.get(name) {
                Some(bound) => is_assignable(actual, bound),
                None => {
                    bindings.insert(name.clone(), actual.widen());
                    true
                }
            },
            (_, Type::Any) => true,
            (Type::Vector(expected), Type::Vector(element)) => expected.bind_variables(element, bindings),
            (Type::Tuple(expected), Type::Tuple(elements)) => {
                expected.len() == elements.len()
                    && expected
                        .iter()
                        .zip(elements)
                        .all(|(param, arg)| param.bind_variables(arg, bindings))
            }
            (Type::Record(expected), Type::Record(_)) => expected.iter().all(|(name, param)| {
                actual
                    .property(name)
                    .map(|arg| param.bind_variables(&arg, bindings))
                    .unwrap_or(false)
            }),
            (
                Type::Function {
                    parameters: expected_params,
                    return_type: expected_ret,
                },
                Type::Function {
                    parameters,
                    return_type,
                },
            ) => {
                expected_params.len() == parameters.len()
                    && expected_params
                        .iter()
                        .zip(parameters)
                        .all(|(param, arg)| param.bind_variables(arg, bindings))
                    && expected_ret.bind_variables(return_type, bindings)
            }
            (Type::Union(members), _) => {
                if members
                    .iter()
                    .filter(|member| !member.contains_variables())
                    .any(|member| is_assignable(actual, member))
                {
                    return true;
                }

                members
                    .iter()
                    .find(|member| member.contains_variables())
                    .map(|member| member.bind_variables(actual, bindings))
                    .unwrap_or(false)
            }
            _ => false,
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

/// Whether a value of type `value` may be used where `target` is expected.
pub fn is_assignable(value: &Type, target: &Type) -> bool {
    match (value, target) {
        (Type::Unresolved(_), _) | (_, Type::Unresolved(_)) => {
            matches!((value, target), (Type::Unresolved(_), Type::Unresolved(_)))
        }
        (Type::Never, _) => true,
        (_, Type::Any) | (_, Type::Unknown) => true,
        // Any is also the dynamic type
        (Type::Any, _) => true,
        (Type::Union(members), _) => members.iter().all(|member| is_assignable(member, target)),
        (_, Type::Union(members)) => members.iter().any(|member| is_assignable(value, member)),
        (_, Type::Intersection(members)) => members.iter().all(|member| is_assignable(value, member)),
        (Type::Intersection(members), _) => {
            members.iter().any(|member| is_assignable(member, target))
                || merged_record(members).is_some_and(|merged| is_assignable(&merged, target))
        }
        (Type::Singleton(left), Type::Singleton(right)) => left == right,
        (Type::Singleton(literal), _) => is_assignable(&Type::of_literal(literal), target),
        (Type::Integer, Type::Number) | (Type::Float, Type::Number) => true,
        (Type::Record(properties), Type::Record(required)) => required.iter().all(|(name, ty)| {
            properties
                .iter()
                .any(|(property, value_ty)| property == name && is_assignable(value_ty, ty))
        }),
        (Type::Tuple(values), Type::Tuple(targets)) => {
            values.len() == targets.len()
                && values.iter().zip(targets).all(|(v, t)| is_assignable(v, t))
        }
        (Type::Vector(value), Type::Vector(target)) => is_assignable(value, target),
        (
            Type::Function {
                parameters: value_params,
                return_type: value_ret,
            },
            Type::Function {
                parameters: target_params,
                return_type: target_ret,
            },
        ) => {
            value_params.len() == target_params.len()
                && target_params
                    .iter()
                    .zip(value_params)
                    .all(|(target, value)| is_assignable(target, value))
                && is_assignable(value_ret, target_ret)
        }
        (Type::Variable(left), Type::Variable(right)) => left == right,
        _ => value.equals(target),
    }
}

/// All record members of an intersection merged into one record.
fn merged_record(members: &[Type]) -> Option<Type> {
    let mut properties: Vec<(String, Type)> = vec![];

    for member in members {
        match member {
            Type::Record(fields) => {
                for (name, ty) in fields {
                    if !properties.iter().any(|(existing, _)| existing == name) {
                        properties.push((name.clone(), ty.clone()));
                    }
                }
            }
            _ => return None,
        }
    }

    Some(Type::Record(properties))
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Integer => write!(f, "Integer"),
            Type::Float => write!(f, "Float"),
            Type::Number => write!(f, "Number"),
            Type::Boolean => write!(f, "Boolean"),
            Type::String => write!(f, "String"),
            Type::Symbol => write!(f, "Symbol"),
            Type::Nil => write!(f, "Nil"),
            Type::Any => write!(f, "Any"),
            Type::Never => write!(f, "Never"),
            Type::Unknown => write!(f, "Unknown"),
            Type::Unresolved(_) => write!(f, "Unresolved"),
            Type::Variable(name) => write!(f, "{}", name),
            Type::Singleton(value) => write!(f, "{}", value),
            Type::Record(properties) => {
                if properties.is_empty() {
                    return write!(f, "{{}}");
                }

                let properties: Vec<String> = properties
                    .iter()
                    .map(|(name, ty)| format!("{}: {}", name, ty))
                    .collect();
                write!(f, "{{ {} }}", properties.join(", "))
            }
            Type::Tuple(types) => {
                let types: Vec<String> = types.iter().map(|ty| ty.to_string()).collect();
                write!(f, "({})", types.join(", "))
            }
            Type::Vector(element) => match element.as_ref() {
                Type::Union(_) | Type::Intersection(_) | Type::Function { .. } => {
                    write!(f, "({})[]", element)
                }
                _ => write!(f, "{}[]", element),
            },
            Type::Function {
                parameters,
                return_type,
            } => {
                let parameters: Vec<String> = parameters.iter().map(|ty| ty.to_string()).collect();
                write!(f, "({}) -> {}", parameters.join(", "), return_type)
            }
            Type::Union(members) => {
                let members: Vec<String> = members
                    .iter()
                    .map(|member| match member {
                        Type::Function { .. } => format!("({})", member),
                        _ => member.to_string(),
                    })
                    .collect();
                write!(f, "{}", members.join(" | "))
            }
            Type::Intersection(members) => {
                let members: Vec<String> = members
                    .iter()
                    .map(|member| match member {
                        Type::Union(_) | Type::Function { .. } => format!("({})", member),
                        _ => member.to_string(),
                    })
                    .collect();
                write!(f, "{}", members.join(" & "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    fn record(properties: &[(&str, Type)]) -> Type {
        Type::Record(
            properties
                .iter()
                .map(|(name, ty)| (name.to_string(), ty.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_record_equality_ignores_order() {
        let left = record(&[("a", Type::Integer), ("b", Type::String)]);
        let right = record(&[("b", Type::String), ("a", Type::Integer)]);

        assert_eq!(left, right);
        assert_ne!(left, record(&[("a", Type::Integer)]));
    }

    #[test]
    fn test_tuple_equality_is_ordered() {
        let left = Type::Tuple(vec![Type::Integer, Type::String]);
        let right = Type::Tuple(vec![Type::String, Type::Integer]);

        assert_ne!(left, right);
    }

    #[test]
    fn test_union_flattens_and_dedups() {
        let union = Type::union(vec![
            Type::Integer,
            Type::union(vec![Type::String, Type::Integer]),
            Type::Never,
        ]);

        assert_eq!(union, Type::Union(vec![Type::String, Type::Integer]));
        assert_eq!(Type::union(vec![Type::Integer, Type::Integer]), Type::Integer);
        assert_eq!(Type::union(vec![]), Type::Never);
    }

    #[test]
    fn test_width_subtyping() {
        let value = record(&[("a", Type::Integer), ("b", Type::String)]);

        assert!(is_assignable(&value, &record(&[("a", Type::Integer)])));
        assert!(!is_assignable(
            &value,
            &record(&[("a", Type::Integer), ("c", Type::Boolean)])
        ));
    }

    #[test]
    fn test_singleton_assignability() {
        let one = Type::Singleton(LiteralValue::Integer(1));

        assert!(is_assignable(&one, &Type::Integer));
        assert!(is_assignable(&one, &Type::Number));
        assert!(is_assignable(&one, &Type::Singleton(LiteralValue::Integer(1))));
        assert!(!is_assignable(&one, &Type::Singleton(LiteralValue::Integer(2))));
        assert!(!is_assignable(&Type::Integer, &one));
    }

    #[test]
    fn test_union_assignability() {
        let target = Type::union(vec![Type::Integer, Type::String]);

        assert!(is_assignable(&Type::String, &target));
        assert!(is_assignable(&target, &Type::union(vec![Type::String, Type::Integer, Type::Nil])));
        assert!(!is_assignable(&target, &Type::Integer));
    }

    #[test]
    fn test_function_variance() {
        let takes_number = Type::function(vec![Type::Number], Type::Integer);
        let takes_integer = Type::function(vec![Type::Integer], Type::Number);

        assert!(is_assignable(&takes_number, &takes_integer));
        assert!(!is_assignable(&takes_integer, &takes_number));
    }

    #[test]
    fn test_top_and_bottom() {
        assert!(is_assignable(&Type::Never, &Type::Integer));
        assert!(is_assignable(&Type::Integer, &Type::Any));
        assert!(is_assignable(&Type::Integer, &Type::Unknown));
        assert!(is_assignable(&Type::Any, &Type::String));
    }

    #[test]
    fn test_unresolved_only_matches_unresolved() {
        let unresolved = Type::Unresolved(crate::Position(3, Rc::new("t".to_string())));

        assert!(!is_assignable(&unresolved, &Type::Any));
        assert!(!is_assignable(&Type::Never, &unresolved));
        assert!(is_assignable(&unresolved, &unresolved));
        assert!(Type::vector(unresolved).contains_unresolved());
    }

    #[test]
    fn test_intersection_of_records() {
        let both = Type::intersection(vec![
            record(&[("a", Type::Integer)]),
            record(&[("b", Type::String)]),
        ]);

        assert!(is_assignable(
            &both,
            &record(&[("a", Type::Integer), ("b", Type::String)])
        ));
        assert_eq!(both.property("b"), Some(Type::String));
    }

    #[test]
    fn test_bind_and_substitute_variables() {
        let param = Type::vector(Type::Variable("T".to_string()));
        let mut bindings = HashMap::new();

        assert!(param.bind_variables(&Type::vector(Type::Integer), &mut bindings));
        assert_eq!(
            Type::Variable("T".to_string()).substitute(&bindings),
            Type::Integer
        );
        assert!(!Type::Variable("T".to_string()).bind_variables(&Type::String, &mut bindings));
    }

    #[test]
    fn test_display() {
        let ty = Type::function(
            vec![record(&[("a", Type::Integer)]), Type::vector(Type::union(vec![Type::Nil, Type::String]))],
            Type::Singleton(LiteralValue::Symbol("ok".to_string())),
        );

        assert_eq!(ty.to_string(), "({ a: Integer }, (Nil | String)[]) -> 'ok");
    }
}
