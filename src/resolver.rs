// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Literal type-descriptor interpretation.
//!
//! Converts the type-descriptor literal written at a call site, plus the
//! optional default-value literal, into a resolved type union. Resolution
//! is total: malformed or unrecognized input loses precision (`mixed`, or a
//! generic array type) instead of failing.

use std::collections::BTreeMap;

use crate::ast::{Expr, ExprRef};
use crate::types::{Type, TypeUnion};

/// Descriptor literals nested deeper than this resolve to `mixed`. The
/// input tree comes from arbitrary analyzed source, so nesting depth is
/// unbounded.
const MAX_DESCRIPTOR_DEPTH: usize = 64;

/// Resolve a type-descriptor expression to a type union.
///
/// A `default_expr` that is a literal reference to the constant `null`
/// widens the result with `null`.
pub fn resolve_type(type_expr: &Expr, default_expr: Option<&Expr>) -> TypeUnion {
    resolve_type_at(type_expr, default_expr, 0)
}

fn resolve_type_at(type_expr: &Expr, default_expr: Option<&Expr>, depth: usize) -> TypeUnion {
    let resolved = if depth >= MAX_DESCRIPTOR_DEPTH {
        TypeUnion::mixed()
    } else {
        match type_expr {
            Expr::String { value } => resolve_type_from_string(value.as_ref()),
            Expr::Array { items } => resolve_type_from_array(items, depth),
            _ => TypeUnion::mixed(),
        }
    };

    match default_expr {
        Some(Expr::Const { name }) if name.as_ref() == "null" => resolved.with_null(),
        _ => resolved,
    }
}

/// `"int"`, `"array[string]"` and friends. Aliases match exact lowercase
/// spellings only; the bracket form takes the text strictly between the
/// first `[` and the final `]` as a flat type name, with no nested-bracket
/// handling.
fn resolve_type_from_string(value: &str) -> TypeUnion {
    if let Some(inner) = value
        .strip_prefix("array[")
        .and_then(|rest| rest.strip_suffix(']'))
        .filter(|inner| !inner.is_empty())
    {
        return TypeUnion::new(Type::array(
            TypeUnion::new(Type::ArrayKey),
            TypeUnion::from_name(inner),
        ));
    }

    TypeUnion::from_name(value)
}

/// A keyed-structure descriptor: every entry must be a `[key, type, default]`
/// tuple with a string-literal key. If any single entry is malformed the
/// whole structure is discarded in favor of `array<string, mixed>`, entries
/// already processed included.
fn resolve_type_from_array(items: &[ExprRef], depth: usize) -> TypeUnion {
    let fallback =
        || TypeUnion::new(Type::array(TypeUnion::new(Type::String), TypeUnion::mixed()));

    if items.is_empty() {
        return fallback();
    }

    let mut fields = BTreeMap::new();

    for item in items {
        let Expr::Array { items: tuple } = item.as_ref() else {
            return fallback();
        };

        let Some(Expr::String { value: key }) = tuple.first().map(|e| e.as_ref()) else {
            return fallback();
        };

        let field_type = match tuple.get(1) {
            None => TypeUnion::mixed(),
            Some(ty) => resolve_type_at(ty, tuple.get(2).map(|e| e.as_ref()), depth + 1),
        };

        // Later duplicate keys overwrite earlier entries.
        fields.insert(key.to_string(), field_type);
    }

    TypeUnion::new(Type::keyed_object(fields))
}
