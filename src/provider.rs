// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Call-site dispatch.
//!
//! The host analyzer routes intercepted calls here as events. The provider
//! only locates which argument positions hold the type descriptor and the
//! default value; interpretation itself lives in [`crate::resolver`].

use crate::ast::ExprRef;
use crate::registry;
use crate::resolver::resolve_type;
use crate::types::TypeUnion;

/// A method call on one of the intercepted class-like identifiers.
#[derive(Debug)]
pub struct MethodCallEvent {
    /// Resolved class-like identifier of the receiver.
    pub class_like_name: String,
    /// Method name as written; matching is case-insensitive.
    pub method_name: String,
    /// Ordered argument list, as written at the call site.
    pub call_args: Vec<ExprRef>,
}

impl MethodCallEvent {
    pub fn new(
        class_like_name: impl Into<String>,
        method_name: impl Into<String>,
        call_args: Vec<ExprRef>,
    ) -> Self {
        Self {
            class_like_name: class_like_name.into(),
            method_name: method_name.into(),
            call_args,
        }
    }
}

/// A call of one of the intercepted free functions.
#[derive(Debug)]
pub struct FunctionCallEvent {
    pub function_id: String,
    pub call_args: Vec<ExprRef>,
}

impl FunctionCallEvent {
    pub fn new(function_id: impl Into<String>, call_args: Vec<ExprRef>) -> Self {
        Self {
            function_id: function_id.into(),
            call_args,
        }
    }
}

/// Return-type override hooks the host invokes per call site.
///
/// `None` is a decline: no override, the host keeps its own inference.
/// Declining is a normal outcome and carries no diagnostic.
pub trait ReturnTypeProvider: Send + Sync {
    /// Class-like identifiers whose method calls should be routed here.
    fn class_like_names(&self) -> &'static [&'static str];

    /// Free-function identifiers whose calls should be routed here.
    fn function_ids(&self) -> &'static [&'static str];

    fn method_return_type(&self, event: &MethodCallEvent) -> Option<TypeUnion>;

    fn function_return_type(&self, event: &FunctionCallEvent) -> Option<TypeUnion>;
}

/// Request accessor methods that share the (key, type, default) signature.
const ACCESSOR_METHODS: [&str; 8] = [
    "get", "post", "request", "server", "session", "cookie", "files", "env",
];

/// Provider for REDAXO's `rex_type`/`rex_request` APIs and the `rex_*`
/// accessor functions.
#[derive(Debug, Default)]
pub struct RexReturnProvider;

impl ReturnTypeProvider for RexReturnProvider {
    fn class_like_names(&self) -> &'static [&'static str] {
        registry::CLASS_LIKE_NAMES
    }

    fn function_ids(&self) -> &'static [&'static str] {
        registry::FUNCTION_IDS
    }

    fn method_return_type(&self, event: &MethodCallEvent) -> Option<TypeUnion> {
        let method = event.method_name.to_ascii_lowercase();

        let (type_idx, default_idx) = match method.as_str() {
            // cast(value, type): the default position is not read.
            "cast" => (1, None),
            m if ACCESSOR_METHODS.contains(&m) => (1, Some(2)),
            // arraykeycast(array, key, type, default)
            "arraykeycast" => (2, Some(3)),
            _ => return None,
        };

        resolve_at_positions(&event.call_args, type_idx, default_idx)
    }

    fn function_return_type(&self, event: &FunctionCallEvent) -> Option<TypeUnion> {
        resolve_at_positions(&event.call_args, 1, Some(2))
    }
}

/// Hand the expressions at the given positions to the interpreter, or
/// decline if the descriptor position is absent.
fn resolve_at_positions(
    args: &[ExprRef],
    type_idx: usize,
    default_idx: Option<usize>,
) -> Option<TypeUnion> {
    let type_expr = args.get(type_idx)?;
    let default_expr = default_idx.and_then(|idx| args.get(idx));

    Some(resolve_type(
        type_expr.as_ref(),
        default_expr.map(|e| e.as_ref()),
    ))
}
