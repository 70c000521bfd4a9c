// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod ast;
mod provider;
mod registry;
mod resolver;
mod types;

pub use ast::{Expr, ExprRef, NodeRef, Ref};
pub use provider::{FunctionCallEvent, MethodCallEvent, ReturnTypeProvider, RexReturnProvider};
pub use registry::{
    providers, register_builtin_providers, Registry, RegistryError, CLASS_LIKE_NAMES, FUNCTION_IDS,
};
pub use resolver::resolve_type;
pub use types::{Type, TypeUnion};
