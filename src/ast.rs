// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::{cmp, fmt, ops::Deref};
use std::rc::Rc;

/// Shared handle to an expression node.
///
/// Nodes are immutable once built; handles compare by pointer identity so
/// that the same node can appear in several argument lists without deep
/// comparisons.
pub struct NodeRef<T> {
    r: Rc<T>,
}

impl<T> Clone for NodeRef<T> {
    fn clone(&self) -> Self {
        Self { r: self.r.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.r.as_ref().fmt(f)
    }
}

impl<T> cmp::PartialEq for NodeRef<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::as_ptr(&self.r).eq(&Rc::as_ptr(&other.r))
    }
}

impl<T> cmp::Eq for NodeRef<T> {}

impl<T> Deref for NodeRef<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.r
    }
}

impl<T> AsRef<T> for NodeRef<T> {
    fn as_ref(&self) -> &T {
        self.deref()
    }
}

impl<T> NodeRef<T> {
    pub fn new(t: T) -> Self {
        Self { r: Rc::new(t) }
    }
}

pub type Ref<T> = NodeRef<T>;

/// A call-site argument as presented by the host analyzer.
///
/// Only literals can be interpreted statically. The host maps every
/// expression it cannot present as a literal (variables, calls, string
/// concatenations) to `Opaque`.
#[derive(Debug, PartialEq, Eq)]
pub enum Expr {
    String {
        value: Rc<str>,
    },

    Number {
        value: Rc<str>,
    },

    Bool {
        value: bool,
    },

    // Reference to a named constant, e.g. `null`.
    Const {
        name: Rc<str>,
    },

    Array {
        items: Vec<Ref<Expr>>,
    },

    Opaque,
}

impl Expr {
    pub fn string(value: &str) -> ExprRef {
        ExprRef::new(Expr::String {
            value: value.into(),
        })
    }

    pub fn number(value: &str) -> ExprRef {
        ExprRef::new(Expr::Number {
            value: value.into(),
        })
    }

    pub fn bool(value: bool) -> ExprRef {
        ExprRef::new(Expr::Bool { value })
    }

    pub fn constant(name: &str) -> ExprRef {
        ExprRef::new(Expr::Const { name: name.into() })
    }

    pub fn array(items: Vec<ExprRef>) -> ExprRef {
        ExprRef::new(Expr::Array { items })
    }

    pub fn opaque() -> ExprRef {
        ExprRef::new(Expr::Opaque)
    }
}

pub type ExprRef = Ref<Expr>;
