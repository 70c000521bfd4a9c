// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::fmt;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// A single type alternative.
///
/// This is the subset of the host analyzer's type lattice that descriptor
/// resolution can produce: the canonical scalars, generic arrays with
/// uniform key/value types, and keyed structures with a fixed field set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(tag = "type")]
#[serde(rename_all = "camelCase")]
pub enum Type {
    Bool,
    Int,
    Float,
    String,
    Object,
    Mixed,
    Null,

    // Valid array key: int or string.
    ArrayKey,

    // Arrays with uniform key and value types
    Array {
        key: Box<TypeUnion>,
        value: Box<TypeUnion>,
    },

    // Array-shaped structures with a fixed set of string keys
    KeyedObject {
        fields: Rc<BTreeMap<String, TypeUnion>>,
    },
}

impl Type {
    /// `array<key, value>` with both sides given as unions.
    pub fn array(key: TypeUnion, value: TypeUnion) -> Self {
        Type::Array {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// `array{field: type, ...}` over an ordered field map.
    pub fn keyed_object(fields: BTreeMap<String, TypeUnion>) -> Self {
        Type::KeyedObject {
            fields: Rc::new(fields),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::String => write!(f, "string"),
            Type::Object => write!(f, "object"),
            Type::Mixed => write!(f, "mixed"),
            Type::Null => write!(f, "null"),
            Type::ArrayKey => write!(f, "array-key"),
            Type::Array { key, value } => write!(f, "array<{key}, {value}>"),
            Type::KeyedObject { fields } => {
                write!(f, "array{{")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {ty}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// An ordered, duplicate-free set of type alternatives, never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TypeUnion {
    types: Vec<Type>,
}

impl TypeUnion {
    pub fn new(ty: Type) -> Self {
        Self { types: vec![ty] }
    }

    pub fn mixed() -> Self {
        Self::new(Type::Mixed)
    }

    /// The host's canonical string-to-type parser, reduced to the alias
    /// table this component needs. Matching is exact: only the lowercase
    /// alias spellings are recognized, everything else parses as `mixed`.
    pub fn from_name(name: &str) -> Self {
        let ty = match name {
            "bool" | "boolean" => Type::Bool,
            "int" | "integer" => Type::Int,
            "double" | "float" | "real" => Type::Float,
            "string" => Type::String,
            "object" => Type::Object,
            "array" => Type::array(TypeUnion::new(Type::ArrayKey), TypeUnion::mixed()),
            _ => Type::Mixed,
        };
        Self::new(ty)
    }

    /// Add an alternative. Duplicates are ignored.
    pub fn add(&mut self, ty: Type) {
        if !self.types.contains(&ty) {
            self.types.push(ty);
        }
    }

    /// Widen to include `null`.
    pub fn with_null(mut self) -> Self {
        self.add(Type::Null);
        self
    }

    pub fn types(&self) -> &[Type] {
        &self.types
    }

    pub fn contains(&self, ty: &Type) -> bool {
        self.types.contains(ty)
    }
}

impl From<Type> for TypeUnion {
    fn from(ty: Type) -> Self {
        Self::new(ty)
    }
}

impl fmt::Display for TypeUnion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ty) in self.types.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{ty}")?;
        }
        Ok(())
    }
}
