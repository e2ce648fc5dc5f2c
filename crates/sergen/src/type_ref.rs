// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural, unresolved type references.
//!
//! A [`TypeRef`] is the syntactic side of the resolver contract: the shape
//! of a type use (name, arguments, array depth, bounds) before any host
//! lookup has happened. The resolver turns it into an
//! [`Arc<TypeDescriptor>`](crate::TypeDescriptor) bottom-up.

use crate::descriptor::PrimitiveKind;
use std::fmt;

/// An unresolved reference to a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A named (possibly parameterized) declaration reference.
    Named { name: String, args: Vec<TypeRef> },
    /// A primitive type.
    Primitive(PrimitiveKind),
    /// An array of some element reference.
    Array(Box<TypeRef>),
    /// A wildcard, optionally upper-bounded.
    Wildcard { upper_bound: Option<Box<TypeRef>> },
    /// A type variable by name.
    Variable(String),
}

impl TypeRef {
    /// Reference to a declaration by qualified name, no arguments.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Parameterized reference with explicit arguments.
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::Named {
            name: name.into(),
            args,
        }
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }

    pub fn array_of(element: TypeRef) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn wildcard() -> Self {
        Self::Wildcard { upper_bound: None }
    }

    pub fn wildcard_extends(upper_bound: TypeRef) -> Self {
        Self::Wildcard {
            upper_bound: Some(Box::new(upper_bound)),
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, args } => {
                if args.is_empty() {
                    f.write_str(name)
                } else {
                    let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
                    write!(f, "{}<{}>", name, rendered.join(","))
                }
            }
            Self::Primitive(kind) => f.write_str(kind.keyword()),
            Self::Array(element) => write!(f, "{}[]", element),
            Self::Wildcard { upper_bound } => match upper_bound {
                Some(bound) => write!(f, "? extends {}", bound),
                None => f.write_str("?"),
            },
            Self::Variable(name) => f.write_str(name),
        }
    }
}
