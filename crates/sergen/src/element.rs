// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declaration-side data supplied by the host type system.

use crate::descriptor::TypeDescriptor;
use crate::package::PackageName;
use crate::type_ref::TypeRef;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Closed set of declaration kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

/// A declared type parameter, optionally upper-bounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    pub name: String,
    pub upper_bound: Option<TypeRef>,
}

impl TypeParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            upper_bound: None,
        }
    }

    pub fn bounded(name: impl Into<String>, upper_bound: TypeRef) -> Self {
        Self {
            name: name.into(),
            upper_bound: Some(upper_bound),
        }
    }
}

/// A formal constructor parameter as declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: String,
    pub param_type: TypeRef,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, param_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            param_type,
        }
    }
}

/// A declared constructor: formal parameters in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorDecl {
    pub params: Vec<ParamDecl>,
}

impl ConstructorDecl {
    pub fn new(params: Vec<ParamDecl>) -> Self {
        Self { params }
    }

    /// The implicit zero-argument constructor.
    pub fn zero_arg() -> Self {
        Self::default()
    }
}

/// The underlying declaration a descriptor points to.
///
/// Owned by the host type system; the core holds shared references and
/// never mutates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredElement {
    pub qualified_name: String,
    pub kind: ElementKind,
    pub package: PackageName,
    /// Type parameters in declaration order.
    pub type_params: Vec<TypeParam>,
    /// Declared constructors in declaration order. Empty means the
    /// declaration relies on the implicit zero-argument constructor.
    pub constructors: Vec<ConstructorDecl>,
    pub supertype: Option<TypeRef>,
    /// Qualified name of the directly enclosing type, for nested declarations.
    pub enclosing: Option<String>,
    /// Marker annotation names carried by the declaration.
    pub annotations: Vec<String>,
}

impl DeclaredElement {
    /// Last dotted segment of the qualified name.
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    pub fn is_nested(&self) -> bool {
        self.enclosing.is_some()
    }
}

/// A resolved constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorParam {
    pub name: String,
    pub param_type: Arc<TypeDescriptor>,
}

/// A resolved constructor: owning declaration plus ordered parameter
/// descriptors. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDescriptor {
    pub owner: Arc<DeclaredElement>,
    pub params: Vec<ConstructorParam>,
}

impl ConstructorDescriptor {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn is_zero_arg(&self) -> bool {
        self.params.is_empty()
    }
}
