// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Host type system boundary.
//!
//! The host is the external collaborator that owns all declarations. The
//! core only ever asks it three things: look a declaration up by qualified
//! name, enumerate a declaration's constructors, and report a declaration's
//! package. It never mutates host state.
//!
//! [`InMemoryHost`] is a complete fake implementation so the core (and its
//! consumers) can be tested without a live compiler.

use crate::descriptor::PrimitiveKind;
use crate::element::{ConstructorDecl, DeclaredElement, ElementKind, ParamDecl, TypeParam};
use crate::package::PackageName;
use crate::type_ref::TypeRef;
use std::collections::HashMap;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// HostTypeSystem trait
// ---------------------------------------------------------------------------

/// Declaration lookups supplied by the host type system.
pub trait HostTypeSystem: Send + Sync {
    /// Look up a declaration by qualified name.
    ///
    /// Returns `None` if the name is unknown.
    fn lookup(&self, qualified_name: &str) -> Option<Arc<DeclaredElement>>;

    /// Declared constructors of an element, in declaration order.
    fn constructors_of(&self, element: &DeclaredElement) -> Vec<ConstructorDecl> {
        element.constructors.clone()
    }

    /// Package of an element's own declaration site.
    ///
    /// Returns `None` if the host cannot place the declaration.
    fn package_of(&self, element: &DeclaredElement) -> Option<PackageName> {
        Some(element.package.clone())
    }
}

// ---------------------------------------------------------------------------
// In-memory fake host
// ---------------------------------------------------------------------------

/// `HashMap`-backed [`HostTypeSystem`].
///
/// Suitable for tests and for driving the resolver from pre-extracted
/// declaration sets.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    types: HashMap<String, Arc<DeclaredElement>>,
}

impl InMemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host pre-seeded with the core library declarations the
    /// generator routinely encounters: `java.lang.Object`,
    /// `java.lang.String`, the eight boxed primitives, `java.util.List`
    /// and `java.util.ArrayList`.
    pub fn with_core_types() -> Self {
        let mut host = Self::new();
        let object = TypeRef::named("java.lang.Object");

        host.declare(DeclaredElementBuilder::new("java.lang.Object").build());
        host.declare(
            DeclaredElementBuilder::new("java.lang.String")
                .supertype(object.clone())
                .constructor(vec![])
                .build(),
        );
        for kind in [
            PrimitiveKind::Boolean,
            PrimitiveKind::Byte,
            PrimitiveKind::Short,
            PrimitiveKind::Int,
            PrimitiveKind::Long,
            PrimitiveKind::Char,
            PrimitiveKind::Float,
            PrimitiveKind::Double,
        ] {
            host.declare(
                DeclaredElementBuilder::new(kind.boxed_name())
                    .supertype(object.clone())
                    .constructor(vec![ParamDecl::new("value", TypeRef::primitive(kind))])
                    .build(),
            );
        }
        host.declare(
            DeclaredElementBuilder::new("java.util.List")
                .kind(ElementKind::Interface)
                .type_param("E")
                .build(),
        );
        host.declare(
            DeclaredElementBuilder::new("java.util.ArrayList")
                .type_param("E")
                .supertype(object)
                .constructor(vec![])
                .build(),
        );
        host
    }

    /// Register a declaration, returning the shared handle.
    ///
    /// Re-declaring a qualified name replaces the previous entry.
    pub fn declare(&mut self, element: DeclaredElement) -> Arc<DeclaredElement> {
        let element = Arc::new(element);
        self.types
            .insert(element.qualified_name.clone(), element.clone());
        element
    }

    /// Number of registered declarations.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl HostTypeSystem for InMemoryHost {
    fn lookup(&self, qualified_name: &str) -> Option<Arc<DeclaredElement>> {
        self.types.get(qualified_name).cloned()
    }
}

// ---------------------------------------------------------------------------
// Fluent element builder
// ---------------------------------------------------------------------------

/// Builder for [`DeclaredElement`] values fed to a host.
///
/// The package defaults to everything before the last dotted segment of
/// the qualified name. Nested declarations should set
/// [`enclosing`](Self::enclosing); their effective package is always the
/// outermost declaration's.
#[derive(Debug)]
pub struct DeclaredElementBuilder {
    qualified_name: String,
    kind: ElementKind,
    package: Option<PackageName>,
    type_params: Vec<TypeParam>,
    constructors: Vec<ConstructorDecl>,
    supertype: Option<TypeRef>,
    enclosing: Option<String>,
    annotations: Vec<String>,
}

impl DeclaredElementBuilder {
    /// Start a class declaration.
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind: ElementKind::Class,
            package: None,
            type_params: Vec::new(),
            constructors: Vec::new(),
            supertype: None,
            enclosing: None,
            annotations: Vec::new(),
        }
    }

    /// Override the declaration kind.
    pub fn kind(mut self, kind: ElementKind) -> Self {
        self.kind = kind;
        self
    }

    /// Override the derived package.
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(PackageName::new(package));
        self
    }

    /// Append an unbounded type parameter.
    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(TypeParam::new(name));
        self
    }

    /// Append an upper-bounded type parameter.
    pub fn bounded_type_param(mut self, name: impl Into<String>, upper_bound: TypeRef) -> Self {
        self.type_params.push(TypeParam::bounded(name, upper_bound));
        self
    }

    /// Append a declared constructor. Call order is declaration order.
    pub fn constructor(mut self, params: Vec<ParamDecl>) -> Self {
        self.constructors.push(ConstructorDecl::new(params));
        self
    }

    /// Set the declared supertype.
    pub fn supertype(mut self, supertype: TypeRef) -> Self {
        self.supertype = Some(supertype);
        self
    }

    /// Mark this declaration as nested inside the named type.
    pub fn enclosing(mut self, qualified_name: impl Into<String>) -> Self {
        self.enclosing = Some(qualified_name.into());
        self
    }

    /// Attach a marker annotation name.
    pub fn annotation(mut self, name: impl Into<String>) -> Self {
        self.annotations.push(name.into());
        self
    }

    /// Build the element.
    pub fn build(self) -> DeclaredElement {
        let package = self.package.unwrap_or_else(|| {
            match self.qualified_name.rsplit_once('.') {
                Some((prefix, _)) => PackageName::new(prefix),
                None => PackageName::unnamed(),
            }
        });
        DeclaredElement {
            qualified_name: self.qualified_name,
            kind: self.kind,
            package,
            type_params: self.type_params,
            constructors: self.constructors,
            supertype: self.supertype,
            enclosing: self.enclosing,
            annotations: self.annotations,
        }
    }
}
