// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-resolution core for serialization adapter generation.
//!
//! Turns qualified names and structural type references into canonical,
//! immutable type descriptors suitable for downstream adapter code
//! generation over class hierarchies -- generics, nested generics, and
//! inherited members included.
//!
//! # Features
//!
//! - **Session**: one generation run's context -- explicit one-time host
//!   binding, descriptor registry with referential identity, no globals
//! - **TypeDescriptor**: canonical resolved forms (declared, primitive,
//!   array, wildcard, type variable) shared as `Arc`
//! - **HostTypeSystem**: the external declaration source as a trait, with
//!   an in-memory fake and a fluent element builder for tests
//! - **TypeBindings**: generic-parameter binding maps and substitution
//!   through nested references
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use sergen::{DeclaredElementBuilder, InMemoryHost, Session, TypeRef};
//!
//! let mut host = InMemoryHost::with_core_types();
//! host.declare(
//!     DeclaredElementBuilder::new("com.example.Box")
//!         .type_param("T")
//!         .annotation("GenerateAdapter")
//!         .build(),
//! );
//!
//! let session = Session::new();
//! session.initialize(Arc::new(host)).unwrap();
//!
//! let boxed = session
//!     .resolve_ref(&TypeRef::generic(
//!         "com.example.Box",
//!         vec![TypeRef::named("java.lang.String")],
//!     ))
//!     .unwrap();
//! assert_eq!(boxed.display_name(), "com.example.Box<java.lang.String>");
//!
//! let package = session.package_of(&boxed).unwrap();
//! assert_eq!(package.as_str(), "com.example");
//! ```

mod bindings;
mod config;
mod descriptor;
mod element;
mod error;
mod host;
mod package;
mod registry;
mod session;
mod type_ref;

pub use bindings::TypeBindings;
pub use config::{ConfigError, ResolverConfig};
pub use descriptor::{
    ArrayDescriptor, DeclaredDescriptor, PrimitiveKind, TypeDescriptor, WildcardDescriptor,
};
pub use element::{
    ConstructorDecl, ConstructorDescriptor, ConstructorParam, DeclaredElement, ElementKind,
    ParamDecl, TypeParam,
};
pub use error::{ResolveError, ResolveResult};
pub use host::{DeclaredElementBuilder, HostTypeSystem, InMemoryHost};
pub use package::PackageName;
pub use registry::TypeRegistry;
pub use session::Session;
pub use type_ref::TypeRef;
