// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolution session: registry glue plus every resolution operation.
//!
//! A [`Session`] is scoped to one generation run. It binds the host type
//! system exactly once, caches every declared descriptor it resolves, and
//! is discarded (never reused) when the run ends. All registry writes are
//! serialized behind a single lock; resolution itself is synchronous and
//! allocation-bound, never blocking on I/O.

use crate::bindings::TypeBindings;
use crate::config::ResolverConfig;
use crate::descriptor::{
    ArrayDescriptor, DeclaredDescriptor, PrimitiveKind, TypeDescriptor, WildcardDescriptor,
};
use crate::element::{
    ConstructorDecl, ConstructorDescriptor, ConstructorParam, DeclaredElement, ElementKind,
};
use crate::error::{ResolveError, ResolveResult};
use crate::host::HostTypeSystem;
use crate::package::PackageName;
use crate::registry::TypeRegistry;
use crate::type_ref::TypeRef;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::sync::Arc;

/// One generation run's resolution context.
pub struct Session {
    config: ResolverConfig,
    host: OnceCell<Arc<dyn HostTypeSystem>>,
    registry: Mutex<TypeRegistry>,
}

impl Session {
    /// Create an uninitialized session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    /// Create an uninitialized session with an explicit configuration.
    pub fn with_config(config: ResolverConfig) -> Self {
        Self {
            config,
            host: OnceCell::new(),
            registry: Mutex::new(TypeRegistry::new()),
        }
    }

    /// Bind the host type system. One-time: a second call fails with
    /// [`ResolveError::AlreadyInitialized`].
    pub fn initialize(&self, host: Arc<dyn HostTypeSystem>) -> ResolveResult<()> {
        self.host
            .set(host)
            .map_err(|_| ResolveError::AlreadyInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.host.get().is_some()
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Number of descriptors currently cached.
    pub fn cached_types(&self) -> usize {
        self.registry.lock().len()
    }

    /// Tear the registry down early. Dropping the session does the same.
    pub fn clear(&self) {
        self.registry.lock().clear();
    }

    fn host(&self) -> ResolveResult<&Arc<dyn HostTypeSystem>> {
        self.host.get().ok_or(ResolveError::NotInitialized)
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    /// Look up the declaration behind a qualified name.
    pub fn lookup_element(&self, qualified_name: &str) -> ResolveResult<Arc<DeclaredElement>> {
        self.host()?
            .lookup(qualified_name)
            .ok_or_else(|| ResolveError::UnresolvedType {
                name: qualified_name.to_string(),
            })
    }

    /// Resolve a qualified name to its declared-form descriptor.
    ///
    /// A generic declaration resolves with its own type parameters as
    /// `Variable` arguments -- the host type system's view of the
    /// declaration itself. Repeated calls return the same cached `Arc`.
    pub fn resolve(&self, qualified_name: &str) -> ResolveResult<Arc<TypeDescriptor>> {
        if qualified_name.is_empty() {
            return Err(ResolveError::UnresolvedType {
                name: String::new(),
            });
        }
        if let Some(hit) = self.registry.lock().lookup(qualified_name) {
            log::trace!("registry hit for {qualified_name}");
            return Ok(hit);
        }

        let element = self.lookup_element(qualified_name)?;
        let type_args = element
            .type_params
            .iter()
            .map(|param| Arc::new(TypeDescriptor::Variable(param.name.clone())))
            .collect();
        let descriptor = Arc::new(TypeDescriptor::Declared(DeclaredDescriptor::new(
            element.qualified_name.clone(),
            type_args,
            element,
        )));
        Ok(self.intern(qualified_name.to_string(), descriptor))
    }

    /// Resolve a structural type reference, bottom-up.
    ///
    /// Generic arguments, array elements, and wildcard bounds are fully
    /// resolved before the enclosing descriptor is constructed; a failure
    /// anywhere leaves nothing cached for the enclosing form.
    pub fn resolve_ref(&self, type_ref: &TypeRef) -> ResolveResult<Arc<TypeDescriptor>> {
        self.host()?;
        match type_ref {
            TypeRef::Primitive(kind) => Ok(Arc::new(TypeDescriptor::Primitive(*kind))),
            TypeRef::Variable(name) => Ok(Arc::new(TypeDescriptor::Variable(name.clone()))),
            TypeRef::Array(element) => {
                let element_type = self.resolve_ref(element)?;
                Ok(Arc::new(TypeDescriptor::Array(ArrayDescriptor::new(
                    element_type,
                ))))
            }
            TypeRef::Wildcard { upper_bound } => {
                let descriptor = match upper_bound {
                    Some(bound) => WildcardDescriptor::bounded(self.resolve_ref(bound)?),
                    None => WildcardDescriptor::unbounded(),
                };
                Ok(Arc::new(TypeDescriptor::Wildcard(descriptor)))
            }
            TypeRef::Named { name, args } if args.is_empty() => self.resolve(name),
            TypeRef::Named { name, args } => {
                let type_args = args
                    .iter()
                    .map(|arg| self.resolve_ref(arg))
                    .collect::<ResolveResult<Vec<_>>>()?;

                let element = self.lookup_element(name)?;
                if element.type_params.len() != type_args.len() {
                    return Err(ResolveError::MismatchedArity {
                        name: name.clone(),
                        expected: element.type_params.len(),
                        found: type_args.len(),
                    });
                }

                let descriptor = Arc::new(TypeDescriptor::Declared(DeclaredDescriptor::new(
                    element.qualified_name.clone(),
                    type_args,
                    element,
                )));
                let key = descriptor.display_name();
                Ok(self.intern(key, descriptor))
            }
        }
    }

    /// Resolve the boxed counterpart of a primitive.
    pub fn boxed_counterpart(&self, kind: PrimitiveKind) -> ResolveResult<Arc<TypeDescriptor>> {
        self.resolve(kind.boxed_name())
    }

    fn intern(&self, key: String, descriptor: Arc<TypeDescriptor>) -> Arc<TypeDescriptor> {
        let mut registry = self.registry.lock();
        match registry.lookup(&key) {
            Some(existing) => existing,
            None => {
                log::debug!("resolved {key}");
                registry.insert(key, descriptor.clone());
                descriptor
            }
        }
    }

    // -----------------------------------------------------------------------
    // Package extraction
    // -----------------------------------------------------------------------

    /// Enclosing package of a resolved descriptor.
    ///
    /// Nested types inherit the outermost declaration's package. Arrays
    /// take their element type's package. Primitives, wildcards, and type
    /// variables live in the unnamed package.
    pub fn package_of(&self, descriptor: &TypeDescriptor) -> ResolveResult<PackageName> {
        let host = self.host()?;
        match descriptor {
            TypeDescriptor::Declared(decl) => {
                let mut element = decl.element.clone();
                while let Some(outer_name) = element.enclosing.clone() {
                    element = host.lookup(&outer_name).ok_or_else(|| {
                        ResolveError::UnresolvedPackage {
                            name: decl.qualified_name.clone(),
                        }
                    })?;
                }
                host.package_of(&element)
                    .ok_or_else(|| ResolveError::UnresolvedPackage {
                        name: decl.qualified_name.clone(),
                    })
            }
            TypeDescriptor::Array(arr) => self.package_of(&arr.element_type),
            _ => Ok(PackageName::unnamed()),
        }
    }

    // -----------------------------------------------------------------------
    // Constructor location
    // -----------------------------------------------------------------------

    /// Usable constructor of a type: the first declared one, or the
    /// implicit zero-argument constructor when none is declared.
    ///
    /// `Ok(None)` for non-declared descriptors and non-class kinds --
    /// valid absence, since callers probe many declarations. Parameter
    /// type variables stay unsubstituted; apply [`TypeBindings`] when the
    /// instantiation matters.
    pub fn first_constructor(
        &self,
        descriptor: &TypeDescriptor,
    ) -> ResolveResult<Option<ConstructorDescriptor>> {
        let host = self.host()?;
        let TypeDescriptor::Declared(decl) = descriptor else {
            return Ok(None);
        };
        if decl.element.kind != ElementKind::Class {
            return Ok(None);
        }

        let declared = host.constructors_of(&decl.element);
        let constructor = declared
            .into_iter()
            .next()
            .unwrap_or_else(ConstructorDecl::zero_arg);

        let mut params = Vec::with_capacity(constructor.params.len());
        for param in &constructor.params {
            params.push(ConstructorParam {
                name: param.name.clone(),
                param_type: self.resolve_ref(&param.param_type)?,
            });
        }
        Ok(Some(ConstructorDescriptor {
            owner: decl.element.clone(),
            params,
        }))
    }

    // -----------------------------------------------------------------------
    // Eligibility filter
    // -----------------------------------------------------------------------

    /// Whether a declaration is eligible for adapter generation.
    ///
    /// Absent declarations are ineligible, not an error. The kind must be
    /// on the configured allow-list and the declaration must carry one of
    /// the configured marker annotations.
    pub fn is_supported_element_kind(&self, element: Option<&DeclaredElement>) -> bool {
        let Some(element) = element else {
            return false;
        };
        if !self.config.supported_kinds.contains(&element.kind) {
            return false;
        }
        element
            .annotations
            .iter()
            .any(|annotation| self.config.marker_annotations.contains(annotation))
    }

    // -----------------------------------------------------------------------
    // Bindings and supertypes
    // -----------------------------------------------------------------------

    /// Substitute bindings through a reference, then resolve it.
    pub fn substitute(
        &self,
        type_ref: &TypeRef,
        bindings: &TypeBindings,
    ) -> ResolveResult<Arc<TypeDescriptor>> {
        let rewritten = bindings.apply(type_ref)?;
        self.resolve_ref(&rewritten)
    }

    /// Declared supertype with this descriptor's bindings applied.
    ///
    /// `Box<String>` whose element declares `extends Base<T>` resolves to
    /// `Base<String>`. `Ok(None)` for root types and non-declared forms.
    pub fn resolve_supertype(
        &self,
        descriptor: &TypeDescriptor,
    ) -> ResolveResult<Option<Arc<TypeDescriptor>>> {
        self.host()?;
        let TypeDescriptor::Declared(decl) = descriptor else {
            return Ok(None);
        };
        let Some(super_ref) = &decl.element.supertype else {
            return Ok(None);
        };
        let bindings = TypeBindings::for_descriptor(descriptor).unwrap_or_default();
        self.substitute(super_ref, &bindings).map(Some)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ParamDecl;
    use crate::host::{DeclaredElementBuilder, InMemoryHost};

    fn session_with(host: InMemoryHost) -> Session {
        let session = Session::new();
        session.initialize(Arc::new(host)).expect("first init");
        session
    }

    #[test]
    fn test_not_initialized_fails_fast() {
        let session = Session::new();
        assert!(!session.is_initialized());
        assert_eq!(
            session.resolve("java.lang.String").unwrap_err(),
            ResolveError::NotInitialized
        );
        assert_eq!(
            session.resolve_ref(&TypeRef::primitive(PrimitiveKind::Int)).unwrap_err(),
            ResolveError::NotInitialized
        );
    }

    #[test]
    fn test_second_initialize_rejected() {
        let session = session_with(InMemoryHost::with_core_types());
        let err = session
            .initialize(Arc::new(InMemoryHost::new()))
            .unwrap_err();
        assert_eq!(err, ResolveError::AlreadyInitialized);
    }

    #[test]
    fn test_resolve_caches_one_instance() {
        let session = session_with(InMemoryHost::with_core_types());
        let first = session.resolve("java.lang.String").expect("known");
        let second = session.resolve("java.lang.String").expect("known");
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.type_args().is_empty());
        assert_eq!(session.cached_types(), 1);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let session = session_with(InMemoryHost::with_core_types());
        let err = session.resolve("java.lang.Missing").unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnresolvedType {
                name: "java.lang.Missing".into()
            }
        );
        assert_eq!(session.cached_types(), 0);
    }

    #[test]
    fn test_resolve_empty_name_rejected() {
        let session = session_with(InMemoryHost::new());
        assert!(matches!(
            session.resolve(""),
            Err(ResolveError::UnresolvedType { .. })
        ));
    }

    #[test]
    fn test_generic_declaration_resolves_with_own_variables() {
        let session = session_with(InMemoryHost::with_core_types());
        let list = session.resolve("java.util.List").expect("known");
        assert!(list.is_parameterized());
        assert_eq!(list.display_name(), "java.util.List<E>");
        assert_eq!(
            list.type_args()[0].as_ref(),
            &TypeDescriptor::Variable("E".into())
        );
    }

    #[test]
    fn test_parameterized_resolution_is_bottom_up_and_cached() {
        let session = session_with(InMemoryHost::with_core_types());
        let list_of_strings = TypeRef::generic(
            "java.util.List",
            vec![TypeRef::named("java.lang.String")],
        );

        let first = session.resolve_ref(&list_of_strings).expect("known");
        let second = session.resolve_ref(&list_of_strings).expect("known");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.display_name(), "java.util.List<java.lang.String>");

        // The argument was resolved first and cached on its own key.
        let string = session.resolve("java.lang.String").expect("cached");
        assert!(Arc::ptr_eq(&string, &first.type_args()[0]));
    }

    #[test]
    fn test_parameterized_failure_caches_nothing_for_parent() {
        let session = session_with(InMemoryHost::with_core_types());
        let broken = TypeRef::generic("java.util.List", vec![TypeRef::named("demo.Missing")]);
        assert!(matches!(
            session.resolve_ref(&broken),
            Err(ResolveError::UnresolvedType { .. })
        ));
        assert!(session
            .registry
            .lock()
            .lookup("java.util.List<demo.Missing>")
            .is_none());
    }

    #[test]
    fn test_arity_mismatch_rejected() {
        let session = session_with(InMemoryHost::with_core_types());
        let wrong = TypeRef::generic(
            "java.lang.String",
            vec![TypeRef::named("java.lang.Object")],
        );
        assert_eq!(
            session.resolve_ref(&wrong).unwrap_err(),
            ResolveError::MismatchedArity {
                name: "java.lang.String".into(),
                expected: 0,
                found: 1
            }
        );
    }

    #[test]
    fn test_primitive_and_boxed_stay_distinct() {
        let session = session_with(InMemoryHost::with_core_types());
        let primitive = session
            .resolve_ref(&TypeRef::primitive(PrimitiveKind::Int))
            .expect("primitive");
        let boxed = session.boxed_counterpart(PrimitiveKind::Int).expect("boxed");
        assert_ne!(primitive.as_ref(), boxed.as_ref());
        assert_eq!(boxed.qualified_name(), Some("java.lang.Integer"));
    }

    #[test]
    fn test_package_of_nested_walks_to_outermost() {
        let mut host = InMemoryHost::new();
        host.declare(DeclaredElementBuilder::new("com.example.Outer").build());
        host.declare(
            DeclaredElementBuilder::new("com.example.Outer.Inner")
                .enclosing("com.example.Outer")
                .build(),
        );
        let session = session_with(host);

        let inner = session.resolve("com.example.Outer.Inner").expect("known");
        let package = session.package_of(&inner).expect("resolved");
        assert_eq!(package, PackageName::new("com.example"));
    }

    #[test]
    fn test_package_of_broken_enclosing_chain() {
        let mut host = InMemoryHost::new();
        host.declare(
            DeclaredElementBuilder::new("demo.Orphan.Inner")
                .enclosing("demo.Orphan")
                .build(),
        );
        let session = session_with(host);

        let inner = session.resolve("demo.Orphan.Inner").expect("known");
        assert_eq!(
            session.package_of(&inner).unwrap_err(),
            ResolveError::UnresolvedPackage {
                name: "demo.Orphan.Inner".into()
            }
        );
    }

    #[test]
    fn test_package_of_array_and_primitive() {
        let session = session_with(InMemoryHost::with_core_types());
        let strings = session
            .resolve_ref(&TypeRef::array_of(TypeRef::named("java.lang.String")))
            .expect("known");
        assert_eq!(
            session.package_of(&strings).expect("resolved"),
            PackageName::new("java.lang")
        );

        let int = session
            .resolve_ref(&TypeRef::primitive(PrimitiveKind::Int))
            .expect("primitive");
        assert!(session.package_of(&int).expect("resolved").is_unnamed());
    }

    #[test]
    fn test_first_constructor_picks_declaration_order() {
        let mut host = InMemoryHost::with_core_types();
        host.declare(
            DeclaredElementBuilder::new("demo.Labelled")
                .constructor(vec![ParamDecl::new(
                    "label",
                    TypeRef::named("java.lang.String"),
                )])
                .constructor(vec![])
                .build(),
        );
        let session = session_with(host);

        let labelled = session.resolve("demo.Labelled").expect("known");
        let constructor = session
            .first_constructor(&labelled)
            .expect("class")
            .expect("present");
        assert_eq!(constructor.arity(), 1);
        assert_eq!(constructor.params[0].name, "label");
        assert_eq!(
            constructor.params[0].param_type.qualified_name(),
            Some("java.lang.String")
        );
        assert_eq!(constructor.owner.qualified_name, "demo.Labelled");
    }

    #[test]
    fn test_first_constructor_implicit_fallback() {
        let mut host = InMemoryHost::new();
        host.declare(DeclaredElementBuilder::new("demo.Bare").build());
        let session = session_with(host);

        let bare = session.resolve("demo.Bare").expect("known");
        let constructor = session
            .first_constructor(&bare)
            .expect("class")
            .expect("implicit");
        assert!(constructor.is_zero_arg());
    }

    #[test]
    fn test_first_constructor_absent_for_interface() {
        let session = session_with(InMemoryHost::with_core_types());
        let list = session.resolve("java.util.List").expect("known");
        assert!(session.first_constructor(&list).expect("probe").is_none());

        let int = session
            .resolve_ref(&TypeRef::primitive(PrimitiveKind::Int))
            .expect("primitive");
        assert!(session.first_constructor(&int).expect("probe").is_none());
    }

    #[test]
    fn test_supported_kind_filter() {
        let session = session_with(InMemoryHost::with_core_types());
        assert!(!session.is_supported_element_kind(None));

        // Plain library class without the marker annotation.
        let string = session.lookup_element("java.lang.String").expect("known");
        assert!(!session.is_supported_element_kind(Some(&string)));

        let eligible = DeclaredElementBuilder::new("demo.User")
            .annotation("GenerateAdapter")
            .build();
        assert!(session.is_supported_element_kind(Some(&eligible)));

        let annotated_interface = DeclaredElementBuilder::new("demo.Api")
            .kind(ElementKind::Interface)
            .annotation("GenerateAdapter")
            .build();
        assert!(!session.is_supported_element_kind(Some(&annotated_interface)));
    }

    #[test]
    fn test_supported_kind_filter_honors_config() {
        let config = ResolverConfig {
            supported_kinds: vec![ElementKind::Class, ElementKind::Enum],
            marker_annotations: vec!["Custom".to_string()],
        };
        let session = Session::with_config(config);
        session
            .initialize(Arc::new(InMemoryHost::new()))
            .expect("init");
        assert_eq!(session.config().marker_annotations, vec!["Custom"]);

        let custom_enum = DeclaredElementBuilder::new("demo.Mode")
            .kind(ElementKind::Enum)
            .annotation("Custom")
            .build();
        assert!(session.is_supported_element_kind(Some(&custom_enum)));

        let default_marker = DeclaredElementBuilder::new("demo.User")
            .annotation("GenerateAdapter")
            .build();
        assert!(!session.is_supported_element_kind(Some(&default_marker)));
    }

    #[test]
    fn test_wildcard_bounds_resolve_bottom_up() {
        let mut host = InMemoryHost::with_core_types();
        host.declare(
            DeclaredElementBuilder::new("demo.Sink")
                .bounded_type_param("T", TypeRef::named("java.lang.Object"))
                .build(),
        );
        let session = session_with(host);

        let sink = session
            .resolve_ref(&TypeRef::generic(
                "demo.Sink",
                vec![TypeRef::wildcard_extends(TypeRef::named(
                    "java.lang.String",
                ))],
            ))
            .expect("known");
        assert_eq!(
            sink.display_name(),
            "demo.Sink<? extends java.lang.String>"
        );

        let open = session
            .resolve_ref(&TypeRef::generic("demo.Sink", vec![TypeRef::wildcard()]))
            .expect("known");
        assert_eq!(open.display_name(), "demo.Sink<?>");
        assert_ne!(sink, open);
    }

    #[test]
    fn test_resolve_supertype_applies_bindings() {
        let mut host = InMemoryHost::with_core_types();
        host.declare(
            DeclaredElementBuilder::new("demo.Base").type_param("T").build(),
        );
        host.declare(
            DeclaredElementBuilder::new("demo.Box")
                .type_param("T")
                .supertype(TypeRef::generic("demo.Base", vec![TypeRef::variable("T")]))
                .build(),
        );
        let session = session_with(host);

        let box_of_string = session
            .resolve_ref(&TypeRef::generic(
                "demo.Box",
                vec![TypeRef::named("java.lang.String")],
            ))
            .expect("known");
        let supertype = session
            .resolve_supertype(&box_of_string)
            .expect("resolves")
            .expect("present");
        assert_eq!(supertype.display_name(), "demo.Base<java.lang.String>");
    }

    #[test]
    fn test_resolve_supertype_absent_for_root() {
        let session = session_with(InMemoryHost::with_core_types());
        let object = session.resolve("java.lang.Object").expect("known");
        assert!(session.resolve_supertype(&object).expect("probe").is_none());
    }

    #[test]
    fn test_clear_resets_cache() {
        let session = session_with(InMemoryHost::with_core_types());
        session.resolve("java.lang.String").expect("known");
        assert_eq!(session.cached_types(), 1);
        session.clear();
        assert_eq!(session.cached_types(), 0);
    }
}
