// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic-parameter bindings and substitution.
//!
//! A parameterized descriptor implies a map from its declaration's type
//! parameters to the supplied arguments. Substitution rewrites those
//! variables through arbitrary references -- nested generics, arrays, and
//! wildcard upper bounds included -- so inherited signatures and bounds
//! can be expressed in terms of the instantiation.

use crate::descriptor::TypeDescriptor;
use crate::error::{ResolveError, ResolveResult};
use crate::type_ref::TypeRef;
use std::collections::HashMap;
use std::sync::Arc;

/// Map from type-parameter name to the descriptor bound to it.
#[derive(Debug, Clone, Default)]
pub struct TypeBindings {
    map: HashMap<String, Arc<TypeDescriptor>>,
}

impl TypeBindings {
    /// Create an empty binding set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings implied by a declared descriptor: the element's type
    /// parameters zipped with the descriptor's arguments, in order.
    ///
    /// A declared-form descriptor (arguments are its own variables)
    /// produces identity bindings. Returns `None` for non-declared forms.
    pub fn for_descriptor(descriptor: &TypeDescriptor) -> Option<Self> {
        let TypeDescriptor::Declared(decl) = descriptor else {
            return None;
        };
        let mut bindings = Self::new();
        for (param, arg) in decl.element.type_params.iter().zip(decl.type_args.iter()) {
            bindings.bind(&param.name, arg.clone());
        }
        Some(bindings)
    }

    /// Bind a type-parameter name to a descriptor.
    pub fn bind(&mut self, name: impl Into<String>, descriptor: Arc<TypeDescriptor>) {
        self.map.insert(name.into(), descriptor);
    }

    /// Descriptor bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Arc<TypeDescriptor>> {
        self.map.get(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Rewrite every type variable in `type_ref` with its binding.
    ///
    /// Fails with [`ResolveError::UnboundTypeVariable`] rather than
    /// leaving a variable in place: a partial rewrite would resolve to a
    /// descriptor that silently mixes scopes.
    pub fn apply(&self, type_ref: &TypeRef) -> ResolveResult<TypeRef> {
        match type_ref {
            TypeRef::Variable(name) => self
                .map
                .get(name)
                .map(|descriptor| descriptor.to_type_ref())
                .ok_or_else(|| ResolveError::UnboundTypeVariable { name: name.clone() }),
            TypeRef::Named { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.apply(arg))
                    .collect::<ResolveResult<Vec<_>>>()?;
                Ok(TypeRef::Named {
                    name: name.clone(),
                    args,
                })
            }
            TypeRef::Array(element) => Ok(TypeRef::Array(Box::new(self.apply(element)?))),
            TypeRef::Wildcard { upper_bound } => {
                let upper_bound = match upper_bound {
                    Some(bound) => Some(Box::new(self.apply(bound)?)),
                    None => None,
                };
                Ok(TypeRef::Wildcard { upper_bound })
            }
            TypeRef::Primitive(_) => Ok(type_ref.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{DeclaredDescriptor, PrimitiveKind};
    use crate::host::DeclaredElementBuilder;

    fn string_descriptor() -> Arc<TypeDescriptor> {
        let element = Arc::new(DeclaredElementBuilder::new("java.lang.String").build());
        Arc::new(TypeDescriptor::Declared(DeclaredDescriptor::new(
            "java.lang.String",
            vec![],
            element,
        )))
    }

    #[test]
    fn test_apply_rewrites_nested_variables() {
        let mut bindings = TypeBindings::new();
        bindings.bind("T", string_descriptor());

        let list_of_t = TypeRef::generic("java.util.List", vec![TypeRef::variable("T")]);
        let rewritten = bindings.apply(&list_of_t).expect("bound");
        assert_eq!(
            rewritten,
            TypeRef::generic("java.util.List", vec![TypeRef::named("java.lang.String")])
        );
    }

    #[test]
    fn test_apply_rewrites_array_and_wildcard_bounds() {
        let mut bindings = TypeBindings::new();
        bindings.bind("E", Arc::new(TypeDescriptor::Primitive(PrimitiveKind::Int)));

        let arr = TypeRef::array_of(TypeRef::variable("E"));
        assert_eq!(
            bindings.apply(&arr).expect("bound"),
            TypeRef::array_of(TypeRef::primitive(PrimitiveKind::Int))
        );

        let bounded = TypeRef::wildcard_extends(TypeRef::variable("E"));
        assert_eq!(
            bindings.apply(&bounded).expect("bound"),
            TypeRef::wildcard_extends(TypeRef::primitive(PrimitiveKind::Int))
        );
    }

    #[test]
    fn test_apply_fails_on_unbound_variable() {
        let bindings = TypeBindings::new();
        let err = bindings.apply(&TypeRef::variable("T")).unwrap_err();
        assert_eq!(err, ResolveError::UnboundTypeVariable { name: "T".into() });
    }

    #[test]
    fn test_for_descriptor_zips_params_with_args() {
        let element = Arc::new(
            DeclaredElementBuilder::new("demo.Box").type_param("T").build(),
        );
        let descriptor = TypeDescriptor::Declared(DeclaredDescriptor::new(
            "demo.Box",
            vec![string_descriptor()],
            element,
        ));

        let bindings = TypeBindings::for_descriptor(&descriptor).expect("declared");
        assert_eq!(bindings.len(), 1);
        assert_eq!(
            bindings.get("T").map(|d| d.display_name()),
            Some("java.lang.String".to_string())
        );
    }

    #[test]
    fn test_for_descriptor_rejects_non_declared() {
        let primitive = TypeDescriptor::Primitive(PrimitiveKind::Int);
        assert!(TypeBindings::for_descriptor(&primitive).is_none());
    }
}
