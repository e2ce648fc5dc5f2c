// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolution error kinds.
//!
//! Valid absences (no constructor on a non-class, an unsupported kind) are
//! `Option`/`bool` returns, never errors. Errors mean the session cannot
//! proceed with the requested resolution.

use thiserror::Error;

/// Errors raised by session resolution operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A resolution method was called before [`initialize`](crate::Session::initialize).
    #[error("resolution requested before session initialization")]
    NotInitialized,

    /// `initialize` was called on an already-initialized session.
    #[error("session is already initialized")]
    AlreadyInitialized,

    /// The qualified name or type reference matches no declaration known
    /// to the host type system.
    #[error("no declaration found for type `{name}`")]
    UnresolvedType { name: String },

    /// The enclosing scope of a resolved declaration could not be located.
    /// Unreachable for descriptors produced by the resolver itself.
    #[error("enclosing package of `{name}` could not be located")]
    UnresolvedPackage { name: String },

    /// Substitution met a type variable with no binding.
    #[error("type variable `{name}` has no binding")]
    UnboundTypeVariable { name: String },

    /// A type reference supplied the wrong number of generic arguments.
    #[error("`{name}` expects {expected} type argument(s), found {found}")]
    MismatchedArity {
        name: String,
        expected: usize,
        found: usize,
    },
}

pub type ResolveResult<T> = core::result::Result<T, ResolveError>;
