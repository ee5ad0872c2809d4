//! Core types, specifiers, and configuration for typen.
//!
//! This crate provides the foundational data structures used across all typen crates:
//! - [`value`] - Dynamic values passed through enforced call boundaries
//! - [`specifier`] - Plain and composite type specifiers, plus the [`Conform`](specifier::Conform) extension trait
//! - [`lattice`] - Coercibility rules for plain types
//! - [`decl`] - Function declarations and their validation
//! - [`errors`] - The contract violation taxonomy
//! - [`mode`] - Enforcement modes and slot requirements
//! - [`config`] - Configuration loading from `typen.json`
//! - [`hash`] - Deterministic signature fingerprints (base62 of xxhash64)

pub mod config;
pub mod decl;
pub mod errors;
pub mod hash;
pub mod lattice;
pub mod mode;
pub mod specifier;
pub mod value;

pub use decl::{CallableKind, FunctionDecl, Param, ParamKind, SignatureBuilder, SignatureError};
pub use errors::{
    ArgumentSlot, ParameterTypeError, ReturnTypeError, TypenError, UnspecifiedParameterTypeError,
    UnspecifiedReturnTypeError, ViolationContext, ViolationReport,
};
pub use lattice::CoercionLattice;
pub use mode::{EnforcementMode, Requirements};
pub use specifier::{Conform, PlainType, Specifier};
pub use value::{Class, Object, Value};
