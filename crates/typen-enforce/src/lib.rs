//! Enforcement engine for typen type-hint contracts.
//!
//! Wraps callables so that their declared specifiers are honoured:
//! - T001: an argument or a declared default does not conform
//! - T002: the produced value does not conform
//! - T003: strict mode, a non-exempt parameter has no specifier
//! - T004: strict mode, a non-exempt return slot has no specifier
//!
//! Decoration-time checks run once in [`Enforcer::new`]; every call then goes
//! through bind, verify arguments, invoke, verify result.

pub mod signature;
pub mod exemption;
pub mod resolver;
pub mod conformance;
pub mod binding;
pub mod enforcer;
pub mod decorators;

pub use binding::{BindingError, BoundArguments, BoundValue, CallArgs};
pub use decorators::{
    configure_enforce_type_hints, enforce_type_hints, strict_parameter_hints, strict_return_hint,
    strict_type_hints, wrap, CallError, EnforceOptions, EnforcedFn, TypeHintDecorator,
};
pub use enforcer::Enforcer;
pub use resolver::resolve;
pub use signature::{CallableSignature, ParameterSpec, ReturnSpec};
