//! Entry points that wrap a callable in type-hint enforcement.
//!
//! Every entry point runs the decoration-time checks once and hands back an
//! [`EnforcedFn`]. The wrapped callable receives the bound, verified
//! arguments and returns a [`Value`] or its own error type `E`.

use std::fmt;
use std::sync::Arc;

use typen_core::config::TypenConfig;
use typen_core::decl::FunctionDecl;
use typen_core::errors::TypenError;
use typen_core::lattice::CoercionLattice;
use typen_core::mode::{EnforcementMode, Requirements};
use typen_core::value::Value;

use crate::binding::{BindingError, BoundArguments, CallArgs};
use crate::enforcer::Enforcer;
use crate::signature::CallableSignature;

/// Requirements plus coercion rules for one family of wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnforceOptions {
    pub requirements: Requirements,
    pub lattice: CoercionLattice,
}

impl EnforceOptions {
    pub fn new(requirements: Requirements) -> Self {
        Self {
            requirements,
            lattice: CoercionLattice::default(),
        }
    }

    pub fn with_lattice(mut self, lattice: CoercionLattice) -> Self {
        self.lattice = lattice;
        self
    }

    pub fn from_config(config: &TypenConfig) -> Self {
        Self {
            requirements: config.requirements(),
            lattice: config.coercion,
        }
    }
}

impl From<EnforcementMode> for EnforceOptions {
    fn from(mode: EnforcementMode) -> Self {
        Self::new(mode.into())
    }
}

/// A reusable, configured decorator.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeHintDecorator {
    options: EnforceOptions,
}

impl TypeHintDecorator {
    pub fn new(options: EnforceOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &TypenConfig) -> Self {
        Self::new(EnforceOptions::from_config(config))
    }

    pub fn options(&self) -> &EnforceOptions {
        &self.options
    }

    pub fn apply<F, E>(&self, decl: FunctionDecl, func: F) -> Result<EnforcedFn<F>, TypenError>
    where
        F: Fn(BoundArguments) -> Result<Value, E>,
    {
        wrap(decl, func, self.options)
    }
}

/// Build a decorator with explicit requirements and lattice.
pub fn configure_enforce_type_hints(options: EnforceOptions) -> TypeHintDecorator {
    TypeHintDecorator::new(options)
}

/// Permissive enforcement: only declared specifiers are checked.
pub fn enforce_type_hints<F, E>(decl: FunctionDecl, func: F) -> Result<EnforcedFn<F>, TypenError>
where
    F: Fn(BoundArguments) -> Result<Value, E>,
{
    wrap(decl, func, EnforceOptions::new(Requirements::none()))
}

/// Strict enforcement: every non-exempt slot must declare a specifier.
pub fn strict_type_hints<F, E>(decl: FunctionDecl, func: F) -> Result<EnforcedFn<F>, TypenError>
where
    F: Fn(BoundArguments) -> Result<Value, E>,
{
    wrap(decl, func, EnforceOptions::new(Requirements::all()))
}

/// Requires specifiers on parameters only.
pub fn strict_parameter_hints<F, E>(
    decl: FunctionDecl,
    func: F,
) -> Result<EnforcedFn<F>, TypenError>
where
    F: Fn(BoundArguments) -> Result<Value, E>,
{
    wrap(decl, func, EnforceOptions::new(Requirements::parameters_only()))
}

/// Requires a specifier on the return slot only.
pub fn strict_return_hint<F, E>(decl: FunctionDecl, func: F) -> Result<EnforcedFn<F>, TypenError>
where
    F: Fn(BoundArguments) -> Result<Value, E>,
{
    wrap(decl, func, EnforceOptions::new(Requirements::return_only()))
}

pub fn wrap<F, E>(
    decl: FunctionDecl,
    func: F,
    options: EnforceOptions,
) -> Result<EnforcedFn<F>, TypenError>
where
    F: Fn(BoundArguments) -> Result<Value, E>,
{
    let enforcer = Enforcer::new(&decl, options.requirements, options.lattice)?;
    Ok(EnforcedFn {
        enforcer: Arc::new(enforcer),
        func,
    })
}

/// Everything an enforced call can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CallError<E> {
    /// The arguments could not be mapped onto the signature at all.
    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error(transparent)]
    Contract(#[from] TypenError),

    /// The wrapped callable's own failure, untouched.
    #[error("{0}")]
    Callable(E),
}

impl<E> CallError<E> {
    pub fn contract(&self) -> Option<&TypenError> {
        match self {
            CallError::Contract(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_contract(self) -> Option<TypenError> {
        match self {
            CallError::Contract(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_callable(self) -> Option<E> {
        match self {
            CallError::Callable(e) => Some(e),
            _ => None,
        }
    }

    /// Contract error code, if this is a contract violation.
    pub fn code(&self) -> Option<&'static str> {
        self.contract().map(TypenError::code)
    }
}

/// A callable wrapped in enforcement. Cheap to clone when `F` is.
#[derive(Clone)]
pub struct EnforcedFn<F> {
    enforcer: Arc<Enforcer>,
    func: F,
}

impl<F> fmt::Debug for EnforcedFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnforcedFn")
            .field("signature", &self.enforcer.signature().to_string())
            .field("requirements", &self.enforcer.requirements())
            .field("lattice", &self.enforcer.lattice())
            .finish_non_exhaustive()
    }
}

impl<F> EnforcedFn<F> {
    pub fn name(&self) -> &str {
        self.enforcer.signature().name()
    }

    pub fn doc(&self) -> Option<&str> {
        self.enforcer.signature().doc()
    }

    pub fn signature(&self) -> &CallableSignature {
        self.enforcer.signature()
    }

    pub fn enforcer(&self) -> &Enforcer {
        &self.enforcer
    }

    pub fn into_inner(self) -> F {
        self.func
    }

    /// Bind, verify, invoke, then verify the result.
    pub fn call<E>(&self, args: impl Into<CallArgs>) -> Result<Value, CallError<E>>
    where
        F: Fn(BoundArguments) -> Result<Value, E>,
    {
        tracing::trace!(function = self.name(), "enforced call");
        let bound = self.enforcer.bind(args.into())?;
        let bound = self
            .enforcer
            .verify_args(bound)
            .map_err(|e| CallError::Contract(e.into()))?;
        let produced = (self.func)(bound).map_err(CallError::Callable)?;
        self.enforcer
            .verify_result(produced)
            .map_err(|e| CallError::Contract(e.into()))
    }
}

#[cfg(test)]
#[path = "decorators_tests.rs"]
mod tests;
