use typen_core::decl::FunctionDecl;
use typen_core::errors::{
    ArgumentSlot, ParameterTypeError, ReturnTypeError, TypenError, UnspecifiedParameterTypeError,
    UnspecifiedReturnTypeError,
};
use typen_core::lattice::CoercionLattice;
use typen_core::mode::Requirements;
use typen_core::value::Value;

use crate::binding::{bind, BindingError, BoundArguments, CallArgs};
use crate::conformance::{check, first_violation};
use crate::resolver::resolve;
use crate::signature::{CallableSignature, ParameterSpec};

/// Enforces the type hints of one callable. Owns its resolved signature.
#[derive(Debug, Clone)]
pub struct Enforcer {
    pub(crate) signature: CallableSignature,
    pub(crate) requirements: Requirements,
    pub(crate) lattice: CoercionLattice,
}

/// Where a parameter violation was found in a `BoundArguments`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Offender {
    Named(usize),
    VarPositional(usize),
    VarKeyword(usize),
}

impl Enforcer {
    /// Resolve `decl` and run every decoration-time check.
    ///
    /// Missing specifiers are rejected first (parameters, then the return slot),
    /// then declared defaults are checked against their own specifiers.
    pub fn new(
        decl: &FunctionDecl,
        requirements: Requirements,
        lattice: CoercionLattice,
    ) -> Result<Self, TypenError> {
        let enforcer = Self {
            signature: resolve(decl),
            requirements,
            lattice,
        };
        enforcer.check_requirements()?;
        enforcer.check_defaults()?;

        tracing::debug!(
            function = enforcer.signature.name(),
            fingerprint = enforcer.signature.fingerprint(),
            kind = %enforcer.signature.kind(),
            require_parameters = requirements.parameters,
            require_return = requirements.return_value,
            "enforcing type hints"
        );
        Ok(enforcer)
    }

    pub fn signature(&self) -> &CallableSignature {
        &self.signature
    }

    pub fn requirements(&self) -> Requirements {
        self.requirements
    }

    pub fn lattice(&self) -> &CoercionLattice {
        &self.lattice
    }

    pub fn bind(&self, args: CallArgs) -> Result<BoundArguments, BindingError> {
        bind(&self.signature, args)
    }

    /// Check every supplied argument, in declaration order, stopping at the
    /// first violation. On success the arguments are handed back untouched;
    /// on failure the offending value is moved into the error.
    pub fn verify_args(&self, mut bound: BoundArguments) -> Result<BoundArguments, ParameterTypeError> {
        let Some((offender, spec)) = self.find_violation(&bound) else {
            return Ok(bound);
        };
        let Some(specifier) = spec.declared_specifier.clone() else {
            return Ok(bound);
        };

        let (slot, value) = match offender {
            Offender::Named(idx) => (
                ArgumentSlot::Named,
                std::mem::replace(&mut bound.named[idx].value, Value::None),
            ),
            Offender::VarPositional(idx) => (
                ArgumentSlot::VarPositional { index: idx },
                bound.var_positional.swap_remove(idx),
            ),
            Offender::VarKeyword(idx) => {
                let (key, value) = bound.var_keyword.swap_remove(idx);
                (ArgumentSlot::VarKeyword { key }, value)
            }
        };

        let err = ParameterTypeError {
            function: self.signature.name().to_string(),
            parameter_name: spec.name.clone(),
            slot,
            value,
            specifier,
            at_decoration: false,
        };
        tracing::debug!(
            function = %err.function,
            parameter = %err.parameter_name,
            code = "T001",
            "parameter type violation"
        );
        Err(err)
    }

    /// Check the produced value. On success it is returned unaltered.
    pub fn verify_result(&self, value: Value) -> Result<Value, ReturnTypeError> {
        let returns = self.signature.returns();
        let Some(specifier) = &returns.declared_specifier else {
            return Ok(value);
        };
        if check(&value, Some(specifier), &self.lattice) {
            return Ok(value);
        }

        tracing::debug!(
            function = self.signature.name(),
            code = "T002",
            "return type violation"
        );
        Err(ReturnTypeError {
            function: self.signature.name().to_string(),
            return_value: value,
            specifier: specifier.clone(),
        })
    }

    // -- Private helpers --

    fn find_violation(&self, bound: &BoundArguments) -> Option<(Offender, &ParameterSpec)> {
        for (idx, entry) in bound.named.iter().enumerate() {
            // Defaults were checked at decoration time.
            if !entry.supplied {
                continue;
            }
            let Some(spec) = self.signature.param(&entry.name) else {
                continue;
            };
            if !spec.is_checked() {
                continue;
            }
            if !check(&entry.value, spec.declared_specifier.as_ref(), &self.lattice) {
                return Some((Offender::Named(idx), spec));
            }
        }

        if let Some(spec) = self.signature.var_positional().filter(|p| p.is_checked()) {
            if let Some(idx) = first_violation(
                &bound.var_positional,
                spec.declared_specifier.as_ref(),
                &self.lattice,
            ) {
                return Some((Offender::VarPositional(idx), spec));
            }
        }

        if let Some(spec) = self.signature.var_keyword().filter(|p| p.is_checked()) {
            if let Some(idx) = first_violation(
                bound.var_keyword.iter().map(|(_, v)| v),
                spec.declared_specifier.as_ref(),
                &self.lattice,
            ) {
                return Some((Offender::VarKeyword(idx), spec));
            }
        }

        None
    }

    fn check_requirements(&self) -> Result<(), TypenError> {
        let sig = &self.signature;
        if self.requirements.parameters {
            let unspecified: Vec<String> = sig
                .params()
                .iter()
                .filter(|p| !p.exempt && p.declared_specifier.is_none())
                .map(|p| p.name.clone())
                .collect();
            if !unspecified.is_empty() {
                return Err(UnspecifiedParameterTypeError {
                    function: sig.name().to_string(),
                    parameters: unspecified,
                }
                .into());
            }
        }

        let returns = sig.returns();
        if self.requirements.return_value && !returns.exempt && returns.declared_specifier.is_none() {
            return Err(UnspecifiedReturnTypeError {
                function: sig.name().to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn check_defaults(&self) -> Result<(), ParameterTypeError> {
        for param in self.signature.params() {
            let (Some(default), Some(spec)) = (&param.default, &param.declared_specifier) else {
                continue;
            };
            if param.exempt || check(default, Some(spec), &self.lattice) {
                continue;
            }
            return Err(ParameterTypeError {
                function: self.signature.name().to_string(),
                parameter_name: param.name.clone(),
                slot: ArgumentSlot::Named,
                value: default.clone(),
                specifier: spec.clone(),
                at_decoration: true,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "enforcer_tests.rs"]
mod tests;
