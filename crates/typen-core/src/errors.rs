//! Contract violations raised by enforced callables.
//!
//! - T001 [`ParameterTypeError`]: an argument (or a default) does not conform
//! - T002 [`ReturnTypeError`]: the produced value does not conform
//! - T003 [`UnspecifiedParameterTypeError`]: strict mode, parameter lacks a hint
//! - T004 [`UnspecifiedReturnTypeError`]: strict mode, return slot lacks a hint
//!
//! Each leaf is a standalone error type; [`TypenError`] is the common base so
//! callers can match broadly or narrowly. Offending values are owned by the
//! error and can be taken back out with `into_value`.

use serde::{Deserialize, Serialize};

use crate::specifier::Specifier;
use crate::value::Value;

/// Slot name used for the return value in violation contexts.
pub const RETURN_SLOT: &str = "return";

/// Which part of a parameter an offending argument came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "slot", rename_all = "snake_case")]
pub enum ArgumentSlot {
    /// An ordinary (positional-or-keyword or keyword-only) parameter.
    Named,
    /// Element `index` of the variadic-positional collection.
    VarPositional { index: usize },
    /// The value passed under `key` into the variadic-keyword collection.
    VarKeyword { key: String },
}

/// A borrowed view of what failed, with what value, against which specifier.
#[derive(Debug, Clone, Copy)]
pub struct ViolationContext<'a> {
    pub parameter_name: &'a str,
    pub offending_value: &'a Value,
    pub specifier: Option<&'a Specifier>,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", self.render())]
pub struct ParameterTypeError {
    pub function: String,
    pub parameter_name: String,
    pub slot: ArgumentSlot,
    pub value: Value,
    pub specifier: Specifier,
    /// Raised while checking a declared default rather than a supplied argument.
    pub at_decoration: bool,
}

impl ParameterTypeError {
    pub fn context(&self) -> ViolationContext<'_> {
        ViolationContext {
            parameter_name: &self.parameter_name,
            offending_value: &self.value,
            specifier: Some(&self.specifier),
        }
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    fn render(&self) -> String {
        let (function, specifier) = (&self.function, &self.specifier);
        let (name, value, type_name) = (&self.parameter_name, &self.value, self.value.type_name());
        match &self.slot {
            ArgumentSlot::Named => format!(
                "The '{name}' parameter of '{function}' must be {specifier}, but a value of {value} ({type_name}) was specified."
            ),
            ArgumentSlot::VarPositional { .. } => format!(
                "The '{name}' parameters of '{function}' must be {specifier}, but a value of {value} ({type_name}) was specified."
            ),
            ArgumentSlot::VarKeyword { key } => format!(
                "The '{name}' keywords of '{function}' must have values of type {specifier}, but '{key}': {value} ({type_name}) was specified."
            ),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error(
    "The return type of '{function}' must be {specifier}, but a value of {return_value} ({}) was returned.",
    .return_value.type_name()
)]
pub struct ReturnTypeError {
    pub function: String,
    /// The value the callable produced, exactly as produced.
    pub return_value: Value,
    pub specifier: Specifier,
}

impl ReturnTypeError {
    pub fn context(&self) -> ViolationContext<'_> {
        ViolationContext {
            parameter_name: RETURN_SLOT,
            offending_value: &self.return_value,
            specifier: Some(&self.specifier),
        }
    }

    pub fn into_value(self) -> Value {
        self.return_value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "The following parameters of '{function}' must be given type hints: {}",
    .parameters.join(", ")
)]
pub struct UnspecifiedParameterTypeError {
    pub function: String,
    /// Every offending parameter, in declaration order.
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("A return type hint must be specified for '{function}'.")]
pub struct UnspecifiedReturnTypeError {
    pub function: String,
}

/// Common base of every contract violation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypenError {
    #[error(transparent)]
    Parameter(#[from] ParameterTypeError),

    #[error(transparent)]
    Return(#[from] ReturnTypeError),

    #[error(transparent)]
    UnspecifiedParameter(#[from] UnspecifiedParameterTypeError),

    #[error(transparent)]
    UnspecifiedReturn(#[from] UnspecifiedReturnTypeError),
}

impl TypenError {
    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            TypenError::Parameter(_) => "T001",
            TypenError::Return(_) => "T002",
            TypenError::UnspecifiedParameter(_) => "T003",
            TypenError::UnspecifiedReturn(_) => "T004",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            TypenError::Parameter(_) => "parameter_type",
            TypenError::Return(_) => "return_type",
            TypenError::UnspecifiedParameter(_) => "unspecified_parameter_type",
            TypenError::UnspecifiedReturn(_) => "unspecified_return_type",
        }
    }

    pub fn function(&self) -> &str {
        match self {
            TypenError::Parameter(e) => &e.function,
            TypenError::Return(e) => &e.function,
            TypenError::UnspecifiedParameter(e) => &e.function,
            TypenError::UnspecifiedReturn(e) => &e.function,
        }
    }

    /// Violation context for errors that carry an offending value.
    pub fn context(&self) -> Option<ViolationContext<'_>> {
        match self {
            TypenError::Parameter(e) => Some(e.context()),
            TypenError::Return(e) => Some(e.context()),
            _ => None,
        }
    }

    /// True for errors raised while the wrapper was being built.
    pub fn is_authoring_time(&self) -> bool {
        match self {
            TypenError::Parameter(e) => e.at_decoration,
            TypenError::Return(_) => false,
            TypenError::UnspecifiedParameter(_) | TypenError::UnspecifiedReturn(_) => true,
        }
    }

    /// Take the offending value back out of the error.
    pub fn into_value(self) -> Option<Value> {
        match self {
            TypenError::Parameter(e) => Some(e.into_value()),
            TypenError::Return(e) => Some(e.into_value()),
            _ => None,
        }
    }

    /// Machine-readable summary of this violation.
    pub fn report(&self) -> ViolationReport {
        let context = self.context();
        let slot = match self {
            TypenError::Parameter(e) => Some(e.slot.clone()),
            _ => None,
        };
        let parameters = match self {
            TypenError::Parameter(e) => vec![e.parameter_name.clone()],
            TypenError::Return(_) => vec![RETURN_SLOT.to_string()],
            TypenError::UnspecifiedParameter(e) => e.parameters.clone(),
            TypenError::UnspecifiedReturn(_) => vec![RETURN_SLOT.to_string()],
        };
        ViolationReport {
            code: self.code().to_string(),
            category: self.category().to_string(),
            function: self.function().to_string(),
            parameters,
            slot,
            value: context.map(|c| c.offending_value.to_string()),
            value_type: context.map(|c| c.offending_value.type_name().to_string()),
            specifier: context.and_then(|c| c.specifier).map(|s| s.to_string()),
            authoring_time: self.is_authoring_time(),
            message: self.to_string(),
        }
    }
}

/// Serializable form of a [`TypenError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationReport {
    pub code: String,
    pub category: String,
    pub function: String,
    pub parameters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub slot: Option<ArgumentSlot>,
    pub value: Option<String>,
    pub value_type: Option<String>,
    pub specifier: Option<String>,
    pub authoring_time: bool,
    pub message: String,
}
