//! Mapping a caller's arguments onto a signature.
//!
//! Positional arguments fill positional-or-keyword parameters in order, the
//! rest go to the variadic-positional slot. Keywords match named parameters,
//! the rest go to the variadic-keyword slot. Missing parameters take their
//! declared default. Failures here belong to the calling convention, not to
//! the type contract.

use typen_core::decl::ParamKind;
use typen_core::value::Value;

use crate::signature::CallableSignature;

/// Arguments as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    positional: Vec<Value>,
    keywords: Vec<(String, Value)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.push((key.into(), value.into()));
        self
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn keywords(&self) -> &[(String, Value)] {
        &self.keywords
    }
}

impl From<Vec<Value>> for CallArgs {
    fn from(positional: Vec<Value>) -> Self {
        Self {
            positional,
            keywords: Vec::new(),
        }
    }
}

impl From<()> for CallArgs {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

/// A named parameter's bound value.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundValue {
    pub name: String,
    pub value: Value,
    /// False when the value came from the declared default.
    pub supplied: bool,
}

/// Arguments after binding, handed to the wrapped callable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArguments {
    pub(crate) named: Vec<BoundValue>,
    pub(crate) var_positional: Vec<Value>,
    pub(crate) var_keyword: Vec<(String, Value)>,
}

impl BoundArguments {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.named
            .iter()
            .find(|b| b.name == name)
            .map(|b| &b.value)
    }

    /// Move a named value out, leaving `Value::None` in its place.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.named
            .iter_mut()
            .find(|b| b.name == name)
            .map(|b| std::mem::replace(&mut b.value, Value::None))
    }

    pub fn is_supplied(&self, name: &str) -> bool {
        self.named.iter().any(|b| b.name == name && b.supplied)
    }

    pub fn named(&self) -> &[BoundValue] {
        &self.named
    }

    pub fn var_positional(&self) -> &[Value] {
        &self.var_positional
    }

    pub fn var_keyword(&self) -> &[(String, Value)] {
        &self.var_keyword
    }

    pub fn take_var_positional(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.var_positional)
    }

    pub fn take_var_keyword(&mut self) -> Vec<(String, Value)> {
        std::mem::take(&mut self.var_keyword)
    }
}

/// Errors raised by the calling convention itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("'{function}' takes {expected} positional argument(s) but {given} were given")]
    TooManyPositional {
        function: String,
        expected: usize,
        given: usize,
    },

    #[error("'{function}' got an unexpected keyword argument '{keyword}'")]
    UnexpectedKeyword { function: String, keyword: String },

    #[error("'{function}' got multiple values for argument '{parameter}'")]
    MultipleValues { function: String, parameter: String },

    #[error("'{function}' missing required argument(s): {}", .parameters.join(", "))]
    MissingArguments {
        function: String,
        parameters: Vec<String>,
    },
}

pub fn bind(signature: &CallableSignature, args: CallArgs) -> Result<BoundArguments, BindingError> {
    let function = signature.name();
    let named_specs: Vec<_> = signature.named_params().collect();
    let mut slots: Vec<Option<(Value, bool)>> = named_specs.iter().map(|_| None).collect();

    let positional_count = named_specs
        .iter()
        .filter(|p| p.kind == ParamKind::PositionalOrKeyword)
        .count();
    let given = args.positional.len();
    let mut positional = args.positional.into_iter();
    // Positional-or-keyword parameters precede keyword-only ones in `named_specs`.
    for slot in slots.iter_mut().take(positional_count) {
        match positional.next() {
            Some(value) => *slot = Some((value, true)),
            None => break,
        }
    }
    let var_positional: Vec<Value> = positional.collect();
    if !var_positional.is_empty() && signature.var_positional().is_none() {
        return Err(BindingError::TooManyPositional {
            function: function.to_string(),
            expected: positional_count,
            given,
        });
    }

    let accepts_var_keyword = signature.var_keyword().is_some();
    let mut var_keyword: Vec<(String, Value)> = Vec::new();
    for (key, value) in args.keywords {
        if let Some(idx) = named_specs.iter().position(|p| p.name == key) {
            if slots[idx].is_some() {
                return Err(BindingError::MultipleValues {
                    function: function.to_string(),
                    parameter: key,
                });
            }
            slots[idx] = Some((value, true));
        } else if accepts_var_keyword {
            if var_keyword.iter().any(|(k, _)| *k == key) {
                return Err(BindingError::MultipleValues {
                    function: function.to_string(),
                    parameter: key,
                });
            }
            var_keyword.push((key, value));
        } else {
            return Err(BindingError::UnexpectedKeyword {
                function: function.to_string(),
                keyword: key,
            });
        }
    }

    let mut named = Vec::with_capacity(named_specs.len());
    let mut missing = Vec::new();
    for (spec, slot) in named_specs.iter().zip(slots) {
        match slot {
            Some((value, supplied)) => named.push(BoundValue {
                name: spec.name.clone(),
                value,
                supplied,
            }),
            None => match &spec.default {
                Some(default) => named.push(BoundValue {
                    name: spec.name.clone(),
                    value: default.clone(),
                    supplied: false,
                }),
                None => missing.push(spec.name.clone()),
            },
        }
    }
    if !missing.is_empty() {
        return Err(BindingError::MissingArguments {
            function: function.to_string(),
            parameters: missing,
        });
    }

    Ok(BoundArguments {
        named,
        var_positional,
        var_keyword,
    })
}

#[cfg(test)]
#[path = "binding_tests.rs"]
mod tests;
