//! Coercibility rules for plain type specifiers.
//!
//! A value is admissible for a declared plain type when its own type is that
//! type or widens to it losslessly. Admissibility is only ever tested; the
//! value is never converted.
//!
//! Int-to-float widening is judged by value: only ints with magnitude at most
//! 2^53 have an exact `f64` representation and are admitted.

use serde::{Deserialize, Serialize};

use crate::specifier::PlainType;
use crate::value::Value;

/// Which widenings between primitive types are admissible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionLattice {
    /// An `int` value is admissible where `float` is declared.
    #[serde(default = "default_true")]
    pub int_to_float: bool,
    /// A `bool` value is admissible where `int` is declared.
    #[serde(default)]
    pub bool_to_int: bool,
}

/// Largest magnitude an `i64` can have and still round-trip through `f64`.
pub const MAX_EXACT_FLOAT_INT: u64 = 1 << 53;

fn default_true() -> bool {
    true
}

impl Default for CoercionLattice {
    fn default() -> Self {
        Self {
            int_to_float: true,
            bool_to_int: false,
        }
    }
}

impl CoercionLattice {
    /// No widening at all: every plain type admits only its own variant.
    pub fn exact() -> Self {
        Self {
            int_to_float: false,
            bool_to_int: false,
        }
    }

    pub fn admits(&self, declared: PlainType, value: &Value) -> bool {
        match (declared, value) {
            (PlainType::Any, _) => true,
            (PlainType::None, Value::None) => true,
            (PlainType::Bool, Value::Bool(_)) => true,
            (PlainType::Int, Value::Int(_)) => true,
            (PlainType::Int, Value::Bool(_)) => self.bool_to_int,
            (PlainType::Float, Value::Float(_)) => true,
            (PlainType::Float, Value::Int(i)) => {
                self.int_to_float && i.unsigned_abs() <= MAX_EXACT_FLOAT_INT
            }
            (PlainType::Float, Value::Bool(_)) => self.bool_to_int && self.int_to_float,
            (PlainType::Str, Value::Str(_)) => true,
            (PlainType::Bytes, Value::Bytes(_)) => true,
            (PlainType::List, Value::List(_)) => true,
            (PlainType::Tuple, Value::Tuple(_)) => true,
            (PlainType::Dict, Value::Dict(_)) => true,
            _ => false,
        }
    }
}
