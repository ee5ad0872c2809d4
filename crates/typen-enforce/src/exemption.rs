//! Which slots are exempt from type requirements regardless of mode.
//!
//! - The first positional parameter of an instance method, class method or
//!   initializer is its receiver: never required to declare a specifier and
//!   never checked.
//! - The return slot of an initializer is never required to declare a
//!   specifier.

use typen_core::decl::{CallableKind, Param, ParamKind};

pub fn is_exempt_parameter(position: usize, param: &Param, kind: CallableKind) -> bool {
    position == 0 && kind.has_receiver() && param.kind() == ParamKind::PositionalOrKeyword
}

pub fn is_exempt_return(kind: CallableKind) -> bool {
    kind == CallableKind::Initializer
}
