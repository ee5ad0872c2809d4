use typen_core::decl::FunctionDecl;

use crate::exemption::{is_exempt_parameter, is_exempt_return};
use crate::signature::{CallableSignature, ParameterSpec, ReturnSpec};

/// Resolve a declaration into the contract an enforcer checks against.
///
/// Specifiers and defaults are captured verbatim. Missing specifiers are not
/// an error here; only strict requirements reject them later.
pub fn resolve(decl: &FunctionDecl) -> CallableSignature {
    let kind = decl.kind();
    let params = decl
        .params()
        .iter()
        .enumerate()
        .map(|(position, param)| ParameterSpec {
            name: param.name().to_string(),
            kind: param.kind(),
            declared_specifier: param.specifier().cloned(),
            default: param.default_value().cloned(),
            exempt: is_exempt_parameter(position, param, kind),
        })
        .collect();
    let returns = ReturnSpec {
        declared_specifier: decl.returns().cloned(),
        exempt: is_exempt_return(kind),
    };

    CallableSignature::new(
        decl.name().to_string(),
        decl.doc().map(str::to_string),
        kind,
        params,
        returns,
    )
}
