//! Annotation and signature parsing for typen.
//!
//! Turns type-annotation text (`list[int]`, `Optional[Circle]`, `int | str`)
//! into [`Specifier`]s and whole signatures (`def f(a: int, *args: str) -> float`)
//! into validated [`FunctionDecl`]s, ready to be wrapped by `typen-enforce`.

pub mod errors;
pub mod lexer;
pub mod parser;
pub mod registry;

use rayon::prelude::*;
use typen_core::decl::{CallableKind, FunctionDecl};
use typen_core::specifier::Specifier;

pub use errors::{ParseError, ParseResult};
pub use registry::ClassRegistry;

/// Parse one annotation expression.
pub fn parse_specifier(text: &str, registry: &ClassRegistry) -> ParseResult<Specifier> {
    parser::Parser::new(text, registry)?.parse_specifier()
}

/// Parse a free function's signature.
pub fn parse_signature(text: &str, registry: &ClassRegistry) -> ParseResult<FunctionDecl> {
    parse_signature_as(text, registry, CallableKind::Free)
}

/// Parse a signature and tag it with the role the callable plays.
pub fn parse_signature_as(
    text: &str,
    registry: &ClassRegistry,
    kind: CallableKind,
) -> ParseResult<FunctionDecl> {
    let decl = parser::Parser::new(text, registry)?.parse_signature(kind)?;
    tracing::trace!(
        function = decl.name(),
        params = decl.params().len(),
        kind = %kind,
        "parsed signature"
    );
    Ok(decl)
}

/// Parse many signatures in parallel. Results keep the input order.
pub fn parse_signatures(texts: &[&str], registry: &ClassRegistry) -> Vec<ParseResult<FunctionDecl>> {
    texts
        .par_iter()
        .map(|text| parse_signature(text, registry))
        .collect()
}
