use std::fmt;

use typen_core::decl::{CallableKind, ParamKind};
use typen_core::hash::signature_fingerprint;
use typen_core::specifier::Specifier;
use typen_core::value::Value;

/// A resolved parameter: declaration data plus its exemption flag.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub name: String,
    pub kind: ParamKind,
    pub declared_specifier: Option<Specifier>,
    pub default: Option<Value>,
    /// Receiver parameter of a bound method; never required nor checked.
    pub exempt: bool,
}

impl ParameterSpec {
    /// Whether this slot is subject to conformance checks at all.
    pub fn is_checked(&self) -> bool {
        !self.exempt && self.declared_specifier.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ReturnSpec {
    pub declared_specifier: Option<Specifier>,
    /// Return slot of an initializer; never required.
    pub exempt: bool,
}

/// The immutable contract of one enforced callable.
#[derive(Debug, Clone)]
pub struct CallableSignature {
    name: String,
    doc: Option<String>,
    kind: CallableKind,
    params: Vec<ParameterSpec>,
    returns: ReturnSpec,
    fingerprint: String,
}

impl CallableSignature {
    pub(crate) fn new(
        name: String,
        doc: Option<String>,
        kind: CallableKind,
        params: Vec<ParameterSpec>,
        returns: ReturnSpec,
    ) -> Self {
        let canonical = render(&name, &params, &returns);
        let fingerprint = signature_fingerprint(&canonical, kind.as_str());
        Self {
            name,
            doc,
            kind,
            params,
            returns,
            fingerprint,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn kind(&self) -> CallableKind {
        self.kind
    }

    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    pub fn returns(&self) -> &ReturnSpec {
        &self.returns
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn param(&self, name: &str) -> Option<&ParameterSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Non-variadic parameters, in declaration order.
    pub fn named_params(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.params.iter().filter(|p| !p.kind.is_variadic())
    }

    pub fn var_positional(&self) -> Option<&ParameterSpec> {
        self.params
            .iter()
            .find(|p| p.kind == ParamKind::VarPositional)
    }

    pub fn var_keyword(&self) -> Option<&ParameterSpec> {
        self.params.iter().find(|p| p.kind == ParamKind::VarKeyword)
    }

    pub fn receiver(&self) -> Option<&ParameterSpec> {
        self.params.iter().find(|p| p.exempt)
    }
}

impl fmt::Display for CallableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.name, &self.params, &self.returns))
    }
}

/// Canonical text form: `name(a: int, *args: str, b: int = 5, **kw) -> float`.
fn render(name: &str, params: &[ParameterSpec], returns: &ReturnSpec) -> String {
    let has_var_positional = params.iter().any(|p| p.kind == ParamKind::VarPositional);
    let mut parts = Vec::with_capacity(params.len() + 1);
    let mut star_written = has_var_positional;

    for p in params {
        if p.kind == ParamKind::KeywordOnly && !star_written {
            parts.push("*".to_string());
            star_written = true;
        }
        let prefix = match p.kind {
            ParamKind::VarPositional => "*",
            ParamKind::VarKeyword => "**",
            _ => "",
        };
        let mut part = format!("{prefix}{}", p.name);
        if let Some(spec) = &p.declared_specifier {
            part.push_str(&format!(": {spec}"));
        }
        if let Some(default) = &p.default {
            part.push_str(&format!(" = {default}"));
        }
        parts.push(part);
    }

    let mut out = format!("{name}({})", parts.join(", "));
    if let Some(spec) = &returns.declared_specifier {
        out.push_str(&format!(" -> {spec}"));
    }
    out
}
