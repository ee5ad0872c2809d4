//! Declared function signatures.
//!
//! A [`FunctionDecl`] is the registration record for a callable: its name,
//! documentation, calling role and parameter list, each parameter with an
//! optional specifier and default. Declarations are validated once in
//! [`SignatureBuilder::build`] and are immutable afterwards.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::specifier::Specifier;
use crate::value::Value;

/// How a parameter receives its argument(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    PositionalOrKeyword,
    VarPositional,
    KeywordOnly,
    VarKeyword,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::PositionalOrKeyword => "positional_or_keyword",
            ParamKind::VarPositional => "var_positional",
            ParamKind::KeywordOnly => "keyword_only",
            ParamKind::VarKeyword => "var_keyword",
        }
    }

    pub fn is_variadic(&self) -> bool {
        matches!(self, ParamKind::VarPositional | ParamKind::VarKeyword)
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The role a callable plays, replacing decorator-order-sensitive introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallableKind {
    #[default]
    Free,
    InstanceMethod,
    ClassMethod,
    StaticMethod,
    /// Constructs or initialises its receiver; the return value is ignored.
    Initializer,
}

impl CallableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallableKind::Free => "free",
            CallableKind::InstanceMethod => "instance_method",
            CallableKind::ClassMethod => "class_method",
            CallableKind::StaticMethod => "static_method",
            CallableKind::Initializer => "initializer",
        }
    }

    /// Whether the first positional parameter is bound to a receiver.
    pub fn has_receiver(&self) -> bool {
        matches!(
            self,
            CallableKind::InstanceMethod | CallableKind::ClassMethod | CallableKind::Initializer
        )
    }
}

impl fmt::Display for CallableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared parameter.
#[derive(Debug, Clone)]
pub struct Param {
    pub(crate) name: String,
    pub(crate) kind: ParamKind,
    pub(crate) specifier: Option<Specifier>,
    pub(crate) default: Option<Value>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::PositionalOrKeyword,
            specifier: None,
            default: None,
        }
    }

    /// Attach a declared specifier.
    pub fn hint(mut self, specifier: impl Into<Specifier>) -> Self {
        self.specifier = Some(specifier.into());
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn specifier(&self) -> Option<&Specifier> {
        self.specifier.as_ref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// A validated function declaration.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    name: String,
    doc: Option<String>,
    kind: CallableKind,
    params: Vec<Param>,
    returns: Option<Specifier>,
}

impl FunctionDecl {
    pub fn builder(name: impl Into<String>) -> SignatureBuilder {
        SignatureBuilder::new(name)
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

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn returns(&self) -> Option<&Specifier> {
        self.returns.as_ref()
    }
}

/// Malformed declarations, rejected before any wrapper is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("duplicate parameter '{name}' in '{function}'")]
    DuplicateParameter { function: String, name: String },

    #[error("'{function}' declares more than one {kind} parameter")]
    MultipleVariadic { function: String, kind: ParamKind },

    #[error("parameter '{name}' of '{function}' ({kind}) is out of order")]
    OutOfOrder {
        function: String,
        name: String,
        kind: ParamKind,
    },

    #[error("variadic parameter '{name}' of '{function}' cannot have a default")]
    DefaultOnVariadic { function: String, name: String },

    #[error("parameter '{name}' of '{function}' without a default follows a parameter with a default")]
    NonDefaultAfterDefault { function: String, name: String },
}

/// Collects a declaration and validates it on [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct SignatureBuilder {
    name: String,
    doc: Option<String>,
    kind: CallableKind,
    params: Vec<Param>,
    returns: Option<Specifier>,
}

impl SignatureBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            kind: CallableKind::Free,
            params: Vec::new(),
            returns: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn kind(mut self, kind: CallableKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add a positional-or-keyword parameter.
    pub fn param(self, param: Param) -> Self {
        self.push(param, ParamKind::PositionalOrKeyword)
    }

    pub fn var_positional(self, param: Param) -> Self {
        self.push(param, ParamKind::VarPositional)
    }

    pub fn keyword_only(self, param: Param) -> Self {
        self.push(param, ParamKind::KeywordOnly)
    }

    pub fn var_keyword(self, param: Param) -> Self {
        self.push(param, ParamKind::VarKeyword)
    }

    pub fn returns(mut self, specifier: impl Into<Specifier>) -> Self {
        self.returns = Some(specifier.into());
        self
    }

    fn push(mut self, mut param: Param, kind: ParamKind) -> Self {
        param.kind = kind;
        self.params.push(param);
        self
    }

    pub fn build(self) -> Result<FunctionDecl, SignatureError> {
        let function = &self.name;
        let mut seen = HashSet::new();
        let mut last_kind = ParamKind::PositionalOrKeyword;
        let mut saw_default = false;
        let mut saw_var_positional = false;
        let mut saw_var_keyword = false;

        for param in &self.params {
            if !seen.insert(param.name.as_str()) {
                return Err(SignatureError::DuplicateParameter {
                    function: function.clone(),
                    name: param.name.clone(),
                });
            }

            let already = match param.kind {
                ParamKind::VarPositional => std::mem::replace(&mut saw_var_positional, true),
                ParamKind::VarKeyword => std::mem::replace(&mut saw_var_keyword, true),
                _ => false,
            };
            if already {
                return Err(SignatureError::MultipleVariadic {
                    function: function.clone(),
                    kind: param.kind,
                });
            }

            if param.kind < last_kind {
                return Err(SignatureError::OutOfOrder {
                    function: function.clone(),
                    name: param.name.clone(),
                    kind: param.kind,
                });
            }
            last_kind = param.kind;

            if param.kind.is_variadic() && param.default.is_some() {
                return Err(SignatureError::DefaultOnVariadic {
                    function: function.clone(),
                    name: param.name.clone(),
                });
            }

            if param.kind == ParamKind::PositionalOrKeyword {
                if param.default.is_some() {
                    saw_default = true;
                } else if saw_default {
                    return Err(SignatureError::NonDefaultAfterDefault {
                        function: function.clone(),
                        name: param.name.clone(),
                    });
                }
            }
        }

        Ok(FunctionDecl {
            name: self.name,
            doc: self.doc,
            kind: self.kind,
            params: self.params,
            returns: self.returns,
        })
    }
}
