//! Type specifiers: declarative descriptions of acceptable values.
//!
//! Plain types are judged through a [`CoercionLattice`]; composite specifiers
//! own their conformance rule, and [`Specifier::External`] lets callers plug in
//! arbitrary predicates through the [`Conform`] trait.

use std::fmt;
use std::sync::Arc;

use crate::lattice::CoercionLattice;
use crate::value::{Class, Value};

/// Primitive and container types that can be declared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlainType {
    Any,
    None,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    List,
    Tuple,
    Dict,
}

impl PlainType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlainType::Any => "any",
            PlainType::None => "none",
            PlainType::Bool => "bool",
            PlainType::Int => "int",
            PlainType::Float => "float",
            PlainType::Str => "str",
            PlainType::Bytes => "bytes",
            PlainType::List => "list",
            PlainType::Tuple => "tuple",
            PlainType::Dict => "dict",
        }
    }
}

impl fmt::Display for PlainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability contract for specifiers supplied from outside this crate.
pub trait Conform: Send + Sync + fmt::Debug {
    fn conforms(&self, value: &Value) -> bool;

    /// Human-readable description used in violation messages.
    fn describe(&self) -> String;
}

/// A declared specifier for a parameter or return slot.
#[derive(Debug, Clone)]
pub enum Specifier {
    Plain(PlainType),
    /// Any member conforms.
    UnionOf(Vec<Specifier>),
    /// Equal to one of the listed values.
    EnumeratedValues(Vec<Value>),
    /// An object of `class` or a subclass; optionally `None`.
    InstanceOf { class: Arc<Class>, allow_none: bool },
    /// A tuple of exactly these element specifiers.
    TupleOf(Vec<Specifier>),
    /// A list whose every element conforms.
    ListOf(Box<Specifier>),
    /// A dict whose every key and every value conform.
    DictOf {
        key: Box<Specifier>,
        value: Box<Specifier>,
    },
    /// Nested lists of the given shape; `None` dimensions accept any length.
    ArrayShape {
        element: Box<Specifier>,
        shape: Vec<Option<usize>>,
    },
    External(Arc<dyn Conform>),
}

impl Specifier {
    pub fn union(members: impl IntoIterator<Item = Specifier>) -> Self {
        Specifier::UnionOf(members.into_iter().collect())
    }

    pub fn one_of(values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Specifier::EnumeratedValues(values.into_iter().map(Into::into).collect())
    }

    pub fn instance_of(class: Arc<Class>) -> Self {
        Specifier::InstanceOf {
            class,
            allow_none: false,
        }
    }

    pub fn optional_instance_of(class: Arc<Class>) -> Self {
        Specifier::InstanceOf {
            class,
            allow_none: true,
        }
    }

    pub fn tuple_of(elements: impl IntoIterator<Item = Specifier>) -> Self {
        Specifier::TupleOf(elements.into_iter().collect())
    }

    pub fn list_of(element: impl Into<Specifier>) -> Self {
        Specifier::ListOf(Box::new(element.into()))
    }

    pub fn dict_of(key: impl Into<Specifier>, value: impl Into<Specifier>) -> Self {
        Specifier::DictOf {
            key: Box::new(key.into()),
            value: Box::new(value.into()),
        }
    }

    pub fn array(element: impl Into<Specifier>, shape: Vec<Option<usize>>) -> Self {
        Specifier::ArrayShape {
            element: Box::new(element.into()),
            shape,
        }
    }

    pub fn external(conform: impl Conform + 'static) -> Self {
        Specifier::External(Arc::new(conform))
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, Specifier::Plain(_))
    }

    /// Whether `value` is acceptable under this specifier.
    pub fn conforms(&self, value: &Value, lattice: &CoercionLattice) -> bool {
        match self {
            Specifier::Plain(ty) => lattice.admits(*ty, value),
            Specifier::UnionOf(members) => members.iter().any(|m| m.conforms(value, lattice)),
            Specifier::EnumeratedValues(allowed) => allowed.iter().any(|a| a == value),
            Specifier::InstanceOf { class, allow_none } => match value {
                Value::None => *allow_none,
                Value::Object(obj) => obj.class().is_subclass_of(class),
                _ => false,
            },
            Specifier::TupleOf(elements) => match value {
                Value::Tuple(items) => {
                    items.len() == elements.len()
                        && items
                            .iter()
                            .zip(elements)
                            .all(|(item, spec)| spec.conforms(item, lattice))
                }
                _ => false,
            },
            Specifier::ListOf(element) => match value {
                Value::List(items) => items.iter().all(|item| element.conforms(item, lattice)),
                _ => false,
            },
            Specifier::DictOf { key, value: entry } => match value {
                Value::Dict(entries) => entries
                    .iter()
                    .all(|(k, v)| key.conforms(k, lattice) && entry.conforms(v, lattice)),
                _ => false,
            },
            Specifier::ArrayShape { element, shape } => {
                !shape.is_empty() && conforms_to_shape(value, element, shape, lattice)
            }
            Specifier::External(conform) => conform.conforms(value),
        }
    }
}

fn conforms_to_shape(
    value: &Value,
    element: &Specifier,
    shape: &[Option<usize>],
    lattice: &CoercionLattice,
) -> bool {
    let Some((dim, rest)) = shape.split_first() else {
        return element.conforms(value, lattice);
    };
    let Value::List(items) = value else {
        return false;
    };
    if dim.is_some_and(|len| len != items.len()) {
        return false;
    }
    items
        .iter()
        .all(|item| conforms_to_shape(item, element, rest, lattice))
}

impl From<PlainType> for Specifier {
    fn from(ty: PlainType) -> Self {
        Specifier::Plain(ty)
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Specifier::Plain(ty) => write!(f, "{ty}"),
            Specifier::UnionOf(members) => {
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{m}")?;
                }
                Ok(())
            }
            Specifier::EnumeratedValues(values) => {
                f.write_str("one of (")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str(")")
            }
            Specifier::InstanceOf { class, allow_none } => {
                write!(f, "{}", class.name())?;
                if *allow_none {
                    f.write_str(" | none")?;
                }
                Ok(())
            }
            Specifier::TupleOf(elements) => {
                f.write_str("tuple[")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{e}")?;
                }
                f.write_str("]")
            }
            Specifier::ListOf(element) => write!(f, "list[{element}]"),
            Specifier::DictOf { key, value } => write!(f, "dict[{key}, {value}]"),
            Specifier::ArrayShape { element, shape } => {
                write!(f, "array[{element}; ")?;
                for (i, dim) in shape.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" x ")?;
                    }
                    match dim {
                        Some(len) => write!(f, "{len}")?,
                        None => f.write_str("_")?,
                    }
                }
                f.write_str("]")
            }
            Specifier::External(conform) => f.write_str(&conform.describe()),
        }
    }
}
