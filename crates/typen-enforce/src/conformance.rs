//! Value-conformance checks.
//!
//! Plain types and the absent specifier are judged here; composite
//! specifiers are delegated to their own rule. Checks never mutate or replace
//! the value under test.

use typen_core::lattice::CoercionLattice;
use typen_core::specifier::Specifier;
use typen_core::value::Value;

/// Whether `value` is acceptable for a slot declared with `specifier`.
pub fn check(value: &Value, specifier: Option<&Specifier>, lattice: &CoercionLattice) -> bool {
    match specifier {
        None => true,
        Some(Specifier::Plain(ty)) => lattice.admits(*ty, value),
        Some(composite) => composite.conforms(value, lattice),
    }
}

/// Index of the first element of a variadic collection that does not conform.
/// An empty collection always conforms.
pub fn first_violation<'a, I>(
    values: I,
    specifier: Option<&Specifier>,
    lattice: &CoercionLattice,
) -> Option<usize>
where
    I: IntoIterator<Item = &'a Value>,
{
    specifier?;
    values
        .into_iter()
        .position(|value| !check(value, specifier, lattice))
}
