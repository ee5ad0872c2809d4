/// Signatures written as annotation text, then enforced.
use typen_core::decl::CallableKind;
use typen_core::errors::TypenError;
use typen_core::value::Value;
use typen_enforce::{enforce_type_hints, strict_type_hints, CallArgs};
use typen_parsers::{parse_signature, parse_signature_as, parse_specifier, ClassRegistry, ParseError};

use super::common::{circle, echo, number, ok, registry, shapes};

#[test]
fn test_parsed_signature_enforces_hints() {
    let decl = parse_signature("def halve(a: int) -> float", &ClassRegistry::new()).unwrap();
    let f = enforce_type_hints(decl, ok(|args| Value::Float(number(&args, "a") / 2.0))).unwrap();
    assert_eq!(f.name(), "halve");
    assert_eq!(f.call(vec![Value::Int(5)]).unwrap(), Value::Float(2.5));
    assert!(f.call(vec![Value::Float(5.0)]).is_err());
}

#[test]
fn test_parsed_variadics_and_keyword_only() {
    let decl = parse_signature(
        "collect(*xs: int, sep: str = ',', **ys: str) -> bool",
        &ClassRegistry::new(),
    )
    .unwrap();
    let f = enforce_type_hints(decl, ok(|_| Value::Bool(true))).unwrap();
    assert_eq!(f.signature().to_string(), "collect(*xs: int, sep: str = \",\", **ys: str) -> bool");

    let args = CallArgs::new().arg(1).arg(2).kwarg("sep", ";").kwarg("x", "x");
    assert!(f.call(args).is_ok());
    assert!(f.call(CallArgs::new().arg(1).arg("two")).is_err());
    assert!(f.call(CallArgs::new().kwarg("sep", 1)).is_err());
}

#[test]
fn test_parsed_bad_default_fails_decoration() {
    let decl = parse_signature(
        "def mix(a: float = 1, b: float = 'two') -> float",
        &ClassRegistry::new(),
    )
    .unwrap();
    let err = enforce_type_hints(decl, ok(|_| Value::Float(0.0))).unwrap_err();
    let TypenError::Parameter(e) = err else {
        panic!("expected a parameter violation");
    };
    assert_eq!(e.parameter_name, "b");
    assert!(e.at_decoration);
}

#[test]
fn test_parsed_method_with_classes() {
    let shapes = shapes();
    let registry = registry(&shapes);
    let decl = parse_signature_as(
        "def grow(self, other: Optional[Shape], by: float = 1.0) -> Shape",
        &registry,
        CallableKind::InstanceMethod,
    )
    .unwrap();
    let f = strict_type_hints(decl, echo("self")).unwrap();

    let me = circle(&shapes, 1.0);
    let out = f.call(CallArgs::new().arg(me.clone()).arg(Value::None)).unwrap();
    assert!(out.same_object(&me));

    let err = f
        .call(CallArgs::new().arg(me.clone()).arg(Value::None).arg("big"))
        .unwrap_err();
    assert_eq!(err.code(), Some("T001"));

    let err = f
        .call(CallArgs::new().arg(Value::from("self")).arg(me))
        .unwrap_err();
    assert_eq!(err.code(), Some("T002"));
}

#[test]
fn test_parsed_literal_specifier() {
    let spec = parse_specifier("Literal['r', 'g', 'b'] | None", &ClassRegistry::new()).unwrap();
    assert_eq!(spec.to_string(), "one of (\"r\", \"g\", \"b\") | none");
}

#[test]
fn test_parse_errors_surface_before_wrapping() {
    let err = parse_signature("def f(a: Widget)", &ClassRegistry::new()).unwrap_err();
    assert!(matches!(err, ParseError::UnknownName { ref name, .. } if name == "Widget"));

    let err = parse_signature("def f(*a, *b)", &ClassRegistry::new()).unwrap_err();
    assert!(matches!(err, ParseError::Signature(_)));
}

#[test]
fn test_parsed_dict_generic_checks_entries() {
    let decl = parse_signature("def total(d: dict[str, int]) -> int", &ClassRegistry::new()).unwrap();
    let f = enforce_type_hints(decl, ok(|_| Value::Int(0))).unwrap();

    let good = Value::Dict(vec![(Value::from("a"), Value::Int(1))]);
    assert!(f.call(vec![good]).is_ok());

    let bad = Value::Dict(vec![(Value::Int(1), Value::from("not an int"))]);
    let err = f.call(vec![bad.clone()]).unwrap_err();
    let Some(TypenError::Parameter(e)) = err.contract() else {
        panic!("expected a parameter violation");
    };
    assert_eq!(e.parameter_name, "d");
    assert_eq!(e.value, bad);
}
