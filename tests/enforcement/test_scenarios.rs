/// End-to-end behaviour of wrapped callables on the canonical examples.
use std::convert::Infallible;

use typen_core::decl::{FunctionDecl, Param};
use typen_core::errors::{ArgumentSlot, TypenError};
use typen_core::specifier::PlainType;
use typen_core::value::Value;
use typen_enforce::{enforce_type_hints, strict_type_hints, BoundArguments, CallArgs, CallError};

use super::common::{echo, number, ok};

#[test]
fn test_declared_parameter_accepts_conforming_value() {
    let decl = FunctionDecl::builder("halve_integer")
        .param(Param::new("a").hint(PlainType::Int))
        .returns(PlainType::Float)
        .build()
        .unwrap();
    let f = enforce_type_hints(decl, ok(|args| Value::Float(number(&args, "a") / 2.0))).unwrap();

    assert_eq!(f.call(vec![Value::Int(5)]).unwrap(), Value::Float(2.5));

    let err = f.call(vec![Value::Float(5.0)]).unwrap_err();
    let Some(TypenError::Parameter(e)) = err.contract() else {
        panic!("expected a parameter violation, got {err:?}");
    };
    assert_eq!(e.parameter_name, "a");
    assert_eq!(e.value, Value::Float(5.0));
    assert_eq!(
        err.to_string(),
        "The 'a' parameter of 'halve_integer' must be int, but a value of 5.0 (float) was specified."
    );
}

#[test]
fn test_return_violation_carries_produced_value() {
    let decl = FunctionDecl::builder("give_int")
        .param(Param::new("a"))
        .returns(PlainType::Int)
        .build()
        .unwrap();
    let g = enforce_type_hints(decl, echo("a")).unwrap();

    assert_eq!(g.call(vec![Value::Int(1)]).unwrap(), Value::Int(1));

    let err = g.call(vec![Value::from("a")]).unwrap_err();
    assert_eq!(err.code(), Some("T002"));
    assert_eq!(
        err.to_string(),
        "The return type of 'give_int' must be int, but a value of \"a\" (str) was returned."
    );
    assert_eq!(err.into_contract().and_then(TypenError::into_value), Some(Value::from("a")));
}

#[test]
fn test_strict_rejects_missing_parameter_hint_at_decoration() {
    let decl = FunctionDecl::builder("add")
        .param(Param::new("a"))
        .param(Param::new("b").hint(PlainType::Float))
        .returns(PlainType::Float)
        .build()
        .unwrap();
    let err = strict_type_hints(decl, ok(|_| Value::None)).unwrap_err();
    assert_eq!(err.code(), "T003");
    assert!(err.is_authoring_time());
    assert_eq!(
        err.to_string(),
        "The following parameters of 'add' must be given type hints: a"
    );
}

#[test]
fn test_variadic_elements_checked_individually() {
    let decl = FunctionDecl::builder("collect")
        .var_positional(Param::new("xs").hint(PlainType::Int))
        .var_keyword(Param::new("ys").hint(PlainType::Str))
        .returns(PlainType::Bool)
        .build()
        .unwrap();
    let k = enforce_type_hints(decl, ok(|_| Value::Bool(true))).unwrap();

    let args = CallArgs::new().arg(1).arg(2).arg(3).kwarg("x", "x").kwarg("y", "y");
    assert_eq!(k.call(args).unwrap(), Value::Bool(true));
    assert_eq!(k.call(()).unwrap(), Value::Bool(true));

    let err = k.call(CallArgs::new().arg(1).arg("two").arg(3)).unwrap_err();
    let Some(TypenError::Parameter(e)) = err.contract() else {
        panic!("expected a parameter violation, got {err:?}");
    };
    assert_eq!(e.parameter_name, "xs");
    assert_eq!(e.slot, ArgumentSlot::VarPositional { index: 1 });
    assert_eq!(e.value, Value::from("two"));

    let err = k.call(CallArgs::new().kwarg("word", 10)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The 'ys' keywords of 'collect' must have values of type str, but 'word': 10 (int) was specified."
    );
}

#[test]
fn test_bad_default_rejected_at_decoration() {
    let decl = FunctionDecl::builder("mix")
        .param(Param::new("a").hint(PlainType::Float).default(1))
        .param(Param::new("b").hint(PlainType::Float).default("two"))
        .returns(PlainType::Float)
        .build()
        .unwrap();
    let err = enforce_type_hints(decl, ok(|_| Value::Float(0.0))).unwrap_err();
    let TypenError::Parameter(e) = err else {
        panic!("expected a parameter violation");
    };
    assert!(e.at_decoration);
    assert_eq!(e.parameter_name, "b");
    assert_eq!(e.value, Value::from("two"));
}

#[test]
fn test_body_error_passes_through_unchanged() {
    #[derive(Debug, PartialEq)]
    struct Overdrawn(i64);
    impl std::fmt::Display for Overdrawn {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "overdrawn by {}", self.0)
        }
    }

    let decl = FunctionDecl::builder("withdraw")
        .param(Param::new("amount").hint(PlainType::Int))
        .returns(PlainType::Int)
        .build()
        .unwrap();
    let f = enforce_type_hints(decl, |args: BoundArguments| {
        let amount = args.get("amount").and_then(Value::as_int).unwrap_or(0);
        if amount > 100 {
            Err(Overdrawn(amount - 100))
        } else {
            Ok(Value::Int(100 - amount))
        }
    })
    .unwrap();

    assert_eq!(f.call(vec![Value::Int(40)]).unwrap(), Value::Int(60));
    match f.call(vec![Value::Int(150)]) {
        Err(CallError::Callable(e)) => assert_eq!(e, Overdrawn(50)),
        other => panic!("expected the body's error, got {other:?}"),
    }
}

#[test]
fn test_binding_failure_is_not_a_contract_violation() {
    let decl = FunctionDecl::builder("pair")
        .param(Param::new("a").hint(PlainType::Int))
        .param(Param::new("b").hint(PlainType::Int))
        .build()
        .unwrap();
    let f = enforce_type_hints(decl, ok(|_| Value::None)).unwrap();

    let err: CallError<Infallible> = f.call(vec![Value::Int(1)]).unwrap_err();
    assert!(matches!(err, CallError::Binding(_)));
    assert_eq!(err.code(), None);
    assert_eq!(err.to_string(), "'pair' missing required argument(s): b");
}
