/// Receiver handling for methods, class methods, static methods and initializers.
use typen_core::decl::{CallableKind, FunctionDecl, Param};
use typen_core::specifier::{PlainType, Specifier};
use typen_core::value::Value;
use typen_enforce::{enforce_type_hints, strict_type_hints, CallArgs};

use super::common::{circle, number, ok, shapes};

#[test]
fn test_instance_method_receiver_never_checked() {
    let shapes = shapes();
    let decl = FunctionDecl::builder("scaled_area")
        .kind(CallableKind::InstanceMethod)
        .param(Param::new("self"))
        .param(Param::new("factor").hint(PlainType::Float))
        .returns(PlainType::Float)
        .build()
        .unwrap();
    let f = strict_type_hints(decl, ok(|args| {
        let radius = args
            .get("self")
            .and_then(|v| v.as_object())
            .and_then(|o| o.downcast_ref::<f64>().copied())
            .unwrap_or_default();
        Value::Float(radius * radius * number(&args, "factor"))
    }))
    .unwrap();

    let receiver = circle(&shapes, 2.0);
    let result = f.call(CallArgs::new().arg(receiver).arg(3)).unwrap();
    assert_eq!(result, Value::Float(12.0));

    // Any receiver is accepted, even one that is not an object.
    assert!(f.call(CallArgs::new().arg("not a shape").arg(1.0)).is_ok());
    assert!(f.call(CallArgs::new().arg(1).arg("x")).is_err());
}

#[test]
fn test_declared_receiver_specifier_is_ignored() {
    let shapes = shapes();
    let decl = FunctionDecl::builder("describe")
        .kind(CallableKind::InstanceMethod)
        .param(Param::new("self").hint(Specifier::instance_of(shapes.square.clone())))
        .returns(PlainType::Str)
        .build()
        .unwrap();
    let f = enforce_type_hints(decl, ok(|_| Value::from("shape"))).unwrap();
    assert!(f.call(vec![circle(&shapes, 1.0)]).is_ok());
}

#[test]
fn test_receiver_passed_by_keyword() {
    let decl = FunctionDecl::builder("rename")
        .kind(CallableKind::InstanceMethod)
        .param(Param::new("self"))
        .param(Param::new("name").hint(PlainType::Str))
        .build()
        .unwrap();
    let f = enforce_type_hints(decl, ok(|_| Value::None)).unwrap();
    let args = CallArgs::new().kwarg("name", "new").kwarg("self", 42);
    assert!(f.call(args).is_ok());
}

#[test]
fn test_class_method_receiver_exempt_in_strict_mode() {
    let shapes = shapes();
    let decl = FunctionDecl::builder("unit")
        .kind(CallableKind::ClassMethod)
        .param(Param::new("cls"))
        .returns(Specifier::instance_of(shapes.shape.clone()))
        .build()
        .unwrap();
    let made = circle(&shapes, 1.0);
    let f = strict_type_hints(decl, ok(move |_| made.clone())).unwrap();
    assert!(f.call(vec![Value::from("Circle")]).is_ok());
}

#[test]
fn test_static_method_first_parameter_is_ordinary() {
    let decl = FunctionDecl::builder("from_radius")
        .kind(CallableKind::StaticMethod)
        .param(Param::new("radius"))
        .returns(PlainType::Float)
        .build()
        .unwrap();
    let err = strict_type_hints(decl, ok(|_| Value::Float(0.0))).unwrap_err();
    assert_eq!(err.code(), "T003");

    let decl = FunctionDecl::builder("from_radius")
        .kind(CallableKind::StaticMethod)
        .param(Param::new("radius").hint(PlainType::Float))
        .returns(PlainType::Float)
        .build()
        .unwrap();
    let f = strict_type_hints(decl, ok(|_| Value::Float(0.0))).unwrap();
    assert!(f.call(vec![Value::from("1")]).is_err());
}

#[test]
fn test_initializer_return_exempt_but_checked_when_declared() {
    let decl = FunctionDecl::builder("__init__")
        .kind(CallableKind::Initializer)
        .param(Param::new("self"))
        .param(Param::new("radius").hint(PlainType::Float))
        .build()
        .unwrap();
    let f = strict_type_hints(decl, ok(|_| Value::None)).unwrap();
    assert_eq!(f.call(CallArgs::new().arg(Value::None).arg(2)).unwrap(), Value::None);

    let decl = FunctionDecl::builder("__init__")
        .kind(CallableKind::Initializer)
        .param(Param::new("self"))
        .returns(PlainType::None)
        .build()
        .unwrap();
    let f = enforce_type_hints(decl, ok(|_| Value::Int(1))).unwrap();
    assert_eq!(f.call(vec![Value::None]).unwrap_err().code(), Some("T002"));
}

#[test]
fn test_instance_method_return_still_required() {
    let decl = FunctionDecl::builder("area")
        .kind(CallableKind::InstanceMethod)
        .param(Param::new("self"))
        .build()
        .unwrap();
    let err = strict_type_hints(decl, ok(|_| Value::None)).unwrap_err();
    assert_eq!(err.to_string(), "A return type hint must be specified for 'area'.");
}

#[test]
fn test_subclass_instances_conform() {
    let shapes = shapes();
    let decl = FunctionDecl::builder("draw")
        .param(Param::new("s").hint(Specifier::instance_of(shapes.shape.clone())))
        .param(Param::new("fill").hint(Specifier::optional_instance_of(shapes.circle.clone())).default(Value::None))
        .build()
        .unwrap();
    let f = enforce_type_hints(decl, ok(|_| Value::None)).unwrap();

    assert!(f.call(vec![circle(&shapes, 1.0)]).is_ok());
    assert!(f.call(vec![circle(&shapes, 1.0), Value::None]).is_ok());
    assert!(f.call(vec![circle(&shapes, 1.0), circle(&shapes, 2.0)]).is_ok());
    assert!(f.call(vec![Value::from("circle")]).is_err());
}
