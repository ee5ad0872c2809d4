/// Contract tests for violation report JSON schema compliance.
use typen_core::decl::{CallableKind, FunctionDecl, Param};
use typen_core::errors::{TypenError, ViolationReport};
use typen_core::specifier::PlainType;
use typen_core::value::Value;
use typen_enforce::{enforce_type_hints, strict_type_hints, CallArgs};

use super::common::ok;
use super::test_schema_helpers::validate_against_schema;

const SCHEMA: &str = include_str!("../schemas/violation_report.schema.json");

fn call_violation(args: CallArgs) -> TypenError {
    let decl = FunctionDecl::builder("collect")
        .param(Param::new("a").hint(PlainType::Int))
        .var_positional(Param::new("xs").hint(PlainType::Int))
        .var_keyword(Param::new("ys").hint(PlainType::Str))
        .returns(PlainType::Str)
        .build()
        .unwrap();
    let f = enforce_type_hints(decl, ok(|_| Value::Int(0))).unwrap();
    f.call(args).unwrap_err().into_contract().unwrap()
}

fn check(err: &TypenError) -> serde_json::Value {
    let json = serde_json::to_value(err.report()).unwrap();
    validate_against_schema(&json, SCHEMA);
    json
}

#[test]
fn named_parameter_report_matches_schema() {
    let json = check(&call_violation(CallArgs::new().arg(1.5)));
    assert_eq!(json["code"], "T001");
    assert_eq!(json["slot"]["slot"], "named");
    assert_eq!(json["value"], "1.5");
    assert_eq!(json["value_type"], "float");
    assert_eq!(json["authoring_time"], false);
}

#[test]
fn variadic_reports_match_schema() {
    let json = check(&call_violation(CallArgs::new().arg(1).arg(2).arg("x")));
    assert_eq!(json["parameters"][0], "xs");
    assert_eq!(json["slot"]["slot"], "var_positional");
    assert_eq!(json["slot"]["index"], 1);

    let json = check(&call_violation(CallArgs::new().arg(1).kwarg("k", 3)));
    assert_eq!(json["slot"]["slot"], "var_keyword");
    assert_eq!(json["slot"]["key"], "k");
}

#[test]
fn return_report_matches_schema() {
    let json = check(&call_violation(CallArgs::new().arg(1)));
    assert_eq!(json["code"], "T002");
    assert_eq!(json["parameters"][0], "return");
    assert!(json.get("slot").is_none());
    assert_eq!(json["specifier"], "str");
}

#[test]
fn authoring_time_reports_match_schema() {
    let decl = FunctionDecl::builder("area")
        .kind(CallableKind::InstanceMethod)
        .param(Param::new("self"))
        .param(Param::new("scale"))
        .build()
        .unwrap();
    let err = strict_type_hints(decl, ok(|_| Value::None)).unwrap_err();
    let json = check(&err);
    assert_eq!(json["code"], "T003");
    assert_eq!(json["parameters"], serde_json::json!(["scale"]));
    assert!(json["value"].is_null());
    assert_eq!(json["authoring_time"], true);

    let decl = FunctionDecl::builder("area")
        .param(Param::new("scale").hint(PlainType::Float))
        .build()
        .unwrap();
    let err = strict_type_hints(decl, ok(|_| Value::None)).unwrap_err();
    let json = check(&err);
    assert_eq!(json["code"], "T004");
    assert_eq!(json["category"], "unspecified_return_type");
}

#[test]
fn report_round_trips_through_json() {
    let report = call_violation(CallArgs::new().arg("nope")).report();
    let text = serde_json::to_string(&report).unwrap();
    let back: ViolationReport = serde_json::from_str(&text).unwrap();
    assert_eq!(back, report);
}
