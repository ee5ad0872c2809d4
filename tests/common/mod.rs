/// Shared test helpers for all typen integration tests.
///
/// Import from any integration test file with:
///   `#[path = "common/mod.rs"] mod common;`
use std::convert::Infallible;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use typen_core::value::{Class, Object, Value};
use typen_enforce::BoundArguments;
use typen_parsers::ClassRegistry;

/// Lift an infallible body into the shape every entry point expects.
#[allow(dead_code)]
pub fn ok<F>(body: F) -> impl Fn(BoundArguments) -> Result<Value, Infallible>
where
    F: Fn(BoundArguments) -> Value,
{
    move |args| Ok(body(args))
}

/// A body that hands back the named argument untouched.
#[allow(dead_code)]
pub fn echo(name: &'static str) -> impl Fn(BoundArguments) -> Result<Value, Infallible> {
    move |mut args: BoundArguments| Ok(args.take(name).unwrap_or(Value::None))
}

/// Numeric view of a bound argument, widening ints.
#[allow(dead_code)]
pub fn number(args: &BoundArguments, name: &str) -> f64 {
    args.get(name).and_then(Value::as_f64).unwrap_or(f64::NAN)
}

/// A small class hierarchy: `Shape` with subclasses `Circle` and `Square`.
#[allow(dead_code)]
pub struct Shapes {
    pub shape: Arc<Class>,
    pub circle: Arc<Class>,
    pub square: Arc<Class>,
}

#[allow(dead_code)]
pub fn shapes() -> Shapes {
    let shape = Class::new("Shape");
    let circle = Class::with_bases("Circle", vec![shape.clone()]);
    let square = Class::with_bases("Square", vec![shape.clone()]);
    Shapes {
        shape,
        circle,
        square,
    }
}

#[allow(dead_code)]
pub fn circle(shapes: &Shapes, radius: f64) -> Value {
    Value::Object(Object::new(shapes.circle.clone(), radius))
}

#[allow(dead_code)]
pub fn registry(shapes: &Shapes) -> ClassRegistry {
    ClassRegistry::new()
        .with_class(shapes.shape.clone())
        .with_class(shapes.circle.clone())
        .with_class(shapes.square.clone())
}

/// Write a `typen.json` into a fresh directory.
///
/// Returns (TempDir, config_dir). Hold the TempDir to keep the directory alive.
#[allow(dead_code)]
pub fn config_dir(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(typen_core::config::CONFIG_FILE), contents).unwrap();
    let path = dir.path().to_path_buf();
    (dir, path)
}
