
use std::collections::HashMap;

use maplit::hashmap;

use crate::error::Error;
use crate::number::Number;
use crate::runtime::{Environment, PrimitiveFn, Procedure};
use crate::value::Value;

// Every arithmetic and relational primitive takes exactly two arguments;
// print takes one.

fn binary_args(args: Vec<Value>) -> Result<(Value, Value), Error> {
    if args.len() != 2 {
        return Err(Error::ArityMismatch {
            expected: 2,
            got: args.len(),
        });
    }
    let mut iter = args.into_iter();
    Ok((iter.next().unwrap(), iter.next().unwrap()))
}

fn numeric_args(args: Vec<Value>, operation: &'static str)
    -> Result<(Number, Number), Error> {

    let (a, b) = binary_args(args)?;
    match (a.as_number(), b.as_number()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(Error::TypeMismatch(operation)),
    }
}

fn add(args: Vec<Value>) -> Result<Value, Error> {
    let (a, b) = numeric_args(args, "+")?;
    Ok(Value::number(a + b))
}

fn subtract(args: Vec<Value>) -> Result<Value, Error> {
    let (a, b) = numeric_args(args, "-")?;
    Ok(Value::number(a - b))
}

fn multiply(args: Vec<Value>) -> Result<Value, Error> {
    let (a, b) = numeric_args(args, "*")?;
    Ok(Value::number(a * b))
}

fn divide(args: Vec<Value>) -> Result<Value, Error> {
    let (a, b) = numeric_args(args, "/")?;
    if b.is_zero() {
        return Err(Error::DivisionByZero);
    }
    Ok(Value::number(a / b))
}

fn comparison<F>(args: Vec<Value>, operation: &'static str, cmp: F)
    -> Result<Value, Error>
where
    F: Fn(Number, Number) -> bool,
{
    let (a, b) = numeric_args(args, operation)?;
    Ok(Value::boolean(cmp(a, b)))
}

fn greater(args: Vec<Value>) -> Result<Value, Error> {
    comparison(args, ">", |a, b| a > b)
}

fn greater_equal(args: Vec<Value>) -> Result<Value, Error> {
    comparison(args, ">=", |a, b| a >= b)
}

fn less(args: Vec<Value>) -> Result<Value, Error> {
    comparison(args, "<", |a, b| a < b)
}

fn less_equal(args: Vec<Value>) -> Result<Value, Error> {
    comparison(args, "<=", |a, b| a <= b)
}

// Numbers compare numerically across kinds; everything else compares
// structurally, and values of different shapes are simply unequal.
fn values_equal(a: &Value, b: &Value) -> bool {
    if let (Some(x), Some(y)) = (a.as_number(), b.as_number()) {
        x == y
    } else {
        a == b
    }
}

fn equal(args: Vec<Value>) -> Result<Value, Error> {
    let (a, b) = binary_args(args)?;
    Ok(Value::boolean(values_equal(&a, &b)))
}

fn not_equal(args: Vec<Value>) -> Result<Value, Error> {
    let (a, b) = binary_args(args)?;
    Ok(Value::boolean(!values_equal(&a, &b)))
}

fn print(args: Vec<Value>) -> Result<Value, Error> {
    if args.len() != 1 {
        return Err(Error::ArityMismatch {
            expected: 1,
            got: args.len(),
        });
    }
    println!("{}", args[0]);
    Ok(Value::nothing())
}

/// The root environment: one fixed table of primitives plus `nil`, installed
/// once at startup.
pub fn initial_environment() -> Environment {
    fn primitive(f: PrimitiveFn) -> Value {
        Value::procedure(Procedure::primitive(f))
    }

    let table = hashmap! {
        "+" => primitive(add),
        "-" => primitive(subtract),
        "*" => primitive(multiply),
        "/" => primitive(divide),
        ">" => primitive(greater),
        ">=" => primitive(greater_equal),
        "<" => primitive(less),
        "<=" => primitive(less_equal),
        "=" => primitive(equal),
        "!=" => primitive(not_equal),
        "nil" => Value::nothing(),
        "print" => primitive(print),
    };

    let mut bindings = HashMap::new();
    for (name, value) in table {
        bindings.insert(name.to_string(), value);
    }
    Environment::from_hashmap(bindings)
}
