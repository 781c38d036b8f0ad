//! The built-in functions every registry starts with.

use crate::parse::literal;
use crate::types::{CompareOp, FunctionError, Value};

use super::Function;

const ORDERABLE: &str = "number, string, version or timestamp";

pub(super) fn all() -> Vec<Function> {
    vec![
        Function::new("eq", eq),
        Function::new("ne", ne),
        Function::new("gt", |args: &[&Value]| compare(CompareOp::Gt, args)),
        Function::new("ge", |args: &[&Value]| compare(CompareOp::Gte, args)),
        Function::new("lt", |args: &[&Value]| compare(CompareOp::Lt, args)),
        Function::new("le", |args: &[&Value]| compare(CompareOp::Lte, args)),
        Function::new("between", between),
        Function::new("in", is_in),
        Function::new("overlap", overlap),
        Function::new("and", and),
        Function::new("or", or),
        Function::new("not", not),
        Function::new("mod", modulo),
        Function::new("+", |args: &[&Value]| arithmetic(ArithOp::Add, args)),
        Function::new("-", |args: &[&Value]| arithmetic(ArithOp::Sub, args)),
        Function::new("*", |args: &[&Value]| arithmetic(ArithOp::Mul, args)),
        Function::new("/", |args: &[&Value]| arithmetic(ArithOp::Div, args)),
        Function::new("t_version", to_version),
        Function::new("td_time", to_timestamp),
    ]
}

// -- Argument checks --------------------------------------------------------

fn exactly(args: &[&Value], n: usize) -> Result<(), FunctionError> {
    if args.len() == n {
        Ok(())
    } else {
        Err(FunctionError::arity(n.to_string(), args.len()))
    }
}

fn at_least(args: &[&Value], n: usize) -> Result<(), FunctionError> {
    if args.len() >= n {
        Ok(())
    } else {
        Err(FunctionError::arity(format!("at least {n}"), args.len()))
    }
}

fn mismatch(expected: &'static str, found: &Value) -> FunctionError {
    FunctionError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

fn boolean(value: &Value) -> Result<bool, FunctionError> {
    value.as_bool().ok_or_else(|| mismatch("bool", value))
}

fn list(value: &Value) -> Result<&[Value], FunctionError> {
    value.as_list().ok_or_else(|| mismatch("list", value))
}

fn is_orderable(value: &Value) -> bool {
    matches!(
        value,
        Value::Int(_) | Value::Float(_) | Value::String(_) | Value::Version(_) | Value::Timestamp(_)
    )
}

fn ordered(op: CompareOp, a: &Value, b: &Value) -> Result<bool, FunctionError> {
    a.compare(op, b).ok_or_else(|| {
        if is_orderable(a) {
            mismatch(a.kind(), b)
        } else {
            mismatch(ORDERABLE, a)
        }
    })
}

// -- Comparison -------------------------------------------------------------

fn eq(args: &[&Value]) -> Result<Value, FunctionError> {
    at_least(args, 2)?;
    let (first, rest) = (args[0], &args[1..]);
    Ok(Value::Bool(rest.iter().all(|v| first.loose_eq(v))))
}

fn ne(args: &[&Value]) -> Result<Value, FunctionError> {
    at_least(args, 2)?;
    let (first, rest) = (args[0], &args[1..]);
    Ok(Value::Bool(rest.iter().all(|v| !first.loose_eq(v))))
}

fn compare(op: CompareOp, args: &[&Value]) -> Result<Value, FunctionError> {
    exactly(args, 2)?;
    ordered(op, args[0], args[1]).map(Value::Bool)
}

fn between(args: &[&Value]) -> Result<Value, FunctionError> {
    exactly(args, 3)?;
    let (value, low, high) = (args[0], args[1], args[2]);
    let above = ordered(CompareOp::Gte, value, low)?;
    let below = ordered(CompareOp::Lte, value, high)?;
    Ok(Value::Bool(above && below))
}

// -- Membership -------------------------------------------------------------

fn is_in(args: &[&Value]) -> Result<Value, FunctionError> {
    exactly(args, 2)?;
    let needle = args[0];
    let haystack = list(args[1])?;
    Ok(Value::Bool(haystack.iter().any(|v| needle.loose_eq(v))))
}

fn overlap(args: &[&Value]) -> Result<Value, FunctionError> {
    exactly(args, 2)?;
    let left = list(args[0])?;
    let right = list(args[1])?;
    Ok(Value::Bool(
        left.iter().any(|a| right.iter().any(|b| a.loose_eq(b))),
    ))
}

// -- Logic ------------------------------------------------------------------

fn booleans(args: &[&Value]) -> Result<Vec<bool>, FunctionError> {
    at_least(args, 2)?;
    args.iter().copied().map(boolean).collect()
}

fn and(args: &[&Value]) -> Result<Value, FunctionError> {
    Ok(Value::Bool(booleans(args)?.into_iter().all(|b| b)))
}

fn or(args: &[&Value]) -> Result<Value, FunctionError> {
    Ok(Value::Bool(booleans(args)?.into_iter().any(|b| b)))
}

fn not(args: &[&Value]) -> Result<Value, FunctionError> {
    exactly(args, 1)?;
    Ok(Value::Bool(!boolean(args[0])?))
}

// -- Arithmetic -------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

fn number(value: &Value) -> Result<f64, FunctionError> {
    value.as_f64().ok_or_else(|| mismatch("number", value))
}

#[allow(clippy::cast_precision_loss)]
fn apply(op: ArithOp, a: &Value, b: &Value) -> Result<Value, FunctionError> {
    if let (Value::Int(x), Value::Int(y)) = (a, b) {
        let exact = match op {
            ArithOp::Add => x.checked_add(*y),
            ArithOp::Sub => x.checked_sub(*y),
            ArithOp::Mul => x.checked_mul(*y),
            ArithOp::Div if *y == 0 => return Err(FunctionError::DivisionByZero),
            ArithOp::Div if x.checked_rem(*y) == Some(0) => x.checked_div(*y),
            ArithOp::Div => None,
        };
        if let Some(result) = exact {
            return Ok(Value::Int(result));
        }
    }

    let (x, y) = (number(a)?, number(b)?);
    let result = match op {
        ArithOp::Add => x + y,
        ArithOp::Sub => x - y,
        ArithOp::Mul => x * y,
        ArithOp::Div if y == 0.0 => return Err(FunctionError::DivisionByZero),
        ArithOp::Div => x / y,
    };
    Ok(Value::Float(result))
}

fn arithmetic(op: ArithOp, args: &[&Value]) -> Result<Value, FunctionError> {
    at_least(args, 2)?;
    args[1..]
        .iter()
        .try_fold(args[0].clone(), |acc, next| apply(op, &acc, next))
}

fn modulo(args: &[&Value]) -> Result<Value, FunctionError> {
    exactly(args, 2)?;
    match (args[0], args[1]) {
        (Value::Int(_), Value::Int(0)) => Err(FunctionError::DivisionByZero),
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x.wrapping_rem(*y))),
        (a, b) => {
            let (x, y) = (number(a)?, number(b)?);
            if y == 0.0 {
                return Err(FunctionError::DivisionByZero);
            }
            Ok(Value::Float(x % y))
        }
    }
}

// -- Type conversion --------------------------------------------------------

fn to_version(args: &[&Value]) -> Result<Value, FunctionError> {
    exactly(args, 1)?;
    match args[0] {
        Value::Version(v) => Ok(Value::Version(v.clone())),
        Value::String(s) => literal::version(s)
            .map(Value::Version)
            .ok_or_else(|| FunctionError::InvalidLiteral {
                kind: "version",
                text: s.clone(),
            }),
        other => Err(mismatch("string", other)),
    }
}

fn to_timestamp(args: &[&Value]) -> Result<Value, FunctionError> {
    exactly(args, 1)?;
    match args[0] {
        Value::Timestamp(t) => Ok(Value::Timestamp(*t)),
        Value::String(s) => literal::timestamp(s)
            .map(Value::Timestamp)
            .ok_or_else(|| FunctionError::InvalidLiteral {
                kind: "timestamp",
                text: s.clone(),
            }),
        other => Err(mismatch("string", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Timestamp, Version};

    fn call<F>(f: F, args: &[Value]) -> Result<Value, FunctionError>
    where
        F: Fn(&[&Value]) -> Result<Value, FunctionError>,
    {
        let args: Vec<&Value> = args.iter().collect();
        f(&args)
    }

    fn s(v: &str) -> Value {
        Value::String(v.to_owned())
    }

    fn version(v: &str) -> Value {
        Value::Version(v.parse::<Version>().unwrap())
    }

    fn list_of(items: &[i64]) -> Value {
        Value::from(items.to_vec())
    }

    #[test]
    fn eq_compares_all_to_first() {
        assert_eq!(call(eq, &[s("one"), s("one")]), Ok(Value::Bool(true)));
        assert_eq!(call(eq, &[s("one"), s("one"), s("three")]), Ok(Value::Bool(false)));
        assert_eq!(call(eq, &[Value::Int(3), Value::Float(3.0)]), Ok(Value::Bool(true)));
    }

    #[test]
    fn ne_requires_every_other_to_differ() {
        assert_eq!(call(ne, &[Value::Int(1), Value::Int(2), Value::Int(3)]), Ok(Value::Bool(true)));
        assert_eq!(call(ne, &[Value::Int(1), Value::Int(2), Value::Int(1)]), Ok(Value::Bool(false)));
    }

    #[test]
    fn eq_needs_two_arguments() {
        assert_eq!(
            call(eq, &[Value::Int(1)]),
            Err(FunctionError::arity("at least 2", 1))
        );
    }

    #[test]
    fn ordering_on_each_kind() {
        assert_eq!(call(|args| compare(CompareOp::Gt, args), &[Value::Int(2), Value::Float(1.5)]), Ok(Value::Bool(true)));
        assert_eq!(call(|args| compare(CompareOp::Lt, args), &[s("a"), s("b")]), Ok(Value::Bool(true)));
        assert_eq!(call(|args| compare(CompareOp::Gte, args), &[version("2.9.1"), version("2.8.3")]), Ok(Value::Bool(true)));
        assert_eq!(call(|args| compare(CompareOp::Gte, args), &[version("2.8.1"), version("2.9.3")]), Ok(Value::Bool(false)));
        let early = Value::Timestamp("2017-07-02 12:00:00".parse::<Timestamp>().unwrap());
        let late = Value::Timestamp("2017-07-19 12:00:00".parse::<Timestamp>().unwrap());
        assert_eq!(call(|args| compare(CompareOp::Lte, args), &[early, late]), Ok(Value::Bool(true)));
    }

    #[test]
    fn ordering_rejects_mixed_kinds() {
        assert_eq!(
            call(|args| compare(CompareOp::Gt, args), &[Value::Int(1), s("1")]),
            Err(FunctionError::TypeMismatch {
                expected: "number",
                found: "string"
            })
        );
        assert_eq!(
            call(|args| compare(CompareOp::Gt, args), &[Value::Bool(true), Value::Bool(false)]),
            Err(FunctionError::TypeMismatch {
                expected: ORDERABLE,
                found: "bool"
            })
        );
    }

    #[test]
    fn ordering_is_binary() {
        assert_eq!(
            call(|args| compare(CompareOp::Gt, args), &[Value::Int(3), Value::Int(2), Value::Int(1)]),
            Err(FunctionError::arity("2", 3))
        );
    }

    #[test]
    fn between_is_inclusive() {
        assert_eq!(call(between, &[Value::Int(18), Value::Int(18), Value::Int(80)]), Ok(Value::Bool(true)));
        assert_eq!(call(between, &[Value::Int(80), Value::Int(18), Value::Int(80)]), Ok(Value::Bool(true)));
        assert_eq!(call(between, &[Value::Int(81), Value::Int(18), Value::Int(80)]), Ok(Value::Bool(false)));
        assert_eq!(
            call(between, &[version("2.1.1.9999"), version("2.1.1"), version("2.1.2")]),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn in_membership() {
        let genders = Value::from(vec!["female", "male"]);
        assert_eq!(call(is_in, &[s("female"), genders.clone()]), Ok(Value::Bool(true)));
        assert_eq!(call(is_in, &[s("other"), genders]), Ok(Value::Bool(false)));
        assert_eq!(call(is_in, &[s("x"), Value::List(vec![])]), Ok(Value::Bool(false)));
        assert_eq!(call(is_in, &[Value::Float(2.0), list_of(&[1, 2])]), Ok(Value::Bool(true)));
    }

    #[test]
    fn in_needs_a_list() {
        assert_eq!(
            call(is_in, &[s("x"), s("xyz")]),
            Err(FunctionError::TypeMismatch {
                expected: "list",
                found: "string"
            })
        );
    }

    #[test]
    fn overlap_cases() {
        assert_eq!(call(overlap, &[list_of(&[1, 2, 3]), list_of(&[4, 5, 6])]), Ok(Value::Bool(false)));
        assert_eq!(call(overlap, &[list_of(&[1, 2, 3]), list_of(&[4, 3, 2])]), Ok(Value::Bool(true)));
        assert_eq!(call(overlap, &[list_of(&[]), list_of(&[])]), Ok(Value::Bool(false)));
        assert_eq!(call(overlap, &[list_of(&[1]), list_of(&[])]), Ok(Value::Bool(false)));
    }

    #[test]
    fn logic() {
        let t = Value::Bool(true);
        let f = Value::Bool(false);
        assert_eq!(call(and, &[t.clone(), t.clone()]), Ok(Value::Bool(true)));
        assert_eq!(call(and, &[t.clone(), f.clone(), t.clone()]), Ok(Value::Bool(false)));
        assert_eq!(call(or, &[f.clone(), t.clone()]), Ok(Value::Bool(true)));
        assert_eq!(call(or, &[f.clone(), f.clone()]), Ok(Value::Bool(false)));
        assert_eq!(call(not, &[f]), Ok(Value::Bool(true)));
    }

    #[test]
    fn logic_rejects_non_bools() {
        assert_eq!(
            call(and, &[Value::Bool(true), Value::Int(1)]),
            Err(FunctionError::TypeMismatch {
                expected: "bool",
                found: "number"
            })
        );
        assert_eq!(call(not, &[Value::Bool(true), Value::Bool(true)]), Err(FunctionError::arity("1", 2)));
    }

    #[test]
    fn integer_arithmetic_stays_integer() {
        assert_eq!(call(|args| arithmetic(ArithOp::Add, args), &[Value::Int(10), Value::Int(5)]), Ok(Value::Int(15)));
        assert_eq!(call(|args| arithmetic(ArithOp::Sub, args), &[Value::Int(10), Value::Int(5), Value::Int(1)]), Ok(Value::Int(4)));
        assert_eq!(call(|args| arithmetic(ArithOp::Mul, args), &[Value::Int(3), Value::Int(4)]), Ok(Value::Int(12)));
        assert_eq!(call(|args| arithmetic(ArithOp::Div, args), &[Value::Int(10), Value::Int(5)]), Ok(Value::Int(2)));
    }

    #[test]
    fn inexact_division_is_float() {
        assert_eq!(call(|args| arithmetic(ArithOp::Div, args), &[Value::Int(7), Value::Int(2)]), Ok(Value::Float(3.5)));
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn overflow_falls_back_to_float() {
        assert_eq!(
            call(|args| arithmetic(ArithOp::Add, args), &[Value::Int(i64::MAX), Value::Int(1)]),
            Ok(Value::Float(i64::MAX as f64 + 1.0))
        );
    }

    #[test]
    fn mixed_arithmetic_is_float() {
        assert_eq!(call(|args| arithmetic(ArithOp::Add, args), &[Value::Int(1), Value::Float(0.5)]), Ok(Value::Float(1.5)));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(call(|args| arithmetic(ArithOp::Div, args), &[Value::Int(1), Value::Int(0)]), Err(FunctionError::DivisionByZero));
        assert_eq!(call(|args| arithmetic(ArithOp::Div, args), &[Value::Float(1.0), Value::Float(0.0)]), Err(FunctionError::DivisionByZero));
        assert_eq!(call(modulo, &[Value::Int(1), Value::Int(0)]), Err(FunctionError::DivisionByZero));
    }

    #[test]
    fn arithmetic_rejects_non_numbers() {
        assert_eq!(
            call(|args| arithmetic(ArithOp::Add, args), &[s("1"), Value::Int(1)]),
            Err(FunctionError::TypeMismatch {
                expected: "number",
                found: "string"
            })
        );
    }

    #[test]
    fn modulo_cases() {
        assert_eq!(call(modulo, &[Value::Int(18), Value::Int(5)]), Ok(Value::Int(3)));
        assert_eq!(call(modulo, &[Value::Float(7.5), Value::Int(2)]), Ok(Value::Float(1.5)));
        assert_eq!(call(modulo, &[Value::Int(i64::MIN), Value::Int(-1)]), Ok(Value::Int(0)));
        assert_eq!(
            call(modulo, &[s("18"), Value::Int(5)]),
            Err(FunctionError::TypeMismatch {
                expected: "number",
                found: "string"
            })
        );
    }

    #[test]
    fn version_conversion() {
        assert_eq!(call(to_version, &[s("2.7.1")]), Ok(version("2.7.1")));
        assert_eq!(call(to_version, &[version("6.0.0")]), Ok(version("6.0.0")));
        assert_eq!(
            call(to_version, &[s("2.x")]),
            Err(FunctionError::InvalidLiteral {
                kind: "version",
                text: "2.x".into()
            })
        );
        assert!(call(to_version, &[Value::Int(2)]).is_err());
    }

    #[test]
    fn timestamp_conversion() {
        let parsed = call(to_timestamp, &[s("2017-09-09 12:00:00")]).unwrap();
        assert_eq!(parsed.kind(), "timestamp");
        assert_eq!(call(to_timestamp, &[parsed.clone()]), Ok(parsed));
        assert_eq!(
            call(to_timestamp, &[s("2017-09-09")]),
            Err(FunctionError::InvalidLiteral {
                kind: "timestamp",
                text: "2017-09-09".into()
            })
        );
    }
}
