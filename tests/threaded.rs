use std::sync::Arc;
use std::thread;

use rulexp::{parse, register_function, MapParams, Registry, Value, Version};

#[test]
fn evaluate_across_threads() {
    let expr = Arc::new(
        parse(
            r#"(and
                (ge age 18)
                (eq status "active")
                (not banned))"#,
        )
        .unwrap(),
    );

    let cases = [
        (25_i64, "active", false, true),
        (30, "active", true, false),
        (15, "active", false, false),
        (25, "inactive", false, false),
    ];

    let handles: Vec<_> = cases
        .iter()
        .map(|&(age, status, banned, _)| {
            let expr = Arc::clone(&expr);
            thread::spawn(move || {
                let params = MapParams::new()
                    .set("age", age)
                    .set("status", status)
                    .set("banned", banned);
                expr.eval_bool(&params)
            })
        })
        .collect();

    for (handle, (_, _, _, expected)) in handles.into_iter().zip(cases) {
        assert_eq!(handle.join().unwrap(), Ok(expected));
    }
}

#[test]
fn bare_true_is_a_variable() {
    let expr = parse("(eq banned true)").unwrap();
    assert_eq!(expr.properties(), ["banned", "true"]);
    let params = MapParams::new().set("banned", true);
    assert!(matches!(
        expr.eval_bool(&params),
        Err(rulexp::EvalError::UnresolvedVariable { .. })
    ));
}

#[test]
fn version_ranges_are_exclusive_across_threads() {
    let at_least = Arc::new(parse(r#"(ge app_version (t_version "5.6.3"))"#).unwrap());
    let below = Arc::new(parse(r#"(lt app_version (t_version "5.6.3"))"#).unwrap());

    let handles: Vec<_> = (0..8_u64)
        .map(|t| {
            let at_least = Arc::clone(&at_least);
            let below = Arc::clone(&below);
            thread::spawn(move || {
                for patch in 0..50_u64 {
                    let version = Version::new(vec![5, 4 + t % 4, patch]);
                    let params = MapParams::new().set("app_version", version);
                    let a = at_least.eval_bool(&params).unwrap();
                    let b = below.eval_bool(&params).unwrap();
                    assert!(a ^ b);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn shared_registry_across_threads() {
    let registry = Arc::new(Registry::with_builtins());
    let expr = Arc::new(parse("(eq (double n) (+ n n))").unwrap());

    registry
        .register("double", |args: &[&Value]| match args {
            [Value::Int(n)] => Ok(Value::Int(n * 2)),
            _ => Err(rulexp::FunctionError::custom("double takes one integer")),
        })
        .unwrap();

    let handles: Vec<_> = (0..4_i64)
        .map(|t| {
            let registry = Arc::clone(&registry);
            let expr = Arc::clone(&expr);
            thread::spawn(move || {
                let functions = registry.snapshot();
                (0..100)
                    .map(|n| {
                        let params = MapParams::new().set("n", t * 100 + n);
                        expr.eval_bool_with(&params, &functions)
                    })
                    .all(|r| r == Ok(true))
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn registration_during_evaluation() {
    register_function("test_threaded_flag", |_: &[&Value]| Ok(Value::Bool(true))).unwrap();
    let expr = Arc::new(parse("(and (test_threaded_flag) (eq 1 1))").unwrap());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let expr = Arc::clone(&expr);
            thread::spawn(move || (0..200).all(|_| expr.eval_bool(&()) == Ok(true)))
        })
        .collect();
    let writer = thread::spawn(|| {
        for i in 0..50 {
            register_function(&format!("test_threaded_{i}"), |_: &[&Value]| {
                Ok(Value::Bool(false))
            })
            .unwrap();
        }
    });

    writer.join().unwrap();
    for reader in readers {
        assert!(reader.join().unwrap());
    }
}
