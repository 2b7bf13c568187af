use approx::assert_abs_diff_eq;
use panguan_tools::*;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

#[test]
fn definite_integral_of_square() {
    let integral = integrate("x**2", "x", Some(("x", "0", "1"))).unwrap();
    assert_eq!(integral.result_str, "1/3");
    assert!(integral.constant_note.is_empty());
}

#[test]
fn quadratic_solution_set() {
    let solutions = solve_equation("x**2 - 5*x + 6", "x").unwrap();
    let set = solutions.solutions.into_iter().collect::<BTreeSet<_>>();
    assert_eq!(set, BTreeSet::from(["2".to_owned(), "3".to_owned()]));
}

#[test]
fn compound_interest_limit_is_e() {
    let limit = limit("(1+1/n)**n", "n", "oo").unwrap();
    let value = evaluate(&limit.result_str, &[]).unwrap().float_value;
    assert_abs_diff_eq!(value, std::f64::consts::E, epsilon = 1e-3);
}

#[test]
fn simplify_is_idempotent() {
    for input in ["(x + 1)^2 - x^2", "sin(x)^2 + cos(x)^2 + x", "sqrt(12)*y", "2*x/4 + 1/3 + 1/6"] {
        let once = simplify(input).unwrap();
        let twice = simplify(&once.simplified_str).unwrap();
        assert_eq!(once.simplified_str, twice.simplified_str, "not a fixed point: {}", input);
    }
}

#[test]
fn malformed_input_is_an_error_envelope() {
    let envelopes = [
        serde_json::to_value(Envelope::from(simplify("(x + 1"))).unwrap(),
        serde_json::to_value(Envelope::from(differentiate("sin(x", "x"))).unwrap(),
        serde_json::to_value(Envelope::from(integrate("x^2)", "x", None))).unwrap(),
        serde_json::to_value(Envelope::from(solve_equation("((x - 1)", "x"))).unwrap(),
        serde_json::to_value(Envelope::from(evaluate("2*(3", &[]))).unwrap(),
        serde_json::to_value(Envelope::from(limit("(1/x", "x", "0"))).unwrap(),
    ];

    for envelope in envelopes {
        assert_eq!(envelope["status"], "error");
        let message = envelope["message"].as_str().unwrap();
        assert!(!message.is_empty());
    }
}

#[test]
fn unit_conversions() {
    assert_eq!(convert(1.0, "km", "m").unwrap().converted_value, 1000.0);

    let radians = convert(180.0, "deg", "rad").unwrap().converted_value;
    assert_abs_diff_eq!(radians, std::f64::consts::PI, epsilon = 1e-12);

    let err = convert(1.0, "m", "deg").unwrap_err();
    assert_eq!(err.kind, ToolErrorKind::UnsupportedConversion);
    assert!(err.message.contains('m') && err.message.contains("deg"));
}

#[test]
fn division_by_zero_is_an_error_envelope() {
    let envelopes = [
        serde_json::to_value(Envelope::from(simplify("1/0"))).unwrap(),
        serde_json::to_value(Envelope::from(simplify("0/0"))).unwrap(),
        serde_json::to_value(Envelope::from(differentiate("x/0", "x"))).unwrap(),
        serde_json::to_value(Envelope::from(integrate("1/0", "x", None))).unwrap(),
        serde_json::to_value(Envelope::from(solve_equation("x - 1/0", "x"))).unwrap(),
        serde_json::to_value(Envelope::from(evaluate("1/0", &[]))).unwrap(),
    ];

    for envelope in envelopes {
        assert_eq!(envelope["status"], "error", "{envelope}");
        assert!(!envelope["message"].as_str().unwrap().is_empty());
    }
}

#[test]
fn limits_with_parameters() {
    assert_eq!(limit("sin(a*x)/x", "x", "0").unwrap().result_str, "a");
    assert_eq!(limit("(x^2 - a^2)/(x - a)", "x", "a").unwrap().result_str, "2*a");
}

#[test]
fn divergent_definite_integral() {
    let err = integrate("x^-2", "x", Some(("x", "-1", "1"))).unwrap_err();
    assert_eq!(err.kind, ToolErrorKind::Compute);
    assert!(err.message.contains("singular"), "{}", err.message);
}
