use panguan_attrs::ErrorKind;
use panguan_error::{Error, ErrorKind};

#[derive(Debug, ErrorKind)]
#[error(
    message = format!("unknown function `{}`", name),
    labels = ["this function"],
    help = "check the spelling of the function name",
)]
struct UnknownFunction {
    name: String,
}

#[derive(Debug, ErrorKind)]
#[error(message = "division by zero")]
struct DivisionByZero;

#[test]
fn message_uses_fields() {
    let err = Error::new(vec![0..4], UnknownFunction { name: "sinc".to_string() });
    assert_eq!(err.message(), "unknown function `sinc`");
    assert_eq!(err.to_string(), "unknown function `sinc`");
}

#[test]
fn report_contains_label_and_help() {
    let err = Error::new(vec![0..4], UnknownFunction { name: "sinc".to_string() });
    let rendered = strip_ansi_escapes::strip_str(err.render("input", "sinc(x)"));
    assert!(rendered.contains("unknown function `sinc`"));
    assert!(rendered.contains("this function"));
    assert!(rendered.contains("check the spelling of the function name"));
}

#[test]
fn spanless_report() {
    let err = Error::spanless(DivisionByZero);
    let rendered = strip_ansi_escapes::strip_str(err.render("input", "1/0"));
    assert!(rendered.contains("division by zero"));
}
