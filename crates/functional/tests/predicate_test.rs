//! Predicates and bi-predicates: composition, short-circuiting and error adapters

mod common;

use std::io;

use checked_functional::prelude::*;
use checked_functional::{bi_predicate, predicate};
use common::*;
use rstest::rstest;

fn eq_ignore_case(a: &str, b: &str) -> Result<bool, io::Error> {
    Ok(a.eq_ignore_ascii_case(b))
}

fn eq(a: &str, b: &str) -> Result<bool, io::Error> {
    Ok(a == b)
}

/// Fails on every input pair
fn broken(a: &str, b: &str) -> Result<bool, io::Error> {
    Err(io_error(format!("{a}{b}")))
}

fn is_digit(s: &str) -> Result<bool, ParseError> {
    match s.chars().next() {
        None => Err(ParseError::new(s, 0)),
        Some(c) => Ok(c.is_ascii_digit()),
    }
}

#[test]
fn bi_predicate_and_requires_both() {
    let p = CheckedBiPredicate::of(eq_ignore_case).and(eq);
    assert!(!p.test("foo", "FOO").unwrap());
    assert!(p.test("foo", "foo").unwrap());
}

#[test]
fn bi_predicate_or_accepts_either() {
    let p = CheckedBiPredicate::of(eq).or(eq_ignore_case);
    assert!(p.test("foo", "FOO").unwrap());
    assert!(!p.test("foo", "bar").unwrap());
}

#[rstest]
#[case::receiver_false("foo", "bar", 0)]
#[case::receiver_true("foo", "FOO", 1)]
fn and_only_asks_other_when_receiver_passes(
    #[case] a: &str,
    #[case] b: &str,
    #[case] expected_calls: usize,
) {
    let calls = Calls::default();
    let p = CheckedBiPredicate::of(eq_ignore_case).and(|a: &str, b: &str| {
        calls.hit();
        eq(a, b)
    });
    let _ = p.test(a, b);
    assert_eq!(calls.count(), expected_calls);
}

#[rstest]
#[case::receiver_true("7", 0)]
#[case::receiver_false("x", 1)]
fn or_only_asks_other_when_receiver_fails(#[case] input: &str, #[case] expected_calls: usize) {
    let calls = Calls::default();
    let p = CheckedPredicate::of(is_digit).or(|_: &str| {
        calls.hit();
        Ok(false)
    });
    let _ = p.test(input);
    assert_eq!(calls.count(), expected_calls);
}

#[test]
fn receiver_error_short_circuits_both_combinators() {
    let calls = Calls::default();
    let other = |_: &str| {
        calls.hit();
        Ok(true)
    };
    let both = CheckedPredicate::of(is_digit).and(other);
    let either = CheckedPredicate::of(is_digit).or(other);

    assert_eq!(both.test(""), Err(ParseError::new("", 0)));
    assert_eq!(either.test(""), Err(ParseError::new("", 0)));
    assert_eq!(calls.count(), 0);
}

#[test]
fn other_error_surfaces_when_it_is_consulted() {
    let p = CheckedBiPredicate::of(eq_ignore_case).and(broken);
    assert!(!p.test("a", "b").unwrap());
    assert_eq!(p.test("a", "A").unwrap_err().to_string(), "aA");
}

#[rstest]
#[case::digit("1", Ok(false))]
#[case::letter("a", Ok(true))]
#[case::empty("", Err(ParseError::new("", 0)))]
fn negate_flips_answers_and_keeps_errors(
    #[case] input: &str,
    #[case] expected: Result<bool, ParseError>,
) {
    let p = CheckedPredicate::of(is_digit).negate();
    assert_eq!(p.test(input), expected);
    assert_eq!(predicate::not(is_digit).test(input), expected);
}

#[test]
fn bi_predicate_not_matches_negate() {
    let different = bi_predicate::not(eq);
    assert!(different.test("a", "b").unwrap());
    assert!(!different.test("a", "a").unwrap());
}

#[test]
fn on_error_throw_as_checked_wraps_cause() {
    let p = CheckedBiPredicate::of(broken).on_error_throw_as_checked(ExecutionError::new);
    let error = p.test("foo", "FOO").unwrap_err();
    assert_eq!(error.to_string(), "execution failed");
    assert_eq!(
        std::error::Error::source(&error).unwrap().to_string(),
        "fooFOO"
    );
}

#[test]
fn on_error_throw_as_unchecked_panics_with_mapped_payload() {
    let p = CheckedPredicate::of(is_digit)
        .on_error_throw_as_unchecked(|e: ParseError| Unrecoverable(e.input));
    assert!(p("5"));
    let payload: Unrecoverable = unchecked_payload(|| p(""));
    assert_eq!(payload, Unrecoverable(String::new()));
}

#[rstest]
#[case::answer_true(true)]
#[case::answer_false(false)]
fn on_error_return_uses_given_answer(#[case] answer: bool) {
    let p = CheckedBiPredicate::of(broken).on_error_return(answer);
    assert_eq!(p("x", "y"), answer);
}

#[test]
fn on_error_handle_checked_and_unchecked() {
    let recover = CheckedPredicate::of(is_digit).on_error_handle_checked(|e: ParseError| {
        if e.input.is_empty() {
            Ok(false)
        } else {
            Err(io_error("unreachable"))
        }
    });
    assert!(!recover.test("").unwrap());
    assert!(recover.test("9").unwrap());

    let calls = Calls::default();
    let handled = CheckedBiPredicate::of(broken).on_error_handle_unchecked(|e: io::Error| {
        calls.hit();
        e.to_string().len() > 2
    });
    assert!(handled("ab", "c"));
    assert!(!handled("a", "b"));
    assert_eq!(calls.count(), 2);
}

#[test]
fn on_error_test_fallbacks_see_same_input() {
    let fallback = CheckedPredicate::of(is_digit)
        .on_error_test_checked(|s: &str| Ok::<_, io::Error>(s.is_empty()));
    assert!(fallback.test("").unwrap());
    assert!(!fallback.test("a").unwrap());

    let fallback =
        CheckedBiPredicate::of(broken).on_error_test_unchecked(|a: &str, b: &str| a == b);
    assert!(fallback("k", "k"));
    assert!(!fallback("k", "j"));
}

#[test]
fn on_error_test_checked_propagates_fallback_error() {
    let p = CheckedBiPredicate::of(broken)
        .on_error_test_checked(|a: &str, _: &str| Err::<bool, _>(ParseError::new(a, 2)));
    assert_eq!(p.test("left", "right"), Err(ParseError::new("left", 2)));
}

#[test]
fn unchecked_view_filters_iterators() {
    let digit = CheckedPredicate::of(is_digit).unchecked();
    let digits: Vec<&str> = ["1", "a", "2"].into_iter().filter(|&s| digit(s)).collect();
    assert_eq!(digits, ["1", "2"]);

    let carrier = carrier_of(|| digit(""));
    assert_eq!(
        carrier.downcast::<ParseError>().unwrap(),
        ParseError::new("", 0)
    );
}

#[test]
fn unchecked_filter_round_trips_through_invoke_and_unwrap() {
    let digit = CheckedPredicate::of(is_digit).unchecked();
    let result = invoke_and_unwrap(
        || ["1", "", "2"].into_iter().filter(|&s| digit(s)).count(),
        &Expected::<ParseError>::of(),
    );
    assert_eq!(result, Err(ParseError::new("", 0)));
}

#[test]
fn predicate_checked_adapters() {
    let plain = |s: &str| {
        if s.is_empty() {
            checked_functional::carrier::raise(ParseError::new(s, 0));
        }
        s.starts_with('#')
    };

    let any = predicate::checked(plain);
    assert!(any.test("#x").unwrap());
    assert!(any.test("").unwrap_err().is::<ParseError>());

    let typed = predicate::checked_as(plain, Expected::<ParseError>::of());
    assert_eq!(typed.test(""), Err(ParseError::new("", 0)));

    let mistyped = predicate::checked_as(plain, Expected::<io::Error>::of());
    let carrier = carrier_of(|| mistyped.test(""));
    assert!(carrier.is::<ParseError>());
}

#[test]
fn bi_predicate_checked_adapters() {
    let plain = |a: &str, b: &str| {
        if a.is_empty() {
            checked_functional::carrier::raise(io_error(b));
        }
        a.len() == b.len()
    };
    let typed = bi_predicate::checked_as(plain, Expected::<io::Error>::of());
    assert!(typed.test("ab", "cd").unwrap());
    assert_eq!(typed.test("", "why").unwrap_err().to_string(), "why");

    let any = bi_predicate::checked(|_: &str, _: &str| -> bool { fail_unchecked("genuine") });
    let payload: Unrecoverable = unchecked_payload(|| any.test("a", "b"));
    assert_eq!(payload.0, "genuine");
}

#[test]
fn is_equal_matches_target() {
    let is_answer = predicate::is_equal::<_, io::Error>(42);
    assert!(is_answer.test(&42).unwrap());
    assert!(!is_answer.test(&7).unwrap());
}
