//! Expression rendering: literals, parenthesization and re-parse checks.

mod common;

use common::{assert_reparses, parse_projected, parsed_order};
use fluq_core::{col, functions, lit, when, Error, Expr, GenericDialect, Renderer};
use sqlparser::dialect::{BigQueryDialect, GenericDialect as SqlGeneric};

fn c(name: &str) -> Expr {
    col(name).unwrap()
}

/// Renders with BigQuery and checks the parse tree against the expression.
fn check_bigquery(expr: &Expr, expected: &str) {
    let rendered = expr.sql();
    assert_eq!(rendered, expected);
    assert_reparses(&BigQueryDialect {}, expr, &rendered);
}

/// Same, rendered with the generic dialect.
fn check_generic(expr: &Expr, expected: &str) {
    let generic = GenericDialect::new();
    let rendered = Renderer::new(&generic).expr(expr);
    assert_eq!(rendered, expected);
    assert_reparses(&SqlGeneric {}, expr, &rendered);
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn test_literal_rendering() {
    assert_eq!(lit(5).sql(), "5");
    assert_eq!(lit(-12_i64).sql(), "-12");
    assert_eq!(lit(2.0).sql(), "2.0");
    assert_eq!(lit(3.25_f32).sql(), "3.25");
    assert_eq!(lit(false).sql(), "FALSE");
    assert_eq!(lit(None::<&str>).sql(), "NULL");
    assert_eq!(lit("O'Brien").sql(), r"'O\'Brien'");
    assert_eq!(lit(String::from("")).sql(), "''");
}

#[test]
fn test_string_literals_are_never_identifiers() {
    assert_eq!(c("name").eq("select").unwrap().sql(), "name = 'select'");
    assert_eq!(c("name").eq("a b").unwrap().sql(), "name = 'a b'");
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn test_alias_of_subtraction() {
    let expr = (c("age") - c("years")).unwrap().as_("x").unwrap();
    assert_eq!(expr.sql(), "age - years AS x");
}

#[test]
fn test_lower_precedence_operands_are_wrapped() {
    let sum = (c("a") + c("b")).unwrap();
    check_bigquery(&(&sum * c("c")).unwrap(), "(a + b) * c");
    check_bigquery(&(c("c") / &sum).unwrap(), "c / (a + b)");
    check_bigquery(&(&sum - (c("c") - c("d")).unwrap()).unwrap(), "a + b - (c - d)");
    check_bigquery(&((&sum + c("c")).unwrap() + c("d")).unwrap(), "a + b + c + d");
}

#[test]
fn test_comparisons_inside_logic() {
    let expr = c("age")
        .gt(18)
        .unwrap()
        .and(c("status").eq("active"))
        .unwrap()
        .or(c("vip").eq(true))
        .unwrap();
    check_bigquery(&expr, "age > 18 AND status = 'active' OR vip = TRUE");

    let grouped = c("a")
        .eq(1)
        .unwrap()
        .and(c("b").eq(2).unwrap().or(c("c").eq(3)).unwrap())
        .unwrap();
    check_bigquery(&grouped, "a = 1 AND (b = 2 OR c = 3)");
}

#[test]
fn test_not_binds_below_comparisons() {
    check_bigquery(&c("a").eq(1).unwrap().not().unwrap(), "NOT a = 1");
    let either = c("a").or(c("b")).unwrap();
    check_bigquery(&(!either).unwrap(), "NOT (a OR b)");
    let negated = (!c("a")).unwrap();
    check_bigquery(&negated.and(c("b")).unwrap(), "NOT a AND b");
}

#[test]
fn test_unary_minus() {
    check_bigquery(&(-c("a")).unwrap(), "-a");
    check_bigquery(&(-lit(-5)).unwrap(), "-(-5)");
    check_bigquery(&(-(c("a") + 1_i64).unwrap()).unwrap(), "-(a + 1)");
    check_bigquery(&(c("a") - -3_i64).unwrap(), "a - -3");
    check_bigquery(&((-c("a")).unwrap() * c("b")).unwrap(), "-a * b");
    assert!(!(-(-c("a")).unwrap()).unwrap().sql().contains("--"));
}

#[test]
fn test_postfix_and_range_operators() {
    check_bigquery(&c("deleted_at").is_null().unwrap(), "deleted_at IS NULL");
    check_bigquery(
        &(c("a") + c("b")).unwrap().is_not_null().unwrap(),
        "a + b IS NOT NULL",
    );
    check_bigquery(
        &c("score").between(0, 100).unwrap(),
        "score BETWEEN 0 AND 100",
    );
    check_bigquery(
        &c("score").not_between(c("lo"), (c("hi") + 1_i64).unwrap()).unwrap(),
        "score NOT BETWEEN lo AND hi + 1",
    );
    check_bigquery(
        &c("country").in_list(["DE", "FR"]).unwrap(),
        "country IN ('DE', 'FR')",
    );
    check_bigquery(
        &c("id").not_in_list([1, 2]).unwrap(),
        "id NOT IN (1, 2)",
    );
    check_bigquery(&c("name").like("J%").unwrap(), "name LIKE 'J%'");
}

#[test]
fn test_modulo_forms() {
    let expr = (c("n") % 2_i64).unwrap();
    assert_eq!(expr.sql(), "MOD(n, 2)");
    check_generic(&expr, "n % 2");
    let wrapped = ((c("n") + 1_i64).unwrap() % 2_i64).unwrap();
    assert_eq!(wrapped.sql(), "MOD(n + 1, 2)");
    check_generic(&wrapped, "(n + 1) % 2");
}

#[test]
fn test_functions_reparse() {
    check_bigquery(&c("a").floor_div(c("b")).unwrap(), "FLOOR(a / b)");
    check_bigquery(
        &(c("a") + 1_i64).unwrap().floor_div(2).unwrap(),
        "FLOOR((a + 1) / 2)",
    );
    check_bigquery(
        &(functions::abs((c("a") - c("b")).unwrap()).unwrap() * 2_i64).unwrap(),
        "ABS(a - b) * 2",
    );
    check_generic(
        &functions::coalesce([c("a"), c("b")]).unwrap(),
        "COALESCE(a, b)",
    );
    check_generic(
        &functions::modulo(c("n"), 2).unwrap(),
        "MOD(n, 2)",
    );
    assert!(matches!(
        functions::round_to("x", 2),
        Err(Error::UnsupportedOperator { op: "ROUND", .. })
    ));
}

#[test]
fn test_case_reparses() {
    let case = when(c("a").gt(5), 0)
        .unwrap()
        .when(c("a").gt(100), 1)
        .unwrap()
        .otherwise(-1)
        .unwrap();
    check_bigquery(
        &case,
        "CASE WHEN a > 5 THEN 0 WHEN a > 100 THEN 1 ELSE -1 END",
    );
    let grade = when(c("score").gt_eq(50).unwrap().and(c("passed")), "pass")
        .unwrap();
    check_bigquery(&grade, "CASE WHEN score >= 50 AND passed THEN 'pass' END");
    assert!(matches!(
        c("a").otherwise(0),
        Err(Error::UnsupportedOperator { op: "CASE", .. })
    ));
}

#[test]
fn test_not_equal_reparses() {
    check_bigquery(&c("a").not_eq(c("b")).unwrap(), "a != b");
}

#[test]
fn test_quoted_identifiers_reparse() {
    let expr = col("`my-project`.ds.`order`").unwrap().gt_eq(10).unwrap();
    check_bigquery(&expr, "`my-project`.ds.`order` >= 10");
}

#[test]
fn test_deep_nesting_reparses() {
    let mut expr = c("x0");
    for i in 1..20 {
        let next = c(&format!("x{i}"));
        expr = if i % 2 == 0 {
            (next * expr).unwrap()
        } else {
            (expr - next).unwrap()
        };
    }
    let rendered = expr.sql();
    let parsed = parse_projected(&BigQueryDialect {}, &rendered);
    assert_eq!(parsed_order(&parsed), common::tree_order(&expr));
}

// =============================================================================
// Idempotence and errors
// =============================================================================

#[test]
fn test_rendering_is_idempotent() {
    let expr = c("a").lt_eq(c("b")).unwrap().and(c("c").is_null()).unwrap();
    assert_eq!(expr.sql(), expr.sql());
    assert_eq!(expr.to_string(), expr.sql());
}

#[test]
fn test_mismatched_literals_fail_at_construction() {
    assert!(matches!(
        lit("a") * 2_i64,
        Err(Error::UnsupportedOperator { op: "MUL", .. })
    ));
    assert!(matches!(
        lit(1).lt("b"),
        Err(Error::UnsupportedOperator { op: "LT", .. })
    ));
    assert!(matches!(
        lit(1).concat(c("b")),
        Err(Error::UnsupportedOperator { op: "CONCAT", .. })
    ));
    assert!(matches!(
        lit(3).not(),
        Err(Error::UnsupportedOperator { op: "NOT", .. })
    ));
}
