#![allow(dead_code)]

use fluq_core::ast::{ExprKind, Literal};
use fluq_core::{Expr, Query};
use sqlparser::ast::{
    Expr as SqlExpr, FunctionArg, FunctionArgExpr, FunctionArguments, SelectItem, SetExpr,
    Statement,
};
use sqlparser::dialect::{BigQueryDialect, Dialect, GenericDialect};
use sqlparser::parser::Parser;

pub fn parse_with(dialect: &dyn Dialect, sql: &str) -> Statement {
    let mut statements = Parser::parse_sql(dialect, sql)
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"));
    assert_eq!(statements.len(), 1, "Expected one statement in: {sql}");
    statements.remove(0)
}

pub fn parse_bigquery(sql: &str) -> Statement {
    parse_with(&BigQueryDialect {}, sql)
}

pub fn parse_generic(sql: &str) -> Statement {
    parse_with(&GenericDialect {}, sql)
}

pub fn parse_select(statement: Statement) -> sqlparser::ast::Select {
    match statement {
        Statement::Query(query) => match *(*query).body {
            SetExpr::Select(select) => *select,
            other => panic!("Expected SELECT, got {other:?}"),
        },
        other => panic!("Expected query, got {other:?}"),
    }
}

/// Parses `SELECT <expr>` and returns the single projected expression.
pub fn parse_projected(dialect: &dyn Dialect, expr_sql: &str) -> SqlExpr {
    let sql = format!("SELECT {expr_sql}");
    let select = parse_select(parse_with(dialect, &sql));
    match select.projection.into_iter().next() {
        Some(SelectItem::UnnamedExpr(expr)) => expr,
        Some(SelectItem::ExprWithAlias { expr, .. }) => expr,
        other => panic!("Expected an expression in {sql}, got {other:?}"),
    }
}

/// Fully parenthesized evaluation order of a parsed expression.
pub fn parsed_order(expr: &SqlExpr) -> String {
    let order = match expr {
        SqlExpr::Nested(inner) => return parsed_order(inner),
        SqlExpr::Identifier(ident) => ident.value.clone(),
        SqlExpr::CompoundIdentifier(idents) => idents
            .iter()
            .map(|i| i.value.as_str())
            .collect::<Vec<_>>()
            .join("."),
        SqlExpr::BinaryOp { left, op, right } => {
            format!("({} {op} {})", parsed_order(left), parsed_order(right))
        }
        SqlExpr::UnaryOp { op, expr } => format!("({op} {})", parsed_order(expr)),
        SqlExpr::IsNull(inner) => format!("({} IS NULL)", parsed_order(inner)),
        SqlExpr::IsNotNull(inner) => format!("({} IS NOT NULL)", parsed_order(inner)),
        SqlExpr::Like {
            negated: false,
            expr,
            pattern,
            ..
        } => format!("({} LIKE {})", parsed_order(expr), parsed_order(pattern)),
        SqlExpr::Between {
            expr,
            negated,
            low,
            high,
        } => format!(
            "({} {}BETWEEN {} AND {})",
            parsed_order(expr),
            if *negated { "NOT " } else { "" },
            parsed_order(low),
            parsed_order(high)
        ),
        SqlExpr::InList {
            expr,
            list,
            negated,
        } => format!(
            "({} {}IN ({}))",
            parsed_order(expr),
            if *negated { "NOT " } else { "" },
            list.iter().map(parsed_order).collect::<Vec<_>>().join(", ")
        ),
        SqlExpr::Function(function) => {
            let args = match &function.args {
                FunctionArguments::List(list) => list
                    .args
                    .iter()
                    .map(|arg| match arg {
                        FunctionArg::Unnamed(FunctionArgExpr::Expr(e)) => parsed_order(e),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
                _ => String::new(),
            };
            format!("{}({args})", function.name)
        }
        SqlExpr::Case {
            operand: None,
            conditions,
            else_result,
            ..
        } => {
            let mut order = String::from("(CASE");
            for when in conditions {
                order.push_str(&format!(
                    " WHEN {} THEN {}",
                    parsed_order(&when.condition),
                    parsed_order(&when.result)
                ));
            }
            if let Some(otherwise) = else_result {
                order.push_str(&format!(" ELSE {}", parsed_order(otherwise)));
            }
            order.push_str(" END)");
            order
        }
        other => other.to_string(),
    };
    order.to_uppercase()
}

/// Fully parenthesized evaluation order of an expression tree, in the same
/// notation as [`parsed_order`].
pub fn tree_order(expr: &Expr) -> String {
    let order = match expr.kind() {
        ExprKind::Literal(literal) => literal_order(literal),
        ExprKind::Column(path) => path
            .segments()
            .map(|s| s.value())
            .collect::<Vec<_>>()
            .join("."),
        ExprKind::Unary { op, operand } => match op.name() {
            "NOT" => format!("(NOT {})", tree_order(operand)),
            "NEG" => format!("(- {})", tree_order(operand)),
            "IS_NULL" => format!("({} IS NULL)", tree_order(operand)),
            "IS_NOT_NULL" => format!("({} IS NOT NULL)", tree_order(operand)),
            other => panic!("unknown unary operator {other}"),
        },
        ExprKind::Binary { op, left, right } => {
            let symbol = match op.name() {
                "NEQ" => "<>",
                _ => op.as_str(),
            };
            format!("({} {symbol} {})", tree_order(left), tree_order(right))
        }
        ExprKind::Between {
            expr,
            low,
            high,
            negated,
        } => format!(
            "({} {}BETWEEN {} AND {})",
            tree_order(expr),
            if *negated { "NOT " } else { "" },
            tree_order(low),
            tree_order(high)
        ),
        ExprKind::InList {
            expr,
            list,
            negated,
        } => format!(
            "({} {}IN ({}))",
            tree_order(expr),
            if *negated { "NOT " } else { "" },
            list.iter().map(tree_order).collect::<Vec<_>>().join(", ")
        ),
        ExprKind::Function { func, args } => format!(
            "{}({})",
            func.name(),
            args.iter().map(tree_order).collect::<Vec<_>>().join(", ")
        ),
        ExprKind::Case {
            branches,
            otherwise,
        } => {
            let mut order = String::from("(CASE");
            for (condition, value) in branches {
                order.push_str(&format!(
                    " WHEN {} THEN {}",
                    tree_order(condition),
                    tree_order(value)
                ));
            }
            if let Some(otherwise) = otherwise {
                order.push_str(&format!(" ELSE {}", tree_order(otherwise)));
            }
            order.push_str(" END)");
            order
        }
        ExprKind::Alias { inner, .. } => tree_order(inner),
    };
    order.to_uppercase()
}

fn literal_order(literal: &Literal) -> String {
    match literal {
        Literal::Null => String::from("NULL"),
        Literal::Bool(b) => b.to_string(),
        Literal::Int(n) if *n < 0 => format!("(- {})", n.unsigned_abs()),
        Literal::Int(n) => n.to_string(),
        Literal::Float(f) if *f < 0.0 => format!("(- {})", float_order(-f)),
        Literal::Float(f) => float_order(*f),
        Literal::String(s) => format!("'{}'", s.replace('\'', "''")),
    }
}

fn float_order(f: f64) -> String {
    let spelled = f.to_string();
    if spelled.contains('.') {
        spelled
    } else {
        format!("{spelled}.0")
    }
}

/// Asserts that re-parsing the rendered expression yields the tree's
/// evaluation order.
pub fn assert_reparses(dialect: &dyn Dialect, expr: &Expr, rendered: &str) {
    let parsed = parse_projected(dialect, rendered);
    assert_eq!(
        parsed_order(&parsed),
        tree_order(expr),
        "Evaluation order changed.\n  Rendered: {rendered}"
    );
}

/// Renders a query and checks that it parses as BigQuery SQL.
pub fn bigquery_sql(query: &Query) -> String {
    let sql = query.sql();
    parse_bigquery(&sql);
    sql
}
