//! Expression rendering and parenthesization.
//!
//! An operand is wrapped when it binds more loosely than its parent, or
//! equally loosely in a position where the parent does not associate.

use super::Renderer;
use crate::ast::{
    Associativity, BinaryForm, Expr, ExprKind, Ident, Literal, ObjectName, UnaryForm, UnaryOp,
    ATOM_PRECEDENCE, COMPARISON_PRECEDENCE,
};

impl Renderer<'_> {
    /// Effective precedence of `expr` as an operand under this dialect.
    pub(crate) fn precedence(&self, expr: &Expr) -> u8 {
        match expr.kind() {
            // `-5` re-parses as a negation, so it binds like one.
            ExprKind::Literal(literal) if literal.is_negative() => UnaryOp::Neg.precedence(),
            ExprKind::Literal(_)
            | ExprKind::Column(_)
            | ExprKind::Function { .. }
            | ExprKind::Case { .. } => ATOM_PRECEDENCE,
            ExprKind::Unary { op, .. } => op.precedence(),
            ExprKind::Binary { op, .. } => match self.dialect.binary_form(*op) {
                BinaryForm::Function(_) => ATOM_PRECEDENCE,
                BinaryForm::Infix(_) => op.precedence(),
            },
            ExprKind::Between { .. } | ExprKind::InList { .. } => COMPARISON_PRECEDENCE,
            ExprKind::Alias { .. } => 0,
        }
    }

    pub(crate) fn write_expr(&self, out: &mut String, expr: &Expr) {
        match expr.kind() {
            ExprKind::Literal(literal) => self.write_literal(out, literal),
            ExprKind::Column(path) => self.write_object_name(out, path),
            ExprKind::Unary { op, operand } => {
                let wrap = self.precedence(operand) <= op.precedence();
                match op.form() {
                    UnaryForm::Prefix(template) => {
                        out.push_str(template);
                        self.write_operand(out, operand, wrap);
                    }
                    UnaryForm::Postfix(template) => {
                        self.write_operand(out, operand, wrap);
                        out.push_str(template);
                    }
                }
            }
            ExprKind::Binary { op, left, right } => match self.dialect.binary_form(*op) {
                BinaryForm::Function(name) => self.write_call(out, name, [left, right]),
                BinaryForm::Infix(template) => {
                    let precedence = op.precedence();
                    let left_precedence = self.precedence(left);
                    let wrap_left = left_precedence < precedence
                        || (left_precedence == precedence
                            && op.associativity() == Associativity::None);
                    let wrap_right = self.precedence(right) <= precedence;
                    self.write_operand(out, left, wrap_left);
                    out.push_str(template);
                    self.write_operand(out, right, wrap_right);
                }
            },
            ExprKind::Between {
                expr,
                low,
                high,
                negated,
            } => {
                self.write_comparison_operand(out, expr);
                out.push_str(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                self.write_comparison_operand(out, low);
                out.push_str(" AND ");
                self.write_comparison_operand(out, high);
            }
            ExprKind::InList {
                expr,
                list,
                negated,
            } => {
                self.write_comparison_operand(out, expr);
                out.push_str(if *negated { " NOT IN (" } else { " IN (" });
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_expr(out, item);
                }
                out.push(')');
            }
            ExprKind::Function { func, args } => self.write_call(out, func.name(), args),
            ExprKind::Case {
                branches,
                otherwise,
            } => {
                out.push_str("CASE");
                for (condition, value) in branches {
                    out.push_str(" WHEN ");
                    self.write_expr(out, condition);
                    out.push_str(" THEN ");
                    self.write_expr(out, value);
                }
                if let Some(otherwise) = otherwise {
                    out.push_str(" ELSE ");
                    self.write_expr(out, otherwise);
                }
                out.push_str(" END");
            }
            ExprKind::Alias { inner, name } => {
                self.write_expr(out, inner);
                out.push_str(" AS ");
                self.write_ident(out, name);
            }
        }
    }

    fn write_operand(&self, out: &mut String, operand: &Expr, wrap: bool) {
        if wrap {
            out.push('(');
            self.write_expr(out, operand);
            out.push(')');
        } else {
            self.write_expr(out, operand);
        }
    }

    /// `NAME(arg, ...)`. Arguments are delimited, so never wrapped.
    fn write_call<'e>(
        &self,
        out: &mut String,
        name: &str,
        args: impl IntoIterator<Item = &'e Expr>,
    ) {
        out.push_str(name);
        out.push('(');
        for (i, arg) in args.into_iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_expr(out, arg);
        }
        out.push(')');
    }

    fn write_comparison_operand(&self, out: &mut String, operand: &Expr) {
        let wrap = self.precedence(operand) <= COMPARISON_PRECEDENCE;
        self.write_operand(out, operand, wrap);
    }

    fn write_literal(&self, out: &mut String, literal: &Literal) {
        match literal {
            Literal::Null => out.push_str("NULL"),
            Literal::Bool(b) => out.push_str(self.dialect.boolean_literal(*b)),
            Literal::Int(n) => out.push_str(&n.to_string()),
            Literal::Float(f) if f.is_finite() => {
                let spelled = f.to_string();
                out.push_str(&spelled);
                // keep integral floats from reading as integers
                if !spelled.contains('.') {
                    out.push_str(".0");
                }
            }
            Literal::Float(f) => {
                let spelled = if f.is_nan() {
                    "NaN"
                } else if f.is_sign_positive() {
                    "inf"
                } else {
                    "-inf"
                };
                out.push_str("CAST('");
                out.push_str(spelled);
                out.push_str("' AS ");
                out.push_str(self.dialect.float_type());
                out.push(')');
            }
            Literal::String(s) => out.push_str(&self.dialect.string_literal(s)),
        }
    }

    pub(crate) fn write_object_name(&self, out: &mut String, name: &ObjectName) {
        for (i, segment) in name.segments().enumerate() {
            if i > 0 {
                out.push('.');
            }
            self.write_ident(out, segment);
        }
    }

    pub(crate) fn write_ident(&self, out: &mut String, ident: &Ident) {
        if ident.is_wildcard() {
            out.push('*');
        } else if ident.is_quoted() {
            out.push_str(&self.dialect.quote_style().quote(ident.value()));
        } else {
            out.push_str(&self.dialect.identifier(ident.value()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Function;
    use crate::dialect::GenericDialect;

    fn col(name: &str) -> Expr {
        Expr::column(name).unwrap()
    }

    fn sql(expr: &Expr) -> String {
        Renderer::default().expr(expr)
    }

    #[test]
    fn test_render_literals() {
        assert_eq!(sql(&Expr::literal(42)), "42");
        assert_eq!(sql(&Expr::literal(-7)), "-7");
        assert_eq!(sql(&Expr::literal(2.0)), "2.0");
        assert_eq!(sql(&Expr::literal(-3.0)), "-3.0");
        assert_eq!(sql(&Expr::literal(0.1)), "0.1");
        assert_eq!(sql(&Expr::literal(1e20)), "100000000000000000000.0");
        assert_eq!(sql(&Expr::literal(true)), "TRUE");
        assert_eq!(sql(&Expr::literal(None::<i64>)), "NULL");
        assert_eq!(sql(&Expr::literal("it's")), "'it\\'s'");
    }

    #[test]
    fn test_render_non_finite_floats() {
        assert_eq!(sql(&Expr::literal(f64::NAN)), "CAST('NaN' AS FLOAT64)");
        assert_eq!(sql(&Expr::literal(f64::INFINITY)), "CAST('inf' AS FLOAT64)");
        let generic = GenericDialect::new();
        assert_eq!(
            Renderer::new(&generic).expr(&Expr::literal(f64::NEG_INFINITY)),
            "CAST('-inf' AS DOUBLE PRECISION)"
        );
    }

    #[test]
    fn test_render_precedence() {
        let sum = col("a").add(col("b")).unwrap();
        assert_eq!(sql(&sum.clone().mul(col("c")).unwrap()), "(a + b) * c");
        assert_eq!(sql(&col("c").mul(sum.clone()).unwrap()), "c * (a + b)");
        assert_eq!(sql(&sum.clone().add(col("c")).unwrap()), "a + b + c");
        assert_eq!(sql(&col("c").sub(sum).unwrap()), "c - (a + b)");
        let product = col("a").mul(col("b")).unwrap();
        assert_eq!(sql(&product.add(col("c")).unwrap()), "a * b + c");
    }

    #[test]
    fn test_render_logical_precedence() {
        let either = col("a").or(col("b")).unwrap();
        assert_eq!(sql(&either.clone().and(col("c")).unwrap()), "(a OR b) AND c");
        let both = col("a").and(col("b")).unwrap();
        assert_eq!(sql(&both.clone().or(col("c")).unwrap()), "a AND b OR c");
        assert_eq!(sql(&both.not().unwrap()), "NOT (a AND b)");
        let cmp = col("a").eq(1).unwrap();
        assert_eq!(sql(&cmp.clone().not().unwrap()), "NOT a = 1");
        let negated = col("a").not().unwrap();
        assert_eq!(sql(&negated.eq(false).unwrap()), "(NOT a) = FALSE");
    }

    #[test]
    fn test_render_non_associative_comparisons() {
        let cmp = col("a").eq(col("b")).unwrap();
        assert_eq!(sql(&cmp.clone().eq(true).unwrap()), "(a = b) = TRUE");
        assert_eq!(sql(&Expr::literal(true).eq(cmp.clone()).unwrap()), "TRUE = (a = b)");
        assert_eq!(sql(&cmp.is_null().unwrap()), "(a = b) IS NULL");
    }

    #[test]
    fn test_render_negation() {
        assert_eq!(sql(&col("a").neg().unwrap()), "-a");
        assert_eq!(sql(&Expr::literal(-5).neg().unwrap()), "-(-5)");
        assert_eq!(sql(&col("a").neg().unwrap().neg().unwrap()), "-(-a)");
        assert_eq!(sql(&col("a").sub(-5).unwrap()), "a - -5");
        let product = col("a").mul(col("b")).unwrap();
        assert_eq!(sql(&product.neg().unwrap()), "-(a * b)");
        assert_eq!(sql(&Expr::literal(-2).mul(col("b")).unwrap()), "-2 * b");
    }

    #[test]
    fn test_render_modulo_by_dialect() {
        let sum = col("a").add(1).unwrap();
        let expr = sum.modulo(2).unwrap();
        assert_eq!(sql(&expr), "MOD(a + 1, 2)");
        let generic = GenericDialect::new();
        assert_eq!(Renderer::new(&generic).expr(&expr), "(a + 1) % 2");
        let scaled = expr.mul(3).unwrap();
        assert_eq!(sql(&scaled), "MOD(a + 1, 2) * 3");
    }

    #[test]
    fn test_render_between_and_in() {
        let expr = col("age").between(18, 65).unwrap();
        assert_eq!(sql(&expr), "age BETWEEN 18 AND 65");
        let expr = col("age").add(1).unwrap().not_between(col("lo"), col("hi")).unwrap();
        assert_eq!(sql(&expr), "age + 1 NOT BETWEEN lo AND hi");
        let expr = col("id").in_list([1, 2, 3]).unwrap();
        assert_eq!(sql(&expr), "id IN (1, 2, 3)");
        let expr = col("flag").eq(true).unwrap().not_in_list([true]).unwrap();
        assert_eq!(sql(&expr), "(flag = TRUE) NOT IN (TRUE)");
    }

    #[test]
    fn test_render_postfix_and_concat() {
        assert_eq!(sql(&col("a").is_not_null().unwrap()), "a IS NOT NULL");
        let sum = col("a").add(col("b")).unwrap();
        assert_eq!(sql(&sum.is_null().unwrap()), "a + b IS NULL");
        let name = col("first").concat(" ").unwrap().concat(col("last")).unwrap();
        assert_eq!(sql(&name), "first || ' ' || last");
        assert_eq!(sql(&col("name").like("A%").unwrap()), "name LIKE 'A%'");
    }

    #[test]
    fn test_render_functions() {
        let floor = col("a").floor_div(col("b")).unwrap();
        assert_eq!(sql(&floor), "FLOOR(a / b)");
        assert_eq!(sql(&col("a").floor_div(5).unwrap()), "FLOOR(a / 5)");
        let sum = col("a").add(1).unwrap();
        let floor = sum.floor_div(2).unwrap();
        assert_eq!(sql(&floor), "FLOOR((a + 1) / 2)");
        assert_eq!(sql(&floor.mul(3).unwrap()), "FLOOR((a + 1) / 2) * 3");
        let date = Expr::function(Function::CurrentDate, Vec::<Expr>::new()).unwrap();
        assert_eq!(sql(&date), "CURRENT_DATE()");
        let first = Expr::function(
            Function::Coalesce,
            [col("a"), col("b").add(1).unwrap(), Expr::literal(0)],
        )
        .unwrap();
        assert_eq!(sql(&first), "COALESCE(a, b + 1, 0)");
        let generic = GenericDialect::new();
        let modulo = Expr::function(Function::Mod, [col("a"), col("b")]).unwrap();
        assert_eq!(Renderer::new(&generic).expr(&modulo), "MOD(a, b)");
    }

    #[test]
    fn test_render_case() {
        let case = Expr::case([(col("a").gt(5).unwrap(), Expr::literal(0))], None).unwrap();
        assert_eq!(sql(&case), "CASE WHEN a > 5 THEN 0 END");
        let case = case
            .when(col("a").gt(100), 1)
            .unwrap()
            .otherwise(-1)
            .unwrap();
        assert_eq!(
            sql(&case),
            "CASE WHEN a > 5 THEN 0 WHEN a > 100 THEN 1 ELSE -1 END"
        );
        assert_eq!(
            sql(&case.clone().add(1).unwrap()),
            "CASE WHEN a > 5 THEN 0 WHEN a > 100 THEN 1 ELSE -1 END + 1"
        );
        assert_eq!(
            sql(&case.as_("bucket").unwrap()),
            "CASE WHEN a > 5 THEN 0 WHEN a > 100 THEN 1 ELSE -1 END AS bucket"
        );
    }

    #[test]
    fn test_render_alias_and_identifiers() {
        let diff = col("age").sub(col("years")).unwrap().as_("x").unwrap();
        assert_eq!(sql(&diff), "age - years AS x");
        assert_eq!(sql(&col("a b").as_("c").unwrap()), "`a b` AS c");
        assert_eq!(sql(&col("t1.*")), "t1.*");
        assert_eq!(sql(&col("`date`")), "`date`");
        assert_eq!(sql(&col("select")), "`select`");
        assert_eq!(sql(&col("my-project.ds.t")), "`my-project`.ds.t");
        assert_eq!(sql(&col("1st")), "`1st`");
    }
}
