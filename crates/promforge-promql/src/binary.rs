//! Binary operations between expressions.

use std::fmt;

use crate::expr::Expr;

/// Binary operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition (`+`).
    Add,
    /// Subtraction (`-`).
    Sub,
    /// Multiplication (`*`).
    Mul,
    /// Division (`/`).
    Div,
    /// Modulo (`%`).
    Mod,
    /// Exponentiation (`^`).
    Pow,
    /// Equality comparison (`==`).
    Eq,
    /// Inequality comparison (`!=`).
    Ne,
    /// Greater than (`>`).
    Gt,
    /// Less than (`<`).
    Lt,
    /// Greater or equal (`>=`).
    Ge,
    /// Less or equal (`<=`).
    Le,
    /// Set intersection (`and`).
    And,
    /// Set union (`or`).
    Or,
    /// Set difference (`unless`).
    Unless,
}

impl BinaryOp {
    /// Returns the operator token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::And => "and",
            Self::Or => "or",
            Self::Unless => "unless",
        }
    }
}

/// Vector-matching modifier on a binary operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VectorMatching {
    /// Match series on exactly the listed labels (`on`).
    On(Vec<String>),
    /// Match series on all labels except the listed ones (`ignoring`).
    Ignoring(Vec<String>),
}

/// A binary operation between two expressions.
///
/// Rendering always wraps the result in parentheses. Nested compositions
/// therefore re-parse with the shape they were built with, and no
/// precedence analysis is needed anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    /// Left operand.
    pub left: Expr,
    /// Operator token.
    pub op: BinaryOp,
    /// Right operand.
    pub right: Expr,
    /// Optional `on`/`ignoring` modifier. Setting one replaces the other.
    pub matching: Option<VectorMatching>,
}

impl BinaryExpr {
    /// Creates a binary operation without a matching modifier.
    #[must_use]
    pub fn new(left: impl Into<Expr>, op: BinaryOp, right: impl Into<Expr>) -> Self {
        Self {
            left: left.into(),
            op,
            right: right.into(),
            matching: None,
        }
    }

    /// Matches series on exactly the listed labels.
    #[must_use]
    pub fn on<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matching = Some(VectorMatching::On(
            labels.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Matches series on all labels except the listed ones.
    #[must_use]
    pub fn ignoring<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matching = Some(VectorMatching::Ignoring(
            labels.into_iter().map(Into::into).collect(),
        ));
        self
    }
}

impl fmt::Display for BinaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {}", self.left, self.op.as_str())?;
        if let Some(matching) = &self.matching {
            match matching {
                VectorMatching::On(labels) => write!(f, " on ({})", labels.join(","))?,
                VectorMatching::Ignoring(labels) => {
                    write!(f, " ignoring ({})", labels.join(","))?;
                }
            }
        }
        write!(f, " {})", self.right)
    }
}

#[cfg(test)]
mod tests {
    use crate::expr::Expr;

    use super::*;

    #[test]
    fn renders_with_outer_parens() {
        let expr = BinaryExpr::new(Expr::metric("a"), BinaryOp::Div, Expr::metric("b"));
        assert_eq!(expr.to_string(), "(a / b)");
    }

    #[test]
    fn on_interposes_after_operator() {
        let expr = BinaryExpr::new(Expr::metric("a"), BinaryOp::Mul, Expr::metric("b"))
            .on(["instance", "job"]);
        assert_eq!(expr.to_string(), "(a * on (instance,job) b)");
    }

    #[test]
    fn ignoring_interposes_after_operator() {
        let expr = BinaryExpr::new(Expr::metric("a"), BinaryOp::Sub, Expr::metric("b"))
            .ignoring(["pod"]);
        assert_eq!(expr.to_string(), "(a - ignoring (pod) b)");
    }

    #[test]
    fn on_replaces_ignoring() {
        let expr = BinaryExpr::new(Expr::metric("a"), BinaryOp::Add, Expr::metric("b"))
            .ignoring(["pod"])
            .on(["job"]);
        assert_eq!(expr.matching, Some(VectorMatching::On(vec!["job".to_string()])));
    }

    #[test]
    fn set_operators_use_keywords() {
        let expr = BinaryExpr::new(Expr::metric("a"), BinaryOp::Unless, Expr::metric("b"));
        assert_eq!(expr.to_string(), "(a unless b)");
    }

    #[test]
    fn nesting_preserves_shape() {
        let inner = BinaryExpr::new(Expr::metric("a"), BinaryOp::Add, Expr::metric("b"));
        let outer = BinaryExpr::new(Expr::from(inner), BinaryOp::Add, Expr::metric("c"));
        assert_eq!(outer.to_string(), "((a + b) + c)");
    }
}
