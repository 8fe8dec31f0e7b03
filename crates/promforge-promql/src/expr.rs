//! The expression tree.

use std::fmt;

use crate::aggregate::Aggregation;
use crate::binary::{BinaryExpr, BinaryOp};
use crate::functions::FunctionCall;
use crate::selector::{RangeSelector, VectorSelector};

/// A PromQL expression.
///
/// A closed sum over the node kinds the renderer understands. Every node
/// is a value; composition builds trees and [`fmt::Display`] produces the
/// one canonical string for a tree. Binary nodes always parenthesize
/// themselves, so the rendered string re-parses to the same shape without
/// any precedence bookkeeping.
///
/// # Example
///
/// ```rust
/// use promforge_core::Duration;
/// use promforge_promql::{rate, sum, VectorSelector};
///
/// let errors = sum(rate(
///     VectorSelector::new("http_errors_total").range(Duration::from_minutes(5)),
/// ))
/// .by(["service"]);
/// assert_eq!(
///     errors.to_string(),
///     "sum by (service) (rate(http_errors_total[5m]))"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An opaque PromQL fragment emitted verbatim.
    Raw(String),
    /// A numeric literal.
    Scalar(f64),
    /// An instant vector selector.
    Vector(VectorSelector),
    /// A range vector selector.
    Range(RangeSelector),
    /// A function call.
    Call(FunctionCall),
    /// An aggregation over an inner expression.
    Aggregate(Aggregation),
    /// A binary operation between two expressions.
    Binary(Box<BinaryExpr>),
}

impl Expr {
    /// Wraps a raw PromQL fragment.
    ///
    /// The escape hatch for shapes the tree does not model, e.g.
    /// subqueries. The fragment is emitted verbatim, so the caller owns
    /// its validity.
    #[must_use]
    pub fn raw(fragment: impl Into<String>) -> Self {
        Self::Raw(fragment.into())
    }

    /// Wraps a numeric literal.
    #[must_use]
    pub const fn scalar(value: f64) -> Self {
        Self::Scalar(value)
    }

    /// Selects a bare metric by name.
    #[must_use]
    pub fn metric(name: impl Into<String>) -> Self {
        Self::Vector(VectorSelector::new(name))
    }

    fn binary(self, op: BinaryOp, rhs: impl Into<Self>) -> Self {
        BinaryExpr::new(self, op, rhs).into()
    }

    /// `(self + rhs)`.
    #[must_use]
    pub fn add(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Add, rhs)
    }

    /// `(self - rhs)`.
    #[must_use]
    pub fn sub(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Sub, rhs)
    }

    /// `(self * rhs)`.
    #[must_use]
    pub fn mul(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Mul, rhs)
    }

    /// `(self / rhs)`.
    #[must_use]
    pub fn div(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Div, rhs)
    }

    /// `(self % rhs)`.
    #[must_use]
    pub fn modulo(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Mod, rhs)
    }

    /// `(self ^ rhs)`.
    #[must_use]
    pub fn pow(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Pow, rhs)
    }

    /// `(self > rhs)`.
    #[must_use]
    pub fn gt(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Gt, rhs)
    }

    /// `(self < rhs)`.
    #[must_use]
    pub fn lt(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Lt, rhs)
    }

    /// `(self >= rhs)`.
    #[must_use]
    pub fn ge(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Ge, rhs)
    }

    /// `(self <= rhs)`.
    #[must_use]
    pub fn le(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Le, rhs)
    }

    /// `(self == rhs)`. Named to stay clear of [`PartialEq::eq`].
    #[must_use]
    pub fn eq_cmp(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Eq, rhs)
    }

    /// `(self != rhs)`. Named to stay clear of [`PartialEq::ne`].
    #[must_use]
    pub fn ne_cmp(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Ne, rhs)
    }

    /// `(self and rhs)`.
    #[must_use]
    pub fn and(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::And, rhs)
    }

    /// `(self or rhs)`.
    #[must_use]
    pub fn or(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Or, rhs)
    }

    /// `(self unless rhs)`.
    #[must_use]
    pub fn unless(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Unless, rhs)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(fragment) => f.write_str(fragment),
            // f64 Display is decimal, shortest round-trip, no exponent.
            Self::Scalar(value) => write!(f, "{value}"),
            Self::Vector(selector) => selector.fmt(f),
            Self::Range(selector) => selector.fmt(f),
            Self::Call(call) => call.fmt(f),
            Self::Aggregate(agg) => agg.fmt(f),
            Self::Binary(binary) => binary.fmt(f),
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<VectorSelector> for Expr {
    fn from(selector: VectorSelector) -> Self {
        Self::Vector(selector)
    }
}

impl From<RangeSelector> for Expr {
    fn from(selector: RangeSelector) -> Self {
        Self::Range(selector)
    }
}

impl From<FunctionCall> for Expr {
    fn from(call: FunctionCall) -> Self {
        Self::Call(call)
    }
}

impl From<Aggregation> for Expr {
    fn from(agg: Aggregation) -> Self {
        Self::Aggregate(agg)
    }
}

impl From<BinaryExpr> for Expr {
    fn from(binary: BinaryExpr) -> Self {
        Self::Binary(Box::new(binary))
    }
}

#[cfg(test)]
mod tests {
    use promforge_core::{Duration, LabelMatcher};
    use test_case::test_case;

    use crate::aggregate::sum;
    use crate::functions::rate;
    use crate::selector::VectorSelector;

    use super::*;

    // ========================================================================
    // Scalars
    // ========================================================================

    #[test_case(0.0, "0" ; "zero")]
    #[test_case(0.5, "0.5" ; "fraction")]
    #[test_case(100.0, "100" ; "integral drops point")]
    #[test_case(-1.0, "-1" ; "negative")]
    #[test_case(0.95, "0.95" ; "quantile")]
    #[test_case(1024.0, "1024" ; "large integral")]
    fn scalar_renders_plain_decimal(value: f64, expected: &str) {
        assert_eq!(Expr::scalar(value).to_string(), expected);
    }

    // ========================================================================
    // Raw fragments
    // ========================================================================

    #[test]
    fn raw_passes_through_verbatim() {
        let expr = Expr::raw("rate(x[5m:1m])");
        assert_eq!(expr.to_string(), "rate(x[5m:1m])");
    }

    // ========================================================================
    // Composition
    // ========================================================================

    #[test]
    fn error_ratio_composes_canonically() {
        let errors = sum(rate(
            VectorSelector::new("http_errors_total").range(Duration::from_minutes(5)),
        ))
        .by(["service"]);
        let total = sum(rate(
            VectorSelector::new("http_requests_total").range(Duration::from_minutes(5)),
        ))
        .by(["service"]);
        let ratio = Expr::from(errors).div(total);
        assert_eq!(
            ratio.to_string(),
            "(sum by (service) (rate(http_errors_total[5m])) / \
             sum by (service) (rate(http_requests_total[5m])))"
        );
    }

    #[test]
    fn comparison_against_scalar() {
        let expr = Expr::metric("up").eq_cmp(0.0);
        assert_eq!(expr.to_string(), "(up == 0)");
    }

    #[test]
    fn nested_binaries_keep_build_shape() {
        let expr = Expr::metric("a").add(Expr::metric("b")).mul(Expr::metric("c"));
        assert_eq!(expr.to_string(), "((a + b) * c)");
    }

    #[test]
    fn selector_with_matchers_embeds_in_call() {
        let expr = rate(
            VectorSelector::new("http_requests_total")
                .with_matcher(LabelMatcher::eq("job", "api"))
                .range(Duration::from_minutes(1)),
        );
        assert_eq!(expr.to_string(), "rate(http_requests_total{job=\"api\"}[1m])");
    }
}
