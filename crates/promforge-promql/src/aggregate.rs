//! Aggregations over instant vectors.

use std::fmt;

use crate::expr::Expr;

/// The aggregation operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    /// Sum over dimensions.
    Sum,
    /// Average over dimensions.
    Avg,
    /// Minimum over dimensions.
    Min,
    /// Maximum over dimensions.
    Max,
    /// Count of series.
    Count,
    /// Population standard deviation.
    Stddev,
    /// Largest `k` series by value; takes a scalar parameter.
    Topk,
    /// Smallest `k` series by value; takes a scalar parameter.
    Bottomk,
    /// φ-quantile over dimensions; takes a scalar parameter.
    Quantile,
}

impl AggregateOp {
    /// Returns the operator keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
            Self::Count => "count",
            Self::Stddev => "stddev",
            Self::Topk => "topk",
            Self::Bottomk => "bottomk",
            Self::Quantile => "quantile",
        }
    }
}

/// Label-list modifier on an aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateModifier {
    /// Keep only the listed labels (`by`).
    By(Vec<String>),
    /// Drop the listed labels (`without`).
    Without(Vec<String>),
}

/// An aggregation over an inner expression.
///
/// Renders as `op(inner)`, or `op by (l1,l2) (inner)` with a modifier.
/// Parameterized operators put the parameter first: `topk(5,inner)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// The operator.
    pub op: AggregateOp,
    /// Scalar parameter for `topk`, `bottomk`, and `quantile`.
    pub param: Option<Box<Expr>>,
    /// The aggregated expression.
    pub expr: Box<Expr>,
    /// Optional `by`/`without` modifier. Setting one replaces the other.
    pub modifier: Option<AggregateModifier>,
}

impl Aggregation {
    /// Creates an aggregation without parameter or modifier.
    #[must_use]
    pub fn new(op: AggregateOp, expr: impl Into<Expr>) -> Self {
        Self {
            op,
            param: None,
            expr: Box::new(expr.into()),
            modifier: None,
        }
    }

    /// Sets the scalar parameter.
    #[must_use]
    pub fn with_param(mut self, param: impl Into<Expr>) -> Self {
        self.param = Some(Box::new(param.into()));
        self
    }

    /// Aggregates over exactly the listed labels (`by`).
    #[must_use]
    pub fn by<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifier = Some(AggregateModifier::By(
            labels.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Aggregates over all labels except the listed ones (`without`).
    #[must_use]
    pub fn without<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifier = Some(AggregateModifier::Without(
            labels.into_iter().map(Into::into).collect(),
        ));
        self
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.op.as_str())?;
        if let Some(modifier) = &self.modifier {
            match modifier {
                AggregateModifier::By(labels) => write!(f, " by ({})", labels.join(","))?,
                AggregateModifier::Without(labels) => {
                    write!(f, " without ({})", labels.join(","))?;
                }
            }
            f.write_str(" ")?;
        }
        f.write_str("(")?;
        if let Some(param) = &self.param {
            write!(f, "{param},")?;
        }
        write!(f, "{})", self.expr)
    }
}

/// Sums the inner expression over dimensions.
#[must_use]
pub fn sum(expr: impl Into<Expr>) -> Aggregation {
    Aggregation::new(AggregateOp::Sum, expr)
}

/// Averages the inner expression over dimensions.
#[must_use]
pub fn avg(expr: impl Into<Expr>) -> Aggregation {
    Aggregation::new(AggregateOp::Avg, expr)
}

/// Takes the minimum of the inner expression over dimensions.
#[must_use]
pub fn min(expr: impl Into<Expr>) -> Aggregation {
    Aggregation::new(AggregateOp::Min, expr)
}

/// Takes the maximum of the inner expression over dimensions.
#[must_use]
pub fn max(expr: impl Into<Expr>) -> Aggregation {
    Aggregation::new(AggregateOp::Max, expr)
}

/// Counts the series of the inner expression.
#[must_use]
pub fn count(expr: impl Into<Expr>) -> Aggregation {
    Aggregation::new(AggregateOp::Count, expr)
}

/// Takes the population standard deviation over dimensions.
#[must_use]
pub fn stddev(expr: impl Into<Expr>) -> Aggregation {
    Aggregation::new(AggregateOp::Stddev, expr)
}

/// Keeps the `k` largest series by value.
#[must_use]
pub fn topk(k: f64, expr: impl Into<Expr>) -> Aggregation {
    Aggregation::new(AggregateOp::Topk, expr).with_param(Expr::Scalar(k))
}

/// Keeps the `k` smallest series by value.
#[must_use]
pub fn bottomk(k: f64, expr: impl Into<Expr>) -> Aggregation {
    Aggregation::new(AggregateOp::Bottomk, expr).with_param(Expr::Scalar(k))
}

/// Computes the φ-quantile over dimensions.
#[must_use]
pub fn quantile(phi: f64, expr: impl Into<Expr>) -> Aggregation {
    Aggregation::new(AggregateOp::Quantile, expr).with_param(Expr::Scalar(phi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_without_modifier_without_space() {
        assert_eq!(sum(Expr::metric("up")).to_string(), "sum(up)");
    }

    #[test]
    fn by_renders_with_single_spaces() {
        let agg = sum(Expr::metric("up")).by(["job", "instance"]);
        assert_eq!(agg.to_string(), "sum by (job,instance) (up)");
    }

    #[test]
    fn without_renders_with_single_spaces() {
        let agg = avg(Expr::metric("up")).without(["pod"]);
        assert_eq!(agg.to_string(), "avg without (pod) (up)");
    }

    #[test]
    fn by_replaces_without() {
        let agg = sum(Expr::metric("up")).without(["pod"]).by(["job"]);
        assert_eq!(
            agg.modifier,
            Some(AggregateModifier::By(vec!["job".to_string()]))
        );
    }

    #[test]
    fn parameter_renders_first() {
        assert_eq!(topk(5.0, Expr::metric("up")).to_string(), "topk(5,up)");
        assert_eq!(
            quantile(0.9, Expr::metric("up")).by(["job"]).to_string(),
            "quantile by (job) (0.9,up)"
        );
    }
}
