//! Function calls and constructors for the common PromQL functions.

use std::fmt;

use crate::expr::Expr;

/// A PromQL function call.
///
/// Renders as `name(arg1,arg2)` with no spaces. Arguments render
/// recursively, so any expression shape can appear in any position.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// The function name.
    pub name: String,
    /// Ordered arguments.
    pub args: Vec<Expr>,
}

impl FunctionCall {
    /// Creates a call with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<Expr>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        f.write_str("(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Call(FunctionCall {
        name: name.to_string(),
        args,
    })
}

/// `rate(v)`:per-second average increase of a counter over the window.
#[must_use]
pub fn rate(range: impl Into<Expr>) -> Expr {
    call("rate", vec![range.into()])
}

/// `irate(v)`:instant rate from the last two samples in the window.
#[must_use]
pub fn irate(range: impl Into<Expr>) -> Expr {
    call("irate", vec![range.into()])
}

/// `increase(v)`:total increase of a counter over the window.
#[must_use]
pub fn increase(range: impl Into<Expr>) -> Expr {
    call("increase", vec![range.into()])
}

/// `delta(v)`:difference between first and last sample of a gauge.
#[must_use]
pub fn delta(range: impl Into<Expr>) -> Expr {
    call("delta", vec![range.into()])
}

/// `avg_over_time(v)`:average of all samples in the window.
#[must_use]
pub fn avg_over_time(range: impl Into<Expr>) -> Expr {
    call("avg_over_time", vec![range.into()])
}

/// `min_over_time(v)`:minimum of all samples in the window.
#[must_use]
pub fn min_over_time(range: impl Into<Expr>) -> Expr {
    call("min_over_time", vec![range.into()])
}

/// `max_over_time(v)`:maximum of all samples in the window.
#[must_use]
pub fn max_over_time(range: impl Into<Expr>) -> Expr {
    call("max_over_time", vec![range.into()])
}

/// `sum_over_time(v)`:sum of all samples in the window.
#[must_use]
pub fn sum_over_time(range: impl Into<Expr>) -> Expr {
    call("sum_over_time", vec![range.into()])
}

/// `count_over_time(v)`:number of samples in the window.
#[must_use]
pub fn count_over_time(range: impl Into<Expr>) -> Expr {
    call("count_over_time", vec![range.into()])
}

/// `last_over_time(v)`:most recent sample in the window.
#[must_use]
pub fn last_over_time(range: impl Into<Expr>) -> Expr {
    call("last_over_time", vec![range.into()])
}

/// `clamp_min(v,min)`:clamps sample values to a lower bound.
#[must_use]
pub fn clamp_min(expr: impl Into<Expr>, min: f64) -> Expr {
    call("clamp_min", vec![expr.into(), Expr::Scalar(min)])
}

/// `clamp_max(v,max)`:clamps sample values to an upper bound.
#[must_use]
pub fn clamp_max(expr: impl Into<Expr>, max: f64) -> Expr {
    call("clamp_max", vec![expr.into(), Expr::Scalar(max)])
}

/// `absent(v)`:1 if the vector has no elements, empty otherwise.
#[must_use]
pub fn absent(expr: impl Into<Expr>) -> Expr {
    call("absent", vec![expr.into()])
}

/// `abs(v)`:absolute value of all sample values.
#[must_use]
pub fn abs(expr: impl Into<Expr>) -> Expr {
    call("abs", vec![expr.into()])
}

/// `ceil(v)`:rounds sample values up to the nearest integer.
#[must_use]
pub fn ceil(expr: impl Into<Expr>) -> Expr {
    call("ceil", vec![expr.into()])
}

/// `floor(v)`:rounds sample values down to the nearest integer.
#[must_use]
pub fn floor(expr: impl Into<Expr>) -> Expr {
    call("floor", vec![expr.into()])
}

/// `round(v)`:rounds sample values to the nearest integer.
#[must_use]
pub fn round(expr: impl Into<Expr>) -> Expr {
    call("round", vec![expr.into()])
}

/// `predict_linear(v,t)`:linear prediction `t` seconds from now.
#[must_use]
pub fn predict_linear(range: impl Into<Expr>, seconds: f64) -> Expr {
    call("predict_linear", vec![range.into(), Expr::Scalar(seconds)])
}

/// `label_replace(v,dst,replacement,src,regex)`:rewrites one label
/// from a regex capture over another.
#[must_use]
pub fn label_replace(
    expr: impl Into<Expr>,
    dst_label: impl Into<String>,
    replacement: impl Into<String>,
    src_label: impl Into<String>,
    regex: impl Into<String>,
) -> Expr {
    call(
        "label_replace",
        vec![
            expr.into(),
            Expr::Raw(format!("\"{}\"", dst_label.into())),
            Expr::Raw(format!("\"{}\"", replacement.into())),
            Expr::Raw(format!("\"{}\"", src_label.into())),
            Expr::Raw(format!("\"{}\"", regex.into())),
        ],
    )
}

/// `vector(s)`:turns a scalar into a single-element vector.
#[must_use]
pub fn vector(value: f64) -> Expr {
    call("vector", vec![Expr::Scalar(value)])
}

/// `time()`:evaluation timestamp in seconds.
#[must_use]
pub fn time() -> Expr {
    call("time", Vec::new())
}

/// `histogram_quantile(φ,v)`:φ-quantile from a classic histogram's
/// bucket counters.
#[must_use]
pub fn histogram_quantile(quantile: f64, expr: impl Into<Expr>) -> Expr {
    call("histogram_quantile", vec![Expr::Scalar(quantile), expr.into()])
}

/// Median over histogram buckets.
#[must_use]
pub fn p50(expr: impl Into<Expr>) -> Expr {
    histogram_quantile(0.5, expr)
}

/// 90th percentile over histogram buckets.
#[must_use]
pub fn p90(expr: impl Into<Expr>) -> Expr {
    histogram_quantile(0.9, expr)
}

/// 95th percentile over histogram buckets.
#[must_use]
pub fn p95(expr: impl Into<Expr>) -> Expr {
    histogram_quantile(0.95, expr)
}

/// 99th percentile over histogram buckets.
#[must_use]
pub fn p99(expr: impl Into<Expr>) -> Expr {
    histogram_quantile(0.99, expr)
}
