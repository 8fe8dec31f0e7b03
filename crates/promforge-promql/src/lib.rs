//! Composable PromQL expression trees that render to canonical strings.
//!
//! `promforge-promql` builds PromQL for generated alerting and recording
//! rules out of typed values instead of format strings. Expressions are
//! immutable trees; rendering is [`std::fmt::Display`]; binary nodes
//! parenthesize themselves unconditionally so a rendered tree re-parses
//! with the shape it was built with.
//!
//! # Features
//!
//! - **Selectors**: Instant and range vectors with label matchers and
//!   offsets
//! - **Functions**: Constructors for the common functions (`rate`,
//!   `increase`, `histogram_quantile`, …) plus an escape hatch for the
//!   rest
//! - **Aggregations**: `sum`/`avg`/`topk`/… with `by`/`without`
//!   modifiers, mutually exclusive by construction
//! - **Binary operations**: Arithmetic, comparison, and set operators
//!   with `on`/`ignoring` vector matching
//! - **Percentile helpers**: `p50`/`p90`/`p95`/`p99` expanding to
//!   `histogram_quantile`
//!
//! # Example
//!
//! ```rust
//! use promforge_core::Duration;
//! use promforge_promql::{rate, sum, Expr, VectorSelector};
//!
//! let window = Duration::from_minutes(5);
//! let errors = sum(rate(VectorSelector::new("http_errors_total").range(window)))
//!     .by(["service"]);
//! let total = sum(rate(VectorSelector::new("http_requests_total").range(window)))
//!     .by(["service"]);
//!
//! let ratio = Expr::from(errors).div(total);
//! assert_eq!(
//!     ratio.to_string(),
//!     "(sum by (service) (rate(http_errors_total[5m])) / \
//!      sum by (service) (rate(http_requests_total[5m])))"
//! );
//! ```

#![forbid(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/promforge-promql/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod aggregate;
pub mod binary;
pub mod expr;
pub mod functions;
pub mod selector;

// Re-export main types at crate root
pub use aggregate::{
    avg, bottomk, count, max, min, quantile, stddev, sum, topk, AggregateModifier, AggregateOp,
    Aggregation,
};
pub use binary::{BinaryExpr, BinaryOp, VectorMatching};
pub use expr::Expr;
pub use functions::{
    abs, absent, avg_over_time, ceil, clamp_max, clamp_min, count_over_time, delta, floor,
    histogram_quantile, increase, irate, label_replace, last_over_time, max_over_time,
    min_over_time, p50, p90, p95, p99, predict_linear, rate, round, sum_over_time, time, vector,
    FunctionCall,
};
pub use selector::{RangeSelector, VectorSelector};

// Duration and matcher types appear throughout the API surface.
pub use promforge_core::{Duration, LabelMatcher};
