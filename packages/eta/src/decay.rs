use crate::stream::{Stream, with_previous};

/// Estimate the ratio `a / b` of two accumulating quantities, favoring recent change.
///
/// Each tick computes, from the previous estimate `r` and the previous/current
/// values `(a, a')` and `(b, b')`:
/// ```txt
/// r' = (r*b + f*(a' - a)) / (b + f*(b' - b))
/// ```
/// starting with `r = 0` and both previous values at `0`.
///
/// With `f = 1` this is exactly `a' / b'`. A larger `f` weights the latest
/// increment more heavily (adapts faster, noisier), a smaller `f` smooths more.
///
/// When the denominator is `0` (or the result is not finite), the previous
/// estimate is kept. Callers still need to guard against reading the estimate
/// before `b` has moved, since the estimate is `0` until then.
pub fn decay<I: 'static>(factor: f64, a: Stream<I, f64>, b: Stream<I, f64>) -> Stream<I, f64> {
    with_previous(0.0, a)
        .zip(with_previous(0.0, b))
        .fold(0.0, move |&r, ((a, a1), (b, b1))| {
            let denominator = b + factor * (b1 - b);
            if denominator == 0.0 {
                return r;
            }
            let next = (r * b + factor * (a1 - a)) / denominator;
            if next.is_finite() { next } else { r }
        })
}
