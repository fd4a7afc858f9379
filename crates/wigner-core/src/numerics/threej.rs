//! Wigner 3j symbol series by Schulten-Gordon bidirectional recursion.
//!
//! [`wigner_3j_l`] fixes `(l2, l3, m2, m3)` and fills the series over every
//! admissible `l1`; [`wigner_3j_m`] fixes `(l1, l2, l3, m1)` and fills the
//! series over every admissible `m2`. Both recurse forward from the lower
//! endpoint while the transfer coefficient magnitude decreases, recurse
//! backward from the upper endpoint, match the two unnormalized branches on
//! a three-point overlap, and rescale so the series satisfies the 3j
//! orthogonality sum and the Condon-Shortley sign of the last coefficient.
//! [`wigner_3j`] is the closed-form single-symbol evaluator over doubled
//! integer quantum numbers, usable as an independent cross-check for
//! moderate arguments.

use crate::common::{is_near_integer, parity_phase, step_count};

const TINY: f64 = 1.0e-300;
const SRTINY: f64 = 1.0e-150;
const BIG: f64 = 1.0e300;
const SRBIG: f64 = 1.0e150;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreeJOverLInput {
    pub l2: f64,
    pub l3: f64,
    pub m2: f64,
    pub m3: f64,
}

impl ThreeJOverLInput {
    pub fn new(l2: f64, l3: f64, m2: f64, m3: f64) -> Self {
        Self { l2, l3, m2, m3 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreeJOverMInput {
    pub l1: f64,
    pub l2: f64,
    pub l3: f64,
    pub m1: f64,
}

impl ThreeJOverMInput {
    pub fn new(l1: f64, l2: f64, l3: f64, m1: f64) -> Self {
        Self { l1, l2, l3, m1 }
    }
}

/// Coefficient series over the admissible range of the free index.
///
/// `coefficients[i]` holds the 3j symbol at free index `min + i`; the buffer
/// spans `[min, max]` inclusive in unit steps.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ThreeJSeries {
    pub min: f64,
    pub max: f64,
    pub coefficients: Vec<f64>,
}

impl ThreeJSeries {
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Free-index value of entry `index`.
    pub fn index_value(&self, index: usize) -> f64 {
        self.min + index as f64
    }

    pub fn into_coefficients(self) -> Vec<f64> {
        self.coefficients
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ThreeJError {
    #[error("projection magnitude exceeds its angular momentum: l = {l}, m = {m}")]
    MagnitudeExceedsL { l: f64, m: f64 },
    #[error("l + |m| must be integer-valued, got {value}")]
    NonIntegerParity { value: f64 },
    #[error("triangle rule |l1 - l2| <= l3 <= l1 + l2 violated: l1 = {l1}, l2 = {l2}, l3 = {l3}")]
    TriangleViolation { l1: f64, l2: f64, l3: f64 },
    #[error("l1 + l2 + l3 must be integer-valued, got {value}")]
    NonIntegerSum { value: f64 },
    #[error("recursion range must span an integer number of steps: min = {min}, max = {max}")]
    NonIntegerRange { min: f64, max: f64 },
    #[error("recursion range is empty: min = {min}, max = {max}")]
    EmptyRange { min: f64, max: f64 },
}

pub trait ThreeJSeriesApi {
    fn wigner_3j_l(&self, input: ThreeJOverLInput) -> Result<ThreeJSeries, ThreeJError>;
    fn wigner_3j_m(&self, input: ThreeJOverMInput) -> Result<ThreeJSeries, ThreeJError>;
}

/// Evaluates `3j(l1, l2, l3; m1, m2, m3)` for every admissible `l1`.
///
/// The admissible range is `l1min = max(|l2 - l3|, |m2 + m3|)` through
/// `l1max = l2 + l3`, with `m1 = -m2 - m3` implied. The returned buffer is
/// ordered by increasing `l1`.
pub fn wigner_3j_l(input: ThreeJOverLInput) -> Result<ThreeJSeries, ThreeJError> {
    let ThreeJOverLInput { l2, l3, m2, m3 } = input;

    if l2 < m2.abs() {
        return Err(ThreeJError::MagnitudeExceedsL { l: l2, m: m2 });
    }
    if l3 < m3.abs() {
        return Err(ThreeJError::MagnitudeExceedsL { l: l3, m: m3 });
    }
    if !is_near_integer(l2 + m2.abs()) {
        return Err(ThreeJError::NonIntegerParity { value: l2 + m2.abs() });
    }
    if !is_near_integer(l3 + m3.abs()) {
        return Err(ThreeJError::NonIntegerParity { value: l3 + m3.abs() });
    }

    let m1 = -m2 - m3;
    let l1min = (l2 - l3).abs().max(m1.abs());
    let l1max = l2 + l3;
    if !is_near_integer(l1max - l1min) {
        return Err(ThreeJError::NonIntegerRange {
            min: l1min,
            max: l1max,
        });
    }
    if l1max < l1min {
        return Err(ThreeJError::EmptyRange {
            min: l1min,
            max: l1max,
        });
    }

    let kernel = OverLKernel { l2, l3, m1, m2, m3 };
    let coefficients = evaluate_series(&kernel, l1min, step_count(l1min, l1max));
    Ok(ThreeJSeries {
        min: l1min,
        max: l1max,
        coefficients,
    })
}

/// Evaluates `3j(l1, l2, l3; m1, m2, m3)` for every admissible `m2`.
///
/// The admissible range is `m2min = max(-l2, -l3 - m1)` through
/// `m2max = min(l2, l3 - m1)`, with `m3 = -m1 - m2` implied. The returned
/// buffer is ordered by increasing `m2`.
pub fn wigner_3j_m(input: ThreeJOverMInput) -> Result<ThreeJSeries, ThreeJError> {
    let ThreeJOverMInput { l1, l2, l3, m1 } = input;

    if l1 < m1.abs() {
        return Err(ThreeJError::MagnitudeExceedsL { l: l1, m: m1 });
    }
    if !is_near_integer(l1 + m1.abs()) {
        return Err(ThreeJError::NonIntegerParity { value: l1 + m1.abs() });
    }
    if l3 < (l1 - l2).abs() || l3 > l1 + l2 {
        return Err(ThreeJError::TriangleViolation { l1, l2, l3 });
    }
    if !is_near_integer(l1 + l2 + l3) {
        return Err(ThreeJError::NonIntegerSum {
            value: l1 + l2 + l3,
        });
    }

    let m2min = (-l2).max(-l3 - m1);
    let m2max = l2.min(l3 - m1);
    if !is_near_integer(m2max - m2min) {
        return Err(ThreeJError::NonIntegerRange {
            min: m2min,
            max: m2max,
        });
    }
    if m2max < m2min {
        return Err(ThreeJError::EmptyRange {
            min: m2min,
            max: m2max,
        });
    }

    let kernel = OverMKernel { l1, l2, l3, m1 };
    let coefficients = evaluate_series(&kernel, m2min, step_count(m2min, m2max));
    Ok(ThreeJSeries {
        min: m2min,
        max: m2max,
        coefficients,
    })
}

/// Three-term recursion `alpha(v) f(v+1) + beta(v) f(v) + gamma(v) f(v-1) = 0`
/// presented as the generation coefficients the series engine consumes.
trait RecursionKernel {
    /// `(c1, c2)` such that `f(v) = c1 f(v-1) + c2 f(v-2)`, from the
    /// relation centered at `v - 1`.
    fn forward_step(&self, v: f64) -> (f64, f64);
    /// `(c1, c2)` such that `f(v) = c1 f(v+1) + c2 f(v+2)`, from the
    /// relation centered at `v + 1`.
    fn backward_step(&self, v: f64) -> (f64, f64);
    /// Weight of `f(v)^2` in the orthogonality normalization sum.
    fn weight(&self, v: f64) -> f64;
    /// Condon-Shortley sign of the coefficient at the upper endpoint.
    fn last_sign(&self) -> f64;
}

/// Recursion over `l1` with `(l2, l3, m1, m2, m3)` fixed.
struct OverLKernel {
    l2: f64,
    l3: f64,
    m1: f64,
    m2: f64,
    m3: f64,
}

impl OverLKernel {
    /// Off-diagonal coefficient, zero exactly at both domain boundaries.
    fn offdiag(&self, l1: f64) -> f64 {
        let a1 = (l1 + self.l2 + self.l3 + 1.0)
            * (-l1 + self.l2 + self.l3 + 1.0)
            * (l1 - self.l2 + self.l3)
            * (l1 + self.l2 - self.l3);
        let a2 = (l1 + self.m1) * (l1 - self.m1);
        (a1 * a2).sqrt()
    }

    fn diag(&self, l1: f64) -> f64 {
        let spread = self.l2 * (self.l2 + 1.0) - self.l3 * (self.l3 + 1.0);
        (2.0 * l1 + 1.0) * (-self.m1 * spread + (self.m3 - self.m2) * l1 * (l1 + 1.0))
    }
}

impl RecursionKernel for OverLKernel {
    fn forward_step(&self, v: f64) -> (f64, f64) {
        let newfac = self.offdiag(v);
        if v < 1.25 {
            // l1 = 1 step out of l1min = 0 (l2 = l3, m1 = 0): the shared
            // factor l1 is cancelled analytically from diag and denominator.
            let c1 = (2.0 * v - 1.0) * v * (self.m2 - self.m3) / newfac;
            return (c1, 0.0);
        }
        let denom = (v - 1.0) * newfac;
        (
            -self.diag(v - 1.0) / denom,
            -v * self.offdiag(v - 1.0) / denom,
        )
    }

    fn backward_step(&self, v: f64) -> (f64, f64) {
        let denom = (v + 2.0) * self.offdiag(v + 1.0);
        (
            -self.diag(v + 1.0) / denom,
            -(v + 1.0) * self.offdiag(v + 2.0) / denom,
        )
    }

    fn weight(&self, v: f64) -> f64 {
        2.0 * v + 1.0
    }

    fn last_sign(&self) -> f64 {
        parity_phase(self.l2 - self.l3 + self.m2 + self.m3)
    }
}

/// Recursion over `m2` with `(l1, l2, l3, m1)` fixed; `m3 = -m1 - m2`.
struct OverMKernel {
    l1: f64,
    l2: f64,
    l3: f64,
    m1: f64,
}

impl OverMKernel {
    fn offdiag(&self, m2: f64) -> f64 {
        let m3 = -self.m1 - m2;
        ((self.l2 - m2 + 1.0)
            * (self.l2 + m2)
            * (self.l3 + m3 + 1.0)
            * (self.l3 - m3))
            .sqrt()
    }

    fn diag(&self, m2: f64) -> f64 {
        let m3 = -self.m1 - m2;
        self.l2 * (self.l2 + 1.0) + self.l3 * (self.l3 + 1.0) - self.l1 * (self.l1 + 1.0)
            + 2.0 * m2 * m3
    }
}

impl RecursionKernel for OverMKernel {
    fn forward_step(&self, v: f64) -> (f64, f64) {
        let newfac = self.offdiag(v);
        (
            -self.diag(v - 1.0) / newfac,
            -self.offdiag(v - 1.0) / newfac,
        )
    }

    fn backward_step(&self, v: f64) -> (f64, f64) {
        let newfac = self.offdiag(v + 1.0);
        (
            -self.diag(v + 1.0) / newfac,
            -self.offdiag(v + 2.0) / newfac,
        )
    }

    fn weight(&self, _v: f64) -> f64 {
        2.0 * self.l1 + 1.0
    }

    fn last_sign(&self) -> f64 {
        parity_phase(self.l2 - self.l3 - self.m1)
    }
}

/// Runs the bidirectional recursion over `n` unit steps starting at `vmin`
/// and returns the normalized, sign-fixed series.
fn evaluate_series<K: RecursionKernel>(kernel: &K, vmin: f64, n: usize) -> Vec<f64> {
    let convention = kernel.last_sign();
    if n == 1 {
        return vec![convention / kernel.weight(vmin).sqrt()];
    }

    let mut values = vec![0.0; n];

    // Forward branch from the lower endpoint on an arbitrary tiny scale.
    // `sum_forward` trails one entry behind `running` so that at the switch
    // point it covers exactly the entries the forward branch contributes.
    values[0] = SRTINY;
    let mut running = kernel.weight(vmin) * TINY;
    let mut sum_forward = 0.0;
    let mut c1_prev = 0.0;
    let mut last = 0usize;

    for idx in 1..n {
        let v = vmin + idx as f64;
        let (c1, c2) = kernel.forward_step(v);
        let x = if idx == 1 {
            c1 * values[0]
        } else {
            c1 * values[idx - 1] + c2 * values[idx - 2]
        };
        values[idx] = x;
        last = idx;
        sum_forward = running;
        running += kernel.weight(v) * x * x;
        if idx == n - 1 {
            break;
        }
        if x.abs() >= SRBIG {
            for value in &mut values[..=idx] {
                if value.abs() < SRTINY {
                    *value = 0.0;
                }
                *value /= SRBIG;
            }
            running /= BIG;
            sum_forward /= BIG;
        }
        // Forward recursion is stable while the magnitudes grow; once the
        // transfer coefficient stops shrinking the classical region has been
        // reached and the remaining entries come from the backward branch.
        if idx >= 2 && c1.abs() > c1_prev {
            break;
        }
        c1_prev = c1.abs();
    }

    let sum_unnormalized;
    if n == 2 {
        sum_unnormalized = running;
    } else {
        // Backward branch from the upper endpoint, overlapping the forward
        // branch at indices last, last-1, last-2.
        let x1 = values[last];
        let x2 = values[last - 1];
        let x3 = values[last - 2];

        let vmax = vmin + (n - 1) as f64;
        values[n - 1] = SRTINY;
        let mut running_back = kernel.weight(vmax) * TINY;
        let mut sum_backward = 0.0;
        let mut y3 = 0.0;

        for k in ((last - 2)..=(n - 2)).rev() {
            let v = vmin + k as f64;
            let (c1, c2) = kernel.backward_step(v);
            let y = if k == n - 2 {
                c1 * values[n - 1]
            } else {
                c1 * values[k + 1] + c2 * values[k + 2]
            };
            if k == last - 2 {
                y3 = y;
                break;
            }
            values[k] = y;
            sum_backward = running_back;
            running_back += kernel.weight(v) * y * y;
            if y.abs() >= SRBIG {
                for value in &mut values[k..] {
                    if value.abs() < SRTINY {
                        *value = 0.0;
                    }
                    *value /= SRBIG;
                }
                running_back /= BIG;
                sum_backward /= BIG;
            }
        }

        // Least-squares ratio between the branches over the overlap triple;
        // rescale whichever side carries the smaller dynamic range.
        let y1 = values[last];
        let y2 = values[last - 1];
        let ratio = (x1 * y1 + x2 * y2 + x3 * y3) / (x1 * x1 + x2 * x2 + x3 * x3);
        if ratio.abs() >= 1.0 {
            for value in &mut values[..last - 1] {
                *value *= ratio;
            }
            sum_unnormalized = ratio * ratio * sum_forward + sum_backward;
        } else {
            let inverse = 1.0 / ratio;
            for value in &mut values[last - 1..] {
                *value *= inverse;
            }
            sum_unnormalized = sum_forward + inverse * inverse * sum_backward;
        }
    }

    let mut scale = 1.0 / sum_unnormalized.sqrt();
    if convention * values[n - 1] < 0.0 {
        scale = -scale;
    }
    if scale.abs() < 1.0 {
        // Entries too small to survive the rescale flush to exact zero.
        let threshold = TINY / scale.abs();
        for value in &mut values {
            if value.abs() < threshold {
                *value = 0.0;
            }
        }
    }
    for value in &mut values {
        *value *= scale;
    }

    values
}

/// Single Wigner 3j symbol over doubled quantum numbers (`two_j = 2j`, so
/// `two_j = 3` means `j = 3/2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wigner3jInput {
    pub two_j1: i32,
    pub two_j2: i32,
    pub two_j3: i32,
    pub two_m1: i32,
    pub two_m2: i32,
    pub two_m3: i32,
}

impl Wigner3jInput {
    pub fn new(
        two_j1: i32,
        two_j2: i32,
        two_j3: i32,
        two_m1: i32,
        two_m2: i32,
        two_m3: i32,
    ) -> Self {
        Self {
            two_j1,
            two_j2,
            two_j3,
            two_m1,
            two_m2,
            two_m3,
        }
    }
}

/// Closed-form Racah evaluation of one 3j coefficient.
///
/// Returns `0.0` when any selection rule fails. Log-factorials keep the
/// alternating sum representable, but the cancellation inherent in the
/// closed form limits this to moderate quantum numbers; the recursion
/// evaluators are the stable path for long series.
pub fn wigner_3j(input: Wigner3jInput) -> f64 {
    let Wigner3jInput {
        two_j1,
        two_j2,
        two_j3,
        two_m1,
        two_m2,
        two_m3,
    } = input;

    if two_j1 < 0 || two_j2 < 0 || two_j3 < 0 {
        return 0.0;
    }
    if two_m1 + two_m2 + two_m3 != 0 {
        return 0.0;
    }
    if two_m1.abs() > two_j1 || two_m2.abs() > two_j2 || two_m3.abs() > two_j3 {
        return 0.0;
    }
    if (two_j1 - two_m1).rem_euclid(2) != 0
        || (two_j2 - two_m2).rem_euclid(2) != 0
        || (two_j3 - two_m3).rem_euclid(2) != 0
    {
        return 0.0;
    }
    if (two_j1 + two_j2 + two_j3).rem_euclid(2) != 0 {
        return 0.0;
    }
    if two_j1 + two_j2 < two_j3 || two_j1 + two_j3 < two_j2 || two_j2 + two_j3 < two_j1 {
        return 0.0;
    }

    let halved = |doubled: i32| -> Option<i32> {
        if doubled.rem_euclid(2) != 0 {
            None
        } else {
            Some(doubled / 2)
        }
    };

    let triangle = [
        two_j1 + two_j2 - two_j3,
        two_j2 + two_j3 - two_j1,
        two_j3 + two_j1 - two_j2,
        two_j1 + two_m1,
        two_j1 - two_m1,
        two_j2 + two_m2,
        two_j2 - two_m2,
        two_j3 + two_m3,
        two_j3 - two_m3,
    ];
    let mut factors = [0i32; 9];
    for (slot, doubled) in factors.iter_mut().zip(triangle) {
        if doubled < 0 {
            return 0.0;
        }
        match halved(doubled) {
            Some(value) => *slot = value,
            None => return 0.0,
        }
    }

    let total = match halved(two_j1 + two_j2 + two_j3) {
        Some(value) => value,
        None => return 0.0,
    };
    let shift1 = match halved(two_j2 - two_j3 - two_m1) {
        Some(value) => value,
        None => return 0.0,
    };
    let shift2 = match halved(two_j1 - two_j3 + two_m2) {
        Some(value) => value,
        None => return 0.0,
    };

    let t_min = shift1.max(shift2).max(0);
    let t_max = factors[0].min(factors[4]).min(factors[5]);
    if t_min > t_max {
        return 0.0;
    }

    let mut log_factorial = LogFactorial::new();
    let mut prefactor_log = -log_factorial.value((total + 1) as usize);
    for factor in factors {
        prefactor_log += log_factorial.value(factor as usize);
    }
    prefactor_log *= 0.5;

    let mut sign = if t_min.rem_euclid(2) != 0 { -1.0 } else { 1.0 };
    let mut result = 0.0;
    for t in t_min..=t_max {
        let denominator_log = log_factorial.value(t as usize)
            + log_factorial.value((factors[0] - t) as usize)
            + log_factorial.value((factors[4] - t) as usize)
            + log_factorial.value((factors[5] - t) as usize)
            + log_factorial.value((t - shift1) as usize)
            + log_factorial.value((t - shift2) as usize);
        result += sign * (prefactor_log - denominator_log).exp();
        sign = -sign;
    }

    if (two_j1 - two_j2 - two_m3).rem_euclid(4) != 0 {
        result = -result;
    }

    result
}

struct LogFactorial {
    values: Vec<f64>,
}

impl LogFactorial {
    fn new() -> Self {
        Self { values: vec![0.0] }
    }

    /// `ln(n!)`, extending the memo table on demand.
    fn value(&mut self, n: usize) -> f64 {
        while self.values.len() <= n {
            let next = self.values.len();
            let previous = self.values[next - 1];
            self.values.push(previous + (next as f64).ln());
        }
        self.values[n]
    }
}
