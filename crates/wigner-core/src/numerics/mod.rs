pub mod legendre;
pub mod threej;
pub mod wigner_d;

pub use legendre::{LegendreApi, LegendreInput, legendre_p_l};
pub use threej::{
    ThreeJError, ThreeJOverLInput, ThreeJOverMInput, ThreeJSeries, ThreeJSeriesApi, Wigner3jInput,
    wigner_3j, wigner_3j_l, wigner_3j_m,
};
pub use wigner_d::{WignerDApi, WignerDInput, wigner_d_l};

fn kahan_add(sum: &mut f64, correction: &mut f64, value: f64) {
    let corrected = value - *correction;
    let next = *sum + corrected;
    *correction = (next - *sum) - corrected;
    *sum = next;
}

/// Compensated sum of `values`, immune to ordering loss between large and
/// small magnitudes.
pub fn stable_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut correction = 0.0;

    for &value in values {
        kahan_add(&mut sum, &mut correction, value);
    }

    sum
}

/// Compensated weighted sum, `None` on shape mismatch.
pub fn stable_weighted_sum(values: &[f64], weights: &[f64]) -> Option<f64> {
    if values.len() != weights.len() {
        return None;
    }

    let mut sum = 0.0;
    let mut correction = 0.0;
    for (&value, &weight) in values.iter().zip(weights) {
        kahan_add(&mut sum, &mut correction, value * weight);
    }

    Some(sum)
}
