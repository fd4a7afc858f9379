//! Legendre polynomial values `P_l(x)` over a degree range by the Bonnet
//! recursion `l P_l = (2l - 1) x P_{l-1} - (l - 1) P_{l-2}`.

use crate::domain::{DegreeRange, InvalidDegreeRange};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendreInput {
    pub lmin: i32,
    pub lmax: i32,
    pub x: f64,
}

impl LegendreInput {
    pub fn new(lmin: i32, lmax: i32, x: f64) -> Self {
        Self { lmin, lmax, x }
    }
}

pub trait LegendreApi {
    fn legendre_p_l(&self, input: LegendreInput) -> Result<Vec<f64>, InvalidDegreeRange>;
}

/// Evaluates `P_l(x)` for every degree `l` in `[lmin, lmax]`; entry `i`
/// holds the polynomial at degree `lmin + i`.
pub fn legendre_p_l(input: LegendreInput) -> Result<Vec<f64>, InvalidDegreeRange> {
    let LegendreInput { lmin, lmax, x } = input;
    let range = DegreeRange::new(lmin, lmax)?;

    let mut output = vec![0.0; range.len()];
    let mut previous = 0.0;
    let mut current = 1.0;
    if range.lmin() == 0 {
        output[0] = current;
    }

    for l in 1..=range.lmax() {
        let lf = f64::from(l);
        let value = if l == 1 {
            x
        } else {
            ((2.0 * lf - 1.0) * x * current - (lf - 1.0) * previous) / lf
        };
        previous = current;
        current = value;
        if l >= range.lmin() {
            output[(l - range.lmin()) as usize] = current;
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::{LegendreInput, legendre_p_l};

    #[test]
    fn endpoint_values_are_exact() {
        let at_one = legendre_p_l(LegendreInput::new(0, 6, 1.0)).expect("valid range");
        for (degree, &value) in at_one.iter().enumerate() {
            assert_eq!(value, 1.0, "P_{degree}(1) must be exactly one");
        }

        let at_minus_one = legendre_p_l(LegendreInput::new(0, 5, -1.0)).expect("valid range");
        for (degree, &value) in at_minus_one.iter().enumerate() {
            let expected = if degree % 2 == 0 { 1.0 } else { -1.0 };
            assert_eq!(value, expected, "P_{degree}(-1) must be (-1)^{degree}");
        }
    }

    #[test]
    fn matches_tabulated_values_at_the_origin() {
        let values = legendre_p_l(LegendreInput::new(0, 4, 0.0)).expect("valid range");
        let expected = [1.0, 0.0, -0.5, 0.0, 0.375];
        for (degree, (&actual, expected)) in values.iter().zip(expected).enumerate() {
            assert_scalar_close(&format!("P_{degree}(0)"), expected, actual, 1.0e-15, 1.0e-15);
        }
    }

    #[test]
    fn matches_tabulated_values_at_one_half() {
        let values = legendre_p_l(LegendreInput::new(2, 3, 0.5)).expect("valid range");
        assert_eq!(values.len(), 2);
        assert_scalar_close("P_2(1/2)", -0.125, values[0], 1.0e-15, 1.0e-14);
        assert_scalar_close("P_3(1/2)", -0.4375, values[1], 1.0e-15, 1.0e-14);
    }

    #[test]
    fn stays_bounded_on_the_interval_for_large_degrees() {
        for &x in &[-0.9, -0.3, 0.2, 0.7, 0.99] {
            let values = legendre_p_l(LegendreInput::new(0, 400, x)).expect("valid range");
            assert_eq!(values.len(), 401);
            for (degree, &value) in values.iter().enumerate() {
                assert!(
                    value.abs() <= 1.0 + 1.0e-12,
                    "|P_{degree}({x})| = {value} exceeds the interval bound"
                );
            }
        }
    }

    #[test]
    fn slices_exclude_degrees_below_lmin() {
        let full = legendre_p_l(LegendreInput::new(0, 9, 0.3)).expect("valid range");
        let sliced = legendre_p_l(LegendreInput::new(4, 9, 0.3)).expect("valid range");
        assert_eq!(sliced.len(), 6);
        for (offset, &value) in sliced.iter().enumerate() {
            assert_eq!(value, full[4 + offset], "slice must match the full sweep");
        }
    }

    #[test]
    fn rejects_invalid_degree_ranges() {
        assert!(legendre_p_l(LegendreInput::new(-1, 3, 0.0)).is_err());
        assert!(legendre_p_l(LegendreInput::new(5, 2, 0.0)).is_err());
    }

    fn assert_scalar_close(label: &str, expected: f64, actual: f64, abs_tol: f64, rel_tol: f64) {
        let abs_diff = (actual - expected).abs();
        let rel_diff = abs_diff / expected.abs().max(1.0);
        assert!(
            abs_diff <= abs_tol || rel_diff <= rel_tol,
            "{label} expected={expected:.15e} actual={actual:.15e} abs_diff={abs_diff:.15e} rel_diff={rel_diff:.15e}"
        );
    }
}
