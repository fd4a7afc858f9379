use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use wigner_core::{
    LegendreInput, ThreeJOverLInput, ThreeJOverMInput, Wigner3jInput, WignerDInput, legendre_p_l,
    wigner_3j, wigner_3j_l, wigner_3j_m, wigner_d_l,
};

fn workspace_root() -> PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CouplingRegressionFixtures {
    three_j_over_l_cases: Vec<ThreeJOverLCase>,
    three_j_over_m_cases: Vec<ThreeJOverMCase>,
    wigner_d_cases: Vec<WignerDCase>,
    legendre_cases: Vec<LegendreCase>,
    wigner3j_cases: Vec<Wigner3jCase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreeJOverLCase {
    id: String,
    l2: f64,
    l3: f64,
    m2: f64,
    m3: f64,
    expected_min: f64,
    expected_max: f64,
    expected: Vec<f64>,
    abs_tol: f64,
    rel_tol: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreeJOverMCase {
    id: String,
    l1: f64,
    l2: f64,
    l3: f64,
    m1: f64,
    expected_min: f64,
    expected_max: f64,
    expected: Vec<f64>,
    abs_tol: f64,
    rel_tol: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WignerDCase {
    id: String,
    lmin: i32,
    lmax: i32,
    m1: i32,
    m2: i32,
    theta: f64,
    expected: Vec<f64>,
    abs_tol: f64,
    rel_tol: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegendreCase {
    id: String,
    lmin: i32,
    lmax: i32,
    x: f64,
    expected: Vec<f64>,
    abs_tol: f64,
    rel_tol: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Wigner3jInputFixture {
    two_j1: i32,
    two_j2: i32,
    two_j3: i32,
    two_m1: i32,
    two_m2: i32,
    two_m3: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Wigner3jCase {
    id: String,
    input: Wigner3jInputFixture,
    expected: f64,
    abs_tol: f64,
    rel_tol: f64,
}

#[test]
fn three_j_over_l_fixtures_match_reference_outputs() {
    let fixtures = load_fixtures();

    for case in fixtures.three_j_over_l_cases {
        let series = wigner_3j_l(ThreeJOverLInput::new(case.l2, case.l3, case.m2, case.m3))
            .unwrap_or_else(|error| panic!("{} should succeed: {}", case.id, error));

        assert_scalar_close(
            &format!("{} min", case.id),
            case.expected_min,
            series.min,
            1.0e-12,
            1.0e-12,
        );
        assert_scalar_close(
            &format!("{} max", case.id),
            case.expected_max,
            series.max,
            1.0e-12,
            1.0e-12,
        );
        assert_series_close(
            &case.id,
            &case.expected,
            &series.coefficients,
            case.abs_tol,
            case.rel_tol,
        );
    }
}

#[test]
fn three_j_over_m_fixtures_match_reference_outputs() {
    let fixtures = load_fixtures();

    for case in fixtures.three_j_over_m_cases {
        let series = wigner_3j_m(ThreeJOverMInput::new(case.l1, case.l2, case.l3, case.m1))
            .unwrap_or_else(|error| panic!("{} should succeed: {}", case.id, error));

        assert_scalar_close(
            &format!("{} min", case.id),
            case.expected_min,
            series.min,
            1.0e-12,
            1.0e-12,
        );
        assert_scalar_close(
            &format!("{} max", case.id),
            case.expected_max,
            series.max,
            1.0e-12,
            1.0e-12,
        );
        assert_series_close(
            &case.id,
            &case.expected,
            &series.coefficients,
            case.abs_tol,
            case.rel_tol,
        );
    }
}

#[test]
fn wigner_d_fixtures_match_reference_outputs() {
    let fixtures = load_fixtures();

    for case in fixtures.wigner_d_cases {
        let values = wigner_d_l(WignerDInput::new(
            case.lmin, case.lmax, case.m1, case.m2, case.theta,
        ))
        .unwrap_or_else(|error| panic!("{} should succeed: {}", case.id, error));

        assert_series_close(&case.id, &case.expected, &values, case.abs_tol, case.rel_tol);
    }
}

#[test]
fn legendre_fixtures_match_reference_outputs() {
    let fixtures = load_fixtures();

    for case in fixtures.legendre_cases {
        let values = legendre_p_l(LegendreInput::new(case.lmin, case.lmax, case.x))
            .unwrap_or_else(|error| panic!("{} should succeed: {}", case.id, error));

        assert_series_close(&case.id, &case.expected, &values, case.abs_tol, case.rel_tol);
    }
}

#[test]
fn closed_form_wigner_3j_fixtures_match_reference_outputs() {
    let fixtures = load_fixtures();

    for case in fixtures.wigner3j_cases {
        let input = Wigner3jInput::new(
            case.input.two_j1,
            case.input.two_j2,
            case.input.two_j3,
            case.input.two_m1,
            case.input.two_m2,
            case.input.two_m3,
        );
        let actual = wigner_3j(input);
        assert_scalar_close(&case.id, case.expected, actual, case.abs_tol, case.rel_tol);
    }
}

fn load_fixtures() -> CouplingRegressionFixtures {
    let fixture_path = workspace_root().join("tasks/coupling-regression-fixtures.json");
    let source = fs::read_to_string(&fixture_path).unwrap_or_else(|error| {
        panic!(
            "fixture file {} should be readable: {}",
            fixture_path.display(),
            error
        )
    });

    serde_json::from_str(&source).unwrap_or_else(|error| {
        panic!(
            "fixture file {} should parse as JSON: {}",
            fixture_path.display(),
            error
        )
    })
}

fn assert_series_close(label: &str, expected: &[f64], actual: &[f64], abs_tol: f64, rel_tol: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "{} series length mismatch",
        label
    );

    for (index, (expected_value, actual_value)) in expected.iter().zip(actual).enumerate() {
        assert_scalar_close(
            &format!("{}[{index}]", label),
            *expected_value,
            *actual_value,
            abs_tol,
            rel_tol,
        );
    }
}

fn assert_scalar_close(label: &str, expected: f64, actual: f64, abs_tol: f64, rel_tol: f64) {
    let abs_diff = (actual - expected).abs();
    let rel_diff = abs_diff / expected.abs().max(1.0);

    assert!(
        abs_diff <= abs_tol || rel_diff <= rel_tol,
        "{} expected={:.15e} actual={:.15e} abs_diff={:.15e} rel_diff={:.15e} abs_tol={:.15e} rel_tol={:.15e}",
        label,
        expected,
        actual,
        abs_diff,
        rel_diff,
        abs_tol,
        rel_tol
    );
}
