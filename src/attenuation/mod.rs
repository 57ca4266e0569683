//! # Attenuation Model
//!
//! Closed-form narrow-beam attenuation through homogeneous slabs.
//!
//! ## Theory
//!
//! ```text
//! μ      = μ_m · ρ                 (linear from mass coefficient)
//! I/I₀   = exp(-μ · x)             (Beer–Lambert, normal incidence)
//! x_req  = -ln(I/I₀) / μ           (exact inverse)
//! ```
//!
//! For a stack of slabs the optical thicknesses add, so the transmission
//! of the stack is the product of the per-layer transmissions.
//!
//! Under isotropic incidence on the half-space (direction cosine uniform in
//! (0,1)) the expected uncollided fraction is the exponential integral
//! `E₂(μx)`.
//!
//! ## References
//!
//! - Shultis & Faw, "Radiation Shielding", ANS 2000, ch. 7
//! - Abramowitz & Stegun, §5.1 (exponential integrals)

use crate::constants::{EULER_GAMMA, SERIES_EPS, SERIES_MAX_ITER, TINY};
use crate::error::{Result, ShieldError};

/// Linear attenuation coefficient (1/cm) from a mass coefficient (cm²/g)
/// and density (g/cm³)
#[inline]
pub fn linear_coefficient(mass_coefficient: f64, density: f64) -> f64 {
    mass_coefficient * density
}

/// Uncollided transmission `exp(-μx)` for normal incidence
#[inline]
pub fn transmission(linear_coefficient: f64, thickness: f64) -> f64 {
    (-linear_coefficient * thickness).exp()
}

/// Thickness that attenuates a normally incident beam to `target_fraction`
///
/// Fails on a target outside (0, 1] and on a coefficient that is not
/// strictly positive.
pub fn required_thickness(linear_coefficient: f64, target_fraction: f64) -> Result<f64> {
    validate_target(target_fraction)?;
    if !(linear_coefficient.is_finite() && linear_coefficient > 0.0) {
        return Err(ShieldError::InvalidCoefficient {
            value: linear_coefficient,
        });
    }

    // + 0.0 folds the -0.0 produced at target = 1
    Ok(-target_fraction.ln() / linear_coefficient + 0.0)
}

/// Check a transmission target lies in (0, 1]
pub fn validate_target(target_fraction: f64) -> Result<f64> {
    if target_fraction.is_finite() && target_fraction > 0.0 && target_fraction <= 1.0 {
        Ok(target_fraction)
    } else {
        Err(ShieldError::InvalidTarget {
            value: target_fraction,
        })
    }
}

/// Sum of μ·x over a stack of `(linear_coefficient, thickness)` layers
pub fn optical_thickness<I>(layers: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    layers.into_iter().map(|(mu, x)| mu * x).sum()
}

/// Expected uncollided fraction for isotropic incidence, `E₂(μx)`
pub fn isotropic_transmission(linear_coefficient: f64, thickness: f64) -> f64 {
    exponential_integral_e2(linear_coefficient * thickness)
}

/// Mean free path 1/μ (cm)
pub fn mean_free_path(linear_coefficient: f64) -> Result<f64> {
    if !(linear_coefficient.is_finite() && linear_coefficient > 0.0) {
        return Err(ShieldError::InvalidCoefficient {
            value: linear_coefficient,
        });
    }
    Ok(1.0 / linear_coefficient)
}

/// Half-value layer ln 2 / μ (cm)
pub fn half_value_layer(linear_coefficient: f64) -> Result<f64> {
    required_thickness(linear_coefficient, 0.5)
}

/// Tenth-value layer ln 10 / μ (cm)
pub fn tenth_value_layer(linear_coefficient: f64) -> Result<f64> {
    required_thickness(linear_coefficient, 0.1)
}

/// Transmission sampled on `points` uniformly spaced thicknesses in
/// `[0, max_thickness]`
pub fn transmission_curve(
    linear_coefficient: f64,
    max_thickness: f64,
    points: usize,
) -> Vec<(f64, f64)> {
    let denom = points.saturating_sub(1).max(1) as f64;
    (0..points)
        .map(|i| {
            let x = max_thickness * i as f64 / denom;
            (x, transmission(linear_coefficient, x))
        })
        .collect()
}

/// Exponential integral of order 2, `E₂(x) = ∫₁^∞ e^{-xt} / t² dt`
///
/// Power series for x ≤ 1, modified Lentz continued fraction above.
/// Returns 1 at x = 0 and 0 for x = +∞.
pub fn exponential_integral_e2(x: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    if !x.is_finite() {
        return 0.0;
    }

    if x > 1.0 {
        // E_n(x) = e^{-x} · 1/(x+n- 1·n/(x+n+2- 2(n+1)/(x+n+4- ...)))
        let n = 2.0;
        let mut b = x + n;
        let mut c = 1.0 / TINY;
        let mut d = 1.0 / b;
        let mut h = d;
        for i in 1..=SERIES_MAX_ITER {
            let i = i as f64;
            let an = -i * (n - 1.0 + i);
            b += 2.0;
            d = 1.0 / (an * d + b);
            c = b + an / c;
            let del = c * d;
            h *= del;
            if (del - 1.0).abs() < SERIES_EPS {
                break;
            }
        }
        h * (-x).exp()
    } else {
        // n - 1 = 1: the i = 1 term carries the logarithmic part
        let mut ans = 1.0;
        let mut fact = 1.0;
        for i in 1..=SERIES_MAX_ITER {
            fact *= -x / i as f64;
            let del = if i != 1 {
                -fact / (i as f64 - 1.0)
            } else {
                let psi = -EULER_GAMMA + 1.0;
                fact * (-x.ln() + psi)
            };
            ans += del;
            if del.abs() < ans.abs() * SERIES_EPS {
                break;
            }
        }
        ans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_coefficient() {
        let mu = linear_coefficient(0.044, 11.34);
        assert!((mu - 0.49896).abs() < 1e-12);
    }

    #[test]
    fn test_transmission_bounds() {
        assert_eq!(transmission(0.5, 0.0), 1.0);
        let t = transmission(0.5, 10.0);
        assert!(t > 0.0 && t < 1.0);
        assert!(transmission(0.5, 11.0) < t);
        assert!(transmission(0.6, 10.0) < t);
    }

    #[test]
    fn test_required_thickness_lead() {
        let mu = linear_coefficient(0.044, 11.34);
        let x = required_thickness(mu, 1e-6).unwrap();
        let expected = -(1e-6f64).ln() / (0.044 * 11.34);
        assert!((x - expected).abs() < 1e-12);
        assert!((x - 27.69).abs() < 0.05, "x = {}", x);
    }

    #[test]
    fn test_required_thickness_unit_target() {
        let x = required_thickness(0.3, 1.0).unwrap();
        assert_eq!(x, 0.0);
        assert!(x.is_sign_positive());
    }

    #[test]
    fn test_required_thickness_errors() {
        assert!(matches!(
            required_thickness(0.3, 0.0),
            Err(ShieldError::InvalidTarget { .. })
        ));
        assert!(matches!(
            required_thickness(0.3, -0.5),
            Err(ShieldError::InvalidTarget { .. })
        ));
        assert!(matches!(
            required_thickness(0.3, 1.5),
            Err(ShieldError::InvalidTarget { .. })
        ));
        assert!(matches!(
            required_thickness(0.0, 0.5),
            Err(ShieldError::InvalidCoefficient { .. })
        ));
    }

    #[test]
    fn test_round_trip() {
        for &x in &[0.0, 0.1, 1.0, 7.5, 40.0] {
            let t = transmission(0.8, x);
            let back = required_thickness(0.8, t).unwrap();
            assert!((back - x).abs() < 1e-9, "{} -> {}", x, back);
        }
    }

    #[test]
    fn test_value_layers() {
        let hvl = half_value_layer(0.5).unwrap();
        assert!((hvl - std::f64::consts::LN_2 / 0.5).abs() < 1e-12);
        let tvl = tenth_value_layer(0.5).unwrap();
        assert!((tvl - std::f64::consts::LN_10 / 0.5).abs() < 1e-12);
        assert!((mean_free_path(0.5).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_optical_thickness() {
        let tau = optical_thickness([(0.5, 2.0), (0.25, 4.0)]);
        assert!((tau - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_transmission_curve() {
        let curve = transmission_curve(0.2, 50.0, 501);
        assert_eq!(curve.len(), 501);
        assert_eq!(curve[0], (0.0, 1.0));
        assert!((curve[500].0 - 50.0).abs() < 1e-12);
        assert!(curve.windows(2).all(|w| w[1].1 < w[0].1));
    }

    #[test]
    fn test_e2_reference_values() {
        // Abramowitz & Stegun table 5.1
        assert_eq!(exponential_integral_e2(0.0), 1.0);
        assert!((exponential_integral_e2(0.5) - 0.326_643_8).abs() < 1e-6);
        assert!((exponential_integral_e2(1.0) - 0.148_495_5).abs() < 1e-6);
        assert!((exponential_integral_e2(2.0) - 0.037_534_2).abs() < 1e-6);
        assert!((exponential_integral_e2(5.0) - 0.000_996_4).abs() < 1e-6);
    }

    #[test]
    fn test_isotropic_below_beam() {
        // Oblique paths see more material
        for &x in &[0.5, 1.0, 3.0] {
            assert!(isotropic_transmission(1.0, x) < transmission(1.0, x));
        }
    }
}
