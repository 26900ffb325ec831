//! Binomial distribution helpers for the combat solver.
//!
//! Probabilities are computed in log space so that long fights (hundreds of
//! rounds) neither overflow the binomial coefficient nor underflow the
//! power terms before they are combined.

/// Natural log of the binomial coefficient `C(n, k)`.
fn ln_choose(n: u32, k: u32) -> f64 {
    let k = k.min(n - k);
    (1..=k)
        .map(|i| (f64::from(n - k + i) / f64::from(i)).ln())
        .sum()
}

/// Probability of exactly `k` successes in `n` trials with success
/// probability `p`.
///
/// Returns 0 when `k > n`. `p` is clamped to `[0, 1]`.
#[must_use]
pub fn binomial_mass(n: u32, k: u32, p: f64) -> f64 {
    if k > n {
        return 0.0;
    }
    let p = p.clamp(0.0, 1.0);
    let q = 1.0 - p;

    // exact endpoints, including 0^0 = 1
    if p == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if q == 0.0 {
        return if k == n { 1.0 } else { 0.0 };
    }

    let ln = ln_choose(n, k) + f64::from(k) * p.ln() + f64::from(n - k) * q.ln();
    ln.exp()
}

/// Probability of at most `k` successes in `n` trials with success
/// probability `p`. Clamped to `[0, 1]`.
#[must_use]
pub fn binomial_cumulative(n: u32, k: u32, p: f64) -> f64 {
    let k = k.min(n);
    let total: f64 = (0..=k).map(|i| binomial_mass(n, i, p)).sum();
    total.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_mass_small_cases() {
        assert!((binomial_mass(2, 1, 0.5) - 0.5).abs() < EPS);
        assert!((binomial_mass(3, 0, 0.25) - 0.421_875).abs() < EPS);
        assert!((binomial_mass(4, 2, 1.0 / 3.0) - 24.0 / 81.0).abs() < EPS);
        assert_eq!(binomial_mass(3, 4, 0.5), 0.0);
    }

    #[test]
    fn test_mass_endpoints() {
        assert_eq!(binomial_mass(0, 0, 0.3), 1.0);
        assert_eq!(binomial_mass(5, 0, 0.0), 1.0);
        assert_eq!(binomial_mass(5, 1, 0.0), 0.0);
        assert_eq!(binomial_mass(5, 5, 1.0), 1.0);
        assert_eq!(binomial_mass(5, 4, 1.0), 0.0);
    }

    #[test]
    fn test_masses_sum_to_one() {
        for n in [1, 7, 40, 199] {
            let total: f64 = (0..=n).map(|k| binomial_mass(n, k, 0.37)).sum();
            assert!((total - 1.0).abs() < 1e-9, "n = {n}: {total}");
        }
    }

    #[test]
    fn test_cumulative() {
        assert!((binomial_cumulative(2, 0, 0.5) - 0.25).abs() < EPS);
        assert!((binomial_cumulative(2, 1, 0.5) - 0.75).abs() < EPS);
        assert!((binomial_cumulative(2, 5, 0.5) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_large_n_is_finite() {
        let mass = binomial_mass(2000, 1000, 0.5);
        assert!(mass.is_finite() && mass > 0.0);
    }
}
