//! Small numeric helpers.

/// Pearson correlation coefficient of two equal-length series.
///
/// Uses the single-pass form
/// `(nΣxy − ΣxΣy) / sqrt((nΣx² − (Σx)²)(nΣy² − (Σy)²))`. Returns `0.0`
/// when the denominator is zero (including empty input or a constant
/// series). Extra elements of the longer slice are ignored. The result is
/// clamped to `[-1, 1]` to absorb rounding.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    let (mut sx, mut sy, mut sxy, mut sx2, mut sy2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        sx += a;
        sy += b;
        sxy += a * b;
        sx2 += a * a;
        sy2 += b * b;
    }

    let n = n as f64;
    let numerator = n.mul_add(sxy, -(sx * sy));
    let denominator = (n.mul_add(sx2, -(sx * sx)) * n.mul_add(sy2, -(sy * sy))).sqrt();

    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    (numerator / denominator).clamp(-1.0, 1.0)
}

/// Rounds to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_positive_and_negative() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert!((pearson(&x, &[2.0, 4.0, 6.0, 8.0]) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &[8.0, 6.0, 4.0, 2.0]) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn self_correlation_is_one() {
        let x = [3.0, 7.0, 1.0, 12.0, 5.0];
        assert!((pearson(&x, &x) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn symmetric_and_bounded() {
        let x = [1.0, 5.0, 2.0, 8.0, 3.0];
        let y = [4.0, 1.0, 7.0, 2.0, 9.0];
        let xy = pearson(&x, &y);
        assert!((xy - pearson(&y, &x)).abs() < 1e-12);
        assert!((-1.0..=1.0).contains(&xy));
    }

    #[test]
    fn zero_variance_is_zero() {
        assert!(pearson(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).abs() < f64::EPSILON);
        assert!(pearson(&[], &[]).abs() < f64::EPSILON);
        assert!(pearson(&[1.0], &[1.0]).abs() < f64::EPSILON);
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert!((round1(33.333) - 33.3).abs() < 1e-9);
        assert!((round1(66.666) - 66.7).abs() < 1e-9);
    }
}
