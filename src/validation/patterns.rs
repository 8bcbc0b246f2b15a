//! Rule-agnostic pattern detectors
//!
//! None of these know which rule produced a sequence. They are the rival
//! hypotheses the ambiguity check tests a puzzle against.

/// Least-squares fit of `a*x^2 + b*x + c` over 1-indexed positions
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticFit {
    /// `[a, b, c]`
    pub coefficients: [f64; 3],
    /// Mean absolute residual over the fitted terms
    pub mean_error: f64,
    /// Rounded prediction for the next position
    pub next_value: i64,
}

impl QuadraticFit {
    pub fn evaluate(&self, x: f64) -> f64 {
        let [a, b, c] = self.coefficients;
        a * x * x + b * x + c
    }
}

/// Every consecutive difference is the same
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantDifference {
    pub difference: i64,
    pub next_value: i64,
}

/// Every consecutive ratio is the same integer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantRatio {
    pub ratio: i64,
    pub next_value: i64,
}

/// Differences alternate between two distinct constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlternatingDifference {
    /// Constant of differences at even indices (0, 2, ...)
    pub even_difference: i64,
    /// Constant of differences at odd indices (1, 3, ...)
    pub odd_difference: i64,
    pub next_value: i64,
}

/// Fit a quadratic through the normal equations, solved by Cramer's rule
///
/// Falls back to the line through the first and last terms when the
/// system's determinant is within `singular_epsilon` of zero.
pub fn fit_quadratic(sequence: &[i64], singular_epsilon: f64) -> Option<QuadraticFit> {
    if sequence.is_empty() {
        return None;
    }

    // Power sums S_k = sum(x^k) for k = 0..4 and T_k = sum(x^k * y) for k = 0..2
    let mut s = [0.0f64; 5];
    let mut t = [0.0f64; 3];
    for (i, &y) in sequence.iter().enumerate() {
        let x = (i + 1) as f64;
        let y = y as f64;
        let mut xk = 1.0;
        for k in 0..5 {
            s[k] += xk;
            if k < 3 {
                t[k] += xk * y;
            }
            xk *= x;
        }
    }

    let matrix = [[s[4], s[3], s[2]], [s[3], s[2], s[1]], [s[2], s[1], s[0]]];
    let rhs = [t[2], t[1], t[0]];
    let det = determinant(&matrix);

    let coefficients = if det.abs() < singular_epsilon {
        linear_through_endpoints(sequence)
    } else {
        let mut solution = [0.0; 3];
        for (col, value) in solution.iter_mut().enumerate() {
            let mut replaced = matrix;
            for row in 0..3 {
                replaced[row][col] = rhs[row];
            }
            *value = determinant(&replaced) / det;
        }
        solution
    };

    let mut fit = QuadraticFit {
        coefficients,
        mean_error: 0.0,
        next_value: 0,
    };

    let total_error: f64 = sequence
        .iter()
        .enumerate()
        .map(|(i, &y)| (fit.evaluate((i + 1) as f64) - y as f64).abs())
        .sum();
    fit.mean_error = total_error / sequence.len() as f64;
    fit.next_value = fit.evaluate((sequence.len() + 1) as f64).round() as i64;

    Some(fit)
}

/// Constant term-to-term difference, if there is one
pub fn detect_constant_difference(sequence: &[i64]) -> Option<ConstantDifference> {
    if sequence.len() < 2 {
        return None;
    }

    let difference = sequence[1].saturating_sub(sequence[0]);
    let constant = sequence
        .windows(2)
        .all(|w| w[1].saturating_sub(w[0]) == difference);
    if !constant {
        return None;
    }

    let last = *sequence.last()?;
    Some(ConstantDifference {
        difference,
        next_value: last.saturating_add(difference),
    })
}

/// Constant integer ratio, if there is one
///
/// Undefined when any term is zero.
pub fn detect_constant_ratio(sequence: &[i64], tolerance: f64) -> Option<ConstantRatio> {
    if sequence.len() < 2 || sequence.contains(&0) {
        return None;
    }

    let ratios: Vec<f64> = sequence
        .windows(2)
        .map(|w| w[1] as f64 / w[0] as f64)
        .collect();
    let first = ratios[0];
    if ratios.iter().any(|r| (r - first).abs() > tolerance) {
        return None;
    }

    let rounded = first.round();
    if (first - rounded).abs() > tolerance {
        return None;
    }

    let ratio = rounded as i64;
    let last = *sequence.last()?;
    Some(ConstantRatio {
        ratio,
        next_value: last.saturating_mul(ratio),
    })
}

/// Differences that alternate between two distinct constants
///
/// Needs at least four terms so both parity groups have a member.
pub fn detect_alternating_difference(sequence: &[i64]) -> Option<AlternatingDifference> {
    if sequence.len() < 4 {
        return None;
    }

    let diffs: Vec<i64> = sequence
        .windows(2)
        .map(|w| w[1].saturating_sub(w[0]))
        .collect();
    let even_difference = group_constant(diffs.iter().step_by(2))?;
    let odd_difference = group_constant(diffs.iter().skip(1).step_by(2))?;
    if even_difference == odd_difference {
        return None;
    }

    // Index of the difference between the last term and the next one
    let next_index = diffs.len();
    let step = if next_index % 2 == 0 {
        even_difference
    } else {
        odd_difference
    };

    let last = *sequence.last()?;
    Some(AlternatingDifference {
        even_difference,
        odd_difference,
        next_value: last.saturating_add(step),
    })
}

fn group_constant<'a>(mut group: impl Iterator<Item = &'a i64>) -> Option<i64> {
    let first = *group.next()?;
    if group.all(|&d| d == first) {
        Some(first)
    } else {
        None
    }
}

fn determinant(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

fn linear_through_endpoints(sequence: &[i64]) -> [f64; 3] {
    let first = sequence[0] as f64;
    let last = sequence[sequence.len() - 1] as f64;
    let span = (sequence.len() - 1) as f64;
    let slope = if span > 0.0 { (last - first) / span } else { 0.0 };
    // y = first + slope * (x - 1)
    [0.0, slope, first - slope]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    fn assert_close(actual: [f64; 3], expected: [f64; 3]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-6, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_quadratic_fit_squares() {
        let fit = fit_quadratic(&[1, 4, 9, 16, 25], EPS).unwrap();
        assert_close(fit.coefficients, [1.0, 0.0, 0.0]);
        assert!(fit.mean_error < 1e-6);
        assert_eq!(fit.next_value, 36);
    }

    #[test]
    fn test_quadratic_fit_line() {
        let fit = fit_quadratic(&[2, 4, 6, 8, 10], EPS).unwrap();
        assert_close(fit.coefficients, [0.0, 2.0, 0.0]);
        assert_eq!(fit.next_value, 12);
    }

    #[test]
    fn test_quadratic_fit_reports_error_for_non_quadratic() {
        // Fibonacci: best parabola misses by about 0.09 per term
        let fit = fit_quadratic(&[1, 1, 2, 3, 5], EPS).unwrap();
        assert!(fit.mean_error > 0.05 && fit.mean_error < 0.5);
        assert_eq!(fit.next_value, 7);
    }

    #[test]
    fn test_quadratic_fit_singular_falls_back_to_line() {
        // Two points make the 3x3 system singular
        let fit = fit_quadratic(&[3, 7], EPS).unwrap();
        assert_close(fit.coefficients, [0.0, 4.0, -1.0]);
        assert_eq!(fit.next_value, 11);

        let single = fit_quadratic(&[5], EPS).unwrap();
        assert_eq!(single.next_value, 5);
        assert!(fit_quadratic(&[], EPS).is_none());
    }

    #[test]
    fn test_constant_difference() {
        let found = detect_constant_difference(&[1, 4, 7, 10, 13]).unwrap();
        assert_eq!(found.difference, 3);
        assert_eq!(found.next_value, 16);
        assert!(detect_constant_difference(&[1, 2, 4, 8, 16]).is_none());
        assert!(detect_constant_difference(&[1]).is_none());
    }

    #[test]
    fn test_constant_ratio() {
        let found = detect_constant_ratio(&[2, 6, 18, 54], 1e-4).unwrap();
        assert_eq!(found.ratio, 3);
        assert_eq!(found.next_value, 162);
        assert!(detect_constant_ratio(&[0, 0, 0, 0], 1e-4).is_none());
        assert!(detect_constant_ratio(&[3, 6, 0, 12], 1e-4).is_none());
    }

    #[test]
    fn test_constant_ratio_must_be_integer() {
        assert!(detect_constant_ratio(&[4, 6, 9], 1e-4).is_none());
        assert!(detect_constant_ratio(&[1, 2, 4, 9], 1e-4).is_none());
        let negative = detect_constant_ratio(&[1, -2, 4, -8], 1e-4).unwrap();
        assert_eq!(negative.ratio, -2);
        assert_eq!(negative.next_value, 16);
    }

    #[test]
    fn test_alternating_difference() {
        // diffs: 2, 5, 2, 5
        let found = detect_alternating_difference(&[1, 3, 8, 10, 15]).unwrap();
        assert_eq!(found.even_difference, 2);
        assert_eq!(found.odd_difference, 5);
        assert_eq!(found.next_value, 17);

        // diffs: 2, 5, 2 -> next difference is odd-indexed
        let found = detect_alternating_difference(&[1, 3, 8, 10]).unwrap();
        assert_eq!(found.next_value, 15);
    }

    #[test]
    fn test_alternating_difference_rejects_constant_and_short() {
        assert!(detect_alternating_difference(&[1, 3, 5, 7, 9]).is_none());
        assert!(detect_alternating_difference(&[1, 3, 8]).is_none());
        assert!(detect_alternating_difference(&[1, 3, 8, 10, 16]).is_none());
    }

    #[test]
    fn test_detectors_saturate_on_extreme_terms() {
        let found = detect_constant_difference(&[i64::MIN, i64::MAX]).unwrap();
        assert_eq!(found.difference, i64::MAX);
        assert_eq!(found.next_value, i64::MAX);
        assert!(detect_alternating_difference(&[i64::MIN, i64::MAX, i64::MIN, i64::MAX]).is_some());
    }
}
