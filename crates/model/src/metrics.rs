//! Rating prediction accuracy measures.

/// Root mean squared error between predictions and actual ratings.
///
/// Returns 0.0 for empty input. Panics if the slices differ in length.
pub fn rmse(predicted: &[f32], actual: &[f32]) -> f32 {
    assert_eq!(predicted.len(), actual.len());
    if predicted.is_empty() {
        return 0.0;
    }
    let mse: f64 = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| f64::from(p - a).powi(2))
        .sum::<f64>()
        / predicted.len() as f64;
    mse.sqrt() as f32
}

/// Mean absolute error between predictions and actual ratings.
///
/// Returns 0.0 for empty input. Panics if the slices differ in length.
pub fn mae(predicted: &[f32], actual: &[f32]) -> f32 {
    assert_eq!(predicted.len(), actual.len());
    if predicted.is_empty() {
        return 0.0;
    }
    let sum: f64 = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| f64::from(p - a).abs())
        .sum();
    (sum / predicted.len() as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_predictions() {
        let actual = [1.0, 3.0, 5.0];
        assert_eq!(rmse(&actual, &actual), 0.0);
        assert_eq!(mae(&actual, &actual), 0.0);
    }

    #[test]
    fn test_known_values() {
        let predicted = [2.0, 4.0];
        let actual = [3.0, 2.0];
        // errors: -1, 2 -> mse = 2.5, mae = 1.5
        assert!((rmse(&predicted, &actual) - 2.5f32.sqrt()).abs() < 1e-6);
        assert!((mae(&predicted, &actual) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(rmse(&[], &[]), 0.0);
        assert_eq!(mae(&[], &[]), 0.0);
    }
}
