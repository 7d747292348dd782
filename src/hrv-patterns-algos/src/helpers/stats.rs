pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0_f64
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Median with the two middle values averaged for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn mean_values() {
        assert_eq!(mean(&[40.0, 50.0, 60.0]), 50.0);
    }

    #[test]
    fn median_empty() {
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn median_odd_is_middle_value() {
        assert_eq!(median(&[70.0, 30.0, 45.0]), Some(45.0));
    }

    #[test]
    fn median_even_averages_middle_pair() {
        // sorted: 40, 40, 50, 50 -> (40 + 50) / 2
        assert_eq!(median(&[50.0, 40.0, 50.0, 40.0]), Some(45.0));
    }

    #[test]
    fn median_does_not_reorder_input() {
        let values = [3.0, 1.0, 2.0];
        assert_eq!(median(&values), Some(2.0));
        assert_eq!(values, [3.0, 1.0, 2.0]);
    }
}
