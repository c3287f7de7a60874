use crate::types::Dimensions;

/// Averages the present values, rounded to one decimal place.
///
/// Returns `None` when every value is absent. The same rule produces a
/// rating's total from its dimensions and a script's average from its
/// ratings' totals.
pub fn compute_total<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0_f64, 0_u32), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return None;
    }
    Some(round1(sum / f64::from(count)))
}

/// Rounds half away from zero to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Total score of a single rating.
#[must_use]
pub fn rating_total(dimensions: &Dimensions) -> Option<f64> {
    compute_total(
        dimensions
            .named()
            .into_iter()
            .map(|(_, score)| score.map(|s| s as f64)),
    )
}

/// Checks every present dimension against the 0..=100 range.
pub fn validate_dimensions(dimensions: &Dimensions) -> Result<(), String> {
    for (name, score) in dimensions.named() {
        if let Some(score) = score {
            if !(Dimensions::MIN_SCORE..=Dimensions::MAX_SCORE).contains(&score) {
                return Err(format!(
                    "{name} must be between {} and {}, got {score}",
                    Dimensions::MIN_SCORE,
                    Dimensions::MAX_SCORE
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_present_dimensions() {
        let dims = Dimensions::new(Some(70), None, None, Some(90));
        assert_eq!(rating_total(&dims), Some(80.0));
    }

    #[test]
    fn test_all_absent_is_none() {
        assert_eq!(rating_total(&Dimensions::default()), None);
        assert_eq!(compute_total(Vec::<Option<f64>>::new()), None);
    }

    #[test]
    fn test_rounds_to_one_decimal() {
        let dims = Dimensions::new(Some(80), Some(85), Some(90), None);
        assert_eq!(rating_total(&dims), Some(85.0));

        let dims = Dimensions::new(Some(81), Some(82), Some(84), None);
        assert_eq!(rating_total(&dims), Some(82.3));

        assert_eq!(compute_total([Some(70.0), Some(75.0), Some(75.0)]), Some(73.3));
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = compute_total([Some(61.0), None, Some(77.5), Some(90.0)]);
        let b = compute_total([Some(90.0), Some(61.0), None, Some(77.5)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_script_average_is_mean_of_totals() {
        assert_eq!(compute_total([Some(80.0), Some(90.0), None]), Some(85.0));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(validate_dimensions(&Dimensions::new(Some(0), Some(100), None, None)).is_ok());

        let err = validate_dimensions(&Dimensions::new(None, Some(101), None, None)).unwrap_err();
        assert!(err.contains("market_score"));

        assert!(validate_dimensions(&Dimensions::new(Some(-1), None, None, None)).is_err());
    }
}
