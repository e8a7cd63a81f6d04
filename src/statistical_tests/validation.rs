//! Input guards shared by the goodness-of-fit tests.
use crate::statistical_tests::errors::{KSError, KSResult};

/// Reject empty samples and non-finite values.
pub fn validate_input(data: &[f64]) -> KSResult<()> {
    if data.is_empty() {
        return Err(KSError::InsufficientData);
    }
    if let Some(&value) = data.iter().find(|v| !v.is_finite()) {
        return Err(KSError::InvalidData(value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Each error branch of `validate_input` fires on the matching input.
    //
    // Given
    // -----
    // - An empty slice, a slice containing infinity, and a valid slice.
    //
    // Expect
    // ------
    // - `InsufficientData`, `InvalidData(inf)`, and `Ok(())`.
    fn validate_input_covers_each_branch() {
        assert_eq!(validate_input(&[]), Err(KSError::InsufficientData));
        assert_eq!(
            validate_input(&[0.5, f64::INFINITY]),
            Err(KSError::InvalidData(f64::INFINITY))
        );
        assert_eq!(validate_input(&[0.5, 1.5]), Ok(()));
    }
}
