pub mod portfolio;
pub mod quiz;
pub mod risk;

/// Round to 2 decimal places, half away from zero (`f64::round` semantics).
/// Per-line rounding means allocation amounts will not always re-sum exactly
/// to the requested total; that drift is accepted.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(149.9985), 150.0);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(-0.005), -0.01);
        assert_eq!(round2(20.0), 20.0);
    }
}
