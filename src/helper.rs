use crate::STANDARD_ATMOSPHERE;
use libm::powf;

/// Pressure altitude in metres for a pressure in pascals, from the
/// international barometric formula referenced to a standard
/// atmosphere at sea level.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn altitude_from(pascals: u32) -> f32 {
    44_330.0 * (1.0 - powf(pascals as f32 / STANDARD_ATMOSPHERE, 1.0 / 5.255))
}

#[test]
pub fn altitude() {
    assert_eq!(altitude_from(101_325), 0.0);
    // ~3000m for the datasheet's worked pressure example
    assert!((altitude_from(69_964) - 3017.0).abs() < 5.0);
}
