//! Fixed-point compensation formulas from the BMP085 datasheet.
//!
//! The temperature path must run first: its `b5` intermediate feeds
//! the pressure path, and both must come from the same reading cycle.
//! `b5` is therefore an explicit argument to [`pressure`], never
//! cached.  All intermediates are 32-bit; the datasheet constants were
//! derived for exactly these widths.

use crate::calibration::Calibration;
use crate::Oversampling;

/// A coefficient set whose values would divide by zero.
///
/// The datasheet's formulas leave `x1 + md` and `b4` unguarded; a
/// degenerate (for example zeroed) EEPROM can drive either to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalibrationInvalid;

/// Compensates an uncompensated temperature sample, yielding the `b5`
/// intermediate and degrees Celsius at 0.1 degree resolution.
///
/// # Errors
///
/// [`CalibrationInvalid`]: `x1 + md` is zero
pub fn temperature(ut: i16, calibration: &Calibration) -> Result<(i32, f32), CalibrationInvalid> {
    let x1: i32 =
        ((i32::from(ut) - i32::from(calibration.ac6)) * i32::from(calibration.ac5)) >> 15;
    let divisor = x1 + i32::from(calibration.md);
    if divisor == 0 {
        return Err(CalibrationInvalid);
    }
    let x2: i32 = (i32::from(calibration.mc) << 11) / divisor;
    let b5 = x1 + x2;
    #[expect(clippy::cast_precision_loss)]
    let celsius = ((b5 + 8) >> 4) as f32 / 10.0;
    Ok((b5, celsius))
}

/// Compensates an uncompensated pressure sample into pascals.
///
/// `up` must have been acquired at `oversampling`, and `b5` must come
/// from [`temperature`] within the same reading cycle.
///
/// # Errors
///
/// [`CalibrationInvalid`]: the `b4` divisor is zero
pub fn pressure(
    up: u32,
    oversampling: Oversampling,
    b5: i32,
    calibration: &Calibration,
) -> Result<u32, CalibrationInvalid> {
    let oss = u32::from(u8::from(oversampling));

    let b6: i32 = b5 - 4000;
    let x1: i32 = (i32::from(calibration.b2) * ((b6 * b6) >> 12)) >> 11;
    let x2: i32 = (i32::from(calibration.ac2) * b6) >> 11;
    let x3: i32 = x1 + x2;
    let b3: i32 = (((i32::from(calibration.ac1) * 4 + x3) << oss) + 2) >> 2;

    let x1: i32 = (i32::from(calibration.ac3) * b6) >> 13;
    let x2: i32 = (i32::from(calibration.b1) * ((b6 * b6) >> 12)) >> 16;
    let x3: i32 = ((x1 + x2) + 2) >> 2;
    #[expect(clippy::cast_sign_loss)]
    let b4: u32 = (u32::from(calibration.ac4) * ((x3 + 32768) as u32)) >> 15;
    if b4 == 0 {
        return Err(CalibrationInvalid);
    }

    #[expect(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    let b7: u32 = ((up as i32 - b3) as u32) * (50_000 >> oss);
    // Doubling b7 before the division would overflow 32 bits once it
    // reaches the upper half of the range; double the quotient instead.
    let p: u32 = if b7 < 0x8000_0000 {
        (b7 << 1) / b4
    } else {
        (b7 / b4) << 1
    };

    #[expect(clippy::cast_possible_wrap)]
    let p = p as i32;
    let x1: i32 = (p >> 8) * (p >> 8);
    let x1: i32 = (x1 * 3038) >> 16;
    let x2: i32 = (-7357 * p) >> 16;
    #[expect(clippy::cast_sign_loss)]
    let pascals = (p + ((x1 + x2 + 3791) >> 4)) as u32;
    Ok(pascals)
}
