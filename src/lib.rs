//! # Unofficial Rust Driver for Bosch BMP085 Barometric Pressure Sensor
//!
//! ## External Links
//!
//! - [Datasheet]
//! - [Reference Arduino Library]
//!
//! [Datasheet]: https://www.digikey.com/htmldatasheets/production/856385/0/0/1/bmp085-datasheet.html
//! [Reference Arduino Library]: https://github.com/rodan/bmp085
#![no_std]
#![doc = include_str!("../README.md")]

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::calibration::Calibration;

/// The BMP085 answers on a single, factory-fixed 7-bit address.
pub const ADDRESS: u8 = 0x77;

const REG_CONTROL: u8 = 0xF4;
const REG_OUT_MSB: u8 = 0xF6;
const REG_OUT_LSB: u8 = 0xF7;
const REG_OUT_XLSB: u8 = 0xF8;

const CMD_TEMPERATURE: u8 = 0x2E;
const CMD_PRESSURE: u8 = 0x34;

// 4.5ms worst case, independent of the oversampling setting
const TEMPERATURE_CONVERSION_MS: u32 = 5;

pub(crate) const STANDARD_ATMOSPHERE: f32 = 101_325.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<E> {
    I2cError(E),
    /// Every calibration word read back as the idle-bus pattern; no
    /// device acknowledged on the other end.
    DeviceUnreachable,
    /// A reading was requested before [`DriverUsingDelay::init`] had
    /// populated the calibration store.
    NotCalibrated,
    /// The stored coefficients would divide by zero during
    /// compensation.
    CalibrationInvalid,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::I2cError(error)
    }
}

#[derive(Debug)]
pub struct OutOfRange;

pub trait DriverUsingDelay<I2C: I2c, DELAY: DelayNs, T> {
    fn address_check(address: u8) -> Result<(), OutOfRange> {
        if (0x08..=0x77).contains(&address) {
            Ok(())
        } else {
            Err(OutOfRange)
        }
    }

    fn new_inner(i2c: I2C, address: u8, delay: DELAY) -> Self;

    /// The entry point for the driver.  Expects [`I2c`] and [`DelayNs`]
    /// (both obtainable from the target platform HAL) and an I2C device
    /// address in the range `0x08..=0x77`.  This provides a handle that
    /// does not initialize the hardware.  Initialization is deferred to
    /// [`DriverUsingDelay::init`].
    ///
    /// # Errors
    ///
    /// [`OutOfRange`]: address is outside of the allowed range `0x08..=0x77`
    fn new(i2c: I2C, address: u8, delay: DELAY) -> Result<Self, OutOfRange>
    where
        Self: Sized,
    {
        Self::address_check(address)?;
        Ok(Self::new_inner(i2c, address, delay))
    }

    fn init_inner(self) -> Result<Self, T>
    where
        Self: Sized,
    {
        Ok(self)
    }

    /// Initializes the hardware.  This initialization is required prior
    /// to interacting with the device.
    ///
    /// # Errors
    ///
    /// [`T`]: a device dependent error type for any problems encountered
    /// during initialization.
    fn init(self) -> Result<Self, T>
    where
        Self: Sized,
    {
        self.init_inner()
    }
}

pub trait WhoAmI<I2C: I2c, T: core::cmp::Eq> {
    const EXPECTED_WHOAMI: T;

    fn whoami(&mut self) -> Result<T, I2C::Error>;
}

/// Pressure measurement precision, traded against conversion time.
///
/// Each extra oversampling bit roughly doubles the conversion time and
/// widens the effective raw pressure sample by one bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Oversampling {
    UltraLowPower = 0,
    Standard = 1,
    HighResolution = 2,
    UltraHighResolution = 3,
}

impl Oversampling {
    fn command(self) -> u8 {
        CMD_PRESSURE | (u8::from(self) << 6)
    }

    /// Worst-case pressure conversion time for this setting.
    fn conversion_time_ms(self) -> u32 {
        5 + 7 * u32::from(u8::from(self))
    }

    /// Right shift that aligns a packed 24-bit sample to its effective
    /// width of `16 + oss` bits.
    fn raw_pressure_shift(self) -> u32 {
        8 - u32::from(u8::from(self))
    }
}

/// One compensated reading.  Temperature and pressure belong to the
/// same cycle: the pressure value was corrected with the `b5` term
/// derived from this temperature sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    pub celsius: f32,
    pub pascals: u32,
    pub atmospheres: f32,
}

pub struct Bmp085<I2C, DELAY> {
    i2c: I2C,
    address: u8,
    delay: DELAY,
    calibration: Option<Calibration>,
}

impl<I2C: I2c, DELAY: DelayNs> DriverUsingDelay<I2C, DELAY, Error<I2C::Error>>
    for Bmp085<I2C, DELAY>
{
    fn new_inner(i2c: I2C, address: u8, delay: DELAY) -> Self {
        Self {
            i2c,
            address,
            delay,
            calibration: None,
        }
    }

    fn init_inner(mut self) -> Result<Self, Error<I2C::Error>> {
        self.calibration = Some(Calibration::load(&mut self.i2c, self.address)?);
        Ok(self)
    }
}

impl<I2C: I2c, DELAY: DelayNs> Bmp085<I2C, DELAY> {
    /// Coefficients read from the device EEPROM during
    /// [`DriverUsingDelay::init`], `None` beforehand.
    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    fn read_register_u8(&mut self, register: u8) -> Result<u8, I2C::Error> {
        let mut data: [u8; 1] = [0];
        self.i2c.write_read(self.address, &[register], &mut data)?;
        Ok(data[0])
    }

    /// Starts a temperature conversion and reads back the uncompensated
    /// result.  The result register holds unsigned bits that stand for
    /// a signed 16-bit quantity; they are reinterpreted, not widened.
    ///
    /// # Errors
    ///
    /// [`I2c::Error`]: a problem communicating over i2c
    pub fn read_raw_temperature(&mut self) -> Result<i16, I2C::Error> {
        self.i2c
            .write(self.address, &[REG_CONTROL, CMD_TEMPERATURE])?;
        self.delay.delay_ms(TEMPERATURE_CONVERSION_MS);
        let mut data: [u8; 2] = [0, 0];
        self.i2c
            .write_read(self.address, &[REG_OUT_MSB], &mut data)?;
        Ok(i16::from_be_bytes(data))
    }

    /// Starts a pressure conversion at `oversampling` and reads back
    /// the uncompensated result, aligned to its effective width of
    /// `16 + oss` bits.
    ///
    /// # Errors
    ///
    /// [`I2c::Error`]: a problem communicating over i2c
    pub fn read_raw_pressure(&mut self, oversampling: Oversampling) -> Result<u32, I2C::Error> {
        self.i2c
            .write(self.address, &[REG_CONTROL, oversampling.command()])?;
        self.delay.delay_ms(oversampling.conversion_time_ms());
        let msb = self.read_register_u8(REG_OUT_MSB)?;
        let lsb = self.read_register_u8(REG_OUT_LSB)?;
        let xlsb = self.read_register_u8(REG_OUT_XLSB)?;
        Ok(u32::from_be_bytes([0x00, msb, lsb, xlsb]) >> oversampling.raw_pressure_shift())
    }

    /// Runs one whole reading cycle: temperature conversion,
    /// temperature compensation, pressure conversion, pressure
    /// compensation with the `b5` term derived from this cycle's
    /// temperature sample.  The cycle must not be interleaved with
    /// another; `&mut self` serializes callers.
    ///
    /// # Errors
    ///
    /// [`Error::NotCalibrated`]: [`DriverUsingDelay::init`] has not run
    ///
    /// [`Error::CalibrationInvalid`]: the stored coefficients are
    /// degenerate
    ///
    /// [`Error::I2cError`]: a problem communicating over i2c
    pub fn read(&mut self, oversampling: Oversampling) -> Result<Reading, Error<I2C::Error>> {
        let calibration = self.calibration.ok_or(Error::NotCalibrated)?;
        let ut = self.read_raw_temperature()?;
        let (b5, celsius) =
            compensation::temperature(ut, &calibration).map_err(|_| Error::CalibrationInvalid)?;
        let up = self.read_raw_pressure(oversampling)?;
        let pascals = compensation::pressure(up, oversampling, b5, &calibration)
            .map_err(|_| Error::CalibrationInvalid)?;
        #[expect(clippy::cast_precision_loss)]
        let atmospheres = pascals as f32 / STANDARD_ATMOSPHERE;
        Ok(Reading {
            celsius,
            pascals,
            atmospheres,
        })
    }
}


pub mod calibration;
pub mod compensation;
pub mod helper;
pub mod whoami;
