//! Factory calibration store.
//!
//! Every BMP085 ships with eleven coefficients burned into its EEPROM.
//! They are read once, as a group, before the first compensation and
//! never change for the life of the session.

use crate::Error;
use embedded_hal::i2c::I2c;

const REG_AC1: u8 = 0xAA;
const REG_AC2: u8 = 0xAC;
const REG_AC3: u8 = 0xAE;
const REG_AC4: u8 = 0xB0;
const REG_AC5: u8 = 0xB2;
const REG_AC6: u8 = 0xB4;
const REG_B1: u8 = 0xB6;
const REG_B2: u8 = 0xB8;
const REG_MB: u8 = 0xBA;
const REG_MC: u8 = 0xBC;
const REG_MD: u8 = 0xBE;

/// The eleven factory coefficients, in datasheet order and widths.
///
/// The datasheet defines no invalid value ranges, so individual words
/// are taken as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Calibration {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

impl Calibration {
    /// Reads the eleven coefficient words, one big-endian word per
    /// register, MSB first.
    ///
    /// # Errors
    ///
    /// [`Error::I2cError`]: a problem communicating over i2c
    ///
    /// [`Error::DeviceUnreachable`]: every word read back as `0x0000`
    /// or every word as `0xFFFF`.  An absent device leaves the bus
    /// floating and produces exactly this pattern, which would
    /// otherwise pass for a structurally valid coefficient set.
    #[expect(clippy::cast_possible_wrap)]
    pub fn load<I2C: I2c>(i2c: &mut I2C, address: u8) -> Result<Self, Error<I2C::Error>> {
        let mut words: [u16; 11] = [0; 11];

        for (word, register) in words.iter_mut().zip([
            REG_AC1, REG_AC2, REG_AC3, REG_AC4, REG_AC5, REG_AC6, REG_B1, REG_B2, REG_MB, REG_MC,
            REG_MD,
        ]) {
            let mut data: [u8; 2] = [0, 0];
            i2c.write_read(address, &[register], &mut data)?;
            *word = u16::from_be_bytes(data);
        }

        if words.iter().all(|&word| word == 0x0000) || words.iter().all(|&word| word == 0xFFFF) {
            return Err(Error::DeviceUnreachable);
        }

        Ok(Self {
            ac1: words[0] as i16,
            ac2: words[1] as i16,
            ac3: words[2] as i16,
            ac4: words[3],
            ac5: words[4],
            ac6: words[5],
            b1: words[6] as i16,
            b2: words[7] as i16,
            mb: words[8] as i16,
            mc: words[9] as i16,
            md: words[10] as i16,
        })
    }
}

#[cfg(all(test, not(all(target_arch = "arm", target_os = "none"))))]
mod test {
    extern crate std;
    use std::vec;
    use std::vec::Vec;
    extern crate embedded_hal;
    extern crate embedded_hal_mock;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use crate::calibration::Calibration;
    use crate::Error;

    const REGISTERS: [u8; 11] = [
        0xAA, 0xAC, 0xAE, 0xB0, 0xB2, 0xB4, 0xB6, 0xB8, 0xBA, 0xBC, 0xBE,
    ];

    #[test]
    pub fn load() {
        let expectations = [
            I2cTransaction::write_read(0x77, vec![0xAA], vec![0x01, 0x98]),
            I2cTransaction::write_read(0x77, vec![0xAC], vec![0xFF, 0xB8]),
            I2cTransaction::write_read(0x77, vec![0xAE], vec![0xC7, 0xD1]),
            I2cTransaction::write_read(0x77, vec![0xB0], vec![0x7F, 0xE5]),
            I2cTransaction::write_read(0x77, vec![0xB2], vec![0x7F, 0xF5]),
            I2cTransaction::write_read(0x77, vec![0xB4], vec![0x5A, 0x71]),
            I2cTransaction::write_read(0x77, vec![0xB6], vec![0x18, 0x2E]),
            I2cTransaction::write_read(0x77, vec![0xB8], vec![0x00, 0x04]),
            I2cTransaction::write_read(0x77, vec![0xBA], vec![0x80, 0x00]),
            I2cTransaction::write_read(0x77, vec![0xBC], vec![0xDD, 0xF9]),
            I2cTransaction::write_read(0x77, vec![0xBE], vec![0x0B, 0x34]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        assert_eq!(
            Calibration::load(&mut i2c, 0x77),
            Ok(Calibration {
                ac1: 408,
                ac2: -72,
                ac3: -14383,
                ac4: 32741,
                ac5: 32757,
                ac6: 23153,
                b1: 6190,
                b2: 4,
                mb: -32768,
                mc: -8711,
                md: 2868,
            })
        );
        i2c_clone.done();
    }

    #[test]
    pub fn load_all_zeroes() {
        let expectations: Vec<I2cTransaction> = REGISTERS
            .iter()
            .map(|&register| I2cTransaction::write_read(0x77, vec![register], vec![0x00, 0x00]))
            .collect();
        let mut i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        assert_eq!(
            Calibration::load(&mut i2c, 0x77),
            Err(Error::DeviceUnreachable)
        );
        i2c_clone.done();
    }

    #[test]
    pub fn load_all_ones() {
        let expectations: Vec<I2cTransaction> = REGISTERS
            .iter()
            .map(|&register| I2cTransaction::write_read(0x77, vec![register], vec![0xFF, 0xFF]))
            .collect();
        let mut i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        assert_eq!(
            Calibration::load(&mut i2c, 0x77),
            Err(Error::DeviceUnreachable)
        );
        i2c_clone.done();
    }

    #[test]
    pub fn load_accepts_some_zero_words() {
        let expectations: Vec<I2cTransaction> = REGISTERS
            .iter()
            .enumerate()
            .map(|(i, &register)| {
                let word = if i % 2 == 0 {
                    vec![0x00, 0x00]
                } else {
                    vec![0x12, 0x34]
                };
                I2cTransaction::write_read(0x77, vec![register], word)
            })
            .collect();
        let mut i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let calibration = Calibration::load(&mut i2c, 0x77).unwrap();
        assert_eq!(calibration.ac1, 0);
        assert_eq!(calibration.ac2, 0x1234);
        i2c_clone.done();
    }
}
