use crate::{Bmp085, WhoAmI};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

const REG_CHIP_ID: u8 = 0xD0;

impl<I2C: I2c, DELAY: DelayNs> WhoAmI<I2C, u8> for Bmp085<I2C, DELAY> {
    const EXPECTED_WHOAMI: u8 = 0x55;

    fn whoami(&mut self) -> Result<u8, I2C::Error> {
        let mut data: [u8; 1] = [0];
        self.i2c
            .write_read(self.address, &[REG_CHIP_ID], &mut data)?;
        Ok(data[0])
    }
}

#[cfg(all(test, not(all(target_arch = "arm", target_os = "none"))))]
mod whoami_test {
    extern crate std;
    use std::vec;
    extern crate embedded_hal;
    extern crate embedded_hal_mock;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use crate::{Bmp085, WhoAmI};

    #[test]
    pub fn whoami() {
        let expectations = [I2cTransaction::write_read(0x77, vec![0xD0], vec![0x55])];
        let i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let mut bmp085 = Bmp085 {
            i2c,
            address: 0x77,
            delay: NoopDelay::new(),
            calibration: None,
        };
        assert_eq!(bmp085.whoami(), Ok(0x55));

        i2c_clone.done();
    }
}
