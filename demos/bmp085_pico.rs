#![no_std]
#![no_main]

#[cfg(not(all(target_arch = "arm", target_os = "none")))]
mod other {
    extern crate std;
    use std::println;
    #[no_mangle]
    pub extern "C" fn main() {
        loop {
            println!("unsupported target");
        }
    }
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod arm {
    use unofficial_bmp085::{
        helper::altitude_from, Bmp085, DriverUsingDelay, Oversampling, ADDRESS,
    };

    use defmt::*;
    use defmt_rtt as _;
    use embedded_hal::delay::DelayNs;
    use fugit::RateExtU32;
    use panic_probe as _;
    use rp2040_hal::{
        clocks::init_clocks_and_plls,
        entry,
        gpio::{FunctionI2C, Pin, PullUp},
        i2c::I2C,
        pac,
        sio::Sio,
        watchdog::Watchdog,
        Timer,
    };

    #[link_section = ".boot2"]
    #[used]
    pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

    #[entry]
    fn main() -> ! {
        let mut pac = pac::Peripherals::take().unwrap();
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let external_xtal_freq_hz = 12_000_000u32;
        let clocks = init_clocks_and_plls(
            external_xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let pins = rp2040_hal::gpio::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let sda: Pin<_, FunctionI2C, PullUp> = pins.gpio8.reconfigure();
        let scl: Pin<_, FunctionI2C, PullUp> = pins.gpio9.reconfigure();
        let i2c = I2C::i2c0(
            pac.I2C0,
            sda,
            scl,
            400.kHz(),
            &mut pac.RESETS,
            &clocks.system_clock,
        );

        let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut delay = timer;

        let mut bmp085 = Bmp085::new(i2c, ADDRESS, timer).unwrap().init().unwrap();

        loop {
            let reading = bmp085.read(Oversampling::Standard).unwrap();
            println!(
                "{} C {} Pa {} m",
                reading.celsius,
                reading.pascals,
                altitude_from(reading.pascals)
            );
            delay.delay_ms(1000);
        }
    }
}
