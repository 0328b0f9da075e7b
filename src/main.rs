#![no_std]
#![no_main]

use bsp::entry;
use core::convert::Infallible;
use cortex_m_rt::{exception, ExceptionFrame};
use defmt::{info, println};
use defmt_rtt as _;
use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;
use embedded_hal_0_2::adc::OneShot;
use panic_probe as _;

// Provide an alias for our BSP so we can switch targets quickly.
// Uncomment the BSP you included in Cargo.toml, the rest of the code does not need to change.
use rp_pico as bsp;

use bsp::hal::{
    self,
    adc::AdcPin,
    clocks::{init_clocks_and_plls, Clock as _},
    gpio::bank0::{Gpio0, Gpio1, Gpio2, Gpio26, Gpio27, Gpio28, Gpio3, Gpio4, Gpio5, Gpio7},
    gpio::{FunctionSioInput, FunctionSioOutput, Pin, PullDown, PullNone, PullUp},
    pac,
    pwm::{FreeRunning, Pwm3, Slice},
    watchdog::Watchdog,
    Timer,
};
use hd44780_driver::bus::FourBitBus;
use hd44780_driver::HD44780;
use heapless::String;
use homeguard::buzzer::ToneOutput;
use homeguard::config::ANALOG_FULL_SCALE;
use homeguard::indicator::RgbLed;
use homeguard::rendering::TextDisplay;
use homeguard::sensors::{AnalogChannels, Channel, SensorReader, UltrasonicProbe};
use homeguard::timer::Clock;
use homeguard::{Monitor, OutputDrivers};
use ufmt::uWrite;

// 125MHz / 64 leaves enough PWM resolution for 1-2kHz tones
const PWM_DIVIDER: u8 = 64;

type LcdPin<G> = Pin<G, FunctionSioOutput, PullDown>;
type LcdDriver = HD44780<
    FourBitBus<LcdPin<Gpio0>, LcdPin<Gpio1>, LcdPin<Gpio2>, LcdPin<Gpio3>, LcdPin<Gpio4>, LcdPin<Gpio5>>,
>;
type AnalogPin<G> = AdcPin<Pin<G, FunctionSioInput, PullNone>>;

/// 16x2 HD44780 on a 4-bit bus
struct Lcd {
    driver: LcdDriver,
    delay: Timer,
}

impl TextDisplay for Lcd {
    fn clear(&mut self) {
        self.driver.clear(&mut self.delay).ok();
    }

    fn write_line(&mut self, row: u8, text: &str) {
        let position = if row == 0 { 0x00 } else { 0x40 };
        self.driver.set_cursor_pos(position, &mut self.delay).ok();
        self.driver.write_str(text, &mut self.delay).ok();
    }
}

/// ADC0-2 for sound, water and light; the flame module's digital output on GPIO7.
/// Readings are scaled from 12 to 10 bits.
struct PicoAnalog {
    adc: hal::Adc,
    sound: AnalogPin<Gpio26>,
    water: AnalogPin<Gpio27>,
    light: AnalogPin<Gpio28>,
    flame: Pin<Gpio7, FunctionSioInput, PullUp>,
}

impl AnalogChannels for PicoAnalog {
    fn read(&mut self, channel: Channel) -> u16 {
        let raw: u16 = match channel {
            Channel::Sound => self.adc.read(&mut self.sound).unwrap_or(0),
            Channel::Water => self.adc.read(&mut self.water).unwrap_or(0),
            Channel::Light => self.adc.read(&mut self.light).unwrap_or(0),
            Channel::Flame => {
                // Module pulls low when it sees a flame
                return if self.flame.is_low().unwrap_or(false) {
                    0
                } else {
                    ANALOG_FULL_SCALE
                };
            }
        };
        raw >> 2
    }
}

/// Passive buzzer on PWM slice 3, channel A (GPIO6)
struct PwmBuzzer {
    slice: Slice<Pwm3, FreeRunning>,
    tick_hz: u32,
}

impl ToneOutput for PwmBuzzer {
    fn play(&mut self, frequency_hz: u32, _duration_ms: u32) {
        let top = (self.tick_hz / frequency_hz.max(1)).saturating_sub(1);
        self.slice.set_top(u16::try_from(top).unwrap_or(u16::MAX));
        self.slice.channel_a.set_duty_cycle_percent(50).ok();
    }

    fn stop(&mut self) {
        self.slice.channel_a.set_duty_cycle_fully_off().ok();
    }
}

struct PicoClock(Timer);

impl Clock for PicoClock {
    fn now_us(&self) -> u64 {
        self.0.get_counter().ticks()
    }
}

/// Diagnostic channel over RTT, one defmt frame per line
struct RttConsole {
    line: String<64>,
}

impl RttConsole {
    fn flush(&mut self) {
        println!("{=str}", self.line.as_str());
        self.line.clear();
    }
}

impl uWrite for RttConsole {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        for c in s.chars() {
            if c == '\n' {
                self.flush();
            } else if self.line.push(c).is_err() {
                self.flush();
                self.line.push(c).ok();
            }
        }
        Ok(())
    }
}

#[exception]
unsafe fn HardFault(frame: &ExceptionFrame) -> ! {
    defmt::panic!("HardFault at PC {=u32:#x}", frame.pc());
}

#[entry]
fn main() -> ! {
    info!("HomeGuard Starting");
    // Grab our singleton objects
    let mut pac = pac::Peripherals::take().unwrap();

    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure the clocks
    //
    // The default is to generate a 125 MHz system clock
    let clocks = init_clocks_and_plls(
        bsp::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    // The single-cycle I/O block controls our GPIO pins
    let sio = hal::Sio::new(pac.SIO);

    // Set the pins up according to their function on this particular board
    let pins = bsp::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    // Set up LCD
    let lcd = HD44780::new_4bit(
        pins.gpio0.into_push_pull_output(),
        pins.gpio1.into_push_pull_output(),
        pins.gpio2.into_push_pull_output(),
        pins.gpio3.into_push_pull_output(),
        pins.gpio4.into_push_pull_output(),
        pins.gpio5.into_push_pull_output(),
        &mut timer,
    )
    .unwrap();

    // Set up analog sensors
    let analog = PicoAnalog {
        adc: hal::Adc::new(pac.ADC, &mut pac.RESETS),
        sound: AdcPin::new(pins.gpio26.into_floating_input()).unwrap(),
        water: AdcPin::new(pins.gpio27.into_floating_input()).unwrap(),
        light: AdcPin::new(pins.gpio28.into_floating_input()).unwrap(),
        flame: pins.gpio7.into_pull_up_input(),
    };

    // Set up ultrasonic probe
    let probe = UltrasonicProbe::new(
        pins.gpio14.into_push_pull_output(),
        pins.gpio15.into_pull_down_input(),
    );

    // Set up buzzer
    let pwm_slices = hal::pwm::Slices::new(pac.PWM, &mut pac.RESETS);
    let mut pwm = pwm_slices.pwm3;
    pwm.set_div_int(PWM_DIVIDER);
    pwm.enable();
    pwm.channel_a.output_to(pins.gpio6);
    let buzzer = PwmBuzzer {
        tick_hz: clocks.system_clock.freq().to_Hz() / u32::from(PWM_DIVIDER),
        slice: pwm,
    };

    // Set up RGB LED
    let led = RgbLed::new(
        pins.gpio16.into_push_pull_output(),
        pins.gpio17.into_push_pull_output(),
        pins.gpio18.into_push_pull_output(),
    );

    let mut monitor = Monitor::new(
        SensorReader::new(analog, probe),
        OutputDrivers::new(Lcd { driver: lcd, delay: timer }, led, buzzer),
        RttConsole { line: String::new() },
        timer,
        PicoClock(timer),
    );

    info!("HomeGuard Ready");
    monitor.run()
}
