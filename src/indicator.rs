use embedded_hal::digital::OutputPin;

/// Three independent on/off channels of the status LED
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl Rgb {
    pub const RED: Rgb = Rgb::new(true, false, false);
    pub const GREEN: Rgb = Rgb::new(false, true, false);
    pub const BLUE: Rgb = Rgb::new(false, false, true);
    pub const OFF: Rgb = Rgb::new(false, false, false);

    pub const fn new(red: bool, green: bool, blue: bool) -> Rgb {
        Rgb { red, green, blue }
    }
}

/// Anything that can show an [`Rgb`] color
pub trait Indicator {
    fn set_color(&mut self, color: Rgb);
}

/// Common-cathode RGB LED on three GPIOs (high = lit)
pub struct RgbLed<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    red: R,
    green: G,
    blue: B,
}

impl<R, G, B> RgbLed<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self { red, green, blue }
    }
}

fn drive<P: OutputPin>(pin: &mut P, on: bool) {
    if on {
        pin.set_high().ok();
    } else {
        pin.set_low().ok();
    }
}

impl<R, G, B> Indicator for RgbLed<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    fn set_color(&mut self, color: Rgb) {
        drive(&mut self.red, color.red);
        drive(&mut self.green, color.green);
        drive(&mut self.blue, color.blue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPin;

    #[test]
    fn test_primary_colors() {
        let (red, green, blue) = (MockPin::new(), MockPin::new(), MockPin::new());
        let mut led = RgbLed::new(red.clone(), green.clone(), blue.clone());

        led.set_color(Rgb::RED);
        led.set_color(Rgb::GREEN);
        led.set_color(Rgb::BLUE);
        led.set_color(Rgb::OFF);

        assert_eq!(red.get_states(), vec![true, false, false, false]);
        assert_eq!(green.get_states(), vec![false, true, false, false]);
        assert_eq!(blue.get_states(), vec![false, false, true, false]);
    }

    #[test]
    fn test_mixed_color() {
        let (red, green, blue) = (MockPin::new(), MockPin::new(), MockPin::new());
        let mut led = RgbLed::new(red.clone(), green.clone(), blue.clone());

        led.set_color(Rgb::new(true, false, true));

        assert_eq!(red.level(), Some(true));
        assert_eq!(green.level(), Some(false));
        assert_eq!(blue.level(), Some(true));
    }
}
