use heapless::String;

pub const LCD_COLUMNS: usize = 16;

/// One LCD row worth of text
pub type LcdLine = String<LCD_COLUMNS>;

/// Character display the monitor draws on.
/// Implementations swallow bus errors; the screen is best-effort.
pub trait TextDisplay {
    fn clear(&mut self);

    /// Writes text at the start of the given row (0 = top)
    fn write_line(&mut self, row: u8, text: &str);
}

/// Clips text to the width of one LCD row
pub fn fit_line(text: &str) -> LcdLine {
    let mut line = LcdLine::new();
    for c in text.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
    line
}

/// Basic function for rendering a full screen onto the LCD
/// The screen is always cleared; an empty bottom line is not written at all
/// param lcd: LCD instance
/// param top: text for the first row
/// param bottom: text for the second row, may be empty
pub fn render_screen<L: TextDisplay>(lcd: &mut L, top: &str, bottom: &str) {
    lcd.clear();
    lcd.write_line(0, &fit_line(top));
    if !bottom.is_empty() {
        lcd.write_line(1, &fit_line(bottom));
    }
}

/// Screen shown while the monitor boots and runs its self-test
pub fn render_startup_screen<L: TextDisplay>(lcd: &mut L) {
    render_screen(lcd, "System Starting", "Self-Test...");
}

/// Resting screen while sensors are being watched
pub fn render_ready_screen<L: TextDisplay>(lcd: &mut L) {
    render_screen(lcd, "System Ready", "Monitoring...");
}

/// Critical alert banner with the alert message below it
pub fn render_alert_screen<L: TextDisplay>(lcd: &mut L, message: &str) {
    render_screen(lcd, "! ALERT !", message);
}
