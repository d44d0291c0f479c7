//! SSD1306 OLED display wrapper.

use embassy_time::Timer;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::config::{DISPLAY_I2C_ADDRESS, DISPLAY_STARTUP_PAUSE_MS};
use crate::error::Error;
use crate::ui::status::{StatusLine, ROW_HEIGHT};

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display, clear it and pause briefly.
///
/// Fails with `Error::Display` when the panel does not answer at
/// `DISPLAY_I2C_ADDRESS`.
pub async fn init<I2C>(i2c: I2C) -> Result<Display<I2C>, Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_I2C_ADDRESS);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().map_err(|_| Error::Display)?;
    display.clear_buffer();
    display.flush().map_err(|_| Error::Display)?;
    Timer::after_millis(DISPLAY_STARTUP_PAUSE_MS).await;
    Ok(display)
}

fn text_style() -> embedded_graphics::mono_font::MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// Render the status rows, one per `ROW_HEIGHT` pixels from the top.
pub fn draw_status<I2C>(display: &mut Display<I2C>, lines: &[StatusLine])
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();

    for (row, line) in lines.iter().enumerate() {
        let y = row as i32 * ROW_HEIGHT;
        let _ = Text::with_baseline(line.as_str(), Point::new(0, y), text_style(), Baseline::Top)
            .draw(display);
    }

    // A failed refresh is retried implicitly by the next tick.
    let _ = display.flush();
}
