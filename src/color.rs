use std::fmt;

use palette::FromColor;
use palette::Hsv;
use palette::Srgb;
use serde::Deserialize;
use serde::Serialize;

/// Largest value of the inverted hardware range. The microcontroller reads
/// 999 as "off" and 0 as "full intensity".
pub const HARDWARE_MAX: f64 = 999.0;

/// An RGBA color with normalized channels.
///
/// `a` is only used for visualization and never reaches the hardware.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// One line of output for the LED driver, already in hardware units.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HardwareFrame {
    pub r: i64,
    pub g: i64,
    pub b: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColorError {
    OutOfRange(Color),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::OutOfRange(c) => write!(
                f,
                "color not in range 0...1: rgb = [{}, {}, {}] a = [{}]",
                c.r, c.g, c.b, c.a
            ),
        }
    }
}

impl std::error::Error for ColorError {}

impl Default for Color {
    fn default() -> Color {
        return Color::new(0.0, 1.0, 0.0, 1.0);
    }
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Color {
        return Color { r, g, b, a };
    }

    /// Builds a full-value color from a hue in degrees and a saturation
    /// in [0, 1].
    pub fn from_hue_saturation(hue: f64, saturation: f64, alpha: f64) -> Color {
        let hsv = Hsv::<palette::encoding::Srgb, f64>::new(hue, saturation, 1.0);
        let rgb = Srgb::<f64>::from_color(hsv);
        return Color::new(rgb.red, rgb.green, rgb.blue, alpha);
    }

    /// Only the upper bound is checked. Negative channels pass and scale
    /// to values above 999, which the device receives unchanged.
    pub fn is_in_range(&self) -> bool {
        return self.r <= 1.0 && self.g <= 1.0 && self.b <= 1.0;
    }

    /// Scales the color into the inverted 0..=999 range of the driver.
    pub fn to_hardware(&self) -> Result<HardwareFrame, ColorError> {
        if !self.is_in_range() {
            return Err(ColorError::OutOfRange(*self));
        }
        return Ok(HardwareFrame {
            r: scale_channel(self.r),
            g: scale_channel(self.g),
            b: scale_channel(self.b),
        });
    }
}

fn scale_channel(channel: f64) -> i64 {
    // `as` truncates toward zero, same as the firmware expects.
    ((1.0 - channel) * HARDWARE_MAX) as i64
}

impl HardwareFrame {
    pub fn new(r: i64, g: i64, b: i64) -> HardwareFrame {
        return HardwareFrame { r, g, b };
    }

    /// The serial line format understood by the microcontroller.
    pub fn to_wire(&self) -> String {
        return format!("{} {} {}\n\r", self.r, self.g, self.b);
    }
}

impl fmt::Display for HardwareFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.r, self.g, self.b)
    }
}
