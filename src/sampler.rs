//! Screen color sampling.
//!
//! Whether the platform can sample the screen is decided once at startup and
//! carried as a [`SamplerCapability`]; callers branch on it instead of
//! probing the platform again.

use std::fmt;
use std::sync::Arc;

use crate::error::PickerError;

/// Result of one sampling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleOutcome {
    /// The user picked a pixel; the color as `#RRGGBB`.
    Picked(String),
    /// The user backed out.
    Cancelled,
}

/// A platform facility that lets the user pick a color from the screen.
///
/// `open` blocks until the user picks or cancels, so frontends run it off
/// the UI thread.
pub trait ColorSampler: Send + Sync {
    fn open(&self) -> Result<SampleOutcome, PickerError>;
}

#[derive(Clone)]
pub enum SamplerCapability {
    Available(Arc<dyn ColorSampler>),
    Unavailable,
}

impl SamplerCapability {
    pub fn available(sampler: impl ColorSampler + 'static) -> Self {
        Self::Available(Arc::new(sampler))
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// The sampler handle, or `CapabilityUnavailable`.
    pub fn handle(&self) -> Result<Arc<dyn ColorSampler>, PickerError> {
        match self {
            Self::Available(sampler) => Ok(Arc::clone(sampler)),
            Self::Unavailable => Err(PickerError::CapabilityUnavailable),
        }
    }
}

impl fmt::Debug for SamplerCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(_) => f.write_str("Available"),
            Self::Unavailable => f.write_str("Unavailable"),
        }
    }
}

#[cfg(feature = "desktop")]
pub use screen::ScreenSampler;

#[cfg(feature = "desktop")]
mod screen {
    use std::io::ErrorKind;
    use std::thread;
    use std::time::Duration;

    use device_query::{DeviceQuery, DeviceState, Keycode};
    use log::{debug, warn};
    use scrap::{Capturer, Display};

    use super::{ColorSampler, SampleOutcome, SamplerCapability};
    use crate::color::Rgb;
    use crate::error::PickerError;

    const POLL_INTERVAL: Duration = Duration::from_millis(16);

    /// Samples the pixel under the mouse cursor.
    ///
    /// Captures frames of the primary display and polls the mouse: a left
    /// click picks the last captured color under the cursor, Escape cancels.
    #[derive(Debug, Default)]
    pub struct ScreenSampler;

    impl ScreenSampler {
        /// Resolves the capability: available when the primary display can
        /// be opened for capture.
        pub fn detect() -> SamplerCapability {
            match Display::main() {
                Ok(_) => SamplerCapability::available(ScreenSampler),
                Err(err) => {
                    warn!("sampler: no capturable display: {err}");
                    SamplerCapability::Unavailable
                }
            }
        }
    }

    impl ColorSampler for ScreenSampler {
        fn open(&self) -> Result<SampleOutcome, PickerError> {
            let device = DeviceState::new();
            let display = Display::main()
                .map_err(|e| PickerError::Sampler(format!("could not get primary display: {e}")))?;
            let mut capturer = Capturer::new(display)
                .map_err(|e| PickerError::Sampler(format!("could not create capturer: {e}")))?;

            let mut prev_left_pressed = false;
            let mut last_color: Option<Rgb> = None;

            loop {
                let mouse = device.get_mouse();
                let (mouse_x, mouse_y) = mouse.coords;

                let width = capturer.width();
                let height = capturer.height();
                match capturer.frame() {
                    Ok(frame) => {
                        if width > 0 && height > 0 {
                            let x = (mouse_x.max(0) as usize).min(width - 1);
                            let y = (mouse_y.max(0) as usize).min(height - 1);
                            // BGRA rows, possibly padded past width * 4
                            let stride = frame.len() / height;
                            let idx = y * stride + x * 4;
                            if idx + 2 < frame.len() {
                                last_color = Some(Rgb::new(frame[idx + 2], frame[idx + 1], frame[idx]));
                            }
                        }
                    }
                    Err(e) if e.kind() == ErrorKind::WouldBlock => {}
                    Err(e) => return Err(PickerError::Sampler(format!("capture error: {e}"))),
                }

                let left_pressed = mouse.button_pressed.get(1).copied().unwrap_or(false);
                if left_pressed && !prev_left_pressed {
                    if let Some(color) = last_color {
                        debug!("sampler: picked {color} at ({mouse_x}, {mouse_y})");
                        return Ok(SampleOutcome::Picked(color.to_hex()));
                    }
                }
                prev_left_pressed = left_pressed;

                if device.get_keys().contains(&Keycode::Escape) {
                    debug!("sampler: cancelled");
                    return Ok(SampleOutcome::Cancelled);
                }

                thread::sleep(POLL_INTERVAL);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(SampleOutcome);

    impl ColorSampler for Fixed {
        fn open(&self) -> Result<SampleOutcome, PickerError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn unavailable_reports_capability_error() {
        let capability = SamplerCapability::Unavailable;
        assert!(!capability.is_available());
        assert_eq!(
            capability.handle().err(),
            Some(PickerError::CapabilityUnavailable)
        );
    }

    #[test]
    fn available_hands_out_the_sampler() {
        let capability = SamplerCapability::available(Fixed(SampleOutcome::Cancelled));
        assert!(capability.is_available());
        let sampler = capability.handle().unwrap();
        assert_eq!(sampler.open().unwrap(), SampleOutcome::Cancelled);
        assert_eq!(format!("{capability:?}"), "Available");
    }
}
