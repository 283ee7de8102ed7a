#![deny(unsafe_code)]
//! Hue-ring color picker.
//!
//! The core is pure: [`color`] converts between RGB, HSL and HEX, [`ring`]
//! maps hues to ring positions and pointer positions back to hues, and
//! [`session`] holds the selected color. [`picker::Picker`] ties the session
//! to its collaborators: the clipboard, the history store, and the optional
//! screen sampler.

pub mod clipboard;
pub mod color;
pub mod config;
pub mod error;
pub mod history;
pub mod notice;
pub mod picker;
pub mod ring;
pub mod sampler;
pub mod session;

pub use clipboard::{ClipboardSink, MemoryClipboard, SystemClipboard};
pub use color::{hex_to_hsl, hex_to_rgb, hsl_to_rgb, rgb_to_hex, rgb_to_hsl, ColorDisplay, Hsl, Rgb};
pub use config::Settings;
pub use error::PickerError;
pub use history::{History, HistoryStore, JsonFileStore, MemoryStore};
pub use notice::CopyNotice;
pub use picker::Picker;
pub use ring::{hue_to_point, point_to_hue, render_hue_ring, Point, RingGeometry};
pub use sampler::{ColorSampler, SampleOutcome, SamplerCapability};
pub use session::{Session, Thumb};
