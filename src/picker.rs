//! The picker: session state plus the collaborators it talks to.
//!
//! Frontends call into [`Picker`] for every user action and read back the
//! derived values to render. All methods run on the UI thread; the only
//! operation that leaves it is screen sampling, which is split into
//! [`Picker::start_sampling`] and [`Picker::finish_sampling`].

use std::sync::Arc;

use log::{debug, warn};

use crate::clipboard::ClipboardSink;
use crate::color::ColorDisplay;
use crate::config::Settings;
use crate::error::PickerError;
use crate::history::{History, HistoryStore};
use crate::notice::CopyNotice;
use crate::ring::{Point, RingGeometry};
use crate::sampler::{ColorSampler, SampleOutcome, SamplerCapability};
use crate::session::{Session, Thumb};

pub struct Picker {
    session: Session,
    ring: RingGeometry,
    history: History,
    store: Box<dyn HistoryStore>,
    clipboard: Box<dyn ClipboardSink>,
    sampler: SamplerCapability,
    sampling: bool,
    notice: CopyNotice,
    /// The history list as last persisted, for rendering.
    recent: Vec<String>,
}

impl Picker {
    pub fn new(
        settings: &Settings,
        store: Box<dyn HistoryStore>,
        clipboard: Box<dyn ClipboardSink>,
        sampler: SamplerCapability,
    ) -> Self {
        Self {
            session: Session::new(settings.initial_color),
            ring: settings.ring(),
            history: History::new(settings.history_capacity),
            store,
            clipboard,
            sampler,
            sampling: false,
            notice: CopyNotice::new(settings.copied_notice_delay()),
            recent: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn ring(&self) -> &RingGeometry {
        &self.ring
    }

    pub fn display(&self) -> ColorDisplay {
        self.session.display()
    }

    pub fn thumb(&self) -> Thumb {
        self.session.thumb(&self.ring)
    }

    pub fn recent(&self) -> &[String] {
        &self.recent
    }

    pub fn sampler_available(&self) -> bool {
        self.sampler.is_available()
    }

    pub fn is_sampling(&self) -> bool {
        self.sampling
    }

    pub fn copy_notice(&self) -> &CopyNotice {
        &self.notice
    }

    /// Loads the stored history for display.
    pub fn restore_history(&mut self) -> &[String] {
        self.recent = self.history.restore(self.store.as_ref());
        &self.recent
    }

    pub fn pointer_down(&mut self, point: Point) -> bool {
        self.session.pointer_down(&self.ring, point)
    }

    pub fn pointer_move(&mut self, point: Point) -> bool {
        self.session.pointer_move(&self.ring, point)
    }

    pub fn pointer_up(&mut self) {
        self.session.pointer_up();
    }

    /// Copies one of the displayed values verbatim and records the current
    /// color in the history.
    ///
    /// Returns the token to hide the copy notice with.
    pub fn copy_text(&mut self, text: &str) -> Result<u64, PickerError> {
        self.clipboard.write(text)?;
        let token = self.notice.show();
        let hex = self.session.hex();
        self.record(&hex);
        Ok(token)
    }

    /// Copies a history entry. The history itself is left alone.
    pub fn copy_history_entry(&mut self, hex: &str) -> Result<u64, PickerError> {
        self.clipboard.write(hex)?;
        Ok(self.notice.show())
    }

    /// Hides the copy notice if `token` belongs to the latest copy.
    pub fn dismiss_copy_notice(&mut self, token: u64) -> bool {
        self.notice.hide(token)
    }

    pub fn choose_preset(&mut self, hex: &str) -> Result<(), PickerError> {
        let rgb = self.session.select_preset(hex)?;
        self.record(&rgb.to_hex());
        Ok(())
    }

    /// Claims the sampler for one run.
    ///
    /// Fails with `CapabilityUnavailable` when there is no sampler and with
    /// `SamplerBusy` while a previous run has not been finished.
    pub fn start_sampling(&mut self) -> Result<Arc<dyn ColorSampler>, PickerError> {
        if self.sampling {
            return Err(PickerError::SamplerBusy);
        }
        let sampler = self.sampler.handle()?;
        self.sampling = true;
        Ok(sampler)
    }

    /// Applies what the sampler returned.
    ///
    /// `Ok(true)` means the color changed. Cancellation and sampler errors
    /// leave the session untouched.
    pub fn finish_sampling(
        &mut self,
        outcome: Result<SampleOutcome, PickerError>,
    ) -> Result<bool, PickerError> {
        self.sampling = false;
        match outcome? {
            SampleOutcome::Picked(hex) => {
                let rgb = self.session.apply_sample(&hex)?;
                self.record(&rgb.to_hex());
                Ok(true)
            }
            SampleOutcome::Cancelled => {
                debug!("sampling cancelled");
                Ok(false)
            }
        }
    }

    /// Runs a whole sampling operation on the current thread.
    pub fn sample(&mut self) -> Result<bool, PickerError> {
        let sampler = self.start_sampling()?;
        let outcome = sampler.open();
        self.finish_sampling(outcome)
    }

    /// Pushes `hex` to the stored history. The rendered list only changes
    /// once the store has accepted the new list.
    fn record(&mut self, hex: &str) {
        match self.history.push(self.store.as_mut(), hex) {
            Ok(list) => self.recent = list,
            Err(err) => warn!("history: push {hex} failed: {err}"),
        }
    }
}
