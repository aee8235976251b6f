//! Page controller: owns the note, the action buttons and the toggled
//! panels, and runs every user action against the platform ports.
//!
//! The controller is a cheap `Clone` handle. Its `RefCell` borrow is never
//! held across an `.await`, so feedback timers and clipboard writes can
//! interleave with input events.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use crate::banner::BannerSession;
use crate::codec::{self, ShareParam};
use crate::config::{ClipboardFailurePolicy, PageConfig};
use crate::error::{NoteError, Result};
use crate::feedback::FeedbackPresenter;
use crate::note::NoteState;
use crate::policy::{ControlId, Enablement, EnablementPolicy};
use crate::ports::{AddressBar, Clipboard, Clock, Control, FileSaver, ImageEncoder, Panel, PanelId};
use crate::save;

pub const COPIED_LABEL: &str = "Copied!";
pub const COPY_FAILED_LABEL: &str = "Copy failed";

/// Platform capabilities handed to the controller.
#[derive(Clone)]
pub struct Ports {
    pub address_bar: Rc<dyn AddressBar>,
    pub clipboard: Rc<dyn Clipboard>,
    pub image: Rc<dyn ImageEncoder>,
    pub files: Rc<dyn FileSaver>,
    pub clock: Rc<dyn Clock>,
}

/// Buttons and panels the controller may touch. Anything not registered is
/// treated as absent from the page.
#[derive(Default)]
pub struct Surfaces {
    controls: HashMap<ControlId, Box<dyn Control>>,
    panels: HashMap<PanelId, Box<dyn Panel>>,
}

impl Surfaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_control(mut self, id: ControlId, control: impl Control + 'static) -> Self {
        self.controls.insert(id, Box::new(control));
        self
    }

    pub fn with_panel(mut self, id: PanelId, panel: impl Panel + 'static) -> Self {
        self.panels.insert(id, Box::new(panel));
        self
    }

    fn control_mut(&mut self, id: ControlId) -> Option<&mut (dyn Control + 'static)> {
        self.controls.get_mut(&id).map(|control| control.as_mut())
    }

    fn panel_mut(&mut self, id: PanelId) -> Option<&mut (dyn Panel + 'static)> {
        self.panels.get_mut(&id).map(|panel| panel.as_mut())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    /// Guard tripped: empty or oversized note, or a missing control.
    Skipped,
    Failed(NoteError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootReport {
    /// The note came from an inbound share link.
    pub hydrated: bool,
    /// The share parameter was stripped from the visible address.
    pub url_rewritten: bool,
}

struct PageState {
    note: NoteState,
    surfaces: Surfaces,
    feedback: FeedbackPresenter<ControlId>,
    banner: BannerSession,
}

#[derive(Clone)]
pub struct NoteController {
    state: Rc<RefCell<PageState>>,
    ports: Ports,
    config: Rc<PageConfig>,
    policy: EnablementPolicy,
}

impl NoteController {
    pub fn new(config: PageConfig, ports: Ports, surfaces: Surfaces) -> Self {
        let policy = EnablementPolicy::new(config.max_share_len);
        Self {
            state: Rc::new(RefCell::new(PageState {
                note: NoteState::new(),
                surfaces,
                feedback: FeedbackPresenter::new(),
                banner: BannerSession::new(),
            })),
            ports,
            config: Rc::new(config),
            policy,
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Hydrates the note from the address, strips the share parameter from
    /// it and runs the first enablement pass.
    pub fn bootstrap(&self) -> BootReport {
        let current = self.ports.address_bar.current_url();
        let param = codec::read_share_param(&current);
        let mut report = BootReport::default();

        {
            let mut state = self.state.borrow_mut();
            match &param {
                ShareParam::Text(text) => {
                    report.hydrated = !text.is_empty();
                    state.note.set(Some(text.clone()));
                }
                ShareParam::Absent | ShareParam::Malformed => {
                    if state.note.get().is_none() {
                        state.note.set(Some(String::new()));
                    }
                }
            }
        }

        if param.is_present() {
            match codec::strip_share_param(&current)
                .and_then(|clean| self.ports.address_bar.replace_url(&clean))
            {
                Ok(()) => report.url_rewritten = true,
                Err(e) => tracing::error!(error = %e, "failed to clean share parameter from address"),
            }
        }

        self.refresh_controls();
        tracing::info!(
            hydrated = report.hydrated,
            url_rewritten = report.url_rewritten,
            "note page bootstrapped"
        );
        report
    }

    pub fn text(&self) -> String {
        self.state.borrow().note.text().to_string()
    }

    pub fn on_input(&self, text: String) {
        self.state.borrow_mut().note.set(Some(text));
        self.refresh_controls();
    }

    pub fn enablement(&self) -> Enablement {
        self.policy.evaluate(self.state.borrow().note.len())
    }

    /// Re-applies the enablement policy to every control not currently
    /// showing feedback.
    pub fn refresh_controls(&self) {
        let mut state = self.state.borrow_mut();
        let PageState {
            note,
            surfaces,
            feedback,
            ..
        } = &mut *state;
        let enablement = self.policy.evaluate(note.len());

        for id in ControlId::ALL {
            if feedback.is_active(id) {
                continue;
            }
            if let Some(control) = surfaces.control_mut(id) {
                control.set_disabled(!enablement.get(id));
            }
        }
    }

    /// Shows `feedback` on a control for `duration`, then restores it.
    /// `on_complete` runs only if this session was not superseded.
    pub async fn show_temporary<F>(
        &self,
        id: ControlId,
        feedback: &str,
        duration: Duration,
        on_complete: F,
    ) -> bool
    where
        F: FnOnce(),
    {
        let ticket = {
            let mut state = self.state.borrow_mut();
            let PageState {
                surfaces,
                feedback: presenter,
                ..
            } = &mut *state;
            let Some(control) = surfaces.control_mut(id) else {
                tracing::warn!(control = ?id, "feedback target missing");
                return false;
            };
            presenter.begin(id, control, feedback)
        };

        self.ports.clock.sleep(duration).await;

        let restored = {
            let mut state = self.state.borrow_mut();
            let PageState {
                surfaces,
                feedback: presenter,
                ..
            } = &mut *state;
            match surfaces.control_mut(id) {
                Some(control) => presenter.finish(id, ticket, control),
                None => false,
            }
        };

        if restored {
            on_complete();
        }
        restored
    }

    pub async fn copy_text(&self) -> ActionOutcome {
        let text = self.text();
        if text.is_empty() {
            return ActionOutcome::Skipped;
        }
        self.copy_to_clipboard(ControlId::CopyText, text).await
    }

    pub async fn copy_link(&self) -> ActionOutcome {
        let link = match self.share_link() {
            Ok(Some(link)) => link,
            Ok(None) => return ActionOutcome::Skipped,
            Err(e) => {
                tracing::error!(error = %e, "failed to build share link");
                return ActionOutcome::Failed(e);
            }
        };
        self.copy_to_clipboard(ControlId::CopyLink, link).await
    }

    /// Share link for the current note, `None` when the note is empty or
    /// too long to embed.
    pub fn share_link(&self) -> Result<Option<String>> {
        let text = self.text();
        if !self.policy.is_enabled(ControlId::CopyLink, self.state.borrow().note.len()) {
            return Ok(None);
        }
        let current = self.ports.address_bar.current_url();
        codec::build_url(&current, &text).map(Some)
    }

    async fn copy_to_clipboard(&self, id: ControlId, payload: String) -> ActionOutcome {
        if !self.has_control(id) {
            tracing::warn!(control = ?id, "copy control missing; ignoring");
            return ActionOutcome::Skipped;
        }

        match self.ports.clipboard.write_text(&payload).await {
            Ok(()) => {
                tracing::debug!(control = ?id, bytes = payload.len(), "copied to clipboard");
                self.flash(id, COPIED_LABEL).await;
                ActionOutcome::Done
            }
            Err(e) => {
                tracing::error!(control = ?id, error = %e, "failed to copy to clipboard");
                if self.config.clipboard_failure == ClipboardFailurePolicy::Surface {
                    self.flash(id, COPY_FAILED_LABEL).await;
                }
                ActionOutcome::Failed(e)
            }
        }
    }

    async fn flash(&self, id: ControlId, label: &str) {
        let duration = self.config.feedback_duration();
        self.show_temporary(id, label, duration, || self.refresh_controls())
            .await;
    }

    pub fn generate_image(&self) -> ActionOutcome {
        let link = match self.share_link() {
            Ok(Some(link)) => link,
            Ok(None) => return ActionOutcome::Skipped,
            Err(e) => {
                tracing::error!(error = %e, "failed to build share link for image");
                return ActionOutcome::Failed(e);
            }
        };
        if !self.has_panel(PanelId::ImagePreview) {
            tracing::warn!("image preview panel missing; ignoring");
            return ActionOutcome::Skipped;
        }

        if let Err(e) = self.ports.image.clear() {
            tracing::warn!(error = %e, "failed to clear previous image");
        }
        if let Err(e) = self.ports.image.render(&link, self.config.image_size) {
            tracing::error!(error = %e, "image encoder failed");
            return ActionOutcome::Failed(e);
        }

        self.set_panel_visible(PanelId::ImagePreview, true);
        ActionOutcome::Done
    }

    pub fn dismiss_image(&self) {
        self.set_panel_visible(PanelId::ImagePreview, false);
    }

    pub fn save_file(&self) -> ActionOutcome {
        let text = self.text();
        if text.is_empty() {
            return ActionOutcome::Skipped;
        }

        let file = save::text_file(
            &self.config.file_prefix,
            &self.config.file_extension,
            self.ports.clock.now(),
            &text,
        );
        match self.ports.files.save(&file) {
            Ok(()) => {
                tracing::info!(filename = %file.filename, "note saved");
                ActionOutcome::Done
            }
            Err(e) => {
                tracing::error!(filename = %file.filename, error = %e, "failed to save note");
                ActionOutcome::Failed(e)
            }
        }
    }

    /// Shows the shared-link banner and hides it after the configured delay
    /// unless it was dismissed or reopened meanwhile. Returns whether the
    /// auto-hide fired.
    pub async fn run_banner(&self) -> bool {
        let ticket = {
            let mut state = self.state.borrow_mut();
            let PageState {
                surfaces, banner, ..
            } = &mut *state;
            let Some(panel) = surfaces.panel_mut(PanelId::Banner) else {
                tracing::warn!("banner panel missing; ignoring");
                return false;
            };
            let ticket = banner.open();
            panel.set_visible(true);
            ticket
        };

        self.ports.clock.sleep(self.config.banner_duration()).await;

        let mut state = self.state.borrow_mut();
        let PageState {
            surfaces, banner, ..
        } = &mut *state;
        if !banner.expire(ticket) {
            return false;
        }
        if let Some(panel) = surfaces.panel_mut(PanelId::Banner) {
            panel.set_visible(false);
        }
        true
    }

    pub fn dismiss_banner(&self) {
        self.state.borrow_mut().banner.dismiss();
        self.set_panel_visible(PanelId::Banner, false);
    }

    pub fn should_confirm_unload(&self) -> bool {
        !self.state.borrow().note.is_empty()
    }

    pub fn is_panel_visible(&self, id: PanelId) -> bool {
        let mut state = self.state.borrow_mut();
        state
            .surfaces
            .panel_mut(id)
            .map(|panel| panel.is_visible())
            .unwrap_or(false)
    }

    fn has_control(&self, id: ControlId) -> bool {
        self.state.borrow().surfaces.controls.contains_key(&id)
    }

    fn has_panel(&self, id: PanelId) -> bool {
        self.state.borrow().surfaces.panels.contains_key(&id)
    }

    fn set_panel_visible(&self, id: PanelId, visible: bool) {
        if let Some(panel) = self.state.borrow_mut().surfaces.panel_mut(id) {
            panel.set_visible(visible);
        }
    }
}
