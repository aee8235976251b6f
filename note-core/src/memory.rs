//! In-process port implementations.
//!
//! Handles are cheap clones over shared cells so a test can keep one copy
//! and give another to the controller.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use futures::channel::oneshot;

use crate::error::{NoteError, Result};
use crate::ports::{AddressBar, Clipboard, Clock, Control, FileSaver, ImageEncoder, Panel};
use crate::save::SaveFile;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlView {
    pub content: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryControl(Rc<RefCell<ControlView>>);

impl MemoryControl {
    pub fn new(content: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(ControlView {
            content: content.into(),
            disabled: false,
        })))
    }

    pub fn view(&self) -> ControlView {
        self.0.borrow().clone()
    }
}

impl Control for MemoryControl {
    fn content(&self) -> String {
        self.0.borrow().content.clone()
    }

    fn set_content(&mut self, content: String) {
        self.0.borrow_mut().content = content;
    }

    fn is_disabled(&self) -> bool {
        self.0.borrow().disabled
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPanel(Rc<Cell<bool>>);

impl MemoryPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Panel for MemoryPanel {
    fn is_visible(&self) -> bool {
        self.0.get()
    }

    fn set_visible(&mut self, visible: bool) {
        self.0.set(visible);
    }
}

#[derive(Debug, Default)]
pub struct MemoryAddressBar {
    url: RefCell<String>,
    replacements: Cell<usize>,
}

impl MemoryAddressBar {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: RefCell::new(url.into()),
            replacements: Cell::new(0),
        }
    }

    pub fn replacements(&self) -> usize {
        self.replacements.get()
    }
}

impl AddressBar for MemoryAddressBar {
    fn current_url(&self) -> String {
        self.url.borrow().clone()
    }

    fn replace_url(&self, url: &str) -> Result<()> {
        *self.url.borrow_mut() = url.to_string();
        self.replacements.set(self.replacements.get() + 1);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: RefCell<Option<String>>,
    reject_with: RefCell<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }

    /// Make every following write fail with `reason`.
    pub fn reject(&self, reason: impl Into<String>) {
        *self.reject_with.borrow_mut() = Some(reason.into());
    }
}

#[async_trait(?Send)]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        if let Some(reason) = self.reject_with.borrow().clone() {
            return Err(NoteError::Clipboard(reason));
        }
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryImageEncoder {
    rendered: RefCell<Option<(String, u32)>>,
    clears: Cell<usize>,
    broken: Cell<bool>,
}

impl MemoryImageEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered(&self) -> Option<(String, u32)> {
        self.rendered.borrow().clone()
    }

    pub fn clears(&self) -> usize {
        self.clears.get()
    }

    pub fn break_encoder(&self) {
        self.broken.set(true);
    }
}

impl ImageEncoder for MemoryImageEncoder {
    fn clear(&self) -> Result<()> {
        self.clears.set(self.clears.get() + 1);
        *self.rendered.borrow_mut() = None;
        Ok(())
    }

    fn render(&self, payload: &str, size: u32) -> Result<()> {
        if self.broken.get() {
            return Err(NoteError::ImageEncoder("encoder unavailable".to_string()));
        }
        *self.rendered.borrow_mut() = Some((payload.to_string(), size));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryFileSaver {
    saved: RefCell<Vec<SaveFile>>,
}

impl MemoryFileSaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Vec<SaveFile> {
        self.saved.borrow().clone()
    }
}

impl FileSaver for MemoryFileSaver {
    fn save(&self, file: &SaveFile) -> Result<()> {
        self.saved.borrow_mut().push(file.clone());
        Ok(())
    }
}

/// Virtual clock: sleeps resolve only when [`ManualClock::advance`] moves
/// time past their deadline.
#[derive(Debug)]
pub struct ManualClock {
    wall: Cell<NaiveDateTime>,
    elapsed: Cell<Duration>,
    timers: RefCell<Vec<(Duration, oneshot::Sender<()>)>>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            wall: Cell::new(start),
            elapsed: Cell::new(Duration::ZERO),
            timers: RefCell::new(Vec::new()),
        }
    }

    pub fn set_wall(&self, at: NaiveDateTime) {
        self.wall.set(at);
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Moves time forward and wakes every sleep that has come due.
    pub fn advance(&self, by: Duration) {
        let now = self.elapsed.get() + by;
        self.elapsed.set(now);
        if let Ok(step) = chrono::Duration::from_std(by) {
            self.wall.set(self.wall.get() + step);
        }

        let due: Vec<oneshot::Sender<()>> = {
            let mut timers = self.timers.borrow_mut();
            let (due, waiting): (Vec<_>, Vec<_>) =
                timers.drain(..).partition(|(deadline, _)| *deadline <= now);
            *timers = waiting;
            due.into_iter().map(|(_, tx)| tx).collect()
        };

        for tx in due {
            let _ = tx.send(());
        }
    }
}

#[async_trait(?Send)]
impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.wall.get()
    }

    async fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        let (tx, rx) = oneshot::channel();
        let deadline = self.elapsed.get() + duration;
        self.timers.borrow_mut().push((deadline, tx));
        let _ = rx.await;
    }
}
