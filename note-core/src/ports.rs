//! Seams between the controller and the browser.
//!
//! The web crate implements these over `web-sys`; [`crate::memory`] has
//! in-process versions for headless runs and tests.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::Result;
use crate::save::SaveFile;

/// A button whose label and disabled flag the controller drives.
pub trait Control {
    fn content(&self) -> String;
    fn set_content(&mut self, content: String);
    fn is_disabled(&self) -> bool;
    fn set_disabled(&mut self, disabled: bool);
}

/// Toggled surfaces of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    ImagePreview,
    Banner,
}

pub trait Panel {
    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
}

pub trait AddressBar {
    fn current_url(&self) -> String;
    /// Swap the visible address without navigating or adding history.
    fn replace_url(&self, url: &str) -> Result<()>;
}

#[async_trait(?Send)]
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// The external scannable-image widget.
pub trait ImageEncoder {
    fn clear(&self) -> Result<()>;
    fn render(&self, payload: &str, size: u32) -> Result<()>;
}

pub trait FileSaver {
    fn save(&self, file: &SaveFile) -> Result<()>;
}

#[async_trait(?Send)]
pub trait Clock {
    /// Wall-clock local time.
    fn now(&self) -> NaiveDateTime;
    async fn sleep(&self, duration: Duration);
}
