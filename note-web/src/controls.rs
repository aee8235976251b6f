//! Signal-backed buttons and panels handed to the controller.
//!
//! Reads go through `peek` so controller bookkeeping never subscribes the
//! calling scope.

use dioxus::prelude::{ReadableExt, Signal, WritableExt};
use note_core::ports::{Control, Panel};

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonView {
    pub label: String,
    pub disabled: bool,
}

impl ButtonView {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            disabled: true,
        }
    }
}

#[derive(Clone, Copy)]
pub struct SignalControl(pub Signal<ButtonView>);

impl Control for SignalControl {
    fn content(&self) -> String {
        self.0.peek().label.clone()
    }

    fn set_content(&mut self, content: String) {
        self.0.write().label = content;
    }

    fn is_disabled(&self) -> bool {
        self.0.peek().disabled
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.0.write().disabled = disabled;
    }
}

#[derive(Clone, Copy)]
pub struct SignalPanel(pub Signal<bool>);

impl Panel for SignalPanel {
    fn is_visible(&self) -> bool {
        *self.0.peek()
    }

    fn set_visible(&mut self, visible: bool) {
        self.0.set(visible);
    }
}
