/// Holder for the single note being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteState {
    text: Option<String>,
}

impl NoteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Stored text, `None` until the first `set`.
    pub fn get(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Stored text, empty when never initialized.
    pub fn text(&self) -> &str {
        self.get().unwrap_or_default()
    }

    /// Replaces the text when `next` is `Some`; `None` leaves it untouched.
    pub fn set(&mut self, next: Option<String>) -> Option<&str> {
        if let Some(text) = next {
            self.text = Some(text);
        }
        self.get()
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    /// Length as the browser reports it for a textarea (UTF-16 code units).
    pub fn len(&self) -> usize {
        self.text().encode_utf16().count()
    }
}
