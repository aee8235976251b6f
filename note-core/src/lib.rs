//! ShareNote core
//!
//! Everything the share-note page does that does not need a browser:
//! - the `t` query-parameter codec and share-link building
//! - note state, the enablement policy and the feedback/banner sessions
//! - the drag state machine for the image preview
//! - [`NoteController`], which runs the user actions against [`ports`]
//!
//! The web front-end implements the ports over `web-sys`; [`memory`] holds
//! in-process implementations.

pub mod banner;
pub mod codec;
pub mod config;
pub mod controller;
pub mod drag;
pub mod error;
pub mod feedback;
pub mod memory;
pub mod note;
pub mod policy;
pub mod ports;
pub mod save;

pub use codec::{build_url, decode, encode, shared_text, QUERY_PARAM_KEY};
pub use config::{ClipboardFailurePolicy, PageConfig};
pub use controller::{
    ActionOutcome, BootReport, NoteController, Ports, Surfaces, COPIED_LABEL, COPY_FAILED_LABEL,
};
pub use drag::{DragController, Point};
pub use error::{NoteError, Result};
pub use policy::{ControlId, Enablement, EnablementPolicy};
pub use ports::PanelId;
