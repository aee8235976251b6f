pub mod config;
pub mod controls;
pub mod interop;
pub mod page;

pub use config::page_config;
pub use controls::*;
pub use interop::*;
pub use page::*;
