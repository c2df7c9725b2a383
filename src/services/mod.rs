//! Service layer for I/O and output-format concerns

pub mod format;
pub mod io;

pub use format::OutputFormatHandler;
pub use io::{ImageIOService, DEFAULT_OUTPUT_NAME};
