//! CLI command implementations for declmap operations.
//!
//! Available commands:
//! - **extract**: Print signature records as JSON or text
//! - **emit**: Print the declaration document
//! - **init**: Initialize a new declmap configuration file

pub mod emit;
pub mod extract;
pub mod init;

pub use emit::handle_emit;
pub use extract::{handle_extract, ExtractConfig};
pub use init::init_config;
