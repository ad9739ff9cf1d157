//! Text rendering of generated code.
//!
//! - [`doc`]: layout IR
//! - [`printer`]: width-aware printer for the IR
//! - [`java`]: expressions, bodies and inter-type method declarations

pub mod doc;
pub mod java;
pub mod printer;

pub use printer::{print, FormatConfig};
