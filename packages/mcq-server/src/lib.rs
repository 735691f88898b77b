// MCQ generation service and command-line front-end
//
// The `server` binary exposes question generation over HTTP for browser
// front-ends that cannot hold a model key. The `mcq` binary runs the full
// extract-then-generate flow from a terminal.

pub mod config;
pub mod render;
pub mod server;

pub use config::*;
