//! Test harness for CLI integration tests.
//!
//! Each test gets a temporary directory holding a config file and a notes
//! artifact, and drives the binary through `ShelfCommand`.

mod command;
mod env;
mod note;

#[allow(unused_imports)]
pub use command::ShelfCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
#[allow(unused_imports)]
pub use note::TestNote;
