//! Port traits defining external boundaries.
//!
//! The core never touches processes or files directly; it goes through
//! these traits so commands can run against live, recording or replaying
//! adapters. Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod shell;

pub use filesystem::FileSystem;
pub use shell::{ShellExecutor, ShellOutput};
