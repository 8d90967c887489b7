//! Building blocks shared by every builder: file system and process access,
//! toolchain discovery, manifest scanning and parallel aggregation

pub mod events;
pub mod fs;
pub mod locator;
pub mod parallel;
pub mod process;
pub mod scanner;

pub use events::EventLog;
pub use fs::{FileSystem, MemoryFileSystem, RealFileSystem};
pub use locator::Locator;
pub use process::{CommandOutput, CommandRunner, ScriptedRunner, SystemRunner};
