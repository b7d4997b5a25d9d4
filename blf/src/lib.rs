//! Bottom-Left-Fill placement engine for [`nesty`], together with the stateful nesting [`Session`](session::Session)
//! and a command-line driver.

use std::sync::LazyLock;
use std::time::Instant;

pub mod config;
pub mod io;
pub mod opt;
pub mod session;

pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);
