//! Configuration loading and resolution.
//!
//! Values are layered from default files, `--config` files, `CHEW__*`
//! environment variables and finally command-line flags, then validated into
//! a [`ResolvedConfig`]. `load` is the entry point.

mod loader;
mod raw;
mod resolved;
mod sources;

pub(crate) use loader::load;
pub(crate) use resolved::ResolvedConfig;
