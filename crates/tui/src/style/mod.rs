//! Visual styling.
//!
//! A [`Theme`] is the full set of styles the sessions draw with. Built-in
//! themes are looked up by name; the default suits dark terminals.

mod theme;

pub use theme::{Theme, by_name, names};
