#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod logging;

#[doc(inline)]
pub use app::launch;
pub use estuary_core::*;
