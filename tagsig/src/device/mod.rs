// tagsig/src/device/mod.rs

pub mod handle;
pub mod poller;
pub mod transfer;

pub use handle::Tag;
