mod client;
mod failure;
mod feed;
mod reading;

pub use client::*;
pub use failure::*;
pub use feed::*;
pub use reading::*;
