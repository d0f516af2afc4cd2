mod client;
mod types;
mod worker;

pub use client::*;
pub use types::*;
pub use worker::*;
