mod client;
mod collector;
mod mapper;
pub mod snapshot;

pub use client::Client;
pub use collector::EnviromuxCollector;
