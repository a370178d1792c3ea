pub mod client;

pub use client::MetarepoClient;
