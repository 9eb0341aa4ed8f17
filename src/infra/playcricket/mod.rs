mod client;

pub use client::PlayCricketSource;
