pub mod client;
pub mod transport;

pub use client::TeamTrackerApi;
pub use transport::ConvocationApi;
