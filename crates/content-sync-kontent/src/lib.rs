pub mod client;
pub mod responses;

pub use client::{DEFAULT_BASE_URL, ManagementClient, ManagementClientConfig};
