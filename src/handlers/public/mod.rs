// handlers/public/mod.rs - endpoints reachable without a session

pub mod system;

pub use system::{fallback, health, root};
