//! Top-level facade crate for MARS.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use mars_core::*;
}

pub mod server {
    pub use mars_server::*;
}
