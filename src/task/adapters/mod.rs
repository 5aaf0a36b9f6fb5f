//! Adapter implementations for task persistence ports.

pub mod fs;
pub mod key_value;
pub mod memory;
