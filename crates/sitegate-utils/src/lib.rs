pub mod atomic_write;
pub mod clock;
pub mod logging;
