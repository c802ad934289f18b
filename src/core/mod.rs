//! Runtime infrastructure shared by the store and the platform backends:
//! tagged logging, the log ring buffer and its router.

pub mod log_buffer;
pub mod log_router;
pub mod logging;
pub mod traits;
