// Public API for integration tests and potential library usage

pub mod error;
pub mod matching;
pub mod notify;
pub mod protocol;
pub mod server;
pub mod source;
pub mod state;
pub mod transport;
pub mod types;
