pub mod recorder;
pub mod session;
