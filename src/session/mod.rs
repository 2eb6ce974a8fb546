pub mod session_engine;
pub mod zone;
