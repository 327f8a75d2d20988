pub mod app;
pub mod chat_log;
pub mod config;
pub mod dispatch;
pub mod normalize;
pub mod paths;
pub mod reveal;
