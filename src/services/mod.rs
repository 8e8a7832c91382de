pub mod chat_api_cloud;
pub mod formatter;
pub mod prompt;
pub mod session;
pub mod settings;
