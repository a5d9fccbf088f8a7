pub mod cdn;
pub mod content;
pub mod email;
mod http;
