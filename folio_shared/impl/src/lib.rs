pub mod id;
pub mod secret;
pub mod time;
