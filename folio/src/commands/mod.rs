pub mod email;
pub mod revalidate;
pub mod serve;
