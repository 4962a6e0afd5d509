pub mod response;

pub use response::{created, MessageResponse};
