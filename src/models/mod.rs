// Re-export all model types for ease of use

pub mod document;
pub mod responses;
pub mod user;

pub use document::*;
pub use responses::*;
pub use user::*;
