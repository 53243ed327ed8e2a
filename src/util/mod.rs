pub mod error;
pub mod extract;
pub mod hash;
pub mod json;
