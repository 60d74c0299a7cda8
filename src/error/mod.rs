pub mod body;
pub mod rejection;
