pub mod ast;
pub mod context;
pub mod driver;
pub mod envelope;
pub mod error;
pub mod lookup;
pub mod segment;
pub mod api;

pub use api::{encode, encode_with, EncodedInterchange};
