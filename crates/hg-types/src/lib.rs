pub mod errors;
pub mod point;
pub mod value;

pub use errors::*;
pub use point::*;
pub use value::*;
