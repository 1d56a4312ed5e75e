pub mod category;
pub mod color;
pub mod descriptor;

pub use category::*;
pub use color::*;
pub use descriptor::*;
