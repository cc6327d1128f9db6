pub mod descriptor;
pub mod format;
pub mod source;

pub use descriptor::*;
pub use format::*;
pub use source::*;
