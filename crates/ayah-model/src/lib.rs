pub mod catalog;
pub mod reference;
pub mod verse;

pub use catalog::*;
pub use reference::*;
pub use verse::*;
