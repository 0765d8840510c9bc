pub mod naming;
pub mod search;
pub mod symbol;

pub use naming::*;
pub use search::*;
pub use symbol::*;
