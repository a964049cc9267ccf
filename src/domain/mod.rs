mod format;
mod vehicle;

pub use format::*;
pub use vehicle::*;
