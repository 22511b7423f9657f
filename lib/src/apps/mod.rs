mod control;
mod countdown;

pub use control::*;
pub use countdown::*;
