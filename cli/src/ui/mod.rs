mod events;
mod selector;

pub use events::*;
pub use selector::*;
