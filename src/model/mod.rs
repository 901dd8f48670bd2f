mod event;
mod map;
mod rows;

pub use event::*;
pub use map::*;
pub use rows::*;
