pub mod event;
pub mod macros;
pub mod shift;
pub mod time;
pub mod volunteer;

pub use event::*;
pub use shift::*;
pub use time::*;
pub use volunteer::*;
