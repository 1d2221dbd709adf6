//! Route handlers.

mod contacts;
mod system;
mod todos;


pub use contacts::*;
pub use system::*;
pub use todos::*;
