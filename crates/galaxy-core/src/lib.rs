pub mod config;
pub mod constants;
pub mod device;
pub mod drift;
pub mod error;
pub mod heart;
pub mod interaction;
pub mod pool;
pub mod session;
pub mod stars;
pub mod trigger;

pub use config::*;
pub use constants::*;
pub use device::*;
pub use drift::*;
pub use error::*;
pub use heart::*;
pub use interaction::*;
pub use pool::*;
pub use session::*;
pub use stars::*;
pub use trigger::*;
