pub mod sensor;
pub mod signal;
pub mod weather;

pub use sensor::*;
pub use signal::*;
pub use weather::*;
