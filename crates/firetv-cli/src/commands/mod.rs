//! Command implementations for firetv-cli

pub mod apps;
pub mod devices;
pub mod pair;
pub mod probe;
pub mod send;

pub use apps::apps;
pub use devices::devices;
pub use pair::pair;
pub use probe::{ping, wake};
pub use send::send;
