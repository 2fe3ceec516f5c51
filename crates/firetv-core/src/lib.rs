//! firetv-core - Core types for the Fire TV bridge
//!
//! This crate provides the shared vocabulary of the bridge: the stored
//! device record, the typed command model with its translation rules,
//! the known-application registry, and the `DeviceSession` trait that
//! supervisors drive.

pub mod apps;
pub mod command;
pub mod error;
pub mod models;
pub mod session;

pub use apps::{find_by_launch_name, is_valid_package_name, launch_name, KnownApp, TOP_APPS};
pub use command::{
    CommandError, ControlCommand, MediaCommand, RemoteCommand, CUSTOM_APP_PREFIX, LAUNCH_PREFIX,
};
pub use error::{DeviceError, DeviceResult};
pub use models::{device_identifier, mask_token, DeviceConfig, DEFAULT_PORT};
pub use session::DeviceSession;
