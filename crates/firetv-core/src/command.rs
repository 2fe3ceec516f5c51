//! Typed command model and translation from external command strings
//!
//! External callers hand the bridge plain command strings. This module
//! turns them into typed commands exactly once, at the edge; everything
//! past [`RemoteCommand::parse`] works with enums and exhaustive
//! matches, so an unhandled command kind is a compile error rather than
//! a runtime surprise.

use thiserror::Error;

use crate::apps::{find_by_launch_name, is_valid_package_name};

/// Prefix for launching an application registered in [`crate::apps::TOP_APPS`]
pub const LAUNCH_PREFIX: &str = "LAUNCH_";

/// Prefix for launching an arbitrary application by package identifier
pub const CUSTOM_APP_PREFIX: &str = "custom_app:";

/// Errors produced while translating a command string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The string matches no control action, media action or prefix
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// `LAUNCH_<NAME>` where `<NAME>` matches no registered application
    #[error("no application registered for launch command LAUNCH_{0}")]
    UnknownApp(String),

    /// `custom_app:` with a malformed package identifier
    #[error("invalid application package identifier: {0:?}")]
    InvalidPackage(String),
}

/// Directional, navigation and power actions, sent on the control route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlCommand {
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    Select,
    Home,
    Back,
    Menu,
    Epg,
    VolumeUp,
    VolumeDown,
    Mute,
    Power,
    Sleep,
}

impl ControlCommand {
    /// Every control action, in wire order
    pub const ALL: [ControlCommand; 14] = [
        ControlCommand::DpadUp,
        ControlCommand::DpadDown,
        ControlCommand::DpadLeft,
        ControlCommand::DpadRight,
        ControlCommand::Select,
        ControlCommand::Home,
        ControlCommand::Back,
        ControlCommand::Menu,
        ControlCommand::Epg,
        ControlCommand::VolumeUp,
        ControlCommand::VolumeDown,
        ControlCommand::Mute,
        ControlCommand::Power,
        ControlCommand::Sleep,
    ];

    /// Wire name carried in the `action` query parameter
    pub fn action(&self) -> &'static str {
        match self {
            ControlCommand::DpadUp => "dpad_up",
            ControlCommand::DpadDown => "dpad_down",
            ControlCommand::DpadLeft => "dpad_left",
            ControlCommand::DpadRight => "dpad_right",
            ControlCommand::Select => "select",
            ControlCommand::Home => "home",
            ControlCommand::Back => "back",
            ControlCommand::Menu => "menu",
            ControlCommand::Epg => "epg",
            ControlCommand::VolumeUp => "volume_up",
            ControlCommand::VolumeDown => "volume_down",
            ControlCommand::Mute => "mute",
            ControlCommand::Power => "power",
            ControlCommand::Sleep => "sleep",
        }
    }

    /// Look up a control action by name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        ControlCommand::ALL
            .into_iter()
            .find(|command| command.action().eq_ignore_ascii_case(name))
    }
}

/// Playback actions, sent on the media route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaCommand {
    PlayPause,
    Pause,
    FastForward,
    Rewind,
}

impl MediaCommand {
    /// Every media action, in wire order
    pub const ALL: [MediaCommand; 4] = [
        MediaCommand::PlayPause,
        MediaCommand::Pause,
        MediaCommand::FastForward,
        MediaCommand::Rewind,
    ];

    /// Wire name carried in the `action` query parameter
    pub fn action(&self) -> &'static str {
        match self {
            MediaCommand::PlayPause => "play_pause",
            MediaCommand::Pause => "pause",
            MediaCommand::FastForward => "fast_forward",
            MediaCommand::Rewind => "rewind",
        }
    }

    /// Look up a media action by name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        MediaCommand::ALL
            .into_iter()
            .find(|command| command.action().eq_ignore_ascii_case(name))
    }
}

/// A fully translated command, ready for dispatch to the transport client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCommand {
    /// Navigation or power action on the control route
    Control(ControlCommand),
    /// Playback action on the media route
    Media(MediaCommand),
    /// Launch an application by package identifier
    LaunchApp {
        /// Package identifier, e.g. `com.netflix.ninja`
        package: String,
    },
}

impl RemoteCommand {
    /// Translate an external command string into a typed command.
    ///
    /// Recognized forms, in order:
    /// 1. `custom_app:<package>` launches `<package>` verbatim after
    ///    validating it as a package identifier. The registry is not
    ///    consulted.
    /// 2. `LAUNCH_<NAME>` launches the registered application whose
    ///    normalized display name equals `<NAME>`.
    /// 3. Control and media action names (`dpad_up`, `play_pause`, ...).
    ///
    /// All matching is case-insensitive and the input is trimmed.
    pub fn parse(raw: &str) -> Result<Self, CommandError> {
        let trimmed = raw.trim();

        if let Some(rest) = strip_prefix_ignore_case(trimmed, CUSTOM_APP_PREFIX) {
            let package = rest.trim();
            if !is_valid_package_name(package) {
                return Err(CommandError::InvalidPackage(package.to_string()));
            }
            return Ok(RemoteCommand::LaunchApp {
                package: package.to_string(),
            });
        }

        if let Some(rest) = strip_prefix_ignore_case(trimmed, LAUNCH_PREFIX) {
            let wanted = rest.to_ascii_uppercase();
            return match find_by_launch_name(&wanted) {
                Some(app) => Ok(RemoteCommand::LaunchApp {
                    package: app.package.to_string(),
                }),
                None => Err(CommandError::UnknownApp(rest.to_string())),
            };
        }

        if let Some(control) = ControlCommand::from_name(trimmed) {
            return Ok(RemoteCommand::Control(control));
        }
        if let Some(media) = MediaCommand::from_name(trimmed) {
            return Ok(RemoteCommand::Media(media));
        }

        Err(CommandError::UnknownCommand(trimmed.to_string()))
    }
}

impl From<ControlCommand> for RemoteCommand {
    fn from(command: ControlCommand) -> Self {
        RemoteCommand::Control(command)
    }
}

impl From<MediaCommand> for RemoteCommand {
    fn from(command: MediaCommand) -> Self {
        RemoteCommand::Media(command)
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

// ============================================================================
// Tests
// ============================================================================
