//! Known-application registry and package identifier validation

/// A Fire TV application the bridge can launch by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownApp {
    /// Stable registry key
    pub id: &'static str,
    /// Display name, also the source of the `LAUNCH_<NAME>` command
    pub name: &'static str,
    /// Package identifier the device launches
    pub package: &'static str,
}

/// Applications commonly installed on Fire TV devices.
///
/// The launch command for each entry is `LAUNCH_` followed by the
/// normalized display name, see [`launch_name`].
pub const TOP_APPS: &[KnownApp] = &[
    KnownApp {
        id: "netflix",
        name: "Netflix",
        package: "com.netflix.ninja",
    },
    KnownApp {
        id: "prime_video",
        name: "Prime Video",
        package: "com.amazon.avod",
    },
    KnownApp {
        id: "disney_plus",
        name: "Disney Plus",
        package: "com.disney.disneyplus",
    },
    KnownApp {
        id: "plex",
        name: "Plex",
        package: "com.plexapp.android",
    },
    KnownApp {
        id: "kodi",
        name: "Kodi",
        package: "org.xbmc.kodi",
    },
    KnownApp {
        id: "youtube",
        name: "YouTube",
        package: "com.amazon.firetv.youtube",
    },
    KnownApp {
        id: "hulu",
        name: "Hulu",
        package: "com.hulu.plus",
    },
    KnownApp {
        id: "spotify",
        name: "Spotify",
        package: "com.spotify.tv.android",
    },
    KnownApp {
        id: "paramount_plus",
        name: "Paramount+",
        package: "com.cbs.ott",
    },
    KnownApp {
        id: "apple_tv",
        name: "Apple TV",
        package: "com.apple.atve.amazon.appletv",
    },
];

/// Normalize a display name into its launch-command form: uppercase,
/// spaces become underscores, a plus sign becomes `PLUS`.
///
/// `"Prime Video"` becomes `PRIME_VIDEO`, `"Paramount+"` becomes
/// `PARAMOUNTPLUS`.
pub fn launch_name(name: &str) -> String {
    name.to_uppercase().replace(' ', "_").replace('+', "PLUS")
}

/// Find a registered application by its normalized launch name
pub fn find_by_launch_name(name: &str) -> Option<&'static KnownApp> {
    TOP_APPS
        .iter()
        .find(|app| launch_name(app.name).eq_ignore_ascii_case(name))
}

/// Validate an application package identifier.
///
/// Accepted: at least two dot-separated segments, each non-empty and
/// consisting only of ASCII alphanumerics or underscores.
pub fn is_valid_package_name(package: &str) -> bool {
    let mut segments = 0usize;
    for segment in package.split('.') {
        if segment.is_empty()
            || !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return false;
        }
        segments += 1;
    }
    segments >= 2
}

// ============================================================================
// Tests
// ============================================================================
