//! Persisted sync session state.

/// The sync flags persisted in the settings table.
///
/// This is a read-time snapshot: the engine re-reads it from the store at
/// every operation rather than caching it, so concurrent daymark processes
/// observe each other's session changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Id of the remote snapshot this profile is bound to. `None` when
    /// logged out.
    pub remote_id: Option<String>,
    /// The snapshot `updated_at` last known to be reconciled (just pushed
    /// or just pulled). Epoch millis; 0 means "never synced".
    pub last_sync_timestamp: i64,
    /// Local writes exist that have not been confirmed pushed.
    pub dirty: bool,
    /// The next pull must apply the remote unconditionally, dirty or not.
    /// Set by token import, cleared by the forced apply.
    pub force_pull: bool,
    pub authenticated: bool,
}

impl Session {
    pub fn logged_in(&self) -> bool {
        self.remote_id.is_some()
    }
}

/// UI theme preference. Persisted alongside the session flags but not
/// cleared by logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Unrecognized values fall back to the default rather than erroring,
    /// so a hand-edited settings row can't break startup.
    pub fn parse(value: &str) -> Theme {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parse_roundtrip() {
        assert_eq!(Theme::parse(Theme::Dark.as_str()), Theme::Dark);
        assert_eq!(Theme::parse(Theme::Light.as_str()), Theme::Light);
    }

    #[test]
    fn test_theme_parse_falls_back_to_light() {
        assert_eq!(Theme::parse("solarized"), Theme::Light);
        assert_eq!(Theme::parse(""), Theme::Light);
    }
}
