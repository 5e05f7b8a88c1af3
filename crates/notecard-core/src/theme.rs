use crate::{Error, KeyValueStore};
use log::{debug, warn};
use std::fmt;

/// Storage key holding the theme flag.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse a stored flag. Only the literal `"dark"` selects the dark theme.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            Some("light") | None => Theme::Light,
            Some(other) => {
                warn!("unknown stored theme {:?}, using light", other);
                Theme::Light
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A display that can switch between light and dark modes.
pub trait ThemeTarget {
    fn apply(&mut self, theme: Theme);
}

/// Target for front ends with nothing to restyle.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl ThemeTarget for Headless {
    fn apply(&mut self, _theme: Theme) {}
}

/// Persisted light/dark preference.
pub struct ThemePreference<S: KeyValueStore, T: ThemeTarget> {
    kv: S,
    target: T,
    current: Theme,
}

impl<S: KeyValueStore, T: ThemeTarget> ThemePreference<S, T> {
    pub fn new(kv: S, target: T) -> Self {
        Self {
            kv,
            target,
            current: Theme::Light,
        }
    }

    /// Restore and apply the persisted theme.
    pub fn load(&mut self) -> Result<Theme, Error> {
        let stored = self.kv.get(THEME_KEY)?;
        let theme = Theme::from_stored(stored.as_deref());
        self.apply(theme);
        Ok(theme)
    }

    /// Flip the applied theme and persist the result.
    pub fn toggle(&mut self) -> Result<Theme, Error> {
        let theme = self.current.flipped();
        self.apply(theme);
        self.kv.set(THEME_KEY, theme.as_str())?;
        Ok(theme)
    }

    pub fn apply(&mut self, theme: Theme) {
        debug!("applying {} theme", theme);
        self.current = theme;
        self.target.apply(theme);
    }

    /// The theme currently applied.
    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[derive(Default)]
    struct Recorder(Vec<Theme>);

    impl ThemeTarget for Recorder {
        fn apply(&mut self, theme: Theme) {
            self.0.push(theme);
        }
    }

    #[test]
    fn test_load_defaults_to_light() {
        let kv = MemoryStore::new();
        let mut pref = ThemePreference::new(&kv, Recorder::default());
        assert_eq!(pref.load().unwrap(), Theme::Light);
        assert_eq!(pref.target().0, vec![Theme::Light]);
    }

    #[test]
    fn test_load_only_literal_dark() {
        for (stored, expected) in [
            ("dark", Theme::Dark),
            ("light", Theme::Light),
            ("Dark", Theme::Light),
            ("", Theme::Light),
        ] {
            let kv = MemoryStore::new();
            kv.set(THEME_KEY, stored).unwrap();
            let mut pref = ThemePreference::new(&kv, Headless);
            assert_eq!(pref.load().unwrap(), expected, "{:?}", stored);
            assert_eq!(pref.current(), expected);
        }
    }

    #[test]
    fn test_toggle_persists() {
        let kv = MemoryStore::new();
        let mut pref = ThemePreference::new(&kv, Recorder::default());
        pref.load().unwrap();

        assert_eq!(pref.toggle().unwrap(), Theme::Dark);
        assert_eq!(kv.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(pref.target().0, vec![Theme::Light, Theme::Dark]);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let kv = MemoryStore::new();
        kv.set(THEME_KEY, "dark").unwrap();
        let mut pref = ThemePreference::new(&kv, Headless);
        let original = pref.load().unwrap();

        pref.toggle().unwrap();
        assert_eq!(pref.toggle().unwrap(), original);
        assert_eq!(pref.current(), original);
        assert_eq!(kv.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }
}
