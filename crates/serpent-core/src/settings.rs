use std::fs;
use std::path::{Path, PathBuf};

/// Bounds for the configurable resume-countdown delay.
pub const RESUME_DELAY_MIN: u32 = 0;
pub const RESUME_DELAY_MAX: u32 = 10;
pub const RESUME_DELAY_DEFAULT: u32 = 3;

const SETTINGS_FILENAME: &str = "settings.ini";

/// Player-visible settings persisted across sessions.
///
/// Stored as plain `key=value` lines. Loaded once at session start, mutated
/// by the options screen, saved after each mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub high_score: u64,
    pub mute: bool,
    pub volume: f32,
    pub resume_delay_seconds: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_score: 0,
            mute: false,
            volume: 1.0,
            resume_delay_seconds: RESUME_DELAY_DEFAULT,
        }
    }
}

impl Settings {
    /// Force all fields into their documented ranges.
    pub fn clamp(&mut self) {
        self.volume = self.volume.clamp(0.0, 1.0);
        self.resume_delay_seconds = self
            .resume_delay_seconds
            .clamp(RESUME_DELAY_MIN, RESUME_DELAY_MAX);
    }

    fn to_file_string(&self) -> String {
        format!(
            "high_score={}\nmute={}\nvolume={:.3}\nresume_delay={}\n",
            self.high_score,
            if self.mute { 1 } else { 0 },
            self.volume,
            self.resume_delay_seconds
        )
    }

    /// Parse the `key=value` file format.
    ///
    /// Any unknown key or unparsable value is a format error; the caller
    /// recovers by resetting to defaults and rewriting the file.
    fn parse(text: &str) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(SettingsError::Format(format!(
                    "missing '=' in line: {line}"
                )));
            };
            match key.to_ascii_lowercase().as_str() {
                "high_score" => {
                    settings.high_score = value.parse().map_err(|_| {
                        SettingsError::Format(format!("invalid high_score value: {value}"))
                    })?;
                },
                "mute" => {
                    settings.mute = parse_bool(value).ok_or_else(|| {
                        SettingsError::Format(format!("invalid mute value: {value}"))
                    })?;
                },
                "volume" => {
                    settings.volume = value.parse().map_err(|_| {
                        SettingsError::Format(format!("invalid volume value: {value}"))
                    })?;
                },
                "resume_delay" => {
                    settings.resume_delay_seconds = value.parse().map_err(|_| {
                        SettingsError::Format(format!("invalid resume_delay value: {value}"))
                    })?;
                },
                other => {
                    return Err(SettingsError::Format(format!("unknown key: {other}")));
                },
            }
        }
        Ok(settings)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Format(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "settings file I/O failed: {e}"),
            Self::Format(m) => write!(f, "{m}"),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Where the settings file lives: a primary (executable-relative) path and a
/// current-directory fallback used when the primary is not writable.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    primary: PathBuf,
    fallback: PathBuf,
}

impl SettingsStore {
    /// Executable-relative primary path with a `./` fallback.
    pub fn default_paths() -> Self {
        let primary = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .map(|dir| dir.join(SETTINGS_FILENAME))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILENAME));
        Self {
            primary,
            fallback: PathBuf::from(SETTINGS_FILENAME),
        }
    }

    /// Single explicit path, used by tests.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            primary: path.clone(),
            fallback: path,
        }
    }

    /// Load settings, recovering from every failure mode.
    ///
    /// A missing file creates one with defaults. A malformed file resets to
    /// defaults and rewrites it. A readable file is clamped and rewritten so
    /// the on-disk copy always holds normalized values.
    pub fn load(&self) -> Settings {
        let mut settings = match self.read_first() {
            Ok(Some((s, path))) => {
                tracing::info!(path = %path.display(), "Loaded settings");
                s
            },
            Ok(None) => {
                tracing::info!(path = %self.primary.display(), "Settings file missing, creating defaults");
                Settings::default()
            },
            Err(e) => {
                tracing::warn!(error = %e, "Malformed settings file, resetting to defaults");
                Settings::default()
            },
        };
        settings.clamp();
        if let Err(e) = self.save(&settings) {
            tracing::warn!(error = %e, "Failed to rewrite settings with normalized values");
        }
        settings
    }

    /// Try the primary path, then the fallback. `Ok(None)` means neither file
    /// exists; a format error in whichever file was read propagates.
    fn read_first(&self) -> Result<Option<(Settings, &Path)>, SettingsError> {
        for path in [self.primary.as_path(), self.fallback.as_path()] {
            match fs::read_to_string(path) {
                Ok(text) => return Settings::parse(&text).map(|s| Some((s, path))),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to read settings file");
                },
            }
        }
        Ok(None)
    }

    /// Persist settings via write-temp-then-rename, falling back to the
    /// secondary path when the primary location is not writable.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        match write_atomic(&self.primary, settings) {
            Ok(()) => Ok(()),
            Err(e) if self.primary != self.fallback => {
                tracing::warn!(
                    path = %self.primary.display(),
                    error = %e,
                    "Primary settings path not writable, using fallback"
                );
                write_atomic(&self.fallback, settings)
            },
            Err(e) => Err(e),
        }
    }
}

fn write_atomic(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    let temp = PathBuf::from(temp);

    fs::write(&temp, settings.to_file_string())?;
    fs::rename(&temp, path)?;
    tracing::debug!(path = %path.display(), "Settings saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> SettingsStore {
        let path = std::env::temp_dir().join(format!("serpent-settings-{}-{name}", std::process::id()));
        let _ = fs::remove_file(&path);
        SettingsStore::at(path)
    }

    #[test]
    fn defaults_are_sane() {
        let s = Settings::default();
        assert_eq!(s.high_score, 0);
        assert!(!s.mute);
        assert_eq!(s.volume, 1.0);
        assert_eq!(s.resume_delay_seconds, RESUME_DELAY_DEFAULT);
    }

    #[test]
    fn roundtrip_through_file_format() {
        let original = Settings {
            high_score: 42,
            mute: true,
            volume: 0.73,
            resume_delay_seconds: 5,
        };
        let parsed = Settings::parse(&original.to_file_string()).unwrap();
        assert_eq!(parsed.high_score, 42);
        assert!(parsed.mute);
        assert!((parsed.volume - 0.73).abs() < 0.001);
        assert_eq!(parsed.resume_delay_seconds, 5);
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let parsed = Settings::parse("# comment\n\nhigh_score=7\n").unwrap();
        assert_eq!(parsed.high_score, 7);
    }

    #[test]
    fn parse_accepts_bool_spellings() {
        assert!(Settings::parse("mute=YES\n").unwrap().mute);
        assert!(!Settings::parse("mute=0\n").unwrap().mute);
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert!(matches!(
            Settings::parse("high_score 10\n"),
            Err(SettingsError::Format(_))
        ));
    }

    #[test]
    fn parse_rejects_unknown_key() {
        assert!(matches!(
            Settings::parse("frobnicate=1\n"),
            Err(SettingsError::Format(_))
        ));
    }

    #[test]
    fn parse_rejects_bad_value() {
        assert!(Settings::parse("volume=loud\n").is_err());
        assert!(Settings::parse("resume_delay=-1\n").is_err());
    }

    #[test]
    fn clamp_bounds_volume_and_delay() {
        let mut s = Settings {
            high_score: 0,
            mute: false,
            volume: 1.7,
            resume_delay_seconds: 99,
        };
        s.clamp();
        assert_eq!(s.volume, 1.0);
        assert_eq!(s.resume_delay_seconds, RESUME_DELAY_MAX);
    }

    #[test]
    fn missing_file_creates_defaults_on_disk() {
        let store = temp_store("missing");
        let loaded = store.load();
        assert_eq!(loaded, Settings::default());
        let reread = store.load();
        assert_eq!(reread, Settings::default());
    }

    #[test]
    fn malformed_file_resets_to_defaults() {
        let store = temp_store("malformed");
        fs::write(&store.primary, "volume=banana\n").unwrap();
        let loaded = store.load();
        assert_eq!(loaded, Settings::default());
        // The rewrite must have replaced the malformed contents.
        let text = fs::read_to_string(&store.primary).unwrap();
        assert!(text.contains("volume=1.000"));
    }

    #[test]
    fn out_of_range_values_normalized_on_load() {
        let store = temp_store("clamped");
        fs::write(&store.primary, "volume=2.5\nresume_delay=50\n").unwrap();
        let loaded = store.load();
        assert_eq!(loaded.volume, 1.0);
        assert_eq!(loaded.resume_delay_seconds, RESUME_DELAY_MAX);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let store = temp_store("save");
        let settings = Settings {
            high_score: 1234,
            mute: true,
            volume: 0.25,
            resume_delay_seconds: 1,
        };
        store.save(&settings).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.high_score, 1234);
        assert!(loaded.mute);
        assert!((loaded.volume - 0.25).abs() < 0.001);
        assert_eq!(loaded.resume_delay_seconds, 1);
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let store = temp_store("tmpfile");
        store.save(&Settings::default()).unwrap();
        let mut temp = store.primary.as_os_str().to_owned();
        temp.push(".tmp");
        assert!(!PathBuf::from(temp).exists());
    }
}
