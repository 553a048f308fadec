use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::db::{self, DbError};

pub const PREFERENCES_FILE: &str = "preferences.sqlite";

pub const PSO2_DATA_PATH: &str = "pso2_data_path";
pub const DEFAULT_SKIN_T1: &str = "default_skin_t1";
pub const DEFAULT_SKIN_T2: &str = "default_skin_t2";
pub const HIGH_QUALITY: &str = "high_quality";

/// Keys accepted by [`Preferences::set`].
pub const KEYS: [&str; 4] = [PSO2_DATA_PATH, DEFAULT_SKIN_T1, DEFAULT_SKIN_T2, HIGH_QUALITY];

const STEAM_GAME_DIR: &str = "SteamApps/common/PHANTASYSTARONLINE2_NA_STEAM/pso2_bin/data";
const WINDOWS_STORE_DIR: &str = "ModifiableWindowsApps/pso2_bin/data";

#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("unknown preference \"{0}\"")]
    UnknownKey(String),
    #[error("invalid value \"{value}\" for {key}")]
    InvalidValue { key: String, value: String },
}

/// Key/value settings persisted in the state directory.
pub struct Preferences {
    db: db::DB,
}

impl Preferences {
    pub fn open(state_dir: &Path) -> Result<Self, PreferencesError> {
        let db = db::DB::open(&db::state_file(state_dir, PREFERENCES_FILE))?;
        let preferences = Self { db };
        preferences.init()?;
        Ok(preferences)
    }

    pub fn open_in_memory() -> Result<Self, PreferencesError> {
        let preferences = Self {
            db: db::DB::open_in_memory()?,
        };
        preferences.init()?;
        Ok(preferences)
    }

    fn init(&self) -> Result<(), PreferencesError> {
        let db = self.db.lock()?;
        db.execute(
            "CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT
            )",
            [],
        )?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, PreferencesError> {
        let db = self.db.lock()?;
        let mut stmt = db.prepare("SELECT value FROM preferences WHERE key = ?1")?;
        let mut rows = stmt.query(rusqlite::params![key])?;
        match rows.next()? {
            Some(row) => Ok(row.get(0)?),
            None => Ok(None),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), PreferencesError> {
        if !KEYS.contains(&key) {
            return Err(PreferencesError::UnknownKey(key.to_string()));
        }
        if key == HIGH_QUALITY && parse_bool(value).is_none() {
            return Err(PreferencesError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            });
        }

        let db = self.db.lock()?;
        db.execute(
            "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    /// Configured `pso2_bin/data` directory, else an auto-detected one.
    pub fn pso2_data_path(&self) -> Result<Option<PathBuf>, PreferencesError> {
        if let Some(path) = self.get(PSO2_DATA_PATH)?.filter(|p| !p.is_empty()) {
            return Ok(Some(PathBuf::from(path)));
        }
        Ok(detect_data_path())
    }

    pub fn default_skin(&self, t2: bool) -> Result<Option<u32>, PreferencesError> {
        let key = if t2 { DEFAULT_SKIN_T2 } else { DEFAULT_SKIN_T1 };
        Ok(self.get(key)?.and_then(|v| v.trim().parse().ok()))
    }

    pub fn high_quality(&self) -> Result<bool, PreferencesError> {
        Ok(self
            .get(HIGH_QUALITY)?
            .and_then(|v| parse_bool(&v))
            .unwrap_or(true))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ============================================================================
// Game install detection
// ============================================================================

fn program_files() -> Option<PathBuf> {
    std::env::var_os("PROGRAMFILES(x86)").map(PathBuf::from)
}

/// Find the game data directory of a Windows Store or Steam install.
pub fn detect_data_path() -> Option<PathBuf> {
    if let Some(store) = program_files().map(|p| p.join(WINDOWS_STORE_DIR)) {
        if store.exists() {
            return Some(store);
        }
    }

    steam_libraries()
        .into_iter()
        .map(|library| library.join(STEAM_GAME_DIR))
        .find(|path| path.exists())
}

fn steam_library_files() -> Vec<PathBuf> {
    let mut files = vec![];
    if let Some(pf) = program_files() {
        files.push(pf.join("Steam/SteamApps/libraryfolders.vdf"));
    }
    if let Some(home) = dirs::home_dir() {
        files.push(home.join(".steam/steam/steamapps/libraryfolders.vdf"));
    }
    if let Some(data) = dirs::data_dir() {
        files.push(data.join("Steam/steamapps/libraryfolders.vdf"));
    }
    files
}

fn steam_libraries() -> Vec<PathBuf> {
    steam_library_files()
        .iter()
        .filter_map(|file| std::fs::read_to_string(file).ok())
        .flat_map(|text| parse_library_folders(&text))
        .collect()
}

fn library_path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^\s*"path"\s*"([^"]+)"\s*$"#).expect("library path pattern is valid"))
}

/// Library roots listed in a Steam `libraryfolders.vdf`.
pub fn parse_library_folders(text: &str) -> Vec<PathBuf> {
    text.lines()
        .filter_map(|line| library_path_regex().captures(line))
        .map(|caps| PathBuf::from(caps[1].replace("\\\\", "\\")))
        .collect()
}
