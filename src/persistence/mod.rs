//! Best score persistence
//!
//! The only state that survives a session is a single integer. Stores never
//! fail loudly: unreadable or missing values count as 0 and write failures are
//! logged.

/// Synchronous single-integer store
pub trait BestScoreStore {
    /// Stored best, 0 when nothing has been saved yet
    fn best_score(&self) -> u32;
    fn set_best_score(&mut self, score: u32);
}

/// Parse a stored value, treating anything unreadable as 0
pub fn parse_score(raw: &str) -> u32 {
    match raw.trim().parse() {
        Ok(score) => score,
        Err(e) => {
            log::warn!("Ignoring stored best score {raw:?}: {e}");
            0
        }
    }
}

/// In-memory store (tests and sessions without storage)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u32,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }
}

impl BestScoreStore for MemoryStore {
    fn best_score(&self) -> u32 {
        self.best
    }

    fn set_best_score(&mut self, score: u32) {
        self.best = score;
    }
}

/// Best score kept as a decimal integer in a text file
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> std::io::Result<u32> {
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(parse_score(&raw))
    }

    fn write(&self, score: u32) -> std::io::Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        std::fs::write(&self.path, format!("{score}\n"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl BestScoreStore for FileStore {
    fn best_score(&self) -> u32 {
        match self.read() {
            Ok(score) => score,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => {
                log::warn!("Failed to read {}: {e}", self.path.display());
                0
            }
        }
    }

    fn set_best_score(&mut self, score: u32) {
        match self.write(score) {
            Ok(()) => log::info!("Best score {score} saved to {}", self.path.display()),
            Err(e) => log::warn!("Failed to write {}: {e}", self.path.display()),
        }
    }
}

/// Best score in browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "best_score";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl BestScoreStore for LocalStorageStore {
    fn best_score(&self) -> u32 {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, best score starts at 0");
            return 0;
        };
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(raw)) => {
                let score = parse_score(&raw);
                log::info!("Loaded best score {score}");
                score
            }
            _ => 0,
        }
    }

    fn set_best_score(&mut self, score: u32) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, best score {score} not saved");
            return;
        };
        if storage
            .set_item(Self::STORAGE_KEY, &score.to_string())
            .is_err()
        {
            log::warn!("Failed to save best score {score}");
        } else {
            log::info!("Best score {score} saved");
        }
    }
}
