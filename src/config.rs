/// Open-time options for a catalog database.
///
/// Journal configuration only applies to file-backed databases; in-memory
/// databases ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Use WAL journaling for file-backed databases.
    pub wal: bool,
    /// SQLite busy timeout in milliseconds; bounds how long a caller waits
    /// on a locked database before a storage error surfaces.
    pub busy_timeout_ms: u32,
}

impl CatalogConfig {
    pub fn new() -> Self {
        Self {
            wal: true,
            busy_timeout_ms: 5_000,
        }
    }

    pub fn without_wal(mut self) -> Self {
        self.wal = false;
        self
    }

    pub fn with_busy_timeout_ms(mut self, timeout: u32) -> Self {
        self.busy_timeout_ms = timeout;
        self
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new()
    }
}
