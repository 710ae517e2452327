//! Transient list of uploads in flight (not persisted)

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadProgressEntry {
    /// Local key, only meaningful inside this queue
    pub key: u64,
    pub filename: String,
    pub size_bytes: u64,
    /// 0..=100
    pub progress: u8,
    pub uploading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadQueue {
    entries: Vec<UploadProgressEntry>,
    next_key: u64,
}

impl UploadQueue {
    pub fn entries(&self) -> &[UploadProgressEntry] {
        &self.entries
    }

    /// Uploads still running, they count against the file limit
    pub fn in_flight(&self) -> usize {
        self.entries.iter().filter(|e| e.uploading).count()
    }

    /// False once the entry was completed, dismissed or cleared
    pub fn contains(&self, key: u64) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Register accepted files, returns their keys in the same order
    pub fn enqueue<'a, I>(&mut self, files: I) -> Vec<u64>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        files
            .into_iter()
            .map(|(filename, size_bytes)| {
                let key = self.next_key;
                self.next_key += 1;
                self.entries.push(UploadProgressEntry {
                    key,
                    filename: filename.to_string(),
                    size_bytes,
                    progress: 0,
                    uploading: true,
                    error: None,
                });
                key
            })
            .collect()
    }

    pub fn set_progress(&mut self, key: u64, progress: u8) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.progress = progress.min(100);
        }
    }

    /// Success: the entry disappears, the file now lives in the form state
    pub fn complete(&mut self, key: u64) {
        self.entries.retain(|e| e.key != key);
    }

    /// Failure: the entry stays with its error until dismissed
    pub fn fail(&mut self, key: u64, error: String) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.uploading = false;
            entry.error = Some(error);
        }
    }

    pub fn dismiss(&mut self, key: u64) {
        self.entries.retain(|e| e.key != key || e.uploading);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
