// Status log for the dump sequence

/// Capacity of the status ring.
pub const MAX_LOG_ENTRIES: usize = 64;

/// Fixed-capacity ring of status lines.
///
/// Keeps the last [`MAX_LOG_ENTRIES`] messages; when full the oldest entry is
/// overwritten.
#[derive(Debug, Clone)]
pub struct StatusLog {
    entries: [Option<&'static str>; MAX_LOG_ENTRIES],
    count: usize, // Total messages ever logged
}

impl StatusLog {
    pub const fn new() -> Self {
        Self {
            entries: [None; MAX_LOG_ENTRIES],
            count: 0,
        }
    }

    pub fn log(&mut self, message: &'static str) {
        let idx = self.count % MAX_LOG_ENTRIES; // Ring buffer wrap-around
        self.entries[idx] = Some(message);
        self.count += 1;
    }

    /// All retained entries, oldest first.
    pub fn iter(&self) -> LogIterator<'_> {
        self.last_n(MAX_LOG_ENTRIES)
    }

    /// The last `n` retained entries, oldest first.
    pub fn last_n(&self, n: usize) -> LogIterator<'_> {
        let num_logs = n.min(self.len());
        let start_idx = (self.count - num_logs) % MAX_LOG_ENTRIES;

        LogIterator {
            log: self,
            start_idx,
            current: 0,
            remaining: num_logs,
        }
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.count.min(MAX_LOG_ENTRIES)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of messages ever logged, including overwritten ones.
    pub fn total(&self) -> usize {
        self.count
    }

    pub fn contains(&self, message: &str) -> bool {
        self.iter().any(|entry| entry == message)
    }
}

impl Default for StatusLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over status entries in chronological order.
pub struct LogIterator<'a> {
    log: &'a StatusLog,
    start_idx: usize,
    current: usize,
    remaining: usize,
}

impl<'a> Iterator for LogIterator<'a> {
    type Item = &'static str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let idx = (self.start_idx + self.current) % MAX_LOG_ENTRIES;
        self.current += 1;
        self.remaining -= 1;

        self.log.entries[idx]
    }
}
