//! Transfer statistics.

/// Counts for one profile transfer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransferStats {
    pub pic_count: u64,
    pub vid_count: u64,
    /// Files left alone because they already existed.
    pub skipped_count: u64,
    pub posts_seen: u64,
}

impl TransferStats {
    /// Increment picture count.
    pub fn increment_pic(&mut self) {
        self.pic_count += 1;
    }

    /// Increment video count.
    pub fn increment_vid(&mut self) {
        self.vid_count += 1;
    }

    /// Increment skipped count.
    pub fn increment_skipped(&mut self) {
        self.skipped_count += 1;
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let mut stats = TransferStats::default();
        stats.increment_pic();
        stats.increment_pic();
        stats.increment_vid();
        stats.increment_skipped();
        assert_eq!(stats.total_downloaded(), 3);
        assert_eq!(stats.skipped_count, 1);
    }
}
