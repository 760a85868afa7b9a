//! Statistics reporting.

use console::style;

use crate::download::TransferStats;

/// Print statistics for a finished transfer.
pub fn print_transfer_stats(username: &str, stats: &TransferStats) {
    println!();
    println!("{}", style(format!("Statistics for {}:", username)).bold());
    println!("  Posts:    {}", stats.posts_seen);
    println!("  Pictures: {}", stats.pic_count);
    println!("  Videos:   {}", stats.vid_count);
    println!("  Skipped:  {} (already on disk)", stats.skipped_count);
    println!("  Total:    {} downloaded", stats.total_downloaded());
}
