//! Console report: one line per download, then one completion line.

use fanfetch_core::fetcher::DownloadResult;

pub fn result_line(result: &DownloadResult) -> String {
    match &result.outcome {
        Ok(_) => format!("✅ Downloaded: {}", result.task.destination_name),
        Err(e) => format!(
            "❌ Error downloading {}: {}",
            result.task.source_locator, e
        ),
    }
}

pub fn print_result(result: &DownloadResult) {
    println!("{}", result_line(result));
}

pub fn print_completion() {
    println!("\n🎉 All downloads complete.");
}

pub fn print_usage() {
    println!("\n⚠️  No URLs provided.\n");
    println!("Usage: fanfetch <url1> <url2> ...");
}
