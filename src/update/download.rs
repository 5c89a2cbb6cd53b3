//! Stream a release asset to disk.

use std::io::{self, Write};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::debug;

use super::{UpdateError, UpdateResult};

/// Download `url` into `sink` with a progress bar on stderr.
///
/// The body is copied straight through; it is never held in memory as a whole.
pub fn download_to(
    client: &reqwest::blocking::Client,
    url: &str,
    sink: &mut dyn Write,
) -> UpdateResult<u64> {
    let start = Instant::now();
    debug!("GET {}", url);

    let mut response = client.get(url).send()?;

    let status = response.status();
    debug!("  response: {} in {:?}", status, start.elapsed());
    if !status.is_success() {
        return Err(UpdateError::RemoteService {
            context: "download",
            status,
        });
    }

    let pb = create_progress_bar(response.content_length());
    let mut writer = pb.wrap_write(sink);
    // Read and write failures both surface from the copy.
    let written = io::copy(&mut response, &mut writer)
        .map_err(UpdateError::io("failed to download asset"))?;
    writer
        .flush()
        .map_err(UpdateError::io("failed to download asset"))?;

    pb.finish_and_clear();
    debug!("  downloaded {} bytes in {:?}", written, start.elapsed());
    Ok(written)
}

fn create_progress_bar(total: Option<u64>) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(total, ProgressDrawTarget::stderr());
    let template = if total.is_some() {
        "[mcfetch] Downloading {bytes}/{total_bytes} [{bar:30}] {percent}%"
    } else {
        "[mcfetch] Downloading {bytes} {spinner}"
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb
}
