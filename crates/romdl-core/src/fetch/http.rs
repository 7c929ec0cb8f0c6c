//! Single curl attempts: GET to memory, GET to a file.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::retry::AttemptError;

/// Buffer size for streaming downloads to disk.
pub const DOWNLOAD_CHUNK_SIZE: usize = 8192;

/// Per-request curl settings.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub user_agent: String,
    /// Connect timeout and, for listing requests, the longest stretch the
    /// server may go without sending a byte.
    pub timeout: Duration,
}

/// `CURLOPT_LOW_SPEED_TIME` has whole-second resolution; zero disables it.
fn stall_window(timeout: Duration) -> Duration {
    Duration::from_secs(timeout.as_secs().max(1))
}

fn easy_for(url: &str, opts: &RequestOptions) -> Result<curl::easy::Easy, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(&opts.user_agent)?;
    easy.connect_timeout(opts.timeout)?;
    Ok(easy)
}

/// GET `url` into memory. Returns the final status and the body (lossy UTF-8)
/// for any completed transfer, including non-2xx ones.
pub fn get_text(url: &str, opts: &RequestOptions) -> Result<(u32, String), AttemptError> {
    let mut easy = easy_for(url, opts).map_err(AttemptError::Curl)?;
    easy.low_speed_limit(1).map_err(AttemptError::Curl)?;
    easy.low_speed_time(stall_window(opts.timeout))
        .map_err(AttemptError::Curl)?;

    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(AttemptError::Curl)?;
        transfer.perform().map_err(AttemptError::Curl)?;
    }

    let status = easy.response_code().map_err(AttemptError::Curl)?;
    Ok((status, String::from_utf8_lossy(&body).into_owned()))
}

fn download_easy(url: &str, opts: &RequestOptions) -> Result<curl::easy::Easy, curl::Error> {
    let mut easy = easy_for(url, opts)?;
    // Abort stalled transfers instead of hanging forever.
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;
    Ok(easy)
}

/// GET `url` and stream the body to `dest`.
///
/// The body goes to `<dest>.part` and is renamed onto `dest` only after a 2xx
/// response; any other outcome removes the partial file. Returns the status.
pub fn get_to_file(url: &str, dest: &Path, opts: &RequestOptions) -> Result<u32, AttemptError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(AttemptError::Storage)?;
    }
    let mut easy = download_easy(url, opts).map_err(AttemptError::Curl)?;
    let temp = temp_path(dest);
    let file = fs::File::create(&temp).map_err(AttemptError::Storage)?;
    let mut writer = BufWriter::with_capacity(DOWNLOAD_CHUNK_SIZE, file);

    let mut write_err: Option<std::io::Error> = None;
    let performed = {
        let mut transfer = easy.transfer();
        let registered = transfer.write_function(|data| match writer.write_all(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                write_err = Some(e);
                Ok(0)
            }
        });
        registered.and_then(|_| transfer.perform())
    };

    // Flush and close the part file before inspecting the outcome.
    let flushed = writer.into_inner().map(drop).map_err(|e| e.into_error());

    if let Some(e) = write_err {
        discard(&temp);
        return Err(AttemptError::Storage(e));
    }
    if let Err(e) = performed {
        discard(&temp);
        return Err(AttemptError::Curl(e));
    }
    if let Err(e) = flushed {
        discard(&temp);
        return Err(AttemptError::Storage(e));
    }
    let status = match easy.response_code() {
        Ok(s) => s,
        Err(e) => {
            discard(&temp);
            return Err(AttemptError::Curl(e));
        }
    };

    if !(200..300).contains(&status) {
        let body = fs::read(&temp)
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .unwrap_or_default();
        discard(&temp);
        return Err(AttemptError::Http { status, body });
    }

    fs::rename(&temp, dest).map_err(|e| {
        discard(&temp);
        AttemptError::Storage(e)
    })?;
    Ok(status)
}

/// `file.zip` → `file.zip.part`.
pub fn temp_path(final_path: &Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(".part");
    std::path::PathBuf::from(o)
}

fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("remove partial file {}: {}", path.display(), e);
        }
    }
}
