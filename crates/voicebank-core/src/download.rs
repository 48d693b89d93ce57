//! Single-file HTTP downloads

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use reqwest::blocking::Client;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::config::VoicebankConfig;
use crate::error::{DownloadError, Result};

/// Fetches one URL into one destination file.
///
/// Implementations never check whether `dest` already exists; the batch
/// driver does that before calling. On success the number of bytes written
/// is returned.
pub trait Fetch {
    fn fetch(&self, url: &str, dest: &Path) -> std::result::Result<u64, DownloadError>;
}

/// Blocking HTTP downloader
pub struct HttpDownloader {
    client: Client,
    show_progress: bool,
}

impl HttpDownloader {
    pub fn new(config: &VoicebankConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            show_progress: config.show_progress,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn progress_bar(&self, len: Option<u64>, dest: &Path) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = match len {
            Some(len) => ProgressBar::new(len),
            None => ProgressBar::new_spinner(),
        };
        pb.set_draw_target(ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::with_template(
            "  {msg} [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})",
        ) {
            pb.set_style(style.progress_chars("=> "));
        }
        if let Some(name) = dest.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb
    }
}

impl Fetch for HttpDownloader {
    fn fetch(&self, url: &str, dest: &Path) -> std::result::Result<u64, DownloadError> {
        debug!("GET {} -> {:?}", url, dest);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(DownloadError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status));
        }

        let pb = self.progress_bar(response.content_length(), dest);

        // A failure past this point leaves whatever was written on disk.
        let mut writer = BufWriter::new(File::create(dest)?);
        let mut reader = pb.wrap_read(response);
        let result = std::io::copy(&mut reader, &mut writer).and_then(|n| {
            writer.flush()?;
            Ok(n)
        });
        pb.finish_and_clear();

        let bytes = result?;
        debug!("Wrote {} bytes to {:?}", bytes, dest);
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};
    use std::net::TcpListener;
    use std::thread;
    use tempfile::TempDir;

    /// Serve a single canned HTTP response on a random local port.
    fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
        serve_with_length(status_line, body.len(), body)
    }

    /// Like `serve_once`, but advertises `content_length` regardless of the body sent.
    fn serve_with_length(
        status_line: &'static str,
        content_length: usize,
        body: &'static [u8],
    ) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            let header = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status_line, content_length
            );
            stream.write_all(header.as_bytes()).unwrap();
            stream.write_all(body).unwrap();
        });

        format!("http://{}/voice.mp3", addr)
    }

    fn downloader() -> HttpDownloader {
        HttpDownloader::new(&VoicebankConfig::default())
            .unwrap()
            .with_progress(false)
    }

    #[test]
    fn test_fetch_writes_body() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("Alice1.mp3");
        let url = serve_once("200 OK", b"ID3fake-mp3-bytes");

        let bytes = downloader().fetch(&url, &dest).unwrap();

        assert_eq!(bytes, 17);
        assert_eq!(std::fs::read(&dest).unwrap(), b"ID3fake-mp3-bytes");
    }

    #[test]
    fn test_fetch_truncated_body_leaves_partial_file() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("Partial1.mp3");
        let url = serve_with_length("200 OK", 100, b"0123456789");

        let err = downloader().fetch(&url, &dest).unwrap_err();

        assert!(matches!(err, DownloadError::Io(_)), "got {:?}", err);
        assert!(dest.exists());
        assert_eq!(std::fs::read(&dest).unwrap(), b"0123456789");
    }

    #[test]
    fn test_fetch_http_error_creates_no_file() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("missing.mp3");
        let url = serve_once("404 Not Found", b"nope");

        let err = downloader().fetch(&url, &dest).unwrap_err();

        match err {
            DownloadError::Status(status) => assert_eq!(status.as_u16(), 404),
            other => panic!("expected status error, got {:?}", other),
        }
        assert!(!dest.exists());
    }

    #[test]
    fn test_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("down.mp3");
        let err = downloader()
            .fetch(&format!("http://{}/x.mp3", addr), &dest)
            .unwrap_err();

        assert!(matches!(err, DownloadError::Request(_)));
        assert!(!dest.exists());
    }
}
