//! Headless LibreOffice conversion

use super::{expected_output, Converter};
use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Program to run, `libreoffice` or `soffice` usually
    pub binary: String,
    /// Arguments placed before the conversion arguments, e.g.
    /// `["run", "org.libreoffice.LibreOffice"]` for a flatpak install
    pub prefix_args: Vec<String>,
    /// Kill the converter after this many seconds. Unset waits forever.
    pub timeout_secs: Option<u64>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            binary: "libreoffice".to_string(),
            prefix_args: Vec::new(),
            timeout_secs: None,
        }
    }
}

impl ConverterConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug)]
struct ProcessOutput {
    status: Option<ExitStatus>,
    stderr: String,
    timed_out: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LibreOfficeConverter {
    config: ConverterConfig,
}

impl LibreOfficeConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn command(&self, input: &Path, output_dir: &Path) -> Command {
        let mut command = Command::new(&self.config.binary);
        command
            .args(&self.config.prefix_args)
            .args(["--headless", "--convert-to", "pdf", "--outdir"])
            .arg(output_dir)
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    fn run(&self, input: &Path, output_dir: &Path) -> io::Result<ProcessOutput> {
        let mut child = self.command(input, output_dir).spawn()?;

        let Some(limit) = self.config.timeout() else {
            let output = child.wait_with_output()?;
            return Ok(ProcessOutput {
                status: Some(output.status),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                timed_out: false,
            });
        };

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let started = Instant::now();

        loop {
            if let Some(status) = child.try_wait()? {
                // stdout is only drained so the child never blocks on a full pipe
                let _ = stdout.map(JoinHandle::join);
                let stderr = stderr
                    .and_then(|h| h.join().ok())
                    .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                    .unwrap_or_default();
                return Ok(ProcessOutput {
                    status: Some(status),
                    stderr,
                    timed_out: false,
                });
            }

            if started.elapsed() >= limit {
                let _ = child.kill();
                let _ = child.wait();
                // Reader threads are left detached: a grandchild may still hold the pipes
                return Ok(ProcessOutput {
                    status: None,
                    stderr: String::new(),
                    timed_out: true,
                });
            }

            thread::sleep(POLL_INTERVAL);
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

impl Converter for LibreOfficeConverter {
    fn convert(&self, input: &Path, output_dir: &Path) -> Option<PathBuf> {
        let expected = expected_output(input, output_dir);

        match self.run(input, output_dir) {
            Ok(output) if output.timed_out => {
                log::warn!(
                    "{} did not finish within {}s for {}",
                    self.config.binary,
                    self.config.timeout_secs.unwrap_or_default(),
                    input.display()
                );
            }
            Ok(output) => {
                log::debug!("{} exited with {:?}", self.config.binary, output.status);
                if !output.stderr.trim().is_empty() {
                    log::debug!("{} stderr: {}", self.config.binary, output.stderr.trim());
                }
            }
            Err(e) => {
                log::warn!("could not run {}: {}", self.config.binary, e);
            }
        }

        if expected.exists() {
            Some(expected)
        } else {
            None
        }
    }
}
