//! Report line formatting and output.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crossterm::style::{Color, Stylize, style};

use sizeprint_core::{BuildError, FileMetrics};

/// Format size in human-readable form.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Format one report line, without the trailing newline.
///
/// `<path> => <size>`, followed by ` (<size> gzipped)` when a compressed
/// size was measured. With `colors` off the line carries no escape
/// sequences; the visible text is the same either way.
pub fn format_line(metrics: &FileMetrics, colors: bool) -> String {
    let path = metrics.relative_path.display().to_string();
    let size = format_size(metrics.raw_size);

    let mut line = format!(
        "{} => {}",
        paint(path, Color::Yellow, colors),
        paint(size, Color::Green, colors)
    );

    if let Some(gzipped) = metrics.gzipped_size {
        let suffix = format!(" ({} gzipped)", format_size(gzipped));
        line.push_str(&paint(suffix, Color::Grey, colors));
    }

    line
}

fn paint(text: String, color: Color, colors: bool) -> String {
    if colors {
        style(text).with(color).to_string()
    } else {
        text
    }
}

/// Writes one line per measured file to a sink.
///
/// Each line is written with a single call while holding the sink's lock,
/// so lines reported from concurrent tasks never interleave.
pub struct Reporter<W> {
    sink: Mutex<W>,
    colors: bool,
}

impl Reporter<io::Stdout> {
    /// Create a reporter writing to standard output.
    pub fn stdout(colors: bool) -> Self {
        Self::new(io::stdout(), colors)
    }
}

impl<W: Write> Reporter<W> {
    /// Create a reporter writing to `sink`.
    pub fn new(sink: W, colors: bool) -> Self {
        Self {
            sink: Mutex::new(sink),
            colors,
        }
    }

    /// Format the line for `metrics` without writing it.
    pub fn format_line(&self, metrics: &FileMetrics) -> String {
        format_line(metrics, self.colors)
    }

    /// Write the line for `metrics`, terminated by a single newline.
    pub fn report(&self, metrics: &FileMetrics) -> Result<(), BuildError> {
        let mut line = self.format_line(metrics);
        line.push('\n');

        let mut sink = self.sink.lock().map_err(|_| BuildError::Report {
            source: io::Error::other("report sink lock poisoned"),
        })?;
        sink.write_all(line.as_bytes())
            .and_then(|()| sink.flush())
            .map_err(|source| BuildError::Report { source })
    }
}

impl<W> fmt::Debug for Reporter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("colors", &self.colors)
            .finish_non_exhaustive()
    }
}

/// Cloneable in-memory sink; every clone shares the same buffer.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl LineBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily as UTF-8.
    pub fn contents(&self) -> String {
        let bytes = self.inner.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Written lines, without their terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for LineBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("line buffer lock poisoned"))?;
        inner.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn strip_ansi(text: &str) -> String {
        Regex::new(r"\x1b\[[0-9;]*m").unwrap().replace_all(text, "").into_owned()
    }

    #[test]
    fn test_plain_line_without_gzip() {
        let metrics = FileMetrics::raw("lorem.txt", 1000);
        assert_eq!(
            format_line(&metrics, false),
            format!("lorem.txt => {}", format_size(1000))
        );
    }

    #[test]
    fn test_plain_line_with_gzip() {
        let metrics = FileMetrics::gzipped("subdir/other.txt", 2048, 512);
        assert_eq!(
            format_line(&metrics, false),
            format!(
                "subdir/other.txt => {} ({} gzipped)",
                format_size(2048),
                format_size(512)
            )
        );
    }

    #[test]
    fn test_plain_line_has_no_escapes() {
        let metrics = FileMetrics::gzipped("image.png", 2000, 1900);
        assert!(!format_line(&metrics, false).contains('\x1b'));
    }

    #[test]
    fn test_colored_line_has_same_text() {
        let metrics = FileMetrics::gzipped("image.png", 2000, 1900);
        assert_eq!(
            strip_ansi(&format_line(&metrics, true)),
            format_line(&metrics, false)
        );
    }

    #[test]
    fn test_format_size_binary_units() {
        assert!(format_size(2048).contains("KiB"));
        assert!(format_size(3 * 1024 * 1024).contains("MiB"));
    }

    #[test]
    fn test_format_size_monotonic_within_unit() {
        let number = |bytes: u64| -> f64 {
            format_size(bytes)
                .split_whitespace()
                .next()
                .unwrap()
                .parse()
                .unwrap()
        };

        let mut previous = number(1024);
        for bytes in (1024..1024 * 1000).step_by(997) {
            let current = number(bytes);
            assert!(current >= previous, "{bytes} rendered smaller than its predecessor");
            previous = current;
        }
    }

    #[test]
    fn test_report_writes_one_line_per_call() {
        let buffer = LineBuffer::new();
        let reporter = Reporter::new(buffer.clone(), false);

        reporter.report(&FileMetrics::raw("a.txt", 1)).unwrap();
        reporter.report(&FileMetrics::raw("b.txt", 2)).unwrap();

        assert!(buffer.contents().ends_with('\n'));
        assert_eq!(
            buffer.lines(),
            vec![
                format!("a.txt => {}", format_size(1)),
                format!("b.txt => {}", format_size(2)),
            ]
        );
    }

    #[test]
    fn test_report_surfaces_sink_errors() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let reporter = Reporter::new(Broken, false);
        let result = reporter.report(&FileMetrics::raw("a.txt", 1));
        assert!(matches!(result, Err(BuildError::Report { .. })));
    }
}
