use crate::sink::ProgressEvent;
use regex::Regex;
use std::sync::LazyLock;

// "Receiving objects:  45% (450/1000), 1.20 MiB | 2.00 MiB/s"
static COUNTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:remote:\s*)?(?P<stage>[A-Z][A-Za-z ]*?):\s+\d+%\s+\((?P<cur>\d+)/(?P<total>\d+)\)")
        .expect("counted progress pattern")
});

// "remote: Enumerating objects: 1234, done."
static BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:remote:\s*)?(?P<stage>[A-Z][A-Za-z ]*?):\s+(?P<cur>\d+)(?:,\s*done\.)?\s*$")
        .expect("bare progress pattern")
});

/// Turn one `\r`/`\n` delimited chunk of `git --progress` stderr into a
/// progress event. Anything that isn't a progress line returns `None`.
pub fn parse_progress_line(line: &str) -> Option<ProgressEvent> {
    let line = line.trim();
    if let Some(caps) = COUNTED.captures(line) {
        let current = caps["cur"].parse().ok()?;
        let total = caps["total"].parse().ok()?;
        return Some(ProgressEvent::new(current, Some(total), &caps["stage"]));
    }
    let caps = BARE.captures(line)?;
    let current = caps["cur"].parse().ok()?;
    Some(ProgressEvent::new(current, None, &caps["stage"]))
}

/// Feeds raw stderr bytes and splits them on carriage returns and newlines,
/// since git redraws progress in place with `\r`.
#[derive(Default)]
pub struct ProgressSplitter {
    chunk: Vec<u8>,
    pub messages: Vec<String>,
}

impl ProgressSplitter {
    pub fn push(&mut self, byte: u8, on_progress: &dyn Fn(ProgressEvent)) {
        if byte == b'\r' || byte == b'\n' {
            self.flush(on_progress);
        } else {
            self.chunk.push(byte);
        }
    }

    pub fn flush(&mut self, on_progress: &dyn Fn(ProgressEvent)) {
        let line = String::from_utf8_lossy(&self.chunk).trim().to_string();
        self.chunk.clear();
        if line.is_empty() {
            return;
        }
        match parse_progress_line(&line) {
            Some(event) => on_progress(event),
            None => self.messages.push(line),
        }
    }
}
