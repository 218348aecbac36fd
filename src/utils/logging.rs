use std::sync::Mutex;

/// Output sink for user-facing diagnostics
pub trait Reporter: Send + Sync {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
    /// Only shown when verbose output is enabled
    fn verbose(&self, msg: &str);
}

pub fn print_verbose(verbose: bool, msg: &str) {
    if verbose {
        println!("Verbose: {}", msg);
    }
}

/// Writes everything to standard output as plain text
pub struct ConsoleReporter {
    enabled: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { enabled: verbose }
    }
}

impl Reporter for ConsoleReporter {
    fn info(&self, msg: &str) {
        println!("{}", msg);
    }

    fn warn(&self, msg: &str) {
        println!("Warning: {}", msg);
    }

    fn error(&self, msg: &str) {
        println!("Error: {}", msg);
    }

    fn verbose(&self, msg: &str) {
        print_verbose(self.enabled, msg);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
    Verbose,
}

/// Keeps every line in memory; used by tests to inspect what a run printed
#[derive(Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg)
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|(_, msg)| msg.contains(needle))
    }

    fn push(&self, level: Level, msg: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, msg.to_string()));
        }
    }
}

impl Reporter for MemoryReporter {
    fn info(&self, msg: &str) {
        self.push(Level::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.push(Level::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.push(Level::Error, msg);
    }

    fn verbose(&self, msg: &str) {
        self.push(Level::Verbose, msg);
    }
}
