/*
Reader for Praat TextGrid annotation files (long text format). Only interval
tiers are collected; point tiers carry no transcript marks we care about.
Anything structurally off is an `InputFormatError`, fatal for that file.
*/
use std::error::Error;
use std::fmt::{self, Display};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextGrid {
    pub tiers: Vec<IntervalTier>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntervalTier {
    pub name: String,
    pub intervals: Vec<Interval>,
}

/// One annotated time interval. The mark holds the (possibly empty) raw
/// transcript text, bracket annotations included.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Interval {
    pub xmin: f64,
    pub xmax: f64,
    pub mark: String,
}

/// Malformed annotation file. Processing of the file stops; the caller
/// decides whether the run continues.
#[derive(Debug, Clone, PartialEq)]
pub struct InputFormatError {
    path: Option<PathBuf>,
    line: usize,
    message: String,
}

impl InputFormatError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        InputFormatError {
            path: None,
            line,
            message: message.into(),
        }
    }

    fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_owned());
        self
    }
}

impl Display for InputFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid annotation file")?;
        if let Some(path) = &self.path {
            write!(f, " {}", path.display())?;
        }
        if self.line > 0 {
            write!(f, ": line {}", self.line)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl Error for InputFormatError {}

/// Reads and parses one TextGrid file.
pub fn read_textgrid(path: &Path) -> Result<TextGrid, InputFormatError> {
    let content = fs::read_to_string(path)
        .map_err(|e| InputFormatError::new(0, e.to_string()).with_path(path))?;
    parse_textgrid(&content).map_err(|e| e.with_path(path))
}

/// Parses long-format TextGrid content into ordered tiers and intervals.
pub fn parse_textgrid(content: &str) -> Result<TextGrid, InputFormatError> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < 2
        || !lines[0].trim_start_matches('\u{feff}').contains("ooTextFile")
        || !lines[1].contains("TextGrid")
    {
        return Err(InputFormatError::new(1, "not a TextGrid file"));
    }
    let mut grid = TextGrid::default();
    let mut tier: Option<IntervalTier> = None;
    let mut interval: Option<Interval> = None;
    for (idx, raw) in lines.iter().enumerate().skip(2) {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(value) = key_value(line, "class") {
            commit_tier(&mut grid, &mut tier, &mut interval);
            if unquote(value, line_no)? == "IntervalTier" {
                tier = Some(IntervalTier::default());
            }
        } else if let Some(value) = key_value(line, "name") {
            if let Some(tier) = tier.as_mut() {
                tier.name = unquote(value, line_no)?;
            }
        } else if line.starts_with("intervals [") {
            if let Some(tier) = tier.as_mut() {
                if let Some(finished) = interval.take() {
                    tier.intervals.push(finished);
                }
                interval = Some(Interval::default());
            }
        } else if let Some(value) = key_value(line, "xmin") {
            if let Some(interval) = interval.as_mut() {
                interval.xmin = parse_number(value, line_no)?;
            }
        } else if let Some(value) = key_value(line, "xmax") {
            if let Some(interval) = interval.as_mut() {
                interval.xmax = parse_number(value, line_no)?;
            }
        } else if let Some(value) = key_value(line, "text") {
            if let Some(interval) = interval.as_mut() {
                interval.mark = unquote(value, line_no)?;
            }
        }
    }
    commit_tier(&mut grid, &mut tier, &mut interval);
    Ok(grid)
}

fn commit_tier(
    grid: &mut TextGrid,
    tier: &mut Option<IntervalTier>,
    interval: &mut Option<Interval>,
) {
    let pending = interval.take();
    if let Some(mut finished) = tier.take() {
        if let Some(pending) = pending {
            finished.intervals.push(pending);
        }
        grid.tiers.push(finished);
    }
}

/// Matches `key = value` lines; returns the raw value with surrounding
/// whitespace removed.
fn key_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.strip_prefix(key)?
        .trim_start()
        .strip_prefix('=')
        .map(str::trim)
}

fn unquote(value: &str, line_no: usize) -> Result<String, InputFormatError> {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or_else(|| InputFormatError::new(line_no, format!("expected a quoted string, got `{}`", value)))?;
    // Praat escapes a quote inside a string by doubling it.
    Ok(inner.replace("\"\"", "\""))
}

fn parse_number(value: &str, line_no: usize) -> Result<f64, InputFormatError> {
    value
        .parse::<f64>()
        .map_err(|_| InputFormatError::new(line_no, format!("invalid number `{}`", value)))
}
