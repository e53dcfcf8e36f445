use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::KaraokeError;
use crate::types::{EventKind, KaraokeScript, SubtitleEvent};

const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, \
    OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, \
    Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";
const DEFAULT_STYLE: &str = "Style: Default,Arial,20.0,&H00FFFFFF,&H000000FF,&H00000000,\
    &H00000000,0,0,0,0,100.0,100.0,0.0,0.0,1,2.0,2.0,2,10,10,10,1";
const EVENT_FORMAT: &str =
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

/// Largest time an ASS timestamp can hold, 9:59:59.99.
const MAX_TIMESTAMP_CS: u64 = 9 * 360_000 + 59 * 6_000 + 59 * 100 + 99;

/// Advanced SubStation Alpha rendering of a karaoke script.
pub struct AssDocument<'a> {
    script: &'a KaraokeScript,
}

impl<'a> AssDocument<'a> {
    pub fn new(script: &'a KaraokeScript) -> Self {
        Self { script }
    }
}

impl fmt::Display for AssDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Script Info]")?;
        writeln!(f, "; Script generated by {}", env!("CARGO_PKG_NAME"))?;
        writeln!(f, "WrapStyle: 0")?;
        writeln!(f, "ScaledBorderAndShadow: yes")?;
        writeln!(f, "Collisions: Normal")?;
        writeln!(f, "ScriptType: v4.00+")?;
        writeln!(f, "Original Timing: {}", self.script.identifier)?;
        writeln!(f)?;
        writeln!(f, "[V4+ Styles]")?;
        writeln!(f, "{STYLE_FORMAT}")?;
        writeln!(f, "{DEFAULT_STYLE}")?;
        writeln!(f)?;
        writeln!(f, "[Events]")?;
        writeln!(f, "{EVENT_FORMAT}")?;
        for line in &self.script.lines {
            write_event(f, &line.comment)?;
            write_event(f, &line.event)?;
        }
        Ok(())
    }
}

fn write_event(f: &mut fmt::Formatter<'_>, event: &SubtitleEvent) -> fmt::Result {
    let kind = match event.kind {
        EventKind::Comment => "Comment",
        EventKind::Dialogue => "Dialogue",
    };
    writeln!(
        f,
        "{kind}: 0,{},{},Default,,0,0,0,,{}",
        format_timestamp(event.start_ms),
        format_timestamp(event.end_ms),
        event.text.replace('\n', "\\N")
    )
}

/// `H:MM:SS.cc`, rounded to the nearest centisecond and clamped to the
/// representable range.
pub fn format_timestamp(ms: u64) -> String {
    let cs = ((ms + 5) / 10).min(MAX_TIMESTAMP_CS);
    let hours = cs / 360_000;
    let minutes = (cs % 360_000) / 6_000;
    let seconds = (cs % 6_000) / 100;
    let centis = cs % 100;
    format!("{hours}:{minutes:02}:{seconds:02}.{centis:02}")
}

pub fn write_ass(path: &Path, script: &KaraokeScript) -> Result<(), KaraokeError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| KaraokeError::io("create subtitle directory", e))?;
    }
    let mut file = File::create(path).map_err(|e| KaraokeError::io("create subtitle file", e))?;
    write!(file, "{}", AssDocument::new(script))
        .map_err(|e| KaraokeError::io("write subtitle file", e))?;
    tracing::info!(path = %path.display(), lines = script.lines.len(), "ass: subtitles written");
    Ok(())
}
