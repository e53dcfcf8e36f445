pub mod ass;
pub mod events;

pub use ass::{format_timestamp, write_ass, AssDocument};
pub use events::{build_karaoke_lines, render_karaoke_text, KaraokeEventBuilder};
