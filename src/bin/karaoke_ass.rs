use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use karaoke_sync::{
    write_ass, AlignmentResult, KaraokeConfig, KaraokeScript, KaraokeTimer, KaraokeTimerBuilder,
    Language,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Advanced SubStation Alpha subtitles with karaoke tags.
    Ass,
    /// The karaoke script as JSON, for inspection.
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Ass => "ass",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "karaoke_ass")]
#[command(about = "Build syllable-timed karaoke subtitles from lyrics and a forced alignment")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the per-word token ids the forced aligner should be given.
    Transcript(TranscriptArgs),
    /// Generate subtitles from lyrics and the aligner's token spans.
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
struct CommonArgs {
    #[arg(long, env = "KARAOKE_LYRICS")]
    lyrics: PathBuf,
    /// JSON vocabulary of the alignment model; defaults to the MMS label set.
    #[arg(long, env = "KARAOKE_VOCAB")]
    vocab: Option<PathBuf>,
    /// Lyrics language: jp (rule syllabifier), en or fr (dictionary hyphenation).
    #[arg(long, env = "KARAOKE_LANGUAGE", default_value = "jp")]
    language: Language,
}

#[derive(Debug, Args)]
struct TranscriptArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, env = "KARAOKE_ALIGNMENT")]
    alignment: PathBuf,
    /// Defaults to the lyrics path with the format's extension.
    #[arg(long, env = "KARAOKE_OUT")]
    out: Option<PathBuf>,
    #[arg(
        long,
        env = "KARAOKE_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Ass
    )]
    format: OutputFormat,
    #[arg(
        long,
        env = "KARAOKE_SAMPLE_RATE",
        default_value_t = KaraokeConfig::DEFAULT_SAMPLE_RATE_HZ
    )]
    sample_rate: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    match cli.command {
        Command::Transcript(args) => run_transcript(&args),
        Command::Generate(args) => run_generate(&args),
    }
}

fn build_timer(common: &CommonArgs, sample_rate: u32) -> Result<KaraokeTimer, String> {
    let config = KaraokeConfig {
        vocab_path: common
            .vocab
            .as_ref()
            .map(|path| path.to_string_lossy().to_string()),
        expected_sample_rate_hz: sample_rate,
        language: common.language,
        ..KaraokeConfig::default()
    };
    KaraokeTimerBuilder::new(config)
        .build()
        .map_err(|err| format!("Failed to set up karaoke timer: {err}"))
}

fn read_lyrics(path: &Path) -> Result<String, String> {
    fs::read_to_string(path)
        .map_err(|err| format!("Failed to read lyrics '{}': {err}", path.display()))
}

fn run_transcript(args: &TranscriptArgs) -> Result<(), String> {
    let timer = build_timer(&args.common, KaraokeConfig::DEFAULT_SAMPLE_RATE_HZ)?;
    let raw = read_lyrics(&args.common.lyrics)?;
    let lyrics = timer
        .load_lyrics(&raw)
        .map_err(|err| format!("Failed to parse lyrics: {err}"))?;

    let payload = serde_json::json!({
        "words": lyrics.transcript(),
        "tokens": timer.transcript_tokens(&lyrics),
    });
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, &payload)
        .map_err(|err| format!("Failed to serialize transcript JSON: {err}"))?;
    handle
        .write_all(b"\n")
        .map_err(|err| format!("Failed to write transcript: {err}"))?;
    Ok(())
}

fn run_generate(args: &GenerateArgs) -> Result<(), String> {
    let timer = build_timer(&args.common, args.sample_rate)?;
    let raw = read_lyrics(&args.common.lyrics)?;
    let lyrics = timer
        .load_lyrics(&raw)
        .map_err(|err| format!("Failed to parse lyrics: {err}"))?;
    let alignment = AlignmentResult::load(&args.alignment).map_err(|err| {
        format!(
            "Failed to load alignment '{}': {err}",
            args.alignment.display()
        )
    })?;

    let script = timer
        .make_script(&lyrics, &alignment)
        .map_err(|err| format!("Failed to time lyrics: {err}"))?;

    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| args.common.lyrics.with_extension(args.format.extension()));
    match args.format {
        OutputFormat::Ass => write_ass(&out_path, &script)
            .map_err(|err| format!("Failed to write '{}': {err}", out_path.display()))?,
        OutputFormat::Json => write_json(&out_path, &script)?,
    }
    tracing::info!(path = %out_path.display(), "result saved");
    Ok(())
}

fn write_json(path: &Path, script: &KaraokeScript) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create output directory '{}': {err}",
                parent.display()
            )
        })?;
    }

    let mut file = File::create(path)
        .map_err(|err| format!("Failed to create output file '{}': {err}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, script).map_err(|err| {
        format!(
            "Failed to serialize script JSON '{}': {err}",
            path.display()
        )
    })?;
    file.write_all(b"\n")
        .map_err(|err| format!("Failed to finalize output file '{}': {err}", path.display()))?;
    Ok(())
}
