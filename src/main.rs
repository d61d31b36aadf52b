use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use morsewav::{
    Channels, Config, Dialect, MorseGenerator, bin_morse_hexdecimal, hexdecimal_bin_txt,
    morse_binary, morse_decode, morse_encode,
};
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Text to Morse (. - <space>)
    Encode {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Text to binary Morse (0 1 <space>)
    Binary {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Morse or binary Morse to text; two spaces separate words
    ///
    /// A leading `--` is read as clap's end-of-options marker, so quote the
    /// code ("-- ...") or pipe it on stdin when it starts with a dah pair.
    /// Every subcommand reads stdin when no text is given.
    Decode {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        code: Vec<String>,
    },
    /// Text to hex Morse
    HexEncode {
        /// 0: 2E 2D 20, 1: 30 31 20
        #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
        dialect: u8,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Hex Morse to text
    HexDecode {
        /// 0: 2E 2D 20, 1: 30 31 20
        #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
        dialect: u8,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        hex: Vec<String>,
    },
    /// Text to a Morse WAV file
    Wav(WavArgs),
}

#[derive(Args)]
struct WavArgs {
    /// Write a mono file instead of stereo
    #[arg(long)]
    mono: bool,
    /// Tone frequency in Hz (20 - 8000)
    #[arg(long, allow_negative_numbers = true)]
    hz: Option<f64>,
    /// Words per minute (0 - 50)
    #[arg(long, allow_negative_numbers = true)]
    wpm: Option<f64>,
    /// Samples per second (8000 - 48000); out-of-range values are clamped
    #[arg(long, allow_negative_numbers = true)]
    sps: Option<i64>,
    /// Directory for the generated file
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
    /// TOML file with default settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    text: Vec<String>,
}

fn main() -> Result<()> {
    // Set up logging. Use `RUST_LOG=info` or `RUST_LOG=debug` to see output.
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Encode { text } => println!("{}", morse_encode(&read_text(text, io::stdin())?)),
        Command::Binary { text } => println!("{}", morse_binary(&read_text(text, io::stdin())?)),
        Command::Decode { code } => {
            println!("{}", morse_decode(&read_text(code, io::stdin())?)?)
        }
        Command::HexEncode { dialect, text } => {
            let text = read_text(text, io::stdin())?;
            println!("{}", bin_morse_hexdecimal(&text, dialect_from(dialect)?))
        }
        Command::HexDecode { dialect, hex } => {
            let hex = read_text(hex, io::stdin())?;
            println!("{}", hexdecimal_bin_txt(&hex, dialect_from(dialect)?)?)
        }
        Command::Wav(args) => run_wav(args)?,
    }

    Ok(())
}

/// Joins the positional words, or reads `input` to the end when there are
/// none. One trailing line ending is dropped.
fn read_text<R: Read>(words: Vec<String>, mut input: R) -> Result<String> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    let trimmed = text
        .strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(&text);
    Ok(trimmed.to_string())
}

fn dialect_from(selector: u8) -> Result<Dialect> {
    Dialect::try_from(selector).map_err(anyhow::Error::msg)
}

/// Config file (or defaults) with the command-line overrides applied.
fn wav_config(args: &WavArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(hz) = args.hz {
        config.frequency_hz = hz;
    }
    if let Some(wpm) = args.wpm {
        config.words_per_minute = wpm;
    }
    if let Some(sps) = args.sps {
        config.samples_per_second = sps;
    }
    if let Some(dir) = &args.out_dir {
        config.output_dir = dir.clone();
    }
    Ok(config)
}

fn run_wav(args: WavArgs) -> Result<()> {
    let config = wav_config(&args)?;
    let channels = if args.mono {
        Channels::Mono
    } else {
        Channels::Stereo
    };
    let params = config.tone_parameters(channels);

    let text = read_text(args.text, io::stdin())?;
    let code = morse_encode(&text);
    println!("{}", text);
    println!("{}", code);

    let generator = MorseGenerator::new(params);
    let summary = generator
        .generate_wav_file(&code, &config.output_dir)
        .context("Failed to create WAV")?;

    println!(
        "{} PCM samples in {:.2} s written to {} ({:.2} kB)",
        summary.sample_count(),
        summary.duration_secs(),
        summary.path.display(),
        summary.bytes as f64 / 1024.0
    );
    Ok(())
}
