use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chordsheet::key::{detect_key, KeySource};
use chordsheet::layout::{paginate_book_mode_with, render_rows_with};
use chordsheet::{
    format_book, offset_for_target_key, transpose_song_content, ChordSheetError, ContentVariant,
    RenderOptions, Song,
};

#[derive(Debug, Parser)]
#[command(name = "chordsheet")]
#[command(about = "Transpose chord sheets and align chords over lyrics.")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, clap::Args)]
struct SongArgs {
    /// Song document (`.txt`, optional `---` YAML header) or YAML record (`.yaml`).
    file: PathBuf,

    /// Semitones to shift, may be negative.
    #[arg(long, short, default_value_t = 0, allow_negative_numbers = true)]
    transpose: i32,

    /// Target key, e.g. `A` or `Eb`. Ignored if it is not a plain note name.
    #[arg(long, short)]
    key: Option<String>,

    /// Content variant: main, notes or piano.
    #[arg(long, default_value = "main")]
    variant: String,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lay out chords above lyrics.
    Render {
        #[command(flatten)]
        song: SongArgs,

        /// Two columns when the song is long.
        #[arg(long, default_value_t = false)]
        book: bool,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// YAML file with render options.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the annotated text with every chord transposed.
    Transpose {
        #[command(flatten)]
        song: SongArgs,
    },

    /// Show the original key and the key at the requested offset.
    Key {
        #[command(flatten)]
        song: SongArgs,
    },
}

/// A loaded song with its selected content and resolved offset.
struct Selection {
    song: Song,
    variant: ContentVariant,
    offset: i32,
}

impl Selection {
    fn load(args: &SongArgs) -> Result<Self, ChordSheetError> {
        let song = Song::load(&args.file)?;
        let variant: ContentVariant = args.variant.parse()?;
        let content = song.content_for(variant)?;
        let offset = match &args.key {
            Some(target) => offset_for_target_key(content, target, args.transpose),
            None => args.transpose,
        };
        Ok(Self { song, variant, offset })
    }

    fn content(&self) -> Result<&str, ChordSheetError> {
        self.song.content_for(self.variant)
    }
}

fn run(cli: Cli) -> Result<(), ChordSheetError> {
    match cli.cmd {
        Command::Render { song, book, format, config } => {
            let options = match &config {
                Some(path) => RenderOptions::load(path)?,
                None => RenderOptions::default(),
            };
            let selection = Selection::load(&song)?;
            let transposed = transpose_song_content(selection.content()?, selection.offset);
            let rows = render_rows_with(&transposed, &options);
            let layout = if book {
                paginate_book_mode_with(&rows, &options)
            } else {
                chordsheet::BookLayout::Single(&rows)
            };

            match format {
                Format::Text => {
                    if !selection.song.title.is_empty() {
                        println!("{}", selection.song.title);
                        if !selection.song.artist.is_empty() {
                            println!("{}", selection.song.artist);
                        }
                        println!();
                    }
                    println!("{}", format_book(&layout, &options));
                }
                Format::Json => {
                    let json = serde_json::to_string_pretty(&layout)
                        .map_err(|e| ChordSheetError::OutputError(e.to_string()))?;
                    println!("{}", json);
                }
            }
        }
        Command::Transpose { song } => {
            let selection = Selection::load(&song)?;
            print!("{}", transpose_song_content(selection.content()?, selection.offset));
        }
        Command::Key { song } => {
            let selection = Selection::load(&song)?;
            let content = selection.content()?;
            let detected = detect_key(content);
            let source = match detected.source {
                KeySource::Directive => "key directive",
                KeySource::FirstChord => "first chord",
                KeySource::Default => "default",
            };
            println!("original: {} ({})", detected.key, source);
            println!("offset:   {}", selection.offset);
            println!("playing:  {}", chordsheet::display_key(content, selection.offset));
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chordsheet=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
