//! Notecard CLI - small local notes with image and video links.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use flexi_logger::{Logger, LoggerHandle};
use notecard_core::{
    classify, resolve_embed, Error, Headless, HtmlSurface, MediaKind, Note,
    NoteListRenderer, NoteStore, Theme, ThemePreference,
};
use notecard_files::FileStore;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const NOTECARD_DIR: &str = ".notecard";
const PREVIEW_CHARS: usize = 80;

#[derive(Parser)]
#[command(name = "notecard", about = "Small local notes with image and video links", version)]
struct Cli {
    /// Data directory (defaults to the nearest .notecard directory)
    #[arg(long, global = true, env = "NOTECARD_DIR")]
    dir: Option<PathBuf>,

    /// Log level or flexi_logger spec, written to stderr
    #[arg(long, global = true, env = "NOTECARD_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new notecard directory in the current directory
    Init {
        /// Delete existing notes and reinitialize
        #[arg(long)]
        reinitialize: bool,
    },
    /// Add a new note
    Add {
        /// Note title
        #[arg(long)]
        title: String,
        /// Note content (reads from stdin if not provided and stdin is not a tty)
        #[arg(long)]
        content: Option<String>,
        /// Image or video URL
        #[arg(long)]
        media: Option<String>,
    },
    /// List notes with their positions
    Ls,
    /// Delete notes by position
    Rm {
        /// Comma-separated positions, as shown by `ls`
        indices: String,
    },
    /// Print how a media URL is classified
    Classify {
        url: String,
    },
    /// Print the embeddable form of a video URL
    Embed {
        url: String,
    },
    /// Print the notes as HTML
    Render {
        /// Emit a standalone page using the saved theme
        #[arg(long)]
        page: bool,
    },
    /// Show or change the saved theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Switch between light and dark
    Toggle,
}

fn init_logging(spec: &str) -> Result<LoggerHandle> {
    Logger::try_with_str(spec)
        .context(format!("Invalid log level: {}", spec))?
        .start()
        .context("Failed to start logger")
}

/// Find the .notecard directory by searching up from current directory
fn find_notecard_dir() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;
    loop {
        let candidate = current.join(NOTECARD_DIR);
        if candidate.is_dir() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Get the data directory, or error if not initialized
fn get_notecard_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    match find_notecard_dir() {
        Some(dir) => Ok(dir),
        None => bail!("No .notecard directory found. Run 'notecard init' to create one."),
    }
}

fn init_dir(dir: &Path, reinitialize: bool) -> Result<()> {
    if dir.exists() {
        if reinitialize {
            std::fs::remove_dir_all(dir)
                .context("Failed to remove existing notecard directory")?;
        } else {
            bail!("Notecard is already initialized here. Use --reinitialize to delete and recreate.");
        }
    }
    FileStore::open(dir).context("Failed to create notecard directory")?;
    Ok(())
}

fn parse_indices(indices: &str) -> Result<Vec<usize>> {
    let mut parsed = indices
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<usize>().context(format!("Invalid note index: {}", s)))
        .collect::<Result<Vec<_>>>()?;

    // Highest first, so each index still refers to the listing the user saw.
    parsed.sort_unstable_by(|a, b| b.cmp(a));
    parsed.dedup();
    Ok(parsed)
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read from stdin")?;
    Ok(buf)
}

fn is_stdin_tty() -> bool {
    atty::is(atty::Stream::Stdin)
}

fn load_theme(store: &FileStore) -> Result<Theme> {
    let mut pref = ThemePreference::new(store, Headless);
    Ok(pref.load()?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(&cli.log_level)?;

    match &cli.command {
        Commands::Classify { url } => {
            println!("{}", classify(url.trim()));
            return Ok(());
        }
        Commands::Embed { url } => {
            let url = url.trim();
            if classify(url) != MediaKind::Video {
                eprintln!("Not a supported video URL: {}", url);
                std::process::exit(1);
            }
            println!("{}", resolve_embed(url));
            return Ok(());
        }
        Commands::Init { reinitialize } => {
            let dir = cli.dir.clone().unwrap_or_else(|| PathBuf::from(NOTECARD_DIR));
            let existed = dir.exists();
            init_dir(&dir, *reinitialize)?;
            if existed {
                println!("Reinitialized notecard directory in {}", dir.display());
            } else {
                println!("Initialized notecard directory in {}", dir.display());
            }
            return Ok(());
        }
        _ => {}
    }

    // All other commands need the data directory
    let dir = get_notecard_dir(cli.dir)?;
    let files = FileStore::open(&dir).context("Failed to open notecard directory")?;
    let store = NoteStore::new(&files);

    match cli.command {
        Commands::Init { .. } | Commands::Classify { .. } | Commands::Embed { .. } => {
            unreachable!()
        }

        Commands::Add {
            title,
            content,
            media,
        } => {
            let content = match content {
                Some(c) => c,
                None if !is_stdin_tty() => read_stdin()?,
                None => String::new(),
            };
            let note = match Note::from_form(
                &title,
                &content,
                media.as_deref().unwrap_or(""),
            ) {
                Ok(note) => note,
                Err(Error::InvalidInput { field, message }) => {
                    eprintln!("{} (--{})", message, field);
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            };
            store.append(note)?;
            let count = store.list_all()?.len();
            println!("Added note {}", count - 1);
        }

        Commands::Ls => {
            let notes = store.list_all()?;
            if notes.is_empty() {
                println!("No notes saved yet.");
            }
            for (index, note) in notes.iter().enumerate() {
                println!("{}: {} -- {}", index, note.title, note.preview(PREVIEW_CHARS));
                if let Some(media) = &note.media {
                    println!("   [{}] {}", classify(media), media);
                }
            }
        }

        Commands::Rm { indices } => {
            let indices = parse_indices(&indices)?;
            if indices.is_empty() {
                eprintln!("No note indices provided");
                std::process::exit(1);
            }

            let mut not_found = Vec::new();
            for index in indices {
                if store.delete_at(index)? {
                    println!("Deleted note {}", index);
                } else {
                    not_found.push(index);
                }
            }

            if !not_found.is_empty() {
                for index in &not_found {
                    eprintln!("Note {} not found", index);
                }
                std::process::exit(1);
            }
        }

        Commands::Render { page } => {
            let mut renderer = NoteListRenderer::new(HtmlSurface::new());
            renderer.render(&store)?;
            if page {
                let theme = load_theme(&files)?;
                print!("{}", renderer.surface().to_page(theme));
            } else {
                print!("{}", renderer.surface().as_str());
            }
        }

        Commands::Theme { action } => {
            let mut pref = ThemePreference::new(&files, Headless);
            let theme = pref.load()?;
            match action {
                None => println!("{}", theme),
                Some(ThemeAction::Toggle) => {
                    let theme = pref.toggle()?;
                    println!("Theme set to {}", theme);
                }
            }
        }
    }

    Ok(())
}
