//! Range Editor CLI
//!
//! Edits preflop ranges stored in a directory on disk. One-shot subcommands
//! cover scripting; `session` opens an interactive prompt with undo/redo.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use range_editor::codec;
use range_editor::ranges::{grid, Action, Hand, Position};
use range_editor::render::{self, Palette};
use range_editor::store::config::DEFAULT_HISTORY_LIMIT;
use range_editor::{logging, FileStorage, RangeError, RangeStore, StoreConfig};

#[derive(Parser)]
#[command(
    name = "ranges",
    version,
    about = "Preflop range editor",
    long_about = "Assign RAISE, CALL or FOLD to the 169 starting hands for each of\n\
                  BTN, CO, HJ, LJ, SB and BB. Ranges are saved after every edit."
)]
struct Cli {
    /// Directory ranges are stored in.
    #[arg(long, env = "RANGES_STORAGE", default_value = ".ranges", global = true)]
    storage: PathBuf,

    /// Undo/redo depth per position.
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT, global = true)]
    history_limit: usize,

    /// Print grids without colour.
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the 13x13 hand layout.
    Grid,

    /// Print the range of one position, or of every position.
    Show { position: Option<Position> },

    /// Assign an action to hands (`none` clears them).
    Paint {
        position: Position,
        action: String,
        #[arg(required = true)]
        hands: Vec<Hand>,
    },

    /// Clear a position's range.
    Clear { position: Position },

    /// Copy the saved range of one position onto another.
    Copy { from: Position, to: Position },

    /// Write every range to poker-ranges-YYYY-MM-DD.json.
    Export {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Replace ranges with those from an exported file.
    Import { file: PathBuf },

    /// Write every range as an HTML chart page.
    Html {
        #[arg(default_value = "ranges.html")]
        output: PathBuf,
    },

    /// Interactive editing with undo/redo.
    Session,
}

/// Commands accepted at the session prompt.
#[derive(Parser)]
enum SessionCommand {
    /// Select the active position.
    Pos { position: String },
    /// Assign an action to hands in the active position.
    Paint {
        action: String,
        #[arg(required = true)]
        hands: Vec<Hand>,
    },
    /// Remove hands from the active range.
    Erase {
        #[arg(required = true)]
        hands: Vec<Hand>,
    },
    /// Clear the active range.
    Clear,
    Undo,
    Redo,
    /// Copy a position's saved range (default: active).
    Copy { position: Option<Position> },
    /// Paste the clipboard (default: into the active position).
    Paste { position: Option<Position> },
    /// Print the active range.
    Show,
    Export {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    Import { file: PathBuf },
    #[command(alias = "exit")]
    Quit,
}

type Store = RangeStore<FileStorage>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = StoreConfig::default().with_history_limit(cli.history_limit);

    let palette = Palette::default();
    let ansi = !cli.no_color;
    let mut store = RangeStore::open(FileStorage::new(cli.storage.clone()), config)
        .context("invalid configuration")?;

    match cli.command {
        Command::Grid => print_layout(),
        Command::Show { position } => match position {
            Some(position) => print_range(&store, position, &palette, ansi),
            None => {
                for position in Position::all() {
                    print_range(&store, *position, &palette, ansi);
                }
            }
        },
        Command::Paint {
            position,
            action,
            hands,
        } => {
            let action = Action::parse_optional(&action)?;
            for hand in hands {
                store.update_hand_for(position, hand, action);
                check(&store)?;
            }
            println!("{}", render::summary(store.range(position)));
        }
        Command::Clear { position } => {
            store.set_selected_position(position);
            store.reset_range();
            check(&store)?;
        }
        Command::Copy { from, to } => {
            if !store.copy_range(from) {
                bail!("could not read saved range for {from}");
            }
            if !store.can_paste() {
                bail!("nothing saved for {from}");
            }
            if !store.paste_range(to) {
                check(&store)?;
            }
            println!("copied {from} to {to}");
        }
        Command::Export { dir } => export(&store, &dir)?,
        Command::Import { file } => import(&mut store, &file)?,
        Command::Html { output } => {
            let page = render::html(store.ranges(), &palette);
            fs::write(&output, page)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Saved HTML: {}", output.display());
        }
        Command::Session => session(&mut store, &palette, ansi)?,
    }

    Ok(())
}

fn session(store: &mut Store, palette: &Palette, ansi: bool) -> Result<()> {
    log::info!("entering session");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}> ", store.selected_position());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let args = std::iter::once(">").chain(line.split_whitespace());
        let command = match SessionCommand::try_parse_from(args) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        match run_session_command(store, command, palette, ansi) {
            Ok(true) => continue,
            Ok(false) => break,
            Err(e) => eprintln!("error: {e:#}"),
        }
    }

    Ok(())
}

/// Returns false when the session should end.
fn run_session_command(
    store: &mut Store,
    command: SessionCommand,
    palette: &Palette,
    ansi: bool,
) -> Result<bool> {
    match command {
        SessionCommand::Pos { position } => {
            store.select(&position)?;
        }
        SessionCommand::Paint { action, hands } => {
            let action = Action::parse_optional(&action)?;
            for hand in hands {
                store.update_hand(hand, action);
            }
        }
        SessionCommand::Erase { hands } => {
            for hand in hands {
                store.update_hand(hand, None);
            }
        }
        SessionCommand::Clear => store.reset_range(),
        SessionCommand::Undo => {
            if !store.can_undo() {
                println!("nothing to undo");
            }
            store.undo();
        }
        SessionCommand::Redo => {
            if !store.can_redo() {
                println!("nothing to redo");
            }
            store.redo();
        }
        SessionCommand::Copy { position } => {
            let position = position.unwrap_or(store.selected_position());
            if !store.copy_range(position) {
                bail!("could not read saved range for {position}");
            }
            if store.can_paste() {
                println!("copied {position}");
            } else {
                println!("nothing saved for {position}");
            }
        }
        SessionCommand::Paste { position } => {
            let position = position.unwrap_or(store.selected_position());
            let Some(source) = store.clipboard().map(|clipboard| clipboard.source) else {
                println!("clipboard is empty");
                return Ok(true);
            };
            if store.paste_range(position) {
                println!("pasted {source} into {position}");
            }
        }
        SessionCommand::Show => {
            print_range(store, store.selected_position(), palette, ansi);
        }
        SessionCommand::Export { dir } => export(store, &dir)?,
        SessionCommand::Import { file } => import(store, &file)?,
        SessionCommand::Quit => return Ok(false),
    }

    check(store)?;
    Ok(true)
}

fn export(store: &Store, dir: &Path) -> Result<()> {
    let path = codec::export_to_dir(store.ranges(), dir).map_err(friendly)?;
    println!("Saved: {}", path.display());
    Ok(())
}

fn import(store: &mut Store, file: &Path) -> Result<()> {
    let imported = codec::import_file(file).map_err(friendly)?;
    let positions: Vec<String> = imported.keys().map(|p| p.to_string()).collect();
    store.apply_import(imported);
    check(store)?;
    println!("Imported: {}", positions.join(", "));
    Ok(())
}

/// Wrap a codec error so the readable message comes first.
fn friendly(err: RangeError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

/// Turn a stored error message into a command failure.
fn check(store: &Store) -> Result<()> {
    match store.error() {
        Some(message) => bail!("{message}"),
        None => Ok(()),
    }
}

fn print_layout() {
    for row in grid::generate() {
        let labels: Vec<String> = row.iter().map(|hand| format!("{:>4}", hand.to_string())).collect();
        println!("{}", labels.join(""));
    }
}

fn print_range(store: &Store, position: Position, palette: &Palette, ansi: bool) {
    let range = store.range(position);
    println!("=== {} ===", position);
    print!("{}", render::text_grid(range, palette, ansi));
    println!("{}\n", render::summary(range));
}
