//! Soundboard - command-line front end for a stored sound board.
//!
//! Adds, arranges, and binds sound buttons in the durable store, and moves
//! whole sessions in and out as `.soundboard` files.

use clap::{Parser, Subcommand};
use soundboard::cli::{
    AddArgs, BindArgs, BoardOptions, ConfigArgs, DeleteArgs, ExportArgs, ImportArgs, ListArgs,
    MoveArgs, PaletteArgs, RecolorArgs, RenameArgs, ResetArgs, UnbindArgs,
};
use soundboard::constants::APP_BINARY_NAME;
use soundboard::logging;

/// Soundboard - sound button editor with persistent sessions
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    board: BoardOptions,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a button from an audio file
    Add(AddArgs),
    /// List buttons in display order
    List(ListArgs),
    /// Rename a button
    Rename(RenameArgs),
    /// Change a button's color
    Recolor(RecolorArgs),
    /// Bind a keyboard shortcut to a button
    Bind(BindArgs),
    /// Remove a button's shortcut
    Unbind(UnbindArgs),
    /// Drag a button to a new position
    Move(MoveArgs),
    /// Delete a button
    Delete(DeleteArgs),
    /// Write the board to a .soundboard file
    Export(ExportArgs),
    /// Replace the board with a .soundboard file
    Import(ImportArgs),
    /// Delete every button and the stored session
    Reset(ResetArgs),
    /// Manage the button color palette
    Palette(PaletteArgs),
    /// Show configuration
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let board = &cli.board;
    let result = match &cli.command {
        Command::Add(args) => args.execute(board),
        Command::List(args) => args.execute(board),
        Command::Rename(args) => args.execute(board),
        Command::Recolor(args) => args.execute(board),
        Command::Bind(args) => args.execute(board),
        Command::Unbind(args) => args.execute(board),
        Command::Move(args) => args.execute(board),
        Command::Delete(args) => args.execute(board),
        Command::Export(args) => args.execute(board),
        Command::Import(args) => args.execute(board),
        Command::Reset(args) => args.execute(board),
        Command::Palette(args) => args.execute(board),
        Command::Config(args) => args.execute(board),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}
