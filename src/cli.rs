use clap::Parser;
use std::path::PathBuf;

/// Insert a custom game read from a JSON file into a SQLite database
#[derive(Parser, Debug)]
#[command(name = "add_game", version, about)]
pub struct Cli {
    /// Path to the JSON document holding "nome" and "imagem_url"
    pub json_path: PathBuf,

    /// Path to the SQLite database containing the jogos table
    pub db_path: PathBuf,

    /// Log informational events to stderr (overridden by RUST_LOG)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
