use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "plainwiki")]
#[command(version, about = "A personal wiki that keeps every page as a plain text file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (defaults to ./plainwiki.json, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the page files
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the wiki over HTTP (the default)
    Serve(ServeArgs),

    /// Index the data directory once and print every page title
    #[command(alias = "ls")]
    Pages,
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Directory served under /static/
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Directory with home.html, view.html, edit.html and new.html
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub bind: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}
