//! CLI for the medical research RAG service
//!
//! - `serve`: run the HTTP API
//! - `ask`: answer one question and print the result

pub mod ask;
pub mod serve;

use clap::{Parser, Subcommand};

/// Medical research RAG - cited answers from a research-paper corpus
#[derive(Parser)]
#[command(name = "med-research-rag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Answer a single research question
    Ask(ask::AskArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_flags() {
        let cli = Cli::try_parse_from([
            "med-research-rag",
            "ask",
            "Metformin vs insulin",
            "--no-guidelines",
        ])
        .unwrap();

        match cli.command {
            Command::Ask(args) => {
                assert_eq!(args.query, "Metformin vs insulin");
                assert!(args.no_guidelines);
                assert!(!args.explain);
            }
            Command::Serve => panic!("expected ask"),
        }
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["med-research-rag", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }
}
