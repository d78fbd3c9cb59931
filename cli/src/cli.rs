use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Turn meeting notes into a summary, key points and action items
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Use canned results instead of calling Gemini
    #[arg(long, global = true, default_value_t = false)]
    pub dummy: bool,

    /// Directory for saved meeting records
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract title, summary, key points and action items
    Analyze {
        /// Notes text; use `-` to read from stdin
        #[arg(index = 1)]
        text: Option<String>,

        /// Read the notes from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Image of notes or a whiteboard
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Save the result to the record list
        #[arg(long, default_value_t = false)]
        save: bool,

        /// Print JSON instead of formatted output
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Summarize text into a summary and a plain task list
    Summarize {
        /// Text to summarize; use `-` to read from stdin
        #[arg(index = 1)]
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Print JSON instead of formatted output
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Manage saved analyses
    Records {
        #[command(subcommand)]
        action: RecordsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecordsCommand {
    /// List saved analyses, newest first
    List,

    /// Show one saved analysis
    Show { index: usize },

    /// Delete one saved analysis
    Delete { index: usize },

    /// Replace a saved analysis with the contents of a JSON file
    Edit {
        index: usize,

        /// JSON file holding the edited analysis
        #[arg(long)]
        from: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_analyze_with_image() {
        let args = Args::parse_from([
            "minutes", "--dummy", "analyze", "--image", "board.png", "--save",
        ]);
        assert!(args.dummy);
        match args.command {
            Command::Analyze { text, image, save, .. } => {
                assert_eq!(text, None);
                assert_eq!(image, Some(PathBuf::from("board.png")));
                assert!(save);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_records_edit() {
        let args = Args::parse_from(["minutes", "records", "edit", "2", "--from", "fixed.json"]);
        match args.command {
            Command::Records {
                action: RecordsCommand::Edit { index, from },
            } => {
                assert_eq!(index, 2);
                assert_eq!(from, PathBuf::from("fixed.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn text_and_file_conflict() {
        let result = Args::try_parse_from(["minutes", "summarize", "hello", "--file", "notes.txt"]);
        assert!(result.is_err());
    }
}
