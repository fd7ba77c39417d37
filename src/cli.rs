use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flagedit")]
#[command(about = "Edit the allowed values and visibility rules of a bug tracker flag")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive editor; prints the submitted form on Ctrl+S
    Edit {
        /// Seed file with the flag's current state (JSON)
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },

    /// Print the values and visibility tables of a seed
    Show {
        /// Seed file with the flag's current state (JSON)
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },

    /// Print the form body a submit of the unedited seed would send
    Encode {
        /// Seed file with the flag's current state (JSON)
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },
}

impl Commands {
    pub fn seed(&self) -> Option<PathBuf> {
        match self {
            Commands::Edit { seed } | Commands::Show { seed } | Commands::Encode { seed } => {
                seed.clone()
            }
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, Commands::Edit { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_with_seed() {
        let cli = Cli::try_parse_from(["flagedit", "show", "--seed", "flag.json"]).unwrap();
        assert_eq!(cli.command.seed(), Some(PathBuf::from("flag.json")));
        assert!(!cli.command.is_interactive());
    }

    #[test]
    fn test_parse_edit_without_seed() {
        let cli = Cli::try_parse_from(["flagedit", "edit"]).unwrap();
        assert_eq!(cli.command.seed(), None);
        assert!(cli.command.is_interactive());
    }
}
