use super::prompt::parse_binding;
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use snipzapp::model::CATCH_ALL_TYPE;
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Term,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "snipz",
    bin_name = "snipz",
    version,
    disable_help_subcommand = true,
    after_help = "Enable shell completions:\n  eval \"$(snipz completions bash)\"  # add to ~/.bashrc\n  eval \"$(snipz completions zsh)\"   # add to ~/.zshrc"
)]
#[command(about = "Categorized command snippets with fill-in placeholders", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (overrides SNIPZ_HOME)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Output format
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Term,
        help_heading = "Options"
    )]
    pub output: OutputFormat,
}

pub fn build_command() -> clap::Command {
    Cli::command()
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List categories
    #[command(alias = "cats", display_order = 1)]
    Categories,

    /// Manage categories
    #[command(display_order = 2)]
    Category {
        #[command(subcommand)]
        action: CategoryCommands,
    },

    /// List the scripts of a category (the first one by default)
    #[command(alias = "ls", display_order = 3)]
    List { category: Option<String> },

    /// Add a script to a category
    #[command(display_order = 4)]
    Add {
        category: String,

        /// Script type (see `snipz types`)
        #[arg(long = "type", short = 't', default_value = CATCH_ALL_TYPE)]
        script_type: String,

        /// Script name, unique within the category
        #[arg(long, short = 'n')]
        name: String,

        /// Script body. Read from stdin when omitted and stdin is piped
        #[arg(long)]
        value: Option<String>,

        /// Free-form description
        #[arg(long, short = 'd', default_value = "")]
        description: String,
    },

    /// Change a script. Fields not given are kept
    #[command(display_order = 5)]
    Edit {
        category: String,
        name: String,

        #[arg(long = "type", short = 't')]
        script_type: Option<String>,

        #[arg(long)]
        new_name: Option<String>,

        #[arg(long)]
        value: Option<String>,

        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// Delete a script
    #[command(alias = "rm", display_order = 6)]
    Delete { category: String, name: String },

    /// Swap two scripts by their listed positions
    #[command(display_order = 7)]
    Swap {
        category: String,
        from: usize,
        to: usize,
    },

    /// Search scripts by type, name or value
    #[command(display_order = 10)]
    Search {
        query: String,

        /// Only search this category
        #[arg(long, short = 'c')]
        category: Option<String>,
    },

    /// Copy a script to the clipboard, filling in its placeholders
    #[command(alias = "cp", display_order = 11)]
    Copy {
        category: String,
        name: String,

        /// Placeholder value, as NAME=VALUE (repeatable)
        #[arg(long = "set", short = 's', value_name = "NAME=VALUE", value_parser = parse_binding)]
        bindings: Vec<(String, String)>,

        /// Print instead of copying
        #[arg(long, short = 'p')]
        print: bool,
    },

    /// Show a script in full
    #[command(display_order = 12)]
    Show { category: String, name: String },

    /// List the suggested script types
    #[command(display_order = 20)]
    Types,

    /// Show or change settings
    #[command(display_order = 21)]
    Config {
        key: Option<String>,
        value: Option<String>,
    },

    /// Print a shell completion script
    #[command(display_order = 30)]
    Completions {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Create a category at the end of the list
    Add { name: String },

    /// Rename a category, keeping its scripts and position
    Rename { old_name: String, new_name: String },

    /// Delete a category and all its scripts
    #[command(alias = "rm")]
    Delete { name: String },

    /// Move a category one place up
    Up { name: String },

    /// Move a category one place down
    Down { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn command_definition_is_consistent() {
        build_command().debug_assert();
    }

    #[test]
    fn add_defaults_type_and_description() {
        let cli = parse(&["snipz", "add", "Scripting", "-n", "procs", "--value", "ps"]);
        match cli.command {
            Some(Commands::Add {
                script_type,
                description,
                value,
                ..
            }) => {
                assert_eq!(script_type, "Other");
                assert_eq!(description, "");
                assert_eq!(value.as_deref(), Some("ps"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn copy_collects_repeated_bindings() {
        let cli = parse(&[
            "snipz", "copy", "AD", "User", "--set", "Username=jdoe", "-s", "Dc=a=b",
        ]);
        match cli.command {
            Some(Commands::Copy { bindings, print, .. }) => {
                assert!(!print);
                assert_eq!(
                    bindings,
                    vec![
                        ("Username".to_string(), "jdoe".to_string()),
                        ("Dc".to_string(), "a=b".to_string())
                    ]
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["snipz", "cats", "-vv", "--output", "json"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn bad_binding_is_rejected() {
        assert!(Cli::try_parse_from(["snipz", "copy", "A", "b", "--set", "novalue"]).is_err());
    }
}
