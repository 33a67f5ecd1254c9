//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging and full error chains
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--quiet` / `-q`: Minimal output

use std::io::IsTerminal;

use clap::{Parser, Subcommand};

/// Nexus - command-line tooling with a persistent variable configuration
#[derive(Parser, Debug)]
#[command(name = "nexus")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging and print full error chains
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable interactive prompts
    #[arg(long = "interactive", global = true, conflicts_with = "no_interactive")]
    pub interactive_flag: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if:
    /// - `--interactive` was explicitly set, OR
    /// - Neither `--no-interactive` nor `--quiet` was set AND stdin is a TTY
    pub fn interactive(&self) -> bool {
        if self.interactive_flag {
            true
        } else if self.no_interactive || self.quiet {
            false
        } else {
            std::io::stdin().is_terminal()
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read and change the variable configuration
    #[command(
        name = "config",
        long_about = "Read and change the variable configuration.\n\n\
            Variables live in a single TOML file in your home directory \
            (~/.nexus/config/variables.toml, or $NEXUS_HOME/config/variables.toml). \
            They are addressed by dotted keys such as 'cli.color_palette'. \
            Missing defaults are filled in automatically; values you changed \
            are never overwritten except by 'nexus config reset'.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Show everything
    nexus config list

    # Show one section or one value
    nexus config list cli
    nexus config get cli.color_palette

    # Change a value (TOML literal; bare words are strings)
    nexus config set cli.color_palette mocha
    nexus config set exceptions.show_locals true --force

    # Start over from the defaults
    nexus config reset"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    nexus completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    nexus completion zsh >> ~/.zshrc

    # Fish
    nexus completion fish > ~/.config/fish/completions/nexus.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get the value of a variable by its KEY
    Get {
        /// Dotted variable key, e.g. cli.color_palette
        key: String,
    },
    /// Set the VALUE of an existing variable by its KEY
    Set {
        /// Dotted variable key
        key: String,
        /// New value, parsed as a TOML literal; bare words are strings
        value: String,
        /// Skip the confirmation step
        #[arg(short, long)]
        force: bool,
    },
    /// List the variable configuration, or the subtree under KEY
    List {
        /// Dotted key of a section to show
        key: Option<String>,
        /// Print dotted keys instead of a tree
        #[arg(long)]
        keys: bool,
        /// With --keys, omit keys that name sections
        #[arg(long, requires = "keys")]
        leaves: bool,
        /// Print JSON instead of a tree
        #[arg(long, conflicts_with = "keys")]
        json: bool,
    },
    /// Reset the variable configuration to its defaults
    Reset {
        /// Skip the confirmation step
        #[arg(short, long)]
        force: bool,
    },
    /// Print the location of the variable configuration file
    Path,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
