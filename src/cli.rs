use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use gramtree::generator::DEFAULT_MAX_DEPTH;
use gramtree::{Notation, TreeDelimiters};

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Log more (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Report which grammar classes a rule file belongs to
    Classify {
        #[command(flatten)]
        grammar: GrammarArgs,
    },
    /// Derive random sentences from a rule file
    Generate {
        #[command(flatten)]
        grammar: GrammarArgs,

        /// Start symbol (default: head of the first rule)
        #[arg(short, long, value_name = "SYMBOL")]
        start: Option<String>,

        /// Amount to generate
        #[arg(short = 'n', long, value_name = "AMOUNT", default_value_t = 1)]
        amount: u32,

        /// Give up on derivations deeper than this
        #[arg(long, value_name = "DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Parse a bracketed tree and describe it
    Tree {
        /// Bracketed tree, e.g. "(S (NP John) (VP runs))"
        text: String,

        /// Opening and closing delimiter
        #[arg(long, value_name = "PAIR", default_value = "()")]
        tree_delimiters: TreeDelimiters,

        /// Print LaTeX qtree markup instead
        #[arg(long)]
        latex: bool,

        /// Collapse the tree to its root and leaves first
        #[arg(long)]
        flatten: bool,

        /// Print the rules licensing the tree instead
        #[arg(long, conflicts_with = "latex")]
        rules: bool,
    },
}

#[derive(Args)]
pub struct GrammarArgs {
    /// File containing the grammar, one rule per line
    pub file: PathBuf,

    /// Separator between a rule's head and daughters
    #[arg(long, value_name = "DELIM", default_value = "-->")]
    pub delimiter: String,

    /// Characters enclosing terminal symbols
    #[arg(long, value_name = "PAIR", default_value = "[]", value_parser = parse_bracket_pair)]
    pub brackets: (char, char),
}

impl GrammarArgs {
    pub fn notation(&self) -> Notation {
        Notation::default()
            .with_delimiter(self.delimiter.clone())
            .with_bracket_pair(self.brackets.0, self.brackets.1)
    }
}

fn parse_bracket_pair(pair: &str) -> Result<(char, char), String> {
    let mut chars = pair.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(open), Some(close), None) => Ok((open, close)),
        _ => Err(format!("expected exactly two characters, got `{}`", pair)),
    }
}
