/*
    This module is for labeled bracketed trees in Penn treebank notation
*/

mod parser;
mod traversal;

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use crate::error_handling::ErrorType;
use crate::grammar::{Grammar, Production, Symbol};
use traversal::{walk, Step};
pub use traversal::{Node, Postorder, Preorder};

#[derive(Debug, PartialEq, Error)]
pub enum TreeError {
    #[error("Malformed bracketed tree: {left} left delimiters, {right} right delimiters")]
    Unbalanced { left: usize, right: usize },
    #[error("Unexpected `{delimiter}` at byte {position} closes nothing")]
    UnexpectedClose { delimiter: char, position: usize },
    #[error("The delimiter opened at byte {position} is never closed")]
    Unclosed { position: usize },
    #[error("Expected `{expected}` at byte {position}, found `{found}`")]
    ExpectedOpen { expected: char, found: char, position: usize },
    #[error("Tree delimiters must be two distinct non-whitespace characters, got `{0}`")]
    InvalidDelimiters(String),
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

impl ErrorType for TreeError {}

pub type Result<T> = std::result::Result<T, TreeError>;

// The pair of characters that open and close a constituent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeDelimiters {
    pub open: char,
    pub close: char,
}

impl Default for TreeDelimiters {
    fn default() -> Self {
        TreeDelimiters { open: '(', close: ')' }
    }
}

impl TreeDelimiters {
    pub fn new(open: char, close: char) -> Result<Self> {
        if open == close || open.is_whitespace() || close.is_whitespace() {
            return Err(TreeError::InvalidDelimiters(format!("{}{}", open, close)));
        }
        Ok(TreeDelimiters { open, close })
    }

    pub fn from_pair(pair: &str) -> Result<Self> {
        let mut chars = pair.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(open), Some(close), None) => TreeDelimiters::new(open, close),
            _ => Err(TreeError::InvalidDelimiters(pair.to_string())),
        }
    }
}

impl FromStr for TreeDelimiters {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self> {
        TreeDelimiters::from_pair(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Tree(Tree),
    Token(String),
}

impl Child {
    pub fn token(text: impl Into<String>) -> Self {
        Child::Token(text.into())
    }
}

impl From<Tree> for Child {
    fn from(tree: Tree) -> Self {
        Child::Tree(tree)
    }
}

// A node label with an ordered list of children, each either a subtree or
// a bare token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    label: String,
    children: Vec<Child>,
}

impl Tree {
    pub fn new(label: impl Into<String>, children: Vec<Child>) -> Self {
        Tree {
            label: label.into(),
            children,
        }
    }

    pub fn leaf(label: impl Into<String>) -> Self {
        Tree::new(label, Vec::new())
    }

    pub fn parse(text: &str) -> Result<Self> {
        parser::parse_tree(text, TreeDelimiters::default())
    }

    pub fn parse_with(text: &str, delimiters: TreeDelimiters) -> Result<Self> {
        parser::parse_tree(text, delimiters)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }

    // Trees on the longest path down from the root; tokens do not count
    pub fn height(&self) -> usize {
        let mut depth = 0;
        let mut tallest = 0;

        walk(self, |step| match step {
            Step::Enter(_) => {
                depth += 1;
                tallest = tallest.max(depth);
            }
            Step::Leave(_) => depth -= 1,
            Step::Token(_) => {}
        });

        tallest
    }

    // A tree with this root label whose children are this tree's leaves.
    pub fn flatten(&self) -> Tree {
        if self.is_terminal() {
            return self.clone();
        }
        Tree::new(self.label.clone(), self.leaves().map(Child::token).collect())
    }

    pub fn flatten_in_place(&mut self) -> Result<()> {
        Err(TreeError::NotImplemented("In-place flattening"))
    }

    pub fn pre_terminals(&self) -> Result<Vec<&Tree>> {
        Err(TreeError::NotImplemented("Pre-terminal extraction"))
    }

    pub fn part_of_speech(&self) -> Result<Vec<(&str, &str)>> {
        Err(TreeError::NotImplemented("Part-of-speech extraction"))
    }

    pub fn chomsky_normal_form(&self) -> Result<Tree> {
        Err(TreeError::NotImplemented("Conversion to Chomsky normal form"))
    }

    pub fn chomsky_normal_form_in_place(&mut self) -> Result<()> {
        Err(TreeError::NotImplemented("In-place conversion to Chomsky normal form"))
    }

    // The grammar licensing this tree: one rule per distinct constituent,
    // rewriting its label as the labels of its subtrees and its tokens.
    // Childless constituents below the root rewrite as epsilon.
    pub fn to_grammar(&self) -> Grammar {
        let mut grammar = Grammar::new();
        if self.is_terminal() {
            return grammar;
        }

        for tree in self.subtrees() {
            let daughters = if tree.is_terminal() {
                vec![Symbol::epsilon()]
            } else {
                tree.children
                    .iter()
                    .map(|child| match child {
                        Child::Tree(subtree) => Symbol::nonterminal(subtree.label.as_str()),
                        Child::Token(token) => Symbol::terminal(token.as_str()),
                    })
                    .collect()
            };

            let head = vec![Symbol::nonterminal(tree.label.as_str())];
            let production = Production::from_parts(head, daughters);
            if !grammar.contains(&production) {
                grammar.push(production);
            }
        }

        grammar
    }

    pub fn render(&self, delimiters: TreeDelimiters) -> String {
        if self.is_terminal() {
            return self.label.clone();
        }
        let mut out = String::new();
        self.write_bracketed(&mut out, delimiters);
        out
    }

    // Nested trees are always bracketed, even without children, so that
    // they read back as trees rather than tokens
    fn write_bracketed(&self, out: &mut String, delimiters: TreeDelimiters) {
        walk(self, |step| match step {
            Step::Enter(tree) => {
                if !std::ptr::eq(tree, self) {
                    out.push(' ');
                }
                out.push(delimiters.open);
                out.push_str(&tree.label);
            }
            Step::Token(token) => {
                out.push(' ');
                out.push_str(token);
            }
            Step::Leave(_) => out.push(delimiters.close),
        });
    }

    // Render for the LaTeX qtree package, e.g. `\Tree [.S [.NP John ] ]`.
    pub fn to_latex_qtree(&self) -> String {
        let mut out = String::from("\\Tree ");
        self.write_qtree(&mut out);
        out
    }

    fn write_qtree(&self, out: &mut String) {
        walk(self, |step| match step {
            Step::Enter(tree) => {
                if !std::ptr::eq(tree, self) {
                    out.push(' ');
                }
                if !tree.is_terminal() {
                    out.push_str("[.");
                }
                out.push_str(&tree.label);
            }
            Step::Token(token) => {
                out.push(' ');
                out.push_str(token);
            }
            Step::Leave(tree) if !tree.is_terminal() => out.push_str(" ]"),
            Step::Leave(_) => {}
        });
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(TreeDelimiters::default()))
    }
}

impl FromStr for Tree {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self> {
        Tree::parse(s)
    }
}
