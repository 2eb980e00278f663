/*
    Rewrite-rule grammars over terminal (`[word]`) and non-terminal symbols,
    and Penn treebank style bracketed trees
*/

pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod parser;
pub mod tree;

pub use grammar::{Grammar, GrammarError, Notation, Production, Symbol};
pub use parser::RuleErrorType;
pub use tree::{Child, Node, Tree, TreeDelimiters, TreeError};
