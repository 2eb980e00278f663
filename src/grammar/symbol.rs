use std::fmt::Display;

use super::Notation;

// The base unit in a grammar rule. Terminals hold their text without the
// enclosing brackets, so the empty terminal is epsilon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    pub fn terminal(text: impl Into<String>) -> Self {
        Symbol::Terminal(text.into())
    }

    pub fn nonterminal(text: impl Into<String>) -> Self {
        Symbol::Nonterminal(text.into())
    }

    pub fn epsilon() -> Self {
        Symbol::Terminal(String::new())
    }

    // Classify a surface token: it is terminal iff it is enclosed in the
    // notation's bracket pair.
    pub fn parse(text: &str, notation: &Notation) -> Self {
        let (open, close) = notation.bracket_pair;
        let enclosed = text.len() >= open.len_utf8() + close.len_utf8()
            && text.starts_with(open)
            && text.ends_with(close);

        if enclosed {
            Symbol::Terminal(text[open.len_utf8()..text.len() - close.len_utf8()].to_string())
        } else {
            Symbol::Nonterminal(text.to_string())
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_nonterminal(&self) -> bool {
        !self.is_terminal()
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Terminal(text) if text.is_empty())
    }

    pub fn text(&self) -> &str {
        match self {
            Symbol::Terminal(text) | Symbol::Nonterminal(text) => text,
        }
    }

    // Whether rule text rendered in `notation` reads back as this symbol.
    // The text must avoid whitespace and every character of the separator,
    // the delimiter and the line separator; a non-terminal must also be
    // non-empty and not look like a bracketed terminal.
    pub fn is_writable(&self, notation: &Notation) -> bool {
        let reserved = |c: char| {
            c.is_whitespace()
                || c == notation.separator
                || notation.delimiter.contains(c)
                || notation.line_separator.contains(c)
        };

        !self.text().contains(reserved)
            && !matches!(self, Symbol::Nonterminal(text) if text.is_empty())
            && Symbol::parse(&self.render(notation), notation) == *self
    }

    pub fn render(&self, notation: &Notation) -> String {
        match self {
            Symbol::Terminal(text) => {
                format!("{}{}{}", notation.bracket_pair.0, text, notation.bracket_pair.1)
            }
            Symbol::Nonterminal(text) => text.clone(),
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(&Notation::default()))
    }
}
