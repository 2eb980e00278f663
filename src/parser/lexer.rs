use crate::grammar::Notation;

use super::{Result, RuleErrorType};

#[derive(PartialEq, Debug)]
pub enum Token {
    Delimiter,
    Separator,
    Symbol(String)
}

// Whitespace is insignificant anywhere in a rule, including inside the
// delimiter itself
fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn lex_symbol<'a>(rule: &'a str, delimiter: &str, separator: char) -> (Token, &'a str) {
    let end = rule
        .char_indices()
        .find(|&(i, c)| c == separator || rule[i..].starts_with(delimiter))
        .map_or(rule.len(), |(i, _)| i);

    (Token::Symbol(rule[..end].to_string()), &rule[end..])
}

pub fn lex_rule(rule: &str, notation: &Notation) -> Result<Vec<Token>> {
    let delimiter = compact(&notation.delimiter);
    if delimiter.is_empty() {
        return Err(RuleErrorType::EmptyDelimiter);
    }

    let rule = compact(rule);
    let mut rest = rule.as_str();
    let mut tokens = Vec::new();

    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix(delimiter.as_str()) {
            tokens.push(Token::Delimiter);
            rest = after;
        } else if c == notation.separator {
            tokens.push(Token::Separator);
            rest = &rest[c.len_utf8()..];
        } else {
            let (token, after) = lex_symbol(rest, &delimiter, notation.separator);
            tokens.push(token);
            rest = after;
        }
    }

    Ok(tokens)
}
