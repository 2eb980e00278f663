// Surface syntax used to read and write rule text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notation {
    pub delimiter: String,
    // Encloses terminal symbols, `[word]` by default
    pub bracket_pair: (char, char),
    pub separator: char,
    // Separates rules in multi-rule text
    pub line_separator: String,
}

impl Default for Notation {
    fn default() -> Self {
        Notation {
            delimiter: "-->".to_string(),
            bracket_pair: ('[', ']'),
            separator: ',',
            line_separator: "\n".to_string(),
        }
    }
}

impl Notation {
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_bracket_pair(mut self, open: char, close: char) -> Self {
        self.bracket_pair = (open, close);
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_line_separator(mut self, line_separator: impl Into<String>) -> Self {
        self.line_separator = line_separator.into();
        self
    }
}
