use super::{Child, Result, Tree, TreeDelimiters, TreeError};

// Counts must match and the running depth may never go negative. Checked
// before any parsing so malformed input is never partially read.
fn check_balance(text: &str, delimiters: TreeDelimiters) -> Result<usize> {
    let left = text.chars().filter(|&c| c == delimiters.open).count();
    let right = text.chars().filter(|&c| c == delimiters.close).count();

    if left != right {
        return Err(TreeError::Unbalanced { left, right });
    }

    let mut depth = 0usize;
    for (position, c) in text.char_indices() {
        if c == delimiters.open {
            depth += 1;
        } else if c == delimiters.close {
            depth = depth.checked_sub(1).ok_or(TreeError::UnexpectedClose {
                delimiter: c,
                position,
            })?;
        }
    }

    Ok(left)
}

fn is_boundary(c: char, delimiters: TreeDelimiters) -> bool {
    c.is_whitespace() || c == delimiters.open || c == delimiters.close
}

// Length of the run of characters before whitespace or a delimiter
fn word_len(text: &str, delimiters: TreeDelimiters) -> usize {
    text.find(|c: char| is_boundary(c, delimiters)).unwrap_or(text.len())
}

// Parse bracketed text such as `(S (NP John) (VP runs))`. Text without any
// delimiters is a single childless tree.
pub fn parse_tree(text: &str, delimiters: TreeDelimiters) -> Result<Tree> {
    if check_balance(text, delimiters)? == 0 {
        return Ok(Tree::leaf(text.trim()));
    }

    let start = text.len() - text.trim_start().len();
    let first = text[start..].chars().next().unwrap_or(delimiters.open);
    if first != delimiters.open {
        return Err(TreeError::ExpectedOpen {
            expected: delimiters.open,
            found: first,
            position: start,
        });
    }

    // Constituents opened but not yet closed, innermost last
    let mut unclosed: Vec<Tree> = Vec::new();
    let mut rest = &text[start..];

    loop {
        rest = rest.trim_start();
        let position = text.len() - rest.len();

        match rest.chars().next() {
            None => return Err(TreeError::Unclosed { position: start }),
            Some(c) if c == delimiters.open => {
                // Whitespace after the open delimiter is not part of the label
                let inner = rest[c.len_utf8()..].trim_start();
                let label_len = word_len(inner, delimiters);
                log::trace!("Parsing constituent `{}`", &inner[..label_len]);

                unclosed.push(Tree::leaf(&inner[..label_len]));
                rest = &inner[label_len..];
            }
            Some(c) if c == delimiters.close => {
                let tree = unclosed.pop().ok_or(TreeError::UnexpectedClose { delimiter: c, position })?;
                rest = &rest[c.len_utf8()..];

                match unclosed.last_mut() {
                    Some(parent) => parent.children.push(Child::Tree(tree)),
                    None => {
                        let trailing = rest.trim();
                        if !trailing.is_empty() {
                            log::warn!("Ignoring `{}` after the end of the tree", trailing);
                        }
                        return Ok(tree);
                    }
                }
            }
            Some(_) => {
                let len = word_len(rest, delimiters);
                let parent = unclosed.last_mut().ok_or(TreeError::Unclosed { position: start })?;
                parent.children.push(Child::token(&rest[..len]));
                rest = &rest[len..];
            }
        }
    }
}
