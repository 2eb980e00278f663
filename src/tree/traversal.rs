use super::{Child, Tree};

// A position in a tree: either a labeled node or a bare token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    Tree(&'a Tree),
    Token(&'a str),
}

impl<'a> Node<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Node::Tree(tree) => tree.label(),
            Node::Token(token) => token,
        }
    }
}

impl<'a> From<&'a Child> for Node<'a> {
    fn from(child: &'a Child) -> Self {
        match child {
            Child::Tree(tree) => Node::Tree(tree),
            Child::Token(token) => Node::Token(token),
        }
    }
}

pub struct Preorder<'a> {
    stack: Vec<Node<'a>>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Node::Tree(tree) = node {
            self.stack.extend(tree.children().iter().rev().map(Node::from));
        }
        Some(node)
    }
}

pub struct Postorder<'a> {
    // The flag marks trees whose children are already on the stack
    stack: Vec<(Node<'a>, bool)>,
}

impl<'a> Iterator for Postorder<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.pop()? {
                (Node::Tree(tree), false) if !tree.is_terminal() => {
                    self.stack.push((Node::Tree(tree), true));
                    self.stack
                        .extend(tree.children().iter().rev().map(|child| (Node::from(child), false)));
                }
                (node, _) => return Some(node),
            }
        }
    }
}

// One event of a depth-first walk: entering a tree, passing a token, or
// leaving a tree once all of its children are done
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Step<'a> {
    Enter(&'a Tree),
    Token(&'a str),
    Leave(&'a Tree),
}

// Depth-first walk on an explicit stack
pub(super) fn walk<'a>(root: &'a Tree, mut visit: impl FnMut(Step<'a>)) {
    let mut pending = vec![Step::Enter(root)];

    while let Some(step) = pending.pop() {
        if let Step::Enter(tree) = step {
            pending.push(Step::Leave(tree));
            pending.extend(tree.children().iter().rev().map(|child| match child {
                Child::Tree(subtree) => Step::Enter(subtree),
                Child::Token(token) => Step::Token(token),
            }));
        }
        visit(step);
    }
}

impl Tree {
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            stack: vec![Node::Tree(self)],
        }
    }

    pub fn postorder(&self) -> Postorder<'_> {
        Postorder {
            stack: vec![(Node::Tree(self), false)],
        }
    }

    pub fn subtrees(&self) -> impl Iterator<Item = &Tree> {
        self.preorder().filter_map(|node| match node {
            Node::Tree(tree) => Some(tree),
            Node::Token(_) => None,
        })
    }

    // Tokens, and the labels of childless trees, left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &str> {
        self.preorder().filter_map(|node| match node {
            Node::Token(token) => Some(token),
            Node::Tree(tree) if tree.is_terminal() => Some(tree.label()),
            Node::Tree(_) => None,
        })
    }
}
