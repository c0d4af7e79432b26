//! Builds a node tree from a token stream.
//!
//! Parsing is a single forward pass over an explicit stack of open tags.
//! Every `Tag` node in the output corresponds to a matched open/close pair;
//! anything else is an error.

use crate::error::{MarkupError, Result};
use crate::token::{Token, TokenKind};

/// A node of the parsed markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text.
    Word(String),
    /// A tagged region and everything between its open and close tags.
    Tag { name: String, children: Vec<Node> },
}

impl Node {
    pub fn word(text: impl Into<String>) -> Self {
        Node::Word(text.into())
    }

    pub fn tag(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Tag {
            name: name.into(),
            children,
        }
    }
}

// Deep trees would overflow the stack with the default recursive drop.
impl Drop for Node {
    fn drop(&mut self) {
        let Node::Tag { children, .. } = self else {
            return;
        };
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Node::Tag { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}

/// An open tag waiting for its close tag.
#[derive(Debug)]
struct Frame {
    name: String,
    position: usize,
    children: Vec<Node>,
}

/// Parses tokens into the top-level node sequence.
///
/// The stream is expected to end with an `Eof` token, as produced by
/// [`lex`](crate::lex). Tokens after the first `Eof` are ignored.
///
/// # Errors
///
/// - [`MarkupError::UnmatchedCloseTag`] when a close tag does not match the
///   innermost open tag (including a close tag with nothing open).
/// - [`MarkupError::UnclosedTag`] when input ends with tags still open.
///
/// ```rust
/// use tagtint_markup::{lex, parse, Node};
///
/// let nodes = parse(lex("a<b>c</b>")).unwrap();
/// assert_eq!(
///     nodes,
///     vec![Node::word("a"), Node::tag("b", vec![Node::word("c")])]
/// );
/// ```
pub fn parse<I>(tokens: I) -> Result<Vec<Node>>
where
    I: IntoIterator<Item = Token>,
{
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Word => {
                let children = match stack.last_mut() {
                    Some(frame) => &mut frame.children,
                    None => &mut root,
                };
                children.push(Node::Word(token.value));
            }
            TokenKind::TagOpen => stack.push(Frame {
                name: token.value,
                position: token.position,
                children: Vec::new(),
            }),
            TokenKind::TagClose => {
                let frame = match stack.pop() {
                    Some(frame) if frame.name == token.value => frame,
                    _ => {
                        tracing::debug!(
                            tag = %token.value,
                            position = token.position,
                            "unmatched close tag"
                        );
                        return Err(MarkupError::UnmatchedCloseTag {
                            name: token.value,
                            position: token.position,
                        });
                    }
                };
                let node = Node::Tag {
                    name: frame.name,
                    children: frame.children,
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => root.push(node),
                }
            }
            TokenKind::Eof => break,
        }
    }

    if let Some(innermost) = stack.last() {
        let position = innermost.position;
        let names: Vec<String> = stack.into_iter().map(|frame| frame.name).collect();
        tracing::debug!(tags = ?names, position, "unclosed tags at end of input");
        return Err(MarkupError::UnclosedTag { names, position });
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn parse_str(input: &str) -> Result<Vec<Node>> {
        parse(lex(input))
    }

    mod trees {
        use super::*;

        #[test]
        fn empty_input() {
            assert_eq!(parse_str("").unwrap(), vec![]);
        }

        #[test]
        fn plain_text() {
            assert_eq!(parse_str("hello").unwrap(), vec![Node::word("hello")]);
        }

        #[test]
        fn single_tag() {
            assert_eq!(
                parse_str("<info>hi</info>").unwrap(),
                vec![Node::tag("info", vec![Node::word("hi")])]
            );
        }

        #[test]
        fn empty_tag() {
            assert_eq!(
                parse_str("<info></info>").unwrap(),
                vec![Node::tag("info", vec![])]
            );
        }

        #[test]
        fn nested_and_siblings() {
            assert_eq!(
                parse_str("a<b>c<info>d</info>e</b>f").unwrap(),
                vec![
                    Node::word("a"),
                    Node::tag(
                        "b",
                        vec![
                            Node::word("c"),
                            Node::tag("info", vec![Node::word("d")]),
                            Node::word("e"),
                        ]
                    ),
                    Node::word("f"),
                ]
            );
        }

        #[test]
        fn same_name_nested() {
            assert_eq!(
                parse_str("<b><b>x</b></b>").unwrap(),
                vec![Node::tag("b", vec![Node::tag("b", vec![Node::word("x")])])]
            );
        }

        #[test]
        fn escaped_tag_produces_no_tag_node() {
            assert_eq!(parse_str("\\<info>").unwrap(), vec![Node::word("<info>")]);
        }

        #[test]
        fn deep_nesting() {
            let depth = 500;
            let input = format!("{}x{}", "<a>".repeat(depth), "</a>".repeat(depth));
            let mut nodes = parse_str(&input).unwrap();
            for _ in 0..depth {
                assert_eq!(nodes.len(), 1);
                match nodes.pop() {
                    Some(mut node) => match &mut node {
                        Node::Tag { children, .. } => nodes = std::mem::take(children),
                        other => panic!("expected tag, got {other:?}"),
                    },
                    None => panic!("expected a node"),
                }
            }
            assert_eq!(nodes, vec![Node::word("x")]);
        }

        #[test]
        fn very_deep_nesting_parses_and_drops() {
            let depth = 100_000;
            let input = format!("{}x{}", "<a>".repeat(depth), "</a>".repeat(depth));
            let nodes = parse_str(&input).unwrap();
            assert_eq!(nodes.len(), 1);

            let mut levels = 0;
            let mut current = &nodes[0];
            while let Node::Tag { children, .. } = current {
                levels += 1;
                current = &children[0];
            }
            assert_eq!(levels, depth);
            assert!(matches!(current, Node::Word(text) if text == "x"));
        }

        #[test]
        fn very_deep_unclosed_input_fails_cleanly() {
            let depth = 100_000;
            let input = format!("{}<b>x</b>", "<a>".repeat(depth));
            match parse_str(&input) {
                Err(MarkupError::UnclosedTag { names, .. }) => assert_eq!(names.len(), depth),
                other => panic!("expected unclosed tag error, got {}", other.is_ok()),
            }
        }

        #[test]
        fn tokens_after_eof_are_ignored() {
            let tokens = vec![Token::word("a", 0), Token::eof(1), Token::open("b", 1)];
            assert_eq!(parse(tokens).unwrap(), vec![Node::word("a")]);
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn unclosed_tag() {
            assert_eq!(
                parse_str("<info>x").unwrap_err(),
                MarkupError::UnclosedTag {
                    names: vec!["info".into()],
                    position: 0
                }
            );
        }

        #[test]
        fn unclosed_lists_outermost_first_and_points_at_innermost() {
            assert_eq!(
                parse_str("<a>x<b>y<c>z").unwrap_err(),
                MarkupError::UnclosedTag {
                    names: vec!["a".into(), "b".into(), "c".into()],
                    position: 8
                }
            );
        }

        #[test]
        fn unclosed_after_closed_sibling() {
            assert_eq!(
                parse_str("<a><b></b>").unwrap_err(),
                MarkupError::UnclosedTag {
                    names: vec!["a".into()],
                    position: 0
                }
            );
        }

        #[test]
        fn mismatched_close_tag() {
            assert_eq!(
                parse_str("<info>x</error>").unwrap_err(),
                MarkupError::UnmatchedCloseTag {
                    name: "error".into(),
                    position: 7
                }
            );
        }

        #[test]
        fn overlapping_tags() {
            assert_eq!(
                parse_str("<b><u>x</b></u>").unwrap_err(),
                MarkupError::UnmatchedCloseTag {
                    name: "b".into(),
                    position: 7
                }
            );
        }

        #[test]
        fn orphan_close_tag() {
            assert_eq!(
                parse_str("hello</b>").unwrap_err(),
                MarkupError::UnmatchedCloseTag {
                    name: "b".into(),
                    position: 5
                }
            );
        }

        #[test]
        fn close_tag_names_are_case_sensitive() {
            assert!(matches!(
                parse_str("<Info>x</info>"),
                Err(MarkupError::UnmatchedCloseTag { .. })
            ));
        }
    }
}
