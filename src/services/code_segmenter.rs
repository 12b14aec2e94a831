use tree_sitter::{Language, Node, Parser, Tree};

use crate::config::constants::SUPPORTED_FALLBACK_LANGUAGES;
use crate::errors::{DevpulseError, DevpulseResult};

/// Check whether local analysis has a grammar for the given language.
pub fn is_language_supported(language: &str) -> bool {
    SUPPORTED_FALLBACK_LANGUAGES.contains(&language)
}

fn grammar_for(language: &str) -> Option<Language> {
    match language {
        "python" => Some(tree_sitter_python::LANGUAGE.into()),
        "javascript" => Some(tree_sitter_javascript::LANGUAGE.into()),
        _ => None,
    }
}

/// Node kinds that count as an independently analyzable segment.
fn segment_kinds(language: &str) -> &'static [&'static str] {
    match language {
        "python" => &["function_definition", "class_definition"],
        "javascript" => &["function_declaration", "class_declaration"],
        _ => &[],
    }
}

/// Parse a snippet under the grammar for `language`.
///
/// Tree-sitter itself is error-tolerant, so "parse failure" here means the
/// grammar produced no tree at all or the tree contains ERROR nodes.
pub fn parse_source(source: &str, language: &str) -> DevpulseResult<Tree> {
    let grammar = grammar_for(language)
        .ok_or_else(|| DevpulseError::unsupported_language(language, SUPPORTED_FALLBACK_LANGUAGES))?;

    let mut parser = Parser::new();
    parser
        .set_language(&grammar)
        .map_err(|e| DevpulseError::system_error("grammar initialization", &e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| DevpulseError::parse_error(language, "parser produced no tree"))?;

    if tree.root_node().has_error() {
        return Err(DevpulseError::parse_error(language, "source contains syntax errors"));
    }

    Ok(tree)
}

/// Lazy depth-first walk over a parsed tree, yielding the source text of
/// every function and class definition. Restartable: call `segments` again
/// for a fresh traversal.
pub struct SegmentIter<'a> {
    stack: Vec<Node<'a>>,
    source: &'a str,
    kinds: &'static [&'static str],
}

impl<'a> Iterator for SegmentIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            for i in (0..node.child_count()).rev() {
                if let Some(child) = node.child(i) {
                    self.stack.push(child);
                }
            }
            if self.kinds.contains(&node.kind()) {
                return Some(&self.source[node.byte_range()]);
            }
        }
        None
    }
}

pub fn segments<'a>(tree: &'a Tree, source: &'a str, language: &str) -> SegmentIter<'a> {
    SegmentIter {
        stack: vec![tree.root_node()],
        source,
        kinds: segment_kinds(language),
    }
}
