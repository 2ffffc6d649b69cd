//! Python outline extraction.
//!
//! Walks the statement level of the tree-sitter syntax tree once, keeping an
//! explicit stack of the classes currently being built. A class is pushed when
//! its definition is entered and popped onto the module once its body has been
//! walked, so methods always land on the innermost enclosing class and sibling
//! classes never see each other.
//!
//! Both walks use heap-allocated work lists rather than recursion; expression
//! subtrees are never entered, so deeply nested source cannot exhaust the
//! native stack.

use tree_sitter::Node;

use super::{Parser, create_ts_parser, find_first_error, get_line_span, get_node_text};
use crate::types::{Class, Function, Module, Result, ViewerError};

const CLASS_DEFINITION: &str = "class_definition";
const FUNCTION_DEFINITION: &str = "function_definition";

/// Statement kinds whose children may hold class or function definitions.
const STATEMENT_CONTAINERS: &[&str] = &[
    "module",
    "block",
    "decorated_definition",
    "if_statement",
    "elif_clause",
    "else_clause",
    "for_statement",
    "while_statement",
    "try_statement",
    "except_clause",
    "except_group_clause",
    "finally_clause",
    "with_statement",
    "match_statement",
    "case_clause",
];

fn is_statement_container(kind: &str) -> bool {
    STATEMENT_CONTAINERS.contains(&kind)
}

#[derive(Debug, Clone, Default)]
pub struct PythonParser {
    include_nested_functions: bool,
}

impl PythonParser {
    pub fn new() -> Result<Self> {
        // Validate that the language is available
        let _ = create_ts_parser(tree_sitter_python::LANGUAGE, "Python")?;
        Ok(Self::default())
    }

    /// Record functions defined inside other functions as their children
    pub fn with_nested_functions(mut self, enabled: bool) -> Self {
        self.include_nested_functions = enabled;
        self
    }
}

impl Parser for PythonParser {
    fn parse(&self, path: &str, content: &str) -> Result<Module> {
        let mut parser = create_ts_parser(tree_sitter_python::LANGUAGE, "Python")?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| ViewerError::Syntax {
                path: path.to_string(),
                line: 1,
                column: 0,
            })?;

        let root = tree.root_node();
        if let Some(error_node) = find_first_error(root) {
            let position = error_node.start_position();
            return Err(ViewerError::Syntax {
                path: path.to_string(),
                line: position.row as u32 + 1,
                column: position.column as u32,
            });
        }

        let mut outline = Outline {
            source: content.as_bytes(),
            include_nested_functions: self.include_nested_functions,
            class_stack: Vec::new(),
            module: Module::new(path),
        };
        outline.walk(root);

        Ok(outline.module)
    }
}

/// Traversal state threaded through the walk.
struct Outline<'a> {
    source: &'a [u8],
    include_nested_functions: bool,
    class_stack: Vec<Class>,
    module: Module,
}

enum Step<'t> {
    Visit(Node<'t>),
    CloseClass,
}

impl Outline<'_> {
    fn walk(&mut self, root: Node) {
        let mut pending = vec![Step::Visit(root)];

        while let Some(step) = pending.pop() {
            match step {
                Step::CloseClass => {
                    if let Some(class) = self.class_stack.pop() {
                        self.module.classes.push(class);
                    }
                }
                Step::Visit(node) => match node.kind() {
                    CLASS_DEFINITION => self.open_class(node, &mut pending),
                    FUNCTION_DEFINITION => self.add_function(node),
                    kind if is_statement_container(kind) => {
                        let start = pending.len();
                        let mut cursor = node.walk();
                        pending.extend(node.named_children(&mut cursor).map(Step::Visit));
                        pending[start..].reverse();
                    }
                    _ => {}
                },
            }
        }
    }

    fn open_class<'t>(&mut self, node: Node<'t>, pending: &mut Vec<Step<'t>>) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };

        let (start, end) = get_line_span(node, self.source);
        let name = get_node_text(name_node, self.source);
        self.class_stack.push(Class::new(name, start, end));

        pending.push(Step::CloseClass);
        if let Some(body) = node.child_by_field_name("body") {
            pending.push(Step::Visit(body));
        }
    }

    fn add_function(&mut self, node: Node) {
        let Some(mut function) = function_header(node, self.source) else {
            return;
        };
        if self.include_nested_functions {
            function = attach_nested_functions(node, function, self.source);
        }

        match self.class_stack.last_mut() {
            Some(class) => class.methods.push(function),
            None => self.module.functions.push(function),
        }
    }
}

fn function_header(node: Node, source: &[u8]) -> Option<Function> {
    let name_node = node.child_by_field_name("name")?;
    let (start, end) = get_line_span(node, source);
    Some(Function::new(get_node_text(name_node, source), start, end))
}

/// Attach every callable defined in `node`'s body, at any depth, to `root`.
/// Classes defined there are not part of the outline, and neither is
/// anything inside them.
fn attach_nested_functions(node: Node, mut root: Function, source: &[u8]) -> Function {
    // Pre-order arena of nested functions; `None` parent means `root`
    let mut arena: Vec<(Option<Function>, Option<usize>)> = Vec::new();
    let mut pending: Vec<(Node, Option<usize>)> = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        pending.push((body, None));
    }

    while let Some((current, parent)) = pending.pop() {
        match current.kind() {
            FUNCTION_DEFINITION => {
                let Some(function) = function_header(current, source) else {
                    continue;
                };
                arena.push((Some(function), parent));
                if let Some(body) = current.child_by_field_name("body") {
                    pending.push((body, Some(arena.len() - 1)));
                }
            }
            kind if is_statement_container(kind) => {
                let start = pending.len();
                let mut cursor = current.walk();
                pending.extend(current.named_children(&mut cursor).map(|c| (c, parent)));
                pending[start..].reverse();
            }
            _ => {}
        }
    }

    // Children always sit after their parent, so folding from the back sees
    // every subtree complete before it is moved. Children arrive reversed.
    for index in (0..arena.len()).rev() {
        let (slot, parent) = &mut arena[index];
        let parent = *parent;
        let Some(mut function) = slot.take() else {
            continue;
        };
        function.functions.reverse();
        match parent {
            Some(p) => {
                if let Some((Some(owner), _)) = arena.get_mut(p) {
                    owner.functions.push(function);
                }
            }
            None => root.functions.push(function),
        }
    }

    root.functions.reverse();
    root
}
