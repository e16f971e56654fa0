//! Swift tree helpers shared by the classifier and the rewriter.
//!
//! tree-sitter-swift has drifted in how it names declaration nodes
//! across grammar revisions (structs and enums are parsed as
//! `class_declaration` in current releases, as dedicated kinds in older
//! ones), so kind checks below accept both spellings.

use tree_sitter::Node;

/// Node kinds for nominal type declarations (class/struct/enum/actor).
pub const TYPE_DECL_KINDS: &[&str] = &[
    "class_declaration",
    "struct_declaration",
    "enum_declaration",
    "actor_declaration",
];

/// Leaf kinds that carry an identifier's text.
pub fn is_identifier_token(kind: &str) -> bool {
    matches!(kind, "simple_identifier" | "type_identifier")
}

/// Slice the source text covered by a node.
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

/// Whether a declaration carries `public` or `open`.
///
/// Setter-scoped modifiers like `private(set)` may coexist with
/// `public`; any `public`/`open` token makes the declaration
/// externally visible.
pub fn is_externally_visible(node: &Node, source: &str) -> bool {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "modifiers" && child.kind() != "modifier" {
            continue;
        }
        for token in node_text(&child, source).split_whitespace() {
            let token = token.split('(').next().unwrap_or(token);
            if token == "public" || token == "open" {
                return true;
            }
        }
    }
    false
}

/// Whether a type-declaration node is actually an `extension` body.
/// Extensions re-expose names captured at the primary declaration and
/// are never classified on their own.
pub fn is_extension(node: &Node) -> bool {
    if node.kind() == "extension_declaration" {
        return true;
    }
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|c| c.kind() == "extension")
}

/// The name node of a declaration. Falls back to the token following
/// the `func`/`operator` keyword for operator declarations, which do
/// not always expose a `name` field.
pub fn name_node<'a>(node: &Node<'a>) -> Option<Node<'a>> {
    if let Some(name) = node.child_by_field_name("name") {
        return Some(name);
    }
    let mut cursor = node.walk();
    let mut saw_keyword = false;
    for child in node.children(&mut cursor) {
        match child.kind() {
            "func" | "operator" => saw_keyword = true,
            "(" => return None,
            _ if saw_keyword => return Some(child),
            _ => {}
        }
    }
    // Grammar revisions without a `name` field put the name token as
    // the first identifier child.
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .find(|c| is_identifier_token(c.kind()))
}

/// Canonical signature text of a function declaration: everything from
/// the end of the name token up to the body (or `where` clause),
/// trimmed. The classifier and the rewriter share this helper, so the
/// text is stable across invocations and persisted reports.
pub fn signature_text<'a>(node: &Node, source: &'a str) -> Option<&'a str> {
    let name = name_node(node)?;
    let mut end = node.end_byte();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if matches!(
            child.kind(),
            "function_body" | "where_clause" | "type_constraints"
        ) {
            end = child.start_byte();
            break;
        }
    }
    Some(source[name.end_byte()..end].trim())
}

/// One declared parameter, reduced to what call-site matching needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Call-site label; `None` for `_`-labeled parameters.
    pub label: Option<String>,
    /// Whether the parameter carries a default value.
    pub has_default: bool,
}

/// Parameters of a function declaration, in declaration order.
pub fn parameters(node: &Node, source: &str) -> Vec<Parameter> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "parameter" {
            out.push(parameter(&child, source));
        }
    }
    out
}

fn parameter(node: &Node, source: &str) -> Parameter {
    // The first name before the `:` is the external label (or the
    // shared internal/external name when only one is written).
    let mut names: Vec<Option<String>> = Vec::new();
    let mut has_default = false;
    let mut past_colon = false;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            ":" => past_colon = true,
            "=" => has_default = true,
            "simple_identifier" if !past_colon => {
                names.push(Some(node_text(&child, source).to_string()));
            }
            "_" | "wildcard_pattern" if !past_colon => names.push(None),
            _ => {}
        }
    }
    Parameter {
        label: names.into_iter().next().flatten(),
        has_default,
    }
}

/// Name of the first identifier bound by a property declaration.
pub fn property_name<'a>(node: &Node, source: &'a str) -> Option<&'a str> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "modifiers" {
            continue;
        }
        if child.kind() == "simple_identifier" {
            return Some(node_text(&child, source));
        }
        if let Some(name) = first_simple_identifier(&child, source) {
            return Some(name);
        }
    }
    None
}

fn first_simple_identifier<'a>(node: &Node, source: &'a str) -> Option<&'a str> {
    if node.kind() == "simple_identifier" {
        return Some(node_text(node, source));
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(name) = first_simple_identifier(&child, source) {
            return Some(name);
        }
    }
    None
}

/// First path component of an `import` declaration (`import A.B` → `A`).
pub fn import_first_component<'a>(node: &Node<'a>) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "identifier" => {
                let mut inner = child.walk();
                for part in child.children(&mut inner) {
                    if part.kind() == "simple_identifier" {
                        return Some(part);
                    }
                }
                return Some(child);
            }
            "simple_identifier" => return Some(child),
            _ => {}
        }
    }
    None
}

/// The identifier token a call expression invokes directly, i.e. the
/// token immediately preceding the argument list. Calls through
/// anything else (closures, subscript results, generic suffixes)
/// return `None` and are left to the plain identifier rule.
pub fn direct_callee<'a>(call: &Node<'a>) -> Option<Node<'a>> {
    let callee = call.child(0)?;
    if callee.kind() == "call_suffix" {
        return None;
    }
    let mut node = callee;
    while node.child_count() > 0 {
        node = node.child(node.child_count() - 1)?;
    }
    (node.kind() == "simple_identifier").then_some(node)
}

/// Argument labels actually written at a call site, plus whether a
/// trailing closure follows the argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallShape {
    pub labels: Vec<Option<String>>,
    pub trailing_closure: bool,
}

/// Read the argument-label sequence off a `call_expression`.
pub fn call_shape(call: &Node, source: &str) -> Option<CallShape> {
    let mut cursor = call.walk();
    let suffix = call.children(&mut cursor).find(|c| c.kind() == "call_suffix")?;

    let mut labels = Vec::new();
    let mut trailing_closure = false;
    let mut suffix_cursor = suffix.walk();
    for child in suffix.children(&mut suffix_cursor) {
        match child.kind() {
            "value_arguments" => {
                let mut args_cursor = child.walk();
                for arg in child.children(&mut args_cursor) {
                    if arg.kind() == "value_argument" {
                        labels.push(argument_label(&arg, source));
                    }
                }
            }
            "lambda_literal" => trailing_closure = true,
            _ => {}
        }
    }
    Some(CallShape {
        labels,
        trailing_closure,
    })
}

fn argument_label(arg: &Node, source: &str) -> Option<String> {
    // A label exists iff the argument has a direct `:` child; the node
    // before it is the label token. `_` counts as no-label.
    let mut prev: Option<Node> = None;
    let mut cursor = arg.walk();
    for child in arg.children(&mut cursor) {
        if child.kind() == ":" {
            return prev.and_then(|p| {
                let text = node_text(&p, source);
                (text != "_").then(|| text.to_string())
            });
        }
        prev = Some(child);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_source;

    fn first_decl(source: &str, kind_contains: &str) -> (tree_sitter::Tree, usize) {
        let tree = parse_source(source).unwrap();
        let idx = {
            let root = tree.root_node();
            let mut cursor = root.walk();
            root.children(&mut cursor)
                .position(|c| c.kind().contains(kind_contains))
                .unwrap_or_else(|| panic!("no {kind_contains} in {source}"))
        };
        (tree, idx)
    }

    #[test]
    fn detects_public_and_open() {
        for source in [
            "public struct Foo {}\n",
            "open class Foo {}\n",
            "public private(set) var order: Int = 0\n",
        ] {
            let tree = parse_source(source).unwrap();
            let root = tree.root_node();
            let decl = root.named_child(0).unwrap();
            assert!(is_externally_visible(&decl, source), "{source}");
        }

        let source = "internal struct Foo {}\n";
        let tree = parse_source(source).unwrap();
        let decl = tree.root_node().named_child(0).unwrap();
        assert!(!is_externally_visible(&decl, source));
    }

    #[test]
    fn extension_is_recognized() {
        let source = "public extension Foo { func f() {} }\n";
        let tree = parse_source(source).unwrap();
        let decl = tree.root_node().named_child(0).unwrap();
        assert!(is_extension(&decl));

        let source = "public struct Foo {}\n";
        let tree = parse_source(source).unwrap();
        let decl = tree.root_node().named_child(0).unwrap();
        assert!(!is_extension(&decl));
    }

    #[test]
    fn signature_excludes_body() {
        let source = "public func f(x: Int, y: Int = 0) -> Int { return x + y }\n";
        let (tree, idx) = first_decl(source, "function_declaration");
        let decl = tree.root_node().child(idx).unwrap();
        let sig = signature_text(&decl, source).unwrap();
        assert!(sig.starts_with("(x: Int"), "sig = {sig:?}");
        assert!(sig.contains("-> Int"), "sig = {sig:?}");
        assert!(!sig.contains("return"), "sig = {sig:?}");
    }

    #[test]
    fn parameter_labels_and_defaults() {
        let source = "public func f(x: Int, _ y: Int, at z: Int = 0) {}\n";
        let (tree, idx) = first_decl(source, "function_declaration");
        let decl = tree.root_node().child(idx).unwrap();
        let params = parameters(&decl, source);
        assert_eq!(
            params,
            vec![
                Parameter { label: Some("x".into()), has_default: false },
                Parameter { label: None, has_default: false },
                Parameter { label: Some("at".into()), has_default: true },
            ]
        );
    }

    #[test]
    fn call_shape_reads_labels() {
        let source = "f(x: 1, 2)\n";
        let tree = parse_source(source).unwrap();
        let mut call = None;
        visit_all(tree.root_node(), &mut |n| {
            if n.kind() == "call_expression" {
                call = Some(n);
            }
        });
        let shape = call_shape(&call.unwrap(), source).unwrap();
        assert_eq!(shape.labels, vec![Some("x".to_string()), None]);
        assert!(!shape.trailing_closure);
    }

    #[test]
    fn call_shape_sees_trailing_closure() {
        let source = "f(x: 1) { print(0) }\n";
        let tree = parse_source(source).unwrap();
        let mut shape = None;
        visit_all(tree.root_node(), &mut |n| {
            if n.kind() == "call_expression" && shape.is_none() {
                shape = call_shape(&n, source);
            }
        });
        let shape = shape.unwrap();
        assert_eq!(shape.labels, vec![Some("x".to_string())]);
        assert!(shape.trailing_closure);
    }

    #[test]
    fn import_component() {
        let source = "import MyKit.Inner\n";
        let tree = parse_source(source).unwrap();
        let decl = tree.root_node().named_child(0).unwrap();
        let first = import_first_component(&decl).unwrap();
        assert_eq!(node_text(&first, source), "MyKit");
    }

    fn visit_all<'a, F: FnMut(tree_sitter::Node<'a>)>(node: tree_sitter::Node<'a>, f: &mut F) {
        f(node);
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            visit_all(child, f);
        }
    }
}
