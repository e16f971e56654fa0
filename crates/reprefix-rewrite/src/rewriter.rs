//! The prefix-insertion rewriter and layer composer.
//!
//! Renaming never re-renders the syntax tree. Each layer is matched
//! against the parsed tree and contributes a set of byte positions
//! where its prefix is inserted; splicing those insertions into the
//! original string yields output that is byte-identical to the input
//! everywhere except immediately before renamed tokens.
//!
//! When several layers hit the same token, every matching layer's
//! prefix is inserted, with later layers ending up outermost. Layers
//! are disjoint by construction in normal runs, so this only shows up
//! when a report deliberately overlaps the base layer; stacked
//! prefixes are the documented composition contract for that case.

use std::collections::{BTreeSet, HashSet};

use tree_sitter::{Node, Tree};

use reprefix_syntax::parse::{SyntaxError, parse_source};
use reprefix_syntax::swift;
use reprefix_syntax::symbols::FunctionSig;

use crate::layer::RenameLayer;

/// Apply a single layer to one source file.
pub fn apply(layer: &RenameLayer, source: &str) -> Result<String, SyntaxError> {
    compose(std::slice::from_ref(layer), source)
}

/// Apply an ordered list of layers to one source file.
pub fn compose(layers: &[RenameLayer], source: &str) -> Result<String, SyntaxError> {
    let tree = parse_source(source)?;
    Ok(compose_tree(layers, &tree, source))
}

/// Apply an ordered list of layers to an already-parsed file.
pub fn compose_tree(layers: &[RenameLayer], tree: &Tree, source: &str) -> String {
    // (position, layer index); at equal positions the later layer's
    // prefix is emitted first so it lands outermost.
    let mut insertions: Vec<(usize, usize)> = Vec::new();
    for (index, layer) in layers.iter().enumerate() {
        if layer.is_empty() {
            continue;
        }
        for position in layer_edits(layer, tree.root_node(), source) {
            insertions.push((position, index));
        }
    }
    insertions.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
    log::debug!("{} prefix insertions across {} layers", insertions.len(), layers.len());

    let mut output = String::with_capacity(source.len() + insertions.len() * 8);
    let mut consumed = 0;
    for (position, index) in insertions {
        output.push_str(&source[consumed..position]);
        output.push_str(layers[index].prefix());
        consumed = position;
    }
    output.push_str(&source[consumed..]);
    output
}

/// Byte positions where one layer inserts its prefix.
fn layer_edits(layer: &RenameLayer, root: Node, source: &str) -> BTreeSet<usize> {
    let mut edits = BTreeSet::new();
    // Callee tokens already decided by the call-site rule; the plain
    // identifier rule must not reconsider them.
    let mut claimed_callees: HashSet<usize> = HashSet::new();
    visit(root, &mut |node| {
        collect(layer, &node, source, &mut edits, &mut claimed_callees);
    });
    edits
}

fn visit<'a, F: FnMut(Node<'a>)>(node: Node<'a>, f: &mut F) {
    f(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, f);
    }
}

fn collect(
    layer: &RenameLayer,
    node: &Node,
    source: &str,
    edits: &mut BTreeSet<usize>,
    claimed_callees: &mut HashSet<usize>,
) {
    match node.kind() {
        "call_expression" => {
            let Some(callee) = swift::direct_callee(node) else {
                return;
            };
            let name = swift::node_text(&callee, source);
            if !layer.has_function_named(name) {
                return;
            }
            // Call sites are conservative: once the callee names a
            // known function, only an exact pattern match renames it.
            claimed_callees.insert(callee.id());
            let Some(shape) = swift::call_shape(node, source) else {
                return;
            };
            if layer.functions_named(name).any(|f| call_matches(f, &shape)) {
                edits.insert(callee.start_byte());
            }
        }
        "function_declaration" => {
            // Declaration-site renaming matches on (name, signature) so
            // that declarations recorded by a different layer's report
            // are renamed here too.
            let Some(name) = swift::name_node(node) else {
                return;
            };
            if name.kind() != "simple_identifier" {
                return;
            }
            let Some(signature) = swift::signature_text(node, source) else {
                return;
            };
            if layer.declares_function(swift::node_text(&name, source), signature) {
                edits.insert(name.start_byte());
            }
        }
        "import_declaration" => {
            let Some(first) = swift::import_first_component(node) else {
                return;
            };
            if layer.renames_module(swift::node_text(&first, source)) {
                edits.insert(first.start_byte());
            }
        }
        kind if swift::is_identifier_token(kind) => {
            if claimed_callees.contains(&node.id()) {
                return;
            }
            if layer.renames_identifier(swift::node_text(node, source)) {
                edits.insert(node.start_byte());
            }
        }
        _ => {}
    }
}

/// Whether one stored pattern accepts the call's written labels.
///
/// Explicit arguments are compared label-for-label. The pattern must
/// cover exactly the written arguments, plus one extra slot when a
/// trailing closure fills the final parameter.
fn call_matches(function: &FunctionSig, shape: &swift::CallShape) -> bool {
    let Some(args) = &function.args else {
        return false;
    };
    if args.len() < shape.labels.len() {
        return false;
    }
    for (stored, written) in args.iter().zip(&shape.labels) {
        if stored != written {
            return false;
        }
    }
    if shape.trailing_closure {
        args.len() == shape.labels.len() + 1
    } else {
        args.len() == shape.labels.len()
    }
}
