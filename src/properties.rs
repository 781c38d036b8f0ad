use crate::types::Node;

/// Collect the free variables of a tree: bare, non-numeric atoms that are
/// not in head position. Depth-first, left to right, duplicates kept.
pub(crate) fn collect(node: &Node) -> Vec<String> {
    let mut out = Vec::new();
    walk(node, &mut out);
    out
}

fn walk(node: &Node, out: &mut Vec<String>) {
    match node {
        Node::Atom(atom) => {
            if atom.is_symbol() {
                out.push(atom.text().to_owned());
            }
        }
        Node::List(children) => {
            let args = match children.split_first() {
                Some((Node::Atom(_), rest)) => rest,
                _ => children.as_slice(),
            };
            for child in args {
                walk(child, out);
            }
        }
    }
}
