use crate::types::{Atom, Node};

/// Head symbols that are spellings of another function.
const ALIASES: &[(&str, &str)] = &[("!", "not")];

/// Normalize a freshly parsed tree so the evaluator sees one spelling per
/// function. Purely structural: nothing is evaluated or folded.
pub(crate) fn optimize(node: Node) -> Node {
    match node {
        Node::Atom(_) => node,
        Node::List(children) => {
            let mut children: Vec<Node> = children.into_iter().map(optimize).collect();
            if let Some(Node::Atom(head)) = children.first_mut() {
                if let Some(canonical) = canonical_name(head) {
                    *head = Atom::bare(canonical);
                }
            }
            Node::List(children)
        }
    }
}

fn canonical_name(atom: &Atom) -> Option<&'static str> {
    if atom.is_quoted() {
        return None;
    }
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == atom.text())
        .map(|(_, canonical)| *canonical)
}
