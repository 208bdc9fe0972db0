//! Pathname computation (spec §4.7): a dotted name built by walking each
//! node's parent chain up to (but not including) the root group, then
//! joining the collected names from outermost to innermost.

use super::NodeSet;

/// Fill in `pathname` for every node in `nodes` (spec §4.7, §8.5 example:
/// a variable `x` inside group `g1` gets pathname `g1.x`).
pub fn compute_pathnames(nodes: &mut NodeSet) {
    let snapshot = nodes.nodes.clone();
    for node in &mut nodes.nodes {
        let mut segments = Vec::new();
        let mut cur = Some(node.clone());
        while let Some(n) = cur {
            if n.flags.isroot {
                break;
            }
            if let Some(name) = &n.name {
                if !name.is_empty() {
                    segments.push(name.clone());
                }
            }
            cur = n.parent.and_then(|p| snapshot.iter().find(|m| m.uid == p).cloned());
        }
        segments.reverse();
        node.pathname = if segments.is_empty() { None } else { Some(segments.join(".")) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{walk_header, Sort};
    use crate::message::{Dimension, Group, Header, Variable};
    use crate::datatype::DataType;
    use crate::message::ShapeEntry;

    #[test]
    fn variable_in_nested_group_gets_dotted_pathname() {
        let var = Variable {
            name: "x".into(),
            data_type: DataType::Int,
            shape: vec![ShapeEntry::Unresolved(Dimension { name: Some("d".into()), length: Some(1), is_unlimited: Some(false), is_vlen: Some(false), is_private: Some(false) })],
            atts: vec![],
            unsigned_: None,
            data: None,
            enum_type: None,
            dim_index: vec![],
        };
        let g1 = Group { name: Some("g1".into()), dims: vec![], vars: vec![var], structs: vec![], atts: vec![], groups: vec![], enum_types: vec![] };
        let root = Group { name: None, dims: vec![], vars: vec![], structs: vec![], atts: vec![], groups: vec![g1], enum_types: vec![] };
        let header = Header { location: None, title: None, id: None, root, version: None };

        let mut nodes = walk_header(&header);
        compute_pathnames(&mut nodes);

        let var_node = nodes.nodes.iter().find(|n| n.sort == Sort::Variable).unwrap();
        assert_eq!(var_node.pathname.as_deref(), Some("g1.x"));
    }
}
