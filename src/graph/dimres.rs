//! Dimension reference resolution (spec §4.9): matching a `Variable`'s or
//! `Structure`'s unresolved shape entries to the `Dimension` declaration
//! they name, then rewriting the live tree to share that declaration's
//! identity.

use std::rc::Rc;

use super::{NodeSet, Sort};
use crate::error::{Error, Result};
use crate::message::{Group, Header, ShapeEntry, Structure, Variable};

/// A reference's effective declaration pathname: its owning group's
/// pathname joined with its own name, exactly the form a sibling
/// declaration in that group would have computed for itself. This is a
/// pure `NodeSet` operation (spec §4.9 steps 1-2) — it never touches the
/// tree that produced `nodes`.
pub fn map_dimensions(nodes: &mut NodeSet) -> Result<()> {
    let snapshot = NodeSet { nodes: nodes.nodes.clone() };

    let decls: Vec<&super::NodeMeta> = snapshot
        .nodes
        .iter()
        .filter(|n| n.sort == Sort::Dimension && n.flags.isdecl)
        .collect();

    for node in &mut nodes.nodes {
        if node.sort != Sort::Dimension || node.flags.isdecl {
            continue;
        }
        let owner = snapshot
            .get(node.uid)
            .and_then(|n| n.parent)
            .and_then(|p| snapshot.owning_group(p));
        let name = match &node.name {
            Some(n) if !n.is_empty() => n,
            _ => continue,
        };
        let candidate_pathname = match owner.and_then(|g| g.pathname.clone()) {
            Some(group_path) if !group_path.is_empty() => format!("{}.{}", group_path, name),
            _ => name.clone(),
        };

        let m = decls.iter().find(|d| {
            d.pathname.as_deref() == Some(candidate_pathname.as_str())
                && d.dim_kind == node.dim_kind
                && d.dim_size == node.dim_size
        });
        match m {
            Some(decl) => node.resolved = Some(decl.uid),
            None => {
                return Err(Error::InvalidCoords(format!(
                    "dimension reference {:?} (expected at {}) has no matching declaration",
                    node.name, candidate_pathname
                )))
            }
        }
    }
    Ok(())
}

struct Deref<'a> {
    nodes: &'a NodeSet,
    next_uid: usize,
    resolved_uids: Vec<usize>,
}

impl<'a> Deref<'a> {
    fn advance(&mut self) -> usize {
        let uid = self.next_uid;
        self.next_uid += 1;
        uid
    }

    fn shape(&mut self, shape: &mut Vec<ShapeEntry>) {
        for entry in shape.iter_mut() {
            let uid = self.advance();
            if let Some(node) = self.nodes.get(uid) {
                if let Some(decl_uid) = node.resolved {
                    if let Some(decl) = self.nodes.get(decl_uid) {
                        if let Some(handle) = &decl.dim_handle {
                            *entry = ShapeEntry::Resolved(Rc::clone(handle));
                            self.resolved_uids.push(uid);
                        }
                    }
                }
            }
        }
    }

    fn variable(&mut self, v: &mut Variable) {
        self.advance();
        self.shape(&mut v.shape);
        for _att in &v.atts {
            self.advance();
        }
    }

    fn structure(&mut self, s: &mut Structure) {
        self.advance();
        self.shape(&mut s.shape);
        for _att in &s.atts {
            self.advance();
        }
        for var in &mut s.vars {
            self.variable(var);
        }
        for child in &mut s.structs {
            self.structure(child);
        }
    }

    fn group(&mut self, g: &mut Group) {
        self.advance();
        for _dim in &g.dims {
            self.advance();
        }
        for var in &mut g.vars {
            self.variable(var);
        }
        for s in &mut g.structs {
            self.structure(s);
        }
        for _att in &g.atts {
            self.advance();
        }
        for child in &mut g.groups {
            self.group(child);
        }
        for e in &g.enum_types {
            self.advance();
            for _entry in &e.map {
                self.advance();
            }
        }
    }
}

/// Rewrite `header`'s shape vectors in place, replacing each resolved
/// dimension reference with a shared handle to its declaration, then
/// prune the now-redundant reference nodes from `nodes` (spec §4.9 steps
/// 3-4). Must run after [`map_dimensions`] and walk the tree in the
/// exact order [`crate::graph::walk_header`] used, so that uids line up.
pub fn deref_dimensions(header: &mut Header, nodes: &mut NodeSet) {
    let mut d = Deref { nodes, next_uid: 0, resolved_uids: Vec::new() };
    d.group(&mut header.root);
    let resolved_uids = d.resolved_uids;
    nodes.nodes.retain(|n| !resolved_uids.contains(&n.uid));
}
