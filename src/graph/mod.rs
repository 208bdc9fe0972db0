//! Post-decode graph normalization (spec §4.6-§4.9): a pre-order walk
//! that assigns dense uids and captures an owned, flat view of the tree
//! (`NodeSet`), pathname computation, and dimension-reference
//! resolution.
//!
//! `NodeSet` is a borrow view in spirit: it never captures enough to
//! reconstruct the tree, only enough to classify and address each node
//! (spec DESIGN NOTES). It holds owned snapshots rather than borrowed
//! references, since `compute_pathnames` and `map_dimensions` must be
//! able to operate on it alone, long after the immutable walk that built
//! it has ended.

pub mod dimres;
pub mod pathname;

use std::rc::Rc;

use crate::message::dimension::{classify, DimKind, DimSize};
use crate::message::{Attribute, Dimension, EnumType, EnumTypedef, Group, Header, Structure, Variable};
use crate::options::DecodeOptions;

pub use dimres::{deref_dimensions, map_dimensions};
pub use pathname::compute_pathnames;

/// What kind of wire message a node was walked from (spec §4.6, §GLOSSARY).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Header,
    Group,
    Dimension,
    Variable,
    Structure,
    Attribute,
    EnumTypedef,
    EnumType,
    Data,
    Range,
    Section,
    StructureData,
    Error,
}

/// Traversal-derived booleans attached to a node (spec §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    pub isroot: bool,
    pub isdecl: bool,
    pub visible: bool,
}

/// An owned snapshot of one visited node: enough to classify it,
/// address it by pathname, and (for dimension nodes) carry what
/// `map_dimensions`/`deref_dimensions` need, without holding a borrow
/// into the tree that produced it.
#[derive(Debug, Clone)]
pub struct NodeMeta {
    pub uid: usize,
    pub sort: Sort,
    pub name: Option<String>,
    pub parent: Option<usize>,
    pub flags: Flags,
    pub pathname: Option<String>,
    pub dim_kind: Option<DimKind>,
    pub dim_size: Option<DimSize>,
    pub dim_handle: Option<Rc<Dimension>>,
    /// For a dimension reference node, the uid of the declaration
    /// `map_dimensions` matched it to (spec §4.9 steps 1-2).
    pub resolved: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    pub nodes: Vec<NodeMeta>,
}

impl NodeSet {
    pub fn get(&self, uid: usize) -> Option<&NodeMeta> {
        self.nodes.iter().find(|n| n.uid == uid)
    }

    /// The nearest ancestor (including `uid` itself) whose `sort` is
    /// `Group`. A dimension reference's owning group is where its
    /// matching declaration, if any, must live (spec §4.9).
    pub fn owning_group(&self, uid: usize) -> Option<&NodeMeta> {
        let mut cur = self.get(uid);
        while let Some(n) = cur {
            if n.sort == Sort::Group {
                return Some(n);
            }
            cur = n.parent.and_then(|p| self.get(p));
        }
        None
    }
}

struct Walker {
    nodes: Vec<NodeMeta>,
    next_uid: usize,
}

impl Walker {
    fn push(&mut self, sort: Sort, name: Option<String>, parent: Option<usize>, flags: Flags) -> usize {
        let uid = self.next_uid;
        self.next_uid += 1;
        self.nodes.push(NodeMeta {
            uid,
            sort,
            name,
            parent,
            flags,
            pathname: None,
            dim_kind: None,
            dim_size: None,
            dim_handle: None,
            resolved: None,
        });
        uid
    }

    fn walk_group(&mut self, g: &Group, parent: Option<usize>, isroot: bool, options: DecodeOptions) -> usize {
        let uid = self.push(Sort::Group, g.name.clone(), parent, Flags { isroot, isdecl: false, visible: true });

        for dim in &g.dims {
            self.walk_dimension_decl(dim, uid, options);
        }
        for var in &g.vars {
            self.walk_variable(var, uid, options);
        }
        for s in &g.structs {
            self.walk_structure(s, uid, options);
        }
        for att in &g.atts {
            self.walk_attribute(att, uid);
        }
        for child in &g.groups {
            self.walk_group(child, Some(uid), false, options);
        }
        for e in &g.enum_types {
            self.walk_enum_typedef(e, uid);
        }
        uid
    }

    fn walk_dimension_decl(&mut self, dim: &Rc<Dimension>, parent: usize, options: DecodeOptions) -> usize {
        let uid = self.push(Sort::Dimension, dim.name.clone(), Some(parent), Flags { isroot: false, isdecl: true, visible: true });
        if let Ok((kind, size)) = classify(dim, options) {
            self.nodes[uid].dim_kind = Some(kind);
            self.nodes[uid].dim_size = Some(size);
        }
        self.nodes[uid].dim_handle = Some(Rc::clone(dim));
        uid
    }

    fn walk_dimension_ref(&mut self, dim: &Dimension, parent: usize, options: DecodeOptions) -> usize {
        let uid = self.push(Sort::Dimension, dim.name.clone(), Some(parent), Flags { isroot: false, isdecl: false, visible: false });
        if let Ok((kind, size)) = classify(dim, options) {
            self.nodes[uid].dim_kind = Some(kind);
            self.nodes[uid].dim_size = Some(size);
        }
        uid
    }

    fn walk_variable(&mut self, v: &Variable, parent: usize, options: DecodeOptions) -> usize {
        let uid = self.push(Sort::Variable, Some(v.name.clone()), Some(parent), Flags { isroot: false, isdecl: true, visible: true });
        for entry in &v.shape {
            self.walk_dimension_ref(entry.dimension(), uid, options);
        }
        for att in &v.atts {
            self.walk_attribute(att, uid);
        }
        uid
    }

    fn walk_structure(&mut self, s: &Structure, parent: usize, options: DecodeOptions) -> usize {
        let uid = self.push(Sort::Structure, Some(s.name.clone()), Some(parent), Flags { isroot: false, isdecl: true, visible: true });
        for entry in &s.shape {
            self.walk_dimension_ref(entry.dimension(), uid, options);
        }
        for att in &s.atts {
            self.walk_attribute(att, uid);
        }
        for var in &s.vars {
            self.walk_variable(var, uid, options);
        }
        for child in &s.structs {
            self.walk_structure(child, uid, options);
        }
        uid
    }

    fn walk_attribute(&mut self, a: &Attribute, parent: usize) -> usize {
        self.push(Sort::Attribute, Some(a.name.clone()), Some(parent), Flags { isroot: false, isdecl: false, visible: true })
    }

    fn walk_enum_typedef(&mut self, e: &EnumTypedef, parent: usize) -> usize {
        let uid = self.push(Sort::EnumTypedef, Some(e.name.clone()), Some(parent), Flags { isroot: false, isdecl: true, visible: true });
        for entry in &e.map {
            self.walk_enum_type(entry, uid);
        }
        uid
    }

    fn walk_enum_type(&mut self, e: &EnumType, parent: usize) -> usize {
        self.push(Sort::EnumType, Some(e.value.clone()), Some(parent), Flags { isroot: false, isdecl: false, visible: true })
    }
}

/// Walk a decoded [`Header`] in the exact order of spec §4.6, producing a
/// flat, owned [`NodeSet`] with dense uids. `Data`, `Range`, `Section`,
/// `StructureData`, and the upstream error message aren't reachable from
/// a `Header` and so never appear here; their `Sort` variants exist for
/// completeness with the wire message set.
pub fn walk_header(header: &Header) -> NodeSet {
    walk_header_with_options(header, DecodeOptions::default())
}

pub fn walk_header_with_options(header: &Header, options: DecodeOptions) -> NodeSet {
    let mut w = Walker { nodes: Vec::new(), next_uid: 0 };
    w.walk_group(&header.root, None, true, options);
    NodeSet { nodes: w.nodes }
}
