//! 重叠图：读段节点、有向重叠边，以及构建图所需的读段库。

pub mod builder;
pub mod library;

pub use builder::{build_naive_overlap_graph, build_overlap_graph, GraphOpt};
pub use library::ReadLibrary;

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};

pub type ReadId = usize;
pub type EdgeId = usize;

/// 遍历方向：Forward 沿出边，Backward 沿入边。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// 有向重叠边 source → target。
///
/// label 同时是 source 的后缀和 target 的前缀，权重为 label 长度（恒大于 0）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapEdge {
    pub source: ReadId,
    pub target: ReadId,
    pub label: String,
}

impl OverlapEdge {
    #[inline]
    pub fn weight(&self) -> usize {
        self.label.len()
    }

    /// 沿 `dir` 走过这条边后到达的节点
    #[inline]
    pub fn next(&self, dir: Direction) -> ReadId {
        match dir {
            Direction::Forward => self.target,
            Direction::Backward => self.source,
        }
    }
}

/// 读段节点。内容即身份；出入边以边 id 引用图中唯一的一份边数据。
#[derive(Debug, Clone)]
pub struct Read {
    content: String,
    out_edges: Vec<EdgeId>,
    in_edges: Vec<EdgeId>,
    longest_out: Option<EdgeId>,
    longest_in: Option<EdgeId>,
}

impl Read {
    fn new(content: String) -> Self {
        Self { content, out_edges: Vec::new(), in_edges: Vec::new(), longest_out: None, longest_in: None }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn out_edges(&self) -> &[EdgeId] {
        &self.out_edges
    }

    pub fn in_edges(&self) -> &[EdgeId] {
        &self.in_edges
    }

    pub fn longest_out(&self) -> Option<EdgeId> {
        self.longest_out
    }

    pub fn longest_in(&self) -> Option<EdgeId> {
        self.longest_in
    }
}

/// 重叠图。构建完成后只读，可在线程间共享。
#[derive(Debug, Clone, Default)]
pub struct OverlapGraph {
    nodes: Vec<Read>,
    ids: HashMap<String, ReadId>,
    edges: Vec<OverlapEdge>,
}

impl OverlapGraph {
    /// 节点顺序与读段首次出现顺序一致
    pub(crate) fn from_library(library: ReadLibrary) -> Self {
        let reads = library.into_reads();
        let ids = reads.iter().enumerate().map(|(i, r)| (r.clone(), i)).collect();
        let nodes = reads.into_iter().map(Read::new).collect();
        Self { nodes, ids, edges: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn read(&self, id: ReadId) -> &Read {
        &self.nodes[id]
    }

    pub fn reads(&self) -> &[Read] {
        &self.nodes
    }

    pub fn content(&self, id: ReadId) -> &str {
        &self.nodes[id].content
    }

    pub fn id_of(&self, content: &str) -> Option<ReadId> {
        self.ids.get(content).copied()
    }

    pub fn get(&self, content: &str) -> Option<&Read> {
        self.id_of(content).map(|id| &self.nodes[id])
    }

    pub fn edge(&self, id: EdgeId) -> &OverlapEdge {
        &self.edges[id]
    }

    pub fn edges(&self) -> &[OverlapEdge] {
        &self.edges
    }

    /// 第一个读段，单根组装的起点
    pub fn root(&self) -> Option<ReadId> {
        (!self.nodes.is_empty()).then_some(0)
    }

    pub fn read_ids(&self) -> std::ops::Range<ReadId> {
        0..self.nodes.len()
    }

    pub fn edges_of(&self, id: ReadId, dir: Direction) -> &[EdgeId] {
        match dir {
            Direction::Forward => &self.nodes[id].out_edges,
            Direction::Backward => &self.nodes[id].in_edges,
        }
    }

    pub fn longest_edge(&self, id: ReadId, dir: Direction) -> Option<EdgeId> {
        match dir {
            Direction::Forward => self.nodes[id].longest_out,
            Direction::Backward => self.nodes[id].longest_in,
        }
    }

    /// 边的优先序：权重降序，其次另一端内容字典序升序，最后按边 id。
    pub fn edge_order(&self, a: EdgeId, b: EdgeId, dir: Direction) -> Ordering {
        let (ea, eb) = (&self.edges[a], &self.edges[b]);
        eb.weight()
            .cmp(&ea.weight())
            .then_with(|| self.content(ea.next(dir)).cmp(self.content(eb.next(dir))))
            .then_with(|| a.cmp(&b))
    }

    /// 追加一条边，同时登记到 source 的出边和 target 的入边，并维护最长边缓存。
    pub fn add_edge(&mut self, source: ReadId, target: ReadId, label: String) -> Result<EdgeId> {
        let n = self.nodes.len();
        if source >= n || target >= n {
            return Err(Error::GraphInconsistency(format!(
                "edge {source} -> {target} references a read outside the library ({n} reads)"
            )));
        }
        if label.is_empty()
            || !self.nodes[source].content.ends_with(&label)
            || !self.nodes[target].content.starts_with(&label)
        {
            return Err(Error::GraphInconsistency(format!(
                "label {label:?} is not a suffix of read {source} and a prefix of read {target}"
            )));
        }

        let id = self.edges.len();
        self.edges.push(OverlapEdge { source, target, label });
        self.nodes[source].out_edges.push(id);
        self.nodes[target].in_edges.push(id);

        let best_out = match self.nodes[source].longest_out {
            Some(cur) if self.edge_order(cur, id, Direction::Forward) != Ordering::Greater => cur,
            _ => id,
        };
        self.nodes[source].longest_out = Some(best_out);

        let best_in = match self.nodes[target].longest_in {
            Some(cur) if self.edge_order(cur, id, Direction::Backward) != Ordering::Greater => cur,
            _ => id,
        };
        self.nodes[target].longest_in = Some(best_in);

        Ok(id)
    }

    /// 构建结束：按优先序排列每个节点的出入边。
    pub(crate) fn finish(&mut self) {
        for id in 0..self.nodes.len() {
            let mut out = self.nodes[id].out_edges.clone();
            out.sort_by(|&a, &b| self.edge_order(a, b, Direction::Forward));
            let mut inc = self.nodes[id].in_edges.clone();
            inc.sort_by(|&a, &b| self.edge_order(a, b, Direction::Backward));

            let node = &mut self.nodes[id];
            debug_assert_eq!(out.first().copied(), node.longest_out);
            debug_assert_eq!(inc.first().copied(), node.longest_in);
            node.out_edges = out;
            node.in_edges = inc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(reads: &[&str]) -> OverlapGraph {
        OverlapGraph::from_library(ReadLibrary::new(reads, None).unwrap())
    }

    #[test]
    fn edges_are_shared_by_both_endpoints() {
        let mut g = graph(&["ABCDE", "CDEFG"]);
        let e = g.add_edge(0, 1, "CDE".to_string()).unwrap();
        assert_eq!(g.read(0).out_edges(), &[e]);
        assert_eq!(g.read(1).in_edges(), &[e]);
        assert_eq!(g.edge(e).weight(), 3);
        assert_eq!(g.get("CDEFG").map(Read::len), Some(5));
    }

    #[test]
    fn rejects_inconsistent_edges() {
        let mut g = graph(&["ABCDE", "CDEFG"]);
        assert!(matches!(g.add_edge(0, 7, "E".into()), Err(Error::GraphInconsistency(_))));
        assert!(matches!(g.add_edge(0, 1, "DE".into()), Err(Error::GraphInconsistency(_))));
        assert!(matches!(g.add_edge(0, 1, String::new()), Err(Error::GraphInconsistency(_))));
    }

    #[test]
    fn longest_edge_cache_breaks_ties_by_content() {
        let mut g = graph(&["XXAB", "ABQQ", "ABCC", "BZZZ"]);
        let short = g.add_edge(0, 3, "B".into()).unwrap();
        let q = g.add_edge(0, 1, "AB".into()).unwrap();
        let c = g.add_edge(0, 2, "AB".into()).unwrap();
        assert_eq!(g.read(0).longest_out(), Some(c));
        g.finish();
        assert_eq!(g.read(0).out_edges(), &[c, q, short]);
        assert_eq!(g.longest_edge(0, Direction::Forward), Some(c));
        assert_eq!(g.longest_edge(1, Direction::Backward), Some(q));
    }

    #[test]
    fn incoming_ties_break_by_source_content() {
        let mut g = graph(&["ZZAB", "YYAB", "ABCD"]);
        let z = g.add_edge(0, 2, "AB".into()).unwrap();
        let y = g.add_edge(1, 2, "AB".into()).unwrap();
        g.finish();
        assert_eq!(g.read(2).in_edges(), &[y, z]);
        assert_eq!(g.read(2).longest_in(), Some(y));
    }
}
