use std::collections::{HashSet, VecDeque};

use crate::graph::{Direction, EdgeId, OverlapGraph, ReadId};

/// 带 O(1) 成员检测的 FIFO 队列
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<ReadId>,
    members: HashSet<ReadId>,
}

impl Frontier {
    /// 已在队列中时返回 false
    pub fn push(&mut self, id: ReadId) -> bool {
        if !self.members.insert(id) {
            return false;
        }
        self.queue.push_back(id);
        true
    }

    pub fn pop(&mut self) -> Option<ReadId> {
        let id = self.queue.pop_front()?;
        self.members.remove(&id);
        Some(id)
    }

    pub fn contains(&self, id: ReadId) -> bool {
        self.members.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// 从某个根出发的一次双向遍历。
///
/// `backward[0]` 是指向根的入边，`backward[i + 1]` 指向 `backward[i]` 的源；
/// `forward` 按行走顺序排列。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    pub root: ReadId,
    pub backward: Vec<EdgeId>,
    pub forward: Vec<EdgeId>,
}

impl Traversal {
    /// 路径长度（经过的边数）
    pub fn path_len(&self) -> usize {
        self.backward.len() + self.forward.len()
    }

    /// 按序列顺序列出经过的读段
    pub fn reads(&self, graph: &OverlapGraph) -> Vec<ReadId> {
        let mut out: Vec<ReadId> = self.backward.iter().rev().map(|&e| graph.edge(e).source).collect();
        out.push(self.root);
        out.extend(self.forward.iter().map(|&e| graph.edge(e).target));
        out
    }

    /// 合并：后向路径上的读段去掉尾部重叠，接根读段，再接去掉头部重叠的前向读段。
    pub fn sequence(&self, graph: &OverlapGraph) -> String {
        let mut seq = String::new();
        for &e in self.backward.iter().rev() {
            let edge = graph.edge(e);
            let source = graph.content(edge.source);
            seq.push_str(&source[..source.len() - edge.weight()]);
        }
        seq.push_str(graph.content(self.root));
        for &e in &self.forward {
            let edge = graph.edge(e);
            seq.push_str(&graph.content(edge.target)[edge.weight()..]);
        }
        seq
    }
}

/// 贪心双向遍历：先沿出边向前走，再沿入边向后走，两段共享已访问集合。
/// 每一步选择另一端既未访问、也不在队列中的最长边，没有可选边时停止。
pub fn walk(graph: &OverlapGraph, root: ReadId) -> Traversal {
    let mut explored = HashSet::new();
    let forward = extend(graph, root, Direction::Forward, &mut explored);
    let backward = extend(graph, root, Direction::Backward, &mut explored);
    Traversal { root, backward, forward }
}

fn extend(graph: &OverlapGraph, start: ReadId, dir: Direction, explored: &mut HashSet<ReadId>) -> Vec<EdgeId> {
    let mut frontier = Frontier::default();
    frontier.push(start);
    let mut path = Vec::new();

    while let Some(node) = frontier.pop() {
        explored.insert(node);
        let Some(edge) = next_edge(graph, node, dir, explored, &frontier) else {
            break;
        };
        frontier.push(graph.edge(edge).next(dir));
        path.push(edge);
    }
    path
}

fn next_edge(
    graph: &OverlapGraph,
    node: ReadId,
    dir: Direction,
    explored: &HashSet<ReadId>,
    frontier: &Frontier,
) -> Option<EdgeId> {
    let eligible = |e: EdgeId| {
        let next = graph.edge(e).next(dir);
        !explored.contains(&next) && !frontier.contains(next)
    };
    // 缓存的最长边通常可直接使用，否则按优先序扫描
    graph
        .longest_edge(node, dir)
        .filter(|&e| eligible(e))
        .or_else(|| graph.edges_of(node, dir).iter().copied().find(|&e| eligible(e)))
}
