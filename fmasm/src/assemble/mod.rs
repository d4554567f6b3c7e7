//! 贪心组装：在重叠图上做双向遍历并合并读段。
//!
//! 默认从第一个读段出发做一次遍历；[`Strategy::BestOf`] 则以每个读段为根并行遍历，
//! 取路径最长者。

pub mod walk;

pub use walk::{walk, Frontier, Traversal};

use std::collections::BTreeSet;
use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{InputError, Result};
use crate::graph::{build_overlap_graph, GraphOpt, OverlapGraph, ReadId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// 从第一个读段出发的单次双向遍历
    #[default]
    Single,
    /// 以每个读段为根各走一次，取最长路径
    BestOf,
}

/// 组装参数
#[derive(Debug, Clone, Serialize)]
pub struct AssembleOpt {
    pub strategy: Strategy,
    /// BestOf 的线程数，0 表示由 rayon 自行决定
    pub threads: usize,
}

impl Default for AssembleOpt {
    fn default() -> Self {
        Self { strategy: Strategy::Single, threads: 1 }
    }
}

/// 多根组装的全部候选
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidates {
    pub best: String,
    pub root: ReadId,
    pub path_len: usize,
    /// 所有根产生的不同序列
    pub sequences: BTreeSet<String>,
}

/// 一次完整求解的结果
#[derive(Debug, Clone, Serialize)]
pub struct Assembly {
    pub sequence: String,
    pub strategy: Strategy,
    pub root: ReadId,
    pub path_len: usize,
    pub reads: usize,
    pub edges: usize,
    pub candidates: BTreeSet<String>,
}

/// 从第一个读段出发组装。
///
/// 结果至少与根读段等长，至多为全部读段长度之和。与根不连通的读段不会出现在结果中，
/// 因此图不连通时结果可能短于最长的读段；需要覆盖其他分量时使用 [`assemble_best_of`]。
pub fn assemble(graph: &OverlapGraph) -> Result<String> {
    let t = walk_from_root(graph)?;
    Ok(t.sequence(graph))
}

fn walk_from_root(graph: &OverlapGraph) -> Result<Traversal> {
    let root = graph.root().ok_or(InputError::EmptyGraph)?;
    let t = walk(graph, root);
    debug!("walk from read {}: {} backward, {} forward edges", root, t.backward.len(), t.forward.len());
    Ok(t)
}

/// 以每个读段为根并行遍历。
///
/// 最佳结果取路径最长者；路径等长时取序列更长者，再相等取根编号最小者。
pub fn assemble_best_of(graph: &OverlapGraph, threads: usize) -> Result<Candidates> {
    if graph.is_empty() {
        return Err(InputError::EmptyGraph.into());
    }
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;

    let results: Vec<(ReadId, usize, String)> = pool.install(|| {
        graph
            .read_ids()
            .into_par_iter()
            .map(|root| {
                let t = walk(graph, root);
                (root, t.path_len(), t.sequence(graph))
            })
            .collect()
    });

    let mut best = 0;
    for (i, (_, len, seq)) in results.iter().enumerate().skip(1) {
        let (_, best_len, best_seq) = &results[best];
        if (*len, seq.len()) > (*best_len, best_seq.len()) {
            best = i;
        }
    }

    let (root, path_len, best) = results[best].clone();
    let sequences: BTreeSet<String> = results.into_iter().map(|(_, _, s)| s).collect();
    debug!("best-of: root {} with path length {}, {} distinct candidates", root, path_len, sequences.len());
    Ok(Candidates { best, root, path_len, sequences })
}

/// 对已构建好的图按 `opt` 组装
pub fn assemble_graph(graph: &OverlapGraph, opt: &AssembleOpt) -> Result<Assembly> {
    let t0 = Instant::now();
    let (sequence, root, path_len, candidates) = match opt.strategy {
        Strategy::Single => {
            let t = walk_from_root(graph)?;
            let seq = t.sequence(graph);
            (seq.clone(), t.root, t.path_len(), BTreeSet::from([seq]))
        }
        Strategy::BestOf => {
            let c = assemble_best_of(graph, opt.threads)?;
            (c.best, c.root, c.path_len, c.sequences)
        }
    };
    info!(
        "assembled {} bp from {} reads ({} edges on path) in {:.3}s",
        sequence.len(),
        graph.len(),
        path_len,
        t0.elapsed().as_secs_f64()
    );
    Ok(Assembly {
        sequence,
        strategy: opt.strategy,
        root,
        path_len,
        reads: graph.len(),
        edges: graph.edge_count(),
        candidates,
    })
}

/// 读段 → 重叠图 → 组装
pub fn solve<S: AsRef<str>>(reads: &[S], graph_opt: &GraphOpt, opt: &AssembleOpt) -> Result<Assembly> {
    let graph = build_overlap_graph(reads, graph_opt)?;
    assemble_graph(&graph, opt)
}
