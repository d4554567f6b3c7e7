use std::time::Instant;

use log::{debug, info, warn};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::index::FMIndex;
use crate::overlap::{extract_irreducible, find_intervals};

use super::{OverlapGraph, ReadId, ReadLibrary};

/// 重叠图构建参数
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphOpt {
    /// 最小重叠长度：后缀匹配达到该长度后才开始探测读段边界
    pub tau: usize,
    /// 只保留不可约边（传递约简）
    pub irreducible: bool,
    /// 声明的字母表；None 表示接受任意 ASCII 符号（哨兵除外）
    pub alphabet: Option<String>,
}

/// 基于 FM 索引构建重叠图。
///
/// 对每个读段查询边界区间，将区间展开为具体读段并建立有向边；
/// 跳过读段自身以及被 label 完全覆盖的退化包含关系。
pub fn build_overlap_graph<S: AsRef<str>>(reads: &[S], opt: &GraphOpt) -> Result<OverlapGraph> {
    let t0 = Instant::now();
    let library = ReadLibrary::new(reads, opt.alphabet.as_deref())?;
    info!("reads: {} ({} distinct), corpus length: {}", reads.len(), library.len(), library.corpus().len());

    let index = FMIndex::new(library.corpus())?;
    let reverse = if opt.irreducible { Some(FMIndex::new(&library.reversed_corpus())?) } else { None };
    debug!("FM index built in {:.3}s (sigma={})", t0.elapsed().as_secs_f64(), index.sigma());

    let t1 = Instant::now();
    let mut found: Vec<(ReadId, ReadId, String)> = Vec::new();
    for (id, read) in library.iter() {
        let mut intervals = find_intervals(&index, read, opt.tau);
        if let Some(rev) = &reverse {
            intervals = extract_irreducible(&index, rev, &intervals);
        }
        for iv in intervals {
            for &pos in index.locate(iv.backward) {
                let Some(other) = library.read_starting_at(pos as usize + 1) else {
                    let label = &iv.label;
                    return Err(Error::GraphInconsistency(format!(
                        "boundary hit at corpus position {pos} for label {label:?} does not start a read"
                    )));
                };
                if other == id || library.content(other).len() <= iv.weight() {
                    continue;
                }
                found.push((id, other, iv.label.clone()));
            }
        }
    }
    debug!("overlap search finished in {:.3}s", t1.elapsed().as_secs_f64());

    let graph = into_graph(library, found)?;
    info!("overlap graph: {} reads, {} edges", graph.len(), graph.edge_count());
    Ok(graph)
}

/// 朴素二次复杂度的重叠检测，仅作为小规模输入的参照基线。
///
/// 边集合与 [`build_overlap_graph`]（未开启不可约剪枝时）完全一致。
pub fn build_naive_overlap_graph<S: AsRef<str>>(reads: &[S], opt: &GraphOpt) -> Result<OverlapGraph> {
    let library = ReadLibrary::new(reads, opt.alphabet.as_deref())?;
    if opt.irreducible {
        warn!("irreducible pruning is not available for the naive detector, ignored");
    }

    let mut found = Vec::new();
    for (id, source) in library.iter() {
        for k in 1..source.len() {
            let label = &source[k..];
            if label.len() < opt.tau || source.starts_with(label) {
                continue;
            }
            for (other, target) in library.iter() {
                if other != id && target.len() > label.len() && target.starts_with(label) {
                    found.push((id, other, label.to_string()));
                }
            }
        }
    }

    let graph = into_graph(library, found)?;
    info!("naive overlap graph: {} reads, {} edges", graph.len(), graph.edge_count());
    Ok(graph)
}

fn into_graph(library: ReadLibrary, found: Vec<(ReadId, ReadId, String)>) -> Result<OverlapGraph> {
    let mut graph = OverlapGraph::from_library(library);
    for (source, target, label) in found {
        graph.add_edge(source, target, label)?;
    }
    graph.finish();
    Ok(graph)
}
