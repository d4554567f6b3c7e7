use crate::index::{FMIndex, SENTINEL};
use crate::overlap::finder::OverlapInterval;

/// 不可约边提取（仅做剪枝）。
///
/// `candidates` 为 [`find_intervals`](crate::overlap::find_intervals) 对同一读段的输出，
/// `reverse` 为反转语料上的索引。所有候选同时向右扩展：
/// 一旦某些候选在读段末尾（哨兵）处终止，它们就是不可约边，其余候选均可由更长的重叠链传递得到；
/// 否则按每个非哨兵符号分组递归。
///
/// 返回区间的 `backward` 覆盖 `"$" + read + "$"`，即被命中的完整读段。
pub fn extract_irreducible(index: &FMIndex, reverse: &FMIndex, candidates: &[OverlapInterval]) -> Vec<OverlapInterval> {
    debug_assert_eq!(index.alphabet(), reverse.alphabet());
    if candidates.is_empty() {
        return Vec::new();
    }
    let Some(sentinel) = reverse.code_of(SENTINEL) else {
        return Vec::new();
    };

    let terminal: Vec<OverlapInterval> = candidates
        .iter()
        .filter_map(|c| {
            let (rev, fwd) = reverse.update_forward_backward(c.forward, c.backward, sentinel);
            (!fwd.is_empty()).then(|| OverlapInterval { backward: fwd, forward: rev, label: c.label.clone() })
        })
        .collect();
    if !terminal.is_empty() {
        return terminal;
    }

    let mut irreducible = Vec::new();
    for &symbol in &index.alphabet()[1..] {
        let Some(code) = reverse.code_of(symbol) else {
            continue;
        };
        let extended: Vec<OverlapInterval> = candidates
            .iter()
            .filter_map(|c| {
                let (rev, fwd) = reverse.update_forward_backward(c.forward, c.backward, code);
                (!rev.is_empty()).then(|| OverlapInterval { backward: fwd, forward: rev, label: c.label.clone() })
            })
            .collect();
        irreducible.extend(extract_irreducible(index, reverse, &extended));
    }
    irreducible
}
