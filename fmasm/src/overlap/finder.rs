use crate::index::{FMIndex, SaInterval, SENTINEL};

/// 一次读段边界命中。
///
/// `backward` 为语料索引中 `"$" + label` 的区间，区间内每一行对应一个以 label 开头的读段；
/// `forward` 为反转语料索引中 `reverse(label) + "$"` 的区间，供不可约边提取使用。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlapInterval {
    pub backward: SaInterval,
    pub forward: SaInterval,
    pub label: String,
}

impl OverlapInterval {
    #[inline]
    pub fn weight(&self) -> usize {
        self.label.len()
    }

    /// `(start, end, label)`，end 为开区间上界
    pub fn as_triple(&self) -> (usize, usize, &str) {
        (self.backward.start, self.backward.end, &self.label)
    }
}

/// 查找前缀与 `target` 某个真后缀相同的读段区间。
///
/// 从右向左扩展 target 的后缀，同时维护双向区间。已匹配长度达到 `tau` 后，
/// 每一步都尝试用哨兵扩展：结果非空说明存在以当前后缀为前缀的读段，记录该区间。
/// 之后再用 target 的下一个符号扩展，区间为空时停止。
///
/// label 同时也是 target 自身前缀的命中会被丢弃（自重叠）。
/// 结果按 label 长度升序排列。
pub fn find_intervals(index: &FMIndex, target: &str, tau: usize) -> Vec<OverlapInterval> {
    let bytes = target.as_bytes();
    let n = bytes.len();
    let mut hits = Vec::new();
    if n < 2 {
        return hits;
    }
    let (Some(sentinel), Some(last)) = (index.code_of(SENTINEL), index.code_of(bytes[n - 1])) else {
        return hits;
    };

    let mut backward = index.init_interval(last);
    let mut forward = backward;
    // 当前已匹配后缀为 bytes[k..]
    let mut k = n - 1;
    while !backward.is_empty() && k >= 1 {
        if n - k >= tau {
            let (bw, fw) = index.update_forward_backward(backward, forward, sentinel);
            if !bw.is_empty() {
                if let Some(label) = target.get(k..) {
                    if !target.starts_with(label) {
                        hits.push(OverlapInterval { backward: bw, forward: fw, label: label.to_string() });
                    }
                }
            }
        }

        let Some(c) = index.code_of(bytes[k - 1]) else {
            break;
        };
        (backward, forward) = index.update_forward_backward(backward, forward, c);
        k -= 1;
    }
    hits
}
