/// 构建后缀数组（前缀倍增法，每轮一次排序，整体 O(n log² n)）。
///
/// 输入为稠密编码后的文本（0 为哨兵 `$`，其余符号按字节序编号为 1..sigma）。
/// 文本中允许出现多个 0，用作读段之间的分隔符。
pub fn build_sa(text: &[u8]) -> Vec<u32> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }
    let mut sa: Vec<usize> = (0..n).collect();
    let mut rank: Vec<u32> = text.iter().map(|&b| b as u32).collect();
    let mut next_rank: Vec<u32> = vec![0; n];

    // 第二关键字：越过文本末尾的后缀视为最小，用 0 表示，其余 rank + 1
    let key = |rank: &[u32], i: usize, k: usize| -> (u32, u32) {
        let second = if i + k < n { rank[i + k] + 1 } else { 0 };
        (rank[i], second)
    };

    let mut k = 1usize;
    loop {
        sa.sort_unstable_by_key(|&i| key(&rank, i, k));

        next_rank[sa[0]] = 0;
        for w in 1..n {
            let prev = key(&rank, sa[w - 1], k);
            let curr = key(&rank, sa[w], k);
            next_rank[sa[w]] = next_rank[sa[w - 1]] + u32::from(curr != prev);
        }
        std::mem::swap(&mut rank, &mut next_rank);

        // 所有 rank 互不相同即排序完成
        if rank[sa[n - 1]] as usize == n - 1 || k >= n {
            break;
        }
        k <<= 1;
    }

    sa.into_iter().map(|x| x as u32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_sa(text: &[u8]) -> Vec<u32> {
        let n = text.len();
        let mut suffixes: Vec<(usize, &[u8])> = (0..n).map(|i| (i, &text[i..])).collect();
        suffixes.sort_by(|a, b| a.1.cmp(b.1));
        suffixes.into_iter().map(|(i, _)| i as u32).collect()
    }

    fn make_text(len: usize, sigma: u32) -> Vec<u8> {
        let mut x: u32 = 1_234_567;
        let mut v = Vec::with_capacity(len);
        for _ in 0..len {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            v.push(((x >> 16) % sigma) as u8);
        }
        v
    }

    #[test]
    fn sa_adam() {
        // A D A M $ -> 1 2 1 3 0
        let text = [1u8, 2, 1, 3, 0];
        assert_eq!(build_sa(&text), vec![4, 0, 2, 1, 3]);
    }

    #[test]
    fn sa_matches_naive_on_small_random_texts() {
        for len in 1..=40 {
            for sigma in [2, 3, 6] {
                let text = make_text(len, sigma);
                assert_eq!(build_sa(&text), naive_sa(&text), "mismatch on len={} sigma={}", len, sigma);
            }
        }
    }

    #[test]
    fn sa_is_a_permutation() {
        let text = make_text(257, 5);
        let mut sa = build_sa(&text);
        sa.sort_unstable();
        let expected: Vec<u32> = (0..257).collect();
        assert_eq!(sa, expected);
    }

    #[test]
    fn sa_handles_multiple_separators() {
        // $ A C $ G $ A C $
        let text = [0u8, 1, 2, 0, 3, 0, 1, 2, 0];
        assert_eq!(build_sa(&text), naive_sa(&text));
    }

    #[test]
    fn sa_single_symbol_runs() {
        let text = [1u8, 1, 1, 1, 1, 0];
        assert_eq!(build_sa(&text), vec![5, 4, 3, 2, 1, 0]);
    }
}
