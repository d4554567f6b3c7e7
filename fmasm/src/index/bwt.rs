/// 根据后缀数组构建 BWT：`BWT[i] = text[SA[i] - 1]`，SA[i] 为 0 时循环取末尾符号。
/// text 为稠密编码文本（0 为哨兵）。
pub fn build_bwt(text: &[u8], sa: &[u32]) -> Vec<u8> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }
    let mut bwt = Vec::with_capacity(n);
    for &p in sa {
        let i = p as usize;
        let prev = if i == 0 { text[n - 1] } else { text[i - 1] };
        bwt.push(prev);
    }
    bwt
}

/// 由 BWT 还原原文（LF 映射逆推）。
///
/// 要求原文以哨兵 0 结尾；若含多个哨兵，原文还须以哨兵开头，
/// 这样第 0 行恰好是最后一个哨兵构成的后缀。
pub fn invert_bwt(bwt: &[u8], sigma: usize) -> Vec<u8> {
    let n = bwt.len();
    if n == 0 {
        return Vec::new();
    }

    // C 表与每个位置的同符号序号
    let mut counts = vec![0usize; sigma];
    let mut nth = Vec::with_capacity(n);
    for &ch in bwt {
        nth.push(counts[ch as usize]);
        counts[ch as usize] += 1;
    }
    let mut c = vec![0usize; sigma];
    let mut acc = 0usize;
    for (a, &cnt) in counts.iter().enumerate() {
        c[a] = acc;
        acc += cnt;
    }

    let mut text = vec![0u8; n];
    let mut row = 0usize;
    for k in (0..n - 1).rev() {
        let ch = bwt[row];
        text[k] = ch;
        row = c[ch as usize] + nth[row];
    }
    text
}
