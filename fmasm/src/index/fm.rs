use crate::error::{InputError, Result};
use crate::index::{bwt, sa};

/// 哨兵符号：分隔读段，字典序恒为最小（与其字节值无关）。
pub const SENTINEL: u8 = b'$';

/// 后缀数组区间，左闭右开 `[start, end)`。
///
/// `end <= start` 表示无匹配；无匹配是正常的控制流，不是错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SaInterval {
    pub start: usize,
    pub end: usize,
}

impl SaInterval {
    pub const EMPTY: SaInterval = SaInterval { start: 0, end: 0 };

    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// 闭区间形式 `(l, u)`；空区间返回 None。
    pub fn bounds(&self) -> Option<(usize, usize)> {
        (!self.is_empty()).then(|| (self.start, self.end - 1))
    }

    pub fn rows(&self) -> std::ops::Range<usize> {
        self.start..self.end.max(self.start)
    }
}

/// 全量 FM 索引：
/// - 字母表由文本自动推导，哨兵 `$` 编码为 0，其余符号按字节序编号；
/// - SA、BWT、C 表、Occ 表在构建时一次性计算并缓存；
/// - Occ 表保存完整前缀计数（不采样），`occ[a][i]` 为 BWT[0..=i] 中 a 的个数。
#[derive(Debug, Clone)]
pub struct FMIndex {
    text: Vec<u8>,
    /// 字母表（原始字节），下标即编码
    alphabet: Vec<u8>,
    /// 字节 -> 编码，`None` 表示不在字母表内
    codes: Vec<Option<u8>>,
    sa: Vec<u32>,
    /// BWT（编码形式，与 SA 同长度）
    bwt: Vec<u8>,
    /// C[a] = 文本中小于 a 的符号数量
    rank: Vec<u32>,
    /// occ[a][i] = BWT[0..=i] 中 a 的出现次数
    occ: Vec<Vec<u32>>,
}

impl FMIndex {
    /// 对以 `$` 结尾的文本建立索引。
    pub fn new(text: &[u8]) -> Result<Self> {
        if text.last() != Some(&SENTINEL) {
            return Err(InputError::MissingSentinel.into());
        }

        let mut alphabet: Vec<u8> = text.iter().copied().filter(|&b| b != SENTINEL).collect();
        alphabet.sort_unstable();
        alphabet.dedup();
        alphabet.insert(0, SENTINEL);

        let mut codes = vec![None; 256];
        for (code, &b) in alphabet.iter().enumerate() {
            codes[b as usize] = Some(code as u8);
        }
        let encoded: Vec<u8> = text.iter().map(|&b| codes[b as usize].unwrap_or(0)).collect();

        let sa = sa::build_sa(&encoded);
        let bwt = bwt::build_bwt(&encoded, &sa);

        let sigma = alphabet.len();
        let n = bwt.len();
        let mut occ = vec![Vec::with_capacity(n); sigma];
        let mut running = vec![0u32; sigma];
        for &ch in &bwt {
            running[ch as usize] += 1;
            for (a, counts) in occ.iter_mut().enumerate() {
                counts.push(running[a]);
            }
        }

        let mut rank = vec![0u32; sigma];
        let mut acc = 0u32;
        for a in 0..sigma {
            rank[a] = acc;
            acc += running[a];
        }

        Ok(Self { text: text.to_vec(), alphabet, codes, sa, bwt, rank, occ })
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn suffix_array(&self) -> &[u32] {
        &self.sa
    }

    /// 字母表（升序，哨兵在首位）。
    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    pub fn sigma(&self) -> usize {
        self.alphabet.len()
    }

    #[inline]
    pub fn code_of(&self, symbol: u8) -> Option<u8> {
        self.codes[symbol as usize]
    }

    #[inline]
    pub fn symbol_of(&self, code: u8) -> u8 {
        self.alphabet[code as usize]
    }

    pub fn bwt_codes(&self) -> &[u8] {
        &self.bwt
    }

    /// BWT 的字符串形式。
    pub fn bwt(&self) -> String {
        self.bwt.iter().map(|&c| self.symbol_of(c) as char).collect()
    }

    /// 符号 a 的字典序首位（C 表）。
    pub fn rank_of(&self, symbol: u8) -> Option<usize> {
        self.code_of(symbol).map(|c| self.rank[c as usize] as usize)
    }

    /// 符号 a 沿 BWT 的前缀计数（闭区间）。
    pub fn occurrences(&self, symbol: u8) -> Option<&[u32]> {
        self.code_of(symbol).map(|c| self.occ[c as usize].as_slice())
    }

    /// BWT[0..=i] 中字典序小于 `symbol` 的符号个数，O(|字母表|)。
    ///
    /// 不在字母表中的符号按其字节序插入位置计算。
    pub fn get_occurrences_lt(&self, symbol: u8, i: usize) -> usize {
        let below = if symbol == SENTINEL { 0 } else { 1 + self.alphabet[1..].partition_point(|&b| b < symbol) };
        self.lt_before(below, i + 1)
    }

    /// BWT[0..pos) 中编码为 c 的个数
    #[inline]
    fn occ_before(&self, c: u8, pos: usize) -> usize {
        if pos == 0 {
            0
        } else {
            self.occ[c as usize][pos - 1] as usize
        }
    }

    /// BWT[0..pos) 中编码小于 c 的个数
    #[inline]
    fn lt_before(&self, c: usize, pos: usize) -> usize {
        if pos == 0 {
            return 0;
        }
        (0..c).map(|a| self.occ[a][pos - 1] as usize).sum()
    }

    /// 单符号初始区间：所有以该符号开头的后缀。
    pub fn init_interval(&self, c: u8) -> SaInterval {
        let start = self.rank[c as usize] as usize;
        let end = self.rank.get(c as usize + 1).map(|&r| r as usize).unwrap_or(self.sa.len());
        SaInterval::new(start, end)
    }

    /// 在区间对应的模式前添加符号 c：`C[c] + Occ(c, ·)`，O(1)。
    #[inline]
    pub fn update_backward(&self, iv: SaInterval, c: u8) -> SaInterval {
        let base = self.rank[c as usize] as usize;
        SaInterval::new(base + self.occ_before(c, iv.start), base + self.occ_before(c, iv.end))
    }

    /// 双向扩展：`backward` 为本索引中模式 P 的区间，`forward` 为反转文本索引中
    /// P 反转后的区间。前置 c 后两者同时更新。
    ///
    /// forward 的起点偏移等于 backward 区间内 BWT 上小于 c 的符号数，长度与新 backward 区间相同。
    pub fn update_forward_backward(
        &self,
        backward: SaInterval,
        forward: SaInterval,
        c: u8,
    ) -> (SaInterval, SaInterval) {
        if backward.is_empty() {
            return (SaInterval::EMPTY, SaInterval::EMPTY);
        }
        let next = self.update_backward(backward, c);
        let shift = self.lt_before(c as usize, backward.end) - self.lt_before(c as usize, backward.start);
        let start = forward.start + shift;
        (next, SaInterval::new(start, start + next.len()))
    }

    /// 反向搜索精确匹配。查询为原始字节；无匹配时返回空区间。
    pub fn backward_search(&self, query: &[u8]) -> SaInterval {
        let mut iv = SaInterval::new(0, self.sa.len());
        for &b in query.iter().rev() {
            let Some(c) = self.code_of(b) else {
                return SaInterval::EMPTY;
            };
            iv = self.update_backward(iv, c);
            if iv.is_empty() {
                return SaInterval::EMPTY;
            }
        }
        iv
    }

    /// 取出 SA 区间对应的文本位置。
    pub fn locate(&self, iv: SaInterval) -> &[u32] {
        &self.sa[iv.rows()]
    }

    /// 由 BWT 还原原文（用于校验索引自洽）。
    pub fn invert(&self) -> Vec<u8> {
        bwt::invert_bwt(&self.bwt, self.sigma()).into_iter().map(|c| self.symbol_of(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches_at(fm: &FMIndex, pos: u32, query: &[u8]) -> bool {
        let p = pos as usize;
        fm.text().get(p..p + query.len()) == Some(query)
    }

    fn naive_fm_reference(text: &[u8]) -> Vec<u32> {
        // 朴素全排序 SA（字节序，但哨兵最小）
        let key = |b: u8| if b == SENTINEL { 0u16 } else { b as u16 + 1 };
        let mut idx: Vec<usize> = (0..text.len()).collect();
        idx.sort_by(|&i, &j| text[i..].iter().map(|&b| key(b)).cmp(text[j..].iter().map(|&b| key(b))));
        idx.into_iter().map(|i| i as u32).collect()
    }

    #[test]
    fn requires_trailing_sentinel() {
        assert!(FMIndex::new(b"ACGT").is_err());
        assert!(FMIndex::new(b"").is_err());
        assert!(FMIndex::new(b"$").is_ok());
    }

    #[test]
    fn bwt_of_aagta() {
        let fm = FMIndex::new(b"AAGTA$").unwrap();
        assert_eq!(fm.bwt(), "AT$AAG");
        assert_eq!(fm.alphabet(), b"$AGT");
    }

    #[test]
    fn suffix_array_of_adam() {
        let fm = FMIndex::new(b"ADAM$").unwrap();
        assert_eq!(fm.suffix_array(), &[4, 0, 2, 1, 3]);
    }

    #[test]
    fn sentinel_sorts_below_space_and_punctuation() {
        let text = b"$four score, and seven$ years ago!$";
        let fm = FMIndex::new(text).unwrap();
        assert_eq!(fm.alphabet()[0], SENTINEL);
        assert_eq!(fm.suffix_array(), naive_fm_reference(text).as_slice());
    }

    #[test]
    fn rank_table_counts_smaller_symbols() {
        let fm = FMIndex::new(b"ATTAGACCTGCCGGAA$").unwrap();
        assert_eq!(fm.rank_of(b'$'), Some(0));
        assert_eq!(fm.rank_of(b'A'), Some(1));
        assert_eq!(fm.rank_of(b'C'), Some(6));
        assert_eq!(fm.rank_of(b'G'), Some(10));
        assert_eq!(fm.rank_of(b'T'), Some(14));
        assert_eq!(fm.rank_of(b'N'), None);
    }

    #[test]
    fn occurrence_table_of_aagta() {
        let fm = FMIndex::new(b"AAGTA$").unwrap();
        assert_eq!(fm.occurrences(b'$').unwrap(), &[0, 0, 1, 1, 1, 1]);
        assert_eq!(fm.occurrences(b'A').unwrap(), &[1, 1, 1, 2, 3, 3]);
        assert_eq!(fm.occurrences(b'G').unwrap(), &[0, 0, 0, 0, 0, 1]);
        assert_eq!(fm.occurrences(b'T').unwrap(), &[0, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn occurrences_monotone_and_total() {
        let fm = FMIndex::new(b"$GATTACA$CATTAG$TAGGAT$").unwrap();
        let bwt = fm.bwt();
        for &a in fm.alphabet() {
            let occ = fm.occurrences(a).unwrap();
            assert!(occ.windows(2).all(|w| w[0] <= w[1]));
            let total = bwt.bytes().filter(|&b| b == a).count() as u32;
            assert_eq!(*occ.last().unwrap(), total);
        }
    }

    #[test]
    fn occurrences_lt_of_aagta() {
        let fm = FMIndex::new(b"AAGTA$").unwrap();
        let row = |a: u8| (0..fm.len()).map(|i| fm.get_occurrences_lt(a, i)).collect::<Vec<_>>();
        assert_eq!(row(b'A'), vec![0, 0, 1, 1, 1, 1]);
        assert_eq!(row(b'T'), vec![1, 1, 2, 3, 4, 5]);
        assert_eq!(row(b'G'), vec![1, 1, 2, 3, 4, 4]);
        assert_eq!(row(b'$'), vec![0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn update_backward_gt() {
        let fm = FMIndex::new(b"AAGTA$").unwrap();
        let t = fm.code_of(b'T').unwrap();
        let g = fm.code_of(b'G').unwrap();
        let iv = fm.update_backward(fm.init_interval(t), g);
        assert_eq!(iv.bounds(), Some((4, 4)));
    }

    #[test]
    fn update_forward_backward_gt() {
        let fm = FMIndex::new(b"AAGTA$").unwrap();
        let t = fm.code_of(b'T').unwrap();
        let g = fm.code_of(b'G').unwrap();
        let start = fm.init_interval(t);
        let (bw, fw) = fm.update_forward_backward(start, start, g);
        assert_eq!(bw.bounds(), Some((4, 4)));
        assert_eq!(fw.bounds(), Some((5, 5)));
    }

    #[test]
    fn forward_interval_tracks_reverse_index() {
        let text = b"$GATTACA$CATTAG$TAGGAT$";
        let mut reversed = text.to_vec();
        reversed.reverse();
        let fm = FMIndex::new(text).unwrap();
        let rev = FMIndex::new(&reversed).unwrap();

        for query in [&b"TA"[..], b"ATT", b"AG$", b"$TAG", b"GGAT"] {
            let last = fm.code_of(*query.last().unwrap()).unwrap();
            let mut bw = fm.init_interval(last);
            let mut fw = bw;
            for &b in query[..query.len() - 1].iter().rev() {
                (bw, fw) = fm.update_forward_backward(bw, fw, fm.code_of(b).unwrap());
            }
            let mut rq = query.to_vec();
            rq.reverse();
            assert_eq!(bw, fm.backward_search(query));
            assert_eq!(fw, rev.backward_search(&rq), "paired interval mismatch for {:?}", query);
        }
    }

    #[test]
    fn init_interval_covers_symbol_block() {
        let fm = FMIndex::new(b"AB$").unwrap();
        let a = fm.code_of(b'A').unwrap();
        let b = fm.code_of(b'B').unwrap();
        assert_eq!(fm.init_interval(a), SaInterval::new(1, 2));
        assert_eq!(fm.init_interval(b), SaInterval::new(2, 3));
    }

    #[test]
    fn backward_search_single_and_multiple_hits() {
        let fm = FMIndex::new(b"AAGTA$").unwrap();
        let iv = fm.backward_search(b"AGT");
        assert_eq!(iv.len(), 1);
        assert!(matches_at(&fm, fm.locate(iv)[0], b"AGT"));

        let fm = FMIndex::new(b"AAGAGTAGAA$").unwrap();
        let iv = fm.backward_search(b"AGA");
        assert_eq!(iv.bounds(), Some((4, 5)));
        for &p in fm.locate(iv) {
            assert!(matches_at(&fm, p, b"AGA"));
        }
    }

    #[test]
    fn backward_search_is_exact() {
        let text = b"$ACGTTGCA$TTGCAAC$GCAACGT$";
        let fm = FMIndex::new(text).unwrap();
        for query in [&b"TTG"[..], b"GCA", b"CAAC", b"$TT", b"A$", b"ACGTA", b"Q", b"C"] {
            let iv = fm.backward_search(query);
            for row in 0..fm.len() {
                let hit = matches_at(&fm, fm.suffix_array()[row], query);
                assert_eq!(hit, iv.rows().contains(&row), "query {:?} row {}", query, row);
            }
        }
    }

    #[test]
    fn backward_search_empty_query_matches_all() {
        let fm = FMIndex::new(b"ACG$").unwrap();
        assert_eq!(fm.backward_search(b""), SaInterval::new(0, 4));
    }

    #[test]
    fn invert_reconstructs_text() {
        for text in [&b"AAGTA$"[..], b"$GATTACA$GATTACA$TACA$", b"ABABABABAB$"] {
            let fm = FMIndex::new(text).unwrap();
            assert_eq!(fm.invert(), text);
        }
    }
}
