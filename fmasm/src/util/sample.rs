//! 可复现的读段采样：从已知源序列切出相互重叠的读段，供测试、基准与 `simulate` 子命令使用。

/// 64 位线性同余发生器，固定种子下输出确定
#[derive(Debug, Clone)]
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed ^ 0x9E37_79B9_7F4A_7C15)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) as u32
    }

    /// [0, n) 内的随机数；n 为 0 时返回 0
    #[inline]
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        (((self.next_u32() as u64) << 32 | self.next_u32() as u64) % n as u64) as usize
    }
}

/// 由给定字母表随机生成源序列
pub fn random_sequence(len: usize, alphabet: &[u8], seed: u64) -> String {
    if alphabet.is_empty() {
        return String::new();
    }
    let mut rng = Lcg::new(seed);
    (0..len).map(|_| alphabet[rng.below(alphabet.len())] as char).collect()
}

/// 在随机位置切出 `n` 条长度位于 `[min_len, max_len]` 的读段。
/// 不保证覆盖整条源序列。
pub fn sample_reads(source: &str, n: usize, min_len: usize, max_len: usize, seed: u64) -> Vec<String> {
    let bytes = source.as_bytes();
    if bytes.is_empty() || n == 0 {
        return Vec::new();
    }
    let min_len = min_len.clamp(1, bytes.len());
    let max_len = max_len.clamp(min_len, bytes.len());

    let mut rng = Lcg::new(seed);
    let mut reads = Vec::with_capacity(n);
    for _ in 0..n {
        let len = min_len + rng.below(max_len - min_len + 1);
        let start = rng.below(bytes.len() - len + 1);
        reads.push(String::from_utf8_lossy(&bytes[start..start + len]).into_owned());
    }
    reads
}

/// 以固定步长平铺切片，最后一条读段总是对齐到源序列末尾，保证完整覆盖。
pub fn tile_reads(source: &str, read_len: usize, step: usize) -> Vec<String> {
    let bytes = source.as_bytes();
    if bytes.is_empty() || read_len == 0 {
        return Vec::new();
    }
    if read_len >= bytes.len() {
        return vec![source.to_string()];
    }
    let step = step.max(1);
    let last = bytes.len() - read_len;
    let mut starts: Vec<usize> = (0..last).step_by(step).collect();
    starts.push(last);
    starts
        .into_iter()
        .map(|s| String::from_utf8_lossy(&bytes[s..s + read_len]).into_owned())
        .collect()
}
