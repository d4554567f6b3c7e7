use std::collections::HashMap;

use crate::error::{InputError, Result};
use crate::index::SENTINEL;

use super::ReadId;

/// 读段库：去重后的读段（保持首次出现顺序）及其哨兵分隔的拼接语料。
///
/// 语料布局为 `"$" + r0 + "$" + r1 + "$" + ... + "$"`，首尾都是哨兵。
/// 内容相同的读段合并为同一个节点。
#[derive(Debug, Clone)]
pub struct ReadLibrary {
    reads: Vec<String>,
    ids: HashMap<String, ReadId>,
    corpus: Vec<u8>,
    /// 每个读段在语料中的起始偏移（严格递增）
    starts: Vec<usize>,
}

impl ReadLibrary {
    /// 校验并去重。`alphabet` 给出时，读段中的每个符号都必须属于它。
    pub fn new<S: AsRef<str>>(reads: &[S], alphabet: Option<&str>) -> Result<Self> {
        if reads.is_empty() {
            return Err(InputError::EmptyReadSet.into());
        }

        let mut lib = Self { reads: Vec::new(), ids: HashMap::new(), corpus: vec![SENTINEL], starts: Vec::new() };
        for (index, read) in reads.iter().enumerate() {
            let read = read.as_ref();
            validate(index, read, alphabet)?;
            if lib.ids.contains_key(read) {
                log::debug!("read #{} duplicates an earlier read, collapsed", index);
                continue;
            }
            lib.ids.insert(read.to_string(), lib.reads.len());
            lib.starts.push(lib.corpus.len());
            lib.corpus.extend_from_slice(read.as_bytes());
            lib.corpus.push(SENTINEL);
            lib.reads.push(read.to_string());
        }
        Ok(lib)
    }

    pub fn len(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }

    pub fn content(&self, id: ReadId) -> &str {
        &self.reads[id]
    }

    pub fn id_of(&self, read: &str) -> Option<ReadId> {
        self.ids.get(read).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReadId, &str)> {
        self.reads.iter().enumerate().map(|(i, r)| (i, r.as_str()))
    }

    pub fn corpus(&self) -> &[u8] {
        &self.corpus
    }

    /// 反转语料，首尾仍为哨兵
    pub fn reversed_corpus(&self) -> Vec<u8> {
        self.corpus.iter().rev().copied().collect()
    }

    /// 语料位置 -> 从该位置开始的读段。位置不是读段起点时返回 None。
    pub fn read_starting_at(&self, pos: usize) -> Option<ReadId> {
        self.starts.binary_search(&pos).ok()
    }

    pub(crate) fn into_reads(self) -> Vec<String> {
        self.reads
    }
}

fn validate(index: usize, read: &str, alphabet: Option<&str>) -> Result<()> {
    if read.is_empty() {
        return Err(InputError::EmptyRead { index }.into());
    }
    if !read.is_ascii() {
        return Err(InputError::NonAscii { index }.into());
    }
    for (position, b) in read.bytes().enumerate() {
        if b == SENTINEL {
            return Err(InputError::ReservedSymbol { index, position }.into());
        }
        if let Some(alpha) = alphabet {
            if !alpha.as_bytes().contains(&b) {
                return Err(InputError::OutsideAlphabet { index, symbol: b as char, position }.into());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn builds_sentinel_delimited_corpus() {
        let lib = ReadLibrary::new(&["ACG", "TT"], None).unwrap();
        assert_eq!(lib.corpus(), b"$ACG$TT$");
        assert_eq!(lib.reversed_corpus(), b"$TT$GCA$");
        assert_eq!(lib.read_starting_at(1), Some(0));
        assert_eq!(lib.read_starting_at(5), Some(1));
        assert_eq!(lib.read_starting_at(2), None);
    }

    #[test]
    fn duplicates_collapse_in_first_seen_order() {
        let lib = ReadLibrary::new(&["GG", "AA", "GG", "CC"], None).unwrap();
        assert_eq!(lib.len(), 3);
        assert_eq!(lib.iter().map(|(_, r)| r).collect::<Vec<_>>(), vec!["GG", "AA", "CC"]);
        assert_eq!(lib.id_of("CC"), Some(2));
    }

    #[test]
    fn rejects_bad_input() {
        let empty: [&str; 0] = [];
        assert!(matches!(ReadLibrary::new(&empty, None), Err(Error::Input(InputError::EmptyReadSet))));
        assert!(matches!(ReadLibrary::new(&["AC", ""], None), Err(Error::Input(InputError::EmptyRead { index: 1 }))));
        assert!(matches!(
            ReadLibrary::new(&["A$C"], None),
            Err(Error::Input(InputError::ReservedSymbol { index: 0, position: 1 }))
        ));
        assert!(matches!(
            ReadLibrary::new(&["ACGT", "ACNT"], Some("ACGT")),
            Err(Error::Input(InputError::OutsideAlphabet { index: 1, symbol: 'N', position: 2 }))
        ));
        assert!(matches!(ReadLibrary::new(&["AÇ"], None), Err(Error::Input(InputError::NonAscii { index: 0 }))));
    }
}
