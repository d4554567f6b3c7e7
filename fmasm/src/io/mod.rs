//! 读段文件加载：FASTA、FASTQ 或每行一条读段的纯文本，格式由第一个非空行判断。

pub mod fasta;
pub mod fastq;

use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;

use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFormat {
    Fasta,
    Fastq,
    Plain,
}

/// 根据第一个非空行判断格式
pub fn detect_format(text: &str) -> ReadFormat {
    match text.lines().map(str::trim).find(|l| !l.is_empty()) {
        Some(l) if l.starts_with('>') => ReadFormat::Fasta,
        Some(l) if l.starts_with('@') => ReadFormat::Fastq,
        _ => ReadFormat::Plain,
    }
}

/// 从任意输入解析读段
pub fn parse_reads<R: Read>(mut input: R) -> Result<Vec<String>> {
    let mut text = String::new();
    input.read_to_string(&mut text).context("reads input is not valid UTF-8 text")?;

    let mut reads = Vec::new();
    match detect_format(&text) {
        ReadFormat::Fasta => {
            let mut r = fasta::FastaReader::new(Cursor::new(text.as_bytes()));
            while let Some(rec) = r.next_record()? {
                reads.push(rec.seq);
            }
        }
        ReadFormat::Fastq => {
            let mut r = fastq::FastqReader::new(Cursor::new(text.as_bytes()));
            while let Some(rec) = r.next_record()? {
                reads.push(rec.seq);
            }
        }
        ReadFormat::Plain => {
            for line in Cursor::new(text.as_bytes()).lines() {
                let line = line?;
                let line = line.trim();
                if !line.is_empty() {
                    reads.push(line.to_string());
                }
            }
        }
    }
    Ok(reads)
}

pub fn load_reads(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let display = path.display();
    let fh = std::fs::File::open(path).with_context(|| format!("cannot open reads file '{display}'"))?;
    let reads = parse_reads(BufReader::new(fh)).with_context(|| format!("cannot parse reads file '{display}'"))?;
    log::debug!("loaded {} reads from '{}'", reads.len(), display);
    Ok(reads)
}

/// 载入模拟用的源序列：FASTA 取全部记录拼接，纯文本取全部非空行拼接
pub fn load_source(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).with_context(|| format!("cannot read source file '{}'", path.display()))?;
    let source = match detect_format(&text) {
        ReadFormat::Fasta => {
            let mut r = fasta::FastaReader::new(Cursor::new(text.as_bytes()));
            let mut seq = String::new();
            while let Some(rec) = r.next_record()? {
                seq.push_str(&rec.seq);
            }
            seq
        }
        _ => text.split_whitespace().collect(),
    };
    if source.is_empty() {
        anyhow::bail!("source file '{}' contains no sequence", path.display());
    }
    Ok(source)
}
