use anyhow::{bail, Result};
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub name: String,
    pub seq: String,
}

/// 多行 FASTA 读取器。序列行去掉空白后原样拼接，不做大小写归一。
pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    peek_header: Option<String>,
    line_no: usize,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: String::new(), done: false, peek_header: None, line_no: 0 }
    }

    fn read_line(&mut self) -> Result<usize> {
        self.buf.clear();
        let n = self.reader.read_line(&mut self.buf)?;
        if n > 0 {
            self.line_no += 1;
        }
        Ok(n)
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done {
            return Ok(None);
        }

        let header = match self.peek_header.take() {
            Some(h) => h,
            None => loop {
                if self.read_line()? == 0 {
                    self.done = true;
                    return Ok(None);
                }
                if let Some(h) = self.buf.strip_prefix('>') {
                    break h.trim().to_string();
                }
                if !self.buf.trim().is_empty() {
                    bail!("line {}: sequence data before the first '>' header", self.line_no);
                }
            },
        };
        let name = header.split_whitespace().next().unwrap_or("").to_string();

        let mut seq = String::new();
        loop {
            if self.read_line()? == 0 {
                self.done = true;
                break;
            }
            if let Some(h) = self.buf.strip_prefix('>') {
                self.peek_header = Some(h.trim().to_string());
                break;
            }
            seq.extend(self.buf.chars().filter(|c| !c.is_whitespace()));
        }

        Ok(Some(FastaRecord { name, seq }))
    }
}
