use anyhow::{anyhow, bail, Result};
use std::io::BufRead;

/// 组装只用到名字和序列，质量行只做长度校验
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    pub name: String,
    pub seq: String,
}

pub struct FastqReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    record_no: usize,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: String::new(), done: false, record_no: 0 }
    }

    fn line(&mut self, what: &str) -> Result<String> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Err(anyhow!("record {}: unexpected EOF, missing {}", self.record_no, what));
        }
        Ok(self.buf.trim_end().to_string())
    }

    pub fn next_record(&mut self) -> Result<Option<FastqRecord>> {
        if self.done {
            return Ok(None);
        }

        // 跳过记录之间的空行
        let header = loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                self.done = true;
                return Ok(None);
            }
            let line = self.buf.trim_end();
            if !line.is_empty() {
                break line.to_string();
            }
        };
        self.record_no += 1;

        let Some(header) = header.strip_prefix('@') else {
            bail!("record {}: FASTQ header not starting with '@'", self.record_no);
        };
        let name = header.split_whitespace().next().unwrap_or("").to_string();

        let seq = self.line("sequence line")?;
        let plus = self.line("'+' line")?;
        if !plus.starts_with('+') {
            bail!("record {}: missing '+' line", self.record_no);
        }
        let qual = self.line("quality line")?;
        if qual.len() != seq.len() {
            bail!("record {}: seq/qual length mismatch ({} vs {})", self.record_no, seq.len(), qual.len());
        }

        Ok(Some(FastqRecord { name, seq }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_records() {
        let data = b"@q1 lane1\nACGT\n+\nIIII\n\n@q2\nGG\n+q2\n##\n";
        let mut r = FastqReader::new(Cursor::new(&data[..]));
        assert_eq!(r.next_record().unwrap().unwrap(), FastqRecord { name: "q1".into(), seq: "ACGT".into() });
        assert_eq!(r.next_record().unwrap().unwrap().seq, "GG");
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn rejects_malformed_records() {
        let cases: [&[u8]; 3] = [b"q1\nACGT\n+\nIIII\n", b"@q1\nACGT\nIIII\n", b"@q1\nACGT\n+\nII\n"];
        for data in cases {
            let mut r = FastqReader::new(Cursor::new(data));
            assert!(r.next_record().is_err());
        }
    }

    #[test]
    fn truncated_record_is_an_error() {
        let mut r = FastqReader::new(Cursor::new(&b"@q1\nACGT\n"[..]));
        assert!(r.next_record().is_err());
    }
}
