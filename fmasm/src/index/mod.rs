//! FM 索引：后缀数组、BWT、C/Occ 表与区间代数。

pub mod bwt;
pub mod fm;
pub mod sa;

pub use fm::{FMIndex, SaInterval, SENTINEL};
