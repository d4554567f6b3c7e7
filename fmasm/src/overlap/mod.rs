//! 基于 FM 索引的重叠检测：对每个读段从右向左扩展后缀，
//! 在读段边界（哨兵）处收集其他读段的前缀区间。

pub mod finder;
pub mod irreducible;

pub use finder::{find_intervals, OverlapInterval};
pub use irreducible::extract_irreducible;
