//! # fmasm
//!
//! 基于 FM 索引的最小重叠-布局（overlap/layout）序列组装器。
//!
//! 本 crate 把一组读段拼接成一条连续序列，包括：
//!
//! - **索引构建**：在哨兵分隔的读段语料上构建后缀数组、BWT 与 FM 索引
//! - **重叠检测**：后向搜索读段后缀，探测哨兵得到以读段开头的匹配区间
//! - **传递约简**：借助反向语料索引做双向扩展，只保留不可约边（可选）
//! - **重叠图**：读段为节点、带标签的有向边，维护最长出入边缓存
//! - **贪心组装**：从根读段双向遍历并合并；也可对每个根并行遍历取最长路径
//!
//! ## 快速示例
//!
//! ```rust
//! use fmasm::{solve, AssembleOpt, GraphOpt};
//!
//! let reads = ["ABCDE", "CDEFG", "EFGH"];
//! let assembly = solve(&reads, &GraphOpt::default(), &AssembleOpt::default()).unwrap();
//! assert_eq!(assembly.sequence, "ABCDEFGH");
//!
//! // 直接使用 FM 索引做精确匹配
//! let index = fmasm::FMIndex::new(b"$ABCDE$CDEFG$").unwrap();
//! let hits = index.backward_search(b"CDE");
//! assert_eq!(hits.len(), 2);
//! ```
//!
//! ## 模块说明
//!
//! - [`index`]：后缀数组、BWT、FM 索引与区间更新
//! - [`overlap`]：重叠区间查找与不可约边提取
//! - [`graph`]：读段库、重叠图及其构建
//! - [`assemble`]：贪心双向遍历与多根组装
//! - [`io`]：FASTA / FASTQ / 纯文本读段加载
//! - [`report`]：JSON 运行报告
//! - [`util`]：可复现的读段采样

pub mod assemble;
pub mod error;
pub mod graph;
pub mod index;
pub mod io;
pub mod overlap;
pub mod report;
pub mod util;

pub use assemble::{assemble, assemble_best_of, solve, AssembleOpt, Assembly, Candidates, Strategy};
pub use error::{Error, InputError, Result};
pub use graph::{build_overlap_graph, GraphOpt, OverlapGraph};
pub use index::{FMIndex, SaInterval};
