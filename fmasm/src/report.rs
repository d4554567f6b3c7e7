use serde::Serialize;

use crate::assemble::{AssembleOpt, Assembly};
use crate::graph::GraphOpt;

/// 各阶段耗时（秒）
#[derive(Debug, Clone, Default, Serialize)]
pub struct Timings {
    pub load: f64,
    pub graph: f64,
    pub assemble: f64,
}

impl Timings {
    pub fn total(&self) -> f64 {
        self.load + self.graph + self.assemble
    }
}

/// `fmasm assemble --json` 输出的运行报告
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub version: &'static str,
    pub timestamp: String,
    pub command: String,
    pub input: String,
    pub reads_loaded: usize,
    pub naive: bool,
    pub graph: GraphOpt,
    pub assemble: AssembleOpt,
    pub timings: Timings,
    pub total_seconds: f64,
    pub assembly: Assembly,
}

impl RunReport {
    pub fn builder(
        input: &str,
        reads_loaded: usize,
        naive: bool,
        graph: GraphOpt,
        assemble: AssembleOpt,
    ) -> ReportBuilder {
        ReportBuilder { input: input.to_string(), reads_loaded, naive, graph, assemble }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// 在组装完成之前先收集参数
pub struct ReportBuilder {
    input: String,
    reads_loaded: usize,
    naive: bool,
    graph: GraphOpt,
    assemble: AssembleOpt,
}

impl ReportBuilder {
    pub fn finish(self, assembly: Assembly, timings: Timings) -> RunReport {
        RunReport {
            version: env!("CARGO_PKG_VERSION"),
            timestamp: chrono::Utc::now().to_rfc3339(),
            command: std::env::args().collect::<Vec<_>>().join(" "),
            input: self.input,
            reads_loaded: self.reads_loaded,
            naive: self.naive,
            graph: self.graph,
            assemble: self.assemble,
            total_seconds: timings.total(),
            timings,
            assembly,
        }
    }
}
