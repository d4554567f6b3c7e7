/// 输入数据问题：调用方提供的读段集合不合法，致命，直接返回给调用方。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("read set is empty")]
    EmptyReadSet,

    #[error("read #{index} is empty")]
    EmptyRead { index: usize },

    #[error("read #{index} contains non-ASCII bytes")]
    NonAscii { index: usize },

    #[error("read #{index} contains the reserved sentinel '$' at position {position}")]
    ReservedSymbol { index: usize, position: usize },

    #[error("read #{index} contains symbol {symbol:?} at position {position}, outside the declared alphabet")]
    OutsideAlphabet { index: usize, symbol: char, position: usize },

    #[error("index text must be non-empty and end with the sentinel '$'")]
    MissingSentinel,

    #[error("overlap graph has no reads to assemble")]
    EmptyGraph,
}

/// Errors produced by the assembly core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// 构建器内部不变量被破坏（边指向库中不存在的读段等），正常情况下不会出现。
    #[error("graph inconsistency: {0}")]
    GraphInconsistency(String),

    #[error("cannot build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_convert_and_render() {
        let err: Error = InputError::OutsideAlphabet { index: 2, symbol: 'x', position: 5 }.into();
        assert!(matches!(err, Error::Input(InputError::OutsideAlphabet { index: 2, .. })));
        let msg = err.to_string();
        assert!(msg.starts_with("input error: read #2"));
        assert!(msg.contains("'x'"));
    }

    #[test]
    fn thread_pool_errors_keep_their_source() {
        // 全局线程池只能初始化一次，第二次必然失败
        let _ = rayon::ThreadPoolBuilder::new().build_global();
        let err: Error = rayon::ThreadPoolBuilder::new().build_global().unwrap_err().into();
        assert!(matches!(err, Error::ThreadPool(_)));
        assert!(err.to_string().starts_with("cannot build worker pool: "));
        assert!(std::error::Error::source(&err).is_some());
    }
}
