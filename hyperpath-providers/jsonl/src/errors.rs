use thiserror::Error;

/// Failures while reading a JSON Lines hyperedge file.
#[derive(Debug, Error)]
pub enum JsonlProviderError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {source}")]
    Parse {
        /// One-based line number of the offending record.
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("input contains no hyperedge records")]
    EmptyInput,
}
