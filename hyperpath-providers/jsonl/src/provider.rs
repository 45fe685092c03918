use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use hyperpath_core::Hyperedge;

use crate::{errors::JsonlProviderError, record::HyperedgeRecord};

/// Hyperedges read from a JSON Lines source, in file order.
#[derive(Clone, Debug)]
pub struct JsonlHyperedgeProvider {
    name: String,
    hyperedges: Vec<Hyperedge>,
}

impl JsonlHyperedgeProvider {
    /// Parses every non-blank line of `reader` as one hyperedge record.
    ///
    /// # Examples
    /// ```
    /// use hyperpath_providers_jsonl::JsonlHyperedgeProvider;
    ///
    /// let raw = "{\"id\": \"h0\", \"participants\": [\"a\", \"b\"]}\n\n";
    /// let provider = JsonlHyperedgeProvider::try_from_reader("demo", raw.as_bytes())?;
    /// assert_eq!(provider.len(), 1);
    /// # Ok::<(), hyperpath_providers_jsonl::JsonlProviderError>(())
    /// ```
    ///
    /// # Errors
    /// Returns [`JsonlProviderError::Io`] when reading fails,
    /// [`JsonlProviderError::Parse`] with the one-based line number for a
    /// malformed record, and [`JsonlProviderError::EmptyInput`] when no
    /// record is present.
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, JsonlProviderError> {
        let mut hyperedges = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let record: HyperedgeRecord =
                serde_json::from_str(trimmed).map_err(|source| JsonlProviderError::Parse {
                    line: index + 1,
                    source,
                })?;
            hyperedges.push(Hyperedge::from(record));
        }
        if hyperedges.is_empty() {
            return Err(JsonlProviderError::EmptyInput);
        }
        Ok(Self {
            name: name.into(),
            hyperedges,
        })
    }

    /// Opens `path` and parses it, naming the provider after the path.
    ///
    /// # Errors
    /// See [`Self::try_from_reader`]; failing to open the file is reported as
    /// [`JsonlProviderError::Io`].
    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self, JsonlProviderError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::try_from_reader(path.display().to_string(), BufReader::new(file))
    }

    /// Name of the data source, usually the input path.
    #[must_use]
    #[rustfmt::skip]
    pub fn name(&self) -> &str { &self.name }

    /// Parsed hyperedges in file order.
    #[must_use]
    #[rustfmt::skip]
    pub fn hyperedges(&self) -> &[Hyperedge] { &self.hyperedges }

    /// Number of parsed hyperedges.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.hyperedges.len() }

    /// Always `false` for a successfully constructed provider.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.hyperedges.is_empty() }

    /// Hands the parsed hyperedges to the caller, typically for
    /// [`hyperpath_core::Hyperpath::insert_batch`].
    #[must_use]
    pub fn into_hyperedges(self) -> Vec<Hyperedge> {
        self.hyperedges
    }
}
