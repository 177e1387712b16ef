use crate::utils::error::{PrefixError, Result};
use std::collections::HashSet;
use std::path::Path;

const DOI_RESOLVER_PREFIXES: [&str; 2] = ["https://doi.org/", "http://doi.org/"];

/// `doiPrefixes.txt` 的記憶體版本，用來判斷 DOI 是否由 DataCite 註冊
#[derive(Debug, Clone, Default)]
pub struct PrefixLexicon {
    prefixes: HashSet<String>,
}

impl PrefixLexicon {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| PrefixError::FileAccessError {
                path: path.to_path_buf(),
                source,
            })?;

        let lexicon = Self::from_lines(content.lines());
        tracing::info!(
            "Loaded {} DOI prefixes from {}",
            lexicon.len(),
            path.display()
        );
        Ok(lexicon)
    }

    /// 每行一個 prefix，前後空白會去掉，空行略過
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefixes = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        Self { prefixes }
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.prefixes.contains(prefix)
    }

    /// 接受裸 DOI 或 doi.org 連結；只比對第一個 `/` 之前的 registrant 部分
    pub fn is_dataset_doi(&self, doi: &str) -> bool {
        if doi.is_empty() {
            return false;
        }

        let mut stripped = doi.to_string();
        for resolver in DOI_RESOLVER_PREFIXES {
            stripped = stripped.replace(resolver, "");
        }

        let prefix = match stripped.find('/') {
            Some(index) => &stripped[..index],
            None => stripped.as_str(),
        };

        tracing::debug!("Checking DOI prefix: {}", prefix);
        self.contains(prefix)
    }
}
