use crate::domain::model::PrefixPage;
use crate::utils::error::{PrefixError, Result};
use std::io::Write;
use std::path::Path;

/// 讀取整個檔案並解析為 JSON
pub fn read_page(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read(path).map_err(|source| PrefixError::FileAccessError {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Read {} bytes from {}", content.len(), path.display());

    serde_json::from_slice(&content).map_err(|source| PrefixError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

/// 把 prefix listing 的 `id` 逐行寫出。
///
/// 整頁先解析完才開始寫，失敗時輸出端不會有半份資料。
#[derive(Debug, Default)]
pub struct LineEmitter;

impl LineEmitter {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &Path) -> Result<PrefixPage> {
        let document = read_page(path)?;
        PrefixPage::from_value(document, path)
    }

    pub fn emit<W: Write>(&self, path: &Path, out: &mut W) -> Result<usize> {
        let page = self.load(path)?;

        for id in page.ids() {
            writeln!(out, "{}", id)?;
        }
        out.flush()?;

        tracing::debug!("Emitted {} prefixes from {}", page.len(), path.display());
        Ok(page.len())
    }
}
