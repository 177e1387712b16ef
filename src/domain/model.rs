use crate::utils::error::{PrefixError, Result};
use serde::Deserialize;
use std::path::Path;

/// DataCite `/prefixes` 列表中的一筆資料
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PrefixRecord {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub attributes: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrefixPage {
    pub records: Vec<PrefixRecord>,
}

impl PrefixPage {
    /// 從已解析的 JSON 文件取出 `data` 陣列。
    ///
    /// 沒有 `data` 時回傳空頁；頂層不是物件、`data` 不是陣列、或元素缺少字串 `id` 時視為格式錯誤。
    pub fn from_value(document: serde_json::Value, path: &Path) -> Result<Self> {
        let mut root = match document {
            serde_json::Value::Object(root) => root,
            other => {
                return Err(PrefixError::UnexpectedShape {
                    path: path.to_path_buf(),
                    message: format!(
                        "top-level JSON must be an object, found {}",
                        json_kind(&other)
                    ),
                });
            }
        };

        let items = match root.remove("data") {
            None => {
                tracing::debug!("No 'data' field in {}", path.display());
                return Ok(Self::default());
            }
            Some(serde_json::Value::Array(items)) => items,
            Some(other) => {
                return Err(PrefixError::UnexpectedShape {
                    path: path.to_path_buf(),
                    message: format!("'data' must be a list, found {}", json_kind(&other)),
                });
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let record: PrefixRecord =
                serde_json::from_value(item).map_err(|e| PrefixError::UnexpectedShape {
                    path: path.to_path_buf(),
                    message: format!("element {} of 'data': {}", index, e),
                })?;
            records.push(record);
        }

        Ok(Self { records })
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}
