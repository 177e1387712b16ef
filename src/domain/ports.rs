use crate::utils::error::Result;
use std::collections::HashMap;
use std::path::PathBuf;

/// Page fetcher 需要的設定來源
pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn page_size(&self) -> u32;
    fn timeout_seconds(&self) -> u64;
    fn output_dir(&self) -> &str;
    fn headers(&self) -> &HashMap<String, String>;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<PathBuf>> + Send;
}
