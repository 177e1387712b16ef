use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{PrefixError, Result};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

pub fn page_file_name(page_number: u32) -> String {
    format!("prefixes{}.json", page_number)
}

/// 下載 DataCite `/prefixes` 的單一頁面，內容原封不動存檔
pub struct PageFetcher<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> PageFetcher<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    pub async fn fetch_page(&self, page_number: u32) -> Result<Vec<u8>> {
        let endpoint = self.config.endpoint();
        let mut request = self
            .client
            .get(endpoint)
            .query(&[
                ("page[number]", page_number.to_string()),
                ("page[size]", self.config.page_size().to_string()),
            ])
            .timeout(Duration::from_secs(self.config.timeout_seconds()));

        // 添加自定義標頭
        for (key, value) in self.config.headers() {
            request = request.header(key, value);
        }

        tracing::debug!(
            "Requesting page {} (size {}) from {}",
            page_number,
            self.config.page_size(),
            endpoint
        );
        let response = request.send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(PrefixError::ApiError {
                status: response.status().as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.bytes().await?.to_vec();

        // 確認是 JSON 再存檔，避免把錯誤頁面寫進資料目錄
        let document: serde_json::Value =
            serde_json::from_slice(&body).map_err(|source| PrefixError::ParseError {
                path: PathBuf::from(page_file_name(page_number)),
                source,
            })?;
        let count = document
            .get("data")
            .and_then(|data| data.as_array())
            .map(|items| items.len())
            .unwrap_or(0);
        tracing::info!("Page {} contains {} prefixes", page_number, count);

        Ok(body)
    }

    /// 存到 storage 設定的目錄，回傳寫入的檔案路徑
    pub async fn save_page(&self, page_number: u32) -> Result<PathBuf> {
        let body = self.fetch_page(page_number).await?;
        let written = self
            .storage
            .write_file(&page_file_name(page_number), &body)
            .await?;

        tracing::info!("Saved page {} to {}", page_number, written.display());
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fetch_config::FetchConfig;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<PathBuf> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(PathBuf::from("mock").join(path))
        }
    }

    fn config_for(server: &MockServer) -> FetchConfig {
        FetchConfig {
            endpoint: server.url("/prefixes"),
            page_size: 2,
            ..FetchConfig::default()
        }
    }

    #[test]
    fn test_page_file_name() {
        assert_eq!(page_file_name(3), "prefixes3.json");
    }

    #[tokio::test]
    async fn test_fetch_page_sends_pagination_query() {
        let server = MockServer::start();
        let body = serde_json::json!({
            "data": [{"id": "10.1234", "type": "prefixes"}, {"id": "10.5678", "type": "prefixes"}],
            "meta": {"total": 4}
        });

        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/prefixes")
                .query_param("page[number]", "2")
                .query_param("page[size]", "2");
            then.status(200)
                .header("Content-Type", "application/vnd.api+json")
                .json_body(body.clone());
        });

        let fetcher = PageFetcher::new(MockStorage::new(), config_for(&server));
        let bytes = fetcher.fetch_page(2).await.unwrap();

        api_mock.assert();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, body);
    }

    #[tokio::test]
    async fn test_fetch_page_sends_configured_headers() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/prefixes")
                .header("Accept", "application/vnd.api+json");
            then.status(200).json_body(serde_json::json!({"data": []}));
        });

        let mut config = config_for(&server);
        config
            .headers
            .insert("Accept".to_string(), "application/vnd.api+json".to_string());
        let fetcher = PageFetcher::new(MockStorage::new(), config);

        fetcher.fetch_page(1).await.unwrap();
        api_mock.assert();
    }

    #[tokio::test]
    async fn test_fetch_page_error_status() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/prefixes");
            then.status(503);
        });

        let fetcher = PageFetcher::new(MockStorage::new(), config_for(&server));
        let err = fetcher.fetch_page(1).await.unwrap_err();

        api_mock.assert();
        match err {
            PrefixError::ApiError { status, url } => {
                assert_eq!(status, 503);
                assert!(url.contains("/prefixes"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_non_json_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/prefixes");
            then.status(200).body("<html>maintenance</html>");
        });

        let storage = MockStorage::new();
        let fetcher = PageFetcher::new(storage.clone(), config_for(&server));
        let err = fetcher.save_page(1).await.unwrap_err();

        match err {
            PrefixError::ParseError { path, .. } => {
                assert_eq!(path, PathBuf::from("prefixes1.json"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(storage.get_file("prefixes1.json").await.is_none());
    }

    #[tokio::test]
    async fn test_save_page_writes_body_verbatim() {
        let server = MockServer::start();
        let raw = r#"{"data":[{"id":"10.48550","type":"prefixes"}],"links":{"next":null}}"#;
        server.mock(|when, then| {
            when.method(GET).path("/prefixes");
            then.status(200).body(raw);
        });

        let storage = MockStorage::new();
        let fetcher = PageFetcher::new(storage.clone(), config_for(&server));
        let written = fetcher.save_page(1).await.unwrap();

        assert_eq!(written, PathBuf::from("mock/prefixes1.json"));
        let saved = storage.get_file("prefixes1.json").await.unwrap();
        assert_eq!(saved, raw.as_bytes());
    }
}
