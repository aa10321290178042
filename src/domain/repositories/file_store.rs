use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

#[automock]
#[async_trait]
pub trait FileStore {
    async fn root_exists(&self) -> Result<bool>;
    /// Writes `bytes` under the store root and returns the public url path of the file.
    async fn write_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<String>;
}
