use async_trait::async_trait;
use common::domain::{Acknowledgment, AcknowledgmentPublisher, DomainResult};
use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

/// Writes each acknowledgment as one line of JSON.
pub struct JsonLinesAcknowledgmentPublisher<W> {
    writer: Mutex<W>,
}

pub type StdoutAcknowledgmentPublisher = JsonLinesAcknowledgmentPublisher<Stdout>;

impl<W> JsonLinesAcknowledgmentPublisher<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl StdoutAcknowledgmentPublisher {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait]
impl<W> AcknowledgmentPublisher for JsonLinesAcknowledgmentPublisher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn publish(&self, acknowledgment: &Acknowledgment) -> DomainResult<()> {
        let mut line = serde_json::to_vec(acknowledgment).map_err(anyhow::Error::from)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer.write_all(&line).await.map_err(anyhow::Error::from)?;
        writer.flush().await.map_err(anyhow::Error::from)?;

        Ok(())
    }
}
