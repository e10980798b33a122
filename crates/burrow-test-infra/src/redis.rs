use crate::Result;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage};

/// Test fixture for a disposable single-node Redis server.
pub struct RedisServer {
    container: ContainerAsync<GenericImage>,
}

impl RedisServer {
    pub async fn new() -> Result<Self> {
        let container = GenericImage::new("redis", "8.6.0")
            .with_exposed_port(6379_u16.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
            .start()
            .await?;
        Ok(Self { container })
    }

    /// `redis://host:port` of the mapped container port.
    pub async fn url(&self) -> Result<String> {
        let host = match self.container.get_host().await?.to_string().as_str() {
            "localhost" => String::from("127.0.0.1"),
            other => other.to_string(),
        };
        let port = self.container.get_host_port_ipv4(6379).await?;
        Ok(format!("redis://{host}:{port}"))
    }
}
