#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ecopoint_be::startup::run().await
}
