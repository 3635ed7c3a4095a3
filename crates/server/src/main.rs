use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    comanda_server::run().await
}
