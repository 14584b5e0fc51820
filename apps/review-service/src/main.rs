#[tokio::main]
async fn main() -> anyhow::Result<()> {
    srs_review_service::run().await
}
