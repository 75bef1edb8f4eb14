#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    study_dashboard::run().await
}
