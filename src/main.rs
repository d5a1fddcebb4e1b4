#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = quiz_server::run().await {
        eprintln!("quiz-server fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
