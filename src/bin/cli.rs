use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    blog::cli::run().await?;
    Ok(())
}
