use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    staffalert::cli::run().await
}
