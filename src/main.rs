#[tokio::main]
async fn main() {
    conference_backend::run().await;
}
