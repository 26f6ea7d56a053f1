#[tokio::main]
async fn main() {
    seller::start(std::env::args()).await;
}
