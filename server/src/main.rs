#[tokio::main]
async fn main() {
    clickrush_server::start_server().await;
}
