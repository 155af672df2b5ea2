use server::start_login_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    start_login_server().await
}
