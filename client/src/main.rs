mod call_session;
mod cli_display;
mod client;

use clap::Parser;
use shared::HTTP_PORT;

use crate::client::Client;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Room to join. Without it a new room is created and joined as host.
    #[arg(short, long)]
    room: Option<String>,

    #[arg(short, long, default_value = "127.0.0.1")]
    server_address: String,

    #[arg(short, long, default_value_t = HTTP_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = Client::run(&args.server_address, args.port, args.room).await {
        eprintln!("{}", e);
    }
}
