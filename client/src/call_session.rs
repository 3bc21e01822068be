use core::error::Error;

use futures::{SinkExt, StreamExt};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    net::TcpStream,
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};

use crate::cli_display::CliDisplay;

pub struct CallSession;

impl CallSession {
    /// Sends stdin lines to the room and prints what the room sends back,
    /// until stdin ends, the user types `exit`, or the server hangs up.
    pub async fn run(
        ws_stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let (mut write, mut read) = ws_stream.split();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {

                line = lines.next_line() => {

                    let line = match line? {
                        Some(line) => line,
                        None => break,
                    };

                    match line.trim() {
                        "" => CliDisplay::print_prompt(),
                        "exit" => break,
                        _ => {
                            write.send(Message::text(line)).await?;
                            CliDisplay::print_prompt();
                        }
                    }
                }

                message = read.next() => {

                    let message = match message {
                        Some(message) => message?,
                        None => {
                            CliDisplay::print_server_closed();
                            return Ok(());
                        }
                    };

                    match message {
                        Message::Text(text) => CliDisplay::print_text(text.as_str()),
                        Message::Binary(bytes) => CliDisplay::print_binary(&bytes),
                        Message::Close(_) => {
                            CliDisplay::print_server_closed();
                            return Ok(());
                        }
                        _ => {}
                    }
                }
            }
        }

        write.close().await?;

        return Ok(());
    }
}
