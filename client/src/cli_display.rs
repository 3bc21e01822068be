use std::io::{Write, stdout};

pub const PROMPT_STR: &str = "> ";

pub struct CliDisplay;

impl CliDisplay {
    pub fn print_joined_message(server_addr: &str, room_id: &str, host: bool) {
        if host {
            println!("Created room '{}' on {}.", room_id, server_addr);
            println!("Share this id so others can join.");
        } else {
            println!("Joined room '{}' on {}.", room_id, server_addr);
        }

        println!("Type a message and press enter to send it, 'exit' to leave.");
        Self::print_prompt();
    }

    pub fn print_text(text: &str) {
        println!("\r< {}", text);
        Self::print_prompt();
    }

    pub fn print_binary(bytes: &[u8]) {
        println!("\r< [{} bytes]", bytes.len());
        Self::print_prompt();
    }

    pub fn print_prompt() {
        let mut stdout = stdout();
        let _ = write!(stdout, "{}", PROMPT_STR);
        let _ = stdout.flush();
    }

    pub fn print_server_closed() {
        println!("\rThe server closed the connection.");
    }

    pub fn print_left_room(room_id: &str) {
        println!("You have disconnected from '{}'", room_id);
    }
}
