use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cineboard", about = "Social movie discovery: swipe, match, chat")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a swipe session (interactive: like / nope / save / quit)
    Swipe {
        /// Comma-separated favorite genres (e.g. "Sci-Fi,Thriller")
        #[arg(long, value_delimiter = ',')]
        genres: Vec<String>,
        /// Comma-separated streaming platforms (e.g. "Netflix,Max")
        #[arg(long, value_delimiter = ',')]
        platforms: Vec<String>,
    },
    /// List the friend roster
    Friends,
    /// Add a friend
    FriendAdd {
        /// JSON with name, photo, liked (array of movie ids)
        json: String,
    },
    /// Remove a friend
    FriendRemove {
        /// Friend ID
        id: String,
    },
    /// Send a chat message and wait for the simulated reply
    Chat {
        /// Friend ID
        friend: String,
        /// Message body
        message: String,
    },
    /// Print the built-in catalog, optionally filtered
    Catalog {
        #[arg(long, value_delimiter = ',')]
        genres: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        platforms: Vec<String>,
    },
}
