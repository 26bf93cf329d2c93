use clap::Parser;
use cineboard::cli::commands::{Cli, Commands};
use cineboard::domain::entities::movie::Movie;
use cineboard::domain::values::feed_status::FeedStatus;
use cineboard::domain::values::swipe::Swipe;
use cineboard::domain::values::taste_filter::TasteFilter;
use cineboard::CineBoard;
use std::io::{BufRead, Write};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = std::env::var("CINEBOARD_DB").unwrap_or_else(|_| "./cineboard.db".into());

    let board = match CineBoard::new(&db_path) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error initializing cineboard: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(board, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(board: CineBoard, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Swipe { genres, platforms } => {
            let queued = board
                .start_session(TasteFilter::new(genres, platforms))
                .await?;
            if queued == 0 {
                println!("Nothing to show right now. Try different preferences.");
                return Ok(());
            }
            println!("{queued} picks ready. Commands: like (l), nope (n), save (s), quit (q)");
            swipe_loop(&board).await?;
            let saved = board.saved();
            if !saved.is_empty() {
                println!("\nYour list:");
                println!("{}", serde_json::to_string_pretty(&saved)?);
            }
            board.logout();
        }
        Commands::Friends => {
            println!("{}", serde_json::to_string_pretty(&board.friends())?);
        }
        Commands::FriendAdd { json } => {
            let data: serde_json::Value = serde_json::from_str(&json)?;
            let name = data["name"]
                .as_str()
                .ok_or("Missing required field: name")?
                .to_string();
            let photo = data["photo"].as_str().unwrap_or_default().to_string();
            let liked: Vec<i64> = data["liked"]
                .as_array()
                .map(|a| a.iter().filter_map(|v| v.as_i64()).collect())
                .unwrap_or_default();
            let friend = board.add_friend(name, photo, liked)?;
            println!("{}", serde_json::to_string_pretty(&friend)?);
        }
        Commands::FriendRemove { id } => {
            board.remove_friend(&id)?;
            println!("Removed {id}");
        }
        Commands::Chat { friend, message } => {
            let (sent, reply) = board.chat(&friend, message).await?;
            println!("you: {}", sent.body);
            match reply {
                Some(reply) => println!("them: {}", reply.body),
                None => println!("(no reply)"),
            }
        }
        Commands::Catalog { genres, platforms } => {
            let filter = TasteFilter::new(genres, platforms);
            let movies: Vec<Movie> =
                cineboard::infrastructure::providers::catalog::catalog()
                    .into_iter()
                    .filter(|m| filter.is_empty() || m.matches_filter(&filter))
                    .collect();
            println!("{}", serde_json::to_string_pretty(&movies)?);
        }
    }
    Ok(())
}

async fn swipe_loop(board: &CineBoard) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    loop {
        let Some(card) = board.head() else {
            match board.status() {
                FeedStatus::Refilling => {
                    println!("Looking for more picks...");
                    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                    continue;
                }
                _ => {
                    println!("That's everything for now. Come back later!");
                    return Ok(());
                }
            }
        };
        print_card(&card);
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "q" | "quit") {
            return Ok(());
        }
        let direction: Swipe = match input.parse() {
            Ok(d) => d,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        let outcome = board.swipe(direction).await?;
        if let Some(event) = outcome.matched {
            println!(
                "*** It's a match! {} also liked {} ***",
                event.peer_name, event.movie_title
            );
        }
        if direction == Swipe::Save && !outcome.card.is_notice() {
            println!("Saved {} to your list.", outcome.card.title);
        }
    }
}

fn print_card(card: &Movie) {
    if card.is_notice() {
        println!("\n--- {} ---\n{}\n", card.title, card.synopsis);
        return;
    }
    println!(
        "\n{} ({})  {:.1}/10\n  {} | {}\n  {}",
        card.title,
        card.year,
        card.rating,
        card.genres.join(", "),
        card.platforms.join(", "),
        card.synopsis
    );
}
