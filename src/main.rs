use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use devfinder::{ApiClient, HomePage, SortKey, render};
use indicatif::{ProgressBar, ProgressStyle};
use models::RegisterRequest;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the DevFinder backend.
    #[arg(long, env = "DEVFINDER_API_URL", default_value = "http://localhost:5000")]
    api_url: String,

    /// Member id to act as for likes.
    #[arg(long, env = "DEVFINDER_USER_ID")]
    user_id: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a profile and its repositories.
    Profile {
        /// Defaults to the demo user.
        username: Option<String>,

        #[arg(long, env = "DEFAULT_GITHUB_USER", default_value = "burakorkmez")]
        default_user: String,

        #[arg(long, value_enum, default_value_t = SortKey::Recent)]
        sort: SortKey,
    },
    /// Like another member's profile.
    Like { username: String },
    /// List who liked your profile.
    Likes,
    /// Register as a member.
    Register {
        username: String,

        #[arg(long)]
        avatar_url: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        profile_url: Option<String>,
    },
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = ApiClient::new(&args.api_url, args.user_id)?;

    match args.command {
        Command::Profile {
            username,
            default_user,
            sort,
        } => {
            let mut page = HomePage::new();
            let pb = spinner("Loading profile".to_string());

            match username {
                Some(username) => page.search(&client, &username).await,
                None => page.load(&client, &default_user).await,
            }
            pb.finish_and_clear();

            if let Some(toast) = &page.toast {
                eprintln!("{toast}");
            }

            match &page.user_profile {
                Some(profile) => print!("{}", render::profile(profile)),
                None => println!("No user profile found."),
            }

            if page.can_sort() {
                page.on_sort(sort);
                println!();
                print!("{}", render::repos(&page.repos, page.sort_type));
            }
        }
        Command::Like { username } => {
            let pb = spinner(format!("Liking {username}"));
            let result = client.like(&username).await;
            pb.finish_and_clear();

            println!("{}", result?);
        }
        Command::Likes => {
            let pb = spinner("Loading likes".to_string());
            let result = client.likes().await;
            pb.finish_and_clear();

            print!("{}", render::likes(&result?));
        }
        Command::Register {
            username,
            avatar_url,
            name,
            profile_url,
        } => {
            let request = RegisterRequest {
                username,
                name,
                avatar_url,
                profile_url,
            };
            let user = client.register(&request).await?;

            println!("Registered {} with id {}", user.username, user.id);
        }
    }

    Ok(())
}
