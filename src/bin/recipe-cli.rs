use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::Url;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "recipe-cli")]
#[command(about = "Command-line client for the recipe gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:4000", env = "RECIPE_GATEWAY_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway liveness
    Health,
    /// Look up a user by Clerk id
    GetUser { clerk_id: String },
    /// Create a user for a Clerk id
    CreateUser { clerk_id: String },
    /// Look up a user by Clerk id, creating it when missing
    GetOrCreateUser { clerk_id: String },
    /// List a user's recipes
    Recipes { user_id: String },
    /// Show one recipe
    Recipe { recipe_id: String },
    /// Create a recipe
    CreateRecipe {
        #[arg(long)]
        title: String,
        #[arg(long)]
        user_id: String,
        /// JSON file with an array of `{ name, amount?, unit? }`
        #[arg(long)]
        ingredients: Option<PathBuf>,
        /// JSON file with an array of `{ step, text }`
        #[arg(long)]
        instructions: Option<PathBuf>,
    },
}

fn read_json(path: &Option<PathBuf>) -> Result<Value, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?),
        None => Ok(Value::Null),
    }
}

/// `base` with each of `segments` appended as one percent-encoded segment.
fn endpoint(base: &str, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| format!("{} cannot be a base URL", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.as_str();

    let res = match cli.command {
        Commands::Health => client.get(endpoint(base, &["health"])?).send().await?,
        Commands::GetUser { clerk_id } => {
            client
                .get(endpoint(base, &["identity", "user", "clerk", &clerk_id])?)
                .send()
                .await?
        }
        Commands::CreateUser { clerk_id } => {
            client
                .post(endpoint(base, &["identity", "user", "create"])?)
                .json(&json!({ "clerkId": clerk_id }))
                .send()
                .await?
        }
        Commands::GetOrCreateUser { clerk_id } => {
            client
                .post(endpoint(base, &["identity", "user", "get-or-create"])?)
                .json(&json!({ "clerkId": clerk_id }))
                .send()
                .await?
        }
        Commands::Recipes { user_id } => {
            client
                .get(endpoint(base, &["recipe", "user", &user_id])?)
                .send()
                .await?
        }
        Commands::Recipe { recipe_id } => {
            client
                .get(endpoint(base, &["recipe", &recipe_id])?)
                .send()
                .await?
        }
        Commands::CreateRecipe {
            title,
            user_id,
            ingredients,
            instructions,
        } => {
            let body = json!({
                "title": title,
                "userId": user_id,
                "ingredients": read_json(&ingredients)?,
                "instructions": read_json(&instructions)?,
            });
            client
                .post(endpoint(base, &["recipe", "create"])?)
                .json(&body)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
