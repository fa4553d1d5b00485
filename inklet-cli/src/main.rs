use std::fs;
use std::io;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inklet_client::{ApiClient, AuthResponse, Category, ClientError, Post};

const TOKEN_FILE: &str = ".inklet_token";
const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "inklet", version, about = "CLI client for the inklet blog API")]
struct Cli {
    /// Server address.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register an account.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Log out and forget the stored token.
    Logout,
    /// Post operations.
    #[command(subcommand)]
    Post(PostCommand),
    /// Category operations.
    #[command(subcommand)]
    Category(CategoryCommand),
}

#[derive(Debug, Subcommand)]
enum PostCommand {
    /// List posts, newest first.
    List,
    /// Show a post by id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Create a post (admin only).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long)]
        category_id: i64,
    },
    /// Update a post (admin only). Omitted fields keep their current values.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        category_id: Option<i64>,
    },
    /// Delete a post (admin only).
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// List categories.
    List,
    /// Show a category by id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Create a category (admin only).
    Create {
        #[arg(long)]
        name: String,
    },
    /// Rename a category (admin only).
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: String,
    },
    /// Delete a category (admin only). Fails while posts reference it.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let server = normalize_server(cli.server.unwrap_or_else(|| DEFAULT_SERVER.to_string()));
    let mut client = ApiClient::new(server);

    if let Some(token) = load_token().context("failed to read .inklet_token")? {
        client.set_token(token);
    }

    match cli.command {
        Command::Register {
            username,
            email,
            password,
        } => {
            let auth = client
                .register(&username, &email, &password)
                .await
                .map_err(humanize_client_error)?;
            persist_token(&client).context("failed to store token")?;
            print_auth("Registered", &auth);
        }
        Command::Login { username, password } => {
            let auth = client
                .login(&username, &password)
                .await
                .map_err(humanize_client_error)?;
            persist_token(&client).context("failed to store token")?;
            print_auth("Logged in", &auth);
        }
        Command::Logout => {
            client.logout().await.map_err(humanize_client_error)?;
            remove_token().context("failed to remove token")?;
            println!("Logged out");
        }
        Command::Post(command) => run_post_command(&client, command).await?,
        Command::Category(command) => run_category_command(&client, command).await?,
    }

    Ok(())
}

async fn run_post_command(client: &ApiClient, command: PostCommand) -> Result<()> {
    match command {
        PostCommand::List => {
            let posts = client.list_posts().await.map_err(humanize_client_error)?;
            println!("Posts: {}", posts.len());
            for post in &posts {
                println!(
                    "- [{}] {} (by {}, in {})",
                    post.id, post.title, post.user.username, post.category.name
                );
            }
        }
        PostCommand::Get { id } => {
            let post = client.get_post(id).await.map_err(humanize_client_error)?;
            print_post("Post", &post);
        }
        PostCommand::Create {
            title,
            body,
            category_id,
        } => {
            let post = client
                .create_post(&title, &body, category_id)
                .await
                .map_err(humanize_client_error)?;
            print_post("Post created", &post);
        }
        PostCommand::Update {
            id,
            title,
            body,
            category_id,
        } => {
            let post = client
                .update_post(id, title.as_deref(), body.as_deref(), category_id)
                .await
                .map_err(humanize_client_error)?;
            print_post("Post updated", &post);
        }
        PostCommand::Delete { id } => {
            client.delete_post(id).await.map_err(humanize_client_error)?;
            println!("Post deleted: id={id}");
        }
    }
    Ok(())
}

async fn run_category_command(client: &ApiClient, command: CategoryCommand) -> Result<()> {
    match command {
        CategoryCommand::List => {
            let categories = client
                .list_categories()
                .await
                .map_err(humanize_client_error)?;
            println!("Categories: {}", categories.len());
            for category in &categories {
                println!("- [{}] {}", category.id, category.name);
            }
        }
        CategoryCommand::Get { id } => {
            let category = client
                .get_category(id)
                .await
                .map_err(humanize_client_error)?;
            print_category("Category", &category);
        }
        CategoryCommand::Create { name } => {
            let category = client
                .create_category(&name)
                .await
                .map_err(humanize_client_error)?;
            print_category("Category created", &category);
        }
        CategoryCommand::Update { id, name } => {
            let category = client
                .update_category(id, Some(&name))
                .await
                .map_err(humanize_client_error)?;
            print_category("Category updated", &category);
        }
        CategoryCommand::Delete { id } => {
            client
                .delete_category(id)
                .await
                .map_err(humanize_client_error)?;
            println!("Category deleted: id={id}");
        }
    }
    Ok(())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_token_content(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn load_token() -> io::Result<Option<String>> {
    if !Path::new(TOKEN_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(TOKEN_FILE)?;
    Ok(parse_token_content(&raw))
}

fn persist_token(client: &ApiClient) -> io::Result<()> {
    if let Some(token) = client.get_token() {
        fs::write(TOKEN_FILE, token)?;
    }
    Ok(())
}

fn remove_token() -> io::Result<()> {
    if Path::new(TOKEN_FILE).exists() {
        fs::remove_file(TOKEN_FILE)?;
    }
    Ok(())
}

fn humanize_client_error(err: ClientError) -> anyhow::Error {
    let message = match err {
        ClientError::Unauthorized => {
            "authentication required: run `inklet login ...` or `inklet register ...`".to_string()
        }
        ClientError::Forbidden => "admin role required".to_string(),
        ClientError::NotFound => "resource not found".to_string(),
        ClientError::InvalidRequest(message) => format!("invalid request: {message}"),
        ClientError::Http(err) => format!("http error: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_auth(title: &str, auth: &AuthResponse) {
    println!("{title}");
    println!("token: {}", auth.access_token);
    println!("user:");
    println!("  id: {}", auth.user.id);
    println!("  username: {}", auth.user.username);
    println!("  email: {}", auth.user.email);
    println!("  role: {}", auth.user.role);
    println!("  created_at: {}", auth.user.created_at);
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("body: {}", post.body);
    println!(
        "author: {} (id={})",
        post.user.username, post.user.id
    );
    println!(
        "category: {} (id={})",
        post.category.name, post.category.id
    );
    println!("created_at: {}", post.created_at);
    println!("updated_at: {}", post.updated_at);
}

fn print_category(title: &str, category: &Category) {
    println!("{title}");
    println!("id: {}", category.id);
    println!("name: {}", category.name);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8080".to_string());
        assert_eq!(s, "http://127.0.0.1:8080");
    }

    #[test]
    fn parse_token_content_trims_whitespace() {
        let token = parse_token_content("  abc.def.ghi  ");
        assert_eq!(token.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn parse_token_content_rejects_blank() {
        let token = parse_token_content("   ");
        assert!(token.is_none());
    }
}
