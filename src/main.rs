// ==========================================
// Numbers 库存管理 - 命令行入口
// ==========================================
// 职责: 解析命令 → 组装 AppState → 调用 API → 输出结果
// 输出: 命令结果写 stdout，日志写 stderr
// ==========================================

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use numbers_inventory::app::AppState;
use numbers_inventory::catalog::static_inventory;
use numbers_inventory::config::AppConfig;
use numbers_inventory::i18n::{self, t, t_with_args};
use numbers_inventory::{logging, ProductRow};

#[derive(Parser)]
#[command(name = "numbers-inventory")]
#[command(about = "Numbers - product list and CSV import", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite database path (overrides NUMBERS_DB_PATH)
    #[arg(long, global = true)]
    db: Option<String>,

    /// User id for the local session (overrides NUMBERS_USER_ID)
    #[arg(long, global = true)]
    user: Option<String>,

    /// Print command results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Import products from a CSV file (no path = canceled pick)
    Import {
        /// CSV file to import
        path: Option<PathBuf>,
    },

    /// List products, newest first
    List,

    /// Add a product
    Add {
        /// Product name
        name: String,

        /// Quantity (digits only, empty = 0)
        #[arg(default_value = "")]
        quantity: String,
    },

    /// Edit a product; omitted or blank fields keep their value
    Update {
        /// Product id
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        quantity: Option<String>,
    },

    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },

    /// Toggle the favorite flag of a product
    Favorite {
        /// Product id
        id: String,
    },

    /// List favorite products sorted by name
    Favorites,

    /// Search products by name or quantity
    Search {
        /// Query text (empty = all)
        #[arg(default_value = "")]
        query: String,
    },

    /// Print the static inventory listing as JSON
    Inventory,
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_products(products: &[ProductRow], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&products);
    }
    if products.is_empty() {
        println!("{}", t("product.empty_list"));
        return Ok(());
    }
    for p in products {
        let star = if p.is_favorite { "★" } else { " " };
        println!("{} {}  {:<24} {:>6}", star, p.id, p.name, p.quantity);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_json);

    let config = AppConfig::from_env()?.with_overrides(cli.db.clone(), cli.user.clone());
    i18n::set_locale(&config.locale);

    // 静态目录无需数据库
    if let Commands::Inventory = cli.command {
        return print_json(&static_inventory());
    }

    let state = AppState::new(&config).context("无法初始化AppState")?;
    let session = &state.session;

    match cli.command {
        Commands::Import { path } => {
            let response = state.import_api.import_file(session, path).await;
            if cli.json {
                print_json(&response)?;
            } else if let Some(alert) = response.alert {
                println!("{}\n\n{}", alert.title, alert.body);
            }
        }
        Commands::List => {
            let products = state.product_api.list_products(session).await?;
            print_products(&products, cli.json)?;
        }
        Commands::Add { name, quantity } => {
            let row = state
                .product_api
                .create_product(session, &name, &quantity)
                .await?;
            if cli.json {
                print_json(&row)?;
            } else {
                println!("{}", t_with_args("product.created", &[("name", &row.name)]));
            }
        }
        Commands::Update { id, name, quantity } => {
            let row = state
                .product_api
                .update_product(session, &id, name.as_deref(), quantity.as_deref())
                .await?;
            if cli.json {
                print_json(&row)?;
            } else {
                println!("{}", t_with_args("product.updated", &[("id", &row.id)]));
            }
        }
        Commands::Delete { id } => {
            state.product_api.delete_product(session, &id).await?;
            println!("{}", t_with_args("product.deleted", &[("id", &id)]));
        }
        Commands::Favorite { id } => {
            let row = state.product_api.toggle_favorite(session, &id).await?;
            print_products(std::slice::from_ref(&row), cli.json)?;
        }
        Commands::Favorites => {
            let products = state.product_api.favorite_products(session).await?;
            if !cli.json {
                println!("{}", t("product.favorites_title"));
            }
            print_products(&products, cli.json)?;
        }
        Commands::Search { query } => {
            let products = state.product_api.search_products(session, &query).await?;
            print_products(&products, cli.json)?;
        }
        Commands::Inventory => {}
    }

    Ok(())
}
