use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use anyhow::{Context, bail};

use cart_client::{
    api::HttpCartApi,
    config::ClientConfig,
    document::{Document, DocumentView, Element},
    handlers::{CartHandlers, DeleteOutcome, PayOutcome},
    page::{Confirm, FixedAnswer, Navigator},
    telemetry,
};

const USAGE: &str = "usage: cart-client [-y] <add <id> <name> <price> | update <product_id> <quantity> | delete <product_id> | pay>";

/// `[y/N]` prompt on the terminal.
struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        io::stderr().flush().ok();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn reload(&self) {
        println!("checkout complete, page reloaded");
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

enum Command {
    Add { id: String, name: String, price: f64 },
    Update { product_id: String, quantity: i64 },
    Delete { product_id: String },
    Pay,
}

impl Command {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let words: Vec<&str> = args.iter().map(String::as_str).collect();
        let command = match words.as_slice() {
            ["add", id, name, price] => Command::Add {
                id: id.to_string(),
                name: name.to_string(),
                price: price.parse().context("price must be a number")?,
            },
            ["update", product_id, quantity] => Command::Update {
                product_id: product_id.to_string(),
                quantity: quantity.parse().context("quantity must be an integer")?,
            },
            ["delete", product_id] => Command::Delete {
                product_id: product_id.to_string(),
            },
            ["pay"] => Command::Pay,
            _ => bail!(USAGE),
        };
        Ok(command)
    }

    fn product_id(&self) -> Option<&str> {
        match self {
            Command::Add { id, .. } => Some(id.as_str()),
            Command::Update { product_id, .. } | Command::Delete { product_id } => {
                Some(product_id.as_str())
            }
            Command::Pay => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let assume_yes = args.first().is_some_and(|a| a == "-y" || a == "--yes");
    if assume_yes {
        args.remove(0);
    }
    let command = Command::parse(&args)?;

    let config = ClientConfig::from_env()?;
    let document = load_page(&config, command.product_id())?;
    let view = Arc::new(DocumentView::new(document, config.markers.clone()));
    let confirm: Arc<dyn Confirm> = if assume_yes {
        Arc::new(FixedAnswer(true))
    } else {
        Arc::new(TerminalConfirm)
    };

    let api = HttpCartApi::from_config(&config)?;
    tracing::info!(base_url = %api.base_url(), "using cart api");

    let handlers = CartHandlers::new(Arc::new(api), view.clone(), confirm, Arc::new(TerminalNavigator))
        .with_config(&config);

    match command {
        Command::Add { id, name, price } => {
            handlers.add_to_cart(&id, &name, price).await?;
        }
        Command::Update {
            product_id,
            quantity,
        } => {
            handlers.update_cart(&product_id, &quantity).await?;
        }
        Command::Delete { product_id } => {
            if let DeleteOutcome::Declined = handlers.delete_cart(&product_id).await? {
                println!("delete cancelled");
            }
        }
        Command::Pay => match handlers.pay().await? {
            PayOutcome::Declined => println!("checkout cancelled"),
            PayOutcome::Failed { status } => tracing::warn!(status = ?status, "checkout failed"),
            PayOutcome::Completed => {}
        },
    }

    print!("{}", view.snapshot());
    Ok(())
}

/// Reads the page from `CART_PAGE_FILE`, or builds a bare one holding the markers.
fn load_page(config: &ClientConfig, product_id: Option<&str>) -> anyhow::Result<Document> {
    if let Some(path) = &config.page_file {
        let markup = std::fs::read_to_string(path)
            .with_context(|| format!("reading page file {}", path.display()))?;
        return Ok(Document::parse_markup(&markup));
    }

    let markers = &config.markers;
    let mut document = Document::new(vec![
        Element::with_class(&markers.counter_class, "0"),
        Element::with_class(&markers.amount_class, "0"),
    ]);
    if let Some(product_id) = product_id {
        document.push(Element::with_id(&markers.row_id(product_id), product_id));
    }
    Ok(document)
}
