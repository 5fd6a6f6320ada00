use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use property_listings::services::export_listings;
use property_listings::{
    format_price, logging, validate_draft, validate_update, CreatePropertyInput, ListingError,
    ListingView, MockPropertyService, Property, PropertyId, PropertyStatus, PropertyStore,
    Settings, SortOrder, StatusFilter, UpdatePropertyInput, PAGE_SIZE,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "property-listings", about = "Browse and edit property listings", version)]
struct Cli {
    /// JSON file to seed listings from (overrides LISTINGS_SEED)
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    /// Simulated service latency in milliseconds (overrides LISTINGS_LATENCY_MS)
    #[arg(long, global = true)]
    latency_ms: Option<u64>,

    /// Write all listings to this file once the command finishes
    #[arg(long, global = true)]
    save: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show one page of listings
    List(ViewArgs),
    /// Show a single listing
    Show { id: PropertyId },
    /// Search name, address and description
    Search {
        query: String,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Create a listing
    Add(AddArgs),
    /// Change fields of a listing
    Edit(EditArgs),
    /// Soft-delete a listing
    Delete { id: PropertyId },
    /// Write all listings to a JSON file
    Export { path: PathBuf },
}

#[derive(Args)]
struct ViewArgs {
    /// All, Available, Sold or "Under Contract"
    #[arg(long, default_value = "All")]
    status: StatusFilter,
    /// None, "Price: Low to High", "Price: High to Low" (or asc/desc)
    #[arg(long, default_value = "None")]
    sort: SortOrder,
    #[arg(long, default_value_t = 1)]
    page: usize,
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    price: f64,
    #[arg(long)]
    description: String,
    #[arg(long, default_value = "Available")]
    status: PropertyStatus,
    #[arg(long, default_value = "")]
    image: String,
}

#[derive(Args)]
struct EditArgs {
    id: PropertyId,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    status: Option<PropertyStatus>,
    #[arg(long)]
    image: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::from_env();
    if let Some(seed) = cli.seed.clone() {
        settings.seed_path = Some(seed);
    }
    if let Some(ms) = cli.latency_ms {
        settings.latency = Duration::from_millis(ms);
    }
    logging::init(&settings.log_filter);

    let service = MockPropertyService::from_settings(&settings)
        .await
        .context("Failed to seed listings")?;
    let store = PropertyStore::new(Arc::new(service));

    run(&store, cli.command).await?;

    if let Some(path) = &cli.save {
        export_listings(store.service().as_ref(), path)
            .await
            .with_context(|| format!("Failed to save listings to {}", path.display()))?;
    }
    Ok(())
}

async fn run(store: &PropertyStore<MockPropertyService>, command: Command) -> Result<()> {
    match command {
        Command::List(args) => {
            store.fetch_all_properties().await?;
            print_page(&args, &store.properties())?;
        }
        Command::Show { id } => {
            let property = store.fetch_current_property(id).await?;
            print_details(&property);
            store.clear_current_property();
        }
        Command::Search { query, view } => {
            let results = store.search_properties(&query).await?;
            println!("Search result for: {}", query);
            if results.is_empty() {
                println!("Sorry, we can't find anything.");
            } else {
                print_page(&view, &results)?;
            }
        }
        Command::Add(args) => {
            let draft = CreatePropertyInput {
                name: args.name,
                address: args.address,
                price: args.price,
                description: args.description,
                status: args.status,
                image: args.image,
            };
            validate_draft(&draft).map_err(ListingError::from)?;
            let created = store.add_new_property(draft).await?;
            println!("✅ Added listing {}", created.id);
            print_details(&created);
        }
        Command::Edit(args) => {
            let existing = store.fetch_current_property(args.id).await?;
            let changes = UpdatePropertyInput {
                name: args.name,
                address: args.address,
                price: args.price,
                description: args.description,
                status: args.status,
                image: args.image,
            };
            if changes.is_empty() {
                anyhow::bail!("Nothing to change for listing {}", args.id);
            }
            validate_update(&existing, &changes).map_err(ListingError::from)?;
            let updated = store.update_current_property(args.id, changes).await?;
            println!("✅ Updated listing {}", updated.id);
            print_details(&updated);
            store.clear_current_property();
        }
        Command::Delete { id } => {
            store.remove_property(id).await?;
            println!("🗑️  Deleted listing {}", id);
        }
        Command::Export { path } => {
            let count = export_listings(store.service().as_ref(), &path)
                .await
                .with_context(|| format!("Failed to export listings to {}", path.display()))?;
            println!("💾 Exported {} listings to {}", count, path.display());
        }
    }
    Ok(())
}

/// Print the requested page of `listings` after filtering and sorting
fn print_page(args: &ViewArgs, listings: &[Property]) -> Result<()> {
    let Some(view) = ListingView::open(args.status, args.sort, args.page, listings) else {
        let mut first = ListingView::new();
        first.set_filter(args.status);
        let total_pages = first.apply(listings).total_pages;
        anyhow::bail!("Page {} does not exist ({} pages)", args.page, total_pages);
    };

    let shown = view.apply(listings);
    info!("Showing {} of {} listings", shown.items.len(), shown.total_count);
    for (i, property) in shown.items.iter().enumerate() {
        let position = (shown.current_page - 1) * PAGE_SIZE + i + 1;
        println!("{}. {}", position, summary(property));
    }
    if shown.show_pagination() {
        println!();
        println!("Page {} of {}", shown.current_page, shown.total_pages);
    }
    Ok(())
}

fn summary(property: &Property) -> String {
    format!(
        "{} ({}) - {} [id {}]",
        property.name,
        format_price(property.price),
        property.status,
        property.id
    )
}

fn print_details(property: &Property) {
    println!("{} [{}]", property.name, property.status);
    println!("   {}", property.address);
    println!("   {}", format_price(property.price));
    println!("   {}", property.description);
    if !property.image.is_empty() {
        println!("   Image: {}", property.image);
    }
    if property.is_deleted {
        println!("   (deleted)");
    }
    println!(
        "   Listed {} · updated {}",
        property.created_at.to_rfc3339(),
        property.updated_at.to_rfc3339()
    );
}
