use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use realty_listings::config::Config;
use realty_listings::detail::EnquiryForm;
use realty_listings::format::{format_area, format_price};
use realty_listings::pages::{self, DetailState, Page, PageState};
use realty_listings::search::{CategoryFilter, FilterCriteria, TextQuery};
use realty_listings::{ListingType, ListingsApi, ListingsClient, MockListings, Property};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "realty-listings", about = "Browse listings from the listings API")]
struct Cli {
    /// Config file (TOML); defaults are used when it does not exist
    #[arg(long, default_value = "config/listings.toml")]
    config: PathBuf,

    /// Serve built-in demo listings instead of calling the API
    #[arg(long)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Listings for the home page
    Featured,
    /// Listings for sale
    Buy(FilterArgs),
    /// Listings for rent
    Rent {
        #[command(flatten)]
        filters: FilterArgs,
        /// Free-text search over title, location, category and type
        #[arg(long)]
        q: Option<String>,
    },
    /// One listing with similar listings and a mortgage estimate
    Show {
        id: String,
        /// Loan amount; the listing price when omitted
        #[arg(long)]
        loan: Option<String>,
        #[arg(long, default_value = "6.5")]
        rate: String,
        #[arg(long, default_value = "30")]
        term: String,
    },
    /// Send an enquiry about a listing
    Enquire {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        message: String,
    },
    /// Site branding
    Site,
}

#[derive(Args)]
struct FilterArgs {
    /// all, house, apartment, condo or villa
    #[arg(long, default_value = "all")]
    category: String,
    #[arg(long)]
    min_price: Option<f64>,
    #[arg(long)]
    max_price: Option<f64>,
    #[arg(long, default_value_t = 0)]
    bedrooms: u32,
}

impl FilterArgs {
    fn criteria(&self, listing_type: ListingType) -> anyhow::Result<FilterCriteria> {
        let Some(category) = CategoryFilter::parse(&self.category) else {
            bail!("Unknown category: {}", self.category);
        };
        let defaults = FilterCriteria::defaults_for(listing_type);
        Ok(FilterCriteria {
            category,
            min_price: self.min_price.unwrap_or(defaults.min_price),
            max_price: self.max_price.unwrap_or(defaults.max_price),
            bedrooms: self.bedrooms,
            ..defaults
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::resolve(Some(&cli.config))?;

    let api: Box<dyn ListingsApi> = if cli.offline {
        Box::new(MockListings::demo())
    } else {
        info!("🏠 Using listings API at {}", config.api.base_url);
        Box::new(ListingsClient::with_config(&config.api).context("Failed to create listings client")?)
    };
    let api = api.as_ref();

    match cli.command {
        Command::Featured => {
            let state = pages::load_featured(api, config.home.per_page).await;
            print_listings(&ready_or_bail(state)?);
        }
        Command::Buy(filters) => {
            let criteria = filters.criteria(ListingType::Sale)?;
            show_catalog(api, ListingType::Sale, config.catalog.per_page, None, criteria).await?;
        }
        Command::Rent { filters, q } => {
            let criteria = filters.criteria(ListingType::Rent)?;
            let text = q.as_deref().and_then(TextQuery::parse);
            show_catalog(api, ListingType::Rent, config.catalog.per_page, text, criteria).await?;
        }
        Command::Show { id, loan, rate, term } => {
            let mut page = Page::new(DetailState::Loading);
            let ticket = page.begin(DetailState::Loading);
            let loaded = pages::load_detail(api, Some(id.as_str()), config.home.per_page).await;
            page.commit(&ticket, loaded);

            let DetailState::Ready(view) = page.state_mut() else {
                bail!("{}", pages::PROPERTY_NOT_FOUND);
            };
            view.mortgage.loan_amount = loan.unwrap_or_default();
            view.mortgage.interest_rate = rate;
            view.mortgage.loan_term = term;

            let listing = &view.listing;
            let summary = &listing.summary;
            println!("{} ({})", summary.title, format_price(summary.price, summary.listing_type));
            println!("   {}", summary.location);
            println!(
                "   {} beds, {} baths, {} sqft, {} parking",
                summary.bedrooms,
                summary.bathrooms,
                format_area(summary.area),
                listing.parking
            );
            if !listing.features.is_empty() {
                println!("   Features: {}", listing.features.join(", "));
            }
            if !listing.amenities.is_empty() {
                println!("   Amenities: {}", listing.amenities.join(", "));
            }
            if let Some(updated) = listing.updated_on() {
                println!("   Updated: {}", updated);
            }
            println!("   Images ({}):", listing.images.len());
            for image in &listing.images {
                println!("     {}", image);
            }
            println!(
                "   Estimated monthly payment: {}",
                view.mortgage.display(summary.price)
            );
            if !view.similar.is_empty() {
                println!();
                println!("Similar listings:");
                print_listings(&view.similar);
            }
        }
        Command::Enquire {
            id,
            name,
            email,
            phone,
            message,
        } => {
            let mut form = EnquiryForm {
                name,
                email,
                phone,
                message,
            };
            let ack = form
                .submit(api, &id)
                .await
                .context("Unable to send your message. Please try again.")?;
            println!("Enquiry sent! We will contact you soon.");
            println!("{}", serde_json::to_string_pretty(&ack)?);
        }
        Command::Site => match api.fetch_site_properties().await? {
            Some(site) => println!("{}", serde_json::to_string_pretty(&site)?),
            None => println!("No site properties configured"),
        },
    }

    Ok(())
}

async fn show_catalog(
    api: &dyn ListingsApi,
    listing_type: ListingType,
    per_page: u32,
    text: Option<TextQuery>,
    criteria: FilterCriteria,
) -> anyhow::Result<()> {
    let mut catalog = ready_or_bail(pages::load_catalog(api, listing_type, per_page, text).await)?;
    catalog.apply(criteria);

    info!(
        "✅ Showing {} of {} {} listings",
        catalog.visible.len(),
        catalog.all.len(),
        listing_type
    );
    print_listings(&catalog.visible);
    Ok(())
}

fn ready_or_bail<T>(state: PageState<T>) -> anyhow::Result<T> {
    match state {
        PageState::Ready(value) => Ok(value),
        PageState::Failed(message) => bail!("{}", message),
        PageState::Loading => bail!("Load did not finish"),
    }
}

fn print_listings(listings: &[Property]) {
    if listings.is_empty() {
        println!("No properties match these filters.");
        return;
    }

    for (i, property) in listings.iter().enumerate() {
        println!(
            "{}. {} ({})",
            i + 1,
            property.title,
            format_price(property.price, property.listing_type)
        );
        println!(
            "   {} · {} beds, {} baths, {} sqft",
            property.category,
            property.bedrooms,
            property.bathrooms,
            format_area(property.area)
        );
        println!("   {}", property.location);
        if property.featured {
            println!("   Featured");
        }
        println!("   ID: {}", property.id);
        println!();
    }
}
