//! Regen CLI - command-line interface for the Regenerative Enterprise Directory
//!
//! Uses the regen-directory-sdk RemoteClient against the hosted tables, or an
//! EmbeddedClient when `--snapshot` points at a JSON snapshot.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::filter::LevelFilter;

use regen_directory::graph::{build_graph, JitterSource, LayoutConfig, NoJitter, RngJitter};
use regen_directory::{category_tagline, search_enterprises, GeoPoint, MapView, SearchFields};
use regen_directory_sdk::{
    global_search, CategoryBrowser, CategoryId, DirectoryClient, DirectoryConfig, EmbeddedClient,
    Enterprise, EnterpriseFilter, EnterpriseId, Geocoder, MapboxGeocoder, NewEnterprise,
    RemoteClient, ViewMode, Visualization,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "regen", version, about = "Regenerative Enterprise Directory CLI")]
struct Cli {
    /// Project base URL of the hosted tables
    #[arg(long, global = true, env = "REGEN_STORE_URL")]
    url: Option<String>,

    /// Public API key
    #[arg(long, global = true, env = "REGEN_STORE_KEY", hide_env_values = true)]
    key: Option<String>,

    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Serve from a JSON snapshot instead of the hosted tables
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// List categories
    Categories,
    /// List subcategories of a category
    Subcategories {
        category_id: i64,
    },
    /// List enterprises
    List {
        /// Category name, e.g. "Land Projects"
        #[arg(long)]
        category: Option<String>,

        /// Keep enterprises tagged with any of these (repeatable)
        #[arg(long = "subcategory")]
        subcategories: Vec<String>,

        /// Case-insensitive match on name and description
        #[arg(long)]
        query: Option<String>,
    },
    /// Featured enterprises
    Featured,
    /// Show one enterprise
    Show {
        id: String,
    },
    /// Search every enterprise by name, description or subcategory
    Search {
        query: String,
    },
    /// Submit a new enterprise
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        website: Option<String>,
        #[arg(long = "subcategory")]
        subcategories: Vec<String>,
        /// Street address; coordinates come from --lat/--lng or the geocoder
        #[arg(long)]
        address: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
        #[arg(long)]
        featured: bool,
    },
    /// Open a category page: listings, or its visualization with --visualize
    Browse {
        /// Category slug, e.g. "land-projects"
        slug: String,
        #[arg(long = "subcategory")]
        subcategories: Vec<String>,
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        visualize: bool,
        /// Seed for reproducible graph jitter
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Association graph for a category
    Graph {
        slug: String,
        #[arg(long)]
        seed: Option<u64>,
        /// Lay out without jitter
        #[arg(long)]
        no_jitter: bool,
    },
    /// Map markers and center for a category
    Map {
        #[arg(long, default_value = "land-projects")]
        category: String,
    },
    /// Address suggestions for a partial address
    Geocode {
        address: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN })
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult {
    let mut config = DirectoryConfig::load(cli.config.as_deref())?;
    if let Some(url) = &cli.url {
        config.store.url = url.clone();
    }
    if let Some(key) = &cli.key {
        config.store.api_key = key.clone();
    }

    let client = connect(&cli, &config)?;
    let client = client.as_ref();
    let format = cli.format;

    match cli.command {
        Commands::Categories => run_categories(client, format).await,
        Commands::Subcategories { category_id } => run_subcategories(client, category_id, format).await,
        Commands::List { category, subcategories, query } => {
            let filter = EnterpriseFilter { category, subcategories };
            let mut listings = client.list_enterprises(&filter).await?;
            if let Some(q) = query {
                listings = search_enterprises(&listings, &q, SearchFields::CATEGORY);
            }
            print_enterprises(&listings, format)
        }
        Commands::Featured => print_enterprises(&client.list_featured().await?, format),
        Commands::Show { id } => {
            let enterprise = client.get_enterprise_required(&EnterpriseId::new(id)).await?;
            print_enterprise(&enterprise, format)
        }
        Commands::Search { query } => print_enterprises(&global_search(client, &query).await?, format),
        Commands::Add {
            name,
            category,
            description,
            website,
            subcategories,
            address,
            lat,
            lng,
            featured,
        } => {
            let mut draft = NewEnterprise::new(name, category).with_subcategories(subcategories);
            draft.description = description;
            draft.website = website;
            draft.is_featured = featured;
            if let Some(address) = address {
                locate(&mut draft, &config, address, lat, lng).await?;
            }
            let created = client.submit_enterprise(draft).await?;
            print_enterprise(&created, format)
        }
        Commands::Browse { slug, subcategories, query, visualize, seed } => {
            let mut browser = open_browser(client, config.graph, &slug).await?;
            for name in &subcategories {
                browser.toggle_subcategory(name);
            }
            if let Some(q) = query {
                browser.set_query(&q);
            }
            if visualize {
                browser.set_view_mode(ViewMode::Visualization);
            }

            let visible = browser.filtered();
            if let OutputFormat::Table = format {
                println!("{}", browser.category_name());
                if let Some(tagline) = category_tagline(browser.category_name()) {
                    println!("{}", tagline);
                }
            }
            match browser.view_mode() {
                ViewMode::Grid => print_enterprises(&visible, format),
                ViewMode::Visualization => {
                    let mut jitter = jitter_source(seed, false);
                    match browser.visualization(&visible, jitter.as_mut()) {
                        Some(Visualization::Map(map)) => print_map(&map, format),
                        Some(Visualization::Graph(graph)) => print_json(&graph),
                        None => {
                            println!("(no enterprises available for visualization)");
                            Ok(())
                        }
                    }
                }
            }
        }
        Commands::Graph { slug, seed, no_jitter } => {
            let mut browser = CategoryBrowser::new(config.graph);
            browser.open_category(client, &slug).await;
            if let Some(error) = browser.error() {
                return Err(error.into());
            }
            let mut jitter = jitter_source(seed, no_jitter);
            let graph = build_graph(browser.enterprises(), browser.category_name(), &config.graph, jitter.as_mut());
            match format {
                OutputFormat::Json => print_json(&graph),
                _ => {
                    let rows = graph
                        .nodes
                        .iter()
                        .map(|n| {
                            vec![
                                n.id.to_string(),
                                n.label.clone(),
                                format!("{:?}", n.kind),
                                format!("{:.1}", n.position.x),
                                format!("{:.1}", n.position.y),
                            ]
                        })
                        .collect();
                    emit(format, &["id", "label", "kind", "x", "y"], rows);
                    println!("{} node(s), {} edge(s)", graph.node_count(), graph.edge_count());
                    Ok(())
                }
            }
        }
        Commands::Map { category } => {
            let mut browser = CategoryBrowser::new(config.graph);
            browser.open_category(client, &category).await;
            if let Some(error) = browser.error() {
                return Err(error.into());
            }
            match MapView::from_enterprises(browser.enterprises()) {
                Some(map) => print_map(&map, format),
                None => {
                    println!("(no location data for {})", browser.category_name());
                    Ok(())
                }
            }
        }
        Commands::Geocode { address } => {
            let geocoder = MapboxGeocoder::from_config(&config.geocoder)?;
            let candidates = geocoder.suggest(&address).await?;
            match format {
                OutputFormat::Json => print_json(&candidates),
                _ => {
                    let rows = candidates
                        .iter()
                        .map(|c| vec![c.place_name.clone(), c.location.lat.to_string(), c.location.lng.to_string()])
                        .collect();
                    emit(format, &["place", "lat", "lng"], rows);
                    Ok(())
                }
            }
        }
    }
}

fn connect(cli: &Cli, config: &DirectoryConfig) -> Result<Box<dyn DirectoryClient>, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.snapshot {
        debug!("Serving from snapshot {:?}", path);
        let client = EmbeddedClient::from_snapshot_file(path)?.with_featured_limit(config.featured_limit);
        return Ok(Box::new(client));
    }
    let store = config.require_store()?;
    let client = RemoteClient::from_config(store)?.with_featured_limit(config.featured_limit);
    Ok(Box::new(client))
}

fn jitter_source(seed: Option<u64>, none: bool) -> Box<dyn JitterSource> {
    match (none, seed) {
        (true, _) => Box::new(NoJitter),
        (false, Some(seed)) => Box::new(RngJitter::seeded(seed)),
        (false, None) => Box::new(RngJitter::from_entropy()),
    }
}

/// Attach a location to the draft, geocoding the address when no
/// coordinates were given.
async fn locate(
    draft: &mut NewEnterprise,
    config: &DirectoryConfig,
    address: String,
    lat: Option<f64>,
    lng: Option<f64>,
) -> CliResult {
    if let (Some(lat), Some(lng)) = (lat, lng) {
        *draft = std::mem::take(draft).with_location(address, GeoPoint::new(lat, lng));
        return Ok(());
    }
    if config.geocoder.access_token.is_some() {
        let geocoder = MapboxGeocoder::from_config(&config.geocoder)?;
        if let Some(candidate) = geocoder.suggest(&address).await?.into_iter().next() {
            debug!("Using geocoded address {:?}", candidate.place_name);
            candidate.apply_to(draft);
            return Ok(());
        }
    }
    // No coordinates: validation reports the missing selection.
    draft.address = Some(address);
    draft.has_location = true;
    Ok(())
}

async fn run_categories(client: &dyn DirectoryClient, format: OutputFormat) -> CliResult {
    let categories = client.list_categories().await?;
    if let OutputFormat::Json = format {
        return print_json(&categories);
    }
    let rows = categories
        .iter()
        .map(|c| vec![c.id.to_string(), c.name.clone(), c.slug()])
        .collect();
    emit(format, &["id", "name", "slug"], rows);
    Ok(())
}

async fn run_subcategories(client: &dyn DirectoryClient, category_id: i64, format: OutputFormat) -> CliResult {
    let subcategories = client.list_subcategories(CategoryId::new(category_id)).await?;
    if let OutputFormat::Json = format {
        return print_json(&subcategories);
    }
    let rows = subcategories
        .iter()
        .map(|s| vec![s.id.to_string(), s.name.clone()])
        .collect();
    emit(format, &["id", "name"], rows);
    Ok(())
}

fn print_enterprises(enterprises: &[Enterprise], format: OutputFormat) -> CliResult {
    if let OutputFormat::Json = format {
        return print_json(&enterprises);
    }
    let rows = enterprises
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.name.clone(),
                e.category.clone(),
                e.subcategories.join("; "),
                e.website.clone().unwrap_or_default(),
            ]
        })
        .collect();
    emit(format, &["id", "name", "category", "subcategories", "website"], rows);
    if let OutputFormat::Table = format {
        println!("{} enterprise(s)", enterprises.len());
    }
    Ok(())
}

fn print_enterprise(enterprise: &Enterprise, format: OutputFormat) -> CliResult {
    if let OutputFormat::Json = format {
        return print_json(enterprise);
    }
    let optional = |v: &Option<String>| v.clone().unwrap_or_default();
    let location = enterprise
        .location()
        .map(|p| format!("{}, {}", p.lat, p.lng))
        .unwrap_or_default();
    let rows = vec![
        vec!["id".to_string(), enterprise.id.to_string()],
        vec!["name".to_string(), enterprise.name.clone()],
        vec!["category".to_string(), enterprise.category.clone()],
        vec!["subcategories".to_string(), enterprise.subcategories.join("; ")],
        vec!["description".to_string(), optional(&enterprise.description)],
        vec!["website".to_string(), optional(&enterprise.website)],
        vec!["address".to_string(), optional(&enterprise.address)],
        vec!["location".to_string(), location],
        vec!["featured".to_string(), enterprise.is_featured.to_string()],
        vec!["added".to_string(), enterprise.created_at.format("%B %-d, %Y").to_string()],
    ];
    emit(format, &["field", "value"], rows);
    Ok(())
}

fn print_map(map: &MapView<'_>, format: OutputFormat) -> CliResult {
    if let OutputFormat::Json = format {
        return print_json(map);
    }
    let rows = map
        .markers
        .iter()
        .map(|m| {
            vec![
                m.enterprise.name.clone(),
                m.position.lat.to_string(),
                m.position.lng.to_string(),
                m.enterprise.detail_path(),
            ]
        })
        .collect();
    emit(format, &["name", "lat", "lng", "link"], rows);
    if let OutputFormat::Table = format {
        println!("center: {}, {}", map.center.lat, map.center.lng);
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn emit(format: OutputFormat, columns: &[&str], rows: Vec<Vec<String>>) {
    match format {
        OutputFormat::Csv => {
            println!("{}", columns.join(","));
            for row in &rows {
                let cells: Vec<String> = row.iter().map(|c| csv_cell(c)).collect();
                println!("{}", cells.join(","));
            }
        }
        _ => {
            if rows.is_empty() {
                println!("(no results)");
                return;
            }
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(columns);
            for row in rows {
                table.add_row(row);
            }
            println!("{}", table);
        }
    }
}

fn csv_cell(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Open a category page for `browse`. Without the category list the page
/// still works but has no subcategory panel, so that failure is only logged.
async fn open_browser(
    client: &dyn DirectoryClient,
    layout: LayoutConfig,
    slug: &str,
) -> Result<CategoryBrowser, Box<dyn std::error::Error>> {
    let mut browser = CategoryBrowser::new(layout);
    if let Err(e) = browser.load_categories(client).await {
        warn!("Subcategory filters unavailable for {}: {}", slug, e);
    }
    browser.open_category(client, slug).await;
    if let Some(error) = browser.error() {
        return Err(error.into());
    }
    Ok(browser)
}
