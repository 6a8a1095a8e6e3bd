use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use vendcat::catalog::{
    BrowseResult, CatalogService, CategoryFilter, ContactIdentity, CurationSeed, FilterParams,
    PriceBucket, Product, ProductId, SortKey,
};
use vendcat::error::AppError;

use crate::infra::{
    default_catalog_config, load_products, InMemoryCurationStore, LoggingSubmissionTransport,
};

#[derive(Args, Debug, Default)]
pub(crate) struct BrowseArgs {
    /// Product list JSON file (defaults to the built-in demo catalog)
    #[arg(long)]
    pub(crate) products: Option<PathBuf>,
    /// Category selector: all, healthy, meals, beverages, promoted, hidden,
    /// or a raw taxonomy value
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Sort key: popularity, price-low, price-high, margin, name
    #[arg(long)]
    pub(crate) sort: Option<String>,
    /// Exact brand filter
    #[arg(long)]
    pub(crate) brand: Option<String>,
    /// Vending price bucket: 0-2, 2-4, 4-6, 6+
    #[arg(long)]
    pub(crate) price: Option<String>,
    /// Free-text search over name and brand
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Cumulative page number (each page extends the previous one)
    #[arg(long)]
    pub(crate) page: Option<usize>,
    /// Operator capability: keep hidden items in the results
    #[arg(long)]
    pub(crate) include_hidden: bool,
    /// Print the raw JSON payload instead of the rendered table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of rows to show per rendered view
    #[arg(long, default_value_t = 5)]
    pub(crate) top: usize,
    /// Skip the interest-list export and submission portion of the demo
    #[arg(long)]
    pub(crate) skip_submission: bool,
}

pub(crate) fn run_browse(args: BrowseArgs) -> Result<(), AppError> {
    let products = match &args.products {
        Some(path) => load_products(path)?,
        None => demo_products(),
    };

    let service = CatalogService::new(
        products,
        Arc::new(InMemoryCurationStore::default()),
        Arc::new(LoggingSubmissionTransport),
        default_catalog_config(),
    )?;

    let params = FilterParams {
        category: args
            .category
            .as_deref()
            .map(CategoryFilter::parse)
            .unwrap_or_default(),
        brand: args.brand,
        price_bucket: args.price.as_deref().and_then(PriceBucket::parse),
        search: args.query,
        sort: args.sort.as_deref().map(SortKey::parse).unwrap_or_default(),
        include_hidden: args.include_hidden,
    };

    let result = service.browse(&params, args.page.unwrap_or(1));
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render_page(&result, result.page.visible.len());
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        top,
        skip_submission,
    } = args;

    println!("Vending catalog demo");

    // Operator defaults applied once to the empty store, the same path a
    // deployment uses for pre-seeded hidden/promoted/price state.
    let seed = CurationSeed {
        hidden: Vec::new(),
        promoted: vec![ProductId::new("turkey-club")],
        custom_prices: HashMap::from([(ProductId::new("chips-classic"), 1.75)]),
    };
    let store = Arc::new(InMemoryCurationStore::with_seed(seed));
    let transport = Arc::new(LoggingSubmissionTransport);
    let service = CatalogService::new(
        demo_products(),
        store,
        transport,
        default_catalog_config(),
    )?;

    let summary = service.summary();
    println!(
        "Catalog: {} products across {} brands (non-food supplies filtered at load)",
        summary.total_products, summary.total_brands
    );
    println!("Seeded defaults: turkey-club promoted, chips-classic priced at $1.75");

    println!("\nDefault view (popularity)");
    render_page(&service.browse(&FilterParams::default(), 1), top);

    println!("\nOperator curation pass");
    let candy = ProductId::new("candy-bar");
    let wrap = ProductId::new("caesar-wrap");

    service.hide(&candy)?;
    println!("- hid {candy}");
    service.promote(&wrap)?;
    println!("- promoted {wrap}");

    println!("\nCurated view (promoted items lead)");
    render_page(&service.browse(&FilterParams::default(), 1), top);

    println!("\nHealthy picks");
    let healthy = FilterParams {
        category: CategoryFilter::Healthy,
        ..FilterParams::default()
    };
    render_page(&service.browse(&healthy, 1), top);

    println!("\nSearch: 'protein' within healthy");
    let search = FilterParams {
        category: CategoryFilter::Healthy,
        search: Some("protein".to_string()),
        ..FilterParams::default()
    };
    render_page(&service.browse(&search, 1), top);

    println!("\nBest margins");
    let margins = FilterParams {
        sort: SortKey::Margin,
        ..FilterParams::default()
    };
    render_page(&service.browse(&margins, 1), top);

    if skip_submission {
        return Ok(());
    }

    println!("\nInterest list walkthrough");
    for id in ["greek-yogurt", "protein-bar", "smart-water"] {
        service.add_interest(&ProductId::new(id))?;
    }
    let saved = service.interest_list();
    println!("- saved {} items", saved.len());

    let csv = service.export_interest_csv()?;
    println!("- CSV export:");
    for line in csv.lines() {
        println!("    {line}");
    }

    let receipt = service.submit_interest(ContactIdentity {
        name: "Sam Operator".to_string(),
        email: "sam@example.com".to_string(),
        company: Some("Break Room Co".to_string()),
    })?;
    println!(
        "- submitted {} items at {}",
        receipt.item_count,
        receipt.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    Ok(())
}

fn render_page(result: &BrowseResult, limit: usize) {
    if result.page.visible.is_empty() {
        println!("  (no products match)");
        return;
    }

    for view in result.page.visible.iter().take(limit) {
        let rank = match view.promoted_rank {
            Some(rank) => format!("#{rank} "),
            None => String::new(),
        };
        let price = match view.vending_price {
            Some(price) => format!("${price:.2}"),
            None => "n/a".to_string(),
        };
        let markup = match view.markup_pct {
            Some(pct) => format!(" | {pct}% markup"),
            None => String::new(),
        };
        let badge = if view.healthy { " [healthy]" } else { "" };
        println!(
            "  {rank}{} ({}, {}) | {} vending | ${:.2} wholesale{markup}{badge}",
            view.name, view.brand, view.size, price, view.unit_price
        );
    }

    if result.page.total > limit {
        println!("  ... {} of {} shown", limit.min(result.page.total), result.page.total);
    }
}

pub(crate) fn demo_products() -> Vec<Product> {
    fn item(
        id: &str,
        name: &str,
        brand: &str,
        size: &str,
        category: &str,
        unit_price: f64,
        popularity: u32,
    ) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            brand: brand.to_string(),
            size: size.to_string(),
            category: category.to_string(),
            unit_price,
            case_price: None,
            unit_count: None,
            competitive_price: None,
            vending_price_override: None,
            seven_eleven_price: None,
            popularity: Some(popularity),
            is_healthy: None,
            rebate: None,
            image_url: None,
        }
    }

    let mut chips = item(
        "chips-classic",
        "Classic Potato Chips",
        "Lays",
        "1.5 oz",
        "snacks",
        0.55,
        82,
    );
    chips.competitive_price = Some(2.19);
    chips.case_price = Some(28.16);
    chips.unit_count = Some(64);

    let mut cola = item(
        "cola-20oz",
        "Cola Classic 20oz",
        "Fizz Co",
        "20 oz",
        "cold_beverage",
        1.10,
        96,
    );
    cola.competitive_price = Some(2.49);

    let mut cold_brew = item(
        "cold-brew",
        "Cold Brew Coffee Can",
        "High Brew",
        "8 oz",
        "beverages",
        1.45,
        58,
    );
    cold_brew.vending_price_override = Some(3.5);

    let mut yogurt = item(
        "greek-yogurt",
        "Greek Yogurt Cup",
        "Chobani",
        "5.3 oz",
        "refrigerated",
        1.05,
        47,
    );
    yogurt.is_healthy = Some(true);

    let mut pretzels = item(
        "pretzels",
        "Salted Pretzels",
        "Snyder",
        "2.25 oz",
        "snacks",
        0.55,
        22,
    );
    pretzels.rebate = Some("Buy 2 cases, get $5 back".to_string());

    vec![
        chips,
        item(
            "hot-chips",
            "Flamin Hot Chips",
            "Chester",
            "2 oz",
            "snacks",
            0.62,
            91,
        ),
        cola,
        item(
            "smart-water",
            "Smart Water 1L",
            "Smartwater",
            "1 L",
            "beverages",
            0.89,
            64,
        ),
        cold_brew,
        item(
            "protein-bar",
            "Chocolate Protein Bar",
            "Quest Nutrition",
            "2.12 oz",
            "snacks",
            1.25,
            71,
        ),
        item(
            "kind-bar",
            "Dark Chocolate Nut Bar",
            "KIND",
            "1.4 oz",
            "snacks",
            1.20,
            66,
        ),
        yogurt,
        item(
            "turkey-club",
            "Turkey Club Sandwich",
            "Deli Fresh",
            "8.25 oz",
            "refrigerated",
            2.75,
            39,
        ),
        item(
            "caesar-wrap",
            "Chicken Caesar Wrap",
            "Deli Fresh",
            "8 oz",
            "refrigerated",
            2.60,
            36,
        ),
        item(
            "ice-cream-sandwich",
            "Ice Cream Sandwich",
            "Frosty",
            "4 oz",
            "frozen_foods",
            1.10,
            54,
        ),
        item(
            "candy-bar",
            "Chocolate Candy Bar",
            "Kinder",
            "1.5 oz",
            "snacks",
            0.75,
            88,
        ),
        pretzels,
        item(
            "trail-mix",
            "Trail Mix Packs",
            "Sahale",
            "3 oz",
            "snacks",
            1.35,
            44,
        ),
        item(
            "stir-sticks",
            "Coffee Stir Stk 1000ct",
            "Royal",
            "1000 ct",
            "supplies",
            0.01,
            1,
        ),
    ]
}
