use clap::Parser;
use fieldgeo::location::{LocationResolver, ResolvedRegion, StoredAnnotation};
use fieldgeo::region::tables::COUNTRY_BOXES;
use fieldgeo::region::{region_names, Coordinate, Country, LabelMode};

/// fieldgeo: country and region labels for field-visit coordinates.
///
/// Prefers the country/state a record already carries, then the local
/// cache, then Nominatim reverse geocoding, then built-in bounding boxes.
///
/// Examples:
///   fieldgeo --lat 14.6349 --lng -90.5069
///   fieldgeo --lat 21.0 --lng -86.9 --classify-only
///   fieldgeo --lat 18.0 --lng -95.0 --country México --state Veracruz
///   fieldgeo --regions Guatemala
///   fieldgeo --serve --port 8080
#[derive(Parser)]
#[command(name = "fieldgeo", version, about, long_about = None)]
struct Cli {
    /// Latitude (-90 to 90).
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude (-180 to 180).
    #[arg(long, allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Country already stored for the visit.
    #[arg(long)]
    country: Option<String>,

    /// State/department already stored for the visit.
    #[arg(long)]
    state: Option<String>,

    /// Default-label convention: "listing" or "heatmap".
    #[arg(long, default_value = "listing", value_parser = parse_mode)]
    mode: LabelMode,

    /// Offline mode: only use the cache and built-in tables.
    #[arg(long)]
    offline: bool,

    /// Skip stored values, cache and network; run the built-in tables only.
    #[arg(long)]
    classify_only: bool,

    /// Print the country table in priority order.
    #[arg(long)]
    list_countries: bool,

    /// Print the region labels offered for a country.
    #[arg(long, value_name = "COUNTRY")]
    regions: Option<String>,

    /// Start the HTTP API.
    #[arg(long)]
    serve: bool,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 3030)]
    port: u16,
}

fn parse_mode(s: &str) -> Result<LabelMode, String> {
    LabelMode::parse(s).ok_or_else(|| format!("Unknown mode '{}'. Use 'listing' or 'heatmap'.", s))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.list_countries {
        for (i, (country, b)) in COUNTRY_BOXES.iter().enumerate() {
            println!(
                "{:>2}. {:<15} {}  lat [{}, {}]  lng [{}, {}]",
                i + 1,
                country.name(),
                country.iso_code(),
                b.lat_min,
                b.lat_max,
                b.lng_min,
                b.lng_max
            );
        }
        return;
    }

    if let Some(ref name) = cli.regions {
        let country = Country::parse(name).unwrap_or_else(|| fail(&format!("Unknown country '{}'", name)));
        for region in region_names(country) {
            println!("{}", region);
        }
        return;
    }

    let mut resolver = LocationResolver::new();
    resolver.set_offline(cli.offline);
    resolver.set_mode(cli.mode);

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new()
            .unwrap_or_else(|e| fail(&format!("Cannot start runtime: {}", e)));
        if let Err(e) = runtime.block_on(fieldgeo::server::start(&cli.host, cli.port, resolver)) {
            fail(&format!("Server error on {}:{}: {}", cli.host, cli.port, e));
        }
        return;
    }

    let coord = match (cli.lat, cli.lng) {
        (Some(lat), Some(lng)) => Coordinate::new(lat, lng),
        _ => fail("Provide --lat and --lng, or use --list-countries, --regions or --serve."),
    };
    if !coord.is_plausible() {
        fail("Invalid coordinates. Lat: -90..90, Lng: -180..180");
    }

    let resolved: ResolvedRegion = if cli.classify_only {
        LocationResolver::classify(coord, cli.mode)
    } else {
        let stored = StoredAnnotation {
            country: cli.country.clone(),
            state: cli.state.clone(),
        };
        resolver.resolve(coord, &stored)
    };

    eprintln!("  {}", resolved.display_line());

    match serde_json::to_string_pretty(&resolved) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(&format!("Cannot encode result: {}", e)),
    }
}

fn fail(msg: &str) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}
