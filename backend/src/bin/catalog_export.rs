//! Export the Odoo catalog to static JSON and HTML files.

use std::path::PathBuf;

use backend::export::{CatalogExporter, CatalogSource, ExportOutcome, OdooRestSource};
use clap::Parser;
use common::render::PriceFormat;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "catalog-export", version, about = "Export the store catalog from Odoo to static files")]
struct ExportArgs {
    #[arg(long, env = "ODOO_URL", default_value = "http://localhost:8069", help = "Odoo base URL")]
    odoo_url: String,
    #[arg(long, env = "ODOO_DB", default_value = "alsaji_copy", help = "Odoo database name")]
    db: String,
    #[arg(short, long, value_name = "DIR", default_value = "data", help = "Output directory")]
    output: PathBuf,
    #[arg(long, env = "CURRENCY_PREFIX", default_value = "$", help = "Prefix for prices on static pages")]
    currency_prefix: String,
    #[arg(short, long, help = "Export even when the data hash is unchanged")]
    force: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))).init();
    let args = ExportArgs::parse();

    let source = OdooRestSource::new(&args.odoo_url, &args.db)?;
    let raw = source.fetch().await?;
    let exporter = CatalogExporter::new(&args.output, PriceFormat::with_prefix(args.currency_prefix));

    match exporter.export(&raw, args.force, chrono::Utc::now()).await? {
        ExportOutcome::Unchanged { data_hash } => info!("nothing to do, data hash {data_hash} unchanged (use --force)"),
        ExportOutcome::Written(metadata) => info!("export complete: {} products, hash {}", metadata.total_products, metadata.data_hash),
    }
    Ok(())
}
