use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::InventoryService;
use crate::domain::{format_currency, group_thousands, Vehicle, VehicleDraft, VehicleUpdate};
use crate::report::ExportFormat;

/// Cochera - Vehicle Inventory
#[derive(Parser)]
#[command(name = "cochera")]
#[command(about = "A local-first inventory manager for vehicle listings")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "cochera.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Vehicle management commands
    #[command(subcommand)]
    Vehicle(VehicleCommands),

    /// Export the listing as a document
    Export {
        /// Output format: xlsx, pdf
        format: String,

        /// Output file (defaults to the document's suggested filename)
        #[arg(short, long)]
        output: Option<String>,

        /// TrueType font used for PDF export
        #[arg(long, default_value = "fonts/Roboto-Regular.ttf")]
        font: String,
    },
}

#[derive(Subcommand)]
pub enum VehicleCommands {
    /// Add a new vehicle listing
    Add {
        /// Brand, e.g. "Toyota"
        #[arg(long)]
        brand: String,

        /// Model, e.g. "Corolla XEI 1.8"
        #[arg(long)]
        model: String,

        /// Model year
        #[arg(long)]
        year: String,

        /// Odometer reading in kilometers
        #[arg(short, long)]
        kilometers: String,

        /// Registration plate
        #[arg(long)]
        plate: String,

        /// Asking price, whole amount
        #[arg(long)]
        price: String,

        /// Informational reference price
        #[arg(long)]
        info_price: Option<String>,

        /// Currency tag: "$" or "USD"
        #[arg(short, long, default_value = "$")]
        currency: String,

        /// Body category, e.g. "sedan", "pickup"
        #[arg(long, default_value = "auto")]
        category: String,
    },

    /// List all vehicles, ordered by brand
    List {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Show detailed vehicle information
    Show {
        /// Vehicle ID
        id: String,
    },

    /// Update fields of an existing listing
    Update {
        /// Vehicle ID
        id: String,

        #[arg(long)]
        brand: Option<String>,

        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        year: Option<String>,

        #[arg(short, long)]
        kilometers: Option<String>,

        #[arg(long)]
        plate: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        info_price: Option<String>,

        #[arg(short, long)]
        currency: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Publish or unpublish a listing
    Online {
        /// Vehicle ID
        id: String,

        /// "on" or "off"
        state: String,
    },

    /// Remove a listing
    Remove {
        /// Vehicle ID
        id: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                InventoryService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Vehicle(vehicle_cmd) => {
                let service = InventoryService::connect(&self.database).await?;
                run_vehicle_command(&service, vehicle_cmd).await?;
            }

            Commands::Export {
                format,
                output,
                font,
            } => {
                let service = InventoryService::connect(&self.database).await?;
                run_export_command(&service, &format, output.as_deref(), &font, self.verbose)
                    .await?;
            }
        }
        Ok(())
    }
}

async fn run_vehicle_command(service: &InventoryService, command: VehicleCommands) -> Result<()> {
    match command {
        VehicleCommands::Add {
            brand,
            model,
            year,
            kilometers,
            plate,
            price,
            info_price,
            currency,
            category,
        } => {
            let draft = VehicleDraft {
                category,
                brand,
                model,
                year,
                kilometers,
                plate,
                price,
                info_price,
                currency,
            };
            let vehicle = service.add_vehicle(draft).await?;
            println!(
                "Added {} {} ({}) - {}",
                vehicle.brand,
                vehicle.model,
                vehicle.year,
                vehicle.id
            );
        }

        VehicleCommands::List { format } => {
            let vehicles = service.list_vehicles().await?;
            match format.as_str() {
                "table" => print_table(&vehicles),
                "json" => println!("{}", serde_json::to_string_pretty(&vehicles)?),
                other => anyhow::bail!("Invalid format '{}'. Valid formats: table, json", other),
            }
        }

        VehicleCommands::Show { id } => {
            let vehicle = service.get_vehicle(parse_id(&id)?).await?;
            print_detail(&vehicle);
        }

        VehicleCommands::Update {
            id,
            brand,
            model,
            year,
            kilometers,
            plate,
            price,
            info_price,
            currency,
            category,
        } => {
            let update = VehicleUpdate {
                category,
                brand,
                model,
                year,
                kilometers,
                plate,
                price,
                info_price,
                currency,
            };
            if update.is_empty() {
                anyhow::bail!("Nothing to update: provide at least one field");
            }
            let vehicle = service.update_vehicle(parse_id(&id)?, update).await?;
            println!("Updated {} {} ({})", vehicle.brand, vehicle.model, vehicle.id);
        }

        VehicleCommands::Online { id, state } => {
            let online = match state.as_str() {
                "on" => true,
                "off" => false,
                other => anyhow::bail!("Invalid state '{}'. Use 'on' or 'off'", other),
            };
            let vehicle = service.set_online(parse_id(&id)?, online).await?;
            println!(
                "{} {} is now {}",
                vehicle.brand,
                vehicle.model,
                if vehicle.online { "online" } else { "offline" }
            );
        }

        VehicleCommands::Remove { id } => {
            let id = parse_id(&id)?;
            service.remove_vehicle(id).await?;
            println!("Removed vehicle {}", id);
        }
    }
    Ok(())
}

async fn run_export_command(
    service: &InventoryService,
    format: &str,
    output: Option<&str>,
    font_path: &str,
    verbose: bool,
) -> Result<()> {
    let format = match format {
        "xlsx" | "excel" => ExportFormat::Spreadsheet,
        "pdf" => {
            // The font file is only touched on the PDF path; a missing font
            // never affects spreadsheet export.
            let font = std::fs::read(font_path)
                .with_context(|| format!("Failed to load font: {}", font_path))?;
            ExportFormat::Pdf { font }
        }
        other => anyhow::bail!("Invalid export format '{}'. Valid formats: xlsx, pdf", other),
    };

    let count = service.count_vehicles().await?;
    let document = service.export_listing(format).await?;

    let path = output.unwrap_or(document.filename);
    std::fs::write(path, &document.bytes)
        .with_context(|| format!("Failed to write output file: {}", path))?;

    println!("Exported {} vehicles to {}", count, path);
    if verbose {
        eprintln!(
            "{} bytes, content type {}",
            document.bytes.len(),
            document.content_type
        );
    }
    Ok(())
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).with_context(|| format!("Invalid vehicle ID '{}'", raw))
}

fn print_table(vehicles: &[Vehicle]) {
    if vehicles.is_empty() {
        println!("No vehicles found.");
        return;
    }

    println!(
        "{:<36}  {:<3} {:<12} {:<28} {:<5} {:>10}  {:<9} {:>14}",
        "ID", "On", "Marca", "Modelo", "Año", "Kilómetros", "Patente", "Precio"
    );
    for vehicle in vehicles {
        println!(
            "{:<36}  {:<3} {:<12} {:<28} {:<5} {:>10}  {:<9} {:>14}",
            vehicle.id,
            if vehicle.online { "*" } else { "" },
            vehicle.brand,
            vehicle.model,
            vehicle.year,
            group_thousands(vehicle.kilometers.max(0) as u64),
            vehicle.plate,
            format_currency(vehicle.price, vehicle.currency),
        );
    }
    println!("\n{} vehicle(s)", vehicles.len());
}

fn print_detail(vehicle: &Vehicle) {
    println!("ID:          {}", vehicle.id);
    println!("Online:      {}", if vehicle.online { "yes" } else { "no" });
    println!("Category:    {}", vehicle.category);
    println!("Brand:       {}", vehicle.brand);
    println!("Model:       {}", vehicle.model);
    println!("Year:        {}", vehicle.year);
    println!(
        "Kilometers:  {}",
        group_thousands(vehicle.kilometers.max(0) as u64)
    );
    println!("Plate:       {}", vehicle.plate);
    println!(
        "Price:       {}",
        format_currency(vehicle.price, vehicle.currency)
    );
    println!(
        "Info price:  {}",
        format_currency(vehicle.info_price, vehicle.currency)
    );
}
