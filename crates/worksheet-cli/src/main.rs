mod source;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use worksheet_form::{LayoutConfig, LayoutSettings};

#[derive(Parser)]
#[command(name = "wsgen", about = "Client worksheet form generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a fillable worksheet PDF
    Generate {
        /// Client name shown on the first page
        #[arg(short, long)]
        client: String,

        /// Items file: .csv (first column) or text (one item per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Layout config (JSON); defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured choice widget style
        #[arg(long, value_enum)]
        choice_style: Option<ChoiceStyleArg>,

        /// Override the configured prefix mode
        #[arg(long, value_enum)]
        prefix_mode: Option<PrefixModeArg>,

        /// Tax year shown in the title
        #[arg(long)]
        tax_year: Option<String>,

        /// Show the client name on every page
        #[arg(long)]
        repeat_client_name: bool,

        /// Accept an input without items and write a single blank page
        #[arg(long)]
        allow_empty: bool,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Write the default layout config as JSON
    InitConfig {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ChoiceStyleArg {
    Checkbox,
    Radio,
}

#[derive(Clone, Copy, ValueEnum)]
enum PrefixModeArg {
    Auto,
    Verbatim,
}

impl From<ChoiceStyleArg> for worksheet_form::ChoiceStyle {
    fn from(arg: ChoiceStyleArg) -> Self {
        match arg {
            ChoiceStyleArg::Checkbox => Self::Checkbox,
            ChoiceStyleArg::Radio => Self::Radio,
        }
    }
}

impl From<PrefixModeArg> for worksheet_form::PrefixMode {
    fn from(arg: PrefixModeArg) -> Self {
        match arg {
            PrefixModeArg::Auto => Self::Auto,
            PrefixModeArg::Verbatim => Self::Verbatim,
        }
    }
}

async fn read_settings(path: Option<&PathBuf>) -> Result<LayoutSettings> {
    match path {
        Some(path) => {
            let json = tokio::fs::read_to_string(path).await?;
            Ok(LayoutSettings::from_json(&json)?)
        }
        None => Ok(LayoutSettings::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            client,
            input,
            output,
            config,
            choice_style,
            prefix_mode,
            tax_year,
            repeat_client_name,
            allow_empty,
            stats_only,
        } => {
            let mut settings = read_settings(config.as_ref()).await?;
            if let Some(style) = choice_style {
                settings.choice_style = style.into();
            }
            if let Some(mode) = prefix_mode {
                settings.prefix_mode = mode.into();
            }
            if tax_year.is_some() {
                settings.header.tax_year = tax_year;
            }
            settings.header.repeat_client_name |= repeat_client_name;
            let config = LayoutConfig::new(settings)?;

            let items = source::load_items(&input, allow_empty).await?;

            let stats = worksheet_form::calculate_statistics(items.len(), &config)?;
            println!("Worksheet Statistics:");
            println!("  Items: {}", stats.items);
            println!("  Rows per page: {}", stats.rows_per_page);
            println!("  Pages: {}", stats.pages);
            println!("  Rows on last page: {}", stats.rows_on_last_page);
            println!("  Form fields: {}", stats.fields);

            if stats_only {
                return Ok(());
            }

            let pages = worksheet_form::generate_pdf(&client, &items, &config, &output).await?;
            println!(
                "Generated {} items on {} page(s) → {}",
                items.len(),
                pages,
                output.display()
            );
        }

        Commands::InitConfig { output } => {
            LayoutSettings::default().save(&output).await?;
            println!("Wrote default layout → {}", output.display());
        }
    }

    Ok(())
}
