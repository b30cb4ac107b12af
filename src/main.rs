use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use hr_dashboard::export;
use hr_dashboard::input;
use hr_dashboard::render;
use hr_dashboard::{Dashboard, DashboardError, Edit, FilterSelection, RecordSet, SessionId};

#[derive(Parser)]
#[command(name = "hr-dashboard")]
#[command(about = "Filter, summarize and export HR applicant sheets (CSV, XLSX)", long_about = None)]
struct Cli {
    /// File used when no input is given
    #[arg(long, global = true, env = "HR_DASHBOARD_FILE")]
    default_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Case-insensitive substring searched in the name column
    #[arg(long)]
    name: Option<String>,

    /// Gender values to keep (comma separated)
    #[arg(long, value_delimiter = ',')]
    gender: Vec<String>,

    /// ROLE values to keep (comma separated)
    #[arg(long, value_delimiter = ',')]
    role: Vec<String>,

    /// Level values to keep (comma separated)
    #[arg(long, value_delimiter = ',')]
    level: Vec<String>,

    /// Join months to keep, e.g. "March 2025" (comma separated)
    #[arg(long, value_delimiter = ',')]
    join_month: Vec<String>,
}

impl FilterArgs {
    fn selection(&self) -> FilterSelection {
        let mut selection = FilterSelection::new()
            .with_gender(&self.gender)
            .with_role(&self.role)
            .with_level(&self.level)
            .with_join_month(&self.join_month);
        if let Some(name) = &self.name {
            selection = selection.with_name_query(name.as_str());
        }
        selection
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print scorecards, role chart and gender ratio
    Summary {
        /// Input file (CSV or XLSX)
        input: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List the values each filter offers for the current selection
    Options {
        /// Input file (CSV or XLSX)
        input: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Display columns and guessed roles of a file
    Info {
        /// Input file (CSV or XLSX)
        input: Option<PathBuf>,
    },

    /// Export the filtered rows
    Export {
        /// Input file (CSV or XLSX)
        input: Option<PathBuf>,

        /// Output file (.csv or .xlsx); defaults to filtered_data.csv
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Default the output to filtered_data.xlsx
        #[arg(long)]
        xlsx: bool,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Write scorecards and charts to an Excel workbook
    Charts {
        /// Input file (CSV or XLSX)
        input: Option<PathBuf>,

        /// Output Excel file
        #[arg(short, long)]
        output: PathBuf,

        /// Also write role counts to this CSV file
        #[arg(long)]
        role_counts: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Edit the filtered rows, then show the dashboard over the edited rows
    Edit {
        /// Input file (CSV or XLSX)
        input: Option<PathBuf>,

        /// Cell edit as ROW:COLUMN=VALUE (repeatable)
        #[arg(long = "set")]
        sets: Vec<String>,

        /// Append this many blank rows
        #[arg(long, default_value = "0")]
        add_rows: usize,

        /// Remove the row at this index (repeatable)
        #[arg(long = "remove-row")]
        remove_rows: Vec<usize>,

        /// Write the edited rows here (.csv or .xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let fallback = cli.default_file.as_deref();

    let outcome = match cli.command {
        Commands::Summary { input, filters } => summary(input.as_deref(), fallback, &filters),
        Commands::Options { input, filters } => options(input.as_deref(), fallback, &filters),
        Commands::Info { input } => info(input.as_deref(), fallback),
        Commands::Export { input, output, xlsx, filters } => {
            let output = output.unwrap_or_else(|| PathBuf::from(export::default_file_name(xlsx)));
            export_rows(input.as_deref(), fallback, &output, &filters)
        }
        Commands::Charts { input, output, role_counts, filters } => charts(
            input.as_deref(),
            fallback,
            &output,
            role_counts.as_deref(),
            &filters,
        ),
        Commands::Edit { input, sets, add_rows, remove_rows, output, filters } => {
            let mut edits = Vec::new();
            for set in &sets {
                edits.push(set.parse::<Edit>()?);
            }
            // Highest index first so earlier removals do not shift later ones
            let mut remove_rows = remove_rows;
            remove_rows.sort_unstable_by(|a, b| b.cmp(a));
            edits.extend(remove_rows.into_iter().map(Edit::RemoveRow));
            edits.extend(std::iter::repeat(Edit::AddRow).take(add_rows));

            edit(input.as_deref(), fallback, &edits, output.as_deref(), &filters)
        }
    };

    if let Err(err) = &outcome {
        if let Some(DashboardError::NoInput) = err.downcast_ref::<DashboardError>() {
            println!("Upload a CSV or XLSX file to view the dashboard.");
            println!("Pass a file path or set HR_DASHBOARD_FILE.");
            std::process::exit(2);
        }
    }

    outcome
}

fn load(upload: Option<&Path>, fallback: Option<&Path>) -> Result<RecordSet> {
    let path = input::resolve_source(upload, fallback)?;
    let records = input::read_table_file(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    println!("Loaded {}: {} rows", path.display(), records.len());
    Ok(records)
}

fn summary(upload: Option<&Path>, fallback: Option<&Path>, filters: &FilterArgs) -> Result<()> {
    let records = load(upload, fallback)?;
    let view = hr_dashboard::render_view(&records, &filters.selection());

    println!();
    print!("{}", render::render_dashboard(&view));
    Ok(())
}

fn options(upload: Option<&Path>, fallback: Option<&Path>, filters: &FilterArgs) -> Result<()> {
    let records = load(upload, fallback)?;
    let view = hr_dashboard::render_view(&records, &filters.selection());

    println!();
    print_options("Gender", &view.options.gender);
    print_options("Role", &view.options.role);
    print_options("Level", &view.options.level);
    print_options("DOJ Month-Year", &view.options.join_month);
    Ok(())
}

fn print_options(title: &str, values: &[String]) {
    println!("{}: {}", title, values.len());
    for value in values {
        println!("  {}", value);
    }
}

fn info(upload: Option<&Path>, fallback: Option<&Path>) -> Result<()> {
    let records = load(upload, fallback)?;
    let schema = hr_dashboard::schema::Schema::sniff(&records);

    println!();
    println!("Columns: {}", records.columns().len());
    for (idx, column) in records.columns().iter().enumerate() {
        println!(
            "  {:>3}. {} ({} distinct)",
            idx,
            column,
            records.distinct_count(column)
        );
    }
    println!();

    let guesses = [
        ("Name search", &schema.name),
        ("Headcount", &schema.headcount),
        ("Will to join", &schema.will_to_join),
        ("Role count", &schema.role_count),
    ];
    for (title, guess) in guesses {
        match guess {
            Some(g) => println!("{}: '{}' ({})", title, g.column, g.reason),
            None => println!("{}: none", title),
        }
    }
    println!();

    let flags = [
        ("Gender", schema.has_gender),
        ("ROLE", schema.has_role),
        ("Level", schema.has_level),
        ("DOJ", schema.has_join_date),
    ];
    for (column, present) in flags {
        println!("{}: {}", column, if present { "present" } else { "missing" });
    }

    Ok(())
}

/// Write rows by extension, falling back to CSV when the spreadsheet
/// writer is not built in
fn write_rows(records: &RecordSet, output: &Path) -> Result<()> {
    let is_xlsx = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));

    if is_xlsx && !export::spreadsheet_export_available() {
        let csv_path = output.with_extension("csv");
        println!(
            "Warning: Excel download disabled, writing CSV instead: {}",
            csv_path.display()
        );
        export::write_csv_file(records, &csv_path).context("Failed to write CSV file")?;
        return Ok(());
    }

    println!("Writing {} rows to {}", records.len(), output.display());
    export::write_file(records, output).context("Failed to write export")?;
    Ok(())
}

fn export_rows(
    upload: Option<&Path>,
    fallback: Option<&Path>,
    output: &Path,
    filters: &FilterArgs,
) -> Result<()> {
    let records = load(upload, fallback)?;
    let view = hr_dashboard::render_view(&records, &filters.selection());
    for warning in &view.warnings {
        println!("Warning: {}", warning);
    }

    write_rows(&view.records, output)?;
    println!("Done!");
    Ok(())
}

fn charts(
    upload: Option<&Path>,
    fallback: Option<&Path>,
    output: &Path,
    role_counts: Option<&Path>,
    filters: &FilterArgs,
) -> Result<()> {
    let records = load(upload, fallback)?;
    let view = hr_dashboard::render_view(&records, &filters.selection());
    for warning in &view.warnings {
        println!("Warning: {}", warning);
    }

    if let Some(path) = role_counts {
        println!("Writing role counts: {}", path.display());
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        export::write_serialized_csv(&view.role_counts, file)
            .context("Failed to write role counts")?;
    }

    write_chart_workbook(&view, output)?;
    println!("Done!");
    Ok(())
}

#[cfg(feature = "xlsx")]
fn write_chart_workbook(view: &hr_dashboard::DashboardView, output: &Path) -> Result<()> {
    println!("Writing Excel file: {}", output.display());
    hr_dashboard::xlsx::write_dashboard_to_xlsx(view, output)
        .context("Failed to write Excel file")?;
    Ok(())
}

#[cfg(not(feature = "xlsx"))]
fn write_chart_workbook(_view: &hr_dashboard::DashboardView, _output: &Path) -> Result<()> {
    anyhow::bail!(DashboardError::ExportUnavailable(
        "built without the `xlsx` feature".to_string()
    ))
}

fn edit(
    upload: Option<&Path>,
    fallback: Option<&Path>,
    edits: &[Edit],
    output: Option<&Path>,
    filters: &FilterArgs,
) -> Result<()> {
    let records = load(upload, fallback)?;
    let mut dashboard = Dashboard::new(records);
    let session = SessionId::new("cli");
    let selection = filters.selection();

    let mut worksheet = dashboard.worksheet(&session, &selection);
    println!("Editing {} rows", worksheet.records().len());
    worksheet.apply_all(edits).context("Failed to apply edits")?;

    if worksheet.is_dirty() {
        println!("Applied {} edit(s)", edits.len());
        dashboard.apply_worksheet(&session, worksheet);
    } else {
        println!("No edits given");
    }

    // Filters already shaped the worksheet; later passes start unconstrained
    let view = dashboard.render(&session, &FilterSelection::new());
    println!();
    print!("{}", render::render_dashboard(&view));

    if let Some(path) = output {
        println!();
        write_rows(&view.records, path)?;
    }

    Ok(())
}
