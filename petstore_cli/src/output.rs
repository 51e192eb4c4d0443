use anyhow::Result;
use petstore_lib::{Flash, ListingView, PetRecord};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct PetRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Tags")]
    #[serde(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Photos")]
    #[serde(rename = "Photos")]
    photos: usize,
}

fn build_pet_rows(pets: &[PetRecord]) -> Vec<PetRow> {
    pets.iter()
        .map(|p| PetRow {
            id: p.id,
            name: p.name.clone(),
            status: p.status.to_string(),
            category: p.category_name.clone().unwrap_or_default(),
            tags: p
                .tags
                .iter()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            photos: p.photo_urls.len(),
        })
        .collect()
}

fn page_summary(view: &ListingView) -> String {
    format!(
        "Page {}/{} ({} {} pets)",
        view.page.current_page,
        view.page.last_page,
        view.page.total,
        match view.filter {
            petstore_lib::Filter::All => "available",
            petstore_lib::Filter::My => "of your",
        }
    )
}

fn flash_line(flash: &Flash) -> String {
    match flash {
        Flash::Success(msg) => msg.clone(),
        Flash::Error(msg) => format!("Error: {}", msg),
    }
}

// -- Table output --

pub fn print_pets_table(pets: &[PetRecord]) {
    println!("{}", Table::new(build_pet_rows(pets)));
}

// -- Markdown output --

pub fn print_pets_markdown(pets: &[PetRecord]) {
    let mut table = Table::new(build_pet_rows(pets));
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

pub fn print_pets_csv(pets: &[PetRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_pet_rows(pets) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Prints a listing. JSON carries the whole view on stdout; the other
/// formats print rows on stdout and the flash, warning and page line on stderr.
pub fn print_listing(view: &ListingView, format: &OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        print_json(view);
        return Ok(());
    }

    if let Some(flash) = &view.flash {
        eprintln!("{}", flash_line(flash));
    }
    if let Some(warning) = &view.warning {
        eprintln!("Warning: {}", warning);
    }
    eprintln!("{}", page_summary(view));

    match format {
        OutputFormat::Table => print_pets_table(&view.page.items),
        OutputFormat::Markdown => print_pets_markdown(&view.page.items),
        OutputFormat::Csv => print_pets_csv(&view.page.items)?,
        OutputFormat::Json => {}
    }
    Ok(())
}

pub fn print_pet(pet: &PetRecord, format: &OutputFormat) -> Result<()> {
    let pets = std::slice::from_ref(pet);
    match format {
        OutputFormat::Table => print_pets_table(pets),
        OutputFormat::Json => print_json(pet),
        OutputFormat::Csv => print_pets_csv(pets)?,
        OutputFormat::Markdown => print_pets_markdown(pets),
    }
    Ok(())
}
