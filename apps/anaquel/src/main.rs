//! anaquel - catalog search from the terminal
//!
//! One-shot front end over `anaquel-core`: runs a submitted search,
//! joins prices, and prints a related-titles strip.

use std::process::ExitCode;

use clap::Parser;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use tracing::debug;

use anaquel_core::{
    text, BookRecord, CatalogSearcher, PriceEntry, PriceMap, SearchConfig, SearchKind, SearchMode,
};

const BLURB_CHARS: usize = 80;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "anaquel")]
#[command(about = "Search the book catalog: titles, prices, related titles")]
#[command(version)]
struct Args {
    /// Search terms
    #[arg(required = true)]
    query: Vec<String>,

    /// Weight the query as an author name instead of general text
    #[arg(short, long)]
    author: bool,

    /// Skip the related-titles strip
    #[arg(long)]
    no_suggestions: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let query = args.query.join(" ");

    let config = SearchConfig::from_env();
    let searcher = match CatalogSearcher::new(&config) {
        Ok(searcher) => searcher,
        Err(err) => {
            eprintln!("anaquel: {err}");
            eprintln!(
                "set ANAQUEL_INDEX_URL, ANAQUEL_BROKER_URL and ANAQUEL_PRICING_URL \
                 (plus ANAQUEL_API_KEY for a protected index)"
            );
            return ExitCode::from(2);
        }
    };

    let mode = if args.author {
        SearchMode::Author
    } else {
        SearchMode::General
    };
    debug!(%query, mode = mode.display_name(), "submitting search");

    let results = match searcher.search(&query, mode, SearchKind::Submit).await {
        Ok(results) => results,
        Err(err) => {
            debug!(%err, "submitted search failed");
            eprintln!("{}", err.user_message());
            return ExitCode::FAILURE;
        }
    };

    if results.is_empty() {
        println!("No books found for \"{query}\". Try a different search term.");
        return ExitCode::SUCCESS;
    }

    // Prices and related titles come from independent services; fetch
    // them together. Either one degrading leaves the results intact.
    let (mut prices, suggestions) = if args.no_suggestions {
        (searcher.prices(&results).await, Vec::new())
    } else {
        tokio::join!(
            searcher.prices(&results),
            searcher.suggestions(&query, &results)
        )
    };

    // The strip is priced like the result list; one more batch keyed
    // by the same canonical ids.
    if !suggestions.is_empty() {
        prices.extend(searcher.prices(&suggestions).await);
    }

    println!(
        "Found {} book{}",
        results.len(),
        if results.len() == 1 { "" } else { "s" }
    );
    print_results(&searcher, &results, &prices);

    if !suggestions.is_empty() {
        println!();
        println!("También te puede interesar:");
        for book in &suggestions {
            match searcher.id_of(book).and_then(|id| prices.get(&id)) {
                Some(entry) => {
                    println!("  - {} ({}) {}", book.title, book.author, format_price(entry))
                }
                None => println!("  - {} ({})", book.title, book.author),
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_results(searcher: &CatalogSearcher, results: &[BookRecord], prices: &PriceMap) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Título", "Autor", "ISBN", "Precio", "Descripción"]);

    for book in results {
        let price = searcher
            .id_of(book)
            .and_then(|id| prices.get(&id))
            .map(format_price)
            .unwrap_or_else(|| "—".to_string());

        table.add_row(vec![
            Cell::new(&book.title),
            Cell::new(&book.author),
            Cell::new(book.isbn.as_deref().unwrap_or("—")),
            Cell::new(price),
            Cell::new(text::display_blurb(&book.description, BLURB_CHARS)),
        ]);
    }

    println!("{table}");
}

fn format_price(entry: &PriceEntry) -> String {
    if entry.is_discounted() {
        format!(
            "${:.2} (antes ${:.2})",
            entry.selling_price, entry.list_price
        )
    } else {
        format!("${:.2}", entry.list_price)
    }
}
