use std::{path::PathBuf, time::Instant};

use clap::Parser;
use colored::Colorize;
use library_catalogue::{
    CheckoutOutcome, Isbn, Library, LibraryConfig, LibraryError, PatronId, ReturnOutcome,
    TitleTree, TreeVisualization,
};
use rand::seq::SliceRandom;

/// Command-line arguments for the catalogue demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print the title index outline and the event history
    #[arg(short, long)]
    verbose: bool,

    /// Print the final catalogue listing as JSON
    #[arg(long)]
    json: bool,

    /// Print the title index as a Graphviz DOT graph
    #[arg(long)]
    dot: bool,

    /// Insert this many sorted titles to show the degenerate tree shape
    #[arg(long, value_name = "COUNT")]
    stress: Option<usize>,

    /// JSON file with catalogue settings
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    println!("{}", "Library Catalogue Demonstration".green().bold());
    println!("=====================================\n");

    let config = match args.config.as_ref().map(|path| LibraryConfig::load(path)).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            println!("{} {e}", "Error:".red().bold());
            return;
        }
    };

    let mut library = Library::with_config(config);
    if let Err(e) = catalogue_demo(&mut library) {
        println!("{} {e}", "Demo aborted:".red().bold());
        return;
    }

    if args.verbose {
        println!("{}", "\nTitle index outline:".yellow().bold());
        print!("{}", TreeVisualization::render_outline(library.title_index()));
        TreeVisualization::print_stats(library.title_index());
        println!();
        library.print_history();
    }

    if args.dot {
        println!("{}", "\nTitle index DOT graph:".yellow().bold());
        print!("{}", TreeVisualization::generate_dot(library.title_index()));
    }

    if args.json {
        match serde_json::to_string_pretty(&library.list_books()) {
            Ok(json) => println!("{json}"),
            Err(e) => println!("{} {e}", "Error:".red().bold()),
        }
    } else {
        println!("\n{library}");
    }

    if let Some(count) = args.stress {
        stress_demo(count);
    }

    println!("\n{}", "Demonstration complete!".green().bold());
}

/// Walks through adding, lending, returning and removing books
fn catalogue_demo(library: &mut Library) -> Result<(), LibraryError> {
    println!("{}", "Adding books...".yellow().bold());
    let books = [
        ("978-0-261-10221-7", "The Hobbit", "J. R. R. Tolkien"),
        ("978-0-452-28423-4", "Nineteen Eighty-Four", "George Orwell"),
        ("978-0-14-143951-8", "Pride and Prejudice", "Jane Austen"),
        ("978-0-06-112008-4", "To Kill a Mockingbird", "Harper Lee"),
        ("978-0-7432-7356-5", "The Great Gatsby", "F. Scott Fitzgerald"),
        ("978-0-618-00221-3", "The Hobbit", "J. R. R. Tolkien"),
    ];
    for (isbn, title, author) in books {
        library.add_book(Isbn::new(isbn)?, title, author)?;
    }

    match library.add_book(Isbn::new("978-0-00-000000-0")?, "", "Nobody") {
        Ok(()) => println!("Unexpectedly accepted a blank title"),
        Err(e) => println!("Rejected as expected: {e}"),
    }

    println!("{}", "\nLooking books up...".yellow().bold());
    let orwell = Isbn::new("978-0-452-28423-4")?;
    if let Some(book) = library.find_by_isbn(&orwell) {
        println!("By ISBN {orwell}: {book}");
    }
    if let Some(book) = library.find_by_title("Pride and Prejudice") {
        println!("By title: {book}");
    }
    println!("Copies of \"The Hobbit\": {}", library.find_all_by_title("The Hobbit").len());
    if library.find_by_title("Moby Dick").is_none() {
        println!("\"Moby Dick\" is not in the catalogue");
    }

    println!("{}", "\nLending...".yellow().bold());
    for name in ["Alice", "Bob", "Carol"] {
        match library.checkout(&orwell, PatronId::new(name)?)? {
            CheckoutOutcome::CheckedOut => println!("{name} checked out {orwell}"),
            CheckoutOutcome::Waitlisted { position } => {
                println!("{name} is waiting for {orwell} at position {position}");
            }
        }
    }

    println!("{}", "\nReturning...".yellow().bold());
    loop {
        match library.return_book(&orwell)? {
            ReturnOutcome::HandedOver(patron) => println!("{orwell} handed over to {patron}"),
            ReturnOutcome::Available => {
                println!("{orwell} is back on the shelf");
                break;
            }
        }
    }

    println!("{}", "\nRemoving a book...".yellow().bold());
    let removed = library.remove_book(&Isbn::new("978-0-7432-7356-5")?)?;
    println!("Removed {removed}");

    Ok(())
}

/// Shows how sorted insertion degrades the title index into a chain
fn stress_demo(count: usize) {
    println!("{}", format!("\nInserting {count} titles...").yellow().bold());
    let titles: Vec<String> = (0..count).map(|idx| format!("Title{idx:07}")).collect();

    let start = Instant::now();
    let mut sorted: TitleTree<usize> = titles.iter().cloned().zip(0..).collect();
    println!("Sorted order:   height {:>8} in {:?}", sorted.height(), start.elapsed());

    let mut shuffled_titles = titles.clone();
    shuffled_titles.shuffle(&mut rand::rng());
    let start = Instant::now();
    let shuffled: TitleTree<usize> = shuffled_titles.into_iter().zip(0..).collect();
    println!("Shuffled order: height {:>8} in {:?}", shuffled.height(), start.elapsed());

    let start = Instant::now();
    let in_order = sorted.in_order_traversal();
    let is_sorted = in_order.windows(2).all(|pair| matches!(pair, [a, b] if a.0 <= b.0));
    println!(
        "Traversed {} entries (sorted: {is_sorted}) in {:?}",
        in_order.len(),
        start.elapsed()
    );
    drop(in_order);

    let start = Instant::now();
    let deleted = titles.iter().filter(|title| sorted.delete(title).is_some()).count();
    println!("Deleted {deleted} entries in {:?}", start.elapsed());
}
