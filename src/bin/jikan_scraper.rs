//! Catalog scraper for trackyrs.
//!
//! Walks the paginated Jikan v4 listings and upserts everything into the
//! local database. Every job records its progress, so an interrupted run
//! resumes where it left off when invoked again with the same command.

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use clap::Subcommand;
use dotenv::dotenv;
use log::error;
use log::info;

use trackyrs::config::Config;
use trackyrs::jikan::JikanClient;
use trackyrs::logging::setup_logging;
use trackyrs::repository::Repository;
use trackyrs::service::catalog_service::CatalogService;
use trackyrs::service::ingest_service::IngestService;
use trackyrs::service::ingest_service::JOB_ANIME;
use trackyrs::service::ingest_service::JOB_ANIME_CHARACTERS;
use trackyrs::service::ingest_service::JOB_CHARACTERS;
use trackyrs::service::ingest_service::JOB_MAGAZINES;
use trackyrs::service::ingest_service::JOB_MANGA;
use trackyrs::service::ingest_service::JOB_MANGA_CHARACTERS;
use trackyrs::service::ingest_service::JOB_PEOPLE;
use trackyrs::service::ingest_service::JOB_PRODUCERS;
use trackyrs::service::ingest_service::ScrapeOpts;

const JOBS: &[&str] = &[
    JOB_ANIME,
    JOB_MANGA,
    JOB_CHARACTERS,
    JOB_PEOPLE,
    JOB_PRODUCERS,
    JOB_MAGAZINES,
    JOB_ANIME_CHARACTERS,
    JOB_MANGA_CHARACTERS,
];

#[derive(Parser)]
#[command(
    name = "jikan_scraper",
    about = "Mirrors the Jikan catalog into the trackyrs database"
)]
struct Cli {
    /// Ignore stored progress and start over from the beginning.
    #[arg(long, global = true)]
    no_resume: bool,

    /// Start from this page instead of the stored one (list jobs only).
    #[arg(long, global = true)]
    start_page: Option<i32>,

    /// Stop after fetching this many pages.
    #[arg(long, global = true)]
    max_pages: Option<i32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the anime and manga genre lists.
    Genres,
    /// Walk the producers listing.
    Producers,
    /// Walk the magazines listing.
    Magazines,
    /// Walk the anime listing, including genre and producer links.
    Anime,
    /// Walk the manga listing, including genre, magazine and author links.
    Manga,
    /// Walk the characters listing.
    Characters,
    /// Walk the people listing.
    People,
    /// Fetch the cast for every stored anime.
    AnimeCharacters,
    /// Fetch the cast for every stored manga.
    MangaCharacters,
    /// Run every job in dependency order.
    All,
    /// Print stored scrape progress and catalog counts.
    Status,
    /// Delete one job's progress row.
    Reset {
        /// Job name, e.g. "anime" or "anime_characters".
        #[arg(long)]
        job: String,
    },
    /// Delete every scraped row and all stored progress. Tracking rows go
    /// with their catalog entries; user accounts survive.
    Wipe {
        /// Actually do it. Without this flag nothing is touched.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::new();
    if let Err(err) = config.load() {
        eprintln!("jikan_scraper: {err}");
        std::process::exit(1);
    }
    if let Err(err) = setup_logging(&config) {
        eprintln!("jikan_scraper: {err}");
        std::process::exit(1);
    }

    if let Err(err) = run(&config, cli).await {
        error!("Scrape failed: {err:#}");
        std::process::exit(1);
    }
}

async fn run(config: &Config, cli: Cli) -> anyhow::Result<()> {
    let db = Arc::new(Repository::new(&config.db_url).await?);
    db.run_migrations().await?;

    let jikan = Arc::new(JikanClient::new(config));
    let ingest = IngestService::new(db.clone(), jikan);

    let opts = ScrapeOpts {
        resume: !cli.no_resume,
        start_page: cli.start_page,
        max_pages: cli.max_pages,
    };

    let start = Instant::now();
    let summary = match cli.command {
        Command::Genres => Some(ingest.scrape_genres().await?),
        Command::Producers => Some(ingest.scrape_producers(&opts).await?),
        Command::Magazines => Some(ingest.scrape_magazines(&opts).await?),
        Command::Anime => Some(ingest.scrape_anime(&opts).await?),
        Command::Manga => Some(ingest.scrape_manga(&opts).await?),
        Command::Characters => Some(ingest.scrape_characters(&opts).await?),
        Command::People => Some(ingest.scrape_people(&opts).await?),
        Command::AnimeCharacters => Some(ingest.scrape_anime_characters(&opts).await?),
        Command::MangaCharacters => Some(ingest.scrape_manga_characters(&opts).await?),
        Command::All => Some(ingest.scrape_all(&opts).await?),
        Command::Status => {
            print_status(&db).await?;
            None
        }
        Command::Reset { job } => {
            reset_job(&db, &job).await?;
            None
        }
        Command::Wipe { yes } => {
            wipe_catalog(&db, yes).await?;
            None
        }
    };

    if let Some(summary) = summary {
        info!(
            "Scrape finished in {:.2}s: {summary}",
            start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

async fn print_status(db: &Arc<Repository>) -> anyhow::Result<()> {
    let rows = db.progress.select_all().await?;
    if rows.is_empty() {
        println!("No scrape progress stored.");
    } else {
        println!(
            "{:<18} {:>10} {:>12} {:>12} {:>9}",
            "job", "last_page", "last_mal_id", "total_pages", "finished"
        );
        for row in rows {
            let total = row
                .total_pages
                .map_or_else(|| "-".to_string(), |t| t.to_string());
            println!(
                "{:<18} {:>10} {:>12} {:>12} {:>9}",
                row.job, row.last_page, row.last_mal_id, total, row.finished
            );
        }
    }

    let counts = CatalogService::new(db.clone()).overview().await?;
    println!();
    println!("Catalog counts:");
    println!("  anime:      {}", counts.anime);
    println!("  manga:      {}", counts.manga);
    println!("  characters: {}", counts.characters);
    println!("  people:     {}", counts.people);
    println!("  producers:  {}", counts.producers);
    println!("  magazines:  {}", counts.magazines);
    println!("  genres:     {}", counts.genres);

    Ok(())
}

async fn reset_job(db: &Repository, job: &str) -> anyhow::Result<()> {
    if !JOBS.contains(&job) {
        anyhow::bail!("Unknown job '{}'. Valid jobs: {}", job, JOBS.join(", "));
    }

    if db.progress.reset(job).await? {
        println!("Progress for job '{job}' reset.");
    } else {
        println!("No progress stored for job '{job}'.");
    }

    Ok(())
}

async fn wipe_catalog(db: &Repository, yes: bool) -> anyhow::Result<()> {
    if !yes {
        anyhow::bail!("Refusing to wipe the catalog without --yes");
    }

    db.delete_catalog().await?;
    println!("Catalog and scrape progress deleted.");
    Ok(())
}
