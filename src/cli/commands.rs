use super::display;
use crate::api::NasaClient;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{MarsPhoto, MarsPhotoQuery, MediaType, Rover};
use crate::service::{self, PageAccumulator, DEFAULT_PHOTO_QUERY, DEFAULT_VIDEO_QUERY};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Proxy server and terminal dashboard for NASA's public APIs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The requested command; `serve` when none is given.
    pub fn command(self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP proxy (default)
    Serve,

    /// Browse the APIs through an interactive menu
    Interactive,

    #[command(flatten)]
    Query(QueryCommand),
}

impl Commands {
    pub fn is_server(&self) -> bool {
        matches!(self, Commands::Serve)
    }
}

/// One-shot queries that print their result and exit.
#[derive(Subcommand, Debug, Clone)]
pub enum QueryCommand {
    /// Astronomy Picture of the Day
    Apod(ApodArgs),

    /// Mars rover photos for a sol
    Mars(MarsArgs),

    /// Near-Earth objects approaching in a date window (at most 7 days)
    Neo(NeoArgs),

    /// EPIC full-disc Earth images for a day
    Epic(EpicArgs),

    /// Search the NASA Image Library
    Photos(PhotosArgs),

    /// Search the NASA Video Library
    Videos(VideosArgs),

    /// Show one random photo from an image search
    RandomPhoto(RandomPhotoArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ApodArgs {
    /// Day to show (YYYY-MM-DD); today when omitted
    #[arg(short, long)]
    pub date: Option<String>,

    /// Last day of a range starting at --date
    #[arg(long, requires = "date")]
    pub end_date: Option<String>,
}

impl ApodArgs {
    pub fn date(&self) -> Result<Option<NaiveDate>> {
        self.date.as_deref().map(apod_date).transpose()
    }
}

#[derive(Args, Debug, Clone)]
pub struct MarsArgs {
    /// curiosity, perseverance, spirit or opportunity
    #[arg(short, long)]
    pub rover: String,

    /// Martian day since landing
    #[arg(short, long)]
    pub sol: u32,

    /// Camera abbreviation, e.g. NAVCAM; all cameras when omitted
    #[arg(short, long)]
    pub camera: Option<String>,

    /// Photos per page
    #[arg(short, long, default_value = "12")]
    pub limit: u32,

    /// How many pages to load; stops early when a page comes back short
    #[arg(short, long, default_value = "1")]
    pub pages: u32,
}

impl MarsArgs {
    pub fn to_query(&self) -> Result<MarsPhotoQuery> {
        let rover: Rover = self.rover.parse()?;
        Ok(MarsPhotoQuery::new(rover, self.sol)
            .with_page(1, self.limit)
            .with_camera(self.camera.as_deref()))
    }
}

#[derive(Args, Debug, Clone)]
pub struct NeoArgs {
    /// First day (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: String,

    /// Last day (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: String,

    /// Print per-day hazardous counts instead of every object
    #[arg(long)]
    pub summary: bool,
}

impl NeoArgs {
    pub fn range(&self) -> Result<(NaiveDate, NaiveDate)> {
        service::parse_date_range(&self.start, &self.end, Some(service::NEO_MAX_RANGE_DAYS))
    }
}

#[derive(Args, Debug, Clone)]
pub struct EpicArgs {
    /// Day to show (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: String,
}

#[derive(Args, Debug, Clone)]
pub struct PhotosArgs {
    #[arg(short, long, default_value = DEFAULT_PHOTO_QUERY)]
    pub query: String,

    #[arg(short, long, default_value = "1")]
    pub page: u32,
}

#[derive(Args, Debug, Clone)]
pub struct VideosArgs {
    #[arg(short, long, default_value = DEFAULT_VIDEO_QUERY)]
    pub query: String,

    #[arg(short, long, default_value = "1")]
    pub page: u32,

    #[arg(short, long, default_value = "10")]
    pub limit: u32,
}

#[derive(Args, Debug, Clone)]
pub struct RandomPhotoArgs {
    #[arg(short, long, default_value = DEFAULT_PHOTO_QUERY)]
    pub query: String,
}

/// Parses a day the APOD archive can serve.
pub fn apod_date(raw: &str) -> Result<NaiveDate> {
    let date = service::parse_date(raw)?;
    if !service::is_valid_apod_date(date, service::today_utc()) {
        return Err(AppError::InvalidParameter(
            "Date must be valid and cannot be in the future".to_string(),
        ));
    }
    Ok(date)
}

fn positive(value: u32, name: &str) -> Result<u32> {
    if value == 0 {
        return Err(AppError::Cli(format!("{name} must be a positive integer")));
    }
    Ok(value)
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Runs `task` behind a spinner that is cleared once it resolves.
async fn with_spinner<T, F>(message: &str, task: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let pb = spinner(message)?;
    let result = task.await;
    pb.finish_and_clear();
    result
}

/// CLI application
pub struct App {
    client: NasaClient,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: NasaClient::from_config(config)?,
        })
    }

    pub fn with_client(client: NasaClient) -> Self {
        Self { client }
    }

    /// Run a one-shot query command
    pub async fn run_command(&self, command: QueryCommand) -> Result<()> {
        debug!("Running {:?}", command);
        match command {
            QueryCommand::Apod(args) => self.show_apod(&args).await,
            QueryCommand::Mars(args) => {
                let query = args.to_query()?;
                let photos = self
                    .load_mars_pages(&query, positive(args.pages, "pages")?)
                    .await?;
                self.print_mars(&query, photos.items());
                Ok(())
            },
            QueryCommand::Neo(args) => self.show_neo(&args).await,
            QueryCommand::Epic(args) => self.show_epic(&args.date).await,
            QueryCommand::Photos(args) => self.show_photos(&args.query, args.page).await,
            QueryCommand::Videos(args) => self.show_videos(&args).await,
            QueryCommand::RandomPhoto(args) => self.show_random_photo(&args.query).await,
        }
    }

    async fn show_apod(&self, args: &ApodArgs) -> Result<()> {
        let start = args.date()?;

        if let Some(end) = args.end_date.as_deref() {
            let end = apod_date(end)?;
            let start = start.unwrap_or(end);
            if end < start {
                return Err(AppError::InvalidParameter(
                    "End date must not be before start date".to_string(),
                ));
            }
            let entries = with_spinner(
                "Fetching Astronomy Pictures of the Day...",
                self.client.get_apod_range(start, end),
            )
            .await?;
            println!("{}", display::apod_table(&entries));
            return Ok(());
        }

        let apod = with_spinner(
            "Fetching Astronomy Picture of the Day...",
            self.client.get_apod(start),
        )
        .await?;
        println!("{}", display::apod_view(&apod));
        Ok(())
    }

    /// Fetches consecutive pages into one de-duplicated list, stopping after
    /// `max_pages` or at the first short page.
    pub async fn load_mars_pages(
        &self,
        query: &MarsPhotoQuery,
        max_pages: u32,
    ) -> Result<PageAccumulator<MarsPhoto>> {
        let mut photos = PageAccumulator::new(query.per_page);
        while photos.pages_loaded() < max_pages {
            if !self.load_next_mars_page(query, &mut photos).await? {
                break;
            }
        }
        Ok(photos)
    }

    /// Loads the page after the last one in `photos`; false once there is none.
    pub(crate) async fn load_next_mars_page(
        &self,
        query: &MarsPhotoQuery,
        photos: &mut PageAccumulator<MarsPhoto>,
    ) -> Result<bool> {
        let Some(page) = photos.next_page() else {
            return Ok(false);
        };
        let query = query.clone().with_page(page, query.per_page);
        let response = with_spinner(
            &format!("Fetching {} photos, page {}...", query.rover, page),
            self.client.get_mars_photos(&query),
        )
        .await?;

        let added = photos.push_page(response.photos);
        info!("Mars page {} added {} new photos", page, added);
        Ok(true)
    }

    pub(crate) fn print_mars(&self, query: &MarsPhotoQuery, photos: &[MarsPhoto]) {
        if photos.is_empty() {
            println!(
                "{}",
                format!("No photos from {} on sol {}.", query.rover, query.sol).yellow()
            );
            return;
        }
        println!("{}", display::mars_table(photos));
        println!(
            "{}",
            format!("{} photos from {} on sol {}", photos.len(), query.rover, query.sol).green()
        );
    }

    async fn show_neo(&self, args: &NeoArgs) -> Result<()> {
        let (start, end) = args.range()?;
        let feed = with_spinner(
            "Fetching near-Earth objects...",
            self.client.get_neo_feed(start, end),
        )
        .await?;

        if args.summary {
            println!("{}", display::neo_summary_table(&service::neo_daily_summary(&feed)));
        } else {
            println!("{}", display::neo_table(&feed));
        }
        println!("{}", format!("{} objects", feed.element_count).green());
        Ok(())
    }

    async fn show_epic(&self, raw_date: &str) -> Result<()> {
        let date = service::parse_date(raw_date)?;
        let images = with_spinner("Fetching EPIC images...", self.client.get_epic_images(date))
            .await?;
        let images = service::epic_with_urls(images, date);

        if images.is_empty() {
            println!("{}", format!("No EPIC images for {date}.").yellow());
        } else {
            println!("{}", display::epic_table(&images));
        }
        Ok(())
    }

    async fn show_photos(&self, query: &str, page: u32) -> Result<()> {
        let page = positive(page, "page")?;
        let response = with_spinner(
            "Searching the NASA Image Library...",
            self.client.search_library(query, MediaType::Image, page, None),
        )
        .await?;
        let photos = service::library_photos(&response);

        println!("{}", display::photo_table(&photos.photos));
        println!(
            "{}",
            format!("Page {} of results for \"{}\" ({} hits)", page, query, photos.total_hits)
                .green()
        );
        Ok(())
    }

    async fn show_videos(&self, args: &VideosArgs) -> Result<()> {
        let page = positive(args.page, "page")?;
        let limit = positive(args.limit, "limit")?;
        let query = if args.query.trim().is_empty() {
            DEFAULT_VIDEO_QUERY
        } else {
            args.query.as_str()
        };

        let (videos, total) = with_spinner("Searching the NASA Video Library...", async {
            let response = self
                .client
                .search_library(query, MediaType::Video, page, Some(limit))
                .await?;
            let total = response.total_hits();
            let videos = service::resolve_videos(&self.client, response).await;
            Ok::<_, AppError>((videos, total))
        })
        .await?;

        println!("{}", display::video_table(&videos));
        println!("{}", format!("{total} videos match \"{query}\"").green());
        Ok(())
    }

    async fn show_random_photo(&self, query: &str) -> Result<()> {
        let response = with_spinner(
            "Picking a random photo...",
            self.client.search_library(query, MediaType::Image, 1, None),
        )
        .await?;
        let photos = service::library_photos(&response);

        match service::random_photo(&photos, &mut rand::thread_rng()) {
            Some(photo) => println!("{}", display::photo_view(&photo)),
            None => println!("{}", format!("No photos found for \"{query}\".").yellow()),
        }
        Ok(())
    }
}
