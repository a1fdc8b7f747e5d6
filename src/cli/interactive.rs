//! Menu-driven browsing of the NASA APIs.
//!
//! Each menu entry prompts for its parameters and then runs the same
//! `QueryCommand` the one-shot subcommands use.

use super::commands::{
    apod_date, ApodArgs, App, EpicArgs, NeoArgs, PhotosArgs, QueryCommand, RandomPhotoArgs,
    VideosArgs,
};
use crate::error::Result;
use crate::models::{MarsPhoto, MarsPhotoQuery, Rover};
use crate::service::{self, PageAccumulator, DEFAULT_PHOTO_QUERY, DEFAULT_VIDEO_QUERY};
use chrono::Duration;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, FuzzySelect, Input, Select};
use tracing::error;

const MENU: [&str; 8] = [
    "Astronomy Picture of the Day",
    "Mars Rover Photos",
    "Near-Earth Objects",
    "EPIC Earth Images",
    "NASA Image Library",
    "NASA Videos",
    "Random NASA Photo",
    "Exit",
];

pub fn prompt_date(prompt: &str, default: String) -> Result<String> {
    let date = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            service::parse_date(input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(date)
}

pub fn prompt_apod_date() -> Result<String> {
    let date = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Date (YYYY-MM-DD)")
        .default(service::today_utc().to_string())
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            apod_date(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(date)
}

pub fn prompt_query(default: &str) -> Result<String> {
    let query = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Search for")
        .default(default.to_string())
        .interact_text()?;
    Ok(query)
}

pub fn prompt_rover() -> Result<Rover> {
    let names: Vec<&str> = Rover::ALL.iter().map(Rover::as_str).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Rover")
        .items(&names)
        .default(0)
        .interact()?;
    Ok(Rover::ALL[index])
}

pub fn prompt_sol() -> Result<u32> {
    let sol = Input::<u32>::with_theme(&ColorfulTheme::default())
        .with_prompt("Sol")
        .default(1000)
        .interact_text()?;
    Ok(sol)
}

/// `None` means every camera.
pub fn prompt_camera(rover: Rover) -> Result<Option<String>> {
    let mut choices = vec!["all"];
    choices.extend_from_slice(rover.cameras());

    let index = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Camera")
        .items(&choices)
        .default(0)
        .interact()?;
    Ok((index > 0).then(|| choices[index].to_string()))
}

fn confirm(prompt: &str) -> Result<bool> {
    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(true)
        .interact()?;
    Ok(answer)
}

/// Shows pages of rover photos, offering the next page until the results run out.
async fn browse_mars(app: &App) -> Result<()> {
    let rover = prompt_rover()?;
    let sol = prompt_sol()?;
    let camera = prompt_camera(rover)?;
    let query = MarsPhotoQuery::new(rover, sol).with_camera(camera.as_deref());

    let mut photos: PageAccumulator<MarsPhoto> = PageAccumulator::new(query.per_page);
    loop {
        let shown = photos.len();
        if !app.load_next_mars_page(&query, &mut photos).await? {
            break;
        }
        app.print_mars(&query, &photos.items()[shown..]);
        if !photos.has_next_page() || !confirm("Load more?")? {
            break;
        }
    }
    if photos.len() > query.per_page as usize {
        println!(
            "{}",
            format!("{} photos loaded in {} pages", photos.len(), photos.pages_loaded()).green()
        );
    }
    Ok(())
}

/// Prompts for the parameters of a menu entry and runs it.
async fn run_selection(app: &App, selection: usize) -> Result<()> {
    let command = match selection {
        0 => QueryCommand::Apod(ApodArgs {
            date: Some(prompt_apod_date()?),
            end_date: None,
        }),
        1 => return browse_mars(app).await,
        2 => {
            let today = service::today_utc();
            let start = prompt_date("Start date (YYYY-MM-DD)", today.to_string())?;
            let default_end = service::parse_date(&start)
                .map(|d| d + Duration::days(service::NEO_MAX_RANGE_DAYS))
                .unwrap_or(today);
            let end = prompt_date("End date (YYYY-MM-DD)", default_end.to_string())?;
            QueryCommand::Neo(NeoArgs {
                start,
                end,
                summary: false,
            })
        },
        3 => {
            // EPIC images usually appear a day or two after capture
            let default = service::today_utc() - Duration::days(2);
            QueryCommand::Epic(EpicArgs {
                date: prompt_date("Date (YYYY-MM-DD)", default.to_string())?,
            })
        },
        4 => QueryCommand::Photos(PhotosArgs {
            query: prompt_query(DEFAULT_PHOTO_QUERY)?,
            page: 1,
        }),
        5 => QueryCommand::Videos(VideosArgs {
            query: prompt_query(DEFAULT_VIDEO_QUERY)?,
            page: 1,
            limit: 10,
        }),
        6 => QueryCommand::RandomPhoto(RandomPhotoArgs {
            query: prompt_query(DEFAULT_PHOTO_QUERY)?,
        }),
        _ => unreachable!(),
    };
    app.run_command(command).await
}

/// Main interactive loop; returns when the user picks Exit or cancels.
pub async fn run_interactive(app: &App) -> Result<()> {
    println!("{}", "Welcome to the NASA Explorer!".cyan().bold());

    loop {
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to explore?")
            .items(&MENU)
            .default(0)
            .interact_opt()?
            .unwrap_or(MENU.len() - 1);

        if selection == MENU.len() - 1 {
            println!("{}", "Goodbye!".green());
            break;
        }

        println!("\n---\n");
        if let Err(e) = run_selection(app, selection).await {
            error!("Command execution failed: {:?}", e);
            println!("{} {}", "Error:".red(), e.to_string().red());
        }
        println!("\n---\n");
    }

    Ok(())
}
