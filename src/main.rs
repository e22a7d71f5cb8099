use chrono::Local;
use tracing::info;

use nomaden::config::Config;
use nomaden::display::{print_schedule, print_weekly_report, write_poster_to_file};
use nomaden::form::export_archive_to_file;
use nomaden::parser::load_legacy_archive;
use nomaden::{logging, web, JsonFileStore, PubService};

fn usage() {
    println!("Usage: nomaden [web [port] | schedule | import <csv> | export <csv> | poster <file>]");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let mut config = Config::load()?;
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "web" {
        if let Some(port) = args.get(2).and_then(|p| p.parse::<u16>().ok()) {
            config.port = port;
        }
        if config.admin_password == nomaden::config::DEFAULT_ADMIN_PASSWORD {
            println!("Admin password is the default one, set ADMIN_PASSWORD!");
        }
        println!("Access the site at http://localhost:{}", config.port);

        web::start_server(config).await?;
        return Ok(());
    }

    let service = PubService::new(Box::new(JsonFileStore::new(&config.data_file)));

    match args.get(1).map(String::as_str) {
        // Weekly cron entry point
        Some("schedule") => {
            let report = service.run_weekly(Local::now().date_naive())?;
            print_weekly_report(&report);
        }
        Some("import") => {
            let Some(path) = args.get(2) else {
                usage();
                return Ok(());
            };
            let appointments = load_legacy_archive(path, Local::now().naive_local())?;
            let added = service.import_archive(appointments)?;
            println!("Imported {} archived pubs from {}", added, path);
        }
        Some("export") => {
            let Some(path) = args.get(2) else {
                usage();
                return Ok(());
            };
            let snapshot = service.snapshot()?;
            let archive: Vec<_> = snapshot.archive_by_date().into_iter().map(|a| a.anonymized()).collect();
            export_archive_to_file(&archive.iter().collect::<Vec<_>>(), std::path::Path::new(path))?;
            println!("Exported {} archived pubs to {}", archive.len(), path);
        }
        Some("poster") => {
            let filename = args.get(2).map(String::as_str).unwrap_or("poster.txt");
            write_poster_to_file(&service.poster()?, filename)?;
            println!("Poster saved to {}", filename);
        }
        None => {
            info!(data = %config.data_file.display(), "showing schedule");
            print_schedule(&service.snapshot()?);
        }
        Some(_) => usage(),
    }

    Ok(())
}
