fn main() {
    if let Err(err) = charging_events_ingest::app::run() {
        eprintln!("ingestion bootstrap failed: {err}");
        std::process::exit(1);
    }
}
