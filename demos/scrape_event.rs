use vlr_rounds::{flatten, RoundsClient};

#[tokio::main]
async fn main() {
    let event_name = std::env::args()
        .nth(1)
        .expect("usage: scrape_event <event-name>");

    let client = RoundsClient::new();
    let stats = client.scrape_event_by_name(&event_name).await.unwrap();

    let tables = flatten::flatten_event(&stats);
    serde_json::to_writer_pretty(std::io::stdout(), &tables).unwrap();
    println!();
}
