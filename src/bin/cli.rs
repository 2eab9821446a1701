use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    travel_itinerary::cli::run().await
}
