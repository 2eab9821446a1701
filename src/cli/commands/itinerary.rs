use std::path::Path;

use tabled::{Table, Tabled};

use crate::cli::api_client::ApiClient;
use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, format_minutes, format_price, truncate_with_ellipsis};
use crate::db::{CreatedItinerary, Id, ItineraryDay, ItineraryDetail, ItinerarySummary, NewItinerary};

#[derive(Tabled)]
pub(crate) struct ItinerarySummaryDisplay {
    #[tabled(rename = "ID")]
    pub(crate) id: Id,
    #[tabled(rename = "Name")]
    pub(crate) name: String,
    #[tabled(rename = "Region")]
    pub(crate) region: String,
    #[tabled(rename = "Nights")]
    pub(crate) nights: i64,
    #[tabled(rename = "Recommended")]
    pub(crate) recommended: String,
}

impl From<&ItinerarySummary> for ItinerarySummaryDisplay {
    fn from(s: &ItinerarySummary) -> Self {
        Self {
            id: s.id,
            name: truncate_with_ellipsis(&s.name, 40),
            region: s.region.clone(),
            nights: s.duration_nights,
            recommended: if s.is_recommended { "yes" } else { "no" }.to_string(),
        }
    }
}

#[derive(Tabled)]
pub(crate) struct ItineraryDayDisplay {
    #[tabled(rename = "Day")]
    pub(crate) day: i64,
    #[tabled(rename = "Transfer")]
    pub(crate) transfer: String,
    #[tabled(rename = "Hotel")]
    pub(crate) hotel: String,
    #[tabled(rename = "Activities")]
    pub(crate) activities: String,
}

impl From<&ItineraryDay> for ItineraryDayDisplay {
    fn from(d: &ItineraryDay) -> Self {
        let transfer = d
            .transfer
            .as_ref()
            .map(|t| format!("{} ({})", t.transfer_type, format_minutes(t.duration_minutes)))
            .unwrap_or_else(|| "-".to_string());

        let hotel = d
            .hotel_stay
            .as_ref()
            .map(|s| format!("{} ({}/night)", s.hotel.name, format_price(s.hotel.price_per_night)))
            .unwrap_or_else(|| "-".to_string());

        let activities = if d.activities.is_empty() {
            "-".to_string()
        } else {
            d.activities
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            day: d.day_number,
            transfer,
            hotel,
            activities,
        }
    }
}

/// Filter parameters for listing itineraries
#[derive(Debug, Default)]
pub struct ListItinerariesFilter<'a> {
    pub region: Option<&'a str>,
    pub min_nights: Option<i64>,
    pub max_nights: Option<i64>,
    pub recommended: Option<bool>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

/// List itineraries with optional filtering
pub async fn list_itineraries(
    api_client: &ApiClient,
    filter: ListItinerariesFilter<'_>,
    format: &str,
) -> CliResult<String> {
    let mut request = api_client.get("/itineraries");

    if let Some(r) = filter.region {
        request = request.query(&[("region", r)]);
    }
    if let Some(n) = filter.min_nights {
        request = request.query(&[("min_nights", n.to_string())]);
    }
    if let Some(n) = filter.max_nights {
        request = request.query(&[("max_nights", n.to_string())]);
    }
    if let Some(r) = filter.recommended {
        request = request.query(&[("recommended", r.to_string())]);
    }
    if let Some(s) = filter.skip {
        request = request.query(&[("skip", s.to_string())]);
    }
    if let Some(l) = filter.limit {
        request = request.query(&[("limit", l.to_string())]);
    }

    let response = request.send().await?;
    let itineraries: Vec<ItinerarySummary> = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&itineraries)?),
        _ => Ok(format_table(&itineraries)),
    }
}

/// Show one itinerary day by day
pub async fn show_itinerary(api_client: &ApiClient, id: Id, format: &str) -> CliResult<String> {
    let response = api_client
        .get(&format!("/itineraries/{}", id))
        .send()
        .await?;
    let itinerary: ItineraryDetail = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&itinerary)?),
        _ => Ok(format_detail(&itinerary)),
    }
}

/// Create an itinerary from a JSON payload file
pub async fn create_itinerary(
    api_client: &ApiClient,
    file: &Path,
    format: &str,
) -> CliResult<String> {
    let raw = std::fs::read_to_string(file).map_err(|source| CliError::ReadFile {
        path: file.to_path_buf(),
        source,
    })?;

    // Parse locally first so a typo is reported against the file, not the server
    let payload: NewItinerary =
        serde_json::from_str(&raw).map_err(|e| CliError::InvalidPayload {
            path: file.to_path_buf(),
            message: e.to_string(),
        })?;

    let response = api_client.post("/itineraries").json(&payload).send().await?;
    let created: CreatedItinerary = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&created)?),
        _ => Ok(format_created(&created)),
    }
}

pub(crate) fn format_table(itineraries: &[ItinerarySummary]) -> String {
    if itineraries.is_empty() {
        return "No itineraries found.".to_string();
    }

    let rows: Vec<ItinerarySummaryDisplay> = itineraries.iter().map(|i| i.into()).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}

pub(crate) fn format_detail(itinerary: &ItineraryDetail) -> String {
    let summary = &itinerary.summary;
    let mut output = format!(
        "{} (#{})\nRegion: {}\nNights: {}\nRecommended: {}\n",
        summary.name,
        summary.id,
        summary.region,
        summary.duration_nights,
        if summary.is_recommended { "yes" } else { "no" },
    );
    if let Some(description) = &summary.description {
        output.push_str(&format!("{}\n", description));
    }
    output.push('\n');

    if itinerary.days.is_empty() {
        output.push_str("No days planned.");
        return output;
    }

    let rows: Vec<ItineraryDayDisplay> = itinerary.days.iter().map(|d| d.into()).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    output.push_str(&table.to_string());
    output
}

pub(crate) fn format_created(created: &CreatedItinerary) -> String {
    let summary = &created.itinerary.summary;
    let mut output = format!(
        "Created itinerary {}: {} ({} days)",
        summary.id,
        summary.name,
        created.itinerary.days.len()
    );
    if !created.ignored_activity_ids.is_empty() {
        let ids: Vec<String> = created
            .ignored_activity_ids
            .iter()
            .map(|id| id.to_string())
            .collect();
        output.push_str(&format!("\nIgnored unknown activity ids: {}", ids.join(", ")));
    }
    output
}
