use serde::Serialize;

use crate::services::clicks::HISTOGRAM_DAYS;

/// Response body for `POST /api/getLinkData`.
#[derive(Serialize)]
pub struct LinkDataResponse {
    #[serde(rename = "LongURL")]
    pub long_url: String,
    /// Bucket `i` holds the clicks from exactly `i` days ago.
    #[serde(rename = "NumClicks")]
    pub num_clicks: [u32; HISTOGRAM_DAYS],
}
