use serde::Deserialize;

/// Fields of a movie about to be inserted. Rating, review and ranking start unset.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub description: String,
    pub img_url: Option<String>,
}

/// Partial update; `None` leaves the stored column untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovieUpdate {
    pub rating: Option<f64>,
    pub review: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Raw edit submission. Rating stays text so bad input re-renders the form
/// instead of being rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// One entry of a metadata search, shown on the selection page.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CandidateSummary {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct CandidateDetail {
    pub original_title: Option<String>,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub belongs_to_collection: Option<Collection>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Collection {
    pub poster_path: Option<String>,
}
