use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::utils::error::{FinderError, Result};

/// Status value the review API uses for a successful call.
pub const API_STATUS_OK: &str = "OK";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyCategory {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub company_id: String,
    pub name: String,
    pub domain: String,
    #[serde(default)]
    pub review_count: u64,
    #[serde(default)]
    pub trust_score: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub categories: Vec<CompanyCategory>,
    #[serde(default)]
    pub website: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// 收藏清單中保存的公司摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteCompany {
    pub company_id: String,
    pub name: String,
    pub domain: String,
    pub rating: f64,
    pub review_count: u64,
    pub trust_score: f64,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub categories: Vec<CompanyCategory>,
    #[serde(rename = "dateAdded")]
    pub date_added: DateTime<Utc>,
}

impl FavoriteCompany {
    pub fn from_company(company: &Company, date_added: DateTime<Utc>) -> Self {
        Self {
            company_id: company.company_id.clone(),
            name: company.name.clone(),
            domain: company.domain.clone(),
            rating: company.rating,
            review_count: company.review_count,
            trust_score: company.trust_score,
            website: company.website.clone(),
            categories: company.categories.clone(),
            date_added,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: String,
    #[serde(default)]
    pub review_title: String,
    #[serde(default)]
    pub review_text: String,
    #[serde(default)]
    pub review_rating: u8,
    #[serde(default)]
    pub review_is_verified: bool,
    #[serde(default)]
    pub review_is_pending: bool,
    #[serde(default)]
    pub review_likes: u64,
    #[serde(default)]
    pub review_language: String,
    #[serde(default)]
    pub review_time: String,
    #[serde(default)]
    pub review_experienced_time: String,
    pub reply_text: Option<String>,
    #[serde(default)]
    pub consumer_id: String,
    #[serde(default)]
    pub consumer_name: String,
    pub consumer_image: Option<String>,
    #[serde(default)]
    pub consumer_review_count: u64,
    #[serde(default)]
    pub consumer_country: String,
    #[serde(default)]
    pub consumer_is_verified: bool,
    #[serde(default)]
    pub consumer_review_count_same_domain: u64,
}

/// Top-level envelope shared by every endpoint of the review API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub parameters: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: T,
}

// 錯誤回應常帶 "data": null
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl<T> ApiResponse<T> {
    pub fn is_ok(&self) -> bool {
        self.status == API_STATUS_OK
    }

    /// Unwraps the payload, turning a non-"OK" status into an error even
    /// though the HTTP exchange itself succeeded.
    pub fn into_data(self) -> Result<T> {
        if self.is_ok() {
            Ok(self.data)
        } else {
            Err(FinderError::UnexpectedApiStatus {
                status: self.status,
            })
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanySearchData {
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub total_companies: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingDistribution {
    #[serde(rename = "1", default)]
    pub one: u64,
    #[serde(rename = "2", default)]
    pub two: u64,
    #[serde(rename = "3", default)]
    pub three: u64,
    #[serde(rename = "4", default)]
    pub four: u64,
    #[serde(rename = "5", default)]
    pub five: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyReviewsData {
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub total_reviews: u64,
    #[serde(default)]
    pub rating_distribution: RatingDistribution,
    #[serde(default)]
    pub review_language_distribution: BTreeMap<String, u64>,
}

pub type CompanySearchResponse = ApiResponse<CompanySearchData>;
pub type CompanyReviewsResponse = ApiResponse<CompanyReviewsData>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RatingLevel {
    Terrible = 1,
    Poor = 2,
    Average = 3,
    Good = 4,
    Excellent = 5,
}

impl RatingLevel {
    pub fn from_rating(rating: f64) -> Self {
        let rounded = if rating.is_finite() {
            rating.round().clamp(1.0, 5.0) as u8
        } else {
            1
        };
        match rounded {
            5 => RatingLevel::Excellent,
            4 => RatingLevel::Good,
            3 => RatingLevel::Average,
            2 => RatingLevel::Poor,
            _ => RatingLevel::Terrible,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingLevel::Excellent => "Excellent",
            RatingLevel::Good => "Good",
            RatingLevel::Average => "Average",
            RatingLevel::Poor => "Poor",
            RatingLevel::Terrible => "Terrible",
        }
    }
}

/// A search hit with its favorite status merged in.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyListing {
    pub company: Company,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub listings: Vec<CompanyListing>,
    pub total_companies: u64,
}

#[derive(Debug, Clone)]
pub struct CompanyDetails {
    pub company: Company,
    pub reviews: Vec<Review>,
    pub total_reviews: u64,
    pub is_favorite: bool,
}
