use crate::domain::model::{
    CompanyDetails, CompanyListing, CompanyReviewsData, FavoriteCompany, RatingLevel, Review,
    SearchOutcome,
};
use chrono::{DateTime, Utc};
use std::fmt::Write;

const MAX_STARS: usize = 5;

/// Five-slot star bar: whole stars for the integer part, a half star when the
/// fraction is at least .5, empty stars for the rest.
pub fn star_bar(rating: f64) -> String {
    let rating = if rating.is_finite() {
        rating.clamp(0.0, MAX_STARS as f64)
    } else {
        0.0
    };
    let full = rating.floor() as usize;
    let half = usize::from(full < MAX_STARS && rating.fract() >= 0.5);

    let mut bar = "★".repeat(full);
    if half == 1 {
        bar.push('½');
    }
    bar.push_str(&"☆".repeat(MAX_STARS - full - half));
    bar
}

/// 1234567 -> "1,234,567"
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_review_date(raw: &str) -> String {
    match raw.parse::<DateTime<Utc>>() {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn rating_summary(rating: f64, review_count: u64, trust_score: f64) -> String {
    format!(
        "{} {:.1} · {} reviews · trust {:.1} [{}]",
        star_bar(rating),
        rating,
        group_thousands(review_count),
        trust_score,
        RatingLevel::from_rating(rating).label()
    )
}

pub fn render_listing(listing: &CompanyListing) -> String {
    let company = &listing.company;
    format!(
        "{} {} ({})  {}",
        if listing.is_favorite { "♥" } else { " " },
        company.name,
        company.domain,
        rating_summary(company.rating, company.review_count, company.trust_score)
    )
}

pub fn render_search(query: &str, outcome: &SearchOutcome) -> String {
    if query.trim().is_empty() {
        return "Enter a company name to search for reviews and ratings".to_string();
    }
    if outcome.listings.is_empty() {
        return format!("No results for \"{}\"", query.trim());
    }

    let mut out = format!(
        "{} companies found\n",
        group_thousands(outcome.total_companies)
    );
    for listing in &outcome.listings {
        out.push_str(&render_listing(listing));
        out.push('\n');
    }
    out
}

pub fn render_review(review: &Review) -> String {
    let mut out = String::new();
    let verified = if review.consumer_is_verified {
        " ✓"
    } else {
        ""
    };
    let _ = writeln!(
        out,
        "{} {}{} · {} · {}",
        star_bar(f64::from(review.review_rating)),
        review.consumer_name,
        verified,
        review.consumer_country,
        format_review_date(&review.review_time)
    );
    if !review.review_title.is_empty() {
        let _ = writeln!(out, "  {}", review.review_title);
    }
    let _ = writeln!(out, "  {}", review.review_text);
    if let Some(reply) = review.reply_text.as_deref().filter(|r| !r.is_empty()) {
        let _ = writeln!(out, "  ↳ Reply: {}", reply);
    }
    out
}

pub fn render_details(details: &CompanyDetails) -> String {
    let company = &details.company;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}{} ({})",
        company.name,
        if details.is_favorite { " ♥" } else { "" },
        company.domain
    );
    let _ = writeln!(
        out,
        "{}",
        rating_summary(company.rating, company.review_count, company.trust_score)
    );
    if !company.website.is_empty() {
        let _ = writeln!(out, "Website: {}", company.website);
    }
    if !company.categories.is_empty() {
        let names: Vec<&str> = company.categories.iter().map(|c| c.name.as_str()).collect();
        let _ = writeln!(out, "Categories: {}", names.join(", "));
    }
    let location: Vec<&str> = [&company.address, &company.city, &company.country]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .filter(|field| !field.is_empty())
        .collect();
    if !location.is_empty() {
        let _ = writeln!(out, "Location: {}", location.join(", "));
    }
    for (label, value) in [("Phone", &company.phone), ("Email", &company.email)] {
        if let Some(value) = value {
            let _ = writeln!(out, "{}: {}", label, value);
        }
    }

    let _ = writeln!(
        out,
        "\nReviews ({} total)",
        group_thousands(details.total_reviews)
    );
    for review in &details.reviews {
        out.push_str(&render_review(review));
    }
    out
}

pub fn render_reviews(domain: &str, page: u32, data: &CompanyReviewsData) -> String {
    let mut out = format!(
        "{} · page {} · {} reviews total\n",
        domain,
        page,
        group_thousands(data.total_reviews)
    );
    if data.reviews.is_empty() {
        out.push_str("No reviews on this page\n");
    }
    for review in &data.reviews {
        out.push_str(&render_review(review));
    }
    out
}

pub fn render_favorites(favorites: &[FavoriteCompany]) -> String {
    if favorites.is_empty() {
        return "No favorites yet".to_string();
    }

    let mut out = String::new();
    for favorite in favorites {
        let _ = writeln!(
            out,
            "♥ {} ({}) id={}  {}  added {}",
            favorite.name,
            favorite.domain,
            favorite.company_id,
            rating_summary(favorite.rating, favorite.review_count, favorite.trust_score),
            favorite.date_added.format("%Y-%m-%d")
        );
    }
    out
}
