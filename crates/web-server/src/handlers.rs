use crate::{AppState, error::AppError};
use axum::{
    Form, Json,
    extract::State,
    response::Html,
};
use chrono::NaiveDate;
use comparison::ComparisonRequest;
use core_types::ComparisonResult;
use std::sync::Arc;

const INDEX_TEMPLATE: &str = include_str!("../assets/index.html");

/// # GET /
/// The comparison form. It posts to `/api/compare` and plots the returned
/// normalized series in the browser.
pub async fn index() -> Html<String> {
    Html(render_index(chrono::Local::now().date_naive()))
}

/// Fills the form page, with `today` as the default end date.
pub fn render_index(today: NaiveDate) -> String {
    INDEX_TEMPLATE.replace("{{current_date}}", &today.to_string())
}

/// # GET /api/health
pub async fn health() -> &'static str {
    "OK"
}

/// # POST /api/compare
/// Takes the form fields `tickers`, `start_date` and `end_date` and returns
/// the normalized curves plus summary statistics. Bad tickers never fail the
/// request; unparseable dates are a 400.
pub async fn compare(
    State(state): State<Arc<AppState>>,
    Form(request): Form<ComparisonRequest>,
) -> Result<Json<ComparisonResult>, AppError> {
    tracing::info!(
        tickers = %request.tickers,
        start_date = %request.start_date,
        end_date = %request.end_date,
        "Comparison requested."
    );
    let result = state.comparator.compare_request(&request).await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_defaults_the_end_date() {
        let page = render_index(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());

        assert!(page.contains(r#"name="end_date" value="2024-06-30""#));
        assert!(!page.contains("{{current_date}}"));
        assert!(page.contains(r#"action="/api/compare""#));
    }
}
