//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::domain::{NetworkCode, Station};
use crate::stations::{
    StationError, StationSource, fetch_station_for_network, fetch_stations_for_network,
    network_counts,
};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/networks", get(list_networks))
        .route("/networks/:network/stations", get(network_stations))
        .route("/networks/:network/stations/:station", get(station_page))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// List networks with station counts.
async fn list_networks(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let stations = state.stations.fetch_all().await?;
    let response = NetworksResponse::from_counts(network_counts(&stations));

    if accepts_html(&headers) {
        let template = NetworksTemplate {
            networks: response.networks,
        };
        return render(StatusCode::OK, &template);
    }

    Ok(Json(response).into_response())
}

/// List the stations of one network.
async fn network_stations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(network): Path<String>,
) -> Result<Response, AppError> {
    let stations = fetch_stations_for_network(state.stations.as_ref(), &network).await?;
    let network = NetworkCode::normalized(&network).to_string();

    if accepts_html(&headers) {
        let template = NetworkStationsTemplate {
            network,
            stations: stations.iter().map(StationListItem::from_station).collect(),
        };
        return render(StatusCode::OK, &template);
    }

    Ok(Json(NetworkStationsResponse { network, stations }).into_response())
}

/// Load a station page.
///
/// JSON clients always get `{params, station}` with a 200, `station` being
/// `null` when nothing matched. Browsers get a rendered page, or a 404 page.
async fn station_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(params): Path<StationParams>,
) -> Result<Response, AppError> {
    let station =
        fetch_station_for_network(state.stations.as_ref(), &params.network, &params.station)
            .await?;

    if accepts_html(&headers) {
        return render_station_page(&params, station.as_ref());
    }

    Ok(Json(StationPageResponse { params, station }).into_response())
}

fn render_station_page(
    params: &StationParams,
    station: Option<&Station>,
) -> Result<Response, AppError> {
    match station {
        Some(station) => {
            let template = StationTemplate {
                network: params.network.clone(),
                station_id: params.station.clone(),
                station: StationView::from_station(station),
            };
            render(StatusCode::OK, &template)
        }
        None => {
            let template = StationNotFoundTemplate {
                network: params.network.clone(),
                station_id: params.station.clone(),
            };
            render(StatusCode::NOT_FOUND, &template)
        }
    }
}

fn render(status: StatusCode, template: &impl Template) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;

    Ok((status, Html(html)).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// The station feed failed
    BadGateway { message: String },
    Internal { message: String },
}

impl From<StationError> for AppError {
    fn from(e: StationError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{named, station};
    use crate::stations::Stations;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use futures::future::BoxFuture;
    use tower::ServiceExt;

    /// Source serving a fixed list, or failing.
    struct FixedSource(Option<Stations>);

    impl StationSource for FixedSource {
        fn fetch_all(&self) -> BoxFuture<'_, Result<Stations, StationError>> {
            let result = self.0.clone().ok_or(StationError::Unauthorized);
            Box::pin(async move { result })
        }
    }

    fn app(stations: Option<Vec<Station>>) -> Router {
        create_router(
            AppState::new(FixedSource(stations.map(Stations::from))),
            "static",
        )
    }

    fn sample() -> Option<Vec<Station>> {
        Some(vec![
            named("first", "NYC", &["123"]),
            named("second", "NYC", &["456"]),
            named("elsewhere", "EVGO", &["456"]),
            station(None, Some(&["999"])),
        ])
    }

    async fn get(app: Router, uri: &str, accept: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::ACCEPT, accept)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = get(app, uri, "application/json").await;
        (status, serde_json::from_str(&body).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = get(app(sample()), "/health", "*/*").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn station_page_json_returns_match_and_params() {
        let (status, json) = get_json(app(sample()), "/networks/nyc/stations/456").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["params"]["network"], "nyc");
        assert_eq!(json["params"]["station"], "456");
        assert_eq!(json["station"]["properties"]["name"][0]["value"], "second");
        assert_eq!(json["station"]["properties"]["network"], "NYC");
    }

    #[tokio::test]
    async fn station_page_json_not_found_is_null() {
        let (status, json) = get_json(app(sample()), "/networks/nyc/stations/789").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["station"].is_null());
        assert_eq!(json["params"]["station"], "789");
    }

    #[tokio::test]
    async fn station_page_html_renders_match() {
        let (status, body) = get(app(sample()), "/networks/NYC/stations/123", "text/html").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("first"));
    }

    #[tokio::test]
    async fn station_page_html_not_found_is_404() {
        let (status, body) =
            get(app(sample()), "/networks/sfo/stations/123", "text/html,*/*").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Station not found"));
    }

    #[tokio::test]
    async fn feed_failure_is_bad_gateway() {
        let (status, json) = get_json(app(None), "/networks/nyc/stations/456").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(json["error"].as_str().unwrap().contains("unauthorized"));
    }

    #[tokio::test]
    async fn network_stations_lists_members() {
        let (status, json) = get_json(app(sample()), "/networks/Nyc/stations").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["network"], "NYC");
        let names: Vec<_> = json["stations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["properties"]["name"][0]["value"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn networks_are_counted_and_sorted() {
        let (status, json) = get_json(app(sample()), "/networks").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["networks"],
            serde_json::json!([
                {"network": "EVGO", "station_count": 1},
                {"network": "NYC", "station_count": 2},
            ])
        );
    }

    #[tokio::test]
    async fn network_stations_html_links_each_station() {
        let (status, body) = get(app(sample()), "/networks/nyc/stations", "text/html").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("NYC stations"));
        assert!(body.contains(">first</a>"));
        assert!(body.contains(">second</a>"));
        assert!(!body.contains("elsewhere"));
    }

    #[tokio::test]
    async fn networks_html_lists_codes() {
        let (status, body) = get(app(sample()), "/networks", "text/html").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Charging networks"));
        assert!(body.contains(">EVGO</a> (1)"));
        assert!(body.contains(">NYC</a> (2)"));
    }

    #[tokio::test]
    async fn listing_html_feed_failure_is_bad_gateway() {
        let (status, _) = get(app(None), "/networks", "text/html").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn accepts_html_checks_header() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_html(&headers));

        headers.insert(header::ACCEPT, "application/json".parse().unwrap());
        assert!(!accepts_html(&headers));

        headers.insert(header::ACCEPT, "text/html,application/xhtml+xml".parse().unwrap());
        assert!(accepts_html(&headers));
    }
}
