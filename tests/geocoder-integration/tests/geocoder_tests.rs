use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use axum::http::StatusCode;

use locmap_common::config::{DEFAULT_DESTINATION, DEFAULT_ORIGIN};
use locmap_common::geocode::{GeocodeError, Geocoder};
use locmap_common::location::Coordinate;
use locmap_common::session::{Endpoint, LocationStore, Notice};
use locmap_common::workflow::search_place;
use locmap_geocoder_integration::harness::{unreachable_endpoint, MockSearchServer, Reply, SeenRequest};
use locmap_geocoder_integration::{init_test_logging, HttpGeocoder};

const BHOPAL: &str = r#"[{"place_id": 1, "lat": "23.2599", "lon": "77.4126", "display_name": "Bhopal, Madhya Pradesh, India"}]"#;

async fn setup() -> (MockSearchServer, HttpGeocoder) {
    init_test_logging();
    let server = MockSearchServer::start().await;
    let geocoder = HttpGeocoder::new(server.endpoint()).expect("client builds");
    (server, geocoder)
}

#[tokio::test]
async fn resolves_first_candidate() {
    let (server, geocoder) = setup().await;
    server.reply(
        "Bhopal",
        Reply::json(r#"[{"lat": "23.2599", "lon": "77.4126"}, {"lat": "0", "lon": "0"}]"#),
    );

    let coordinate = geocoder.resolve("Bhopal").await;
    assert_eq!(coordinate, Ok(Coordinate::new(23.2599, 77.4126)));
}

#[tokio::test]
async fn empty_candidate_list_is_not_found() {
    let (_server, geocoder) = setup().await;
    assert_eq!(geocoder.resolve("Atlantis").await, Err(GeocodeError::NotFound));
}

#[tokio::test]
async fn server_error_is_network_error() {
    let (server, geocoder) = setup().await;
    server.reply("Bhopal", Reply::status(StatusCode::SERVICE_UNAVAILABLE, BHOPAL));
    assert_eq!(
        geocoder.resolve("Bhopal").await,
        Err(GeocodeError::Network("HTTP 503".into()))
    );
}

#[tokio::test]
async fn malformed_body_is_network_error() {
    let (server, geocoder) = setup().await;
    server.reply("Bhopal", Reply::json("<html>Too many requests</html>"));
    assert!(matches!(
        geocoder.resolve("Bhopal").await,
        Err(GeocodeError::Network(_))
    ));
}

#[tokio::test]
async fn unreachable_service_is_network_error() {
    init_test_logging();
    let geocoder = HttpGeocoder::new(unreachable_endpoint().await).expect("client builds");
    assert!(matches!(
        geocoder.resolve("Bhopal").await,
        Err(GeocodeError::Network(_))
    ));
}

#[tokio::test]
async fn place_name_is_sent_as_typed() {
    let (server, geocoder) = setup().await;
    let _ = geocoder.resolve("New Delhi, India").await;
    let _ = geocoder.resolve("  ").await;
    let _ = geocoder.resolve("").await;

    let json = Some("json".to_string());
    assert_eq!(
        server.seen(),
        vec![
            SeenRequest { format: json.clone(), q: Some("New Delhi, India".into()) },
            SeenRequest { format: json.clone(), q: Some("  ".into()) },
            SeenRequest { format: json, q: Some("".into()) },
        ]
    );
}

#[tokio::test]
async fn origin_search_updates_store() {
    let (server, geocoder) = setup().await;
    server.reply("Bhopal", Reply::json(BHOPAL));
    let mut store = Rc::new(RefCell::new(LocationStore::default()));

    let notice = search_place(&geocoder, &mut store, Endpoint::Origin, "Bhopal").await;
    assert_eq!(notice, None);

    let bhopal = Coordinate::new(23.2599, 77.4126);
    let s = store.borrow();
    assert_eq!(s.origin(), bhopal);
    assert_eq!(s.distance_km(), Some(bhopal.distance_km(&DEFAULT_DESTINATION)));
}

#[tokio::test]
async fn failed_destination_search_leaves_store_alone() {
    let (server, geocoder) = setup().await;
    server.reply("Indore", Reply::status(StatusCode::INTERNAL_SERVER_ERROR, ""));
    let mut store = Rc::new(RefCell::new(LocationStore::default()));

    let notice = search_place(&geocoder, &mut store, Endpoint::Destination, "Nowhere").await;
    assert_eq!(notice, Some(Notice::NotFound));
    let notice = search_place(&geocoder, &mut store, Endpoint::Destination, "Indore").await;
    assert_eq!(notice, Some(Notice::LookupFailed));

    let s = store.borrow();
    assert_eq!(s.origin(), DEFAULT_ORIGIN);
    assert_eq!(s.destination(), DEFAULT_DESTINATION);
    assert_eq!(s.distance_km(), None);
}

/// Two destination searches in flight: the older one answers last and its
/// result is what the store keeps.
#[tokio::test]
async fn slower_older_search_wins() {
    let (server, geocoder) = setup().await;
    server.reply(
        "Pune",
        Reply::json(r#"[{"lat": "18.5204", "lon": "73.8567"}]"#).delayed(Duration::from_millis(300)),
    );
    server.reply("Goa", Reply::json(r#"[{"lat": "15.2993", "lon": "74.1240"}]"#));

    let store = Rc::new(RefCell::new(LocationStore::default()));
    let mut first = store.clone();
    let mut second = store.clone();

    let (a, b) = tokio::join!(
        search_place(&geocoder, &mut first, Endpoint::Destination, "Pune"),
        search_place(&geocoder, &mut second, Endpoint::Destination, "Goa"),
    );
    assert_eq!((a, b), (None, None));

    let s = store.borrow();
    let pune = Coordinate::new(18.5204, 73.8567);
    assert_eq!(s.destination(), pune);
    assert_eq!(s.distance_km(), Some(s.origin().distance_km(&pune)));
    assert_eq!(s.stale_applied(), 1);
}
