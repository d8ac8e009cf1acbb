//! Fallback ordering, labelling and the simulated floor.

use super::*;
use crate::chain::FailedAttempt;
use crate::config::{Config, Credentials};
use crate::direction::DIRECTIONS;
use crate::simulate;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// When the primary provider answers, nothing further down the chain is asked.
#[tokio::test]
async fn primary_success_short_circuits_chain() {
    let a = ScriptedProvider::succeeding("A");
    let b = ScriptedProvider::succeeding("B");
    let c = ScriptedProvider::succeeding("C");
    let clock = Arc::new(ManualClock::new(start_time()));
    let chain = chain_with(&[a.clone(), b.clone(), c.clone()], clock);

    let resolution = chain.resolve_detailed(&copacabana()).await;

    assert_eq!(resolution.observation.source, "A");
    assert!(resolution.failures.is_empty());
    assert_eq!(a.calls(), 1);
    assert_eq!(b.calls(), 0, "secondary must not be contacted");
    assert_eq!(c.calls(), 0, "tertiary must not be contacted");
}

/// The first two tiers failing hands the reading to the third.
#[tokio::test]
async fn third_provider_used_when_first_two_unavailable() {
    let a = ScriptedProvider::failing("A", Unavailable::Rejected(500));
    let b = ScriptedProvider::failing("B", Unavailable::Transport("connection reset".into()));
    let c = ScriptedProvider::succeeding("C");
    let clock = Arc::new(ManualClock::new(start_time()));
    let chain = chain_with(&[a.clone(), b.clone(), c.clone()], clock);

    let resolution = chain.resolve_detailed(&copacabana()).await;

    assert_eq!(resolution.observation.source, "C");
    assert_eq!(
        resolution.failures,
        vec![
            FailedAttempt {
                source: "A",
                reason: Unavailable::Rejected(500)
            },
            FailedAttempt {
                source: "B",
                reason: Unavailable::Transport("connection reset".into())
            },
        ]
    );
    assert_eq!((a.calls(), b.calls(), c.calls()), (1, 1, 1));
}

/// Only the first failure is skipped; the chain stops at the first success.
#[tokio::test]
async fn secondary_used_when_primary_unavailable() {
    let a = ScriptedProvider::failing("A", Unavailable::MissingCredential);
    let b = ScriptedProvider::succeeding("B");
    let c = ScriptedProvider::succeeding("C");
    let clock = Arc::new(ManualClock::new(start_time()));
    let chain = chain_with(&[a, b.clone(), c.clone()], clock);

    let obs = chain.resolve(&copacabana()).await;

    assert_eq!(obs.source, "B");
    assert_eq!(b.calls(), 1);
    assert_eq!(c.calls(), 0);
}

/// Total provider failure still yields a complete, plausible observation.
#[tokio::test]
async fn all_unavailable_falls_back_to_simulation() {
    let a = ScriptedProvider::failing("A", Unavailable::MissingCredential);
    let b = ScriptedProvider::failing("B", Unavailable::Rejected(401));
    let c = ScriptedProvider::failing("C", Unavailable::Malformed("empty hours".into()));
    let clock = Arc::new(ManualClock::new(start_time()));
    let chain = chain_with(&[a, b, c], clock);

    let resolution = chain.resolve_detailed(&copacabana()).await;
    let obs = &resolution.observation;

    assert_eq!(obs.source, "Simulated");
    assert_eq!(resolution.failures.len(), 3);
    assert!(obs.is_well_formed());
    assert!(obs.wave_direction.is_seaward());
    assert!(DIRECTIONS.contains(&obs.wind_direction));
    assert_eq!(obs.location, "Copacabana");
}

/// An empty chain degenerates to pure simulation rather than failing.
#[tokio::test]
async fn empty_chain_simulates() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let chain = chain_with(&[], clock);
    let obs = chain.resolve(&copacabana()).await;
    assert_eq!(obs.source, simulate::SOURCE);
}

/// Observations are stamped with the injected clock at resolution time.
#[tokio::test]
async fn observation_is_stamped_with_clock() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let chain = chain_with(&[ScriptedProvider::succeeding("A")], clock.clone());

    clock.advance(chrono::Duration::minutes(7));
    let obs = chain.resolve(&copacabana()).await;

    assert_eq!(obs.timestamp, start_time() + chrono::Duration::minutes(7));
}

/// Every observation, from any tier, is finite and uses valid labels.
#[tokio::test]
async fn resolved_observations_are_well_formed() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let chain = chain_with(&[ScriptedProvider::succeeding("A")], clock.clone());
    let simulated = chain_with(&[], clock);

    for obs in [
        chain.resolve(&copacabana()).await,
        simulated.resolve(&copacabana()).await,
    ] {
        assert!(obs.is_well_formed(), "{:?} has invalid numbers", obs);
        assert!(DIRECTIONS.contains(&obs.wave_direction));
        assert!(DIRECTIONS.contains(&obs.wind_direction));
    }
}

/// The production chain without credentials never touches the network.
#[tokio::test]
async fn production_chain_without_keys_simulates() {
    let mut config = Config::default();
    // Unroutable on purpose: a request here would surface as Transport, not MissingCredential.
    config.providers.openweather_base_url = "http://127.0.0.1:9".to_string();
    config.providers.stormglass_base_url = "http://127.0.0.1:9".to_string();
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(start_time()));

    let chain = FallbackChain::from_config(
        &config,
        &Credentials::default(),
        Arc::new(Simulator::seeded(5)),
        clock,
    )
    .unwrap();

    assert_eq!(
        chain.sources(),
        vec!["OpenWeatherMap Free", "OpenWeatherMap OneCall", "Stormglass"]
    );

    let resolution = chain.resolve_detailed(&copacabana()).await;
    assert_eq!(resolution.observation.source, simulate::SOURCE);
    assert!(resolution
        .failures
        .iter()
        .all(|f| f.reason == Unavailable::MissingCredential));
}

/// End to end over HTTP: both OpenWeatherMap endpoints fail, Stormglass answers.
#[tokio::test]
async fn production_chain_falls_through_to_stormglass() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"cod": 400})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/weather/point"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hours": [{
                "waveHeight": {"noaa": 1.1},
                "waveDirection": {"noaa": 180.0},
                "wavePeriod": {"noaa": 12.0},
                "waterTemperature": {"noaa": 22.0},
                "windSpeed": {"noaa": 2.0},
                "windDirection": {"noaa": 90.0}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.providers.openweather_base_url = server.uri();
    config.providers.stormglass_base_url = server.uri();
    let credentials = Credentials {
        openweather: Some("owm".to_string()),
        stormglass: Some("sg".to_string()),
    };
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(start_time()));
    let chain =
        FallbackChain::from_config(&config, &credentials, Arc::new(Simulator::seeded(5)), clock)
            .unwrap();

    let resolution = chain.resolve_detailed(&copacabana()).await;

    assert_eq!(resolution.observation.source, "Stormglass");
    assert_eq!(resolution.observation.wave_height_m, 1.1);
    assert_eq!(resolution.observation.wave_direction, Cardinal::Sul);
    assert_eq!(resolution.observation.wind_speed_kmh, 7.2);
    assert_eq!(resolution.observation.wind_direction, Cardinal::Leste);
    assert_eq!(resolution.failures[0].reason, Unavailable::Rejected(503));
    assert!(matches!(resolution.failures[1].reason, Unavailable::Malformed(_)));
}
