//! Subcommand implementations

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use application::{
    BatchGeocodeService, PositionFilter, TrackingService, normalize_street_name,
    parse_address_detailed,
};
use infrastructure::{
    AppConfig, GeocodingAppConfig, JsonLinesLocationSource, ProviderKind, build_geocode_service,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::output::{
    parse_batch_line, render_batch, render_parsed, render_position, render_result,
};

type Input = Box<dyn AsyncBufRead + Unpin + Send>;

/// Open a file, or stdin when no path is given
async fn open_input(path: Option<&Path>) -> anyhow::Result<Input> {
    match path {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Cannot open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        },
        None => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
    }
}

fn geocoding_config(
    config: &AppConfig,
    providers: &[ProviderKind],
) -> anyhow::Result<GeocodingAppConfig> {
    let mut geocoding = config.geocoding.clone();
    if !providers.is_empty() {
        geocoding.providers = providers.to_vec();
    }
    geocoding
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid provider selection: {e}"))?;
    Ok(geocoding)
}

pub fn parse(address: &str, json: bool) -> anyhow::Result<()> {
    let (parsed, method) = parse_address_detailed(address);
    if json {
        let value = serde_json::json!({
            "street": parsed.street,
            "house_number": parsed.house_number,
            "locality": parsed.locality,
            "method": method.as_str(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", render_parsed(&parsed, method));
    }
    Ok(())
}

pub fn normalize(street: &str) {
    println!("{}", normalize_street_name(street));
}

pub async fn geocode(
    config: &AppConfig,
    address: &str,
    providers: &[ProviderKind],
    json: bool,
) -> anyhow::Result<()> {
    let parsed = application::parse_address(address);
    let service = build_geocode_service(&geocoding_config(config, providers)?)?;

    let Some(result) = service
        .resolve(&parsed.street, &parsed.house_number, &parsed.locality)
        .await
    else {
        bail!("No coordinates found for {address:?}");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render_result(&result));
    }
    Ok(())
}

pub async fn batch(
    config: &AppConfig,
    input: Option<&Path>,
    providers: &[ProviderKind],
    json: bool,
) -> anyhow::Result<()> {
    let service = Arc::new(build_geocode_service(&geocoding_config(config, providers)?)?);

    let mut lines = open_input(input).await?.lines();
    let mut rows = Vec::new();
    while let Some(line) = lines.next_line().await.context("Cannot read address list")? {
        rows.extend(parse_batch_line(&line));
    }
    info!(rows = rows.len(), "Address list read");

    let report = BatchGeocodeService::new(service).resolve_all(rows).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_batch(&report));
    }
    Ok(())
}

pub async fn track(
    config: &AppConfig,
    input: Option<&Path>,
    max_accuracy: Option<f64>,
    max_jump: Option<f64>,
    json: bool,
) -> anyhow::Result<()> {
    let mut filter_config = config.tracking.clone();
    if let Some(max_accuracy) = max_accuracy {
        filter_config.max_accuracy_m = max_accuracy;
    }
    if let Some(max_jump) = max_jump {
        filter_config.max_jump_m = max_jump;
    }
    filter_config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid filter settings: {e}"))?;

    let source = JsonLinesLocationSource::new(open_input(input).await?);
    let mut tracking = TrackingService::new(Box::new(source), PositionFilter::new(filter_config));

    loop {
        match tracking.next_position().await {
            Ok(Some(position)) if json => println!("{}", serde_json::to_string(&position)?),
            Ok(Some(position)) => println!("{}", render_position(&position)),
            Ok(None) => break,
            Err(e) if e.is_fatal() => return Err(e).context("Tracking stopped"),
            Err(e) => warn!(error = %e, "Ignoring location error"),
        }
    }

    let stats = tracking.stats();
    info!(
        accepted = stats.accepted,
        rejected = stats.rejected,
        "Tracking finished"
    );
    Ok(())
}

pub fn show_config(config: &AppConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_override_replaces_configured_order() {
        let config = AppConfig::default();
        let geocoding =
            geocoding_config(&config, &[ProviderKind::Photon, ProviderKind::Nominatim]).unwrap();
        assert_eq!(
            geocoding.providers,
            vec![ProviderKind::Photon, ProviderKind::Nominatim]
        );
    }

    #[test]
    fn no_override_keeps_config() {
        let config = AppConfig::default();
        let geocoding = geocoding_config(&config, &[]).unwrap();
        assert_eq!(geocoding.providers, config.geocoding.providers);
    }

    #[test]
    fn duplicate_override_is_rejected() {
        let config = AppConfig::default();
        assert!(geocoding_config(&config, &[ProviderKind::Photon, ProviderKind::Photon]).is_err());
    }

    #[tokio::test]
    async fn missing_input_file_is_reported() {
        let Err(err) = open_input(Some(Path::new("/nonexistent/track.jsonl"))).await else {
            panic!("expected an error");
        };
        assert!(err.to_string().contains("/nonexistent/track.jsonl"));
    }

    #[tokio::test]
    async fn track_rejects_invalid_threshold() {
        let config = AppConfig::default();
        let result = track(&config, None, Some(-1.0), None, false).await;
        assert!(result.is_err());
    }
}
