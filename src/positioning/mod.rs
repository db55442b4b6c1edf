//! # Positioning Engine
//!
//! Converts a beacon scan into an estimated floor and coordinate in three
//! steps: match the scanned identifiers against registered beacons, pick
//! the floor with the strongest aggregate signal, then estimate the
//! coordinate with the richest method the matched set supports
//! (single-beacon passthrough, RSSI-weighted centroid, or three-point
//! trilateration).
//!
//! Domain failures never raise: they come back as
//! [`PositionEstimate::Invalid`] with a human-readable reason, and numeric
//! degeneracies inside an estimator fall back to a simpler one.

pub mod rssi;

use hashbrown::HashMap;
use tracing::{debug, info};

use crate::Result;
use crate::geo::Point;
use crate::model::{Beacon, PositionEstimate, PositionFix, PositionMethod, ScannedBeacon};
use crate::provider::MapProvider;

use self::rssi::{path_loss_distance, trilaterate, weighted_centroid};

/// Observations weaker than this are too noisy to trust and are dropped
/// before matching.
pub const RSSI_FLOOR: i32 = -75;

/// A scanned observation resolved to its registered beacon.
#[derive(Debug, Clone)]
struct Matched {
    beacon: Beacon,
    rssi: i32,
}

/// Estimate the user's position from a beacon scan.
///
/// `Err` is reserved for provider failures; everything the scan itself can
/// get wrong is an [`PositionEstimate::Invalid`] value.
pub async fn estimate_position<P: MapProvider>(
    provider: &P,
    scans: &[ScannedBeacon],
) -> Result<PositionEstimate> {
    if scans.is_empty() {
        return Ok(PositionEstimate::invalid("no beacons provided"));
    }

    let matched = match_scans(provider, scans).await?;
    if matched.is_empty() {
        return Ok(PositionEstimate::invalid(
            "no registered beacons matched the scan",
        ));
    }

    let (floor_id, floor_beacons) = select_floor(matched);
    debug!(floor = %floor_id, beacons = floor_beacons.len(), "floor selected");

    let (position, method, beacons_used) = estimate_coordinate(&floor_beacons);

    let Some(floor) = provider.floor(&floor_id).await? else {
        return Ok(PositionEstimate::invalid(format!(
            "floor {floor_id} is not registered"
        )));
    };
    let building_name = provider
        .building(&floor.building_id)
        .await?
        .map(|b| b.name)
        .unwrap_or_else(|| "Unknown".into());

    info!(%floor_id, %method, beacons_used, "position fixed");
    Ok(PositionEstimate::Fix(PositionFix {
        building_id: floor.building_id,
        building_name,
        floor_id: floor.floor_id,
        floor_name: floor.name,
        floor_number: floor.floor_number,
        position,
        method,
        beacons_used,
    }))
}

/// Filter out weak observations and resolve the rest against the beacon
/// registry. Unmatched scans are dropped silently.
async fn match_scans<P: MapProvider>(
    provider: &P,
    scans: &[ScannedBeacon],
) -> Result<Vec<Matched>> {
    let mut matched = Vec::with_capacity(scans.len());
    for scan in scans {
        if scan.rssi < RSSI_FLOOR {
            debug!(beacon = %scan.id, rssi = scan.rssi, "signal below floor, dropped");
            continue;
        }
        // The stored UUID case is not guaranteed; try both canonical forms.
        let registered = match provider.beacon(&scan.id.to_uppercase()).await? {
            Some(beacon) => Some(beacon),
            None => provider.beacon(&scan.id.to_lowercase()).await?,
        };
        match registered {
            Some(beacon) => matched.push(Matched { beacon, rssi: scan.rssi }),
            None => debug!(beacon = %scan.id, "scan does not match a registered beacon"),
        }
    }
    Ok(matched)
}

/// Group matched beacons by floor and pick the floor with the strongest
/// aggregate signal (largest RSSI sum). Equal scores resolve to the
/// lexicographically lower floor id.
fn select_floor(matched: Vec<Matched>) -> (String, Vec<Matched>) {
    let mut by_floor: HashMap<String, Vec<Matched>> = HashMap::new();
    for m in matched {
        by_floor.entry(m.beacon.floor_id.clone()).or_default().push(m);
    }

    let mut best: Option<(String, f64)> = None;
    for (floor_id, group) in &by_floor {
        let score: f64 = group.iter().map(|m| f64::from(m.rssi)).sum();
        let stronger = match &best {
            None => true,
            Some((best_id, best_score)) => {
                score > *best_score || (score == *best_score && *floor_id < *best_id)
            }
        };
        if stronger {
            best = Some((floor_id.clone(), score));
        }
    }

    let (floor_id, _) = best.expect("matched set is non-empty");
    let group = by_floor.remove(&floor_id).expect("winning floor has beacons");
    (floor_id, group)
}

/// Estimate a coordinate from the winning floor's matched beacons.
///
/// Returns the position, the method that actually produced it, and how
/// many beacons entered the estimate.
fn estimate_coordinate(beacons: &[Matched]) -> (Point, PositionMethod, usize) {
    match beacons {
        [single] => (single.beacon.position, PositionMethod::Nearest, 1),
        [_, _] => {
            let samples: Vec<(Point, i32)> =
                beacons.iter().map(|m| (m.beacon.position, m.rssi)).collect();
            (weighted_centroid(&samples), PositionMethod::Weighted, 2)
        }
        _ => {
            // Three strongest observations, strongest first. The sort is
            // stable, so equal strengths keep their scan order.
            let mut ranked: Vec<&Matched> = beacons.iter().collect();
            ranked.sort_by(|a, b| b.rssi.cmp(&a.rssi));
            let top = &ranked[..3];

            let circles = [0, 1, 2].map(|i| {
                let m = top[i];
                (
                    m.beacon.position,
                    path_loss_distance(m.rssi, m.beacon.calibrated_tx_power()),
                )
            });

            match trilaterate(circles) {
                Some(position) => (position, PositionMethod::Trilateration, 3),
                None => {
                    debug!("trilateration degenerate, falling back to weighted centroid");
                    let samples: Vec<(Point, i32)> =
                        top.iter().map(|m| (m.beacon.position, m.rssi)).collect();
                    (weighted_centroid(&samples), PositionMethod::Weighted, 3)
                }
            }
        }
    }
}
