use furrow_core::models::{FinalizedBoundary, PlotIdentity};
use geojson::{Feature, Geometry, JsonObject, Value};
use serde::{Deserialize, Serialize};

/// Capture-phase registration payload: who owns the plot and where it is
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryRegistration {
    pub identity: PlotIdentity,
    pub area_acres: f64,
    pub geometry: Feature,
}

/// Build the registration payload for a finalized boundary.
///
/// The ring is stored open; GeoJSON wants it closed, so the first position
/// is repeated at the end. Positions are longitude first, per RFC 7946.
pub fn boundary_registration(
    boundary: &FinalizedBoundary,
    identity: &PlotIdentity,
) -> BoundaryRegistration {
    let mut exterior: Vec<Vec<f64>> = boundary
        .ring()
        .points()
        .iter()
        .map(|point| vec![point.longitude, point.latitude])
        .collect();
    if let Some(first) = exterior.first().cloned() {
        exterior.push(first);
    }

    let mut properties = JsonObject::new();
    properties.insert("farmer".to_string(), identity.farmer_name.clone().into());
    properties.insert("plot".to_string(), identity.plot_name.clone().into());
    properties.insert("area_acres".to_string(), boundary.area_acres().into());

    let geometry = Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![exterior]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    };

    BoundaryRegistration {
        identity: identity.clone(),
        area_acres: boundary.area_acres(),
        geometry,
    }
}
