//! Neighborhood carbon compensation layer shown on the home map.
//!
//! Input is a GeoJSON `FeatureCollection` whose features carry per-region
//! consumption and compensation percentages. Each region gets a fill
//! style from its carbon compensation tier and a label anchor at the
//! center of its outer ring's bounding box.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Joinville, as `(lat, lng)`
pub const MAP_CENTER: (f64, f64) = (-26.3045, -48.8876);

pub const MAP_ZOOM: u8 = 12;

/// Carbon compensation above this is high
pub const HIGH_THRESHOLD: f64 = 80.0;

/// Carbon compensation above this is medium
pub const MEDIUM_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: RegionProperties,
    pub geometry: Geometry,
}

/// Per-region figures. Missing numbers read as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionProperties {
    pub nome: String,
    pub compensacao_carbono: f64,
    pub gasto_energia: f64,
    pub compensacao_energia: f64,
    pub gasto_agua: f64,
    pub compensacao_agua: f64,
}

/// Positions are `[lng, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Polygon(Vec<Vec<[f64; 2]>>),
    MultiPolygon(Vec<Vec<Vec<[f64; 2]>>>),
}

impl Geometry {
    /// Outer ring of the polygon (first polygon for multipolygons)
    pub fn outer_ring(&self) -> Option<&[[f64; 2]]> {
        let ring = match self {
            Geometry::Polygon(rings) => rings.first()?,
            Geometry::MultiPolygon(polygons) => polygons.first()?.first()?,
        };
        Some(ring.as_slice())
    }

    /// Center of the outer ring's bounding box as `(lat, lng)`
    pub fn centroid(&self) -> Option<(f64, f64)> {
        centroid(self.outer_ring()?)
    }
}

/// Center of the bounding box of `[lng, lat]` positions, as `(lat, lng)`.
pub fn centroid(ring: &[[f64; 2]]) -> Option<(f64, f64)> {
    let first = ring.first()?;
    let (mut min_lng, mut max_lng) = (first[0], first[0]);
    let (mut min_lat, mut max_lat) = (first[1], first[1]);
    for &[lng, lat] in &ring[1..] {
        min_lng = min_lng.min(lng);
        max_lng = max_lng.max(lng);
        min_lat = min_lat.min(lat);
        max_lat = max_lat.max(lat);
    }
    Some(((min_lat + max_lat) / 2.0, (min_lng + max_lng) / 2.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompensationTier {
    High,
    Medium,
    Low,
}

impl CompensationTier {
    pub fn for_value(carbon: f64) -> Self {
        if carbon > HIGH_THRESHOLD {
            CompensationTier::High
        } else if carbon > MEDIUM_THRESHOLD {
            CompensationTier::Medium
        } else {
            CompensationTier::Low
        }
    }

    pub fn fill_color(self) -> &'static str {
        match self {
            CompensationTier::High => "#078f34",
            CompensationTier::Medium => "#b88a0c",
            CompensationTier::Low => "#921107",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CompensationTier::High => "high",
            CompensationTier::Medium => "medium",
            CompensationTier::Low => "low",
        }
    }
}

/// Path style for one region, in map-library field names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    pub fill_color: &'static str,
    pub weight: u8,
    pub opacity: f32,
    pub color: &'static str,
    pub fill_opacity: f32,
}

impl FeatureStyle {
    pub fn for_tier(tier: CompensationTier) -> Self {
        Self {
            fill_color: tier.fill_color(),
            weight: 1,
            opacity: 1.0,
            color: "white",
            fill_opacity: 0.7,
        }
    }
}

/// A feature resolved for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionView {
    pub name: String,
    pub carbon: f64,
    pub tier: CompensationTier,
    pub style: FeatureStyle,
    /// Label anchor, `None` for empty geometry
    pub label_at: Option<(f64, f64)>,
}

impl Feature {
    pub fn view(&self) -> RegionView {
        let carbon = self.properties.compensacao_carbono;
        let tier = CompensationTier::for_value(carbon);
        RegionView {
            name: self.properties.nome.clone(),
            carbon,
            tier,
            style: FeatureStyle::for_tier(tier),
            label_at: self.geometry.centroid(),
        }
    }
}

impl FeatureCollection {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse GeoJSON feature collection")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read GeoJSON from {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid GeoJSON in {}", path.display()))
    }

    pub fn views(&self) -> Vec<RegionView> {
        self.features.iter().map(Feature::view).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {
                "nome": "Centro",
                "compensacaoCarbono": 85,
                "gastoEnergia": 1200.5,
                "compensacaoEnergia": 40
            },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-48.85, -26.30], [-48.83, -26.30], [-48.83, -26.28], [-48.85, -26.29]]]
            }
        }]
    }"#;

    #[test]
    fn tier_thresholds_are_exclusive() {
        assert_eq!(CompensationTier::for_value(80.1), CompensationTier::High);
        assert_eq!(CompensationTier::for_value(80.0), CompensationTier::Medium);
        assert_eq!(CompensationTier::for_value(50.0), CompensationTier::Low);
        assert_eq!(CompensationTier::for_value(0.0), CompensationTier::Low);
    }

    #[test]
    fn parses_properties_with_defaults() {
        let collection = FeatureCollection::from_json(SAMPLE).unwrap();
        let props = &collection.features[0].properties;
        assert_eq!(props.nome, "Centro");
        assert_eq!(props.compensacao_carbono, 85.0);
        assert_eq!(props.gasto_agua, 0.0);
        assert_eq!(props.compensacao_agua, 0.0);
    }

    #[test]
    fn view_styles_and_anchors_region() {
        let collection = FeatureCollection::from_json(SAMPLE).unwrap();
        let view = &collection.views()[0];
        assert_eq!(view.tier, CompensationTier::High);
        assert_eq!(view.style.fill_color, "#078f34");
        assert_eq!(view.style.color, "white");
        let (lat, lng) = view.label_at.unwrap();
        assert!((lat - -26.29).abs() < 1e-9);
        assert!((lng - -48.84).abs() < 1e-9);
    }

    #[test]
    fn multipolygon_uses_first_outer_ring() {
        let geometry: Geometry = serde_json::from_str(
            r#"{"type": "MultiPolygon", "coordinates": [[[[0, 0], [2, 4]]], [[[10, 10], [20, 20]]]]}"#,
        )
        .unwrap();
        assert_eq!(geometry.centroid(), Some((2.0, 1.0)));
    }

    #[test]
    fn empty_ring_has_no_centroid() {
        assert_eq!(Geometry::Polygon(vec![]).centroid(), None);
        assert_eq!(centroid(&[]), None);
    }

    #[test]
    fn style_serializes_with_map_field_names() {
        let json = serde_json::to_value(FeatureStyle::for_tier(CompensationTier::Low)).unwrap();
        assert_eq!(json["fillColor"], "#921107");
        assert_eq!(json["fillOpacity"], 0.7f32 as f64);
    }
}
