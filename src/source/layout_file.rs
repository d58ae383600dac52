use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use kurbo::Point;

use crate::foundation::error::{LedviewError, LedviewResult};

/// One record of the detector map format: a light id with its 2D position.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct MapEntry {
    id: u32,
    x: f64,
    y: f64,
}

/// Parse a detector map JSON document into an ordered layout.
///
/// The detector emits an array of `{id, x, y}` records and may skip ids for
/// lights it failed to locate. Gaps are filled so index `i` of the result
/// always addresses light `i`: a missing id reuses the position of the
/// previous id, or the position at the maximum id when there is no previous.
pub fn layout_from_json(json: &str) -> LedviewResult<Vec<Point>> {
    let entries: Vec<MapEntry> = serde_json::from_str(json)
        .map_err(|e| LedviewError::serde(format!("layout map: {e}")))?;
    if entries.is_empty() {
        return Err(LedviewError::validation("layout map has no entries"));
    }

    let mut by_id = BTreeMap::new();
    for entry in entries {
        by_id.insert(entry.id, Point::new(entry.x, entry.y));
    }
    let max_id = *by_id.keys().next_back().unwrap_or(&0);
    let fallback = by_id[&max_id];

    let mut points = Vec::with_capacity(max_id as usize + 1);
    for id in 0..=max_id {
        let point = match by_id.get(&id) {
            Some(p) => *p,
            None => points.last().copied().unwrap_or(fallback),
        };
        points.push(point);
    }
    Ok(points)
}

/// Read and parse a detector map file.
pub fn layout_from_path(path: impl AsRef<Path>) -> LedviewResult<Vec<Point>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read layout map '{}'", path.display()))?;
    layout_from_json(&json)
}

#[cfg(test)]
#[path = "../../tests/unit/source/layout_file.rs"]
mod tests;
