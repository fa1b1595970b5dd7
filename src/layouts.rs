//! Built-in sample floor maps that can be loaded from the toolbar.
//!
//! Layouts are kept as JSON in the same item format the shared list uses, so
//! they double as a reference for the wire shape (including extra data fields
//! such as `zone` that tool nodes must carry through commits).

use crate::error::FloorMapError;
use crate::types::FloorMap;
use serde::{Deserialize, Serialize};

/// Kinds of built-in layouts available from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutKind {
    /// No items
    #[default]
    Empty,
    /// A handful of desks and a meeting room
    SmallOffice,
    /// Racks, a loading bay and a corner office
    Warehouse,
}

/// Metadata for a single layout.
pub struct LayoutInfo {
    /// Stable identifier for the layout
    pub kind: LayoutKind,
    /// Human-friendly display name
    pub name: &'static str,
}

/// Returns all layouts with their display names.
pub const fn all_layouts() -> &'static [LayoutInfo] {
    const LAYOUTS: &[LayoutInfo] = &[
        LayoutInfo {
            kind: LayoutKind::Empty,
            name: "Empty floor",
        },
        LayoutInfo {
            kind: LayoutKind::SmallOffice,
            name: "Small office",
        },
        LayoutInfo {
            kind: LayoutKind::Warehouse,
            name: "Warehouse",
        },
    ];
    LAYOUTS
}

/// Display name of a layout kind.
pub fn layout_name(kind: LayoutKind) -> &'static str {
    all_layouts()
        .iter()
        .find(|info| info.kind == kind)
        .map(|info| info.name)
        .unwrap_or("Unknown layout")
}

/// Builds the floor map for the given layout kind.
pub fn build_layout(kind: LayoutKind) -> Result<FloorMap, FloorMapError> {
    let map = match kind {
        LayoutKind::Empty => FloorMap::new(),
        LayoutKind::SmallOffice => FloorMap::from_json(SMALL_OFFICE)?,
        LayoutKind::Warehouse => FloorMap::from_json(WAREHOUSE)?,
    };
    log::info!("loaded layout {:?} with {} items", kind, map.len());
    Ok(map)
}

const SMALL_OFFICE: &str = r#"[
  {
    "id": "3b0d8f52-6c1e-4a4e-9a57-0d2f1b6c1a01",
    "type": "rectangle",
    "position": [-160.0, -100.0],
    "data": { "rotateAngle": 0, "size": { "width": 200, "height": 100 }, "label": "Meeting room", "zone": "north" }
  },
  {
    "id": "3b0d8f52-6c1e-4a4e-9a57-0d2f1b6c1a02",
    "type": "square",
    "position": [80.0, -100.0],
    "data": { "rotateAngle": 0, "size": { "width": 60, "height": 60 }, "label": "Desk 1", "zone": "north" }
  },
  {
    "id": "3b0d8f52-6c1e-4a4e-9a57-0d2f1b6c1a03",
    "type": "square",
    "position": [180.0, -100.0],
    "data": { "rotateAngle": 0, "size": { "width": 60, "height": 60 }, "label": "Desk 2", "zone": "north" }
  },
  {
    "id": "3b0d8f52-6c1e-4a4e-9a57-0d2f1b6c1a04",
    "type": "circle",
    "position": [0.0, 80.0],
    "data": { "rotateAngle": 0, "size": { "width": 80, "height": 80 }, "label": "Lounge", "zone": "south" }
  },
  {
    "id": "3b0d8f52-6c1e-4a4e-9a57-0d2f1b6c1a05",
    "type": "halfCircle",
    "position": [160.0, 80.0],
    "data": { "rotateAngle": 180, "size": { "width": 80, "height": 40 }, "label": "Reception", "zone": "south" }
  }
]"#;

const WAREHOUSE: &str = r#"[
  {
    "id": "9c7a2e14-51f3-4d2b-8b61-7e4a0c9d2b01",
    "type": "rectangle",
    "position": [-200.0, -120.0],
    "data": { "rotateAngle": 90, "size": { "width": 220, "height": 40 }, "label": "Rack A" }
  },
  {
    "id": "9c7a2e14-51f3-4d2b-8b61-7e4a0c9d2b02",
    "type": "rectangle",
    "position": [-100.0, -120.0],
    "data": { "rotateAngle": 90, "size": { "width": 220, "height": 40 }, "label": "Rack B" }
  },
  {
    "id": "9c7a2e14-51f3-4d2b-8b61-7e4a0c9d2b03",
    "type": "lshape",
    "position": [120.0, -100.0],
    "data": { "rotateAngle": 0, "size": { "width": 140, "height": 140 }, "label": "Office", "capacity": 4 }
  },
  {
    "id": "9c7a2e14-51f3-4d2b-8b61-7e4a0c9d2b04",
    "type": "triangle",
    "position": [0.0, 120.0],
    "data": { "rotateAngle": 180, "size": { "width": 100, "height": 60 }, "label": "Loading bay", "dock": true }
  }
]"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShapeKind;

    #[test]
    fn every_layout_builds() {
        for info in all_layouts() {
            let map = build_layout(info.kind).unwrap_or_else(|e| panic!("{}: {e}", info.name));
            if info.kind == LayoutKind::Empty {
                assert!(map.is_empty());
            } else {
                assert!(!map.is_empty(), "{} should have items", info.name);
            }
        }
    }

    #[test]
    fn layouts_carry_extra_fields() {
        let map = build_layout(LayoutKind::Warehouse).unwrap();
        let office = map
            .items()
            .iter()
            .find(|item| item.shape == ShapeKind::LShape)
            .expect("office present");
        assert_eq!(office.data.extra["capacity"], 4);
    }

    #[test]
    fn layout_names_resolve() {
        assert_eq!(layout_name(LayoutKind::SmallOffice), "Small office");
    }
}
