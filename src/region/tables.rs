//! Static bounding-box tables.
//!
//! Order is priority: the first box that contains a coordinate wins.
//! Boxes are coarse on purpose and overlap freely.

use super::types::{BoundingBox, Country};

// ─── Countries ───────────────────────────────────────────────────

/// Country boxes in evaluation order. México's box covers most of Central
/// America, so it must stay behind every Central American entry.
pub const COUNTRY_BOXES: &[(Country, BoundingBox)] = &[
    (Country::Guatemala, BoundingBox::new("Guatemala", (13.0, 17.8), (-92.5, -88.0))),
    (Country::ElSalvador, BoundingBox::new("El Salvador", (12.0, 14.5), (-90.5, -87.0))),
    (Country::Honduras, BoundingBox::new("Honduras", (12.5, 16.5), (-89.5, -83.0))),
    (Country::CostaRica, BoundingBox::new("Costa Rica", (8.0, 11.5), (-86.0, -82.5))),
    (Country::Panama, BoundingBox::new("Panamá", (7.0, 9.7), (-83.0, -77.0))),
    (Country::Colombia, BoundingBox::new("Colombia", (-4.5, 13.5), (-82.0, -66.0))),
    (Country::Mexico, BoundingBox::new("México", (14.5, 32.7), (-118.4, -86.7))),
    (Country::UnitedStates, BoundingBox::new("Estados Unidos", (24.0, 50.0), (-130.0, -65.0))),
    (Country::Canada, BoundingBox::new("Canadá", (42.0, 70.0), (-140.0, -52.0))),
];

// ─── Regions ─────────────────────────────────────────────────────

/// Representative states only; the rest of the country falls into the default.
pub const MEXICO_REGIONS: &[BoundingBox] = &[
    BoundingBox::new("Ciudad de México", (19.0, 19.6), (-99.4, -98.9)),
    BoundingBox::new("Jalisco", (19.5, 22.5), (-105.5, -101.5)),
    BoundingBox::new("Nuevo León", (23.0, 27.8), (-101.2, -98.4)),
    BoundingBox::new("Quintana Roo", (18.0, 21.6), (-89.5, -86.7)),
    BoundingBox::new("Yucatán", (19.5, 21.7), (-90.5, -87.5)),
    BoundingBox::new("Baja California", (28.0, 32.7), (-117.2, -112.6)),
];

/// The capital box is checked first; Sacatepéquez overlaps it on the west.
pub const GUATEMALA_REGIONS: &[BoundingBox] = &[
    BoundingBox::new("Guatemala (Capital)", (14.4, 14.8), (-90.8, -90.3)),
    BoundingBox::new("Sacatepéquez", (14.4, 14.7), (-90.95, -90.6)),
    BoundingBox::new("Quetzaltenango", (14.6, 15.0), (-91.8, -91.3)),
    BoundingBox::new("Escuintla", (13.9, 14.4), (-91.3, -90.4)),
    BoundingBox::new("Petén", (15.8, 17.8), (-91.5, -89.1)),
    BoundingBox::new("Izabal", (15.2, 15.9), (-89.4, -88.2)),
    BoundingBox::new("Huehuetenango", (15.2, 16.0), (-92.2, -91.2)),
    BoundingBox::new("Alta Verapaz", (15.2, 16.0), (-90.7, -89.5)),
    BoundingBox::new("Zacapa", (14.8, 15.2), (-89.9, -89.3)),
    BoundingBox::new("Chiquimula", (14.4, 14.9), (-89.8, -89.2)),
];

pub const EL_SALVADOR_REGIONS: &[BoundingBox] = &[
    BoundingBox::new("San Salvador", (13.6, 13.85), (-89.3, -89.0)),
    BoundingBox::new("Santa Ana", (13.8, 14.45), (-89.8, -89.3)),
    BoundingBox::new("San Miguel", (13.2, 13.8), (-88.4, -87.9)),
];

pub const HONDURAS_REGIONS: &[BoundingBox] = &[
    BoundingBox::new("Francisco Morazán", (13.8, 14.6), (-87.6, -86.8)),
    BoundingBox::new("Cortés", (15.2, 15.9), (-88.2, -87.6)),
    BoundingBox::new("Atlántida", (15.5, 15.9), (-87.6, -86.3)),
];

/// Region table for a country, if one exists.
pub fn region_table(country: Country) -> Option<&'static [BoundingBox]> {
    match country {
        Country::Mexico => Some(MEXICO_REGIONS),
        Country::Guatemala => Some(GUATEMALA_REGIONS),
        Country::ElSalvador => Some(EL_SALVADOR_REGIONS),
        Country::Honduras => Some(HONDURAS_REGIONS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed(b: &BoundingBox) -> bool {
        b.lat_min < b.lat_max && b.lng_min < b.lng_max
    }

    #[test]
    fn test_all_boxes_well_formed() {
        for (_, b) in COUNTRY_BOXES {
            assert!(well_formed(b), "{}", b.name);
        }
        for c in Country::ALL {
            for b in region_table(c).unwrap_or(&[]) {
                assert!(well_formed(b), "{}", b.name);
            }
        }
    }

    #[test]
    fn test_country_box_names_match_canonical() {
        for (c, b) in COUNTRY_BOXES {
            assert_eq!(c.name(), b.name);
        }
    }

    #[test]
    fn test_mexico_after_central_america() {
        let pos = |c: Country| COUNTRY_BOXES.iter().position(|(x, _)| *x == c).unwrap();
        let mx = pos(Country::Mexico);
        for c in [Country::Guatemala, Country::ElSalvador, Country::Honduras, Country::CostaRica, Country::Panama] {
            assert!(pos(c) < mx, "{} must precede México", c);
        }
    }

    #[test]
    fn test_nicaragua_has_no_box() {
        assert!(COUNTRY_BOXES.iter().all(|(c, _)| *c != Country::Nicaragua));
        assert!(region_table(Country::Nicaragua).is_none());
    }

    #[test]
    fn test_region_tables_present() {
        assert_eq!(region_table(Country::Mexico).map(|t| t.len()), Some(6));
        assert_eq!(region_table(Country::Guatemala).map(|t| t.len()), Some(10));
        assert_eq!(region_table(Country::ElSalvador).map(|t| t.len()), Some(3));
        assert_eq!(region_table(Country::Honduras).map(|t| t.len()), Some(3));
        assert!(region_table(Country::CostaRica).is_none());
    }
}
