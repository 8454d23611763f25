//! The fixed set of provinces the price map covers.

/// One recognised administrative region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Province {
    pub id: &'static str,
    pub name: &'static str,
    /// Compact label for shapes too small to carry the full name.
    pub code: &'static str,
}

pub const PROVINCES: [Province; 9] = [
    Province { id: "ZA-EC", name: "Eastern Cape", code: "EC" },
    Province { id: "ZA-FS", name: "Free State", code: "FS" },
    Province { id: "ZA-GP", name: "Gauteng", code: "GP" },
    Province { id: "ZA-KZN", name: "KwaZulu-Natal", code: "KZN" },
    Province { id: "ZA-LP", name: "Limpopo", code: "LP" },
    Province { id: "ZA-MP", name: "Mpumalanga", code: "MP" },
    Province { id: "ZA-NC", name: "Northern Cape", code: "NC" },
    Province { id: "ZA-NW", name: "North West", code: "NW" },
    Province { id: "ZA-WC", name: "Western Cape", code: "WC" },
];

/// Enclaved neighbour that shows up in boundary and sale data but is never
/// aggregated or drawn.
pub const EXCLUDED_TERRITORY: &str = "Lesotho";

/// Display names of all recognised provinces, in table order.
pub fn province_names() -> Vec<&'static str> {
    PROVINCES.iter().map(|p| p.name).collect()
}

/// Case- and whitespace-insensitive region name comparison.
pub fn same_region(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

pub fn is_excluded(name: &str) -> bool {
    same_region(name, EXCLUDED_TERRITORY)
}

/// Resolves a free-form name, id or code to its province.
pub fn lookup(key: &str) -> Option<&'static Province> {
    PROVINCES
        .iter()
        .find(|p| same_region(p.name, key) || same_region(p.id, key) || same_region(p.code, key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_by_name_id_and_code() {
        assert_eq!(lookup(" kwazulu-natal ").map(|p| p.id), Some("ZA-KZN"));
        assert_eq!(lookup("ZA-WC").map(|p| p.name), Some("Western Cape"));
        assert_eq!(lookup("gp").map(|p| p.name), Some("Gauteng"));
        assert_eq!(lookup("Lesotho"), None);
    }

    #[test]
    fn excluded_territory_is_not_a_province() {
        assert!(is_excluded("LESOTHO"));
        assert!(!province_names().iter().any(|n| is_excluded(n)));
        assert_eq!(province_names().len(), 9);
    }
}
