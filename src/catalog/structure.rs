use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Protective performance ranking of a material structure.
///
/// Levels compare by a fixed rank, never by their names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarrierLevel {
    Low,
    Mid,
    High,
    Ultra,
}

impl BarrierLevel {
    pub fn rank(self) -> u8 {
        match self {
            BarrierLevel::Low => 1,
            BarrierLevel::Mid => 2,
            BarrierLevel::High => 3,
            BarrierLevel::Ultra => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BarrierLevel::Low => "Low",
            BarrierLevel::Mid => "Mid",
            BarrierLevel::High => "High",
            BarrierLevel::Ultra => "Ultra",
        }
    }

    pub fn all() -> [BarrierLevel; 4] {
        [
            BarrierLevel::Low,
            BarrierLevel::Mid,
            BarrierLevel::High,
            BarrierLevel::Ultra,
        ]
    }
}

/// Material family a structure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "pcr")]
    Pcr,
    #[serde(rename = "mono-pe")]
    MonoPe,
    #[serde(rename = "mono-pp")]
    MonoPp,
    #[serde(rename = "compostable")]
    Compostable,
    #[serde(rename = "bio-pe")]
    BioPe,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Pcr => "PCR",
            Category::MonoPe => "Mono PE",
            Category::MonoPp => "Mono PP",
            Category::Compostable => "Compostable",
            Category::BioPe => "Bio-PE",
        }
    }

    /// Stable key used for persisted UI state (expanded sidebar groups).
    pub fn key(self) -> &'static str {
        match self {
            Category::Pcr => "pcr",
            Category::MonoPe => "mono-pe",
            Category::MonoPp => "mono-pp",
            Category::Compostable => "compostable",
            Category::BioPe => "bio-pe",
        }
    }

    pub fn all() -> [Category; 5] {
        [
            Category::Pcr,
            Category::MonoPe,
            Category::MonoPp,
            Category::Compostable,
            Category::BioPe,
        ]
    }
}

/// One entry in the material-structures catalog.
///
/// Structures are flat value objects created once at catalog load and never
/// mutated afterwards. The OTR/WVTR pairs carry a numeric value for ordering
/// next to the human-readable string, because the published figure is usually
/// an inequality bound such as "<8".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialStructure {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub img: String,
    pub url: String,
    pub otr: f64,
    pub otr_display: String,
    pub wvtr: f64,
    pub wvtr_display: String,
    pub thickness: String,
    pub barrier_level: BarrierLevel,
    pub has_window: bool,
    pub has_kraft: bool,
    pub has_metalised: bool,
    pub has_aluminum: bool,
    pub best_for: Vec<String>,
    pub feature: String,
    pub category: Category,
}

impl MaterialStructure {
    /// Leading integer of the free-text thickness field, e.g. "100μm" -> 100.
    ///
    /// A thickness with no leading digits is a malformed record and errors
    /// instead of mapping to a sentinel that would corrupt orderings.
    pub fn thickness_microns(&self) -> Result<u32> {
        let end = self
            .thickness
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.thickness.len());
        let digits = &self.thickness[..end];
        if digits.is_empty() {
            bail!(
                "structure '{}' has thickness '{}' with no leading digits",
                self.id,
                self.thickness
            );
        }
        digits
            .parse()
            .with_context(|| format!("structure '{}' thickness '{}'", self.id, self.thickness))
    }

    /// Labels of the feature flags that are set, in display order.
    pub fn flag_labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.has_window {
            labels.push("Window");
        }
        if self.has_kraft {
            labels.push("Kraft");
        }
        if self.has_metalised {
            labels.push("Metalised");
        }
        if self.has_aluminum {
            labels.push("Aluminum");
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MaterialStructure {
        MaterialStructure {
            id: "pcr-pet-duplex-clear".to_string(),
            name: "PCR PET Duplex Clear".to_string(),
            short_name: "PET Duplex Clear".to_string(),
            img: "/imgs/spec/pcr-pet-duplex-clear.webp".to_string(),
            url: "/spec/pcr-pet-duplex-clear".to_string(),
            otr: 8.0,
            otr_display: "<8".to_string(),
            wvtr: 12.0,
            wvtr_display: "<12".to_string(),
            thickness: "100μm".to_string(),
            barrier_level: BarrierLevel::Mid,
            has_window: true,
            has_kraft: false,
            has_metalised: false,
            has_aluminum: false,
            best_for: vec!["snacks".to_string(), "coffee".to_string()],
            feature: "Window Option".to_string(),
            category: Category::Pcr,
        }
    }

    #[test]
    fn thickness_takes_leading_integer() {
        let mut s = sample();
        assert_eq!(s.thickness_microns().unwrap(), 100);

        s.thickness = "80μm".to_string();
        assert_eq!(s.thickness_microns().unwrap(), 80);

        s.thickness = "150".to_string();
        assert_eq!(s.thickness_microns().unwrap(), 150);
    }

    #[test]
    fn thickness_without_digits_is_an_error() {
        let mut s = sample();
        s.thickness = "unknown".to_string();
        let err = s.thickness_microns().unwrap_err();
        assert!(err.to_string().contains("no leading digits"));

        s.thickness = String::new();
        assert!(s.thickness_microns().is_err());
    }

    #[test]
    fn barrier_levels_rank_low_to_ultra() {
        let ranks: Vec<u8> = BarrierLevel::all().iter().map(|l| l.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert!(BarrierLevel::Mid.rank() < BarrierLevel::High.rank());
        // "high" < "low" lexically, which is exactly what rank comparison avoids
        assert!(BarrierLevel::Low.rank() < BarrierLevel::High.rank());
    }

    #[test]
    fn structures_serialize_with_camel_case_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["shortName"], "PET Duplex Clear");
        assert_eq!(json["otrDisplay"], "<8");
        assert_eq!(json["barrierLevel"], "mid");
        assert_eq!(json["hasWindow"], true);
        assert_eq!(json["category"], "pcr");
        assert!(json["bestFor"].is_array());

        let back: MaterialStructure = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn flag_labels_follow_display_order() {
        let mut s = sample();
        s.has_kraft = true;
        s.has_metalised = true;
        assert_eq!(s.flag_labels(), vec!["Window", "Kraft", "Metalised"]);
    }
}
