use crate::core_modules::features::{Category, FeatureSet};

/// One category as a selector presents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub category: Category,
    pub label: &'static str,
    /// Values the generators draw distinctly, skip values included.
    pub options: &'static [&'static str],
}

impl CatalogEntry {
    pub fn default_option(&self) -> &'static str {
        self.options[0]
    }
}

const CATALOG: [CatalogEntry; 8] = [
    CatalogEntry {
        category: Category::FaceShape,
        label: "Face Shape",
        options: &["oval", "round", "square", "diamond", "heart", "oblong"],
    },
    CatalogEntry {
        category: Category::FacialHair,
        label: "Facial Hair",
        options: &["clean shaven", "mustache", "beard", "goatee", "stubble"],
    },
    CatalogEntry {
        category: Category::HairType,
        label: "Hair Type",
        options: &["straight black", "curly", "wavy", "receding hairline", "bald"],
    },
    CatalogEntry {
        category: Category::Eyebrows,
        label: "Eyebrows",
        options: &["straight", "arched", "rounded", "angled", "bushy", "thin"],
    },
    CatalogEntry {
        category: Category::EyeShape,
        label: "Eye Shape",
        options: &["almond", "round", "hooded", "upturned", "downturned", "monolid"],
    },
    CatalogEntry {
        category: Category::NoseType,
        label: "Nose Type",
        options: &["straight", "aquiline", "button", "broad", "narrow", "roman"],
    },
    CatalogEntry {
        category: Category::MouthShape,
        label: "Mouth Shape",
        options: &["full", "thin", "wide", "small", "bow", "downturned"],
    },
    CatalogEntry {
        category: Category::DistinctiveMarks,
        label: "Distinctive Marks",
        options: &["none", "scar on face", "mole on cheek", "broken nose", "birthmark"],
    },
];

/// Every category, in layer order.
pub fn catalog() -> &'static [CatalogEntry] {
    &CATALOG
}

pub fn entry(category: Category) -> &'static CatalogEntry {
    // CATALOG is declared in `Category::ALL` order.
    &CATALOG[category as usize]
}

impl Category {
    /// Human-readable name, e.g. "Eye Shape".
    pub fn label(self) -> &'static str {
        entry(self).label
    }
}

/// A complete face using the first option of every category.
pub fn default_features() -> FeatureSet {
    CATALOG
        .iter()
        .map(|e| (e.category.key(), e.default_option()))
        .collect()
}

/// One feature set per catalog option: an oval face carrying just that option.
/// The face-shape options stand alone.
pub fn every_variant() -> Vec<(Category, &'static str, FeatureSet)> {
    CATALOG
        .iter()
        .flat_map(|e| e.options.iter().map(move |option| (e.category, *option)))
        .map(|(category, option)| {
            let mut features = FeatureSet::new();
            if category != Category::FaceShape {
                features.insert(Category::FaceShape.key(), "oval");
            }
            features.insert(category.key(), option);
            (category, option, features)
        })
        .collect()
}
