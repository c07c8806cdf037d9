// THEORY:
// The `features` module is the vocabulary of the compositor. It turns the loose,
// string-keyed selections a caller sends into a closed set of typed choices, one
// sum type per feature category.
//
// Key architectural principles:
// 1.  **Closed Variants**: Each category is an enum. Every string a caller could
//     send resolves to exactly one arm, so the generators match exhaustively and
//     never see raw text.
// 2.  **Explicit Fallback**: Unrecognized text is not an error. Each category
//     names its fallback arm (`Oblong`, `Straight`, `Monolid`, ...) and the
//     parser lands there. Facial hair and distinctive marks carry a dedicated
//     `Unrecognized` arm instead, because for them an unknown value draws an
//     empty layer rather than a default shape.
// 3.  **Skip vs Default**: Absence of a key, and the sentinels `"clean shaven"`
//     and `"none"`, mean "no layer at all." That decision is made here, once,
//     by `FeatureSet::resolve`, and surfaces as `None` in the `FeatureSelection`.
// 4.  **Boundary Typing**: `FeatureSet` values are strings. The one place a
//     malformed type can appear is the JSON boundary, and `from_json_value`
//     rejects it there with a `CompositeError`.

use crate::error::CompositeError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A feature category. Declaration order is the layer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    FaceShape,
    FacialHair,
    HairType,
    Eyebrows,
    EyeShape,
    NoseType,
    MouthShape,
    DistinctiveMarks,
}

impl Category {
    /// Every category, bottom layer first.
    pub const ALL: [Category; 8] = [
        Category::FaceShape,
        Category::FacialHair,
        Category::HairType,
        Category::Eyebrows,
        Category::EyeShape,
        Category::NoseType,
        Category::MouthShape,
        Category::DistinctiveMarks,
    ];

    /// The key this category is selected by in a `FeatureSet`.
    pub fn key(self) -> &'static str {
        match self {
            Category::FaceShape => "faceShape",
            Category::FacialHair => "facialHair",
            Category::HairType => "hairType",
            Category::Eyebrows => "eyebrows",
            Category::EyeShape => "eyeShape",
            Category::NoseType => "noseType",
            Category::MouthShape => "mouthShape",
            Category::DistinctiveMarks => "distinctiveMarks",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceShape {
    Oval,
    Round,
    Square,
    Diamond,
    Heart,
    /// Also the fallback for any unrecognized shape.
    Oblong,
}

impl FaceShape {
    pub fn parse(value: &str) -> Self {
        match value {
            "oval" => FaceShape::Oval,
            "round" => FaceShape::Round,
            "square" => FaceShape::Square,
            "diamond" => FaceShape::Diamond,
            "heart" => FaceShape::Heart,
            _ => FaceShape::Oblong,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacialHair {
    Mustache,
    Beard,
    Goatee,
    Stubble,
    /// Any other value: the layer is generated but stays empty.
    Unrecognized,
}

impl FacialHair {
    pub const SKIP_SENTINEL: &'static str = "clean shaven";

    /// `None` means no layer is generated for this category.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" | Self::SKIP_SENTINEL => None,
            "mustache" => Some(FacialHair::Mustache),
            "beard" => Some(FacialHair::Beard),
            "goatee" => Some(FacialHair::Goatee),
            "stubble" => Some(FacialHair::Stubble),
            _ => Some(FacialHair::Unrecognized),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HairType {
    Bald,
    RecedingHairline,
    Curly,
    Wavy,
    /// Also the fallback, e.g. for "straight black".
    Straight,
}

impl HairType {
    pub fn parse(value: &str) -> Self {
        match value {
            "bald" => HairType::Bald,
            "receding hairline" => HairType::RecedingHairline,
            v if v.contains("curly") => HairType::Curly,
            v if v.contains("wavy") => HairType::Wavy,
            _ => HairType::Straight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eyebrows {
    /// Also the fallback.
    Straight,
    Arched,
    Rounded,
    Angled,
    Bushy,
    Thin,
}

impl Eyebrows {
    pub fn parse(value: &str) -> Self {
        match value {
            "arched" => Eyebrows::Arched,
            "rounded" => Eyebrows::Rounded,
            "angled" => Eyebrows::Angled,
            "bushy" => Eyebrows::Bushy,
            "thin" => Eyebrows::Thin,
            _ => Eyebrows::Straight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeShape {
    Almond,
    Round,
    Hooded,
    Upturned,
    Downturned,
    /// Also the fallback.
    Monolid,
}

impl EyeShape {
    pub fn parse(value: &str) -> Self {
        match value {
            "almond" => EyeShape::Almond,
            "round" => EyeShape::Round,
            "hooded" => EyeShape::Hooded,
            "upturned" => EyeShape::Upturned,
            "downturned" => EyeShape::Downturned,
            _ => EyeShape::Monolid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoseType {
    Straight,
    Aquiline,
    Broad,
    Button,
    Narrow,
    /// Also the fallback.
    Roman,
}

impl NoseType {
    pub fn parse(value: &str) -> Self {
        match value {
            "straight" => NoseType::Straight,
            "aquiline" => NoseType::Aquiline,
            "broad" => NoseType::Broad,
            "button" => NoseType::Button,
            "narrow" => NoseType::Narrow,
            _ => NoseType::Roman,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouthShape {
    Full,
    Thin,
    Wide,
    Small,
    Bow,
    Downturned,
    /// The plain pair of lip arcs drawn for anything unrecognized.
    Neutral,
}

impl MouthShape {
    pub fn parse(value: &str) -> Self {
        match value {
            "full" => MouthShape::Full,
            "thin" => MouthShape::Thin,
            "wide" => MouthShape::Wide,
            "small" => MouthShape::Small,
            "bow" => MouthShape::Bow,
            "downturned" => MouthShape::Downturned,
            _ => MouthShape::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinctiveMark {
    Scar,
    Mole,
    BrokenNose,
    Birthmark,
    /// Any other value: the layer is generated but stays empty.
    Unrecognized,
}

impl DistinctiveMark {
    pub const SKIP_SENTINEL: &'static str = "none";

    /// Substring matches are tried in priority order; the first hit wins.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" | Self::SKIP_SENTINEL => None,
            v if v.contains("scar") => Some(DistinctiveMark::Scar),
            v if v.contains("mole") => Some(DistinctiveMark::Mole),
            v if v.contains("broken nose") => Some(DistinctiveMark::BrokenNose),
            v if v.contains("birthmark") => Some(DistinctiveMark::Birthmark),
            _ => Some(DistinctiveMark::Unrecognized),
        }
    }
}

/// One layer's worth of resolved selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureLayer {
    FaceShape(FaceShape),
    FacialHair(FacialHair),
    HairType(HairType),
    Eyebrows(Eyebrows),
    EyeShape(EyeShape),
    NoseType(NoseType),
    MouthShape(MouthShape),
    DistinctiveMarks(DistinctiveMark),
}

impl FeatureLayer {
    pub fn category(&self) -> Category {
        match self {
            FeatureLayer::FaceShape(_) => Category::FaceShape,
            FeatureLayer::FacialHair(_) => Category::FacialHair,
            FeatureLayer::HairType(_) => Category::HairType,
            FeatureLayer::Eyebrows(_) => Category::Eyebrows,
            FeatureLayer::EyeShape(_) => Category::EyeShape,
            FeatureLayer::NoseType(_) => Category::NoseType,
            FeatureLayer::MouthShape(_) => Category::MouthShape,
            FeatureLayer::DistinctiveMarks(_) => Category::DistinctiveMarks,
        }
    }
}

/// The typed result of resolving a `FeatureSet`. `None` means the category
/// contributes no layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureSelection {
    pub face_shape: Option<FaceShape>,
    pub facial_hair: Option<FacialHair>,
    pub hair_type: Option<HairType>,
    pub eyebrows: Option<Eyebrows>,
    pub eye_shape: Option<EyeShape>,
    pub nose_type: Option<NoseType>,
    pub mouth_shape: Option<MouthShape>,
    pub distinctive_marks: Option<DistinctiveMark>,
}

impl FeatureSelection {
    /// The layers to render, bottom first.
    pub fn layers(&self) -> Vec<FeatureLayer> {
        [
            self.face_shape.map(FeatureLayer::FaceShape),
            self.facial_hair.map(FeatureLayer::FacialHair),
            self.hair_type.map(FeatureLayer::HairType),
            self.eyebrows.map(FeatureLayer::Eyebrows),
            self.eye_shape.map(FeatureLayer::EyeShape),
            self.nose_type.map(FeatureLayer::NoseType),
            self.mouth_shape.map(FeatureLayer::MouthShape),
            self.distinctive_marks.map(FeatureLayer::DistinctiveMarks),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// The caller-supplied mapping of category keys to variant strings.
///
/// Keys outside the eight recognized categories are kept but ignored when
/// rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    values: BTreeMap<String, String>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn get(&self, category: Category) -> Option<&str> {
        self.values.get(category.key()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parses a JSON object of `{"faceShape": "oval", ...}`.
    pub fn from_json_str(text: &str) -> Result<Self, CompositeError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json_value(&value)
    }

    /// Accepts either a bare feature object or one wrapped as `{"features": {...}}`.
    ///
    /// A recognized key holding anything but a string (or `null`, which reads as
    /// absence) is rejected. Unrecognized keys are ignored whatever they hold.
    pub fn from_json_value(value: &Value) -> Result<Self, CompositeError> {
        let object = value.as_object().ok_or(CompositeError::NotAnObject)?;
        let object = match object.get("features") {
            Some(Value::Object(inner)) => inner,
            _ => object,
        };

        let mut set = FeatureSet::new();
        for (key, value) in object {
            let Some(category) = Category::from_key(key) else {
                continue;
            };
            match value {
                Value::String(s) => set.insert(key.clone(), s.clone()),
                Value::Null => {}
                other => {
                    return Err(CompositeError::MalformedValue {
                        category,
                        found: json_kind(other),
                    });
                }
            }
        }
        Ok(set)
    }

    /// Applies the per-category skip and fallback rules.
    pub fn resolve(&self) -> FeatureSelection {
        FeatureSelection {
            face_shape: self.get(Category::FaceShape).map(FaceShape::parse),
            facial_hair: self.get(Category::FacialHair).and_then(FacialHair::parse),
            hair_type: self.get(Category::HairType).map(HairType::parse),
            eyebrows: self.get(Category::Eyebrows).map(Eyebrows::parse),
            eye_shape: self.get(Category::EyeShape).map(EyeShape::parse),
            nose_type: self.get(Category::NoseType).map(NoseType::parse),
            mouth_shape: self.get(Category::MouthShape).map(MouthShape::parse),
            distinctive_marks: self.get(Category::DistinctiveMarks).and_then(DistinctiveMark::parse),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = FeatureSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
