//! Per-kind node settings.
//!
//! Image and character nodes have typed settings; every other kind keeps an
//! open key/value bag. Typed settings also carry an `extra` map so keys the
//! settings panel writes that this crate does not know survive edits.
//!
//! Every field is optional. Readers go through accessor methods that fall
//! back to the defaults the settings panel displays.

use crate::error::{VcError, VcResult};
use crate::model::NodeKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;
use std::str::FromStr;

pub type MetadataMap = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "settings", rename_all = "camelCase")]
pub enum NodeMetadata {
    Image(ImageSettings),
    Character(CharacterSettings),
    Generic(MetadataMap),
}

impl Default for NodeMetadata {
    fn default() -> Self {
        Self::Generic(MetadataMap::new())
    }
}

impl NodeMetadata {
    /// Empty settings of the variant matching `kind`.
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Image => Self::Image(ImageSettings::default()),
            NodeKind::Character => Self::Character(CharacterSettings::default()),
            _ => Self::Generic(MetadataMap::new()),
        }
    }

    /// Merge a partial object of settings into this metadata.
    ///
    /// `null` clears a key. Values whose type does not fit a typed field are
    /// dropped with a warning; the rest of the patch still applies. Returns
    /// `true` if anything changed.
    pub fn apply_patch(&mut self, patch: &MetadataMap) -> bool {
        match self {
            NodeMetadata::Generic(map) => {
                let before = map.clone();
                for (key, value) in patch {
                    if value.is_null() {
                        map.remove(key);
                    } else {
                        map.insert(key.clone(), value.clone());
                    }
                }
                *map != before
            }
            NodeMetadata::Image(settings) => merge_typed(settings, patch),
            NodeMetadata::Character(settings) => merge_typed(settings, patch),
        }
    }

    /// Flattened view of the settings, as the settings panel sees them.
    pub fn to_map(&self) -> MetadataMap {
        let value = match self {
            NodeMetadata::Generic(map) => return map.clone(),
            NodeMetadata::Image(s) => serde_json::to_value(s),
            NodeMetadata::Character(s) => serde_json::to_value(s),
        };
        match value {
            Ok(Value::Object(map)) => map,
            _ => MetadataMap::new(),
        }
    }
}

/// Decode a metadata patch handed over as JSON text.
///
/// # Errors
/// `VcError::Json` for malformed text, `VcError::Metadata` when the text is
/// valid JSON but not an object.
pub fn parse_patch(text: &str) -> VcResult<MetadataMap> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(VcError::metadata(format!(
            "patch must be a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Apply `patch` key by key through the serde representation of `target`,
/// so one badly typed value cannot discard the others.
fn merge_typed<T>(target: &mut T, patch: &MetadataMap) -> bool
where
    T: Serialize + DeserializeOwned + PartialEq,
{
    let mut changed = false;
    for (key, value) in patch {
        let mut current = match serde_json::to_value(&*target) {
            Ok(Value::Object(map)) => map,
            _ => return changed,
        };
        if value.is_null() {
            current.remove(key);
        } else {
            current.insert(key.clone(), value.clone());
        }
        match serde_json::from_value::<T>(Value::Object(current)) {
            Ok(next) => {
                if next != *target {
                    *target = next;
                    changed = true;
                }
            }
            Err(err) => log::warn!("ignoring metadata field `{key}`: {err}"),
        }
    }
    changed
}

// ─── Lenient field decoding ──────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

/// Accept `1024` as well as `"1024"`; an empty string means unset.
fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

/// Accept free text, or a number typed into a text field.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|v| match v {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        }),
    )
}

// ─── Image settings ──────────────────────────────────────────────────────

pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub creativity: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub seed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyper_realistic: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub upscaling: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub noise_reduction: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub sharpening: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_instruction: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub edit_strength: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub quality: Option<f64>,

    /// Keys without a typed field.
    #[serde(flatten)]
    pub extra: MetadataMap,
}

impl ImageSettings {
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_IMAGE_MODEL)
    }

    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or("")
    }

    /// Output dimensions in pixels; 1024×1024 unless set.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width.unwrap_or(1024), self.height.unwrap_or(1024))
    }

    pub fn creativity(&self) -> f64 {
        self.creativity.unwrap_or(0.7)
    }

    pub fn hyper_realistic(&self) -> bool {
        self.hyper_realistic.unwrap_or(false)
    }

    pub fn upscaling(&self) -> f64 {
        self.upscaling.unwrap_or(1.0)
    }

    pub fn noise_reduction(&self) -> f64 {
        self.noise_reduction.unwrap_or(0.0)
    }

    pub fn sharpening(&self) -> f64 {
        self.sharpening.unwrap_or(0.0)
    }

    pub fn edit_mode(&self) -> &str {
        self.edit_mode.as_deref().unwrap_or("inpaint")
    }

    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or("png")
    }
}

// ─── Character settings ──────────────────────────────────────────────────

/// Big-five personality sliders, each 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Personality {
    pub extroversion: u8,
    pub agreeableness: u8,
    pub conscientiousness: u8,
    pub emotional_stability: u8,
    pub openness: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_story: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eye_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinctive_features: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub extroversion: Option<u8>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub agreeableness: Option<u8>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub conscientiousness: Option<u8>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub emotional_stability: Option<u8>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub openness: Option<u8>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference_seed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_prompt_template: Option<String>,

    /// Keys without a typed field.
    #[serde(flatten)]
    pub extra: MetadataMap,
}

impl CharacterSettings {
    pub fn hair_color(&self) -> &str {
        self.hair_color.as_deref().unwrap_or("black")
    }

    pub fn eye_color(&self) -> &str {
        self.eye_color.as_deref().unwrap_or("brown")
    }

    pub fn build(&self) -> &str {
        self.build.as_deref().unwrap_or("average")
    }

    /// Slider values, 50 where unset.
    pub fn personality(&self) -> Personality {
        Personality {
            extroversion: self.extroversion.unwrap_or(50),
            agreeableness: self.agreeableness.unwrap_or(50),
            conscientiousness: self.conscientiousness.unwrap_or(50),
            emotional_stability: self.emotional_stability.unwrap_or(50),
            openness: self.openness.unwrap_or(50),
        }
    }
}
