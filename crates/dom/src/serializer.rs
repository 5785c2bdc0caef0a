//! Landmark outline serializer
//!
//! Renders `describe_all()` output as an indented text outline, one landmark
//! per line, nested by landmark depth:
//!
//! ```text
//! banner
//!   navigation "Site"
//! main
//! ```

use crate::landmark::LandmarkSummary;
use crate::utils;

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    pub indent: String,
    pub max_label_length: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            max_label_length: 80,
        }
    }
}

/// Landmark outline serializer
pub struct OutlineSerializer {
    config: SerializerConfig,
}

impl OutlineSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    pub fn serialize(&self, landmarks: &[LandmarkSummary]) -> String {
        let mut output = String::with_capacity(landmarks.len() * 24);

        for landmark in landmarks {
            output.push_str(&self.config.indent.repeat(landmark.depth));
            output.push_str(landmark.role.as_str());
            if !landmark.label.is_empty() {
                let label = utils::cap_text_length(&landmark.label, self.config.max_label_length);
                output.push_str(&format!(" \"{}\"", label));
            }
            output.push('\n');
        }

        output
    }
}

impl Default for OutlineSerializer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::LandmarkRole;

    fn summary(depth: usize, role: LandmarkRole, label: &str) -> LandmarkSummary {
        LandmarkSummary {
            depth,
            role,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_outline() {
        let outline = OutlineSerializer::new().serialize(&[
            summary(0, LandmarkRole::Banner, ""),
            summary(1, LandmarkRole::Navigation, "Site"),
            summary(0, LandmarkRole::Main, ""),
        ]);
        assert_eq!(outline, "banner\n  navigation \"Site\"\nmain\n");
    }

    #[test]
    fn test_long_labels_are_capped() {
        let serializer = OutlineSerializer::with_config(SerializerConfig {
            indent: "\t".to_string(),
            max_label_length: 4,
        });
        let outline = serializer.serialize(&[summary(1, LandmarkRole::Search, "Search the site")]);
        assert_eq!(outline, "\tsearch \"Sear...\"\n");
    }

    #[test]
    fn test_empty_outline() {
        assert_eq!(OutlineSerializer::new().serialize(&[]), "");
    }
}
