use std::fmt;

use serde::Deserialize;

/// A character as served by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub ki: String,
    #[serde(default)]
    pub max_ki: String,
    #[serde(default)]
    pub race: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub affiliation: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.race.is_empty() {
            write!(f, " ({})", self.race)?;
        }
        if !self.ki.is_empty() {
            write!(f, " ki {}", self.ki)?;
        }
        Ok(())
    }
}

impl Character {
    /// Multi-line description for the `info` command.
    pub fn details(&self) -> String {
        let mut lines = vec![format!("#{} {}", self.id, self.name)];
        lines.push(format!(
            "  Race: {} | Gender: {} | Affiliation: {}",
            or_unknown(&self.race),
            or_unknown(&self.gender),
            or_unknown(&self.affiliation)
        ));
        lines.push(format!(
            "  Ki: {} (max {})",
            or_unknown(&self.ki),
            or_unknown(&self.max_ki)
        ));
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("  {description}"));
        }
        if let Some(image) = &self.image {
            lines.push(format!("  Image: {image}"));
        }
        lines.join("\n")
    }
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() {
        "?"
    } else {
        value
    }
}
