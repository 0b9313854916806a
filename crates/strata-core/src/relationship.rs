//! Application-to-application relationships.
//!
//! Relationship sheets list which applications exchange data, in which
//! direction and through which mechanism.

use serde::Deserialize;

/// Direction of a relationship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Data flows from the first application to the second.
    Forward,
    /// Data flows both ways.
    Bidirectional,
    /// The first application depends on the second.
    DependsOn,
}

/// Transport used by a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mechanism {
    Fileshare,
    Ftp,
    Api,
    Other,
}

/// One row of a relationship sheet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Relationship {
    #[serde(rename = "App-1")]
    source: String,

    #[serde(rename = "App-2")]
    target: String,

    #[serde(rename = "Direction", default)]
    direction: Option<String>,

    #[serde(rename = "Mechanism", default)]
    mechanism: Option<String>,

    #[serde(rename = "Topic", default)]
    topic: Option<String>,
}

impl Relationship {
    /// Creates a forward relationship without mechanism or topic.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            direction: None,
            mechanism: None,
            topic: None,
        }
    }

    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    pub fn with_mechanism(mut self, mechanism: impl Into<String>) -> Self {
        self.mechanism = Some(mechanism.into());
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Trims surrounding whitespace from the application names.
    pub fn trimmed(mut self) -> Self {
        self.source = self.source.trim().to_string();
        self.target = self.target.trim().to_string();
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the parsed direction; unknown values read as [`Direction::Forward`].
    pub fn direction(&self) -> Direction {
        match normalized(self.direction.as_deref()).as_str() {
            "bi-directional" => Direction::Bidirectional,
            "depends on" => Direction::DependsOn,
            _ => Direction::Forward,
        }
    }

    /// Returns the parsed mechanism; unknown values read as [`Mechanism::Other`].
    pub fn mechanism(&self) -> Mechanism {
        match normalized(self.mechanism.as_deref()).as_str() {
            "fileshare" => Mechanism::Fileshare,
            "ftp" => Mechanism::Ftp,
            "api" => Mechanism::Api,
            _ => Mechanism::Other,
        }
    }

    /// Returns the topic, if the row has a non-empty one.
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref().filter(|topic| !topic.trim().is_empty())
    }
}

fn normalized(value: Option<&str>) -> String {
    value.unwrap_or_default().trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing() {
        let rel = Relationship::new("A", "B").with_direction(" Bi-Directional ");
        assert_eq!(rel.direction(), Direction::Bidirectional);

        let rel = Relationship::new("A", "B").with_direction("Depends On");
        assert_eq!(rel.direction(), Direction::DependsOn);

        assert_eq!(Relationship::new("A", "B").direction(), Direction::Forward);
    }

    #[test]
    fn test_mechanism_parsing() {
        let rel = Relationship::new("A", "B").with_mechanism("API");
        assert_eq!(rel.mechanism(), Mechanism::Api);

        let rel = Relationship::new("A", "B").with_mechanism("queue");
        assert_eq!(rel.mechanism(), Mechanism::Other);
    }

    #[test]
    fn test_blank_topic_is_none() {
        let rel = Relationship::new("A", "B").with_topic("  ");
        assert_eq!(rel.topic(), None);

        let rel = Relationship::new("A", "B").with_topic("Invoices");
        assert_eq!(rel.topic(), Some("Invoices"));
    }
}
