use crate::go::{Color, Point};

/// A single SGF node, an ordered collection of properties.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Node {
    properties: Vec<(String, Vec<String>)>,
}

impl Node {
    /// Iterates over the properties in the order they were written.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// All values of a property.
    pub fn values(&self, key: &str) -> &[String] {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
            .unwrap_or_default()
    }

    /// The first value of a property.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values(key).first().map(String::as_str)
    }

    /// Whether this node carries a property.
    pub fn has(&self, key: &str) -> bool {
        self.properties.iter().any(|(k, _)| k == key)
    }

    /// Appends a value to a property, unless it's already there.
    pub fn add_value(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.properties.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) if values.contains(&value) => {}
            Some((_, values)) => values.push(value),
            None => self.properties.push((key.to_string(), vec![value])),
        }
    }

    /// Replaces all values of a property with a single one.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.properties.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => *values = vec![value],
            None => self.properties.push((key.to_string(), vec![value])),
        }
    }

    /// Inserts text at the top of the comment, above whatever was written before.
    pub fn prepend_comment(&mut self, text: &str) {
        let comment = match self.value("C").map(str::trim) {
            Some(c) if !c.is_empty() => format!("{text}\n\n{c}"),
            _ => text.to_string(),
        };

        self.set_value("C", comment);
    }

    /// The color of the move played at this node, if any.
    pub fn turn(&self) -> Option<Color> {
        [Color::Black, Color::White]
            .into_iter()
            .find(|c| self.has(c.property()))
    }

    /// The point played at this node.
    ///
    /// Returns [`None`] if no move is played or if the move is a pass.
    pub fn point(&self, size: u8) -> Option<Point> {
        let color = self.turn()?;
        Point::from_sgf(self.value(color.property())?, size)
    }

    /// Stones placed outright by this node, as opposed to played.
    pub fn setup(&self, size: u8) -> Vec<(Color, Point)> {
        [Color::Black, Color::White]
            .into_iter()
            .flat_map(move |c| {
                self.values(c.setup_property())
                    .iter()
                    .flat_map(move |v| Point::expand_sgf(v, size))
                    .map(move |p| (c, p))
            })
            .collect()
    }

    /// Whether this node neither plays nor places a stone.
    pub fn is_empty(&self) -> bool {
        !["B", "W", "AB", "AW"].iter().any(|k| self.has(k))
    }
}
