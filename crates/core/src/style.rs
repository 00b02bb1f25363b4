//! Inline `style` attribute parsing and serialization.

use std::fmt;

/// Ordered map of CSS declarations taken from a `style` attribute.
///
/// Property names are lowercased on parse and compared case-insensitively.
/// Overwriting a property keeps its original position; new properties are
/// appended. Serialization is `prop:value;prop:value` with no trailing `;`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclarations {
    entries: Vec<(String, String)>,
}

impl StyleDeclarations {
    /// Creates an empty declaration map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `style` attribute value.
    ///
    /// Declarations without a `:` or with an empty property name are dropped.
    /// A repeated property keeps its first position and its last value.
    pub fn parse(style: &str) -> Self {
        let mut declarations = Self::new();
        for declaration in style.split(';') {
            let Some((property, value)) = declaration.split_once(':') else {
                continue;
            };
            let property = property.trim();
            if property.is_empty() {
                continue;
            }
            declarations.set(property, value.trim());
        }
        declarations
    }

    /// Returns the value of `property`, if declared.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value.as_str())
    }

    /// Returns true if `property` is declared.
    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    /// Sets `property` to `value`.
    pub fn set(&mut self, property: &str, value: &str) {
        let property = property.to_ascii_lowercase();
        match self.entries.iter_mut().find(|(name, _)| *name == property) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((property, value.to_string())),
        }
    }

    /// Removes `property`, returning its previous value.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let index = self
            .entries
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(property))?;
        Some(self.entries.remove(index).1)
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no declarations are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl fmt::Display for StyleDeclarations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}:{}", name, value)?;
        }
        Ok(())
    }
}

/// Numeric value of the leading number in a CSS length (`"1.5px"` → 1.5).
///
/// Returns 0 when the value does not start with a number (`"medium"`, `""`).
pub fn leading_number(value: &str) -> f64 {
    let trimmed = value.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        if fraction_end > fraction_start {
            end = fraction_end;
        }
    }
    if end == digits_start {
        return 0.0;
    }

    trimmed[..end].parse().unwrap_or(0.0)
}
