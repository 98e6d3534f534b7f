use serde::Deserialize;

/// Recipients as a JSON array or a single string separated by whitespace,
/// commas or semicolons.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NumbersInput {
    List(Vec<String>),
    Text(String),
}

impl NumbersInput {
    pub fn into_list(self) -> Vec<String> {
        match self {
            Self::List(numbers) => numbers
                .into_iter()
                .filter(|n| !n.trim().is_empty())
                .collect(),
            Self::Text(text) => text
                .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
                .filter(|n| !n.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}
