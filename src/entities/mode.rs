use serde::{Deserialize, Serialize};

/// The two mutually exclusive browsing states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Restaurant,
    #[serde(alias = "evacuation")]
    Shelter,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Restaurant
    }
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Restaurant => "restaurant",
            Mode::Shelter => "shelter",
        }
    }
}

#[test]
fn evacuation_is_an_alias_for_shelter() {
    let mode: Mode = serde_json::from_str("\"evacuation\"").unwrap();
    assert_eq!(mode, Mode::Shelter);

    assert_eq!(serde_json::to_string(&Mode::Shelter).unwrap(), "\"shelter\"");
}
