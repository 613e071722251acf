//! Bundled vocabulary levels.

use vocab_core::{Dictionary, DictionaryError, Level};

const LEVEL1: &str = include_str!("../assets/level1.json");
const LEVEL2: &str = include_str!("../assets/level2.json");

/// The dictionary shipped with the app: two levels of increasing difficulty.
pub fn bundled_dictionary() -> Result<Dictionary, DictionaryError> {
    Dictionary::new(vec![
        Level::from_json("level1", "Level 1 - Apprentice", LEVEL1)?,
        Level::from_json("level2", "Level 2 - Adventurer", LEVEL2)?,
    ])
}
