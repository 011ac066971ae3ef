//! Selectors for character profile pages.

use serde::Deserialize;
use std::sync::Arc;

use super::{load_asset, SelectorInfo};
use crate::error::ConfigResult;

const ACHIEVEMENTS_ASSET: &str = include_str!("../../assets/selectors/profile/achievements.json");

/// Selectors for the achievement list of a character.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AchievementSelectors {
    pub total_achievements: SelectorInfo,
    pub achievement_points: SelectorInfo,
    pub list: SelectorInfo,
    pub entry: SelectorInfo,
    pub id: SelectorInfo,
    pub time: SelectorInfo,
    pub list_next_button: SelectorInfo,
}

/// Selectors for profile pages.
#[derive(Debug, Clone)]
pub struct ProfileSelectors {
    pub achievements: Arc<AchievementSelectors>,
}

impl ProfileSelectors {
    /// Load the profile selectors from the packed assets.
    pub fn load() -> ConfigResult<Self> {
        Ok(Self {
            achievements: Arc::new(load_asset("profile/achievements.json", ACHIEVEMENTS_ASSET)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_profile_assets_load() {
        let selectors = ProfileSelectors::load().unwrap();
        assert_eq!(selectors.achievements.entry.as_str(), "li.entry");
        assert_eq!(selectors.achievements.list_next_button.as_str(), ".btn__pager__next");
    }
}
