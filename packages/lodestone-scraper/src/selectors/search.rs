//! Selectors for the search listings.
//!
//! One JSON asset per entity kind. Every search listing shares the same page
//! chrome (entries container, next button, page counter); only the entry
//! fields differ.

use serde::Deserialize;
use std::sync::Arc;

use super::{load_asset, SelectorInfo};
use crate::error::ConfigResult;

const CHARACTER_ASSET: &str = include_str!("../../assets/selectors/search/character.json");
const FREE_COMPANY_ASSET: &str = include_str!("../../assets/selectors/search/freecompany.json");
const LINKSHELL_ASSET: &str = include_str!("../../assets/selectors/search/linkshell.json");
const CWLS_ASSET: &str = include_str!("../../assets/selectors/search/cwls.json");
const PVP_TEAM_ASSET: &str = include_str!("../../assets/selectors/search/pvpteam.json");

/// Image layers of a crest, bottom to top.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CrestLayerSelectors {
    pub bottom: SelectorInfo,
    pub middle: SelectorInfo,
    pub top: SelectorInfo,
}

/// Character search listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CharacterSearchSelectors {
    pub entries_container: SelectorInfo,
    pub entry: CharacterEntrySelectors,
    pub list_next_button: SelectorInfo,
    pub page_info: SelectorInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CharacterEntrySelectors {
    pub root: SelectorInfo,
    pub avatar: SelectorInfo,
    pub id: SelectorInfo,
    pub lang: SelectorInfo,
    pub name: SelectorInfo,
    pub rank: SelectorInfo,
    pub rank_icon: SelectorInfo,
    pub server: SelectorInfo,
}

/// Free company search listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FreeCompanySearchSelectors {
    pub entries_container: SelectorInfo,
    pub entry: FreeCompanyEntrySelectors,
    pub list_next_button: SelectorInfo,
    pub page_info: SelectorInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FreeCompanyEntrySelectors {
    pub root: SelectorInfo,
    pub active: SelectorInfo,
    pub active_members: SelectorInfo,
    pub crest_layers: CrestLayerSelectors,
    pub estate_built: SelectorInfo,
    pub formed: SelectorInfo,
    pub grand_company: SelectorInfo,
    pub id: SelectorInfo,
    pub name: SelectorInfo,
    pub recruitment_open: SelectorInfo,
    pub server: SelectorInfo,
}

/// Linkshell search listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct LinkshellSearchSelectors {
    pub entries_container: SelectorInfo,
    pub entry: LinkshellEntrySelectors,
    pub list_next_button: SelectorInfo,
    pub page_info: SelectorInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct LinkshellEntrySelectors {
    pub root: SelectorInfo,
    pub id: SelectorInfo,
    pub name: SelectorInfo,
    pub server: SelectorInfo,
    pub active_members: SelectorInfo,
}

/// Cross-world linkshell search listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CwlsSearchSelectors {
    pub entries_container: SelectorInfo,
    pub entry: CwlsEntrySelectors,
    pub list_next_button: SelectorInfo,
    pub page_info: SelectorInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CwlsEntrySelectors {
    pub root: SelectorInfo,
    pub id: SelectorInfo,
    pub name: SelectorInfo,
    pub dc: SelectorInfo,
    pub active_members: SelectorInfo,
}

/// PVP team search listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PvpTeamSearchSelectors {
    pub entries_container: SelectorInfo,
    pub entry: PvpTeamEntrySelectors,
    pub list_next_button: SelectorInfo,
    pub page_info: SelectorInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PvpTeamEntrySelectors {
    pub root: SelectorInfo,
    pub id: SelectorInfo,
    pub name: SelectorInfo,
    pub dc: SelectorInfo,
    pub crest_layers: CrestLayerSelectors,
}

/// Selectors for every search listing, each shared by the collectors using it.
#[derive(Debug, Clone)]
pub struct SearchSelectors {
    pub character: Arc<CharacterSearchSelectors>,
    pub free_company: Arc<FreeCompanySearchSelectors>,
    pub linkshell: Arc<LinkshellSearchSelectors>,
    pub cwls: Arc<CwlsSearchSelectors>,
    pub pvp_team: Arc<PvpTeamSearchSelectors>,
}

impl SearchSelectors {
    /// Load the search selectors from the packed assets.
    ///
    /// Any asset that fails to decode fails the whole load.
    pub fn load() -> ConfigResult<Self> {
        Ok(Self {
            character: Arc::new(load_asset("search/character.json", CHARACTER_ASSET)?),
            free_company: Arc::new(load_asset("search/freecompany.json", FREE_COMPANY_ASSET)?),
            linkshell: Arc::new(load_asset("search/linkshell.json", LINKSHELL_ASSET)?),
            cwls: Arc::new(load_asset("search/cwls.json", CWLS_ASSET)?),
            pvp_team: Arc::new(load_asset("search/pvpteam.json", PVP_TEAM_ASSET)?),
        })
    }
}
