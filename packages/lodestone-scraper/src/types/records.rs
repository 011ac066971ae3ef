//! Records emitted by the collectors.
//!
//! Fields the page did not render, or rendered in a form that did not parse,
//! hold their zero value. Page-scoped context (achievement totals, page
//! position) is shared by `Arc` between every record from the same page.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::tables::NamedEntity;
use crate::types::page::PageInfo;

/// Totals shown in the header of a character's achievement list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AchievementTotals {
    pub total_achievements: u32,
    pub total_achievement_points: u32,
}

/// One unlocked achievement.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementInfo {
    pub id: u32,
    pub date: Option<DateTime<Utc>>,
    pub totals: Arc<AchievementTotals>,
}

/// Image URLs making up a crest, bottom to top.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrestLayers {
    pub bottom: String,
    pub middle: String,
    pub top: String,
}

/// One free company in a search listing.
#[derive(Debug, Clone, Serialize)]
pub struct FreeCompanySearchResult {
    pub id: String,
    pub name: String,
    pub active: String,
    pub recruitment: String,
    pub estate: String,
    pub crest_layers: CrestLayers,
    pub grand_company: NamedEntity,
    pub world: String,
    pub dc: String,
    pub formed: Option<DateTime<Utc>>,
    pub active_members: u32,
    pub page: Arc<PageInfo>,
}

/// One character in a search listing.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSearchResult {
    pub id: u32,
    pub name: String,
    pub avatar: String,
    pub lang: String,
    pub rank: String,
    pub rank_icon: String,
    pub world: String,
    pub dc: String,
    pub page: Arc<PageInfo>,
}

/// One linkshell in a search listing.
#[derive(Debug, Clone, Serialize)]
pub struct LinkshellSearchResult {
    pub id: String,
    pub name: String,
    pub world: String,
    pub dc: String,
    pub active_members: u32,
    pub page: Arc<PageInfo>,
}

/// One cross-world linkshell in a search listing.
#[derive(Debug, Clone, Serialize)]
pub struct CwlsSearchResult {
    pub id: String,
    pub name: String,
    pub dc: String,
    pub active_members: u32,
    pub page: Arc<PageInfo>,
}

/// One PVP team in a search listing.
#[derive(Debug, Clone, Serialize)]
pub struct PvpTeamSearchResult {
    pub id: String,
    pub name: String,
    pub dc: String,
    pub crest_layers: CrestLayers,
    pub page: Arc<PageInfo>,
}
