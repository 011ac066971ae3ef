//! Search options and the listing URLs they produce.
//!
//! Each options struct knows its listing path and renders its filters as
//! query parameters. Unset filters are left out of the query entirely.

use serde::{Deserialize, Serialize};
use url::form_urlencoded::Serializer;
use url::{Url, UrlQuery};

use crate::error::CrawlResult;
use crate::types::config::Locale;

type QueryPairs<'a> = Serializer<'a, UrlQuery<'a>>;

/// A search listing query.
pub trait SearchQuery {
    /// Listing path below the Lodestone root.
    const PATH: &'static str;

    /// Append this query's parameters.
    fn append_pairs(&self, pairs: &mut QueryPairs<'_>);

    /// First page of the listing for `locale`.
    fn to_url(&self, locale: Locale) -> CrawlResult<Url> {
        let mut url = locale.url(Self::PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            self.append_pairs(&mut pairs);
        }
        Ok(url)
    }
}

/// Sort order shared by the search listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOrder {
    NameAsc,
    NameDesc,
    WorldAsc,
    WorldDesc,
    MembersDesc,
    MembersAsc,
}

impl SearchOrder {
    fn query_value(&self) -> &'static str {
        match self {
            SearchOrder::NameAsc => "1",
            SearchOrder::NameDesc => "2",
            SearchOrder::WorldAsc => "3",
            SearchOrder::WorldDesc => "4",
            SearchOrder::MembersDesc => "5",
            SearchOrder::MembersAsc => "6",
        }
    }
}

/// Active-member bracket filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberCount {
    OneToTen,
    ElevenToThirty,
    ThirtyOneToFifty,
    FiftyOnePlus,
}

impl MemberCount {
    fn query_value(&self) -> &'static str {
        match self {
            MemberCount::OneToTen => "1-10",
            MemberCount::ElevenToThirty => "11-30",
            MemberCount::ThirtyOneToFifty => "31-50",
            MemberCount::FiftyOnePlus => "51-",
        }
    }
}

/// Grand company filter ids as the listing numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrandCompanyFilter {
    None,
    Maelstrom,
    TwinAdder,
    ImmortalFlames,
}

impl GrandCompanyFilter {
    fn query_value(&self) -> &'static str {
        match self {
            GrandCompanyFilter::None => "0",
            GrandCompanyFilter::Maelstrom => "1",
            GrandCompanyFilter::TwinAdder => "2",
            GrandCompanyFilter::ImmortalFlames => "3",
        }
    }
}

/// World scope: `worldname` takes a world or `_dc_<DataCenter>`.
fn append_world(pairs: &mut QueryPairs<'_>, world: &Option<String>, data_center: &Option<String>) {
    if let Some(world) = world.as_deref().filter(|w| !w.is_empty()) {
        pairs.append_pair("worldname", world);
    } else if let Some(dc) = data_center.as_deref().filter(|d| !d.is_empty()) {
        pairs.append_pair("worldname", &format!("_dc_{dc}"));
    }
}

fn append_common(
    pairs: &mut QueryPairs<'_>,
    query: &str,
    order: Option<SearchOrder>,
    member_count: Option<MemberCount>,
) {
    pairs.append_pair("q", query);
    if let Some(count) = member_count {
        pairs.append_pair("character_count", count.query_value());
    }
    if let Some(order) = order {
        pairs.append_pair("order", order.query_value());
    }
}

/// Character search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterOptions {
    pub name: String,
    pub world: Option<String>,
    pub data_center: Option<String>,
    pub grand_companies: Vec<GrandCompanyFilter>,
    /// Blog language codes (`ja`, `en`, `de`, `fr`)
    pub blog_languages: Vec<String>,
    pub order: Option<SearchOrder>,
}

impl CharacterOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_world(mut self, world: impl Into<String>) -> Self {
        self.world = Some(world.into());
        self
    }

    pub fn with_data_center(mut self, dc: impl Into<String>) -> Self {
        self.data_center = Some(dc.into());
        self
    }

    pub fn with_grand_company(mut self, gc: GrandCompanyFilter) -> Self {
        self.grand_companies.push(gc);
        self
    }

    pub fn with_blog_language(mut self, lang: impl Into<String>) -> Self {
        self.blog_languages.push(lang.into());
        self
    }

    pub fn with_order(mut self, order: SearchOrder) -> Self {
        self.order = Some(order);
        self
    }
}

impl SearchQuery for CharacterOptions {
    const PATH: &'static str = "character/";

    fn append_pairs(&self, pairs: &mut QueryPairs<'_>) {
        append_common(pairs, &self.name, self.order, None);
        append_world(pairs, &self.world, &self.data_center);
        for gc in &self.grand_companies {
            pairs.append_pair("gcid", gc.query_value());
        }
        for lang in &self.blog_languages {
            pairs.append_pair("blog_lang", lang);
        }
    }
}

/// Free company search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeCompanyOptions {
    pub name: String,
    pub world: Option<String>,
    pub data_center: Option<String>,
    pub grand_companies: Vec<GrandCompanyFilter>,
    pub member_count: Option<MemberCount>,
    pub order: Option<SearchOrder>,
}

impl FreeCompanyOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_world(mut self, world: impl Into<String>) -> Self {
        self.world = Some(world.into());
        self
    }

    pub fn with_data_center(mut self, dc: impl Into<String>) -> Self {
        self.data_center = Some(dc.into());
        self
    }

    pub fn with_grand_company(mut self, gc: GrandCompanyFilter) -> Self {
        self.grand_companies.push(gc);
        self
    }

    pub fn with_member_count(mut self, count: MemberCount) -> Self {
        self.member_count = Some(count);
        self
    }

    pub fn with_order(mut self, order: SearchOrder) -> Self {
        self.order = Some(order);
        self
    }
}

impl SearchQuery for FreeCompanyOptions {
    const PATH: &'static str = "freecompany/";

    fn append_pairs(&self, pairs: &mut QueryPairs<'_>) {
        append_common(pairs, &self.name, self.order, self.member_count);
        append_world(pairs, &self.world, &self.data_center);
        for gc in &self.grand_companies {
            pairs.append_pair("gcid", gc.query_value());
        }
    }
}

/// Linkshell search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkshellOptions {
    pub name: String,
    pub world: Option<String>,
    pub data_center: Option<String>,
    pub member_count: Option<MemberCount>,
    /// Only linkshells listed in the community finder
    pub community_finder_only: bool,
    pub order: Option<SearchOrder>,
}

impl LinkshellOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_world(mut self, world: impl Into<String>) -> Self {
        self.world = Some(world.into());
        self
    }

    pub fn with_data_center(mut self, dc: impl Into<String>) -> Self {
        self.data_center = Some(dc.into());
        self
    }

    pub fn with_member_count(mut self, count: MemberCount) -> Self {
        self.member_count = Some(count);
        self
    }

    pub fn community_finder_only(mut self) -> Self {
        self.community_finder_only = true;
        self
    }

    pub fn with_order(mut self, order: SearchOrder) -> Self {
        self.order = Some(order);
        self
    }
}

impl SearchQuery for LinkshellOptions {
    const PATH: &'static str = "linkshell/";

    fn append_pairs(&self, pairs: &mut QueryPairs<'_>) {
        append_common(pairs, &self.name, self.order, self.member_count);
        append_world(pairs, &self.world, &self.data_center);
        if self.community_finder_only {
            pairs.append_pair("cf_public", "1");
        }
    }
}

/// Cross-world linkshell search. Scoped by data center only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CwlsOptions {
    pub name: String,
    pub data_center: Option<String>,
    pub member_count: Option<MemberCount>,
    pub community_finder_only: bool,
    pub order: Option<SearchOrder>,
}

impl CwlsOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_data_center(mut self, dc: impl Into<String>) -> Self {
        self.data_center = Some(dc.into());
        self
    }

    pub fn with_member_count(mut self, count: MemberCount) -> Self {
        self.member_count = Some(count);
        self
    }

    pub fn community_finder_only(mut self) -> Self {
        self.community_finder_only = true;
        self
    }

    pub fn with_order(mut self, order: SearchOrder) -> Self {
        self.order = Some(order);
        self
    }
}

impl SearchQuery for CwlsOptions {
    const PATH: &'static str = "crossworld_linkshell/";

    fn append_pairs(&self, pairs: &mut QueryPairs<'_>) {
        append_common(pairs, &self.name, self.order, self.member_count);
        if let Some(dc) = self.data_center.as_deref().filter(|d| !d.is_empty()) {
            pairs.append_pair("dcname", dc);
        }
        if self.community_finder_only {
            pairs.append_pair("cf_public", "1");
        }
    }
}

/// PVP team search. Scoped by data center only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PvpTeamOptions {
    pub name: String,
    pub data_center: Option<String>,
    pub community_finder_only: bool,
    pub order: Option<SearchOrder>,
}

impl PvpTeamOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_data_center(mut self, dc: impl Into<String>) -> Self {
        self.data_center = Some(dc.into());
        self
    }

    pub fn community_finder_only(mut self) -> Self {
        self.community_finder_only = true;
        self
    }

    pub fn with_order(mut self, order: SearchOrder) -> Self {
        self.order = Some(order);
        self
    }
}

impl SearchQuery for PvpTeamOptions {
    const PATH: &'static str = "pvpteam/";

    fn append_pairs(&self, pairs: &mut QueryPairs<'_>) {
        append_common(pairs, &self.name, self.order, None);
        if let Some(dc) = self.data_center.as_deref().filter(|d| !d.is_empty()) {
            pairs.append_pair("dcname", dc);
        }
        if self.community_finder_only {
            pairs.append_pair("cf_public", "1");
        }
    }
}
