//! Users listing state
//!
//! Filter criteria of the users screen and the `page`/`limit` pair kept in
//! the location query string.

use std::sync::Arc;

use url::form_urlencoded;

use crate::components::composite::data_table::PageWindow;
use crate::constants::DEFAULT_PAGE_SIZE;
use crate::domain::{User, UserRole};
use crate::error::{Error, Result};

const PAGE_PARAM: &str = "page";
const LIMIT_PARAM: &str = "limit";

#[derive(Clone, Debug, Default, PartialEq)]
pub enum UsersLoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(Arc<str>),
}

impl UsersLoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UsersLoadState::Loading)
    }
}

/// Role criterion of the filter bar
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoleFilter {
    #[default]
    All,
    Only(UserRole),
}

impl RoleFilter {
    pub fn parse(value: &str) -> Result<Self> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(RoleFilter::All);
        }
        value.parse().map(RoleFilter::Only)
    }

    fn matches(self, role: UserRole) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Only(expected) => expected == role,
        }
    }
}

/// Status criterion of the filter bar
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "inactive" => Ok(StatusFilter::Inactive),
            other => Err(Error::InvalidArgument {
                name: "status".to_string(),
                value: other.to_string(),
            }),
        }
    }

    fn matches(self, is_active: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => is_active,
            StatusFilter::Inactive => !is_active,
        }
    }
}

/// Filter state of the users table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Free text searched in name and email
    pub query: String,
    pub role: RoleFilter,
    pub status: StatusFilter,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        let query = self.query.trim().to_lowercase();
        let text_matches = query.is_empty()
            || user.name.to_lowercase().contains(&query)
            || user.email.to_lowercase().contains(&query);

        text_matches && self.role.matches(user.role) && self.status.matches(user.is_active)
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.role == RoleFilter::All && self.status == StatusFilter::All
    }
}

/// Pagination parameters mirrored in the location query string.
///
/// `page` is 1-based. Parameters other than `page` and `limit` are kept so
/// writing the query back does not drop them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingQuery {
    page: usize,
    limit: usize,
    params: Vec<(String, String)>,
}

impl ListingQuery {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            params: Vec::new(),
        }
    }

    /// Read `page` and `limit`; missing, invalid or non-positive values use
    /// page 1 and `default_limit`.
    pub fn parse(query: &str, default_limit: usize) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

        let positive = |name: &str| {
            params
                .iter()
                .find(|(key, _)| key == name)
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .filter(|&n| n > 0)
        };

        Self {
            page: positive(PAGE_PARAM).unwrap_or(1),
            limit: positive(LIMIT_PARAM).unwrap_or(default_limit.max(1)),
            params,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Change the page size and go back to the first page
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.page = 1;
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page - 1, self.limit)
    }

    /// Serialize back, replacing `page` and `limit` in place
    pub fn to_query_string(&self) -> String {
        let page = self.page.to_string();
        let limit = self.limit.to_string();
        let mut wrote_page = false;
        let mut wrote_limit = false;

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            match key.as_str() {
                PAGE_PARAM if !wrote_page => {
                    serializer.append_pair(key, &page);
                    wrote_page = true;
                }
                LIMIT_PARAM if !wrote_limit => {
                    serializer.append_pair(key, &limit);
                    wrote_limit = true;
                }
                PAGE_PARAM | LIMIT_PARAM => {}
                _ => {
                    serializer.append_pair(key, value);
                }
            }
        }
        if !wrote_page {
            serializer.append_pair(PAGE_PARAM, &page);
        }
        if !wrote_limit {
            serializer.append_pair(LIMIT_PARAM, &limit);
        }
        serializer.finish()
    }
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}
