//! Users Controller
//!
//! Owns the users table: filter bar state, `page`/`limit` query parameters,
//! the reported total and rows being refreshed.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use super::columns::{
    ACTIONS_COLUMN, EDIT_ACTION, UserTableActions, VIEW_DETAILS_ACTION, user_columns,
};
use crate::components::composite::data_table::{
    DataTable, Pagination, PaginationConfig, SortDescriptor, TableView,
};
use crate::domain::User;
use crate::error::{Error, Result};
use crate::states::{ListingQuery, RoleFilter, StatusFilter, TableConfig, UserFilter, UsersLoadState};

/// Keep only deactivated accounts, as the inactive tab does
pub fn inactive_only(users: impl IntoIterator<Item = User>) -> Vec<User> {
    users.into_iter().filter(|u| !u.is_active).collect()
}

/// Users page controller
pub struct UsersTable {
    table: DataTable<User, UserFilter>,
    query: ListingQuery,
    total: Arc<AtomicUsize>,
    refreshing: Arc<RwLock<HashSet<String>>>,
    load_state: UsersLoadState,
    page_size_options: Vec<usize>,
}

impl UsersTable {
    /// Create the table from config and the current location query string
    pub fn new(config: &TableConfig, query_string: &str, actions: &UserTableActions) -> Self {
        let query = ListingQuery::parse(query_string, config.page_size);
        let total = Arc::new(AtomicUsize::new(0));
        let refreshing: Arc<RwLock<HashSet<String>>> = Arc::default();

        let reported = total.clone();
        let pagination = PaginationConfig::new(query.window()).on_total_change(move |count| {
            debug!(total = count, "Users total changed");
            reported.store(count, Ordering::Relaxed);
        });

        let pending = refreshing.clone();
        let table = DataTable::new(user_columns(actions), |u: &User| u.id.clone())
            .with_filter(|u: &User, filter: &UserFilter| filter.matches(u))
            .with_controlled_filter_state(UserFilter::default(), |filter| {
                debug!(filter = ?filter, "Users filter change requested");
            })
            .with_pagination(pagination)
            .with_skeleton_rows(config.skeleton_rows)
            .with_row_skeleton_predicate(move |u: &User| {
                pending.read().is_ok_and(|ids| ids.contains(&u.id))
            })
            .with_empty_fallback(config.empty_message.clone());

        info!(page = query.page(), limit = query.limit(), "Users table created");

        Self {
            table,
            query,
            total,
            refreshing,
            load_state: UsersLoadState::Idle,
            page_size_options: config.page_size_options.clone(),
        }
    }

    // ==================== Data ====================

    pub fn load_state(&self) -> &UsersLoadState {
        &self.load_state
    }

    pub fn set_loading(&mut self) {
        self.load_state = UsersLoadState::Loading;
        self.table.set_loading(true);
    }

    pub fn set_users(&mut self, users: Vec<User>) {
        info!(count = users.len(), "Users loaded");
        self.table.set_data(Arc::new(users));
        self.load_state = UsersLoadState::Ready;
        self.table.set_loading(false);
        self.clamp_page();
    }

    pub fn set_error(&mut self, message: impl Into<Arc<str>>) {
        let message = message.into();
        warn!(error = %message, "Failed to load users");
        self.load_state = UsersLoadState::Error(message);
        self.table.set_loading(false);
    }

    /// Draw these rows as placeholders until [`Self::finish_refresh`]
    pub fn mark_refreshing(&mut self, ids: impl IntoIterator<Item = String>) {
        if let Ok(mut pending) = self.refreshing.write() {
            pending.extend(ids);
            debug!(rows = pending.len(), "Rows refreshing");
        }
        self.table.set_loading(true);
    }

    pub fn finish_refresh(&mut self) {
        if let Ok(mut pending) = self.refreshing.write() {
            pending.clear();
        }
        self.table.set_loading(self.load_state.is_loading());
    }

    // ==================== Filter ====================

    pub fn filter(&self) -> &UserFilter {
        self.table.filter_state()
    }

    /// Apply a new filter and go back to the first page
    pub fn set_filter(&mut self, filter: UserFilter) {
        self.table.set_filter_state(filter.clone());
        self.table.sync_filter_state(filter);
        self.set_page(1);
    }

    pub fn search(&mut self, query: impl Into<String>) {
        let filter = UserFilter {
            query: query.into(),
            ..self.filter().clone()
        };
        self.set_filter(filter);
    }

    pub fn select_role(&mut self, role: RoleFilter) {
        let filter = UserFilter {
            role,
            ..self.filter().clone()
        };
        self.set_filter(filter);
    }

    pub fn select_status(&mut self, status: StatusFilter) {
        let filter = UserFilter {
            status,
            ..self.filter().clone()
        };
        self.set_filter(filter);
    }

    // ==================== Sort ====================

    pub fn sort(&self) -> Option<&SortDescriptor> {
        self.table.sort()
    }

    pub fn click_header(&mut self, column_id: &str) -> bool {
        self.table.click_header(column_id)
    }

    /// Sort by a column, failing when it has no sort key
    pub fn sort_by(&mut self, sort: Option<SortDescriptor>) -> Result<()> {
        if let Some(descriptor) = &sort {
            let known = self
                .table
                .columns()
                .iter()
                .any(|c| c.id == descriptor.column_id && c.has_sort_key());
            if !known {
                return Err(Error::UnknownColumn {
                    column_id: descriptor.column_id.clone(),
                });
            }
        }
        self.table.set_sort(sort);
        Ok(())
    }

    // ==================== Pagination ====================

    /// 1-based current page
    pub fn page(&self) -> usize {
        self.query.page()
    }

    pub fn limit(&self) -> usize {
        self.query.limit()
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.set_page(page);
        self.table.set_page_window(self.query.window());
        self.clamp_page();
    }

    pub fn prev_page(&mut self) {
        let index = self.page_model().prev_page_index();
        self.set_page(index + 1);
    }

    /// Stays on the last page
    pub fn next_page(&mut self) {
        let index = self.page_model().next_page_index();
        self.set_page(index + 1);
    }

    /// Footer model for the current window, clamped to the filtered total
    fn page_model(&mut self) -> Pagination {
        let total = self.total();
        Pagination::new(self.query.window(), total)
    }

    /// Change rows per page and go back to the first page
    pub fn set_page_size(&mut self, limit: usize) {
        if !self.page_size_options.contains(&limit) {
            warn!(limit, options = ?self.page_size_options, "Page size is not one of the offered options");
        }
        self.query.set_limit(limit);
        self.table.set_page_window(self.query.window());
    }

    /// Rows surviving the filter, as last reported by the table
    pub fn total(&mut self) -> usize {
        self.table.total_filtered();
        self.total.load(Ordering::Relaxed)
    }

    /// Location query string mirroring the current page and limit
    pub fn query_string(&self) -> String {
        self.query.to_query_string()
    }

    /// Footer model, `None` when there is nothing to page through
    pub fn footer(&mut self) -> Option<Pagination> {
        let total = self.total();
        (total > 0).then(|| Pagination::new(self.query.window(), total).items_label("users"))
    }

    pub fn view(&mut self) -> TableView<'_, String> {
        self.clamp_page();
        self.table.view()
    }

    // ==================== Row Actions ====================

    pub fn view_details(&self, user_id: &str) -> bool {
        self.table.dispatch_action(user_id, ACTIONS_COLUMN, VIEW_DETAILS_ACTION)
    }

    pub fn edit(&self, user_id: &str) -> bool {
        self.table.dispatch_action(user_id, ACTIONS_COLUMN, EDIT_ACTION)
    }

    /// Pull the page back into range when the total shrank below it
    fn clamp_page(&mut self) {
        let Some(window) = self.table.page_window() else {
            return;
        };
        let page = window.page_index + 1;
        if page != self.query.page() {
            debug!(from = self.query.page(), to = page, "Clamping users page");
            self.query.set_page(page);
            self.table.set_page_window(self.query.window());
        }
    }
}
