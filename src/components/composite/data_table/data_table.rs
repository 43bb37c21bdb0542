//! DataTable Engine
//!
//! Filters, sorts and paginates a list of records against a column schema and
//! decides what the table body shows: skeleton rows, data rows or the empty
//! state. Rendering of the resulting [`TableView`] is left to the caller.

use std::sync::Arc;

use tracing::{debug, warn};

use super::column::{Alignment, Column, ColumnWidth};
use super::pagination::{PageWindow, PaginationConfig};
use super::sort::{SortDescriptor, SortIndicator, next_sort, sort_indices};
use super::state::StateSlot;
use crate::constants::DEFAULT_SKELETON_ROWS;

type RowIdFn<R> = Box<dyn Fn(&R) -> String + Send + Sync>;
type FilterFn<R, F> = Box<dyn Fn(&R, &F) -> bool + Send + Sync>;
type RowPredicate<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;

/// Header decoration for one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell<'a> {
    pub id: &'a str,
    pub header: &'a str,
    pub align: Alignment,
    pub width: ColumnWidth,
    /// `None` for columns that cannot be sorted by a header click
    pub sort: Option<SortIndicator>,
}

impl HeaderCell<'_> {
    pub fn is_sortable(&self) -> bool {
        self.sort.is_some()
    }
}

/// One cell of a rendered row
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<N> {
    Content(N),
    /// Row is being refreshed; draw a placeholder
    Skeleton,
    /// Column has no renderer
    Blank,
}

/// A rendered data row
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow<N> {
    pub id: String,
    pub cells: Vec<Cell<N>>,
}

/// What the table body shows
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody<'a, N> {
    /// Loading with no data yet: this many placeholder rows
    Skeleton { rows: usize },
    Rows(Vec<RenderedRow<N>>),
    /// No row survived filtering and slicing; one cell spans every column
    Empty { fallback: Option<&'a N> },
}

/// Snapshot of everything needed to draw the table
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a, N> {
    pub headers: Vec<HeaderCell<'a>>,
    pub body: TableBody<'a, N>,
    /// Rows surviving the filter
    pub total: usize,
    /// Clamped page window, when paginated
    pub window: Option<PageWindow>,
}

impl<N> TableView<'_, N> {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.body, TableBody::Empty { .. })
    }
}

/// Generic in-memory table engine
///
/// `R` is the record type, `F` the caller's filter state and `N` the display
/// node produced by column renderers.
pub struct DataTable<R, F = (), N = String> {
    columns: Vec<Column<R, N>>,
    data: Arc<Vec<R>>,
    row_id: RowIdFn<R>,
    sort: StateSlot<Option<SortDescriptor>>,
    filter_state: StateSlot<F>,
    filter_fn: Option<FilterFn<R, F>>,
    pagination: Option<PaginationConfig>,
    loading: bool,
    skeleton_rows: usize,
    row_skeleton: Option<RowPredicate<R>>,
    empty_fallback: Option<N>,
    /// Filtered and sorted positions into `data`; `None` when stale
    processed: Option<Vec<usize>>,
    last_total: Option<usize>,
}

impl<R, F: Default, N> DataTable<R, F, N> {
    /// Create a table with no data, no sort and the default filter state
    pub fn new(
        columns: Vec<Column<R, N>>,
        row_id: impl Fn(&R) -> String + Send + Sync + 'static,
    ) -> Self {
        debug_assert!(has_unique_ids(&columns), "column ids must be unique");
        Self {
            columns,
            data: Arc::new(Vec::new()),
            row_id: Box::new(row_id),
            sort: StateSlot::uncontrolled(None),
            filter_state: StateSlot::uncontrolled(F::default()),
            filter_fn: None,
            pagination: None,
            loading: false,
            skeleton_rows: DEFAULT_SKELETON_ROWS,
            row_skeleton: None,
            empty_fallback: None,
            processed: None,
            last_total: None,
        }
    }
}

impl<R, F, N> DataTable<R, F, N> {
    // ==================== Builder ====================

    pub fn with_data(mut self, data: impl Into<Arc<Vec<R>>>) -> Self {
        self.set_data(data.into());
        self
    }

    /// Table-owned sort seeded with `sort`
    pub fn with_default_sort(mut self, sort: Option<SortDescriptor>) -> Self {
        self.sort = StateSlot::uncontrolled(sort);
        self.invalidate();
        self
    }

    /// Owner-controlled sort; header clicks only call `on_change`
    pub fn with_controlled_sort(
        mut self,
        sort: Option<SortDescriptor>,
        on_change: impl Fn(&Option<SortDescriptor>) + Send + Sync + 'static,
    ) -> Self {
        self.sort = StateSlot::controlled(sort, on_change);
        self.invalidate();
        self
    }

    /// Observe sort change requests alongside any owner callback
    pub fn on_sort_change(
        mut self,
        observer: impl Fn(&Option<SortDescriptor>) + Send + Sync + 'static,
    ) -> Self {
        self.sort = self.sort.with_observer(observer);
        self
    }

    /// Predicate deciding which records are shown for the current filter state
    pub fn with_filter(mut self, filter: impl Fn(&R, &F) -> bool + Send + Sync + 'static) -> Self {
        self.filter_fn = Some(Box::new(filter));
        self.invalidate();
        self
    }

    /// Table-owned filter state seeded with `state`
    pub fn with_default_filter_state(mut self, state: F) -> Self {
        self.filter_state = StateSlot::uncontrolled(state);
        self.invalidate();
        self
    }

    /// Owner-controlled filter state; changes only call `on_change`
    pub fn with_controlled_filter_state(
        mut self,
        state: F,
        on_change: impl Fn(&F) + Send + Sync + 'static,
    ) -> Self {
        self.filter_state = StateSlot::controlled(state, on_change);
        self.invalidate();
        self
    }

    /// Observe filter change requests alongside any owner callback
    pub fn on_filter_state_change(mut self, observer: impl Fn(&F) + Send + Sync + 'static) -> Self {
        self.filter_state = self.filter_state.with_observer(observer);
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.set_pagination(Some(pagination));
        self
    }

    /// Number of placeholder rows shown while loading with no data
    pub fn with_skeleton_rows(mut self, rows: usize) -> Self {
        self.skeleton_rows = rows;
        self
    }

    /// Marks individual rows as placeholders while a refresh is in flight
    pub fn with_row_skeleton_predicate(
        mut self,
        predicate: impl Fn(&R) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.row_skeleton = Some(Box::new(predicate));
        self
    }

    /// Content shown when no rows are visible
    pub fn with_empty_fallback(mut self, fallback: N) -> Self {
        self.empty_fallback = Some(fallback);
        self
    }

    // ==================== Inputs ====================

    /// Replace the records. The same allocation is treated as unchanged.
    pub fn set_data(&mut self, data: Arc<Vec<R>>) {
        if Arc::ptr_eq(&self.data, &data) {
            return;
        }
        self.data = data;
        self.invalidate();
    }

    pub fn data(&self) -> &Arc<Vec<R>> {
        &self.data
    }

    pub fn set_columns(&mut self, columns: Vec<Column<R, N>>) {
        debug_assert!(has_unique_ids(&columns), "column ids must be unique");
        self.columns = columns;
        self.invalidate();
    }

    pub fn columns(&self) -> &[Column<R, N>] {
        &self.columns
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_row_skeleton_predicate(
        &mut self,
        predicate: Option<Box<dyn Fn(&R) -> bool + Send + Sync>>,
    ) {
        self.row_skeleton = predicate;
    }

    pub fn set_pagination(&mut self, pagination: Option<PaginationConfig>) {
        self.pagination = pagination;
        // A new owner has not heard the current total yet.
        self.last_total = None;
        self.invalidate();
    }

    /// Move to another page window. Ignored when the table is not paginated.
    pub fn set_page_window(&mut self, window: PageWindow) {
        match &mut self.pagination {
            Some(pagination) => pagination.window = window,
            None => debug!("Ignoring page window on an unpaginated table"),
        }
    }

    /// Clamped page window, `None` when the table is not paginated
    pub fn page_window(&mut self) -> Option<PageWindow> {
        let total = self.total_filtered();
        self.pagination.as_ref().map(|p| p.window.clamp(total))
    }

    // ==================== Sort ====================

    pub fn sort(&self) -> Option<&SortDescriptor> {
        self.sort.get().as_ref()
    }

    /// Request a sort change, as a header click does
    pub fn set_sort(&mut self, next: Option<SortDescriptor>) {
        let changed = *self.sort.get() != next;
        if self.sort.request(next) && changed {
            self.invalidate();
        }
    }

    /// Accept the owner's sort in controlled mode
    pub fn sync_sort(&mut self, sort: Option<SortDescriptor>) {
        let changed = *self.sort.get() != sort;
        if self.sort.sync(sort) && changed {
            self.invalidate();
        }
    }

    /// Handle a click on a column header.
    ///
    /// Returns false when the column is unknown or not sortable.
    pub fn click_header(&mut self, column_id: &str) -> bool {
        let sortable = self
            .columns
            .iter()
            .any(|c| c.id == column_id && c.is_sortable());
        if !sortable {
            debug!(column = column_id, "Header click on non-sortable column");
            return false;
        }

        let next = next_sort(self.sort(), column_id);
        self.set_sort(next);
        true
    }

    // ==================== Filter ====================

    pub fn filter_state(&self) -> &F {
        self.filter_state.get()
    }

    /// Request a filter state change from the filter UI
    pub fn set_filter_state(&mut self, next: F) {
        if self.filter_state.request(next) {
            self.invalidate();
        }
    }

    /// Accept the owner's filter state in controlled mode
    pub fn sync_filter_state(&mut self, state: F) {
        if self.filter_state.sync(state) {
            self.invalidate();
        }
    }

    pub fn set_filter(&mut self, filter: Option<Box<dyn Fn(&R, &F) -> bool + Send + Sync>>) {
        self.filter_fn = filter;
        self.invalidate();
    }

    // ==================== Outputs ====================

    /// Number of records surviving the filter
    pub fn total_filtered(&mut self) -> usize {
        self.processed().len()
    }

    /// Records on the current page, in display order
    pub fn visible_rows(&mut self) -> Vec<&R> {
        self.ensure_processed();
        let this = &*self;
        this.visible_indices()
            .iter()
            .map(|&i| &this.data[i])
            .collect()
    }

    /// Header decorations reflecting the current sort
    pub fn headers(&self) -> Vec<HeaderCell<'_>> {
        let sort = self.sort();
        self.columns
            .iter()
            .map(|col| HeaderCell {
                id: &col.id,
                header: &col.header,
                align: col.align,
                width: col.width,
                sort: col.is_sortable().then(|| match sort {
                    Some(s) if s.column_id == col.id => s.direction.into(),
                    _ => SortIndicator::Unsorted,
                }),
            })
            .collect()
    }

    /// Everything needed to draw the table in its current state
    pub fn view(&mut self) -> TableView<'_, N> {
        self.ensure_processed();
        let this = &*self;
        let total = this.processed.as_deref().map_or(0, <[usize]>::len);

        let body = if this.loading && this.data.is_empty() {
            TableBody::Skeleton {
                rows: this.skeleton_rows,
            }
        } else {
            let rows: Vec<RenderedRow<N>> = this
                .visible_indices()
                .iter()
                .map(|&i| this.render_row(&this.data[i]))
                .collect();
            if rows.is_empty() {
                TableBody::Empty {
                    fallback: this.empty_fallback.as_ref(),
                }
            } else {
                TableBody::Rows(rows)
            }
        };

        TableView {
            headers: this.headers(),
            body,
            total,
            window: this.pagination.as_ref().map(|p| p.window.clamp(total)),
        }
    }

    /// Run a named row action of a column on the record with `row_id`.
    ///
    /// Returns whether a handler ran.
    pub fn dispatch_action(&self, row_id: &str, column_id: &str, action: &str) -> bool {
        let Some(column) = self.columns.iter().find(|c| c.id == column_id) else {
            return false;
        };
        let Some(row) = self.data.iter().find(|r| (self.row_id)(r) == row_id) else {
            debug!(row = row_id, "Row action on unknown row");
            return false;
        };
        column.run_action(action, row)
    }

    // ==================== Internals ====================

    fn invalidate(&mut self) {
        self.processed = None;
    }

    fn processed(&mut self) -> &[usize] {
        self.ensure_processed();
        self.processed.as_deref().unwrap_or(&[])
    }

    fn ensure_processed(&mut self) {
        if self.processed.is_some() {
            return;
        }

        let mut indices: Vec<usize> = match &self.filter_fn {
            Some(filter) => {
                let state = self.filter_state.get();
                self.data
                    .iter()
                    .enumerate()
                    .filter(|&(_, row)| filter(row, state))
                    .map(|(i, _)| i)
                    .collect()
            }
            None => (0..self.data.len()).collect(),
        };

        if let Some(sort) = self.sort.get() {
            let key = self
                .columns
                .iter()
                .find(|c| c.id == sort.column_id)
                .and_then(|c| c.key_extractor());
            match key {
                Some(key) => sort_indices(&self.data, &mut indices, key, sort.direction),
                None => warn!(column = %sort.column_id, "Sort column not found, rows left unsorted"),
            }
        }

        let total = indices.len();
        debug!(rows = self.data.len(), total, "Recomputed table rows");
        self.processed = Some(indices);

        if self.last_total != Some(total) {
            if let Some(pagination) = &self.pagination {
                pagination.notify_total(total);
                self.last_total = Some(total);
            }
        }
    }

    fn visible_indices(&self) -> &[usize] {
        let processed = self.processed.as_deref().unwrap_or(&[]);
        match &self.pagination {
            Some(pagination) => &processed[pagination.window.range(processed.len())],
            None => processed,
        }
    }

    fn render_row(&self, row: &R) -> RenderedRow<N> {
        let skeleton =
            self.loading && self.row_skeleton.as_ref().is_some_and(|predicate| predicate(row));
        let cells = self
            .columns
            .iter()
            .map(|col| {
                if skeleton {
                    return Cell::Skeleton;
                }
                col.render_cell(row).map_or(Cell::Blank, Cell::Content)
            })
            .collect();

        RenderedRow {
            id: (self.row_id)(row),
            cells,
        }
    }
}

fn has_unique_ids<R, N>(columns: &[Column<R, N>]) -> bool {
    let mut ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
    ids.sort_unstable();
    ids.windows(2).all(|pair| pair[0] != pair[1])
}
