//! Column Definition
//!
//! Defines table columns with their cell renderers, sort keys and row actions.

use std::fmt;

use super::sort::SortKey;

type RenderFn<R, N> = Box<dyn Fn(&R) -> N + Send + Sync>;
type SortKeyFn<R> = Box<dyn Fn(&R) -> SortKey + Send + Sync>;
type ActionFn<R> = Box<dyn Fn(&R) + Send + Sync>;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Column width hint, in terminal columns for text output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnWidth {
    /// Sized to the widest header or cell
    #[default]
    Auto,
    /// Exactly this wide; longer content is truncated
    Fixed(usize),
    /// Sized to content within optional bounds
    Flex { min: Option<usize>, max: Option<usize> },
}

impl ColumnWidth {
    /// Resolve the final width for content that is `content` columns wide.
    pub fn resolve(&self, content: usize) -> usize {
        match *self {
            ColumnWidth::Auto => content,
            ColumnWidth::Fixed(width) => width,
            ColumnWidth::Flex { min, max } => {
                let width = content.max(min.unwrap_or(0));
                max.map_or(width, |max| width.min(max))
            }
        }
    }
}

/// Column definition for the DataTable
///
/// `R` is the record type and `N` the display node produced for a cell.
/// A column is sortable only once a sort key is supplied through
/// [`Column::sort_by`]; the display renderer is never used for ordering.
pub struct Column<R, N = String> {
    /// Column identifier, unique within a table
    pub id: String,
    /// Column header label
    pub header: String,
    /// Horizontal alignment of header and cells
    pub align: Alignment,
    /// Width hint
    pub width: ColumnWidth,
    sortable: bool,
    render: Option<RenderFn<R, N>>,
    sort_key: Option<SortKeyFn<R>>,
    actions: Vec<(String, ActionFn<R>)>,
}

impl<R, N> Column<R, N> {
    /// Create a new column with no renderer and no sort key
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            align: Alignment::Left,
            width: ColumnWidth::Auto,
            sortable: false,
            render: None,
            sort_key: None,
            actions: Vec::new(),
        }
    }

    /// Set the cell renderer
    pub fn render(mut self, render: impl Fn(&R) -> N + Send + Sync + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// Make the column sortable using the given key extractor
    pub fn sort_by(mut self, key: impl Fn(&R) -> SortKey + Send + Sync + 'static) -> Self {
        self.sort_key = Some(Box::new(key));
        self.sortable = true;
        self
    }

    /// Keep the sort key but stop header clicks from sorting by this column.
    ///
    /// A sort descriptor supplied by the owner still applies.
    pub fn header_click_disabled(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Set the alignment
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Set fixed width
    pub fn fixed_width(mut self, width: usize) -> Self {
        self.width = ColumnWidth::Fixed(width);
        self
    }

    /// Set flexible width with optional constraints
    pub fn flex_width(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.width = ColumnWidth::Flex { min, max };
        self
    }

    /// Register a named row action, e.g. "edit" on an actions column
    pub fn on_action(
        mut self,
        name: impl Into<String>,
        handler: impl Fn(&R) + Send + Sync + 'static,
    ) -> Self {
        self.actions.push((name.into(), Box::new(handler)));
        self
    }

    /// Whether clicking the header changes the sort
    pub fn is_sortable(&self) -> bool {
        self.sortable && self.sort_key.is_some()
    }

    /// Whether the column can order rows at all
    pub fn has_sort_key(&self) -> bool {
        self.sort_key.is_some()
    }

    /// Compute the sort key for a row
    pub fn sort_key(&self, row: &R) -> Option<SortKey> {
        self.sort_key.as_ref().map(|key| key(row))
    }

    pub(crate) fn key_extractor(&self) -> Option<&(dyn Fn(&R) -> SortKey + Send + Sync)> {
        self.sort_key.as_deref()
    }

    /// Render a cell, `None` when the column has no renderer
    pub fn render_cell(&self, row: &R) -> Option<N> {
        self.render.as_ref().map(|render| render(row))
    }

    /// Names of the registered row actions
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|(name, _)| name.as_str())
    }

    /// Invoke a row action, returning whether a handler ran
    pub fn run_action(&self, name: &str, row: &R) -> bool {
        match self.actions.iter().find(|(n, _)| n == name) {
            Some((_, handler)) => {
                handler(row);
                true
            }
            None => false,
        }
    }
}

impl<R, N> fmt::Debug for Column<R, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("align", &self.align)
            .field("width", &self.width)
            .field("sortable", &self.is_sortable())
            .field("actions", &self.action_names().collect::<Vec<_>>())
            .finish()
    }
}
